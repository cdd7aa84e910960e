//! Errors surfaced by configuration loading, fact gathering and rendering.

use std::path::PathBuf;

use crate::color::InvalidColorError;

#[derive(Debug, thiserror::Error)]
pub enum ArcheyError {
    #[error(transparent)]
    InvalidColor(#[from] InvalidColorError),

    #[error("invalid memory unit '{0}'")]
    InvalidMemoryUnit(String),

    #[error("invalid swap unit '{0}'")]
    InvalidSwapUnit(String),

    #[error("invalid disk unit '{0}'")]
    InvalidDiskUnit(String),

    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("system probe failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ArcheyError>;
