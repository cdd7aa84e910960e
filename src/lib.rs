//! System information rendered next to an ASCII-art logo.

pub mod ascii;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod fact;
pub mod system;
pub mod ui;

pub use ascii::Template;
pub use color::{ColorResolver, InvalidColorError};
pub use config::Config;
pub use error::{ArcheyError, Result};
pub use fact::{Fact, FactLine};
pub use ui::{RenderOptions, Renderer};
