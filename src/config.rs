use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ArcheyError, Result};
use crate::fact::Fact;
use crate::ui::{ColorScheme, DEFAULT_SEPARATOR, RenderOptions};

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub show: Show,
    pub options: Options,
    pub colors: Colors,
}

/// Per-fact visibility; a missing entry means shown.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Show {
    pub os: Option<bool>,
    pub kernel: Option<bool>,
    pub user: Option<bool>,
    pub hostname: Option<bool>,
    pub uptime: Option<bool>,
    pub up_since: Option<bool>,
    pub wm: Option<bool>,
    pub de: Option<bool>,
    pub gtk2_theme: Option<bool>,
    pub gtk2_icon_theme: Option<bool>,
    pub gtk2_font: Option<bool>,
    pub gtk2_cursor_theme: Option<bool>,
    pub gtk3_theme: Option<bool>,
    pub gtk3_icon_theme: Option<bool>,
    pub gtk3_font: Option<bool>,
    pub gtk3_cursor_theme: Option<bool>,
    pub terminal: Option<bool>,
    pub shell: Option<bool>,
    pub editor: Option<bool>,
    pub packages: Option<bool>,
    pub memory: Option<bool>,
    pub swap: Option<bool>,
    pub cpu: Option<bool>,
    pub root: Option<bool>,
    pub home: Option<bool>,
}

impl Show {
    pub fn shows(&self, fact: Fact) -> bool {
        let value = match fact {
            Fact::Os => self.os,
            Fact::Kernel => self.kernel,
            Fact::User => self.user,
            Fact::Hostname => self.hostname,
            Fact::Uptime => self.uptime,
            Fact::UpSince => self.up_since,
            Fact::Wm => self.wm,
            Fact::De => self.de,
            Fact::Gtk2Theme => self.gtk2_theme,
            Fact::Gtk2IconTheme => self.gtk2_icon_theme,
            Fact::Gtk2Font => self.gtk2_font,
            Fact::Gtk2CursorTheme => self.gtk2_cursor_theme,
            Fact::Gtk3Theme => self.gtk3_theme,
            Fact::Gtk3IconTheme => self.gtk3_icon_theme,
            Fact::Gtk3Font => self.gtk3_font,
            Fact::Gtk3CursorTheme => self.gtk3_cursor_theme,
            Fact::Terminal => self.terminal,
            Fact::Shell => self.shell,
            Fact::Editor => self.editor,
            Fact::Packages => self.packages,
            Fact::Memory => self.memory,
            Fact::Swap => self.swap,
            Fact::Cpu => self.cpu,
            Fact::Root => self.root,
            Fact::Home => self.home,
        };
        value.unwrap_or(true)
    }

    pub fn set(&mut self, fact: Fact, shown: bool) {
        let slot = match fact {
            Fact::Os => &mut self.os,
            Fact::Kernel => &mut self.kernel,
            Fact::User => &mut self.user,
            Fact::Hostname => &mut self.hostname,
            Fact::Uptime => &mut self.uptime,
            Fact::UpSince => &mut self.up_since,
            Fact::Wm => &mut self.wm,
            Fact::De => &mut self.de,
            Fact::Gtk2Theme => &mut self.gtk2_theme,
            Fact::Gtk2IconTheme => &mut self.gtk2_icon_theme,
            Fact::Gtk2Font => &mut self.gtk2_font,
            Fact::Gtk2CursorTheme => &mut self.gtk2_cursor_theme,
            Fact::Gtk3Theme => &mut self.gtk3_theme,
            Fact::Gtk3IconTheme => &mut self.gtk3_icon_theme,
            Fact::Gtk3Font => &mut self.gtk3_font,
            Fact::Gtk3CursorTheme => &mut self.gtk3_cursor_theme,
            Fact::Terminal => &mut self.terminal,
            Fact::Shell => &mut self.shell,
            Fact::Editor => &mut self.editor,
            Fact::Packages => &mut self.packages,
            Fact::Memory => &mut self.memory,
            Fact::Swap => &mut self.swap,
            Fact::Cpu => &mut self.cpu,
            Fact::Root => &mut self.root,
            Fact::Home => &mut self.home,
        };
        *slot = Some(shown);
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    pub sep: Option<String>,
    pub memory_unit: Option<String>,
    pub swap_unit: Option<String>,
    pub disk_unit: Option<String>,
    pub paths: Vec<String>,
    pub path_full: bool,
    pub shell_full: bool,
    pub no_arch: bool,
    pub up_since_format: Option<String>,
    pub no_color: bool,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Colors {
    pub name: Option<String>,
    pub text: Option<String>,
    pub sep: Option<String>,
    pub body: Option<String>,
}

impl Config {
    /// Loads `explicit` if given, otherwise the first config found in the
    /// usual places, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ArcheyError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::from_file(path);
        }

        match search_paths().into_iter().find(|path| path.is_file()) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parses TOML, or JSON when the file has a `.json` extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path).map_err(|source| ArcheyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json {
            serde_json::from_str(&content).map_err(|source| ArcheyError::ConfigJson {
                path: path.to_path_buf(),
                source,
            })
        } else {
            toml::from_str(&content).map_err(|source| ArcheyError::ConfigToml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        let pick = |value: &Option<String>| value.clone().unwrap_or_default();
        RenderOptions {
            separator: self
                .options
                .sep
                .clone()
                .filter(|sep| !sep.is_empty())
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            colors: ColorScheme {
                label: pick(&self.colors.name),
                separator: pick(&self.colors.sep),
                value: pick(&self.colors.text),
                body: pick(&self.colors.body),
            },
            color_enabled: !self.options.no_color,
        }
    }
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("config.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("archey").join("config.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".archey").join("config.toml"));
    }
    paths.push(PathBuf::from("/etc/archey/config.toml"));
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(exe_dir.join("config.json"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_toml_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "config.toml",
            r#"
            [show]
            swap = false
            up_since = false

            [options]
            sep = " ->"
            memory_unit = "mb"
            paths = ["/tmp", "/usr"]
            shell_full = true

            [colors]
            name = "150"
            body = "111,69"
            "#,
        );

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.show.shows(Fact::Swap));
        assert!(!config.show.shows(Fact::UpSince));
        assert!(config.show.shows(Fact::Kernel));
        assert_eq!(config.options.memory_unit.as_deref(), Some("mb"));
        assert_eq!(config.options.paths, vec!["/tmp", "/usr"]);
        assert!(config.options.shell_full);

        let render = config.render_options();
        assert_eq!(render.separator, " ->");
        assert_eq!(render.colors.label, "150");
        assert_eq!(render.colors.value, "");
        assert!(render.color_enabled);
    }

    #[test]
    fn parses_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "config.json",
            r#"{"options": {"no_color": true}, "colors": {"text": "white"}}"#,
        );
        let config = Config::from_file(&path).unwrap();
        assert!(config.options.no_color);
        assert_eq!(config.colors.text.as_deref(), Some("white"));
        assert!(!config.render_options().color_enabled);
    }

    #[test]
    fn unknown_fact_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "bad.toml", "[show]\ngpu = false\n");
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ArcheyError::ConfigToml { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ArcheyError::ConfigNotFound { .. }));
    }

    #[test]
    fn defaults_render_with_colon_and_colors() {
        let render = Config::default().render_options();
        assert_eq!(render, RenderOptions::default());
    }
}
