//! The facts archey knows how to show, and how they become display lines.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::{Config, Show};
use crate::error::{ArcheyError, Result};
use crate::system::{SystemInfo, Usage};

/// Placeholder for facts that could not be determined.
pub const UNKNOWN: &str = "None";

/// One piece of system information, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Fact {
    Os,
    Kernel,
    User,
    Hostname,
    Uptime,
    UpSince,
    Wm,
    De,
    Gtk2Theme,
    Gtk2IconTheme,
    Gtk2Font,
    Gtk2CursorTheme,
    Gtk3Theme,
    Gtk3IconTheme,
    Gtk3Font,
    Gtk3CursorTheme,
    Terminal,
    Shell,
    Editor,
    Packages,
    Memory,
    Swap,
    Cpu,
    Root,
    Home,
}

impl Fact {
    pub const ALL: [Fact; 25] = [
        Fact::Os,
        Fact::Kernel,
        Fact::User,
        Fact::Hostname,
        Fact::Uptime,
        Fact::UpSince,
        Fact::Wm,
        Fact::De,
        Fact::Gtk2Theme,
        Fact::Gtk2IconTheme,
        Fact::Gtk2Font,
        Fact::Gtk2CursorTheme,
        Fact::Gtk3Theme,
        Fact::Gtk3IconTheme,
        Fact::Gtk3Font,
        Fact::Gtk3CursorTheme,
        Fact::Terminal,
        Fact::Shell,
        Fact::Editor,
        Fact::Packages,
        Fact::Memory,
        Fact::Swap,
        Fact::Cpu,
        Fact::Root,
        Fact::Home,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Fact::Os => "OS",
            Fact::Kernel => "Kernel",
            Fact::User => "User",
            Fact::Hostname => "Hostname",
            Fact::Uptime => "Uptime",
            Fact::UpSince => "Up since",
            Fact::Wm => "Window Manager",
            Fact::De => "Desktop Environment",
            Fact::Gtk2Theme => "GTK2 Theme",
            Fact::Gtk2IconTheme => "GTK2 Icon Theme",
            Fact::Gtk2Font => "GTK2 Font",
            Fact::Gtk2CursorTheme => "GTK2 Cursor Theme",
            Fact::Gtk3Theme => "GTK3 Theme",
            Fact::Gtk3IconTheme => "GTK3 Icon Theme",
            Fact::Gtk3Font => "GTK3 Font",
            Fact::Gtk3CursorTheme => "GTK3 Cursor Theme",
            Fact::Terminal => "Terminal",
            Fact::Shell => "Shell",
            Fact::Editor => "Editor",
            Fact::Packages => "Packages",
            Fact::Memory => "Memory",
            Fact::Swap => "Swap",
            Fact::Cpu => "CPU",
            Fact::Root => "Root",
            Fact::Home => "Home",
        }
    }
}

/// A label and its already-formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactLine {
    pub label: String,
    pub value: String,
}

impl FactLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Mb,
    Gb,
}

impl FromStr for SizeUnit {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mb" => Ok(SizeUnit::Mb),
            "gb" => Ok(SizeUnit::Gb),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeUnit::Mb => f.write_str("MB"),
            SizeUnit::Gb => f.write_str("GB"),
        }
    }
}

impl SizeUnit {
    fn divisor(self) -> f64 {
        match self {
            SizeUnit::Mb => 1024.0 * 1024.0,
            SizeUnit::Gb => 1024.0 * 1024.0 * 1024.0,
        }
    }

    /// `used / total`, one decimal, e.g. `3.2 GB / 15.5 GB`.
    pub fn format_usage(self, usage: Usage) -> String {
        let d = self.divisor();
        format!(
            "{:.1} {unit} / {:.1} {unit}",
            usage.used as f64 / d,
            usage.total as f64 / d,
            unit = self
        )
    }
}

/// Presentation choices for turning [`SystemInfo`] into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactOptions {
    pub show: Show,
    pub memory_unit: SizeUnit,
    pub swap_unit: SizeUnit,
    pub disk_unit: SizeUnit,
    pub no_arch: bool,
    pub path_full: bool,
    pub shell_full: bool,
}

impl FactOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        let options = &config.options;
        Ok(Self {
            show: config.show.clone(),
            memory_unit: parse_unit(&options.memory_unit, ArcheyError::InvalidMemoryUnit)?,
            swap_unit: parse_unit(&options.swap_unit, ArcheyError::InvalidSwapUnit)?,
            disk_unit: parse_unit(&options.disk_unit, ArcheyError::InvalidDiskUnit)?,
            no_arch: options.no_arch,
            path_full: options.path_full,
            shell_full: options.shell_full,
        })
    }

    pub fn shows(&self, fact: Fact) -> bool {
        self.show.shows(fact)
    }
}

fn parse_unit(raw: &Option<String>, err: fn(String) -> ArcheyError) -> Result<SizeUnit> {
    match raw.as_deref() {
        None | Some("") => Ok(SizeUnit::Gb),
        Some(unit) => unit.parse().map_err(|_| err(unit.to_string())),
    }
}

/// Builds the ordered lines for every fact the options show, then the
/// extra paths.
pub fn collect(info: &SystemInfo, options: &FactOptions) -> Vec<FactLine> {
    let mut lines = Vec::new();
    for fact in Fact::ALL {
        if !options.shows(fact) {
            continue;
        }
        let label = match fact {
            Fact::Root if options.path_full => "/".to_string(),
            Fact::Home if options.path_full => "/home".to_string(),
            _ => fact.label().to_string(),
        };
        lines.push(FactLine::new(label, value_of(fact, info, options)));
    }

    for extra in &info.paths {
        lines.push(FactLine::new(
            path_label(&extra.path, options.path_full),
            usage_or_unknown(extra.usage, options.disk_unit),
        ));
    }
    lines
}

fn value_of(fact: Fact, info: &SystemInfo, options: &FactOptions) -> String {
    match fact {
        Fact::Os => match (&info.machine, options.no_arch) {
            (Some(machine), false) => format!("{} {}", info.os_name, machine),
            _ => info.os_name.clone(),
        },
        Fact::Kernel => or_unknown(&info.kernel),
        Fact::User => or_unknown(&info.user),
        Fact::Hostname => or_unknown(&info.hostname),
        Fact::Uptime => format_uptime(info.uptime_secs),
        Fact::UpSince => or_unknown(&info.up_since),
        Fact::Wm => or_unknown(&info.wm),
        Fact::De => or_unknown(&info.de),
        Fact::Gtk2Theme => or_unknown(&info.gtk2.theme),
        Fact::Gtk2IconTheme => or_unknown(&info.gtk2.icons),
        Fact::Gtk2Font => or_unknown(&info.gtk2.font),
        Fact::Gtk2CursorTheme => or_unknown(&info.gtk2.cursor),
        Fact::Gtk3Theme => or_unknown(&info.gtk3.theme),
        Fact::Gtk3IconTheme => or_unknown(&info.gtk3.icons),
        Fact::Gtk3Font => or_unknown(&info.gtk3.font),
        Fact::Gtk3CursorTheme => or_unknown(&info.gtk3.cursor),
        Fact::Terminal => or_unknown(&info.terminal),
        Fact::Shell => match &info.shell {
            Some(shell) if options.shell_full => shell.clone(),
            Some(shell) => Path::new(shell)
                .file_name()
                .map(|name| name.to_string_lossy().to_uppercase())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            None => UNKNOWN.to_string(),
        },
        Fact::Editor => or_unknown(&info.editor),
        Fact::Packages => info
            .packages
            .map_or_else(|| UNKNOWN.to_string(), |count| count.to_string()),
        Fact::Memory => usage_or_unknown(info.memory, options.memory_unit),
        Fact::Swap => usage_or_unknown(info.swap, options.swap_unit),
        Fact::Cpu => or_unknown(&info.cpu),
        Fact::Root => usage_or_unknown(info.root, options.disk_unit),
        Fact::Home => usage_or_unknown(info.home, options.disk_unit),
    }
}

fn or_unknown(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn usage_or_unknown(usage: Option<Usage>, unit: SizeUnit) -> String {
    usage.map_or_else(|| UNKNOWN.to_string(), |usage| unit.format_usage(usage))
}

pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{}d {}h {}m", days, hours, minutes)
}

/// `/var/cache` becomes `Cache`, or stays as is with `full`.
fn path_label(path: &str, full: bool) -> String {
    if full {
        return path.to_string();
    }
    let base = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| path.to_string());
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::PathUsage;
    use pretty_assertions::assert_eq;

    const GIB: u64 = 1024 * 1024 * 1024;

    fn options() -> FactOptions {
        FactOptions::from_config(&Config::default()).unwrap()
    }

    fn sample() -> SystemInfo {
        SystemInfo {
            os_name: "Arch Linux".to_string(),
            machine: Some("x86_64".to_string()),
            kernel: Some("6.1.0-arch1".to_string()),
            user: Some("alex".to_string()),
            shell: Some("/usr/bin/zsh".to_string()),
            memory: Some(Usage {
                used: 3 * GIB / 2,
                total: 16 * GIB,
            }),
            uptime_secs: 93784,
            paths: vec![PathUsage {
                path: "/var/cache".to_string(),
                usage: None,
            }],
            ..SystemInfo::default()
        }
    }

    fn value(lines: &[FactLine], label: &str) -> String {
        lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.clone())
            .unwrap_or_default()
    }

    #[test]
    fn lists_every_fact_in_order_then_paths() {
        let lines = collect(&sample(), &options());
        assert_eq!(lines.len(), Fact::ALL.len() + 1);
        assert_eq!(lines[0].label, "OS");
        assert_eq!(lines[1].label, "Kernel");
        assert_eq!(lines[24].label, "Home");
        assert_eq!(lines[25], FactLine::new("Cache", UNKNOWN));
    }

    #[test]
    fn hidden_facts_are_skipped() {
        let mut opts = options();
        opts.show.set(Fact::Kernel, false);
        opts.show.set(Fact::Os, true);
        let lines = collect(&sample(), &opts);
        assert_eq!(lines[0].label, "OS");
        assert_eq!(lines[1].label, "User");
    }

    #[test]
    fn formats_values() {
        let lines = collect(&sample(), &options());
        assert_eq!(value(&lines, "OS"), "Arch Linux x86_64");
        assert_eq!(value(&lines, "Shell"), "ZSH");
        assert_eq!(value(&lines, "Memory"), "1.5 GB / 16.0 GB");
        assert_eq!(value(&lines, "Uptime"), "1d 2h 3m");
        assert_eq!(value(&lines, "Editor"), UNKNOWN);
        assert_eq!(value(&lines, "Packages"), UNKNOWN);
    }

    #[test]
    fn full_paths_and_shell() {
        let mut opts = options();
        opts.path_full = true;
        opts.shell_full = true;
        opts.no_arch = true;
        opts.memory_unit = SizeUnit::Mb;
        let lines = collect(&sample(), &opts);
        assert_eq!(value(&lines, "OS"), "Arch Linux");
        assert_eq!(value(&lines, "Shell"), "/usr/bin/zsh");
        assert_eq!(value(&lines, "Memory"), "1536.0 MB / 16384.0 MB");
        assert!(lines.iter().any(|line| line.label == "/home"));
        assert_eq!(lines.last().unwrap().label, "/var/cache");
    }

    #[test]
    fn invalid_units_are_rejected() {
        let mut config = Config::default();
        config.options.disk_unit = Some("tb".to_string());
        let err = FactOptions::from_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "invalid disk unit 'tb'");

        config.options.disk_unit = Some("MB".to_string());
        config.options.memory_unit = Some("kb".to_string());
        let err = FactOptions::from_config(&config).unwrap_err();
        assert_eq!(err.to_string(), "invalid memory unit 'kb'");
    }
}
