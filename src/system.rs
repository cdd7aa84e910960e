use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use sysinfo::{Disks, System};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;

/// pacman's local database of installed packages
const PACMAN_DIR: &str = "/var/lib/pacman/local";

pub const DEFAULT_UP_SINCE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Process name to display name, checked in order; the first running entry wins.
pub const WINDOW_MANAGERS: &[(&str, &str)] = &[
    ("awesome", "Awesome"),
    ("blackbox", "Blackbox"),
    ("bspwm", "bspwm"),
    ("dwm", "DWM"),
    ("enlightenment", "Enlightenment"),
    ("fluxbox", "Fluxbox"),
    ("fvwm", "FVWM"),
    ("herbstluftwm", "herbstluftwm"),
    ("i3", "i3"),
    ("icewm", "IceWM"),
    ("kwin", "KWin"),
    ("metacity", "Metacity"),
    ("musca", "Musca"),
    ("openbox", "Openbox"),
    ("pekwm", "PekWM"),
    ("ratpoison", "ratpoison"),
    ("scrotwm", "ScrotWM"),
    ("subtle", "subtle"),
    ("monsterwm", "MonsterWM"),
    ("wmaker", "Window Maker"),
    ("wmfs", "Wmfs"),
    ("wmii", "wmii"),
    ("xfwm4", "Xfwm"),
    ("mutter", "Mutter"),
    ("qtile", "QTile"),
    ("wingo", "Wingo"),
];

pub const DESKTOP_ENVIRONMENTS: &[(&str, &str)] = &[
    ("cinnamon", "Cinnamon"),
    ("gnome-session", "GNOME"),
    ("ksmserver", "KDE"),
    ("mate-session", "MATE"),
    ("xfce4-session", "Xfce"),
    ("lxsession", "LXDE"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathUsage {
    pub path: String,
    pub usage: Option<Usage>,
}

/// Values read from a gtkrc / settings.ini file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GtkInfo {
    pub theme: Option<String>,
    pub icons: Option<String>,
    pub font: Option<String>,
    pub cursor: Option<String>,
}

/// Raw facts; `None` wherever a probe came back empty.
#[derive(Debug, Clone, Default)]
pub struct SystemInfo {
    pub os_name: String,
    pub machine: Option<String>,
    pub kernel: Option<String>,
    pub user: Option<String>,
    pub hostname: Option<String>,
    pub uptime_secs: u64,
    pub up_since: Option<String>,
    pub wm: Option<String>,
    pub de: Option<String>,
    pub gtk2: GtkInfo,
    pub gtk3: GtkInfo,
    pub terminal: Option<String>,
    pub shell: Option<String>,
    pub editor: Option<String>,
    pub packages: Option<usize>,
    pub memory: Option<Usage>,
    pub swap: Option<Usage>,
    pub cpu: Option<String>,
    pub root: Option<Usage>,
    pub home: Option<Usage>,
    pub paths: Vec<PathUsage>,
}

pub async fn get_system_info(config: &Config) -> Result<SystemInfo> {
    let os_task = tokio::task::spawn_blocking(os_info::get);
    let sys_task = tokio::task::spawn_blocking(|| {
        let mut sys = System::new_all();
        sys.refresh_all();
        sys
    });
    let disks_task = tokio::task::spawn_blocking(Disks::new_with_refreshed_list);
    let gtk_task = tokio::task::spawn_blocking(|| {
        let gtk2 = dirs::home_dir().map(|home| home.join(".gtkrc-2.0"));
        let gtk3 = dirs::config_dir().map(|dir| dir.join("gtk-3.0").join("settings.ini"));
        (read_gtk_settings(gtk2), read_gtk_settings(gtk3))
    });
    let packages_task = tokio::task::spawn_blocking(|| count_dirs(Path::new(PACMAN_DIR)));

    let (os, sys, disks, gtk, packages) =
        tokio::join!(os_task, sys_task, disks_task, gtk_task, packages_task);
    let (os, sys, disks, (gtk2, gtk3), packages) = (os?, sys?, disks?, gtk?, packages?);

    let running: HashSet<String> = sys
        .processes()
        .values()
        .map(|process| process.name().to_string())
        .collect();
    debug!(processes = running.len(), "scanned process table");

    let mounts: Vec<(PathBuf, Usage)> = disks
        .list()
        .iter()
        .map(|disk| {
            let usage = Usage {
                used: disk.total_space().saturating_sub(disk.available_space()),
                total: disk.total_space(),
            };
            (disk.mount_point().to_path_buf(), usage)
        })
        .collect();
    let usage_of = |path: &str| -> Option<Usage> {
        let target = std::fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
        let usage = usage_for(&mounts, &target);
        if usage.is_none() {
            warn!(path = %path, "no mounted filesystem found for path");
        }
        usage
    };

    let up_since_format = config
        .options
        .up_since_format
        .as_deref()
        .unwrap_or(DEFAULT_UP_SINCE_FORMAT);

    Ok(SystemInfo {
        os_name: os.os_type().to_string(),
        machine: os.architecture().map(str::to_string),
        kernel: System::kernel_version(),
        user: Some(whoami::username()),
        hostname: System::host_name(),
        uptime_secs: System::uptime(),
        up_since: format_boot_time(System::boot_time(), up_since_format),
        wm: detect(WINDOW_MANAGERS, &running).map(str::to_string),
        de: detect(DESKTOP_ENVIRONMENTS, &running).map(str::to_string),
        gtk2,
        gtk3,
        terminal: env_var("TERM"),
        shell: env_var("SHELL"),
        editor: env_var("EDITOR"),
        packages,
        memory: Some(Usage {
            used: sys.used_memory(),
            total: sys.total_memory(),
        }),
        swap: Some(Usage {
            used: sys.used_swap(),
            total: sys.total_swap(),
        }),
        cpu: sys.cpus().first().map(|cpu| cpu.brand().trim().to_string()),
        root: usage_of("/"),
        home: usage_of("/home"),
        paths: config
            .options
            .paths
            .iter()
            .map(|path| PathUsage {
                path: path.clone(),
                usage: usage_of(path),
            })
            .collect(),
    })
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// First table entry whose process is running.
pub fn detect(table: &[(&str, &'static str)], running: &HashSet<String>) -> Option<&'static str> {
    table
        .iter()
        .find(|(process, _)| running.contains(*process))
        .map(|(_, name)| *name)
}

/// Usage of the deepest mount point containing `path`.
pub fn usage_for(mounts: &[(PathBuf, Usage)], path: &Path) -> Option<Usage> {
    mounts
        .iter()
        .filter(|(mount, _)| path.starts_with(mount))
        .max_by_key(|(mount, _)| mount.components().count())
        .map(|(_, usage)| *usage)
}

fn count_dirs(dir: &Path) -> Option<usize> {
    match std::fs::read_dir(dir) {
        Ok(entries) => Some(
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
                .count(),
        ),
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "package database unavailable");
            None
        }
    }
}

/// Boot time in local time. An unusable strftime format falls back to the
/// default one.
pub fn format_boot_time(boot_secs: u64, format: &str) -> Option<String> {
    let boot = DateTime::from_timestamp(i64::try_from(boot_secs).ok()?, 0)?.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", boot.format(format)).is_ok() {
        return Some(out);
    }
    warn!(format = %format, "invalid up since format, using default");
    Some(boot.format(DEFAULT_UP_SINCE_FORMAT).to_string())
}

fn read_gtk_settings(path: Option<PathBuf>) -> GtkInfo {
    let Some(path) = path else {
        return GtkInfo::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_gtk_settings(&content),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "gtk settings unavailable");
            GtkInfo::default()
        }
    }
}

/// Reads `gtk-*-name` keys from gtkrc-2.0 or gtk-3.0/settings.ini content.
pub fn parse_gtk_settings(content: &str) -> GtkInfo {
    let mut gtk = GtkInfo::default();
    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with("gtk") {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"').to_string();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "gtk-theme-name" => gtk.theme = Some(value),
            "gtk-icon-theme-name" => gtk.icons = Some(value),
            "gtk-font-name" => gtk.font = Some(value),
            "gtk-cursor-theme-name" => gtk.cursor = Some(value),
            _ => {}
        }
    }
    gtk
}
