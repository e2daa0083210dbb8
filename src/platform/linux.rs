// newtab platform paths for Linux
// Config: ~/.config/newtab
// Data:   ~/.local/share/newtab

use std::env;
use std::path::PathBuf;

use super::APP_DIR_NAME;

/// Returns the configuration directory for newtab on Linux.
/// Uses `$XDG_CONFIG_HOME/newtab` if set, otherwise `~/.config/newtab`.
pub fn get_config_dir() -> PathBuf {
    xdg_dir(env::var("XDG_CONFIG_HOME").ok(), env::var("HOME").ok(), &[".config"])
}

/// Returns the data directory for newtab on Linux.
/// Uses `$XDG_DATA_HOME/newtab` if set, otherwise `~/.local/share/newtab`.
pub fn get_data_dir() -> PathBuf {
    xdg_dir(env::var("XDG_DATA_HOME").ok(), env::var("HOME").ok(), &[".local", "share"])
}

/// Resolves an XDG base directory. Empty values count as unset.
fn xdg_dir(xdg: Option<String>, home: Option<String>, fallback: &[&str]) -> PathBuf {
    if let Some(xdg) = xdg.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    let mut path = PathBuf::from(home.unwrap_or_else(|| String::from("/tmp")));
    for part in fallback {
        path.push(part);
    }
    path.join(APP_DIR_NAME)
}
