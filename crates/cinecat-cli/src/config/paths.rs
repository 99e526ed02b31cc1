//! Config directory resolution.
//!
//! The one file holds both the `[server]` settings and the `[session]`
//! token written by `cinecat login`, so a `--dir` profile is also a
//! separate login.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Application directory under the config home.
const APP_DIR: &str = "cinecat";

/// Config file name inside the application directory.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise `$XDG_CONFIG_HOME/cinecat/config.toml` when that variable is
///   set and non-empty, else `~/.config/cinecat/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let config_home = match std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => {
            let home = std::env::var("HOME").context("HOME environment variable is not set")?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_file_under(&config_home))
}

/// `{config_home}/cinecat/config.toml`.
fn config_file_under(config_home: &Path) -> PathBuf {
    config_home.join(APP_DIR).join(CONFIG_FILE)
}
