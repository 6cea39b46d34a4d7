//! Configuration loading and discovery for `lightmoji.toml`

use super::schema::LightmojiConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "lightmoji.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse lightmoji.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub storage_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub loop_playback: Option<bool>,
}

/// Find `lightmoji.toml`: first by walking up from the working directory,
/// then in `$XDG_CONFIG_HOME/lightmoji/` (or `~/.config/lightmoji/`).
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }
    find_xdg_config()
}

pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("lightmoji").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Walk up from `start` looking for `lightmoji.toml`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from `path`, or from the discovered file when `path`
/// is `None`. With no file at all, the defaults apply.
///
/// Relative directories in a loaded file are resolved against the file's
/// own directory.
pub fn load_config(path: Option<&Path>) -> Result<LightmojiConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("No lightmoji.toml found, using defaults");
            Ok(LightmojiConfig::default())
        }
    }
}

fn load_config_file(path: &Path) -> Result<LightmojiConfig, ConfigError> {
    debug!(path = %path.display(), "Loading config");
    let contents = fs::read_to_string(path)?;
    let mut config: LightmojiConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(root) = project_root(path) {
        config.storage.dir = resolve_path(root, &config.storage.dir);
        config.export.dir = resolve_path(root, &config.export.dir);
    }
    Ok(config)
}

/// Apply CLI overrides; they take precedence over file values.
pub fn merge_cli_overrides(config: &mut LightmojiConfig, overrides: &CliOverrides) {
    if let Some(ref dir) = overrides.storage_dir {
        config.storage.dir = dir.clone();
    }
    if let Some(ref dir) = overrides.export_dir {
        config.export.dir = dir.clone();
    }
    if let Some(loop_playback) = overrides.loop_playback {
        config.export.loop_playback = loop_playback;
    }
}

/// Directory containing the config file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent().filter(|p| !p.as_os_str().is_empty())
}

pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
