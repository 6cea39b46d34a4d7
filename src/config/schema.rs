//! Configuration schema types for `lightmoji.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::{parse_hex, Color};
use crate::models::Frame;

/// Where the session record lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<key>.json` records
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_storage_dir() }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".lightmoji")
}

/// GIF export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory timestamped GIFs are written to
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
    /// Loop setting for new projects
    #[serde(default = "default_loop", rename = "loop")]
    pub loop_playback: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { dir: default_export_dir(), loop_playback: default_loop() }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_loop() -> bool {
    true
}

/// Defaults for new projects and frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Duration of new frames in milliseconds
    #[serde(default = "default_frame_duration")]
    pub frame_duration: u32,
    /// Starting brush color as `#rrggbb`
    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { frame_duration: default_frame_duration(), color: default_color() }
    }
}

fn default_frame_duration() -> u32 {
    Frame::DEFAULT_DURATION
}

fn default_color() -> String {
    Color::PURPLE.to_hex()
}

/// Complete `lightmoji.toml` contents. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightmojiConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.color")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lightmoji.toml: '{}' {}", self.field, self.message)
    }
}

impl LightmojiConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.defaults.frame_duration == 0 {
            errors.push(ConfigValidationError {
                field: "defaults.frame_duration".to_string(),
                message: "must be a positive number of milliseconds".to_string(),
            });
        }

        if let Err(e) = parse_hex(&self.defaults.color) {
            errors.push(ConfigValidationError {
                field: "defaults.color".to_string(),
                message: format!("must be a #rrggbb color ({e})"),
            });
        }

        if self.storage.dir.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "storage.dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Starting brush color. Falls back to purple if the configured value
    /// does not parse, which `validate` reports.
    pub fn default_color(&self) -> Color {
        parse_hex(&self.defaults.color).unwrap_or(Color::PURPLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: LightmojiConfig = toml::from_str("").unwrap();
        assert_eq!(config, LightmojiConfig::default());
        assert_eq!(config.storage.dir, PathBuf::from(".lightmoji"));
        assert_eq!(config.export.dir, PathBuf::from("exports"));
        assert!(config.export.loop_playback);
        assert_eq!(config.defaults.frame_duration, 200);
        assert_eq!(config.default_color(), Color::PURPLE);
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml_str = r##"
[storage]
dir = "state"

[export]
dir = "gifs"
loop = false

[defaults]
frame_duration = 120
color = "#FF8800"
"##;
        let config: LightmojiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.dir, PathBuf::from("state"));
        assert_eq!(config.export.dir, PathBuf::from("gifs"));
        assert!(!config.export.loop_playback);
        assert_eq!(config.defaults.frame_duration, 120);
        assert_eq!(config.default_color(), Color::rgb(255, 136, 0));
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_errors() {
        let toml_str = r#"
[defaults]
frame_duration = 0
color = "purple"
"#;
        let config: LightmojiConfig = toml::from_str(toml_str).unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("defaults.frame_duration"));
        assert!(errors[1].to_string().contains("defaults.color"));
        assert_eq!(config.default_color(), Color::PURPLE);
    }

    #[test]
    fn test_unknown_section_ignored() {
        let config: LightmojiConfig = toml::from_str("[theme]\nname = \"dark\"").unwrap();
        assert!(config.is_valid());
    }
}
