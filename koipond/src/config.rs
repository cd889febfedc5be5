//! Configuration management (~/.config/Koipond/config.toml)
//!
//! Handles loading, saving, and providing defaults for viewer settings.
//! Settings are stored in TOML format in the platform-specific config
//! directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Viewer configuration.
///
/// Serialized to/from TOML format for persistence. Missing sections and
/// fields fall back to defaults so hand-edited files stay forgiving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Window and presentation settings
    #[serde(default)]
    pub video: VideoConfig,
    /// Camera behaviour settings
    #[serde(default)]
    pub camera: CameraConfig,
}

/// Window and presentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Initial window width in logical pixels (default: 1280)
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Initial window height in logical pixels (default: 720)
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Whether to enable vertical sync (default: true)
    #[serde(default = "default_true")]
    pub vsync: bool,
}

/// Camera behaviour configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Whether the orbit slowly rotates on its own while idle (default: true)
    #[serde(default = "default_true")]
    pub auto_rotate: bool,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            auto_rotate: default_true(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Koipond\config`
/// On macOS: `~/Library/Application Support/io.koipond.Koipond`
/// On Linux: `~/.config/Koipond`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.koipond", "", "Koipond")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from disk.
///
/// Reads `config.toml` from the platform's configuration directory.
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    config_dir()
        .map(|dir| read_config(&dir.join("config.toml")))
        .unwrap_or_default()
}

/// Saves the configuration to disk.
///
/// Writes `config.toml` to the platform's configuration directory.
/// Creates the directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file
/// cannot be written.
pub fn save(config: &Config) -> std::io::Result<()> {
    if let Some(dir) = config_dir() {
        std::fs::create_dir_all(&dir)?;
        write_config(&dir.join("config.toml"), config)?;
    }
    Ok(())
}

fn read_config(path: &Path) -> Config {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}

fn write_config(path: &Path, config: &Config) -> std::io::Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| std::io::Error::other(format!("serialize config: {e}")))?;
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.video.window_width, 1280);
        assert_eq!(config.video.window_height, 720);
        assert!(config.video.vsync);
        assert!(config.camera.auto_rotate);
    }

    #[test]
    fn test_config_serialize_roundtrip() {
        let config = Config {
            video: VideoConfig {
                window_width: 1920,
                window_height: 1080,
                vsync: false,
            },
            camera: CameraConfig { auto_rotate: false },
        };

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.video.window_width, 1920);
        assert_eq!(parsed.video.window_height, 1080);
        assert!(!parsed.video.vsync);
        assert!(!parsed.camera.auto_rotate);
    }

    #[test]
    fn test_config_deserialize_empty() {
        // Empty TOML should produce defaults
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.video.window_width, 1280);
        assert!(config.video.vsync);
        assert!(config.camera.auto_rotate);
    }

    #[test]
    fn test_config_deserialize_partial_video() {
        // Only set vsync, rest should default
        let toml_str = r#"
[video]
vsync = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.video.vsync);
        assert_eq!(config.video.window_width, 1280); // default
        assert_eq!(config.video.window_height, 720); // default
    }

    #[test]
    fn test_config_ignores_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [ not valid toml").unwrap();

        let config = read_config(&path);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            video: VideoConfig {
                window_width: 800,
                window_height: 600,
                vsync: true,
            },
            camera: CameraConfig { auto_rotate: true },
        };
        write_config(&path, &config).unwrap();

        let loaded = read_config(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config(&dir.path().join("does-not-exist.toml"));
        assert_eq!(config, Config::default());
    }
}
