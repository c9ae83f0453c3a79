//! # Unified Configuration System
//!
//! All configuration structures for the engine in one place: engine behaviour,
//! the camera viewport and tile map defaults.
//!
//! Every structure derives `Serialize`/`Deserialize` and uses `#[serde(default)]`,
//! so partial TOML or RON files only override what they mention.

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core engine behaviour: logging and debug features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter for the engine (`env_logger` syntax)
    pub log_level: String,
    /// Whether component data dumps go to the log
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable debug mode
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Viewport Configuration
///
/// Size of the visible screen area the camera covers, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Screen width in pixels
    pub screen_width: u32,
    /// Screen height in pixels
    pub screen_height: u32,
}

impl ViewportConfig {
    /// Create a viewport configuration
    pub const fn new(screen_width: u32, screen_height: u32) -> Self {
        Self {
            screen_width,
            screen_height,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(format!(
                "Viewport must not be empty, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        Ok(())
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// # Tile Map Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileMapConfig {
    /// Tile size in pixels used when an atlas does not specify one
    pub default_tile_size: u32,
}

impl TileMapConfig {
    /// Set the default tile size
    pub fn with_default_tile_size(mut self, size: u32) -> Self {
        self.default_tile_size = size;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_tile_size == 0 {
            return Err("Default tile size must be at least 1 pixel".to_string());
        }
        Ok(())
    }
}

impl Default for TileMapConfig {
    fn default() -> Self {
        Self {
            default_tile_size: 16,
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
/// This is the main configuration structure applications should use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Camera viewport configuration
    pub viewport: ViewportConfig,
    /// Tile map defaults
    pub tile_map: TileMapConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate().map_err(ConfigError::Invalid)?;
        self.tile_map.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{Builder, NamedTempFile};

    fn temp_config(suffix: &str) -> NamedTempFile {
        Builder::new().prefix("tile_engine_").suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ApplicationConfig = toml::from_str(
            r#"
            [viewport]
            screen_width = 320
            "#,
        )
        .unwrap();

        assert_eq!(config.viewport.screen_width, 320);
        assert_eq!(config.viewport.screen_height, 600);
        assert_eq!(config.tile_map.default_tile_size, 16);
        assert_eq!(config.engine.log_level, "info");
    }

    #[test]
    fn test_toml_file_roundtrip() {
        let file = temp_config(".toml");
        let config = ApplicationConfig {
            engine: EngineConfig::new().with_log_level("debug").with_debug(true),
            viewport: ViewportConfig::new(640, 480),
            tile_map: TileMapConfig::default().with_default_tile_size(32),
        };

        config.save_to_file(file.path()).unwrap();
        let loaded = ApplicationConfig::load_from_file(file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_file_roundtrip() {
        let file = temp_config(".RON");
        let config = ApplicationConfig {
            viewport: ViewportConfig::new(256, 224),
            ..Default::default()
        };

        config.save_to_file(file.path()).unwrap();
        let loaded = ApplicationConfig::load_from_file(file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ApplicationConfig::default().save_to_file("config.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ApplicationConfig::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(loaded, ApplicationConfig::default());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let file = temp_config(".toml");
        std::fs::write(file.path(), "[viewport\nscreen_width = ").unwrap();

        let result = ApplicationConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation() {
        assert!(ApplicationConfig::default().validate().is_ok());

        let mut config = ApplicationConfig::default();
        config.viewport.screen_height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ApplicationConfig::default();
        config.tile_map.default_tile_size = 0;
        assert!(config.validate().is_err());
    }
}
