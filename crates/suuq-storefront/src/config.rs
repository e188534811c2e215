//! # Storefront Configuration
//!
//! Settings for the database, the image host and upload limits.
//!
//! ## Load Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Configuration Sources                              │
//! │                                                                         │
//! │  1. Defaults (compiled in)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. storefront.toml in the platform config dir                         │
//! │     • Linux:   ~/.config/suuq/storefront.toml                          │
//! │     • macOS:   ~/Library/Application Support/so.suuq.suuq/             │
//! │     • Windows: %APPDATA%\suuq\suuq\config\                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. SUUQ_* environment variables                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. validate()                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [database]
//! path = "/var/lib/suuq/suuq.db"
//!
//! [image_host]
//! endpoint = "https://api.imgbb.com/1/upload"
//! api_key = "..."
//! timeout_secs = 30
//!
//! [uploads]
//! max_images = 3
//! max_file_bytes = 5242880
//! max_dimension = 800
//! jpeg_quality = 70
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{StorefrontError, StorefrontResult};

// =============================================================================
// Database Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("suuq.db"))
        .unwrap_or_else(|| PathBuf::from("suuq.db"))
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
        }
    }
}

// =============================================================================
// Image Host Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHostSettings {
    /// Upload endpoint; the API key is sent as the `key` query parameter.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Empty means "not configured"; uploads are refused until it is set.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.imgbb.com/1/upload".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ImageHostSettings {
    fn default() -> Self {
        ImageHostSettings {
            endpoint: default_endpoint(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ImageHostSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Upload Settings
// =============================================================================

/// Limits of the submission image pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Checked on the original file, before any processing.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,

    /// Longest side after downscaling, in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// JPEG quality, 1-100.
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_max_images() -> usize {
    suuq_core::MAX_PRODUCT_IMAGES
}

fn default_max_file_bytes() -> usize {
    suuq_core::MAX_IMAGE_BYTES
}

fn default_max_dimension() -> u32 {
    suuq_core::MAX_IMAGE_DIMENSION
}

fn default_jpeg_quality() -> u8 {
    suuq_core::JPEG_QUALITY
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            max_images: default_max_images(),
            max_file_bytes: default_max_file_bytes(),
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub image_host: ImageHostSettings,

    #[serde(default)]
    pub uploads: UploadSettings,
}

impl StorefrontConfig {
    /// Loads configuration: defaults → file → environment, then validates.
    ///
    /// `config_path` overrides the platform default location. A missing file
    /// is not an error.
    pub fn load(config_path: Option<PathBuf>) -> StorefrontResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StorefrontError::Config(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)
                    .map_err(|e| StorefrontError::Config(format!("{}: {}", path.display(), e)))?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();

        config.validate()?;

        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> StorefrontResult<()> {
        let endpoint = &self.image_host.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(StorefrontError::Config(format!(
                "image_host.endpoint must start with http:// or https://, got: {}",
                endpoint
            )));
        }

        if self.image_host.timeout_secs == 0 {
            return Err(StorefrontError::Config(
                "image_host.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.uploads.max_images == 0 {
            return Err(StorefrontError::Config(
                "uploads.max_images must be greater than 0".into(),
            ));
        }

        if self.uploads.max_dimension == 0 {
            return Err(StorefrontError::Config(
                "uploads.max_dimension must be greater than 0".into(),
            ));
        }

        if !(1..=100).contains(&self.uploads.jpeg_quality) {
            return Err(StorefrontError::Config(format!(
                "uploads.jpeg_quality must be between 1 and 100, got: {}",
                self.uploads.jpeg_quality
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SUUQ_*` overrides from any lookup (the process environment
    /// in production, a map in tests).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SUUQ_DATABASE_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(endpoint) = lookup("SUUQ_IMAGE_HOST_ENDPOINT") {
            debug!(endpoint = %endpoint, "Overriding image host endpoint from environment");
            self.image_host.endpoint = endpoint;
        }

        if let Some(key) = lookup("SUUQ_IMGBB_API_KEY") {
            self.image_host.api_key = key;
        }

        parse_override(&lookup, "SUUQ_IMAGE_HOST_TIMEOUT_SECS", &mut self.image_host.timeout_secs);
        parse_override(&lookup, "SUUQ_MAX_IMAGES", &mut self.uploads.max_images);
        parse_override(&lookup, "SUUQ_MAX_FILE_BYTES", &mut self.uploads.max_file_bytes);
        parse_override(&lookup, "SUUQ_MAX_DIMENSION", &mut self.uploads.max_dimension);
        parse_override(&lookup, "SUUQ_JPEG_QUALITY", &mut self.uploads.jpeg_quality);
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("so", "suuq", "suuq")
}

fn parse_override<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(value) => *target = value,
            Err(_) => warn!(key, value = %raw, "Ignoring unparsable environment override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.uploads.max_images, 3);
        assert_eq!(config.uploads.max_file_bytes, 5 * 1024 * 1024);
        assert_eq!(config.uploads.max_dimension, 800);
        assert_eq!(config.uploads.jpeg_quality, 70);
        assert_eq!(config.image_host.endpoint, "https://api.imgbb.com/1/upload");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [image_host]
            api_key = "abc"

            [uploads]
            jpeg_quality = 85
            "#,
        )
        .unwrap();

        assert_eq!(config.image_host.api_key, "abc");
        assert_eq!(config.image_host.timeout_secs, 30);
        assert_eq!(config.uploads.jpeg_quality, 85);
        assert_eq!(config.uploads.max_images, 3);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SUUQ_DATABASE_PATH", ":memory:"),
            ("SUUQ_IMGBB_API_KEY", "secret"),
            ("SUUQ_MAX_DIMENSION", "1024"),
            ("SUUQ_JPEG_QUALITY", "not-a-number"),
        ]);

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.database.path, PathBuf::from(":memory:"));
        assert_eq!(config.image_host.api_key, "secret");
        assert_eq!(config.uploads.max_dimension, 1024);
        assert_eq!(config.uploads.jpeg_quality, 70);
    }

    #[test]
    fn test_validation() {
        let mut config = StorefrontConfig::default();
        config.uploads.jpeg_quality = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.image_host.endpoint = "ftp://example.com".into();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.uploads.max_images = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let path = std::env::temp_dir().join(format!("suuq-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[uploads]\nmax_images = 2\n").unwrap();

        let config = StorefrontConfig::load(Some(path.clone())).unwrap();
        assert_eq!(config.uploads.max_images, 2);

        std::fs::write(&path, "[uploads]\njpeg_quality = 101\n").unwrap();
        assert!(StorefrontConfig::load(Some(path.clone())).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&StorefrontConfig::default()).unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[image_host]"));
        assert!(toml_str.contains("[uploads]"));
    }
}
