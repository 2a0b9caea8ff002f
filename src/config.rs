use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::models::{ListingParams, ReferencePoint};
use crate::services::{DEFAULT_CATALOG_TTL_SECS, DEFAULT_SOURCE_URL};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub source: SourceSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    #[validate(nested)]
    pub listing: ListingSettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SourceSettings {
    #[serde(default = "default_source_url")]
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_source_url() -> String { DEFAULT_SOURCE_URL.to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs() }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_ttl_secs() -> u64 { DEFAULT_CATALOG_TTL_SECS }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListingSettings {
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub page_size: usize,
    #[serde(default = "default_max_radius_km")]
    #[validate(range(exclusive_min = 0.0))]
    pub max_radius_km: f64,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_radius_km: default_max_radius_km(),
        }
    }
}

impl From<&ListingSettings> for ListingParams {
    fn from(settings: &ListingSettings) -> Self {
        Self {
            page_size: settings.page_size,
            max_radius_km: settings.max_radius_km,
        }
    }
}

fn default_page_size() -> usize { 50 }
fn default_max_radius_km() -> f64 { 500.0 }

/// Fixed coordinates for hosts without a live location service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationSettings {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationSettings {
    pub fn reference_point(&self) -> Option<ReferencePoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(ReferencePoint::new(lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with HEMOCENTROS__)
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenv::dotenv().ok();

        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HEMOCENTROS__LISTING__PAGE_SIZE -> listing.page_size
            .add_source(environment())
            .build()?;

        finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        finish(settings)
    }

    pub fn listing_params(&self) -> ListingParams {
        ListingParams::from(&self.listing)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("HEMOCENTROS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn finish(settings: Config) -> Result<Settings, ConfigError> {
    let settings: Settings = settings.try_deserialize()?;
    settings
        .validate()
        .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        finish(settings)
    }

    #[test]
    fn test_defaults() {
        let settings = from_toml("").unwrap();
        assert_eq!(settings.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(settings.cache.ttl_secs, 2_592_000);
        assert_eq!(settings.listing_params(), ListingParams::default());
        assert!(settings.location.reference_point().is_none());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "pretty");
    }

    #[test]
    fn test_overrides() {
        let settings = from_toml(
            r#"
            [listing]
            page_size = 20
            max_radius_km = 250.0

            [location]
            latitude = -23.55
            longitude = -46.63
            "#,
        )
        .unwrap();

        assert_eq!(settings.listing.page_size, 20);
        assert_eq!(settings.listing.max_radius_km, 250.0);
        assert_eq!(
            settings.location.reference_point(),
            Some(ReferencePoint::new(-23.55, -46.63))
        );
    }

    #[test]
    fn test_load_from_default_file() {
        let settings = Settings::load_from("config/default.toml").unwrap();
        assert_eq!(settings.listing.page_size, 50);
        assert_eq!(settings.source.timeout(), Duration::from_secs(30));
        assert_eq!(settings.cache.ttl(), Duration::from_secs(DEFAULT_CATALOG_TTL_SECS));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let result = from_toml("[listing]\npage_size = 0\n");
        assert!(result.is_err());
    }
}
