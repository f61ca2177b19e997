use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no cameras configured")]
    NoCameras,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

fn default_http_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_http_port(),
        }
    }
}

fn default_radius_km() -> f64 {
    2.0
}

fn default_duration_hours() -> u64 {
    1
}

/// Active-zone geometry. Changing these changes observable alerting
/// behavior, so they are part of the deployment contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneConfig {
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            duration_hours: default_duration_hours(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub zones: ZoneConfig,
    #[serde(default)]
    pub cameras: Vec<CameraConfig>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using built-in camera table");
            return Ok(Self::builtin());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        if config.cameras.is_empty() {
            return Err(ConfigError::NoCameras);
        }

        Ok(config)
    }

    /// The reference camera network around Bengaluru, used when no
    /// config file is present.
    pub fn builtin() -> Self {
        let cam = |id: &str, name: &str, lat: f64, lon: f64| CameraConfig {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lon,
        };
        Self {
            http: HttpConfig::default(),
            zones: ZoneConfig::default(),
            cameras: vec![
                cam("CAM001", "Koramangala Reserve", 12.9716, 77.5946),
                cam("CAM002", "Cubbon Park Outskirts", 12.9791, 77.5929),
                cam("CAM003", "Bellandur Wetlands", 12.9515, 77.6322),
                cam("CAM004", "Hebbal Lake North", 13.0356, 77.5623),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_cameras() {
        let config = Config::builtin();
        assert_eq!(config.cameras.len(), 4);
        assert_eq!(config.cameras[0].id, "CAM001");
        assert_eq!(config.zones.radius_km, 2.0);
        assert_eq!(config.zones.duration_hours, 1);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [http]
            port = 8080

            [zones]
            radius_km = 3.5
            duration_hours = 2

            [[cameras]]
            id = "CAM010"
            name = "Ridge Line East"
            lat = 13.01
            lon = 77.55
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.zones.radius_km, 3.5);
        assert_eq!(config.zones.duration_hours, 2);
        assert_eq!(config.cameras.len(), 1);
        assert_eq!(config.cameras[0].name, "Ridge Line East");
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: Config = toml::from_str(
            r#"
            [[cameras]]
            id = "CAM001"
            name = "Somewhere"
            lat = 0.0
            lon = 0.0
        "#,
        )
        .unwrap();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.zones.radius_km, 2.0);
        assert_eq!(config.zones.duration_hours, 1);
    }
}
