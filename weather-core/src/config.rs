use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

/// One entry of the static city reference table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub lat: f64,
    pub lon: f64,
    /// Preferred unit for display purposes, `fahrenheit` or `celsius`.
    pub default_unit: String,
    /// IANA zone name; validated when the table is deserialized.
    pub timezone: Tz,
}

/// Top-level configuration, loaded once at startup and immutable afterwards.
///
/// Example TOML:
///
/// ```toml
/// bind = "0.0.0.0:5000"
///
/// [cities."Tokyo, Japan"]
/// lat = 35.6762
/// lon = 139.6503
/// default_unit = "celsius"
/// timezone = "Asia/Tokyo"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP front end listens on.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Known cities, keyed by display name, e.g. `"Tokyo, Japan"`.
    #[serde(default = "default_cities")]
    pub cities: HashMap<String, City>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cities: default_cities(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn default_cities() -> HashMap<String, City> {
    let mut cities = HashMap::new();
    let mut add = |name: &str, lat: f64, lon: f64, default_unit: &str, timezone: Tz| {
        cities.insert(
            name.to_string(),
            City {
                lat,
                lon,
                default_unit: default_unit.to_string(),
                timezone,
            },
        );
    };

    add("Phoenix, AZ", 33.4484, -112.0740, "fahrenheit", Tz::America__Phoenix);
    add("Seattle, WA", 47.6062, -122.3321, "celsius", Tz::America__Los_Angeles);
    add("New York, NY", 40.7128, -74.0060, "fahrenheit", Tz::America__New_York);
    add("Miami, FL", 25.7617, -80.1918, "fahrenheit", Tz::America__New_York);
    add("Anchorage, AK", 61.2181, -149.9003, "fahrenheit", Tz::America__Anchorage);
    add("Charlotte, NC", 35.2271, -80.8431, "fahrenheit", Tz::America__New_York);
    add("Vancouver, BC", 49.2827, -123.1207, "celsius", Tz::America__Vancouver);
    add("Tokyo, Japan", 35.6762, 139.6503, "celsius", Tz::Asia__Tokyo);

    cities
}

impl Config {
    /// Look up a known city by its exact display name.
    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    /// Reverse lookup: the name of the table city sitting exactly at the given
    /// coordinates, if any. Used to label narratives.
    pub fn city_at(&self, lat: f64, lon: f64) -> Option<&str> {
        self.cities
            .iter()
            .find(|(_, city)| city.lat == lat && city.lon == lon)
            .map(|(name, _)| name.as_str())
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. With no path, the platform
    /// config file is used when present, else the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(anyhow!("Config file not found: {}", p.display()));
                }
                p.to_path_buf()
            }
            None => {
                let default_path = Self::config_file_path()?;
                if !default_path.exists() {
                    // First run: no config file, use the built-in city table.
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the platform config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-service", "weather-api")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
