use serde::{Deserialize, Serialize};
use tracing::warn;

/// Temperature unit strings recognized from clients.
pub const TEMP_UNITS: [&str; 2] = ["fahrenheit", "celsius"];

/// Current conditions at a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    /// Unit symbol, `°F` or `°C`.
    pub unit: String,
    /// Formatted local time at the location, e.g. `2024-06-01 14:32:07 PDT`.
    pub local_time: String,
}

/// One hour of the rolling forecast window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub time: String,
    pub temp: f64,
    /// Percentage; the upstream omits it for some hours.
    pub precipitation_prob: Option<f64>,
    pub weather_desc: String,
}

/// One day of the forecast horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub temp_max: f64,
    pub temp_min: f64,
    /// Millimetres over the day.
    pub precipitation_sum: f64,
}

/// Normalized forecast: 24 hourly points starting at the current local hour,
/// and 3 daily points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub hourly: Vec<HourlyPoint>,
    pub daily: Vec<DailyPoint>,
    /// Unit symbol, `°F` or `°C`.
    pub unit: String,
    /// Prose rendering of the daily forecast, attached only when narration
    /// succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

/// Lowercase the requested unit, warning when it is not one we recognize.
///
/// The lowercased literal is still what the upstream request carries; only the
/// reported unit symbol falls back to celsius.
pub fn normalize_unit(unit: &str) -> String {
    let unit = unit.to_lowercase();
    if !TEMP_UNITS.contains(&unit.as_str()) {
        warn!("Temperature unit \"{unit}\" is not supported. Using celsius instead.");
    }
    unit
}

/// `°F` iff the lowercased unit is exactly `fahrenheit`, else `°C`.
pub fn unit_symbol(unit: &str) -> &'static str {
    if unit.to_lowercase() == "fahrenheit" {
        "°F"
    } else {
        "°C"
    }
}
