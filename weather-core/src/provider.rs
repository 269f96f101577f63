//! Open-Meteo client and response normalization.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use crate::{
    error::WeatherError,
    geo::{self, ResolvedZone},
    model::{self, CurrentWeather, DailyPoint, Forecast, HourlyPoint},
    skycode,
};

/// Default Open-Meteo forecast endpoint.
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Bound on the single outbound call; a timeout surfaces as an upstream error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Days of forecast requested upstream; fixed by the output contract.
const FORECAST_DAYS: usize = 3;

/// Hours in the rolling forecast window.
const HOURLY_WINDOW: usize = 24;

/// Client for the Open-Meteo forecast API.
///
/// Holds one `reqwest::Client`; cheap to clone and share across request
/// handlers.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(OPEN_METEO_URL)
    }

    /// Client pointed at an alternative endpoint. Tests use this to talk to a
    /// local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch current conditions for validated coordinates.
    ///
    /// The local time string is computed at response receipt in the resolved
    /// zone, not at measurement time.
    pub async fn fetch_current(
        &self,
        lat: f64,
        lon: f64,
        unit: &str,
        zone: &ResolvedZone,
    ) -> Result<CurrentWeather, WeatherError> {
        if !geo::validate_coordinates(lat, lon) {
            return Err(WeatherError::InvalidCoordinates);
        }
        let unit = model::normalize_unit(unit);

        info!(
            lat,
            lon,
            unit = %unit,
            timezone = %zone.api_param,
            "Calling Open-Meteo API for current weather"
        );

        let body = self
            .request(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("temperature_unit", unit.clone()),
                ("timezone", zone.api_param.clone()),
                ("current", "temperature_2m".to_string()),
            ])
            .await?;

        let parsed: MeteoCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("current weather JSON: {e}")))?;

        Ok(CurrentWeather {
            temperature: parsed.current.temperature_2m,
            unit: model::unit_symbol(&unit).to_string(),
            local_time: local_time_string(&zone.tz, Utc::now()),
        })
    }

    /// Fetch the 24-hour / 3-day forecast for validated coordinates.
    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
        unit: &str,
        zone: &ResolvedZone,
    ) -> Result<Forecast, WeatherError> {
        if !geo::validate_coordinates(lat, lon) {
            return Err(WeatherError::InvalidCoordinates);
        }
        let unit = model::normalize_unit(unit);

        info!(
            lat,
            lon,
            unit = %unit,
            timezone = %zone.api_param,
            "Calling Open-Meteo API for forecast"
        );

        let body = self
            .request(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("temperature_unit", unit.clone()),
                ("timezone", zone.api_param.clone()),
                (
                    "hourly",
                    "temperature_2m,precipitation_probability,weathercode".to_string(),
                ),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,precipitation_sum".to_string(),
                ),
                ("forecast_days", FORECAST_DAYS.to_string()),
            ])
            .await?;

        let parsed: MeteoForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::Malformed(format!("forecast JSON: {e}")))?;

        assemble_forecast(parsed, &unit, &zone.tz, Utc::now())
    }

    /// One GET against the forecast endpoint; exactly one attempt.
    async fn request(&self, params: &[(&str, String)]) -> Result<String, WeatherError> {
        let res = self.http.get(&self.base_url).query(params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamStatus {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

/// Local time at `now` in `tz`, with trailing zone abbreviation,
/// e.g. `2024-06-01 14:32:07 JST`.
fn local_time_string(tz: &Tz, now: DateTime<Utc>) -> String {
    now.with_timezone(tz)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string()
}

/// Build the rolling hourly window and the daily horizon from the raw series.
///
/// The window covers `current_hour ..= current_hour + 23` of the upstream
/// hourly arrays; a series too short for that (or fewer than three daily
/// entries) is treated as malformed upstream data rather than clamped.
fn assemble_forecast(
    raw: MeteoForecastResponse,
    unit: &str,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<Forecast, WeatherError> {
    let start = now.with_timezone(tz).hour() as usize;
    let end = start + HOURLY_WINDOW;

    let h = &raw.hourly;
    let hourly_len = h
        .time
        .len()
        .min(h.temperature_2m.len())
        .min(h.precipitation_probability.len())
        .min(h.weathercode.len());
    if hourly_len < end {
        return Err(WeatherError::Malformed(format!(
            "hourly series has {hourly_len} entries, need {end}"
        )));
    }

    let hourly = (start..end)
        .map(|i| HourlyPoint {
            time: h.time[i].clone(),
            temp: h.temperature_2m[i],
            precipitation_prob: h.precipitation_probability[i],
            weather_desc: skycode::describe(h.weathercode[i]).to_string(),
        })
        .collect();

    let d = &raw.daily;
    let daily_len = d
        .time
        .len()
        .min(d.temperature_2m_max.len())
        .min(d.temperature_2m_min.len())
        .min(d.precipitation_sum.len());
    if daily_len < FORECAST_DAYS {
        return Err(WeatherError::Malformed(format!(
            "daily series has {daily_len} entries, need {FORECAST_DAYS}"
        )));
    }

    let daily = (0..FORECAST_DAYS)
        .map(|i| DailyPoint {
            date: d.time[i].clone(),
            temp_max: d.temperature_2m_max[i],
            temp_min: d.temperature_2m_min[i],
            precipitation_sum: d.precipitation_sum[i],
        })
        .collect();

    Ok(Forecast {
        hourly,
        daily,
        unit: model::unit_symbol(unit).to_string(),
        narrative: None,
    })
}

#[derive(Debug, Deserialize)]
struct MeteoCurrent {
    temperature_2m: f64,
}

#[derive(Debug, Deserialize)]
struct MeteoCurrentResponse {
    current: MeteoCurrent,
}

#[derive(Debug, Deserialize)]
struct MeteoHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    precipitation_probability: Vec<Option<f64>>,
    weathercode: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct MeteoDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct MeteoForecastResponse {
    hourly: MeteoHourly,
    daily: MeteoDaily,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
