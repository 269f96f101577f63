//! HTTP handlers for the weather endpoints.

use std::{collections::HashMap, sync::Arc};

use actix_web::{HttpResponse, ResponseError, get, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use tracing::warn;

use weather_core::{
    City, Config, CurrentWeather, Forecast, Narrator, OpenMeteoClient, WeatherError, narrative,
    resolve_timezone,
};

/// Shared per-process state: the immutable configuration, one upstream
/// client, and an optional narrator.
#[derive(Debug)]
pub struct AppState {
    config: Config,
    client: OpenMeteoClient,
    narrator: Option<Arc<dyn Narrator>>,
}

impl AppState {
    /// State for production wiring: real Open-Meteo endpoint, no narrator.
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        Ok(Self {
            config,
            client: OpenMeteoClient::new()?,
            narrator: None,
        })
    }

    /// State assembled from explicit parts. Tests use this to point the
    /// client at a mock upstream and install a narrator.
    pub fn with_parts(
        config: Config,
        client: OpenMeteoClient,
        narrator: Option<Arc<dyn Narrator>>,
    ) -> Self {
        Self {
            config,
            client,
            narrator,
        }
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(current_weather).service(forecast).service(cities);
}

#[derive(Debug, Deserialize)]
struct LocationQuery {
    lat: f64,
    lon: f64,
    unit: String,
    /// Optional known-city hint; selects the stored timezone when it names a
    /// table city.
    city: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Adapter mapping domain errors onto HTTP responses with a JSON envelope.
#[derive(Debug)]
struct ApiError(WeatherError);

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::BAD_GATEWAY
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.0.to_string(),
        })
    }
}

#[get("/weather")]
async fn current_weather(
    state: web::Data<AppState>,
    query: web::Query<LocationQuery>,
) -> Result<web::Json<CurrentWeather>, ApiError> {
    let q = query.into_inner();
    let zone = resolve_timezone(q.lon, q.city.as_deref(), &state.config);
    let current = state
        .client
        .fetch_current(q.lat, q.lon, &q.unit, &zone)
        .await?;
    Ok(web::Json(current))
}

#[get("/weather/forecast")]
async fn forecast(
    state: web::Data<AppState>,
    query: web::Query<LocationQuery>,
) -> Result<web::Json<Forecast>, ApiError> {
    let q = query.into_inner();
    let zone = resolve_timezone(q.lon, q.city.as_deref(), &state.config);
    let mut forecast = state
        .client
        .fetch_forecast(q.lat, q.lon, &q.unit, &zone)
        .await?;

    if let Some(narrator) = &state.narrator {
        let label = known_city_label(&state.config, &q);
        let summary = narrative::daily_summary(&forecast);
        match narrator.narrate(&summary, label).await {
            Ok(text) => forecast.narrative = Some(text),
            // The narrative is an enhancement; the forecast stands on its own.
            Err(e) => warn!(error = %e, "narrative generation failed"),
        }
    }

    Ok(web::Json(forecast))
}

/// JSON rendering of the static city table.
#[get("/cities")]
async fn cities(state: web::Data<AppState>) -> web::Json<HashMap<String, City>> {
    web::Json(state.config.cities.clone())
}

/// Location label for the narrator: a hint naming a table city, else a table
/// city sitting exactly at the requested coordinates.
fn known_city_label<'a>(config: &'a Config, q: &'a LocationQuery) -> Option<&'a str> {
    q.city
        .as_deref()
        .filter(|name| config.city(name).is_some())
        .or_else(|| config.city_at(q.lat, q.lon))
}
