//! Core library for the city weather service.
//!
//! This crate defines:
//! - Configuration & the static city reference table
//! - Coordinate validation and timezone resolution
//! - The Open-Meteo client and response normalization
//! - The forecast narration abstraction
//!
//! It is used by `weather-api`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod narrative;
pub mod provider;
pub mod skycode;

pub use config::{City, Config};
pub use error::WeatherError;
pub use geo::{ResolvedZone, estimate_timezone, resolve_timezone, validate_coordinates};
pub use model::{CurrentWeather, DailyPoint, Forecast, HourlyPoint};
pub use narrative::Narrator;
pub use provider::OpenMeteoClient;
