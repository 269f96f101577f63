//! Forecast narration seam.
//!
//! The service can attach a prose rendering of the daily forecast, produced by
//! an external text-generation collaborator. The core only knows this
//! capability; concrete clients live with whoever wires up the binary.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::Forecast;

/// Capability to turn a formatted forecast summary into free-text prose.
///
/// Failures here are never allowed to fail the forecast itself; callers attach
/// the narrative only on success.
#[async_trait]
pub trait Narrator: Send + Sync + Debug {
    async fn narrate(&self, summary: &str, location: Option<&str>) -> anyhow::Result<String>;
}

/// Multi-line summary of the daily forecast, one line per day, in the shape
/// narrators receive.
pub fn daily_summary(forecast: &Forecast) -> String {
    forecast
        .daily
        .iter()
        .map(|day| {
            format!(
                "Date: {}, High: {}{}, Low: {}{}, Precipitation: {}mm",
                day.date,
                day.temp_max,
                forecast.unit,
                day.temp_min,
                forecast.unit,
                day.precipitation_sum
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
