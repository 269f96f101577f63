use thiserror::Error;

/// Errors produced while resolving coordinates or talking to the upstream
/// weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Latitude/longitude outside legal bounds. Raised before any upstream
    /// call is issued.
    #[error(
        "Invalid coordinates. Latitude must be between -90 and 90, longitude between -180 and 180"
    )]
    InvalidCoordinates,

    /// The upstream request could not be sent, or timed out.
    #[error("Failed to reach weather provider: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The upstream answered with a non-success status. One attempt only, no
    /// retries.
    #[error("Weather provider request failed with status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The upstream body did not match the expected shape.
    #[error("Malformed weather provider response: {0}")]
    Malformed(String),
}

impl WeatherError {
    /// True for errors the caller should report as a client error rather than
    /// an upstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, WeatherError::InvalidCoordinates)
    }
}
