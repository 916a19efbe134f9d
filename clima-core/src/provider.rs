use crate::model::{CityMatch, WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Maximum number of geocoding matches requested from the provider.
pub const CITY_SEARCH_LIMIT: u32 = 5;

/// Failure reported by the upstream provider or the transport beneath it.
///
/// The HTTP layer matches these exhaustively into status codes; messages
/// here are internal and English, the localized client-facing text lives
/// at the router boundary.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("city '{0}' not found")]
    NotFound(String),
    #[error("authentication with the weather provider failed")]
    AuthFailure,
    #[error("weather provider did not respond within the time budget")]
    Timeout,
    #[error("weather provider request failed: {0}")]
    Upstream(String),
}

/// Seam between the HTTP surface and the upstream provider.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError>;

    async fn search_cities(&self, term: &str) -> Result<Vec<CityMatch>, ProviderError>;
}
