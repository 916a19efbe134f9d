use serde::{Deserialize, Serialize};

/// Normalized current-weather response returned by the gateway.
///
/// Field names follow the service's public (pt-BR) API contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "temperatura")]
    pub temperature_c: f64,
    #[serde(rename = "sensacao_termica")]
    pub feels_like_c: f64,
    #[serde(rename = "umidade")]
    pub humidity_pct: u8,
    #[serde(rename = "descricao_clima")]
    pub description: String,
}

/// A geocoding search result with a ready-to-display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMatch {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "texto")]
    pub display_text: String,
}

// Raw upstream payload shapes. Optional fields carry explicit defaults so
// the deserialization boundary, not the formatter, decides what "missing"
// means.

/// Decoded body of the provider's current-weather endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherPayload {
    pub name: Option<String>,
    pub main: MainMeasurements,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainMeasurements {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    pub description: String,
}

/// One record of the provider's geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPlacePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}
