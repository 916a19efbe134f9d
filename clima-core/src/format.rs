//! Pure mapping from raw provider payloads to the gateway's response shapes.

use crate::model::{CityMatch, CurrentWeatherPayload, GeoPlacePayload, WeatherReport};

/// Label used when the provider omits the resolved city name.
const UNKNOWN_CITY: &str = "Desconhecida";

/// Build the normalized weather response from a decoded provider payload.
pub fn weather_report(payload: CurrentWeatherPayload) -> WeatherReport {
    let description = payload
        .weather
        .first()
        .map(|c| capitalize_first(&c.description))
        .unwrap_or_default();

    WeatherReport {
        city: payload.name.unwrap_or_else(|| UNKNOWN_CITY.to_string()),
        temperature_c: round_one_decimal(payload.main.temp),
        feels_like_c: round_one_decimal(payload.main.feels_like),
        humidity_pct: payload.main.humidity,
        description,
    }
}

/// Build display-ready city matches from decoded geocoding records.
pub fn city_matches(places: Vec<GeoPlacePayload>) -> Vec<CityMatch> {
    places
        .into_iter()
        .map(|place| {
            let display_text = if place.state.is_empty() {
                format!("{}, {}", place.name, place.country)
            } else {
                format!("{} - {}, {}", place.name, place.state, place.country)
            };

            CityMatch {
                name: place.name,
                state: place.state,
                country: place.country,
                display_text,
            }
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Upper-case the first character, leaving the rest unchanged.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
