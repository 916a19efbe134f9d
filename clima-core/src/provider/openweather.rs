use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::format;
use crate::model::{CityMatch, CurrentWeatherPayload, GeoPlacePayload, WeatherReport};
use crate::provider::{CITY_SEARCH_LIMIT, ProviderError, WeatherProvider};

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const GEOCODING_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";

/// Response language requested from the provider.
const RESPONSE_LANG: &str = "pt_br";

const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);
const CITY_SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for OpenWeatherMap's current-weather and geocoding endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    weather_url: String,
    geocoding_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_urls(api_key, WEATHER_URL, GEOCODING_URL)
    }

    /// Client with explicit endpoint URLs, so tests can target a mock server.
    pub fn with_base_urls(api_key: String, weather_url: &str, geocoding_url: &str) -> Self {
        Self {
            api_key,
            http: Client::new(),
            weather_url: weather_url.to_string(),
            geocoding_url: geocoding_url.to_string(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentWeatherPayload, ProviderError> {
        let res = self
            .http
            .get(&self.weather_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", RESPONSE_LANG),
            ])
            .timeout(WEATHER_TIMEOUT)
            .send()
            .await
            .map_err(transport_error)?;

        let status = res.status();
        let body = res.text().await.map_err(transport_error)?;

        match status {
            StatusCode::NOT_FOUND => Err(ProviderError::NotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => Err(ProviderError::AuthFailure),
            s if !s.is_success() => Err(ProviderError::Upstream(format!(
                "current weather request failed with status {}: {}",
                s,
                truncate_body(&body),
            ))),
            _ => serde_json::from_str(&body).map_err(|e| {
                ProviderError::Upstream(format!("failed to parse current weather JSON: {e}"))
            }),
        }
    }

    async fn fetch_places(&self, term: &str) -> Result<Vec<GeoPlacePayload>, ProviderError> {
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("q", term),
                ("limit", CITY_SEARCH_LIMIT.to_string().as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .timeout(CITY_SEARCH_TIMEOUT)
            .send()
            .await
            .map_err(transport_error)?;

        let status = res.status();
        let body = res.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ProviderError::Upstream(format!(
                "geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::Upstream(format!("failed to parse geocoding JSON: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, ProviderError> {
        let payload = self.fetch_current(city).await?;
        Ok(format::weather_report(payload))
    }

    async fn search_cities(&self, term: &str) -> Result<Vec<CityMatch>, ProviderError> {
        let places = self.fetch_places(term).await?;
        Ok(format::city_matches(places))
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Upstream(err.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> OpenWeatherClient {
        let base = server.uri();
        OpenWeatherClient::with_base_urls(
            "test-key".into(),
            &format!("{base}/data/2.5/weather"),
            &format!("{base}/geo/1.0/direct"),
        )
    }

    fn weather_body() -> serde_json::Value {
        json!({
            "name": "Curitiba",
            "main": { "temp": 22.46, "feels_like": 23.01, "humidity": 81 },
            "weather": [ { "description": "chuva leve" } ]
        })
    }

    #[tokio::test]
    async fn current_weather_maps_a_successful_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Curitiba"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "pt_br"))
            .respond_with(ResponseTemplate::new(200).set_body_json(weather_body()))
            .mount(&server)
            .await;

        let report = test_client(&server).current_weather("Curitiba").await.unwrap();

        assert_eq!(report.city, "Curitiba");
        assert_eq!(report.temperature_c, 22.5);
        assert_eq!(report.feels_like_c, 23.0);
        assert_eq!(report.humidity_pct, 81);
        assert_eq!(report.description, "Chuva leve");
    }

    #[tokio::test]
    async fn upstream_404_becomes_not_found_with_the_city() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "cod": "404", "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server).current_weather("Atlantis").await.unwrap_err();

        match err {
            ProviderError::NotFound(city) => assert_eq!(city, "Atlantis"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upstream_401_becomes_auth_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "cod": 401, "message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server).current_weather("Curitiba").await.unwrap_err();

        assert!(matches!(err, ProviderError::AuthFailure));
    }

    #[tokio::test]
    async fn other_upstream_statuses_become_upstream_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = test_client(&server).current_weather("Curitiba").await.unwrap_err();

        match err {
            ProviderError::Upstream(detail) => {
                assert!(detail.contains("502"));
                assert!(detail.contains("bad gateway"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_weather_body_becomes_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Curitiba"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server).current_weather("Curitiba").await.unwrap_err();

        assert!(matches!(err, ProviderError::Upstream(_)));
    }

    #[tokio::test]
    async fn search_cities_maps_records_and_sends_the_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Curitiba"))
            .and(query_param("limit", "5"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "Curitiba", "state": "PR", "country": "BR" },
                { "name": "London", "country": "GB" }
            ])))
            .mount(&server)
            .await;

        let matches = test_client(&server).search_cities("Curitiba").await.unwrap();

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].display_text, "Curitiba - PR, BR");
        assert_eq!(matches[1].display_text, "London, GB");
    }

    #[tokio::test]
    async fn geocoding_failure_is_reported_as_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = test_client(&server).search_cities("Curitiba").await.unwrap_err();

        assert!(matches!(err, ProviderError::Upstream(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_reported_as_upstream() {
        // Port 1 is never listening locally.
        let client = OpenWeatherClient::with_base_urls(
            "test-key".into(),
            "http://127.0.0.1:1/data/2.5/weather",
            "http://127.0.0.1:1/geo/1.0/direct",
        );

        let err = client.current_weather("Curitiba").await.unwrap_err();

        assert!(matches!(err, ProviderError::Upstream(_)));
    }
}
