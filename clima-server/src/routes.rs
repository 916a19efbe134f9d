use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use clima_core::model::{CityMatch, WeatherReport};
use clima_core::provider::{ProviderError, WeatherProvider};

pub const SERVICE_NAME: &str = "clima-api";

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// Error response sent to the client as `{"detail": <message>}`.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(city) => Self {
                status: StatusCode::NOT_FOUND,
                detail: format!("Cidade '{city}' não encontrada. Verifique o nome e tente novamente."),
            },
            // 500, not 401: the credential is the gateway's, not the caller's.
            ProviderError::AuthFailure => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: "Erro de autenticação com a API. Verifique a chave de API.".to_string(),
            },
            ProviderError::Timeout => Self {
                status: StatusCode::GATEWAY_TIMEOUT,
                detail: "Tempo limite excedido ao consultar o serviço de clima.".to_string(),
            },
            ProviderError::Upstream(detail) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: format!("Erro ao consultar o serviço de clima: {detail}"),
            },
        }
    }
}

/// GET / - Static service metadata.
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "mensagem": "API de Consulta de Clima",
        "versao": env!("CARGO_PKG_VERSION"),
        "documentacao": "/docs",
        "endpoint_clima": "/clima?cidade=NomeDaCidade",
    }))
}

/// GET /health - Liveness probe, independent of upstream availability.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": SERVICE_NAME }))
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    cidade: Option<String>,
}

/// GET /clima?cidade=... - Current weather for a city.
async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherReport>, ApiError> {
    let city = params.cidade.as_deref().map(str::trim).unwrap_or("");
    if city.is_empty() {
        return Err(ApiError::bad_request(
            "O parâmetro 'cidade' é obrigatório. Exemplo: /clima?cidade=São Paulo",
        ));
    }

    let report = state.provider.current_weather(city).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
struct CitySearchParams {
    q: Option<String>,
}

/// GET /cidades?q=... - City-name autocomplete.
///
/// Provider failures degrade to an empty list: the search is a
/// non-critical aid and must not fail the caller.
async fn search_cities(
    State(state): State<AppState>,
    Query(params): Query<CitySearchParams>,
) -> Result<Json<Vec<CityMatch>>, ApiError> {
    let term = params.q.as_deref().unwrap_or("");
    if term.chars().count() < 2 {
        return Err(ApiError::bad_request(
            "O parâmetro 'q' deve ter pelo menos 2 caracteres.",
        ));
    }

    match state.provider.search_cities(term).await {
        Ok(matches) => Ok(Json(matches)),
        Err(err) => {
            log::debug!("city search degraded to an empty result: {err}");
            Ok(Json(Vec::new()))
        }
    }
}

/// Create the HTTP router.
pub fn create_router(provider: Arc<dyn WeatherProvider>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/clima", get(get_weather))
        .route("/cidades", get(search_cities))
        .layer(cors)
        .with_state(AppState { provider })
}
