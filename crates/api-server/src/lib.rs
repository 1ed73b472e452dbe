//! FinDash HTTP API
//!
//! Serves per-company financial ratios, health scores, comparison series
//! and sector summaries for the dashboard frontend. Responses are cached
//! in-process with a TTL so repeated page loads do not hammer the market
//! data source.

pub mod company_routes;
pub mod compare_routes;
pub mod sector_routes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use dashmap::DashMap;
use idx_client::IdxDataClient;
use ratio_core::{AnalysisError, CompanyInfo, CompanyRatios, MarketDataProvider};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MarketDataProvider>,
    cache: Arc<DashMap<String, CacheEntry>>,
    cache_ttl: Duration,
}

#[derive(Clone)]
struct CacheEntry {
    value: serde_json::Value,
    inserted_at: Instant,
}

impl AppState {
    pub fn new(provider: Arc<dyn MarketDataProvider>, cache_ttl: Duration) -> Self {
        Self {
            provider,
            cache: Arc::new(DashMap::new()),
            cache_ttl,
        }
    }

    pub fn get_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.cache.get(key)?;
        if entry.inserted_at.elapsed() >= self.cache_ttl {
            drop(entry);
            self.cache.remove(key);
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn set_cached<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(value) = serde_json::to_value(value) {
            self.cache.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    inserted_at: Instant::now(),
                },
            );
        }
    }
}

/// Standard response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Domain(AnalysisError),
    Internal(anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        AppError::Domain(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Domain(err) => {
                let status = match err {
                    AnalysisError::InvalidTicker(_) | AnalysisError::InvalidRequest(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    AnalysisError::CompanyNotFound(_) | AnalysisError::DataUnavailable(_) => {
                        StatusCode::NOT_FOUND
                    }
                    AnalysisError::ApiError(_) => StatusCode::BAD_GATEWAY,
                };
                (status, err.to_string())
            }
            AppError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        };
        (status, Json(body)).into_response()
    }
}

/// Tickers must be non-empty and carry the IDX `.JK` suffix.
pub(crate) fn validate_ticker(ticker: &str) -> Result<String, AnalysisError> {
    let ticker = ticker.trim().to_uppercase();
    if !ticker.is_empty() && ticker.ends_with(".JK") {
        Ok(ticker)
    } else {
        Err(AnalysisError::InvalidTicker(ticker))
    }
}

/// Resolve a ticker to its registry entry, latest ratios and bottom-up
/// health score. Shared by the company and comparison routes.
pub(crate) async fn resolve_company(
    state: &AppState,
    ticker: &str,
) -> Result<(CompanyInfo, CompanyRatios, i32), AppError> {
    let info = state
        .provider
        .company_info(ticker)
        .ok_or_else(|| AnalysisError::CompanyNotFound(ticker.to_string()))?;
    let ratios = state.provider.calculate_ratios(ticker).await?;
    let score = ratio_engine::score_ratios(&ratios.ratios, &info.sector);
    Ok((info, ratios, score))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "FinDash API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(company_routes::company_routes())
        .merge(compare_routes::compare_routes())
        .merge(sector_routes::sector_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let cache_ttl = std::env::var("CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CACHE_TTL_SECS);

    let provider = Arc::new(IdxDataClient::new());
    let state = AppState::new(provider, Duration::from_secs(cache_ttl));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("FinDash API listening on {bind_addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn ticker_validation_requires_the_jk_suffix() {
        assert_eq!(validate_ticker("bbca.jk").unwrap(), "BBCA.JK");
        assert!(validate_ticker("BBCA").is_err());
        assert!(validate_ticker("").is_err());
    }

    #[test]
    fn expired_cache_entries_are_not_returned() {
        let state = test_support::state_with_ttl(Duration::from_millis(10));
        state.set_cached("key", &42u32);
        assert_eq!(state.get_cached::<u32>("key"), Some(42));

        std::thread::sleep(Duration::from_millis(25));
        assert_eq!(state.get_cached::<u32>("key"), None);
    }

    #[test]
    fn domain_errors_map_to_their_status_codes() {
        let cases = [
            (
                AnalysisError::InvalidTicker("X".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnalysisError::InvalidRequest("X".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnalysisError::CompanyNotFound("X".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                AnalysisError::DataUnavailable("X".into()),
                StatusCode::NOT_FOUND,
            ),
            (AnalysisError::ApiError("X".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
