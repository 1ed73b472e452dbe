//! Two-company comparison routes

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use ratio_core::{
    AnalysisError, ComparisonData, ComparisonEntry, ComparisonSeries, RatioCategory,
};
use serde::Deserialize;
use std::collections::HashMap;

use crate::{resolve_company, ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub ticker1: Option<String>,
    pub ticker2: Option<String>,
}

pub fn compare_routes() -> Router<AppState> {
    Router::new()
        .route("/api/compare", get(compare_companies))
        .route("/api/compare/:category", get(compare_category_series))
}

fn required_pair(query: &CompareQuery) -> Result<(String, String), AnalysisError> {
    let (Some(ticker1), Some(ticker2)) = (query.ticker1.as_deref(), query.ticker2.as_deref())
    else {
        return Err(AnalysisError::InvalidRequest(
            "both ticker1 and ticker2 are required".to_string(),
        ));
    };
    if ticker1 == ticker2 {
        return Err(AnalysisError::InvalidRequest(
            "cannot compare a company with itself".to_string(),
        ));
    }
    Ok((ticker1.to_string(), ticker2.to_string()))
}

/// Cache key is symmetric in ticker order, so A-vs-B and B-vs-A share an
/// entry.
pub(crate) fn comparison_cache_key(ticker1: &str, ticker2: &str) -> String {
    let (first, second) = if ticker1 <= ticker2 {
        (ticker1, ticker2)
    } else {
        (ticker2, ticker1)
    };
    format!("comparison_{first}_{second}")
}

async fn compare_companies(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiResponse<ComparisonData>>, AppError> {
    let (ticker1, ticker2) = required_pair(&query)?;

    let cache_key = comparison_cache_key(&ticker1, &ticker2);
    if let Some(cached) = state.get_cached::<ComparisonData>(&cache_key) {
        tracing::info!("returning cached comparison for {ticker1} vs {ticker2}");
        return Ok(Json(ApiResponse::success(cached)));
    }

    let entry1 = comparison_entry(&state, &ticker1).await?;
    let entry2 = comparison_entry(&state, &ticker2).await?;

    let data = ComparisonData {
        comparison_data: HashMap::from([(ticker1.clone(), entry1), (ticker2.clone(), entry2)]),
        last_updated: Utc::now(),
    };

    state.set_cached(&cache_key, &data);
    tracing::info!("compared {ticker1} vs {ticker2}");
    Ok(Json(ApiResponse::success(data)))
}

/// Per-category grouped-bar series for a ticker pair; the peer's values
/// ride in the counterpart slot.
async fn compare_category_series(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiResponse<ComparisonSeries>>, AppError> {
    let category = RatioCategory::parse(&category).ok_or_else(|| {
        AnalysisError::InvalidRequest(format!("unknown ratio category: {category}"))
    })?;
    let (ticker1, ticker2) = required_pair(&query)?;

    let (_, ratios1, _) = resolve_company(&state, &ticker1).await?;
    let (_, ratios2, _) = resolve_company(&state, &ticker2).await?;

    let series =
        ratio_engine::peer_series_for(&ratios1.ratios, &ratios2.ratios, category, &[]);
    Ok(Json(ApiResponse::success(series)))
}

async fn comparison_entry(
    state: &AppState,
    ticker: &str,
) -> Result<ComparisonEntry, AppError> {
    let (info, ratios, health_score) = resolve_company(state, ticker).await?;
    Ok(ComparisonEntry {
        name: info.name,
        sector: info.sector,
        ratios: ratios.ratios,
        health_score,
    })
}
