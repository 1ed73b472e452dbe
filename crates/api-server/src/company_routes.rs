//! Company data routes
//!
//! Per-ticker payload assembly: ratios, trends, industry benchmark,
//! health score, insight bullets and per-category comparison series.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use ratio_core::{
    AnalysisError, CompanyData, CompanyInfo, ComparisonSeries, HealthScore, IndustryAverage,
    RatioCategory,
};
use ratio_engine::InsightReport;

use crate::{resolve_company, validate_ticker, ApiResponse, AppError, AppState};

pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/api/companies", get(list_companies))
        .route("/api/company/:ticker", get(get_company_data))
        .route("/api/company/:ticker/health", get(get_company_health))
        .route("/api/company/:ticker/insights", get(get_company_insights))
        .route(
            "/api/company/:ticker/comparison/:category",
            get(get_category_comparison),
        )
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CompanyInfo>>>, AppError> {
    if let Some(cached) = state.get_cached::<Vec<CompanyInfo>>("companies_list") {
        return Ok(Json(ApiResponse::success(cached)));
    }

    let companies = state.provider.companies();
    state.set_cached("companies_list", &companies);
    Ok(Json(ApiResponse::success(companies)))
}

async fn get_company_data(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse<CompanyData>>, AppError> {
    let ticker = validate_ticker(&ticker)?;

    let cache_key = format!("company_data_{ticker}");
    if let Some(cached) = state.get_cached::<CompanyData>(&cache_key) {
        tracing::info!("returning cached data for {ticker}");
        return Ok(Json(ApiResponse::success(cached)));
    }

    let (info, company_ratios, health_score) = resolve_company(&state, &ticker).await?;
    let trends = state
        .provider
        .trend_series(&ticker, 4)
        .await
        .unwrap_or_default();
    let industry_average = industry_average_for_sector(&state, &info.sector).await;

    let data = CompanyData {
        ticker: info.ticker,
        name: info.name,
        sector: info.sector,
        latest_period: company_ratios.period,
        ratios: company_ratios.ratios,
        trends,
        industry_average: Some(industry_average),
        health_score: Some(health_score),
        last_updated: Utc::now(),
    };

    state.set_cached(&cache_key, &data);
    tracing::info!("assembled company data for {ticker}");
    Ok(Json(ApiResponse::success(data)))
}

async fn get_company_health(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse<HealthScore>>, AppError> {
    let ticker = validate_ticker(&ticker)?;
    let (_, _, composite) = resolve_company(&state, &ticker).await?;
    Ok(Json(ApiResponse::success(HealthScore::from_composite(
        composite,
    ))))
}

async fn get_company_insights(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse<InsightReport>>, AppError> {
    let ticker = validate_ticker(&ticker)?;
    let (info, company_ratios, _) = resolve_company(&state, &ticker).await?;
    let report =
        ratio_engine::analyze_strengths_weaknesses(&company_ratios.ratios, &info.sector);
    Ok(Json(ApiResponse::success(report)))
}

async fn get_category_comparison(
    State(state): State<AppState>,
    Path((ticker, category)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ComparisonSeries>>, AppError> {
    let ticker = validate_ticker(&ticker)?;
    let category = RatioCategory::parse(&category).ok_or_else(|| {
        AnalysisError::InvalidRequest(format!("unknown ratio category: {category}"))
    })?;

    let (info, company_ratios, _) = resolve_company(&state, &ticker).await?;
    let industry = industry_average_for_sector(&state, &info.sector).await;
    let series =
        ratio_engine::industry_series_for(&company_ratios.ratios, &industry, category, &[]);
    Ok(Json(ApiResponse::success(series)))
}

/// Average the sector's resolved ratio bundles. Members whose data cannot
/// be fetched are skipped but still count toward the sector size, matching
/// how the averages are labeled on the dashboard.
pub(crate) async fn industry_average_for_sector(
    state: &AppState,
    sector: &str,
) -> IndustryAverage {
    let members: Vec<CompanyInfo> = state
        .provider
        .companies()
        .into_iter()
        .filter(|c| c.sector == sector)
        .collect();
    let total = members.len();

    let mut bundles = Vec::with_capacity(total);
    for company in &members {
        match state.provider.calculate_ratios(&company.ticker).await {
            Ok(ratios) => bundles.push(ratios.ratios),
            Err(err) => {
                tracing::warn!("could not get ratios for {}: {err}", company.ticker);
            }
        }
    }

    ratio_engine::industry_average(sector, total, &bundles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn rejects_tickers_without_the_jk_suffix() {
        let result = get_company_data(State(test_support::state()), Path("BBCA".into())).await;
        let err = result.err().expect("expected a validation error");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_company_is_a_404() {
        let result =
            get_company_data(State(test_support::state()), Path("ZZZZ.JK".into())).await;
        let err = result.err().expect("expected a lookup error");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn assembles_the_full_company_payload() {
        let response = get_company_data(State(test_support::state()), Path("BBCA.JK".into()))
            .await
            .unwrap();
        let data = response.0.data.unwrap();

        assert_eq!(data.ticker, "BBCA.JK");
        assert_eq!(data.sector, "Banking");
        assert_eq!(data.trends.len(), 4);
        assert!(data.health_score.is_some());
        let industry = data.industry_average.unwrap();
        assert_eq!(industry.total_companies_in_sector, 2);
    }

    #[tokio::test]
    async fn health_route_returns_the_breakdown() {
        let response = get_company_health(State(test_support::state()), Path("BBCA.JK".into()))
            .await
            .unwrap();
        let score = response.0.data.unwrap();
        let sum = score.liquidity + score.profitability + score.leverage + score.activity;
        assert!((sum - score.composite).abs() <= 2);
    }

    #[tokio::test]
    async fn absent_category_renders_an_empty_series() {
        // TLKM's stub bundle has no liquidity sub-record.
        let response = get_category_comparison(
            State(test_support::state()),
            Path(("TLKM.JK".into(), "liquidity".into())),
        )
        .await
        .unwrap();
        let series = response.0.data.unwrap();
        assert!(series.records.is_empty());
    }

    #[tokio::test]
    async fn present_category_renders_ordered_records() {
        let response = get_category_comparison(
            State(test_support::state()),
            Path(("BBCA.JK".into(), "profitability".into())),
        )
        .await
        .unwrap();
        let series = response.0.data.unwrap();
        let labels: Vec<&str> = series.records.iter().map(|r| r.metric.as_str()).collect();
        assert_eq!(labels, ["ROE", "ROA", "NPM", "GPM"]);
    }

    #[tokio::test]
    async fn unknown_category_is_a_400() {
        let result = get_category_comparison(
            State(test_support::state()),
            Path(("BBCA.JK".into(), "velocity".into())),
        )
        .await;
        let err = result.err().expect("expected a category error");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn company_list_is_cached() {
        let state = test_support::state();
        list_companies(State(state.clone())).await.unwrap();
        let cached: Vec<CompanyInfo> = state.get_cached("companies_list").unwrap();
        assert_eq!(cached.len(), 3);
    }
}
