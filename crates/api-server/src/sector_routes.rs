//! Sector listing routes

use axum::{extract::State, routing::get, Json, Router};
use ratio_core::SectorSummary;

use crate::{ApiResponse, AppError, AppState};

pub fn sector_routes() -> Router<AppState> {
    Router::new().route("/api/sectors", get(list_sectors))
}

async fn list_sectors(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SectorSummary>>>, AppError> {
    if let Some(cached) = state.get_cached::<Vec<SectorSummary>>("sectors_data") {
        return Ok(Json(ApiResponse::success(cached)));
    }

    let sectors = state.provider.sectors_summary();
    state.set_cached("sectors_data", &sectors);
    Ok(Json(ApiResponse::success(sectors)))
}
