//! HTTP handlers for waste and production log endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::{ProductionEntry, WasteEntry};

use crate::error::AppResult;
use crate::services::waste::{RecordProductionInput, RecordWasteInput, WasteService};
use crate::AppState;

/// Query parameters for listing waste entries
#[derive(Debug, Deserialize)]
pub struct WasteListQuery {
    /// Restrict to the trailing 7-day analytics window
    #[serde(default)]
    pub recent: bool,
}

/// List waste entries
pub async fn list_waste_entries(
    State(state): State<AppState>,
    Query(query): Query<WasteListQuery>,
) -> Json<Vec<WasteEntry>> {
    let service = WasteService::new(state.store);
    Json(service.list_entries(query.recent).await)
}

/// Record a waste entry
pub async fn record_waste_entry(
    State(state): State<AppState>,
    Json(input): Json<RecordWasteInput>,
) -> AppResult<Json<WasteEntry>> {
    let service = WasteService::new(state.store);
    let entry = service.record_entry(input).await?;
    Ok(Json(entry))
}

/// List production entries
pub async fn list_production_entries(
    State(state): State<AppState>,
) -> Json<Vec<ProductionEntry>> {
    let service = WasteService::new(state.store);
    Json(service.list_production().await)
}

/// Record a production sheet
pub async fn record_production_entry(
    State(state): State<AppState>,
    Json(input): Json<RecordProductionInput>,
) -> AppResult<Json<ProductionEntry>> {
    let service = WasteService::new(state.store);
    let entry = service.record_production(input).await?;
    Ok(Json(entry))
}
