//! HTTP handlers for inventory management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use shared::InventoryItem;

use crate::error::AppResult;
use crate::services::inventory::{
    CreateItemInput, InventoryService, RecordCountsInput, RecordOrderedInput, UpdateItemInput,
    WeekRollover,
};
use crate::AppState;

/// List all inventory items
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<InventoryItem>> {
    let service = InventoryService::new(state.store);
    Json(service.list_items().await)
}

/// Add an inventory item
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItemInput>,
) -> AppResult<Json<InventoryItem>> {
    let service = InventoryService::new(state.store);
    let item = service.create_item(input).await?;
    Ok(Json(item))
}

/// Edit an inventory item
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(input): Json<UpdateItemInput>,
) -> AppResult<Json<InventoryItem>> {
    let service = InventoryService::new(state.store);
    let item = service.update_item(item_id, input).await?;
    Ok(Json(item))
}

/// Remove an inventory item
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = InventoryService::new(state.store);
    service.delete_item(item_id).await?;
    Ok(Json(()))
}

/// Apply a stock count submission
pub async fn record_counts(
    State(state): State<AppState>,
    Json(input): Json<RecordCountsInput>,
) -> AppResult<Json<CountsResponse>> {
    let service = InventoryService::new(state.store);
    let updated = service.record_counts(input).await?;
    Ok(Json(CountsResponse { updated }))
}

/// Record delivered order quantities
pub async fn record_ordered(
    State(state): State<AppState>,
    Json(input): Json<RecordOrderedInput>,
) -> AppResult<Json<()>> {
    let service = InventoryService::new(state.store);
    service.record_ordered(input).await?;
    Ok(Json(()))
}

/// Close out the running week
pub async fn start_week(State(state): State<AppState>) -> AppResult<Json<WeekRollover>> {
    let service = InventoryService::new(state.store);
    let rollover = service.start_week().await?;
    Ok(Json(rollover))
}

/// Response for a stock count submission
#[derive(Debug, Serialize)]
pub struct CountsResponse {
    pub updated: usize,
}
