//! HTTP handlers for analytics endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::{EmployeePerformance, OrderSuggestion};

use crate::services::analytics::AnalyticsService;
use crate::AppState;

/// Query parameters for the performance dashboard
#[derive(Debug, Deserialize)]
pub struct PerformanceQuery {
    /// Weekly production target; defaults to the store standard
    pub par_target: Option<i64>,
}

/// Order suggestions for the whole inventory, most urgent first
pub async fn get_order_suggestions(
    State(state): State<AppState>,
) -> Json<Vec<OrderSuggestion>> {
    let service = AnalyticsService::new(state.store);
    Json(service.order_suggestions().await)
}

/// Performance summaries for all active employees
pub async fn get_performance(
    State(state): State<AppState>,
    Query(query): Query<PerformanceQuery>,
) -> Json<Vec<EmployeePerformance>> {
    let service = AnalyticsService::new(state.store);
    Json(service.performance(query.par_target).await)
}
