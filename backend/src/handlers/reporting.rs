//! HTTP handlers for report endpoints

use axum::{extract::State, http::header, response::IntoResponse};

use crate::error::AppResult;
use crate::services::reporting::ReportingService;
use crate::AppState;

/// Printable smart order report
pub async fn get_order_report(State(state): State<AppState>) -> impl IntoResponse {
    let service = ReportingService::new(state.store);
    let report = service.order_report().await;
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], report)
}

/// CSV export of the order suggestions
pub async fn get_order_report_csv(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store);
    let csv_data = service.order_report_csv().await?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv_data))
}
