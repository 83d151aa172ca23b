//! Route definitions for the Keith's Superstore backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Employee roster
        .nest("/employees", employee_routes())
        // Inventory and weekly bookkeeping
        .nest("/inventory", inventory_routes())
        // Waste log
        .nest("/waste", waste_routes())
        // Production log
        .nest("/production", production_routes())
        // Analytics
        .nest("/analytics", analytics_routes())
        // OCR sheet intake
        .nest("/ocr", ocr_routes())
        // Reports
        .nest("/reports", report_routes())
}

/// Employee roster routes
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/:employee_id",
            axum::routing::put(handlers::update_employee).delete(handlers::delete_employee),
        )
        .route(
            "/:employee_id/toggle-active",
            post(handlers::toggle_employee_active),
        )
}

/// Inventory management routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/items/:item_id",
            axum::routing::put(handlers::update_item).delete(handlers::delete_item),
        )
        // Weekly bookkeeping
        .route("/counts", post(handlers::record_counts))
        .route("/ordered", post(handlers::record_ordered))
        .route("/week-start", post(handlers::start_week))
}

/// Waste log routes
fn waste_routes() -> Router<AppState> {
    Router::new().route(
        "/entries",
        get(handlers::list_waste_entries).post(handlers::record_waste_entry),
    )
}

/// Production log routes
fn production_routes() -> Router<AppState> {
    Router::new().route(
        "/entries",
        get(handlers::list_production_entries).post(handlers::record_production_entry),
    )
}

/// Analytics routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/order-suggestions", get(handlers::get_order_suggestions))
        .route("/performance", get(handlers::get_performance))
}

/// OCR sheet intake routes
fn ocr_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(handlers::process_sheet_text))
        .route("/upload", post(handlers::upload_sheet_image))
        .route("/confirm", post(handlers::confirm_sheet))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handlers::get_order_report))
        .route("/orders.csv", get(handlers::get_order_report_csv))
}
