//! Reporting service
//!
//! Renders the order-suggestion list into the printable fixed-width report
//! and a CSV export, and formats OCR results for the review screen. Pure
//! presentation over the analytics engine's output.

use std::fmt::Write as _;

use chrono::Utc;
use serde::Serialize;

use shared::{OcrResult, OrderSuggestion, TrendClass, REVIEW_CONFIDENCE};

use crate::error::{AppError, AppResult};
use crate::services::analytics::AnalyticsService;
use crate::store::Store;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: Store,
}

impl ReportingService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Printable order report for the current suggestions
    pub async fn order_report(&self) -> String {
        let suggestions = AnalyticsService::new(self.store.clone())
            .order_suggestions()
            .await;
        format_order_report(&suggestions)
    }

    /// CSV export of the current suggestions
    pub async fn order_report_csv(&self) -> AppResult<String> {
        let suggestions = AnalyticsService::new(self.store.clone())
            .order_suggestions()
            .await;
        export_to_csv(&suggestions)
    }
}

/// Render suggestions into the fixed-width smart order report.
///
/// Grouped hot/normal/cold; within each group the engine's priority order
/// is preserved.
pub fn format_order_report(suggestions: &[OrderSuggestion]) -> String {
    let hot: Vec<&OrderSuggestion> = suggestions
        .iter()
        .filter(|s| s.trend == TrendClass::Hot)
        .collect();
    let normal: Vec<&OrderSuggestion> = suggestions
        .iter()
        .filter(|s| s.trend == TrendClass::Normal)
        .collect();
    let cold: Vec<&OrderSuggestion> = suggestions
        .iter()
        .filter(|s| s.trend == TrendClass::Cold)
        .collect();

    let mut report = String::new();
    report.push_str("KEITH'S SUPERSTORE - SMART ORDER REPORT\n");
    let _ = writeln!(report, "Generated: {}", Utc::now().format("%Y-%m-%d %H:%M"));
    report.push_str(&"=".repeat(60));
    report.push_str("\n\n");

    if !hot.is_empty() {
        report.push_str("🔥 HOT ITEMS (Order Above Par)\n");
        report.push_str(&"-".repeat(60));
        report.push('\n');
        for s in &hot {
            let _ = writeln!(
                report,
                "{:<25} Par: {:>3} → Order: {:>3} (+{})",
                s.item_name, s.current_par, s.suggested_order, s.adjustment
            );
            let _ = writeln!(report, "   {}\n", s.reason);
        }
    }

    if !normal.is_empty() {
        report.push_str("\n📊 NORMAL ITEMS (Order at Par)\n");
        report.push_str(&"-".repeat(60));
        report.push('\n');
        for s in &normal {
            let _ = writeln!(report, "{:<25} Order: {}", s.item_name, s.suggested_order);
        }
        report.push('\n');
    }

    if !cold.is_empty() {
        report.push_str("\n❄️ COLD ITEMS (Order Below Par)\n");
        report.push_str(&"-".repeat(60));
        report.push('\n');
        for s in &cold {
            let _ = writeln!(
                report,
                "{:<25} Par: {:>3} → Order: {:>3} ({})",
                s.item_name, s.current_par, s.suggested_order, s.adjustment
            );
            let _ = writeln!(report, "   {}\n", s.reason);
        }
    }

    let total_adjustment: i64 = suggestions.iter().map(|s| s.adjustment.abs()).sum();
    report.push('\n');
    report.push_str(&"=".repeat(60));
    report.push('\n');
    report.push_str("SUMMARY:\n");
    let _ = writeln!(report, "  Hot Items: {}", hot.len());
    let _ = writeln!(report, "  Normal Items: {}", normal.len());
    let _ = writeln!(report, "  Cold Items: {}", cold.len());
    let _ = writeln!(report, "  Total Adjustments: {} items", total_adjustment);

    report
}

/// Format an OCR result for the review screen
pub fn format_ocr_review(result: &OcrResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Form Type: {}", result.form_type.as_str().to_uppercase());
    let _ = writeln!(
        output,
        "Employee: {}",
        result.employee_name.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(
        output,
        "Shift: {}",
        result.shift.map(|s| s.as_str()).unwrap_or("Unknown")
    );
    let _ = writeln!(output, "\nItems Found ({}):", result.items.len());
    output.push_str(&"-".repeat(40));
    output.push('\n');

    for item in &result.items {
        let flag = if item.confidence < REVIEW_CONFIDENCE {
            " ⚠️"
        } else {
            ""
        };
        let _ = writeln!(output, "{:<25} {:>3}{}", item.name, item.quantity, flag);
    }

    output
}

/// Export report data as CSV
pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in data {
        wtr.serialize(record)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
    }
    let csv_data = String::from_utf8(
        wtr.into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
    )
    .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
    Ok(csv_data)
}
