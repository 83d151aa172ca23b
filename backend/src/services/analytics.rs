//! Analytics service
//!
//! Assembles store snapshots and hands them to the pure engines in
//! `shared::analytics`. All the interesting math lives there; this layer
//! only loads data and shapes results for the API.

use std::collections::HashMap;

use shared::{
    calculate_performance, generate_all_order_suggestions, Employee, EmployeePerformance,
    InventoryItem, OrderSuggestion, PerformanceStatus, ProductionEntry, WasteEntry,
    DEFAULT_PAR_TARGET,
};

use crate::store::{keys, Store};

/// Analytics service
#[derive(Clone)]
pub struct AnalyticsService {
    store: Store,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Order suggestions for the whole inventory, most urgent first
    pub async fn order_suggestions(&self) -> Vec<OrderSuggestion> {
        let inventory: Vec<InventoryItem> = self.store.load(keys::INVENTORY_ITEMS).await;
        let waste_entries: Vec<WasteEntry> = self.store.load(keys::WASTE_ENTRIES).await;
        let week_start_stocks: HashMap<String, i64> =
            self.store.load(keys::WEEK_START_STOCKS).await;
        let ordered_quantities: HashMap<String, i64> =
            self.store.load(keys::ORDERED_QUANTITIES).await;

        generate_all_order_suggestions(
            &inventory,
            &waste_entries,
            &week_start_stocks,
            &ordered_quantities,
        )
    }

    /// Performance summaries for all active employees, problems first
    pub async fn performance(&self, par_target: Option<i64>) -> Vec<EmployeePerformance> {
        let employees: Vec<Employee> = self.store.load(keys::EMPLOYEES).await;
        let production_entries: Vec<ProductionEntry> =
            self.store.load(keys::PRODUCTION_ENTRIES).await;
        let waste_entries: Vec<WasteEntry> = self.store.load(keys::WASTE_ENTRIES).await;

        let par_target = par_target.unwrap_or(DEFAULT_PAR_TARGET);

        let mut performances: Vec<EmployeePerformance> = employees
            .iter()
            .filter(|e| e.active)
            .map(|e| calculate_performance(&e.name, &production_entries, &waste_entries, par_target))
            .collect();

        performances.sort_by_key(|p| status_rank(p.status));
        performances
    }
}

/// Dashboard ordering: employees needing attention surface first
fn status_rank(status: PerformanceStatus) -> u8 {
    match status {
        PerformanceStatus::Undercooking => 0,
        PerformanceStatus::Overcooking => 1,
        PerformanceStatus::Good => 2,
    }
}
