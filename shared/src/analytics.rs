//! Sales analytics and order-suggestion engine
//!
//! Computes weekly sold/wasted quantities per inventory item and derives a
//! ranked list of order suggestions. All functions take full snapshots of
//! the data they need and return derived values; nothing here touches
//! storage. The only ambient input is the wall clock for the trailing
//! 7-day waste window, and `generate_all_order_suggestions_at` exposes it
//! as a parameter.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Category, InventoryItem, ProductionEntry, WasteEntry};

/// Week-over-week demand classification for an item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendClass {
    Hot,
    Normal,
    Cold,
}

impl TrendClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendClass::Hot => "hot",
            TrendClass::Normal => "normal",
            TrendClass::Cold => "cold",
        }
    }
}

impl std::fmt::Display for TrendClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly sold/wasted figures for one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklySalesData {
    pub item_name: String,
    pub sold: i64,
    pub wasted: i64,
    /// Percent of produced units that were wasted, 0-100
    pub waste_rate: f64,
    /// Percent change in sold units versus last week
    pub sales_trend: f64,
    pub current_par: i64,
}

/// An order recommendation for one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSuggestion {
    pub item_name: String,
    pub category: Category,
    pub current_par: i64,
    pub suggested_order: i64,
    /// Signed difference from par
    pub adjustment: i64,
    pub reason: String,
    pub trend: TrendClass,
    pub waste_rate: f64,
    /// 1 = most urgent, 5 = least; drives report ordering
    pub priority: u8,
}

/// Calculate sales figures for the current week.
///
/// `sold` is derived from the stock movement identity
/// `(week start + ordered) - (current stock + wasted)`. The raw value can
/// go negative when counts are off; the returned field clamps to zero
/// while the waste rate divides by the raw value.
pub fn calculate_weekly_sales(
    item: &InventoryItem,
    waste_entries: &[WasteEntry],
    week_start_stock: i64,
    ordered: i64,
) -> WeeklySalesData {
    let wasted: i64 = waste_entries
        .iter()
        .filter(|w| w.item == item.name)
        .map(|w| w.quantity)
        .sum();

    let sold_raw = (week_start_stock + ordered) - (item.current_stock + wasted);

    let waste_rate = if sold_raw > 0 {
        wasted as f64 / (sold_raw + wasted) as f64 * 100.0
    } else {
        0.0
    };

    // A recorded zero behaves like an absent reading: first-week items get
    // a flat trend instead of a division blowup.
    let last_week_sold = match item.last_week_stock {
        Some(n) if n > 0 => n,
        _ => sold_raw,
    };
    let sales_trend = if last_week_sold > 0 {
        (sold_raw - last_week_sold) as f64 / last_week_sold as f64 * 100.0
    } else {
        0.0
    };

    WeeklySalesData {
        item_name: item.name.clone(),
        sold: sold_raw.max(0),
        wasted,
        waste_rate,
        sales_trend,
        current_par: item.par_level,
    }
}

/// Generate an order suggestion from one item's weekly figures.
///
/// The branches are evaluated in a fixed order and the first match wins;
/// high waste overrides any sales trend.
pub fn generate_order_suggestion(sales_data: &WeeklySalesData, category: Category) -> OrderSuggestion {
    let item_name = sales_data.item_name.clone();
    let sales_trend = sales_data.sales_trend;
    let waste_rate = sales_data.waste_rate;
    let current_par = sales_data.current_par;

    let suggested_order;
    let reason;
    let trend;
    let priority;

    if waste_rate > 30.0 {
        // High waste - reduce regardless of sales
        let reduction = (current_par as f64 * 0.25).floor() as i64;
        suggested_order = (current_par - reduction).max(1);
        reason = format!("High waste rate ({:.0}%) - reduce production", waste_rate);
        trend = TrendClass::Cold;
        priority = 5;
    } else if sales_trend >= 20.0 {
        // Hot item - don't run out
        let increase = (current_par as f64 * (sales_trend / 100.0)).ceil() as i64;
        suggested_order = current_par + increase;
        reason = format!("Sales up {:.0}% - order more", sales_trend);
        trend = TrendClass::Hot;
        priority = 1;
    } else if sales_trend >= 10.0 {
        let increase = (current_par as f64 * 0.15).ceil() as i64;
        suggested_order = current_par + increase;
        reason = format!("Sales up {:.0}% - slight increase", sales_trend);
        trend = TrendClass::Hot;
        priority = 2;
    } else if sales_trend <= -20.0 {
        let decrease = (current_par as f64 * 0.25).floor() as i64;
        suggested_order = (current_par - decrease).max(1);
        reason = format!("Sales down {:.0}% - reduce order", sales_trend.abs());
        trend = TrendClass::Cold;
        priority = 4;
    } else if sales_trend <= -10.0 {
        let decrease = (current_par as f64 * 0.15).floor() as i64;
        suggested_order = (current_par - decrease).max(1);
        reason = format!("Sales down {:.0}% - slight reduction", sales_trend.abs());
        trend = TrendClass::Cold;
        priority = 3;
    } else {
        suggested_order = current_par;
        reason = "Steady sales - order at par".to_string();
        trend = TrendClass::Normal;
        priority = 3;
    }

    let mut reason = reason;
    if waste_rate > 15.0 && waste_rate <= 30.0 {
        reason.push_str(&format!(" ⚠️ ({:.0}% waste)", waste_rate));
    }

    OrderSuggestion {
        item_name,
        category,
        current_par,
        suggested_order,
        adjustment: suggested_order - current_par,
        reason,
        trend,
        waste_rate,
        priority,
    }
}

/// Generate order suggestions for the whole inventory, most urgent first.
pub fn generate_all_order_suggestions(
    inventory: &[InventoryItem],
    waste_entries: &[WasteEntry],
    week_start_stocks: &HashMap<String, i64>,
    ordered_quantities: &HashMap<String, i64>,
) -> Vec<OrderSuggestion> {
    generate_all_order_suggestions_at(
        inventory,
        waste_entries,
        week_start_stocks,
        ordered_quantities,
        Utc::now(),
    )
}

/// Same as [`generate_all_order_suggestions`] with an explicit reference
/// time for the trailing 7-day waste window.
pub fn generate_all_order_suggestions_at(
    inventory: &[InventoryItem],
    waste_entries: &[WasteEntry],
    week_start_stocks: &HashMap<String, i64>,
    ordered_quantities: &HashMap<String, i64>,
    now: DateTime<Utc>,
) -> Vec<OrderSuggestion> {
    let cutoff = now - Duration::days(7);
    let recent_waste: Vec<WasteEntry> = waste_entries
        .iter()
        .filter(|w| w.timestamp >= cutoff)
        .cloned()
        .collect();

    let mut suggestions: Vec<OrderSuggestion> = inventory
        .iter()
        .map(|item| {
            // A zero snapshot means the week was never opened for this item.
            let week_start_stock = match week_start_stocks.get(&item.name) {
                Some(&n) if n != 0 => n,
                _ => item.current_stock,
            };
            let ordered = ordered_quantities.get(&item.name).copied().unwrap_or(0);

            let sales_data =
                calculate_weekly_sales(item, &recent_waste, week_start_stock, ordered);
            generate_order_suggestion(&sales_data, item.category)
        })
        .collect();

    // Stable: ties keep inventory order
    suggestions.sort_by_key(|s| s.priority);
    suggestions
}

// ============================================================================
// Employee Performance
// ============================================================================

/// Production-versus-waste status for one employee
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceStatus {
    Good,
    Undercooking,
    Overcooking,
}

/// Weekly performance summary for one employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePerformance {
    pub employee_name: String,
    /// Percent of the par production target cooked
    pub production_score: i64,
    /// Percent of cooked units that sold rather than being wasted
    pub sell_through_rate: i64,
    /// Percent of item categories the employee cooked from
    pub category_coverage: i64,
    pub total_cooked: i64,
    pub total_sold: i64,
    pub total_wasted: i64,
    pub status: PerformanceStatus,
    pub issues: Vec<String>,
}

/// Default weekly production target per employee
pub const DEFAULT_PAR_TARGET: i64 = 150;

/// Score one employee's production entries against their attributed waste.
pub fn calculate_performance(
    employee_name: &str,
    production_entries: &[ProductionEntry],
    waste_entries: &[WasteEntry],
    par_target: i64,
) -> EmployeePerformance {
    let emp_production: Vec<&ProductionEntry> = production_entries
        .iter()
        .filter(|p| p.employee_name == employee_name)
        .collect();

    let total_cooked: i64 = emp_production.iter().map(|p| p.total_cooked()).sum();
    let total_wasted: i64 = waste_entries
        .iter()
        .filter(|w| w.cooked_by.as_deref() == Some(employee_name))
        .map(|w| w.quantity)
        .sum();
    let total_sold = total_cooked - total_wasted;

    let production_score = if par_target > 0 {
        (total_cooked as f64 / par_target as f64 * 100.0).round() as i64
    } else {
        0
    };
    let sell_through_rate = if total_cooked > 0 {
        (total_sold as f64 / total_cooked as f64 * 100.0).round() as i64
    } else {
        0
    };

    let categories_cooked: HashSet<Category> = emp_production
        .iter()
        .flat_map(|p| p.items.iter().map(|i| i.category))
        .collect();
    let category_coverage =
        (categories_cooked.len() as f64 / Category::ALL.len() as f64 * 100.0).round() as i64;

    let mut status = PerformanceStatus::Good;
    let mut issues = Vec::new();

    if production_score < 80 {
        status = PerformanceStatus::Undercooking;
        issues.push(format!(
            "Only producing {}% of target - needs to cook more",
            production_score
        ));
    } else if production_score > 120 {
        status = PerformanceStatus::Overcooking;
        issues.push(format!(
            "Producing {}% of target - cooking too much",
            production_score
        ));
    }

    if sell_through_rate < 60 {
        status = PerformanceStatus::Overcooking;
        issues.push(format!(
            "Only {}% sell-through - too much waste",
            sell_through_rate
        ));
    } else if sell_through_rate > 90 && production_score < 100 {
        issues.push(format!(
            "{}% sell-through suggests could cook more",
            sell_through_rate
        ));
    }

    if category_coverage < 70 {
        issues.push(format!(
            "Only covering {}% of categories - not enough variety",
            category_coverage
        ));
    }

    EmployeePerformance {
        employee_name: employee_name.to_string(),
        production_score,
        sell_through_rate,
        category_coverage,
        total_cooked,
        total_sold,
        total_wasted,
        status,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductionItem;
    use crate::types::Shift;

    fn item(name: &str, par: i64, current: i64, last_week: Option<i64>) -> InventoryItem {
        InventoryItem {
            current_stock: current,
            last_week_stock: last_week,
            ..InventoryItem::new(name, Category::Branded, par)
        }
    }

    fn waste(name: &str, qty: i64) -> WasteEntry {
        WasteEntry::new(name, qty)
    }

    #[test]
    fn weekly_sales_wings_example() {
        let wings = item("Wings", 60, 38, None);
        let entries = vec![waste("Wings", 3), waste("Wings", 2)];

        let sales = calculate_weekly_sales(&wings, &entries, 60, 0);

        // sold = (60 + 0) - (38 + 5) = 17
        assert_eq!(sales.sold, 17);
        assert_eq!(sales.wasted, 5);
        // 5 / 22 * 100
        assert!((sales.waste_rate - 22.727).abs() < 0.01);
        assert_eq!(sales.sales_trend, 0.0);
    }

    #[test]
    fn weekly_sales_ignores_other_items() {
        let wings = item("Wings", 60, 38, None);
        let entries = vec![waste("Wings", 5), waste("Corn Dog", 12)];

        let sales = calculate_weekly_sales(&wings, &entries, 60, 0);
        assert_eq!(sales.wasted, 5);
    }

    #[test]
    fn weekly_sales_name_match_is_case_sensitive() {
        let wings = item("Wings", 60, 38, None);
        let entries = vec![waste("wings", 5)];

        let sales = calculate_weekly_sales(&wings, &entries, 60, 0);
        assert_eq!(sales.wasted, 0);
    }

    #[test]
    fn sold_clamps_to_zero_but_waste_rate_uses_raw_value() {
        // current stock above week start: raw sold is negative
        let it = item("Donuts", 40, 50, None);
        let entries = vec![waste("Donuts", 10)];

        let sales = calculate_weekly_sales(&it, &entries, 45, 0);
        assert_eq!(sales.sold, 0);
        // raw sold = 45 - 60 = -15, so the rate guard kicks in
        assert_eq!(sales.waste_rate, 0.0);
    }

    #[test]
    fn ordered_quantity_counts_toward_sold() {
        let it = item("Pizza", 30, 10, None);
        let sales = calculate_weekly_sales(&it, &[], 20, 15);
        // (20 + 15) - (10 + 0) = 25
        assert_eq!(sales.sold, 25);
    }

    #[test]
    fn trend_against_last_week() {
        let it = item("Hot Dog", 50, 10, Some(20));
        let sales = calculate_weekly_sales(&it, &[], 35, 0);
        // sold = 25, last week 20 => +25%
        assert_eq!(sales.sold, 25);
        assert!((sales.sales_trend - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_last_week_stock_gives_flat_trend() {
        let it = item("Hot Dog", 50, 10, Some(0));
        let sales = calculate_weekly_sales(&it, &[], 35, 0);
        assert_eq!(sales.sales_trend, 0.0);
    }

    fn sales(name: &str, trend: f64, waste_rate: f64, par: i64) -> WeeklySalesData {
        WeeklySalesData {
            item_name: name.to_string(),
            sold: 0,
            wasted: 0,
            waste_rate,
            sales_trend: trend,
            current_par: par,
        }
    }

    #[test]
    fn high_waste_wins_over_hot_trend() {
        let s = sales("Brisket", 50.0, 35.0, 40);
        let sug = generate_order_suggestion(&s, Category::Deli);

        assert_eq!(sug.trend, TrendClass::Cold);
        assert_eq!(sug.priority, 5);
        // 40 - floor(10) = 30
        assert_eq!(sug.suggested_order, 30);
        assert_eq!(sug.adjustment, -10);
        assert_eq!(sug.reason, "High waste rate (35%) - reduce production");
    }

    #[test]
    fn hot_item_orders_above_par() {
        let s = sales("Wings", 25.0, 0.0, 100);
        let sug = generate_order_suggestion(&s, Category::Branded);

        assert_eq!(sug.suggested_order, 125);
        assert_eq!(sug.trend, TrendClass::Hot);
        assert_eq!(sug.priority, 1);
        assert_eq!(sug.reason, "Sales up 25% - order more");
    }

    #[test]
    fn warm_item_gets_fifteen_percent_bump() {
        let s = sales("Kolache", 12.0, 0.0, 20);
        let sug = generate_order_suggestion(&s, Category::Breakfast);

        // 20 + ceil(3) = 23
        assert_eq!(sug.suggested_order, 23);
        assert_eq!(sug.priority, 2);
    }

    #[test]
    fn cold_item_reduces_order() {
        let s = sales("Muffins", -25.0, 0.0, 40);
        let sug = generate_order_suggestion(&s, Category::Bakery);

        assert_eq!(sug.suggested_order, 30);
        assert_eq!(sug.trend, TrendClass::Cold);
        assert_eq!(sug.priority, 4);
        assert_eq!(sug.reason, "Sales down 25% - reduce order");
    }

    #[test]
    fn cool_item_slight_reduction() {
        let s = sales("Muffins", -12.0, 0.0, 40);
        let sug = generate_order_suggestion(&s, Category::Bakery);

        // 40 - floor(6) = 34
        assert_eq!(sug.suggested_order, 34);
        assert_eq!(sug.priority, 3);
        assert_eq!(sug.trend, TrendClass::Cold);
    }

    #[test]
    fn reduction_never_drops_below_one() {
        let s = sales("Boudin", -30.0, 0.0, 1);
        let sug = generate_order_suggestion(&s, Category::Breakfast);
        assert_eq!(sug.suggested_order, 1);
    }

    #[test]
    fn steady_item_with_moderate_waste_gets_warning_suffix() {
        let s = sales("Wings", 0.0, 22.7, 60);
        let sug = generate_order_suggestion(&s, Category::Branded);

        assert_eq!(sug.suggested_order, 60);
        assert_eq!(sug.trend, TrendClass::Normal);
        assert_eq!(sug.priority, 3);
        assert_eq!(sug.reason, "Steady sales - order at par ⚠️ (23% waste)");
    }

    #[test]
    fn hot_item_keeps_waste_warning_suffix() {
        let s = sales("Wings", 25.0, 20.0, 100);
        let sug = generate_order_suggestion(&s, Category::Branded);
        assert_eq!(sug.reason, "Sales up 25% - order more ⚠️ (20% waste)");
    }

    #[test]
    fn adjustment_matches_difference_from_par() {
        for trend in [-30.0, -15.0, 0.0, 15.0, 30.0] {
            let s = sales("Pizza", trend, 0.0, 48);
            let sug = generate_order_suggestion(&s, Category::Branded);
            assert_eq!(sug.adjustment, sug.suggested_order - sug.current_par);
        }
    }

    #[test]
    fn all_suggestions_sorted_by_priority() {
        let inventory = vec![
            item("Steady", 40, 40, None),
            item("Hot", 50, 10, Some(20)),
            item("Wasteful", 40, 5, None),
        ];
        let now = Utc::now();
        let waste_entries = vec![waste("Wasteful", 20)];
        let week_start: HashMap<String, i64> = [
            ("Steady".to_string(), 40),
            ("Hot".to_string(), 35),
            ("Wasteful".to_string(), 30),
        ]
        .into();

        let suggestions = generate_all_order_suggestions_at(
            &inventory,
            &waste_entries,
            &week_start,
            &HashMap::new(),
            now,
        );

        assert_eq!(suggestions.len(), 3);
        for pair in suggestions.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
        }
        assert_eq!(suggestions[0].item_name, "Hot");
        assert_eq!(suggestions[2].item_name, "Wasteful");
    }

    #[test]
    fn old_waste_excluded_from_window() {
        let inventory = vec![item("Wings", 60, 38, None)];
        let now = Utc::now();
        let mut stale = waste("Wings", 50);
        stale.timestamp = now - Duration::days(8);
        let fresh = WasteEntry {
            timestamp: now - Duration::days(2),
            ..waste("Wings", 5)
        };
        let week_start: HashMap<String, i64> = [("Wings".to_string(), 60)].into();

        let suggestions = generate_all_order_suggestions_at(
            &inventory,
            &[stale, fresh],
            &week_start,
            &HashMap::new(),
            now,
        );

        assert_eq!(suggestions[0].waste_rate.round(), 23.0);
    }

    #[test]
    fn missing_week_start_falls_back_to_current_stock() {
        let inventory = vec![item("Wings", 60, 38, None)];
        let suggestions = generate_all_order_suggestions_at(
            &inventory,
            &[],
            &HashMap::new(),
            &HashMap::new(),
            Utc::now(),
        );

        // week start == current stock => sold 0 => steady at par
        assert_eq!(suggestions[0].suggested_order, 60);
        assert_eq!(suggestions[0].trend, TrendClass::Normal);
    }

    #[test]
    fn zero_week_start_treated_as_missing() {
        let inventory = vec![item("Wings", 60, 38, None)];
        let week_start: HashMap<String, i64> = [("Wings".to_string(), 0)].into();
        let suggestions = generate_all_order_suggestions_at(
            &inventory,
            &[],
            &week_start,
            &HashMap::new(),
            Utc::now(),
        );

        assert_eq!(suggestions[0].suggested_order, 60);
    }

    // ========================================================================
    // Performance
    // ========================================================================

    fn production(employee: &str, lines: &[(&str, Category, i64)]) -> ProductionEntry {
        ProductionEntry::new(
            employee,
            Shift::Morning,
            lines
                .iter()
                .map(|(name, category, quantity)| ProductionItem {
                    name: name.to_string(),
                    category: *category,
                    quantity: *quantity,
                })
                .collect(),
        )
    }

    #[test]
    fn performance_good_employee() {
        let entries = vec![production(
            "Sarah Williams",
            &[
                ("Bacon", Category::Breakfast, 40),
                ("Hot Dog", Category::Roller, 30),
                ("Hamburger", Category::Deli, 30),
                ("Donuts", Category::Bakery, 30),
                ("Pizza", Category::Branded, 20),
            ],
        )];
        let mut w = waste("Bacon", 10);
        w.cooked_by = Some("Sarah Williams".to_string());

        let perf = calculate_performance("Sarah Williams", &entries, &[w], DEFAULT_PAR_TARGET);

        assert_eq!(perf.total_cooked, 150);
        assert_eq!(perf.total_wasted, 10);
        assert_eq!(perf.total_sold, 140);
        assert_eq!(perf.production_score, 100);
        assert_eq!(perf.sell_through_rate, 93);
        assert_eq!(perf.category_coverage, 100);
        assert_eq!(perf.status, PerformanceStatus::Good);
        assert!(perf.issues.is_empty());
    }

    #[test]
    fn performance_flags_undercooking() {
        let entries = vec![production("David Chen", &[("Bacon", Category::Breakfast, 50)])];

        let perf = calculate_performance("David Chen", &entries, &[], DEFAULT_PAR_TARGET);

        assert_eq!(perf.production_score, 33);
        assert_eq!(perf.status, PerformanceStatus::Undercooking);
        assert!(perf.issues.iter().any(|i| i.contains("needs to cook more")));
    }

    #[test]
    fn performance_low_sell_through_flags_overcooking() {
        let entries = vec![production("James Thompson", &[("Wings", Category::Branded, 160)])];
        let mut w = waste("Wings", 80);
        w.cooked_by = Some("James Thompson".to_string());

        let perf = calculate_performance("James Thompson", &entries, &[w], DEFAULT_PAR_TARGET);

        assert_eq!(perf.sell_through_rate, 50);
        assert_eq!(perf.status, PerformanceStatus::Overcooking);
    }

    #[test]
    fn performance_ignores_other_employees() {
        let entries = vec![production("David Chen", &[("Bacon", Category::Breakfast, 50)])];
        let mut w = waste("Bacon", 10);
        w.cooked_by = Some("David Chen".to_string());

        let perf = calculate_performance("Sarah Williams", &entries, &[w], DEFAULT_PAR_TARGET);

        assert_eq!(perf.total_cooked, 0);
        assert_eq!(perf.total_wasted, 0);
    }
}
