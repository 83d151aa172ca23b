//! Waste and production log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Category;
use crate::types::Shift;

/// A single wasted-quantity record
///
/// `item` holds the inventory item name, matched by string equality rather
/// than a foreign key. The log is append-only; analytics windows filter by
/// timestamp instead of deleting old entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteEntry {
    pub id: Uuid,
    pub item: String,
    pub quantity: i64,
    /// Employee who cooked the wasted batch, when known
    pub cooked_by: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl WasteEntry {
    pub fn new(item: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            item: item.into(),
            quantity,
            cooked_by: None,
            timestamp: Utc::now(),
        }
    }
}

/// One line of a production sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionItem {
    pub name: String,
    pub category: Category,
    pub quantity: i64,
}

/// A production sheet submitted for one employee and shift
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionEntry {
    pub id: Uuid,
    pub employee_name: String,
    pub shift: Shift,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<ProductionItem>,
}

impl ProductionEntry {
    pub fn new(employee_name: impl Into<String>, shift: Shift, items: Vec<ProductionItem>) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_name: employee_name.into(),
            shift,
            timestamp: Utc::now(),
            items,
        }
    }

    /// Total units cooked across all lines
    pub fn total_cooked(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
