//! Inventory item models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item categories carried by the store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Roller,
    Deli,
    Bakery,
    Branded,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Breakfast,
        Category::Roller,
        Category::Deli,
        Category::Bakery,
        Category::Branded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast",
            Category::Roller => "roller",
            Category::Deli => "deli",
            Category::Bakery => "bakery",
            Category::Branded => "branded",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item tracked in inventory
///
/// `name` is the join key used by waste entries and OCR results; it is
/// unique case-insensitively across the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    /// Target on-hand quantity
    pub par_level: i64,
    pub current_stock: i64,
    /// Units sold in the previous week, carried forward at week rollover
    pub last_week_stock: Option<i64>,
    pub unit: String,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, category: Category, par_level: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            par_level,
            current_stock: 0,
            last_week_stock: None,
            unit: "each".to_string(),
        }
    }
}
