//! Inventory management service
//!
//! CRUD over the item list plus the weekly bookkeeping the analytics
//! engine feeds on: stock counts, delivered order quantities, and the
//! week rollover that snapshots week-start stocks.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{
    calculate_weekly_sales, is_duplicate_item_name, validate_item_name, validate_par_level,
    validate_quantity, validate_stock, Category, InventoryItem, WasteEntry,
};

use crate::error::{AppError, AppResult};
use crate::store::{keys, Store};

/// Inventory service for managing items and weekly stock bookkeeping
#[derive(Clone)]
pub struct InventoryService {
    store: Store,
}

/// Input for adding an inventory item
#[derive(Debug, Deserialize)]
pub struct CreateItemInput {
    pub name: String,
    pub category: Category,
    pub par_level: i64,
    pub unit: Option<String>,
}

/// Input for editing an inventory item
#[derive(Debug, Deserialize)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub par_level: Option<i64>,
    pub current_stock: Option<i64>,
    pub unit: Option<String>,
}

/// Input for a stock count submission, item name to counted quantity
#[derive(Debug, Deserialize)]
pub struct RecordCountsInput {
    pub counts: HashMap<String, i64>,
}

/// Input for recording delivered order quantities
#[derive(Debug, Deserialize)]
pub struct RecordOrderedInput {
    pub quantities: HashMap<String, i64>,
}

/// Summary of a week rollover
#[derive(Debug, Serialize)]
pub struct WeekRollover {
    pub items_rolled: usize,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List all inventory items
    pub async fn list_items(&self) -> Vec<InventoryItem> {
        self.store.load(keys::INVENTORY_ITEMS).await
    }

    /// Add an inventory item
    pub async fn create_item(&self, input: CreateItemInput) -> AppResult<InventoryItem> {
        validate_item_name(&input.name).map_err(|e| AppError::Validation {
            field: "name".to_string(),
            message: e.to_string(),
        })?;
        validate_par_level(input.par_level).map_err(|e| AppError::Validation {
            field: "par_level".to_string(),
            message: e.to_string(),
        })?;

        self.store
            .update::<Vec<InventoryItem>, _, _>(keys::INVENTORY_ITEMS, move |items| {
                if is_duplicate_item_name(&input.name, items) {
                    return Err(AppError::DuplicateEntry("item name".to_string()));
                }

                let mut item =
                    InventoryItem::new(input.name.trim(), input.category, input.par_level);
                if let Some(unit) = input.unit {
                    item.unit = unit;
                }
                items.push(item.clone());
                Ok(item)
            })
            .await
    }

    /// Edit an inventory item
    pub async fn update_item(&self, id: Uuid, input: UpdateItemInput) -> AppResult<InventoryItem> {
        if let Some(name) = &input.name {
            validate_item_name(name).map_err(|e| AppError::Validation {
                field: "name".to_string(),
                message: e.to_string(),
            })?;
        }
        if let Some(par_level) = input.par_level {
            validate_par_level(par_level).map_err(|e| AppError::Validation {
                field: "par_level".to_string(),
                message: e.to_string(),
            })?;
        }
        if let Some(stock) = input.current_stock {
            validate_stock(stock).map_err(|e| AppError::Validation {
                field: "current_stock".to_string(),
                message: e.to_string(),
            })?;
        }

        self.store
            .update::<Vec<InventoryItem>, _, _>(keys::INVENTORY_ITEMS, move |items| {
                if let Some(name) = &input.name {
                    let renamed_to_existing = items
                        .iter()
                        .any(|i| i.id != id && i.name.to_lowercase() == name.trim().to_lowercase());
                    if renamed_to_existing {
                        return Err(AppError::DuplicateEntry("item name".to_string()));
                    }
                }

                let item = items
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or_else(|| AppError::NotFound("Inventory item".to_string()))?;

                if let Some(name) = input.name {
                    item.name = name.trim().to_string();
                }
                if let Some(category) = input.category {
                    item.category = category;
                }
                if let Some(par_level) = input.par_level {
                    item.par_level = par_level;
                }
                if let Some(stock) = input.current_stock {
                    item.current_stock = stock;
                }
                if let Some(unit) = input.unit {
                    item.unit = unit;
                }

                Ok(item.clone())
            })
            .await
    }

    /// Remove an inventory item
    pub async fn delete_item(&self, id: Uuid) -> AppResult<()> {
        self.store
            .update::<Vec<InventoryItem>, _, _>(keys::INVENTORY_ITEMS, move |items| {
                let before = items.len();
                items.retain(|i| i.id != id);
                if items.len() == before {
                    return Err(AppError::NotFound("Inventory item".to_string()));
                }
                Ok(())
            })
            .await
    }

    /// Apply a stock count submission. Names match case-insensitively;
    /// counts for unknown items are ignored. Returns how many items were
    /// updated.
    pub async fn record_counts(&self, input: RecordCountsInput) -> AppResult<usize> {
        for (name, count) in &input.counts {
            validate_stock(*count).map_err(|e| AppError::Validation {
                field: name.clone(),
                message: e.to_string(),
            })?;
        }

        self.store
            .update::<Vec<InventoryItem>, _, _>(keys::INVENTORY_ITEMS, move |items| {
                let mut updated = 0;
                for item in items.iter_mut() {
                    let count = input
                        .counts
                        .iter()
                        .find(|(name, _)| name.to_lowercase() == item.name.to_lowercase())
                        .map(|(_, count)| *count);
                    if let Some(count) = count {
                        item.current_stock = count;
                        updated += 1;
                    }
                }
                Ok(updated)
            })
            .await
    }

    /// Record delivered order quantities for the running week. Deliveries
    /// accumulate until the next rollover clears them.
    pub async fn record_ordered(&self, input: RecordOrderedInput) -> AppResult<()> {
        for (name, quantity) in &input.quantities {
            validate_quantity(*quantity).map_err(|e| AppError::Validation {
                field: name.clone(),
                message: e.to_string(),
            })?;
        }

        self.store
            .update::<HashMap<String, i64>, _, _>(keys::ORDERED_QUANTITIES, move |ordered| {
                for (name, quantity) in input.quantities {
                    *ordered.entry(name).or_insert(0) += quantity;
                }
                Ok(())
            })
            .await
    }

    /// Close out the running week: store each item's computed sold figure
    /// for next week's trend, snapshot current stock as the new week
    /// start, and clear delivered quantities.
    pub async fn start_week(&self) -> AppResult<WeekRollover> {
        let _guard = self.store.lock().await;

        let mut items: Vec<InventoryItem> = self.store.load(keys::INVENTORY_ITEMS).await;
        let waste_entries: Vec<WasteEntry> = self.store.load(keys::WASTE_ENTRIES).await;
        let week_start_stocks: HashMap<String, i64> =
            self.store.load(keys::WEEK_START_STOCKS).await;
        let ordered_quantities: HashMap<String, i64> =
            self.store.load(keys::ORDERED_QUANTITIES).await;

        let cutoff = Utc::now() - Duration::days(7);
        let recent_waste: Vec<WasteEntry> = waste_entries
            .into_iter()
            .filter(|w| w.timestamp >= cutoff)
            .collect();

        let mut new_week_start: HashMap<String, i64> = HashMap::new();
        for item in items.iter_mut() {
            let week_start_stock = match week_start_stocks.get(&item.name) {
                Some(&n) if n != 0 => n,
                _ => item.current_stock,
            };
            let ordered = ordered_quantities.get(&item.name).copied().unwrap_or(0);

            let sales = calculate_weekly_sales(item, &recent_waste, week_start_stock, ordered);
            item.last_week_stock = Some(sales.sold);
            new_week_start.insert(item.name.clone(), item.current_stock);
        }

        let items_rolled = items.len();
        self.store.save(keys::INVENTORY_ITEMS, &items).await?;
        self.store.save(keys::WEEK_START_STOCKS, &new_week_start).await?;
        self.store
            .save(keys::ORDERED_QUANTITIES, &HashMap::<String, i64>::new())
            .await?;

        tracing::info!("Week rolled over for {} items", items_rolled);
        Ok(WeekRollover { items_rolled })
    }
}
