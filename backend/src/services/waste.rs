//! Waste and production log service

use chrono::{Duration, Utc};
use serde::Deserialize;

use shared::{
    validate_employee_name, validate_item_name, validate_quantity, ProductionEntry,
    ProductionItem, Shift, WasteEntry,
};

use crate::error::{AppError, AppResult};
use crate::store::{keys, Store};

/// Waste log service
#[derive(Clone)]
pub struct WasteService {
    store: Store,
}

/// Input for recording a waste entry
#[derive(Debug, Deserialize)]
pub struct RecordWasteInput {
    pub item: String,
    pub quantity: i64,
    pub cooked_by: Option<String>,
}

/// Input for recording a production sheet
#[derive(Debug, Deserialize)]
pub struct RecordProductionInput {
    pub employee_name: String,
    pub shift: Shift,
    pub items: Vec<ProductionItem>,
}

impl WasteService {
    /// Create a new WasteService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Record one wasted quantity
    pub async fn record_entry(&self, input: RecordWasteInput) -> AppResult<WasteEntry> {
        validate_item_name(&input.item).map_err(|e| AppError::Validation {
            field: "item".to_string(),
            message: e.to_string(),
        })?;
        validate_quantity(input.quantity).map_err(|e| AppError::Validation {
            field: "quantity".to_string(),
            message: e.to_string(),
        })?;

        let mut entry = WasteEntry::new(input.item.trim(), input.quantity);
        entry.cooked_by = input.cooked_by;
        let created = entry.clone();

        self.store
            .update::<Vec<WasteEntry>, _, _>(keys::WASTE_ENTRIES, move |entries| {
                entries.push(entry);
                Ok(())
            })
            .await?;

        Ok(created)
    }

    /// List waste entries. The log is append-only; `recent_only` narrows
    /// to the trailing 7-day analytics window without deleting anything.
    pub async fn list_entries(&self, recent_only: bool) -> Vec<WasteEntry> {
        let entries: Vec<WasteEntry> = self.store.load(keys::WASTE_ENTRIES).await;
        if !recent_only {
            return entries;
        }

        let cutoff = Utc::now() - Duration::days(7);
        entries
            .into_iter()
            .filter(|w| w.timestamp >= cutoff)
            .collect()
    }

    /// Record a production sheet
    pub async fn record_production(
        &self,
        input: RecordProductionInput,
    ) -> AppResult<ProductionEntry> {
        validate_employee_name(&input.employee_name).map_err(|e| AppError::Validation {
            field: "employee_name".to_string(),
            message: e.to_string(),
        })?;
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "At least one item is required".to_string(),
            });
        }
        for item in &input.items {
            validate_quantity(item.quantity).map_err(|e| AppError::Validation {
                field: item.name.clone(),
                message: e.to_string(),
            })?;
        }

        let entry = ProductionEntry::new(input.employee_name.trim(), input.shift, input.items);
        let created = entry.clone();

        self.store
            .update::<Vec<ProductionEntry>, _, _>(keys::PRODUCTION_ENTRIES, move |entries| {
                entries.push(entry);
                Ok(())
            })
            .await?;

        Ok(created)
    }

    /// List production entries
    pub async fn list_production(&self) -> Vec<ProductionEntry> {
        self.store.load(keys::PRODUCTION_ENTRIES).await
    }
}
