//! OCR sheet intake service
//!
//! Runs recognized text through the shared OCR processor against the live
//! catalogs, and persists human-reviewed results as waste or production
//! entries. Raw OCR output is never saved directly; a result has to pass
//! validation and come back through `confirm`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chrono::Utc;
use shared::{
    process_ocr_text, validate_ocr_quantity, validate_ocr_result, Employee, EmployeeRoster,
    ExtractedItem, FormType, InventoryItem, ItemCatalog, OcrResult, OcrValidation,
    ProductionEntry, ProductionItem, Shift, WasteEntry,
};

use crate::error::{AppError, AppResult};
use crate::store::{keys, Store};

/// OCR intake service
#[derive(Clone)]
pub struct OcrIntakeService {
    store: Store,
}

/// Processed sheet: structured result plus its quality report
#[derive(Debug, Serialize)]
pub struct ProcessedSheet {
    pub result: OcrResult,
    pub validation: OcrValidation,
}

/// One human-reviewed item line
#[derive(Debug, Deserialize)]
pub struct ConfirmedItem {
    pub name: String,
    pub quantity: i64,
}

/// A human-reviewed sheet submitted for saving
#[derive(Debug, Deserialize)]
pub struct ConfirmSheetInput {
    pub form_type: FormType,
    pub employee_name: String,
    pub shift: Option<Shift>,
    pub items: Vec<ConfirmedItem>,
}

/// What a confirmed sheet was saved as
#[derive(Debug, Serialize)]
pub struct ConfirmOutcome {
    pub saved_as: FormType,
    pub waste_entries: usize,
    pub production_entry: Option<Uuid>,
}

impl OcrIntakeService {
    /// Create a new OcrIntakeService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Catalogs backed by live data, with the built-in tables as fallback
    /// for a store that has not seeded its inventory or roster yet.
    async fn catalogs(&self) -> (ItemCatalog, EmployeeRoster) {
        let inventory: Vec<InventoryItem> = self.store.load(keys::INVENTORY_ITEMS).await;
        let catalog = if inventory.is_empty() {
            ItemCatalog::builtin()
        } else {
            ItemCatalog::from_inventory(&inventory)
        };

        let employees: Vec<Employee> = self.store.load(keys::EMPLOYEES).await;
        let roster = EmployeeRoster::from_employees(&employees);
        let roster = if roster.is_empty() {
            EmployeeRoster::builtin()
        } else {
            roster
        };

        (catalog, roster)
    }

    /// Process recognized text into a structured result and quality report
    pub async fn process_text(&self, text: &str) -> ProcessedSheet {
        let (catalog, roster) = self.catalogs().await;

        let result = process_ocr_text(text, &catalog, &roster);
        let validation = validate_ocr_result(&result);

        ProcessedSheet { result, validation }
    }

    /// Persist a human-reviewed sheet.
    ///
    /// A result that would still fail validation is rejected; an unknown
    /// form type saves as a waste sheet, matching the validation warning.
    pub async fn confirm(&self, input: ConfirmSheetInput) -> AppResult<ConfirmOutcome> {
        for item in &input.items {
            validate_ocr_quantity(item.quantity).map_err(|e| AppError::Validation {
                field: item.name.clone(),
                message: e.to_string(),
            })?;
        }

        // Re-run the shared validation over the reviewed result so the
        // save gate matches what the review screen showed.
        let employee_name = input.employee_name.trim().to_string();
        let reviewed = OcrResult {
            form_type: input.form_type,
            employee_name: Some(employee_name.clone()).filter(|n| !n.is_empty()),
            shift: input.shift,
            date: Utc::now(),
            items: input
                .items
                .iter()
                .map(|i| ExtractedItem {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    confidence: 1.0,
                })
                .collect(),
            raw_text: String::new(),
        };
        let validation = validate_ocr_result(&reviewed);
        if !validation.is_valid {
            return Err(AppError::UnprocessableSheet(validation.errors.join("; ")));
        }

        match input.form_type {
            FormType::Production => {
                let shift = input.shift.ok_or_else(|| AppError::Validation {
                    field: "shift".to_string(),
                    message: "Shift is required for a production sheet".to_string(),
                })?;

                let (catalog, _) = self.catalogs().await;
                let mut lines = Vec::with_capacity(input.items.len());
                for item in &input.items {
                    let category =
                        catalog
                            .category_of(&item.name)
                            .ok_or_else(|| AppError::Validation {
                                field: "items".to_string(),
                                message: format!("Unknown item: {}", item.name),
                            })?;
                    lines.push(ProductionItem {
                        name: item.name.clone(),
                        category,
                        quantity: item.quantity,
                    });
                }

                let entry = ProductionEntry::new(employee_name, shift, lines);
                let entry_id = entry.id;

                self.store
                    .update::<Vec<ProductionEntry>, _, _>(
                        keys::PRODUCTION_ENTRIES,
                        move |entries| {
                            entries.push(entry);
                            Ok(())
                        },
                    )
                    .await?;

                Ok(ConfirmOutcome {
                    saved_as: FormType::Production,
                    waste_entries: 0,
                    production_entry: Some(entry_id),
                })
            }
            FormType::Waste | FormType::Unknown => {
                let new_entries: Vec<WasteEntry> = input
                    .items
                    .iter()
                    .map(|i| {
                        let mut entry = WasteEntry::new(i.name.clone(), i.quantity);
                        entry.cooked_by = Some(employee_name.clone());
                        entry
                    })
                    .collect();
                let created = new_entries.len();

                self.store
                    .update::<Vec<WasteEntry>, _, _>(keys::WASTE_ENTRIES, move |entries| {
                        entries.extend(new_entries);
                        Ok(())
                    })
                    .await?;

                Ok(ConfirmOutcome {
                    saved_as: FormType::Waste,
                    waste_entries: created,
                    production_entry: None,
                })
            }
        }
    }
}
