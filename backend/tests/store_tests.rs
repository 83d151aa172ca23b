//! Persistence contract tests
//!
//! The blob store promises: whole-value replace on save, parse-or-default
//! on load, and stable serde shapes for the persisted collections. These
//! tests pin the contract with the same serde_json paths the store uses.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use shared::{Category, Employee, InventoryItem, Role, WasteEntry};
use uuid::Uuid;

/// Fresh scratch directory per test
fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kss-store-test-{}-{}", label, Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Mirror of the store's load contract: missing or unreadable blobs fall
/// back to the default
fn load_blob<T: DeserializeOwned + Default>(dir: &PathBuf, key: &str) -> T {
    match fs::read(dir.join(format!("{}.json", key))) {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
        Err(_) => T::default(),
    }
}

/// Mirror of the store's save contract: whole-value replace
fn save_blob<T: Serialize>(dir: &PathBuf, key: &str, value: &T) {
    let bytes = serde_json::to_vec_pretty(value).unwrap();
    fs::write(dir.join(format!("{}.json", key)), bytes).unwrap();
}

// ============================================================================
// Contract Tests
// ============================================================================

#[test]
fn save_then_load_round_trips_inventory() {
    let dir = scratch_dir("inventory");

    let items = vec![
        InventoryItem::new("Hot Dog", Category::Roller, 50),
        InventoryItem {
            current_stock: 38,
            last_week_stock: Some(17),
            ..InventoryItem::new("Wings", Category::Branded, 60)
        },
    ];
    save_blob(&dir, "keiths-inventory-items", &items);

    let loaded: Vec<InventoryItem> = load_blob(&dir, "keiths-inventory-items");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].name, "Wings");
    assert_eq!(loaded[1].last_week_stock, Some(17));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_blob_loads_default() {
    let dir = scratch_dir("missing");

    let employees: Vec<Employee> = load_blob(&dir, "keiths-employees");
    assert!(employees.is_empty());

    let week_start: HashMap<String, i64> = load_blob(&dir, "keiths-week-start-stocks");
    assert!(week_start.is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn corrupt_blob_loads_default() {
    let dir = scratch_dir("corrupt");
    fs::write(dir.join("keiths-waste-entries.json"), b"{not json at all").unwrap();

    let entries: Vec<WasteEntry> = load_blob(&dir, "keiths-waste-entries");
    assert!(entries.is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn save_replaces_whole_value() {
    let dir = scratch_dir("replace");

    save_blob(
        &dir,
        "keiths-week-start-stocks",
        &HashMap::from([("Wings".to_string(), 60i64), ("Hot Dog".to_string(), 50i64)]),
    );
    save_blob(
        &dir,
        "keiths-week-start-stocks",
        &HashMap::from([("Wings".to_string(), 38i64)]),
    );

    let loaded: HashMap<String, i64> = load_blob(&dir, "keiths-week-start-stocks");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get("Wings"), Some(&38));

    fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Serde Shape Tests
// ============================================================================

#[test]
fn waste_entry_json_shape() {
    let mut entry = WasteEntry::new("Wings", 5);
    entry.cooked_by = Some("Sarah Williams".to_string());

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["item"], "Wings");
    assert_eq!(json["quantity"], 5);
    assert_eq!(json["cooked_by"], "Sarah Williams");
    assert!(json["timestamp"].is_string());

    let back: WasteEntry = serde_json::from_value(json).unwrap();
    assert_eq!(back.item, entry.item);
    assert_eq!(back.timestamp, entry.timestamp);
}

#[test]
fn employee_role_serializes_lowercase() {
    let manager = Employee::new("Keith", Role::Manager);
    let json = serde_json::to_value(&manager).unwrap();
    assert_eq!(json["role"], "manager");
    assert_eq!(json["active"], true);
}

#[test]
fn category_serializes_lowercase() {
    let item = InventoryItem::new("Kolache", Category::Breakfast, 20);
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["category"], "breakfast");
}
