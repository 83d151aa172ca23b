//! Validation utilities for Keith's Superstore records

use crate::models::InventoryItem;

// ============================================================================
// Inventory Validations
// ============================================================================

/// Validate an item name (non-empty, printable, fits on a report line)
pub fn validate_item_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Item name is required");
    }
    if trimmed.len() > 50 {
        return Err("Item name must be at most 50 characters");
    }
    Ok(())
}

/// Validate a par level (target stock, zero allowed for discontinued items)
pub fn validate_par_level(par_level: i64) -> Result<(), &'static str> {
    if par_level < 0 {
        return Err("Par level cannot be negative");
    }
    Ok(())
}

/// Validate an on-hand stock count
pub fn validate_stock(stock: i64) -> Result<(), &'static str> {
    if stock < 0 {
        return Err("Stock count cannot be negative");
    }
    Ok(())
}

/// Check name uniqueness against existing inventory, case-insensitively
pub fn is_duplicate_item_name(name: &str, inventory: &[InventoryItem]) -> bool {
    let lower = name.trim().to_lowercase();
    inventory.iter().any(|i| i.name.to_lowercase() == lower)
}

// ============================================================================
// Waste / Production Validations
// ============================================================================

/// Validate a wasted or cooked quantity
pub fn validate_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate an employee name
pub fn validate_employee_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Employee name is required");
    }
    Ok(())
}

// ============================================================================
// OCR Validations
// ============================================================================

/// Validate a match confidence score
pub fn validate_confidence(confidence: f64) -> Result<(), &'static str> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err("Confidence must be between 0 and 1");
    }
    Ok(())
}

/// Quantity range accepted from OCR-extracted lines
pub fn validate_ocr_quantity(quantity: i64) -> Result<(), &'static str> {
    if !(1..=500).contains(&quantity) {
        return Err("Quantity must be between 1 and 500");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Hot Dog").is_ok());
        assert!(validate_item_name("  ").is_err());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_par_level() {
        assert!(validate_par_level(0).is_ok());
        assert!(validate_par_level(60).is_ok());
        assert!(validate_par_level(-1).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(38).is_ok());
        assert!(validate_stock(-5).is_err());
    }

    #[test]
    fn test_duplicate_item_name_is_case_insensitive() {
        let inventory = vec![InventoryItem::new("Hot Dog", Category::Roller, 50)];

        assert!(is_duplicate_item_name("hot dog", &inventory));
        assert!(is_duplicate_item_name(" HOT DOG ", &inventory));
        assert!(!is_duplicate_item_name("Corn Dog", &inventory));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_employee_name() {
        assert!(validate_employee_name("Sarah Williams").is_ok());
        assert!(validate_employee_name("   ").is_err());
    }

    #[test]
    fn test_validate_confidence() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(0.8).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(validate_confidence(-0.1).is_err());
        assert!(validate_confidence(1.1).is_err());
    }

    #[test]
    fn test_validate_ocr_quantity() {
        assert!(validate_ocr_quantity(1).is_ok());
        assert!(validate_ocr_quantity(500).is_ok());
        assert!(validate_ocr_quantity(0).is_err());
        assert!(validate_ocr_quantity(501).is_err());
    }
}
