//! OCR text processor
//!
//! Turns raw recognized text from a photographed waste/production sheet
//! into a structured result: form type, employee, shift, and a list of
//! (item, quantity, confidence) tuples fuzzy-matched against the item
//! catalog. Lines that fail to parse or match are skipped silently;
//! aggregate quality is reported through [`validate_ocr_result`].
//!
//! The catalogs are passed in rather than read from globals so the
//! processor can run against the live inventory and roster.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Employee, InventoryItem};
use crate::types::Shift;

/// Kind of sheet the text was recognized from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Production,
    Waste,
    Unknown,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Production => "production",
            FormType::Waste => "waste",
            FormType::Unknown => "unknown",
        }
    }
}

/// One item line extracted from the sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub name: String,
    pub quantity: i64,
    /// How closely the line matched the catalog name, 0-1
    pub confidence: f64,
}

/// Structured result of processing one sheet's recognized text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    pub form_type: FormType,
    pub employee_name: Option<String>,
    pub shift: Option<Shift>,
    pub date: DateTime<Utc>,
    pub items: Vec<ExtractedItem>,
    pub raw_text: String,
}

/// Aggregate quality report for an [`OcrResult`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrValidation {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// A known item name with its category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub category: Category,
}

/// Ordered list of known item names to match extracted lines against.
///
/// Iteration order matters: equal fuzzy scores resolve to the earliest
/// entry.
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    entries: Vec<CatalogEntry>,
}

impl ItemCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The store's standard product list
    pub fn builtin() -> Self {
        fn entry(name: &str, category: Category) -> CatalogEntry {
            CatalogEntry {
                name: name.to_string(),
                category,
            }
        }
        let mut entries = Vec::new();
        for name in [
            "Bacon",
            "Stuffed Waffles",
            "Little Pigs in a Blanket",
            "Big Pigs in a Blanket",
            "Kolache",
            "Boudin",
        ] {
            entries.push(entry(name, Category::Breakfast));
        }
        for name in [
            "Egg Rolls",
            "Tornados",
            "Chicken Stick",
            "Corn Dog",
            "Hot Dog",
            "Sausage",
            "Crispitos",
        ] {
            entries.push(entry(name, Category::Roller));
        }
        for name in [
            "Hamburger",
            "Pulled Pork",
            "Brisket",
            "Country Fried Steak",
            "Pork Chop",
            "Steak",
        ] {
            entries.push(entry(name, Category::Deli));
        }
        for name in [
            "Cinnamon Rolls",
            "Large Cookies",
            "Small Cookies",
            "Muffins",
            "Brownies",
            "Danishes",
            "Donuts",
        ] {
            entries.push(entry(name, Category::Bakery));
        }
        for name in [
            "Pizza",
            "Pizza Whole",
            "Pizza Hunk",
            "Wings",
            "Chicken Wings",
            "Bites",
        ] {
            entries.push(entry(name, Category::Branded));
        }
        Self { entries }
    }

    /// Catalog backed by the live inventory
    pub fn from_inventory(items: &[InventoryItem]) -> Self {
        Self {
            entries: items
                .iter()
                .map(|i| CatalogEntry {
                    name: i.name.clone(),
                    category: i.category,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.category)
    }
}

/// Ordered list of employee full names for the employee matcher
#[derive(Debug, Clone)]
pub struct EmployeeRoster {
    names: Vec<String>,
}

impl EmployeeRoster {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// The store's standing roster
    pub fn builtin() -> Self {
        Self {
            names: [
                "Shaun Dubuisson",
                "Sarah Williams",
                "David Chen",
                "Emily Rodriguez",
                "James Thompson",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }

    /// Roster of currently active employees
    pub fn from_employees(employees: &[Employee]) -> Self {
        Self {
            names: employees
                .iter()
                .filter(|e| e.active)
                .map(|e| e.name.clone())
                .collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Detect which kind of sheet the text came from.
///
/// Production keywords are checked first, so a sheet mentioning both reads
/// as production.
pub fn detect_form_type(text: &str) -> FormType {
    let lower = text.to_lowercase();

    if lower.contains("production")
        || lower.contains("cooked")
        || lower.contains("prepared")
        || lower.contains("qty 1")
        || lower.contains("qty 2")
    {
        return FormType::Production;
    }

    if lower.contains("waste")
        || lower.contains("discard")
        || lower.contains("throw")
        || lower.contains("time discarded")
    {
        return FormType::Waste;
    }

    FormType::Unknown
}

/// Find the roster employee the text refers to.
///
/// Each roster entry is tried in order against the full name, then the bare
/// first name, then the bare last name; the first entry matching any tier
/// wins.
pub fn extract_employee(text: &str, roster: &EmployeeRoster) -> Option<String> {
    for name in roster.names() {
        if text.contains(name.as_str()) {
            return Some(name.clone());
        }

        let mut parts = name.split_whitespace();
        let first_name = parts.next();
        let last_name = parts.next();

        if let Some(first) = first_name {
            if text.contains(first) {
                return Some(name.clone());
            }
        }
        if let Some(last) = last_name {
            if text.contains(last) {
                return Some(name.clone());
            }
        }
    }

    None
}

/// Pick the shift out of keywords or shift-start times.
pub fn extract_shift(text: &str) -> Option<Shift> {
    let lower = text.to_lowercase();

    if lower.contains("morning") || lower.contains("6am") || lower.contains("6:00") {
        return Some(Shift::Morning);
    }
    if lower.contains("afternoon") || lower.contains("2pm") || lower.contains("14:") {
        return Some(Shift::Afternoon);
    }
    if lower.contains("night") || lower.contains("10pm") || lower.contains("22:") {
        return Some(Shift::Night);
    }

    None
}

/// Repair common OCR character confusions and collapse whitespace.
fn clean_ocr_text(text: &str) -> String {
    let repaired: String = text
        .chars()
        .map(|c| match c {
            '|' | '\\' => 'I',
            '1' | '!' => 'i',
            '0' => 'O',
            '5' => 'S',
            other => other,
        })
        .collect();

    repaired.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Similarity score between an extracted fragment and a catalog name.
///
/// Exact match scores 1.0, substring containment either way 0.8, otherwise
/// the fraction of words with an exact or substring counterpart, over the
/// larger word count.
fn string_similarity(str1: &str, str2: &str) -> f64 {
    let s1 = str1.to_lowercase();
    let s2 = str2.to_lowercase();

    if s1 == s2 {
        return 1.0;
    }
    if s1.contains(&s2) || s2.contains(&s1) {
        return 0.8;
    }

    let words1: Vec<&str> = s1.split(' ').collect();
    let words2: Vec<&str> = s2.split(' ').collect();

    let match_count = words1
        .iter()
        .filter(|w1| {
            words2
                .iter()
                .any(|w2| *w1 == w2 || w1.contains(w2) || w2.contains(*w1))
        })
        .count();

    let max_words = words1.len().max(words2.len());
    match_count as f64 / max_words as f64
}

/// Best catalog match for a line fragment, if any clears the 0.5 floor.
/// Ties resolve to the earliest catalog entry.
fn find_best_item_match(ocr_text: &str, catalog: &ItemCatalog) -> Option<(String, f64)> {
    let cleaned = clean_ocr_text(ocr_text);

    let mut best_match: Option<(&str, f64)> = None;
    for entry in catalog.entries() {
        let score = string_similarity(&cleaned, &entry.name);
        if score > 0.5 && best_match.map_or(true, |(_, best)| score > best) {
            best_match = Some((&entry.name, score));
        }
    }

    best_match.map(|(name, score)| (name.to_string(), score))
}

static HEADER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(item|name|qty|quantity|shift|total|waste|production)")
        .expect("valid header pattern")
});

// "Item name....25" / "Item name 25" / "Item name: 25" or "Item name - 25"
static DOTTED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z\s'&]+?)[\s.]{2,}(\d{1,3})$").expect("valid dotted pattern")
});
static SPACED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z\s'&]+?)\s+(\d{1,3})$").expect("valid spaced pattern")
});
static DELIMITED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z\s'&]+?)[\s:\-]+(\d{1,3})$").expect("valid delimited pattern")
});

/// Extract (item, quantity, confidence) tuples from the sheet body.
pub fn extract_item_quantities(text: &str, catalog: &ItemCatalog) -> Vec<ExtractedItem> {
    let mut results: Vec<ExtractedItem> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        // Skip empty lines and obvious headers
        if trimmed.is_empty() || trimmed.len() < 3 || HEADER_LINE.is_match(trimmed) {
            continue;
        }

        let captures = DOTTED_LINE
            .captures(trimmed)
            .or_else(|| SPACED_LINE.captures(trimmed))
            .or_else(|| DELIMITED_LINE.captures(trimmed));

        let Some(caps) = captures else {
            continue;
        };

        let item_text = caps[1].trim().to_string();
        let Ok(quantity) = caps[2].parse::<i64>() else {
            continue;
        };
        if !(1..=500).contains(&quantity) {
            continue;
        }

        let Some((name, confidence)) = find_best_item_match(&item_text, catalog) else {
            continue;
        };

        // Later duplicate lines for the same resolved item are dropped
        if results.iter().any(|r| r.name == name) {
            continue;
        }

        results.push(ExtractedItem {
            name,
            quantity,
            confidence,
        });
    }

    results
}

/// Process a whole sheet's recognized text into a structured result.
pub fn process_ocr_text(text: &str, catalog: &ItemCatalog, roster: &EmployeeRoster) -> OcrResult {
    OcrResult {
        form_type: detect_form_type(text),
        employee_name: extract_employee(text, roster),
        shift: extract_shift(text),
        date: Utc::now(),
        items: extract_item_quantities(text, catalog),
        raw_text: text.to_string(),
    }
}

/// Confidence below which an extracted item is flagged for review
pub const REVIEW_CONFIDENCE: f64 = 0.7;

/// Check an OCR result for blocking errors and review-worthy warnings.
///
/// Callers should refuse to persist a result while `is_valid` is false and
/// prompt for human review while `warnings` is non-empty.
pub fn validate_ocr_result(result: &OcrResult) -> OcrValidation {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    if result.employee_name.is_none() {
        errors.push("Could not detect employee name".to_string());
    }

    if result.shift.is_none() {
        warnings.push("Could not detect shift - you'll need to select it".to_string());
    }

    if result.form_type == FormType::Unknown {
        warnings.push("Could not determine form type - assuming waste sheet".to_string());
    }

    if result.items.is_empty() {
        errors.push("No items found in the image".to_string());
    }

    let low_confidence = result
        .items
        .iter()
        .filter(|item| item.confidence < REVIEW_CONFIDENCE)
        .count();
    if low_confidence > 0 {
        warnings.push(format!("{} item(s) may need verification", low_confidence));
    }

    OcrValidation {
        is_valid: errors.is_empty(),
        warnings,
        errors,
    }
}
