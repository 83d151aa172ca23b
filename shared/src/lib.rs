//! Shared types and domain logic for Keith's Superstore
//!
//! This crate contains the record types, the sales-analytics engine, and the
//! OCR text processor shared between the backend and its tests. Everything
//! here is plain call-and-return logic over in-memory data; persistence and
//! HTTP live in the backend crate.

pub mod analytics;
pub mod models;
pub mod ocr;
pub mod types;
pub mod validation;

pub use analytics::*;
pub use models::*;
pub use ocr::*;
pub use types::*;
pub use validation::*;
