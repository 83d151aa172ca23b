//! Business logic services

pub mod analytics;
pub mod employee;
pub mod inventory;
pub mod ocr_intake;
pub mod reporting;
pub mod waste;
