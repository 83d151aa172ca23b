//! HTTP handlers

mod analytics;
mod employee;
mod health;
mod inventory;
mod ocr;
mod reporting;
mod waste;

pub use analytics::*;
pub use employee::*;
pub use health::*;
pub use inventory::*;
pub use ocr::*;
pub use reporting::*;
pub use waste::*;
