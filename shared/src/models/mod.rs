//! Domain models for Keith's Superstore

mod employee;
mod inventory;
mod waste;

pub use employee::*;
pub use inventory::*;
pub use waste::*;
