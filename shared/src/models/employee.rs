//! Employee roster models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Role;

/// A store employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    /// Inactive employees stay on file but are excluded from rosters
    pub active: bool,
}

impl Employee {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            active: true,
        }
    }
}
