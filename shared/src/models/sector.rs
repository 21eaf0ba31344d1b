//! Organizational sectors receiving outbound stock

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A destination sector (e.g. a hospital ward)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub display_name: String,
}

impl Sector {
    pub fn new(id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Create/update payload for a sector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct SectorInput {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100, message = "Sector name is required"))]
    pub name: String,
}
