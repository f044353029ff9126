//! Category records: the flat top level of the taxonomy (e.g. "Mammal").

use super::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = Uuid;

/// Taxonomic category referenced by species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Create input for a category as received from the request layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: Option<String>,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Validates the input and assigns a fresh id.
    pub fn into_record(self) -> Result<Category, ValidationError> {
        Ok(Category {
            id: Uuid::new_v4(),
            name: require_text("name", self.name)?,
        })
    }
}
