//! Species records.
//!
//! # Invariants
//! - `category_id` is required but not checked against stored categories.
//! - `geometry`, when present, is a validated polygon describing known range.

use super::category::CategoryId;
use super::{non_blank, require_text, ValidationError};
use crate::spatial::GeoPolygon;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SpeciesId = Uuid;

/// Canonical species record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    /// Weak reference; may dangle after the category is deleted.
    pub category_id: CategoryId,
    /// Known range. Species without a range never match area queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeoPolygon>,
}

/// Create input for a species.
///
/// Required fields are optional here so that absent input surfaces as a
/// `ValidationError` instead of a parse failure in the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpecies {
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
    pub geometry: Option<GeoPolygon>,
}

impl NewSpecies {
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            name: Some(name.into()),
            category_id: Some(category_id),
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, geometry: GeoPolygon) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Validates required fields and assigns a fresh id.
    ///
    /// # Errors
    /// - `MissingField("name")` / `MissingField("categoryId")` when absent.
    /// - `BlankField("name")` for whitespace-only names.
    pub fn into_record(self) -> Result<Species, ValidationError> {
        let name = require_text("name", self.name)?;
        let category_id = self
            .category_id
            .ok_or(ValidationError::MissingField("categoryId"))?;

        Ok(Species {
            id: Uuid::new_v4(),
            name,
            category_id,
            geometry: self.geometry,
        })
    }
}

/// Sparse update for a species; `None` keeps the stored value.
///
/// Patches only set fields. A stored `geometry` cannot be cleared back to
/// absent through a patch; delete and recreate the species instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesPatch {
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
    pub geometry: Option<GeoPolygon>,
}

impl SpeciesPatch {
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.map(|name| non_blank("name", name)).transpose()?;
        Ok(Self { name, ..self })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category_id.is_none() && self.geometry.is_none()
    }
}
