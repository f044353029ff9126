//! Animal records: individual tracked animals with an optional position.

use super::species::SpeciesId;
use super::ValidationError;
use crate::spatial::GeoPoint;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AnimalId = Uuid;

/// Canonical animal record with its species reference left unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    /// Weak reference; may dangle after the species is deleted.
    pub species_id: SpeciesId,
    /// Last known position. Animals without one never match box queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create input for an animal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub species_id: Option<SpeciesId>,
    pub location: Option<GeoPoint>,
    pub name: Option<String>,
    pub notes: Option<String>,
}

impl NewAnimal {
    pub fn new(species_id: SpeciesId) -> Self {
        Self {
            species_id: Some(species_id),
            ..Self::default()
        }
    }

    pub fn at(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validates required fields and assigns a fresh id.
    ///
    /// # Errors
    /// - `MissingField("speciesId")` when the species reference is absent.
    pub fn into_record(self) -> Result<Animal, ValidationError> {
        let species_id = self
            .species_id
            .ok_or(ValidationError::MissingField("speciesId"))?;

        Ok(Animal {
            id: Uuid::new_v4(),
            species_id,
            location: self.location,
            name: self.name,
            notes: self.notes,
        })
    }
}

/// Sparse update for an animal; `None` keeps the stored value.
///
/// Patches only set fields: `location`, `name` and `notes` cannot be cleared
/// back to absent once stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPatch {
    pub species_id: Option<SpeciesId>,
    pub location: Option<GeoPoint>,
    pub name: Option<String>,
    pub notes: Option<String>,
}

impl AnimalPatch {
    pub fn is_empty(&self) -> bool {
        self.species_id.is_none()
            && self.location.is_none()
            && self.name.is_none()
            && self.notes.is_none()
    }
}
