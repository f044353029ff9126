//! Read projections with references replaced by inlined records.
//!
//! A dangling reference resolves to `None` and is omitted from serialized
//! output rather than reported as an error.

use super::animal::{Animal, AnimalId};
use super::category::Category;
use super::species::{Species, SpeciesId};
use crate::spatial::{GeoPoint, GeoPolygon};
use serde::Serialize;

/// Species with its category inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSpecies {
    pub id: SpeciesId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeoPolygon>,
}

impl ResolvedSpecies {
    pub fn new(species: Species, category: Option<Category>) -> Self {
        Self {
            id: species.id,
            name: species.name,
            category,
            geometry: species.geometry,
        }
    }
}

/// Animal with its species (and that species' category) inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAnimal {
    pub id: AnimalId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<ResolvedSpecies>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ResolvedAnimal {
    pub fn new(animal: Animal, species: Option<ResolvedSpecies>) -> Self {
        Self {
            id: animal.id,
            species,
            location: animal.location,
            name: animal.name,
            notes: animal.notes,
        }
    }
}

/// Animal read result, resolved or raw depending on the caller's choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnimalView {
    Plain(Animal),
    Resolved(ResolvedAnimal),
}

impl AnimalView {
    pub fn id(&self) -> AnimalId {
        match self {
            Self::Plain(animal) => animal.id,
            Self::Resolved(animal) => animal.id,
        }
    }

    pub fn as_resolved(&self) -> Option<&ResolvedAnimal> {
        match self {
            Self::Resolved(animal) => Some(animal),
            Self::Plain(_) => None,
        }
    }
}
