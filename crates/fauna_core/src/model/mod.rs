//! Domain model for the animal/species/category taxonomy.
//!
//! # Responsibility
//! - Define the persisted record shapes and their create/patch inputs.
//! - Validate required fields before anything reaches storage.
//! - Define the resolved read projections produced by the resolver.
//!
//! # Invariants
//! - Every record is identified by a generated UUID v4.
//! - References between records are weak: ids only, never ownership.
//! - Required text fields are never blank once validated.

use crate::spatial::GeoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod animal;
pub mod category;
pub mod resolved;
pub mod species;

/// Input validation failure raised before persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was not supplied.
    MissingField(&'static str),
    /// A text field was supplied but is empty after trimming.
    BlankField(&'static str),
    /// A geometry-bearing field failed to parse or validate.
    Geometry(GeoError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::Geometry(err) => write!(f, "invalid geometry: {err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::MissingField(_) | Self::BlankField(_) => None,
        }
    }
}

impl From<GeoError> for ValidationError {
    fn from(value: GeoError) -> Self {
        Self::Geometry(value)
    }
}

/// Returns a required text field, rejecting absent or blank values.
pub(crate) fn require_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    non_blank(field, value)
}

pub(crate) fn non_blank(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(value)
}
