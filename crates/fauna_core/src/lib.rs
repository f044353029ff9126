//! Core domain logic for the fauna tracking store.
//!
//! Records animals, their species and taxonomic categories, and answers
//! spatial questions over them: animals inside a rectangle, species whose
//! known range intersects a polygon.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod spatial;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::animal::{Animal, AnimalId, AnimalPatch, NewAnimal};
pub use model::category::{Category, CategoryId, NewCategory};
pub use model::resolved::{AnimalView, ResolvedAnimal, ResolvedSpecies};
pub use model::species::{NewSpecies, Species, SpeciesId, SpeciesPatch};
pub use model::ValidationError;
pub use repo::animal_repo::{AnimalRepository, SqliteAnimalRepository};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::species_repo::{SpeciesRepository, SqliteSpeciesRepository};
pub use repo::{Entity, ErrorKind, RepoError, RepoResult};
pub use service::animal_service::AnimalService;
pub use service::category_service::CategoryService;
pub use service::resolver::RelationalResolver;
pub use service::species_service::SpeciesService;
pub use spatial::{BoundingBox, GeoError, GeoPoint, GeoPolygon};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
