//! Species use-case service.
//!
//! # Invariants
//! - `category_id` is never checked against stored categories.
//! - Species list/get/area results are plain records, never resolved.

use crate::model::species::{NewSpecies, Species, SpeciesId, SpeciesPatch};
use crate::repo::species_repo::SpeciesRepository;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::spatial::GeoPolygon;
use log::{debug, info};

/// Species store entry points.
pub struct SpeciesService<R: SpeciesRepository> {
    repo: R,
}

impl<R: SpeciesRepository> SpeciesService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a species.
    ///
    /// # Errors
    /// - `RepoError::Validation` when `name` or `categoryId` is missing.
    pub fn create(&self, input: NewSpecies) -> RepoResult<Species> {
        let species = input.into_record()?;
        self.repo.insert_species(&species)?;
        debug!(
            "event=species_create module=service status=ok species_id={} has_geometry={}",
            species.id,
            species.geometry.is_some()
        );
        Ok(species)
    }

    pub fn get(&self, id: SpeciesId) -> RepoResult<Species> {
        self.repo
            .get_species(id)?
            .ok_or(RepoError::not_found(Entity::Species, id))
    }

    pub fn list(&self) -> RepoResult<Vec<Species>> {
        self.repo.list_species()
    }

    /// Merges the supplied fields into the stored record.
    ///
    /// An empty patch still checks existence and returns the current record.
    pub fn update(&self, id: SpeciesId, patch: SpeciesPatch) -> RepoResult<Species> {
        let patch = patch.validate()?;
        if patch.is_empty() {
            return self.get(id);
        }
        let updated = self.repo.update_species(id, &patch)?;
        debug!("event=species_update module=service status=ok species_id={id}");
        Ok(updated)
    }

    /// Deletes the species and returns it; animals referencing it are left dangling.
    pub fn delete(&self, id: SpeciesId) -> RepoResult<Species> {
        let deleted = self.repo.delete_species(id)?;
        debug!("event=species_delete module=service status=ok species_id={id}");
        Ok(deleted)
    }

    /// Returns every species whose range intersects `area`.
    pub fn find_by_area(&self, area: &GeoPolygon) -> RepoResult<Vec<Species>> {
        let found = self.repo.find_species_by_area(area)?;
        info!(
            "event=species_find_by_area module=service status=ok vertices={} results={}",
            area.vertices().len(),
            found.len()
        );
        Ok(found)
    }

    /// Same as [`Self::find_by_area`], taking the polygon as raw `[lon, lat]` pairs.
    ///
    /// # Errors
    /// - `RepoError::Validation` for out-of-range vertices or a degenerate ring.
    pub fn find_by_area_ring(&self, ring: &[[f64; 2]]) -> RepoResult<Vec<Species>> {
        let area = GeoPolygon::from_pairs(ring)?;
        self.find_by_area(&area)
    }
}
