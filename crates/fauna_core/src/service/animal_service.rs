//! Animal use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for animals.
//! - Resolve species/category references for reads on request.
//! - Parse box query corners at the boundary and run the rectangle query.
//!
//! # Invariants
//! - `species_id` is never checked against stored species.
//! - `get`/`list` resolve when asked; `find_within_box` always resolves;
//!   `find_by_species` always returns raw records.

use crate::model::animal::{Animal, AnimalId, AnimalPatch, NewAnimal};
use crate::model::resolved::{AnimalView, ResolvedAnimal};
use crate::model::species::SpeciesId;
use crate::repo::animal_repo::AnimalRepository;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::species_repo::SpeciesRepository;
use crate::repo::{Entity, RepoError, RepoResult};
use crate::service::resolver::RelationalResolver;
use crate::spatial::{BoundingBox, GeoPoint};
use log::{debug, info};

/// Animal store entry points.
pub struct AnimalService<A, S, C>
where
    A: AnimalRepository,
    S: SpeciesRepository,
    C: CategoryRepository,
{
    repo: A,
    resolver: RelationalResolver<S, C>,
}

impl<A, S, C> AnimalService<A, S, C>
where
    A: AnimalRepository,
    S: SpeciesRepository,
    C: CategoryRepository,
{
    pub fn new(repo: A, resolver: RelationalResolver<S, C>) -> Self {
        Self { repo, resolver }
    }

    /// Creates an animal.
    ///
    /// # Errors
    /// - `RepoError::Validation` when `speciesId` is missing.
    pub fn create(&self, input: NewAnimal) -> RepoResult<Animal> {
        let animal = input.into_record()?;
        self.repo.insert_animal(&animal)?;
        debug!(
            "event=animal_create module=service status=ok animal_id={} has_location={}",
            animal.id,
            animal.location.is_some()
        );
        Ok(animal)
    }

    /// Gets one animal, optionally with species and category inlined.
    pub fn get(&self, id: AnimalId, resolve: bool) -> RepoResult<AnimalView> {
        let animal = self
            .repo
            .get_animal(id)?
            .ok_or(RepoError::not_found(Entity::Animal, id))?;

        if resolve {
            Ok(AnimalView::Resolved(self.resolver.resolve(animal)?))
        } else {
            Ok(AnimalView::Plain(animal))
        }
    }

    /// Lists all animals with the same resolution contract as [`Self::get`].
    pub fn list(&self, resolve: bool) -> RepoResult<Vec<AnimalView>> {
        let animals = self.repo.list_animals()?;
        if !resolve {
            return Ok(animals.into_iter().map(AnimalView::Plain).collect());
        }

        Ok(self
            .resolver
            .resolve_all(animals)?
            .into_iter()
            .map(AnimalView::Resolved)
            .collect())
    }

    /// Merges the supplied fields into the stored record.
    pub fn update(&self, id: AnimalId, patch: AnimalPatch) -> RepoResult<Animal> {
        if patch.is_empty() {
            return self
                .repo
                .get_animal(id)?
                .ok_or(RepoError::not_found(Entity::Animal, id));
        }
        let updated = self.repo.update_animal(id, &patch)?;
        debug!("event=animal_update module=service status=ok animal_id={id}");
        Ok(updated)
    }

    pub fn delete(&self, id: AnimalId) -> RepoResult<Animal> {
        let deleted = self.repo.delete_animal(id)?;
        debug!("event=animal_delete module=service status=ok animal_id={id}");
        Ok(deleted)
    }

    /// Returns resolved animals inside the rectangle spanned by two
    /// `"longitude,latitude"` corners.
    ///
    /// # Errors
    /// - `RepoError::Validation` when either corner is malformed or out of range.
    pub fn find_within_box(
        &self,
        top_right: &str,
        bottom_left: &str,
    ) -> RepoResult<Vec<ResolvedAnimal>> {
        let top_right = top_right.parse::<GeoPoint>()?;
        let bottom_left = bottom_left.parse::<GeoPoint>()?;
        self.find_within_bbox(&BoundingBox::from_corners(top_right, bottom_left))
    }

    /// Typed variant of [`Self::find_within_box`].
    pub fn find_within_bbox(&self, bbox: &BoundingBox) -> RepoResult<Vec<ResolvedAnimal>> {
        let animals = self.repo.find_animals_within_box(bbox)?;
        let resolved = self.resolver.resolve_all(animals)?;
        info!(
            "event=animal_find_within_box module=service status=ok min_lon={} min_lat={} max_lon={} max_lat={} results={}",
            bbox.min_lon,
            bbox.min_lat,
            bbox.max_lon,
            bbox.max_lat,
            resolved.len()
        );
        Ok(resolved)
    }

    /// Returns raw animals referencing `species_id`.
    pub fn find_by_species(&self, species_id: SpeciesId) -> RepoResult<Vec<Animal>> {
        self.repo.find_animals_by_species(species_id)
    }
}
