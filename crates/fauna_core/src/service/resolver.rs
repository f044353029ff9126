//! Relational resolver: expands Animal -> Species -> Category references.
//!
//! # Invariants
//! - Depth is fixed at two lookups; no recursion, no cycle detection.
//! - A missing species or category resolves to `None`, never an error.
//! - Read-only: resolving never writes, so repeated calls agree.

use crate::model::animal::Animal;
use crate::model::resolved::{ResolvedAnimal, ResolvedSpecies};
use crate::model::species::SpeciesId;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::species_repo::SpeciesRepository;
use crate::repo::RepoResult;
use log::debug;
use std::collections::HashMap;

/// Inlines referenced records into read projections.
pub struct RelationalResolver<S: SpeciesRepository, C: CategoryRepository> {
    species: S,
    categories: C,
}

impl<S: SpeciesRepository, C: CategoryRepository> RelationalResolver<S, C> {
    pub fn new(species: S, categories: C) -> Self {
        Self {
            species,
            categories,
        }
    }

    /// Resolves one animal's species and that species' category.
    ///
    /// # Errors
    /// - Only storage failures; dangling references are not errors.
    pub fn resolve(&self, animal: Animal) -> RepoResult<ResolvedAnimal> {
        let species = self.resolve_species(animal.species_id)?;
        Ok(ResolvedAnimal::new(animal, species))
    }

    /// Resolves a batch, looking each distinct species up once per call.
    pub fn resolve_all(&self, animals: Vec<Animal>) -> RepoResult<Vec<ResolvedAnimal>> {
        let mut seen: HashMap<SpeciesId, Option<ResolvedSpecies>> = HashMap::new();
        let mut resolved = Vec::with_capacity(animals.len());

        for animal in animals {
            let species = match seen.get(&animal.species_id) {
                Some(hit) => hit.clone(),
                None => {
                    let looked_up = self.resolve_species(animal.species_id)?;
                    seen.insert(animal.species_id, looked_up.clone());
                    looked_up
                }
            };
            resolved.push(ResolvedAnimal::new(animal, species));
        }

        Ok(resolved)
    }

    /// Looks up a species and inlines its category.
    pub fn resolve_species(&self, id: SpeciesId) -> RepoResult<Option<ResolvedSpecies>> {
        let Some(species) = self.species.get_species(id)? else {
            debug!("event=resolve_species module=service status=dangling species_id={id}");
            return Ok(None);
        };

        let category = self.categories.get_category(species.category_id)?;
        if category.is_none() {
            debug!(
                "event=resolve_category module=service status=dangling category_id={}",
                species.category_id
            );
        }

        Ok(Some(ResolvedSpecies::new(species, category)))
    }
}
