//! Category use-case service.

use crate::model::category::{Category, CategoryId, NewCategory};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::{Entity, RepoError, RepoResult};
use log::debug;

/// Category store entry points.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a category; fails with a validation error when `name` is absent or blank.
    pub fn create(&self, input: NewCategory) -> RepoResult<Category> {
        let category = input.into_record()?;
        self.repo.insert_category(&category)?;
        debug!(
            "event=category_create module=service status=ok category_id={}",
            category.id
        );
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> RepoResult<Category> {
        self.repo
            .get_category(id)?
            .ok_or(RepoError::not_found(Entity::Category, id))
    }

    pub fn list(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    /// Deletes unconditionally; species referencing the category are left dangling.
    pub fn delete(&self, id: CategoryId) -> RepoResult<Category> {
        let deleted = self.repo.delete_category(id)?;
        debug!("event=category_delete module=service status=ok category_id={id}");
        Ok(deleted)
    }
}
