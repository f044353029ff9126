//! Category repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a category never checks or touches species referencing it.
//! - Listing order is insertion order.

use super::{ensure_connection_ready, parse_uuid, Entity, RepoError, RepoResult};
use crate::model::category::{Category, CategoryId};
use rusqlite::{params, Connection, Row};

/// Repository interface for category records.
pub trait CategoryRepository {
    fn insert_category(&self, category: &Category) -> RepoResult<()>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Removes the category and returns the removed record.
    fn delete_category(&self, id: CategoryId) -> RepoResult<Category>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "categories", &["id", "name"])?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn insert_category(&self, category: &Category) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO categories (id, name) VALUES (?1, ?2);",
            params![category.id.to_string(), category.name.as_str()],
        )?;
        Ok(())
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories WHERE id = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_category_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM categories ORDER BY rowid ASC;")?;
        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }
        Ok(categories)
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<Category> {
        let mut stmt = self
            .conn
            .prepare("DELETE FROM categories WHERE id = ?1 RETURNING id, name;")?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_category_row(row),
            None => Err(RepoError::not_found(Entity::Category, id)),
        }
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    Ok(Category {
        id: parse_uuid(&id_text, "categories.id")?,
        name: row.get("name")?,
    })
}
