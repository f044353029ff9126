//! Animal repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `animals` table with sparse-patch updates.
//! - Answer rectangle and species-membership queries.
//!
//! # Invariants
//! - `lon`/`lat` are NULL together (enforced by a table CHECK).
//! - Stored positions outside geographic bounds read back as "no location"
//!   and are therefore excluded from spatial queries.

use super::{ensure_connection_ready, parse_uuid, Entity, RepoError, RepoResult};
use crate::model::animal::{Animal, AnimalId, AnimalPatch};
use crate::model::species::SpeciesId;
use crate::spatial::{BoundingBox, GeoPoint};
use log::warn;
use rusqlite::{params, Connection, Row};

const ANIMAL_COLUMNS: &str = "id, species_id, lon, lat, name, notes";

/// Repository interface for animal records.
pub trait AnimalRepository {
    fn insert_animal(&self, animal: &Animal) -> RepoResult<()>;
    fn get_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>>;
    fn list_animals(&self) -> RepoResult<Vec<Animal>>;
    /// Applies `patch` field by field and returns the updated record.
    fn update_animal(&self, id: AnimalId, patch: &AnimalPatch) -> RepoResult<Animal>;
    /// Removes the animal and returns the removed record.
    fn delete_animal(&self, id: AnimalId) -> RepoResult<Animal>;
    /// Returns every animal located inside the closed rectangle.
    fn find_animals_within_box(&self, bbox: &BoundingBox) -> RepoResult<Vec<Animal>>;
    /// Returns every animal whose species reference equals `species_id`.
    fn find_animals_by_species(&self, species_id: SpeciesId) -> RepoResult<Vec<Animal>>;
}

/// SQLite-backed animal repository.
pub struct SqliteAnimalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnimalRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "animals",
            &["id", "species_id", "lon", "lat", "name", "notes"],
        )?;
        Ok(Self { conn })
    }

    fn query_animals(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Animal>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut animals = Vec::new();
        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }
        Ok(animals)
    }
}

impl AnimalRepository for SqliteAnimalRepository<'_> {
    fn insert_animal(&self, animal: &Animal) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO animals (
                id,
                species_id,
                lon,
                lat,
                name,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                animal.id.to_string(),
                animal.species_id.to_string(),
                animal.location.map(|point| point.longitude()),
                animal.location.map(|point| point.latitude()),
                animal.name.as_deref(),
                animal.notes.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn get_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>> {
        let found = self.query_animals(
            &format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(found.into_iter().next())
    }

    fn list_animals(&self) -> RepoResult<Vec<Animal>> {
        self.query_animals(
            &format!("SELECT {ANIMAL_COLUMNS} FROM animals ORDER BY rowid ASC;"),
            [],
        )
    }

    fn update_animal(&self, id: AnimalId, patch: &AnimalPatch) -> RepoResult<Animal> {
        let updated = self.query_animals(
            &format!(
                "UPDATE animals
                 SET
                    species_id = COALESCE(?2, species_id),
                    lon = COALESCE(?3, lon),
                    lat = COALESCE(?4, lat),
                    name = COALESCE(?5, name),
                    notes = COALESCE(?6, notes),
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1
                 RETURNING {ANIMAL_COLUMNS};"
            ),
            params![
                id.to_string(),
                patch.species_id.map(|species_id| species_id.to_string()),
                patch.location.map(|point| point.longitude()),
                patch.location.map(|point| point.latitude()),
                patch.name.as_deref(),
                patch.notes.as_deref(),
            ],
        )?;

        updated
            .into_iter()
            .next()
            .ok_or(RepoError::not_found(Entity::Animal, id))
    }

    fn delete_animal(&self, id: AnimalId) -> RepoResult<Animal> {
        let deleted = self.query_animals(
            &format!("DELETE FROM animals WHERE id = ?1 RETURNING {ANIMAL_COLUMNS};"),
            [id.to_string()],
        )?;

        deleted
            .into_iter()
            .next()
            .ok_or(RepoError::not_found(Entity::Animal, id))
    }

    fn find_animals_within_box(&self, bbox: &BoundingBox) -> RepoResult<Vec<Animal>> {
        let candidates = self.query_animals(
            &format!(
                "SELECT {ANIMAL_COLUMNS}
                 FROM animals
                 WHERE lon BETWEEN ?1 AND ?2
                   AND lat BETWEEN ?3 AND ?4
                 ORDER BY rowid ASC;"
            ),
            params![bbox.min_lon, bbox.max_lon, bbox.min_lat, bbox.max_lat],
        )?;

        Ok(candidates
            .into_iter()
            .filter(|animal| {
                animal
                    .location
                    .as_ref()
                    .is_some_and(|location| bbox.contains(location))
            })
            .collect())
    }

    fn find_animals_by_species(&self, species_id: SpeciesId) -> RepoResult<Vec<Animal>> {
        self.query_animals(
            &format!(
                "SELECT {ANIMAL_COLUMNS} FROM animals WHERE species_id = ?1 ORDER BY rowid ASC;"
            ),
            [species_id.to_string()],
        )
    }
}

fn parse_animal_row(row: &Row<'_>) -> RepoResult<Animal> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "animals.id")?;
    let species_text: String = row.get("species_id")?;

    let location = match (
        row.get::<_, Option<f64>>("lon")?,
        row.get::<_, Option<f64>>("lat")?,
    ) {
        (Some(lon), Some(lat)) => match GeoPoint::new(lon, lat) {
            Ok(point) => Some(point),
            Err(err) => {
                warn!(
                    "event=animal_location_skipped module=repo status=error animal_id={id} error={err}"
                );
                None
            }
        },
        _ => None,
    };

    Ok(Animal {
        id,
        species_id: parse_uuid(&species_text, "animals.species_id")?,
        location,
        name: row.get("name")?,
        notes: row.get("notes")?,
    })
}
