//! Species repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `species` table with sparse-patch updates.
//! - Answer polygon area queries.
//!
//! # Invariants
//! - `geometry` JSON and the `min_/max_` bounding-box columns are written
//!   together; both are NULL when a species has no range.
//! - Geometry JSON round-trips coordinates bit for bit (`serde_json` is built
//!   with `float_roundtrip`), so the decoded ring agrees with the stored
//!   bounding box.
//! - Area queries prefilter on the indexed bounding box, then apply the exact
//!   polygon intersection test from `spatial`.
//! - An unreadable stored geometry is treated as absent and logged.

use super::{ensure_connection_ready, parse_uuid, Entity, RepoError, RepoResult};
use crate::model::species::{Species, SpeciesId, SpeciesPatch};
use crate::spatial::{BoundingBox, GeoPolygon};
use log::warn;
use rusqlite::{params, Connection, Row};

const SPECIES_COLUMNS: &str = "id, name, category_id, geometry";

/// Repository interface for species records.
pub trait SpeciesRepository {
    fn insert_species(&self, species: &Species) -> RepoResult<()>;
    fn get_species(&self, id: SpeciesId) -> RepoResult<Option<Species>>;
    fn list_species(&self) -> RepoResult<Vec<Species>>;
    /// Applies `patch` field by field and returns the updated record.
    fn update_species(&self, id: SpeciesId, patch: &SpeciesPatch) -> RepoResult<Species>;
    /// Removes the species and returns the removed record.
    fn delete_species(&self, id: SpeciesId) -> RepoResult<Species>;
    /// Returns every species whose range intersects `area`.
    fn find_species_by_area(&self, area: &GeoPolygon) -> RepoResult<Vec<Species>>;
}

/// SQLite-backed species repository.
pub struct SqliteSpeciesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSpeciesRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "species",
            &[
                "id",
                "name",
                "category_id",
                "geometry",
                "min_lon",
                "min_lat",
                "max_lon",
                "max_lat",
            ],
        )?;
        Ok(Self { conn })
    }

    fn query_species(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Species>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut species = Vec::new();
        while let Some(row) = rows.next()? {
            species.push(parse_species_row(row)?);
        }
        Ok(species)
    }
}

impl SpeciesRepository for SqliteSpeciesRepository<'_> {
    fn insert_species(&self, species: &Species) -> RepoResult<()> {
        let geometry = encode_geometry(species.geometry.as_ref())?;
        let bbox = species.geometry.as_ref().map(GeoPolygon::bounding_box);

        self.conn.execute(
            "INSERT INTO species (
                id,
                name,
                category_id,
                geometry,
                min_lon,
                min_lat,
                max_lon,
                max_lat
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                species.id.to_string(),
                species.name.as_str(),
                species.category_id.to_string(),
                geometry,
                bbox.map(|b| b.min_lon),
                bbox.map(|b| b.min_lat),
                bbox.map(|b| b.max_lon),
                bbox.map(|b| b.max_lat),
            ],
        )?;
        Ok(())
    }

    fn get_species(&self, id: SpeciesId) -> RepoResult<Option<Species>> {
        let found = self.query_species(
            &format!("SELECT {SPECIES_COLUMNS} FROM species WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(found.into_iter().next())
    }

    fn list_species(&self) -> RepoResult<Vec<Species>> {
        self.query_species(
            &format!("SELECT {SPECIES_COLUMNS} FROM species ORDER BY rowid ASC;"),
            [],
        )
    }

    fn update_species(&self, id: SpeciesId, patch: &SpeciesPatch) -> RepoResult<Species> {
        let geometry = encode_geometry(patch.geometry.as_ref())?;
        let bbox = patch.geometry.as_ref().map(GeoPolygon::bounding_box);

        let updated = self.query_species(
            &format!(
                "UPDATE species
                 SET
                    name = COALESCE(?2, name),
                    category_id = COALESCE(?3, category_id),
                    geometry = COALESCE(?4, geometry),
                    min_lon = COALESCE(?5, min_lon),
                    min_lat = COALESCE(?6, min_lat),
                    max_lon = COALESCE(?7, max_lon),
                    max_lat = COALESCE(?8, max_lat),
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?1
                 RETURNING {SPECIES_COLUMNS};"
            ),
            params![
                id.to_string(),
                patch.name.as_deref(),
                patch.category_id.map(|category_id| category_id.to_string()),
                geometry,
                bbox.map(|b| b.min_lon),
                bbox.map(|b| b.min_lat),
                bbox.map(|b| b.max_lon),
                bbox.map(|b| b.max_lat),
            ],
        )?;

        updated
            .into_iter()
            .next()
            .ok_or(RepoError::not_found(Entity::Species, id))
    }

    fn delete_species(&self, id: SpeciesId) -> RepoResult<Species> {
        let deleted = self.query_species(
            &format!("DELETE FROM species WHERE id = ?1 RETURNING {SPECIES_COLUMNS};"),
            [id.to_string()],
        )?;

        deleted
            .into_iter()
            .next()
            .ok_or(RepoError::not_found(Entity::Species, id))
    }

    fn find_species_by_area(&self, area: &GeoPolygon) -> RepoResult<Vec<Species>> {
        let BoundingBox {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        } = area.bounding_box();

        let candidates = self.query_species(
            &format!(
                "SELECT {SPECIES_COLUMNS}
                 FROM species
                 WHERE geometry IS NOT NULL
                   AND min_lon <= ?1
                   AND max_lon >= ?2
                   AND min_lat <= ?3
                   AND max_lat >= ?4
                 ORDER BY rowid ASC;"
            ),
            params![max_lon, min_lon, max_lat, min_lat],
        )?;

        Ok(candidates
            .into_iter()
            .filter(|species| {
                species
                    .geometry
                    .as_ref()
                    .is_some_and(|geometry| geometry.intersects(area))
            })
            .collect())
    }
}

fn encode_geometry(geometry: Option<&GeoPolygon>) -> RepoResult<Option<String>> {
    geometry
        .map(|polygon| {
            serde_json::to_string(polygon)
                .map_err(|err| RepoError::InvalidData(format!("unencodable geometry: {err}")))
        })
        .transpose()
}

fn parse_species_row(row: &Row<'_>) -> RepoResult<Species> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, "species.id")?;
    let category_text: String = row.get("category_id")?;

    let geometry = match row.get::<_, Option<String>>("geometry")? {
        Some(text) => match serde_json::from_str::<GeoPolygon>(&text) {
            Ok(polygon) => Some(polygon),
            Err(err) => {
                warn!(
                    "event=species_geometry_skipped module=repo status=error species_id={id} error={err}"
                );
                None
            }
        },
        None => None,
    };

    Ok(Species {
        id,
        name: row.get("name")?,
        category_id: parse_uuid(&category_text, "species.category_id")?,
        geometry,
    })
}
