use fauna_core::db::open_db_in_memory;
use fauna_core::{
    AnimalService, BoundingBox, CategoryService, GeoError, GeoPoint, GeoPolygon, NewAnimal,
    NewCategory, NewSpecies, RelationalResolver, RepoError, SpeciesService,
    SqliteAnimalRepository, SqliteCategoryRepository, SqliteSpeciesRepository, ValidationError,
};
use rusqlite::Connection;
use std::collections::HashSet;
use uuid::Uuid;

struct Fixture<'conn> {
    categories: CategoryService<SqliteCategoryRepository<'conn>>,
    species: SpeciesService<SqliteSpeciesRepository<'conn>>,
    animals: AnimalService<
        SqliteAnimalRepository<'conn>,
        SqliteSpeciesRepository<'conn>,
        SqliteCategoryRepository<'conn>,
    >,
}

fn fixture(conn: &Connection) -> Fixture<'_> {
    Fixture {
        categories: CategoryService::new(SqliteCategoryRepository::try_new(conn).unwrap()),
        species: SpeciesService::new(SqliteSpeciesRepository::try_new(conn).unwrap()),
        animals: AnimalService::new(
            SqliteAnimalRepository::try_new(conn).unwrap(),
            RelationalResolver::new(
                SqliteSpeciesRepository::try_new(conn).unwrap(),
                SqliteCategoryRepository::try_new(conn).unwrap(),
            ),
        ),
    }
}

fn point(lon: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lon, lat).unwrap()
}

fn polygon(pairs: &[[f64; 2]]) -> GeoPolygon {
    GeoPolygon::from_pairs(pairs).unwrap()
}

#[test]
fn wolf_scenario_box_and_area_queries() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);

    let mammal = store.categories.create(NewCategory::named("Mammal")).unwrap();
    let wolf = store
        .species
        .create(
            NewSpecies::new("Wolf", mammal.id).with_geometry(polygon(&[
                [0.0, 0.0],
                [0.0, 10.0],
                [10.0, 10.0],
                [10.0, 0.0],
            ])),
        )
        .unwrap();
    let ahti = store
        .animals
        .create(NewAnimal::new(wolf.id).at(point(5.0, 5.0)))
        .unwrap();

    let in_box = store.animals.find_within_box("10,10", "0,0").unwrap();
    assert_eq!(in_box.len(), 1);
    assert_eq!(in_box[0].id, ahti.id);
    let resolved_species = in_box[0].species.as_ref().unwrap();
    assert_eq!(resolved_species.id, wolf.id);
    assert_eq!(resolved_species.name, "Wolf");
    assert_eq!(resolved_species.category.as_ref(), Some(&mammal));

    let in_area = store
        .species
        .find_by_area(&polygon(&[[4.0, 4.0], [4.0, 6.0], [6.0, 6.0], [6.0, 4.0]]))
        .unwrap();
    assert_eq!(in_area, vec![wolf]);
}

#[test]
fn find_within_box_matches_closed_rectangle_exactly() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);
    let species_id = Uuid::new_v4();

    let positions = [
        (0.0, 0.0),
        (10.0, 10.0),
        (0.0, 10.0),
        (5.0, 5.0),
        (10.0001, 5.0),
        (5.0, -0.0001),
        (-20.0, 40.0),
    ];
    let mut expected = HashSet::new();
    let bbox = BoundingBox::from_corners(point(10.0, 10.0), point(0.0, 0.0));
    for (lon, lat) in positions {
        let animal = store
            .animals
            .create(NewAnimal::new(species_id).at(point(lon, lat)))
            .unwrap();
        if bbox.contains(&point(lon, lat)) {
            expected.insert(animal.id);
        }
    }
    store.animals.create(NewAnimal::new(species_id)).unwrap();

    let found: HashSet<_> = store
        .animals
        .find_within_box("10,10", "0,0")
        .unwrap()
        .into_iter()
        .map(|animal| animal.id)
        .collect();
    assert_eq!(found, expected);
    assert_eq!(found.len(), 4);
}

#[test]
fn find_within_box_accepts_swapped_corners_and_negative_coordinates() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);
    let animal = store
        .animals
        .create(NewAnimal::new(Uuid::new_v4()).at(point(-70.5, -33.4)))
        .unwrap();

    let normal = store.animals.find_within_box("-70,-33", "-71,-34").unwrap();
    let swapped = store.animals.find_within_box("-71,-34", "-70,-33").unwrap();
    assert_eq!(normal.len(), 1);
    assert_eq!(normal, swapped);
    assert_eq!(normal[0].id, animal.id);
}

#[test]
fn find_within_box_rejects_malformed_corners() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);

    for (top_right, bottom_left) in [("10", "0,0"), ("10,10", "zero,0"), ("10,10,1", "0,0")] {
        let err = store
            .animals
            .find_within_box(top_right, bottom_left)
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::Geometry(GeoError::MalformedCoordinate(_)))
        ));
    }

    let err = store.animals.find_within_box("190,10", "0,0").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::Geometry(GeoError::OutOfRange { .. }))
    ));
}

#[test]
fn find_within_box_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);
    assert!(store
        .animals
        .find_within_box("180,90", "-180,-90")
        .unwrap()
        .is_empty());
}

#[test]
fn malformed_persisted_location_is_excluded_not_fatal() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);
    let species_id = Uuid::new_v4();
    let good = store
        .animals
        .create(NewAnimal::new(species_id).at(point(1.0, 1.0)))
        .unwrap();

    let bad_id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO animals (id, species_id, lon, lat) VALUES (?1, ?2, 500.0, 1.0);",
        [bad_id.to_string(), species_id.to_string()],
    )
    .unwrap();

    let found = store.animals.find_within_box("180,90", "-180,-90").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, good.id);

    let listed = store.animals.find_by_species(species_id).unwrap();
    let bad = listed.iter().find(|animal| animal.id == bad_id).unwrap();
    assert!(bad.location.is_none());
}

#[test]
fn find_by_area_uses_intersection_semantics() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);
    let category_id = Uuid::new_v4();

    let big = store
        .species
        .create(
            NewSpecies::new("Big", category_id)
                .with_geometry(polygon(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]])),
        )
        .unwrap();
    let crossing = store
        .species
        .create(NewSpecies::new("Crossing", category_id).with_geometry(polygon(&[
            [8.0, 8.0],
            [8.0, 20.0],
            [20.0, 20.0],
            [20.0, 8.0],
        ])))
        .unwrap();
    store
        .species
        .create(NewSpecies::new("Far", category_id).with_geometry(polygon(&[
            [50.0, 50.0],
            [50.0, 60.0],
            [60.0, 60.0],
        ])))
        .unwrap();
    // Bounding boxes overlap the query, the shapes do not.
    store
        .species
        .create(NewSpecies::new("Diagonal", category_id).with_geometry(polygon(&[
            [10.0, 10.0],
            [10.0, 6.0],
            [6.0, 10.0],
        ])))
        .unwrap();
    store
        .species
        .create(NewSpecies::new("Rangeless", category_id))
        .unwrap();

    let query = polygon(&[[0.0, 0.0], [9.0, 0.0], [0.0, 9.0]]);
    let found = store.species.find_by_area(&query).unwrap();
    assert_eq!(found, vec![big.clone()]);

    let whole = polygon(&[[-1.0, -1.0], [-1.0, 30.0], [30.0, 30.0], [30.0, -1.0]]);
    let ids: Vec<_> = store
        .species
        .find_by_area(&whole)
        .unwrap()
        .into_iter()
        .map(|species| species.id)
        .collect();
    assert!(ids.contains(&big.id));
    assert!(ids.contains(&crossing.id));
    assert_eq!(ids.len(), 3);
}

#[test]
fn find_by_area_matches_species_with_identical_range() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);
    let range = polygon(&[[1.0, 1.0], [1.0, 2.0], [2.0, 1.5]]);
    let species = store
        .species
        .create(NewSpecies::new("Self", Uuid::new_v4()).with_geometry(range.clone()))
        .unwrap();

    assert_eq!(store.species.find_by_area(&range).unwrap(), vec![species]);
}

#[test]
fn find_by_area_ring_rejects_degenerate_polygon() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);

    let err = store
        .species
        .find_by_area_ring(&[[1.0, 1.0], [2.0, 2.0], [1.0, 1.0]])
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::Geometry(GeoError::DegeneratePolygon {
            distinct_vertices: 2
        }))
    ));

    assert!(store
        .species
        .find_by_area_ring(&[[1.0, 1.0], [2.0, 2.0], [1.0, 2.0]])
        .unwrap()
        .is_empty());
}

#[test]
fn unreadable_persisted_geometry_never_matches() {
    let conn = open_db_in_memory().unwrap();
    let store = fixture(&conn);

    conn.execute(
        "INSERT INTO species (id, name, category_id, geometry, min_lon, min_lat, max_lon, max_lat)
         VALUES (?1, 'Broken', ?2, 'not json', 0.0, 0.0, 10.0, 10.0);",
        [Uuid::new_v4().to_string(), Uuid::new_v4().to_string()],
    )
    .unwrap();

    let query = polygon(&[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]);
    assert!(store.species.find_by_area(&query).unwrap().is_empty());
    assert_eq!(store.species.list().unwrap().len(), 1);
}
