use fauna_core::db::open_db_in_memory;
use fauna_core::{
    AnimalPatch, AnimalService, AnimalView, Entity, GeoPoint, NewAnimal, RelationalResolver,
    RepoError, SqliteAnimalRepository, SqliteCategoryRepository, SqliteSpeciesRepository,
    ValidationError,
};
use rusqlite::Connection;
use uuid::Uuid;

type Animals<'conn> = AnimalService<
    SqliteAnimalRepository<'conn>,
    SqliteSpeciesRepository<'conn>,
    SqliteCategoryRepository<'conn>,
>;

fn service(conn: &Connection) -> Animals<'_> {
    AnimalService::new(
        SqliteAnimalRepository::try_new(conn).unwrap(),
        RelationalResolver::new(
            SqliteSpeciesRepository::try_new(conn).unwrap(),
            SqliteCategoryRepository::try_new(conn).unwrap(),
        ),
    )
}

fn point(lon: f64, lat: f64) -> GeoPoint {
    GeoPoint::new(lon, lat).unwrap()
}

#[test]
fn create_and_get_raw_roundtrip_preserves_fields() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);
    let species_id = Uuid::new_v4();

    let input = NewAnimal {
        species_id: Some(species_id),
        location: Some(point(24.94, 60.17)),
        name: Some("Ahti".to_string()),
        notes: Some("collared 2024".to_string()),
    };
    let created = animals.create(input.clone()).unwrap();

    let AnimalView::Plain(loaded) = animals.get(created.id, false).unwrap() else {
        panic!("expected raw record");
    };
    assert_eq!(loaded, created);
    assert_eq!(Some(loaded.species_id), input.species_id);
    assert_eq!(loaded.location, input.location);
    assert_eq!(loaded.name, input.name);
    assert_eq!(loaded.notes, input.notes);
}

#[test]
fn create_without_species_is_validation_error() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);

    let err = animals
        .create(NewAnimal {
            location: Some(point(1.0, 1.0)),
            ..NewAnimal::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingField("speciesId"))
    ));
    assert!(animals.list(false).unwrap().is_empty());
}

#[test]
fn create_without_location_is_allowed() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);

    let created = animals.create(NewAnimal::new(Uuid::new_v4())).unwrap();
    assert!(created.location.is_none());
    assert_eq!(animals.list(false).unwrap().len(), 1);
}

#[test]
fn json_payload_with_out_of_range_location_is_rejected_at_the_boundary() {
    let payload = format!(
        r#"{{"speciesId": "{}", "location": [200.0, 10.0]}}"#,
        Uuid::new_v4()
    );
    let parsed: Result<NewAnimal, _> = serde_json::from_str(&payload);
    assert!(parsed.is_err());

    let geojson = format!(
        r#"{{"speciesId": "{}", "location": {{"type": "Point", "coordinates": [5, 5]}}}}"#,
        Uuid::new_v4()
    );
    let parsed: NewAnimal = serde_json::from_str(&geojson).unwrap();
    assert_eq!(parsed.location, Some(point(5.0, 5.0)));
}

#[test]
fn get_missing_animal_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);

    let id = Uuid::new_v4();
    for resolve in [true, false] {
        assert!(matches!(
            animals.get(id, resolve),
            Err(RepoError::NotFound { entity: Entity::Animal, id: missing }) if missing == id
        ));
    }
}

#[test]
fn get_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);
    let created = animals
        .create(NewAnimal::new(Uuid::new_v4()).at(point(3.0, 4.0)))
        .unwrap();

    assert_eq!(
        animals.get(created.id, true).unwrap(),
        animals.get(created.id, true).unwrap()
    );
}

#[test]
fn update_changes_only_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);
    let original = animals
        .create(
            NewAnimal::new(Uuid::new_v4())
                .at(point(1.0, 2.0))
                .named("Ahti"),
        )
        .unwrap();

    let moved = animals
        .update(
            original.id,
            AnimalPatch {
                location: Some(point(7.5, -3.25)),
                ..AnimalPatch::default()
            },
        )
        .unwrap();
    assert_eq!(moved.location, Some(point(7.5, -3.25)));
    assert_eq!(moved.species_id, original.species_id);
    assert_eq!(moved.name, original.name);
    assert_eq!(moved.notes, None);

    let new_species = Uuid::new_v4();
    let reassigned = animals
        .update(
            original.id,
            AnimalPatch {
                species_id: Some(new_species),
                notes: Some("relocated".to_string()),
                ..AnimalPatch::default()
            },
        )
        .unwrap();
    assert_eq!(reassigned.species_id, new_species);
    assert_eq!(reassigned.location, Some(point(7.5, -3.25)));
    assert_eq!(reassigned.name.as_deref(), Some("Ahti"));
    assert_eq!(reassigned.notes.as_deref(), Some("relocated"));
}

#[test]
fn update_with_absent_optional_fields_keeps_stored_values() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);
    let original = animals
        .create(NewAnimal {
            species_id: Some(Uuid::new_v4()),
            location: Some(point(-116.83361554809613, 16.216140094954582)),
            name: Some("Ahti".to_string()),
            notes: Some("collared".to_string()),
        })
        .unwrap();

    let reassigned = animals
        .update(
            original.id,
            AnimalPatch {
                species_id: Some(Uuid::new_v4()),
                location: None,
                name: None,
                notes: None,
            },
        )
        .unwrap();
    assert_eq!(reassigned.location, original.location);
    assert_eq!(reassigned.name, original.name);
    assert_eq!(reassigned.notes, original.notes);

    let AnimalView::Plain(loaded) = animals.get(original.id, false).unwrap() else {
        panic!("expected raw record");
    };
    assert_eq!(loaded, reassigned);
}

#[test]
fn update_missing_animal_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);

    let id = Uuid::new_v4();
    let err = animals
        .update(
            id,
            AnimalPatch {
                name: Some("nobody".to_string()),
                ..AnimalPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: Entity::Animal, .. }));
}

#[test]
fn delete_returns_record_then_get_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);
    let created = animals
        .create(NewAnimal::new(Uuid::new_v4()).at(point(0.0, 0.0)))
        .unwrap();

    assert_eq!(animals.delete(created.id).unwrap(), created);
    assert!(matches!(
        animals.get(created.id, false),
        Err(RepoError::NotFound { .. })
    ));
    assert!(matches!(
        animals.delete(created.id),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn find_by_species_is_exact_match_and_unresolved() {
    let conn = open_db_in_memory().unwrap();
    let animals = service(&conn);
    let wolf = Uuid::new_v4();
    let lynx = Uuid::new_v4();

    let first = animals.create(NewAnimal::new(wolf)).unwrap();
    let second = animals
        .create(NewAnimal::new(wolf).at(point(5.0, 5.0)))
        .unwrap();
    animals.create(NewAnimal::new(lynx)).unwrap();

    let found = animals.find_by_species(wolf).unwrap();
    assert_eq!(found, vec![first, second]);
    assert!(animals.find_by_species(Uuid::new_v4()).unwrap().is_empty());
}
