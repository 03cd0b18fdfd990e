// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for sport types and training entries.

use time::Month;

use crate::{PersistenceError, SportTypeData, TrainingEntryData, TrainingEntryValues};

use super::{create_test_group, create_test_persistence, create_test_user, day};

fn values(sport_type_id: i64, date_day: u8, duration_min: i32) -> TrainingEntryValues<'static> {
    TrainingEntryValues {
        sport_type_id,
        occurred_on: day(2026, Month::January, date_day),
        duration_min,
        distance_km: Some(5.0),
        intensity: Some(4),
        note: None,
    }
}

#[test]
fn test_sport_types_unique_per_group_and_sorted() {
    let mut persistence = create_test_persistence();
    let (_, group_id) = create_test_group(&mut persistence, "anna", "AAAAAA");
    let (_, other_group) = create_test_group(&mut persistence, "ben", "BBBBBB");

    persistence.insert_sport_type(group_id, "Swim").unwrap();
    persistence.insert_sport_type(group_id, "Bike").unwrap();
    assert!(persistence.sport_type_name_exists(group_id, "Swim").unwrap());

    let duplicate = persistence.insert_sport_type(group_id, "Swim");
    assert!(matches!(
        duplicate,
        Err(PersistenceError::ConstraintViolation(_))
    ));
    assert!(persistence.insert_sport_type(other_group, "Swim").is_ok());

    let names: Vec<String> = persistence
        .list_sport_types(group_id)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Bike", "Swim"]);
}

#[test]
fn test_toggle_sport_type() {
    let mut persistence = create_test_persistence();
    let (_, group_id) = create_test_group(&mut persistence, "anna", "AAAAAA");
    let sport_type_id: i64 = persistence.insert_sport_type(group_id, "Run").unwrap();

    persistence
        .set_sport_type_active(group_id, sport_type_id, false)
        .unwrap();

    let sport: SportTypeData = persistence.get_sport_type(sport_type_id).unwrap().unwrap();
    assert!(!sport.is_active);
}

#[test]
fn test_training_entries_crud_and_ownership() {
    let mut persistence = create_test_persistence();
    let (user_id, group_id) = create_test_group(&mut persistence, "anna", "AAAAAA");
    let intruder: i64 = create_test_user(&mut persistence, "ben");
    let run: i64 = persistence.insert_sport_type(group_id, "Run").unwrap();

    let first: i64 = persistence
        .insert_training_entry(group_id, user_id, &values(run, 5, 30))
        .unwrap();
    persistence
        .insert_training_entry(group_id, user_id, &values(run, 7, 45))
        .unwrap();

    let entries: Vec<TrainingEntryData> = persistence
        .list_training_entries(user_id, group_id, 2000)
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].duration_min, 45);
    assert_eq!(entries[0].sport_name.as_deref(), Some("Run"));

    let foreign = persistence.update_training_entry(intruder, first, &values(run, 5, 99));
    assert!(matches!(foreign, Err(PersistenceError::NotFound(_))));

    persistence
        .update_training_entry(user_id, first, &values(run, 6, 50))
        .unwrap();
    persistence
        .delete_training_entry(user_id, first)
        .unwrap();

    let entries: Vec<TrainingEntryData> = persistence
        .list_training_entries(user_id, group_id, 2000)
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].duration_min, 45);
}

#[test]
fn test_training_entries_respect_limit() {
    let mut persistence = create_test_persistence();
    let (user_id, group_id) = create_test_group(&mut persistence, "anna", "AAAAAA");
    let run: i64 = persistence.insert_sport_type(group_id, "Run").unwrap();

    for date_day in 1..=5 {
        persistence
            .insert_training_entry(group_id, user_id, &values(run, date_day, 20))
            .unwrap();
    }

    let entries: Vec<TrainingEntryData> = persistence
        .list_training_entries(user_id, group_id, 3)
        .unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].occurred_on, day(2026, Month::January, 5));
}

#[test]
fn test_check_constraint_rejects_bad_intensity() {
    let mut persistence = create_test_persistence();
    let (user_id, group_id) = create_test_group(&mut persistence, "anna", "AAAAAA");
    let run: i64 = persistence.insert_sport_type(group_id, "Run").unwrap();

    let mut bad: TrainingEntryValues<'static> = values(run, 5, 30);
    bad.intensity = Some(9);

    let result = persistence.insert_training_entry(group_id, user_id, &bad);
    assert!(matches!(result, Err(PersistenceError::ConstraintViolation(_))));
}
