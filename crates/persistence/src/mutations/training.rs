// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sport type and training entry mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use weighcrew_domain::format_calendar_date;

use crate::backend::PersistenceBackend;
use crate::data_models::TrainingEntryValues;
use crate::diesel_schema::{sport_types, training_entries};
use crate::error::PersistenceError;
use crate::mutations::require_affected;

/// Inserts an active sport type.
///
/// # Errors
///
/// Returns a constraint violation if the group already has a sport type
/// with this name.
pub fn insert_sport_type(
    conn: &mut SqliteConnection,
    group_id: i64,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sport_types::table)
        .values((
            sport_types::group_id.eq(group_id),
            sport_types::name.eq(name),
            sport_types::is_active.eq(1),
        ))
        .execute(conn)?;

    let sport_type_id: i64 = conn.get_last_insert_rowid()?;
    info!(sport_type_id, group_id, name, "Sport type created");
    Ok(sport_type_id)
}

/// Activates or deactivates a sport type.
///
/// # Errors
///
/// Returns `NotFound` if the sport type does not exist in the group.
pub fn set_sport_type_active(
    conn: &mut SqliteConnection,
    group_id: i64,
    sport_type_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(sport_types::table)
        .filter(sport_types::sport_type_id.eq(sport_type_id))
        .filter(sport_types::group_id.eq(group_id))
        .set(sport_types::is_active.eq(i32::from(is_active)))
        .execute(conn)?;

    require_affected(rows, "Sport type")
}

/// Inserts a training entry.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_training_entry(
    conn: &mut SqliteConnection,
    group_id: i64,
    user_id: i64,
    values: &TrainingEntryValues<'_>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(training_entries::table)
        .values((
            training_entries::group_id.eq(group_id),
            training_entries::user_id.eq(user_id),
            training_entries::sport_type_id.eq(values.sport_type_id),
            training_entries::occurred_on.eq(format_calendar_date(values.occurred_on)),
            training_entries::duration_min.eq(values.duration_min),
            training_entries::distance_km.eq(values.distance_km),
            training_entries::intensity.eq(values.intensity),
            training_entries::note.eq(values.note),
        ))
        .execute(conn)?;

    let entry_id: i64 = conn.get_last_insert_rowid()?;
    info!(entry_id, group_id, user_id, "Training entry recorded");
    Ok(entry_id)
}

/// Replaces the fields of one of the user's own entries.
///
/// # Errors
///
/// Returns `NotFound` if the entry does not exist or belongs to someone else.
pub fn update_training_entry(
    conn: &mut SqliteConnection,
    user_id: i64,
    entry_id: i64,
    values: &TrainingEntryValues<'_>,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(training_entries::table)
        .filter(training_entries::entry_id.eq(entry_id))
        .filter(training_entries::user_id.eq(user_id))
        .set((
            training_entries::sport_type_id.eq(values.sport_type_id),
            training_entries::occurred_on.eq(format_calendar_date(values.occurred_on)),
            training_entries::duration_min.eq(values.duration_min),
            training_entries::distance_km.eq(values.distance_km),
            training_entries::intensity.eq(values.intensity),
            training_entries::note.eq(values.note),
        ))
        .execute(conn)?;

    require_affected(rows, "Training entry")
}

/// Deletes one of the user's own entries.
///
/// # Errors
///
/// Returns `NotFound` if the entry does not exist or belongs to someone else.
pub fn delete_training_entry(
    conn: &mut SqliteConnection,
    user_id: i64,
    entry_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(training_entries::table)
        .filter(training_entries::entry_id.eq(entry_id))
        .filter(training_entries::user_id.eq(user_id))
        .execute(conn)?;

    require_affected(rows, "Training entry")
}
