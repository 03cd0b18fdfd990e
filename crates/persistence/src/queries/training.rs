// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sport type and training entry queries.

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use tracing::debug;
use weighcrew_domain::parse_calendar_date;

use crate::data_models::{SportTypeData, TrainingEntryData};
use crate::diesel_schema::{sport_types, training_entries};
use crate::error::PersistenceError;

/// Diesel Queryable struct for sport type rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sport_types)]
struct SportTypeRow {
    sport_type_id: i64,
    group_id: i64,
    name: String,
    is_active: i32,
    created_at: String,
}

impl From<SportTypeRow> for SportTypeData {
    fn from(row: SportTypeRow) -> Self {
        Self {
            sport_type_id: row.sport_type_id,
            group_id: row.group_id,
            name: row.name,
            is_active: row.is_active != 0,
            created_at: row.created_at,
        }
    }
}

/// Diesel Queryable struct for training entry rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = training_entries)]
struct TrainingEntryRow {
    entry_id: i64,
    group_id: i64,
    user_id: i64,
    sport_type_id: i64,
    occurred_on: String,
    duration_min: i32,
    distance_km: Option<f64>,
    intensity: Option<i32>,
    note: Option<String>,
    created_at: String,
}

fn entry_from_row(
    (row, sport_name): (TrainingEntryRow, Option<String>),
) -> Result<TrainingEntryData, PersistenceError> {
    Ok(TrainingEntryData {
        entry_id: row.entry_id,
        group_id: row.group_id,
        user_id: row.user_id,
        sport_type_id: row.sport_type_id,
        sport_name,
        occurred_on: parse_calendar_date(&row.occurred_on)?,
        duration_min: row.duration_min,
        distance_km: row.distance_km,
        intensity: row.intensity,
        note: row.note,
        created_at: row.created_at,
    })
}

/// Lists the sport types of a group by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_sport_types(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<SportTypeData>, PersistenceError> {
    Ok(sport_types::table
        .filter(sport_types::group_id.eq(group_id))
        .order(sport_types::name.asc())
        .select(SportTypeRow::as_select())
        .load(conn)?
        .into_iter()
        .map(SportTypeData::from)
        .collect())
}

/// Retrieves a sport type by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the sport type does not exist.
pub fn get_sport_type(
    conn: &mut SqliteConnection,
    sport_type_id: i64,
) -> Result<Option<SportTypeData>, PersistenceError> {
    Ok(sport_types::table
        .filter(sport_types::sport_type_id.eq(sport_type_id))
        .select(SportTypeRow::as_select())
        .first(conn)
        .optional()?
        .map(SportTypeData::from))
}

/// Checks whether a group already has a sport type called `name`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn sport_type_name_exists(
    conn: &mut SqliteConnection,
    group_id: i64,
    name: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = sport_types::table
        .filter(sport_types::group_id.eq(group_id))
        .filter(sport_types::name.eq(name))
        .select(count_star())
        .first(conn)?;

    Ok(count > 0)
}

/// Lists a user's training entries in a group, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_training_entries(
    conn: &mut SqliteConnection,
    user_id: i64,
    group_id: i64,
    limit: i64,
) -> Result<Vec<TrainingEntryData>, PersistenceError> {
    debug!(user_id, group_id, limit, "Listing training entries");

    training_entries::table
        .left_join(sport_types::table)
        .filter(training_entries::user_id.eq(user_id))
        .filter(training_entries::group_id.eq(group_id))
        .order((
            training_entries::occurred_on.desc(),
            training_entries::entry_id.desc(),
        ))
        .limit(limit)
        .select((TrainingEntryRow::as_select(), sport_types::name.nullable()))
        .load::<(TrainingEntryRow, Option<String>)>(conn)?
        .into_iter()
        .map(entry_from_row)
        .collect()
}
