// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weigh-in mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::info;
use weighcrew_domain::format_calendar_date;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::weigh_ins;
use crate::error::PersistenceError;
use crate::mutations::require_affected;

/// Inserts a weigh-in.
///
/// # Errors
///
/// Returns a constraint violation if the user already has an entry on
/// `entry_date`.
pub fn insert_weigh_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    entry_date: Date,
    weight_kg: f64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(weigh_ins::table)
        .values((
            weigh_ins::user_id.eq(user_id),
            weigh_ins::entry_date.eq(format_calendar_date(entry_date)),
            weigh_ins::weight_kg.eq(weight_kg),
        ))
        .execute(conn)?;

    let weigh_in_id: i64 = conn.get_last_insert_rowid()?;
    info!(weigh_in_id, user_id, %entry_date, "Weigh-in recorded");
    Ok(weigh_in_id)
}

/// Updates the weight of one of the user's own entries.
///
/// # Errors
///
/// Returns `NotFound` if the entry does not exist or belongs to someone else.
pub fn update_weigh_in_weight(
    conn: &mut SqliteConnection,
    user_id: i64,
    weigh_in_id: i64,
    weight_kg: f64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(weigh_ins::table)
        .filter(weigh_ins::weigh_in_id.eq(weigh_in_id))
        .filter(weigh_ins::user_id.eq(user_id))
        .set(weigh_ins::weight_kg.eq(weight_kg))
        .execute(conn)?;

    require_affected(rows, "Weigh-in")
}

/// Deletes one of the user's own entries.
///
/// # Errors
///
/// Returns `NotFound` if the entry does not exist or belongs to someone else.
pub fn delete_weigh_in(
    conn: &mut SqliteConnection,
    user_id: i64,
    weigh_in_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(weigh_ins::table)
        .filter(weigh_ins::weigh_in_id.eq(weigh_in_id))
        .filter(weigh_ins::user_id.eq(user_id))
        .execute(conn)?;

    require_affected(rows, "Weigh-in")?;
    info!(weigh_in_id, user_id, "Weigh-in deleted");
    Ok(())
}
