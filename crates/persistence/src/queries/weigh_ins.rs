// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weigh-in queries.
//!
//! Entry dates are stored as `YYYY-MM-DD` text, so ordering by the column
//! is chronological.

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use time::Date;
use tracing::debug;
use weighcrew_domain::{format_calendar_date, parse_calendar_date};

use crate::data_models::WeighInData;
use crate::diesel_schema::weigh_ins;
use crate::error::PersistenceError;

/// Diesel Queryable struct for weigh-in rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = weigh_ins)]
struct WeighInRow {
    weigh_in_id: i64,
    user_id: i64,
    entry_date: String,
    weight_kg: f64,
}

impl TryFrom<WeighInRow> for WeighInData {
    type Error = PersistenceError;

    fn try_from(row: WeighInRow) -> Result<Self, Self::Error> {
        Ok(Self {
            weigh_in_id: row.weigh_in_id,
            user_id: row.user_id,
            entry_date: parse_calendar_date(&row.entry_date)?,
            weight_kg: row.weight_kg,
        })
    }
}

/// Lists all weigh-ins of a user, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_weigh_ins_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<WeighInData>, PersistenceError> {
    debug!(user_id, "Listing weigh-ins");

    weigh_ins::table
        .filter(weigh_ins::user_id.eq(user_id))
        .order((weigh_ins::entry_date.desc(), weigh_ins::weigh_in_id.desc()))
        .select(WeighInRow::as_select())
        .load(conn)?
        .into_iter()
        .map(WeighInData::try_from)
        .collect()
}

/// Lists the weigh-ins of several users, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_weigh_ins_for_users(
    conn: &mut SqliteConnection,
    user_ids: &[i64],
) -> Result<Vec<WeighInData>, PersistenceError> {
    debug!(count = user_ids.len(), "Listing weigh-ins for users");

    weigh_ins::table
        .filter(weigh_ins::user_id.eq_any(user_ids))
        .order((weigh_ins::entry_date.desc(), weigh_ins::user_id.asc()))
        .select(WeighInRow::as_select())
        .load(conn)?
        .into_iter()
        .map(WeighInData::try_from)
        .collect()
}

/// Checks whether `user_id` already has an entry on `entry_date`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn weigh_in_exists(
    conn: &mut SqliteConnection,
    user_id: i64,
    entry_date: Date,
) -> Result<bool, PersistenceError> {
    let count: i64 = weigh_ins::table
        .filter(weigh_ins::user_id.eq(user_id))
        .filter(weigh_ins::entry_date.eq(format_calendar_date(entry_date)))
        .select(count_star())
        .first(conn)?;

    Ok(count > 0)
}
