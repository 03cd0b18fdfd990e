// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Potato rule and event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::debug;
use weighcrew_domain::{format_calendar_date, parse_calendar_date};

use crate::data_models::{PotatoEventData, PotatoRuleData};
use crate::diesel_schema::{potato_events, potato_rules};
use crate::error::PersistenceError;

/// Diesel Queryable struct for rule rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = potato_rules)]
struct PotatoRuleRow {
    rule_id: i64,
    group_id: i64,
    title: String,
    points: i32,
    is_active: i32,
    created_at: String,
}

impl From<PotatoRuleRow> for PotatoRuleData {
    fn from(row: PotatoRuleRow) -> Self {
        Self {
            rule_id: row.rule_id,
            group_id: row.group_id,
            title: row.title,
            points: row.points,
            is_active: row.is_active != 0,
            created_at: row.created_at,
        }
    }
}

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = potato_events)]
struct PotatoEventRow {
    event_id: i64,
    group_id: i64,
    user_id: i64,
    rule_id: Option<i64>,
    occurred_on: String,
    points: i32,
    note: Option<String>,
    created_at: String,
}

fn event_from_row(
    (row, rule_title): (PotatoEventRow, Option<String>),
) -> Result<PotatoEventData, PersistenceError> {
    Ok(PotatoEventData {
        event_id: row.event_id,
        group_id: row.group_id,
        user_id: row.user_id,
        rule_id: row.rule_id,
        rule_title,
        occurred_on: parse_calendar_date(&row.occurred_on)?,
        points: row.points,
        note: row.note,
        created_at: row.created_at,
    })
}

/// Lists the rules of a group.
///
/// Active rules come first, then higher points, then newer rules.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_rules(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<PotatoRuleData>, PersistenceError> {
    debug!(group_id, "Listing potato rules");

    Ok(potato_rules::table
        .filter(potato_rules::group_id.eq(group_id))
        .order((
            potato_rules::is_active.desc(),
            potato_rules::points.desc(),
            potato_rules::created_at.desc(),
            potato_rules::rule_id.desc(),
        ))
        .select(PotatoRuleRow::as_select())
        .load(conn)?
        .into_iter()
        .map(PotatoRuleData::from)
        .collect())
}

/// Retrieves a rule by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the rule does not exist.
pub fn get_rule(
    conn: &mut SqliteConnection,
    rule_id: i64,
) -> Result<Option<PotatoRuleData>, PersistenceError> {
    Ok(potato_rules::table
        .filter(potato_rules::rule_id.eq(rule_id))
        .select(PotatoRuleRow::as_select())
        .first(conn)
        .optional()?
        .map(PotatoRuleData::from))
}

/// Lists the events of a group dated within `start..=end`, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date is malformed.
pub fn list_events_in_range(
    conn: &mut SqliteConnection,
    group_id: i64,
    start: Date,
    end: Date,
) -> Result<Vec<PotatoEventData>, PersistenceError> {
    debug!(group_id, %start, %end, "Listing potato events");

    potato_events::table
        .left_join(potato_rules::table)
        .filter(potato_events::group_id.eq(group_id))
        .filter(potato_events::occurred_on.ge(format_calendar_date(start)))
        .filter(potato_events::occurred_on.le(format_calendar_date(end)))
        .order((
            potato_events::occurred_on.desc(),
            potato_events::event_id.desc(),
        ))
        .select((PotatoEventRow::as_select(), potato_rules::title.nullable()))
        .load::<(PotatoEventRow, Option<String>)>(conn)?
        .into_iter()
        .map(event_from_row)
        .collect()
}
