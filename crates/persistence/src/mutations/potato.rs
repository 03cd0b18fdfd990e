// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Potato rule and event mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use weighcrew_domain::format_calendar_date;

use crate::backend::PersistenceBackend;
use crate::data_models::NewPotatoEvent;
use crate::diesel_schema::{potato_events, potato_rules};
use crate::error::PersistenceError;
use crate::mutations::require_affected;

/// Inserts an active rule into a group.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_rule(
    conn: &mut SqliteConnection,
    group_id: i64,
    title: &str,
    points: i32,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(potato_rules::table)
        .values((
            potato_rules::group_id.eq(group_id),
            potato_rules::title.eq(title),
            potato_rules::points.eq(points),
            potato_rules::is_active.eq(1),
        ))
        .execute(conn)?;

    let rule_id: i64 = conn.get_last_insert_rowid()?;
    info!(rule_id, group_id, points, "Potato rule created");
    Ok(rule_id)
}

/// Updates a rule's title.
///
/// # Errors
///
/// Returns `NotFound` if the rule does not exist in the group.
pub fn update_rule_title(
    conn: &mut SqliteConnection,
    group_id: i64,
    rule_id: i64,
    title: &str,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(potato_rules::table)
        .filter(potato_rules::rule_id.eq(rule_id))
        .filter(potato_rules::group_id.eq(group_id))
        .set(potato_rules::title.eq(title))
        .execute(conn)?;

    require_affected(rows, "Rule")
}

/// Updates a rule's points.
///
/// Events already logged keep the points they were logged with.
///
/// # Errors
///
/// Returns `NotFound` if the rule does not exist in the group.
pub fn update_rule_points(
    conn: &mut SqliteConnection,
    group_id: i64,
    rule_id: i64,
    points: i32,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(potato_rules::table)
        .filter(potato_rules::rule_id.eq(rule_id))
        .filter(potato_rules::group_id.eq(group_id))
        .set(potato_rules::points.eq(points))
        .execute(conn)?;

    require_affected(rows, "Rule")
}

/// Activates or deactivates a rule.
///
/// # Errors
///
/// Returns `NotFound` if the rule does not exist in the group.
pub fn set_rule_active(
    conn: &mut SqliteConnection,
    group_id: i64,
    rule_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(potato_rules::table)
        .filter(potato_rules::rule_id.eq(rule_id))
        .filter(potato_rules::group_id.eq(group_id))
        .set(potato_rules::is_active.eq(i32::from(is_active)))
        .execute(conn)?;

    require_affected(rows, "Rule")
}

/// Deletes a rule.
///
/// Events logged against it keep their points; their rule reference is
/// cleared by the foreign key.
///
/// # Errors
///
/// Returns `NotFound` if the rule does not exist in the group.
pub fn delete_rule(
    conn: &mut SqliteConnection,
    group_id: i64,
    rule_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(potato_rules::table)
        .filter(potato_rules::rule_id.eq(rule_id))
        .filter(potato_rules::group_id.eq(group_id))
        .execute(conn)?;

    require_affected(rows, "Rule")?;
    info!(rule_id, group_id, "Potato rule deleted");
    Ok(())
}

/// Inserts a potato event.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &NewPotatoEvent<'_>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(potato_events::table)
        .values((
            potato_events::group_id.eq(event.group_id),
            potato_events::user_id.eq(event.user_id),
            potato_events::rule_id.eq(Some(event.rule_id)),
            potato_events::occurred_on.eq(format_calendar_date(event.occurred_on)),
            potato_events::points.eq(event.points),
            potato_events::note.eq(event.note),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        event_id,
        group_id = event.group_id,
        user_id = event.user_id,
        points = event.points,
        "Potato event logged"
    );
    Ok(event_id)
}
