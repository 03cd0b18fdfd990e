// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group and membership queries.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;
use tracing::debug;
use weighcrew_domain::{MemberRole, parse_calendar_date};

use crate::data_models::{GroupData, MemberData};
use crate::diesel_schema::{group_members, user_groups, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for group rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = user_groups)]
struct GroupRow {
    group_id: i64,
    name: String,
    code: String,
    owner_user_id: i64,
    cycle_anchor: Option<String>,
    created_at: String,
}

impl TryFrom<GroupRow> for GroupData {
    type Error = PersistenceError;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        let cycle_anchor = row
            .cycle_anchor
            .as_deref()
            .map(parse_calendar_date)
            .transpose()?;

        Ok(Self {
            group_id: row.group_id,
            name: row.name,
            code: row.code,
            owner_user_id: row.owner_user_id,
            cycle_anchor,
            created_at: row.created_at,
        })
    }
}

/// Retrieves a group by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored anchor is malformed.
/// Returns `Ok(None)` if the group does not exist.
pub fn get_group_by_id(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Option<GroupData>, PersistenceError> {
    debug!(group_id, "Looking up group by ID");

    user_groups::table
        .filter(user_groups::group_id.eq(group_id))
        .select(GroupRow::as_select())
        .first(conn)
        .optional()?
        .map(GroupData::try_from)
        .transpose()
}

/// Retrieves a group by its (already normalized) join code.
///
/// # Errors
///
/// Returns an error if the query fails or the stored anchor is malformed.
/// Returns `Ok(None)` if no group uses the code.
pub fn get_group_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<GroupData>, PersistenceError> {
    debug!(code, "Looking up group by code");

    user_groups::table
        .filter(user_groups::code.eq(code))
        .select(GroupRow::as_select())
        .first(conn)
        .optional()?
        .map(GroupData::try_from)
        .transpose()
}

/// Checks whether any group already uses `code`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn group_code_exists(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = user_groups::table
        .filter(user_groups::code.eq(code))
        .select(count_star())
        .first(conn)?;

    Ok(count > 0)
}

/// Lists the members of a group together with their profile fields.
///
/// Members are ordered by join time.
///
/// # Errors
///
/// Returns an error if the query fails or a stored role is unknown.
pub fn list_members(
    conn: &mut SqliteConnection,
    group_id: i64,
) -> Result<Vec<MemberData>, PersistenceError> {
    debug!(group_id, "Listing group members");

    let rows: Vec<MemberRow> = group_members::table
        .inner_join(users::table)
        .filter(group_members::group_id.eq(group_id))
        .order((group_members::joined_at.asc(), group_members::user_id.asc()))
        .select((
            group_members::group_id,
            group_members::user_id,
            group_members::role,
            users::display_name,
            users::avatar_url,
        ))
        .load(conn)?;

    rows.into_iter().map(member_from_row).collect()
}

type MemberRow = (i64, i64, String, Option<String>, Option<String>);

fn member_from_row(row: MemberRow) -> Result<MemberData, PersistenceError> {
    let (group_id, user_id, role, display_name, avatar_url) = row;
    Ok(MemberData {
        group_id,
        user_id,
        display_name,
        avatar_url,
        role: MemberRole::from_str(&role)?,
    })
}

/// Returns the role of `user_id` in `group_id`, or `None` if not a member.
///
/// # Errors
///
/// Returns an error if the query fails or the stored role is unknown.
pub fn get_member_role(
    conn: &mut SqliteConnection,
    group_id: i64,
    user_id: i64,
) -> Result<Option<MemberRole>, PersistenceError> {
    let role: Option<String> = group_members::table
        .filter(group_members::group_id.eq(group_id))
        .filter(group_members::user_id.eq(user_id))
        .select(group_members::role)
        .first(conn)
        .optional()?;

    Ok(role.as_deref().map(MemberRole::from_str).transpose()?)
}

/// Counts the members of a group.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_members(conn: &mut SqliteConnection, group_id: i64) -> Result<i64, PersistenceError> {
    Ok(group_members::table
        .filter(group_members::group_id.eq(group_id))
        .select(count_star())
        .first(conn)?)
}
