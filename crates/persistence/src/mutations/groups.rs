// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group and membership mutations.
//!
//! Creating, joining and leaving a group also moves the user's active
//! group; each of these runs in one transaction.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::info;
use weighcrew_domain::{MemberRole, format_calendar_date};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{group_members, user_groups, users};
use crate::error::PersistenceError;
use crate::mutations::require_affected;

/// Creates a group, adds the creator as owner and makes it their active group.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner_user_id` - The creating user
/// * `name` - The validated group name
/// * `code` - A fresh join code
///
/// # Errors
///
/// Returns an error if the code is already taken or any insert fails.
pub fn create_group(
    conn: &mut SqliteConnection,
    owner_user_id: i64,
    name: &str,
    code: &str,
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(user_groups::table)
            .values((
                user_groups::name.eq(name),
                user_groups::code.eq(code),
                user_groups::owner_user_id.eq(owner_user_id),
            ))
            .execute(conn)?;

        let group_id: i64 = conn.get_last_insert_rowid()?;

        diesel::insert_into(group_members::table)
            .values((
                group_members::group_id.eq(group_id),
                group_members::user_id.eq(owner_user_id),
                group_members::role.eq(MemberRole::Owner.as_str()),
            ))
            .execute(conn)?;

        diesel::update(users::table)
            .filter(users::user_id.eq(owner_user_id))
            .set(users::active_group_id.eq(Some(group_id)))
            .execute(conn)?;

        info!(group_id, owner_user_id, "Group created");
        Ok(group_id)
    })
}

/// Adds `user_id` to a group as a member and makes it their active group.
///
/// Joining a group twice keeps the existing membership and role.
///
/// # Errors
///
/// Returns an error if the database write fails.
pub fn join_group(
    conn: &mut SqliteConnection,
    group_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let inserted: usize = diesel::insert_or_ignore_into(group_members::table)
            .values((
                group_members::group_id.eq(group_id),
                group_members::user_id.eq(user_id),
                group_members::role.eq(MemberRole::Member.as_str()),
            ))
            .execute(conn)?;

        diesel::update(users::table)
            .filter(users::user_id.eq(user_id))
            .set(users::active_group_id.eq(Some(group_id)))
            .execute(conn)?;

        info!(group_id, user_id, new_member = inserted > 0, "Joined group");
        Ok(())
    })
}

/// Removes `user_id` from a group.
///
/// Clears the user's active group if it pointed at this group.
///
/// # Errors
///
/// Returns `NotFound` if the user was not a member.
pub fn remove_member(
    conn: &mut SqliteConnection,
    group_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let rows: usize = diesel::delete(group_members::table)
            .filter(group_members::group_id.eq(group_id))
            .filter(group_members::user_id.eq(user_id))
            .execute(conn)?;
        require_affected(rows, "Membership")?;

        diesel::update(users::table)
            .filter(users::user_id.eq(user_id))
            .filter(users::active_group_id.eq(group_id))
            .set(users::active_group_id.eq(None::<i64>))
            .execute(conn)?;

        info!(group_id, user_id, "Member removed from group");
        Ok(())
    })
}

/// Renames a group.
///
/// # Errors
///
/// Returns `NotFound` if the group does not exist.
pub fn rename_group(
    conn: &mut SqliteConnection,
    group_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    info!(group_id, name, "Renaming group");

    let rows: usize = diesel::update(user_groups::table)
        .filter(user_groups::group_id.eq(group_id))
        .set(user_groups::name.eq(name))
        .execute(conn)?;

    require_affected(rows, "Group")
}

/// Replaces a group's join code.
///
/// # Errors
///
/// Returns `NotFound` if the group does not exist, or a constraint
/// violation if the code is already in use.
pub fn update_group_code(
    conn: &mut SqliteConnection,
    group_id: i64,
    code: &str,
) -> Result<(), PersistenceError> {
    info!(group_id, "Regenerating group code");

    let rows: usize = diesel::update(user_groups::table)
        .filter(user_groups::group_id.eq(group_id))
        .set(user_groups::code.eq(code))
        .execute(conn)?;

    require_affected(rows, "Group")
}

/// Sets or clears the group's cycle anchor.
///
/// # Errors
///
/// Returns `NotFound` if the group does not exist.
pub fn set_cycle_anchor(
    conn: &mut SqliteConnection,
    group_id: i64,
    anchor: Option<Date>,
) -> Result<(), PersistenceError> {
    info!(group_id, ?anchor, "Setting cycle anchor");

    let rows: usize = diesel::update(user_groups::table)
        .filter(user_groups::group_id.eq(group_id))
        .set(user_groups::cycle_anchor.eq(anchor.map(format_calendar_date)))
        .execute(conn)?;

    require_affected(rows, "Group")
}
