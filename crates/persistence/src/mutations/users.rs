// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User, profile and session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;
use crate::mutations::require_affected;

/// Creates a new user.
///
/// The `login_name` is normalized to uppercase for case-insensitive uniqueness.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name (will be normalized)
/// * `display_name` - The display name
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns an error if the user cannot be created or if the login name
/// already exists.
pub fn create_user(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login_name.trim().to_uppercase();

    info!(login_name = %normalized_login, display_name, "Creating user");

    // Hash the password using bcrypt
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::login_name.eq(&normalized_login),
            users::display_name.eq(display_name),
            users::password_hash.eq(&password_hash),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;

    info!(user_id, "User created successfully");

    Ok(user_id)
}

/// Updates a user's display name.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist.
pub fn update_display_name(
    conn: &mut SqliteConnection,
    user_id: i64,
    display_name: &str,
) -> Result<(), PersistenceError> {
    debug!(user_id, "Updating display name");

    let rows: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::display_name.eq(display_name))
        .execute(conn)?;

    require_affected(rows, "User")
}

/// Sets or clears a user's target weight.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist.
pub fn update_target_weight(
    conn: &mut SqliteConnection,
    user_id: i64,
    target_weight_kg: Option<f64>,
) -> Result<(), PersistenceError> {
    debug!(user_id, ?target_weight_kg, "Updating target weight");

    let rows: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::target_weight_kg.eq(target_weight_kg))
        .execute(conn)?;

    require_affected(rows, "User")
}

/// Sets or clears a user's active group.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist.
pub fn set_active_group(
    conn: &mut SqliteConnection,
    user_id: i64,
    group_id: Option<i64>,
) -> Result<(), PersistenceError> {
    debug!(user_id, ?group_id, "Setting active group");

    let rows: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::active_group_id.eq(group_id))
        .execute(conn)?;

    require_affected(rows, "User")
}

/// Replaces a user's avatar URL and returns the previous one.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist.
pub fn replace_avatar_url(
    conn: &mut SqliteConnection,
    user_id: i64,
    avatar_url: Option<&str>,
) -> Result<Option<String>, PersistenceError> {
    conn.transaction(|conn| {
        let previous: Option<String> = users::table
            .filter(users::user_id.eq(user_id))
            .select(users::avatar_url)
            .first(conn)?;

        diesel::update(users::table)
            .filter(users::user_id.eq(user_id))
            .set(users::avatar_url.eq(avatar_url))
            .execute(conn)?;

        info!(user_id, cleared = avatar_url.is_none(), "Avatar updated");
        Ok(previous)
    })
}

/// Creates a new session.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
/// * `user_id` - The user ID
/// * `expires_at` - The expiration timestamp (ISO 8601)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    info!(user_id, "Creating session");

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
            "CURRENT_TIMESTAMP",
        )))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    info!("Deleting session");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all sessions whose expiry lies before `now` (ISO 8601).
///
/// Returns the number of sessions removed.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;

    info!(deleted, "Deleted expired sessions");
    Ok(deleted)
}
