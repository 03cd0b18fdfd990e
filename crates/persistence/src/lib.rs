// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for weighcrew.
//!
//! This crate stores users, sessions, groups, weigh-ins, potato points and
//! training entries in `SQLite` through Diesel.
//!
//! ## Storage Conventions
//!
//! - Calendar days are stored as `YYYY-MM-DD` text and surface as
//!   [`time::Date`] in every `*Data` type
//! - Booleans are stored as `0`/`1` integers
//! - Timestamps default to `CURRENT_TIMESTAMP`; session expiry is written by
//!   the caller in ISO 8601
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use weighcrew_domain::MemberRole;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    GroupData, MemberData, NewPotatoEvent, PotatoEventData, PotatoRuleData, SessionData,
    SportTypeData, TrainingEntryData, TrainingEntryValues, UserData, WeighInData,
};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter over a single `SQLite` connection.
///
/// Callers share it behind a mutex; every method takes `&mut self`.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_weighcrew_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Users & Sessions
    // ========================================================================

    /// Creates a new user with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the login name is taken or the insert fails.
    pub fn create_user(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, login_name, display_name, password)
    }

    /// Retrieves a user by login name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_login(&mut self.conn, login_name)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    /// Updates a user's display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn update_display_name(
        &mut self,
        user_id: i64,
        display_name: &str,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_display_name(&mut self.conn, user_id, display_name)
    }

    /// Sets or clears a user's target weight.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn update_target_weight(
        &mut self,
        user_id: i64,
        target_weight_kg: Option<f64>,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_target_weight(&mut self.conn, user_id, target_weight_kg)
    }

    /// Sets or clears a user's active group.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn set_active_group(
        &mut self,
        user_id: i64,
        group_id: Option<i64>,
    ) -> Result<(), PersistenceError> {
        mutations::users::set_active_group(&mut self.conn, user_id, group_id)
    }

    /// Replaces a user's avatar URL, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn replace_avatar_url(
        &mut self,
        user_id: i64,
        avatar_url: Option<&str>,
    ) -> Result<Option<String>, PersistenceError> {
        mutations::users::replace_avatar_url(&mut self.conn, user_id, avatar_url)
    }

    /// Creates a new session.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `user_id` - The user ID
    /// * `expires_at` - The expiration timestamp (ISO 8601 format)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions that expired before `now` (ISO 8601).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Groups
    // ========================================================================

    /// Creates a group owned by `owner_user_id` and makes it their active group.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or the insert fails.
    pub fn create_group(
        &mut self,
        owner_user_id: i64,
        name: &str,
        code: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::groups::create_group(&mut self.conn, owner_user_id, name, code)
    }

    /// Retrieves a group by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_group_by_id(
        &mut self,
        group_id: i64,
    ) -> Result<Option<GroupData>, PersistenceError> {
        queries::groups::get_group_by_id(&mut self.conn, group_id)
    }

    /// Retrieves a group by normalized join code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_group_by_code(&mut self, code: &str) -> Result<Option<GroupData>, PersistenceError> {
        queries::groups::get_group_by_code(&mut self.conn, code)
    }

    /// Checks whether a join code is already in use.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn group_code_exists(&mut self, code: &str) -> Result<bool, PersistenceError> {
        queries::groups::group_code_exists(&mut self.conn, code)
    }

    /// Adds a user to a group (idempotent) and makes it their active group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn join_group(&mut self, group_id: i64, user_id: i64) -> Result<(), PersistenceError> {
        mutations::groups::join_group(&mut self.conn, group_id, user_id)
    }

    /// Removes a user from a group and clears their active group if needed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user was not a member.
    pub fn remove_member(&mut self, group_id: i64, user_id: i64) -> Result<(), PersistenceError> {
        mutations::groups::remove_member(&mut self.conn, group_id, user_id)
    }

    /// Lists the members of a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_members(&mut self, group_id: i64) -> Result<Vec<MemberData>, PersistenceError> {
        queries::groups::list_members(&mut self.conn, group_id)
    }

    /// Returns a user's role in a group, or `None` if not a member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_member_role(
        &mut self,
        group_id: i64,
        user_id: i64,
    ) -> Result<Option<MemberRole>, PersistenceError> {
        queries::groups::get_member_role(&mut self.conn, group_id, user_id)
    }

    /// Counts the members of a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_members(&mut self, group_id: i64) -> Result<i64, PersistenceError> {
        queries::groups::count_members(&mut self.conn, group_id)
    }

    /// Renames a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or the update fails.
    pub fn rename_group(&mut self, group_id: i64, name: &str) -> Result<(), PersistenceError> {
        mutations::groups::rename_group(&mut self.conn, group_id, name)
    }

    /// Replaces a group's join code.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or the code is taken.
    pub fn update_group_code(&mut self, group_id: i64, code: &str) -> Result<(), PersistenceError> {
        mutations::groups::update_group_code(&mut self.conn, group_id, code)
    }

    /// Sets or clears a group's cycle anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or the update fails.
    pub fn set_cycle_anchor(
        &mut self,
        group_id: i64,
        anchor: Option<Date>,
    ) -> Result<(), PersistenceError> {
        mutations::groups::set_cycle_anchor(&mut self.conn, group_id, anchor)
    }

    // ========================================================================
    // Weigh-ins
    // ========================================================================

    /// Records a weigh-in.
    ///
    /// # Errors
    ///
    /// Returns a constraint violation if the user already weighed in on
    /// `entry_date`.
    pub fn insert_weigh_in(
        &mut self,
        user_id: i64,
        entry_date: Date,
        weight_kg: f64,
    ) -> Result<i64, PersistenceError> {
        mutations::weigh_ins::insert_weigh_in(&mut self.conn, user_id, entry_date, weight_kg)
    }

    /// Checks whether a user already has an entry on `entry_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn weigh_in_exists(
        &mut self,
        user_id: i64,
        entry_date: Date,
    ) -> Result<bool, PersistenceError> {
        queries::weigh_ins::weigh_in_exists(&mut self.conn, user_id, entry_date)
    }

    /// Updates the weight of one of the user's own entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry is missing or not owned by the user.
    pub fn update_weigh_in_weight(
        &mut self,
        user_id: i64,
        weigh_in_id: i64,
        weight_kg: f64,
    ) -> Result<(), PersistenceError> {
        mutations::weigh_ins::update_weigh_in_weight(
            &mut self.conn,
            user_id,
            weigh_in_id,
            weight_kg,
        )
    }

    /// Deletes one of the user's own entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry is missing or not owned by the user.
    pub fn delete_weigh_in(
        &mut self,
        user_id: i64,
        weigh_in_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::weigh_ins::delete_weigh_in(&mut self.conn, user_id, weigh_in_id)
    }

    /// Lists a user's weigh-ins, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_weigh_ins_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<WeighInData>, PersistenceError> {
        queries::weigh_ins::list_weigh_ins_for_user(&mut self.conn, user_id)
    }

    /// Lists the weigh-ins of several users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_weigh_ins_for_users(
        &mut self,
        user_ids: &[i64],
    ) -> Result<Vec<WeighInData>, PersistenceError> {
        queries::weigh_ins::list_weigh_ins_for_users(&mut self.conn, user_ids)
    }

    // ========================================================================
    // Potato Points
    // ========================================================================

    /// Lists a group's rules (active first, then points, then newest).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_rules(&mut self, group_id: i64) -> Result<Vec<PotatoRuleData>, PersistenceError> {
        queries::potato::list_rules(&mut self.conn, group_id)
    }

    /// Retrieves a rule by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_rule(&mut self, rule_id: i64) -> Result<Option<PotatoRuleData>, PersistenceError> {
        queries::potato::get_rule(&mut self.conn, rule_id)
    }

    /// Creates an active rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_rule(
        &mut self,
        group_id: i64,
        title: &str,
        points: i32,
    ) -> Result<i64, PersistenceError> {
        mutations::potato::insert_rule(&mut self.conn, group_id, title, points)
    }

    /// Updates a rule's title.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the rule is not in the group.
    pub fn update_rule_title(
        &mut self,
        group_id: i64,
        rule_id: i64,
        title: &str,
    ) -> Result<(), PersistenceError> {
        mutations::potato::update_rule_title(&mut self.conn, group_id, rule_id, title)
    }

    /// Updates a rule's points.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the rule is not in the group.
    pub fn update_rule_points(
        &mut self,
        group_id: i64,
        rule_id: i64,
        points: i32,
    ) -> Result<(), PersistenceError> {
        mutations::potato::update_rule_points(&mut self.conn, group_id, rule_id, points)
    }

    /// Activates or deactivates a rule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the rule is not in the group.
    pub fn set_rule_active(
        &mut self,
        group_id: i64,
        rule_id: i64,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::potato::set_rule_active(&mut self.conn, group_id, rule_id, is_active)
    }

    /// Deletes a rule; logged events keep their points.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the rule is not in the group.
    pub fn delete_rule(&mut self, group_id: i64, rule_id: i64) -> Result<(), PersistenceError> {
        mutations::potato::delete_rule(&mut self.conn, group_id, rule_id)
    }

    /// Logs a potato event.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_event(&mut self, event: &NewPotatoEvent<'_>) -> Result<i64, PersistenceError> {
        mutations::potato::insert_event(&mut self.conn, event)
    }

    /// Lists a group's events dated within `start..=end`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_events_in_range(
        &mut self,
        group_id: i64,
        start: Date,
        end: Date,
    ) -> Result<Vec<PotatoEventData>, PersistenceError> {
        queries::potato::list_events_in_range(&mut self.conn, group_id, start, end)
    }

    // ========================================================================
    // Training
    // ========================================================================

    /// Lists a group's sport types by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_sport_types(
        &mut self,
        group_id: i64,
    ) -> Result<Vec<SportTypeData>, PersistenceError> {
        queries::training::list_sport_types(&mut self.conn, group_id)
    }

    /// Retrieves a sport type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_sport_type(
        &mut self,
        sport_type_id: i64,
    ) -> Result<Option<SportTypeData>, PersistenceError> {
        queries::training::get_sport_type(&mut self.conn, sport_type_id)
    }

    /// Checks whether a group already has a sport type called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn sport_type_name_exists(
        &mut self,
        group_id: i64,
        name: &str,
    ) -> Result<bool, PersistenceError> {
        queries::training::sport_type_name_exists(&mut self.conn, group_id, name)
    }

    /// Creates an active sport type.
    ///
    /// # Errors
    ///
    /// Returns a constraint violation if the name is taken in the group.
    pub fn insert_sport_type(
        &mut self,
        group_id: i64,
        name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::training::insert_sport_type(&mut self.conn, group_id, name)
    }

    /// Activates or deactivates a sport type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the sport type is not in the group.
    pub fn set_sport_type_active(
        &mut self,
        group_id: i64,
        sport_type_id: i64,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::training::set_sport_type_active(
            &mut self.conn,
            group_id,
            sport_type_id,
            is_active,
        )
    }

    /// Records a training entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_training_entry(
        &mut self,
        group_id: i64,
        user_id: i64,
        values: &TrainingEntryValues<'_>,
    ) -> Result<i64, PersistenceError> {
        mutations::training::insert_training_entry(&mut self.conn, group_id, user_id, values)
    }

    /// Replaces the fields of one of the user's own entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry is missing or not owned by the user.
    pub fn update_training_entry(
        &mut self,
        user_id: i64,
        entry_id: i64,
        values: &TrainingEntryValues<'_>,
    ) -> Result<(), PersistenceError> {
        mutations::training::update_training_entry(&mut self.conn, user_id, entry_id, values)
    }

    /// Deletes one of the user's own entries.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the entry is missing or not owned by the user.
    pub fn delete_training_entry(
        &mut self,
        user_id: i64,
        entry_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::training::delete_training_entry(&mut self.conn, user_id, entry_id)
    }

    /// Lists a user's entries in a group, newest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_training_entries(
        &mut self,
        user_id: i64,
        group_id: i64,
        limit: i64,
    ) -> Result<Vec<TrainingEntryData>, PersistenceError> {
        queries::training::list_training_entries(&mut self.conn, user_id, group_id, limit)
    }
}
