// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod group_tests;
mod training_tests;

use crate::Persistence;
use time::Date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// Creates a user and returns its ID.
pub fn create_test_user(persistence: &mut Persistence, login_name: &str) -> i64 {
    persistence
        .create_user(login_name, login_name, "Secret-pass1")
        .expect("user created")
}

/// Creates a user that owns a fresh group; returns `(user_id, group_id)`.
pub fn create_test_group(
    persistence: &mut Persistence,
    login_name: &str,
    code: &str,
) -> (i64, i64) {
    let user_id: i64 = create_test_user(persistence, login_name);
    let group_id: i64 = persistence
        .create_group(user_id, "Test Crew", code)
        .expect("group created");
    (user_id, group_id)
}

pub fn day(year: i32, month: time::Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}
