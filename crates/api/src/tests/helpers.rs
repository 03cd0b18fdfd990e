// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::{Date, Month};
use weighcrew_persistence::Persistence;

use crate::{
    AuthenticatedUser, CreateGroupRequest, GroupInfo, JoinGroupRequest, RegisterRequest,
    RegisterResponse, create_group, join_group, register,
};

/// Password accepted by the default policy.
pub const TEST_PASSWORD: &str = "Scales-2026";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn register_request(login_name: &str) -> RegisterRequest {
    RegisterRequest {
        login_name: String::from(login_name),
        display_name: format!("{login_name} Tester"),
        password: String::from(TEST_PASSWORD),
        password_confirmation: String::from(TEST_PASSWORD),
    }
}

pub fn register_user(persistence: &mut Persistence, login_name: &str) -> AuthenticatedUser {
    let response: RegisterResponse =
        register(persistence, &register_request(login_name)).expect("Failed to register user");
    AuthenticatedUser::new(response.user_id, response.login_name)
}

pub fn create_test_group(persistence: &mut Persistence, owner: &AuthenticatedUser) -> GroupInfo {
    create_group(
        persistence,
        owner,
        &CreateGroupRequest {
            name: String::from("Morning Crew"),
        },
    )
    .expect("Failed to create group")
}

/// Registers an owner and a second member sharing one group.
pub fn owner_and_member(
    persistence: &mut Persistence,
) -> (AuthenticatedUser, AuthenticatedUser, GroupInfo) {
    let owner: AuthenticatedUser = register_user(persistence, "anna");
    let member: AuthenticatedUser = register_user(persistence, "ben");
    let group: GroupInfo = create_test_group(persistence, &owner);
    join_group(
        persistence,
        &member,
        &JoinGroupRequest {
            code: group.code.clone(),
        },
    )
    .expect("Failed to join group");
    (owner, member, group)
}

pub fn day(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}
