// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use weighcrew_persistence::Persistence;

use super::helpers::{TEST_PASSWORD, create_test_persistence, register_request, register_user};
use crate::{
    ApiError, AuthError, AuthenticatedUser, AuthenticationService, LoginRequest, LoginResponse,
    ProfileResponse, RegisterRequest, RegisterResponse, login, logout, register, whoami,
};

fn login_request(login_name: &str, password: &str) -> LoginRequest {
    LoginRequest {
        login_name: String::from(login_name),
        password: String::from(password),
    }
}

#[test]
fn test_register_normalizes_login_name() {
    let mut persistence: Persistence = create_test_persistence();

    let response: RegisterResponse =
        register(&mut persistence, &register_request("  anna ")).unwrap();

    assert_eq!(response.login_name, "ANNA");
    assert_eq!(response.display_name, "anna  Tester");
}

#[test]
fn test_register_rejects_taken_login_case_insensitively() {
    let mut persistence: Persistence = create_test_persistence();
    register_user(&mut persistence, "anna");

    let result: Result<RegisterResponse, ApiError> =
        register(&mut persistence, &register_request("ANNA"));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_login_name"
    ));
}

#[test]
fn test_register_enforces_password_policy() {
    let mut persistence: Persistence = create_test_persistence();
    let mut request: RegisterRequest = register_request("anna");
    request.password = String::from("short1");
    request.password_confirmation = String::from("short1");

    let result: Result<RegisterResponse, ApiError> = register(&mut persistence, &request);

    assert!(matches!(result, Err(ApiError::PasswordPolicyViolation { .. })));
}

#[test]
fn test_register_rejects_short_display_name() {
    let mut persistence: Persistence = create_test_persistence();
    let mut request: RegisterRequest = register_request("anna");
    request.display_name = String::from(" A ");

    let result: Result<RegisterResponse, ApiError> = register(&mut persistence, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "display_name"
    ));
}

#[test]
fn test_login_and_validate_session() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedUser = register_user(&mut persistence, "anna");

    let response: LoginResponse =
        login(&mut persistence, &login_request("Anna", TEST_PASSWORD)).unwrap();
    assert!(response.session_token.starts_with("session_"));
    assert_eq!(response.login_name, "ANNA");

    let (validated, data) =
        AuthenticationService::validate_session(&mut persistence, &response.session_token)
            .unwrap();
    assert_eq!(validated, user);
    assert_eq!(data.user_id, user.user_id);
}

#[test]
fn test_login_rejects_wrong_password() {
    let mut persistence: Persistence = create_test_persistence();
    register_user(&mut persistence, "anna");

    let result: Result<LoginResponse, ApiError> =
        login(&mut persistence, &login_request("anna", "Wrong-pass-1"));

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_login_rejects_unknown_user() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<LoginResponse, ApiError> =
        login(&mut persistence, &login_request("nobody", TEST_PASSWORD));

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_logout_invalidates_session() {
    let mut persistence: Persistence = create_test_persistence();
    register_user(&mut persistence, "anna");
    let response: LoginResponse =
        login(&mut persistence, &login_request("anna", TEST_PASSWORD)).unwrap();

    logout(&mut persistence, &response.session_token).unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &response.session_token);
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_whoami_without_group() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedUser = register_user(&mut persistence, "anna");

    let profile: ProfileResponse = whoami(&mut persistence, &user).unwrap();

    assert_eq!(profile.login_name, "ANNA");
    assert_eq!(profile.display_name.as_deref(), Some("anna Tester"));
    assert_eq!(profile.active_group_id, None);
    assert_eq!(profile.active_group_name, None);
}
