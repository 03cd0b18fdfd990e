// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and group-role authorization.

use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};
use weighcrew_domain::{MIN_NAME_LENGTH, MemberRole, validate_display_name};
use weighcrew_persistence::{GroupData, Persistence, PersistenceError, SessionData, UserData};

use crate::error::{ApiError, AuthError, translate_persistence_error};
use crate::password_policy::PasswordPolicy;

/// A user whose session token has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's ID.
    pub user_id: i64,
    /// Normalised (uppercase) login name.
    pub login_name: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    #[must_use]
    pub const fn new(user_id: i64, login_name: String) -> Self {
        Self {
            user_id,
            login_name,
        }
    }
}

impl From<&UserData> for AuthenticatedUser {
    fn from(user: &UserData) -> Self {
        Self::new(user.user_id, user.login_name.clone())
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Creates an account and its profile.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The login name is too short or already taken
    /// - The display name is invalid
    /// - The password breaks the password policy
    /// - Database operations fail
    pub fn register(
        persistence: &mut Persistence,
        login_name: &str,
        display_name: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<UserData, ApiError> {
        let login: String = login_name.trim().to_uppercase();
        if login.chars().count() < MIN_NAME_LENGTH {
            return Err(ApiError::InvalidInput {
                field: String::from("login_name"),
                message: format!("Login name must be at least {MIN_NAME_LENGTH} characters"),
            });
        }

        let display: String = validate_display_name(display_name)?;
        PasswordPolicy::default().validate(password, confirmation, &login, &display)?;

        if persistence
            .get_user_by_login(&login)
            .map_err(|e| translate_persistence_error(e, "User"))?
            .is_some()
        {
            return Err(ApiError::DomainRuleViolation {
                rule: String::from("unique_login_name"),
                message: format!("Login name '{login}' is already taken"),
            });
        }

        let user_id: i64 = persistence
            .create_user(&login, &display, password)
            .map_err(|e| translate_persistence_error(e, "User"))?;

        info!(user_id, login_name = %login, "Registered user");

        persistence
            .get_user_by_id(user_id)
            .map_err(|e| translate_persistence_error(e, "User"))?
            .ok_or_else(|| ApiError::Internal {
                message: String::from("User not found after creation"),
            })
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `expires_at`, `user_data`)
    ///
    /// # Errors
    ///
    /// Returns an error if the login name is unknown, the password is wrong
    /// or the session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, String, UserData), AuthError> {
        let user: UserData = persistence
            .get_user_by_login(login_name)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            })?;

        let password_ok: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_ok {
            warn!(login_name = %user.login_name, "Rejected login with wrong password");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid login name or password"),
            });
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let now_str: String = Self::format_timestamp(now)?;
        let removed: usize = persistence
            .delete_expired_sessions(&now_str)
            .map_err(Self::map_persistence_error)?;
        if removed > 0 {
            debug!(removed, "Pruned expired sessions");
        }

        let session_token: String = Self::generate_session_token(now);
        let expires_at: String = Self::format_timestamp(now + Self::DEFAULT_SESSION_EXPIRATION)?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        info!(user_id = user.user_id, "User logged in");

        Ok((session_token, expires_at, user))
    }

    /// Validates a session token and returns the user behind it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedUser, UserData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Failed to parse session expiration: {e}"),
                }
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok((AuthenticatedUser::from(&user), user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    fn format_timestamp(at: OffsetDateTime) -> Result<String, AuthError> {
        at.format(&Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format timestamp: {e}"),
            })
    }

    fn generate_session_token(now: OffsetDateTime) -> String {
        format!(
            "session_{}_{:016x}{:016x}",
            now.unix_timestamp_nanos(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionExpired(msg) | PersistenceError::SessionNotFound(msg) => {
                AuthError::AuthenticationFailed { reason: msg }
            }
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}

/// Enforces group membership and ownership.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Loads a group and the caller's role in it.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown group and `Unauthorized`
    /// when the caller is not a member.
    pub fn require_member(
        persistence: &mut Persistence,
        user: &AuthenticatedUser,
        group_id: i64,
        action: &str,
    ) -> Result<(GroupData, MemberRole), ApiError> {
        let group: GroupData = persistence
            .get_group_by_id(group_id)
            .map_err(|e| translate_persistence_error(e, "Group"))?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Group"),
                message: format!("Group {group_id} does not exist"),
            })?;

        let role: MemberRole = persistence
            .get_member_role(group_id, user.user_id)
            .map_err(|e| translate_persistence_error(e, "Group"))?
            .ok_or_else(|| AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("member"),
            })?;

        Ok((group, role))
    }

    /// Like [`Self::require_member`], but only the owner passes.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the caller is a plain member.
    pub fn require_owner(
        persistence: &mut Persistence,
        user: &AuthenticatedUser,
        group_id: i64,
        action: &str,
    ) -> Result<GroupData, ApiError> {
        let (group, role) = Self::require_member(persistence, user, group_id, action)?;
        match role {
            MemberRole::Owner => Ok(group),
            MemberRole::Member => Err(ApiError::from(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("owner"),
            })),
        }
    }
}
