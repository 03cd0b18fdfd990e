// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use weighcrew_domain::DomainError;
use weighcrew_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller lacks the group role an action needs.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the caller does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A business rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

fn rule(name: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(name),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Input-format faults become `InvalidInput`; broken business rules become
/// `DomainRuleViolation`.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::DateParseError { .. } => invalid("date", &err),
        DomainError::InvalidDisplayName(_) => invalid("display_name", &err),
        DomainError::InvalidGroupName(_) => invalid("name", &err),
        DomainError::InvalidGroupCode(_) => invalid("code", &err),
        DomainError::InvalidWeight { .. } => invalid("weight_kg", &err),
        DomainError::InvalidTargetWeight { .. } => invalid("target_weight_kg", &err),
        DomainError::InvalidRuleTitle(_) => invalid("title", &err),
        DomainError::InvalidSportTypeName(_) => invalid("name", &err),
        DomainError::InvalidDuration { .. } => invalid("duration_min", &err),
        DomainError::InvalidDistance { .. } => invalid("distance_km", &err),
        DomainError::InvalidIntensity { .. } => invalid("intensity", &err),
        DomainError::InvalidAvatarType(_) => invalid("content_type", &err),
        DomainError::DuplicateWeighIn { .. } => rule("one_weigh_in_per_day", &err),
        DomainError::EventOutsideCycle { .. } => rule("event_in_current_cycle", &err),
        DomainError::EventNotInCurrentWeek { .. } => rule("event_in_current_week", &err),
        DomainError::RuleInactive { .. } => rule("rule_active", &err),
        DomainError::OwnerCannotLeave { .. } => rule("owner_cannot_leave", &err),
        DomainError::OwnerCannotRemoveSelf => rule("owner_cannot_remove_self", &err),
        DomainError::InvalidMemberRole(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `resource_type` names what the caller was looking for when the store
/// reports `NotFound`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from(resource_type),
            message,
        },
        PersistenceError::ConstraintViolation(message) => ApiError::DomainRuleViolation {
            rule: String::from("unique_or_check_constraint"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
