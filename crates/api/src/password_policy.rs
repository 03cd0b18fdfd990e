// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password rules applied at registration.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password mixes too few kinds of characters.
    #[error(
        "Password must mix at least {required} of: uppercase letters, lowercase letters, digits, symbols (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password equals the login or display name.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },

    /// Password and confirmation do not match.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,
}

/// Minimum length and character-class mix of an account password.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    /// Minimum number of characters.
    pub min_length: usize,
    /// Minimum number of character classes (out of 4).
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_complexity: 2,
        }
    }
}

impl PasswordPolicy {
    /// Validates a new password.
    ///
    /// Names are compared case-insensitively after trimming.
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        login_name: &str,
        display_name: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let found: usize = character_classes(password);
        if found < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found,
            });
        }

        let lowered: String = password.to_lowercase();
        for (field, value) in [("login_name", login_name), ("display_name", display_name)] {
            if lowered == value.trim().to_lowercase() {
                return Err(PasswordPolicyError::MatchesForbiddenField {
                    field: String::from(field),
                });
            }
        }

        Ok(())
    }
}

/// Counts the character classes present in `password`.
fn character_classes(password: &str) -> usize {
    let checks: [fn(char) -> bool; 4] = [
        char::is_uppercase,
        char::is_lowercase,
        |c: char| c.is_ascii_digit(),
        |c: char| !c.is_alphanumeric() && !c.is_whitespace(),
    ];

    checks
        .iter()
        .filter(|check| password.chars().any(|c| check(c)))
        .count()
}
