// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Placeholder shown for members without a display name.
pub const UNNAMED_MEMBER: &str = "—";

/// Role of a member within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberRole {
    /// Created the group; may rename it, rotate its code and remove members.
    Owner,
    /// Joined via the group code.
    Member,
}

impl MemberRole {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
        }
    }
}

impl FromStr for MemberRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "member" => Ok(Self::Member),
            _ => Err(DomainError::InvalidMemberRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A group member as seen by the dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's user ID.
    pub user_id: i64,
    /// Display name, already defaulted to [`UNNAMED_MEMBER`] when blank.
    pub display_name: String,
    /// Public avatar URL, if uploaded.
    pub avatar_url: Option<String>,
    /// The member's role.
    pub role: MemberRole,
}

impl Member {
    /// Creates a member, substituting a placeholder for blank names.
    #[must_use]
    pub fn new(
        user_id: i64,
        display_name: Option<&str>,
        avatar_url: Option<String>,
        role: MemberRole,
    ) -> Self {
        Self {
            user_id,
            display_name: safe_display_name(display_name),
            avatar_url,
            role,
        }
    }
}

/// Returns the trimmed name, or the placeholder when it is missing or blank.
#[must_use]
pub fn safe_display_name(name: Option<&str>) -> String {
    let trimmed: &str = name.map_or("", str::trim);
    if trimmed.is_empty() {
        String::from(UNNAMED_MEMBER)
    } else {
        trimmed.to_string()
    }
}

/// A single body-weight entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighIn {
    /// The entry ID.
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    /// Calendar day of the measurement.
    pub entry_date: Date,
    /// Weight in kilograms.
    pub weight_kg: f64,
}

/// A logged potato point event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEvent {
    /// The event ID.
    pub id: i64,
    /// The user who logged it.
    pub user_id: i64,
    /// The rule it was logged against; `None` once the rule is deleted.
    pub rule_id: Option<i64>,
    /// Calendar day the violation happened.
    pub occurred_on: Date,
    /// Points copied from the rule at logging time.
    pub points: i32,
    /// Optional free-text note.
    pub note: Option<String>,
}

/// A logged training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// The entry ID.
    pub id: i64,
    /// The user who trained.
    pub user_id: i64,
    /// The sport type ID.
    pub sport_type_id: i64,
    /// Sport name, if the type still resolves.
    pub sport_name: Option<String>,
    /// Calendar day of the session.
    pub occurred_on: Date,
    /// Duration in minutes.
    pub duration_min: i32,
    /// Distance in kilometres.
    pub distance_km: Option<f64>,
    /// Perceived intensity 1..=7.
    pub intensity: Option<i32>,
    /// Optional note.
    pub note: Option<String>,
}
