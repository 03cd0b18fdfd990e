// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Failed to parse a calendar date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Display name is empty or too short.
    InvalidDisplayName(String),
    /// Group name is empty or too short.
    InvalidGroupName(String),
    /// Group join code is malformed.
    InvalidGroupCode(String),
    /// Stored member role is not recognised.
    InvalidMemberRole(String),
    /// Body weight is not a positive finite number.
    InvalidWeight {
        /// The rejected value.
        value: f64,
    },
    /// Target weight is not a positive finite number.
    InvalidTargetWeight {
        /// The rejected value.
        value: f64,
    },
    /// A weigh-in already exists for this user and date.
    DuplicateWeighIn {
        /// The date that already has an entry.
        entry_date: Date,
    },
    /// Rule title is empty or too short.
    InvalidRuleTitle(String),
    /// Sport type name is empty or too short.
    InvalidSportTypeName(String),
    /// Training duration must be a positive number of minutes.
    InvalidDuration {
        /// The rejected value.
        minutes: i64,
    },
    /// Training distance must be empty or non-negative.
    InvalidDistance {
        /// The rejected value.
        value: f64,
    },
    /// Training intensity must be empty or within 1..=7.
    InvalidIntensity {
        /// The rejected value.
        value: i64,
    },
    /// Avatar image type is not accepted.
    InvalidAvatarType(String),
    /// Event date lies outside the current cycle.
    EventOutsideCycle {
        /// The submitted event date.
        event_date: Date,
        /// First day of the current cycle.
        cycle_start: Date,
        /// Last day of the current cycle.
        cycle_end: Date,
    },
    /// Event date lies inside the cycle but not in the current week.
    EventNotInCurrentWeek {
        /// The submitted event date.
        event_date: Date,
        /// The week number of the submitted date.
        event_week: u8,
        /// The week number of today.
        current_week: u8,
    },
    /// A rule that is inactive cannot be used to log points.
    RuleInactive {
        /// The rule identifier.
        rule_id: i64,
    },
    /// The group owner tried to leave while other members remain.
    OwnerCannotLeave {
        /// Number of remaining members besides the owner.
        remaining_members: usize,
    },
    /// The group owner tried to remove themself.
    OwnerCannotRemoveSelf,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::InvalidGroupName(msg) => write!(f, "Invalid group name: {msg}"),
            Self::InvalidGroupCode(msg) => write!(f, "Invalid group code: {msg}"),
            Self::InvalidMemberRole(role) => write!(f, "Invalid member role: {role}"),
            Self::InvalidWeight { value } => {
                write!(f, "Invalid weight: {value}. Must be a number greater than 0")
            }
            Self::InvalidTargetWeight { value } => {
                write!(
                    f,
                    "Invalid target weight: {value}. Must be a number greater than 0"
                )
            }
            Self::DuplicateWeighIn { entry_date } => {
                write!(
                    f,
                    "A weigh-in for {entry_date} already exists. Edit or delete it instead"
                )
            }
            Self::InvalidRuleTitle(msg) => write!(f, "Invalid rule title: {msg}"),
            Self::InvalidSportTypeName(msg) => write!(f, "Invalid sport type name: {msg}"),
            Self::InvalidDuration { minutes } => {
                write!(
                    f,
                    "Invalid duration: {minutes}. Must be a whole number of minutes greater than 0"
                )
            }
            Self::InvalidDistance { value } => {
                write!(f, "Invalid distance: {value}. Must be empty or at least 0")
            }
            Self::InvalidIntensity { value } => {
                write!(f, "Invalid intensity: {value}. Must be between 1 and 7 or empty")
            }
            Self::InvalidAvatarType(content_type) => {
                write!(
                    f,
                    "Invalid avatar type '{content_type}'. Allowed: JPEG, PNG, WebP"
                )
            }
            Self::EventOutsideCycle {
                event_date,
                cycle_start,
                cycle_end,
            } => {
                write!(
                    f,
                    "Date {event_date} is not within the current 12-week cycle ({cycle_start} to {cycle_end})"
                )
            }
            Self::EventNotInCurrentWeek {
                event_date,
                event_week,
                current_week,
            } => {
                write!(
                    f,
                    "Date {event_date} falls in week {event_week}; points can only be logged for the current week ({current_week}, Monday to Sunday)"
                )
            }
            Self::RuleInactive { rule_id } => {
                write!(f, "Rule {rule_id} is inactive and cannot be used")
            }
            Self::OwnerCannotLeave { remaining_members } => {
                write!(
                    f,
                    "The owner cannot leave while {remaining_members} other member(s) remain"
                )
            }
            Self::OwnerCannotRemoveSelf => {
                write!(f, "The owner cannot remove themself from the group")
            }
        }
    }
}

impl std::error::Error for DomainError {}
