// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;
use weighcrew_domain::MemberRole;

/// A registered user and their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub login_name: String,
    pub display_name: Option<String>,
    pub password_hash: String,
    pub target_weight_kg: Option<f64>,
    pub avatar_url: Option<String>,
    pub active_group_id: Option<i64>,
    pub created_at: String,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A group row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupData {
    pub group_id: i64,
    pub name: String,
    pub code: String,
    pub owner_user_id: i64,
    pub cycle_anchor: Option<Date>,
    pub created_at: String,
}

/// A group membership joined with the member's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberData {
    pub group_id: i64,
    pub user_id: i64,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: MemberRole,
}

/// A stored weigh-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighInData {
    pub weigh_in_id: i64,
    pub user_id: i64,
    pub entry_date: Date,
    pub weight_kg: f64,
}

/// A potato rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotatoRuleData {
    pub rule_id: i64,
    pub group_id: i64,
    pub title: String,
    pub points: i32,
    pub is_active: bool,
    pub created_at: String,
}

/// A logged potato event with the title of its rule, if the rule still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotatoEventData {
    pub event_id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub rule_id: Option<i64>,
    pub rule_title: Option<String>,
    pub occurred_on: Date,
    pub points: i32,
    pub note: Option<String>,
    pub created_at: String,
}

/// Values for a new potato event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPotatoEvent<'a> {
    pub group_id: i64,
    pub user_id: i64,
    pub rule_id: i64,
    pub occurred_on: Date,
    pub points: i32,
    pub note: Option<&'a str>,
}

/// A sport type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportTypeData {
    pub sport_type_id: i64,
    pub group_id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
}

/// A training entry with its sport name, if the sport type still resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingEntryData {
    pub entry_id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub sport_type_id: i64,
    pub sport_name: Option<String>,
    pub occurred_on: Date,
    pub duration_min: i32,
    pub distance_km: Option<f64>,
    pub intensity: Option<i32>,
    pub note: Option<String>,
    pub created_at: String,
}

/// Values for a new or updated training entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingEntryValues<'a> {
    pub sport_type_id: i64,
    pub occurred_on: Date,
    pub duration_min: i32,
    pub distance_km: Option<f64>,
    pub intensity: Option<i32>,
    pub note: Option<&'a str>,
}
