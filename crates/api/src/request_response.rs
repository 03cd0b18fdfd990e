// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Calendar days cross the boundary as `YYYY-MM-DD` strings.

use weighcrew_domain::{SportBreakdown, TrainingKpis, TrainingTotals};

// ============================================================================
// Accounts
// ============================================================================

/// API request to create an account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RegisterRequest {
    /// Login name; stored uppercase.
    pub login_name: String,
    /// Display name shown to other members.
    pub display_name: String,
    /// The password.
    pub password: String,
    /// Must equal `password`.
    pub password_confirmation: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
    /// The new user's ID.
    pub user_id: i64,
    /// Normalised login name.
    pub login_name: String,
    /// Display name.
    pub display_name: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LoginRequest {
    /// Login name (case-insensitive).
    pub login_name: String,
    /// The password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub session_token: String,
    /// Normalised login name.
    pub login_name: String,
    /// Display name, if set.
    pub display_name: Option<String>,
    /// Session expiry (ISO 8601).
    pub expires_at: String,
}

/// The caller's profile.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProfileResponse {
    /// The user's ID.
    pub user_id: i64,
    /// Normalised login name.
    pub login_name: String,
    /// Display name, if set.
    pub display_name: Option<String>,
    /// Target weight in kilograms.
    pub target_weight_kg: Option<f64>,
    /// Public avatar URL.
    pub avatar_url: Option<String>,
    /// Group the dashboards open on.
    pub active_group_id: Option<i64>,
    /// Name of the active group.
    pub active_group_name: Option<String>,
}

// ============================================================================
// Profile
// ============================================================================

/// API request to change the display name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UpdateDisplayNameRequest {
    /// The new display name.
    pub display_name: String,
}

/// API request to set or clear the target weight.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct UpdateTargetWeightRequest {
    /// The new target; `None` clears it.
    pub target_weight_kg: Option<f64>,
}

/// API request to record an uploaded avatar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SetAvatarRequest {
    /// MIME type of the uploaded image.
    pub content_type: String,
    /// Public URL of the stored object.
    pub public_url: String,
}

/// API response after replacing or clearing an avatar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvatarResponse {
    /// The avatar now on the profile.
    pub avatar_url: Option<String>,
    /// Storage path of the replaced object, for the caller to delete.
    pub removed_storage_path: Option<String>,
}

/// API request to switch the active group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct SetActiveGroupRequest {
    /// A group the caller belongs to.
    pub group_id: i64,
}

// ============================================================================
// Weigh-ins
// ============================================================================

/// API request to record a weigh-in.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct AddWeighInRequest {
    /// Day of the measurement.
    pub entry_date: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
}

/// API request to correct a weigh-in.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct UpdateWeighInRequest {
    /// Corrected weight in kilograms.
    pub weight_kg: f64,
}

/// A weigh-in.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeighInInfo {
    /// The entry ID.
    pub weigh_in_id: i64,
    /// Day of the measurement.
    pub entry_date: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
}

/// API response listing the caller's weigh-ins, newest first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListWeighInsResponse {
    /// The entries.
    pub entries: Vec<WeighInInfo>,
}

/// Position of a chart page within the newest-first date list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChartPageInfo {
    /// Offset actually used after clamping.
    pub offset: usize,
    /// Largest valid offset.
    pub max_offset: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Zero-based page of `offset`.
    pub current_page: usize,
    /// Offset of the next older page.
    pub older_offset: usize,
    /// Offset of the next newer page.
    pub newer_offset: usize,
}

/// Personal dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeighInDashboardResponse {
    /// Most recent entry.
    pub latest: Option<WeighInInfo>,
    /// Newest entry at least a week older than `latest`.
    pub previous_week: Option<WeighInInfo>,
    /// Target weight in kilograms.
    pub target_weight_kg: Option<f64>,
    /// `latest - target`.
    pub diff_to_goal: Option<f64>,
    /// `latest - previous_week`.
    pub diff_to_previous_week: Option<f64>,
    /// Chart page position.
    pub chart: ChartPageInfo,
    /// Chart points of the page, oldest first.
    pub chart_points: Vec<WeighInInfo>,
}

// ============================================================================
// Groups
// ============================================================================

/// API request to create a group.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,
}

/// API request to join a group.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct JoinGroupRequest {
    /// Join code as typed by the user.
    pub code: String,
}

/// API request to rename a group.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RenameGroupRequest {
    /// New group name.
    pub name: String,
}

/// API request to set or clear the group's cycle anchor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SetCycleAnchorRequest {
    /// Anchor day; `None` falls back to the server default.
    pub anchor: Option<String>,
}

/// A group as seen by one of its members.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GroupInfo {
    /// The group ID.
    pub group_id: i64,
    /// Group name.
    pub name: String,
    /// Join code.
    pub code: String,
    /// Owner's user ID.
    pub owner_user_id: i64,
    /// Group-specific cycle anchor, if set.
    pub cycle_anchor: Option<String>,
    /// The caller's role.
    pub role: String,
}

/// A group member.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemberInfo {
    /// The member's user ID.
    pub user_id: i64,
    /// Display name, `"—"` when blank.
    pub display_name: String,
    /// Public avatar URL.
    pub avatar_url: Option<String>,
    /// `owner` or `member`.
    pub role: String,
}

/// API response listing a group's members.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListMembersResponse {
    /// The group ID.
    pub group_id: i64,
    /// Members in join order.
    pub members: Vec<MemberInfo>,
}

/// A member with their newest weigh-in.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemberLatestInfo {
    /// The member.
    pub member: MemberInfo,
    /// Their newest entry.
    pub latest: Option<WeighInInfo>,
}

/// One date of the group chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupChartRowInfo {
    /// The date.
    pub entry_date: String,
    /// One value per member, in `members` order.
    pub values: Vec<Option<f64>>,
}

/// A member's most recent entries.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemberRecentInfo {
    /// The member's user ID.
    pub user_id: i64,
    /// Up to five entries, newest first.
    pub entries: Vec<WeighInInfo>,
}

/// Group dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupDashboardResponse {
    /// The group ID.
    pub group_id: i64,
    /// Chart columns.
    pub members: Vec<MemberInfo>,
    /// Newest entry per member, sorted by name.
    pub latest: Vec<MemberLatestInfo>,
    /// Chart page position.
    pub chart: ChartPageInfo,
    /// Chart rows of the page, oldest first.
    pub chart_rows: Vec<GroupChartRowInfo>,
    /// Last entries per member.
    pub recent: Vec<MemberRecentInfo>,
}

// ============================================================================
// Potato points
// ============================================================================

/// API request to create a rule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateRuleRequest {
    /// Rule title.
    pub title: String,
    /// Points per violation.
    pub points: i64,
}

/// API request to rename a rule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UpdateRuleTitleRequest {
    /// New title.
    pub title: String,
}

/// API request to change a rule's points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct UpdateRulePointsRequest {
    /// New points.
    pub points: i64,
}

/// API request to toggle a rule or sport type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct SetActiveRequest {
    /// New active flag.
    pub is_active: bool,
}

/// A potato rule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RuleInfo {
    /// The rule ID.
    pub rule_id: i64,
    /// Rule title.
    pub title: String,
    /// Points per violation.
    pub points: i32,
    /// Whether events may be logged against it.
    pub is_active: bool,
}

/// API response listing a group's rules.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListRulesResponse {
    /// Active first, then by points, then newest.
    pub rules: Vec<RuleInfo>,
}

/// API request to log a potato event for the caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LogEventRequest {
    /// The rule violated.
    pub rule_id: i64,
    /// Day of the violation.
    pub occurred_on: String,
    /// Optional note.
    pub note: Option<String>,
}

/// A logged potato event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventInfo {
    /// The event ID.
    pub event_id: i64,
    /// Who logged it.
    pub user_id: i64,
    /// The rule, unless deleted since.
    pub rule_id: Option<i64>,
    /// Title of the rule, unless deleted since.
    pub rule_title: Option<String>,
    /// Day of the violation.
    pub occurred_on: String,
    /// Points snapshot.
    pub points: i32,
    /// Optional note.
    pub note: Option<String>,
}

/// Where a day sits in the 12-week cycle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CycleInfo {
    /// Anchor the calendar used.
    pub anchor: String,
    /// First day of the cycle.
    pub cycle_start: String,
    /// Last day of the cycle.
    pub cycle_end: String,
    /// Zero-based cycle index.
    pub cycle_index: u32,
    /// Week number 1..=12.
    pub week_number: u8,
    /// Monday of the week.
    pub week_start: String,
    /// Sunday of the week.
    pub week_end: String,
    /// Whether the day precedes the anchor's week.
    pub before_anchor: bool,
}

/// API response listing the group's events of the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CycleEventsResponse {
    /// The current cycle.
    pub cycle: CycleInfo,
    /// Events, newest first.
    pub events: Vec<EventInfo>,
}

/// Points of one cycle week.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WeekPointsInfo {
    /// Week number 1..=12.
    pub week_number: u8,
    /// Monday.
    pub week_start: String,
    /// Sunday.
    pub week_end: String,
    /// Points collected.
    pub points: i64,
}

/// A member's standing in the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CycleSummaryResponse {
    /// The member summarised.
    pub user_id: i64,
    /// The current cycle.
    pub cycle: CycleInfo,
    /// Twelve rows, week 1 first.
    pub weeks: Vec<WeekPointsInfo>,
    /// Points over the whole cycle.
    pub cycle_total: i64,
    /// Points of the current week.
    pub current_week_points: i64,
    /// Events of the current week, newest first.
    pub current_week_events: Vec<EventInfo>,
}

// ============================================================================
// Training
// ============================================================================

/// API request to create a sport type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateSportTypeRequest {
    /// Sport name.
    pub name: String,
}

/// A sport type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SportTypeInfo {
    /// The sport type ID.
    pub sport_type_id: i64,
    /// Sport name.
    pub name: String,
    /// Whether new entries may use it.
    pub is_active: bool,
}

/// API response listing sport types by name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListSportTypesResponse {
    /// The sport types.
    pub sport_types: Vec<SportTypeInfo>,
}

/// API request to add or replace a training entry.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct TrainingEntryRequest {
    /// A sport type of the group.
    pub sport_type_id: i64,
    /// Day of the session.
    pub occurred_on: String,
    /// Whole minutes, > 0.
    pub duration_min: i64,
    /// Kilometres, >= 0.
    pub distance_km: Option<f64>,
    /// 1..=7.
    pub intensity: Option<i64>,
    /// Optional note.
    pub note: Option<String>,
}

/// A training entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrainingEntryInfo {
    /// The entry ID.
    pub entry_id: i64,
    /// The sport type ID.
    pub sport_type_id: i64,
    /// Sport name, `"—"` when it no longer resolves.
    pub sport_name: String,
    /// Day of the session.
    pub occurred_on: String,
    /// Minutes.
    pub duration_min: i32,
    /// Kilometres.
    pub distance_km: Option<f64>,
    /// 1..=7.
    pub intensity: Option<i32>,
    /// Note.
    pub note: Option<String>,
}

/// API response listing the caller's entries, newest first.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListTrainingEntriesResponse {
    /// The entries.
    pub entries: Vec<TrainingEntryInfo>,
}

/// Training week view with KPIs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrainingWeekResponse {
    /// Weeks back from the current week.
    pub offset: u32,
    /// Monday.
    pub week_start: String,
    /// Sunday.
    pub week_end: String,
    /// Entries of the week, newest first.
    pub entries: Vec<TrainingEntryInfo>,
    /// Week totals.
    pub totals: TrainingTotals,
    /// Per-sport totals, most minutes first.
    pub by_sport: Vec<SportBreakdown>,
    /// Rolling and all-time numbers.
    pub kpis: TrainingKpis,
}
