// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the persistence layer explicitly. Handlers that
//! depend on "today" receive it as an argument so callers control the clock.

use num_traits::cast::ToPrimitive;
use std::collections::HashMap;
use time::Date;
use tracing::info;
use weighcrew_domain::{
    ChartWindow, CycleCalendar, CycleSummary, CycleWindow, DomainError, GroupChartRow, Member,
    MemberLatest, MemberRole, PointEvent, RECENT_ENTRIES_PER_MEMBER, TRAINING_LIST_LIMIT,
    TrainingFields, TrainingKpis, TrainingSession, TrainingWeek, UNKNOWN_SPORT, WeighIn,
    WeighInStats, avatar_storage_path, distinct_dates_desc, format_calendar_date,
    group_chart_rows, latest_per_member, parse_calendar_date, recent_entries, summarize_cycle,
    training_kpis, training_week, validate_avatar_content_type, validate_display_name,
    validate_group_name, validate_join_code, validate_rule_title, validate_sport_type_name,
    validate_target_weight, validate_training_fields, validate_weight, weigh_in_stats,
};
use weighcrew_persistence::{
    GroupData, MemberData, NewPotatoEvent, Persistence, PotatoEventData, PotatoRuleData,
    SportTypeData, TrainingEntryData, TrainingEntryValues, UserData, WeighInData,
};

use crate::auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    AddWeighInRequest, AvatarResponse, ChartPageInfo, CreateGroupRequest, CreateRuleRequest,
    CreateSportTypeRequest, CycleEventsResponse, CycleInfo, CycleSummaryResponse, EventInfo,
    GroupChartRowInfo, GroupDashboardResponse, GroupInfo, JoinGroupRequest, ListMembersResponse,
    ListRulesResponse, ListSportTypesResponse, ListTrainingEntriesResponse, ListWeighInsResponse,
    LogEventRequest, LoginRequest, LoginResponse, MemberInfo, MemberLatestInfo, MemberRecentInfo,
    ProfileResponse, RegisterRequest, RegisterResponse, RenameGroupRequest, RuleInfo,
    SetActiveGroupRequest, SetActiveRequest, SetAvatarRequest, SetCycleAnchorRequest,
    SportTypeInfo, TrainingEntryInfo, TrainingEntryRequest, TrainingWeekResponse,
    UpdateDisplayNameRequest, UpdateRulePointsRequest, UpdateRuleTitleRequest,
    UpdateTargetWeightRequest, UpdateWeighInRequest, WeekPointsInfo, WeighInDashboardResponse,
    WeighInInfo,
};

/// Symbols used for generated group codes.
///
/// Excludes `I`, `O`, `0` and `1`, which are easily confused.
const GROUP_CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of generated group codes.
const GROUP_CODE_LENGTH: usize = 6;

/// Attempts before code generation gives up on collisions.
const GROUP_CODE_ATTEMPTS: usize = 16;

// ============================================================================
// Conversions
// ============================================================================

fn weigh_in_from_data(data: &WeighInData) -> WeighIn {
    WeighIn {
        id: data.weigh_in_id,
        user_id: data.user_id,
        entry_date: data.entry_date,
        weight_kg: data.weight_kg,
    }
}

fn weigh_in_info(entry: &WeighIn) -> WeighInInfo {
    WeighInInfo {
        weigh_in_id: entry.id,
        entry_date: format_calendar_date(entry.entry_date),
        weight_kg: entry.weight_kg,
    }
}

fn member_from_data(data: MemberData) -> Member {
    Member::new(
        data.user_id,
        data.display_name.as_deref(),
        data.avatar_url,
        data.role,
    )
}

fn member_info(member: &Member) -> MemberInfo {
    MemberInfo {
        user_id: member.user_id,
        display_name: member.display_name.clone(),
        avatar_url: member.avatar_url.clone(),
        role: member.role.to_string(),
    }
}

fn group_info(group: &GroupData, role: MemberRole) -> GroupInfo {
    GroupInfo {
        group_id: group.group_id,
        name: group.name.clone(),
        code: group.code.clone(),
        owner_user_id: group.owner_user_id,
        cycle_anchor: group.cycle_anchor.map(format_calendar_date),
        role: role.to_string(),
    }
}

fn rule_info(rule: &PotatoRuleData) -> RuleInfo {
    RuleInfo {
        rule_id: rule.rule_id,
        title: rule.title.clone(),
        points: rule.points,
        is_active: rule.is_active,
    }
}

fn event_info(event: &PotatoEventData) -> EventInfo {
    EventInfo {
        event_id: event.event_id,
        user_id: event.user_id,
        rule_id: event.rule_id,
        rule_title: event.rule_title.clone(),
        occurred_on: format_calendar_date(event.occurred_on),
        points: event.points,
        note: event.note.clone(),
    }
}

fn point_event(event: &PotatoEventData) -> PointEvent {
    PointEvent {
        id: event.event_id,
        user_id: event.user_id,
        rule_id: event.rule_id,
        occurred_on: event.occurred_on,
        points: event.points,
        note: event.note.clone(),
    }
}

fn cycle_info(calendar: &CycleCalendar, window: &CycleWindow) -> CycleInfo {
    CycleInfo {
        anchor: format_calendar_date(calendar.anchor()),
        cycle_start: format_calendar_date(window.cycle_start),
        cycle_end: format_calendar_date(window.cycle_end),
        cycle_index: window.cycle_index,
        week_number: window.week_number,
        week_start: format_calendar_date(window.week_start),
        week_end: format_calendar_date(window.week_end),
        before_anchor: window.before_anchor,
    }
}

fn sport_type_info(sport: &SportTypeData) -> SportTypeInfo {
    SportTypeInfo {
        sport_type_id: sport.sport_type_id,
        name: sport.name.clone(),
        is_active: sport.is_active,
    }
}

fn training_session(entry: TrainingEntryData) -> TrainingSession {
    TrainingSession {
        id: entry.entry_id,
        user_id: entry.user_id,
        sport_type_id: entry.sport_type_id,
        sport_name: entry.sport_name,
        occurred_on: entry.occurred_on,
        duration_min: entry.duration_min,
        distance_km: entry.distance_km,
        intensity: entry.intensity,
        note: entry.note,
    }
}

fn training_entry_info(session: &TrainingSession) -> TrainingEntryInfo {
    TrainingEntryInfo {
        entry_id: session.id,
        sport_type_id: session.sport_type_id,
        sport_name: session
            .sport_name
            .clone()
            .unwrap_or_else(|| String::from(UNKNOWN_SPORT)),
        occurred_on: format_calendar_date(session.occurred_on),
        duration_min: session.duration_min,
        distance_km: session.distance_km,
        intensity: session.intensity,
        note: session.note.clone(),
    }
}

fn chart_page_info(window: &ChartWindow) -> ChartPageInfo {
    ChartPageInfo {
        offset: window.effective_offset(),
        max_offset: window.max_offset(),
        page_count: window.page_count(),
        current_page: window.current_page(),
        older_offset: window.older(),
        newer_offset: window.newer(),
    }
}

fn load_user(persistence: &mut Persistence, user_id: i64) -> Result<UserData, ApiError> {
    persistence
        .get_user_by_id(user_id)
        .map_err(|e| translate_persistence_error(e, "User"))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {user_id} does not exist"),
        })
}

fn points_from_request(points: i64) -> Result<i32, ApiError> {
    points.to_i32().ok_or_else(|| ApiError::InvalidInput {
        field: String::from("points"),
        message: format!("Points value {points} is out of range"),
    })
}

fn trimmed_note(note: Option<&str>) -> Option<&str> {
    note.map(str::trim).filter(|n| !n.is_empty())
}

// ============================================================================
// Accounts
// ============================================================================

/// Creates an account.
///
/// # Errors
///
/// Returns an error if validation fails, the login name is taken or the
/// password breaks the password policy.
pub fn register(
    persistence: &mut Persistence,
    request: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    let user: UserData = AuthenticationService::register(
        persistence,
        &request.login_name,
        &request.display_name,
        &request.password,
        &request.password_confirmation,
    )?;

    Ok(RegisterResponse {
        user_id: user.user_id,
        login_name: user.login_name,
        display_name: user.display_name.unwrap_or_default(),
    })
}

/// Authenticates and creates a session.
///
/// # Errors
///
/// Returns an error if the credentials are wrong or the session cannot be
/// stored.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, expires_at, user) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    Ok(LoginResponse {
        session_token,
        login_name: user.login_name,
        display_name: user.display_name,
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the caller's profile, including the active group's name.
///
/// # Errors
///
/// Returns an error if the user or their active group cannot be loaded.
pub fn whoami(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
) -> Result<ProfileResponse, ApiError> {
    let data: UserData = load_user(persistence, user.user_id)?;
    let active_group_name: Option<String> = match data.active_group_id {
        Some(group_id) => persistence
            .get_group_by_id(group_id)
            .map_err(|e| translate_persistence_error(e, "Group"))?
            .map(|g| g.name),
        None => None,
    };

    Ok(ProfileResponse {
        user_id: data.user_id,
        login_name: data.login_name,
        display_name: data.display_name,
        target_weight_kg: data.target_weight_kg,
        avatar_url: data.avatar_url,
        active_group_id: data.active_group_id,
        active_group_name,
    })
}

// ============================================================================
// Profile
// ============================================================================

/// Changes the caller's display name.
///
/// # Errors
///
/// Returns an error if the trimmed name is shorter than two characters.
pub fn update_display_name(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &UpdateDisplayNameRequest,
) -> Result<ProfileResponse, ApiError> {
    let name: String = validate_display_name(&request.display_name)?;
    persistence
        .update_display_name(user.user_id, &name)
        .map_err(|e| translate_persistence_error(e, "User"))?;
    whoami(persistence, user)
}

/// Sets or clears the caller's target weight.
///
/// # Errors
///
/// Returns an error if a target is given and is not a positive number.
pub fn update_target_weight(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &UpdateTargetWeightRequest,
) -> Result<ProfileResponse, ApiError> {
    let target: Option<f64> = request
        .target_weight_kg
        .map(validate_target_weight)
        .transpose()?;
    persistence
        .update_target_weight(user.user_id, target)
        .map_err(|e| translate_persistence_error(e, "User"))?;
    whoami(persistence, user)
}

/// Records a freshly uploaded avatar.
///
/// The response carries the storage path of the previous avatar so the
/// caller can delete the object.
///
/// # Errors
///
/// Returns an error if the image type is not accepted.
pub fn set_avatar(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &SetAvatarRequest,
) -> Result<AvatarResponse, ApiError> {
    validate_avatar_content_type(&request.content_type)?;
    let url: &str = request.public_url.trim();
    if url.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("public_url"),
            message: String::from("Avatar URL must not be empty"),
        });
    }

    let previous: Option<String> = persistence
        .replace_avatar_url(user.user_id, Some(url))
        .map_err(|e| translate_persistence_error(e, "User"))?;

    Ok(AvatarResponse {
        avatar_url: Some(url.to_string()),
        removed_storage_path: previous
            .as_deref()
            .filter(|old| *old != url)
            .and_then(avatar_storage_path)
            .map(String::from),
    })
}

/// Removes the caller's avatar.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn clear_avatar(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
) -> Result<AvatarResponse, ApiError> {
    let previous: Option<String> = persistence
        .replace_avatar_url(user.user_id, None)
        .map_err(|e| translate_persistence_error(e, "User"))?;

    Ok(AvatarResponse {
        avatar_url: None,
        removed_storage_path: previous
            .as_deref()
            .and_then(avatar_storage_path)
            .map(String::from),
    })
}

/// Switches the caller's active group.
///
/// # Errors
///
/// Returns an error if the caller is not a member of the group.
pub fn set_active_group(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &SetActiveGroupRequest,
) -> Result<ProfileResponse, ApiError> {
    AuthorizationService::require_member(persistence, user, request.group_id, "set_active_group")?;
    persistence
        .set_active_group(user.user_id, Some(request.group_id))
        .map_err(|e| translate_persistence_error(e, "User"))?;
    whoami(persistence, user)
}

// ============================================================================
// Weigh-ins
// ============================================================================

/// Records a weigh-in for the caller.
///
/// # Errors
///
/// Returns an error if:
/// - The date or weight is invalid
/// - The caller already weighed in on that date
pub fn add_weigh_in(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &AddWeighInRequest,
) -> Result<WeighInInfo, ApiError> {
    let entry_date: Date = parse_calendar_date(&request.entry_date)?;
    let weight_kg: f64 = validate_weight(request.weight_kg)?;

    let exists: bool = persistence
        .weigh_in_exists(user.user_id, entry_date)
        .map_err(|e| translate_persistence_error(e, "Weigh-in"))?;
    if exists {
        return Err(DomainError::DuplicateWeighIn { entry_date }.into());
    }

    let weigh_in_id: i64 = persistence
        .insert_weigh_in(user.user_id, entry_date, weight_kg)
        .map_err(|e| translate_persistence_error(e, "Weigh-in"))?;

    info!(user_id = user.user_id, weigh_in_id, %entry_date, "Recorded weigh-in");

    Ok(WeighInInfo {
        weigh_in_id,
        entry_date: format_calendar_date(entry_date),
        weight_kg,
    })
}

/// Corrects the weight of one of the caller's entries.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the entry is not the caller's.
pub fn update_weigh_in(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    weigh_in_id: i64,
    request: &UpdateWeighInRequest,
) -> Result<(), ApiError> {
    let weight_kg: f64 = validate_weight(request.weight_kg)?;
    persistence
        .update_weigh_in_weight(user.user_id, weigh_in_id, weight_kg)
        .map_err(|e| translate_persistence_error(e, "Weigh-in"))
}

/// Deletes one of the caller's entries.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the entry is not the caller's.
pub fn delete_weigh_in(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    weigh_in_id: i64,
) -> Result<(), ApiError> {
    persistence
        .delete_weigh_in(user.user_id, weigh_in_id)
        .map_err(|e| translate_persistence_error(e, "Weigh-in"))
}

fn own_weigh_ins(
    persistence: &mut Persistence,
    user_id: i64,
) -> Result<Vec<WeighIn>, ApiError> {
    Ok(persistence
        .list_weigh_ins_for_user(user_id)
        .map_err(|e| translate_persistence_error(e, "Weigh-in"))?
        .iter()
        .map(weigh_in_from_data)
        .collect())
}

/// Lists the caller's entries, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_weigh_ins(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
) -> Result<ListWeighInsResponse, ApiError> {
    let entries: Vec<WeighIn> = own_weigh_ins(persistence, user.user_id)?;
    Ok(ListWeighInsResponse {
        entries: entries.iter().map(weigh_in_info).collect(),
    })
}

/// Builds the personal dashboard with the chart page at `offset`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn weigh_in_dashboard(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    offset: usize,
) -> Result<WeighInDashboardResponse, ApiError> {
    let data: UserData = load_user(persistence, user.user_id)?;
    let entries: Vec<WeighIn> = own_weigh_ins(persistence, user.user_id)?;
    let stats: WeighInStats = weigh_in_stats(&entries, data.target_weight_kg);

    let window: ChartWindow = ChartWindow::new(entries.len(), offset);
    let chart_points: Vec<WeighInInfo> = window
        .slice(&entries)
        .iter()
        .rev()
        .map(weigh_in_info)
        .collect();

    Ok(WeighInDashboardResponse {
        latest: stats.latest.as_ref().map(weigh_in_info),
        previous_week: stats.previous_week.as_ref().map(weigh_in_info),
        target_weight_kg: data.target_weight_kg,
        diff_to_goal: stats.diff_to_goal,
        diff_to_previous_week: stats.diff_to_previous_week,
        chart: chart_page_info(&window),
        chart_points,
    })
}

// ============================================================================
// Groups
// ============================================================================

/// Generates a random group code from [`GROUP_CODE_ALPHABET`].
fn generate_group_code() -> String {
    (0..GROUP_CODE_LENGTH)
        .map(|_| {
            // 32 symbols divide 2^64 evenly, so the modulo is unbiased.
            let index: usize = (rand::random::<u64>() % 32).to_usize().unwrap_or(0);
            char::from(GROUP_CODE_ALPHABET[index])
        })
        .collect()
}

fn unused_group_code(persistence: &mut Persistence) -> Result<String, ApiError> {
    for _ in 0..GROUP_CODE_ATTEMPTS {
        let code: String = generate_group_code();
        let taken: bool = persistence
            .group_code_exists(&code)
            .map_err(|e| translate_persistence_error(e, "Group"))?;
        if !taken {
            return Ok(code);
        }
    }
    Err(ApiError::Internal {
        message: String::from("Could not generate an unused group code"),
    })
}

/// Creates a group owned by the caller and makes it their active group.
///
/// # Errors
///
/// Returns an error if the name is invalid or no free code can be found.
pub fn create_group(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &CreateGroupRequest,
) -> Result<GroupInfo, ApiError> {
    let name: String = validate_group_name(&request.name)?;
    let code: String = unused_group_code(persistence)?;

    let group_id: i64 = persistence
        .create_group(user.user_id, &name, &code)
        .map_err(|e| translate_persistence_error(e, "Group"))?;

    info!(user_id = user.user_id, group_id, "Created group");

    get_group(persistence, user, group_id)
}

/// Returns one of the caller's groups.
///
/// # Errors
///
/// Returns an error if the group does not exist or the caller is not a member.
pub fn get_group(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<GroupInfo, ApiError> {
    let (group, role) =
        AuthorizationService::require_member(persistence, user, group_id, "get_group")?;
    Ok(group_info(&group, role))
}

/// Joins a group by its code. Joining twice is harmless.
///
/// # Errors
///
/// Returns an error if the code is malformed or unknown.
pub fn join_group(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    request: &JoinGroupRequest,
) -> Result<GroupInfo, ApiError> {
    let code: String = validate_join_code(&request.code)?;
    let group: GroupData = persistence
        .get_group_by_code(&code)
        .map_err(|e| translate_persistence_error(e, "Group"))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Group"),
            message: format!("No group uses code '{code}'"),
        })?;

    persistence
        .join_group(group.group_id, user.user_id)
        .map_err(|e| translate_persistence_error(e, "Group"))?;

    info!(user_id = user.user_id, group_id = group.group_id, "Joined group");

    get_group(persistence, user, group.group_id)
}

/// Leaves a group.
///
/// # Errors
///
/// Returns an error if the caller is the owner and others remain.
pub fn leave_group(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<(), ApiError> {
    let (_, role) =
        AuthorizationService::require_member(persistence, user, group_id, "leave_group")?;

    if role == MemberRole::Owner {
        let total: i64 = persistence
            .count_members(group_id)
            .map_err(|e| translate_persistence_error(e, "Group"))?;
        let remaining_members: usize = (total - 1).to_usize().unwrap_or(0);
        if remaining_members > 0 {
            return Err(DomainError::OwnerCannotLeave { remaining_members }.into());
        }
    }

    persistence
        .remove_member(group_id, user.user_id)
        .map_err(|e| translate_persistence_error(e, "Membership"))?;

    info!(user_id = user.user_id, group_id, "Left group");
    Ok(())
}

/// Renames a group. Owner only.
///
/// # Errors
///
/// Returns an error if the caller is not the owner or the name is invalid.
pub fn rename_group(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    request: &RenameGroupRequest,
) -> Result<GroupInfo, ApiError> {
    AuthorizationService::require_owner(persistence, user, group_id, "rename_group")?;
    let name: String = validate_group_name(&request.name)?;
    persistence
        .rename_group(group_id, &name)
        .map_err(|e| translate_persistence_error(e, "Group"))?;
    get_group(persistence, user, group_id)
}

/// Replaces the join code with a fresh one. Owner only.
///
/// # Errors
///
/// Returns an error if the caller is not the owner.
pub fn regenerate_group_code(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<GroupInfo, ApiError> {
    AuthorizationService::require_owner(persistence, user, group_id, "regenerate_group_code")?;
    let code: String = unused_group_code(persistence)?;
    persistence
        .update_group_code(group_id, &code)
        .map_err(|e| translate_persistence_error(e, "Group"))?;

    info!(group_id, "Regenerated group code");

    get_group(persistence, user, group_id)
}

/// Removes another member. Owner only.
///
/// # Errors
///
/// Returns an error if the caller is not the owner, targets themself or the
/// target is not a member.
pub fn remove_member(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    member_user_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::require_owner(persistence, user, group_id, "remove_member")?;
    if member_user_id == user.user_id {
        return Err(DomainError::OwnerCannotRemoveSelf.into());
    }

    persistence
        .remove_member(group_id, member_user_id)
        .map_err(|e| translate_persistence_error(e, "Membership"))?;

    info!(group_id, member_user_id, "Removed member");
    Ok(())
}

/// Sets or clears the group's cycle anchor. Owner only.
///
/// # Errors
///
/// Returns an error if the caller is not the owner or the date is malformed.
pub fn set_cycle_anchor(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    request: &SetCycleAnchorRequest,
) -> Result<GroupInfo, ApiError> {
    AuthorizationService::require_owner(persistence, user, group_id, "set_cycle_anchor")?;
    let anchor: Option<Date> = request
        .anchor
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(parse_calendar_date)
        .transpose()?;

    persistence
        .set_cycle_anchor(group_id, anchor)
        .map_err(|e| translate_persistence_error(e, "Group"))?;
    get_group(persistence, user, group_id)
}

fn group_members(persistence: &mut Persistence, group_id: i64) -> Result<Vec<Member>, ApiError> {
    Ok(persistence
        .list_members(group_id)
        .map_err(|e| translate_persistence_error(e, "Group"))?
        .into_iter()
        .map(member_from_data)
        .collect())
}

/// Lists the members of a group.
///
/// # Errors
///
/// Returns an error if the caller is not a member.
pub fn list_members(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<ListMembersResponse, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "list_members")?;
    let members: Vec<Member> = group_members(persistence, group_id)?;
    Ok(ListMembersResponse {
        group_id,
        members: members.iter().map(member_info).collect(),
    })
}

/// Builds the group dashboard with the chart page at `offset`.
///
/// # Errors
///
/// Returns an error if the caller is not a member.
pub fn group_dashboard(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    offset: usize,
) -> Result<GroupDashboardResponse, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "group_dashboard")?;
    let members: Vec<Member> = group_members(persistence, group_id)?;
    let user_ids: Vec<i64> = members.iter().map(|m| m.user_id).collect();
    let entries: Vec<WeighIn> = persistence
        .list_weigh_ins_for_users(&user_ids)
        .map_err(|e| translate_persistence_error(e, "Weigh-in"))?
        .iter()
        .map(weigh_in_from_data)
        .collect();

    let dates: Vec<Date> = distinct_dates_desc(&entries);
    let window: ChartWindow = ChartWindow::new(dates.len(), offset);
    let rows: Vec<GroupChartRow> = group_chart_rows(&members, &entries, window.slice(&dates));

    let latest: Vec<MemberLatest> = latest_per_member(&members, &entries);

    Ok(GroupDashboardResponse {
        group_id,
        members: members.iter().map(member_info).collect(),
        latest: latest
            .iter()
            .map(|row| MemberLatestInfo {
                member: member_info(&row.member),
                latest: row.latest.as_ref().map(weigh_in_info),
            })
            .collect(),
        chart: chart_page_info(&window),
        chart_rows: rows
            .iter()
            .rev()
            .map(|row| GroupChartRowInfo {
                entry_date: format_calendar_date(row.entry_date),
                values: row.values.clone(),
            })
            .collect(),
        recent: members
            .iter()
            .map(|m| MemberRecentInfo {
                user_id: m.user_id,
                entries: recent_entries(&entries, m.user_id, RECENT_ENTRIES_PER_MEMBER)
                    .iter()
                    .map(weigh_in_info)
                    .collect(),
            })
            .collect(),
    })
}

// ============================================================================
// Potato points
// ============================================================================

/// Lists the group's rules.
///
/// # Errors
///
/// Returns an error if the caller is not a member.
pub fn list_rules(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<ListRulesResponse, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "list_rules")?;
    let rules: Vec<PotatoRuleData> = persistence
        .list_rules(group_id)
        .map_err(|e| translate_persistence_error(e, "Rule"))?;
    Ok(ListRulesResponse {
        rules: rules.iter().map(rule_info).collect(),
    })
}

fn load_group_rule(
    persistence: &mut Persistence,
    group_id: i64,
    rule_id: i64,
) -> Result<PotatoRuleData, ApiError> {
    persistence
        .get_rule(rule_id)
        .map_err(|e| translate_persistence_error(e, "Rule"))?
        .filter(|rule| rule.group_id == group_id)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Rule"),
            message: format!("Rule {rule_id} does not exist in group {group_id}"),
        })
}

/// Creates a rule.
///
/// # Errors
///
/// Returns an error if the caller is not a member or the input is invalid.
pub fn create_rule(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    request: &CreateRuleRequest,
) -> Result<RuleInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "create_rule")?;
    let title: String = validate_rule_title(&request.title)?;
    let points: i32 = points_from_request(request.points)?;

    let rule_id: i64 = persistence
        .insert_rule(group_id, &title, points)
        .map_err(|e| translate_persistence_error(e, "Rule"))?;

    info!(group_id, rule_id, points, "Created rule");

    Ok(rule_info(&load_group_rule(persistence, group_id, rule_id)?))
}

/// Renames a rule.
///
/// # Errors
///
/// Returns an error if the rule is not in the group or the title is invalid.
pub fn update_rule_title(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    rule_id: i64,
    request: &UpdateRuleTitleRequest,
) -> Result<RuleInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "update_rule")?;
    let title: String = validate_rule_title(&request.title)?;
    persistence
        .update_rule_title(group_id, rule_id, &title)
        .map_err(|e| translate_persistence_error(e, "Rule"))?;
    Ok(rule_info(&load_group_rule(persistence, group_id, rule_id)?))
}

/// Changes a rule's points. Past events keep their snapshot.
///
/// # Errors
///
/// Returns an error if the rule is not in the group.
pub fn update_rule_points(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    rule_id: i64,
    request: &UpdateRulePointsRequest,
) -> Result<RuleInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "update_rule")?;
    let points: i32 = points_from_request(request.points)?;
    persistence
        .update_rule_points(group_id, rule_id, points)
        .map_err(|e| translate_persistence_error(e, "Rule"))?;
    Ok(rule_info(&load_group_rule(persistence, group_id, rule_id)?))
}

/// Activates or deactivates a rule.
///
/// # Errors
///
/// Returns an error if the rule is not in the group.
pub fn set_rule_active(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    rule_id: i64,
    request: &SetActiveRequest,
) -> Result<RuleInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "update_rule")?;
    persistence
        .set_rule_active(group_id, rule_id, request.is_active)
        .map_err(|e| translate_persistence_error(e, "Rule"))?;
    Ok(rule_info(&load_group_rule(persistence, group_id, rule_id)?))
}

/// Deletes a rule. Logged events keep their points.
///
/// # Errors
///
/// Returns an error if the rule is not in the group.
pub fn delete_rule(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    rule_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "delete_rule")?;
    persistence
        .delete_rule(group_id, rule_id)
        .map_err(|e| translate_persistence_error(e, "Rule"))?;

    info!(group_id, rule_id, "Deleted rule");
    Ok(())
}

/// Logs a potato event for the caller.
///
/// The rule's current points are copied onto the event. The date must fall
/// in the current week of the group's current cycle.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a member
/// - The rule is not in the group or is inactive
/// - The date is malformed or outside the current week
pub fn log_event(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    request: &LogEventRequest,
    today: Date,
    default_calendar: CycleCalendar,
) -> Result<EventInfo, ApiError> {
    let (group, _) =
        AuthorizationService::require_member(persistence, user, group_id, "log_event")?;

    let rule: PotatoRuleData = load_group_rule(persistence, group_id, request.rule_id)?;
    if !rule.is_active {
        return Err(DomainError::RuleInactive {
            rule_id: rule.rule_id,
        }
        .into());
    }

    let occurred_on: Date = parse_calendar_date(&request.occurred_on)?;
    let calendar: CycleCalendar =
        CycleCalendar::from_optional(group.cycle_anchor, default_calendar);
    calendar.validate_event_date(today, occurred_on)?;

    let note: Option<&str> = trimmed_note(request.note.as_deref());
    let event_id: i64 = persistence
        .insert_event(&NewPotatoEvent {
            group_id,
            user_id: user.user_id,
            rule_id: rule.rule_id,
            occurred_on,
            points: rule.points,
            note,
        })
        .map_err(|e| translate_persistence_error(e, "Event"))?;

    info!(
        group_id,
        user_id = user.user_id,
        event_id,
        points = rule.points,
        "Logged potato event"
    );

    Ok(EventInfo {
        event_id,
        user_id: user.user_id,
        rule_id: Some(rule.rule_id),
        rule_title: Some(rule.title),
        occurred_on: format_calendar_date(occurred_on),
        points: rule.points,
        note: note.map(String::from),
    })
}

/// Places a day in the cycle calendar; `today` when no date is given.
///
/// # Errors
///
/// Returns an error if the date is malformed.
pub fn locate_cycle(
    calendar: CycleCalendar,
    date: Option<&str>,
    today: Date,
) -> Result<CycleInfo, ApiError> {
    let date: Date = date.map(parse_calendar_date).transpose()?.unwrap_or(today);
    Ok(cycle_info(&calendar, &calendar.locate(date)))
}

fn current_cycle_events(
    persistence: &mut Persistence,
    group: &GroupData,
    today: Date,
    default_calendar: CycleCalendar,
) -> Result<(CycleCalendar, CycleWindow, Vec<PotatoEventData>), ApiError> {
    let calendar: CycleCalendar =
        CycleCalendar::from_optional(group.cycle_anchor, default_calendar);
    let window: CycleWindow = calendar.locate(today);
    let events: Vec<PotatoEventData> = persistence
        .list_events_in_range(group.group_id, window.cycle_start, window.cycle_end)
        .map_err(|e| translate_persistence_error(e, "Event"))?;
    Ok((calendar, window, events))
}

/// Lists the group's events of the current cycle.
///
/// # Errors
///
/// Returns an error if the caller is not a member.
pub fn list_cycle_events(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    today: Date,
    default_calendar: CycleCalendar,
) -> Result<CycleEventsResponse, ApiError> {
    let (group, _) =
        AuthorizationService::require_member(persistence, user, group_id, "list_events")?;
    let (calendar, window, events) =
        current_cycle_events(persistence, &group, today, default_calendar)?;

    Ok(CycleEventsResponse {
        cycle: cycle_info(&calendar, &window),
        events: events.iter().map(event_info).collect(),
    })
}

/// Summarises one member's points over the current cycle.
///
/// # Errors
///
/// Returns an error if the caller or the target is not a member.
pub fn cycle_summary(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    member_user_id: i64,
    today: Date,
    default_calendar: CycleCalendar,
) -> Result<CycleSummaryResponse, ApiError> {
    let (group, _) =
        AuthorizationService::require_member(persistence, user, group_id, "cycle_summary")?;
    let is_member: bool = persistence
        .get_member_role(group_id, member_user_id)
        .map_err(|e| translate_persistence_error(e, "Membership"))?
        .is_some();
    if !is_member {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Member"),
            message: format!("User {member_user_id} is not a member of group {group_id}"),
        });
    }

    let (calendar, window, events) =
        current_cycle_events(persistence, &group, today, default_calendar)?;
    let own: Vec<&PotatoEventData> = events
        .iter()
        .filter(|e| e.user_id == member_user_id)
        .collect();
    let points: Vec<PointEvent> = own.iter().map(|e| point_event(e)).collect();
    let summary: CycleSummary = summarize_cycle(&window, &points);

    let by_id: HashMap<i64, &PotatoEventData> = own.iter().map(|e| (e.event_id, *e)).collect();

    Ok(CycleSummaryResponse {
        user_id: member_user_id,
        cycle: cycle_info(&calendar, &window),
        weeks: summary
            .weeks
            .iter()
            .map(|w| WeekPointsInfo {
                week_number: w.week_number,
                week_start: format_calendar_date(w.week_start),
                week_end: format_calendar_date(w.week_end),
                points: w.points,
            })
            .collect(),
        cycle_total: summary.cycle_total,
        current_week_points: summary.current_week_points,
        current_week_events: summary
            .current_week_events
            .iter()
            .filter_map(|e| by_id.get(&e.id).map(|data| event_info(data)))
            .collect(),
    })
}

// ============================================================================
// Training
// ============================================================================

/// Lists the group's sport types by name.
///
/// # Errors
///
/// Returns an error if the caller is not a member.
pub fn list_sport_types(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<ListSportTypesResponse, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "list_sport_types")?;
    let sport_types: Vec<SportTypeData> = persistence
        .list_sport_types(group_id)
        .map_err(|e| translate_persistence_error(e, "Sport type"))?;
    Ok(ListSportTypesResponse {
        sport_types: sport_types.iter().map(sport_type_info).collect(),
    })
}

fn load_group_sport_type(
    persistence: &mut Persistence,
    group_id: i64,
    sport_type_id: i64,
) -> Result<SportTypeData, ApiError> {
    persistence
        .get_sport_type(sport_type_id)
        .map_err(|e| translate_persistence_error(e, "Sport type"))?
        .filter(|sport| sport.group_id == group_id)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Sport type"),
            message: format!("Sport type {sport_type_id} does not exist in group {group_id}"),
        })
}

/// Creates a sport type; names are unique per group.
///
/// # Errors
///
/// Returns an error if the name is invalid or already used in the group.
pub fn create_sport_type(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    request: &CreateSportTypeRequest,
) -> Result<SportTypeInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "create_sport_type")?;
    let name: String = validate_sport_type_name(&request.name)?;

    let taken: bool = persistence
        .sport_type_name_exists(group_id, &name)
        .map_err(|e| translate_persistence_error(e, "Sport type"))?;
    if taken {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_sport_type"),
            message: format!("Sport type '{name}' already exists in this group"),
        });
    }

    let sport_type_id: i64 = persistence
        .insert_sport_type(group_id, &name)
        .map_err(|e| translate_persistence_error(e, "Sport type"))?;

    info!(group_id, sport_type_id, "Created sport type");

    Ok(sport_type_info(&load_group_sport_type(
        persistence,
        group_id,
        sport_type_id,
    )?))
}

/// Activates or deactivates a sport type.
///
/// # Errors
///
/// Returns an error if the sport type is not in the group.
pub fn set_sport_type_active(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    sport_type_id: i64,
    request: &SetActiveRequest,
) -> Result<SportTypeInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "update_sport_type")?;
    persistence
        .set_sport_type_active(group_id, sport_type_id, request.is_active)
        .map_err(|e| translate_persistence_error(e, "Sport type"))?;
    Ok(sport_type_info(&load_group_sport_type(
        persistence,
        group_id,
        sport_type_id,
    )?))
}

/// Validated entry fields plus the resolved sport type.
struct CheckedEntry {
    sport: SportTypeData,
    occurred_on: Date,
    fields: TrainingFields,
}

impl CheckedEntry {
    fn values(&self) -> TrainingEntryValues<'_> {
        TrainingEntryValues {
            sport_type_id: self.sport.sport_type_id,
            occurred_on: self.occurred_on,
            duration_min: self.fields.duration_min,
            distance_km: self.fields.distance_km,
            intensity: self.fields.intensity,
            note: self.fields.note.as_deref(),
        }
    }

    fn into_info(self, entry_id: i64) -> TrainingEntryInfo {
        TrainingEntryInfo {
            entry_id,
            sport_type_id: self.sport.sport_type_id,
            sport_name: self.sport.name,
            occurred_on: format_calendar_date(self.occurred_on),
            duration_min: self.fields.duration_min,
            distance_km: self.fields.distance_km,
            intensity: self.fields.intensity,
            note: self.fields.note,
        }
    }
}

fn check_training_entry(
    persistence: &mut Persistence,
    group_id: i64,
    request: &TrainingEntryRequest,
) -> Result<CheckedEntry, ApiError> {
    let occurred_on: Date = parse_calendar_date(&request.occurred_on)?;
    let fields: TrainingFields = validate_training_fields(
        request.duration_min,
        request.distance_km,
        request.intensity,
        request.note.as_deref(),
    )?;
    let sport: SportTypeData = load_group_sport_type(persistence, group_id, request.sport_type_id)?;

    Ok(CheckedEntry {
        sport,
        occurred_on,
        fields,
    })
}

/// Records a training session for the caller.
///
/// # Errors
///
/// Returns an error if the fields are invalid or the sport type is not in
/// the group.
pub fn add_training_entry(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    request: &TrainingEntryRequest,
) -> Result<TrainingEntryInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "add_training_entry")?;
    let checked: CheckedEntry = check_training_entry(persistence, group_id, request)?;

    let entry_id: i64 = persistence
        .insert_training_entry(group_id, user.user_id, &checked.values())
        .map_err(|e| translate_persistence_error(e, "Training entry"))?;

    info!(group_id, user_id = user.user_id, entry_id, "Recorded training entry");

    Ok(checked.into_info(entry_id))
}

/// Replaces one of the caller's training entries.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the entry is not the caller's.
pub fn update_training_entry(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    entry_id: i64,
    request: &TrainingEntryRequest,
) -> Result<TrainingEntryInfo, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "update_training_entry")?;
    let checked: CheckedEntry = check_training_entry(persistence, group_id, request)?;

    persistence
        .update_training_entry(user.user_id, entry_id, &checked.values())
        .map_err(|e| translate_persistence_error(e, "Training entry"))?;

    Ok(checked.into_info(entry_id))
}

/// Deletes one of the caller's training entries.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the entry is not the caller's.
pub fn delete_training_entry(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    entry_id: i64,
) -> Result<(), ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "delete_training_entry")?;
    persistence
        .delete_training_entry(user.user_id, entry_id)
        .map_err(|e| translate_persistence_error(e, "Training entry"))
}

fn own_training_sessions(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<Vec<TrainingSession>, ApiError> {
    Ok(persistence
        .list_training_entries(user.user_id, group_id, TRAINING_LIST_LIMIT)
        .map_err(|e| translate_persistence_error(e, "Training entry"))?
        .into_iter()
        .map(training_session)
        .collect())
}

/// Lists the caller's training entries in the group, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a member.
pub fn list_training_entries(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
) -> Result<ListTrainingEntriesResponse, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "list_training_entries")?;
    let sessions: Vec<TrainingSession> = own_training_sessions(persistence, user, group_id)?;
    Ok(ListTrainingEntriesResponse {
        entries: sessions.iter().map(training_entry_info).collect(),
    })
}

/// Builds the week view `offset` weeks back, with KPIs as of `today`.
///
/// # Errors
///
/// Returns an error if the caller is not a member.
pub fn training_week_view(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    offset: u32,
    today: Date,
) -> Result<TrainingWeekResponse, ApiError> {
    AuthorizationService::require_member(persistence, user, group_id, "training_week")?;
    let sessions: Vec<TrainingSession> = own_training_sessions(persistence, user, group_id)?;

    let week: TrainingWeek = training_week(today, offset, &sessions);
    let kpis: TrainingKpis = training_kpis(today, &sessions);

    Ok(TrainingWeekResponse {
        offset,
        week_start: format_calendar_date(week.week_start),
        week_end: format_calendar_date(week.week_end),
        entries: week.sessions.iter().map(training_entry_info).collect(),
        totals: week.totals,
        by_sport: week.by_sport,
        kpis,
    })
}
