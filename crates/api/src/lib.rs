// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for weighcrew.
//!
//! Handlers validate requests with the domain rules, enforce group
//! membership and ownership, and translate domain and persistence errors
//! into [`ApiError`]. Transport concerns live in the server crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod clock;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_training_entry, add_weigh_in, clear_avatar, create_group, create_rule, create_sport_type,
    cycle_summary, delete_rule, delete_training_entry, delete_weigh_in, get_group,
    group_dashboard, join_group, leave_group, list_cycle_events, list_members, list_rules,
    list_sport_types, list_training_entries, list_weigh_ins, locate_cycle, log_event, login,
    logout, regenerate_group_code, register, remove_member, rename_group, set_active_group,
    set_avatar, set_cycle_anchor, set_rule_active, set_sport_type_active, training_week_view,
    update_display_name, update_rule_points, update_rule_title, update_target_weight,
    update_training_entry, update_weigh_in, weigh_in_dashboard, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
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
