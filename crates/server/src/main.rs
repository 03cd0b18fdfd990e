// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::Date;
use tokio::sync::Mutex;
use tracing::{error, info};
use weighcrew_api::{
    AddWeighInRequest, ApiError, AvatarResponse, Clock, CreateGroupRequest, CreateRuleRequest,
    CreateSportTypeRequest, CycleEventsResponse, CycleInfo, CycleSummaryResponse, EventInfo,
    GroupDashboardResponse, GroupInfo, JoinGroupRequest, ListMembersResponse, ListRulesResponse,
    ListSportTypesResponse, ListTrainingEntriesResponse, ListWeighInsResponse, LogEventRequest,
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
    RenameGroupRequest, RuleInfo, SetActiveGroupRequest, SetActiveRequest, SetAvatarRequest,
    SetCycleAnchorRequest, SportTypeInfo, SystemClock, TrainingEntryInfo, TrainingEntryRequest,
    TrainingWeekResponse, UpdateDisplayNameRequest, UpdateRulePointsRequest,
    UpdateRuleTitleRequest, UpdateTargetWeightRequest, UpdateWeighInRequest,
    WeighInDashboardResponse, WeighInInfo, add_training_entry, add_weigh_in, clear_avatar,
    create_group, create_rule, create_sport_type, cycle_summary, delete_rule,
    delete_training_entry, delete_weigh_in, get_group, group_dashboard, join_group, leave_group,
    list_cycle_events, list_members, list_rules, list_sport_types, list_training_entries,
    list_weigh_ins, locate_cycle, log_event, login, logout, regenerate_group_code, register,
    remove_member, rename_group, set_active_group, set_avatar, set_cycle_anchor, set_rule_active,
    set_sport_type_active, training_week_view, update_display_name, update_rule_points,
    update_rule_title, update_target_weight, update_training_entry, update_weigh_in,
    weigh_in_dashboard, whoami,
};
use weighcrew_domain::{CycleCalendar, DEFAULT_CYCLE_ANCHOR, parse_calendar_date};
use weighcrew_persistence::Persistence;

use crate::session::SessionUser;

/// weighcrew server - HTTP server for group weigh-ins, potato points and training
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Cycle anchor (YYYY-MM-DD) for groups that have none of their own
    #[arg(long, default_value_t = DEFAULT_CYCLE_ANCHOR, value_parser = parse_anchor)]
    default_cycle_anchor: Date,

    /// Whole-hour UTC offset used to decide what "today" is
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    utc_offset_hours: i8,
}

fn parse_anchor(value: &str) -> Result<Date, String> {
    parse_calendar_date(value).map_err(|e| e.to_string())
}

/// Settings resolved from the command line.
#[derive(Debug, Clone, Copy)]
struct ServerConfig {
    /// Listen address.
    addr: SocketAddr,
    /// Calendar for groups without an anchor.
    default_calendar: CycleCalendar,
    /// Clock used for "today".
    clock: SystemClock,
}

impl ServerConfig {
    fn from_args(args: &Args) -> Result<Self, time::error::ComponentRange> {
        Ok(Self {
            addr: SocketAddr::new(args.bind, args.port),
            default_calendar: CycleCalendar::new(args.default_cycle_anchor),
            clock: SystemClock::from_hours(args.utc_offset_hours)?,
        })
    }
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; handlers hold the lock for
/// the duration of one API call.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Calendar for groups without an anchor.
    default_calendar: CycleCalendar,
    /// Source of "today".
    clock: Arc<dyn Clock>,
}

impl AppState {
    fn new(
        persistence: Persistence,
        default_calendar: CycleCalendar,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            default_calendar,
            clock,
        }
    }

    fn today(&self) -> Date {
        self.clock.today()
    }
}

/// Offset into a paged chart.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct ChartQuery {
    /// Rows skipped from the newest end.
    #[serde(default)]
    offset: usize,
}

/// Weeks back from the current training week.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
struct WeekQuery {
    #[serde(default)]
    offset: u32,
}

/// Day to place in the cycle calendar.
#[derive(Debug, Clone, Default, Deserialize)]
struct CycleQuery {
    /// YYYY-MM-DD; today when absent.
    date: Option<String>,
}

/// Response for writes with nothing else to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Whether the operation succeeded.
    success: bool,
    /// What happened.
    message: String,
}

impl WriteResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Cycle calendar
// ============================================================================

/// Handler for GET /cycle.
async fn handle_locate_cycle(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CycleQuery>,
) -> Result<Json<CycleInfo>, HttpError> {
    info!(date = ?query.date, "Handling locate_cycle request");
    let response: CycleInfo = locate_cycle(
        app_state.default_calendar,
        query.date.as_deref(),
        app_state.today(),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Accounts and profile
// ============================================================================

/// Handler for POST /auth/register.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling register request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(register(&mut persistence, &req)?))
}

/// Handler for POST /auth/login.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling login request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(login(&mut persistence, &req)?))
}

/// Handler for POST /auth/logout.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, token): SessionUser,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling logout request");
    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &token)?;
    Ok(WriteResponse::ok("Logged out"))
}

/// Handler for GET /auth/whoami.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<ProfileResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling whoami request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(whoami(&mut persistence, &user)?))
}

async fn handle_update_display_name(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<UpdateDisplayNameRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling update_display_name request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_display_name(&mut persistence, &user, &req)?))
}

async fn handle_update_target_weight(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<UpdateTargetWeightRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        target_weight_kg = ?req.target_weight_kg,
        "Handling update_target_weight request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_target_weight(&mut persistence, &user, &req)?))
}

async fn handle_set_avatar(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<SetAvatarRequest>,
) -> Result<Json<AvatarResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        content_type = %req.content_type,
        "Handling set_avatar request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(set_avatar(&mut persistence, &user, &req)?))
}

async fn handle_clear_avatar(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<AvatarResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling clear_avatar request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(clear_avatar(&mut persistence, &user)?))
}

async fn handle_set_active_group(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<SetActiveGroupRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    info!(user_id = user.user_id, group_id = req.group_id, "Handling set_active_group request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(set_active_group(&mut persistence, &user, &req)?))
}

// ============================================================================
// Weigh-ins
// ============================================================================

async fn handle_list_weigh_ins(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<ListWeighInsResponse>, HttpError> {
    info!(user_id = user.user_id, "Handling list_weigh_ins request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_weigh_ins(&mut persistence, &user)?))
}

async fn handle_add_weigh_in(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<AddWeighInRequest>,
) -> Result<Json<WeighInInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        entry_date = %req.entry_date,
        "Handling add_weigh_in request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(add_weigh_in(&mut persistence, &user, &req)?))
}

async fn handle_update_weigh_in(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(weigh_in_id): Path<i64>,
    Json(req): Json<UpdateWeighInRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = user.user_id, weigh_in_id, "Handling update_weigh_in request");
    let mut persistence = app_state.persistence.lock().await;
    update_weigh_in(&mut persistence, &user, weigh_in_id, &req)?;
    Ok(WriteResponse::ok(format!("Updated weigh-in {weigh_in_id}")))
}

async fn handle_delete_weigh_in(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(weigh_in_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = user.user_id, weigh_in_id, "Handling delete_weigh_in request");
    let mut persistence = app_state.persistence.lock().await;
    delete_weigh_in(&mut persistence, &user, weigh_in_id)?;
    Ok(WriteResponse::ok(format!("Deleted weigh-in {weigh_in_id}")))
}

async fn handle_weigh_in_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<ChartQuery>,
) -> Result<Json<WeighInDashboardResponse>, HttpError> {
    info!(user_id = user.user_id, offset = query.offset, "Handling weigh_in_dashboard request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(weigh_in_dashboard(&mut persistence, &user, query.offset)?))
}

// ============================================================================
// Groups
// ============================================================================

async fn handle_create_group(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<GroupInfo>, HttpError> {
    info!(user_id = user.user_id, name = %req.name, "Handling create_group request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_group(&mut persistence, &user, &req)?))
}

async fn handle_join_group(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<JoinGroupRequest>,
) -> Result<Json<GroupInfo>, HttpError> {
    info!(user_id = user.user_id, "Handling join_group request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(join_group(&mut persistence, &user, &req)?))
}

async fn handle_get_group(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<GroupInfo>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling get_group request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_group(&mut persistence, &user, group_id)?))
}

async fn handle_leave_group(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling leave_group request");
    let mut persistence = app_state.persistence.lock().await;
    leave_group(&mut persistence, &user, group_id)?;
    Ok(WriteResponse::ok(format!("Left group {group_id}")))
}

async fn handle_rename_group(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Json(req): Json<RenameGroupRequest>,
) -> Result<Json<GroupInfo>, HttpError> {
    info!(user_id = user.user_id, group_id, name = %req.name, "Handling rename_group request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rename_group(&mut persistence, &user, group_id, &req)?))
}

async fn handle_regenerate_group_code(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<GroupInfo>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling regenerate_group_code request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(regenerate_group_code(&mut persistence, &user, group_id)?))
}

async fn handle_set_cycle_anchor(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Json(req): Json<SetCycleAnchorRequest>,
) -> Result<Json<GroupInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        anchor = ?req.anchor,
        "Handling set_cycle_anchor request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(set_cycle_anchor(&mut persistence, &user, group_id, &req)?))
}

async fn handle_list_members(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<ListMembersResponse>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling list_members request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_members(&mut persistence, &user, group_id)?))
}

async fn handle_remove_member(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, member_user_id)): Path<(i64, i64)>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        member_user_id,
        "Handling remove_member request"
    );
    let mut persistence = app_state.persistence.lock().await;
    remove_member(&mut persistence, &user, group_id, member_user_id)?;
    Ok(WriteResponse::ok(format!(
        "Removed user {member_user_id} from group {group_id}"
    )))
}

async fn handle_group_dashboard(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<GroupDashboardResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        offset = query.offset,
        "Handling group_dashboard request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(group_dashboard(&mut persistence, &user, group_id, query.offset)?))
}

// ============================================================================
// Potato points
// ============================================================================

async fn handle_list_rules(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<ListRulesResponse>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling list_rules request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_rules(&mut persistence, &user, group_id)?))
}

async fn handle_create_rule(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<Json<RuleInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        title = %req.title,
        points = req.points,
        "Handling create_rule request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_rule(&mut persistence, &user, group_id, &req)?))
}

async fn handle_update_rule_title(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, rule_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateRuleTitleRequest>,
) -> Result<Json<RuleInfo>, HttpError> {
    info!(user_id = user.user_id, group_id, rule_id, "Handling update_rule_title request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_rule_title(
        &mut persistence,
        &user,
        group_id,
        rule_id,
        &req,
    )?))
}

async fn handle_update_rule_points(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, rule_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateRulePointsRequest>,
) -> Result<Json<RuleInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        rule_id,
        points = req.points,
        "Handling update_rule_points request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_rule_points(
        &mut persistence,
        &user,
        group_id,
        rule_id,
        &req,
    )?))
}

async fn handle_set_rule_active(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, rule_id)): Path<(i64, i64)>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<RuleInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        rule_id,
        is_active = req.is_active,
        "Handling set_rule_active request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(set_rule_active(
        &mut persistence,
        &user,
        group_id,
        rule_id,
        &req,
    )?))
}

async fn handle_delete_rule(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, rule_id)): Path<(i64, i64)>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(user_id = user.user_id, group_id, rule_id, "Handling delete_rule request");
    let mut persistence = app_state.persistence.lock().await;
    delete_rule(&mut persistence, &user, group_id, rule_id)?;
    Ok(WriteResponse::ok(format!("Deleted rule {rule_id}")))
}

async fn handle_list_cycle_events(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<CycleEventsResponse>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling list_cycle_events request");
    let today: Date = app_state.today();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_cycle_events(
        &mut persistence,
        &user,
        group_id,
        today,
        app_state.default_calendar,
    )?))
}

async fn handle_log_event(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Json(req): Json<LogEventRequest>,
) -> Result<Json<EventInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        rule_id = req.rule_id,
        occurred_on = %req.occurred_on,
        "Handling log_event request"
    );
    let today: Date = app_state.today();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(log_event(
        &mut persistence,
        &user,
        group_id,
        &req,
        today,
        app_state.default_calendar,
    )?))
}

async fn handle_cycle_summary(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, member_user_id)): Path<(i64, i64)>,
) -> Result<Json<CycleSummaryResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        member_user_id,
        "Handling cycle_summary request"
    );
    let today: Date = app_state.today();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(cycle_summary(
        &mut persistence,
        &user,
        group_id,
        member_user_id,
        today,
        app_state.default_calendar,
    )?))
}

// ============================================================================
// Training
// ============================================================================

async fn handle_list_sport_types(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<ListSportTypesResponse>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling list_sport_types request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_sport_types(&mut persistence, &user, group_id)?))
}

async fn handle_create_sport_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Json(req): Json<CreateSportTypeRequest>,
) -> Result<Json<SportTypeInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        name = %req.name,
        "Handling create_sport_type request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_sport_type(&mut persistence, &user, group_id, &req)?))
}

async fn handle_set_sport_type_active(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, sport_type_id)): Path<(i64, i64)>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<SportTypeInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        sport_type_id,
        is_active = req.is_active,
        "Handling set_sport_type_active request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(set_sport_type_active(
        &mut persistence,
        &user,
        group_id,
        sport_type_id,
        &req,
    )?))
}

async fn handle_list_training_entries(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
) -> Result<Json<ListTrainingEntriesResponse>, HttpError> {
    info!(user_id = user.user_id, group_id, "Handling list_training_entries request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_training_entries(&mut persistence, &user, group_id)?))
}

async fn handle_add_training_entry(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Json(req): Json<TrainingEntryRequest>,
) -> Result<Json<TrainingEntryInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        sport_type_id = req.sport_type_id,
        occurred_on = %req.occurred_on,
        "Handling add_training_entry request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(add_training_entry(&mut persistence, &user, group_id, &req)?))
}

async fn handle_update_training_entry(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, entry_id)): Path<(i64, i64)>,
    Json(req): Json<TrainingEntryRequest>,
) -> Result<Json<TrainingEntryInfo>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        entry_id,
        "Handling update_training_entry request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_training_entry(
        &mut persistence,
        &user,
        group_id,
        entry_id,
        &req,
    )?))
}

async fn handle_delete_training_entry(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path((group_id, entry_id)): Path<(i64, i64)>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        entry_id,
        "Handling delete_training_entry request"
    );
    let mut persistence = app_state.persistence.lock().await;
    delete_training_entry(&mut persistence, &user, group_id, entry_id)?;
    Ok(WriteResponse::ok(format!("Deleted training entry {entry_id}")))
}

async fn handle_training_week(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(group_id): Path<i64>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<TrainingWeekResponse>, HttpError> {
    info!(
        user_id = user.user_id,
        group_id,
        offset = query.offset,
        "Handling training_week request"
    );
    let today: Date = app_state.today();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(training_week_view(
        &mut persistence,
        &user,
        group_id,
        query.offset,
        today,
    )?))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/cycle", get(handle_locate_cycle))
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/whoami", get(handle_whoami))
        .route("/profile/display_name", put(handle_update_display_name))
        .route("/profile/target_weight", put(handle_update_target_weight))
        .route(
            "/profile/avatar",
            put(handle_set_avatar).delete(handle_clear_avatar),
        )
        .route("/profile/active_group", put(handle_set_active_group))
        .route(
            "/weigh_ins",
            get(handle_list_weigh_ins).post(handle_add_weigh_in),
        )
        .route("/weigh_ins/dashboard", get(handle_weigh_in_dashboard))
        .route(
            "/weigh_ins/{weigh_in_id}",
            put(handle_update_weigh_in).delete(handle_delete_weigh_in),
        )
        .route("/groups", post(handle_create_group))
        .route("/groups/join", post(handle_join_group))
        .route("/groups/{group_id}", get(handle_get_group))
        .route("/groups/{group_id}/leave", post(handle_leave_group))
        .route("/groups/{group_id}/name", put(handle_rename_group))
        .route("/groups/{group_id}/code", post(handle_regenerate_group_code))
        .route("/groups/{group_id}/cycle_anchor", put(handle_set_cycle_anchor))
        .route("/groups/{group_id}/members", get(handle_list_members))
        .route(
            "/groups/{group_id}/members/{user_id}",
            delete(handle_remove_member),
        )
        .route("/groups/{group_id}/dashboard", get(handle_group_dashboard))
        .route(
            "/groups/{group_id}/potato/rules",
            get(handle_list_rules).post(handle_create_rule),
        )
        .route(
            "/groups/{group_id}/potato/rules/{rule_id}",
            delete(handle_delete_rule),
        )
        .route(
            "/groups/{group_id}/potato/rules/{rule_id}/title",
            put(handle_update_rule_title),
        )
        .route(
            "/groups/{group_id}/potato/rules/{rule_id}/points",
            put(handle_update_rule_points),
        )
        .route(
            "/groups/{group_id}/potato/rules/{rule_id}/active",
            put(handle_set_rule_active),
        )
        .route(
            "/groups/{group_id}/potato/events",
            get(handle_list_cycle_events).post(handle_log_event),
        )
        .route(
            "/groups/{group_id}/potato/summary/{user_id}",
            get(handle_cycle_summary),
        )
        .route(
            "/groups/{group_id}/training/sport_types",
            get(handle_list_sport_types).post(handle_create_sport_type),
        )
        .route(
            "/groups/{group_id}/training/sport_types/{sport_type_id}/active",
            put(handle_set_sport_type_active),
        )
        .route(
            "/groups/{group_id}/training/entries",
            get(handle_list_training_entries).post(handle_add_training_entry),
        )
        .route(
            "/groups/{group_id}/training/entries/{entry_id}",
            put(handle_update_training_entry).delete(handle_delete_training_entry),
        )
        .route("/groups/{group_id}/training/week", get(handle_training_week))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing weighcrew server");

    let config: ServerConfig = ServerConfig::from_args(&args)?;
    info!(
        default_cycle_anchor = %config.default_calendar.anchor(),
        utc_offset_hours = args.utc_offset_hours,
        "Resolved server configuration"
    );

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState::new(
        persistence,
        config.default_calendar,
        Arc::new(config.clock),
    );

    let app: Router = build_router(app_state);

    info!("Server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use time::macros::date;
    use tower::ServiceExt;
    use weighcrew_api::FixedClock;

    /// Wednesday of week 1 in the first cycle after the default anchor.
    const TODAY: Date = date!(2026 - 01 - 07);

    /// Helper to create a test app with in-memory persistence and a fixed clock.
    fn create_test_app() -> Router {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        build_router(AppState::new(
            persistence,
            CycleCalendar::default(),
            Arc::new(FixedClock(TODAY)),
        ))
    }

    /// Sends one request and decodes the JSON body (`Null` when there is none).
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request: Request<Body> = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    /// Registers and logs in a user, returning the session token.
    async fn sign_up(app: &Router, login_name: &str) -> String {
        let (status, _) = send(
            app,
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "login_name": login_name,
                "display_name": format!("{login_name} Tester"),
                "password": "Scales-2026",
                "password_confirmation": "Scales-2026",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = send(
            app,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "login_name": login_name, "password": "Scales-2026" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["session_token"].as_str().unwrap().to_string()
    }

    /// Creates a group and one active rule; returns (`group_id`, `rule_id`).
    async fn group_with_rule(app: &Router, token: &str) -> (i64, i64) {
        let (status, group) = send(
            app,
            "POST",
            "/groups",
            Some(token),
            Some(json!({ "name": "Morning Crew" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let group_id: i64 = group["group_id"].as_i64().unwrap();

        let (status, rule) = send(
            app,
            "POST",
            &format!("/groups/{group_id}/potato/rules"),
            Some(token),
            Some(json!({ "title": "Chips", "points": 3 })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        (group_id, rule["rule_id"].as_i64().unwrap())
    }

    #[tokio::test]
    async fn test_whoami_requires_bearer_token() {
        let app: Router = create_test_app();

        let (status, body) = send(&app, "GET", "/auth/whoami", None, None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!(true));

        let (status, _) = send(&app, "GET", "/auth/whoami", Some("bogus"), None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_login_and_whoami() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;

        let (status, profile) = send(&app, "GET", "/auth/whoami", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(profile["login_name"], json!("ANNA"));
        assert_eq!(profile["display_name"], json!("anna Tester"));
        assert_eq!(profile["active_group_id"], Value::Null);
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;

        let (status, body) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], json!(true));

        let (status, _) = send(&app, "GET", "/auth/whoami", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app: Router = create_test_app();
        sign_up(&app, "anna").await;

        let (status, _) = send(
            &app,
            "POST",
            "/auth/login",
            None,
            Some(json!({ "login_name": "anna", "password": "nope-nope-1" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_weak_password_is_bad_request() {
        let app: Router = create_test_app();

        let (status, _) = send(
            &app,
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "login_name": "anna",
                "display_name": "Anna",
                "password": "short",
                "password_confirmation": "short",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_locate_cycle_defaults_to_today() {
        let app: Router = create_test_app();

        let (status, cycle) = send(&app, "GET", "/cycle", None, None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(cycle["cycle_start"], json!("2026-01-05"));
        assert_eq!(cycle["cycle_end"], json!("2026-03-29"));
        assert_eq!(cycle["week_number"], json!(1));
        assert_eq!(cycle["week_start"], json!("2026-01-05"));
        assert_eq!(cycle["week_end"], json!("2026-01-11"));
    }

    #[tokio::test]
    async fn test_locate_cycle_for_given_dates() {
        let app: Router = create_test_app();

        let (status, cycle) = send(&app, "GET", "/cycle?date=2026-04-01", None, None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(cycle["cycle_index"], json!(1));
        assert_eq!(cycle["cycle_start"], json!("2026-03-30"));
        assert_eq!(cycle["week_number"], json!(1));

        let (status, cycle) = send(&app, "GET", "/cycle?date=2025-12-20", None, None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(cycle["before_anchor"], json!(true));
        assert_eq!(cycle["cycle_start"], json!("2026-01-05"));

        let (status, _) = send(&app, "GET", "/cycle?date=2026-13-01", None, None).await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_log_event_in_current_week_succeeds() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;
        let (group_id, rule_id) = group_with_rule(&app, &token).await;

        let (status, event) = send(
            &app,
            "POST",
            &format!("/groups/{group_id}/potato/events"),
            Some(&token),
            Some(json!({ "rule_id": rule_id, "occurred_on": "2026-01-06", "note": "  " })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(event["points"], json!(3));
        assert_eq!(event["rule_title"], json!("Chips"));
        assert_eq!(event["note"], Value::Null);

        let (status, events) = send(
            &app,
            "GET",
            &format!("/groups/{group_id}/potato/events"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(events["events"].as_array().unwrap().len(), 1);
        assert_eq!(events["cycle"]["week_number"], json!(1));
    }

    #[tokio::test]
    async fn test_log_event_outside_window_is_unprocessable() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;
        let (group_id, rule_id) = group_with_rule(&app, &token).await;
        let uri: String = format!("/groups/{group_id}/potato/events");

        // Week 2 of the same cycle
        let (status, body) = send(
            &app,
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "rule_id": rule_id, "occurred_on": "2026-01-13", "note": null })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], json!(true));

        // Next cycle
        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(&token),
            Some(json!({ "rule_id": rule_id, "occurred_on": "2026-03-30", "note": null })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_cycle_summary_totals_points() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;
        let (group_id, rule_id) = group_with_rule(&app, &token).await;

        for day in ["2026-01-05", "2026-01-07"] {
            let (status, _) = send(
                &app,
                "POST",
                &format!("/groups/{group_id}/potato/events"),
                Some(&token),
                Some(json!({ "rule_id": rule_id, "occurred_on": day, "note": null })),
            )
            .await;
            assert_eq!(status, HttpStatusCode::OK);
        }

        let (_, profile) = send(&app, "GET", "/auth/whoami", Some(&token), None).await;
        let user_id: i64 = profile["user_id"].as_i64().unwrap();

        let (status, summary) = send(
            &app,
            "GET",
            &format!("/groups/{group_id}/potato/summary/{user_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(summary["cycle_total"], json!(6));
        assert_eq!(summary["current_week_points"], json!(6));
        assert_eq!(summary["weeks"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_non_member_is_forbidden() {
        let app: Router = create_test_app();
        let owner: String = sign_up(&app, "anna").await;
        let outsider: String = sign_up(&app, "carl").await;
        let (group_id, _) = group_with_rule(&app, &owner).await;

        let (status, _) = send(
            &app,
            "GET",
            &format!("/groups/{group_id}/dashboard"),
            Some(&outsider),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_join_group_with_code() {
        let app: Router = create_test_app();
        let owner: String = sign_up(&app, "anna").await;
        let member: String = sign_up(&app, "ben").await;
        let (group_id, _) = group_with_rule(&app, &owner).await;

        let uri: String = format!("/groups/{group_id}");
        let (_, group) = send(&app, "GET", &uri, Some(&owner), None).await;
        let code: String = group["code"].as_str().unwrap().to_lowercase();

        let (status, joined) = send(
            &app,
            "POST",
            "/groups/join",
            Some(&member),
            Some(json!({ "code": code })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(joined["group_id"], json!(group_id));
        assert_eq!(joined["role"], json!("member"));

        let (status, members) = send(
            &app,
            "GET",
            &format!("/groups/{group_id}/members"),
            Some(&member),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(members["members"].as_array().unwrap().len(), 2);

        // Plain members cannot rename
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/groups/{group_id}/name"),
            Some(&member),
            Some(json!({ "name": "Evening Crew" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_weigh_in_errors_map_to_status_codes() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;

        let (status, _) = send(
            &app,
            "POST",
            "/weigh_ins",
            Some(&token),
            Some(json!({ "entry_date": "2026-01-07", "weight_kg": 82.4 })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, _) = send(
            &app,
            "POST",
            "/weigh_ins",
            Some(&token),
            Some(json!({ "entry_date": "2026-01-07", "weight_kg": 81.9 })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            "POST",
            "/weigh_ins",
            Some(&token),
            Some(json!({ "entry_date": "2026-01-08", "weight_kg": -5.0 })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "DELETE", "/weigh_ins/9999", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_weigh_in_dashboard_pages() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;

        for (day, weight) in [("2026-01-05", 83.0), ("2026-01-06", 82.6), ("2026-01-07", 82.1)] {
            let (status, _) = send(
                &app,
                "POST",
                "/weigh_ins",
                Some(&token),
                Some(json!({ "entry_date": day, "weight_kg": weight })),
            )
            .await;
            assert_eq!(status, HttpStatusCode::OK);
        }

        let (status, dashboard) =
            send(&app, "GET", "/weigh_ins/dashboard?offset=0", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(dashboard["latest"]["entry_date"], json!("2026-01-07"));
        assert_eq!(dashboard["chart"]["offset"], json!(0));
        assert_eq!(dashboard["chart_points"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_training_entry_and_week_view() {
        let app: Router = create_test_app();
        let token: String = sign_up(&app, "anna").await;
        let (group_id, _) = group_with_rule(&app, &token).await;

        let (status, sport) = send(
            &app,
            "POST",
            &format!("/groups/{group_id}/training/sport_types"),
            Some(&token),
            Some(json!({ "name": "Running" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let sport_type_id: i64 = sport["sport_type_id"].as_i64().unwrap();

        let (status, entry) = send(
            &app,
            "POST",
            &format!("/groups/{group_id}/training/entries"),
            Some(&token),
            Some(json!({
                "sport_type_id": sport_type_id,
                "occurred_on": "2026-01-06",
                "duration_min": 45,
                "distance_km": 8.5,
                "intensity": 3,
                "note": null,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(entry["sport_name"], json!("Running"));

        let (status, week) = send(
            &app,
            "GET",
            &format!("/groups/{group_id}/training/week"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(week["week_start"], json!("2026-01-05"));
        assert_eq!(week["entries"].as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            "POST",
            &format!("/groups/{group_id}/training/entries"),
            Some(&token),
            Some(json!({
                "sport_type_id": sport_type_id,
                "occurred_on": "2026-01-06",
                "duration_min": 0,
                "distance_km": null,
                "intensity": null,
                "note": null,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }
}
