// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, Month};
use weighcrew_domain::CycleCalendar;
use weighcrew_persistence::Persistence;

use super::helpers::{
    create_test_group, create_test_persistence, day, owner_and_member, register_user,
};
use crate::{
    ApiError, AuthenticatedUser, CreateRuleRequest, CycleEventsResponse, CycleSummaryResponse,
    EventInfo, GroupInfo, LogEventRequest, RuleInfo, SetActiveRequest, SetCycleAnchorRequest,
    UpdateRulePointsRequest, UpdateRuleTitleRequest, create_rule, cycle_summary, delete_rule,
    list_cycle_events, list_rules, locate_cycle, log_event, set_cycle_anchor, set_rule_active,
    update_rule_points, update_rule_title,
};

fn rule(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    title: &str,
    points: i64,
) -> RuleInfo {
    create_rule(
        persistence,
        user,
        group_id,
        &CreateRuleRequest {
            title: String::from(title),
            points,
        },
    )
    .unwrap()
}

fn log(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    group_id: i64,
    rule_id: i64,
    occurred_on: &str,
    today: Date,
) -> Result<EventInfo, ApiError> {
    log_event(
        persistence,
        user,
        group_id,
        &LogEventRequest {
            rule_id,
            occurred_on: String::from(occurred_on),
            note: Some(String::from("  ")),
        },
        today,
        CycleCalendar::default(),
    )
}

#[test]
fn test_rule_crud_for_members() {
    let mut persistence: Persistence = create_test_persistence();
    let (_, member, group) = owner_and_member(&mut persistence);
    let outsider: AuthenticatedUser = register_user(&mut persistence, "carl");

    let chips: RuleInfo = rule(&mut persistence, &member, group.group_id, " Chips ", 3);
    assert_eq!(chips.title, "Chips");
    assert!(chips.is_active);

    let denied = create_rule(
        &mut persistence,
        &outsider,
        group.group_id,
        &CreateRuleRequest {
            title: String::from("Soda"),
            points: 1,
        },
    );
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    let renamed: RuleInfo = update_rule_title(
        &mut persistence,
        &member,
        group.group_id,
        chips.rule_id,
        &UpdateRuleTitleRequest {
            title: String::from("Crisps"),
        },
    )
    .unwrap();
    assert_eq!(renamed.title, "Crisps");

    let repriced: RuleInfo = update_rule_points(
        &mut persistence,
        &member,
        group.group_id,
        chips.rule_id,
        &UpdateRulePointsRequest { points: 4 },
    )
    .unwrap();
    assert_eq!(repriced.points, 4);

    let toggled: RuleInfo = set_rule_active(
        &mut persistence,
        &member,
        group.group_id,
        chips.rule_id,
        &SetActiveRequest { is_active: false },
    )
    .unwrap();
    assert!(!toggled.is_active);

    delete_rule(&mut persistence, &member, group.group_id, chips.rule_id).unwrap();
    assert!(
        list_rules(&mut persistence, &member, group.group_id)
            .unwrap()
            .rules
            .is_empty()
    );
}

#[test]
fn test_rule_validation() {
    let mut persistence: Persistence = create_test_persistence();
    let (owner, _, group) = owner_and_member(&mut persistence);

    let short = create_rule(
        &mut persistence,
        &owner,
        group.group_id,
        &CreateRuleRequest {
            title: String::from("x"),
            points: 1,
        },
    );
    assert!(matches!(
        short,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "title"
    ));

    let huge = create_rule(
        &mut persistence,
        &owner,
        group.group_id,
        &CreateRuleRequest {
            title: String::from("Cake"),
            points: i64::MAX,
        },
    );
    assert!(matches!(
        huge,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "points"
    ));
}

#[test]
fn test_log_event_snapshots_points() {
    let mut persistence: Persistence = create_test_persistence();
    let (owner, _, group) = owner_and_member(&mut persistence);
    let chips: RuleInfo = rule(&mut persistence, &owner, group.group_id, "Chips", 3);
    let today: Date = day(2026, Month::January, 7);

    let event: EventInfo = log(
        &mut persistence,
        &owner,
        group.group_id,
        chips.rule_id,
        "2026-01-06",
        today,
    )
    .unwrap();
    assert_eq!(event.points, 3);
    assert_eq!(event.note, None);

    update_rule_points(
        &mut persistence,
        &owner,
        group.group_id,
        chips.rule_id,
        &UpdateRulePointsRequest { points: 10 },
    )
    .unwrap();

    let listed: CycleEventsResponse = list_cycle_events(
        &mut persistence,
        &owner,
        group.group_id,
        today,
        CycleCalendar::default(),
    )
    .unwrap();
    assert_eq!(listed.cycle.cycle_start, "2026-01-05");
    assert_eq!(listed.cycle.cycle_end, "2026-03-29");
    assert_eq!(listed.events.len(), 1);
    assert_eq!(listed.events[0].points, 3);
}

#[test]
fn test_log_event_window_rules() {
    let mut persistence: Persistence = create_test_persistence();
    let (owner, _, group) = owner_and_member(&mut persistence);
    let chips: RuleInfo = rule(&mut persistence, &owner, group.group_id, "Chips", 3);

    let next_week = log(
        &mut persistence,
        &owner,
        group.group_id,
        chips.rule_id,
        "2026-01-12",
        day(2026, Month::January, 7),
    );
    assert!(matches!(
        next_week,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "event_in_current_week"
    ));

    let before_cycle = log(
        &mut persistence,
        &owner,
        group.group_id,
        chips.rule_id,
        "2026-01-03",
        day(2026, Month::January, 10),
    );
    assert!(matches!(
        before_cycle,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "event_in_current_cycle"
    ));
}

#[test]
fn test_log_event_requires_active_rule_of_group() {
    let mut persistence: Persistence = create_test_persistence();
    let (owner, _, group) = owner_and_member(&mut persistence);
    let other: AuthenticatedUser = register_user(&mut persistence, "dora");
    let other_group: GroupInfo = create_test_group(&mut persistence, &other);
    let foreign: RuleInfo = rule(&mut persistence, &other, other_group.group_id, "Soda", 1);
    let chips: RuleInfo = rule(&mut persistence, &owner, group.group_id, "Chips", 3);
    let today: Date = day(2026, Month::January, 7);

    let wrong_group = log(
        &mut persistence,
        &owner,
        group.group_id,
        foreign.rule_id,
        "2026-01-06",
        today,
    );
    assert!(matches!(wrong_group, Err(ApiError::ResourceNotFound { .. })));

    set_rule_active(
        &mut persistence,
        &owner,
        group.group_id,
        chips.rule_id,
        &SetActiveRequest { is_active: false },
    )
    .unwrap();
    let inactive = log(
        &mut persistence,
        &owner,
        group.group_id,
        chips.rule_id,
        "2026-01-06",
        today,
    );
    assert!(matches!(
        inactive,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "rule_active"
    ));
}

#[test]
fn test_cycle_summary_per_member() {
    let mut persistence: Persistence = create_test_persistence();
    let (owner, member, group) = owner_and_member(&mut persistence);
    let chips: RuleInfo = rule(&mut persistence, &owner, group.group_id, "Chips", 3);
    let cake: RuleInfo = rule(&mut persistence, &owner, group.group_id, "Cake", 5);

    let week_one: Date = day(2026, Month::January, 7);
    let week_two: Date = day(2026, Month::January, 14);
    for (user, rule_id, date, today) in [
        (&owner, chips.rule_id, "2026-01-06", week_one),
        (&owner, cake.rule_id, "2026-01-13", week_two),
        (&owner, chips.rule_id, "2026-01-14", week_two),
        (&member, cake.rule_id, "2026-01-14", week_two),
    ] {
        log(&mut persistence, user, group.group_id, rule_id, date, today).unwrap();
    }

    let summary: CycleSummaryResponse = cycle_summary(
        &mut persistence,
        &member,
        group.group_id,
        owner.user_id,
        week_two,
        CycleCalendar::default(),
    )
    .unwrap();

    assert_eq!(summary.weeks.len(), 12);
    assert_eq!(summary.weeks[0].points, 3);
    assert_eq!(summary.weeks[1].points, 8);
    assert_eq!(summary.weeks[1].week_start, "2026-01-12");
    assert_eq!(summary.weeks[1].week_end, "2026-01-18");
    assert_eq!(summary.cycle_total, 11);
    assert_eq!(summary.cycle.week_number, 2);
    assert_eq!(summary.current_week_points, 8);

    let dates: Vec<&str> = summary
        .current_week_events
        .iter()
        .map(|e| e.occurred_on.as_str())
        .collect();
    assert_eq!(dates, vec!["2026-01-14", "2026-01-13"]);
    assert_eq!(
        summary.current_week_events[1].rule_title.as_deref(),
        Some("Cake")
    );
}

#[test]
fn test_group_anchor_overrides_default() {
    let mut persistence: Persistence = create_test_persistence();
    let (owner, _, group) = owner_and_member(&mut persistence);
    let chips: RuleInfo = rule(&mut persistence, &owner, group.group_id, "Chips", 3);
    set_cycle_anchor(
        &mut persistence,
        &owner,
        group.group_id,
        &SetCycleAnchorRequest {
            anchor: Some(String::from("2026-01-14")),
        },
    )
    .unwrap();
    let today: Date = day(2026, Month::January, 15);

    let listed: CycleEventsResponse = list_cycle_events(
        &mut persistence,
        &owner,
        group.group_id,
        today,
        CycleCalendar::default(),
    )
    .unwrap();
    assert_eq!(listed.cycle.anchor, "2026-01-14");
    assert_eq!(listed.cycle.cycle_start, "2026-01-12");
    assert_eq!(listed.cycle.week_number, 1);

    let logged = log(
        &mut persistence,
        &owner,
        group.group_id,
        chips.rule_id,
        "2026-01-13",
        today,
    );
    assert!(logged.is_ok());
}

#[test]
fn test_cycle_summary_rejects_non_member_target() {
    let mut persistence: Persistence = create_test_persistence();
    let (owner, _, group) = owner_and_member(&mut persistence);
    let outsider: AuthenticatedUser = register_user(&mut persistence, "carl");

    let result = cycle_summary(
        &mut persistence,
        &owner,
        group.group_id,
        outsider.user_id,
        day(2026, Month::January, 7),
        CycleCalendar::default(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_locate_cycle_uses_given_date_or_today() {
    let calendar: CycleCalendar = CycleCalendar::default();
    let today: Date = day(2026, Month::January, 7);

    let current = locate_cycle(calendar, None, today).unwrap();
    assert_eq!(current.cycle_start, "2026-01-05");
    assert_eq!(current.week_number, 1);

    let later = locate_cycle(calendar, Some("2026-04-01"), today).unwrap();
    assert_eq!(later.cycle_index, 1);
    assert_eq!(later.cycle_start, "2026-03-30");
    assert_eq!(later.cycle_end, "2026-06-21");

    let result = locate_cycle(calendar, Some("not-a-date"), today);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
