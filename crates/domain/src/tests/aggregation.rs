// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CycleCalendar, CycleSummary, CycleWindow, GroupChartRow, Member, MemberLatest, MemberRole,
    PointEvent, TrainingKpis, TrainingSession, TrainingWeek, UNKNOWN_SPORT, WeighIn,
    WeighInStats, distinct_dates_desc, group_chart_rows, latest_per_member, recent_entries,
    summarize_cycle, training_kpis, training_week, training_week_bounds, weigh_in_stats,
};
use time::Date;
use time::macros::date;

fn weigh_in(id: i64, user_id: i64, entry_date: Date, weight_kg: f64) -> WeighIn {
    WeighIn {
        id,
        user_id,
        entry_date,
        weight_kg,
    }
}

fn point_event(id: i64, occurred_on: Date, points: i32) -> PointEvent {
    PointEvent {
        id,
        user_id: 1,
        rule_id: Some(1),
        occurred_on,
        points,
        note: None,
    }
}

fn session(id: i64, occurred_on: Date, minutes: i32, sport: Option<&str>) -> TrainingSession {
    TrainingSession {
        id,
        user_id: 1,
        sport_type_id: 1,
        sport_name: sport.map(String::from),
        occurred_on,
        duration_min: minutes,
        distance_km: Some(2.0),
        intensity: None,
        note: None,
    }
}

#[test]
fn test_weigh_in_stats_previous_week_and_diffs() {
    let entries: Vec<WeighIn> = vec![
        weigh_in(4, 1, date!(2026 - 02 - 15), 80.0),
        weigh_in(3, 1, date!(2026 - 02 - 10), 81.0),
        weigh_in(2, 1, date!(2026 - 02 - 08), 82.5),
        weigh_in(1, 1, date!(2026 - 02 - 01), 84.0),
    ];

    let stats: WeighInStats = weigh_in_stats(&entries, Some(75.0));

    assert_eq!(stats.latest.as_ref().map(|e| e.id), Some(4));
    assert_eq!(stats.previous_week.as_ref().map(|e| e.id), Some(2));
    assert!((stats.diff_to_goal.unwrap() - 5.0).abs() < 1e-9);
    assert!((stats.diff_to_previous_week.unwrap() + 2.5).abs() < 1e-9);
}

#[test]
fn test_weigh_in_stats_without_history() {
    let stats: WeighInStats = weigh_in_stats(&[], Some(75.0));
    assert_eq!(stats.latest, None);
    assert_eq!(stats.diff_to_goal, None);

    let entries: Vec<WeighIn> = vec![weigh_in(1, 1, date!(2026 - 02 - 15), 80.0)];
    let stats: WeighInStats = weigh_in_stats(&entries, None);
    assert_eq!(stats.previous_week, None);
    assert_eq!(stats.diff_to_goal, None);
    assert_eq!(stats.diff_to_previous_week, None);
}

#[test]
fn test_group_chart_rows_leave_gaps() {
    let members: Vec<Member> = vec![
        Member::new(1, Some("Anna"), None, MemberRole::Owner),
        Member::new(2, Some("Ben"), None, MemberRole::Member),
    ];
    let entries: Vec<WeighIn> = vec![
        weigh_in(1, 1, date!(2026 - 02 - 01), 70.0),
        weigh_in(2, 2, date!(2026 - 02 - 01), 90.0),
        weigh_in(3, 2, date!(2026 - 02 - 03), 89.0),
    ];

    let dates: Vec<Date> = distinct_dates_desc(&entries);
    assert_eq!(dates, vec![date!(2026 - 02 - 03), date!(2026 - 02 - 01)]);

    let rows: Vec<GroupChartRow> = group_chart_rows(&members, &entries, &dates);
    assert_eq!(rows[0].values, vec![None, Some(89.0)]);
    assert_eq!(rows[1].values, vec![Some(70.0), Some(90.0)]);
}

#[test]
fn test_latest_per_member_sorted_by_name() {
    let members: Vec<Member> = vec![
        Member::new(1, Some("zoe"), None, MemberRole::Owner),
        Member::new(2, Some("Anna"), None, MemberRole::Member),
    ];
    let entries: Vec<WeighIn> = vec![
        weigh_in(1, 1, date!(2026 - 02 - 01), 70.0),
        weigh_in(2, 1, date!(2026 - 02 - 05), 69.0),
    ];

    let rows: Vec<MemberLatest> = latest_per_member(&members, &entries);
    assert_eq!(rows[0].member.display_name, "Anna");
    assert_eq!(rows[0].latest, None);
    assert_eq!(rows[1].latest.as_ref().map(|e| e.id), Some(2));
}

#[test]
fn test_recent_entries_limits_per_member() {
    let entries: Vec<WeighIn> = (1..=8)
        .map(|day| {
            let entry_date: Date = Date::from_calendar_date(2026, time::Month::March, day).unwrap();
            weigh_in(i64::from(day), 1, entry_date, 80.0)
        })
        .collect();

    let recent: Vec<WeighIn> = recent_entries(&entries, 1, 5);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].id, 8);
    assert!(recent_entries(&entries, 2, 5).is_empty());
}

#[test]
fn test_cycle_summary_buckets_points_by_week() {
    let calendar: CycleCalendar = CycleCalendar::new(date!(2026 - 01 - 05));
    let window: CycleWindow = calendar.locate(date!(2026 - 01 - 21));
    let events: Vec<PointEvent> = vec![
        point_event(1, date!(2026 - 01 - 05), 2),
        point_event(2, date!(2026 - 01 - 19), 3),
        point_event(3, date!(2026 - 01 - 21), 1),
        point_event(4, date!(2026 - 03 - 29), 5),
        // outside the cycle
        point_event(5, date!(2026 - 03 - 30), 100),
        point_event(6, date!(2026 - 01 - 04), 100),
    ];

    let summary: CycleSummary = summarize_cycle(&window, &events);

    assert_eq!(summary.weeks.len(), 12);
    assert_eq!(summary.weeks[0].points, 2);
    assert_eq!(summary.weeks[2].points, 4);
    assert_eq!(summary.weeks[11].points, 5);
    assert_eq!(summary.weeks[11].week_start, date!(2026 - 03 - 23));
    assert_eq!(summary.cycle_total, 11);
    assert_eq!(summary.current_week_points, 4);

    let ids: Vec<i64> = summary.current_week_events.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2]);
}

#[test]
fn test_training_week_bounds_by_offset() {
    let today: Date = date!(2026 - 01 - 21);
    assert_eq!(
        training_week_bounds(today, 0),
        (date!(2026 - 01 - 19), date!(2026 - 01 - 25))
    );
    assert_eq!(
        training_week_bounds(today, 2),
        (date!(2026 - 01 - 05), date!(2026 - 01 - 11))
    );
}

#[test]
fn test_training_week_totals_and_breakdown() {
    let sessions: Vec<TrainingSession> = vec![
        session(1, date!(2026 - 01 - 19), 30, Some("Run")),
        session(2, date!(2026 - 01 - 20), 60, Some("Bike")),
        session(3, date!(2026 - 01 - 21), 20, Some("Run")),
        session(4, date!(2026 - 01 - 22), 15, None),
        session(5, date!(2026 - 01 - 12), 90, Some("Swim")),
    ];

    let week: TrainingWeek = training_week(date!(2026 - 01 - 21), 0, &sessions);

    assert_eq!(week.sessions.len(), 4);
    assert_eq!(week.sessions[0].id, 4);
    assert_eq!(week.totals.minutes, 125);
    assert_eq!(week.totals.sessions, 4);
    assert!((week.totals.distance_km - 8.0).abs() < 1e-9);

    let names: Vec<&str> = week.by_sport.iter().map(|s| s.sport_name.as_str()).collect();
    assert_eq!(names, vec!["Bike", "Run", UNKNOWN_SPORT]);
    assert_eq!(week.by_sport[1].totals.minutes, 50);
}

#[test]
fn test_training_kpis_rolling_window() {
    let sessions: Vec<TrainingSession> = vec![
        session(1, date!(2026 - 01 - 21), 30, Some("Run")),
        session(2, date!(2026 - 01 - 15), 40, Some("Run")),
        session(3, date!(2026 - 01 - 14), 50, Some("Run")),
    ];

    let kpis: TrainingKpis = training_kpis(date!(2026 - 01 - 21), &sessions);

    assert_eq!(kpis.last_7_days_minutes, 70);
    assert_eq!(kpis.last_7_days_sessions, 2);
    assert_eq!(kpis.all_time_minutes, 120);
    assert_eq!(kpis.all_time_sessions, 3);
}
