// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use weighcrew_persistence::Persistence;

use super::helpers::{create_test_persistence, register_user};
use crate::{
    AddWeighInRequest, ApiError, AuthenticatedUser, UpdateTargetWeightRequest,
    UpdateWeighInRequest, WeighInDashboardResponse, WeighInInfo, add_weigh_in, delete_weigh_in,
    list_weigh_ins, update_target_weight, update_weigh_in, weigh_in_dashboard,
};

fn weigh(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    entry_date: &str,
    weight_kg: f64,
) -> Result<WeighInInfo, ApiError> {
    add_weigh_in(
        persistence,
        user,
        &AddWeighInRequest {
            entry_date: String::from(entry_date),
            weight_kg,
        },
    )
}

#[test]
fn test_add_weigh_in_rejects_duplicate_day() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedUser = register_user(&mut persistence, "anna");

    weigh(&mut persistence, &user, "2026-01-05", 82.4).unwrap();
    let duplicate = weigh(&mut persistence, &user, "2026-01-05", 82.0);

    assert!(matches!(
        duplicate,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "one_weigh_in_per_day"
    ));
}

#[test]
fn test_add_weigh_in_validates_input() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedUser = register_user(&mut persistence, "anna");

    let bad_weight = weigh(&mut persistence, &user, "2026-01-05", -1.0);
    assert!(matches!(
        bad_weight,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "weight_kg"
    ));

    let bad_date = weigh(&mut persistence, &user, "05.01.2026", 80.0);
    assert!(matches!(
        bad_date,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

#[test]
fn test_update_and_delete_only_own_entries() {
    let mut persistence: Persistence = create_test_persistence();
    let anna: AuthenticatedUser = register_user(&mut persistence, "anna");
    let ben: AuthenticatedUser = register_user(&mut persistence, "ben");
    let entry: WeighInInfo = weigh(&mut persistence, &anna, "2026-01-05", 82.4).unwrap();

    let foreign = update_weigh_in(
        &mut persistence,
        &ben,
        entry.weigh_in_id,
        &UpdateWeighInRequest { weight_kg: 60.0 },
    );
    assert!(matches!(foreign, Err(ApiError::ResourceNotFound { .. })));
    let foreign_delete = delete_weigh_in(&mut persistence, &ben, entry.weigh_in_id);
    assert!(matches!(foreign_delete, Err(ApiError::ResourceNotFound { .. })));

    update_weigh_in(
        &mut persistence,
        &anna,
        entry.weigh_in_id,
        &UpdateWeighInRequest { weight_kg: 81.9 },
    )
    .unwrap();
    let entries: Vec<WeighInInfo> = list_weigh_ins(&mut persistence, &anna).unwrap().entries;
    assert_eq!(entries.len(), 1);
    assert!((entries[0].weight_kg - 81.9).abs() < f64::EPSILON);

    delete_weigh_in(&mut persistence, &anna, entry.weigh_in_id).unwrap();
    assert!(list_weigh_ins(&mut persistence, &anna).unwrap().entries.is_empty());
}

#[test]
fn test_dashboard_stats_and_chart_paging() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedUser = register_user(&mut persistence, "anna");
    update_target_weight(
        &mut persistence,
        &user,
        &UpdateTargetWeightRequest {
            target_weight_kg: Some(80.0),
        },
    )
    .unwrap();

    for d in 1..=12_u8 {
        let date: String = format!("2026-01-{d:02}");
        weigh(&mut persistence, &user, &date, 90.0 - f64::from(d) * 0.5).unwrap();
    }

    let dashboard: WeighInDashboardResponse =
        weigh_in_dashboard(&mut persistence, &user, 0).unwrap();

    let latest: &WeighInInfo = dashboard.latest.as_ref().unwrap();
    assert_eq!(latest.entry_date, "2026-01-12");
    assert_eq!(
        dashboard.previous_week.as_ref().unwrap().entry_date,
        "2026-01-05"
    );
    assert_eq!(dashboard.diff_to_goal, Some(4.0));
    assert_eq!(dashboard.diff_to_previous_week, Some(-3.5));

    assert_eq!(dashboard.chart.max_offset, 2);
    assert_eq!(dashboard.chart.page_count, 2);
    assert_eq!(dashboard.chart.older_offset, 2);
    assert_eq!(dashboard.chart.newer_offset, 0);
    assert_eq!(dashboard.chart_points.len(), 10);
    assert_eq!(dashboard.chart_points[0].entry_date, "2026-01-03");
    assert_eq!(dashboard.chart_points[9].entry_date, "2026-01-12");

    let oldest: WeighInDashboardResponse =
        weigh_in_dashboard(&mut persistence, &user, 50).unwrap();
    assert_eq!(oldest.chart.offset, 2);
    assert_eq!(oldest.chart_points[0].entry_date, "2026-01-01");
    assert_eq!(oldest.chart_points[9].entry_date, "2026-01-10");
}

#[test]
fn test_dashboard_without_entries() {
    let mut persistence: Persistence = create_test_persistence();
    let user: AuthenticatedUser = register_user(&mut persistence, "anna");

    let dashboard: WeighInDashboardResponse =
        weigh_in_dashboard(&mut persistence, &user, 0).unwrap();

    assert_eq!(dashboard.latest, None);
    assert_eq!(dashboard.diff_to_goal, None);
    assert_eq!(dashboard.chart.page_count, 0);
    assert!(dashboard.chart_points.is_empty());
}
