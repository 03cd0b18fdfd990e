// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Weigh-in statistics for the personal and group dashboards.
//!
//! All functions are pure and operate on entries already loaded from
//! persistence. Lists are expected newest first unless stated otherwise.

use crate::types::{Member, WeighIn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use time::{Date, Duration};

/// Number of recent entries shown per member on the group dashboard.
pub const RECENT_ENTRIES_PER_MEMBER: usize = 5;

/// Headline numbers for a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeighInStats {
    /// Most recent entry.
    pub latest: Option<WeighIn>,
    /// Newest entry at least seven days older than `latest`.
    pub previous_week: Option<WeighIn>,
    /// `latest - target`, when both are known.
    pub diff_to_goal: Option<f64>,
    /// `latest - previous_week`, when both are known.
    pub diff_to_previous_week: Option<f64>,
}

/// Computes the dashboard statistics from a newest-first list.
#[must_use]
pub fn weigh_in_stats(entries_desc: &[WeighIn], target_weight_kg: Option<f64>) -> WeighInStats {
    let latest: Option<&WeighIn> = entries_desc.first();
    let previous_week: Option<&WeighIn> = latest.and_then(|latest| {
        let cutoff: Date = latest.entry_date.saturating_sub(Duration::days(7));
        entries_desc.iter().find(|e| e.entry_date <= cutoff)
    });

    let diff_to_goal: Option<f64> = latest
        .zip(target_weight_kg)
        .map(|(latest, target)| latest.weight_kg - target);
    let diff_to_previous_week: Option<f64> = latest
        .zip(previous_week)
        .map(|(latest, previous)| latest.weight_kg - previous.weight_kg);

    WeighInStats {
        latest: latest.cloned(),
        previous_week: previous_week.cloned(),
        diff_to_goal,
        diff_to_previous_week,
    }
}

/// Returns the distinct entry dates, newest first.
#[must_use]
pub fn distinct_dates_desc(entries: &[WeighIn]) -> Vec<Date> {
    let dates: BTreeSet<Date> = entries.iter().map(|e| e.entry_date).collect();
    dates.into_iter().rev().collect()
}

/// One date of the multi-member chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupChartRow {
    /// The entry date.
    pub entry_date: Date,
    /// One value per member, in member order; `None` where nobody weighed in.
    pub values: Vec<Option<f64>>,
}

/// Builds chart rows for `dates`, one column per member.
///
/// Rows keep the order of `dates`.
#[must_use]
pub fn group_chart_rows(
    members: &[Member],
    entries: &[WeighIn],
    dates: &[Date],
) -> Vec<GroupChartRow> {
    let by_user_and_date: HashMap<(i64, Date), f64> = entries
        .iter()
        .map(|e| ((e.user_id, e.entry_date), e.weight_kg))
        .collect();

    dates
        .iter()
        .map(|date| GroupChartRow {
            entry_date: *date,
            values: members
                .iter()
                .map(|m| by_user_and_date.get(&(m.user_id, *date)).copied())
                .collect(),
        })
        .collect()
}

/// A member together with their newest weigh-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberLatest {
    /// The member.
    pub member: Member,
    /// Their newest entry, if any.
    pub latest: Option<WeighIn>,
}

/// Returns the newest entry of every member, sorted by display name.
#[must_use]
pub fn latest_per_member(members: &[Member], entries: &[WeighIn]) -> Vec<MemberLatest> {
    let mut latest_by_user: HashMap<i64, &WeighIn> = HashMap::new();
    for entry in entries {
        latest_by_user
            .entry(entry.user_id)
            .and_modify(|current| {
                if entry.entry_date > current.entry_date {
                    *current = entry;
                }
            })
            .or_insert(entry);
    }

    let mut rows: Vec<MemberLatest> = members
        .iter()
        .map(|m| MemberLatest {
            member: m.clone(),
            latest: latest_by_user.get(&m.user_id).map(|e| (*e).clone()),
        })
        .collect();
    rows.sort_by(|a, b| {
        a.member
            .display_name
            .to_lowercase()
            .cmp(&b.member.display_name.to_lowercase())
    });
    rows
}

/// Returns up to `limit` newest entries of `user_id`.
#[must_use]
pub fn recent_entries(entries: &[WeighIn], user_id: i64, limit: usize) -> Vec<WeighIn> {
    let mut own: Vec<WeighIn> = entries
        .iter()
        .filter(|e| e.user_id == user_id)
        .cloned()
        .collect();
    own.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
    own.truncate(limit);
    own
}
