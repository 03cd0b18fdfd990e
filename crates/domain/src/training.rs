// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Training week view and KPIs.

use crate::cycle::week_start;
use crate::types::TrainingSession;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::{Date, Duration};

/// Maximum number of entries loaded for the training views.
pub const TRAINING_LIST_LIMIT: i64 = 2000;

/// Label used when a session's sport type no longer resolves.
pub const UNKNOWN_SPORT: &str = "—";

/// Days covered by the rolling KPI window, including today.
const ROLLING_WINDOW_DAYS: i64 = 7;

/// Returns the Monday and Sunday of the week `offset` weeks before the week
/// containing `today`.
#[must_use]
pub fn training_week_bounds(today: Date, offset: u32) -> (Date, Date) {
    let monday: Date = week_start(today).saturating_sub(Duration::weeks(i64::from(offset)));
    (monday, monday.saturating_add(Duration::days(6)))
}

/// Sums of a set of sessions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingTotals {
    /// Total minutes.
    pub minutes: i64,
    /// Total kilometres; sessions without distance count as 0.
    pub distance_km: f64,
    /// Number of sessions.
    pub sessions: usize,
}

impl TrainingTotals {
    fn add(&mut self, session: &TrainingSession) {
        self.minutes += i64::from(session.duration_min);
        self.distance_km += session.distance_km.unwrap_or(0.0);
        self.sessions += 1;
    }
}

/// Totals for one sport within the week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportBreakdown {
    /// Sport name, `"—"` when the sport type no longer resolves.
    pub sport_name: String,
    /// Sums for this sport.
    pub totals: TrainingTotals,
}

/// One week of training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingWeek {
    /// Monday of the week.
    pub week_start: Date,
    /// Sunday of the week.
    pub week_end: Date,
    /// Sessions of the week, newest first.
    pub sessions: Vec<TrainingSession>,
    /// Sums over the week.
    pub totals: TrainingTotals,
    /// Per-sport sums, most minutes first.
    pub by_sport: Vec<SportBreakdown>,
}

/// Builds the week view for `offset` weeks back from `today`.
#[must_use]
pub fn training_week(today: Date, offset: u32, sessions: &[TrainingSession]) -> TrainingWeek {
    let (monday, sunday) = training_week_bounds(today, offset);

    let mut week_sessions: Vec<TrainingSession> = sessions
        .iter()
        .filter(|s| s.occurred_on >= monday && s.occurred_on <= sunday)
        .cloned()
        .collect();
    week_sessions.sort_by(|a, b| {
        b.occurred_on
            .cmp(&a.occurred_on)
            .then_with(|| b.id.cmp(&a.id))
    });

    let mut totals: TrainingTotals = TrainingTotals::default();
    let mut per_sport: HashMap<String, TrainingTotals> = HashMap::new();
    for session in &week_sessions {
        totals.add(session);
        let name: String = session
            .sport_name
            .clone()
            .unwrap_or_else(|| String::from(UNKNOWN_SPORT));
        per_sport.entry(name).or_default().add(session);
    }

    let mut by_sport: Vec<SportBreakdown> = per_sport
        .into_iter()
        .map(|(sport_name, totals)| SportBreakdown { sport_name, totals })
        .collect();
    by_sport.sort_by(|a, b| {
        b.totals
            .minutes
            .cmp(&a.totals.minutes)
            .then_with(|| a.sport_name.cmp(&b.sport_name))
    });

    TrainingWeek {
        week_start: monday,
        week_end: sunday,
        sessions: week_sessions,
        totals,
        by_sport,
    }
}

/// Rolling and all-time headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingKpis {
    /// Minutes of the last seven days, today included.
    pub last_7_days_minutes: i64,
    /// Sessions of the last seven days, today included.
    pub last_7_days_sessions: usize,
    /// Minutes over all loaded sessions.
    pub all_time_minutes: i64,
    /// Number of loaded sessions.
    pub all_time_sessions: usize,
}

/// Computes the KPIs as of `today`.
#[must_use]
pub fn training_kpis(today: Date, sessions: &[TrainingSession]) -> TrainingKpis {
    let since: Date = today.saturating_sub(Duration::days(ROLLING_WINDOW_DAYS - 1));
    let recent: Vec<&TrainingSession> = sessions
        .iter()
        .filter(|s| s.occurred_on >= since)
        .collect();

    TrainingKpis {
        last_7_days_minutes: recent.iter().map(|s| i64::from(s.duration_min)).sum(),
        last_7_days_sessions: recent.len(),
        all_time_minutes: sessions.iter().map(|s| i64::from(s.duration_min)).sum(),
        all_time_sessions: sessions.len(),
    }
}
