// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-member potato point summaries over one cycle.

use crate::cycle::{CYCLE_WEEKS, CycleWindow, week_bounds, week_number_in_cycle};
use crate::types::PointEvent;
use serde::{Deserialize, Serialize};
use time::Date;

/// Points collected in one week of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPoints {
    /// Week number (1..=12).
    pub week_number: u8,
    /// Monday of the week.
    pub week_start: Date,
    /// Sunday of the week.
    pub week_end: Date,
    /// Sum of event points.
    pub points: i64,
}

/// A member's standing in the current cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleSummary {
    /// The cycle being summarised.
    pub window: CycleWindow,
    /// Always twelve rows, in week order.
    pub weeks: Vec<WeekPoints>,
    /// Sum over all twelve weeks.
    pub cycle_total: i64,
    /// Points of the current week.
    pub current_week_points: i64,
    /// Events of the current week, newest first.
    pub current_week_events: Vec<PointEvent>,
}

/// Summarises `events` against the cycle described by `window`.
///
/// Events dated outside the cycle are ignored.
#[must_use]
pub fn summarize_cycle(window: &CycleWindow, events: &[PointEvent]) -> CycleSummary {
    let mut weeks: Vec<WeekPoints> = (1..=CYCLE_WEEKS)
        .filter_map(|n| u8::try_from(n).ok())
        .map(|week_number| {
            let (week_start, week_end) = week_bounds(window.cycle_start, week_number);
            WeekPoints {
                week_number,
                week_start,
                week_end,
                points: 0,
            }
        })
        .collect();

    let in_cycle = events.iter().filter(|e| window.contains(e.occurred_on));
    for event in in_cycle.clone() {
        let week: u8 = week_number_in_cycle(event.occurred_on, window.cycle_start);
        if let Some(row) = weeks.get_mut(usize::from(week) - 1) {
            row.points += i64::from(event.points);
        }
    }

    let cycle_total: i64 = weeks.iter().map(|w| w.points).sum();
    let current_week_points: i64 = weeks
        .get(usize::from(window.week_number) - 1)
        .map_or(0, |w| w.points);

    let mut current_week_events: Vec<PointEvent> = in_cycle
        .filter(|e| window.week_contains(e.occurred_on))
        .cloned()
        .collect();
    current_week_events.sort_by(|a, b| {
        b.occurred_on
            .cmp(&a.occurred_on)
            .then_with(|| b.id.cmp(&a.id))
    });

    CycleSummary {
        window: *window,
        weeks,
        cycle_total,
        current_week_points,
        current_week_events,
    }
}
