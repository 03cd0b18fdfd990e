// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle calendar for the potato points game.
//!
//! Points are bucketed into Monday-aligned weeks, and weeks are grouped into
//! recurring 12-week cycles that start at a per-group anchor date.
//!
//! ## Invariants
//!
//! - A week always starts on Monday and spans Monday through Sunday
//! - A cycle always spans exactly 84 days and starts on a Monday
//! - Cycles are contiguous and aligned to the week containing the anchor
//! - The week number within a cycle is always in `1..=12`
//! - Dates before the anchor collapse into cycle 0 (and week 1)
//!
//! ## Calendar days only
//!
//! Every input is a calendar day. Nothing here looks at time-of-day or
//! timezones; the caller decides which local day "today" is.
//!
//! ## Example
//!
//! ```text
//! anchor       = 2026-01-05 (Monday)
//! 2026-01-05   -> cycle 2026-01-05..2026-03-29, week 1
//! 2026-03-23   -> cycle 2026-01-05..2026-03-29, week 12
//! 2026-03-30   -> cycle 2026-03-30..2026-06-21, week 1
//! 2026-01-04   -> clamped to cycle 2026-01-05, week 1
//! ```

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::macros::date;
use time::{Date, Duration};

/// Number of weeks in one cycle.
pub const CYCLE_WEEKS: i64 = 12;

/// Number of days in one cycle.
pub const CYCLE_DAYS: i64 = CYCLE_WEEKS * 7;

/// Anchor used when a group has not configured its own.
pub const DEFAULT_CYCLE_ANCHOR: Date = date!(2026 - 01 - 05);

/// Returns the Monday on or before `date`.
///
/// Sunday is the last day of the week, so a Sunday maps six days back.
#[must_use]
pub fn week_start(date: Date) -> Date {
    let days_since_monday: i64 = i64::from(date.weekday().number_days_from_monday());
    date.saturating_sub(Duration::days(days_since_monday))
}

/// Returns the Monday that begins the cycle containing `eval_date`.
///
/// The anchor does not need to be a Monday; it is aligned to its own week
/// first. Dates before the anchor return the aligned anchor rather than a
/// negative cycle.
#[must_use]
pub fn cycle_start(eval_date: Date, anchor: Date) -> Date {
    let aligned_anchor: Date = week_start(anchor);
    let delta_days: i64 = (week_start(eval_date) - aligned_anchor).whole_days();

    if delta_days < 0 {
        return aligned_anchor;
    }

    let weeks_since: i64 = delta_days / 7;
    let cycles_since: i64 = weeks_since / CYCLE_WEEKS;
    aligned_anchor.saturating_add(Duration::days(cycles_since * CYCLE_DAYS))
}

/// Returns the Sunday that ends the cycle starting at `cycle_start_date`.
#[must_use]
pub fn cycle_end(cycle_start_date: Date) -> Date {
    cycle_start_date.saturating_add(Duration::days(CYCLE_DAYS - 1))
}

/// Returns the 1-based week number of `eval_date` within the cycle that
/// starts at `cycle_start_date`.
///
/// Dates before the cycle start return 1. The result repeats every 12 weeks.
#[must_use]
pub fn week_number_in_cycle(eval_date: Date, cycle_start_date: Date) -> u8 {
    let delta_days: i64 = (week_start(eval_date) - cycle_start_date).whole_days();
    if delta_days < 0 {
        return 1;
    }

    let weeks: i64 = delta_days / 7;
    u8::try_from(weeks % CYCLE_WEEKS).map_or(1, |index| index + 1)
}

/// Returns the Monday and Sunday of week `week_number` in a cycle.
///
/// `week_number` is clamped to `1..=12`.
#[must_use]
pub fn week_bounds(cycle_start_date: Date, week_number: u8) -> (Date, Date) {
    let index: i64 = i64::from(week_number.clamp(1, 12)) - 1;
    let monday: Date = cycle_start_date.saturating_add(Duration::days(index * 7));
    (monday, monday.saturating_add(Duration::days(6)))
}

/// The placement of a single date within the cycle calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleWindow {
    /// First day (Monday) of the cycle.
    pub cycle_start: Date,
    /// Last day (Sunday) of the cycle.
    pub cycle_end: Date,
    /// Zero-based number of whole cycles since the anchor.
    pub cycle_index: u32,
    /// Week number within the cycle (1..=12).
    pub week_number: u8,
    /// Monday of the week containing the date.
    pub week_start: Date,
    /// Sunday of the week containing the date.
    pub week_end: Date,
    /// Whether the date precedes the anchor and was clamped into cycle 0.
    pub before_anchor: bool,
}

impl CycleWindow {
    /// Returns whether `date` lies within the cycle (inclusive).
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.cycle_start && date <= self.cycle_end
    }

    /// Returns whether `date` lies within the week of this window (inclusive).
    #[must_use]
    pub fn week_contains(&self, date: Date) -> bool {
        date >= self.week_start && date <= self.week_end
    }
}

/// Cycle calendar bound to one anchor date.
///
/// A group carries its own anchor; groups without one use
/// [`CycleCalendar::default`], which is anchored at [`DEFAULT_CYCLE_ANCHOR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleCalendar {
    anchor: Date,
}

impl Default for CycleCalendar {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_ANCHOR)
    }
}

impl CycleCalendar {
    /// Creates a calendar anchored at `anchor`.
    #[must_use]
    pub const fn new(anchor: Date) -> Self {
        Self { anchor }
    }

    /// Creates a calendar from an optional stored anchor, falling back to
    /// `fallback` when the group has none.
    #[must_use]
    pub fn from_optional(anchor: Option<Date>, fallback: Self) -> Self {
        anchor.map_or(fallback, Self::new)
    }

    /// Returns the anchor date as configured.
    #[must_use]
    pub const fn anchor(&self) -> Date {
        self.anchor
    }

    /// Returns the Monday of the week containing the anchor.
    #[must_use]
    pub fn aligned_anchor(&self) -> Date {
        week_start(self.anchor)
    }

    /// Returns whether `date` falls in a week before the anchor's week.
    #[must_use]
    pub fn is_before_anchor(&self, date: Date) -> bool {
        week_start(date) < self.aligned_anchor()
    }

    /// Returns the first day of the cycle containing `date`.
    #[must_use]
    pub fn cycle_start(&self, date: Date) -> Date {
        cycle_start(date, self.anchor)
    }

    /// Returns the zero-based cycle index of `date`.
    #[must_use]
    pub fn cycle_index(&self, date: Date) -> u32 {
        let delta_days: i64 = (self.cycle_start(date) - self.aligned_anchor()).whole_days();
        u32::try_from(delta_days / CYCLE_DAYS).unwrap_or(0)
    }

    /// Places `date` within the calendar.
    #[must_use]
    pub fn locate(&self, date: Date) -> CycleWindow {
        let start: Date = self.cycle_start(date);
        let week_number: u8 = week_number_in_cycle(date, start);
        let (week_monday, week_sunday) = week_bounds(start, week_number);

        CycleWindow {
            cycle_start: start,
            cycle_end: cycle_end(start),
            cycle_index: self.cycle_index(date),
            week_number,
            week_start: week_monday,
            week_end: week_sunday,
            before_anchor: self.is_before_anchor(date),
        }
    }

    /// Validates that an event dated `event_date` may be logged on `today`.
    ///
    /// The date must lie inside today's cycle and in the same week as today.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The date is outside the current cycle
    /// - The date is inside the cycle but in another week
    pub fn validate_event_date(
        &self,
        today: Date,
        event_date: Date,
    ) -> Result<CycleWindow, DomainError> {
        let current: CycleWindow = self.locate(today);

        // Rule: only dates of the current cycle
        if !current.contains(event_date) {
            return Err(DomainError::EventOutsideCycle {
                event_date,
                cycle_start: current.cycle_start,
                cycle_end: current.cycle_end,
            });
        }

        // Rule: only the current Monday-Sunday week
        let event_week: u8 = week_number_in_cycle(event_date, current.cycle_start);
        if event_week != current.week_number {
            return Err(DomainError::EventNotInCurrentWeek {
                event_date,
                event_week,
                current_week: current.week_number,
            });
        }

        Ok(current)
    }
}
