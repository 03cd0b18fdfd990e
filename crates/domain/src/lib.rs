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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cycle;
mod dates;
mod error;
mod pagination;
mod points;
mod training;
mod types;
mod validation;
mod weigh_in;

#[cfg(test)]
mod tests;

pub use cycle::{
    CYCLE_DAYS, CYCLE_WEEKS, CycleCalendar, CycleWindow, DEFAULT_CYCLE_ANCHOR, cycle_end,
    cycle_start, week_bounds, week_number_in_cycle, week_start,
};
pub use dates::{format_calendar_date, parse_calendar_date};
pub use pagination::{CHART_WINDOW, ChartWindow};
pub use points::{CycleSummary, WeekPoints, summarize_cycle};
pub use training::{
    SportBreakdown, TRAINING_LIST_LIMIT, TrainingKpis, TrainingTotals, TrainingWeek,
    UNKNOWN_SPORT, training_kpis, training_week, training_week_bounds,
};
pub use weigh_in::{
    GroupChartRow, MemberLatest, RECENT_ENTRIES_PER_MEMBER, WeighInStats, distinct_dates_desc,
    group_chart_rows, latest_per_member, recent_entries, weigh_in_stats,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Member, MemberRole, PointEvent, TrainingSession, UNNAMED_MEMBER, WeighIn, safe_display_name,
};
pub use validation::{
    ALLOWED_AVATAR_TYPES, INTENSITY_RANGE, MIN_GROUP_CODE_LENGTH, MIN_NAME_LENGTH, TrainingFields,
    avatar_storage_path, normalize_group_code, validate_avatar_content_type,
    validate_display_name, validate_group_name, validate_join_code, validate_rule_title,
    validate_sport_type_name, validate_target_weight, validate_training_fields, validate_weight,
};
