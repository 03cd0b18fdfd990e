// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-day parsing and formatting at the input boundary.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// `YYYY-MM-DD`, the only date representation accepted or produced.
const CALENDAR_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` string into a calendar date.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_calendar_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), CALENDAR_DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_calendar_date(date: Date) -> String {
    // Date::format only fails for components the format does not request.
    date.format(CALENDAR_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
