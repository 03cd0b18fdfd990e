// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Source of "today" for cycle and training calculations.

use time::{Date, OffsetDateTime, UtcOffset};

/// Provides the current calendar day.
pub trait Clock: Send + Sync {
    /// Returns today's date.
    fn today(&self) -> Date;
}

/// Wall clock shifted to a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// Creates a clock for the given offset.
    #[must_use]
    pub const fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Creates a clock from a whole-hour offset.
    ///
    /// # Errors
    ///
    /// Returns an error if `hours` is outside -25..=25.
    pub fn from_hours(hours: i8) -> Result<Self, time::error::ComponentRange> {
        Ok(Self::new(UtcOffset::from_hms(hours, 0, 0)?))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}

/// Clock that always returns the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
