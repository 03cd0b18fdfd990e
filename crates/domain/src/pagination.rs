// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed-size windows over newest-first lists.
//!
//! Charts page through their data ten items at a time. Offset 0 is the newest
//! page; larger offsets move towards older data. Offsets beyond the oldest
//! full window are clamped, so the last page always holds a full window when
//! enough items exist.

use serde::{Deserialize, Serialize};

/// Number of items shown per chart page.
pub const CHART_WINDOW: usize = 10;

/// A window position over a list of `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartWindow {
    /// Total number of items.
    pub len: usize,
    /// Requested offset (0 = newest).
    pub offset: usize,
    /// Window size.
    pub size: usize,
}

impl ChartWindow {
    /// Creates a window of [`CHART_WINDOW`] items at `offset`.
    #[must_use]
    pub const fn new(len: usize, offset: usize) -> Self {
        Self {
            len,
            offset,
            size: CHART_WINDOW,
        }
    }

    /// Largest offset that still yields a full window.
    #[must_use]
    pub const fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.size)
    }

    /// Offset after clamping to [`Self::max_offset`].
    #[must_use]
    pub fn effective_offset(&self) -> usize {
        self.offset.min(self.max_offset())
    }

    /// Number of pages; zero for an empty list.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.len.div_ceil(self.size)
    }

    /// Zero-based page of the effective offset.
    #[must_use]
    pub fn current_page(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.effective_offset() / self.size
    }

    /// Offset one page towards older data.
    #[must_use]
    pub fn older(&self) -> usize {
        (self.offset + self.size).min(self.max_offset())
    }

    /// Offset one page towards newer data.
    #[must_use]
    pub const fn newer(&self) -> usize {
        self.offset.saturating_sub(self.size)
    }

    /// Offset of page `page`, clamped to the available pages.
    #[must_use]
    pub fn jump_to_page(&self, page: usize) -> usize {
        let last_page: usize = self.page_count().saturating_sub(1);
        page.min(last_page) * self.size
    }

    /// Returns the window's slice of a newest-first list.
    #[must_use]
    pub fn slice<'a, T>(&self, items_desc: &'a [T]) -> &'a [T] {
        let start: usize = self.effective_offset().min(items_desc.len());
        let end: usize = (start + self.size).min(items_desc.len());
        &items_desc[start..end]
    }
}
