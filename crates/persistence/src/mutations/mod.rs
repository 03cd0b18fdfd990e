// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! This module contains all state-changing operations. Mutations use Diesel
//! DSL, reaching for backend helpers (e.g. `last_insert_rowid()`) only
//! through [`crate::backend::PersistenceBackend`].
//!
//! ## Ownership Filters
//!
//! Updates and deletes of user-owned rows filter on both the row ID and the
//! owning user. A row owned by someone else is indistinguishable from a
//! missing row and yields `PersistenceError::NotFound`.

pub mod groups;
pub mod potato;
pub mod training;
pub mod users;
pub mod weigh_ins;

use crate::error::PersistenceError;

/// Maps a zero-row update or delete to `NotFound`.
pub(crate) fn require_affected(rows: usize, what: &str) -> Result<(), PersistenceError> {
    if rows == 0 {
        return Err(PersistenceError::NotFound(format!("{what} not found")));
    }
    Ok(())
}
