// Copyright (C) 2026 The weighcrew developers
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `users` - Users, profiles and sessions
//! - `groups` - Groups and memberships
//! - `weigh_ins` - Weigh-in history
//! - `potato` - Potato rules and events
//! - `training` - Sport types and training entries
//!
//! Rows are read into private `Queryable` structs and converted into the
//! public `*Data` types, parsing stored calendar dates on the way out.

pub mod groups;
pub mod potato;
pub mod training;
pub mod users;
pub mod weigh_ins;
