// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Mock login sessions and their on-disk store.
//!
//! Sessions are demonstration artifacts: any username/password pair is
//! accepted and the resulting record expires after five minutes.  The store
//! persists a single JSON record under the user config directory and treats
//! every load failure as "no session".

mod record;
mod store;

pub use record::{SessionRecord, SessionUser, SESSION_TTL_SECS};
pub use store::SessionStore;
