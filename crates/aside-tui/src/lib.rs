// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Terminal front-end: the hero screen with the slot buffer and keypad, the
//! admin console view and the login form, glued to the core state machines
//! by a single deadline-driven event loop.

mod app;
mod keys;
mod layout;
mod widgets;

pub use app::App;
pub use keys::{map_key, Action, ViewKind};
