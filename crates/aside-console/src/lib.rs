// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The admin console: a tiny command interpreter with one cancellable
//! background task (the New Year countdown).
//!
//! Built-in commands are registered at startup in a [`CommandRegistry`];
//! commands are stateless and return a [`CommandEffect`] which the
//! [`Console`] applies.  Output is modelled as two explicit channels: an
//! append-only log and a single replaceable transient line.

mod command;
mod console;
mod countdown;

pub use command::{CommandEffect, CommandRegistry, ConsoleCommand};
pub use console::Console;
pub use countdown::{format_remaining, next_new_year, Countdown, TICK_INTERVAL};
