// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Input-resolution core for the aside landing widget.
//!
//! Three concurrent input channels (physical keyboard, multi-tap T9 keypad,
//! pointer gestures) are reconciled into a single ordered sequence of
//! mutations against a fixed five-slot letter buffer.  Everything in this
//! crate is deliberately clock-free: components that need time take an
//! explicit `Instant` and expose their next pending deadline, so the shell
//! owns the one real timer and every state machine is testable in isolation.

mod editor;
mod gesture;
mod modes;
mod slots;
mod t9;

pub use editor::SlotEditor;
pub use gesture::{
    DigitPress, GestureTracker, PointerKind, Swipe, SwipeTracker, DRAG_CANCEL_PX,
    LONG_PRESS_WINDOW, SWIPE_PX,
};
pub use modes::{ActivationDebounce, ModeDescriptor, ModeRegistry, AUTO_ACTIVATE_DELAY};
pub use slots::{SlotBuffer, MAX_LEN};
pub use t9::{letters_for, T9Action, T9Resolver, CYCLE_WINDOW, DELETE_KEY};
