// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Multi-tap T9 digit resolution.
//!
//! A digit press either appends a fresh character or, when the same digit is
//! pressed again quickly enough, cycles the most recently edited slot through
//! that digit's letter set.  The resolver is pure state + timestamps: the
//! caller supplies `now`, nothing here reads the clock.

use std::time::{Duration, Instant};

/// How long a same-digit repeat still counts as cycling (strictly less-than).
pub const CYCLE_WINDOW: Duration = Duration::from_millis(800);

/// The dedicated delete key on the keypad.
pub const DELETE_KEY: char = '⌫';

/// Letters for a keypad digit.  `1` and `0` carry no letters; any other
/// non-digit returns `None`.  Fixed layout, no locale variants.
pub fn letters_for(digit: char) -> Option<&'static str> {
    match digit {
        '1' | '0' => Some(""),
        '2' => Some("abc"),
        '3' => Some("def"),
        '4' => Some("ghi"),
        '5' => Some("jkl"),
        '6' => Some("mno"),
        '7' => Some("pqrs"),
        '8' => Some("tuv"),
        '9' => Some("wxyz"),
        _ => None,
    }
}

/// A resolved slot mutation.  The editor applies it and maintains the
/// last-edit marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum T9Action {
    /// Clear the last non-empty cell.
    ClearLast,
    /// Fill the first empty cell with this character.
    Append(char),
    /// Replace the most recently edited cell with this character.
    ReplaceLastEdited(char),
}

#[derive(Debug, Clone, Copy)]
struct CycleState {
    digit: char,
    index: usize,
    at: Instant,
}

/// Maps a digit press (with repeat timing) to a concrete [`T9Action`].
#[derive(Debug)]
pub struct T9Resolver {
    window: Duration,
    last: Option<CycleState>,
}

impl Default for T9Resolver {
    fn default() -> Self {
        Self::new(CYCLE_WINDOW)
    }
}

impl T9Resolver {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Forget any in-progress cycle.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Resolve one press.
    ///
    /// `has_last_edit` tells the resolver whether a last-edited cell exists —
    /// cycling is only valid when there is a cell to replace.  Returns `None`
    /// for keys outside the keypad.
    pub fn press(
        &mut self,
        digit: char,
        long_press: bool,
        has_last_edit: bool,
        now: Instant,
    ) -> Option<T9Action> {
        if digit == DELETE_KEY {
            // Delete ignores long-press and leaves the cycle state alone.
            return Some(T9Action::ClearLast);
        }

        let letters = letters_for(digit)?;

        if long_press || letters.is_empty() {
            // Literal digit insert; any pending cycle is abandoned.
            self.last = None;
            return Some(T9Action::Append(digit));
        }

        let count = letters.chars().count();
        if let Some(prev) = self.last {
            if prev.digit == digit
                && now.duration_since(prev.at) < self.window
                && has_last_edit
            {
                let index = (prev.index + 1) % count;
                let ch = letters.chars().nth(index).unwrap_or('?');
                self.last = Some(CycleState { digit, index, at: now });
                return Some(T9Action::ReplaceLastEdited(ch));
            }
        }

        let ch = letters.chars().next().unwrap_or('?');
        self.last = Some(CycleState { digit, index: 0, at: now });
        Some(T9Action::Append(ch))
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
