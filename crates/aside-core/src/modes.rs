// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Mode registry: trigger words to alternate interaction surfaces.
//!
//! The registry is constructed once at startup and injected into the shell —
//! there is no module-level global.  Lookup happens on every buffer change
//! and on explicit submit; the touch path additionally auto-activates through
//! a debounce so transient intermediate words don't trigger early.

use std::time::{Duration, Instant};

/// Delay before a matching buffer word auto-activates its mode.
pub const AUTO_ACTIVATE_DELAY: Duration = Duration::from_millis(500);

/// A registered mode: a name and the word that summons it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeDescriptor {
    pub name: String,
    pub trigger_word: String,
}

/// Mapping from trigger word to mode descriptor.
///
/// First registered match wins on duplicate trigger words (names are unique
/// by construction, so this should not occur).
#[derive(Debug, Default)]
pub struct ModeRegistry {
    modes: Vec<ModeDescriptor>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, trigger_word: &str) {
        self.modes.push(ModeDescriptor {
            name: name.to_string(),
            trigger_word: trigger_word.to_string(),
        });
    }

    /// Case-insensitive exact match against the trigger word.
    pub fn lookup_by_word(&self, word: &str) -> Option<&ModeDescriptor> {
        self.modes
            .iter()
            .find(|m| m.trigger_word.eq_ignore_ascii_case(word))
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&ModeDescriptor> {
        self.modes.iter().find(|m| m.name == name)
    }
}

// ─── Auto-activation debounce ─────────────────────────────────────────────────

/// Arms a deadline when the buffer word matches a trigger; disarmed the
/// moment the word changes or a mode activates first, so the deadline can
/// never fire against stale state.
#[derive(Debug)]
pub struct ActivationDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for ActivationDebounce {
    fn default() -> Self {
        Self::new(AUTO_ACTIVATE_DELAY)
    }
}

impl ActivationDebounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Record the current match state.  A new match arms the deadline; the
    /// same mode matching again leaves the running deadline alone; no match
    /// disarms.
    pub fn note_word(&mut self, matched: Option<&ModeDescriptor>, now: Instant) {
        match matched {
            None => self.pending = None,
            Some(mode) => {
                let already_armed = self
                    .pending
                    .as_ref()
                    .is_some_and(|(name, _)| *name == mode.name);
                if !already_armed {
                    self.pending = Some((mode.name.clone(), now + self.delay));
                }
            }
        }
    }

    /// Take the mode name once its deadline has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {
                self.pending.take().map(|(name, _)| name)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, d)| *d)
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
