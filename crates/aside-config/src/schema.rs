// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_word() -> String {
    "aside".to_string()
}

fn default_t9_cycle_ms() -> u64 {
    800
}

fn default_long_press_ms() -> u64 {
    450
}

fn default_drag_cancel_px() -> u32 {
    10
}

fn default_swipe_px() -> u32 {
    40
}

fn default_keypad_sticky_ms() -> u64 {
    500
}

fn default_auto_activate_ms() -> u64 {
    500
}

fn default_countdown_tick_ms() -> u64 {
    1000
}

fn default_ttl_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The word shown in the slots at startup.  Longer words are truncated
    /// to the slot count; non-alphanumeric characters are dropped.
    #[serde(default = "default_word")]
    pub word: String,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word: default_word(),
            timing: TimingConfig::default(),
            session: SessionConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

/// Every interaction timing in one table so they can be tuned together.
/// Distances are in terminal cells, not pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Window within which repeated presses of the same digit cycle its
    /// letters instead of appending.
    #[serde(default = "default_t9_cycle_ms")]
    pub t9_cycle_ms: u64,
    /// Hold duration after which a keypad press inserts the literal digit.
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
    /// Pointer travel that cancels a pending long press.
    #[serde(default = "default_drag_cancel_px")]
    pub drag_cancel_px: u32,
    /// Minimum leftward travel recognised as a swipe.
    #[serde(default = "default_swipe_px")]
    pub swipe_px: u32,
    /// How long the keypad stays visible after the buffer fills.
    #[serde(default = "default_keypad_sticky_ms")]
    pub keypad_sticky_ms: u64,
    /// Debounce before a matching word auto-activates its mode.
    #[serde(default = "default_auto_activate_ms")]
    pub auto_activate_ms: u64,
    /// Countdown refresh interval.
    #[serde(default = "default_countdown_tick_ms")]
    pub countdown_tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            t9_cycle_ms: default_t9_cycle_ms(),
            long_press_ms: default_long_press_ms(),
            drag_cancel_px: default_drag_cancel_px(),
            swipe_px: default_swipe_px(),
            keypad_sticky_ms: default_keypad_sticky_ms(),
            auto_activate_ms: default_auto_activate_ms(),
            countdown_tick_ms: default_countdown_tick_ms(),
        }
    }
}

impl TimingConfig {
    pub fn t9_cycle(&self) -> Duration {
        Duration::from_millis(self.t9_cycle_ms)
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn keypad_sticky(&self) -> Duration {
        Duration::from_millis(self.keypad_sticky_ms)
    }

    pub fn auto_activate(&self) -> Duration {
        Duration::from_millis(self.auto_activate_ms)
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file path override.  Defaults to the user config directory.
    pub file: Option<String>,
    /// Mock session lifetime.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { file: None, ttl_secs: default_ttl_secs() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Draw plain ASCII borders instead of Unicode box drawing.
    #[serde(default)]
    pub ascii_borders: bool,
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
