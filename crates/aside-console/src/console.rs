// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The console interpreter state.
//!
//! Output has two channels: `log` is append-only, `transient` is one line
//! that later writes replace in place (countdown uses it for the remaining
//! time so the log does not scroll one line per second).

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::command::CommandRegistry;
use crate::countdown::{format_remaining, next_new_year, Countdown, TICK_INTERVAL};

/// Interpreter plus all console-local UI state (input line, history).
pub struct Console {
    registry: CommandRegistry,
    log: Vec<String>,
    transient: Option<String>,
    history: Vec<String>,
    hist_idx: Option<usize>,
    input: String,
    tick_interval: Duration,
    countdown: Option<Countdown>,
    close_requested: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self::with_registry(CommandRegistry::with_builtins())
    }

    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self {
            registry,
            log: Vec::new(),
            transient: None,
            history: Vec::new(),
            hist_idx: None,
            input: String::new(),
            tick_interval: TICK_INTERVAL,
            countdown: None,
            close_requested: false,
        }
    }

    /// Override the countdown refresh interval (one second by default).
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    // ─── Output ───────────────────────────────────────────────────────────────

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn transient(&self) -> Option<&str> {
        self.transient.as_deref()
    }

    pub fn has_task(&self) -> bool {
        self.countdown.is_some()
    }

    /// Consume a pending close request from the `close` command.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    // ─── Input line ───────────────────────────────────────────────────────────

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn backspace_char(&mut self) {
        self.input.pop();
    }

    /// Recall the previous history entry (older), loading it into the input.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let idx = match self.hist_idx {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.hist_idx = Some(idx);
        self.input = self.history[idx].clone();
    }

    /// Recall the next history entry (newer); past the newest, the input
    /// clears and recall disengages.
    pub fn history_next(&mut self) {
        let Some(idx) = self.hist_idx else { return };
        if idx + 1 < self.history.len() {
            self.hist_idx = Some(idx + 1);
            self.input = self.history[idx + 1].clone();
        } else {
            self.hist_idx = None;
            self.input.clear();
        }
    }

    // ─── Interpreter ──────────────────────────────────────────────────────────

    /// Submit the current input line: echo, record history, then run it.
    /// A blank line is swallowed whole, no echo.
    pub fn submit(&mut self, now: Instant) {
        let line = std::mem::take(&mut self.input);
        self.hist_idx = None;
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.transient = None;
        self.log.push(format!("admin: {line}"));
        self.history.push(line.to_string());
        self.run(line, now);
    }

    /// Interpret one line.  Blank lines are ignored; unknown commands report
    /// to the log.
    pub fn run(&mut self, line: &str, now: Instant) {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else { return };
        let args: Vec<&str> = tokens.collect();

        let Some(cmd) = self.registry.get(name) else {
            self.log.push(format!("Unknown command: {name}"));
            return;
        };
        debug!(command = name, "executing console command");
        let effect = cmd.execute(&args, &self.registry);

        self.log.extend(effect.lines);
        if effect.start_countdown {
            self.start_countdown(now);
        }
        if effect.close {
            // Closing silently drops a running task, no ^C line.
            self.countdown = None;
            self.transient = None;
            self.close_requested = true;
        }
    }

    /// Cancel a running task the way a terminal interrupt would: the task
    /// dies, `^C` lands in the log and the transient line clears.  No-op
    /// when nothing is running.
    pub fn cancel(&mut self) {
        if self.countdown.take().is_some() {
            self.log.push("^C".to_string());
            self.transient = None;
        }
    }

    fn start_countdown(&mut self, now: Instant) {
        if self.countdown.is_some() {
            return;
        }
        let target = next_new_year(&Local::now());
        self.log.push(format!("Counting down to {}", target.to_rfc3339()));
        self.countdown = Some(Countdown::new(target, now, self.tick_interval));
    }

    // ─── Ticking ──────────────────────────────────────────────────────────────

    /// Deadline of the next countdown tick, if a task is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.countdown.as_ref().map(|c| c.next_tick())
    }

    /// Drive the running task against the real clock.
    pub fn tick(&mut self, now: Instant) {
        self.tick_at(now, Local::now());
    }

    fn tick_at(&mut self, now: Instant, wall: DateTime<Local>) {
        let Some(countdown) = self.countdown.as_mut() else { return };
        if !countdown.due(now) {
            return;
        }
        let remaining = (countdown.target().clone() - wall).num_seconds();
        if remaining <= 0 {
            // Completion appends to the log; the last transient line stays.
            self.countdown = None;
            self.log.push("Happy New Year!".to_string());
        } else {
            self.transient = Some(format_remaining(remaining));
            countdown.advance();
        }
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::TICK_INTERVAL;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn console() -> Console {
        Console::new()
    }

    #[test]
    fn print_echoes_its_arguments() {
        let mut c = console();
        c.run("print hello world", Instant::now());
        assert_eq!(c.log(), &["hello world"]);
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut c = console();
        c.run("frobnicate now", Instant::now());
        assert_eq!(c.log(), &["Unknown command: frobnicate"]);
    }

    #[test]
    fn blank_line_produces_no_output() {
        let mut c = console();
        c.run("   ", Instant::now());
        assert!(c.log().is_empty());
    }

    #[test]
    fn leading_whitespace_is_ignored_when_tokenising() {
        let mut c = console();
        c.run("  print  spaced   out ", Instant::now());
        assert_eq!(c.log(), &["spaced out"]);
    }

    #[test]
    fn help_lists_commands() {
        let mut c = console();
        c.run("help", Instant::now());
        assert_eq!(c.log()[0], "Commands:");
        assert!(c.log().len() > 1);
    }

    #[test]
    fn submit_echoes_the_line_and_records_history() {
        let mut c = console();
        c.push_char('p');
        c.push_char('r');
        c.push_char('i');
        c.push_char('n');
        c.push_char('t');
        c.push_char(' ');
        c.push_char('x');
        c.submit(Instant::now());
        assert_eq!(c.log(), &["admin: print x", "x"]);
        assert_eq!(c.input(), "");
        c.history_prev();
        assert_eq!(c.input(), "print x");
    }

    #[test]
    fn blank_submit_produces_no_output_at_all() {
        let mut c = console();
        c.submit(Instant::now());
        c.push_char(' ');
        c.push_char(' ');
        c.submit(Instant::now());
        assert!(c.log().is_empty(), "blank lines are dropped before the echo");
        c.history_prev();
        assert_eq!(c.input(), "", "empty history must not load anything");
    }

    #[test]
    fn submitted_lines_are_echoed_trimmed() {
        let mut c = console();
        c.input = "  help  ".to_string();
        c.submit(Instant::now());
        assert_eq!(c.log()[0], "admin: help");
        c.history_prev();
        assert_eq!(c.input(), "help");
    }

    #[test]
    fn history_recall_walks_older_then_newer() {
        let mut c = console();
        for line in ["help", "print a", "print b"] {
            c.input = line.to_string();
            c.submit(Instant::now());
        }
        c.history_prev();
        assert_eq!(c.input(), "print b");
        c.history_prev();
        assert_eq!(c.input(), "print a");
        c.history_next();
        assert_eq!(c.input(), "print b");
        c.history_next();
        assert_eq!(c.input(), "", "past the newest the input clears");
        c.history_prev();
        assert_eq!(c.input(), "print b", "recall re-engages at the newest");
    }

    #[test]
    fn history_prev_pins_at_the_oldest_entry() {
        let mut c = console();
        c.input = "help".to_string();
        c.submit(Instant::now());
        c.history_prev();
        c.history_prev();
        c.history_prev();
        assert_eq!(c.input(), "help");
    }

    #[test]
    fn countdown_starts_once_and_logs_the_target() {
        let mut c = console();
        let now = Instant::now();
        c.run("countdown", now);
        assert!(c.has_task());
        assert_eq!(c.log().len(), 1);
        assert!(c.log()[0].starts_with("Counting down to "));
        // Second invocation while running is a no-op.
        c.run("countdown", now);
        assert_eq!(c.log().len(), 1);
        assert!(c.has_task());
    }

    #[test]
    fn cancel_kills_the_task_and_logs_interrupt() {
        let mut c = console();
        let now = Instant::now();
        c.run("countdown", now);
        c.tick_at(now + TICK_INTERVAL, Local::now());
        assert!(c.transient().is_some());
        c.cancel();
        assert!(!c.has_task());
        assert_eq!(c.log().last().map(|s| s.as_str()), Some("^C"));
        assert!(c.transient().is_none());
    }

    #[test]
    fn cancel_without_a_task_is_silent() {
        let mut c = console();
        c.cancel();
        assert!(c.log().is_empty());
    }

    #[test]
    fn close_sets_the_flag_and_drops_the_task_without_interrupt_line() {
        let mut c = console();
        let now = Instant::now();
        c.run("countdown", now);
        c.run("close", now);
        assert!(!c.has_task());
        assert!(c.take_close_request());
        assert!(!c.take_close_request(), "request is consumed once");
        assert!(
            !c.log().iter().any(|l| l == "^C"),
            "close is not an interrupt"
        );
    }

    #[test]
    fn tick_updates_the_transient_line_in_place() {
        let mut c = console();
        let now = Instant::now();
        c.run("countdown", now);
        let log_len = c.log().len();
        let wall = Local.with_ymd_and_hms(2026, 12, 31, 23, 59, 0).unwrap();
        // Force a known target so the formatted output is deterministic.
        c.countdown = Some(Countdown::new(
            wall + ChronoDuration::seconds(90_061),
            now,
            TICK_INTERVAL,
        ));
        c.tick_at(now + TICK_INTERVAL, wall);
        assert_eq!(c.transient(), Some("1d 1h 1m 1s"));
        c.tick_at(now + TICK_INTERVAL * 2, wall + ChronoDuration::seconds(1));
        assert_eq!(c.transient(), Some("1d 1h 1m 0s"));
        assert_eq!(c.log().len(), log_len, "ticks never append to the log");
    }

    #[test]
    fn tick_before_the_deadline_does_nothing() {
        let mut c = console();
        let now = Instant::now();
        c.run("countdown", now);
        c.tick_at(now, Local::now());
        assert!(c.transient().is_none());
    }

    #[test]
    fn reaching_the_target_completes_the_task() {
        let mut c = console();
        let now = Instant::now();
        let wall = Local.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        c.countdown = Some(Countdown::new(wall, now, TICK_INTERVAL));
        c.tick_at(now + TICK_INTERVAL, wall + ChronoDuration::seconds(3));
        assert!(!c.has_task());
        assert_eq!(c.log().last().map(|s| s.as_str()), Some("Happy New Year!"));
        assert!(c.next_deadline().is_none());
    }
}
