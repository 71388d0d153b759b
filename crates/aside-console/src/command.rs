// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Console command trait and registry.
//!
//! Command names are matched case-sensitively against the exact first token
//! of the submitted line.  Commands do not mutate console state directly;
//! they return a [`CommandEffect`] and the console applies it, which keeps
//! every command stateless and testable.

use std::collections::HashMap;
use std::sync::Arc;

/// The effect(s) a command wants to produce when executed.
#[derive(Debug, Default)]
pub struct CommandEffect {
    /// Lines to append to the console log, in order.
    pub lines: Vec<String>,
    /// Request the countdown task to start (no-op when already running).
    pub start_countdown: bool,
    /// Request the console to close (mode deactivation, owned by the shell).
    pub close: bool,
}

/// A console command.
///
/// Implementations must be `Send + Sync` so they can be stored in the
/// registry behind an `Arc`.
pub trait ConsoleCommand: Send + Sync {
    /// The command keyword (first token of the line).
    fn name(&self) -> &'static str;

    /// Usage string shown by `help`, e.g. `"print <text>"`.
    fn usage(&self) -> &'static str {
        self.name()
    }

    /// One-line description shown by `help`.
    fn description(&self) -> &'static str;

    /// Execute with the already-tokenised arguments.
    fn execute(&self, args: &[&str], registry: &CommandRegistry) -> CommandEffect;
}

/// Central store of all registered console commands.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Arc<dyn ConsoleCommand>>,
}

impl CommandRegistry {
    pub fn empty() -> Self {
        Self { commands: HashMap::new() }
    }

    /// Create a registry pre-populated with the built-in command set.
    pub fn with_builtins() -> Self {
        let mut reg = Self::empty();
        reg.register(Arc::new(HelpCommand));
        reg.register(Arc::new(PrintCommand));
        reg.register(Arc::new(CountdownCommand));
        reg.register(Arc::new(CloseCommand));
        reg
    }

    /// Register a command.  Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Arc<dyn ConsoleCommand>) {
        self.commands.insert(cmd.name(), cmd);
    }

    /// Look up a command by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ConsoleCommand>> {
        self.commands.get(name).cloned()
    }

    /// All registered commands sorted by name, for help rendering.
    pub fn sorted(&self) -> Vec<Arc<dyn ConsoleCommand>> {
        let mut cmds: Vec<_> = self.commands.values().cloned().collect();
        cmds.sort_by_key(|c| c.name());
        cmds
    }
}

// ─── Built-ins ────────────────────────────────────────────────────────────────

struct HelpCommand;

impl ConsoleCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }
    fn description(&self) -> &'static str {
        "Show this help"
    }
    fn execute(&self, _args: &[&str], registry: &CommandRegistry) -> CommandEffect {
        let mut lines = vec!["Commands:".to_string()];
        for cmd in registry.sorted() {
            lines.push(format!("  {:<18} {}", cmd.usage(), cmd.description()));
        }
        CommandEffect { lines, ..Default::default() }
    }
}

struct PrintCommand;

impl ConsoleCommand for PrintCommand {
    fn name(&self) -> &'static str {
        "print"
    }
    fn usage(&self) -> &'static str {
        "print <text>"
    }
    fn description(&self) -> &'static str {
        "Echo text"
    }
    fn execute(&self, args: &[&str], _registry: &CommandRegistry) -> CommandEffect {
        CommandEffect {
            lines: vec![args.join(" ")],
            ..Default::default()
        }
    }
}

struct CountdownCommand;

impl ConsoleCommand for CountdownCommand {
    fn name(&self) -> &'static str {
        "countdown"
    }
    fn description(&self) -> &'static str {
        "Count down to New Year (Ctrl+C/swipe to cancel)"
    }
    fn execute(&self, _args: &[&str], _registry: &CommandRegistry) -> CommandEffect {
        CommandEffect { start_countdown: true, ..Default::default() }
    }
}

struct CloseCommand;

impl ConsoleCommand for CloseCommand {
    fn name(&self) -> &'static str {
        "close"
    }
    fn description(&self) -> &'static str {
        "Exit admin mode"
    }
    fn execute(&self, _args: &[&str], _registry: &CommandRegistry) -> CommandEffect {
        CommandEffect { close: true, ..Default::default() }
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
