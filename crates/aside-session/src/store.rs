// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! On-disk session store.
//!
//! One JSON file under the user config directory.  Loads never fail hard:
//! missing, unreadable, malformed or expired records all come back as
//! `None`, with the reason logged at debug level.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use tracing::debug;

use crate::record::SessionRecord;

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$XDG_CONFIG_HOME/aside/session.json`, falling back to
    /// `~/.aside/session.json` when no config directory is known.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join("aside").join("session.json"),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".aside")
                .join("session.json"),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the stored session, if any.  An expired record is removed from
    /// disk on the way out.
    pub fn load(&self) -> Option<SessionRecord> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no stored session");
                return None;
            }
        };
        let record: SessionRecord = match serde_json::from_str(&data) {
            Ok(record) => record,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "discarding malformed session");
                return None;
            }
        };
        if !record.is_valid(Utc::now()) {
            debug!(username = %record.user.username, "discarding expired session");
            let _ = self.clear();
            return None;
        }
        Some(record)
    }

    /// Persist a session record, creating parent directories as needed.
    pub fn save(&self, record: &SessionRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Remove the stored session.  Missing file is not an error.
    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("removing {}", self.path.display()))
            }
        }
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
