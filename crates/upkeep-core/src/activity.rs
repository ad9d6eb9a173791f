//! Activity feed entries.
//!
//! An [`AgentActivity`] is an immutable, timestamped log line. Storage and
//! ordering (the control room keeps newest first) belong to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clock::{Clock, IdGenerator};
use crate::error::ValidationError;

/// Severity of an activity entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Info,
    Success,
    Warning,
}

impl Default for ActivityLevel {
    fn default() -> Self {
        ActivityLevel::Info
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityLevel::Info => "info",
            ActivityLevel::Success => "success",
            ActivityLevel::Warning => "warning",
        })
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(ActivityLevel::Info),
            "success" => Ok(ActivityLevel::Success),
            "warning" => Ok(ActivityLevel::Warning),
            other => Err(ValidationError::InvalidValue {
                field: "level".to_string(),
                message: format!("expected info, success or warning, got '{other}'"),
            }),
        }
    }
}

/// A single line in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentActivity {
    pub id: String,
    pub message: String,
    pub level: ActivityLevel,
    /// RFC 3339 on the wire
    pub timestamp: DateTime<Utc>,
}

impl AgentActivity {
    /// Relative age label such as "5m ago".
    ///
    /// Elapsed time is treated as at least one millisecond, so entries from
    /// the future still render.
    pub fn age_label(&self, now: DateTime<Utc>) -> String {
        let diff_ms = (now - self.timestamp).num_milliseconds().max(1);
        let minutes = (diff_ms as f64 / 1000.0 / 60.0).round() as i64;
        if minutes < 1 {
            return "just now".to_string();
        }
        if minutes < 60 {
            return format!("{minutes}m ago");
        }
        let hours = (minutes as f64 / 60.0).round() as i64;
        if hours < 24 {
            return format!("{hours}h ago");
        }
        let days = (hours as f64 / 24.0).round() as i64;
        format!("{days}d ago")
    }
}

/// Stamps messages into activity entries.
pub struct ActivityFactory<C, G> {
    clock: C,
    ids: G,
}

impl<C: Clock, G: IdGenerator> ActivityFactory<C, G> {
    pub fn new(clock: C, ids: G) -> Self {
        Self { clock, ids }
    }

    /// Create an entry at the given level.
    ///
    /// Reads the clock once and draws one fresh id.
    pub fn create(&self, message: impl Into<String>, level: ActivityLevel) -> AgentActivity {
        AgentActivity {
            id: self.ids.next_id("activity"),
            message: message.into(),
            level,
            timestamp: self.clock.now(),
        }
    }

    /// Create an `info` entry.
    pub fn info(&self, message: impl Into<String>) -> AgentActivity {
        self.create(message, ActivityLevel::default())
    }
}
