//! Maintenance task types.
//!
//! A [`MaintenanceTask`] is a unit of website-maintenance work shown on the
//! control room board. The engine reads task lists and synthesizes new tasks,
//! but never mutates an existing task; status changes go through
//! [`TaskStatus::can_transition_to`] and are applied by the caller.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::activity::ActivityLevel;
use crate::error::{Result, ValidationError};

/// Maintenance area a task belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Performance,
    Seo,
    Accessibility,
    Content,
    Devops,
}

impl TaskCategory {
    /// All categories in board order.
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Performance,
        TaskCategory::Seo,
        TaskCategory::Accessibility,
        TaskCategory::Content,
        TaskCategory::Devops,
    ];

    /// Wire name, as used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Performance => "performance",
            TaskCategory::Seo => "seo",
            TaskCategory::Accessibility => "accessibility",
            TaskCategory::Content => "content",
            TaskCategory::Devops => "devops",
        }
    }

    /// Human-facing label used in generated task titles.
    pub fn label(&self) -> &'static str {
        match self {
            TaskCategory::Performance => "Performance",
            TaskCategory::Seo => "SEO",
            TaskCategory::Accessibility => "Accessibility",
            TaskCategory::Content => "Content",
            TaskCategory::Devops => "DevOps",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status enumeration.
///
/// Transitions mirror the controls offered on each board column:
///
///   BACKLOG ──Start──> IN-PROGRESS ──Complete──> DONE
///      ^                 |     ^                   |
///      |               Block  Unblock              |
///      |                 v     |                   |
///      +─────Defer───── BLOCKED                    |
///      +──────────────────Reopen───────────────────+
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Queued, not started (initial state for new tasks)
    Backlog,
    /// Actively worked on
    InProgress,
    /// Waiting on something outside the team
    Blocked,
    /// Shipped
    Done,
}

/// A board control: the button label and the status it moves a task to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusControl {
    pub label: &'static str,
    pub target: TaskStatus,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Backlog,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];

    /// Wire name, as used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
        }
    }

    /// Board column title.
    pub fn column_title(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Blocked => "Blocked",
            TaskStatus::Done => "Shipped",
        }
    }

    /// Controls available to a task in this status.
    pub fn controls(&self) -> &'static [StatusControl] {
        match self {
            TaskStatus::Backlog => &[StatusControl {
                label: "Start",
                target: TaskStatus::InProgress,
            }],
            TaskStatus::InProgress => &[
                StatusControl {
                    label: "Complete",
                    target: TaskStatus::Done,
                },
                StatusControl {
                    label: "Block",
                    target: TaskStatus::Blocked,
                },
            ],
            TaskStatus::Blocked => &[
                StatusControl {
                    label: "Unblock",
                    target: TaskStatus::InProgress,
                },
                StatusControl {
                    label: "Defer",
                    target: TaskStatus::Backlog,
                },
            ],
            TaskStatus::Done => &[StatusControl {
                label: "Reopen",
                target: TaskStatus::Backlog,
            }],
        }
    }

    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskStatus) -> bool {
        self.controls().iter().any(|c| c.target == *to)
    }

    /// Phrase used in the activity feed when a task enters this status.
    pub fn activity_phrase(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "reset to backlog",
            TaskStatus::InProgress => "moved to active work",
            TaskStatus::Blocked => "flagged as blocked",
            TaskStatus::Done => "shipped successfully",
        }
    }

    /// Activity level logged when a task enters this status.
    pub fn activity_level(&self) -> ActivityLevel {
        match self {
            TaskStatus::Blocked => ActivityLevel::Warning,
            TaskStatus::Done => ActivityLevel::Success,
            TaskStatus::Backlog | TaskStatus::InProgress => ActivityLevel::Info,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Backlog
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "status".to_string(),
                message: format!("expected backlog, in-progress, blocked or done, got '{s}'"),
            })
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

/// A unit of maintenance work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    /// Unique identifier within a task list
    pub id: String,
    /// Task title
    pub title: String,
    /// Longer explanation of the work
    pub description: String,
    /// Maintenance area
    pub category: TaskCategory,
    /// Board status
    pub status: TaskStatus,
    /// Priority
    pub priority: Priority,
    /// Owning team or person (free text)
    pub owner: String,
    /// Days until due; negative means overdue, 0 means due today
    pub due_in_days: i32,
}

impl MaintenanceTask {
    /// Whether the task is high priority and still open.
    pub fn is_critical(&self) -> bool {
        self.priority == Priority::High && self.status != TaskStatus::Done
    }

    /// Whether the task is being worked or waiting on a blocker.
    pub fn is_active(&self) -> bool {
        matches!(self.status, TaskStatus::InProgress | TaskStatus::Blocked)
    }

    /// Whether the task is due within the next two days (not overdue).
    pub fn is_due_soon(&self) -> bool {
        self.due_in_days > -1 && self.due_in_days <= 2
    }

    /// Human-readable due label, see [`due_label`].
    pub fn due_label(&self) -> String {
        due_label(self.due_in_days)
    }
}

/// Format a due offset in days for display.
pub fn due_label(days: i32) -> String {
    match days {
        d if d < 0 => "overdue".to_string(),
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        d => format!("due in {d} days"),
    }
}

/// Check that every task id in the list is unique.
pub fn validate_unique_ids(tasks: &[MaintenanceTask]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(ValidationError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}

/// Parse a JSON array of tasks and validate it.
///
/// # Errors
///
/// Returns [`CoreError::Json`](crate::CoreError::Json) when the input is not a
/// well-formed task list (including out-of-enum status or category values) and
/// [`CoreError::Validation`](crate::CoreError::Validation) on duplicate ids.
pub fn parse_tasks(json: &str) -> Result<Vec<MaintenanceTask>> {
    let tasks: Vec<MaintenanceTask> = serde_json::from_str(json)?;
    validate_unique_ids(&tasks)?;
    Ok(tasks)
}
