//! Control room state.
//!
//! [`ControlRoom`] is the caller-side container the engine's results are
//! merged into: the board's tasks, the activity feed (newest first), the
//! current insights and the last directive summary. It owns no global state;
//! seed data is only reachable through [`ControlRoom::seeded`].

use serde::Serialize;
use tracing::info;

use crate::activity::{ActivityLevel, AgentActivity};
use crate::agent::MaintenanceAgent;
use crate::clock::{Clock, IdGenerator};
use crate::error::{CoreError, Result};
use crate::insight::AgentInsight;
use crate::response::{DirectiveResponse, DEFAULT_SUMMARY};
use crate::task::{validate_unique_ids, MaintenanceTask, Priority, TaskCategory, TaskStatus};

/// Headline numbers for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMetrics {
    pub health: u8,
    /// In progress or blocked
    pub active: usize,
    /// High priority and not done
    pub critical: usize,
    /// Due within two days, not overdue
    pub due_soon: usize,
}

/// Serializable view of the room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot<'a> {
    pub metrics: BoardMetrics,
    pub last_summary: &'a str,
    pub insights: &'a [AgentInsight],
    pub tasks: &'a [MaintenanceTask],
    pub activities: &'a [AgentActivity],
}

pub struct ControlRoom<C, G> {
    agent: MaintenanceAgent<C, G>,
    tasks: Vec<MaintenanceTask>,
    activities: Vec<AgentActivity>,
    insights: Vec<AgentInsight>,
    last_summary: String,
}

impl<C: Clock, G: IdGenerator> ControlRoom<C, G> {
    /// Build a room over an existing board.
    ///
    /// # Errors
    ///
    /// Returns a validation error if two tasks share an id.
    pub fn new(
        agent: MaintenanceAgent<C, G>,
        tasks: Vec<MaintenanceTask>,
        activities: Vec<AgentActivity>,
    ) -> Result<Self> {
        validate_unique_ids(&tasks)?;
        let insights = agent.insights("");
        Ok(Self {
            agent,
            tasks,
            activities,
            insights,
            last_summary: DEFAULT_SUMMARY.to_string(),
        })
    }

    /// Room loaded with the demo board.
    pub fn seeded(agent: MaintenanceAgent<C, G>) -> Self {
        let activities = seed_activities(&agent);
        let insights = agent.insights("");
        Self {
            agent,
            tasks: seed_tasks(),
            activities,
            insights,
            last_summary: DEFAULT_SUMMARY.to_string(),
        }
    }

    pub fn agent(&self) -> &MaintenanceAgent<C, G> {
        &self.agent
    }

    pub fn tasks(&self) -> &[MaintenanceTask] {
        &self.tasks
    }

    /// Activity feed, newest first.
    pub fn activities(&self) -> &[AgentActivity] {
        &self.activities
    }

    pub fn insights(&self) -> &[AgentInsight] {
        &self.insights
    }

    pub fn last_summary(&self) -> &str {
        &self.last_summary
    }

    pub fn task(&self, id: &str) -> Option<&MaintenanceTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in one board column, in board order.
    pub fn column(&self, status: TaskStatus) -> Vec<&MaintenanceTask> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    pub fn health(&self) -> u8 {
        self.agent.score(&self.tasks)
    }

    pub fn metrics(&self) -> BoardMetrics {
        BoardMetrics {
            health: self.health(),
            active: self.tasks.iter().filter(|t| t.is_active()).count(),
            critical: self.tasks.iter().filter(|t| t.is_critical()).count(),
            due_soon: self.tasks.iter().filter(|t| t.is_due_soon()).count(),
        }
    }

    pub fn snapshot(&self) -> RoomSnapshot<'_> {
        RoomSnapshot {
            metrics: self.metrics(),
            last_summary: &self.last_summary,
            insights: &self.insights,
            tasks: &self.tasks,
            activities: &self.activities,
        }
    }

    fn log(&mut self, message: impl Into<String>, level: ActivityLevel) {
        let activity = self.agent.activity_with_level(message, level);
        self.activities.insert(0, activity);
    }

    /// Run one directive against the board.
    ///
    /// Recommended tasks go to the top of the board and every existing task
    /// moves one day closer to due (floored at 0).
    pub fn run_directive(&mut self, text: &str) -> DirectiveResponse {
        let response = self.agent.respond(text, &self.tasks);
        self.last_summary = response.summary.clone();
        self.insights = response.insights.clone();

        let queued = response.recommended_tasks.len();
        if queued > 0 {
            for task in &mut self.tasks {
                task.due_in_days = task.due_in_days.saturating_sub(1).max(0);
            }
            self.tasks.splice(0..0, response.recommended_tasks.iter().cloned());
            let noun = if queued > 1 { "tasks" } else { "task" };
            self.log(
                format!("Queued {queued} follow-up {noun} from directive."),
                ActivityLevel::Success,
            );
        } else {
            self.log(
                "Directive aligned with current roadmap. No new tasks queued.",
                ActivityLevel::Info,
            );
        }

        let directive = text.trim();
        if !directive.is_empty() {
            self.log(
                format!("Received directive: \"{directive}\"."),
                ActivityLevel::Info,
            );
        }

        info!(category = %response.category, queued, "directive handled");
        response
    }

    /// Move a task to a new status through one of its board controls.
    ///
    /// # Errors
    ///
    /// [`CoreError::TaskNotFound`] for an unknown id and
    /// [`CoreError::InvalidTransition`] when the board offers no control
    /// for the change.
    pub fn update_status(&mut self, id: &str, status: TaskStatus) -> Result<&MaintenanceTask> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TaskNotFound(id.to_string()))?;

        let from = self.tasks[index].status;
        if !from.can_transition_to(&status) {
            return Err(CoreError::InvalidTransition {
                id: id.to_string(),
                from,
                to: status,
            });
        }

        self.tasks[index].status = status;
        let message = format!(
            "Task \"{}\" {}.",
            self.tasks[index].title,
            status.activity_phrase()
        );
        self.log(message, status.activity_level());
        info!(id, %from, to = %status, "task status updated");
        Ok(&self.tasks[index])
    }
}

/// The demo board's five tasks.
pub fn seed_tasks() -> Vec<MaintenanceTask> {
    let task = |id: &str,
                title: &str,
                description: &str,
                category: TaskCategory,
                status: TaskStatus,
                priority: Priority,
                owner: &str,
                due_in_days: i32| MaintenanceTask {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        status,
        priority,
        owner: owner.to_string(),
        due_in_days,
    };

    vec![
        task(
            "task-1",
            "Resolve Core Web Vitals regression",
            "Investigate LCP spike on the pricing page and ship image optimization patch.",
            TaskCategory::Performance,
            TaskStatus::InProgress,
            Priority::High,
            "Performance Guild",
            2,
        ),
        task(
            "task-2",
            "Rebuild marketing sitemap",
            "Sync sitemap.xml with the latest product launches and submit to Search Console.",
            TaskCategory::Seo,
            TaskStatus::Backlog,
            Priority::Medium,
            "Agent",
            5,
        ),
        task(
            "task-3",
            "Accessibility sweep (Q1)",
            "Validate keyboard navigation across hero modules and patch missing aria labels.",
            TaskCategory::Accessibility,
            TaskStatus::Blocked,
            Priority::High,
            "Frontend Squad",
            4,
        ),
        task(
            "task-4",
            "Automate content freshness checks",
            "Build cron that flags pages older than 6 months and notifies editors.",
            TaskCategory::Content,
            TaskStatus::InProgress,
            Priority::Medium,
            "Content Ops",
            6,
        ),
        task(
            "task-5",
            "Rotate legacy API keys",
            "Audit integrations and rotate credentials older than 90 days across environments.",
            TaskCategory::Devops,
            TaskStatus::Done,
            Priority::Medium,
            "Platform",
            0,
        ),
    ]
}

/// The demo board's opening activity feed, newest first.
pub fn seed_activities<C: Clock, G: IdGenerator>(
    agent: &MaintenanceAgent<C, G>,
) -> Vec<AgentActivity> {
    vec![
        agent.activity_with_level(
            "Nightly lighthouse run completed (92.4 score).",
            ActivityLevel::Success,
        ),
        agent.activity("Queued image optimization job for /pricing hero media."),
        agent.activity_with_level(
            "Blocked accessibility task awaiting designer specs.",
            ActivityLevel::Warning,
        ),
    ]
}
