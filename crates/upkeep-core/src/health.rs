//! Backlog health scoring.
//!
//! Health starts at 100 and loses points per risky task:
//!
//! | Status      | Condition                         | Penalty (default) |
//! |-------------|-----------------------------------|-------------------|
//! | blocked     | priority high                     | 20                |
//! | blocked     | otherwise                         | 12                |
//! | in-progress | priority high and due within 1 day| 8                 |
//! | backlog     | priority high                     | 4                 |
//! | done        | -                                 | 0                 |
//!
//! Penalties are summed per task, so the score does not depend on list order.
//! An empty backlog scores 100.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::task::{MaintenanceTask, Priority, TaskStatus};

/// Perfect health.
pub const MAX_SCORE: u8 = 100;

/// Penalty weights for each risk condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthWeights {
    /// Blocked task, priority below high
    #[serde(default = "default_blocked")]
    pub blocked: u32,
    /// Blocked task, priority high
    #[serde(default = "default_blocked_high")]
    pub blocked_high: u32,
    /// High-priority task in progress and due within a day
    #[serde(default = "default_at_risk")]
    pub at_risk: u32,
    /// High-priority task still sitting in the backlog
    #[serde(default = "default_neglected")]
    pub neglected: u32,
}

fn default_blocked() -> u32 {
    12
}
fn default_blocked_high() -> u32 {
    20
}
fn default_at_risk() -> u32 {
    8
}
fn default_neglected() -> u32 {
    4
}

impl Default for HealthWeights {
    fn default() -> Self {
        Self {
            blocked: default_blocked(),
            blocked_high: default_blocked_high(),
            at_risk: default_at_risk(),
            neglected: default_neglected(),
        }
    }
}

impl HealthWeights {
    /// Validate that the weights keep the scale meaningful.
    ///
    /// A high-priority blocked task must always cost something, and no single
    /// penalty may exceed the whole scale.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.blocked_high == 0 {
            return Err(ValidationError::InvalidValue {
                field: "health.blocked_high".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let weights = [
            ("health.blocked", self.blocked),
            ("health.blocked_high", self.blocked_high),
            ("health.at_risk", self.at_risk),
            ("health.neglected", self.neglected),
        ];
        for (field, weight) in weights {
            if weight > u32::from(MAX_SCORE) {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be at most {MAX_SCORE}, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

/// Why a task cost health points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PenaltyReason {
    Blocked,
    BlockedHigh,
    AtRisk,
    Neglected,
}

/// One task's contribution to the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPenalty {
    pub task_id: String,
    pub reason: PenaltyReason,
    pub points: u32,
}

/// Score plus the penalties that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub score: u8,
    pub penalties: Vec<HealthPenalty>,
}

impl HealthReport {
    /// Total points deducted before clamping.
    pub fn total_penalty(&self) -> u32 {
        self.penalties.iter().map(|p| p.points).sum()
    }

    /// Largest single penalty, if any.
    pub fn top_penalty(&self) -> Option<&HealthPenalty> {
        self.penalties.iter().max_by_key(|p| p.points)
    }
}

fn penalty_for(task: &MaintenanceTask, weights: &HealthWeights) -> Option<(PenaltyReason, u32)> {
    let high = task.priority == Priority::High;
    match task.status {
        TaskStatus::Blocked if high => Some((PenaltyReason::BlockedHigh, weights.blocked_high)),
        TaskStatus::Blocked => Some((PenaltyReason::Blocked, weights.blocked)),
        TaskStatus::InProgress if high && task.due_in_days <= 1 => {
            Some((PenaltyReason::AtRisk, weights.at_risk))
        }
        TaskStatus::Backlog if high => Some((PenaltyReason::Neglected, weights.neglected)),
        _ => None,
    }
}

fn clamp_score(total_penalty: u32) -> u8 {
    let score = u32::from(MAX_SCORE).saturating_sub(total_penalty);
    // score <= MAX_SCORE, so the conversion cannot fail
    u8::try_from(score).unwrap_or(0)
}

/// Score with explicit weights, listing every penalty applied.
pub fn report(tasks: &[MaintenanceTask], weights: &HealthWeights) -> HealthReport {
    let penalties: Vec<HealthPenalty> = tasks
        .iter()
        .filter_map(|task| {
            penalty_for(task, weights)
                .filter(|(_, points)| *points > 0)
                .map(|(reason, points)| HealthPenalty {
                    task_id: task.id.clone(),
                    reason,
                    points,
                })
        })
        .collect();

    let total = penalties
        .iter()
        .fold(0u32, |acc, p| acc.saturating_add(p.points));

    HealthReport {
        score: clamp_score(total),
        penalties,
    }
}

/// Score with explicit weights.
pub fn score_with(tasks: &[MaintenanceTask], weights: &HealthWeights) -> u8 {
    let total = tasks
        .iter()
        .filter_map(|task| penalty_for(task, weights))
        .fold(0u32, |acc, (_, points)| acc.saturating_add(points));
    clamp_score(total)
}

/// Score with the default weights.
pub fn score(tasks: &[MaintenanceTask]) -> u8 {
    score_with(tasks, &HealthWeights::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskCategory;

    fn task(id: &str, status: TaskStatus, priority: Priority, due_in_days: i32) -> MaintenanceTask {
        MaintenanceTask {
            id: id.to_string(),
            title: format!("Task {id}"),
            description: String::new(),
            category: TaskCategory::Performance,
            status,
            priority,
            owner: "Agent".to_string(),
            due_in_days,
        }
    }

    #[test]
    fn test_empty_backlog_is_healthy() {
        assert_eq!(score(&[]), 100);
    }

    #[test]
    fn test_each_penalty() {
        let cases = [
            (task("a", TaskStatus::Blocked, Priority::High, 5), 80),
            (task("b", TaskStatus::Blocked, Priority::Low, 5), 88),
            (task("c", TaskStatus::InProgress, Priority::High, 1), 92),
            (task("d", TaskStatus::InProgress, Priority::High, 2), 100),
            (task("e", TaskStatus::InProgress, Priority::Medium, 0), 100),
            (task("f", TaskStatus::Backlog, Priority::High, 9), 96),
            (task("g", TaskStatus::Backlog, Priority::Medium, 9), 100),
            (task("h", TaskStatus::Done, Priority::High, -3), 100),
        ];
        for (t, expected) in cases {
            assert_eq!(score(std::slice::from_ref(&t)), expected, "task {}", t.id);
        }
    }

    #[test]
    fn test_overdue_in_progress_high_is_at_risk() {
        let t = task("a", TaskStatus::InProgress, Priority::High, -4);
        assert_eq!(score(&[t]), 92);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let tasks: Vec<_> = (0..10)
            .map(|i| task(&format!("t{i}"), TaskStatus::Blocked, Priority::High, 1))
            .collect();
        assert_eq!(score(&tasks), 0);
    }

    #[test]
    fn test_report_explains_score() {
        let tasks = vec![
            task("a", TaskStatus::Blocked, Priority::High, 4),
            task("b", TaskStatus::Backlog, Priority::High, 4),
            task("c", TaskStatus::Done, Priority::Medium, 0),
        ];
        let report = report(&tasks, &HealthWeights::default());
        assert_eq!(report.score, 76);
        assert_eq!(report.total_penalty(), 24);
        assert_eq!(report.penalties.len(), 2);
        let top = report.top_penalty().unwrap();
        assert_eq!(top.task_id, "a");
        assert_eq!(top.reason, PenaltyReason::BlockedHigh);
        assert_eq!(report.score, score(&tasks));
    }

    #[test]
    fn test_custom_weights() {
        let weights = HealthWeights {
            neglected: 0,
            ..HealthWeights::default()
        };
        let tasks = vec![task("a", TaskStatus::Backlog, Priority::High, 4)];
        assert_eq!(score_with(&tasks, &weights), 100);
        assert!(report(&tasks, &weights).penalties.is_empty());
    }

    #[test]
    fn test_validate_weights() {
        assert!(HealthWeights::default().validate().is_ok());

        let zero_blocked_high = HealthWeights {
            blocked_high: 0,
            ..HealthWeights::default()
        };
        assert!(zero_blocked_high.validate().is_err());

        let oversized = HealthWeights {
            at_risk: 250,
            ..HealthWeights::default()
        };
        assert!(matches!(
            oversized.validate(),
            Err(ValidationError::InvalidValue { field, .. }) if field == "health.at_risk"
        ));
    }

    #[test]
    fn test_weights_deserialize_with_defaults() {
        let weights: HealthWeights = serde_json::from_str(r#"{"blocked": 15}"#).unwrap();
        assert_eq!(weights.blocked, 15);
        assert_eq!(weights.blocked_high, 20);
    }
}
