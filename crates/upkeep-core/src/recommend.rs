//! Follow-up task recommendation.
//!
//! A directive that classifies into a maintenance area yields exactly one new
//! backlog task; blank or unclassified directives yield none.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{classify, DirectiveCategory};
use crate::clock::IdGenerator;
use crate::task::{MaintenanceTask, Priority, TaskStatus};

/// Words that mark a directive as urgent. Matched at the start of a word, so
/// "regressions" counts and "markdown" does not.
pub const URGENCY_CUES: &[&str] = &[
    "urgent",
    "regression",
    "down",
    "outage",
    "critical",
    "asap",
    "broken",
];

const TITLE_EXCERPT_CHARS: usize = 60;
const ID_RETRIES: usize = 8;

/// Tunables for synthesized tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendSettings {
    /// Owner assigned to new tasks
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Due offset for new tasks
    #[serde(default = "default_due_in_days")]
    pub default_due_in_days: i32,
}

fn default_owner() -> String {
    "Agent".into()
}
fn default_due_in_days() -> i32 {
    3
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            default_due_in_days: default_due_in_days(),
        }
    }
}

/// High when any word starts with an urgency cue, medium otherwise.
pub fn urgency(text: &str) -> Priority {
    let lowered = text.to_lowercase();
    let urgent = lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| URGENCY_CUES.iter().any(|cue| word.starts_with(*cue)));
    if urgent {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= TITLE_EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(TITLE_EXCERPT_CHARS).collect();
    format!("{}…", cut.trim_end())
}

/// Draw an id not present in `taken`.
///
/// Asks the generator a bounded number of times, then disambiguates the last
/// candidate with a numeric suffix so the call always terminates.
fn unique_id(ids: &dyn IdGenerator, taken: &HashSet<&str>) -> String {
    let mut candidate = ids.next_id("task");
    for _ in 0..ID_RETRIES {
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        candidate = ids.next_id("task");
    }

    warn!(%candidate, "id generator kept colliding, appending suffix");
    let mut n = 2u64;
    loop {
        let id = format!("{candidate}-{n}");
        if !taken.contains(id.as_str()) {
            return id;
        }
        n += 1;
    }
}

/// Recommend follow-up work for an already classified directive.
pub fn recommend_for(
    category: DirectiveCategory,
    text: &str,
    existing: &[MaintenanceTask],
    settings: &RecommendSettings,
    ids: &dyn IdGenerator,
) -> Vec<MaintenanceTask> {
    let directive = text.trim();
    if directive.is_empty() {
        return Vec::new();
    }
    let Some(task_category) = category.task_category() else {
        debug!("general directive, no follow-up queued");
        return Vec::new();
    };

    let taken: HashSet<&str> = existing.iter().map(|t| t.id.as_str()).collect();
    let task = MaintenanceTask {
        id: unique_id(ids, &taken),
        title: format!("{} follow-up: {}", task_category.label(), excerpt(directive)),
        description: directive.to_string(),
        category: task_category,
        status: TaskStatus::Backlog,
        priority: urgency(directive),
        owner: settings.owner.clone(),
        due_in_days: settings.default_due_in_days,
    };
    debug!(
        id = %task.id,
        category = %task.category,
        priority = %task.priority,
        "recommended follow-up task"
    );
    vec![task]
}

/// Classify `text` and recommend at most one follow-up task.
pub fn recommend(
    text: &str,
    existing: &[MaintenanceTask],
    settings: &RecommendSettings,
    ids: &dyn IdGenerator,
) -> Vec<MaintenanceTask> {
    recommend_for(classify(text), text, existing, settings, ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SequentialIdGenerator;
    use crate::task::TaskCategory;

    /// Always returns the same id.
    struct StuckIds(&'static str);

    impl IdGenerator for StuckIds {
        fn next_id(&self, _prefix: &str) -> String {
            self.0.to_string()
        }
    }

    fn existing(id: &str) -> MaintenanceTask {
        MaintenanceTask {
            id: id.to_string(),
            title: "Existing".to_string(),
            description: String::new(),
            category: TaskCategory::Seo,
            status: TaskStatus::Backlog,
            priority: Priority::Low,
            owner: "Platform".to_string(),
            due_in_days: 1,
        }
    }

    #[test]
    fn test_blank_directive_recommends_nothing() {
        let ids = SequentialIdGenerator::new();
        assert!(recommend("", &[], &RecommendSettings::default(), &ids).is_empty());
        assert!(recommend("  \t", &[], &RecommendSettings::default(), &ids).is_empty());
    }

    #[test]
    fn test_general_directive_recommends_nothing() {
        let ids = SequentialIdGenerator::new();
        let tasks = recommend("everything looks fine", &[], &RecommendSettings::default(), &ids);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_classified_directive_yields_one_backlog_task() {
        let ids = SequentialIdGenerator::new();
        let tasks = recommend(
            "investigate SEO drop for /docs after redesign",
            &[],
            &RecommendSettings::default(),
            &ids,
        );
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.category, TaskCategory::Seo);
        assert_eq!(task.status, TaskStatus::Backlog);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.owner, "Agent");
        assert_eq!(task.due_in_days, 3);
        assert_eq!(task.id, "task-1");
        assert_eq!(task.title, "SEO follow-up: investigate SEO drop for /docs after redesign");
        assert_eq!(task.description, "investigate SEO drop for /docs after redesign");
    }

    #[test]
    fn test_urgency_cues() {
        assert_eq!(urgency("URGENT: checkout is slow"), Priority::High);
        assert_eq!(urgency("pricing page regression"), Priority::High);
        assert_eq!(urgency("site is down!"), Priority::High);
        assert_eq!(urgency("update the markdown dropdown"), Priority::Medium);
        assert_eq!(urgency("refresh stale copy"), Priority::Medium);
    }

    #[test]
    fn test_urgency_cues_match_inflected_forms() {
        assert_eq!(urgency("LCP regressions on pricing"), Priority::High);
        assert_eq!(urgency("checkout outages overnight"), Priority::High);
        assert_eq!(urgency("site Down."), Priority::High);
        assert_eq!(urgency("contrast breaks in the markdown dropdown"), Priority::Medium);
    }

    #[test]
    fn test_settings_are_applied() {
        let ids = SequentialIdGenerator::new();
        let settings = RecommendSettings {
            owner: "Web Platform".to_string(),
            default_due_in_days: 7,
        };
        let tasks = recommend("rotate staging keys", &[], &settings, &ids);
        assert_eq!(tasks[0].owner, "Web Platform");
        assert_eq!(tasks[0].due_in_days, 7);
        assert_eq!(tasks[0].category, TaskCategory::Devops);
    }

    #[test]
    fn test_id_avoids_existing_tasks() {
        let ids = SequentialIdGenerator::new();
        let tasks = vec![existing("task-1"), existing("task-2")];
        let recommended = recommend("fix aria labels", &tasks, &RecommendSettings::default(), &ids);
        assert_eq!(recommended[0].id, "task-3");
    }

    #[test]
    fn test_colliding_generator_still_terminates_with_unique_id() {
        let ids = StuckIds("task-1");
        let tasks = vec![existing("task-1"), existing("task-1-2")];
        let recommended = recommend("fix aria labels", &tasks, &RecommendSettings::default(), &ids);
        assert_eq!(recommended.len(), 1);
        assert_eq!(recommended[0].id, "task-1-3");
    }

    #[test]
    fn test_long_directive_title_is_truncated() {
        let ids = SequentialIdGenerator::new();
        let text = format!("speed up {}", "very ".repeat(30));
        let tasks = recommend(&text, &[], &RecommendSettings::default(), &ids);
        let title = &tasks[0].title;
        assert!(title.starts_with("Performance follow-up: speed up"));
        assert!(title.ends_with('…'));
        assert_eq!(tasks[0].description, text.trim());
    }
}
