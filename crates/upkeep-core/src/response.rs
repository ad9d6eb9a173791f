//! Directive response assembly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::{classify, DirectiveCategory};
use crate::clock::IdGenerator;
use crate::insight::{insights_for, AgentInsight};
use crate::recommend::{recommend_for, RecommendSettings};
use crate::task::MaintenanceTask;

/// Summary used when no directive text was given.
pub const DEFAULT_SUMMARY: &str = "No directive received. Running default maintenance loop.";

/// Summary used when a directive produced no new work.
pub const ALIGNED_SUMMARY: &str = "Directive aligned with current roadmap; no new tasks queued.";

/// Everything the control room shows after one directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveResponse {
    pub summary: String,
    /// Classification that drove the response
    pub category: DirectiveCategory,
    pub insights: Vec<AgentInsight>,
    pub recommended_tasks: Vec<MaintenanceTask>,
}

fn queued_summary(category: DirectiveCategory, count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Directive classified as {category}; queued {count} follow-up {noun}.")
}

/// Classify once, then gather insights and recommendations.
pub fn build_response(
    text: &str,
    tasks: &[MaintenanceTask],
    settings: &RecommendSettings,
    ids: &dyn IdGenerator,
) -> DirectiveResponse {
    let category = classify(text);
    let insights = insights_for(category, text);

    if text.trim().is_empty() {
        return DirectiveResponse {
            summary: DEFAULT_SUMMARY.to_string(),
            category,
            insights,
            recommended_tasks: Vec::new(),
        };
    }

    let recommended_tasks = recommend_for(category, text, tasks, settings, ids);
    let summary = if recommended_tasks.is_empty() {
        ALIGNED_SUMMARY.to_string()
    } else {
        queued_summary(category, recommended_tasks.len())
    };
    debug!(%category, queued = recommended_tasks.len(), "built directive response");

    DirectiveResponse {
        summary,
        category,
        insights,
        recommended_tasks,
    }
}
