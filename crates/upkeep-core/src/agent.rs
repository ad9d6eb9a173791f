//! Maintenance agent facade.
//!
//! Bundles engine configuration with the clock and id source, so callers
//! inject those once and reach every engine operation through one value.

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityFactory, ActivityLevel, AgentActivity};
use crate::classify::{classify, DirectiveCategory};
use crate::clock::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
use crate::error::ValidationError;
use crate::health::{self, HealthReport, HealthWeights};
use crate::insight::{generate_insights, AgentInsight};
use crate::recommend::{self, RecommendSettings};
use crate::response::{build_response, DirectiveResponse};
use crate::task::MaintenanceTask;

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub health: HealthWeights,
    #[serde(default)]
    pub recommend: RecommendSettings,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.health.validate()
    }
}

/// Decision engine with injected time and id sources.
pub struct MaintenanceAgent<C, G> {
    config: EngineConfig,
    clock: C,
    ids: G,
}

impl MaintenanceAgent<SystemClock, UuidIdGenerator> {
    /// Agent backed by the wall clock and random ids.
    pub fn system(config: EngineConfig) -> Self {
        Self::new(config, SystemClock, UuidIdGenerator)
    }
}

impl<C: Clock, G: IdGenerator> MaintenanceAgent<C, G> {
    pub fn new(config: EngineConfig, clock: C, ids: G) -> Self {
        Self { config, clock, ids }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Backlog health, 0-100.
    pub fn score(&self, tasks: &[MaintenanceTask]) -> u8 {
        health::score_with(tasks, &self.config.health)
    }

    /// Backlog health with the penalties that produced it.
    pub fn health_report(&self, tasks: &[MaintenanceTask]) -> HealthReport {
        health::report(tasks, &self.config.health)
    }

    pub fn classify(&self, text: &str) -> DirectiveCategory {
        classify(text)
    }

    pub fn insights(&self, text: &str) -> Vec<AgentInsight> {
        generate_insights(text)
    }

    pub fn recommend(&self, text: &str, tasks: &[MaintenanceTask]) -> Vec<MaintenanceTask> {
        recommend::recommend(text, tasks, &self.config.recommend, &self.ids)
    }

    /// Handle one directive end to end.
    pub fn respond(&self, text: &str, tasks: &[MaintenanceTask]) -> DirectiveResponse {
        build_response(text, tasks, &self.config.recommend, &self.ids)
    }

    /// Stamp an `info` activity entry.
    pub fn activity(&self, message: impl Into<String>) -> AgentActivity {
        ActivityFactory::new(&self.clock, &self.ids).info(message)
    }

    pub fn activity_with_level(
        &self,
        message: impl Into<String>,
        level: ActivityLevel,
    ) -> AgentActivity {
        ActivityFactory::new(&self.clock, &self.ids).create(message, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SequentialIdGenerator};
    use chrono::{TimeZone, Utc};

    fn agent() -> MaintenanceAgent<FixedClock, SequentialIdGenerator> {
        MaintenanceAgent::new(
            EngineConfig::default(),
            FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            SequentialIdGenerator::new(),
        )
    }

    #[test]
    fn test_ids_are_shared_between_tasks_and_activities() {
        let agent = agent();
        let tasks = agent.recommend("fix aria labels", &[]);
        let activity = agent.activity("queued");
        assert_eq!(tasks[0].id, "task-1");
        assert_eq!(activity.id, "activity-2");
    }

    #[test]
    fn test_activity_levels() {
        let agent = agent();
        assert_eq!(agent.activity("x").level, ActivityLevel::Info);
        assert_eq!(
            agent.activity_with_level("y", ActivityLevel::Warning).level,
            ActivityLevel::Warning
        );
    }

    #[test]
    fn test_configured_owner_flows_into_response() {
        let config = EngineConfig {
            recommend: RecommendSettings {
                owner: "SRE".to_string(),
                default_due_in_days: 1,
            },
            ..EngineConfig::default()
        };
        let agent = MaintenanceAgent::new(
            config,
            FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            SequentialIdGenerator::new(),
        );
        let response = agent.respond("deploy pipeline is flaky", &[]);
        assert_eq!(response.recommended_tasks[0].owner, "SRE");
        assert_eq!(response.recommended_tasks[0].due_in_days, 1);
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(config.validate().is_ok());
    }
}
