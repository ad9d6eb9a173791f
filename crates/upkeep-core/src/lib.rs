//! # Upkeep Core Library
//!
//! This library provides the decision engine behind the Upkeep maintenance
//! control room. Every engine operation is synchronous and deterministic given
//! its inputs plus the injected clock and id source; callers own all state.
//!
//! ## Architecture
//!
//! - **Health**: backlog task list to a 0-100 score, with an explainable report
//! - **Classification**: ordered keyword table routing directives to a category
//! - **Insights**: per-category templates rendered for a directive
//! - **Recommendation**: at most one follow-up task per classified directive
//! - **Response**: the above combined into one [`DirectiveResponse`]
//! - **Activity**: timestamped feed entries
//!
//! ## Key Components
//!
//! - [`MaintenanceAgent`]: engine facade holding config, clock and id source
//! - [`ControlRoom`]: caller-side board state the engine's results merge into
//! - [`Clock`] / [`IdGenerator`]: injectable time and identifier sources

pub mod activity;
pub mod agent;
pub mod classify;
pub mod clock;
pub mod error;
pub mod health;
pub mod insight;
pub mod recommend;
pub mod response;
pub mod room;
pub mod task;

pub use activity::{ActivityFactory, ActivityLevel, AgentActivity};
pub use agent::{EngineConfig, MaintenanceAgent};
pub use classify::{classify, DirectiveCategory, KEYWORD_TABLE};
pub use clock::{
    Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock, UuidIdGenerator,
};
pub use error::{CoreError, Result, ValidationError};
pub use health::{score, HealthPenalty, HealthReport, HealthWeights, PenaltyReason};
pub use insight::{generate_insights, AgentInsight, Impact};
pub use recommend::{recommend, RecommendSettings};
pub use response::{build_response, DirectiveResponse, ALIGNED_SUMMARY, DEFAULT_SUMMARY};
pub use room::{seed_tasks, BoardMetrics, ControlRoom, RoomSnapshot};
pub use task::{due_label, parse_tasks, MaintenanceTask, Priority, TaskCategory, TaskStatus};
