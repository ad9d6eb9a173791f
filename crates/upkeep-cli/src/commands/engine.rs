//! One-shot engine commands: score, classify, insights, recommend,
//! directive and activity.

use std::path::PathBuf;

use clap::Args;
use upkeep_core::classify::matched_keyword;
use upkeep_core::{generate_insights, ActivityLevel, MaintenanceAgent};

use crate::common::{load_tasks, print_json};
use crate::config::Config;

#[derive(Args)]
pub struct ScoreArgs {
    /// JSON task list (defaults to the demo board)
    #[arg(long)]
    tasks: Option<PathBuf>,
    /// Print the penalties behind the score as JSON
    #[arg(long)]
    explain: bool,
}

#[derive(Args)]
pub struct DirectiveArgs {
    /// Directive text
    text: String,
    /// JSON task list (defaults to the demo board)
    #[arg(long)]
    tasks: Option<PathBuf>,
}

#[derive(Args)]
pub struct ActivityArgs {
    /// Log message
    message: String,
    /// info, success or warning
    #[arg(long, default_value = "info")]
    level: ActivityLevel,
}

pub fn score(args: ScoreArgs, config: &Config) -> anyhow::Result<()> {
    let tasks = load_tasks(args.tasks.as_deref())?;
    let agent = MaintenanceAgent::system(config.engine());
    if args.explain {
        print_json(&agent.health_report(&tasks))?;
    } else {
        println!("{}", agent.score(&tasks));
    }
    Ok(())
}

pub fn classify(text: &str) -> anyhow::Result<()> {
    match matched_keyword(text) {
        Some((category, keyword)) => println!("{category} (matched \"{keyword}\")"),
        None => println!("general"),
    }
    Ok(())
}

pub fn insights(text: &str) -> anyhow::Result<()> {
    print_json(&generate_insights(text))
}

pub fn recommend(args: DirectiveArgs, config: &Config) -> anyhow::Result<()> {
    let tasks = load_tasks(args.tasks.as_deref())?;
    let agent = MaintenanceAgent::system(config.engine());
    print_json(&agent.recommend(&args.text, &tasks))
}

pub fn directive(args: DirectiveArgs, config: &Config) -> anyhow::Result<()> {
    let tasks = load_tasks(args.tasks.as_deref())?;
    let agent = MaintenanceAgent::system(config.engine());
    print_json(&agent.respond(&args.text, &tasks))
}

pub fn activity(args: ActivityArgs, config: &Config) -> anyhow::Result<()> {
    let agent = MaintenanceAgent::system(config.engine());
    print_json(&agent.activity_with_level(args.message, args.level))
}
