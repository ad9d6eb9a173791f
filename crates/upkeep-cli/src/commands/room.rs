//! Control room session commands.
//!
//! A session is replayed in memory on every invocation; nothing is persisted.

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use upkeep_core::{
    Clock, ControlRoom, IdGenerator, MaintenanceAgent, SystemClock, TaskStatus, UuidIdGenerator,
};

use crate::common::{load_tasks, print_json};
use crate::config::Config;

#[derive(Subcommand)]
pub enum RoomAction {
    /// Show the board, insights and activity feed
    Show {
        /// JSON task list (defaults to the demo board)
        #[arg(long)]
        tasks: Option<PathBuf>,
        /// Print a JSON snapshot instead of text
        #[arg(long)]
        json: bool,
    },
    /// Apply status transitions, then run directives in order
    Run {
        /// JSON task list (defaults to the demo board)
        #[arg(long)]
        tasks: Option<PathBuf>,
        /// Status change as ID=STATUS (repeatable)
        #[arg(long = "transition", value_parser = parse_transition)]
        transitions: Vec<(String, TaskStatus)>,
        /// Directive text (repeatable)
        #[arg(long = "directive")]
        directives: Vec<String>,
        /// Print a JSON snapshot instead of text
        #[arg(long)]
        json: bool,
    },
}

fn parse_transition(raw: &str) -> Result<(String, TaskStatus), String> {
    let (id, status) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=STATUS, got '{raw}'"))?;
    let status = status.parse::<TaskStatus>().map_err(|e| e.to_string())?;
    Ok((id.trim().to_string(), status))
}

type SystemRoom = ControlRoom<SystemClock, UuidIdGenerator>;

fn open_room(tasks: Option<PathBuf>, config: &Config) -> anyhow::Result<SystemRoom> {
    let agent = MaintenanceAgent::system(config.engine());
    match tasks {
        None => Ok(ControlRoom::seeded(agent)),
        Some(path) => {
            let tasks = load_tasks(Some(&path))?;
            ControlRoom::new(agent, tasks, Vec::new())
                .with_context(|| format!("cannot open board from {}", path.display()))
        }
    }
}

pub fn run(action: RoomAction, config: &Config) -> anyhow::Result<()> {
    match action {
        RoomAction::Show { tasks, json } => {
            let room = open_room(tasks, config)?;
            render(&room, json)
        }
        RoomAction::Run {
            tasks,
            transitions,
            directives,
            json,
        } => {
            let mut room = open_room(tasks, config)?;
            for (id, status) in transitions {
                room.update_status(&id, status)
                    .with_context(|| format!("transition {id}={status} failed"))?;
            }
            for directive in &directives {
                room.run_directive(directive);
            }
            render(&room, json)
        }
    }
}

fn render<C: Clock, G: IdGenerator>(room: &ControlRoom<C, G>, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&room.snapshot());
    }

    let metrics = room.metrics();
    println!(
        "Health {}/100 | active {} | critical {} | due soon {}",
        metrics.health, metrics.active, metrics.critical, metrics.due_soon
    );
    println!();
    println!("{}", room.last_summary());
    for insight in room.insights() {
        println!("  [{}] {} ({} impact)", insight.category, insight.title, insight.impact);
        println!("      {}", insight.detail);
    }

    for status in TaskStatus::ALL {
        let column = room.column(status);
        let noun = if column.len() == 1 { "item" } else { "items" };
        println!();
        println!("{} ({} {noun})", status.column_title(), column.len());
        for task in column {
            println!(
                "  {:<10} {} [{} / {} priority] {} - {}",
                task.id,
                task.title,
                task.category,
                task.priority,
                task.owner,
                task.due_label()
            );
        }
    }

    println!();
    println!("Activity");
    let now = room.agent().clock().now();
    for activity in room.activities() {
        println!(
            "  {:<8} {:<9} {}",
            activity.age_label(now),
            activity.level.to_string(),
            activity.message
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transition() {
        assert_eq!(
            parse_transition("task-3=in-progress"),
            Ok(("task-3".to_string(), TaskStatus::InProgress))
        );
        assert!(parse_transition("task-3").is_err());
        assert!(parse_transition("task-3=archived").is_err());
    }
}
