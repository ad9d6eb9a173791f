use clap::{Parser, Subcommand};

mod commands;
mod common;
mod config;

#[derive(Parser)]
#[command(name = "upkeep", version, about = "Upkeep maintenance control room CLI")]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score backlog health (0-100)
    Score(commands::engine::ScoreArgs),
    /// Classify a directive into a maintenance category
    Classify {
        /// Directive text
        text: String,
    },
    /// Show insights for a directive
    Insights {
        /// Directive text (empty for baseline insights)
        #[arg(default_value = "")]
        text: String,
    },
    /// Recommend follow-up tasks for a directive
    Recommend(commands::engine::DirectiveArgs),
    /// Build the full response to a directive
    Directive(commands::engine::DirectiveArgs),
    /// Stamp an activity entry
    Activity(commands::engine::ActivityArgs),
    /// Replay a control room session
    Room {
        #[command(subcommand)]
        action: commands::room::RoomAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let loaded = config::Config::load();
    let level = loaded
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| config::DEFAULT_LOG_LEVEL.to_string());
    common::init_tracing(cli.quiet, cli.verbose, &level)?;

    match cli.command {
        // config commands must work even when the file on disk is broken
        Commands::Config { action } => commands::config::run(action, loaded),
        Commands::Score(args) => commands::engine::score(args, &loaded?),
        Commands::Classify { text } => commands::engine::classify(&text),
        Commands::Insights { text } => commands::engine::insights(&text),
        Commands::Recommend(args) => commands::engine::recommend(args, &loaded?),
        Commands::Directive(args) => commands::engine::directive(args, &loaded?),
        Commands::Activity(args) => commands::engine::activity(args, &loaded?),
        Commands::Room { action } => commands::room::run(action, &loaded?),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
