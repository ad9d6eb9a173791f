use clap::Subcommand;

use crate::config::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "health.blocked_high", "recommend.owner")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, loaded: anyhow::Result<Config>) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = loaded?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => anyhow::bail!("unknown key: {key}"),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = loaded?;
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = loaded?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
