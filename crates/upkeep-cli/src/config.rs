//! TOML-based CLI configuration.
//!
//! Stores engine tunables and logging preferences:
//! - Health penalty weights (`[health]`)
//! - Follow-up task defaults (`[recommend]`)
//! - Log level (`[log]`)
//!
//! Configuration is stored at `~/.config/upkeep/config.toml`
//! (`~/.config/upkeep-dev/` when `UPKEEP_ENV=dev`).

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use upkeep_core::{EngineConfig, HealthWeights, RecommendSettings};

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `UPKEEP_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.into()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub health: HealthWeights,
    #[serde(default)]
    pub recommend: RecommendSettings,
    #[serde(default)]
    pub log: LogConfig,
}

/// Returns `~/.config/upkeep[-dev]/` based on UPKEEP_ENV.
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("UPKEEP_ENV").unwrap_or_else(|_| "production".to_string());

    Ok(if env == "dev" {
        base_dir.join("upkeep-dev")
    } else {
        base_dir.join("upkeep")
    })
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> anyhow::Result<()> {
        if key.is_empty() {
            bail!("config key is empty");
        }
        let mut parts = key.split('.').peekable();

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| anyhow!("unknown config key: {key}"))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| anyhow!("unknown config key: {key}"))?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        let n: i64 = value
                            .parse()
                            .with_context(|| format!("cannot parse '{value}' as number"))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .with_context(|| format!("cannot parse '{value}' as bool"))?,
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        bail!("config key {key} is a section, set one of its fields")
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| anyhow!("unknown config key: {key}"))?;
        }

        bail!("unknown config key: {key}")
    }

    pub fn path() -> anyhow::Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid weights.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .with_context(|| format!("failed to parse {}", path.display()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.health.validate()?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown or the
    /// result fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)
            .with_context(|| format!("invalid value '{value}' for {key}"))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            health: self.health,
            recommend: self.recommend.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_nested_value() {
        let config = Config::default();
        assert_eq!(config.get("health.blocked_high").as_deref(), Some("20"));
        assert_eq!(config.get("recommend.owner").as_deref(), Some("Agent"));
        assert_eq!(config.get("log.level").as_deref(), Some("warn"));
        assert_eq!(config.get("health.missing"), None);
        assert_eq!(config.get(""), None);
    }

    #[test]
    fn test_set_number_and_string() {
        let mut config = Config::default();
        config.set("health.blocked", "15").unwrap();
        config.set("recommend.owner", "Web Platform").unwrap();
        assert_eq!(config.health.blocked, 15);
        assert_eq!(config.recommend.owner, "Web Platform");
    }

    #[test]
    fn test_set_negative_due_offset() {
        let mut config = Config::default();
        config.set("recommend.default_due_in_days", "-1").unwrap();
        assert_eq!(config.recommend.default_due_in_days, -1);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("health.nope", "1").is_err());
        assert!(config.set("", "1").is_err());
        assert!(config.set("health", "1").is_err());
    }

    #[test]
    fn test_set_rejects_invalid_weights() {
        let mut config = Config::default();
        assert!(config.set("health.blocked_high", "0").is_err());
        assert!(config.set("health.blocked", "abc").is_err());
        assert!(config.set("health.blocked", "-3").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_roundtrip_with_partial_file() {
        let cfg: Config = toml::from_str("[health]\nneglected = 6\n").unwrap();
        assert_eq!(cfg.health.neglected, 6);
        assert_eq!(cfg.health.blocked, 12);
        assert_eq!(cfg.log.level, "warn");
        assert_eq!(cfg.engine().recommend, RecommendSettings::default());
    }
}
