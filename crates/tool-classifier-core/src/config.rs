use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::category::{ClassificationConfig, StrategyKind, ToolClassifier};
use crate::error::{ClassifierError, Result};

const CONFIG_FILE: &str = "classifier.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# tool-classifier configuration file
# Location: ~/.tool-classifier/classifier.toml

# Classification strategy: "explicit", "prefix" or "keyword"
# Default: "explicit"
strategy = "explicit"

# Each table below is optional. When present it replaces the built-in
# table for that strategy entirely (no merging).

# Tool name -> categories
# [explicit]
# get_available_rooms = ["booking", "query"]
# book_meeting_room = ["booking"]
# cancel_reservation = ["management"]

# Category -> tool name prefixes (case-sensitive, every match counts)
# [prefix]
# booking = ["book_", "reserve_", "get_available_"]
# query = ["get_", "list_", "search_"]

# Category -> description keywords (case-insensitive substring match)
# [keyword]
# booking = ["預約", "book", "reserve"]
# management = ["取消", "cancel"]
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Strategy tag, validated when a classifier is built
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Custom explicit table (tool name -> categories)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit: Option<Value>,

    /// Custom prefix table (category -> prefixes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Value>,

    /// Custom keyword table (category -> keywords)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<Value>,
}

fn default_strategy() -> String {
    StrategyKind::default().id().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            explicit: None,
            prefix: None,
            keyword: None,
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| ClassifierError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Selected strategy
    pub fn strategy_kind(&self) -> Result<StrategyKind> {
        self.strategy.parse()
    }

    /// Custom table for a strategy, if the file defines one
    pub fn custom_config(&self, kind: StrategyKind) -> Result<Option<ClassificationConfig>> {
        let raw = match kind {
            StrategyKind::Explicit => &self.explicit,
            StrategyKind::Prefix => &self.prefix,
            StrategyKind::Keyword => &self.keyword,
        };

        raw.as_ref()
            .map(|value| ClassificationConfig::from_value(kind, value))
            .transpose()
    }

    /// Build a classifier for the configured strategy
    pub fn classifier(&self) -> Result<ToolClassifier> {
        self.classifier_for(self.strategy_kind()?)
    }

    /// Build a classifier for `kind`, using this file's table for it when present
    pub fn classifier_for(&self, kind: StrategyKind) -> Result<ToolClassifier> {
        ToolClassifier::with_kind(kind, self.custom_config(kind)?)
    }

    /// Get a config value by key
    ///
    /// Table keys resolve to the table a classifier would use. A custom
    /// table with the wrong shape is an error, never the builtin fallback.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "strategy" => Ok(self.strategy.clone()),
            "explicit" | "prefix" | "keyword" => {
                let kind: StrategyKind = key.parse()?;
                let table = self
                    .custom_config(kind)?
                    .unwrap_or_else(|| ClassificationConfig::builtin(kind));
                Ok(table.to_value().to_string())
            }
            _ => Err(ClassifierError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Set a config value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "strategy" => {
                let kind: StrategyKind = value.trim().parse()?;
                self.strategy = kind.id().to_string();
                Ok(())
            }
            _ => Err(ClassifierError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let mut entries = vec![("strategy".to_string(), self.strategy.clone())];
        for kind in StrategyKind::all() {
            let source = match self.custom_config(*kind)? {
                Some(_) => "custom",
                None => "builtin",
            };
            entries.push((kind.id().to_string(), source.to_string()));
        }
        Ok(entries)
    }
}
