use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Unknown category: '{category}' (available: {})", .available.join(", "))]
    UnknownCategory {
        category: String,
        available: Vec<String>,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid tool list: {message}")]
    InvalidToolList { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

impl ClassifierError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } => 2,
            Self::UnknownCategory { .. } => 3,
            Self::ConfigParse { .. } | Self::ConfigKeyNotFound { .. } => 4,
            Self::InvalidToolList { .. } => 5,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_lists_available() {
        let err = ClassifierError::UnknownCategory {
            category: "notification".to_string(),
            available: vec!["booking".to_string(), "query".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'notification'"));
        assert!(msg.contains("booking, query"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ClassifierError::configuration("bad").exit_code(), 2);
        assert_eq!(
            ClassifierError::UnknownCategory {
                category: "x".to_string(),
                available: Vec::new(),
            }
            .exit_code(),
            3
        );
        assert_eq!(
            ClassifierError::ConfigKeyNotFound {
                key: "x".to_string()
            }
            .exit_code(),
            4
        );
    }
}
