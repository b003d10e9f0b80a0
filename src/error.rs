use std::path::PathBuf;

use thiserror::Error;

use crate::config::ValidationError;

/// Reasons the cover config can be rejected at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Validation(#[from] ValidationError),

    #[error("Topic {topic} is claimed by both {first} and {second}")]
    TopicCollision {
        topic: String,
        first: String,
        second: String,
    },
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("MQTT client error: {0}")]
    Client(#[from] rumqttc::ClientError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML output error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Pulse controller is no longer running")]
    ControllerClosed,

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

impl From<&str> for BridgeError {
    fn from(error: &str) -> Self {
        BridgeError::RuntimeError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
