use thiserror::Error;

use crate::providers::ProviderError;
use crate::wizard::{Step, TransitionError};

#[derive(Error, Debug)]
pub enum CooeeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Wizard transition error: {0}")]
    Transition(#[from] TransitionError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{step} step failed: {message}")]
    StepFailed { step: Step, message: String },

    #[error("CLI error: {0}")]
    Cli(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CooeeError>;
