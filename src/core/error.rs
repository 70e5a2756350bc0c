use thiserror::Error;

use crate::core::types::ResourceCode;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid fusion: {0}")]
    InvalidFusion(String),

    #[error("Cannot defuse {0}")]
    InvalidDefusion(ResourceCode),

    #[error("Target {0} needs level 0..=8 and weight 1..=9999")]
    InvalidTarget(ResourceCode),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
