use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for domain, storage, and assistant layers.
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Holding not found: {0}")]
    HoldingNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Assistant error: {0}")]
    AssistantError(String),
}

pub type Result<T> = StdResult<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::StorageError(err.to_string())
    }
}

impl From<reqwest::Error> for FinanceError {
    fn from(err: reqwest::Error) -> Self {
        FinanceError::AssistantError(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
