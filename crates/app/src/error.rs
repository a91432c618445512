use ledger_client::{ClientError, FieldError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("invalid input: {}", join(.0))]
    Invalid(Vec<FieldError>),
    #[error("entry was not saved")]
    NotSaved,
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
