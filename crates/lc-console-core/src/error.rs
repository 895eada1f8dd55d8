use thiserror::Error;

/// Failures the console reports to its presentation layer. None of them are
/// fatal; retrying the same operation is always allowed.
///
/// `Clone` so a single wallet-list pipeline failure can be handed to every
/// caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("node request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Validation(String),

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    pub fn transport(err: anyhow::Error) -> Self {
        Self::Transport(format!("{err:#}"))
    }

    pub fn storage(err: anyhow::Error) -> Self {
        Self::Storage(format!("{err:#}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
