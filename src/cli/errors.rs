use std::io;

use madbudget_config::ConfigError;
use madbudget_core::CoreError;

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    /// Failures caused by the budget inputs rather than by the environment.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            CommandError::InvalidArguments(_)
                | CommandError::Core(
                    CoreError::InvalidPeriod(_)
                        | CoreError::InvalidBudget(_)
                        | CoreError::InvalidTransaction { .. }
                        | CoreError::Validation(_)
                )
        )
    }
}
