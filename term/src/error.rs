use mineterm_core::GameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum AppError {
    #[error(transparent)]
    Config(#[from] GameError),
    #[error("Invalid {what}: {value:?}")]
    Prompt { what: &'static str, value: String },
    #[error("Input closed before a game was configured")]
    InputClosed,
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
