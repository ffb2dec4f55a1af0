use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid_input - {0}")]
    InvalidInput(String),
    #[error("not_found - {0}")]
    NotFound(String),
    #[error("already_completed - {0}")]
    AlreadyCompleted(String),
    #[error("corrupt_data - {0}")]
    Corrupt(String),
    #[error("parse_error - {0}")]
    Parse(String),
    #[error("io_error - {0}")]
    Io(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(id: u64) -> Self {
        Self::NotFound(format!("task {id} not found"))
    }

    pub fn already_completed(id: u64) -> Self {
        Self::AlreadyCompleted(format!("task {id} is already completed"))
    }

    pub fn corrupt<M: Into<String>>(message: M) -> Self {
        Self::Corrupt(message.into())
    }

    pub fn parse<M: Into<String>>(message: M) -> Self {
        Self::Parse(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::AlreadyCompleted(_) => "already_completed",
            Self::Corrupt(_) => "corrupt_data",
            Self::Parse(_) => "parse_error",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message)
            | Self::NotFound(message)
            | Self::AlreadyCompleted(message)
            | Self::Corrupt(message)
            | Self::Parse(message)
            | Self::Io(message) => message,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}
