use crate::errors::domain::{DomainError, ErrorCode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    ReadFailed,
    InvalidFormat,
    InvalidValue,
    LoggingInitFailed,
}

impl ErrorCode for ConfigErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::ReadFailed => "read_failed",
            Self::InvalidFormat => "invalid_format",
            Self::InvalidValue => "invalid_value",
            Self::LoggingInitFailed => "logging_init_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    code: ConfigErrorCode,
    message: String,
}

impl ConfigError {
    pub fn new(code: ConfigErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(ConfigErrorCode::InvalidValue, message)
    }

    pub fn code(&self) -> ConfigErrorCode {
        self.code
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl DomainError for ConfigError {
    fn code_str(&self) -> &'static str {
        self.code.as_code_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
