use crate::errors::domain::{DomainError, ErrorCode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameErrorCode {
    MissingScheme,
    MalformedScheme,
    MalformedAuthority,
    InvalidPort,
    InvalidEncoding,
    PathUnderflow,
    InvalidChildName,
    SchemeMismatch,
}

impl ErrorCode for NameErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::MissingScheme => "missing_scheme",
            Self::MalformedScheme => "malformed_scheme",
            Self::MalformedAuthority => "malformed_authority",
            Self::InvalidPort => "invalid_port",
            Self::InvalidEncoding => "invalid_encoding",
            Self::PathUnderflow => "path_underflow",
            Self::InvalidChildName => "invalid_child_name",
            Self::SchemeMismatch => "scheme_mismatch",
        }
    }
}

/// Rejection of a raw identifier or of a name derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameError {
    code: NameErrorCode,
    message: String,
}

impl NameError {
    pub fn new(code: NameErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> NameErrorCode {
        self.code
    }

    pub(crate) fn underflow(path: &str) -> Self {
        Self::new(
            NameErrorCode::PathUnderflow,
            format!("Path '{path}' resolves above the root"),
        )
    }
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NameError {}

impl DomainError for NameError {
    fn code_str(&self) -> &'static str {
        self.code.as_code_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

pub type NameResult<T> = Result<T, NameError>;
