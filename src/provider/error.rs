use crate::errors::domain::{DomainError, ErrorCode, IoErrorHint};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorCode {
    NotFound,
    PermissionDenied,
    AlreadyExists,
    InvalidInput,
    ReadOnlyFilesystem,
    IoFailed,
    UnsupportedName,
    UnsupportedAttribute,
}

impl ErrorCode for ProviderErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::AlreadyExists => "already_exists",
            Self::InvalidInput => "invalid_input",
            Self::ReadOnlyFilesystem => "read_only_filesystem",
            Self::IoFailed => "io_failed",
            Self::UnsupportedName => "unsupported_name",
            Self::UnsupportedAttribute => "unsupported_attribute",
        }
    }
}

/// Failure reported by a hierarchy provider while listing or querying a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_io(error: &std::io::Error, context: impl fmt::Display) -> Self {
        let code = match IoErrorHint::of(error) {
            IoErrorHint::NotFound => ProviderErrorCode::NotFound,
            IoErrorHint::PermissionDenied => ProviderErrorCode::PermissionDenied,
            IoErrorHint::AlreadyExists => ProviderErrorCode::AlreadyExists,
            IoErrorHint::InvalidInput => ProviderErrorCode::InvalidInput,
            IoErrorHint::ReadOnlyFilesystem => ProviderErrorCode::ReadOnlyFilesystem,
            IoErrorHint::Other => ProviderErrorCode::IoFailed,
        };
        Self::new(code, format!("{context}: {error}"))
    }

    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}

impl DomainError for ProviderError {
    fn code_str(&self) -> &'static str {
        self.code.as_code_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
