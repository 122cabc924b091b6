use crate::errors::domain::{DomainError, ErrorCode};
use crate::name::NameError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeErrorCode {
    UnknownScheme,
}

impl ErrorCode for SchemeErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::UnknownScheme => "unknown_scheme",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSchemeError {
    scheme: String,
    message: String,
}

impl UnknownSchemeError {
    pub fn new(scheme: impl Into<String>) -> Self {
        let scheme = scheme.into();
        let message = format!("Scheme '{scheme}' is not registered");
        Self { scheme, message }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl fmt::Display for UnknownSchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UnknownSchemeError {}

impl DomainError for UnknownSchemeError {
    fn code_str(&self) -> &'static str {
        SchemeErrorCode::UnknownScheme.as_code_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Failure of [`SchemeRegistry::parse_name`](super::SchemeRegistry::parse_name):
/// either the scheme has no parser or the parser rejected the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNameError {
    UnknownScheme(UnknownSchemeError),
    Name(NameError),
}

impl From<UnknownSchemeError> for ParseNameError {
    fn from(error: UnknownSchemeError) -> Self {
        Self::UnknownScheme(error)
    }
}

impl From<NameError> for ParseNameError {
    fn from(error: NameError) -> Self {
        Self::Name(error)
    }
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScheme(error) => fmt::Display::fmt(error, f),
            Self::Name(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl std::error::Error for ParseNameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownScheme(error) => Some(error),
            Self::Name(error) => Some(error),
        }
    }
}

impl DomainError for ParseNameError {
    fn code_str(&self) -> &'static str {
        match self {
            Self::UnknownScheme(error) => error.code_str(),
            Self::Name(error) => error.code_str(),
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::UnknownScheme(error) => DomainError::message(error),
            Self::Name(error) => DomainError::message(error),
        }
    }
}
