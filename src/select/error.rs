use crate::errors::domain::{DomainError, ErrorCode};
use crate::filter::EvaluationError;
use crate::name::FileName;
use crate::provider::ProviderError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalErrorCode {
    ResolveFailed,
    ListFailed,
    EvaluationFailed,
}

impl ErrorCode for TraversalErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::ResolveFailed => "resolve_failed",
            Self::ListFailed => "list_failed",
            Self::EvaluationFailed => "evaluation_failed",
        }
    }
}

/// A traversal was abandoned. No partial result accompanies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalError {
    code: TraversalErrorCode,
    message: String,
    name: Option<FileName>,
}

impl TraversalError {
    pub fn new(code: TraversalErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            name: None,
        }
    }

    pub(crate) fn resolve(name: &FileName, error: &ProviderError) -> Self {
        Self::at(
            TraversalErrorCode::ResolveFailed,
            name,
            format!("Failed to resolve {name}: {error}"),
        )
    }

    pub(crate) fn list(name: &FileName, error: &ProviderError) -> Self {
        Self::at(
            TraversalErrorCode::ListFailed,
            name,
            format!("Failed to list {name}: {error}"),
        )
    }

    pub(crate) fn evaluation(name: &FileName, error: &EvaluationError) -> Self {
        Self::at(
            TraversalErrorCode::EvaluationFailed,
            name,
            format!("Failed to evaluate {name}: {error}"),
        )
    }

    fn at(code: TraversalErrorCode, name: &FileName, message: String) -> Self {
        Self {
            code,
            message,
            name: Some(name.clone()),
        }
    }

    pub fn code(&self) -> TraversalErrorCode {
        self.code
    }

    /// The name being resolved, listed or evaluated when the walk stopped.
    pub fn name(&self) -> Option<&FileName> {
        self.name.as_ref()
    }
}

impl fmt::Display for TraversalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TraversalError {}

impl DomainError for TraversalError {
    fn code_str(&self) -> &'static str {
        self.code.as_code_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}
