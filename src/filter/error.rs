use crate::errors::domain::{DomainError, ErrorCode};
use crate::provider::{AttributeKind, ProviderError, ProviderErrorCode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationErrorCode {
    AttributeQueryFailed,
    AttributeUnsupported,
    PredicateFailed,
}

impl ErrorCode for EvaluationErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::AttributeQueryFailed => "attribute_query_failed",
            Self::AttributeUnsupported => "attribute_unsupported",
            Self::PredicateFailed => "predicate_failed",
        }
    }
}

/// A filter could not decide about a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationError {
    code: EvaluationErrorCode,
    message: String,
}

impl EvaluationError {
    pub fn new(code: EvaluationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// For custom predicates that need to report their own failure.
    pub fn predicate_failed(message: impl Into<String>) -> Self {
        Self::new(EvaluationErrorCode::PredicateFailed, message)
    }

    pub(crate) fn from_provider(kind: AttributeKind, error: &ProviderError) -> Self {
        let code = match error.code() {
            ProviderErrorCode::UnsupportedAttribute => EvaluationErrorCode::AttributeUnsupported,
            _ => EvaluationErrorCode::AttributeQueryFailed,
        };
        Self::new(code, format!("Failed to query {kind}: {error}"))
    }

    pub(crate) fn unexpected_value(kind: AttributeKind) -> Self {
        Self::new(
            EvaluationErrorCode::AttributeQueryFailed,
            format!("Provider returned a value of the wrong kind for {kind}"),
        )
    }

    pub fn code(&self) -> EvaluationErrorCode {
        self.code
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvaluationError {}

impl DomainError for EvaluationError {
    fn code_str(&self) -> &'static str {
        self.code.as_code_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTreeErrorCode {
    NotComposite,
    IndexOutOfRange,
    InvalidPattern,
}

impl ErrorCode for FilterTreeErrorCode {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::NotComposite => "not_composite",
            Self::IndexOutOfRange => "index_out_of_range",
            Self::InvalidPattern => "invalid_pattern",
        }
    }
}

/// Misuse of the filter tree while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTreeError {
    code: FilterTreeErrorCode,
    message: String,
}

impl FilterTreeError {
    pub fn new(code: FilterTreeErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn not_composite(kind: &str) -> Self {
        Self::new(
            FilterTreeErrorCode::NotComposite,
            format!("{kind} filter has no child list"),
        )
    }

    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            FilterTreeErrorCode::IndexOutOfRange,
            format!("Index {index} out of range for {len} child filters"),
        )
    }

    pub fn code(&self) -> FilterTreeErrorCode {
        self.code
    }
}

impl fmt::Display for FilterTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FilterTreeError {}

impl DomainError for FilterTreeError {
    fn code_str(&self) -> &'static str {
        self.code.as_code_str()
    }

    fn message(&self) -> &str {
        &self.message
    }
}
