use super::candidate::TraversalCandidate;
use super::error::{EvaluationError, FilterTreeError, FilterTreeErrorCode};
use crate::name::FileType;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Attribute test over a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Constant answer, independent of the candidate.
    Accept(bool),
    Empty(bool),
    /// Only files can match.
    Size(SizeRange),
    /// `accept_older` matches names modified at or before `cutoff`; otherwise
    /// names modified strictly after it.
    Age {
        cutoff: DateTime<Utc>,
        accept_older: bool,
    },
    Hidden(bool),
    Readable(bool),
    Writable(bool),
    Type(FileType),
    Depth {
        min: usize,
        max: usize,
    },
    Name(TextMatcher),
    Regex(RegexPattern),
}

/// Inclusive size bounds in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl SizeRange {
    pub fn between(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: u64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: u64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, size: u64) -> bool {
        self.min.map_or(true, |min| size >= min) && self.max.map_or(true, |max| size <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    pub raw: String,
    pub mode: TextMatchMode,
    pub case_sensitive: bool,
}

impl TextMatcher {
    /// Case-insensitive matcher.
    pub fn new(raw: impl Into<String>, mode: TextMatchMode) -> Self {
        Self {
            raw: raw.into(),
            mode,
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatchMode {
    Exact,
    Prefix,
    Suffix,
    Contains,
    /// `*` matches any run of characters, `?` exactly one.
    Wildcard,
}

/// Compiled regular expression, compared by its source text.
#[derive(Debug, Clone)]
pub struct RegexPattern(Regex);

impl RegexPattern {
    pub fn new(pattern: &str) -> Result<Self, FilterTreeError> {
        Regex::new(pattern).map(Self).map_err(|err| {
            FilterTreeError::new(
                FilterTreeErrorCode::InvalidPattern,
                format!("Invalid pattern '{pattern}': {err}"),
            )
        })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

impl PartialEq for RegexPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for RegexPattern {}

pub type PredicateFn =
    dyn Fn(&TraversalCandidate<'_>) -> Result<bool, EvaluationError> + Send + Sync;

/// Caller-supplied decision logic. Two custom predicates are equal only when
/// they share the same function allocation.
#[derive(Clone)]
pub struct CustomPredicate {
    label: String,
    func: Arc<PredicateFn>,
}

impl CustomPredicate {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&TraversalCandidate<'_>) -> Result<bool, EvaluationError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn call(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        (self.func)(candidate)
    }
}

impl PartialEq for CustomPredicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl Eq for CustomPredicate {}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPredicate")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept(true) => f.write_str("Accept"),
            Self::Accept(false) => f.write_str("Reject"),
            Self::Empty(true) => f.write_str("Empty"),
            Self::Empty(false) => f.write_str("NotEmpty"),
            Self::Size(range) => {
                f.write_str("Size(")?;
                if let Some(min) = range.min {
                    write!(f, "{min}")?;
                }
                f.write_str("..=")?;
                if let Some(max) = range.max {
                    write!(f, "{max}")?;
                }
                f.write_str(")")
            }
            Self::Age {
                cutoff,
                accept_older,
            } => {
                let op = if *accept_older { "<=" } else { ">" };
                write!(f, "Age({op}{})", cutoff.to_rfc3339())
            }
            Self::Hidden(true) => f.write_str("Hidden"),
            Self::Hidden(false) => f.write_str("Visible"),
            Self::Readable(true) => f.write_str("Readable"),
            Self::Readable(false) => f.write_str("Unreadable"),
            Self::Writable(true) => f.write_str("Writable"),
            Self::Writable(false) => f.write_str("ReadOnly"),
            Self::Type(file_type) => write!(f, "Type({file_type:?})"),
            Self::Depth { min, max } => write!(f, "Depth({min}..={max})"),
            Self::Name(matcher) => write!(f, "Name({})", matcher.raw),
            Self::Regex(pattern) => write!(f, "Regex({})", pattern.as_str()),
        }
    }
}
