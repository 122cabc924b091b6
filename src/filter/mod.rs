//! Composable predicates over traversal candidates.
//!
//! A [`FileFilter`] is a tree: leaves test one attribute, composites combine
//! an ordered list of children. Composites short-circuit left to right and the
//! first error stops evaluation. An empty `And` rejects everything, an empty
//! `Or` or `Chain` accepts everything.

mod ast;
mod candidate;
mod composite;
mod error;
mod eval;

pub use ast::{CustomPredicate, Predicate, RegexPattern, SizeRange, TextMatchMode, TextMatcher};
pub use candidate::TraversalCandidate;
pub use composite::{ChainLink, FilterList, Verdict};
pub use error::{EvaluationError, EvaluationErrorCode, FilterTreeError, FilterTreeErrorCode};

use crate::name::FileType;
use chrono::{DateTime, Utc};
use std::fmt;

const EMPTY_AND_RESULT: bool = false;
const EMPTY_OR_RESULT: bool = true;
const EMPTY_CHAIN_RESULT: bool = true;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFilter {
    Leaf(Predicate),
    Custom(CustomPredicate),
    And(FilterList<FileFilter>),
    Or(FilterList<FileFilter>),
    Not(Box<FileFilter>),
    /// First matching link decides; no match rejects.
    Chain(FilterList<ChainLink>),
}

impl FileFilter {
    pub fn accept_all() -> Self {
        Self::Leaf(Predicate::Accept(true))
    }

    pub fn reject_all() -> Self {
        Self::Leaf(Predicate::Accept(false))
    }

    pub fn and(filters: Vec<FileFilter>) -> Self {
        Self::And(FilterList::new(filters))
    }

    pub fn or(filters: Vec<FileFilter>) -> Self {
        Self::Or(FilterList::new(filters))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(filter: FileFilter) -> Self {
        Self::Not(Box::new(filter))
    }

    pub fn chain(links: Vec<ChainLink>) -> Self {
        Self::Chain(FilterList::new(links))
    }

    pub fn files_only() -> Self {
        Self::Leaf(Predicate::Type(FileType::File))
    }

    pub fn folders_only() -> Self {
        Self::Leaf(Predicate::Type(FileType::Folder))
    }

    pub fn empty(empty: bool) -> Self {
        Self::Leaf(Predicate::Empty(empty))
    }

    pub fn size(range: SizeRange) -> Self {
        Self::Leaf(Predicate::Size(range))
    }

    pub fn older_than(cutoff: DateTime<Utc>) -> Self {
        Self::Leaf(Predicate::Age {
            cutoff,
            accept_older: true,
        })
    }

    pub fn newer_than(cutoff: DateTime<Utc>) -> Self {
        Self::Leaf(Predicate::Age {
            cutoff,
            accept_older: false,
        })
    }

    pub fn hidden(hidden: bool) -> Self {
        Self::Leaf(Predicate::Hidden(hidden))
    }

    pub fn readable(readable: bool) -> Self {
        Self::Leaf(Predicate::Readable(readable))
    }

    pub fn writable(writable: bool) -> Self {
        Self::Leaf(Predicate::Writable(writable))
    }

    pub fn depth(min: usize, max: usize) -> Self {
        Self::Leaf(Predicate::Depth { min, max })
    }

    pub fn name(matcher: TextMatcher) -> Self {
        Self::Leaf(Predicate::Name(matcher))
    }

    pub fn wildcard(pattern: impl Into<String>) -> Self {
        Self::name(TextMatcher::new(pattern, TextMatchMode::Wildcard))
    }

    pub fn regex(pattern: &str) -> Result<Self, FilterTreeError> {
        Ok(Self::Leaf(Predicate::Regex(RegexPattern::new(pattern)?)))
    }

    pub fn custom<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&TraversalCandidate<'_>) -> Result<bool, EvaluationError> + Send + Sync + 'static,
    {
        Self::Custom(CustomPredicate::new(label, func))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::And(_) | Self::Or(_) | Self::Chain(_))
    }

    pub fn evaluate(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        match self {
            Self::Leaf(predicate) => eval::evaluate_predicate(predicate, candidate),
            Self::Custom(custom) => custom.call(candidate),
            Self::And(children) => {
                if children.is_empty() {
                    return Ok(EMPTY_AND_RESULT);
                }
                for child in children.iter() {
                    if !child.evaluate(candidate)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(children) => {
                if children.is_empty() {
                    return Ok(EMPTY_OR_RESULT);
                }
                for child in children.iter() {
                    if child.evaluate(candidate)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(inner) => Ok(!inner.evaluate(candidate)?),
            Self::Chain(links) => {
                if links.is_empty() {
                    return Ok(EMPTY_CHAIN_RESULT);
                }
                for link in links.iter() {
                    if link.filter.evaluate(candidate)? {
                        return Ok(link.verdict == Verdict::Accept);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Appends a child. On a chain the child becomes an accepting link.
    pub fn add_filter(&mut self, filter: FileFilter) -> Result<(), FilterTreeError> {
        match self {
            Self::And(children) | Self::Or(children) => children.add(filter),
            Self::Chain(links) => links.add(ChainLink::accept(filter)),
            other => return Err(FilterTreeError::not_composite(other.kind())),
        }
        Ok(())
    }

    /// Removes the first structurally equal child, reporting whether one was
    /// found. On a chain the link's verdict is not compared.
    pub fn remove_filter(&mut self, filter: &FileFilter) -> Result<bool, FilterTreeError> {
        match self {
            Self::And(children) | Self::Or(children) => Ok(children.remove(filter)),
            Self::Chain(links) => {
                let position = links.iter().position(|link| &link.filter == filter);
                Ok(match position {
                    Some(index) => links.remove_at(index).is_ok(),
                    None => false,
                })
            }
            other => Err(FilterTreeError::not_composite(other.kind())),
        }
    }

    /// Replaces every child at once. On a chain every child becomes an
    /// accepting link.
    pub fn set_filters(&mut self, filters: Vec<FileFilter>) -> Result<(), FilterTreeError> {
        match self {
            Self::And(children) | Self::Or(children) => children.set(filters),
            Self::Chain(links) => links.set(filters.into_iter().map(ChainLink::accept).collect()),
            other => return Err(FilterTreeError::not_composite(other.kind())),
        }
        Ok(())
    }

    pub fn filters(&self) -> Result<Vec<&FileFilter>, FilterTreeError> {
        match self {
            Self::And(children) | Self::Or(children) => Ok(children.iter().collect()),
            Self::Chain(links) => Ok(links.iter().map(|link| &link.filter).collect()),
            other => Err(FilterTreeError::not_composite(other.kind())),
        }
    }

    pub fn add_link(&mut self, link: ChainLink) -> Result<(), FilterTreeError> {
        match self {
            Self::Chain(links) => {
                links.add(link);
                Ok(())
            }
            other => Err(FilterTreeError::not_composite(other.kind())),
        }
    }

    /// Child list of an `And` or `Or` for indexed edits.
    pub fn children_mut(&mut self) -> Result<&mut FilterList<FileFilter>, FilterTreeError> {
        match self {
            Self::And(children) | Self::Or(children) => Ok(children),
            other => Err(FilterTreeError::not_composite(other.kind())),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "Leaf",
            Self::Custom(_) => "Custom",
            Self::And(_) => "And",
            Self::Or(_) => "Or",
            Self::Not(_) => "Not",
            Self::Chain(_) => "Chain",
        }
    }
}

impl From<Predicate> for FileFilter {
    fn from(predicate: Predicate) -> Self {
        Self::Leaf(predicate)
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<'a>(
            f: &mut fmt::Formatter<'_>,
            label: &str,
            items: impl Iterator<Item = (Option<char>, &'a FileFilter)>,
        ) -> fmt::Result {
            write!(f, "{label}(")?;
            for (index, (marker, item)) in items.enumerate() {
                if index > 0 {
                    f.write_str(",")?;
                }
                if let Some(marker) = marker {
                    write!(f, "{marker}")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::Leaf(predicate) => write!(f, "{predicate}"),
            Self::Custom(custom) => write!(f, "Custom({})", custom.label()),
            Self::And(children) => list(f, "And", children.iter().map(|c| (None, c))),
            Self::Or(children) => list(f, "Or", children.iter().map(|c| (None, c))),
            Self::Not(inner) => write!(f, "Not({inner})"),
            Self::Chain(links) => list(
                f,
                "Chain",
                links.iter().map(|link| {
                    let marker = match link.verdict {
                        Verdict::Accept => '+',
                        Verdict::Reject => '-',
                    };
                    (Some(marker), &link.filter)
                }),
            ),
        }
    }
}
