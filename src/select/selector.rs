use crate::filter::{EvaluationError, FileFilter, TraversalCandidate};
use crate::name::FileType;

/// Per-node decisions made during a traversal. Inclusion and descent are
/// asked separately: a folder may be skipped in the results and still be
/// entered, or listed and never entered.
pub trait FileSelector {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError>;

    /// Only asked for folders.
    fn traverse_descendants(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError>;
}

impl<S: FileSelector + ?Sized> FileSelector for &S {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        (**self).include_file(candidate)
    }

    fn traverse_descendants(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        (**self).traverse_descendants(candidate)
    }
}

impl<S: FileSelector + ?Sized> FileSelector for Box<S> {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        (**self).include_file(candidate)
    }

    fn traverse_descendants(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        (**self).traverse_descendants(candidate)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllFileSelector;

impl FileSelector for AllFileSelector {
    fn include_file(&self, _candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        Ok(true)
    }

    fn traverse_descendants(
        &self,
        _candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        Ok(true)
    }
}

/// Includes names whose depth lies in `min..=max` and stops descending at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthSelector {
    min: usize,
    max: usize,
}

impl DepthSelector {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl FileSelector for DepthSelector {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        Ok((self.min..=self.max).contains(&candidate.depth()))
    }

    fn traverse_descendants(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        Ok(candidate.depth() < self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSelector {
    file_type: FileType,
}

impl TypeSelector {
    pub const fn new(file_type: FileType) -> Self {
        Self { file_type }
    }
}

impl FileSelector for TypeSelector {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        Ok(candidate.file_type() == self.file_type)
    }

    fn traverse_descendants(
        &self,
        _candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        Ok(true)
    }
}

/// When a folder is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescendPolicy {
    Always,
    /// Lists the traversal root's children but enters no sub-folder.
    Never,
    /// Enters folders shallower than the given depth.
    MaxDepth(usize),
    Filter(FileFilter),
}

impl DescendPolicy {
    pub fn should_descend(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        match self {
            Self::Always => Ok(true),
            Self::Never => Ok(candidate.depth() == 0),
            Self::MaxDepth(max) => Ok(candidate.depth() < *max),
            Self::Filter(filter) => filter.evaluate(candidate),
        }
    }
}

/// Includes what `filter` accepts; descends per `descend`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelector {
    pub filter: FileFilter,
    pub descend: DescendPolicy,
}

impl FilterSelector {
    pub fn new(filter: FileFilter, descend: DescendPolicy) -> Self {
        Self { filter, descend }
    }
}

impl FileSelector for FilterSelector {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        self.filter.evaluate(candidate)
    }

    fn traverse_descendants(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        self.descend.should_descend(candidate)
    }
}

/// Borrowing counterpart of [`FilterSelector`].
pub(crate) struct FilterRef<'a> {
    pub(crate) filter: &'a FileFilter,
    pub(crate) descend: &'a DescendPolicy,
}

impl FileSelector for FilterRef<'_> {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        self.filter.evaluate(candidate)
    }

    fn traverse_descendants(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        self.descend.should_descend(candidate)
    }
}

/// Flips the include decision of another selector and keeps its descent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertIncludeSelector<S> {
    inner: S,
}

impl<S: FileSelector> InvertIncludeSelector<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: FileSelector> FileSelector for InvertIncludeSelector<S> {
    fn include_file(&self, candidate: &TraversalCandidate<'_>) -> Result<bool, EvaluationError> {
        Ok(!self.inner.include_file(candidate)?)
    }

    fn traverse_descendants(
        &self,
        candidate: &TraversalCandidate<'_>,
    ) -> Result<bool, EvaluationError> {
        self.inner.traverse_descendants(candidate)
    }
}

/// Only the base name itself.
pub const SELECT_SELF: DepthSelector = DepthSelector::new(0, 0);
pub const SELECT_SELF_AND_CHILDREN: DepthSelector = DepthSelector::new(0, 1);
pub const SELECT_CHILDREN: DepthSelector = DepthSelector::new(1, 1);
/// Every descendant, without the base name.
pub const EXCLUDE_SELF: DepthSelector = DepthSelector::new(1, usize::MAX);
pub const SELECT_FILES: TypeSelector = TypeSelector::new(FileType::File);
pub const SELECT_FOLDERS: TypeSelector = TypeSelector::new(FileType::Folder);
pub const SELECT_ALL: AllFileSelector = AllFileSelector;
