use super::error::EvaluationError;
use crate::name::{FileName, FileType};
use crate::provider::{AttributeKind, AttributeSource, AttributeValue};
use chrono::{DateTime, Utc};

/// One node as presented to filters and selectors. Attributes are queried
/// from the provider only when a predicate asks for them.
pub struct TraversalCandidate<'a> {
    name: &'a FileName,
    depth: usize,
    file_type: FileType,
    attributes: &'a dyn AttributeSource,
}

impl<'a> TraversalCandidate<'a> {
    pub fn new(
        name: &'a FileName,
        depth: usize,
        file_type: FileType,
        attributes: &'a dyn AttributeSource,
    ) -> Self {
        Self {
            name,
            depth,
            file_type,
            attributes,
        }
    }

    pub fn name(&self) -> &FileName {
        self.name
    }

    /// Distance from the traversal root, which sits at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn attribute(&self, kind: AttributeKind) -> Result<AttributeValue, EvaluationError> {
        self.attributes
            .attribute(kind)
            .map_err(|err| EvaluationError::from_provider(kind, &err))
    }

    pub fn size(&self) -> Result<u64, EvaluationError> {
        self.attribute(AttributeKind::Size)?
            .as_size()
            .ok_or_else(|| EvaluationError::unexpected_value(AttributeKind::Size))
    }

    pub fn is_empty(&self) -> Result<bool, EvaluationError> {
        self.flag(AttributeKind::Empty)
    }

    pub fn last_modified(&self) -> Result<DateTime<Utc>, EvaluationError> {
        self.attribute(AttributeKind::LastModified)?
            .as_timestamp()
            .ok_or_else(|| EvaluationError::unexpected_value(AttributeKind::LastModified))
    }

    pub fn is_hidden(&self) -> Result<bool, EvaluationError> {
        self.flag(AttributeKind::Hidden)
    }

    pub fn is_readable(&self) -> Result<bool, EvaluationError> {
        self.flag(AttributeKind::Readable)
    }

    pub fn is_writable(&self) -> Result<bool, EvaluationError> {
        self.flag(AttributeKind::Writable)
    }

    fn flag(&self, kind: AttributeKind) -> Result<bool, EvaluationError> {
        self.attribute(kind)?
            .as_flag()
            .ok_or_else(|| EvaluationError::unexpected_value(kind))
    }
}
