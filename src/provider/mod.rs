//! Interfaces to the storage that backs a hierarchy, plus two implementations:
//! an in-memory tree and the local disk.

mod error;
mod local;
mod memory;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use local::{LocalFileProvider, LocalNode};
pub use memory::{MemoryHierarchy, NodeId};

use crate::name::{FileName, FileType};
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Size,
    Empty,
    LastModified,
    Hidden,
    Readable,
    Writable,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Size => "size",
            Self::Empty => "empty",
            Self::LastModified => "last_modified",
            Self::Hidden => "hidden",
            Self::Readable => "readable",
            Self::Writable => "writable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue {
    Size(u64),
    Flag(bool),
    Timestamp(DateTime<Utc>),
}

impl AttributeValue {
    pub fn as_size(self) -> Option<u64> {
        match self {
            Self::Size(size) => Some(size),
            _ => None,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(flag),
            _ => None,
        }
    }

    pub fn as_timestamp(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(at) => Some(at),
            _ => None,
        }
    }
}

/// A navigable hierarchy. `Node` is an opaque handle the provider hands out
/// from [`list_children`](Self::list_children) and [`Resolver::resolve`].
pub trait HierarchyProvider {
    type Node;

    fn name(&self, node: &Self::Node) -> FileName;

    fn file_type(&self, node: &Self::Node) -> FileType;

    /// Children in the provider's own, deterministic order.
    fn list_children(&self, node: &Self::Node) -> ProviderResult<Vec<Self::Node>>;

    fn attribute(&self, node: &Self::Node, kind: AttributeKind) -> ProviderResult<AttributeValue>;
}

pub trait Resolver: HierarchyProvider {
    fn resolve(&self, name: &FileName) -> ProviderResult<Self::Node>;
}

/// Lazily answers attribute queries for one candidate.
pub trait AttributeSource {
    fn attribute(&self, kind: AttributeKind) -> ProviderResult<AttributeValue>;
}

/// Binds a node to its provider so attribute queries can be issued on demand.
pub struct NodeRef<'a, P: HierarchyProvider + ?Sized> {
    provider: &'a P,
    node: &'a P::Node,
}

impl<'a, P: HierarchyProvider + ?Sized> NodeRef<'a, P> {
    pub fn new(provider: &'a P, node: &'a P::Node) -> Self {
        Self { provider, node }
    }
}

impl<P: HierarchyProvider + ?Sized> AttributeSource for NodeRef<'_, P> {
    fn attribute(&self, kind: AttributeKind) -> ProviderResult<AttributeValue> {
        self.provider.attribute(self.node, kind)
    }
}
