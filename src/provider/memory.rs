use super::error::{ProviderError, ProviderErrorCode, ProviderResult};
use super::{AttributeKind, AttributeValue, HierarchyProvider, Resolver};
use crate::name::{FileName, FileType};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MemoryNode {
    name: FileName,
    file_type: FileType,
    size: u64,
    modified: Option<DateTime<Utc>>,
    hidden: bool,
    readable: bool,
    writable: bool,
    children: Vec<NodeId>,
    listing_failure: Option<String>,
    attribute_failure: Option<String>,
}

impl MemoryNode {
    fn new(name: FileName, file_type: FileType, size: u64) -> Self {
        let hidden = name.base_name().starts_with('.');
        Self {
            name: name.with_type(file_type),
            file_type,
            size,
            modified: None,
            hidden,
            readable: true,
            writable: true,
            children: Vec::new(),
            listing_failure: None,
            attribute_failure: None,
        }
    }
}

/// Arena-backed in-memory hierarchy. Children keep insertion order.
#[derive(Debug)]
pub struct MemoryHierarchy {
    nodes: Vec<MemoryNode>,
    index: HashMap<FileName, NodeId>,
    attribute_queries: AtomicUsize,
    listings: AtomicUsize,
}

impl MemoryHierarchy {
    pub fn new(root: FileName) -> Self {
        let root_node = MemoryNode::new(root.clone(), FileType::Folder, 0);
        let mut index = HashMap::new();
        index.insert(root, NodeId(0));
        Self {
            nodes: vec![root_node],
            index,
            attribute_queries: AtomicUsize::new(0),
            listings: AtomicUsize::new(0),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_file(&mut self, parent: NodeId, name: &str, size: u64) -> ProviderResult<NodeId> {
        self.add_node(parent, name, FileType::File, size)
    }

    pub fn add_folder(&mut self, parent: NodeId, name: &str) -> ProviderResult<NodeId> {
        self.add_node(parent, name, FileType::Folder, 0)
    }

    pub fn lookup(&self, name: &FileName) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn set_modified(&mut self, node: NodeId, at: DateTime<Utc>) {
        self.nodes[node.0].modified = Some(at);
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        self.nodes[node.0].hidden = hidden;
    }

    pub fn set_permissions(&mut self, node: NodeId, readable: bool, writable: bool) {
        let entry = &mut self.nodes[node.0];
        entry.readable = readable;
        entry.writable = writable;
    }

    /// Makes every later listing of `node` fail with `message`.
    pub fn fail_listing(&mut self, node: NodeId, message: impl Into<String>) {
        self.nodes[node.0].listing_failure = Some(message.into());
    }

    /// Makes every later attribute query on `node` fail with `message`.
    pub fn fail_attributes(&mut self, node: NodeId, message: impl Into<String>) {
        self.nodes[node.0].attribute_failure = Some(message.into());
    }

    pub fn attribute_queries(&self) -> usize {
        self.attribute_queries.load(Ordering::Relaxed)
    }

    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::Relaxed)
    }

    fn add_node(
        &mut self,
        parent: NodeId,
        name: &str,
        file_type: FileType,
        size: u64,
    ) -> ProviderResult<NodeId> {
        let parent_node = self.nodes.get(parent.0).ok_or_else(|| {
            ProviderError::new(ProviderErrorCode::NotFound, "Parent node does not exist")
        })?;
        if parent_node.file_type != FileType::Folder {
            return Err(ProviderError::new(
                ProviderErrorCode::UnsupportedName,
                format!("'{}' is not a folder", parent_node.name),
            ));
        }
        let child_name = parent_node.name.child(name).map_err(|err| {
            ProviderError::new(ProviderErrorCode::UnsupportedName, err.to_string())
        })?;
        if self.index.contains_key(&child_name) {
            return Err(ProviderError::new(
                ProviderErrorCode::UnsupportedName,
                format!("'{child_name}' already exists"),
            ));
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(child_name.clone(), id);
        self.nodes.push(MemoryNode::new(child_name, file_type, size));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn node(&self, id: NodeId) -> ProviderResult<&MemoryNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| ProviderError::new(ProviderErrorCode::NotFound, "Unknown node"))
    }
}

impl HierarchyProvider for MemoryHierarchy {
    type Node = NodeId;

    fn name(&self, node: &NodeId) -> FileName {
        self.nodes[node.0].name.clone()
    }

    fn file_type(&self, node: &NodeId) -> FileType {
        self.nodes
            .get(node.0)
            .map(|entry| entry.file_type)
            .unwrap_or(FileType::Unknown)
    }

    fn list_children(&self, node: &NodeId) -> ProviderResult<Vec<NodeId>> {
        self.listings.fetch_add(1, Ordering::Relaxed);
        let entry = self.node(*node)?;
        if let Some(message) = &entry.listing_failure {
            return Err(ProviderError::new(
                ProviderErrorCode::IoFailed,
                format!("Listing '{}' failed: {message}", entry.name),
            ));
        }
        Ok(entry.children.clone())
    }

    fn attribute(&self, node: &NodeId, kind: AttributeKind) -> ProviderResult<AttributeValue> {
        self.attribute_queries.fetch_add(1, Ordering::Relaxed);
        let entry = self.node(*node)?;
        if let Some(message) = &entry.attribute_failure {
            return Err(ProviderError::new(
                ProviderErrorCode::IoFailed,
                format!("Reading {kind} of '{}' failed: {message}", entry.name),
            ));
        }
        match kind {
            AttributeKind::Size => Ok(AttributeValue::Size(entry.size)),
            AttributeKind::Empty => Ok(AttributeValue::Flag(match entry.file_type {
                FileType::Folder => entry.children.is_empty(),
                _ => entry.size == 0,
            })),
            AttributeKind::LastModified => {
                entry.modified.map(AttributeValue::Timestamp).ok_or_else(|| {
                    ProviderError::new(
                        ProviderErrorCode::UnsupportedAttribute,
                        format!("'{}' has no modification time", entry.name),
                    )
                })
            }
            AttributeKind::Hidden => Ok(AttributeValue::Flag(entry.hidden)),
            AttributeKind::Readable => Ok(AttributeValue::Flag(entry.readable)),
            AttributeKind::Writable => Ok(AttributeValue::Flag(entry.writable)),
        }
    }
}

impl Resolver for MemoryHierarchy {
    fn resolve(&self, name: &FileName) -> ProviderResult<NodeId> {
        self.lookup(name).ok_or_else(|| {
            ProviderError::new(
                ProviderErrorCode::NotFound,
                format!("'{name}' does not exist"),
            )
        })
    }
}
