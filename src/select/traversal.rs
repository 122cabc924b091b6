use super::error::TraversalError;
use super::selector::{DescendPolicy, FileSelector, FilterRef};
use crate::filter::{FileFilter, TraversalCandidate};
use crate::name::FileName;
use crate::provider::{HierarchyProvider, NodeRef, Resolver};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraversalOrder {
    /// A folder precedes its descendants.
    #[default]
    PreOrder,
    /// A folder follows its descendants.
    PostOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalOptions {
    pub order: TraversalOrder,
    /// Stop once this many names were collected.
    pub max_results: Option<usize>,
}

enum Flow {
    Continue,
    Stop,
}

struct Walk<'a, P: HierarchyProvider + ?Sized, S: FileSelector + ?Sized> {
    provider: &'a P,
    selector: &'a S,
    options: TraversalOptions,
    results: Vec<FileName>,
}

impl<P: HierarchyProvider + ?Sized, S: FileSelector + ?Sized> Walk<'_, P, S> {
    fn visit(&mut self, node: &P::Node, depth: usize) -> Result<Flow, TraversalError> {
        let name = self.provider.name(node);
        let file_type = self.provider.file_type(node);
        let attributes = NodeRef::new(self.provider, node);
        let candidate = TraversalCandidate::new(&name, depth, file_type, &attributes);

        let include = self
            .selector
            .include_file(&candidate)
            .map_err(|err| TraversalError::evaluation(&name, &err))?;
        if include && self.options.order == TraversalOrder::PreOrder {
            if let Flow::Stop = self.collect(&name) {
                return Ok(Flow::Stop);
            }
        }

        if file_type.has_children() {
            let descend = self
                .selector
                .traverse_descendants(&candidate)
                .map_err(|err| TraversalError::evaluation(&name, &err))?;
            if descend {
                let children = self.provider.list_children(node).map_err(|err| {
                    warn!("traversal list_children failed: name={} err={}", name, err);
                    TraversalError::list(&name, &err)
                })?;
                for child in &children {
                    if let Flow::Stop = self.visit(child, depth + 1)? {
                        return Ok(Flow::Stop);
                    }
                }
            }
        }

        if include && self.options.order == TraversalOrder::PostOrder {
            return Ok(self.collect(&name));
        }
        Ok(Flow::Continue)
    }

    fn collect(&mut self, name: &FileName) -> Flow {
        self.results.push(name.clone());
        match self.options.max_results {
            Some(limit) if self.results.len() >= limit => {
                debug!("traversal result limit reached: limit={}", limit);
                Flow::Stop
            }
            _ => Flow::Continue,
        }
    }
}

/// Walks depth-first from `root`, consulting `selector` at every node.
/// Children are visited in the provider's order. The first listing or
/// evaluation failure aborts the walk.
pub fn traverse<P, S>(
    provider: &P,
    root: &P::Node,
    selector: &S,
    options: TraversalOptions,
) -> Result<Vec<FileName>, TraversalError>
where
    P: HierarchyProvider + ?Sized,
    S: FileSelector + ?Sized,
{
    let root_name = provider.name(root);
    debug!(
        "traversal started: root={} order={:?} max_results={:?}",
        root_name, options.order, options.max_results
    );
    if options.max_results == Some(0) {
        return Ok(Vec::new());
    }
    let mut walk = Walk {
        provider,
        selector,
        options,
        results: Vec::new(),
    };
    walk.visit(root, 0)?;
    debug!(
        "traversal finished: root={} results={}",
        root_name,
        walk.results.len()
    );
    Ok(walk.results)
}

/// Pre-order selection of what `filter` accepts, entering folders per `descend`.
pub fn select<P>(
    provider: &P,
    root: &P::Node,
    filter: &FileFilter,
    descend: &DescendPolicy,
) -> Result<Vec<FileName>, TraversalError>
where
    P: HierarchyProvider + ?Sized,
{
    let selector = FilterRef { filter, descend };
    traverse(provider, root, &selector, TraversalOptions::default())
}

/// Resolves `name` through `resolver` and traverses from the resulting node.
pub fn find_files<R, S>(
    resolver: &R,
    name: &FileName,
    selector: &S,
    options: TraversalOptions,
) -> Result<Vec<FileName>, TraversalError>
where
    R: Resolver + ?Sized,
    S: FileSelector + ?Sized,
{
    let root = resolver
        .resolve(name)
        .map_err(|err| TraversalError::resolve(name, &err))?;
    traverse(resolver, &root, selector, options)
}
