//! Selectors and the depth-first traversal that applies them.

mod error;
mod selector;
mod traversal;

pub use error::{TraversalError, TraversalErrorCode};
pub use selector::{
    AllFileSelector, DepthSelector, DescendPolicy, FileSelector, FilterSelector,
    InvertIncludeSelector, TypeSelector, EXCLUDE_SELF, SELECT_ALL, SELECT_CHILDREN, SELECT_FILES,
    SELECT_FOLDERS, SELECT_SELF, SELECT_SELF_AND_CHILDREN,
};
pub use traversal::{find_files, select, traverse, TraversalOptions, TraversalOrder};

#[cfg(test)]
mod tests;
