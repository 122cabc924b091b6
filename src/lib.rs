//! Scheme-aware file names, composable file filters and a depth-first
//! selection engine over pluggable hierarchies.

pub mod config;
pub mod errors;
pub mod filter;
mod logging;
pub mod name;
pub mod provider;
pub mod scheme;
pub mod select;

pub use config::{ConfigError, CoreConfig, LoggingConfig};
pub use errors::{DomainError, ErrorReport};
pub use filter::{EvaluationError, FileFilter, FilterTreeError, TraversalCandidate};
pub use logging::init_logging;
pub use name::{FileName, FileType, NameError, NameParser, ParserMode};
pub use provider::{HierarchyProvider, Resolver};
pub use scheme::{ParseNameError, SchemeRegistry, UnknownSchemeError};
pub use select::{
    find_files, select, traverse, DescendPolicy, FileSelector, TraversalError, TraversalOptions,
};

/// Parses `raw` with the parser `registry` holds for its scheme.
pub fn parse_name(raw: &str, registry: &SchemeRegistry) -> Result<FileName, ParseNameError> {
    registry.parse_name(raw)
}
