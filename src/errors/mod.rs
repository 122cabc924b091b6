pub mod domain;
pub mod report;

pub use domain::{DomainError, ErrorCode, IoErrorHint};
pub use report::ErrorReport;
