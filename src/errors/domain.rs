use super::report::ErrorReport;
use std::io::{self, ErrorKind};

pub trait ErrorCode {
    #[allow(clippy::wrong_self_convention)]
    fn as_code_str(self) -> &'static str;
}

pub trait DomainError: std::error::Error {
    fn code_str(&self) -> &'static str;
    fn message(&self) -> &str;

    fn to_report(&self) -> ErrorReport {
        ErrorReport::new(self.code_str(), self.message())
    }
}

/// Coarse cause of an I/O failure, independent of platform error numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorHint {
    NotFound,
    PermissionDenied,
    AlreadyExists,
    InvalidInput,
    ReadOnlyFilesystem,
    Other,
}

impl IoErrorHint {
    /// Portable `ErrorKind` wins; the raw OS code only refines `Other`-ish kinds.
    pub fn of(error: &io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound,
            ErrorKind::PermissionDenied => Self::PermissionDenied,
            ErrorKind::AlreadyExists => Self::AlreadyExists,
            ErrorKind::InvalidInput | ErrorKind::InvalidData => Self::InvalidInput,
            _ => error
                .raw_os_error()
                .map(Self::from_os_code)
                .unwrap_or(Self::Other),
        }
    }

    pub fn from_os_code(raw: i32) -> Self {
        OS_CODE_HINTS
            .iter()
            .find(|(code, _)| *code == raw)
            .map(|(_, hint)| *hint)
            .unwrap_or(Self::Other)
    }
}

impl ErrorCode for IoErrorHint {
    fn as_code_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::AlreadyExists => "already_exists",
            Self::InvalidInput => "invalid_input",
            Self::ReadOnlyFilesystem => "read_only_filesystem",
            Self::Other => "io_failed",
        }
    }
}

#[cfg(unix)]
const OS_CODE_HINTS: &[(i32, IoErrorHint)] = &[
    (1, IoErrorHint::PermissionDenied),    // EPERM
    (2, IoErrorHint::NotFound),            // ENOENT
    (13, IoErrorHint::PermissionDenied),   // EACCES
    (17, IoErrorHint::AlreadyExists),      // EEXIST
    (20, IoErrorHint::NotFound),           // ENOTDIR
    (22, IoErrorHint::InvalidInput),       // EINVAL
    (30, IoErrorHint::ReadOnlyFilesystem), // EROFS
];

#[cfg(windows)]
const OS_CODE_HINTS: &[(i32, IoErrorHint)] = &[
    (2, IoErrorHint::NotFound),            // ERROR_FILE_NOT_FOUND
    (3, IoErrorHint::NotFound),            // ERROR_PATH_NOT_FOUND
    (5, IoErrorHint::PermissionDenied),    // ERROR_ACCESS_DENIED
    (19, IoErrorHint::ReadOnlyFilesystem), // ERROR_WRITE_PROTECT
    (80, IoErrorHint::AlreadyExists),      // ERROR_FILE_EXISTS
    (87, IoErrorHint::InvalidInput),       // ERROR_INVALID_PARAMETER
    (123, IoErrorHint::InvalidInput),      // ERROR_INVALID_NAME
    (183, IoErrorHint::AlreadyExists),     // ERROR_ALREADY_EXISTS
];

#[cfg(not(any(unix, windows)))]
const OS_CODE_HINTS: &[(i32, IoErrorHint)] = &[];
