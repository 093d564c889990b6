use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    MissingField,
    InvalidValue,
    UnsupportedType,
    UnsupportedDocument,
    UnresolvedContainer,
    NamingContract,
    DuplicateName,
    ParseError,
    ValidationError,
    IoError,
}

impl ErrorCategory {
    /// Stable short code used as the default `AppError::code`.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCategory::MissingField => "MISSING_FIELD",
            ErrorCategory::InvalidValue => "INVALID_VALUE",
            ErrorCategory::UnsupportedType => "UNSUPPORTED_TYPE",
            ErrorCategory::UnsupportedDocument => "UNSUPPORTED_DOCUMENT",
            ErrorCategory::UnresolvedContainer => "UNRESOLVED_CONTAINER",
            ErrorCategory::NamingContract => "NAMING_CONTRACT",
            ErrorCategory::DuplicateName => "DUPLICATE_NAME",
            ErrorCategory::ParseError => "PARSE_ERROR",
            ErrorCategory::ValidationError => "VALIDATION_ERROR",
            ErrorCategory::IoError => "IO_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Bug,
}
