use crate::core::types::{ErrorCategory, ErrorSeverity};
use std::collections::BTreeMap;

/// Structured conversion failure. Every error aborts the whole conversion.
#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: BTreeMap<String, String>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::NamingContract => ErrorSeverity::Bug,
            ErrorCategory::MissingField
            | ErrorCategory::InvalidValue
            | ErrorCategory::UnsupportedType
            | ErrorCategory::UnsupportedDocument
            | ErrorCategory::UnresolvedContainer
            | ErrorCategory::DuplicateName
            | ErrorCategory::ParseError
            | ErrorCategory::ValidationError
            | ErrorCategory::IoError => ErrorSeverity::Error,
        };
        AppError {
            category,
            severity,
            code: category.code().to_string(),
            message: message.into(),
            context: BTreeMap::new(),
            source: None,
        }
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(source.into());
        error
    }

    /// Shorthand for a required key that is absent from the document tree.
    pub fn missing_field(path: impl Into<String>) -> Self {
        let path = path.into();
        AppError::new(
            ErrorCategory::MissingField,
            format!("missing required field `{}`", path),
        )
        .with_context("field", path)
    }

    pub fn with_context<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}
