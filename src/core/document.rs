#![allow(clippy::result_large_err)] // Document APIs return AppError to keep the offending field path.

//! Loading of CWL descriptors into a generic YAML tree plus typed field lookups.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed descriptor: the root mapping and the file it was read from.
#[derive(Debug, Clone)]
pub struct Document {
    root: Mapping,
    source: Option<PathBuf>,
}

impl Document {
    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|err| {
            AppError::with_source(
                ErrorCategory::IoError,
                format!("failed to read {}", path.display()),
                err,
            )
        })?;
        Self::parse(&text, Some(path))
    }

    /// Parse descriptor text. `source` only feeds the fallback process id.
    pub fn parse(text: &str, source: Option<&Path>) -> Result<Self, AppError> {
        let origin = source
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());
        let value: Value = serde_yaml::from_str(text).map_err(|err| {
            AppError::with_source(
                ErrorCategory::ParseError,
                format!("failed to parse {}", origin),
                err,
            )
        })?;
        let root = match value {
            Value::Mapping(map) => map,
            _ => {
                return Err(AppError::new(
                    ErrorCategory::ParseError,
                    format!("{} must contain a mapping at the top level", origin),
                ))
            }
        };
        Ok(Document {
            root,
            source: source.map(Path::to_path_buf),
        })
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// File stem of the source path, used when the document carries no `id`.
    pub fn file_stem(&self) -> Option<String> {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
    }
}

/// Join a parent field path with a child key for diagnostics.
pub(crate) fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Fetch a key that must be present.
pub(crate) fn require<'a>(map: &'a Mapping, key: &str, parent: &str) -> Result<&'a Value, AppError> {
    lookup(map, key).ok_or_else(|| AppError::missing_field(field_path(parent, key)))
}

/// Fetch an optional key. An explicit YAML `null` counts as absent.
pub(crate) fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    match map.get(key) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value),
    }
}

/// Render a scalar as text. Sequences and mappings are rejected.
pub(crate) fn scalar_text(value: &Value, path: &str) -> Result<String, AppError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value, path),
        _ => Err(invalid_value(path, "expected a scalar value")),
    }
}

pub(crate) fn invalid_value(path: &str, detail: impl std::fmt::Display) -> AppError {
    AppError::new(
        ErrorCategory::InvalidValue,
        format!("invalid value for `{}`: {}", path, detail),
    )
    .with_context("field", path)
}

/// Iterate named entries of a section that may be written either as a mapping
/// (`name: {...}`) or as a sequence of mappings carrying an `id`.
pub(crate) fn named_entries<'a>(
    section: &'a Value,
    path: &str,
) -> Result<Vec<(String, &'a Value)>, AppError> {
    match section {
        Value::Mapping(map) => map
            .iter()
            .map(|(key, value)| Ok((scalar_text(key, path)?, value)))
            .collect(),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let item_path = format!("{}[{}]", path, index);
                let entry = item
                    .as_mapping()
                    .ok_or_else(|| invalid_value(&item_path, "expected a mapping"))?;
                let id = require(entry, "id", &item_path)?;
                Ok((local_id(&scalar_text(id, &item_path)?), item))
            })
            .collect(),
        _ => Err(invalid_value(path, "expected a mapping or a sequence")),
    }
}

/// Strip the document/namespace part of a CWL id such as `#main/reads`.
fn local_id(raw: &str) -> String {
    raw.rsplit(|c: char| c == '#' || c == '/').next().unwrap_or(raw).to_string()
}
