#![allow(clippy::result_large_err)]

use crate::core::document::{field_path, invalid_value, lookup, require, scalar_text};
use crate::core::error::AppError;
use crate::core::model::naming::{secondary_fragment, Named};
use crate::core::types::ErrorCategory;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Scalar types an input may carry. Anything else is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    File,
    String,
    Int,
    Float,
    Boolean,
}

impl ScalarType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "File" => Some(ScalarType::File),
            "string" => Some(ScalarType::String),
            "int" | "long" => Some(ScalarType::Int),
            "float" | "double" => Some(ScalarType::Float),
            "boolean" => Some(ScalarType::Boolean),
            _ => None,
        }
    }
}

/// Parsed `type` of an input or output: the scalar name and whether `null`
/// is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeSpec {
    pub name: String,
    pub optional: bool,
}

impl TypeSpec {
    /// Accepts `T`, `T?` and the union form `["null", T]`.
    pub(crate) fn parse(value: &Value, path: &str) -> Result<Self, AppError> {
        match value {
            Value::String(raw) => {
                let raw = raw.trim();
                Ok(match raw.strip_suffix('?') {
                    Some(name) => TypeSpec {
                        name: name.to_string(),
                        optional: true,
                    },
                    None => TypeSpec {
                        name: raw.to_string(),
                        optional: false,
                    },
                })
            }
            Value::Sequence(items) => {
                let mut optional = false;
                let mut names = Vec::new();
                for item in items {
                    match item.as_str() {
                        Some("null") => optional = true,
                        Some(name) => names.push(name.to_string()),
                        None => return Err(unsupported(path, "a complex union member")),
                    }
                }
                match names.as_slice() {
                    [name] => Ok(TypeSpec {
                        name: name.clone(),
                        optional,
                    }),
                    _ => Err(unsupported(path, "a union of several types")),
                }
            }
            Value::Mapping(map) => {
                let kind = lookup(map, "type")
                    .and_then(Value::as_str)
                    .unwrap_or("record");
                Err(unsupported(path, kind))
            }
            _ => Err(invalid_value(path, "expected a type name")),
        }
    }
}

fn unsupported(path: &str, type_name: &str) -> AppError {
    AppError::new(
        ErrorCategory::UnsupportedType,
        format!("unsupported type `{}` for `{}`", type_name, path),
    )
    .with_context("field", path)
}

/// Closed set of input variants, each carrying only what it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    File {
        secondary_files: Vec<String>,
        default: Option<String>,
    },
    String {
        default: Option<String>,
    },
    Int {
        default: Option<i64>,
    },
    Float {
        default: Option<f64>,
    },
    Boolean {
        default: Option<bool>,
    },
}

impl InputKind {
    pub fn is_file(&self) -> bool {
        matches!(self, InputKind::File { .. })
    }

    pub fn has_default(&self) -> bool {
        match self {
            InputKind::File { default, .. } => default.is_some(),
            InputKind::String { default } => default.is_some(),
            InputKind::Int { default } => default.is_some(),
            InputKind::Float { default } => default.is_some(),
            InputKind::Boolean { default } => default.is_some(),
        }
    }

    /// Groovy literal for the default value of a parameter input.
    pub fn default_literal(&self) -> Option<String> {
        match self {
            InputKind::File { .. } => None,
            InputKind::String { default } => default.as_deref().map(single_quoted),
            InputKind::Int { default } => default.map(|value| value.to_string()),
            InputKind::Float { default } => default.map(|value| format!("{:?}", value)),
            InputKind::Boolean { default } => default.map(|value| value.to_string()),
        }
    }
}

/// Single-quoted Groovy literal. Control characters are escaped so the
/// literal stays on one line.
fn single_quoted(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}

/// One argument of the wrapped command.
#[derive(Debug, Clone)]
pub struct Input {
    name: String,
    prefix: Option<String>,
    kind: InputKind,
    required: bool,
    position: Option<i64>,
    arg_name: Option<String>,
    separate: bool,
}

impl Input {
    /// Build an input from its document entry. The entry is either a mapping
    /// or the shorthand type string (`reads: File`).
    pub fn from_value(name: &str, value: &Value, prefix: Option<&str>) -> Result<Self, AppError> {
        let path = field_path("inputs", name);
        let empty = Mapping::new();
        let (type_value, entry) = match value {
            Value::Mapping(map) => (require(map, "type", &path)?, map),
            Value::String(_) | Value::Sequence(_) => (value, &empty),
            _ => return Err(invalid_value(&path, "expected a mapping or a type name")),
        };

        let type_path = field_path(&path, "type");
        let spec = TypeSpec::parse(type_value, &type_path)?;
        let scalar = ScalarType::from_name(&spec.name)
            .ok_or_else(|| unsupported(&type_path, &spec.name))?;

        let default_path = field_path(&path, "default");
        let default = lookup(entry, "default");
        let secondary_files = match lookup(entry, "secondaryFiles") {
            Some(raw) if scalar == ScalarType::File => {
                parse_secondary_files(raw, &field_path(&path, "secondaryFiles"))?
            }
            Some(_) => {
                return Err(invalid_value(
                    &field_path(&path, "secondaryFiles"),
                    "secondary files are only valid on File inputs",
                ))
            }
            None => Vec::new(),
        };

        let kind = match scalar {
            ScalarType::File => InputKind::File {
                secondary_files,
                default: default
                    .map(|value| file_default(value, &default_path))
                    .transpose()?,
            },
            ScalarType::String => InputKind::String {
                default: default
                    .map(|value| scalar_text(value, &default_path))
                    .transpose()?,
            },
            ScalarType::Int => InputKind::Int {
                default: default
                    .map(|value| int_default(value, &default_path))
                    .transpose()?,
            },
            ScalarType::Float => InputKind::Float {
                default: default
                    .map(|value| float_default(value, &default_path))
                    .transpose()?,
            },
            ScalarType::Boolean => InputKind::Boolean {
                default: default
                    .map(|value| bool_default(value, &default_path))
                    .transpose()?,
            },
        };

        let required = !spec.optional || kind.has_default();

        let mut position = None;
        let mut arg_name = None;
        let mut separate = true;
        if let Some(binding) = lookup(entry, "inputBinding") {
            let binding_path = field_path(&path, "inputBinding");
            let binding = binding
                .as_mapping()
                .ok_or_else(|| invalid_value(&binding_path, "expected a mapping"))?;
            if let Some(raw) = lookup(binding, "position") {
                position = Some(raw.as_i64().ok_or_else(|| {
                    invalid_value(&field_path(&binding_path, "position"), "expected an integer")
                })?);
            }
            if let Some(raw) = lookup(binding, "prefix") {
                arg_name = Some(scalar_text(raw, &field_path(&binding_path, "prefix"))?);
            }
            if let Some(raw) = lookup(binding, "separate") {
                separate = raw.as_bool().ok_or_else(|| {
                    invalid_value(&field_path(&binding_path, "separate"), "expected a boolean")
                })?;
            }
        }

        debug!(
            input = name,
            kind = ?scalar,
            required,
            position = ?position,
            "parsed input"
        );

        Ok(Input {
            name: name.to_string(),
            prefix: prefix.map(str::to_string),
            kind,
            required,
            position,
            arg_name,
            separate,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &InputKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn has_default(&self) -> bool {
        self.kind.has_default()
    }

    pub fn default_literal(&self) -> Option<String> {
        self.kind.default_literal()
    }

    /// Sort key for argument ordering; unspecified positions sort as 0.
    pub fn position(&self) -> i64 {
        self.position.unwrap_or(0)
    }

    pub fn arg_name(&self) -> Option<&str> {
        self.arg_name.as_deref()
    }

    /// Whether the prefix and the value are separate words on the command line.
    pub fn separate(&self) -> bool {
        self.separate
    }

    pub fn secondary_files(&self) -> &[String] {
        match &self.kind {
            InputKind::File {
                secondary_files, ..
            } => secondary_files,
            _ => &[],
        }
    }

    /// Local identifiers bound to each secondary file, e.g. `ref_idx`.
    pub fn secondary_identifiers(&self) -> Vec<String> {
        self.secondary_files()
            .iter()
            .map(|pattern| format!("{}{}", self.name, secondary_fragment(pattern)))
            .collect()
    }

    /// `inp_<process>_<name>`: the channel feeding a File input.
    pub fn channel_name(&self) -> Result<String, AppError> {
        Ok(format!("inp_{}", self.full_name()?))
    }

    /// `params.<process>_<name>`: the parameter backing a scalar input.
    pub fn param_name(&self) -> Result<String, AppError> {
        Ok(format!("params.{}", self.full_name()?))
    }
}

impl Named for Input {
    fn local_name(&self) -> &str {
        &self.name
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

fn parse_secondary_files(value: &Value, path: &str) -> Result<Vec<String>, AppError> {
    let items = match value {
        Value::Sequence(items) => items.iter().collect::<Vec<_>>(),
        other => vec![other],
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Mapping(map) => scalar_text(require(map, "pattern", path)?, path),
            other => scalar_text(other, path),
        })
        .collect()
}

fn file_default(value: &Value, path: &str) -> Result<String, AppError> {
    match value {
        Value::Mapping(map) => lookup(map, "location")
            .or_else(|| lookup(map, "path"))
            .ok_or_else(|| AppError::missing_field(field_path(path, "location")))
            .and_then(|location| scalar_text(location, path)),
        other => scalar_text(other, path),
    }
}

fn int_default(value: &Value, path: &str) -> Result<i64, AppError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid_value(path, "expected an integer default"))
}

fn float_default(value: &Value, path: &str) -> Result<f64, AppError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    let parsed = parsed.ok_or_else(|| invalid_value(path, "expected a numeric default"))?;
    if !parsed.is_finite() {
        return Err(invalid_value(path, "default must be a finite number"));
    }
    Ok(parsed)
}

fn bool_default(value: &Value, path: &str) -> Result<bool, AppError> {
    let parsed = match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid_value(path, "expected a boolean default"))
}
