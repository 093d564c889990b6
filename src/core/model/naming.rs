#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use regex::Regex;
use std::sync::OnceLock;

fn non_identifier() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]+").expect("static pattern compiles"))
}

/// Turn arbitrary text into a Groovy identifier: runs of other characters
/// collapse to `_`, a leading `#` is dropped and a leading digit gets a `_`.
pub fn sanitize_identifier(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('#');
    let cleaned = non_identifier().replace_all(trimmed, "_").into_owned();
    match cleaned.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("_{}", cleaned),
        _ => cleaned,
    }
}

/// Identifier fragment derived from a secondary-file suffix: `.idx` becomes
/// `_idx`, `^.bai` becomes `_bai`, `.bam.bai` becomes `_bam_bai`.
pub fn secondary_fragment(pattern: &str) -> String {
    let trimmed = pattern.trim().trim_start_matches('^');
    let replaced = match trimmed.strip_prefix('.') {
        Some(rest) => format!("_{}", rest),
        None => trimmed.to_string(),
    };
    let cleaned = non_identifier().replace_all(&replaced, "_").into_owned();
    if cleaned.starts_with('_') {
        cleaned
    } else {
        format!("_{}", cleaned)
    }
}

/// `<prefix>_<name>`, or the bare name when there is no prefix.
pub(crate) fn qualified_name(prefix: Option<&str>, name: &str) -> Result<String, AppError> {
    if name.is_empty() {
        return Err(AppError::new(
            ErrorCategory::NamingContract,
            "full_name requested for an entity without a local name",
        ));
    }
    Ok(match prefix {
        Some(prefix) => format!("{}_{}", prefix, name),
        None => name.to_string(),
    })
}

/// Naming shared by inputs and outputs.
pub trait Named {
    fn local_name(&self) -> &str;

    fn prefix(&self) -> Option<&str>;

    fn full_name(&self) -> Result<String, AppError> {
        qualified_name(self.prefix(), self.local_name())
    }
}
