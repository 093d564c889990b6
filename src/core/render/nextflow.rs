#![allow(clippy::result_large_err)]

use crate::core::config::RenderConfig;
use crate::core::error::AppError;
use crate::core::model::{Input, InputKind, Named, Output, Process};
use crate::core::render::Renderer;
use tracing::{debug, warn};

/// Render the process as a Nextflow (DSL1) definition.
///
/// Sections come out in a fixed order: parameter preamble, process header,
/// container, `input:`, `output:`, `script:`. Channel sections follow
/// declaration order; command-line arguments follow `position`.
pub fn render_process(process: &Process, config: &RenderConfig) -> Result<String, AppError> {
    let mut out = Renderer::with_indent_width(config.indent_width);

    for input in process.inputs().iter().filter(|input| !input.is_file()) {
        render_parameter(input, &mut out)?;
    }

    out.append(format!("process {} {{", process.id()));
    out.increase_indent();
    out.append(format!(
        "container \"{}\"",
        escape_gstring(process.container().image())
    ));

    out.append("input:");
    out.increase_indent();
    for input in process.inputs() {
        out.append_optional(input_binding(input)?);
    }
    out.decrease_indent();

    out.append("output:");
    out.increase_indent();
    for output in process.outputs() {
        out.append_optional(output_binding(output)?);
    }
    out.decrease_indent();

    out.append("script:");
    out.increase_indent();
    out.append(script_expression(process)?);
    out.decrease_indent();
    out.decrease_indent();
    out.append("}");

    Ok(out.render())
}

/// Preamble entry for a scalar input: an assignment when a default exists,
/// otherwise a guard that aborts the pipeline when the parameter is unset.
fn render_parameter(input: &Input, out: &mut Renderer) -> Result<(), AppError> {
    let full_name = input.full_name()?;
    let param = input.param_name()?;
    match input.default_literal() {
        Some(literal) => out.append(format!("{} = {}", param, literal)),
        None => {
            debug!(parameter = %full_name, required = input.is_required(), "emitting guard");
            out.append(format!("if (!{}) {{", param));
            out.increase_indent();
            out.append(format!("log.error \"Missing parameter: {}\"", full_name));
            out.append("exit 1");
            out.decrease_indent();
            out.append("}");
        }
    }
    Ok(())
}

fn input_binding(input: &Input) -> Result<Option<String>, AppError> {
    if !input.is_file() {
        return Ok(None);
    }
    let channel = input.channel_name()?;
    let secondary = input.secondary_identifiers();
    if secondary.is_empty() {
        return Ok(Some(format!("file {} from {}", input.name(), channel)));
    }
    let files = std::iter::once(input.name().to_string())
        .chain(secondary)
        .map(|name| format!("file({})", name))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(Some(format!("set {} from {}", files, channel)))
}

fn output_binding(output: &Output) -> Result<Option<String>, AppError> {
    match output.glob() {
        Some(glob) => Ok(Some(format!(
            "file \"{}\" into {}",
            escape_gstring(glob),
            output.full_name()?
        ))),
        None => {
            warn!(output = output.name(), "non-File output has no channel binding");
            Ok(None)
        }
    }
}

/// Build the script as one Groovy expression so that optional arguments are
/// still decided when the pipeline runs.
pub fn script_expression(process: &Process) -> Result<String, AppError> {
    let mut segments = Vec::new();
    if !process.command().is_empty() {
        segments.push(format!(
            "\"{} \"",
            escape_gstring(&process.command().joined())
        ));
    }

    let mut ordered: Vec<&Input> = process.inputs().iter().collect();
    ordered.sort_by_key(|input| input.position());

    for input in ordered {
        let fragment = command_fragment(input)?;
        if fragment.is_empty() {
            continue;
        }
        if input.is_required() {
            segments.push(format!("\"{} \"", fragment));
        } else {
            segments.push(format!(
                "({} ? \"{} \" : \"\")",
                condition(input)?,
                fragment
            ));
        }
    }

    if segments.is_empty() {
        return Ok("\"\"".to_string());
    }
    Ok(segments.join(" + "))
}

/// Prefix plus value reference. Booleans contribute only their prefix.
fn command_fragment(input: &Input) -> Result<String, AppError> {
    let value = match input.kind() {
        InputKind::File { .. } => Some(format!("${{{}}}", input.name())),
        InputKind::Boolean { .. } => None,
        _ => Some(format!("${{{}}}", input.param_name()?)),
    };
    let prefix = input.arg_name().map(escape_gstring);
    Ok(match (prefix, value) {
        (Some(prefix), Some(value)) if input.separate() => format!("{} {}", prefix, value),
        (Some(prefix), Some(value)) => format!("{}{}", prefix, value),
        (Some(prefix), None) => prefix,
        (None, Some(value)) => value,
        (None, None) => String::new(),
    })
}

fn condition(input: &Input) -> Result<String, AppError> {
    if input.is_file() {
        Ok(input.name().to_string())
    } else {
        input.param_name()
    }
}

/// Escape literal text for a Groovy double-quoted string.
fn escape_gstring(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
