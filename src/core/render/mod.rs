//! Indentation-aware text accumulation and the Nextflow process renderer.

pub mod nextflow;

pub use nextflow::render_process;

/// Spaces per indentation level unless configured otherwise.
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Line accumulator threaded explicitly through rendering calls.
#[derive(Debug, Clone)]
pub struct Renderer {
    level: usize,
    indent_width: usize,
    lines: Vec<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_indent_width(DEFAULT_INDENT_WIDTH)
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        Renderer {
            level: 0,
            indent_width,
            lines: Vec::new(),
        }
    }

    /// Append one line at the current indentation. Empty lines are dropped.
    pub fn append(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if line.is_empty() {
            return;
        }
        let indent = " ".repeat(self.level * self.indent_width);
        self.lines.push(format!("{}{}", indent, line));
    }

    /// Append a line that may be absent.
    pub fn append_optional<S: AsRef<str>>(&mut self, line: Option<S>) {
        if let Some(line) = line {
            self.append(line);
        }
    }

    pub fn increase_indent(&mut self) {
        self.level += 1;
    }

    /// Dedent one level; already at zero is a no-op.
    pub fn decrease_indent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
