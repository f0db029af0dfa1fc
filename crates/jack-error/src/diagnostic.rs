//! Diagnostic - rustc-style error messages
//!
//! A diagnostic carries:
//! - an error code (`EL002`, `EP001`, ...)
//! - the offending region of the source
//! - optional notes and help lines
//!
//! [`DiagnosticRenderer`] turns it into a snippet with an underline.

use crate::span::Span;
use std::fmt;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// The file cannot be analyzed
    Error,
    /// Something was ignored, analysis continues
    Warning,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }

    /// ANSI escape for the level name (bold red or yellow)
    pub fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m",
            Level::Warning => "\x1b[1;33m",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label pointing at a region of the code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// Structured error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Category (L = Lexer, P = Parser)
    pub category: char,
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    // Lexer
    pub const UNEXPECTED_CHAR: Self = Self::new('L', 1);
    pub const UNTERMINATED_STRING: Self = Self::new('L', 2);
    pub const UNTERMINATED_COMMENT: Self = Self::new('L', 5);

    // Parser
    pub const UNEXPECTED_TOKEN: Self = Self::new('P', 1);
    pub const EXPECTED_EXPRESSION: Self = Self::new('P', 2);
    pub const EXPECTED_TYPE: Self = Self::new('P', 3);
    pub const UNEXPECTED_EOF: Self = Self::new('P', 5);
    pub const NESTED_TOO_DEEPLY: Self = Self::new('P', 6);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A complete diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_level(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(Level::Warning, message)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds a label underlining `span`
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// Span of the first label, if any
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.first().map(|l| l.span)
    }
}

impl fmt::Display for Diagnostic {
    /// Single-line form, used in logs: `error[EP001]: message at 3:7`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(span) = self.primary_span() {
            write!(f, " at {}:{}", span.start.line, span.start.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

/// Source texts kept around for rendering snippets
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Returns a 1-indexed line without its terminator
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| next.saturating_sub(1))
            .unwrap_or(self.source.len());

        self.source.get(start..end).map(|l| l.trim_end_matches('\r'))
    }
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns its ID
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders a diagnostic for display
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self {
            cache,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    /// Renders the diagnostic as a multi-line string
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let reset = self.paint("\x1b[0m");
        let bold = self.paint("\x1b[1m");
        let blue = self.paint("\x1b[1;34m");
        let level_color = self.paint(diagnostic.level.color_code());

        // error[EP001]: message
        let mut output = format!("{}{}", level_color, diagnostic.level);
        if let Some(code) = diagnostic.code {
            output.push_str(&format!("[{}]", code));
        }
        output.push_str(&format!("{}{}: {}{}\n", reset, bold, diagnostic.message, reset));

        for label in &diagnostic.labels {
            let Some(file) = self.cache.get(label.span.file_id) else {
                continue;
            };
            let start = label.span.start;

            output.push_str(&format!(
                " {}-->{} {}:{}:{}\n",
                blue, reset, file.name, start.line, start.column
            ));

            let Some(line) = file.get_line(start.line) else {
                continue;
            };
            let gutter = " ".repeat(start.line.to_string().len());
            let width = if label.span.end.line == start.line {
                label.span.end.column.saturating_sub(start.column).max(1) as usize
            } else {
                line.chars()
                    .count()
                    .saturating_sub(start.column.saturating_sub(1) as usize)
                    .max(1)
            };

            output.push_str(&format!(" {} {}|{}\n", gutter, blue, reset));
            output.push_str(&format!(" {}{}{} | {}\n", blue, start.line, reset, line));
            output.push_str(&format!(
                " {} {}|{} {}{}{}{} {}\n",
                gutter,
                blue,
                reset,
                " ".repeat(start.column.saturating_sub(1) as usize),
                level_color,
                "^".repeat(width),
                reset,
                label.message
            ));
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("  = {}note{}: {}\n", bold, reset, note));
        }

        let green = self.paint("\x1b[1;32m");
        for help in &diagnostic.help {
            output.push_str(&format!("  = {}help{}: {}\n", green, reset, help));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_diagnostic_rendering() {
        let mut cache = SourceCache::new();
        let file_id = cache.add("Main.jack", "class Main {\n  let x = 1\n}");

        let span = Span::new(Position::new(2, 12, 24), Position::new(3, 1, 25), file_id);

        let diagnostic = Diagnostic::error("expected `;`")
            .with_code(ErrorCode::UNEXPECTED_TOKEN)
            .with_label(span, "found `}`")
            .with_help("terminate the statement with `;`");

        let output = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);

        assert!(output.starts_with("error[EP001]: expected `;`"));
        assert!(output.contains("Main.jack:2:12"));
        assert!(output.contains("2 |   let x = 1"));
        assert!(output.contains("help: terminate the statement with `;`"));
    }

    #[test]
    fn test_single_line_display() {
        let span = Span::point(Position::new(4, 9, 40), 0);
        let diagnostic = Diagnostic::error("unterminated string")
            .with_code(ErrorCode::UNTERMINATED_STRING)
            .with_label(span, "string starts here");

        assert_eq!(
            diagnostic.to_string(),
            "error[EL002]: unterminated string at 4:9"
        );
    }

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::UNEXPECTED_EOF.to_string(), "EP005");
        assert_eq!(ErrorCode::UNEXPECTED_CHAR.to_string(), "EL001");
    }

    #[test]
    fn test_get_line_out_of_range() {
        let file = SourceFile::new("A.jack", "one\ntwo");
        assert_eq!(file.get_line(2), Some("two"));
        assert_eq!(file.get_line(3), None);
        assert_eq!(file.get_line(0), None);
    }
}
