//! jack-error - Diagnostics for the Jack syntax analyzer
//!
//! Lexical and syntax problems are reported as [`Diagnostic`]s carrying a
//! code, a source span and optional help, rendered in the style of the Rust
//! compiler.
//!
//! # Example
//!
//! ```rust
//! use jack_error::{Diagnostic, ErrorCode, SourceCache, DiagnosticRenderer};
//! use jack_error::span::{Span, Position};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("Main.jack", "class Main {");
//!
//! let span = Span::point(Position::new(1, 13, 12), file_id);
//!
//! let diagnostic = Diagnostic::error("unexpected end of input")
//!     .with_code(ErrorCode::UNEXPECTED_EOF)
//!     .with_label(span, "expected `}`");
//!
//! let renderer = DiagnosticRenderer::new(&cache).without_colors();
//! println!("{}", renderer.render(&diagnostic));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{
    Diagnostic, DiagnosticRenderer, ErrorCode, Label, Level, SourceCache, SourceFile,
};
pub use span::{Position, Span, Spanned};

/// Result type for operations that stop at the first diagnostic
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Diagnostics accumulated while processing one file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Renders all diagnostics, separated by blank lines
    pub fn render(&self, cache: &SourceCache, colors: bool) -> String {
        let renderer = DiagnosticRenderer::new(cache).with_colors(colors);
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
