//! Analyzer errors

use jack_error::{Diagnostic, Diagnostics, SourceCache};
use std::path::PathBuf;
use thiserror::Error;

/// Result type of the driver
pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("path `{}` does not exist", .0.display())]
    PathNotFound(PathBuf),

    #[error("`{}` is neither a file nor a directory", .0.display())]
    NotAFileOrDirectory(PathBuf),

    #[error("`{}` is not a `.{extension}` file", path.display())]
    NotASourceFile { path: PathBuf, extension: String },

    #[error("an output path can only be given for a single input file")]
    OutputForDirectory,

    #[error("output `{}` would overwrite the token dump", .0.display())]
    OutputOverwritesTokens(PathBuf),

    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} lexical error(s)", .0.error_count())]
    Lex(Diagnostics),

    #[error("{0}")]
    Syntax(Diagnostic),
}

impl AnalyzerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Diagnostics carried by the error, if any
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        match self {
            AnalyzerError::Lex(diagnostics) => {
                diagnostics.iter().filter(|d| d.is_error()).collect()
            }
            AnalyzerError::Syntax(diagnostic) => vec![diagnostic],
            _ => Vec::new(),
        }
    }

    /// Renders carried diagnostics against the source they came from
    pub fn render(&self, name: &str, source: &str, colors: bool) -> Option<String> {
        let mut diagnostics = Diagnostics::new();
        for diagnostic in self.diagnostics() {
            diagnostics.push(diagnostic.clone());
        }
        if diagnostics.is_empty() {
            return None;
        }

        let mut cache = SourceCache::new();
        cache.add(name, source);
        Some(diagnostics.render(&cache, colors))
    }
}
