//! In-memory analysis of one source text

use crate::error::{AnalyzerError, Result};
use jack_error::Diagnostics;
use jack_lexer::tokenize;
use jack_parser::{render_class, render_tokens};

/// Output of a successful analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Indented parse tree of the class
    pub tree: String,
    /// Flat token dump
    pub tokens: String,
    /// Number of tokens the source produced
    pub token_count: usize,
    /// Non-fatal diagnostics, such as dropped characters
    pub warnings: Diagnostics,
}

/// Tokenizes and parses `source` as a single class.
///
/// Lexical errors stop the analysis before parsing. Lexical warnings are
/// carried in the result.
pub fn analyze_source(source: &str) -> Result<Analysis> {
    let (mut stream, diagnostics) = tokenize(source, 0);
    if diagnostics.has_errors() {
        return Err(AnalyzerError::Lex(diagnostics));
    }

    let tokens = render_tokens(&stream);
    let tree = render_class(&mut stream).map_err(AnalyzerError::Syntax)?;

    Ok(Analysis {
        tree,
        tokens,
        token_count: stream.len(),
        warnings: diagnostics,
    })
}

/// Compares two texts with all whitespace removed
pub fn compare_ignoring_whitespace(left: &str, right: &str) -> bool {
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    strip(left) == strip(right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_error::ErrorCode;

    #[test]
    fn test_analyze_minimal_class() {
        let analysis = analyze_source("class Main { }").unwrap();
        assert_eq!(
            analysis.tree,
            "<class>\n  <keyword> class </keyword>\n  <identifier> Main </identifier>\n  <symbol> { </symbol>\n  <symbol> } </symbol>\n</class>\n"
        );
        assert_eq!(analysis.token_count, 4);
        assert!(analysis.tokens.starts_with("<tokens>\n<keyword> class </keyword>\n"));
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_warnings_are_kept() {
        let analysis = analyze_source("class Main { # }").unwrap();
        assert_eq!(analysis.warnings.len(), 1);
        assert_eq!(analysis.token_count, 4);
    }

    #[test]
    fn test_lexical_error() {
        let err = analyze_source("class Main { /* never closed").unwrap_err();
        match err {
            AnalyzerError::Lex(diagnostics) => {
                let first = diagnostics.iter().next().unwrap();
                assert_eq!(first.code, Some(ErrorCode::UNTERMINATED_COMMENT));
            }
            other => panic!("expected a lexical error, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error() {
        let err = analyze_source("class Main { var int x; }").unwrap_err();
        assert!(matches!(err, AnalyzerError::Syntax(_)));
    }

    #[test]
    fn test_compare_ignoring_whitespace() {
        assert!(compare_ignoring_whitespace("<a>\n  <b> x </b>\n</a>\n", "<a><b>x</b></a>"));
        assert!(compare_ignoring_whitespace("", " \t\r\n"));
        assert!(!compare_ignoring_whitespace("<a> x </a>", "<a> y </a>"));
    }
}
