//! Integration tests for the Jack syntax analyzer
//!
//! This crate exercises the whole pipeline end to end:
//! Source → Lexer → TokenStream → CompilationEngine → tag events / XML

use jack_error::{Diagnostic, ErrorCode};
use jack_lexer::tokenize;
use jack_parser::{compile_class, render_class, EventRecorder, TagEvent};

/// Renders the parse tree of `source`, panicking on any error
pub fn render(source: &str) -> String {
    let (mut tokens, diagnostics) = tokenize(source, 0);
    if diagnostics.has_errors() {
        panic!("Expected source to tokenize, but got errors:\n{:?}", diagnostics);
    }
    match render_class(&mut tokens) {
        Ok(xml) => xml,
        Err(diagnostic) => panic!("Expected source to parse, but got:\n{}", diagnostic),
    }
}

/// Records the tag events of `source`, along with the parse result
pub fn record(source: &str) -> (Vec<TagEvent>, Result<(), Diagnostic>) {
    let (mut tokens, _) = tokenize(source, 0);
    let mut recorder = EventRecorder::new();
    let result = compile_class(&mut tokens, &mut recorder);
    (recorder.into_events(), result)
}

/// Runs the full in-memory analysis
pub fn analyze_source(source: &str) -> jack_analyzer::Result<jack_analyzer::Analysis> {
    jack_analyzer::analyze_source(source)
}

/// Asserts that `source` renders to `expected`, ignoring whitespace
pub fn assert_renders(source: &str, expected: &str) {
    let actual = render(source);
    if !jack_analyzer::compare_ignoring_whitespace(&actual, expected) {
        panic!(
            "Rendered tree differs from the expected one.\n\nExpected:\n{}\n\nActual:\n{}",
            expected, actual
        );
    }
}

/// Asserts that parsing `source` fails with `code`, and returns the diagnostic
pub fn assert_parse_fails(source: &str, code: ErrorCode) -> Diagnostic {
    let (_, result) = record(source);
    match result {
        Ok(()) => panic!("Expected parse to fail with {}, but it succeeded", code),
        Err(diagnostic) => {
            assert_eq!(
                diagnostic.code,
                Some(code),
                "wrong error code for {}",
                diagnostic
            );
            diagnostic
        }
    }
}

/// Reverses the entity escaping applied to symbols
pub fn unescape(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Splits a `<kind> value </kind>` line into its kind and value
pub fn parse_leaf(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix('<')?;
    let (kind, rest) = rest.split_once("> ")?;
    let value = rest.strip_suffix(&format!(" </{}>", kind))?;
    Some((kind, value))
}





#[cfg(test)]
mod driver_tests {
    use jack_analyzer::{Analyzer, AnalyzerError, AnalyzerOptions};
    use std::fs;
    use tempfile::TempDir;

    const MAIN: &str = "class Main { function void main() { do SquareGame.run(); return; } }";
    const SQUARE_GAME: &str = "class SquareGame { function void run() { return; } }";

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalyzerOptions {
            color: false,
            ..AnalyzerOptions::default()
        })
    }

    #[test]
    fn test_project_directory() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("Square");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("Main.jack"), MAIN).unwrap();
        fs::write(src.join("SquareGame.jack"), SQUARE_GAME).unwrap();
        fs::write(src.join("Broken.jack"), "class Broken { function }").unwrap();
        fs::write(src.join("notes.txt"), "class Ignored { }").unwrap();

        let report = analyzer().analyze_path(dir.path(), None).unwrap();
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed[0].input, src.join("Broken.jack"));
        assert!(matches!(report.failed[0].error, AnalyzerError::Syntax(_)));

        let tree = fs::read_to_string(src.join("Main.xml")).unwrap();
        assert!(jack_analyzer::compare_ignoring_whitespace(
            &tree,
            &super::render(MAIN),
        ));
        assert!(src.join("SquareGameT.xml").exists());
        assert!(!src.join("notes.xml").exists());
    }

    #[test]
    fn test_single_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.jack");
        fs::write(&input, "class Main { }").unwrap();

        let report = analyzer().analyze_path(&input, None).unwrap();
        assert!(report.is_success());
        assert_eq!(report.succeeded[0].tree_path, dir.path().join("Main.xml"));
    }

    #[test]
    fn test_unreadable_extension_counts_as_failure() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.txt");
        fs::write(&input, "class Main { }").unwrap();

        let report = analyzer().analyze_path(&input, None).unwrap();
        assert!(!report.is_success());
        assert!(report.failed[0].rendered.is_none());
    }
}
