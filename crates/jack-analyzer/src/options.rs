//! Analyzer configuration and output naming

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// How files are discovered and where results are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Write the token dump next to the parse tree
    pub emit_tokens: bool,
    /// Extension of source files, without the dot
    pub source_extension: String,
    /// Appended to the file stem for the parse tree (`Main` -> `Main.xml`)
    pub tree_suffix: String,
    /// Appended to the file stem for the token dump (`Main` -> `MainT.xml`)
    pub tokens_suffix: String,
    /// Use ANSI colors when rendering diagnostics
    pub color: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            emit_tokens: true,
            source_extension: "jack".to_string(),
            tree_suffix: ".xml".to_string(),
            tokens_suffix: "T.xml".to_string(),
            color: true,
        }
    }
}

impl AnalyzerOptions {
    /// True if `path` has the source extension
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension().and_then(OsStr::to_str) == Some(self.source_extension.as_str())
    }

    fn sibling(&self, input: &Path, suffix: &str) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{}{}", stem, suffix))
    }

    /// Default location of the parse tree for `input`
    pub fn tree_path(&self, input: &Path) -> PathBuf {
        self.sibling(input, &self.tree_suffix)
    }

    /// Location of the token dump for `input`
    pub fn tokens_path(&self, input: &Path) -> PathBuf {
        self.sibling(input, &self.tokens_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        let options = AnalyzerOptions::default();
        let input = Path::new("projects/Square/Main.jack");

        assert_eq!(options.tree_path(input), PathBuf::from("projects/Square/Main.xml"));
        assert_eq!(options.tokens_path(input), PathBuf::from("projects/Square/MainT.xml"));
    }

    #[test]
    fn test_is_source() {
        let options = AnalyzerOptions::default();
        assert!(options.is_source(Path::new("Main.jack")));
        assert!(!options.is_source(Path::new("Main.JACK")));
        assert!(!options.is_source(Path::new("Main.xml")));
        assert!(!options.is_source(Path::new("jack")));
    }

    #[test]
    fn test_custom_extension() {
        let options = AnalyzerOptions {
            source_extension: "jk".into(),
            ..AnalyzerOptions::default()
        };
        assert!(options.is_source(Path::new("a/B.jk")));
        assert!(!options.is_source(Path::new("a/B.jack")));
    }
}
