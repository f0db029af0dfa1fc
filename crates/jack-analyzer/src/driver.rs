//! File and directory driver

use crate::error::{AnalyzerError, Result};
use crate::options::AnalyzerOptions;
use crate::pipeline::analyze_source;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Files written for one analyzed source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub tree_path: PathBuf,
    pub tokens_path: Option<PathBuf>,
    pub token_count: usize,
    pub warnings: usize,
}

/// A file that could not be analyzed
#[derive(Debug)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: AnalyzerError,
    /// Source snippets for the error, when it carries diagnostics
    pub rendered: Option<String>,
}

/// Result of a run over one or more files
#[derive(Debug, Default)]
pub struct Report {
    pub succeeded: Vec<FileOutcome>,
    pub failed: Vec<FileFailure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Runs the analyzer over files on disk
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    /// Analyzes a file or every source file under a directory.
    ///
    /// Failures of individual files are collected in the report. Only a
    /// path that cannot be processed at all is returned as an error.
    pub fn analyze_path(&self, path: &Path, output: Option<&Path>) -> Result<Report> {
        if !path.exists() {
            return Err(AnalyzerError::PathNotFound(path.to_path_buf()));
        }

        if path.is_dir() {
            if output.is_some() {
                return Err(AnalyzerError::OutputForDirectory);
            }
            return self.analyze_directory(path);
        }

        if !path.is_file() {
            return Err(AnalyzerError::NotAFileOrDirectory(path.to_path_buf()));
        }

        let mut report = Report::default();
        self.record(&mut report, path, output);
        Ok(report)
    }

    /// Analyzes every source file under `dir`, recursively, in path order
    pub fn analyze_directory(&self, dir: &Path) -> Result<Report> {
        let files = self.discover(dir)?;
        let mut report = Report::default();

        if files.is_empty() {
            warn!(
                "no .{} files found in {}",
                self.options.source_extension,
                dir.display()
            );
            return Ok(report);
        }

        info!("found {} source file(s) in {}", files.len(), dir.display());
        for file in &files {
            self.record(&mut report, file, None);
        }

        info!(
            "analyzed {} file(s): {} succeeded, {} failed",
            report.total(),
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Lists source files under `dir`, sorted by path.
    ///
    /// Hidden files and ignore files are not special. Entries that cannot be
    /// read are skipped with a warning.
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(AnalyzerError::NotAFileOrDirectory(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in WalkBuilder::new(dir).standard_filters(false).build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && self.options.is_source(entry.path()) {
                debug!("discovered {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Analyzes one source file and writes its outputs.
    ///
    /// The tree goes to `output` when given, otherwise next to the input.
    /// Nothing is written if the file fails to analyze.
    pub fn analyze_file(&self, input: &Path, output: Option<&Path>) -> Result<FileOutcome> {
        self.check_source(input)?;
        let source = read_source(input)?;
        self.write_outputs(input, &source, output)
    }

    fn check_source(&self, input: &Path) -> Result<()> {
        if self.options.is_source(input) {
            Ok(())
        } else {
            Err(AnalyzerError::NotASourceFile {
                path: input.to_path_buf(),
                extension: self.options.source_extension.clone(),
            })
        }
    }

    /// Writes the tree, then the token dump. If the dump cannot be written
    /// the tree is removed again.
    fn write_outputs(
        &self,
        input: &Path,
        source: &str,
        output: Option<&Path>,
    ) -> Result<FileOutcome> {
        let tree_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.options.tree_path(input));
        let tokens_path = self
            .options
            .emit_tokens
            .then(|| self.options.tokens_path(input));

        if tokens_path.as_ref() == Some(&tree_path) {
            return Err(AnalyzerError::OutputOverwritesTokens(tree_path));
        }

        let analysis = analyze_source(source)?;
        debug!("{}: {} tokens", input.display(), analysis.token_count);

        for warning in &analysis.warnings {
            warn!("{}: {}", input.display(), warning);
        }

        fs::write(&tree_path, &analysis.tree).map_err(|e| AnalyzerError::io(&tree_path, e))?;

        if let Some(path) = &tokens_path {
            if let Err(e) = fs::write(path, &analysis.tokens) {
                if let Err(cleanup) = fs::remove_file(&tree_path) {
                    warn!("could not remove {}: {}", tree_path.display(), cleanup);
                }
                return Err(AnalyzerError::io(path, e));
            }
            debug!("wrote {}", path.display());
        }

        info!("{} -> {}", input.display(), tree_path.display());

        Ok(FileOutcome {
            input: input.to_path_buf(),
            tree_path,
            tokens_path,
            token_count: analysis.token_count,
            warnings: analysis.warnings.len(),
        })
    }

    /// Analyzes one file, logging and collecting any failure
    fn record(&self, report: &mut Report, input: &Path, output: Option<&Path>) {
        let source = match self.check_source(input).and_then(|()| read_source(input)) {
            Ok(source) => source,
            Err(err) => return self.push_failure(report, input, err, None),
        };

        match self.write_outputs(input, &source, output) {
            Ok(outcome) => report.succeeded.push(outcome),
            Err(err) => self.push_failure(report, input, err, Some(&source)),
        }
    }

    fn push_failure(
        &self,
        report: &mut Report,
        input: &Path,
        err: AnalyzerError,
        source: Option<&str>,
    ) {
        error!("{}: {}", input.display(), err);
        let name = input.display().to_string();
        let rendered = source.and_then(|source| err.render(&name, source, self.options.color));

        report.failed.push(FileFailure {
            input: input.to_path_buf(),
            error: err,
            rendered,
        });
    }
}

fn read_source(input: &Path) -> Result<String> {
    fs::read_to_string(input).map_err(|e| AnalyzerError::io(input, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MAIN: &str = "class Main {\n  function void main() {\n    return;\n  }\n}\n";

    fn quiet() -> Analyzer {
        Analyzer::new(AnalyzerOptions {
            color: false,
            ..AnalyzerOptions::default()
        })
    }

    #[test]
    fn test_analyze_file_writes_both_outputs() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.jack");
        fs::write(&input, MAIN).unwrap();

        let outcome = quiet().analyze_file(&input, None).unwrap();
        assert_eq!(outcome.tree_path, dir.path().join("Main.xml"));
        assert_eq!(outcome.tokens_path, Some(dir.path().join("MainT.xml")));
        assert_eq!(outcome.token_count, 13);

        let tree = fs::read_to_string(dir.path().join("Main.xml")).unwrap();
        assert!(tree.starts_with("<class>\n"));
        let tokens = fs::read_to_string(dir.path().join("MainT.xml")).unwrap();
        assert!(tokens.starts_with("<tokens>\n"));
    }

    #[test]
    fn test_explicit_output_and_no_tokens() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.jack");
        let output = dir.path().join("tree.out");
        fs::write(&input, MAIN).unwrap();

        let analyzer = Analyzer::new(AnalyzerOptions {
            emit_tokens: false,
            ..AnalyzerOptions::default()
        });
        let outcome = analyzer.analyze_file(&input, Some(&output)).unwrap();

        assert_eq!(outcome.tree_path, output);
        assert!(output.exists());
        assert!(!dir.path().join("MainT.xml").exists());
        assert!(!dir.path().join("Main.xml").exists());
    }

    #[test]
    fn test_rejects_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.txt");
        fs::write(&input, MAIN).unwrap();

        let err = quiet().analyze_file(&input, None).unwrap_err();
        assert!(matches!(err, AnalyzerError::NotASourceFile { .. }));
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = quiet()
            .analyze_path(&dir.path().join("Nope.jack"), None)
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::PathNotFound(_)));
    }

    #[test]
    fn test_directory_is_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("lib").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("Main.jack"), MAIN).unwrap();
        fs::write(nested.join("Util.jack"), "class Util { }").unwrap();
        fs::write(dir.path().join("README.md"), "not jack").unwrap();

        let analyzer = quiet();
        let files = analyzer.discover(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("Main.jack"), nested.join("Util.jack")]
        );

        let report = analyzer.analyze_path(dir.path(), None).unwrap();
        assert!(report.is_success());
        assert_eq!(report.total(), 2);
        assert!(nested.join("Util.xml").exists());
        assert!(nested.join("UtilT.xml").exists());
    }

    #[test]
    fn test_hidden_directories_are_walked() {
        let dir = TempDir::new().unwrap();
        let hidden = dir.path().join(".hidden");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("A.jack"), "class A { }").unwrap();

        let files = quiet().discover(dir.path()).unwrap();
        assert_eq!(files, vec![hidden.join("A.jack")]);
    }

    #[test]
    fn test_bad_file_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("A.jack"), "class A { }").unwrap();
        fs::write(dir.path().join("B.jack"), "class B { let }").unwrap();
        fs::write(dir.path().join("C.jack"), "class C { }").unwrap();

        let report = quiet().analyze_path(dir.path(), None).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed.len(), 1);

        let failure = &report.failed[0];
        assert_eq!(failure.input, dir.path().join("B.jack"));
        assert!(matches!(failure.error, AnalyzerError::Syntax(_)));
        assert!(failure.rendered.as_deref().unwrap().contains("error[EP001]"));

        assert!(dir.path().join("C.xml").exists());
        assert!(!dir.path().join("B.xml").exists());
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let report = quiet().analyze_path(dir.path(), None).unwrap();
        assert_eq!(report.total(), 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_output_rejected_for_directory() {
        let dir = TempDir::new().unwrap();
        let err = quiet()
            .analyze_path(dir.path(), Some(Path::new("out.xml")))
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::OutputForDirectory));
    }

    #[test]
    fn test_deeply_nested_file_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let nested = format!(
            "class A {{ function void f() {{ let x = {}1{}; return; }} }}",
            "(".repeat(5000),
            ")".repeat(5000)
        );
        fs::write(dir.path().join("A.jack"), nested).unwrap();
        fs::write(dir.path().join("B.jack"), "class B { }").unwrap();

        let report = quiet().analyze_path(dir.path(), None).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].input, dir.path().join("A.jack"));
        match &report.failed[0].error {
            AnalyzerError::Syntax(diagnostic) => {
                assert_eq!(diagnostic.code, Some(jack_error::ErrorCode::NESTED_TOO_DEEPLY));
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }

        assert!(dir.path().join("B.xml").exists());
        assert!(!dir.path().join("A.xml").exists());
        assert!(!dir.path().join("AT.xml").exists());
    }

    #[test]
    fn test_output_may_not_replace_token_dump() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.jack");
        fs::write(&input, MAIN).unwrap();

        let err = quiet()
            .analyze_file(&input, Some(&dir.path().join("MainT.xml")))
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::OutputOverwritesTokens(_)));
        assert!(!dir.path().join("MainT.xml").exists());
    }

    #[test]
    fn test_failed_tree_write_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.jack");
        fs::write(&input, MAIN).unwrap();

        let output = dir.path().join("missing").join("Main.xml");
        let err = quiet().analyze_file(&input, Some(&output)).unwrap_err();
        assert!(matches!(err, AnalyzerError::Io { .. }));
        assert!(!dir.path().join("MainT.xml").exists());
    }

    #[test]
    fn test_failed_dump_write_removes_tree() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Main.jack");
        fs::write(&input, MAIN).unwrap();
        fs::create_dir(dir.path().join("MainT.xml")).unwrap();

        let err = quiet().analyze_file(&input, None).unwrap_err();
        assert!(matches!(err, AnalyzerError::Io { .. }));
        assert!(!dir.path().join("Main.xml").exists());
    }
}
