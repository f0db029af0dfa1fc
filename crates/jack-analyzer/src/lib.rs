//! jack-analyzer - Syntax analyzer driver for the Jack language
//!
//! Finds `.jack` files, runs the lexer and parser over each one and writes
//! the parse tree (`X.xml`) and token dump (`XT.xml`) next to the source.
//!
//! # Example
//!
//! ```rust
//! use jack_analyzer::analyze_source;
//!
//! let analysis = analyze_source("class Main { }").unwrap();
//! assert!(analysis.tree.starts_with("<class>"));
//! assert!(analysis.tokens.starts_with("<tokens>"));
//! ```

pub mod driver;
pub mod error;
pub mod options;
pub mod pipeline;

pub use driver::{Analyzer, FileFailure, FileOutcome, Report};
pub use error::{AnalyzerError, Result};
pub use options::AnalyzerOptions;
pub use pipeline::{analyze_source, compare_ignoring_whitespace, Analysis};
