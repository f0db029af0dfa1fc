//! jack-parser - Parser for the Jack language
//!
//! Walks a [`TokenStream`](jack_lexer::TokenStream) with a recursive-descent
//! [`CompilationEngine`] and reports the parse tree as open/leaf/close events
//! to a [`TagSink`]. No tree is built in memory.
//!
//! # Example
//!
//! ```rust
//! use jack_lexer::tokenize;
//! use jack_parser::{compile_class, EventRecorder, XmlWriter};
//!
//! let source = "class Main { function void main() { return; } }";
//!
//! let (mut tokens, _) = tokenize(source, 0);
//! let mut recorder = EventRecorder::new();
//! compile_class(&mut tokens, &mut recorder).unwrap();
//! assert!(recorder.is_balanced());
//!
//! let (mut tokens, _) = tokenize(source, 0);
//! let mut writer = XmlWriter::new();
//! compile_class(&mut tokens, &mut writer).unwrap();
//! assert!(writer.finish().starts_with("<class>\n  <keyword> class </keyword>\n"));
//! ```

pub mod dump;
pub mod engine;
pub mod grammar;
pub mod sink;

pub use dump::{dump_tokens, render_class, render_tokens};
pub use engine::{compile_class, CompilationEngine, MAX_DEPTH};
pub use grammar::Nonterminal;
pub use sink::{EventRecorder, TagEvent, TagSink, XmlWriter};
