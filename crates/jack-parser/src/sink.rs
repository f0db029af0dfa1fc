//! Tag sinks - where the parser's structure events go
//!
//! The parser never formats text. It reports what it recognizes through
//! [`TagSink`]:
//!
//! - `open(name)` when a nonterminal starts
//! - `leaf(kind, value)` for every consumed token
//! - `close(name)` when the nonterminal ends
//!
//! [`XmlWriter`] renders the events as indented markup, [`EventRecorder`]
//! keeps them in memory.

use jack_lexer::TokenType;

/// Receiver of open/leaf/close events, in emission order
pub trait TagSink {
    fn open(&mut self, name: &str);

    /// `value` is already rendered (symbols escaped)
    fn leaf(&mut self, kind: TokenType, value: &str);

    fn close(&mut self, name: &str);
}

impl<S: TagSink + ?Sized> TagSink for &mut S {
    fn open(&mut self, name: &str) {
        (**self).open(name);
    }

    fn leaf(&mut self, kind: TokenType, value: &str) {
        (**self).leaf(kind, value);
    }

    fn close(&mut self, name: &str) {
        (**self).close(name);
    }
}

/// A single structure event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Open(String),
    Leaf { kind: TokenType, value: String },
    Close(String),
}

impl TagEvent {
    pub fn open(name: impl Into<String>) -> Self {
        TagEvent::Open(name.into())
    }

    pub fn leaf(kind: TokenType, value: impl Into<String>) -> Self {
        TagEvent::Leaf {
            kind,
            value: value.into(),
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        TagEvent::Close(name.into())
    }
}

/// Records events for inspection
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventRecorder {
    events: Vec<TagEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TagEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TagEvent> {
        self.events
    }

    /// True if every `Open` is closed by a `Close` of the same name at the
    /// same depth and nothing is left open
    pub fn is_balanced(&self) -> bool {
        let mut stack: Vec<&str> = Vec::new();
        for event in &self.events {
            match event {
                TagEvent::Open(name) => stack.push(name),
                TagEvent::Close(name) => {
                    if stack.pop() != Some(name.as_str()) {
                        return false;
                    }
                }
                TagEvent::Leaf { .. } => {}
            }
        }
        stack.is_empty()
    }

    /// Values of all leaf events, in order
    pub fn leaf_values(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TagEvent::Leaf { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TagSink for EventRecorder {
    fn open(&mut self, name: &str) {
        self.events.push(TagEvent::open(name));
    }

    fn leaf(&mut self, kind: TokenType, value: &str) {
        self.events.push(TagEvent::leaf(kind, value));
    }

    fn close(&mut self, name: &str) {
        self.events.push(TagEvent::close(name));
    }
}

/// Renders events as markup, one element per line:
///
/// ```text
/// <class>
///   <keyword> class </keyword>
///   <identifier> Main </identifier>
/// </class>
/// ```
#[derive(Debug, Clone)]
pub struct XmlWriter {
    output: String,
    indent: &'static str,
    open: Vec<String>,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    /// Two spaces per nesting level
    pub fn new() -> Self {
        Self::with_indent("  ")
    }

    /// No indentation at all, as used by the token dump
    pub fn flat() -> Self {
        Self::with_indent("")
    }

    pub fn with_indent(indent: &'static str) -> Self {
        Self {
            output: String::new(),
            indent,
            open: Vec::new(),
        }
    }

    fn push_indent(&mut self) {
        for _ in 0..self.open.len() {
            self.output.push_str(self.indent);
        }
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn finish(self) -> String {
        debug_assert!(self.open.is_empty(), "unclosed elements: {:?}", self.open);
        self.output
    }
}

impl TagSink for XmlWriter {
    fn open(&mut self, name: &str) {
        self.push_indent();
        self.output.push('<');
        self.output.push_str(name);
        self.output.push_str(">\n");
        self.open.push(name.to_string());
    }

    fn leaf(&mut self, kind: TokenType, value: &str) {
        let tag = kind.tag_name();
        self.push_indent();
        self.output.push_str(&format!("<{tag}> {value} </{tag}>\n"));
    }

    fn close(&mut self, name: &str) {
        let opened = self.open.pop();
        debug_assert_eq!(opened.as_deref(), Some(name), "mismatched close tag");
        self.push_indent();
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push_str(">\n");
    }
}
