//! Span - Source code location
//!
//! Every token carries a span so that lexical and syntax errors can point
//! at the exact place in the `.jack` file.

/// A position in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Column (1-indexed, counted in characters)
    pub column: u32,
    /// Byte offset from the beginning of the file
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Position of the first character of a file
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }
}

/// A region in the source code (start inclusive, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
    /// Source file ID in the [`SourceCache`](crate::SourceCache)
    pub file_id: u32,
}

impl Span {
    pub fn new(start: Position, end: Position, file_id: u32) -> Self {
        Self { start, end, file_id }
    }

    /// Creates an empty span at a single position
    pub fn point(pos: Position, file_id: u32) -> Self {
        Self {
            start: pos,
            end: pos,
            file_id,
        }
    }

    /// Combines two spans into one covering both
    pub fn merge(self, other: Span) -> Span {
        debug_assert_eq!(self.file_id, other.file_id, "cannot merge spans from different files");
        Span {
            start: if self.start.offset <= other.start.offset {
                self.start
            } else {
                other.start
            },
            end: if self.end.offset >= other.end.offset {
                self.end
            } else {
                other.end
            },
            file_id: self.file_id,
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Types that know where they came from in the source
pub trait Spanned {
    fn span(&self) -> Span;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let keyword = Span::new(Position::new(1, 1, 0), Position::new(1, 6, 5), 0);
        let brace = Span::new(Position::new(1, 12, 11), Position::new(1, 13, 12), 0);

        let merged = brace.merge(keyword);
        assert_eq!(merged.start.offset, 0);
        assert_eq!(merged.end.offset, 12);
        assert_eq!(merged.len(), 12);
    }

    #[test]
    fn test_point_is_empty() {
        let span = Span::point(Position::new(3, 4, 20), 0);
        assert!(span.is_empty());
        assert_eq!(span.start, span.end);
    }
}
