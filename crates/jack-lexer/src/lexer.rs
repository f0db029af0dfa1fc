//! Lexer for the Jack language
//!
//! Tokenizing happens in two steps:
//! 1. comment elision: every `/* ... */` span is hidden, then every
//!    `//` span up to the end of its line, before anything is classified;
//! 2. a left-to-right scan over the visible characters.
//!
//! Hidden characters are masked rather than removed, so spans keep pointing
//! at the unmodified source.

use crate::stream::TokenStream;
use crate::token::{is_symbol, Keyword, Token, TokenKind};
use jack_error::{
    span::{Position, Span},
    Diagnostic, Diagnostics, ErrorCode,
};

/// The Jack lexer
pub struct Lexer {
    /// Source code characters
    chars: Vec<char>,
    /// `true` for characters that belong to a comment
    hidden: Vec<bool>,
    /// Current index in `chars`
    pos: usize,
    line: u32,
    column: u32,
    offset: usize,
    file_id: u32,
    diagnostics: Diagnostics,
}

impl Lexer {
    /// Creates a lexer and runs comment elision over `source`
    pub fn new(source: &str, file_id: u32) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut lexer = Self {
            hidden: vec![false; chars.len()],
            chars,
            pos: 0,
            line: 1,
            column: 1,
            offset: 0,
            file_id,
            diagnostics: Diagnostics::new(),
        };
        lexer.hide_block_comments();
        lexer.hide_line_comments();
        lexer
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    // =========================================
    // Comment elision
    // =========================================

    /// Hides `/* ... */` spans (shortest match, across newlines)
    fn hide_block_comments(&mut self) {
        let len = self.chars.len();
        let mut i = 0;

        while i + 1 < len {
            if self.chars[i] != '/' || self.chars[i + 1] != '*' {
                i += 1;
                continue;
            }

            let close = (i + 2..len.saturating_sub(1))
                .find(|&j| self.chars[j] == '*' && self.chars[j + 1] == '/');

            match close {
                Some(j) => {
                    self.hidden[i..j + 2].fill(true);
                    i = j + 2;
                }
                None => {
                    let start = self.position_of(i);
                    self.diagnostics.push(
                        Diagnostic::error("unterminated block comment")
                            .with_code(ErrorCode::UNTERMINATED_COMMENT)
                            .with_label(
                                Span::new(start, self.position_of(i + 2), self.file_id),
                                "comment starts here but is never closed",
                            )
                            .with_help("add `*/` to close the comment"),
                    );
                    self.hidden[i..].fill(true);
                    return;
                }
            }
        }
    }

    /// Hides `//` spans up to the next visible newline.
    ///
    /// Runs after block comments are hidden, so two slashes separated only
    /// by a block comment also start a line comment.
    fn hide_line_comments(&mut self) {
        let visible: Vec<usize> = (0..self.chars.len()).filter(|&i| !self.hidden[i]).collect();
        let mut k = 0;

        while k + 1 < visible.len() {
            if self.chars[visible[k]] == '/' && self.chars[visible[k + 1]] == '/' {
                while k < visible.len() && self.chars[visible[k]] != '\n' {
                    self.hidden[visible[k]] = true;
                    k += 1;
                }
            } else {
                k += 1;
            }
        }
    }

    /// Computes the position of a character index by walking from the start
    fn position_of(&self, index: usize) -> Position {
        let mut pos = Position::start();
        for &ch in self.chars.iter().take(index) {
            pos.offset += ch.len_utf8();
            if ch == '\n' {
                pos.line += 1;
                pos.column = 1;
            } else {
                pos.column += 1;
            }
        }
        pos
    }

    // =========================================
    // Scanning
    // =========================================

    /// Returns the current character without advancing
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn is_hidden(&self) -> bool {
        self.hidden.get(self.pos).copied().unwrap_or(false)
    }

    /// Next visible character, skipping hidden ones
    fn peek_visible(&mut self) -> Option<char> {
        while self.is_hidden() {
            self.advance();
        }
        self.peek()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    fn make_span(&self, start: Position) -> Span {
        Span::new(start, self.current_position(), self.file_id)
    }

    /// Reads a string literal; the opening quote is the current character
    fn read_string(&mut self) -> Token {
        let start = self.current_position();
        self.advance();
        let mut value = String::new();

        loop {
            match self.peek_visible() {
                None => {
                    let span = self.make_span(start);
                    self.diagnostics.push(
                        Diagnostic::error("unterminated string")
                            .with_code(ErrorCode::UNTERMINATED_STRING)
                            .with_label(span, "string starts here but is never closed")
                            .with_help("add `\"` at the end of the string"),
                    );
                    return Token::new(TokenKind::StringConst(value), span);
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Token::new(TokenKind::StringConst(value), self.make_span(start))
    }

    /// Reads a maximal run of digits
    fn read_number(&mut self) -> Token {
        let start = self.current_position();
        let mut digits = String::new();

        while let Some(ch) = self.peek_visible() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.advance();
        }

        Token::new(TokenKind::IntConst(digits), self.make_span(start))
    }

    /// Reads an identifier or keyword
    fn read_word(&mut self) -> Token {
        let start = self.current_position();
        let mut word = String::new();

        while let Some(ch) = self.peek_visible() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            word.push(ch);
            self.advance();
        }

        let kind = match Keyword::from_word(&word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier(word),
        };

        Token::new(kind, self.make_span(start))
    }

    /// Reads the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            let ch = self.peek_visible()?;

            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch == '"' {
                return Some(self.read_string());
            }

            if is_symbol(ch) {
                let start = self.current_position();
                self.advance();
                return Some(Token::new(TokenKind::Symbol(ch), self.make_span(start)));
            }

            if ch.is_ascii_digit() {
                return Some(self.read_number());
            }

            if ch.is_alphabetic() || ch == '_' {
                return Some(self.read_word());
            }

            let start = self.current_position();
            self.advance();
            let span = self.make_span(start);
            self.diagnostics.push(
                Diagnostic::warning(format!("unexpected character `{}`", ch.escape_debug()))
                    .with_code(ErrorCode::UNEXPECTED_CHAR)
                    .with_label(span, "ignored"),
            );
        }
    }

    /// Tokenizes the whole source
    pub fn tokenize(&mut self) -> Vec<Token> {
        std::iter::from_fn(|| self.next_token()).collect()
    }
}

/// Tokenizes source code into a stream positioned before the first token
pub fn tokenize(source: &str, file_id: u32) -> (TokenStream, Diagnostics) {
    let mut lexer = Lexer::new(source, file_id);
    let tokens = lexer.tokenize();
    (TokenStream::new(tokens), lexer.take_diagnostics())
}
