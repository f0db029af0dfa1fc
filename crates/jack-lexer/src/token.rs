//! Tokens for the Jack language
//!
//! Defines the five token categories the lexer can produce, the closed set
//! of reserved words and the closed set of single-character symbols.

use jack_error::span::{Span, Spanned};
use std::borrow::Cow;
use std::fmt;

/// The single-character symbols of the language
pub const SYMBOLS: [char; 19] = [
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

/// Returns true if `ch` is one of the language's symbols
pub fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains(&ch)
}

/// Markup entity for a symbol, if it needs one
pub fn escape_symbol(ch: char) -> Option<&'static str> {
    match ch {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '&' => Some("&amp;"),
        _ => None,
    }
}

/// Reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // =========================================
    // Program structure
    // =========================================
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,

    // =========================================
    // Types
    // =========================================
    Int,
    Char,
    Boolean,
    Void,

    // =========================================
    // Constants
    // =========================================
    True,
    False,
    Null,
    This,

    // =========================================
    // Statements
    // =========================================
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub const ALL: [Keyword; 21] = [
        Keyword::Class,
        Keyword::Constructor,
        Keyword::Function,
        Keyword::Method,
        Keyword::Field,
        Keyword::Static,
        Keyword::Var,
        Keyword::Int,
        Keyword::Char,
        Keyword::Boolean,
        Keyword::Void,
        Keyword::True,
        Keyword::False,
        Keyword::Null,
        Keyword::This,
        Keyword::Let,
        Keyword::Do,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Return,
    ];

    /// Looks up a reserved word
    pub fn from_word(word: &str) -> Option<Self> {
        let keyword = match word {
            "class" => Keyword::Class,
            "constructor" => Keyword::Constructor,
            "function" => Keyword::Function,
            "method" => Keyword::Method,
            "field" => Keyword::Field,
            "static" => Keyword::Static,
            "var" => Keyword::Var,
            "int" => Keyword::Int,
            "char" => Keyword::Char,
            "boolean" => Keyword::Boolean,
            "void" => Keyword::Void,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "this" => Keyword::This,
            "let" => Keyword::Let,
            "do" => Keyword::Do,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "return" => Keyword::Return,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Constructor => "constructor",
            Keyword::Function => "function",
            Keyword::Method => "method",
            Keyword::Field => "field",
            Keyword::Static => "static",
            Keyword::Var => "var",
            Keyword::Int => "int",
            Keyword::Char => "char",
            Keyword::Boolean => "boolean",
            Keyword::Void => "void",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token category, as named in the rendered output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl TokenType {
    /// Tag name used for leaf lines
    pub fn tag_name(&self) -> &'static str {
        match self {
            TokenType::Keyword => "keyword",
            TokenType::Symbol => "symbol",
            TokenType::IntegerConstant => "integerConstant",
            TokenType::StringConstant => "stringConstant",
            TokenType::Identifier => "identifier",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    /// One of [`SYMBOLS`], stored raw
    Symbol(char),
    /// Digits exactly as written, no range check
    IntConst(String),
    /// Text between the quotes, no escape processing
    StringConst(String),
    Identifier(String),
}

impl TokenKind {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Keyword(_) => TokenType::Keyword,
            TokenKind::Symbol(_) => TokenType::Symbol,
            TokenKind::IntConst(_) => TokenType::IntegerConstant,
            TokenKind::StringConst(_) => TokenType::StringConstant,
            TokenKind::Identifier(_) => TokenType::Identifier,
        }
    }

    /// The literal source text of the token
    pub fn lexeme(&self) -> Cow<'_, str> {
        match self {
            TokenKind::Keyword(kw) => Cow::Borrowed(kw.as_str()),
            TokenKind::Symbol(ch) => Cow::Owned(ch.to_string()),
            TokenKind::IntConst(digits) => Cow::Borrowed(digits.as_str()),
            TokenKind::StringConst(text) => Cow::Borrowed(text.as_str()),
            TokenKind::Identifier(name) => Cow::Borrowed(name.as_str()),
        }
    }

    /// The value as it appears in a leaf line.
    ///
    /// Symbols are escaped, integer constants are printed as their decimal
    /// value (leading zeros dropped), everything else is verbatim.
    pub fn rendered(&self) -> Cow<'_, str> {
        match self {
            TokenKind::Symbol(ch) => match escape_symbol(*ch) {
                Some(entity) => Cow::Borrowed(entity),
                None => Cow::Owned(ch.to_string()),
            },
            TokenKind::IntConst(digits) => {
                let trimmed = digits.trim_start_matches('0');
                if trimmed.is_empty() {
                    Cow::Borrowed("0")
                } else {
                    Cow::Borrowed(trimmed)
                }
            }
            other => other.lexeme(),
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(kw) if *kw == keyword)
    }

    pub fn is_symbol(&self, symbol: char) -> bool {
        matches!(self, TokenKind::Symbol(ch) if *ch == symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::StringConst(text) => write!(f, "\"{}\"", text),
            other => write!(f, "`{}`", other.lexeme()),
        }
    }
}

/// A token with its location in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}
