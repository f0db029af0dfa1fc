//! jack-lexer - Tokenizer for the Jack language
//!
//! Converts Jack source code into a [`TokenStream`] of keywords, symbols,
//! integer constants, string constants and identifiers. Comments and
//! whitespace produce no tokens.
//!
//! # Example
//!
//! ```rust
//! use jack_lexer::{tokenize, TokenType};
//!
//! let (mut stream, diagnostics) = tokenize("let x = 10; // ten", 0);
//! assert!(diagnostics.is_empty());
//!
//! stream.advance();
//! assert_eq!(stream.token_type(), Some(TokenType::Keyword));
//! assert_eq!(stream.peek_next().map(|t| t.kind.lexeme().into_owned()), Some("x".to_string()));
//! ```

pub mod lexer;
pub mod stream;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use stream::TokenStream;
pub use token::{Keyword, Token, TokenKind, TokenType, SYMBOLS};
