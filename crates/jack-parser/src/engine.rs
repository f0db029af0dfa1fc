//! CompilationEngine - recursive-descent parser for Jack
//!
//! One method per grammar rule. Each `compile_*` method expects the current
//! token to be the first token of its rule, consumes exactly the tokens of
//! that rule and leaves the stream on the token that follows.
//!
//! Every literal the grammar requires is checked; the first mismatch stops
//! the parse with a diagnostic. There is no recovery.

use crate::grammar::{
    Nonterminal, BINARY_OPS, CLASS_VAR_KINDS, KEYWORD_CONSTANTS, PRIMITIVE_TYPES,
    SUBROUTINE_KINDS, UNARY_OPS,
};
use crate::sink::TagSink;
use jack_error::{Diagnostic, ErrorCode, Result};
use jack_lexer::{Keyword, Token, TokenKind, TokenStream};

/// Default bound on open nonterminals. Each parenthesized expression
/// opens two (`expression` and `term`).
pub const MAX_DEPTH: usize = 512;

/// Parser for one Jack class
pub struct CompilationEngine<'a, S: TagSink> {
    tokens: &'a mut TokenStream,
    sink: &'a mut S,
    /// Nonterminals currently open
    depth: usize,
    max_depth: usize,
}

impl<'a, S: TagSink> CompilationEngine<'a, S> {
    /// Creates an engine over a stream whose current token is `class`
    pub fn new(tokens: &'a mut TokenStream, sink: &'a mut S) -> Self {
        Self {
            tokens,
            sink,
            depth: 0,
            max_depth: MAX_DEPTH,
        }
    }

    /// Sets how many nonterminals may be open at once
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    // =========================================
    // Helpers
    // =========================================

    fn current(&self) -> Option<&Token> {
        self.tokens.current()
    }

    /// True if the current token is one of `keywords`
    fn at_keyword(&self, keywords: &[Keyword]) -> bool {
        matches!(self.tokens.keyword(), Some(kw) if keywords.contains(&kw))
    }

    /// True if the current token is `symbol` (compared unescaped)
    fn at_symbol(&self, symbol: char) -> bool {
        self.tokens.raw_symbol() == Some(symbol)
    }

    fn at_any_symbol(&self, symbols: &[char]) -> bool {
        matches!(self.tokens.raw_symbol(), Some(ch) if symbols.contains(&ch))
    }

    /// Builds an error for the current token, or for end of input
    fn error(&self, code: ErrorCode, expected: &str) -> Diagnostic {
        match self.current() {
            Some(token) => Diagnostic::error(format!("expected {}, found {}", expected, token.kind))
                .with_code(code)
                .with_label(token.span, format!("expected {} here", expected)),
            None => Diagnostic::error("unexpected end of input")
                .with_code(ErrorCode::UNEXPECTED_EOF)
                .with_label(self.tokens.end_span(), format!("expected {}", expected))
                .with_note("the class is cut short; check for a missing `}`"),
        }
    }

    /// Emits the current token as a leaf and moves past it
    fn emit_and_advance(&mut self) {
        if let Some(token) = self.tokens.current() {
            self.sink.leaf(token.token_type(), &token.kind.rendered());
        }
        self.tokens.advance();
    }

    fn expect_keyword(&mut self, keywords: &[Keyword], expected: &str) -> Result<()> {
        if !self.at_keyword(keywords) {
            return Err(self.error(ErrorCode::UNEXPECTED_TOKEN, expected));
        }
        self.emit_and_advance();
        Ok(())
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<()> {
        if !self.at_symbol(symbol) {
            let mut diagnostic = self.error(ErrorCode::UNEXPECTED_TOKEN, &format!("`{}`", symbol));
            if symbol == ';' {
                diagnostic = diagnostic.with_help("terminate the statement with `;`");
            }
            return Err(diagnostic);
        }
        self.emit_and_advance();
        Ok(())
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<()> {
        if !matches!(self.current().map(|t| &t.kind), Some(TokenKind::Identifier(_))) {
            return Err(self.error(ErrorCode::UNEXPECTED_TOKEN, expected));
        }
        self.emit_and_advance();
        Ok(())
    }

    /// `type := 'int' | 'char' | 'boolean' | className`, optionally `void`
    fn compile_type(&mut self, allow_void: bool) -> Result<()> {
        let is_type = match self.current().map(|t| &t.kind) {
            Some(TokenKind::Identifier(_)) => true,
            Some(TokenKind::Keyword(Keyword::Void)) => allow_void,
            Some(TokenKind::Keyword(kw)) => PRIMITIVE_TYPES.contains(kw),
            _ => false,
        };
        if !is_type {
            let expected = if allow_void { "a return type" } else { "a type" };
            return Err(self
                .error(ErrorCode::EXPECTED_TYPE, expected)
                .with_help("types are `int`, `char`, `boolean` or a class name"));
        }
        self.emit_and_advance();
        Ok(())
    }

    /// Wraps `body` in an open/close pair for `nonterminal`.
    ///
    /// Fails instead of recursing past `max_depth`.
    fn node<F>(&mut self, nonterminal: Nonterminal, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if self.depth >= self.max_depth {
            return Err(self.too_deep(nonterminal));
        }

        self.depth += 1;
        self.sink.open(nonterminal.tag_name());
        let result = body(self);
        self.depth -= 1;
        result?;
        self.sink.close(nonterminal.tag_name());
        Ok(())
    }

    fn too_deep(&self, nonterminal: Nonterminal) -> Diagnostic {
        let span = self
            .current()
            .map(|t| t.span)
            .unwrap_or_else(|| self.tokens.end_span());
        Diagnostic::error(format!("`{}` nested too deeply", nonterminal))
            .with_code(ErrorCode::NESTED_TOO_DEEPLY)
            .with_label(span, format!("more than {} levels deep", self.max_depth))
            .with_help("split the expression using local variables")
    }

    /// Parses `(',' identifier)*`
    fn compile_more_names(&mut self) -> Result<()> {
        while self.at_symbol(',') {
            self.emit_and_advance();
            self.expect_identifier("a variable name")?;
        }
        Ok(())
    }

    // =========================================
    // Program structure
    // =========================================

    /// `'class' className '{' classVarDec* subroutineDec* '}'`
    pub fn compile_class(&mut self) -> Result<()> {
        self.node(Nonterminal::Class, |p| {
            p.expect_keyword(&[Keyword::Class], "`class`")?;
            p.expect_identifier("a class name")?;
            p.expect_symbol('{')?;

            while p.at_keyword(&CLASS_VAR_KINDS) {
                p.compile_class_var_dec()?;
            }
            while p.at_keyword(&SUBROUTINE_KINDS) {
                p.compile_subroutine()?;
            }

            p.expect_symbol('}')
        })?;

        match self.current() {
            None => Ok(()),
            Some(_) => Err(self
                .error(ErrorCode::UNEXPECTED_TOKEN, "end of input")
                .with_note("a file holds exactly one class")),
        }
    }

    /// `('static' | 'field') type varName (',' varName)* ';'`
    pub fn compile_class_var_dec(&mut self) -> Result<()> {
        self.node(Nonterminal::ClassVarDec, |p| {
            p.expect_keyword(&CLASS_VAR_KINDS, "`static` or `field`")?;
            p.compile_type(false)?;
            p.expect_identifier("a variable name")?;
            p.compile_more_names()?;
            p.expect_symbol(';')
        })
    }

    /// `('constructor' | 'function' | 'method') ('void' | type) subroutineName
    /// '(' parameterList ')' subroutineBody`
    pub fn compile_subroutine(&mut self) -> Result<()> {
        self.node(Nonterminal::SubroutineDec, |p| {
            p.expect_keyword(&SUBROUTINE_KINDS, "`constructor`, `function` or `method`")?;
            p.compile_type(true)?;
            p.expect_identifier("a subroutine name")?;
            p.expect_symbol('(')?;
            p.compile_parameter_list()?;
            p.expect_symbol(')')?;
            p.compile_subroutine_body()
        })
    }

    /// `((type varName) (',' type varName)*)?`
    pub fn compile_parameter_list(&mut self) -> Result<()> {
        self.node(Nonterminal::ParameterList, |p| {
            if p.at_symbol(')') {
                return Ok(());
            }
            p.compile_type(false)?;
            p.expect_identifier("a parameter name")?;
            while p.at_symbol(',') {
                p.emit_and_advance();
                p.compile_type(false)?;
                p.expect_identifier("a parameter name")?;
            }
            Ok(())
        })
    }

    /// `'{' varDec* statements '}'`
    pub fn compile_subroutine_body(&mut self) -> Result<()> {
        self.node(Nonterminal::SubroutineBody, |p| {
            p.expect_symbol('{')?;
            while p.at_keyword(&[Keyword::Var]) {
                p.compile_var_dec()?;
            }
            p.compile_statements()?;
            p.expect_symbol('}')
        })
    }

    /// `'var' type varName (',' varName)* ';'`
    pub fn compile_var_dec(&mut self) -> Result<()> {
        self.node(Nonterminal::VarDec, |p| {
            p.expect_keyword(&[Keyword::Var], "`var`")?;
            p.compile_type(false)?;
            p.expect_identifier("a variable name")?;
            p.compile_more_names()?;
            p.expect_symbol(';')
        })
    }

    // =========================================
    // Statements
    // =========================================

    /// `statement*`; stops at the first token that cannot start a statement
    pub fn compile_statements(&mut self) -> Result<()> {
        self.node(Nonterminal::Statements, |p| {
            loop {
                match p.tokens.keyword() {
                    Some(Keyword::Let) => p.compile_let()?,
                    Some(Keyword::If) => p.compile_if()?,
                    Some(Keyword::While) => p.compile_while()?,
                    Some(Keyword::Do) => p.compile_do()?,
                    Some(Keyword::Return) => p.compile_return()?,
                    _ => return Ok(()),
                }
            }
        })
    }

    /// `'let' varName ('[' expression ']')? '=' expression ';'`
    pub fn compile_let(&mut self) -> Result<()> {
        self.node(Nonterminal::LetStatement, |p| {
            p.expect_keyword(&[Keyword::Let], "`let`")?;
            p.expect_identifier("a variable name")?;
            if p.at_symbol('[') {
                p.emit_and_advance();
                p.compile_expression()?;
                p.expect_symbol(']')?;
            }
            p.expect_symbol('=')?;
            p.compile_expression()?;
            p.expect_symbol(';')
        })
    }

    /// `'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?`
    pub fn compile_if(&mut self) -> Result<()> {
        self.node(Nonterminal::IfStatement, |p| {
            p.expect_keyword(&[Keyword::If], "`if`")?;
            p.compile_condition()?;
            p.compile_block()?;
            if p.at_keyword(&[Keyword::Else]) {
                p.emit_and_advance();
                p.compile_block()?;
            }
            Ok(())
        })
    }

    /// `'while' '(' expression ')' '{' statements '}'`
    pub fn compile_while(&mut self) -> Result<()> {
        self.node(Nonterminal::WhileStatement, |p| {
            p.expect_keyword(&[Keyword::While], "`while`")?;
            p.compile_condition()?;
            p.compile_block()
        })
    }

    /// `'(' expression ')'`
    fn compile_condition(&mut self) -> Result<()> {
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')
    }

    /// `'{' statements '}'`
    fn compile_block(&mut self) -> Result<()> {
        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')
    }

    /// `'do' subroutineCall ';'`
    pub fn compile_do(&mut self) -> Result<()> {
        self.node(Nonterminal::DoStatement, |p| {
            p.expect_keyword(&[Keyword::Do], "`do`")?;
            p.compile_subroutine_call()?;
            p.expect_symbol(';')
        })
    }

    /// `'return' expression? ';'`
    pub fn compile_return(&mut self) -> Result<()> {
        self.node(Nonterminal::ReturnStatement, |p| {
            p.expect_keyword(&[Keyword::Return], "`return`")?;
            if !p.at_symbol(';') {
                p.compile_expression()?;
            }
            p.expect_symbol(';')
        })
    }

    // =========================================
    // Expressions
    // =========================================

    /// `term (op term)*`
    pub fn compile_expression(&mut self) -> Result<()> {
        self.node(Nonterminal::Expression, |p| {
            p.compile_term()?;
            while p.at_any_symbol(&BINARY_OPS) {
                p.emit_and_advance();
                p.compile_term()?;
            }
            Ok(())
        })
    }

    /// `integerConstant | stringConstant | keywordConstant | varName |
    /// varName '[' expression ']' | subroutineCall | '(' expression ')' |
    /// unaryOp term`
    pub fn compile_term(&mut self) -> Result<()> {
        self.node(Nonterminal::Term, |p| {
            let Some(token) = p.current() else {
                return Err(p.error(ErrorCode::UNEXPECTED_EOF, "an expression"));
            };

            match &token.kind {
                TokenKind::IntConst(_) | TokenKind::StringConst(_) => {
                    p.emit_and_advance();
                    Ok(())
                }
                TokenKind::Keyword(kw) if KEYWORD_CONSTANTS.contains(kw) => {
                    p.emit_and_advance();
                    Ok(())
                }
                TokenKind::Identifier(_) => p.compile_identifier_term(),
                TokenKind::Symbol('(') => {
                    p.emit_and_advance();
                    p.compile_expression()?;
                    p.expect_symbol(')')
                }
                TokenKind::Symbol(ch) if UNARY_OPS.contains(ch) => {
                    p.emit_and_advance();
                    p.compile_term()
                }
                _ => Err(p.error(ErrorCode::EXPECTED_EXPRESSION, "an expression")),
            }
        })
    }

    /// Chooses between variable, array element and call by looking at the
    /// token after the identifier. The identifier is consumed only after the
    /// choice is made.
    fn compile_identifier_term(&mut self) -> Result<()> {
        let next = self.tokens.peek_next().map(|t| &t.kind);

        match next {
            Some(TokenKind::Symbol('[')) => {
                self.emit_and_advance();
                self.emit_and_advance();
                self.compile_expression()?;
                self.expect_symbol(']')
            }
            Some(TokenKind::Symbol('(' | '.')) => self.compile_subroutine_call(),
            _ => {
                self.emit_and_advance();
                Ok(())
            }
        }
    }

    /// `subroutineName '(' expressionList ')' |
    /// (className | varName) '.' subroutineName '(' expressionList ')'`
    ///
    /// Emits no tag of its own.
    pub fn compile_subroutine_call(&mut self) -> Result<()> {
        self.expect_identifier("a subroutine, class or variable name")?;
        if self.at_symbol('.') {
            self.emit_and_advance();
            self.expect_identifier("a subroutine name")?;
        }
        self.expect_symbol('(')?;
        self.compile_expression_list()?;
        self.expect_symbol(')')
    }

    /// `(expression (',' expression)*)?`
    pub fn compile_expression_list(&mut self) -> Result<()> {
        self.node(Nonterminal::ExpressionList, |p| {
            if p.at_symbol(')') {
                return Ok(());
            }
            p.compile_expression()?;
            while p.at_symbol(',') {
                p.emit_and_advance();
                p.compile_expression()?;
            }
            Ok(())
        })
    }
}

/// Parses one class from `tokens`, sending events to `sink`.
///
/// Primes the stream if it has not been advanced yet.
pub fn compile_class<S: TagSink>(tokens: &mut TokenStream, sink: &mut S) -> Result<()> {
    if tokens.position().is_none() {
        tokens.advance();
    }
    CompilationEngine::new(tokens, sink).compile_class()
}
