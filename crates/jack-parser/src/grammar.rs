//! Nonterminals and operator sets of the Jack grammar

use jack_lexer::Keyword;
use std::fmt;

/// Binary operators accepted between terms
pub const BINARY_OPS: [char; 9] = ['+', '-', '*', '/', '&', '|', '<', '>', '='];

/// Prefix operators of a term
pub const UNARY_OPS: [char; 2] = ['-', '~'];

/// Keywords usable as a term
pub const KEYWORD_CONSTANTS: [Keyword; 4] =
    [Keyword::True, Keyword::False, Keyword::Null, Keyword::This];

/// Primitive types; any identifier is also accepted as a class type
pub const PRIMITIVE_TYPES: [Keyword; 3] = [Keyword::Int, Keyword::Char, Keyword::Boolean];

pub const CLASS_VAR_KINDS: [Keyword; 2] = [Keyword::Static, Keyword::Field];

pub const SUBROUTINE_KINDS: [Keyword; 3] =
    [Keyword::Constructor, Keyword::Function, Keyword::Method];

/// Grammar rules that render as a tag pair.
///
/// `subroutineCall`, `type` and the statement alternation have no tag of
/// their own; their tokens appear inline in the enclosing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Nonterminal {
    pub fn tag_name(&self) -> &'static str {
        match self {
            Nonterminal::Class => "class",
            Nonterminal::ClassVarDec => "classVarDec",
            Nonterminal::SubroutineDec => "subroutineDec",
            Nonterminal::ParameterList => "parameterList",
            Nonterminal::SubroutineBody => "subroutineBody",
            Nonterminal::VarDec => "varDec",
            Nonterminal::Statements => "statements",
            Nonterminal::LetStatement => "letStatement",
            Nonterminal::IfStatement => "ifStatement",
            Nonterminal::WhileStatement => "whileStatement",
            Nonterminal::DoStatement => "doStatement",
            Nonterminal::ReturnStatement => "returnStatement",
            Nonterminal::Expression => "expression",
            Nonterminal::Term => "term",
            Nonterminal::ExpressionList => "expressionList",
        }
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}
