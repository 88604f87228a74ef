use log::debug;
use serde::Serialize;
use std::fmt;

use crate::ast_printer::format_number;

/// The different kinds of tokens recognized by the Lox scanner.
///
/// Every variant is payload free; decoded values of `STRING` and `NUMBER`
/// tokens live in [`Token::literal`].  The `Display` form is the variant
/// name, which is also the first column of the `tokenize` output.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// ','
    COMMA,

    /// '.'
    DOT,

    /// '-'
    MINUS,

    /// '+'
    PLUS,

    /// ';'
    SEMICOLON,

    /// '/'
    SLASH,

    /// '*'
    STAR,

    /// '!'
    BANG,

    /// '!='
    BANG_EQUAL,

    /// '='
    EQUAL,

    /// '=='
    EQUAL_EQUAL,

    /// '>'
    GREATER,

    /// '>='
    GREATER_EQUAL,

    /// '<'
    LESS,

    /// '<='
    LESS_EQUAL,

    /// A user‑defined identifier
    IDENTIFIER,

    /// A string literal
    STRING,

    /// A numeric literal
    NUMBER,

    /// 'and'
    AND,

    /// 'class'
    CLASS,

    /// 'else'
    ELSE,

    /// 'false'
    FALSE,

    /// 'fun'
    FUN,

    /// 'for'
    FOR,

    /// 'if'
    IF,

    /// 'nil'
    NIL,

    /// 'or'
    OR,

    /// 'print'
    PRINT,

    /// 'return'
    RETURN,

    /// 'super'
    SUPER,

    /// 'this'
    THIS,

    /// 'true'
    TRUE,

    /// 'var'
    VAR,

    /// 'while'
    WHILE,

    /// End‑of‑file marker
    EOF,
}

impl TokenType {
    /// Upper‑case kind name as printed by the `tokenize` command.
    pub const fn name(self) -> &'static str {
        match self {
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::LEFT_BRACE => "LEFT_BRACE",
            TokenType::RIGHT_BRACE => "RIGHT_BRACE",
            TokenType::COMMA => "COMMA",
            TokenType::DOT => "DOT",
            TokenType::MINUS => "MINUS",
            TokenType::PLUS => "PLUS",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::SLASH => "SLASH",
            TokenType::STAR => "STAR",
            TokenType::BANG => "BANG",
            TokenType::BANG_EQUAL => "BANG_EQUAL",
            TokenType::EQUAL => "EQUAL",
            TokenType::EQUAL_EQUAL => "EQUAL_EQUAL",
            TokenType::GREATER => "GREATER",
            TokenType::GREATER_EQUAL => "GREATER_EQUAL",
            TokenType::LESS => "LESS",
            TokenType::LESS_EQUAL => "LESS_EQUAL",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::STRING => "STRING",
            TokenType::NUMBER => "NUMBER",
            TokenType::AND => "AND",
            TokenType::CLASS => "CLASS",
            TokenType::ELSE => "ELSE",
            TokenType::FALSE => "FALSE",
            TokenType::FUN => "FUN",
            TokenType::FOR => "FOR",
            TokenType::IF => "IF",
            TokenType::NIL => "NIL",
            TokenType::OR => "OR",
            TokenType::PRINT => "PRINT",
            TokenType::RETURN => "RETURN",
            TokenType::SUPER => "SUPER",
            TokenType::THIS => "THIS",
            TokenType::TRUE => "TRUE",
            TokenType::VAR => "VAR",
            TokenType::WHILE => "WHILE",
            TokenType::EOF => "EOF",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded constant.  Attached to `STRING` / `NUMBER` tokens and reused
/// as the payload of [`Expr::Literal`](crate::expr::Expr::Literal).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// `true` / `false`.
    Bool(bool),

    /// Numeric literal, stored as IEEE‑754 `f64`.  `3` is stored as `3.0`.
    Number(f64),

    /// String literal without surrounding quotes, no escape processing.
    Str(String),

    /// The `nil` literal.
    Nil,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Bool(b) => write!(f, "{}", b),

            LiteralValue::Number(n) => f.write_str(&format_number(*n)),

            LiteralValue::Str(s) => f.write_str(s),

            LiteralValue::Nil => f.write_str("nil"),
        }
    }
}

/// A scanned token, including its type, the original lexeme,
/// the decoded literal (strings and numbers only) and the line number
/// where it was found.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token<'a> {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// Decoded value; `Some` only for `STRING` and `NUMBER`.
    pub literal: Option<LiteralValue>,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Create a new token without a literal payload.
    pub fn new(token_type: TokenType, lexeme: &'a str, line: usize) -> Self {
        debug!(
            "Creating new token: type={:?}, lexeme={}, line={}",
            token_type, lexeme, line
        );

        Self {
            token_type,
            lexeme,
            literal: None,
            line,
        }
    }

    /// Create a `STRING` or `NUMBER` token carrying its decoded value.
    pub fn with_literal(
        token_type: TokenType,
        lexeme: &'a str,
        literal: LiteralValue,
        line: usize,
    ) -> Self {
        debug!(
            "Creating new literal token: type={:?}, lexeme={}, literal={:?}, line={}",
            token_type, lexeme, literal, line
        );

        Self {
            token_type,
            lexeme,
            literal: Some(literal),
            line,
        }
    }

    /// The synthetic end‑of‑input marker.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenType::EOF, "", line)
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.token_type, &self.literal) {
            (TokenType::STRING | TokenType::NUMBER, Some(literal)) => {
                write!(f, "{} {} {}", self.token_type, self.lexeme, literal)
            }

            _ => write!(f, "{} {} null", self.token_type, self.lexeme),
        }
    }
}
