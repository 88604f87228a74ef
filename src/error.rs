//! Error hierarchy for the **Lox front end**.
//!
//! Two independent taxonomies exist:
//!
//! * [`LexError`] ‑ produced by the scanner.  Non‑fatal: the scanner records
//!   it and keeps going so that every lexical error in a file is reported.
//! * [`ParseError`] ‑ produced by the parser.  Fatal: the first one aborts
//!   the parse and no partial tree is returned.
//!
//! [`LoxError`] wraps both (plus I/O and UTF‑8 failures) for callers that
//! want a single error type, and converts cleanly into `anyhow::Error`.
//!
//! The module **does not** print diagnostics itself; `Display` of every
//! variant is the exact single‑line diagnostic text.

use std::io;
use thiserror::Error;

use log::debug;

use crate::token::{Token, TokenType};

/// A lexical error.  Carries the 1‑based line the scanner was on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token.
    #[error("[line {line}] Error: Unexpected character: {ch}")]
    UnexpectedCharacter { ch: char, line: usize },

    /// End of input reached before the closing `"`.
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },
}

impl LexError {
    /// Helper constructor for an unexpected character.
    pub fn unexpected(line: usize, ch: char) -> Self {
        debug!("Creating Lex error: line={}, unexpected={:?}", line, ch);

        LexError::UnexpectedCharacter { ch, line }
    }

    /// Helper constructor for an unterminated string literal.
    pub fn unterminated_string(line: usize) -> Self {
        debug!("Creating Lex error: line={}, unterminated string", line);

        LexError::UnterminatedString { line }
    }

    /// Source line the error was reported on.
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. } | LexError::UnterminatedString { line } => {
                *line
            }
        }
    }
}

/// A syntactic error: the offending token and what the grammar expected.
///
/// The lexeme is copied out of the token so the error does not borrow the
/// source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error{}: {message}", location(.token_type, .lexeme))]
pub struct ParseError {
    /// Kind of the offending token.
    pub token_type: TokenType,

    /// Lexeme of the offending token (empty for EOF).
    pub lexeme: String,

    /// 1‑based line of the offending token.
    pub line: usize,

    /// Expectation text, e.g. `Expect expression.`
    pub message: String,
}

impl ParseError {
    /// Build an error pointing at `token`.
    pub fn at<S: Into<String>>(token: &Token<'_>, msg: S) -> Self {
        let message: String = msg.into();

        debug!(
            "Creating Parse error: line={}, token={:?}, msg={}",
            token.line, token.lexeme, message
        );

        ParseError {
            token_type: token.token_type,
            lexeme: token.lexeme.to_owned(),
            line: token.line,
            message,
        }
    }
}

fn location(token_type: &TokenType, lexeme: &str) -> String {
    if *token_type == TokenType::EOF {
        " at end".to_owned()
    } else {
        format!(" at '{}'", lexeme)
    }
}

/// Canonical umbrella error for callers driving the whole pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Syntactic (parser) error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),

    /// JSON rendering of tokens or trees failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LoxError {
    /// `true` for errors caused by malformed Lox source rather than by the
    /// environment (I/O, encoding, output).
    pub fn is_source_error(&self) -> bool {
        matches!(self, LoxError::Lex(_) | LoxError::Parse(_))
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
