//! Module `scanner` implements a one‑pass lexer for the Lox expression language.
//!
//! It transforms a source string into a sequence of `Token<'a>`s, skipping whitespace
//! and comments, and emitting exactly one `EOF` token at the end. The engine is a
//! `FusedIterator` yielding one item per token *or* per lexical error, so that a single
//! pass reports every lexical error instead of stopping at the first one.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a new lexer over the input buffer.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token<'a>, LexError>` on each `.next()`.
//!
//! - `Scanner::scan_tokens(self) -> Scanned<'a>` / [`scan`]
//!   Drain the iterator into the full token vector plus every recorded error.
//!
//! # Token Recognition (`scan_token`)
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `.`, `-`, `+`, `;`, `*`.
//! - One‑or‑two character operators: `!`, `!=`, `=`, `==`, `<`, `<=`, `>`, `>=`.
//! - `/` or a `//` comment running to the end of the physical line.
//! - String literals: `"` … `"`, may span lines, no escapes.
//! - Numeric literals: a digit run with an optional `.digits` fraction. A `.` that is
//!   not followed by a digit is left for the next token (`12.` → `NUMBER DOT`).
//! - Identifiers/keywords: alphanumeric/_ sequences, resolved via a perfect‑hash `KEYWORDS` map.
//! - Anything else is reported as `LexError::UnexpectedCharacter` and skipped.
//!
//! # Example
//!
//! ```rust
//! use lox_frontend::scanner::Scanner;
//!
//! let scanned = Scanner::new("1 + 2 // sum").scan_tokens();
//! assert!(!scanned.had_error());
//! assert_eq!(scanned.tokens.len(), 4);
//! ```

use crate::error::LexError;
use crate::token::{LiteralValue, Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"print"  => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

/// Result of draining a [`Scanner`]: every token in source order (always
/// ending with `EOF`) and every lexical error in the order it was met.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned<'a> {
    pub tokens: Vec<Token<'a>>,
    pub errors: Vec<LexError>,
}

impl<'a> Scanned<'a> {
    /// `true` if any lexical error was reported; the token stream is then
    /// unreliable for further compilation.
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Scan `src` to completion.  Never fails; lexical errors are collected.
pub fn scan(src: &str) -> Scanned<'_> {
    Scanner::new(src).scan_tokens()
}

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    text: &'a str,              // entire source, for lexeme slicing
    src: &'a [u8],              // same buffer viewed as bytes
    start: usize,               // index of the *first* byte of the current lexeme
    curr: usize,                // index *one past* the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    start_line: usize,          // line of the first byte of the current lexeme
    pending: Option<TokenType>, // recognised token kind waiting to be emitted
    literal: Option<LiteralValue>,
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            text: src,
            src: src.as_bytes(),
            start: 0,
            curr: 0,
            line: 1,
            start_line: 1,
            pending: None,
            literal: None,
        }
    }

    /// Run the scanner to the end, keeping tokens and errors apart.
    pub fn scan_tokens(self) -> Scanned<'a> {
        let mut tokens: Vec<Token<'a>> = Vec::new();
        let mut errors: Vec<LexError> = Vec::new();

        for item in self {
            match item {
                Ok(token) => tokens.push(token),
                Err(e) => errors.push(e),
            }
        }

        info!(
            "Scan finished: {} tokens, {} errors",
            tokens.len(),
            errors.len()
        );

        Scanned { tokens, errors }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    /// Return the length of the input slice.
    #[inline(always)]
    const fn len(&self) -> usize {
        self.src.len()
    }

    /// Are we at (or past) the end of input?
    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.src[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.src[self.curr]
        }
    }

    /// Peek one byte beyond [`peek`].  Safe at EOF.
    #[inline(always)]
    fn peek_next(&self) -> u8 {
        if self.curr + 1 >= self.len() {
            0
        } else {
            self.src[self.curr + 1]
        }
    }

    /// Conditionally consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Pick the two‑character kind if the next byte is `=`.
    #[inline(always)]
    fn either(&mut self, with_equal: TokenType, alone: TokenType) -> TokenType {
        if self.match_byte(b'=') {
            with_equal
        } else {
            alone
        }
    }

    /// Current lexeme.  Lexeme bounds always fall on ASCII bytes, hence on
    /// char boundaries.
    #[inline(always)]
    fn lexeme(&self) -> &'a str {
        &self.text[self.start..self.curr]
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.curr`.  If it produces an
    /// actual token the kind is stored in `self.pending`.  Whitespace and
    /// comments are skipped by returning `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<(), LexError> {
        let b = self.advance();

        let tt = match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b'-' => TokenType::MINUS,
            b'+' => TokenType::PLUS,
            b';' => TokenType::SEMICOLON,
            b'*' => TokenType::STAR,

            // ── one‑or‑two character operators ───────────────────────────
            b'!' => self.either(TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.either(TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.either(TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.either(TokenType::GREATER_EQUAL, TokenType::GREATER),

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => return Ok(()),

            b'\n' => {
                self.line += 1;

                return Ok(());
            }

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    // Stop *before* the newline so the main loop counts it.
                    match memchr(b'\n', &self.src[self.curr..]) {
                        Some(pos) => self.curr += pos,
                        None => self.curr = self.len(),
                    }

                    return Ok(());
                }

                TokenType::SLASH
            }

            b'"' => return self.string(),

            b'0'..=b'9' => {
                self.number();
                return Ok(());
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.identifier();
                return Ok(());
            }

            // ── unexpected character ─────────────────────────────────────
            _ => {
                // Report the whole scalar value for non‑ASCII input.
                let ch: char = self.text[self.start..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);

                self.curr = self.start + ch.len_utf8();

                return Err(LexError::unexpected(self.line, ch));
            }
        };

        self.pending = Some(tt);

        Ok(())
    }

    /// Scan a double‑quoted string literal.
    ///
    /// * `self.start` still points to the opening `"`.
    /// * On success `self.curr` points **past** the closing `"`.
    fn string(&mut self) -> Result<(), LexError> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(LexError::unterminated_string(self.line));
        }

        self.advance(); // closing quote

        let value: &str = &self.text[self.start + 1..self.curr - 1];

        self.pending = Some(TokenType::STRING);
        self.literal = Some(LiteralValue::Str(value.to_owned()));

        Ok(())
    }

    /// Scan a numeric literal (`123`, `3.14`).  Fractions are optional.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Only ASCII digits and one interior '.'; overflow parses as infinity.
        let n: f64 = match self.lexeme().parse::<f64>() {
            Ok(n) => n,
            Err(e) => {
                debug!("Number {:?} failed to parse ({}), using 0", self.lexeme(), e);
                0.0
            }
        };

        self.pending = Some(TokenType::NUMBER);
        self.literal = Some(LiteralValue::Number(n));
    }

    /// Scan an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.src[self.start..self.curr];

        let tt: TokenType = KEYWORDS
            .get(slice)
            .copied()
            .unwrap_or(TokenType::IDENTIFIER);

        self.pending = Some(tt);
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Loop until we either emit a token, hit EOF, or see an error.
        while self.curr <= self.len() {
            // 1. EOF guard – emit exactly one EOF then terminate.
            if self.curr == self.len() {
                self.curr += 1; // fused from here on
                return Some(Ok(Token::eof(self.line)));
            }

            // 2. Reset per‑lexeme state.
            self.start = self.curr;
            self.start_line = self.line;
            self.pending = None;
            self.literal = None;

            // 3. Attempt to scan a lexeme.
            if let Err(e) = self.scan_token() {
                debug!("Lexical error: {}", e);
                return Some(Err(e));
            }

            // 4. If a real token was recognised, build and return it.
            if let Some(tt) = self.pending.take() {
                let lexeme: &'a str = self.lexeme();
                debug!("Scanned token ({:?}) on line {}", tt, self.start_line);

                let token = match self.literal.take() {
                    Some(literal) => Token::with_literal(tt, lexeme, literal, self.start_line),
                    None => Token::new(tt, lexeme, self.start_line),
                };

                return Some(Ok(token));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        None // already yielded EOF
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
