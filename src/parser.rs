/*!
Recursive‑descent parser for single Lox expressions.

Grammar (lowest precedence first, every binary level left‑associative)
-----------------------------------------------------------------------

```text
expression     → equality ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
term           → factor ( ( "-" | "+" ) factor )* ;
factor         → unary ( ( "/" | "*" ) unary )* ;
unary          → ( "!" | "-" ) unary | primary ;
primary        → NUMBER | STRING | "true" | "false" | "nil"
               | "(" expression ")" ;
```

Each rule is one method.  The grammar is LL(1): the cursor only moves
forward and nothing is ever re‑parsed.

### Error policy

There is no synchronisation.  The first violation is returned as a
[`ParseError`] pointing at the offending token, and every rule propagates
it with `?`, so no partial tree escapes.

### Logging Policy

| Location                     | Level  | Purpose                                    |
|------------------------------|--------|--------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                      |
| binary folds, `unary`        | `debug`| Operator consumed at a precedence level.   |
| Error paths (`consume`, etc.)| `debug`| Context before returning structured error. |
*/

use crate::error::ParseError;
use crate::expr::Expr;
use crate::token::{LiteralValue, Token, TokenType};

use log::{debug, info};

type Result<T> = std::result::Result<T, ParseError>;

/// Parse `tokens` (which must end with `EOF`) as one expression.
pub fn parse<'a>(tokens: &'a [Token<'a>]) -> Result<Expr<'a>> {
    Parser::new(tokens).parse()
}

/// Expression parser over an immutable slice of tokens.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser.  `tokens` is expected to come from the
    /// scanner and therefore to end with an `EOF` token.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        Self { tokens, current: 0 }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse one expression starting at the first token.  Tokens after the
    /// expression are left unconsumed.
    pub fn parse(&mut self) -> Result<Expr<'a>> {
        info!("Beginning parse phase");

        let expr = self.expression()?;

        info!("Parsed expression, {} tokens consumed", self.current);

        Ok(expr)
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        self.binary_level(
            &[TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        self.binary_level(
            &[
                TokenType::GREATER,
                TokenType::GREATER_EQUAL,
                TokenType::LESS,
                TokenType::LESS_EQUAL,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        self.binary_level(&[TokenType::MINUS, TokenType::PLUS], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        self.binary_level(&[TokenType::SLASH, TokenType::STAR], Self::unary)
    }

    /// One left‑associative precedence level: an `operand`, then any number
    /// of `operators operand` pairs folded leftwards into `Binary` nodes.
    fn binary_level(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> Result<Expr<'a>>,
    ) -> Result<Expr<'a>> {
        let mut expr: Expr<'a> = operand(self)?;

        while self.matches(operators) {
            let operator: &'a Token<'a> = self.previous();
            debug!("Binary operator {} on line {}", operator.lexeme, operator.line);

            let right: Expr<'a> = operand(self)?;

            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if self.matches(&[TokenType::BANG, TokenType::MINUS]) {
            let operator: &'a Token<'a> = self.previous();
            debug!("Unary operator {} on line {}", operator.lexeme, operator.line);

            let right: Expr<'a> = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        if self.matches(&[TokenType::FALSE]) {
            return Ok(Expr::Literal(LiteralValue::Bool(false)));
        }
        if self.matches(&[TokenType::TRUE]) {
            return Ok(Expr::Literal(LiteralValue::Bool(true)));
        }
        if self.matches(&[TokenType::NIL]) {
            return Ok(Expr::Literal(LiteralValue::Nil));
        }

        if self.matches(&[TokenType::NUMBER, TokenType::STRING]) {
            let token: &'a Token<'a> = self.previous();

            return match &token.literal {
                Some(literal) => Ok(Expr::Literal(literal.clone())),
                None => {
                    debug!("Literal token without a decoded value: {:?}", token);
                    Err(ParseError::at(token, "Expect expression."))
                }
            };
        }

        if self.matches(&[TokenType::LEFT_PAREN]) {
            let expr: Expr<'a> = self.expression()?;

            self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;

            return Ok(Expr::Grouping(Box::new(expr)));
        }

        debug!("No expression starts at {:?}", self.peek());

        Err(ParseError::at(self.peek(), "Expect expression."))
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn matches(&mut self, types: &[TokenType]) -> bool {
        if types.iter().any(|&tt| self.check(tt)) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<&'a Token<'a>> {
        if self.check(ttype) {
            return Ok(self.advance());
        }

        debug!("Expected {} but found {:?}", ttype, self.peek());

        Err(ParseError::at(self.peek(), message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    #[inline(always)]
    fn advance(&mut self) -> &'a Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::EOF
    }

    /// Current token.  A slice without a trailing `EOF` behaves as if it
    /// had one.
    #[inline(always)]
    fn peek(&self) -> &'a Token<'a> {
        match self.tokens.get(self.current) {
            Some(token) => token,
            None => &SYNTHETIC_EOF,
        }
    }

    #[inline(always)]
    fn previous(&self) -> &'a Token<'a> {
        &self.tokens[self.current - 1]
    }
}

static SYNTHETIC_EOF: Token<'static> = Token {
    token_type: TokenType::EOF,
    lexeme: "",
    literal: None,
    line: 0,
};
