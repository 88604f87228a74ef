use serde::Serialize;
use std::fmt;

use crate::ast_printer::AstPrinter;
use crate::token::{LiteralValue, Token};

/// **Abstract‑Syntax‑Tree node** for an expression.
///
/// Child expressions are owned through `Box`, so every parse yields a fresh
/// tree with no shared nodes.  Operator tokens are borrowed from the token
/// sequence the tree was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr<'a> {
    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal(LiteralValue),

    /// Prefix unary operator expression
    /// *Example:* `!ready` or `-42`
    Unary {
        /// The operator token (`!` or `-`).
        operator: &'a Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// Infix binary operator expression
    /// *Example:* `a + b`, `x <= y`
    Binary {
        left: Box<Expr<'a>>,
        /// Equality, comparison, additive or multiplicative operator.
        operator: &'a Token<'a>,
        right: Box<Expr<'a>>,
    },

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Grouping(Box<Expr<'a>>),
}

impl<'a> Expr<'a> {
    /// Line of the operator anchoring this node, if it has one.
    /// Literals carry no position.
    pub fn line(&self) -> Option<usize> {
        match self {
            Expr::Literal(_) => None,

            Expr::Unary { operator, .. } => Some(operator.line),

            Expr::Binary { operator, .. } => Some(operator.line),

            Expr::Grouping(inner) => inner.line(),
        }
    }
}

impl<'a> fmt::Display for Expr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AstPrinter::print(self))
    }
}
