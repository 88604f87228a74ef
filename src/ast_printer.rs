use crate::expr::Expr;

/// Converts an expression to the parenthesized prefix form used for
/// canonical output, e.g. `(* (group (+ 1.0 2.0)) 3.0)`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr<'_>) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(lit) => lit.to_string(),

            // ── grouping ────────────────────────────────────────────────
            Expr::Grouping(inner) => format!("(group {})", Self::print(inner)),

            // ── unary operator ──────────────────────────────────────────
            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, Self::print(right))
            }

            // ── binary operator ─────────────────────────────────────────
            Expr::Binary {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                Self::print(left),
                Self::print(right)
            ),
        }
    }

    /// Like [`print`](Self::print), but an absent tree renders as `""`.
    pub fn print_opt(expr: Option<&Expr<'_>>) -> String {
        expr.map(Self::print).unwrap_or_default()
    }
}

/// Render a number the way literals are printed: integral values get exactly
/// one decimal digit (`45` → `45.0`).  Everything else uses the shortest
/// round‑trippable digits in general form: plain (`45.67`) while the decimal
/// exponent is in `-4..6`, scientific with a signed two‑digit exponent
/// otherwise (`1.2345675e+06`, `1e-05`).  Infinities print as `+Inf`/`-Inf`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }

    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
    }

    if n.fract() != 0.0 {
        return format_general(n);
    }

    // Integral and exactly representable as i64: take the fast path.
    if n.abs() < 9_007_199_254_740_992.0 {
        let mut buf = itoa::Buffer::new();
        let mut out = String::from(buf.format(n as i64));
        if n == 0.0 && n.is_sign_negative() {
            out.insert(0, '-');
        }
        out.push_str(".0");
        return out;
    }

    format!("{:.1}", n)
}

/// Shortest digits of a finite, non‑integral `n` in general form.
fn format_general(n: f64) -> String {
    // `{:e}` yields the shortest round‑trip mantissa, e.g. `1.2345675e6`.
    let sci: String = format!("{:e}", n);

    let Some((mantissa, exp)) = sci.split_once('e') else {
        return n.to_string();
    };

    let Ok(exp) = exp.parse::<i32>() else {
        return n.to_string();
    };

    if (-4..6).contains(&exp) {
        return n.to_string();
    }

    let sign: char = if exp < 0 { '-' } else { '+' };

    format!("{}e{}{:02}", mantissa, sign, exp.abs())
}
