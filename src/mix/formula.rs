//! Chemical formula tokenizer.
//!
//! A formula is a concatenation of `ElementSymbol[Count]` tokens: one capital
//! letter, an optional lowercase letter, an optional positive count
//! (default 1). Anything the tokenizer cannot consume fails the whole parse.

use super::error::Error;

/// Splits a formula into (symbol, count) tokens in input order.
pub(crate) fn parse(formula: &str) -> Result<Vec<(String, u32)>, Error> {
    let mut tokens = Vec::new();
    let mut chars = formula.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if !c.is_ascii_uppercase() {
            return Err(Error::invalid_formula(
                formula,
                format!("unexpected character '{}' at offset {}", c, pos),
            ));
        }

        let mut symbol = String::from(c);
        if let Some((_, lower)) = chars.next_if(|(_, c)| c.is_ascii_lowercase()) {
            symbol.push(lower);
        }

        let mut digits = String::new();
        while let Some((_, d)) = chars.next_if(|(_, c)| c.is_ascii_digit()) {
            digits.push(d);
        }

        let count = if digits.is_empty() {
            1
        } else {
            let n: u32 = digits.parse().map_err(|_| {
                Error::invalid_formula(formula, format!("count '{}' out of range", digits))
            })?;
            if n == 0 {
                return Err(Error::invalid_formula(
                    formula,
                    format!("zero count for element '{}'", symbol),
                ));
            }
            n
        };

        tokens.push((symbol, count));
    }

    if tokens.is_empty() {
        return Err(Error::invalid_formula(formula, "empty formula"));
    }

    Ok(tokens)
}
