//! Human-facing cost estimate for a written corpus.

use std::fmt;

/// Training price in USD per million tokens.
pub const PRICE_PER_MILLION_TOKENS: f64 = 3.0;

/// Token totals scaled by epoch count, and what they would cost.
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate<'a> {
    pub model_name: &'a str,
    pub tokens: usize,
    pub epochs: u32,
    pub scaled_tokens: usize,
    /// Estimated cost in USD.
    pub estimated_cost: f64,
}

impl<'a> CostEstimate<'a> {
    pub fn new(model_name: &'a str, tokens: usize, epochs: u32) -> Self {
        let scaled_tokens = tokens.saturating_mul(epochs as usize);
        Self {
            model_name,
            tokens,
            epochs,
            scaled_tokens,
            estimated_cost: PRICE_PER_MILLION_TOKENS / 1_000_000.0 * scaled_tokens as f64,
        }
    }
}

impl fmt::Display for CostEstimate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total tokens: {}", group_thousands(self.tokens))?;
        writeln!(
            f,
            "Total tokens for {} epoch(s): {}",
            self.epochs,
            group_thousands(self.scaled_tokens)
        )?;
        writeln!(
            f,
            "Expected cost when trained with {}: ${:.2}",
            self.model_name, self.estimated_cost
        )?;
        write!(
            f,
            "NOTE: Token values are approximate and may not be exact, please keep this in mind when using the data."
        )
    }
}

/// Format `n` with `,` between groups of three digits.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
