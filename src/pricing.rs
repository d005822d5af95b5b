//! Static price table and cost estimation.
//!
//! Costs are estimated from total token usage with the average of a model's
//! input and output rates; the split between prompt and completion tokens is
//! not tracked, so the estimate is deliberately coarse.

use std::collections::HashMap;
use lazy_static::lazy_static;

/// USD per 1M tokens, split by direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPrice {
    pub input: f64,
    pub output: f64,
}

impl ModelPrice {
    /// Average of the input and output rates.
    #[inline]
    pub fn average(&self) -> f64 {
        (self.input + self.output) / 2.0
    }
}

lazy_static! {
    /// const map from model name to its USD rates per 1M tokens.
    pub static ref MODEL_PRICING: HashMap<&'static str, ModelPrice> = HashMap::from([
        ("gpt-3.5-turbo", ModelPrice { input: 0.50, output: 1.50 }),
        ("gpt-4", ModelPrice { input: 30.00, output: 60.00 }),
        ("gpt-4-turbo", ModelPrice { input: 10.00, output: 30.00 }),
    ]);
}

/// Fallback rate (USD per 1M tokens) for models missing from [MODEL_PRICING].
pub const DEFAULT_PRICE_PER_MILLION: f64 = 1.00;

/// Estimated USD cost of `tokens` total tokens on `model`, rounded to 6 decimal
/// places. Unknown models fall back to [DEFAULT_PRICE_PER_MILLION].
pub fn cost(tokens: u32, model: &str) -> f64 {
    let per_million = MODEL_PRICING
        .get(model)
        .map_or(DEFAULT_PRICE_PER_MILLION, ModelPrice::average);
    round_usd(tokens as f64 / 1_000_000.0 * per_million)
}

/// Round a USD amount to 6 decimal places.
#[inline]
pub fn round_usd(amount: f64) -> f64 {
    (amount * 1e6).round() / 1e6
}

#[cfg(test)]
mod test_pricing {
    use super::{cost, round_usd};

    #[test]
    fn test_known_model_average_rate() {
        // (0.50 + 1.50) / 2 = 1.00 per 1M tokens
        assert_eq!(1.0, cost(1_000_000, "gpt-3.5-turbo"));
        assert_eq!(0.045, cost(1_000, "gpt-4"));
        assert_eq!(0.00002, cost(1, "gpt-4-turbo"));
    }

    #[test]
    fn test_zero_tokens_cost_nothing() {
        assert_eq!(0.0, cost(0, "gpt-3.5-turbo"));
        assert_eq!(0.0, cost(0, "no-such-model"));
    }

    #[test]
    fn test_unknown_model_falls_back() {
        assert_eq!(1.0, cost(1_000_000, "no-such-model"));
        assert_eq!(0.5, cost(500_000, "no-such-model"));
    }

    #[test]
    fn test_monotone_and_deterministic() {
        let mut previous = 0.0;
        for tokens in [0u32, 1, 10, 1_000, 50_000, 2_000_000] {
            let now = cost(tokens, "gpt-3.5-turbo");
            assert!(now >= previous);
            assert!(now >= 0.0);
            assert_eq!(now, cost(tokens, "gpt-3.5-turbo"));
            previous = now;
        }
    }

    #[test]
    fn test_rounding() {
        assert_eq!(0.000001, cost(1, "gpt-3.5-turbo"));
        assert_eq!(1.234568, round_usd(1.23456789));
    }
}
