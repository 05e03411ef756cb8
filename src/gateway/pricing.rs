//! Static per-model price table, USD per 1M tokens

struct ModelPrice {
    model: &'static str,
    input: f64,
    output: f64,
}

static PRICES: &[ModelPrice] = &[
    ModelPrice {
        model: "gpt-4o",
        input: 2.50,
        output: 10.00,
    },
    ModelPrice {
        model: "gpt-4o-mini",
        input: 0.15,
        output: 0.60,
    },
    ModelPrice {
        model: "claude-sonnet-4-20250514",
        input: 3.00,
        output: 15.00,
    },
    ModelPrice {
        model: "text-embedding-3-small",
        input: 0.02,
        output: 0.0,
    },
];

/// Conservative default for models missing from the table
const DEFAULT_INPUT: f64 = 5.0;
const DEFAULT_OUTPUT: f64 = 15.0;

/// Monetary cost of one call
pub fn cost_usd(model: &str, input_tokens: u32, output_tokens: u32) -> f64 {
    let (input, output) = PRICES
        .iter()
        .find(|p| p.model == model)
        .map(|p| (p.input, p.output))
        .unwrap_or((DEFAULT_INPUT, DEFAULT_OUTPUT));
    (f64::from(input_tokens) * input + f64::from(output_tokens) * output) / 1_000_000.0
}
