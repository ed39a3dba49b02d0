// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Formula:
//   k      = 2 / (period + 1)
//   EMA_0  = close_0
//   EMA_t  = close_t * k + EMA_{t-1} * (1 - k)
//
// The recursion is seeded with the first raw value rather than an SMA warm-up.
// This biases the early tail, and MACD and ATR inherit the bias. The output
// has exactly one value per input, with no warm-up gap.
// =============================================================================

/// Compute the EMA series for `values` and look-back `period`.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - empty input => empty vec
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    if period == 0 {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len());
    result.push(first);

    let mut prev = first;
    for &value in &values[1..] {
        prev = value * k + prev * (1.0 - k);
        result.push(prev);
    }

    result
}
