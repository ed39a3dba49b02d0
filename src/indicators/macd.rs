// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
//   macd_line  = EMA(fast) - EMA(slow)
//   signal     = EMA(macd_line, signal_period)
//   histogram  = macd_line - signal
//
// Built on `calculate_ema`, which never shortens its input, so all three
// series have the same length as the closes.
// =============================================================================

use serde::Serialize;

use super::ema::calculate_ema;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Three parallel series, one value per input close.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacdResult {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdResult {
    pub fn len(&self) -> usize {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }
}

/// Compute MACD for `closes`.
///
/// A zero period degrades the corresponding EMA to nothing; missing EMA
/// values are read as 0.0 so the output length still follows the input.
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdResult {
    let ema_fast = calculate_ema(closes, fast);
    let ema_slow = calculate_ema(closes, slow);

    let macd_line: Vec<f64> = (0..closes.len())
        .map(|i| ema_fast.get(i).copied().unwrap_or(0.0) - ema_slow.get(i).copied().unwrap_or(0.0))
        .collect();

    let signal_line = calculate_ema(&macd_line, signal);

    let histogram = macd_line
        .iter()
        .enumerate()
        .map(|(i, m)| m - signal_line.get(i).copied().unwrap_or(0.0))
        .collect();

    MacdResult {
        macd_line,
        signal_line,
        histogram,
    }
}
