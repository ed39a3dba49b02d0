// =============================================================================
// Bollinger Bands
// =============================================================================
//
// For every window of `period` closes:
//   middle = SMA
//   σ      = population standard deviation (divide by `period`)
//   upper  = middle + multiplier * σ
//   lower  = middle - multiplier * σ
//
// One band per full window, so the series is aligned to the tail of the input
// and has `N - period + 1` entries.

use serde::Serialize;

use super::sma::calculate_sma;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Bands for a single aligned index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerBand {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

impl BollingerBand {
    /// Where `price` sits inside the band: 0.0 at the lower band, 1.0 at the
    /// upper band. A zero-width band yields NaN (or ±inf), which compares
    /// false against any threshold.
    pub fn position(&self, price: f64) -> f64 {
        (price - self.lower) / (self.upper - self.lower)
    }
}

/// Calculate the Bollinger Band series for `closes`.
///
/// Returns an empty vec when `period == 0` or there are fewer than `period`
/// closes.
pub fn calculate_bollinger(closes: &[f64], period: usize, multiplier: f64) -> Vec<BollingerBand> {
    let means = calculate_sma(closes, period);
    let period_f = period as f64;

    closes
        .windows(period.max(1))
        .zip(means)
        .map(|(window, middle)| {
            let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period_f;
            let std_dev = variance.sqrt();
            BollingerBand {
                middle,
                upper: middle + multiplier * std_dev,
                lower: middle - multiplier * std_dev,
            }
        })
        .collect()
}
