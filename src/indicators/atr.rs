// =============================================================================
// Average True Range (ATR)
// =============================================================================
//
// True Range (TR) for each bar:
//   TR_0 = H_0 - L_0
//   TR_t = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is the EMA of the TR series (first-value seeded, see `ema.rs`), so the
// output has one value per bar.
//
// Default period: 14
// =============================================================================

use super::ema::calculate_ema;

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// Build the true-range series. The bar count follows `highs`; a missing low
/// or close at any index reads as 0.0.
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let at = |values: &[f64], i: usize| values.get(i).copied().unwrap_or(0.0);

    (0..highs.len())
        .map(|i| {
            let high = highs[i];
            let low = at(lows, i);
            let hl = high - low;
            if i == 0 {
                return hl;
            }
            let prev_close = at(closes, i - 1);
            hl.max((high - prev_close).abs()).max((low - prev_close).abs())
        })
        .collect()
}

/// Compute the ATR series.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - empty `highs` => empty vec
pub fn calculate_atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    calculate_ema(&true_range(highs, lows, closes), period)
}

/// Latest ATR as a fraction of the latest close (0.01 == 1 %).
///
/// Returns `None` when there is no data or the last close is zero.
pub fn calculate_atr_pct(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<f64> {
    let atr = *calculate_atr(highs, lows, closes, period).last()?;
    let last_close = *closes.last()?;
    if last_close == 0.0 {
        return None;
    }
    let pct = atr / last_close;
    pct.is_finite().then_some(pct)
}
