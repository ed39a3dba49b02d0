// =============================================================================
// Rule-based Price Predictor
// =============================================================================
//
// Fan-in of the indicator library into a single directional forecast:
//
//   1. Drop null bars, bail out to a flat +0.25 % baseline when fewer than 20
//      closes remain or the latest close is zero.
//   2. Evaluate the rules in fixed order (RSI, MACD level, MACD slope,
//      Bollinger) and sum their scores.
//   3. trend      = up iff score >= 0
//      confidence = clamp(round(|score| / MAX_SCORE * 100), 15, 100)
//      move       = min(2 %, 0.25 % + |score| * ATR% * 0.5), signed by trend
//
// The predictor holds no state; identical input gives an identical record,
// rationale order included.
// =============================================================================

use serde::Serialize;
use tracing::debug;

use crate::indicators::{atr, bollinger, calculate_bollinger, calculate_macd, calculate_rsi, macd, rsi};
use crate::market_data::DenseSeries;
use crate::signals::readings::{self, SignalReading, MAX_SCORE};
use crate::types::{OhlcSeries, Prediction, Trend};

/// Minimum number of usable closes before indicators are trusted.
pub const MIN_HISTORY: usize = 20;
/// Horizon label attached to every prediction.
pub const HORIZON_LABEL: &str = "7 days";
pub const DEFAULT_CURRENCY: &str = "USD";

const BASELINE_DRIFT: f64 = 0.0025;
const BASELINE_CONFIDENCE: u8 = 20;
const BASELINE_RATIONALE: &str = "Limited history available — baseline drift applied";

const BASE_MOVE: f64 = 0.0025;
const MAX_MOVE: f64 = 0.02;
const MIN_CONFIDENCE: f64 = 15.0;
const MAX_CONFIDENCE: f64 = 100.0;

/// Neutral fallbacks when an indicator produced no value.
const NEUTRAL_RSI: f64 = 50.0;
const NEUTRAL_BAND_POSITION: f64 = 0.5;

/// Everything the rules saw for the latest bar, plus what they concluded.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    pub current_price: f64,
    pub rsi: f64,
    pub histogram: f64,
    pub previous_histogram: f64,
    pub band_position: f64,
    /// Latest ATR relative to the current price.
    pub atr_pct: f64,
    /// Readings that fired, in evaluation order.
    pub readings: Vec<SignalReading>,
    pub score: i32,
}

impl SignalReport {
    pub fn trend(&self) -> Trend {
        if self.score >= 0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    pub fn confidence(&self) -> u8 {
        let raw = (self.score.abs() as f64 / MAX_SCORE as f64 * 100.0).round();
        raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8
    }

    /// Signed fractional move, capped at ±2 %.
    pub fn signed_move(&self) -> f64 {
        let magnitude = (BASE_MOVE + self.score.abs() as f64 * self.atr_pct * 0.5).min(MAX_MOVE);
        match self.trend() {
            Trend::Up => magnitude,
            Trend::Down => -magnitude,
        }
    }

    pub fn rationale(&self) -> Vec<String> {
        self.readings.iter().map(|r| r.rationale.clone()).collect()
    }
}

/// Run every rule over dense, oldest-first series.
///
/// Callers are expected to have checked the history length; on short input
/// the missing indicators fall back to neutral values and simply do not fire.
pub fn evaluate_signals(closes: &[f64], highs: &[f64], lows: &[f64]) -> SignalReport {
    let current_price = closes.last().copied().unwrap_or(0.0);

    let rsi = calculate_rsi(closes, rsi::DEFAULT_RSI_PERIOD)
        .last()
        .copied()
        .unwrap_or(NEUTRAL_RSI);

    let histogram_series = calculate_macd(closes, macd::DEFAULT_FAST, macd::DEFAULT_SLOW, macd::DEFAULT_SIGNAL).histogram;
    let n = histogram_series.len();
    let histogram = if n >= 1 { histogram_series[n - 1] } else { 0.0 };
    let previous_histogram = if n >= 2 { histogram_series[n - 2] } else { 0.0 };

    let band_position = calculate_bollinger(closes, bollinger::DEFAULT_PERIOD, bollinger::DEFAULT_MULTIPLIER)
        .last()
        .map(|band| band.position(current_price))
        .unwrap_or(NEUTRAL_BAND_POSITION);

    let atr_pct = atr::calculate_atr_pct(highs, lows, closes, atr::DEFAULT_ATR_PERIOD).unwrap_or(0.0);

    let readings: Vec<SignalReading> = [
        readings::rsi_reading(rsi),
        readings::macd_level_reading(histogram),
        readings::macd_slope_reading(histogram, previous_histogram),
        readings::bollinger_reading(band_position),
    ]
    .into_iter()
    .flatten()
    .collect();

    let score = readings.iter().map(|r| r.score).sum();

    SignalReport {
        current_price,
        rsi,
        histogram,
        previous_histogram,
        band_position,
        atr_pct,
        readings,
        score,
    }
}

/// Forecast the next move for `series`, labelling the result with `currency`.
pub fn predict(series: &OhlcSeries, currency: &str) -> Prediction {
    let dense = DenseSeries::compacted(series);
    let current_price = dense.close.last().copied().unwrap_or(0.0);

    if dense.len() < MIN_HISTORY || current_price == 0.0 {
        debug!(bars = dense.len(), current_price, "insufficient history, applying baseline drift");
        return baseline(current_price, currency);
    }

    let report = evaluate_signals(&dense.close, &dense.high, &dense.low);
    let trend = report.trend();
    let confidence = report.confidence();
    let signed_move = report.signed_move();

    debug!(
        bars = dense.len(),
        score = report.score,
        rsi = report.rsi,
        histogram = report.histogram,
        band_position = report.band_position,
        atr_pct = report.atr_pct,
        %trend,
        confidence,
        "prediction computed"
    );

    Prediction {
        current_price,
        predicted_price: current_price * (1.0 + signed_move),
        confidence,
        trend,
        target_date: HORIZON_LABEL.to_string(),
        currency: currency.to_string(),
        rationale: report.rationale(),
    }
}

fn baseline(current_price: f64, currency: &str) -> Prediction {
    Prediction {
        current_price,
        predicted_price: current_price * (1.0 + BASELINE_DRIFT),
        confidence: BASELINE_CONFIDENCE,
        trend: Trend::Up,
        target_date: HORIZON_LABEL.to_string(),
        currency: currency.to_string(),
        rationale: vec![BASELINE_RATIONALE.to_string()],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn flat(n: usize, price: f64) -> OhlcSeries {
        let v = vec![price; n];
        OhlcSeries::from_values(&v, &v, &v)
    }

    fn ramp(values: &[f64]) -> OhlcSeries {
        let highs: Vec<f64> = values.iter().map(|v| v + 0.5).collect();
        let lows: Vec<f64> = values.iter().map(|v| v - 0.5).collect();
        OhlcSeries::from_values(values, &highs, &lows)
    }

    #[test]
    fn short_history_uses_baseline() {
        let p = predict(&flat(19, 100.0), "USD");
        assert_eq!(p.confidence, 20);
        assert_eq!(p.trend, Trend::Up);
        assert!((p.predicted_price - 100.25).abs() < 1e-9);
        assert_eq!(p.rationale, vec![BASELINE_RATIONALE.to_string()]);
        assert_eq!(p.target_date, "7 days");
    }

    #[test]
    fn zero_latest_close_uses_baseline() {
        let mut series = flat(30, 100.0);
        series.close[29] = Some(0.0);
        let p = predict(&series, "EUR");
        assert_eq!(p.current_price, 0.0);
        assert_eq!(p.predicted_price, 0.0);
        assert_eq!(p.confidence, 20);
        assert_eq!(p.currency, "EUR");
    }

    #[test]
    fn empty_series_uses_baseline() {
        let p = predict(&OhlcSeries::default(), "USD");
        assert_eq!(p.current_price, 0.0);
        assert_eq!(p.confidence, 20);
    }

    #[test]
    fn null_bars_are_filtered_before_counting() {
        // 19 real closes padded with gaps is still not enough history.
        let mut series = flat(19, 100.0);
        for i in (0..19).rev().step_by(3) {
            series.close.insert(i, None);
        }
        assert_eq!(predict(&series, "USD").confidence, 20);

        // Trailing null does not become the current price.
        let mut series = flat(25, 100.0);
        series.close.push(None);
        let p = predict(&series, "USD");
        assert_eq!(p.current_price, 100.0);
        assert_ne!(p.rationale, vec![BASELINE_RATIONALE.to_string()]);
    }

    #[test]
    fn flat_market_reads_overbought() {
        // No losses means RSI 100. MACD is flat and the band has zero width,
        // so the RSI rule alone sets the score to -2.
        let p = predict(&flat(25, 100.0), "USD");
        assert_eq!(p.trend, Trend::Down);
        assert_eq!(p.confidence, 33);
        assert_eq!(p.rationale, vec!["RSI 100.0 (overbought)".to_string()]);
        // Zero ATR: only the base move applies, signed down.
        assert!((p.predicted_price - 99.75).abs() < 1e-9);
    }

    #[test]
    fn steady_rally_reads_overbought() {
        let closes: Vec<f64> = (1..=60).map(|x| 100.0 + x as f64).collect();
        let p = predict(&ramp(&closes), "USD");
        assert_eq!(p.trend, Trend::Down);
        assert_eq!(p.rationale.first().unwrap(), "RSI 100.0 (overbought)");
        assert_eq!(p.rationale.last().unwrap(), "Price near upper Bollinger band (reversion down)");
        assert!(p.predicted_price < p.current_price);
        assert!(p.confidence >= 17);
    }

    #[test]
    fn steady_selloff_reads_oversold() {
        let closes: Vec<f64> = (1..=60).map(|x| 200.0 - x as f64).collect();
        let p = predict(&ramp(&closes), "USD");
        assert_eq!(p.trend, Trend::Up);
        assert_eq!(p.rationale.first().unwrap(), "RSI 0.0 (oversold)");
        assert_eq!(p.rationale.last().unwrap(), "Price near lower Bollinger band (reversion up)");
        assert!(p.predicted_price > p.current_price);
    }

    #[test]
    fn report_matches_prediction() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.4).sin() * 5.0).collect();
        let series = ramp(&closes);
        let dense = DenseSeries::compacted(&series);
        let report = evaluate_signals(&dense.close, &dense.high, &dense.low);
        let p = predict(&series, "USD");

        assert_eq!(report.rationale(), p.rationale);
        assert_eq!(report.trend(), p.trend);
        assert_eq!(report.confidence(), p.confidence);
        assert!(report.score.abs() <= MAX_SCORE);
        assert_eq!(report.score, report.readings.iter().map(|r| r.score).sum::<i32>());
    }

    #[test]
    fn move_is_capped_at_two_percent() {
        // Huge ranges push ATR% far above the cap.
        let closes: Vec<f64> = (1..=40).map(|x| 100.0 + x as f64).collect();
        let highs: Vec<f64> = closes.iter().map(|c| c * 1.5).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c * 0.5).collect();
        let p = predict(&OhlcSeries::from_values(&closes, &highs, &lows), "USD");
        let moved = (p.predicted_price - p.current_price).abs() / p.current_price;
        assert!((moved - 0.02).abs() < 1e-12, "expected capped move, got {moved}");
    }

    #[test]
    fn confidence_mapping() {
        let report = |score| SignalReport {
            current_price: 100.0,
            rsi: 50.0,
            histogram: 0.0,
            previous_histogram: 0.0,
            band_position: 0.5,
            atr_pct: 0.0,
            readings: vec![],
            score,
        };
        assert_eq!(report(0).confidence(), 15);
        assert_eq!(report(1).confidence(), 17);
        assert_eq!(report(-2).confidence(), 33);
        assert_eq!(report(3).confidence(), 50);
        assert_eq!(report(-5).confidence(), 83);
        assert_eq!(report(6).confidence(), 100);
        assert_eq!(report(-1).trend(), Trend::Down);
        assert_eq!(report(0).trend(), Trend::Up);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let closes: Vec<f64> = (0..50).map(|i| 50.0 + (i as f64 * 0.7).cos() * 3.0).collect();
        let series = ramp(&closes);
        assert_eq!(predict(&series, "USD"), predict(&series, "USD"));
    }
}
