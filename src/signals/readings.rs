// =============================================================================
// Signal Readings: per-indicator scoring rules
// =============================================================================
//
// Each rule inspects one indicator value and, when it fires, returns a
// directional score plus the rationale line shown to the user. Weights are
// hand-tuned and fixed; they must stay in sync with `MAX_SCORE`.
//
//   RSI extreme        ±2   (contrarian: oversold => up)
//   MACD level         ±1   (histogram sign)
//   MACD slope         ±1   (histogram vs previous bar)
//   Bollinger position ±1   (mean reversion from the outer 10 % of the band)
// =============================================================================

use serde::Serialize;

pub const RSI_WEIGHT: i32 = 2;
pub const MACD_LEVEL_WEIGHT: i32 = 1;
pub const MACD_SLOPE_WEIGHT: i32 = 1;
pub const BOLLINGER_WEIGHT: i32 = 1;

/// Confidence normaliser. The rules above reach at most ±5 together.
pub const MAX_SCORE: i32 = 6;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const BAND_LOWER_ZONE: f64 = 0.1;
pub const BAND_UPPER_ZONE: f64 = 0.9;

/// Which rule produced a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    Rsi,
    MacdLevel,
    MacdSlope,
    Bollinger,
}

/// The contribution of a single rule to the final score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalReading {
    pub source: SignalSource,
    /// Signed contribution: positive is bullish.
    pub score: i32,
    pub rationale: String,
}

impl SignalReading {
    fn new(source: SignalSource, score: i32, rationale: impl Into<String>) -> Self {
        Self {
            source,
            score,
            rationale: rationale.into(),
        }
    }
}

pub fn rsi_reading(rsi: f64) -> Option<SignalReading> {
    if rsi < RSI_OVERSOLD {
        Some(SignalReading::new(SignalSource::Rsi, RSI_WEIGHT, format!("RSI {rsi:.1} (oversold)")))
    } else if rsi > RSI_OVERBOUGHT {
        Some(SignalReading::new(SignalSource::Rsi, -RSI_WEIGHT, format!("RSI {rsi:.1} (overbought)")))
    } else {
        None
    }
}

pub fn macd_level_reading(histogram: f64) -> Option<SignalReading> {
    if histogram > 0.0 {
        Some(SignalReading::new(
            SignalSource::MacdLevel,
            MACD_LEVEL_WEIGHT,
            "MACD histogram positive (bullish momentum)",
        ))
    } else if histogram < 0.0 {
        Some(SignalReading::new(
            SignalSource::MacdLevel,
            -MACD_LEVEL_WEIGHT,
            "MACD histogram negative (bearish momentum)",
        ))
    } else {
        None
    }
}

pub fn macd_slope_reading(histogram: f64, previous: f64) -> Option<SignalReading> {
    if histogram > previous {
        Some(SignalReading::new(SignalSource::MacdSlope, MACD_SLOPE_WEIGHT, "MACD momentum improving"))
    } else if histogram < previous {
        Some(SignalReading::new(SignalSource::MacdSlope, -MACD_SLOPE_WEIGHT, "MACD momentum weakening"))
    } else {
        None
    }
}

/// `position` is 0.0 at the lower band and 1.0 at the upper band. NaN (a
/// zero-width band) never fires.
pub fn bollinger_reading(position: f64) -> Option<SignalReading> {
    if position < BAND_LOWER_ZONE {
        Some(SignalReading::new(
            SignalSource::Bollinger,
            BOLLINGER_WEIGHT,
            "Price near lower Bollinger band (reversion up)",
        ))
    } else if position > BAND_UPPER_ZONE {
        Some(SignalReading::new(
            SignalSource::Bollinger,
            -BOLLINGER_WEIGHT,
            "Price near upper Bollinger band (reversion down)",
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_score_covers_all_weights() {
        let sum = RSI_WEIGHT + MACD_LEVEL_WEIGHT + MACD_SLOPE_WEIGHT + BOLLINGER_WEIGHT;
        assert!(sum <= MAX_SCORE);
        assert_eq!(MAX_SCORE, 6);
    }

    #[test]
    fn rsi_thresholds_are_strict() {
        assert!(rsi_reading(30.0).is_none());
        assert!(rsi_reading(70.0).is_none());
        assert!(rsi_reading(50.0).is_none());

        let low = rsi_reading(25.04).unwrap();
        assert_eq!(low.score, 2);
        assert_eq!(low.rationale, "RSI 25.0 (oversold)");

        let high = rsi_reading(82.46).unwrap();
        assert_eq!(high.score, -2);
        assert_eq!(high.rationale, "RSI 82.5 (overbought)");
    }

    #[test]
    fn macd_level() {
        assert_eq!(macd_level_reading(0.3).unwrap().score, 1);
        assert_eq!(macd_level_reading(-0.3).unwrap().score, -1);
        assert!(macd_level_reading(0.0).is_none());
    }

    #[test]
    fn macd_slope() {
        assert_eq!(macd_slope_reading(0.2, 0.1).unwrap().rationale, "MACD momentum improving");
        assert_eq!(macd_slope_reading(0.1, 0.2).unwrap().score, -1);
        assert!(macd_slope_reading(0.1, 0.1).is_none());
    }

    #[test]
    fn bollinger_zones() {
        assert_eq!(bollinger_reading(0.05).unwrap().score, 1);
        assert_eq!(bollinger_reading(0.95).unwrap().score, -1);
        assert!(bollinger_reading(0.5).is_none());
        assert!(bollinger_reading(0.1).is_none());
        assert!(bollinger_reading(0.9).is_none());
        assert!(bollinger_reading(f64::NAN).is_none());
    }
}
