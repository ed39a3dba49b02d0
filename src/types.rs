// =============================================================================
// Shared types used across the FinMate indicator engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Raw OHLC input, oldest bar first.
///
/// Upstream quote providers leave gaps as `null`, so every element is
/// optional. The three series are expected to be parallel but the engine
/// never relies on that for safety.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcSeries {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
}

impl OhlcSeries {
    /// Build a series with no missing bars.
    pub fn from_values(close: &[f64], high: &[f64], low: &[f64]) -> Self {
        Self {
            close: close.iter().copied().map(Some).collect(),
            high: high.iter().copied().map(Some).collect(),
            low: low.iter().copied().map(Some).collect(),
        }
    }

    /// Number of bars on the time axis (the longest of the three series).
    pub fn len(&self) -> usize {
        self.close.len().max(self.high.len()).max(self.low.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only the most recent `bars` entries of each series.
    pub fn tail(&self, bars: usize) -> Self {
        fn last_n(values: &[Option<f64>], n: usize) -> Vec<Option<f64>> {
            values[values.len().saturating_sub(n)..].to_vec()
        }
        Self {
            close: last_n(&self.close, bars),
            high: last_n(&self.high, bars),
            low: last_n(&self.low, bars),
        }
    }
}

/// Forecast direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// The engine's output record. Field names follow the dashboard's JSON
/// contract (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub current_price: f64,
    pub predicted_price: f64,
    /// 0-100.
    pub confidence: u8,
    pub trend: Trend,
    /// Descriptive horizon, e.g. "7 days".
    pub target_date: String,
    pub currency: String,
    pub rationale: Vec<String>,
}
