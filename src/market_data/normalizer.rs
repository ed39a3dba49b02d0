// =============================================================================
// Series Normalizer
// =============================================================================
//
// Turns a raw `OhlcSeries` (nullable bars) into dense `f64` vectors that the
// indicator math can consume. Two flavours:
//
//   zero_filled: one value per bar, `null` becomes 0.0. Lossy on purpose: the
//                 time axis is preserved so chart overlays line up.
//   compacted:   `null` bars are dropped from each series independently. The
//                 predictor works on this form.
//
// Neither path can fail; an empty input yields empty vectors.
// =============================================================================

use crate::types::OhlcSeries;

/// Dense close/high/low vectors, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseSeries {
    pub close: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
}

impl DenseSeries {
    /// Substitute 0.0 for every missing value. All three vectors share the
    /// length of the longest input series.
    pub fn zero_filled(series: &OhlcSeries) -> Self {
        let len = series.len();
        let fill = |values: &[Option<f64>]| -> Vec<f64> {
            (0..len)
                .map(|i| values.get(i).copied().flatten().unwrap_or(0.0))
                .collect()
        };
        Self {
            close: fill(&series.close),
            high: fill(&series.high),
            low: fill(&series.low),
        }
    }

    /// Drop missing values. The resulting vectors may differ in length.
    pub fn compacted(series: &OhlcSeries) -> Self {
        let keep = |values: &[Option<f64>]| -> Vec<f64> { values.iter().flatten().copied().collect() };
        Self {
            close: keep(&series.close),
            high: keep(&series.high),
            low: keep(&series.low),
        }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}
