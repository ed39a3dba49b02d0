// =============================================================================
// Overlay Adapter: indicator series re-aligned to the chart's time axis
// =============================================================================
//
// Indicators with a warm-up period return fewer values than there are bars.
// Charting consumers need one slot per bar, so shorter series are left-padded
// with `None` (JSON `null`). Alignment is always to the tail: the last value
// of an indicator belongs to the last bar.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma, BollingerBand,
};
use crate::market_data::DenseSeries;
use crate::runtime_config::OverlayParams;
use crate::types::OhlcSeries;

/// Left-pad `values` with `None` so the result has exactly `len` slots.
///
/// If `values` is somehow longer than the axis, only the trailing `len`
/// entries are kept so the tail stays aligned.
pub fn align_to_axis<T: Copy>(values: &[T], len: usize) -> Vec<Option<T>> {
    let values = &values[values.len().saturating_sub(len)..];
    let pad = len - values.len();
    std::iter::repeat(None)
        .take(pad)
        .chain(values.iter().copied().map(Some))
        .collect()
}

/// Which overlays the chart wants. Mirrors the dashboard's indicator toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlaySelection {
    pub sma: bool,
    pub ema: bool,
    pub rsi: bool,
    pub macd: bool,
    pub bbands: bool,
}

impl Default for OverlaySelection {
    fn default() -> Self {
        Self {
            sma: false,
            ema: true,
            rsi: false,
            macd: false,
            bbands: false,
        }
    }
}

type Aligned = Vec<Option<f64>>;

/// Aligned overlay series. Every present series has one slot per bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartOverlays {
    pub bars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ema: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger_upper: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger_middle: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger_lower: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_line: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_signal: Option<Aligned>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd_histogram: Option<Aligned>,
}

/// Compute the selected overlays over the zero-filled close series, so the
/// time axis matches the raw bars one-for-one.
pub fn build_overlays(series: &OhlcSeries, selection: &OverlaySelection, params: &OverlayParams) -> ChartOverlays {
    let closes = DenseSeries::zero_filled(series).close;
    let bars = closes.len();
    let align = |values: &[f64]| align_to_axis(values, bars);

    let mut overlays = ChartOverlays {
        bars,
        ..ChartOverlays::default()
    };

    if selection.sma {
        overlays.sma = Some(align(&calculate_sma(&closes, params.sma_period)));
    }
    if selection.ema {
        overlays.ema = Some(align(&calculate_ema(&closes, params.ema_period)));
    }
    if selection.bbands {
        let bands = calculate_bollinger(&closes, params.bollinger_period, params.bollinger_multiplier);
        let pick = |f: fn(&BollingerBand) -> f64| -> Aligned {
            align(&bands.iter().map(f).collect::<Vec<_>>())
        };
        overlays.bollinger_upper = Some(pick(|b| b.upper));
        overlays.bollinger_middle = Some(pick(|b| b.middle));
        overlays.bollinger_lower = Some(pick(|b| b.lower));
    }
    if selection.rsi {
        overlays.rsi = Some(align(&calculate_rsi(&closes, params.rsi_period)));
    }
    if selection.macd {
        let macd = calculate_macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
        overlays.macd_line = Some(align(&macd.macd_line));
        overlays.macd_signal = Some(align(&macd.signal_line));
        overlays.macd_histogram = Some(align(&macd.histogram));
    }

    overlays
}
