// =============================================================================
// FinMate Indicator Engine
// =============================================================================
//
// Technical indicators and a rule-based predictor over a single OHLC window.
//
//   raw OhlcSeries ─► market_data (normalise) ─► indicators ─► signals ─► Prediction
//                                                     └──────► overlay ─► ChartOverlays
//
// Everything under `market_data`, `indicators`, `signals` and `overlay` is
// pure and synchronous. `api`, `app_state` and `runtime_config` make up the
// thin HTTP shell the binary serves.
// =============================================================================

pub mod api;
pub mod app_state;
pub mod indicators;
pub mod market_data;
pub mod overlay;
pub mod prediction_envelope;
pub mod runtime_config;
pub mod signals;
pub mod types;

pub use overlay::{align_to_axis, build_overlays, ChartOverlays, OverlaySelection};
pub use signals::predict;
pub use types::{OhlcSeries, Prediction, Trend};
