// =============================================================================
// Signals Module
// =============================================================================
//
// Rule-based aggregation of indicator readings into a price forecast:
// - Per-indicator scoring rules with their rationale strings
// - The predictor that sums them into trend, confidence and target price

pub mod predictor;
pub mod readings;

pub use predictor::{evaluate_signals, predict, SignalReport};
pub use readings::{SignalReading, SignalSource, MAX_SCORE};
