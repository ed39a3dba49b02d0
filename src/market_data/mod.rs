pub mod normalizer;

// Re-export for convenient access (e.g. `use crate::market_data::DenseSeries`).
pub use normalizer::DenseSeries;
