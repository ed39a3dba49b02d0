// =============================================================================
// Runtime Configuration: service settings with atomic save
// =============================================================================
//
// Settings for the HTTP shell around the engine: where to listen, how much
// history to feed the predictor, and the chart overlay parameters.
//
// The predictor's own weights, thresholds and periods are fixed and do not
// appear here.
//
// All fields carry `#[serde(default)]` so that adding new fields never breaks
// loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::{bollinger, macd, rsi};
use crate::overlay::OverlaySelection;
use crate::signals::predictor::DEFAULT_CURRENCY;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:3001".to_string()
}

fn default_history_window() -> usize {
    120
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_max_recent_predictions() -> usize {
    100
}

fn default_ma_period() -> usize {
    20
}

fn default_bollinger_period() -> usize {
    bollinger::DEFAULT_PERIOD
}

fn default_bollinger_multiplier() -> f64 {
    bollinger::DEFAULT_MULTIPLIER
}

fn default_rsi_period() -> usize {
    rsi::DEFAULT_RSI_PERIOD
}

fn default_macd_fast() -> usize {
    macd::DEFAULT_FAST
}

fn default_macd_slow() -> usize {
    macd::DEFAULT_SLOW
}

fn default_macd_signal() -> usize {
    macd::DEFAULT_SIGNAL
}

// =============================================================================
// OverlayParams
// =============================================================================

/// Look-backs used when drawing indicator overlays on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayParams {
    #[serde(default = "default_ma_period")]
    pub sma_period: usize,

    #[serde(default = "default_ma_period")]
    pub ema_period: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Band half-width in standard deviations.
    #[serde(default = "default_bollinger_multiplier")]
    pub bollinger_multiplier: f64,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
}

impl Default for OverlayParams {
    fn default() -> Self {
        Self {
            sma_period: default_ma_period(),
            ema_period: default_ma_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_multiplier: default_bollinger_multiplier(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Socket address for the HTTP API.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Only the most recent `history_window` bars are fed to the predictor.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Currency label used when a request does not carry one.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Capacity of the recent-predictions ring.
    #[serde(default = "default_max_recent_predictions")]
    pub max_recent_predictions: usize,

    #[serde(default)]
    pub overlay_params: OverlayParams,

    /// Overlays drawn when a request does not choose any.
    #[serde(default)]
    pub default_overlays: OverlaySelection,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            history_window: default_history_window(),
            default_currency: default_currency(),
            max_recent_predictions: default_max_recent_predictions(),
            overlay_params: OverlayParams::default(),
            default_overlays: OverlaySelection::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            history_window = config.history_window,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self).context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3001");
        assert_eq!(cfg.history_window, 120);
        assert_eq!(cfg.default_currency, "USD");
        assert_eq!(cfg.max_recent_predictions, 100);
        assert_eq!(cfg.overlay_params.sma_period, 20);
        assert_eq!(cfg.overlay_params.ema_period, 20);
        assert_eq!(cfg.overlay_params.bollinger_period, 20);
        assert!((cfg.overlay_params.bollinger_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.overlay_params.rsi_period, 14);
        assert!(cfg.default_overlays.ema);
        assert!(!cfg.default_overlays.sma);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{
            "history_window": 60,
            "overlay_params": { "sma_period": 50 },
            "default_overlays": { "bbands": true }
        }"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.history_window, 60);
        assert_eq!(cfg.overlay_params.sma_period, 50);
        assert_eq!(cfg.overlay_params.ema_period, 20);
        assert!(cfg.default_overlays.bbands);
        assert!(cfg.default_overlays.ema);
        assert_eq!(cfg.default_currency, "USD");
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("finmate-config-{}.json", uuid::Uuid::new_v4()));
        let mut cfg = EngineConfig::default();
        cfg.default_currency = "INR".to_string();
        cfg.save(&path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert!(!path.with_extension("json.tmp").exists());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = EngineConfig::load("/nonexistent/finmate.json").unwrap_err();
        assert!(err.to_string().contains("failed to read engine config"));
    }
}
