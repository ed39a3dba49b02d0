// =============================================================================
// Prediction Envelope: auditable record of every served prediction
// =============================================================================
//
// The engine's `Prediction` is a bare value. When the service hands one out
// it wraps it with an id, the symbol it was asked about, how many bars were
// fed in and when, so the recent-predictions feed can be audited later.
// =============================================================================

use serde::Serialize;

use crate::types::Prediction;

#[derive(Debug, Clone, Serialize)]
pub struct PredictionEnvelope {
    /// Unique identifier for this prediction (UUID v4).
    pub id: String,

    /// Symbol the prediction pertains to, if the caller named one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Bars on the time axis after the history window was applied.
    pub bars_used: usize,

    /// ISO 8601 timestamp of when this prediction was created.
    pub created_at: String,

    pub prediction: Prediction,
}

impl PredictionEnvelope {
    pub fn new(symbol: Option<String>, bars_used: usize, prediction: Prediction) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            symbol,
            bars_used,
            created_at: chrono::Utc::now().to_rfc3339(),
            prediction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    fn prediction() -> Prediction {
        Prediction {
            current_price: 10.0,
            predicted_price: 10.025,
            confidence: 20,
            trend: Trend::Up,
            target_date: "7 days".into(),
            currency: "USD".into(),
            rationale: vec![],
        }
    }

    #[test]
    fn envelopes_get_unique_ids() {
        let a = PredictionEnvelope::new(Some("AAPL".into()), 5, prediction());
        let b = PredictionEnvelope::new(Some("AAPL".into()), 5, prediction());
        assert_ne!(a.id, b.id);
        assert!(chrono::DateTime::parse_from_rfc3339(&a.created_at).is_ok());
    }

    #[test]
    fn symbol_omitted_when_absent() {
        let env = PredictionEnvelope::new(None, 5, prediction());
        let json = serde_json::to_value(&env).unwrap();
        assert!(json.get("symbol").is_none());
        assert_eq!(json["bars_used"], 5);
        assert_eq!(json["prediction"]["confidence"], 20);
    }
}
