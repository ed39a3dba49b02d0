// =============================================================================
// Central Application State
// =============================================================================
//
// Shared by every request handler via `Arc<AppState>`. The engine itself is
// stateless; this only holds the service configuration and a bounded feed of
// recently served predictions.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock for the mutable collections.
// =============================================================================

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::prediction_envelope::PredictionEnvelope;
use crate::runtime_config::EngineConfig;

pub struct AppState {
    /// Monotonically increasing version counter, bumped on every mutation.
    pub state_version: AtomicU64,

    pub config: Arc<RwLock<EngineConfig>>,

    /// Most recent predictions, oldest first.
    pub recent_predictions: RwLock<VecDeque<PredictionEnvelope>>,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        let capacity = config.max_recent_predictions;
        Self {
            state_version: AtomicU64::new(0),
            config: Arc::new(RwLock::new(config)),
            recent_predictions: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::Relaxed)
    }

    pub fn increment_version(&self) {
        self.state_version.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a served prediction, evicting the oldest past capacity.
    pub fn push_prediction(&self, envelope: PredictionEnvelope) {
        let capacity = self.config.read().max_recent_predictions;
        {
            let mut recent = self.recent_predictions.write();
            recent.push_back(envelope);
            while recent.len() > capacity {
                recent.pop_front();
            }
        }

        self.increment_version();
    }

    pub fn recent_predictions(&self) -> Vec<PredictionEnvelope> {
        self.recent_predictions.read().iter().cloned().collect()
    }
}
