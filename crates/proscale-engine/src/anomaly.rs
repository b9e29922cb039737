//! Anomaly classifier — flags ticks where observed load diverges
//! sharply from the forecast.
//!
//! Pure and stateless; it feeds display and alerting, not the scaling
//! decision itself.

use proscale_core::{AnomalyKind, AnomalyPolicy, PolicyResult};

/// Stateless spike/drop classifier.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyClassifier {
    policy: AnomalyPolicy,
}

impl AnomalyClassifier {
    pub fn new(policy: AnomalyPolicy) -> PolicyResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &AnomalyPolicy {
        &self.policy
    }

    /// Classify one tick's observed load against the forecast.
    ///
    /// A non-positive forecast yields `Normal` — no meaningful ratio
    /// exists, and that must not masquerade as a spike or drop. Drops
    /// below the noise floor are also `Normal`.
    pub fn classify(&self, current_load: f64, forecast_load: f64) -> AnomalyKind {
        // max() also maps NaN to 0.
        let current = current_load.max(0.0);
        if !(forecast_load > 0.0) {
            return AnomalyKind::Normal;
        }

        let ratio = current / forecast_load;
        if ratio > self.policy.spike_multiplier {
            AnomalyKind::Spike
        } else if ratio < self.policy.drop_multiplier && current > self.policy.drop_floor {
            AnomalyKind::Drop
        } else {
            AnomalyKind::Normal
        }
    }
}

impl Default for AnomalyClassifier {
    fn default() -> Self {
        Self {
            policy: AnomalyPolicy::default(),
        }
    }
}
