//! Domain types shared across the proscale crates.
//!
//! These types flow between the load feed, the decision engine, and
//! whatever consumes the decisions (CLI output, logs, an orchestration
//! API). All are serializable for JSON output and replay files.

use serde::{Deserialize, Serialize};

// ── Decisions ──────────────────────────────────────────────────────

/// The action taken by the controller on a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleAction {
    /// No tick has been evaluated yet.
    None,
    /// Replica count increased to meet the target.
    ScaleOut,
    /// Replica count decreased to meet the target.
    ScaleIn,
    /// Target matched the current count; nothing to do.
    Stable,
    /// A scale-in was wanted but vetoed by the cooldown window.
    CooldownBlocked,
}

impl ScaleAction {
    /// Whether this action changed the replica count.
    pub fn changed_replicas(self) -> bool {
        matches!(self, ScaleAction::ScaleOut | ScaleAction::ScaleIn)
    }
}

/// Outcome of one tick's scaling decision.
///
/// Created fresh each tick and owned by the caller; the controller
/// retains none of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    /// Final replica count, always within the policy bounds.
    pub replicas: u32,
    /// Replica count implied by the forecast load alone (pre-bounds).
    pub predictive_target: u32,
    /// Replica count implied by the observed load alone (pre-bounds).
    pub reactive_target: u32,
    /// What the controller did this tick.
    pub action: ScaleAction,
    /// Ticks remaining before a scale-in is permitted, after this
    /// tick's update.
    pub cooldown_remaining: u32,
}

// ── Anomalies ──────────────────────────────────────────────────────

/// Classification of the observed load against the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Normal,
    /// Observed load far above forecast (possible attack or viral event).
    Spike,
    /// Observed load far below forecast (possible upstream outage).
    Drop,
}

// ── Load feed ──────────────────────────────────────────────────────

/// One tick of input: observed demand plus the external predictor's
/// forecast for the same horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSample {
    pub tick: u64,
    /// Observed demand, e.g. requests per tick.
    pub current_load: f64,
    /// Predicted demand for the same tick.
    pub forecast_load: f64,
}

// ── Simulation output ──────────────────────────────────────────────

/// One row of simulation output: the inputs, the decision, and the
/// derived bookkeeping for that tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub current_load: f64,
    pub forecast_load: f64,
    pub decision: DecisionResult,
    pub anomaly: AnomalyKind,
    /// Estimated fraction of total capacity in use (0.0–1.0).
    pub cpu_utilization: f64,
    /// Cost of the autoscaled fleet for this tick.
    pub cost: f64,
    /// Cost of the fixed-size baseline fleet for this tick.
    pub cost_fixed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_snake_case() {
        let json = serde_json::to_string(&ScaleAction::CooldownBlocked).unwrap();
        assert_eq!(json, "\"cooldown_blocked\"");
    }

    #[test]
    fn changed_replicas_only_on_scaling_actions() {
        assert!(ScaleAction::ScaleOut.changed_replicas());
        assert!(ScaleAction::ScaleIn.changed_replicas());
        assert!(!ScaleAction::Stable.changed_replicas());
        assert!(!ScaleAction::CooldownBlocked.changed_replicas());
        assert!(!ScaleAction::None.changed_replicas());
    }
}
