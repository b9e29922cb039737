//! Scaling, anomaly, and cost policies.
//!
//! All policies are plain serde-derived structs with documented defaults
//! and a `validate()` that must pass before an engine component is built
//! from them.

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// Replica bounds, per-replica capacity, and the cooldown window.
///
/// Immutable once handed to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingPolicy {
    /// Lower bound on the replica count. Must be >= 1.
    pub min_replicas: u32,
    /// Upper bound on the replica count.
    pub max_replicas: u32,
    /// Requests per tick one replica can serve.
    pub capacity_per_replica: f64,
    /// Minimum ticks between consecutive scale-ins, and enforced after
    /// any scale-out.
    pub cooldown_ticks: u32,
}

impl Default for ScalingPolicy {
    fn default() -> Self {
        Self {
            min_replicas: 1,
            max_replicas: 20,
            capacity_per_replica: 150.0,
            cooldown_ticks: 3,
        }
    }
}

impl ScalingPolicy {
    /// Check the construction-time invariants.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.min_replicas == 0 {
            return Err(PolicyError::MinReplicasZero(self.min_replicas));
        }
        if self.min_replicas > self.max_replicas {
            return Err(PolicyError::ReplicaBoundsInverted {
                min: self.min_replicas,
                max: self.max_replicas,
            });
        }
        if !(self.capacity_per_replica > 0.0) || !self.capacity_per_replica.is_finite() {
            return Err(PolicyError::InvalidCapacity(self.capacity_per_replica));
        }
        Ok(())
    }

    /// Clamp a raw target into `[min_replicas, max_replicas]`.
    pub fn clamp(&self, target: u32) -> u32 {
        target.clamp(self.min_replicas, self.max_replicas)
    }
}

/// Thresholds for the spike/drop classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyPolicy {
    /// Observed/forecast ratio above which the tick is a spike.
    pub spike_multiplier: f64,
    /// Observed/forecast ratio below which the tick is a drop.
    pub drop_multiplier: f64,
    /// Observed load must exceed this for a drop to register,
    /// suppressing noise at near-zero load.
    pub drop_floor: f64,
}

impl Default for AnomalyPolicy {
    fn default() -> Self {
        Self {
            spike_multiplier: 1.5,
            drop_multiplier: 0.5,
            drop_floor: 100.0,
        }
    }
}

impl AnomalyPolicy {
    pub fn validate(&self) -> PolicyResult<()> {
        if !(self.spike_multiplier > 0.0) || !self.spike_multiplier.is_finite() {
            return Err(PolicyError::InvalidSpikeMultiplier(self.spike_multiplier));
        }
        if !(self.drop_multiplier > 0.0)
            || !self.drop_multiplier.is_finite()
            || self.drop_multiplier >= self.spike_multiplier
        {
            return Err(PolicyError::InvalidDropMultiplier {
                drop: self.drop_multiplier,
                spike: self.spike_multiplier,
            });
        }
        if !(self.drop_floor >= 0.0) || !self.drop_floor.is_finite() {
            return Err(PolicyError::InvalidDropFloor(self.drop_floor));
        }
        Ok(())
    }
}

/// Per-tick cost accounting for the fleet, with a fixed-size baseline
/// to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    /// Cost of running one replica for one tick (currency units).
    pub cost_per_replica_tick: f64,
    /// Replica count of the always-on baseline fleet.
    pub fixed_replicas: u32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            cost_per_replica_tick: 0.1,
            fixed_replicas: 10,
        }
    }
}

impl CostModel {
    pub fn validate(&self) -> PolicyResult<()> {
        if !(self.cost_per_replica_tick >= 0.0) || !self.cost_per_replica_tick.is_finite() {
            return Err(PolicyError::InvalidCostRate(self.cost_per_replica_tick));
        }
        Ok(())
    }

    /// Cost of running `replicas` for one tick.
    pub fn tick_cost(&self, replicas: u32) -> f64 {
        f64::from(replicas) * self.cost_per_replica_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scaling_policy_is_valid() {
        assert_eq!(ScalingPolicy::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_min_replicas() {
        let policy = ScalingPolicy {
            min_replicas: 0,
            ..Default::default()
        };
        assert_eq!(policy.validate(), Err(PolicyError::MinReplicasZero(0)));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let policy = ScalingPolicy {
            min_replicas: 8,
            max_replicas: 4,
            ..Default::default()
        };
        assert_eq!(
            policy.validate(),
            Err(PolicyError::ReplicaBoundsInverted { min: 8, max: 4 })
        );
    }

    #[test]
    fn rejects_non_positive_capacity() {
        for capacity in [0.0, -150.0, f64::NAN, f64::INFINITY] {
            let policy = ScalingPolicy {
                capacity_per_replica: capacity,
                ..Default::default()
            };
            assert!(policy.validate().is_err(), "capacity {capacity} accepted");
        }
    }

    #[test]
    fn clamp_respects_bounds() {
        let policy = ScalingPolicy {
            min_replicas: 2,
            max_replicas: 6,
            ..Default::default()
        };
        assert_eq!(policy.clamp(0), 2);
        assert_eq!(policy.clamp(4), 4);
        assert_eq!(policy.clamp(99), 6);
    }

    #[test]
    fn anomaly_policy_rejects_drop_above_spike() {
        let policy = AnomalyPolicy {
            spike_multiplier: 1.2,
            drop_multiplier: 1.3,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn cost_model_tick_cost() {
        let model = CostModel::default();
        assert!((model.tick_cost(5) - 0.5).abs() < 1e-9);
        assert_eq!(model.tick_cost(0), 0.0);
    }
}
