//! proscale.toml configuration parser.
//!
//! Every table and field is optional; unset fields fall back to the
//! policy defaults. The typed policies are produced by the `*_policy()`
//! accessors, which also validate.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PolicyResult;
use crate::policy::{AnomalyPolicy, CostModel, ScalingPolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProscaleConfig {
    pub scaling: Option<ScalingSection>,
    pub anomaly: Option<AnomalySection>,
    pub cost: Option<CostSection>,
    pub simulation: Option<SimulationSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalingSection {
    pub min_replicas: Option<u32>,
    pub max_replicas: Option<u32>,
    pub capacity_per_replica: Option<f64>,
    pub cooldown_ticks: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnomalySection {
    pub spike_multiplier: Option<f64>,
    pub drop_multiplier: Option<f64>,
    pub drop_floor: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostSection {
    pub cost_per_replica_tick: Option<f64>,
    pub fixed_replicas: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Number of ticks to simulate.
    pub steps: Option<u64>,
    /// Replica count at tick 0.
    pub initial_replicas: Option<u32>,
    /// Traffic pattern name: "smooth", "spike", or "daily".
    pub pattern: Option<String>,
}

impl ProscaleConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ProscaleConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Scaffold a config with all defaults spelled out.
    pub fn scaffold() -> Self {
        let scaling = ScalingPolicy::default();
        let anomaly = AnomalyPolicy::default();
        let cost = CostModel::default();
        ProscaleConfig {
            scaling: Some(ScalingSection {
                min_replicas: Some(scaling.min_replicas),
                max_replicas: Some(scaling.max_replicas),
                capacity_per_replica: Some(scaling.capacity_per_replica),
                cooldown_ticks: Some(scaling.cooldown_ticks),
            }),
            anomaly: Some(AnomalySection {
                spike_multiplier: Some(anomaly.spike_multiplier),
                drop_multiplier: Some(anomaly.drop_multiplier),
                drop_floor: Some(anomaly.drop_floor),
            }),
            cost: Some(CostSection {
                cost_per_replica_tick: Some(cost.cost_per_replica_tick),
                fixed_replicas: Some(cost.fixed_replicas),
            }),
            simulation: Some(SimulationSection {
                steps: Some(200),
                initial_replicas: Some(5),
                pattern: Some("daily".to_string()),
            }),
        }
    }

    /// Build the validated scaling policy, defaults filling unset fields.
    pub fn scaling_policy(&self) -> PolicyResult<ScalingPolicy> {
        let base = ScalingPolicy::default();
        let section = self.scaling.clone().unwrap_or_default();
        let policy = ScalingPolicy {
            min_replicas: section.min_replicas.unwrap_or(base.min_replicas),
            max_replicas: section.max_replicas.unwrap_or(base.max_replicas),
            capacity_per_replica: section
                .capacity_per_replica
                .unwrap_or(base.capacity_per_replica),
            cooldown_ticks: section.cooldown_ticks.unwrap_or(base.cooldown_ticks),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Build the validated anomaly policy.
    pub fn anomaly_policy(&self) -> PolicyResult<AnomalyPolicy> {
        let base = AnomalyPolicy::default();
        let section = self.anomaly.clone().unwrap_or_default();
        let policy = AnomalyPolicy {
            spike_multiplier: section.spike_multiplier.unwrap_or(base.spike_multiplier),
            drop_multiplier: section.drop_multiplier.unwrap_or(base.drop_multiplier),
            drop_floor: section.drop_floor.unwrap_or(base.drop_floor),
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Build the validated cost model.
    pub fn cost_model(&self) -> PolicyResult<CostModel> {
        let base = CostModel::default();
        let section = self.cost.clone().unwrap_or_default();
        let model = CostModel {
            cost_per_replica_tick: section
                .cost_per_replica_tick
                .unwrap_or(base.cost_per_replica_tick),
            fixed_replicas: section.fixed_replicas.unwrap_or(base.fixed_replicas),
        };
        model.validate()?;
        Ok(model)
    }
}
