//! Simulation runner — wires a sample feed through the controller and
//! classifier, one tick at a time.

use tracing::{debug, info};

use proscale_core::{
    AnomalyKind, AnomalyPolicy, CostModel, LoadSample, ScaleAction, ScalingPolicy, TickReport,
};
use proscale_engine::{AnomalyClassifier, AutoscaleController};

use crate::cost::CostTracker;

/// Aggregate view over a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub scale_outs: u64,
    pub scale_ins: u64,
    pub cooldown_blocks: u64,
    pub anomalies: u64,
    pub final_replicas: u32,
    pub autoscaled_cost: f64,
    pub fixed_cost: f64,
    pub savings_pct: f64,
}

/// Drives the engine over a sample stream, tracking replicas and cost
/// between ticks.
pub struct Simulation {
    controller: AutoscaleController,
    classifier: AnomalyClassifier,
    cost: CostTracker,
    replicas: u32,
}

impl Simulation {
    pub fn new(
        scaling: ScalingPolicy,
        anomaly: AnomalyPolicy,
        cost: CostModel,
        initial_replicas: u32,
    ) -> proscale_core::PolicyResult<Self> {
        let controller = AutoscaleController::new(scaling)?;
        let classifier = AnomalyClassifier::new(anomaly)?;
        // Start inside the bounds the controller will enforce anyway.
        let replicas = scaling.clamp(initial_replicas);
        Ok(Self {
            controller,
            classifier,
            cost: CostTracker::new(cost),
            replicas,
        })
    }

    /// Current replica count (the result of the last step).
    pub fn replicas(&self) -> u32 {
        self.replicas
    }

    /// Evaluate one sample and advance the fleet.
    pub fn step(&mut self, sample: LoadSample) -> TickReport {
        let decision =
            self.controller
                .decide(sample.current_load, sample.forecast_load, self.replicas);
        let anomaly = self
            .classifier
            .classify(sample.current_load, sample.forecast_load);
        self.replicas = decision.replicas;
        let (cost, cost_fixed) = self.cost.record(decision.replicas);

        let capacity = decision.replicas as f64 * self.controller.policy().capacity_per_replica;
        let cpu_utilization = if capacity > 0.0 {
            (sample.current_load.max(0.0) / capacity).min(1.0)
        } else {
            0.0
        };

        debug!(
            tick = sample.tick,
            load = sample.current_load,
            forecast = sample.forecast_load,
            replicas = decision.replicas,
            action = ?decision.action,
            anomaly = ?anomaly,
            "simulation tick"
        );

        TickReport {
            tick: sample.tick,
            current_load: sample.current_load,
            forecast_load: sample.forecast_load,
            decision,
            anomaly,
            cpu_utilization,
            cost,
            cost_fixed,
        }
    }

    /// Run an entire sample stream to completion.
    pub fn run(&mut self, samples: impl IntoIterator<Item = LoadSample>) -> Vec<TickReport> {
        let reports: Vec<TickReport> = samples.into_iter().map(|s| self.step(s)).collect();
        let summary = self.summarize(&reports);
        info!(
            ticks = summary.ticks,
            scale_outs = summary.scale_outs,
            scale_ins = summary.scale_ins,
            cooldown_blocks = summary.cooldown_blocks,
            savings_pct = summary.savings_pct,
            "simulation finished"
        );
        reports
    }

    /// Summarize a set of reports produced by this simulation.
    pub fn summarize(&self, reports: &[TickReport]) -> SimulationSummary {
        let mut scale_outs = 0;
        let mut scale_ins = 0;
        let mut cooldown_blocks = 0;
        let mut anomalies = 0;
        for report in reports {
            match report.decision.action {
                ScaleAction::ScaleOut => scale_outs += 1,
                ScaleAction::ScaleIn => scale_ins += 1,
                ScaleAction::CooldownBlocked => cooldown_blocks += 1,
                ScaleAction::Stable | ScaleAction::None => {}
            }
            if report.anomaly != AnomalyKind::Normal {
                anomalies += 1;
            }
        }
        SimulationSummary {
            ticks: reports.len() as u64,
            scale_outs,
            scale_ins,
            cooldown_blocks,
            anomalies,
            final_replicas: self.replicas,
            autoscaled_cost: self.cost.autoscaled_total(),
            fixed_cost: self.cost.fixed_total(),
            savings_pct: self.cost.savings_pct(),
        }
    }
}
