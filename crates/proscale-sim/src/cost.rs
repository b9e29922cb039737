//! Cost comparison against a fixed-size baseline fleet.

use proscale_core::CostModel;

/// Accumulates the autoscaled fleet's cost alongside what an always-on
/// fixed fleet would have cost over the same ticks.
#[derive(Debug, Clone, Copy)]
pub struct CostTracker {
    model: CostModel,
    autoscaled_total: f64,
    fixed_total: f64,
    ticks: u64,
}

impl CostTracker {
    pub fn new(model: CostModel) -> Self {
        Self {
            model,
            autoscaled_total: 0.0,
            fixed_total: 0.0,
            ticks: 0,
        }
    }

    /// Record one tick at the given autoscaled replica count. Returns
    /// `(autoscaled_cost, fixed_cost)` for the tick.
    pub fn record(&mut self, replicas: u32) -> (f64, f64) {
        let cost = self.model.tick_cost(replicas);
        let fixed = self.model.tick_cost(self.model.fixed_replicas);
        self.autoscaled_total += cost;
        self.fixed_total += fixed;
        self.ticks += 1;
        (cost, fixed)
    }

    pub fn autoscaled_total(&self) -> f64 {
        self.autoscaled_total
    }

    pub fn fixed_total(&self) -> f64 {
        self.fixed_total
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Percentage saved versus the fixed baseline; 0 when nothing has
    /// been recorded or the baseline costs nothing.
    pub fn savings_pct(&self) -> f64 {
        if self.fixed_total <= 0.0 {
            return 0.0;
        }
        (self.fixed_total - self.autoscaled_total) / self.fixed_total * 100.0
    }
}
