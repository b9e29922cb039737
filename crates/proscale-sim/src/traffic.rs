//! Deterministic synthetic traffic patterns.
//!
//! Stand-ins for live telemetry and for the external forecasting model:
//! the generator produces the "observed" load, and `ShiftedForecast`
//! produces a biased look-ahead over the same pattern. Deterministic on
//! purpose, so simulations and tests are reproducible.

use std::f64::consts::TAU;
use std::str::FromStr;

use proscale_core::LoadSample;

/// Ticks per simulated day, for the daily pattern.
const TICKS_PER_DAY: u64 = 1440;

/// Shape of the generated load curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrafficPattern {
    /// Slow sine wave around the base load.
    Smooth,
    /// Base load with periodic square-wave bursts.
    Spike,
    /// Work-hours curve over a 1440-tick day.
    Daily,
}

impl FromStr for TrafficPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smooth" => Ok(TrafficPattern::Smooth),
            "spike" => Ok(TrafficPattern::Spike),
            "daily" => Ok(TrafficPattern::Daily),
            other => anyhow::bail!("unknown traffic pattern: {other} (expected smooth, spike, or daily)"),
        }
    }
}

/// Generates load values for a pattern, tick by tick.
#[derive(Debug, Clone, Copy)]
pub struct TrafficGenerator {
    pattern: TrafficPattern,
    /// Mean load level the patterns oscillate around.
    pub base_load: f64,
}

impl TrafficGenerator {
    pub fn new(pattern: TrafficPattern) -> Self {
        Self {
            pattern,
            base_load: 500.0,
        }
    }

    pub fn with_base_load(mut self, base_load: f64) -> Self {
        self.base_load = base_load.max(0.0);
        self
    }

    /// Load at a given tick. Never negative.
    pub fn load_at(&self, tick: u64) -> f64 {
        let load = match self.pattern {
            TrafficPattern::Smooth => {
                self.base_load + 0.5 * self.base_load * (tick as f64 / 50.0).sin()
            }
            TrafficPattern::Spike => {
                // A burst of 3x base load for 10 ticks out of every 60.
                let burst = if tick % 60 < 10 { 3.0 * self.base_load } else { 0.0 };
                0.8 * self.base_load + burst
            }
            TrafficPattern::Daily => {
                // Low overnight, peaking mid-day.
                let phase = (tick % TICKS_PER_DAY) as f64 / TICKS_PER_DAY as f64;
                let day_curve = (phase * TAU - TAU / 4.0).sin();
                self.base_load * (0.6 + 0.8 * day_curve.max(0.0))
            }
        };
        load.max(0.0)
    }
}

/// Forecast stand-in: reads the pattern `horizon` ticks ahead and scales
/// it by a bias factor. A bias below 1.0 systematically under-predicts,
/// which exercises the controller's reactive override.
#[derive(Debug, Clone, Copy)]
pub struct ShiftedForecast {
    generator: TrafficGenerator,
    horizon: u64,
    bias: f64,
}

impl ShiftedForecast {
    pub fn new(generator: TrafficGenerator, horizon: u64, bias: f64) -> Self {
        Self {
            generator,
            horizon,
            bias: bias.max(0.0),
        }
    }

    /// Forecast for a given tick.
    pub fn forecast_at(&self, tick: u64) -> f64 {
        self.generator.load_at(tick + self.horizon) * self.bias
    }

    /// Produce a full sample stream of `steps` ticks.
    pub fn samples(&self, steps: u64) -> Vec<LoadSample> {
        (0..steps)
            .map(|tick| LoadSample {
                tick,
                current_load: self.generator.load_at(tick),
                forecast_load: self.forecast_at(tick),
            })
            .collect()
    }
}
