//! proscale-sim — simulation harness for the decision engine.
//!
//! Generates deterministic synthetic traffic, replays recorded samples,
//! and drives the controller/classifier pair tick by tick, accumulating
//! a cost comparison against an always-on fixed fleet. Everything here
//! is deterministic: the same pattern and policies always produce the
//! same tick reports.

pub mod cost;
pub mod replay;
pub mod sim;
pub mod traffic;

pub use cost::CostTracker;
pub use replay::ReplayFeed;
pub use sim::{Simulation, SimulationSummary};
pub use traffic::{ShiftedForecast, TrafficGenerator, TrafficPattern};
