//! proscale-core — shared types and policies for the proscale engine.
//!
//! Defines the domain types exchanged between the load feed, the decision
//! engine, and consumers (`LoadSample` in, `DecisionResult` out), the
//! validated policy structs the engine is constructed from, and the
//! `proscale.toml` configuration surface.
//!
//! Policies are validated at construction time: a controller is never built
//! from a policy that could produce silently wrong targets.

pub mod config;
pub mod error;
pub mod policy;
pub mod types;

pub use config::ProscaleConfig;
pub use error::{PolicyError, PolicyResult};
pub use policy::{AnomalyPolicy, CostModel, ScalingPolicy};
pub use types::*;
