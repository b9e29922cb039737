//! proscale-engine — the autoscaling decision core.
//!
//! Converts a stream of `(current_load, forecast_load, current_replicas)`
//! samples into a bounded, hysteresis-stable replica count, one decision
//! per tick. A stateless classifier flags ticks where the observed load
//! diverges sharply from the forecast.
//!
//! # Decision Algorithm
//!
//! ```text
//! predictive = ceil(forecast_load / capacity_per_replica)
//! reactive   = ceil(current_load  / capacity_per_replica)
//!
//! target = if reactive > predictive { reactive }   // forecast under-shot
//!          else                     { predictive } // safe to pre-warm
//! target = clamp(target, min_replicas, max_replicas)
//!
//! if target > current:  ScaleOut, cooldown := cooldown_ticks   // never blocked
//! if target < current:  ScaleIn if cooldown == 0 (resets it),
//!                       else CooldownBlocked (replicas held, cooldown -= 1)
//! if target == current: Stable (cooldown -= 1 if positive)
//! ```
//!
//! Scale-out is deliberately exempt from the cooldown: refusing growth
//! risks overload, while the cooldown window after any action keeps the
//! fleet from flapping back down.

pub mod anomaly;
pub mod controller;

pub use anomaly::AnomalyClassifier;
pub use controller::AutoscaleController;
