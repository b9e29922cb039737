//! Error types for policy validation.

use thiserror::Error;

/// Result type alias for policy construction and validation.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Configuration errors surfaced at construction time.
///
/// These are fatal: the controller refuses to construct rather than
/// produce silently wrong targets at runtime.
#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("min_replicas must be >= 1, got {0}")]
    MinReplicasZero(u32),

    #[error("min_replicas ({min}) must not exceed max_replicas ({max})")]
    ReplicaBoundsInverted { min: u32, max: u32 },

    #[error("capacity_per_replica must be positive and finite, got {0}")]
    InvalidCapacity(f64),

    #[error("spike_multiplier must be positive and finite, got {0}")]
    InvalidSpikeMultiplier(f64),

    #[error("drop_multiplier must be positive, finite, and below spike_multiplier ({spike}), got {drop}")]
    InvalidDropMultiplier { drop: f64, spike: f64 },

    #[error("drop_floor must be non-negative and finite, got {0}")]
    InvalidDropFloor(f64),

    #[error("cost_per_replica_tick must be non-negative and finite, got {0}")]
    InvalidCostRate(f64),
}
