//! Autoscale controller — the 3-layer decision engine.
//!
//! Layer 1 sizes the fleet for the forecast (pre-warming), layer 2
//! overrides with the observed load when the forecast under-shoots,
//! layer 3 clamps to bounds and applies the cooldown window that keeps
//! the fleet from flapping.

use tracing::debug;

use proscale_core::{DecisionResult, PolicyResult, ScaleAction, ScalingPolicy};

/// Outcome of the stability layer, before it is applied to controller
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    action: ScaleAction,
    replicas: u32,
    cooldown_counter: u32,
}

/// Stateful decision engine for one scaling target.
///
/// Owns its cooldown state exclusively; `decide` is the only mutator.
/// Not safe for concurrent invocation on the same instance — the design
/// assumes one logical caller driving one tick at a time. Independent
/// scaling targets each get their own controller.
pub struct AutoscaleController {
    policy: ScalingPolicy,
    /// Ticks remaining before a scale-in is permitted.
    cooldown_counter: u32,
    last_action: ScaleAction,
}

impl AutoscaleController {
    /// Create a controller, rejecting invalid policies up front.
    pub fn new(policy: ScalingPolicy) -> PolicyResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            cooldown_counter: 0,
            last_action: ScaleAction::None,
        })
    }

    pub fn policy(&self) -> &ScalingPolicy {
        &self.policy
    }

    /// Ticks remaining before a scale-in is permitted.
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_counter
    }

    /// The action taken on the most recent tick.
    pub fn last_action(&self) -> ScaleAction {
        self.last_action
    }

    /// Evaluate one tick and update cooldown state.
    ///
    /// `current_replicas` is the caller's view of the fleet and the
    /// baseline for the scale-out/scale-in comparison; the result is
    /// always within the policy bounds regardless. Negative or NaN
    /// loads are clamped to zero rather than rejected — sensor noise
    /// must not crash the control loop.
    pub fn decide(
        &mut self,
        current_load: f64,
        forecast_load: f64,
        current_replicas: u32,
    ) -> DecisionResult {
        let current_load = sanitize_load(current_load);
        let forecast_load = sanitize_load(forecast_load);

        // Layer 1: size for the forecast.
        let predictive_target = replicas_for(forecast_load, self.policy.capacity_per_replica);
        // Layer 2: size for reality; strictly greater means the model
        // is under-predicting and the observed load wins. Ties go to
        // the predictive branch.
        let reactive_target = replicas_for(current_load, self.policy.capacity_per_replica);

        let target = if reactive_target > predictive_target {
            reactive_target
        } else {
            predictive_target
        };

        // Layer 3: bounds, then cooldown vs the current fleet.
        let target = self.policy.clamp(target);
        let t = stability_transition(
            self.cooldown_counter,
            self.policy.cooldown_ticks,
            target,
            current_replicas,
        );

        self.cooldown_counter = t.cooldown_counter;
        self.last_action = t.action;

        if t.action != ScaleAction::Stable {
            debug!(
                action = ?t.action,
                from = current_replicas,
                to = t.replicas,
                predictive = predictive_target,
                reactive = reactive_target,
                cooldown = t.cooldown_counter,
                "scaling decision"
            );
        }

        DecisionResult {
            replicas: t.replicas,
            predictive_target,
            reactive_target,
            action: t.action,
            cooldown_remaining: t.cooldown_counter,
        }
    }
}

/// Pure stability-layer transition: given the cooldown counter and the
/// bounded target, produce the action, the final replica count, and the
/// next counter value.
fn stability_transition(
    cooldown_counter: u32,
    cooldown_ticks: u32,
    target: u32,
    current_replicas: u32,
) -> Transition {
    if target > current_replicas {
        // Growth is never blocked; the fresh window suppresses an
        // immediate flap back down.
        Transition {
            action: ScaleAction::ScaleOut,
            replicas: target,
            cooldown_counter: cooldown_ticks,
        }
    } else if target < current_replicas {
        if cooldown_counter > 0 {
            Transition {
                action: ScaleAction::CooldownBlocked,
                replicas: current_replicas,
                cooldown_counter: cooldown_counter - 1,
            }
        } else {
            Transition {
                action: ScaleAction::ScaleIn,
                replicas: target,
                cooldown_counter: cooldown_ticks,
            }
        }
    } else {
        Transition {
            action: ScaleAction::Stable,
            replicas: target,
            cooldown_counter: cooldown_counter.saturating_sub(1),
        }
    }
}

/// Replicas needed to serve `load` at `capacity` requests per replica.
fn replicas_for(load: f64, capacity: f64) -> u32 {
    (load / capacity).ceil() as u32
}

fn sanitize_load(load: f64) -> f64 {
    if load.is_nan() || load < 0.0 { 0.0 } else { load }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proscale_core::PolicyError;

    fn controller() -> AutoscaleController {
        // capacity=150, min=1, max=20, cooldown=3
        AutoscaleController::new(ScalingPolicy::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_policy() {
        let policy = ScalingPolicy {
            capacity_per_replica: 0.0,
            ..Default::default()
        };
        assert_eq!(
            AutoscaleController::new(policy).err(),
            Some(PolicyError::InvalidCapacity(0.0))
        );
    }

    #[test]
    fn reactive_override_scales_out_immediately() {
        let mut ctrl = controller();
        // predictive=ceil(600/150)=4, reactive=ceil(900/150)=6 → override.
        let result = ctrl.decide(900.0, 600.0, 5);
        assert_eq!(result.predictive_target, 4);
        assert_eq!(result.reactive_target, 6);
        assert_eq!(result.replicas, 6);
        assert_eq!(result.action, ScaleAction::ScaleOut);
        assert_eq!(result.cooldown_remaining, 3);
    }

    #[test]
    fn cooldown_blocks_scale_in_after_scale_out() {
        let mut ctrl = controller();
        ctrl.decide(900.0, 600.0, 5);
        // Load collapses; target=2 < 6, but the window is fresh.
        let result = ctrl.decide(200.0, 200.0, 6);
        assert_eq!(result.replicas, 6);
        assert_eq!(result.action, ScaleAction::CooldownBlocked);
        assert_eq!(result.cooldown_remaining, 2);
    }

    #[test]
    fn scale_in_permitted_after_cooldown_drains() {
        let mut ctrl = controller();
        ctrl.decide(900.0, 600.0, 5); // cooldown = 3
        for expected in [2, 1, 0] {
            let result = ctrl.decide(200.0, 200.0, 6);
            assert_eq!(result.action, ScaleAction::CooldownBlocked);
            assert_eq!(result.cooldown_remaining, expected);
            assert_eq!(result.replicas, 6);
        }
        let result = ctrl.decide(200.0, 200.0, 6);
        assert_eq!(result.action, ScaleAction::ScaleIn);
        assert_eq!(result.replicas, 2);
        assert_eq!(result.cooldown_remaining, 3); // reset on action
    }

    #[test]
    fn predictive_prewarming_without_override() {
        let mut ctrl = controller();
        // Forecast above current: follow the forecast.
        let result = ctrl.decide(300.0, 900.0, 2);
        assert_eq!(result.predictive_target, 6);
        assert_eq!(result.reactive_target, 2);
        assert_eq!(result.replicas, 6);
        assert_eq!(result.action, ScaleAction::ScaleOut);
    }

    #[test]
    fn tie_between_targets_is_not_an_override() {
        let mut ctrl = controller();
        let result = ctrl.decide(450.0, 450.0, 3);
        assert_eq!(result.predictive_target, result.reactive_target);
        assert_eq!(result.replicas, 3);
        assert_eq!(result.action, ScaleAction::Stable);
    }

    #[test]
    fn stable_tick_drains_cooldown() {
        let mut ctrl = controller();
        ctrl.decide(900.0, 600.0, 5); // cooldown = 3
        let result = ctrl.decide(900.0, 900.0, 6); // target == current
        assert_eq!(result.action, ScaleAction::Stable);
        assert_eq!(result.cooldown_remaining, 2);
    }

    #[test]
    fn stable_tick_at_zero_cooldown_stays_zero() {
        let mut ctrl = controller();
        let result = ctrl.decide(150.0, 150.0, 1);
        assert_eq!(result.action, ScaleAction::Stable);
        assert_eq!(result.cooldown_remaining, 0);
    }

    #[test]
    fn scale_out_ignores_cooldown() {
        let mut ctrl = controller();
        ctrl.decide(900.0, 600.0, 5); // cooldown = 3
        let result = ctrl.decide(1500.0, 600.0, 6);
        assert_eq!(result.action, ScaleAction::ScaleOut);
        assert_eq!(result.replicas, 10);
        assert_eq!(result.cooldown_remaining, 3);
    }

    #[test]
    fn bounds_hold_for_extreme_loads() {
        let mut ctrl = controller();
        let result = ctrl.decide(1_000_000.0, 0.0, 5);
        assert_eq!(result.replicas, 20);
        assert_eq!(result.action, ScaleAction::ScaleOut);

        let mut ctrl = controller();
        let result = ctrl.decide(0.0, 0.0, 5);
        assert_eq!(result.replicas, 1);
        assert_eq!(result.action, ScaleAction::ScaleIn);
    }

    #[test]
    fn negative_and_nan_loads_clamp_to_zero() {
        let mut ctrl = controller();
        let result = ctrl.decide(-500.0, f64::NAN, 1);
        assert_eq!(result.predictive_target, 0);
        assert_eq!(result.reactive_target, 0);
        assert_eq!(result.replicas, 1); // min bound
        assert_eq!(result.action, ScaleAction::Stable);
    }

    #[test]
    fn zero_load_scale_in_lands_on_min() {
        let policy = ScalingPolicy {
            min_replicas: 2,
            ..Default::default()
        };
        let mut ctrl = AutoscaleController::new(policy).unwrap();
        let result = ctrl.decide(0.0, 0.0, 8);
        assert_eq!(result.replicas, 2);
        assert_eq!(result.action, ScaleAction::ScaleIn);
    }

    #[test]
    fn last_action_tracks_most_recent_tick() {
        let mut ctrl = controller();
        assert_eq!(ctrl.last_action(), ScaleAction::None);
        ctrl.decide(900.0, 600.0, 5);
        assert_eq!(ctrl.last_action(), ScaleAction::ScaleOut);
        ctrl.decide(200.0, 200.0, 6);
        assert_eq!(ctrl.last_action(), ScaleAction::CooldownBlocked);
    }

    #[test]
    fn transition_function_is_pure() {
        let a = stability_transition(2, 3, 4, 6);
        let b = stability_transition(2, 3, 4, 6);
        assert_eq!(a, b);
        assert_eq!(a.action, ScaleAction::CooldownBlocked);
        assert_eq!(a.replicas, 6);
        assert_eq!(a.cooldown_counter, 1);
    }
}
