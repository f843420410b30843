//! States domain: grappling hook pull.

use bevy::prelude::*;

use crate::states::handlers::StateHandler;
use crate::states::machine::StateContext;
use crate::states::types::{ActorState, InputSnapshot};

/// Pulls the actor toward a fixed point. Rebuilt for every new target.
#[derive(Debug)]
pub struct HookState {
    target: Option<Vec2>,
    pull_speed: f32,
}

impl HookState {
    pub fn new(target: Vec2, pull_speed: f32) -> Self {
        Self {
            target: Some(target),
            pull_speed,
        }
    }

    /// Registered until `start_hook` aims a real one. Entering it lets go
    /// straight away.
    pub fn unaimed() -> Self {
        Self {
            target: None,
            pull_speed: 0.0,
        }
    }
}

impl StateHandler for HookState {
    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        if self.target.is_none() {
            debug!("Hook entered without a target; releasing");
            ctx.change_state(ActorState::Idle);
        }
    }

    fn update(&mut self, ctx: &mut StateContext<'_>, _delta: f32, _input: &InputSnapshot) {
        let Some(target) = self.target else {
            return;
        };
        let position = ctx.kinematics.position;

        if position.distance(target) < ctx.tuning.hook_arrive_distance {
            ctx.kinematics.velocity = Vec2::ZERO;
            ctx.change_state(ActorState::Idle);
            return;
        }

        // normalize_or_zero keeps a degenerate target from producing NaN.
        let direction = (target - position).normalize_or_zero();
        ctx.kinematics.velocity = direction * self.pull_speed;
    }
}
