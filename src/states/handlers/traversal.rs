//! States domain: dash and climb handlers.

use bevy::prelude::*;

use crate::states::handlers::StateHandler;
use crate::states::machine::StateContext;
use crate::states::types::{ActorState, InputSnapshot};

#[derive(Debug, Default)]
pub struct DashState {
    timer: f32,
    direction: Vec2,
}

impl DashState {
    /// Held directions first, then the sign of the current horizontal
    /// velocity. Zero means there is nowhere to dash.
    fn resolve_direction(ctx: &StateContext<'_>) -> Vec2 {
        if ctx.input.has_direction() {
            return ctx.input.direction();
        }
        let vx = ctx.kinematics.velocity.x;
        if vx == 0.0 {
            Vec2::ZERO
        } else {
            Vec2::new(vx.signum(), 0.0)
        }
    }
}

impl StateHandler for DashState {
    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        let direction = Self::resolve_direction(ctx);
        if direction == Vec2::ZERO {
            debug!("Dash cancelled: no direction");
            self.timer = 0.0;
            self.direction = Vec2::ZERO;
            ctx.change_state(ActorState::Idle);
            return;
        }

        self.timer = ctx.tuning.dash_time;
        self.direction = direction;
        ctx.kinematics.velocity = direction * ctx.tuning.dash_speed;
    }

    fn update(&mut self, ctx: &mut StateContext<'_>, delta: f32, _input: &InputSnapshot) {
        self.timer -= delta;
        if self.timer <= 0.0 {
            ctx.change_state(ActorState::Idle);
        }
    }

    fn exit(&mut self, ctx: &mut StateContext<'_>) {
        // A cancelled dash never set a velocity, so it has nothing to stop.
        if self.direction != Vec2::ZERO {
            ctx.kinematics.velocity = Vec2::ZERO;
            self.direction = Vec2::ZERO;
        }
    }
}

#[derive(Debug, Default)]
pub struct ClimbState;

impl StateHandler for ClimbState {
    fn update(&mut self, ctx: &mut StateContext<'_>, delta: f32, input: &InputSnapshot) {
        let tuning = ctx.tuning;

        if input.move_up {
            let vy = ctx.kinematics.velocity.y;
            ctx.kinematics.velocity.y = (vy + tuning.climb_accel * delta).min(tuning.climb_up_speed);
            ctx.spend_stamina(delta);
        } else if input.move_down {
            let vy = ctx.kinematics.velocity.y;
            ctx.kinematics.velocity.y =
                (vy - tuning.climb_accel * delta).max(-tuning.climb_down_speed);
            ctx.spend_stamina(delta);
        } else {
            let vy = ctx.kinematics.velocity.y;
            let t = (tuning.climb_slip_speed * delta).clamp(0.0, 1.0);
            ctx.kinematics.velocity.y = vy + (0.0 - vy) * t;
        }

        if ctx.kinematics.stamina <= 0.0 {
            ctx.change_state(ActorState::Air);
        } else if input.jump {
            // Let go of the wall.
            ctx.change_state(ActorState::Air);
        }
    }
}
