//! States domain: airborne handlers.

use crate::states::handlers::StateHandler;
use crate::states::machine::StateContext;
use crate::states::types::{ActorState, InputSnapshot};

/// Gravity, capped horizontal air control and air drain, shared by both
/// airborne states.
fn apply_air_physics(ctx: &mut StateContext<'_>, delta: f32, input: &InputSnapshot) {
    let tuning = ctx.tuning;
    ctx.kinematics.air_supply = (ctx.kinematics.air_supply - tuning.air_drain * delta).max(0.0);
    let velocity = &mut ctx.kinematics.velocity;

    velocity.y -= tuning.gravity * delta;

    let accel = tuning.air_accel() * delta;
    if input.move_right {
        velocity.x = (velocity.x + accel).min(tuning.max_run);
    } else if input.move_left {
        velocity.x = (velocity.x - accel).max(-tuning.max_run);
    }
}

fn landed(ctx: &StateContext<'_>) -> bool {
    ctx.kinematics.grounded && ctx.kinematics.velocity.y <= 0.0
}

/// Touch down: drop the fall speed and hand over to Idle.
fn land(ctx: &mut StateContext<'_>) {
    ctx.kinematics.velocity.y = 0.0;
    ctx.change_state(ActorState::Idle);
}

/// Airborne after a grounded jump or a fall.
#[derive(Debug, Default)]
pub struct AirState;

impl StateHandler for AirState {
    fn update(&mut self, ctx: &mut StateContext<'_>, delta: f32, input: &InputSnapshot) {
        apply_air_physics(ctx, delta, input);

        if landed(ctx) {
            land(ctx);
        } else if input.jump && !ctx.kinematics.grounded {
            ctx.change_state(ActorState::InAir);
        }
    }
}

/// Airborne after the mid-air jump. No further jumps until landing.
#[derive(Debug, Default)]
pub struct InAirState;

impl StateHandler for InAirState {
    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        ctx.kinematics.velocity.y = ctx.tuning.jump_velocity;
    }

    fn update(&mut self, ctx: &mut StateContext<'_>, delta: f32, input: &InputSnapshot) {
        apply_air_physics(ctx, delta, input);

        if landed(ctx) {
            land(ctx);
        }
    }
}
