//! States domain: grounded handlers.

use crate::states::handlers::{StateHandler, grounded_actions};
use crate::states::machine::StateContext;
use crate::states::types::{ActorState, InputSnapshot, Motif};

#[derive(Debug, Default)]
pub struct IdleState;

impl StateHandler for IdleState {
    fn update(&mut self, ctx: &mut StateContext<'_>, _delta: f32, input: &InputSnapshot) {
        if grounded_actions(ctx, input) {
            return;
        }
        if input.has_horizontal() {
            ctx.change_state(ActorState::Moving);
        }
    }

    fn on_airborne(&mut self, ctx: &mut StateContext<'_>) {
        ctx.change_state(ActorState::Air);
    }
}

#[derive(Debug, Default)]
pub struct MovingState;

impl StateHandler for MovingState {
    fn update(&mut self, ctx: &mut StateContext<'_>, _delta: f32, input: &InputSnapshot) {
        if grounded_actions(ctx, input) {
            return;
        }

        if input.move_right {
            ctx.kinematics.velocity.x = ctx.tuning.speed;
        } else if input.move_left {
            ctx.kinematics.velocity.x = -ctx.tuning.speed;
        } else {
            ctx.kinematics.velocity.x = 0.0;
            ctx.change_state(ActorState::Idle);
        }
    }

    fn on_airborne(&mut self, ctx: &mut StateContext<'_>) {
        ctx.change_state(ActorState::Air);
    }
}

/// Holds still while a strike plays out. The actor layer decides when the
/// strike ends.
#[derive(Debug)]
pub struct AttackingState {
    strike: Motif,
}

impl AttackingState {
    pub fn new(strike: Motif) -> Self {
        Self { strike }
    }
}

impl Default for AttackingState {
    fn default() -> Self {
        Self::new(Motif::new(1, "Strike").with_damage(10.0).with_cooldown(0.5))
    }
}

impl StateHandler for AttackingState {
    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        ctx.kinematics.velocity.x = 0.0;
    }

    fn update(&mut self, _ctx: &mut StateContext<'_>, _delta: f32, _input: &InputSnapshot) {}

    fn on_airborne(&mut self, ctx: &mut StateContext<'_>) {
        ctx.change_state(ActorState::Air);
    }

    fn motif(&self) -> Option<Motif> {
        Some(self.strike.clone())
    }
}
