//! States domain: combat handlers whose exits are driven by the actor layer.

use bevy::prelude::*;

use crate::states::handlers::StateHandler;
use crate::states::machine::StateContext;
use crate::states::types::{InputSnapshot, Motif};

#[derive(Debug)]
pub struct ParryState {
    motif: Motif,
}

impl Default for ParryState {
    fn default() -> Self {
        Self {
            motif: Motif::new(2, "Parry").with_cooldown(0.2),
        }
    }
}

impl StateHandler for ParryState {
    fn update(&mut self, _ctx: &mut StateContext<'_>, _delta: f32, _input: &InputSnapshot) {}

    fn motif(&self) -> Option<Motif> {
        Some(self.motif.clone())
    }
}

#[derive(Debug, Default)]
pub struct StaggeredState;

impl StateHandler for StaggeredState {
    fn update(&mut self, _ctx: &mut StateContext<'_>, _delta: f32, _input: &InputSnapshot) {}
}

/// Recovery after a symphon or special strike. The timer lives with the
/// caller; this state only reports which ability is cooling down.
#[derive(Debug)]
pub struct CooldownState {
    motif: Motif,
}

impl CooldownState {
    pub fn new(motif: Motif) -> Self {
        Self { motif }
    }

    pub fn symphon() -> Self {
        Self::new(Motif::new(3, "Symphon").with_cooldown(1.5))
    }

    pub fn strike_special() -> Self {
        Self::new(
            Motif::new(4, "Strike Special")
                .with_damage(25.0)
                .with_cooldown(2.0),
        )
    }
}

impl StateHandler for CooldownState {
    fn update(&mut self, _ctx: &mut StateContext<'_>, _delta: f32, _input: &InputSnapshot) {}

    fn motif(&self) -> Option<Motif> {
        Some(self.motif.clone())
    }
}

/// Terminal state.
#[derive(Debug, Default)]
pub struct RetiredState;

impl StateHandler for RetiredState {
    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        ctx.kinematics.velocity = Vec2::ZERO;
    }

    fn update(&mut self, _ctx: &mut StateContext<'_>, _delta: f32, _input: &InputSnapshot) {}
}
