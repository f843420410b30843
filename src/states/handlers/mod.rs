//! States domain: one handler per gameplay mode.

pub(crate) mod airborne;
pub(crate) mod combat;
pub(crate) mod ground;
pub(crate) mod hook;
pub(crate) mod traversal;

use crate::states::machine::StateContext;
use crate::states::types::{ActorState, InputSnapshot, Motif};

pub use airborne::{AirState, InAirState};
pub use combat::{CooldownState, ParryState, RetiredState, StaggeredState};
pub use ground::{AttackingState, IdleState, MovingState};
pub use hook::HookState;
pub use traversal::{ClimbState, DashState};

/// Behavior attached to one `ActorState`.
///
/// Handlers never hold onto the machine. Each call gets a `StateContext`
/// through which they read and write kinematics and request transitions.
pub trait StateHandler: Send + Sync {
    fn enter(&mut self, _ctx: &mut StateContext<'_>) {}

    fn update(&mut self, ctx: &mut StateContext<'_>, delta: f32, input: &InputSnapshot);

    fn exit(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Called before `update` on every tick the body is off the ground.
    fn on_airborne(&mut self, _ctx: &mut StateContext<'_>) {}

    fn motif(&self) -> Option<Motif> {
        None
    }
}

/// Input-driven exits shared by the grounded handlers. Returns true when a
/// transition was requested.
pub(crate) fn grounded_actions(ctx: &mut StateContext<'_>, input: &InputSnapshot) -> bool {
    if input.jump && ctx.kinematics.grounded {
        ctx.kinematics.velocity.y = ctx.tuning.jump_velocity;
        ctx.change_state(ActorState::Air);
    } else if input.dash {
        ctx.change_state(ActorState::Dash);
    } else if input.climb {
        ctx.change_state(ActorState::Climb);
    } else if input.parry {
        ctx.change_state(ActorState::Parry);
    } else {
        return false;
    }
    true
}

/// Registry built by `StateMachine::initialize`: one handler per state.
pub(crate) fn default_registry() -> Vec<(ActorState, Box<dyn StateHandler>)> {
    vec![
        (ActorState::Idle, Box::new(IdleState)),
        (ActorState::Moving, Box::new(MovingState)),
        (ActorState::Attacking, Box::new(AttackingState::default())),
        (ActorState::Air, Box::new(AirState)),
        (ActorState::InAir, Box::new(InAirState)),
        (ActorState::Dash, Box::new(DashState::default())),
        (ActorState::Climb, Box::new(ClimbState)),
        (ActorState::Parry, Box::new(ParryState::default())),
        (ActorState::Staggered, Box::new(StaggeredState)),
        (
            ActorState::SymphonCooldown,
            Box::new(CooldownState::symphon()),
        ),
        (
            ActorState::StrikeSpecialCooldown,
            Box::new(CooldownState::strike_special()),
        ),
        (ActorState::Hook, Box::new(HookState::unaimed())),
        (ActorState::Retired, Box::new(RetiredState)),
    ]
}
