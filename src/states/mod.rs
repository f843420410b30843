//! States domain: the per-actor behavior state machine.
//!
//! `StateMachine` owns one handler per `ActorState` and drives exactly one of
//! them per frame. Everything engine-facing (input, physics bodies, damage)
//! lives in the actor domain and talks to the machine through
//! `change_state`, `tick` and `start_hook`.

mod error;
pub(crate) mod handlers;
mod machine;
mod tuning;
mod types;

pub use error::StateError;
pub use handlers::StateHandler;
pub use machine::{Body, StateContext, StateMachine};
pub use tuning::{StateTuning, TuningLoadError, load_tuning, parse_tuning};
pub use types::{ActorState, InputSnapshot, Kinematics, Motif};

use bevy::prelude::*;

pub struct StatesPlugin;

impl Plugin for StatesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StateTuning>()
            .add_systems(PreStartup, tuning::load_tuning_from_disk);
    }
}
