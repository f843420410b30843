//! Actor domain: engine-facing bodies driven by the state machine.
//!
//! Each actor carries an `ActorStates` machine. Input sources fill the
//! `InputTable`, the ground ray feeds `Grounded`, and the machine writes
//! the velocity avian integrates.

mod bootstrap;
mod components;
mod events;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{
    ActionTimers, Actor, ActorKey, ActorStates, AiBehaviour, Behaviour, Facing, GameLayer, Ground,
    Grounded, RandomWalk,
};
pub use events::{ActorRetiredEvent, DamageEvent};
pub use resources::{ActionTuning, AiRng, InputTable};
pub use systems::{Action, choose_action, hook_target, random_walk_step, snapshot_from_keys, strike_targets};

use bevy::prelude::*;

use crate::actor::bootstrap::{spawn_actors, spawn_arena};
use crate::actor::systems::{
    apply_damage, cycle_executive_override, detect_ground, dim_retired_actors, drive_random_walk,
    handle_actions, read_keyboard_input, tick_actor_states, update_action_timers, update_facing,
};

pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputTable>()
            .init_resource::<ActionTuning>()
            .init_resource::<AiRng>()
            .add_message::<DamageEvent>()
            .add_message::<ActorRetiredEvent>()
            .add_systems(Startup, (spawn_arena, spawn_actors))
            .add_systems(
                Update,
                (
                    cycle_executive_override,
                    read_keyboard_input,
                    drive_random_walk,
                    detect_ground,
                    update_facing,
                    handle_actions,
                    tick_actor_states,
                    update_action_timers,
                    apply_damage,
                    dim_retired_actors,
                )
                    .chain(),
            );
    }
}
