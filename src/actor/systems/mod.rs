//! Actor domain: system modules for input, physics and combat.

pub(crate) mod collisions;
pub(crate) mod combat;
pub(crate) mod input;
pub(crate) mod states;

pub(crate) use collisions::detect_ground;
pub(crate) use combat::{apply_damage, dim_retired_actors};
pub(crate) use input::{cycle_executive_override, drive_random_walk, read_keyboard_input};
pub(crate) use states::{handle_actions, tick_actor_states, update_action_timers, update_facing};

pub use input::{random_walk_step, snapshot_from_keys};
pub use states::{Action, choose_action, hook_target, strike_targets};
