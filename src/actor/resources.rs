//! Actor domain: input table, action tuning and AI randomness.

use std::collections::HashMap;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::actor::components::ActorKey;
use crate::states::InputSnapshot;

/// Per-frame input for every managed actor, keyed by actor identity.
/// Written by the keyboard and AI sources, read once per tick.
#[derive(Resource, Debug, Default)]
pub struct InputTable {
    entries: HashMap<ActorKey, InputSnapshot>,
}

impl InputTable {
    pub fn set(&mut self, key: ActorKey, input: InputSnapshot) {
        self.entries.insert(key, input);
    }

    /// Snapshot for `key`, or no input at all when nothing was published.
    pub fn get(&self, key: &ActorKey) -> InputSnapshot {
        self.entries.get(key).copied().unwrap_or_default()
    }

    pub fn remove(&mut self, key: &ActorKey) -> Option<InputSnapshot> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ActionTuning {
    pub attack_duration: f32,
    /// Reach of a strike in front of the attacker
    pub attack_range: f32,
    pub stagger_duration: f32,
    pub parry_window: f32,
    pub symphon_cooldown: f32,
    pub strike_special_cooldown: f32,
    /// Chance per frame that a random-walk actor picks a new direction
    pub ai_turn_chance: f64,
    /// Chance per frame that a Fugue actor attacks
    pub ai_attack_chance: f64,
}

impl Default for ActionTuning {
    fn default() -> Self {
        Self {
            attack_duration: 0.3,
            attack_range: 60.0,
            stagger_duration: 0.4,
            parry_window: 0.2,
            symphon_cooldown: 1.5,
            strike_special_cooldown: 2.0,
            ai_turn_chance: 0.02,
            ai_attack_chance: 0.005,
        }
    }
}

/// Seeded RNG so AI runs are reproducible.
#[derive(Resource, Debug)]
pub struct AiRng(pub ChaCha8Rng);

impl AiRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for AiRng {
    fn default() -> Self {
        Self::from_seed(rand::random())
    }
}
