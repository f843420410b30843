//! States domain: state identifiers, per-frame input and actor kinematics.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Gameplay mode an actor can be in. Exactly one is active per actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActorState {
    #[default]
    Idle,
    Moving,
    Attacking,
    /// Airborne after a grounded jump or after walking off a ledge
    Air,
    /// Airborne after a mid-air jump
    InAir,
    Dash,
    Climb,
    Parry,
    Staggered,
    SymphonCooldown,
    StrikeSpecialCooldown,
    Hook,
    /// Defeated. No transitions lead out of this state.
    Retired,
}

impl ActorState {
    #[cfg(test)]
    pub const ALL: [ActorState; 13] = [
        ActorState::Idle,
        ActorState::Moving,
        ActorState::Attacking,
        ActorState::Air,
        ActorState::InAir,
        ActorState::Dash,
        ActorState::Climb,
        ActorState::Parry,
        ActorState::Staggered,
        ActorState::SymphonCooldown,
        ActorState::StrikeSpecialCooldown,
        ActorState::Hook,
        ActorState::Retired,
    ];

    pub fn is_airborne(&self) -> bool {
        matches!(self, ActorState::Air | ActorState::InAir)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ActorState::Retired)
    }
}

/// Frozen set of input intents for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    pub jump: bool,
    pub attack: bool,
    pub defend: bool,
    pub dash: bool,
    pub climb: bool,
    pub parry: bool,
    pub hook: bool,
}

impl InputSnapshot {
    /// -1 for left, 1 for right, 0 when neither or both are held.
    pub fn horizontal_axis(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// 1 for up, -1 for down, 0 when neither or both are held.
    pub fn vertical_axis(&self) -> f32 {
        match (self.move_up, self.move_down) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Normalized direction of the held directional inputs, zero when none.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.horizontal_axis(), self.vertical_axis()).normalize_or_zero()
    }

    pub fn has_direction(&self) -> bool {
        self.direction() != Vec2::ZERO
    }

    pub fn has_horizontal(&self) -> bool {
        self.move_left || self.move_right
    }
}

/// Physical quantities the handlers read and write each tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Kinematics {
    pub velocity: Vec2,
    pub stamina: f32,
    /// Drains while airborne, refilled on landing
    pub air_supply: f32,
    pub grounded: bool,
    /// Body position sampled at the start of the current tick
    pub position: Vec2,
}

impl Kinematics {
    pub fn new(stamina: f32, air_supply: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            stamina,
            air_supply,
            grounded: false,
            position: Vec2::ZERO,
        }
    }
}

/// Combat ability descriptor reported by some handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Motif {
    pub id: u32,
    pub name: String,
    pub damage: Option<f32>,
    pub cooldown: Option<f32>,
}

impl Motif {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            damage: None,
            cooldown: None,
        }
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_cooldown(mut self, cooldown: f32) -> Self {
        self.cooldown = Some(cooldown);
        self
    }
}
