//! Actor domain: components attached to every actor body.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actor::resources::ActionTuning;
use crate::states::handlers::AttackingState;
use crate::states::{ActorState, Motif, StateMachine, StateTuning};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Actor bodies
    Actor,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Identity, health and attack stats of an actor.
#[derive(Component, Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub health: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    /// Counts down to zero; attacks are refused while positive
    pub attack_timer: f32,
}

impl Actor {
    pub fn new(name: impl Into<String>, health: f32, attack_damage: f32) -> Self {
        Self {
            name: name.into(),
            health,
            attack_damage,
            attack_cooldown: 0.5,
            attack_timer: 0.0,
        }
    }

    /// Apply damage and report the state it forces. Any nonzero hit that
    /// leaves health above zero staggers, whatever the actor was doing.
    pub fn take_damage(&mut self, amount: f32) -> Option<ActorState> {
        if amount <= 0.0 || self.is_retired() {
            return None;
        }
        self.health = (self.health - amount).max(0.0);
        if self.is_retired() {
            Some(ActorState::Retired)
        } else {
            Some(ActorState::Staggered)
        }
    }

    pub fn is_retired(&self) -> bool {
        self.health <= 0.0
    }

    /// Start the attack cooldown if it has elapsed. Returns false while
    /// the previous attack is still cooling down.
    pub fn try_attack(&mut self) -> bool {
        if self.attack_timer > 0.0 {
            return false;
        }
        self.attack_timer = self.attack_cooldown;
        true
    }
}

/// Key under which the actor's input is published in the `InputTable`.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActorKey(pub String);

/// The actor's state machine. `None` means the actor has no machine and
/// skips state logic.
#[derive(Component, Debug, Default)]
pub struct ActorStates(pub Option<StateMachine>);

impl ActorStates {
    /// Build and initialize a machine whose strike carries the actor's
    /// attack stats. A machine that fails to initialize is left out.
    pub fn spawn(tuning: StateTuning, actor: &Actor) -> Self {
        let strike = Motif::new(1, "Strike")
            .with_damage(actor.attack_damage)
            .with_cooldown(actor.attack_cooldown);

        let mut machine = StateMachine::new(tuning);
        machine.insert_handler(ActorState::Attacking, Box::new(AttackingState::new(strike)));
        if let Err(e) = machine.initialize() {
            error!("Failed to initialize state machine for {}: {}", actor.name, e);
        }
        Self(machine.is_initialized().then_some(machine))
    }

    pub fn current_state(&self) -> Option<ActorState> {
        self.0.as_ref().map(StateMachine::current_state)
    }
}

/// Who drives an actor's input.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Behaviour {
    /// Keyboard driven (executive override)
    Player,
    /// Random-walk AI
    #[default]
    Fugue,
    /// Random-walk AI that never attacks
    Mezzopiano,
}

impl Behaviour {
    pub fn is_ai(&self) -> bool {
        !matches!(self, Behaviour::Player)
    }
}

/// Behaviour an actor falls back to when keyboard control moves on.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AiBehaviour(pub Behaviour);

impl AiBehaviour {
    /// The AI half of a behaviour. `Player` has none and resumes as `Fugue`.
    pub fn resume(&self) -> Behaviour {
        if self.0.is_ai() {
            self.0
        } else {
            Behaviour::default()
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grounded(pub bool);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// Countdown for the states the state machine never leaves on its own.
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct ActionTimers {
    pub state: Option<ActorState>,
    pub remaining: f32,
}

impl ActionTimers {
    /// How long `state` lasts before the actor releases it, if it is timed.
    pub fn duration_for(
        state: ActorState,
        motif: Option<&Motif>,
        tuning: &ActionTuning,
    ) -> Option<f32> {
        let motif_cooldown = motif.and_then(|m| m.cooldown);
        match state {
            ActorState::Attacking => Some(tuning.attack_duration),
            ActorState::Staggered => Some(tuning.stagger_duration),
            ActorState::Parry => Some(motif_cooldown.unwrap_or(tuning.parry_window)),
            ActorState::SymphonCooldown => {
                Some(motif_cooldown.unwrap_or(tuning.symphon_cooldown))
            }
            ActorState::StrikeSpecialCooldown => {
                Some(motif_cooldown.unwrap_or(tuning.strike_special_cooldown))
            }
            _ => None,
        }
    }

    /// Restart the countdown for `state`.
    pub fn arm(&mut self, state: ActorState, duration: f32) {
        self.state = Some(state);
        self.remaining = duration;
    }

    /// Follow the machine's current state. Returns the state to switch to
    /// once a timed state has run its course.
    pub fn advance(
        &mut self,
        current: ActorState,
        motif: Option<&Motif>,
        delta: f32,
        tuning: &ActionTuning,
    ) -> Option<ActorState> {
        let Some(duration) = Self::duration_for(current, motif, tuning) else {
            self.state = None;
            self.remaining = 0.0;
            return None;
        };

        if self.state != Some(current) {
            self.arm(current, duration);
            return None;
        }

        self.remaining -= delta;
        if self.remaining > 0.0 {
            return None;
        }

        self.state = None;
        self.remaining = 0.0;
        Some(ActorState::Idle)
    }
}

/// Heading of a random-walk actor: -1 left, 0 still, 1 right.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RandomWalk {
    pub direction: i32,
}
