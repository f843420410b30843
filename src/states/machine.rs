//! States domain: the per-actor state machine and its transition protocol.

use std::collections::{HashMap, VecDeque};

use bevy::prelude::*;

use crate::states::error::StateError;
use crate::states::handlers::{StateHandler, default_registry, hook::HookState};
use crate::states::tuning::StateTuning;
use crate::states::types::{ActorState, InputSnapshot, Kinematics, Motif};

/// Upper bound on transitions drained after a single handler call.
/// Guards against two handlers that keep handing control to each other.
const MAX_CHAINED_TRANSITIONS: usize = 32;

/// Physical body the machine reads position and ground contact from, and
/// writes the resulting velocity into.
pub trait Body {
    fn position(&self) -> Vec2;
    /// Velocity after the last physics step, collision response included.
    fn velocity(&self) -> Vec2;
    fn is_on_floor(&self) -> bool;
    fn apply_velocity(&mut self, velocity: Vec2, delta: f32);
}

/// Borrowed view of the machine handed to every handler call.
pub struct StateContext<'a> {
    pub kinematics: &'a mut Kinematics,
    pub tuning: &'a StateTuning,
    /// Input of the current tick (or the last tick when called outside one)
    pub input: &'a InputSnapshot,
    transitions: &'a mut VecDeque<ActorState>,
    stamina_spent: &'a mut bool,
}

impl StateContext<'_> {
    /// Request a transition. Processed in issue order once the running
    /// handler call returns.
    pub fn change_state(&mut self, target: ActorState) {
        self.transitions.push_back(target);
    }

    /// Drain stamina and suppress regeneration for this tick.
    pub fn spend_stamina(&mut self, amount: f32) {
        self.kinematics.stamina = (self.kinematics.stamina - amount).max(0.0);
        *self.stamina_spent = true;
    }
}

pub struct StateMachine {
    current: ActorState,
    registry: HashMap<ActorState, Box<dyn StateHandler>>,
    tuning: StateTuning,
    kinematics: Kinematics,
    /// Velocity last handed to the body, to tell physics changes apart
    applied_velocity: Vec2,
    input: InputSnapshot,
    pending: VecDeque<ActorState>,
    stamina_spent: bool,
    initialized: bool,
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("kinematics", &self.kinematics)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl StateMachine {
    pub fn new(tuning: StateTuning) -> Self {
        let kinematics = Kinematics::new(tuning.stamina_max, tuning.air_supply_max);
        Self {
            current: ActorState::Idle,
            registry: HashMap::new(),
            tuning,
            kinematics,
            applied_velocity: Vec2::ZERO,
            input: InputSnapshot::default(),
            pending: VecDeque::new(),
            stamina_spent: false,
            initialized: false,
        }
    }

    /// Build the handler registry and enter Idle. Must run once before any
    /// `tick` or `change_state`.
    pub fn initialize(&mut self) -> Result<(), StateError> {
        if self.initialized {
            error!("State machine initialized twice; keeping state {:?}", self.current);
            return Err(StateError::AlreadyInitialized);
        }

        // Handlers registered ahead of time by a collaborator take precedence.
        for (state, handler) in default_registry() {
            self.registry.entry(state).or_insert(handler);
        }
        self.initialized = true;
        self.current = ActorState::Idle;
        debug!("Entering {:?}", self.current);
        self.call_current(|handler, ctx| handler.enter(ctx));
        self.drain_transitions();
        Ok(())
    }

    /// Leave the current state and enter `target`. An unregistered target is
    /// logged and ignored; the current state persists.
    pub fn change_state(&mut self, target: ActorState) -> Result<(), StateError> {
        if !self.initialized {
            warn!("Ignoring transition to {:?}: state machine not initialized", target);
            return Err(StateError::NotInitialized);
        }
        let result = self.transition(target);
        self.drain_transitions();
        result
    }

    /// Advance one frame: run the active handler, apply the velocity to the
    /// body, then regenerate stamina.
    pub fn tick(
        &mut self,
        delta: f32,
        input: InputSnapshot,
        body: &mut impl Body,
    ) -> Result<(), StateError> {
        if !self.initialized {
            return Err(StateError::NotInitialized);
        }

        self.input = input;
        self.stamina_spent = false;

        self.kinematics.grounded = body.is_on_floor();
        self.kinematics.position = body.position();
        // Keep whatever collision response did to the last velocity we wrote.
        self.kinematics.velocity += body.velocity() - self.applied_velocity;

        if !self.kinematics.grounded {
            self.call_current(|handler, ctx| handler.on_airborne(ctx));
            self.drain_transitions();
        }

        self.call_current(|handler, ctx| handler.update(ctx, delta, &input));
        self.drain_transitions();

        body.apply_velocity(self.kinematics.velocity, delta);
        self.applied_velocity = self.kinematics.velocity;

        if !self.stamina_spent {
            self.kinematics.stamina = (self.kinematics.stamina
                + self.tuning.stamina_regen * delta)
                .min(self.tuning.stamina_max);
        }
        if self.kinematics.grounded && !self.current.is_airborne() {
            self.kinematics.air_supply = self.tuning.air_supply_max;
        }
        Ok(())
    }

    /// Replace the Hook handler with one aimed at `target` and switch to it.
    pub fn start_hook(&mut self, target: Vec2) -> Result<(), StateError> {
        if !self.initialized {
            warn!("Ignoring hook toward {:?}: state machine not initialized", target);
            return Err(StateError::NotInitialized);
        }

        let hook = Box::new(HookState::new(target, self.tuning.hook_pull_speed));
        if self.current != ActorState::Hook {
            self.registry.insert(ActorState::Hook, hook);
            return self.change_state(ActorState::Hook);
        }

        // Re-aiming while hooked: close out the old hook before the new one enters.
        debug!("Exiting {:?}", self.current);
        self.call_current(|handler, ctx| handler.exit(ctx));
        self.registry.insert(ActorState::Hook, hook);
        debug!("Entering {:?}", self.current);
        self.call_current(|handler, ctx| handler.enter(ctx));
        self.drain_transitions();
        Ok(())
    }

    /// Register or replace the handler for an inactive state. Returns false
    /// when `state` is active, since the swap would skip its exit.
    pub fn insert_handler(&mut self, state: ActorState, handler: Box<dyn StateHandler>) -> bool {
        if self.initialized && state == self.current {
            warn!("Refusing to replace handler of active state {:?}", state);
            return false;
        }
        self.registry.insert(state, handler);
        true
    }

    /// Remove the handler for an inactive state. The active state's handler
    /// cannot be removed.
    #[cfg(test)]
    pub(crate) fn remove_handler(&mut self, state: ActorState) -> Option<Box<dyn StateHandler>> {
        if self.initialized && state == self.current {
            warn!("Refusing to remove handler of active state {:?}", state);
            return None;
        }
        self.registry.remove(&state)
    }

    #[cfg(test)]
    pub(crate) fn is_registered(&self, state: ActorState) -> bool {
        self.registry.contains_key(&state)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn current_state(&self) -> ActorState {
        self.current
    }

    pub fn velocity(&self) -> Vec2 {
        self.kinematics.velocity
    }

    pub fn stamina(&self) -> f32 {
        self.kinematics.stamina
    }

    pub fn air_supply(&self) -> f32 {
        self.kinematics.air_supply
    }

    pub fn tuning(&self) -> &StateTuning {
        &self.tuning
    }

    /// Motif reported by the active handler, if any.
    pub fn motif(&self) -> Option<Motif> {
        self.registry.get(&self.current).and_then(|h| h.motif())
    }

    fn transition(&mut self, target: ActorState) -> Result<(), StateError> {
        if !self.registry.contains_key(&target) {
            warn!(
                "State not found: {:?}; staying in {:?}",
                target, self.current
            );
            return Err(StateError::UnknownState(target));
        }

        debug!("Exiting {:?}", self.current);
        self.call_current(|handler, ctx| handler.exit(ctx));
        self.current = target;
        debug!("Entering {:?}", self.current);
        self.call_current(|handler, ctx| handler.enter(ctx));
        Ok(())
    }

    fn drain_transitions(&mut self) {
        let mut chained = 0;
        while let Some(target) = self.pending.pop_front() {
            if chained == MAX_CHAINED_TRANSITIONS {
                error!(
                    "Dropping {} queued transitions after {} chained changes in {:?}",
                    self.pending.len() + 1,
                    chained,
                    self.current
                );
                self.pending.clear();
                break;
            }
            chained += 1;
            // Unknown targets were already logged by transition().
            let _ = self.transition(target);
        }
    }

    fn call_current(&mut self, f: impl FnOnce(&mut dyn StateHandler, &mut StateContext<'_>)) {
        let Some(handler) = self.registry.get_mut(&self.current) else {
            return;
        };
        let mut ctx = StateContext {
            kinematics: &mut self.kinematics,
            tuning: &self.tuning,
            input: &self.input,
            transitions: &mut self.pending,
            stamina_spent: &mut self.stamina_spent,
        };
        f(handler.as_mut(), &mut ctx);
    }
}
