//! Actor domain: feeding input and physics into each actor's state machine.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::actor::components::{
    ActionTimers, Actor, ActorKey, ActorStates, Facing, Grounded,
};
use crate::actor::events::DamageEvent;
use crate::actor::resources::{ActionTuning, InputTable};
use crate::states::{ActorState, Body, InputSnapshot};

/// Avian body as seen by the state machine. The written velocity is
/// integrated by the physics step.
struct PhysicsBody<'a> {
    position: Vec2,
    grounded: bool,
    velocity: &'a mut Vec2,
}

impl Body for PhysicsBody<'_> {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        *self.velocity
    }

    fn is_on_floor(&self) -> bool {
        self.grounded
    }

    fn apply_velocity(&mut self, velocity: Vec2, _delta: f32) {
        *self.velocity = velocity;
    }
}

/// Actions the actor layer starts on top of the state machine's own
/// input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Attack,
    StrikeSpecial,
    Symphon,
    Hook,
}

/// Pick the action an input asks for in `state`, if any is allowed there.
pub fn choose_action(state: ActorState, input: &InputSnapshot) -> Option<Action> {
    if state.is_terminal() || state == ActorState::Staggered {
        return None;
    }
    if input.hook {
        return Some(Action::Hook);
    }
    if !matches!(state, ActorState::Idle | ActorState::Moving) {
        return None;
    }
    if input.attack && input.move_up {
        Some(Action::StrikeSpecial)
    } else if input.attack {
        Some(Action::Attack)
    } else if input.defend {
        Some(Action::Symphon)
    } else {
        None
    }
}

/// Point a hook lands on: `range` units ahead and up, on the facing side.
pub fn hook_target(position: Vec2, facing: Facing, range: f32) -> Vec2 {
    position + Vec2::new(facing.sign(), 1.0).normalize() * range
}

/// Actors a strike from `origin` reaches: within `range` and not behind
/// the attacker.
pub fn strike_targets(
    attacker: Entity,
    origin: Vec2,
    facing: Facing,
    range: f32,
    candidates: &[(Entity, Vec2)],
) -> Vec<Entity> {
    candidates
        .iter()
        .filter(|(entity, position)| {
            let offset = *position - origin;
            *entity != attacker && offset.length() <= range && offset.x * facing.sign() >= 0.0
        })
        .map(|(entity, _)| *entity)
        .collect()
}

pub(crate) fn update_facing(
    table: Res<InputTable>,
    mut query: Query<(&ActorKey, &ActorStates, &mut Facing)>,
) {
    for (key, states, mut facing) in &mut query {
        // Locked in place while dashing, hooked or retired
        if matches!(
            states.current_state(),
            Some(ActorState::Dash | ActorState::Hook | ActorState::Retired) | None
        ) {
            continue;
        }

        let axis = table.get(key).horizontal_axis();
        if axis > 0.0 {
            *facing = Facing::Right;
        } else if axis < 0.0 {
            *facing = Facing::Left;
        }
    }
}

pub(crate) fn handle_actions(
    table: Res<InputTable>,
    action_tuning: Res<ActionTuning>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut query: Query<(
        Entity,
        &ActorKey,
        &mut Actor,
        &mut ActorStates,
        &Transform,
        &Facing,
    )>,
    targets: Query<(Entity, &Transform), With<Actor>>,
) {
    let candidates: Vec<(Entity, Vec2)> = targets
        .iter()
        .map(|(entity, transform)| (entity, transform.translation.truncate()))
        .collect();

    for (entity, key, mut actor, mut states, transform, facing) in &mut query {
        let Some(machine) = states.0.as_mut() else {
            continue;
        };

        let input = table.get(key);
        let Some(action) = choose_action(machine.current_state(), &input) else {
            continue;
        };

        let position = transform.translation.truncate();
        let strike_damage = match action {
            Action::Hook => {
                let target = hook_target(position, *facing, machine.tuning().hook_range);
                if let Err(e) = machine.start_hook(target) {
                    warn!("{} could not hook: {}", actor.name, e);
                }
                None
            }
            Action::Attack => {
                if !actor.try_attack() {
                    continue;
                }
                info!("{} attacks for {} damage!", actor.name, actor.attack_damage);
                match machine.change_state(ActorState::Attacking) {
                    Ok(()) => Some(actor.attack_damage),
                    Err(e) => {
                        warn!("{} could not attack: {}", actor.name, e);
                        None
                    }
                }
            }
            Action::StrikeSpecial => match machine.change_state(ActorState::StrikeSpecialCooldown) {
                Ok(()) => machine.motif().and_then(|motif| motif.damage),
                Err(e) => {
                    warn!("{} could not strike: {}", actor.name, e);
                    None
                }
            },
            Action::Symphon => {
                if let Err(e) = machine.change_state(ActorState::SymphonCooldown) {
                    warn!("{} could not start Symphon: {}", actor.name, e);
                }
                None
            }
        };

        let Some(amount) = strike_damage else {
            continue;
        };
        for target in strike_targets(
            entity,
            position,
            *facing,
            action_tuning.attack_range,
            &candidates,
        ) {
            damage_events.write(DamageEvent {
                source: entity,
                target,
                amount,
            });
        }
    }
}

pub(crate) fn tick_actor_states(
    time: Res<Time>,
    table: Res<InputTable>,
    mut query: Query<(
        &ActorKey,
        &mut ActorStates,
        &Transform,
        &Grounded,
        &mut LinearVelocity,
    )>,
) {
    let dt = time.delta_secs();

    for (key, mut states, transform, grounded, mut velocity) in &mut query {
        let Some(machine) = states.0.as_mut() else {
            debug!("Actor {} has no state machine; skipping", key.0);
            continue;
        };

        let before = machine.current_state();
        let mut body = PhysicsBody {
            position: transform.translation.truncate(),
            grounded: grounded.0,
            velocity: &mut velocity.0,
        };
        if let Err(e) = machine.tick(dt, table.get(key), &mut body) {
            warn!("Actor {} skipped a tick: {}", key.0, e);
            continue;
        }

        let after = machine.current_state();
        if after != before {
            debug!(
                "Actor {}: {:?} -> {:?} (velocity {:?}, stamina {:.1}, air {:.0})",
                key.0,
                before,
                after,
                machine.velocity(),
                machine.stamina(),
                machine.air_supply()
            );
        }
    }
}

pub(crate) fn update_action_timers(
    time: Res<Time>,
    tuning: Res<ActionTuning>,
    mut query: Query<(&mut Actor, &mut ActorStates, &mut ActionTimers)>,
) {
    let dt = time.delta_secs();

    for (mut actor, mut states, mut timers) in &mut query {
        if actor.attack_timer > 0.0 {
            actor.attack_timer -= dt;
        }

        let Some(machine) = states.0.as_mut() else {
            continue;
        };
        let motif = machine.motif();
        let current = machine.current_state();
        if let Some(next) = timers.advance(current, motif.as_ref(), dt, &tuning) {
            if let Err(e) = machine.change_state(next) {
                warn!("{} could not leave {:?}: {}", actor.name, current, e);
            }
        }
    }
}
