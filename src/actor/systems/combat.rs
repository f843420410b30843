//! Actor domain: damage application and retirement.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::actor::components::{ActionTimers, Actor, ActorStates};
use crate::actor::events::{ActorRetiredEvent, DamageEvent};
use crate::actor::resources::ActionTuning;
use crate::states::ActorState;

const RETIRED_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut retired_events: MessageWriter<ActorRetiredEvent>,
    tuning: Res<ActionTuning>,
    mut query: Query<(&mut Actor, &mut ActorStates, &mut ActionTimers)>,
) {
    for event in damage_events.read() {
        let Ok((mut actor, mut states, mut timers)) = query.get_mut(event.target) else {
            continue;
        };

        let Some(forced) = actor.take_damage(event.amount) else {
            continue;
        };
        debug!(
            "{} took {} damage ({} health left)",
            actor.name, event.amount, actor.health
        );

        let Some(machine) = states.0.as_mut() else {
            debug!("{} has no state machine; damage only", actor.name);
            continue;
        };
        if let Err(e) = machine.change_state(forced) {
            warn!("{} could not enter {:?}: {}", actor.name, forced, e);
            continue;
        }

        match forced {
            // A fresh hit restarts the stagger even when already staggered
            ActorState::Staggered => timers.arm(forced, tuning.stagger_duration),
            ActorState::Retired => {
                info!("{} has retired", actor.name);
                retired_events.write(ActorRetiredEvent {
                    entity: event.target,
                });
            }
            _ => {}
        }
    }
}

pub(crate) fn dim_retired_actors(
    mut retired_events: MessageReader<ActorRetiredEvent>,
    mut query: Query<&mut Sprite, With<Actor>>,
) {
    for event in retired_events.read() {
        if let Ok(mut sprite) = query.get_mut(event.entity) {
            sprite.color = RETIRED_COLOR;
        }
    }
}
