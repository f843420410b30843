//! Actor domain: damage and retirement messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

/// Emitted once when an actor's health reaches zero.
#[derive(Debug)]
pub struct ActorRetiredEvent {
    pub entity: Entity,
}

impl Message for ActorRetiredEvent {}
