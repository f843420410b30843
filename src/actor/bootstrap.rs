//! Actor domain: arena and actor spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actor::components::{
    ActionTimers, Actor, ActorKey, ActorStates, AiBehaviour, Behaviour, Facing, GameLayer, Ground,
    Grounded, RandomWalk,
};
use crate::states::StateTuning;

const ACTOR_SIZE: Vec2 = Vec2::new(24.0, 48.0);

/// Static floor and platforms every actor stands on.
pub(crate) fn spawn_arena(mut commands: Commands) {
    let ground_color = Color::srgb(0.35, 0.4, 0.35);
    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Actor]);

    let surfaces = [
        // Floor
        (Vec2::new(0.0, -150.0), Vec2::new(1200.0, 40.0)),
        (Vec2::new(-250.0, -20.0), Vec2::new(160.0, 20.0)),
        (Vec2::new(220.0, 60.0), Vec2::new(160.0, 20.0)),
    ];

    for (position, size) in surfaces {
        commands.spawn((
            Ground,
            Sprite {
                color: ground_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
        ));
    }

    info!("Arena spawned with {} surfaces", surfaces.len());
}

/// One keyboard-driven actor and two random-walk belligerents.
pub(crate) fn spawn_actors(mut commands: Commands, tuning: Res<StateTuning>) {
    // (name, starting control, AI when not under override, color, x)
    let roster = [
        ("anemoia", Behaviour::Player, Behaviour::Fugue, Color::srgb(0.9, 0.9, 0.9), -100.0),
        ("fugue", Behaviour::Fugue, Behaviour::Fugue, Color::srgb(0.9, 0.5, 0.5), 150.0),
        ("mezzopiano", Behaviour::Mezzopiano, Behaviour::Mezzopiano, Color::srgb(0.5, 0.6, 0.9), 350.0),
    ];

    for (name, behaviour, ai, color, x) in roster {
        let actor = Actor::new(name, 100.0, 10.0);
        let states = ActorStates::spawn(tuning.clone(), &actor);
        commands.spawn((
            // Identity & state
            (
                actor,
                ActorKey(name.to_string()),
                behaviour,
                AiBehaviour(ai),
                states,
                Grounded::default(),
                Facing::default(),
                ActionTimers::default(),
                RandomWalk::default(),
            ),
            // Rendering
            Sprite {
                color,
                custom_size: Some(ACTOR_SIZE),
                ..default()
            },
            Transform::from_xyz(x, -50.0, 1.0),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(ACTOR_SIZE.x, ACTOR_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                // The state machine applies gravity itself
                GravityScale(0.0),
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Actor, [GameLayer::Ground]),
            ),
        ));

        info!("Spawned {} ({:?})", name, behaviour);
    }
}
