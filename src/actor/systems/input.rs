//! Actor domain: input sources that fill the input table each frame.

use bevy::prelude::*;
use rand::Rng;

use crate::actor::components::{ActorKey, AiBehaviour, Behaviour, RandomWalk};
use crate::actor::resources::{ActionTuning, AiRng, InputTable};
use crate::states::InputSnapshot;

/// Sample the keyboard into one snapshot. Directions are held, actions fire
/// on the frame their key goes down.
pub fn snapshot_from_keys(keyboard: &ButtonInput<KeyCode>) -> InputSnapshot {
    let held = |a: KeyCode, b: KeyCode| keyboard.pressed(a) || keyboard.pressed(b);
    let tapped = |a: KeyCode, b: KeyCode| keyboard.just_pressed(a) || keyboard.just_pressed(b);

    InputSnapshot {
        move_left: held(KeyCode::KeyA, KeyCode::ArrowLeft),
        move_right: held(KeyCode::KeyD, KeyCode::ArrowRight),
        move_up: held(KeyCode::KeyW, KeyCode::ArrowUp),
        move_down: held(KeyCode::KeyS, KeyCode::ArrowDown),
        jump: tapped(KeyCode::Space, KeyCode::KeyK),
        attack: tapped(KeyCode::KeyJ, KeyCode::KeyZ),
        defend: tapped(KeyCode::KeyL, KeyCode::KeyX),
        dash: tapped(KeyCode::ShiftLeft, KeyCode::ShiftRight),
        climb: tapped(KeyCode::KeyC, KeyCode::KeyU),
        parry: tapped(KeyCode::KeyV, KeyCode::KeyP),
        hook: tapped(KeyCode::KeyH, KeyCode::KeyE),
    }
}

pub(crate) fn read_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut table: ResMut<InputTable>,
    query: Query<(&ActorKey, &Behaviour)>,
) {
    let snapshot = snapshot_from_keys(&keyboard);
    for (key, behaviour) in &query {
        if *behaviour == Behaviour::Player {
            table.set(key.clone(), snapshot);
        }
    }
}

/// Advance one actor's random walk by a frame. The walk keeps its heading
/// until a roll against `ai_turn_chance` picks left, none or right anew.
pub fn random_walk_step(
    rng: &mut impl Rng,
    walk: &mut RandomWalk,
    behaviour: Behaviour,
    tuning: &ActionTuning,
) -> InputSnapshot {
    if rng.random_bool(tuning.ai_turn_chance) {
        walk.direction = rng.random_range(-1..=1);
    }

    let attack = behaviour == Behaviour::Fugue && rng.random_bool(tuning.ai_attack_chance);

    InputSnapshot {
        move_left: walk.direction < 0,
        move_right: walk.direction > 0,
        attack,
        ..Default::default()
    }
}

pub(crate) fn drive_random_walk(
    tuning: Res<ActionTuning>,
    mut rng: ResMut<AiRng>,
    mut table: ResMut<InputTable>,
    mut query: Query<(&ActorKey, &Behaviour, &mut RandomWalk)>,
) {
    for (key, behaviour, mut walk) in &mut query {
        if !behaviour.is_ai() {
            continue;
        }
        let snapshot = random_walk_step(&mut rng.0, &mut walk, *behaviour, &tuning);
        table.set(key.clone(), snapshot);
    }
}

/// Hand keyboard control to the next actor in spawn order (Tab). The
/// actor giving it up resumes its own AI behaviour.
pub(crate) fn cycle_executive_override(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut table: ResMut<InputTable>,
    mut query: Query<(Entity, &ActorKey, &AiBehaviour, &mut Behaviour)>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) {
        return;
    }

    let mut actors: Vec<_> = query.iter_mut().collect();
    if actors.len() < 2 {
        return;
    }
    actors.sort_by_key(|(entity, _, _, _)| *entity);

    let current = actors
        .iter()
        .position(|(_, _, _, behaviour)| **behaviour == Behaviour::Player)
        .unwrap_or(actors.len() - 1);
    let next = (current + 1) % actors.len();

    for (i, (_, key, ai, behaviour)) in actors.iter_mut().enumerate() {
        if i == current {
            **behaviour = ai.resume();
            // Drop the stale keyboard snapshot before the AI takes over.
            table.remove(key);
        } else if i == next {
            **behaviour = Behaviour::Player;
            info!("Executive override moved to {}", key.0);
        }
    }
}
