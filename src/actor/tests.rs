//! Actor domain: tests for damage, timers, input sources and actions.

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::systems::{
    apply_damage, cycle_executive_override, handle_actions, random_walk_step, snapshot_from_keys,
    update_action_timers,
};
use super::{
    Action, ActionTimers, ActionTuning, Actor, ActorKey, ActorRetiredEvent, ActorStates,
    AiBehaviour, AiRng, Behaviour, DamageEvent, Facing, InputTable, RandomWalk, choose_action,
    hook_target, strike_targets,
};
use crate::states::{ActorState, InputSnapshot, Motif, StateTuning};

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

fn entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

// -----------------------------------------------------------------------------
// Actor
// -----------------------------------------------------------------------------

#[test]
fn test_damage_staggers_while_health_remains() {
    let mut actor = Actor::new("fugue", 100.0, 10.0);
    assert_eq!(actor.take_damage(30.0), Some(ActorState::Staggered));
    assert_close(actor.health, 70.0);
}

#[test]
fn test_lethal_damage_retires_and_clamps_health() {
    let mut actor = Actor::new("fugue", 20.0, 10.0);
    assert_eq!(actor.take_damage(50.0), Some(ActorState::Retired));
    assert_close(actor.health, 0.0);
    assert!(actor.is_retired());
}

#[test]
fn test_zero_damage_and_retired_targets_are_ignored() {
    let mut actor = Actor::new("fugue", 20.0, 10.0);
    assert_eq!(actor.take_damage(0.0), None);
    assert_close(actor.health, 20.0);

    actor.take_damage(20.0);
    assert_eq!(actor.take_damage(5.0), None);
}

#[test]
fn test_attack_respects_cooldown() {
    let mut actor = Actor::new("anemoia", 100.0, 10.0);
    assert!(actor.try_attack());
    assert!(!actor.try_attack());

    actor.attack_timer = 0.0;
    assert!(actor.try_attack());
}

#[test]
fn test_actor_states_spawn_starts_idle() {
    let actor = Actor::new("fugue", 100.0, 12.0);
    let mut states = ActorStates::spawn(StateTuning::default(), &actor);
    assert_eq!(states.current_state(), Some(ActorState::Idle));

    // The strike reports the actor's own stats
    let machine = states.0.as_mut().unwrap();
    assert_close(machine.stamina(), StateTuning::default().stamina_max);
    machine.change_state(ActorState::Attacking).unwrap();
    let strike = machine.motif().unwrap();
    assert_eq!(strike.damage, Some(12.0));
    assert_eq!(strike.cooldown, Some(actor.attack_cooldown));

    let empty = ActorStates::default();
    assert_eq!(empty.current_state(), None);
}

// -----------------------------------------------------------------------------
// Action timers
// -----------------------------------------------------------------------------

#[test]
fn test_timers_release_attacking_after_its_duration() {
    let tuning = ActionTuning::default();
    let mut timers = ActionTimers::default();

    // First sighting arms the timer
    assert_eq!(timers.advance(ActorState::Attacking, None, 0.1, &tuning), None);
    assert_close(timers.remaining, tuning.attack_duration);

    assert_eq!(timers.advance(ActorState::Attacking, None, 0.2, &tuning), None);
    assert_eq!(
        timers.advance(ActorState::Attacking, None, 0.2, &tuning),
        Some(ActorState::Idle)
    );
    assert_eq!(timers.state, None);
}

#[test]
fn test_timers_prefer_motif_cooldown() {
    let tuning = ActionTuning::default();
    let motif = Motif::new(3, "Symphon").with_cooldown(0.75);
    assert_eq!(
        ActionTimers::duration_for(ActorState::SymphonCooldown, Some(&motif), &tuning),
        Some(0.75)
    );
    assert_eq!(
        ActionTimers::duration_for(ActorState::SymphonCooldown, None, &tuning),
        Some(tuning.symphon_cooldown)
    );
    assert_eq!(
        ActionTimers::duration_for(ActorState::Moving, Some(&motif), &tuning),
        None
    );
}

#[test]
fn test_timers_reset_on_untimed_state() {
    let tuning = ActionTuning::default();
    let mut timers = ActionTimers::default();
    timers.arm(ActorState::Staggered, 0.4);

    assert_eq!(timers.advance(ActorState::Idle, None, 0.1, &tuning), None);
    assert_eq!(timers, ActionTimers::default());
}

#[test]
fn test_rearming_restarts_countdown() {
    let tuning = ActionTuning::default();
    let mut timers = ActionTimers::default();
    timers.arm(ActorState::Staggered, tuning.stagger_duration);
    timers.advance(ActorState::Staggered, None, 0.3, &tuning);

    timers.arm(ActorState::Staggered, tuning.stagger_duration);
    assert_eq!(timers.advance(ActorState::Staggered, None, 0.3, &tuning), None);
}

// -----------------------------------------------------------------------------
// Input sources
// -----------------------------------------------------------------------------

#[test]
fn test_input_table_defaults_missing_keys() {
    let mut table = InputTable::default();
    let key = ActorKey("fugue".to_string());
    assert_eq!(table.get(&key), InputSnapshot::default());
    assert!(table.is_empty());

    let input = InputSnapshot {
        jump: true,
        ..Default::default()
    };
    table.set(key.clone(), input);
    assert_eq!(table.get(&key), input);
    assert_eq!(table.len(), 1);

    assert_eq!(table.remove(&key), Some(input));
    assert!(table.is_empty());
}

#[test]
fn test_keyboard_snapshot_maps_keys() {
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowRight);
    keys.press(KeyCode::Space);
    keys.press(KeyCode::KeyH);

    let input = snapshot_from_keys(&keys);
    assert!(input.move_right);
    assert!(!input.move_left);
    assert!(input.jump);
    assert!(input.hook);
    assert!(!input.attack);
}

#[test]
fn test_held_action_keys_fire_once() {
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyJ);
    keys.press(KeyCode::KeyA);
    assert!(snapshot_from_keys(&keys).attack);

    keys.clear();
    let input = snapshot_from_keys(&keys);
    assert!(!input.attack);
    assert!(input.move_left);
}

#[test]
fn test_mezzopiano_never_attacks() {
    let mut rng = AiRng::from_seed(7);
    let tuning = ActionTuning {
        ai_attack_chance: 1.0,
        ..Default::default()
    };
    let mut walk = RandomWalk::default();

    for _ in 0..200 {
        let input = random_walk_step(&mut rng.0, &mut walk, Behaviour::Mezzopiano, &tuning);
        assert!(!input.attack);
    }

    let input = random_walk_step(&mut rng.0, &mut walk, Behaviour::Fugue, &tuning);
    assert!(input.attack);
}

#[test]
fn test_random_walk_follows_direction() {
    let mut rng = AiRng::from_seed(42);
    let tuning = ActionTuning {
        ai_turn_chance: 1.0,
        ai_attack_chance: 0.0,
        ..Default::default()
    };
    let mut walk = RandomWalk::default();

    for _ in 0..100 {
        let input = random_walk_step(&mut rng.0, &mut walk, Behaviour::Fugue, &tuning);
        assert!((-1..=1).contains(&walk.direction));
        assert_eq!(input.move_left, walk.direction < 0);
        assert_eq!(input.move_right, walk.direction > 0);
        assert!(!input.jump);
    }
}

#[test]
fn test_random_walk_keeps_heading_without_turn() {
    let mut rng = AiRng::from_seed(1);
    let tuning = ActionTuning {
        ai_turn_chance: 0.0,
        ..Default::default()
    };
    let mut walk = RandomWalk { direction: -1 };

    for _ in 0..50 {
        random_walk_step(&mut rng.0, &mut walk, Behaviour::Mezzopiano, &tuning);
    }
    assert_eq!(walk.direction, -1);
}

#[test]
fn test_seeded_walks_repeat() {
    let tuning = ActionTuning {
        ai_turn_chance: 0.5,
        ..Default::default()
    };
    let run = |seed| {
        let mut rng = AiRng::from_seed(seed);
        let mut walk = RandomWalk::default();
        (0..64)
            .map(|_| {
                random_walk_step(&mut rng.0, &mut walk, Behaviour::Fugue, &tuning);
                walk.direction
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(9), run(9));
}

#[test]
fn test_player_home_resumes_as_fugue() {
    assert_eq!(AiBehaviour(Behaviour::Player).resume(), Behaviour::Fugue);
    assert_eq!(
        AiBehaviour(Behaviour::Mezzopiano).resume(),
        Behaviour::Mezzopiano
    );
}

fn override_app() -> (App, Vec<Entity>) {
    let mut app = App::new();
    app.init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<InputTable>()
        .add_systems(Update, cycle_executive_override);

    let roster = [
        ("anemoia", Behaviour::Player, Behaviour::Fugue),
        ("fugue", Behaviour::Fugue, Behaviour::Fugue),
        ("mezzopiano", Behaviour::Mezzopiano, Behaviour::Mezzopiano),
    ];
    let actors = roster
        .into_iter()
        .map(|(name, behaviour, ai)| {
            app.world_mut()
                .spawn((ActorKey(name.to_string()), behaviour, AiBehaviour(ai)))
                .id()
        })
        .collect();
    (app, actors)
}

fn press_tab(app: &mut App) {
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(KeyCode::Tab);
    keys.clear();
    keys.press(KeyCode::Tab);
    app.update();
}

fn behaviours(app: &App, actors: &[Entity]) -> Vec<Behaviour> {
    actors
        .iter()
        .map(|entity| *app.world().get::<Behaviour>(*entity).unwrap())
        .collect()
}

#[test]
fn test_override_cycle_restores_each_ai() {
    use Behaviour::{Fugue, Mezzopiano, Player};
    let (mut app, actors) = override_app();

    press_tab(&mut app);
    assert_eq!(behaviours(&app, &actors), vec![Fugue, Player, Mezzopiano]);

    press_tab(&mut app);
    assert_eq!(behaviours(&app, &actors), vec![Fugue, Fugue, Player]);

    press_tab(&mut app);
    assert_eq!(behaviours(&app, &actors), vec![Player, Fugue, Mezzopiano]);

    // A full second lap ends where it started.
    for _ in 0..3 {
        press_tab(&mut app);
    }
    assert_eq!(behaviours(&app, &actors), vec![Player, Fugue, Mezzopiano]);
}

#[test]
fn test_override_drops_stale_keyboard_input() {
    let (mut app, _) = override_app();
    let key = ActorKey("anemoia".to_string());
    app.world_mut().resource_mut::<InputTable>().set(
        key.clone(),
        InputSnapshot {
            attack: true,
            ..Default::default()
        },
    );

    press_tab(&mut app);
    assert_eq!(
        app.world().resource::<InputTable>().get(&key),
        InputSnapshot::default()
    );
}

// -----------------------------------------------------------------------------
// Actions
// -----------------------------------------------------------------------------

#[test]
fn test_actions_only_start_from_ground_states() {
    let attack = InputSnapshot {
        attack: true,
        ..Default::default()
    };
    assert_eq!(choose_action(ActorState::Idle, &attack), Some(Action::Attack));
    assert_eq!(choose_action(ActorState::Moving, &attack), Some(Action::Attack));
    assert_eq!(choose_action(ActorState::Air, &attack), None);
    assert_eq!(choose_action(ActorState::Staggered, &attack), None);
    assert_eq!(choose_action(ActorState::Retired, &attack), None);
}

#[test]
fn test_attack_with_up_is_strike_special() {
    let input = InputSnapshot {
        attack: true,
        move_up: true,
        ..Default::default()
    };
    assert_eq!(
        choose_action(ActorState::Idle, &input),
        Some(Action::StrikeSpecial)
    );

    let defend = InputSnapshot {
        defend: true,
        ..Default::default()
    };
    assert_eq!(choose_action(ActorState::Idle, &defend), Some(Action::Symphon));
}

#[test]
fn test_hook_fires_from_the_air() {
    let hook = InputSnapshot {
        hook: true,
        attack: true,
        ..Default::default()
    };
    assert_eq!(choose_action(ActorState::Air, &hook), Some(Action::Hook));
    assert_eq!(choose_action(ActorState::Hook, &hook), Some(Action::Hook));
    assert_eq!(choose_action(ActorState::Retired, &hook), None);
}

#[test]
fn test_hook_target_leans_toward_facing() {
    let right = hook_target(Vec2::new(10.0, 0.0), Facing::Right, 100.0);
    let left = hook_target(Vec2::new(10.0, 0.0), Facing::Left, 100.0);

    assert!(right.x > 10.0 && right.y > 0.0);
    assert!(left.x < 10.0 && left.y > 0.0);
    assert_close(right.distance(Vec2::new(10.0, 0.0)), 100.0);
}

#[test]
fn test_strikes_hit_in_front_within_range() {
    let ids = entities(4);
    let (attacker, front, behind, far) = (ids[0], ids[1], ids[2], ids[3]);
    let candidates = [
        (attacker, Vec2::ZERO),
        (front, Vec2::new(40.0, 5.0)),
        (behind, Vec2::new(-20.0, 0.0)),
        (far, Vec2::new(200.0, 0.0)),
    ];

    let hits = strike_targets(attacker, Vec2::ZERO, Facing::Right, 60.0, &candidates);
    assert_eq!(hits, vec![front]);

    let hits = strike_targets(attacker, Vec2::ZERO, Facing::Left, 60.0, &candidates);
    assert_eq!(hits, vec![behind]);
}

#[test]
fn test_facing_sign() {
    assert_eq!(Facing::Right.sign(), 1.0);
    assert_eq!(Facing::Left.sign(), -1.0);
}

// -----------------------------------------------------------------------------
// Damage system
// -----------------------------------------------------------------------------

fn damage_app() -> App {
    let mut app = App::new();
    app.init_resource::<ActionTuning>()
        .add_message::<DamageEvent>()
        .add_message::<ActorRetiredEvent>()
        .add_systems(Update, apply_damage);
    app
}

fn spawn_target(app: &mut App, health: f32) -> Entity {
    let actor = Actor::new("target", health, 10.0);
    let states = ActorStates::spawn(StateTuning::default(), &actor);
    app.world_mut()
        .spawn((
            actor,
            states,
            ActionTimers::default(),
        ))
        .id()
}

#[test]
fn test_damage_message_staggers_target() {
    let mut app = damage_app();
    let source = app.world_mut().spawn_empty().id();
    let target = spawn_target(&mut app, 100.0);

    app.world_mut().write_message(DamageEvent {
        source,
        target,
        amount: 10.0,
    });
    app.update();

    let world = app.world();
    let states = world.get::<ActorStates>(target).unwrap();
    assert_eq!(states.current_state(), Some(ActorState::Staggered));
    let timers = world.get::<ActionTimers>(target).unwrap();
    assert_eq!(timers.state, Some(ActorState::Staggered));
    assert_close(world.get::<Actor>(target).unwrap().health, 90.0);
}

#[test]
fn test_lethal_message_retires_target_once() {
    let mut app = damage_app();
    let source = app.world_mut().spawn_empty().id();
    let target = spawn_target(&mut app, 10.0);

    for _ in 0..2 {
        app.world_mut().write_message(DamageEvent {
            source,
            target,
            amount: 10.0,
        });
    }
    app.update();

    let states = app.world().get::<ActorStates>(target).unwrap();
    assert_eq!(states.current_state(), Some(ActorState::Retired));

    let retired = app.world().resource::<Messages<ActorRetiredEvent>>();
    assert_eq!(retired.len(), 1);
}

// -----------------------------------------------------------------------------
// Action systems
// -----------------------------------------------------------------------------

fn spawn_fighter(app: &mut App, name: &str, x: f32) -> Entity {
    let actor = Actor::new(name, 100.0, 10.0);
    let states = ActorStates::spawn(StateTuning::default(), &actor);
    app.world_mut()
        .spawn((
            actor,
            ActorKey(name.to_string()),
            states,
            ActionTimers::default(),
            Facing::Right,
            Transform::from_xyz(x, 0.0, 0.0),
        ))
        .id()
}

fn current_state(app: &App, entity: Entity) -> Option<ActorState> {
    app.world()
        .get::<ActorStates>(entity)
        .and_then(ActorStates::current_state)
}

#[test]
fn test_attack_input_strikes_actor_in_front() {
    let mut app = App::new();
    app.init_resource::<InputTable>()
        .init_resource::<ActionTuning>()
        .add_message::<DamageEvent>()
        .add_systems(Update, handle_actions);

    let attacker = spawn_fighter(&mut app, "anemoia", 0.0);
    let target = spawn_fighter(&mut app, "fugue", 30.0);
    app.world_mut().resource_mut::<InputTable>().set(
        ActorKey("anemoia".to_string()),
        InputSnapshot {
            attack: true,
            ..Default::default()
        },
    );
    app.update();

    assert_eq!(current_state(&app, attacker), Some(ActorState::Attacking));
    assert_eq!(current_state(&app, target), Some(ActorState::Idle));
    assert_eq!(app.world().resource::<Messages<DamageEvent>>().len(), 1);
}

#[test]
fn test_action_timers_release_attacking() {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<ActionTuning>()
        .add_systems(Update, update_action_timers);

    let actor = spawn_fighter(&mut app, "anemoia", 0.0);
    app.world_mut()
        .get_mut::<ActorStates>(actor)
        .unwrap()
        .0
        .as_mut()
        .unwrap()
        .change_state(ActorState::Attacking)
        .unwrap();

    // First frame arms the timer, the second runs it out.
    for _ in 0..2 {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(0.5));
        app.update();
    }
    assert_eq!(current_state(&app, actor), Some(ActorState::Idle));
}
