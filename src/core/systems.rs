//! Core domain: camera systems.

use bevy::prelude::*;

use crate::actor::Behaviour;
use crate::core::CameraFollow;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Move `camera` just enough that `target` sits inside the dead zone on
/// each axis.
pub fn follow_with_dead_zone(camera: Vec2, target: Vec2, dead_zone: f32) -> Vec2 {
    let offset = target - camera;
    let excess = offset - offset.clamp(Vec2::splat(-dead_zone), Vec2::splat(dead_zone));
    camera + excess
}

pub(crate) fn follow_player(
    follow: Res<CameraFollow>,
    actors: Query<(&Transform, &Behaviour), Without<Camera2d>>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Some(target) = actors
        .iter()
        .find(|(_, behaviour)| **behaviour == Behaviour::Player)
        .map(|(transform, _)| transform.translation.truncate())
    else {
        return;
    };

    for mut transform in &mut cameras {
        let next = follow_with_dead_zone(transform.translation.truncate(), target, follow.dead_zone);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}
