//! Core domain: camera setup and follow.

mod systems;

pub use systems::follow_with_dead_zone;

use bevy::prelude::*;

use crate::core::systems::{follow_player, setup_camera};

/// How far the followed actor may drift from the camera center before the
/// camera moves.
#[derive(Resource, Debug, Clone)]
pub struct CameraFollow {
    pub dead_zone: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self { dead_zone: 160.0 }
    }
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFollow>()
            .add_systems(Startup, setup_camera)
            .add_systems(PostUpdate, follow_player);
    }
}
