//! Actor domain: ground detection for actor bodies.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actor::components::{GameLayer, Grounded};

/// How far below the feet a floor still counts as touched.
const GROUND_RAY_LENGTH: f32 = 4.0;

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &Collider, &mut Grounded)>,
) {
    // Only Ground layer entities count, never other actors
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, collider, mut grounded) in &mut query {
        let was_grounded = grounded.0;

        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };

        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, half_height);
        let hit = spatial_query.cast_ray(
            ray_origin,
            Dir2::NEG_Y,
            GROUND_RAY_LENGTH,
            true,
            &ground_filter,
        );

        grounded.0 = hit.is_some();

        if grounded.0 != was_grounded {
            debug!("Ground contact changed: grounded={}", grounded.0);
        }
    }
}
