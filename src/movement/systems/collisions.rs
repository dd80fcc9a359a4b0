//! Movement domain: ground check and climb zone tracking.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    ClimbZoneContact, Climbable, GameLayer, GroundSensor, LocomotionTuning, Player,
};

/// Grounded when a small circle below the body overlaps ground, or when the
/// body's own shape cast a short distance down hits ground.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &Collider, &LocomotionTuning, &mut GroundSensor), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, collider, tuning, mut sensor) in &mut query {
        let was_grounded = sensor.grounded;
        let origin = transform.translation.truncate();

        let check_center = origin + Vec2::new(0.0, tuning.ground_check_offset);
        let overlaps = !spatial_query
            .shape_intersections(
                &Collider::circle(tuning.ground_check_radius),
                check_center,
                0.0,
                &ground_filter,
            )
            .is_empty();

        let grounded = overlaps
            || spatial_query
                .cast_shape(
                    collider,
                    origin,
                    0.0,
                    Dir2::NEG_Y,
                    &ShapeCastConfig::from_max_distance(tuning.ground_cast_distance),
                    &ground_filter,
                )
                .is_some();

        sensor.grounded = grounded;
        if grounded != was_grounded {
            debug!("Ground contact changed: grounded={}", grounded);
        }
    }
}

/// Counts overlapping climbable zones so nested or adjacent ladders behave.
pub(crate) fn track_climb_zones(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    climbables: Query<(), With<Climbable>>,
    mut players: Query<&mut ClimbZoneContact, With<Player>>,
) {
    for ev in started.read() {
        for (zone, other) in [(ev.collider1, ev.collider2), (ev.collider2, ev.collider1)] {
            if !climbables.contains(zone) {
                continue;
            }
            if let Ok(mut contact) = players.get_mut(other) {
                contact.zones += 1;
            }
        }
    }

    for ev in ended.read() {
        for (zone, other) in [(ev.collider1, ev.collider2), (ev.collider2, ev.collider1)] {
            if !climbables.contains(zone) {
                continue;
            }
            if let Ok(mut contact) = players.get_mut(other) {
                contact.zones = contact.zones.saturating_sub(1);
            }
        }
    }
}
