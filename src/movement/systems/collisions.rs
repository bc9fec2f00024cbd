//! Movement domain: avian-backed world queries and contact collection.

use std::collections::HashMap;

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::controller::{BodyId, ContactEvent, PhysicsWorld, ProbeMask, RayHit};
use crate::movement::{ContactBuffer, GameLayer, Hazard, MovingPlatform, Player};

pub(crate) fn body_id(entity: Entity) -> BodyId {
    BodyId(entity.to_bits())
}

fn probe_filter(mask: ProbeMask, player: Entity) -> SpatialQueryFilter {
    let filter = match mask {
        ProbeMask::Solid => {
            SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall, GameLayer::Platform])
        }
        ProbeMask::Platform => SpatialQueryFilter::from_mask(GameLayer::Platform),
    };
    filter.with_excluded_entities([player])
}

/// The controller's view of the avian world for one fixed step.
pub(crate) struct AvianWorld<'a, 'w, 's> {
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    pub player: Entity,
    pub contacts: &'a [ContactEvent],
    pub platform_velocities: HashMap<BodyId, Vec2>,
}

impl PhysicsWorld for AvianWorld<'_, '_, '_> {
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, mask: ProbeMask) -> bool {
        let shape = Collider::rectangle(half_extents.x * 2.0, half_extents.y * 2.0);
        !self
            .spatial_query
            .shape_intersections(&shape, center, 0.0, &probe_filter(mask, self.player))
            .is_empty()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: ProbeMask,
    ) -> Option<RayHit> {
        let direction = Dir2::new(direction).ok()?;
        self.spatial_query
            .cast_ray(
                origin,
                direction,
                max_distance,
                true,
                &probe_filter(mask, self.player),
            )
            .map(|hit| RayHit { distance: hit.distance })
    }

    fn contact_events(&self) -> &[ContactEvent] {
        self.contacts
    }

    fn body_velocity(&self, body: BodyId) -> Option<Vec2> {
        self.platform_velocities.get(&body).copied()
    }
}

/// Knockback for a hit from a hazard at `hazard_x`; always pushes away from it.
pub(crate) fn knockback_from(hazard: &Hazard, hazard_x: f32, player_x: f32) -> Vec2 {
    let away = if player_x < hazard_x { -1.0 } else { 1.0 };
    Vec2::new(away * hazard.knockback.x.abs(), hazard.knockback.y)
}

/// Translates avian collision messages touching the player into controller
/// contact events.
pub(crate) fn collect_contacts(
    mut collision_start_events: MessageReader<CollisionStart>,
    mut collision_end_events: MessageReader<CollisionEnd>,
    mut buffer: ResMut<ContactBuffer>,
    player_query: Query<(Entity, &Position), With<Player>>,
    platform_query: Query<(), With<MovingPlatform>>,
    hazard_query: Query<(&Hazard, &Position), Without<Player>>,
) {
    let Some((player, player_position)) = player_query.iter().next() else {
        // Consume events if no player
        for _ in collision_start_events.read() {}
        for _ in collision_end_events.read() {}
        return;
    };

    for event in collision_start_events.read() {
        let other = if event.collider1 == player {
            event.collider2
        } else if event.collider2 == player {
            event.collider1
        } else {
            continue;
        };

        if platform_query.get(other).is_ok() {
            debug!("Player touched moving platform {:?}", other);
            buffer.0.push(ContactEvent::BodyEntered(body_id(other)));
        } else if let Ok((hazard, hazard_position)) = hazard_query.get(other) {
            buffer.0.push(ContactEvent::Hazard {
                damage: hazard.damage,
                knockback: knockback_from(hazard, hazard_position.x, player_position.x),
            });
        }
    }

    for event in collision_end_events.read() {
        let other = if event.collider1 == player {
            event.collider2
        } else if event.collider2 == player {
            event.collider1
        } else {
            continue;
        };

        if platform_query.get(other).is_ok() {
            buffer.0.push(ContactEvent::BodyExited(body_id(other)));
        }
    }
}
