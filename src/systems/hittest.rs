//! Hit testing against live sprites.
//!
//! Both tests use the full texture size. The point test is strict (edges are
//! outside) while the overlap test is inclusive (touching edges overlap).
//! Removed sprites never hit.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;

fn placed(world: &World, sprite: Entity) -> Option<(&Sprite, MapPosition)> {
    let data = world.get::<Sprite>(sprite)?;
    let at = world.get::<MapPosition>(sprite).copied()?;
    Some((data, at))
}

/// Whether canvas point `(x, y)` lies strictly inside the sprite.
pub fn point_in_sprite(world: &World, sprite: Entity, x: f32, y: f32) -> bool {
    placed(world, sprite).is_some_and(|(data, at)| data.contains_point(at, x, y))
}

/// Whether the bounds of `a` and `b` intersect or touch.
pub fn sprites_overlap(world: &World, a: Entity, b: Entity) -> bool {
    match (placed(world, a), placed(world, b)) {
        (Some((sa, at_a)), Some((sb, at_b))) => sa.overlaps(at_a, sb, at_b),
        _ => false,
    }
}
