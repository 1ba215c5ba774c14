//! Sprite spawn and removal.
//!
//! Spawning appends to the live [`SpriteList`]; removal takes the sprite out
//! of the list and despawns its entity, dropping its scripts, processes and
//! handlers with it. Both are safe to call from inside a step or a cursor
//! handler: every stage that walks sprites iterates over a snapshot and skips
//! entities that are no longer alive.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::builder::SpriteBuilder;
use crate::components::sprite::Sprite;
use crate::resources::spritelist::SpriteList;

pub fn spawn_sprite(world: &mut World, builder: SpriteBuilder) -> Entity {
    let sprite = world.spawn(builder.into_bundle()).id();
    if let Some(mut list) = world.get_resource_mut::<SpriteList>() {
        list.push(sprite);
    }
    debug!("spawned sprite {sprite:?}");
    sprite
}

/// Remove a sprite by identity. Returns `false` (and changes nothing) when
/// the sprite is not alive.
pub fn remove_sprite(world: &mut World, sprite: Entity) -> bool {
    if let Some(mut list) = world.get_resource_mut::<SpriteList>() {
        list.remove(sprite);
    }
    if world.get::<Sprite>(sprite).is_none() {
        warn!("remove_sprite: {sprite:?} is not a live sprite");
        return false;
    }
    match world.get_entity_mut(sprite) {
        Ok(entity) => {
            entity.despawn();
            debug!("removed sprite {sprite:?}");
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_then_remove() {
        let mut world = World::new();
        world.insert_resource(SpriteList::default());

        let a = spawn_sprite(&mut world, SpriteBuilder::new());
        let b = spawn_sprite(&mut world, SpriteBuilder::new().layer(3));
        assert_eq!(world.resource::<SpriteList>().as_slice(), &[a, b]);

        assert!(remove_sprite(&mut world, a));
        assert!(world.get::<Sprite>(a).is_none());
        assert_eq!(world.resource::<SpriteList>().as_slice(), &[b]);

        // second removal is a no-op
        assert!(!remove_sprite(&mut world, a));
        assert_eq!(world.resource::<SpriteList>().len(), 1);
    }
}
