//! Live sprite list resource.
//!
//! The ordered list of every sprite the engine draws and routes cursor
//! events to. New sprites are appended; the frame loop stably re-sorts the
//! list by [`ZIndex`](crate::components::zindex::ZIndex) every frame, so
//! the order is both the draw order and the event iteration order.

use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Default, Clone)]
pub struct SpriteList(pub Vec<Entity>);

impl SpriteList {
    pub fn push(&mut self, sprite: Entity) {
        self.0.push(sprite);
    }

    /// Remove `sprite` by identity. Returns `false` if it was not live.
    pub fn remove(&mut self, sprite: Entity) -> bool {
        match self.0.iter().position(|e| *e == sprite) {
            Some(i) => {
                self.0.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, sprite: Entity) -> bool {
        self.0.contains(&sprite)
    }

    /// Copy of the current order, safe to iterate while the list changes.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.0.clone()
    }

    pub fn as_slice(&self) -> &[Entity] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_by_identity_keeps_order() {
        let mut world = World::new();
        let [a, b, c] = [(); 3].map(|_| world.spawn_empty().id());
        let mut list = SpriteList::default();
        list.push(a);
        list.push(b);
        list.push(c);

        assert!(list.remove(b));
        assert_eq!(list.as_slice(), &[a, c]);
        assert!(!list.remove(b));
        assert!(list.contains(c));
        assert_eq!(list.len(), 2);
    }
}
