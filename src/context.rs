//! Sprite-scoped access to the world.
//!
//! Scripts, processes and cursor handlers run with a [`SpriteContext`]: the
//! engine world plus the sprite they belong to. They may freely edit their
//! own sprite, touch other sprites, spawn or remove sprites and draw text.
//!
//! Every accessor tolerates the sprite having been removed (for instance by
//! an earlier handler of the same event); reads return `None` and writes are
//! dropped.

use bevy_ecs::prelude::*;

use crate::builder::SpriteBuilder;
use crate::components::cursorhandlers::{CursorHandler, CursorHandlers};
use crate::components::mapposition::MapPosition;
use crate::components::scripts::{Processes, Scripts};
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::events::cursor::CursorEventKind;
use crate::script::Step;
use crate::systems::{hittest, lifecycle, text};

pub struct SpriteContext<'w> {
    world: &'w mut World,
    sprite: Entity,
}

impl<'w> SpriteContext<'w> {
    pub fn new(world: &'w mut World, sprite: Entity) -> Self {
        Self { world, sprite }
    }

    /// The sprite this context belongs to.
    pub fn sprite(&self) -> Entity {
        self.sprite
    }

    pub fn world(&self) -> &World {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut *self.world
    }

    /// Whether the sprite is still part of the engine.
    pub fn is_alive(&self) -> bool {
        self.world.get::<Sprite>(self.sprite).is_some()
    }

    pub fn position(&self) -> Option<MapPosition> {
        self.world.get::<MapPosition>(self.sprite).copied()
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        if let Some(mut position) = self.world.get_mut::<MapPosition>(self.sprite) {
            position.x = x;
            position.y = y;
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        if let Some(mut position) = self.world.get_mut::<MapPosition>(self.sprite) {
            position.translate(dx, dy);
        }
    }

    pub fn layer(&self) -> Option<i32> {
        self.world.get::<ZIndex>(self.sprite).map(|z| z.0)
    }

    pub fn set_layer(&mut self, layer: i32) {
        if let Some(mut z) = self.world.get_mut::<ZIndex>(self.sprite) {
            z.0 = layer;
        }
    }

    pub fn sprite_data(&self) -> Option<&Sprite> {
        self.world.get::<Sprite>(self.sprite)
    }

    pub fn sprite_mut(&mut self) -> Option<Mut<'_, Sprite>> {
        self.world.get_mut::<Sprite>(self.sprite)
    }

    pub fn index(&self) -> Option<u32> {
        self.sprite_data().map(|s| s.index)
    }

    pub fn set_index(&mut self, index: u32) {
        if let Some(mut sprite) = self.sprite_mut() {
            sprite.index = index;
        }
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if let Some(mut sprite) = self.sprite_mut() {
            sprite.hidden = hidden;
        }
    }

    /// Queue a script behind the sprite's current ones.
    pub fn push_script(&mut self, step: impl Step) {
        if let Some(mut scripts) = self.world.get_mut::<Scripts>(self.sprite) {
            scripts.push(step);
        }
    }

    /// Start a process on this sprite. It is first resumed on the next pass.
    pub fn add_process(&mut self, step: impl Step) {
        if let Some(mut processes) = self.world.get_mut::<Processes>(self.sprite) {
            processes.push(step);
        }
    }

    /// Register another cursor handler on this sprite.
    pub fn on(&mut self, kind: CursorEventKind, handler: CursorHandler) {
        if let Some(mut handlers) = self.world.get_mut::<CursorHandlers>(self.sprite) {
            handlers.push(kind, handler);
        }
    }

    /// Inclusive overlap test against another sprite.
    pub fn overlaps(&self, other: Entity) -> bool {
        hittest::sprites_overlap(&*self.world, self.sprite, other)
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        hittest::point_in_sprite(&*self.world, self.sprite, x, y)
    }

    pub fn spawn(&mut self, builder: SpriteBuilder) -> Entity {
        lifecycle::spawn_sprite(self.world, builder)
    }

    /// Remove another sprite.
    pub fn remove_sprite(&mut self, sprite: Entity) -> bool {
        lifecycle::remove_sprite(self.world, sprite)
    }

    /// Remove this context's own sprite.
    pub fn remove(&mut self) -> bool {
        lifecycle::remove_sprite(self.world, self.sprite)
    }

    /// Draw text with a font from the [`FontStore`](crate::resources::fontstore::FontStore).
    pub fn draw_string(&mut self, font: &str, text: &str, start: Option<(f32, f32)>) -> bool {
        text::draw_string(self.world, font, text, start)
    }

    pub fn draw_character(&mut self, font: &str, ch: char, start: Option<(f32, f32)>) -> f32 {
        text::draw_character(self.world, font, ch, start)
    }
}
