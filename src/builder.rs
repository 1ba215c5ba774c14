//! Sprite construction.
//!
//! [`SpriteBuilder`] collects the initial state of a sprite; spawning it
//! (through [`Engine::spawn_sprite`](crate::engine::Engine::spawn_sprite) or
//! [`SpriteContext::spawn`](crate::context::SpriteContext::spawn)) turns it
//! into an entity and appends it to the live list.
//!
//! ```ignore
//! let hero = engine.spawn_sprite(
//!     SpriteBuilder::new()
//!         .texture(sheet)
//!         .width(16.0)
//!         .at(40.0, 60.0)
//!         .layer(2)
//!         .script(animate_cells([0, 1, 2, 3], 6, true)),
//! );
//! ```

use bevy_ecs::prelude::*;

use crate::components::cursorhandlers::CursorHandlers;
use crate::components::mapposition::MapPosition;
use crate::components::scripts::{Processes, Scripts};
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::script::Step;
use crate::texture::Texture;

/// Initial state for a new sprite. Everything defaults: position `(0, 0)`,
/// layer `0`, visible, the missing-texture placeholder, no cell size, cell 0.
#[derive(Default)]
pub struct SpriteBuilder {
    position: MapPosition,
    layer: i32,
    hidden: bool,
    texture: Option<Texture>,
    width: Option<f32>,
    height: Option<f32>,
    index: u32,
    scripts: Scripts,
    processes: Processes,
}

impl SpriteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = MapPosition::new(x, y);
        self
    }

    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Cell width when the texture is a sprite sheet.
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Cell height when the texture is a sprite sheet.
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Queue an initial script. Repeated calls queue in order.
    pub fn script(mut self, step: impl Step) -> Self {
        self.scripts.push(step);
        self
    }

    /// Start an initial process.
    pub fn process(mut self, step: impl Step) -> Self {
        self.processes.push(step);
        self
    }

    /// The component bundle for the new entity.
    pub(crate) fn into_bundle(self) -> impl Bundle {
        let sprite = Sprite {
            texture: self.texture.unwrap_or_else(Texture::missing),
            width: self.width,
            height: self.height,
            index: self.index,
            hidden: self.hidden,
        };
        (
            self.position,
            ZIndex(self.layer),
            sprite,
            self.scripts,
            self.processes,
            CursorHandlers::default(),
        )
    }
}
