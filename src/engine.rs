//! The engine facade.
//!
//! [`Engine`] owns the ECS [`World`] holding every sprite and resource and
//! the per-frame [`Schedule`]. Hosts drive it by calling [`Engine::tick`]
//! once per display refresh, forwarding pointer samples to the
//! `pointer_*` methods between ticks, and replaying the canvas draw list.
//!
//! ```ignore
//! let mut engine = Engine::new(320, 200)?;
//! let hero = engine.spawn_sprite(SpriteBuilder::new().texture(tex).at(10.0, 10.0));
//! engine.on(hero, CursorEventKind::Down, |ctx, _event| {
//!     ctx.add_process(shake(20, 2.0));
//! });
//! loop {
//!     engine.tick();
//!     present(engine.take_draw_calls());
//! }
//! ```

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::{debug, info, warn};

use crate::builder::SpriteBuilder;
use crate::components::cursorhandlers::CursorHandlers;
use crate::components::mapposition::MapPosition;
use crate::components::scripts::{Processes, Scripts};
use crate::components::sprite::Sprite;
use crate::context::SpriteContext;
use crate::error::EngineError;
use crate::events::cursor::{CursorEvent, CursorEventKind, PointerSample};
use crate::resources::canvas::{Canvas, DrawCall};
use crate::resources::displayscale::DisplayScale;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::fontstore::{BitmapFont, FontOptions, FontStore};
use crate::resources::framecount::FrameCount;
use crate::resources::renderoffset::RenderOffset;
use crate::resources::spritelist::SpriteList;
use crate::script::Step;
use crate::systems::fonts::refresh_fonts;
use crate::systems::render::frame_loop;
use crate::systems::{cursor, hittest, lifecycle, text};
use crate::texture::Texture;

pub struct Engine {
    world: World,
    schedule: Schedule,
}

impl Engine {
    /// Engine drawing onto a `width` x `height` canvas. Both must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        let canvas = Canvas::new(width, height)?;

        let mut world = World::new();
        world.insert_resource(canvas);
        world.insert_resource(SpriteList::default());
        world.insert_resource(DisplayScale::default());
        world.insert_resource(RenderOffset::default());
        world.insert_resource(FontStore::new());
        world.insert_resource(FrameCount::default());

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((refresh_fonts, frame_loop).chain());

        info!("engine ready with a {width}x{height} canvas");
        Ok(Self { world, schedule })
    }

    /// Engine sized and scaled from a loaded configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut engine = Self::new(config.canvas_width, config.canvas_height)?;
        if config.auto_scale {
            engine.fit_to_window(config.window_width as f32, config.window_height as f32);
        } else {
            engine.set_scale(config.scale);
        }
        engine.set_origin(config.origin_x, config.origin_y);
        engine.world.insert_resource(config.clone());
        Ok(engine)
    }

    /// Run one frame.
    pub fn tick(&mut self) {
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Number of completed frames.
    pub fn frame(&self) -> u64 {
        self.world.resource::<FrameCount>().0
    }

    // --------------- sprites ---------------

    /// Spawn a sprite and append it to the live list.
    pub fn spawn_sprite(&mut self, builder: SpriteBuilder) -> Entity {
        lifecycle::spawn_sprite(&mut self.world, builder)
    }

    /// Remove a sprite. Returns `false` if it was not alive.
    pub fn remove_sprite(&mut self, sprite: Entity) -> bool {
        lifecycle::remove_sprite(&mut self.world, sprite)
    }

    /// Live sprites in their current order.
    pub fn sprites(&self) -> &[Entity] {
        self.world.resource::<SpriteList>().as_slice()
    }

    /// Whether `sprite` is still a live sprite.
    pub fn is_alive(&self, sprite: Entity) -> bool {
        self.world.get::<Sprite>(sprite).is_some()
    }

    /// Sprite component of a live sprite.
    pub fn sprite(&self, sprite: Entity) -> Option<&Sprite> {
        self.world.get::<Sprite>(sprite)
    }

    /// Position of a live sprite.
    pub fn position(&self, sprite: Entity) -> Option<MapPosition> {
        self.world.get::<MapPosition>(sprite).copied()
    }

    /// Sprite-scoped access, the same view steps and handlers get.
    pub fn sprite_context(&mut self, sprite: Entity) -> SpriteContext<'_> {
        SpriteContext::new(&mut self.world, sprite)
    }

    /// Register a cursor handler. Handlers of one kind run in registration
    /// order. Returns `false` if the sprite is not alive.
    pub fn on<F>(&mut self, sprite: Entity, kind: CursorEventKind, handler: F) -> bool
    where
        F: FnMut(&mut SpriteContext<'_>, &CursorEvent) + Send + Sync + 'static,
    {
        match self.world.get_mut::<CursorHandlers>(sprite) {
            Some(mut handlers) => {
                handlers.push(kind, Box::new(handler));
                true
            }
            None => false,
        }
    }

    /// Queue a script behind the sprite's current ones.
    pub fn push_script(&mut self, sprite: Entity, step: impl Step) -> bool {
        match self.world.get_mut::<Scripts>(sprite) {
            Some(mut scripts) => {
                scripts.push(step);
                true
            }
            None => false,
        }
    }

    /// Add a step that runs every frame alongside the script queue. Returns
    /// `false` for a removed sprite.
    pub fn add_process(&mut self, sprite: Entity, step: impl Step) -> bool {
        match self.world.get_mut::<Processes>(sprite) {
            Some(mut processes) => {
                processes.push(step);
                true
            }
            None => false,
        }
    }

    /// Whether canvas point `(x, y)` lies strictly inside the sprite's
    /// visible rectangle.
    pub fn point_in_sprite(&self, sprite: Entity, x: f32, y: f32) -> bool {
        hittest::point_in_sprite(&self.world, sprite, x, y)
    }

    /// Whether the two sprites' rectangles touch or intersect.
    pub fn sprites_overlap(&self, a: Entity, b: Entity) -> bool {
        hittest::sprites_overlap(&self.world, a, b)
    }

    // --------------- fonts ---------------

    /// Create a bitmap font from a glyph strip and store it under `key`,
    /// replacing any previous font with that key.
    pub fn create_bitmap_font(
        &mut self,
        key: impl Into<String>,
        chars: &str,
        texture: Texture,
        options: FontOptions,
    ) {
        let key = key.into();
        debug!("creating bitmap font `{key}` from `{}`", texture.label());
        let font = BitmapFont::new(chars, texture, options);
        self.world.resource_mut::<FontStore>().add(key, font);
    }

    /// Font registered under `key`.
    pub fn font(&self, key: &str) -> Option<&BitmapFont> {
        self.world.resource::<FontStore>().get(key)
    }

    /// Mutable access to a font, e.g. to move its cursor or margins.
    pub fn font_mut(&mut self, key: &str) -> Option<&mut BitmapFont> {
        self.world
            .get_resource_mut::<FontStore>()
            .map(|store| store.into_inner())
            .and_then(|store| store.get_mut(key))
    }

    /// Draw `text` with font `key`. Returns `false` for an unknown font.
    pub fn draw_string(&mut self, key: &str, text: &str, start: Option<(f32, f32)>) -> bool {
        text::draw_string(&mut self.world, key, text, start)
    }

    /// Draw one glyph with font `key` and return its advance.
    pub fn draw_character(&mut self, key: &str, ch: char, start: Option<(f32, f32)>) -> f32 {
        text::draw_character(&mut self.world, key, ch, start)
    }

    // --------------- pointer input ---------------

    /// Route a pointer motion sample to sprite handlers.
    pub fn pointer_move(&mut self, sample: &PointerSample) {
        cursor::pointer_move(&mut self.world, sample);
    }

    /// Route a button press.
    pub fn pointer_down(&mut self, sample: &PointerSample) {
        cursor::pointer_down(&mut self.world, sample);
    }

    /// Route a button release.
    pub fn pointer_up(&mut self, sample: &PointerSample) {
        cursor::pointer_up(&mut self.world, sample);
    }

    /// The pointer entered the canvas.
    pub fn pointer_enter(&mut self, sample: &PointerSample) {
        cursor::pointer_enter(&mut self.world, sample);
    }

    /// The pointer left the canvas.
    pub fn pointer_leave(&mut self, sample: &PointerSample) {
        cursor::pointer_leave(&mut self.world, sample);
    }

    // --------------- display ---------------

    /// Whether host point `(page_x, page_y)` maps onto the canvas.
    pub fn pointer_on_canvas(&self, page_x: f32, page_y: f32) -> bool {
        let (x, y) = self.display_scale().to_local(page_x, page_y);
        self.canvas().contains(x, y)
    }

    /// Current host-to-canvas mapping.
    pub fn display_scale(&self) -> DisplayScale {
        *self.world.resource::<DisplayScale>()
    }

    /// Set the host-to-canvas scale. Scales that are not finite and positive
    /// are ignored so pointer mapping never divides by zero.
    pub fn set_scale(&mut self, scale: f32) {
        if !(scale.is_finite() && scale > 0.0) {
            warn!("ignoring display scale {scale}");
            return;
        }
        self.world.resource_mut::<DisplayScale>().scale = scale;
    }

    /// Set where the canvas top-left sits in host coordinates.
    pub fn set_origin(&mut self, origin_x: f32, origin_y: f32) {
        let mut display = self.world.resource_mut::<DisplayScale>();
        display.origin_x = origin_x;
        display.origin_y = origin_y;
    }

    /// Scale the canvas to fit a host window and return the scale in effect.
    /// A window without area (minimized) keeps the current scale.
    pub fn fit_to_window(&mut self, window_width: f32, window_height: f32) -> f32 {
        let canvas = self.world.resource::<Canvas>();
        let scale = DisplayScale::fit(
            window_width,
            window_height,
            canvas.width() as f32,
            canvas.height() as f32,
        );
        debug!("fit canvas to {window_width}x{window_height} window: scale {scale}");
        self.set_scale(scale);
        self.display_scale().scale
    }

    /// Offset added to every sprite's draw position.
    pub fn set_render_offset(&mut self, x: f32, y: f32) {
        *self.world.resource_mut::<RenderOffset>() = RenderOffset { x, y };
    }

    /// The draw surface with this frame's recorded calls.
    pub fn canvas(&self) -> &Canvas {
        self.world.resource::<Canvas>()
    }

    /// Hand the recorded draw calls to the presenter.
    pub fn take_draw_calls(&mut self) -> Vec<DrawCall> {
        self.world.resource_mut::<Canvas>().take_calls()
    }

    /// Underlying ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable ECS world for direct entity access.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
