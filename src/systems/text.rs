//! Text drawing onto the engine canvas with fonts from the [`FontStore`].
//!
//! An unknown font key is a soft miss: nothing is drawn.

use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::canvas::Canvas;
use crate::resources::fontstore::FontStore;

/// Draw `text` with font `key`. Returns `false` if there is no such font.
pub fn draw_string(world: &mut World, key: &str, text: &str, start: Option<(f32, f32)>) -> bool {
    world.resource_scope(|world, mut fonts: Mut<FontStore>| {
        let Some(font) = fonts.get_mut(key) else {
            warn!("draw_string: unknown font `{key}`");
            return false;
        };
        let mut canvas = world.resource_mut::<Canvas>();
        font.draw_string(&mut canvas, text, start);
        true
    })
}

/// Draw one character with font `key` and return the cursor advance
/// (`0.0` for an unknown font or a font without glyphs yet).
pub fn draw_character(world: &mut World, key: &str, ch: char, start: Option<(f32, f32)>) -> f32 {
    world.resource_scope(|world, mut fonts: Mut<FontStore>| {
        let Some(font) = fonts.get_mut(key) else {
            warn!("draw_character: unknown font `{key}`");
            return 0.0;
        };
        let mut canvas = world.resource_mut::<Canvas>();
        font.draw_character(&mut canvas, ch, start)
    })
}
