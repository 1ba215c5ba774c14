use bevy_ecs::prelude::*;

use crate::resources::fontstore::FontStore;

/// Pick up glyph metrics for fonts whose texture finished loading.
pub fn refresh_fonts(mut fonts: ResMut<FontStore>) {
    for (_, font) in fonts.iter_mut() {
        font.refresh();
    }
}
