use bevy_ecs::prelude::Component;

use crate::components::mapposition::MapPosition;
use crate::resources::canvas::Rect;
use crate::texture::Texture;

/// Sprite is identified by its texture, an optional cell size and a cell index
/// when the texture is a sprite sheet.
///
/// Without a cell size the whole texture is drawn at its natural size. With
/// only one of `width`/`height` set the cell is square. A zero dimension
/// counts as unset.
///
/// Hit testing always uses the full texture size, not the cell size.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub texture: Texture,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Row-major cell offset into the sheet.
    pub index: u32,
    pub hidden: bool,
}

impl Sprite {
    pub fn new(texture: Texture) -> Self {
        Self {
            texture,
            width: None,
            height: None,
            index: 0,
            hidden: false,
        }
    }

    /// Effective `(width, height)` of one sheet cell, if the sprite is sliced.
    pub fn cell_size(&self) -> Option<(f32, f32)> {
        let width = self.width.filter(|w| *w > 0.0);
        let height = self.height.filter(|h| *h > 0.0);
        match (width.or(height), height.or(width)) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }

    /// Source rectangle inside the texture for the current `index`.
    pub fn source_rect(&self) -> Rect {
        let tex_w = self.texture.width() as f32;
        let tex_h = self.texture.height() as f32;
        match self.cell_size() {
            None => Rect::new(0.0, 0.0, tex_w, tex_h),
            Some((w, h)) => {
                let columns = ((tex_w / w).floor() as u32).max(1);
                let column = self.index % columns;
                let row = self.index / columns;
                Rect::new(column as f32 * w, row as f32 * h, w, h)
            }
        }
    }

    /// Strict containment: a point on any edge is outside.
    pub fn contains_point(&self, at: MapPosition, px: f32, py: f32) -> bool {
        px > at.x
            && px < at.x + self.texture.width() as f32
            && py > at.y
            && py < at.y + self.texture.height() as f32
    }

    /// Inclusive AABB overlap: sprites touching along an edge overlap.
    pub fn overlaps(&self, at: MapPosition, other: &Sprite, other_at: MapPosition) -> bool {
        at.x + self.texture.width() as f32 >= other_at.x
            && at.x <= other_at.x + other.texture.width() as f32
            && at.y <= other_at.y + other.texture.height() as f32
            && at.y + self.texture.height() as f32 >= other_at.y
    }
}
