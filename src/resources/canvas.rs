//! Canvas resource.
//!
//! The canvas is the engine's draw surface. Instead of touching pixels it
//! records a list of [`DrawCall`]s in logical (unscaled) pixels; a host
//! presenter replays the list once per frame onto whatever it renders with
//! and is free to upscale the result.

use bevy_ecs::prelude::Resource;

use crate::error::EngineError;
use crate::texture::Texture;

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// Wipe the whole surface.
    Clear,
    /// Copy `src` of `texture` into `dest` on the surface.
    Image {
        texture: Texture,
        src: Rect,
        dest: Rect,
    },
}

/// Draw surface with a fixed logical size.
#[derive(Resource, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl Canvas {
    /// Create a canvas. A surface without area cannot host the engine.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            calls: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether canvas point `(x, y)` lies on the surface. The far edges are
    /// outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f32 && y < self.height as f32
    }

    /// Drop everything recorded so far and start the frame with a clear.
    pub fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
    }

    /// Copy `src` of `texture` to `(x, y)` at its natural size.
    pub fn draw_image(&mut self, texture: Texture, src: Rect, x: f32, y: f32) {
        self.calls.push(DrawCall::Image {
            texture,
            src,
            dest: Rect::new(x, y, src.width, src.height),
        });
    }

    /// Draw a whole texture at `(x, y)`.
    pub fn draw_texture(&mut self, texture: Texture, x: f32, y: f32) {
        let src = Rect::new(0.0, 0.0, texture.width() as f32, texture.height() as f32);
        self.draw_image(texture, src, x, y);
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Hand the recorded calls to a presenter, leaving the list empty.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Iterator over the image calls only, as `(texture, src, dest)`.
    pub fn images(&self) -> impl Iterator<Item = (&Texture, Rect, Rect)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Image { texture, src, dest } => Some((texture, *src, *dest)),
            DrawCall::Clear => None,
        })
    }
}
