//! Display scale resource.
//!
//! The presenter may show the canvas enlarged and shifted inside a host
//! window. [`DisplayScale`] records that placement so pointer samples in
//! host coordinates can be mapped back to canvas pixels. Rendering itself
//! never looks at it: the canvas is always drawn in logical pixels.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    /// Host pixels per canvas pixel.
    pub scale: f32,
    /// Host position of the canvas' top-left corner.
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl DisplayScale {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin_x: f32, origin_y: f32) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Host coordinates to canvas coordinates.
    pub fn to_local(&self, page_x: f32, page_y: f32) -> (f32, f32) {
        (
            (page_x - self.origin_x) / self.scale,
            (page_y - self.origin_y) / self.scale,
        )
    }

    /// Host motion delta to canvas motion delta.
    pub fn scale_delta(&self, dx: f32, dy: f32) -> (f32, f32) {
        (dx / self.scale, dy / self.scale)
    }

    /// Largest scale that fits the canvas inside the window. Upscales are
    /// snapped to whole numbers in landscape windows to keep pixels crisp.
    pub fn fit(window_width: f32, window_height: f32, canvas_width: f32, canvas_height: f32) -> f32 {
        let scale = (window_height / canvas_height).min(window_width / canvas_width);
        if scale > 1.0 && window_height < window_width {
            scale.floor()
        } else {
            scale
        }
    }
}
