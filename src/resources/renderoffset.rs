use bevy_ecs::prelude::Resource;

/// Global offset added to every sprite's draw position (camera-style pan).
///
/// It only moves drawing; hit testing keeps using sprite positions as is.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct RenderOffset {
    pub x: f32,
    pub y: f32,
}
