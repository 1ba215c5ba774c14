//! Layer component for draw ordering.
//!
//! The [`ZIndex`] component is the sprite's layer. The frame loop stably
//! sorts the live sprite list by it before drawing, so lower layers end up
//! beneath higher ones and sprites sharing a layer keep their relative order.

use bevy_ecs::prelude::Component;

/// Draw-order key for 2D drawing.
///
/// Lower values are drawn first (underneath). Ties keep the order of the
/// live sprite list, which starts out as insertion order.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZIndex(pub i32);
