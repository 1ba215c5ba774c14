//! Engine systems.
//!
//! Submodules overview
//! - [`cursor`] – route pointer samples to sprite cursor handlers
//! - [`fonts`] – compute glyph metrics once font textures load
//! - [`hittest`] – point and overlap tests against live sprites
//! - [`lifecycle`] – spawn and remove sprites
//! - [`render`] – the per-frame loop: sort, step, draw
//! - [`scheduler`] – resume per-sprite scripts and processes
//! - [`text`] – draw strings with stored bitmap fonts

pub mod cursor;
pub mod fonts;
pub mod hittest;
pub mod lifecycle;
pub mod render;
pub mod scheduler;
pub mod text;
