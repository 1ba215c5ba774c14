//! Spritestage: a small 2D sprite engine.
//!
//! Sprites are ECS entities that draw a texture (or one cell of a sprite
//! sheet) onto a fixed-size canvas in layer order, run cooperative scripts
//! and processes once per frame, and react to pointer events. Bitmap fonts
//! are read straight from glyph strip textures.
//!
//! The entry point is [`engine::Engine`].

pub mod builder;
pub mod components;
pub mod context;
pub mod engine;
pub mod error;
pub mod events;
pub mod glyph;
pub mod resources;
pub mod script;
pub mod systems;
pub mod texture;
