//! Error types.
//!
//! Only construction-time preconditions and asset plumbing report errors.
//! Lookup misses during a frame (unknown glyphs, removed sprites) are soft and
//! never surface here.

use thiserror::Error;

/// Errors raised while building or configuring an [`Engine`](crate::engine::Engine).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The draw surface has no area; nothing could ever be drawn on it.
    #[error("invalid canvas size {width}x{height}: both dimensions must be non-zero")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("failed to load config file: {0}")]
    ConfigLoad(String),

    #[error("failed to save config file: {0}")]
    ConfigSave(String),
}

/// Errors raised while creating or completing a [`Texture`](crate::texture::Texture).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("pixel buffer holds {actual} bytes, expected {expected} for RGBA8")]
    BufferLength { expected: usize, actual: usize },

    #[error("pixel data is {actual_width}x{actual_height}, texture was declared {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("texture `{0}` has already finished loading")]
    AlreadyLoaded(String),
}
