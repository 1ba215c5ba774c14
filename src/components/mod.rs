//! ECS components for sprites.
//!
//! Every sprite is an entity carrying all of these components; see
//! [`SpriteBuilder`](crate::builder::SpriteBuilder).
//!
//! Submodules overview:
//! - [`cursorhandlers`] – cursor event callbacks grouped by event kind
//! - [`mapposition`] – top-left corner in canvas pixels
//! - [`scripts`] – queued scripts and concurrent processes
//! - [`sprite`] – texture, sheet cell selection and visibility
//! - [`zindex`] – layer used for draw and event order

pub mod cursorhandlers;
pub mod mapposition;
pub mod scripts;
pub mod sprite;
pub mod zindex;
