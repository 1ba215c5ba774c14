//! ECS resources made available to systems.
//!
//! Long-lived engine state stored in the world:
//! - `canvas` – draw surface recording the frame's draw calls
//! - `displayscale` – host-to-canvas pointer coordinate mapping
//! - `engineconfig` – INI-backed canvas/display/window settings
//! - `fontstore` – bitmap fonts keyed by string IDs
//! - `framecount` – number of completed frames
//! - `renderoffset` – global draw offset
//! - `spritelist` – live sprites in draw/event order
pub mod canvas;
pub mod displayscale;
pub mod engineconfig;
pub mod fontstore;
pub mod framecount;
pub mod renderoffset;
pub mod spritelist;
