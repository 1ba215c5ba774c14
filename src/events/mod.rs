//! Event types exchanged between the host and sprites.
//!
//! Submodules:
//! - [`cursor`] – pointer samples from the host and the cursor events sprites receive
pub mod cursor;
