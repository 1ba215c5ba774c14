//! Cursor handler registry attached to each sprite.
//!
//! Handlers are grouped by [`CursorEventKind`] and invoked in registration
//! order. During dispatch the list for one kind is taken out of the
//! component, run, and merged back afterwards, so a handler may register
//! more handlers (they run from the next event on) or remove its sprite.

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::context::SpriteContext;
use crate::events::cursor::{CursorEvent, CursorEventKind};

/// Boxed cursor callback. Receives the sprite it is registered on.
pub type CursorHandler = Box<dyn FnMut(&mut SpriteContext<'_>, &CursorEvent) + Send + Sync>;

/// Handlers registered for one event kind.
pub type HandlerList = SmallVec<[CursorHandler; 1]>;

#[derive(Component, Default)]
pub struct CursorHandlers {
    handlers: FxHashMap<CursorEventKind, HandlerList>,
}

impl CursorHandlers {
    pub fn push(&mut self, kind: CursorEventKind, handler: CursorHandler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Number of handlers registered for `kind`.
    pub fn count(&self, kind: CursorEventKind) -> usize {
        self.handlers.get(&kind).map_or(0, |list| list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(|list| list.is_empty())
    }

    /// Remove every handler of `kind`.
    pub fn clear(&mut self, kind: CursorEventKind) {
        self.handlers.remove(&kind);
    }

    /// Take the handlers of `kind` out for dispatch.
    pub fn take(&mut self, kind: CursorEventKind) -> HandlerList {
        self.handlers.remove(&kind).unwrap_or_default()
    }

    /// Put dispatched handlers back in front of any registered meanwhile.
    pub fn restore(&mut self, kind: CursorEventKind, mut taken: HandlerList) {
        if let Some(added) = self.handlers.remove(&kind) {
            taken.extend(added);
        }
        if !taken.is_empty() {
            self.handlers.insert(kind, taken);
        }
    }
}
