//! Pointer event routing.
//!
//! Host pointer samples are mapped to canvas coordinates through the
//! [`DisplayScale`] and delivered to the handlers of the sprites they hit.
//!
//! A move sample compares the current position with the previous one
//! (current minus delta). Every live sprite is classified first, against a
//! snapshot of the live list, and the events are then dispatched in three
//! waves: all `Leave`, then all `Move`, then all `Enter`. Button and canvas
//! enter/leave samples go out in a single pass in live-list order.
//!
//! Handlers may remove sprites; a removed sprite is skipped for the rest of
//! the sample.

use bevy_ecs::prelude::*;

use crate::components::cursorhandlers::CursorHandlers;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::context::SpriteContext;
use crate::events::cursor::{CursorEvent, CursorEventKind, Modifiers, PointerSample};
use crate::resources::displayscale::DisplayScale;
use crate::resources::spritelist::SpriteList;
use crate::systems::hittest::point_in_sprite;

/// A pointer sample converted to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSample {
    pub x: f32,
    pub y: f32,
    pub movement_x: f32,
    pub movement_y: f32,
    pub buttons: u32,
    pub modifiers: Modifiers,
    pub timestamp: f64,
}

impl LocalSample {
    pub fn from_sample(scale: &DisplayScale, sample: &PointerSample) -> Self {
        let (x, y) = scale.to_local(sample.page_x, sample.page_y);
        let (movement_x, movement_y) = scale.scale_delta(sample.movement_x, sample.movement_y);
        Self {
            x,
            y,
            movement_x,
            movement_y,
            buttons: sample.buttons,
            modifiers: sample.modifiers,
            timestamp: sample.timestamp,
        }
    }

    /// Position before the motion delta was applied.
    pub fn previous(&self) -> (f32, f32) {
        (self.x - self.movement_x, self.y - self.movement_y)
    }

    /// Event for a sprite whose top-left corner is at `at`.
    pub fn event(&self, kind: CursorEventKind, at: MapPosition) -> CursorEvent {
        CursorEvent {
            kind,
            x: self.x - at.x,
            y: self.y - at.y,
            movement_x: self.movement_x,
            movement_y: self.movement_y,
            buttons: self.buttons,
            modifiers: self.modifiers,
            timestamp: self.timestamp,
        }
    }
}

fn localize(world: &World, sample: &PointerSample) -> LocalSample {
    let scale = world
        .get_resource::<DisplayScale>()
        .copied()
        .unwrap_or_default();
    LocalSample::from_sample(&scale, sample)
}

fn live_sprites(world: &World) -> Vec<Entity> {
    world
        .get_resource::<SpriteList>()
        .map(SpriteList::snapshot)
        .unwrap_or_default()
}

/// Run the `kind` handlers of `sprite`, in registration order. Dead sprites
/// and sprites without handlers for `kind` are skipped.
pub fn dispatch(world: &mut World, sprite: Entity, kind: CursorEventKind, sample: &LocalSample) {
    if world.get::<Sprite>(sprite).is_none() {
        return;
    }
    let Some(at) = world.get::<MapPosition>(sprite).copied() else {
        return;
    };
    let Some(mut handlers) = world
        .get_mut::<CursorHandlers>(sprite)
        .map(|mut handlers| handlers.take(kind))
    else {
        return;
    };
    if handlers.is_empty() {
        return;
    }

    let event = sample.event(kind, at);
    let mut ctx = SpriteContext::new(world, sprite);
    for handler in handlers.iter_mut() {
        handler(&mut ctx, &event);
    }

    if let Some(mut registry) = world.get_mut::<CursorHandlers>(sprite) {
        registry.restore(kind, handlers);
    }
}

/// Deliver `kind` to every live sprite containing the sample position.
fn dispatch_under_pointer(world: &mut World, kind: CursorEventKind, sample: &PointerSample) {
    let local = localize(world, sample);
    for sprite in live_sprites(world) {
        if point_in_sprite(world, sprite, local.x, local.y) {
            dispatch(world, sprite, kind, &local);
        }
    }
}

pub fn pointer_move(world: &mut World, sample: &PointerSample) {
    let local = localize(world, sample);
    let (prev_x, prev_y) = local.previous();

    let mut leaving = Vec::new();
    let mut moving = Vec::new();
    let mut entering = Vec::new();
    for sprite in live_sprites(world) {
        let was_inside = point_in_sprite(world, sprite, prev_x, prev_y);
        let is_inside = point_in_sprite(world, sprite, local.x, local.y);
        match (was_inside, is_inside) {
            (true, true) => moving.push(sprite),
            (true, false) => leaving.push(sprite),
            (false, true) => entering.push(sprite),
            (false, false) => {}
        }
    }

    for (kind, targets) in [
        (CursorEventKind::Leave, leaving),
        (CursorEventKind::Move, moving),
        (CursorEventKind::Enter, entering),
    ] {
        for sprite in targets {
            dispatch(world, sprite, kind, &local);
        }
    }
}

pub fn pointer_down(world: &mut World, sample: &PointerSample) {
    dispatch_under_pointer(world, CursorEventKind::Down, sample);
}

pub fn pointer_up(world: &mut World, sample: &PointerSample) {
    dispatch_under_pointer(world, CursorEventKind::Up, sample);
}

/// The pointer entered the canvas: `Enter` on every sprite under it.
pub fn pointer_enter(world: &mut World, sample: &PointerSample) {
    dispatch_under_pointer(world, CursorEventKind::Enter, sample);
}

/// The pointer left the canvas: `Leave` on every sprite under its last
/// position.
pub fn pointer_leave(world: &mut World, sample: &PointerSample) {
    dispatch_under_pointer(world, CursorEventKind::Leave, sample);
}
