//! Cursor event types.
//!
//! The pointer input adapter feeds [`PointerSample`]s in host coordinates.
//! The pointer router converts them to engine coordinates and delivers a
//! [`CursorEvent`] of one [`CursorEventKind`] to every affected sprite, with
//! `x`/`y` relative to that sprite's top-left corner.

/// Closed set of cursor event kinds a sprite can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorEventKind {
    /// A button was pressed over the sprite.
    Down,
    /// A button was released over the sprite.
    Up,
    /// The pointer moved onto the sprite, or entered the canvas over it.
    Enter,
    /// The pointer moved while staying over the sprite.
    Move,
    /// The pointer moved off the sprite, or left the canvas over it.
    Leave,
}

impl CursorEventKind {
    pub const ALL: [CursorEventKind; 5] = [
        CursorEventKind::Down,
        CursorEventKind::Up,
        CursorEventKind::Enter,
        CursorEventKind::Move,
        CursorEventKind::Leave,
    ];
}

/// Keyboard modifiers held during a pointer sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

/// Raw pointer sample as delivered by the host.
///
/// `page_x`/`page_y` and the movement delta are in host pixels; the router
/// subtracts the canvas origin and divides by the display scale.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub page_x: f32,
    pub page_y: f32,
    pub movement_x: f32,
    pub movement_y: f32,
    /// Bit mask of held buttons (bit 0 = primary).
    pub buttons: u32,
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds.
    pub timestamp: f64,
}

impl PointerSample {
    pub fn at(page_x: f32, page_y: f32) -> Self {
        Self {
            page_x,
            page_y,
            ..Self::default()
        }
    }

    pub fn with_movement(mut self, movement_x: f32, movement_y: f32) -> Self {
        self.movement_x = movement_x;
        self.movement_y = movement_y;
        self
    }

    pub fn with_buttons(mut self, buttons: u32) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Event delivered to a sprite's cursor handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorEvent {
    pub kind: CursorEventKind,
    /// Pointer x relative to the sprite's left edge, in canvas pixels.
    pub x: f32,
    /// Pointer y relative to the sprite's top edge, in canvas pixels.
    pub y: f32,
    /// Motion since the previous sample, already divided by the display scale.
    pub movement_x: f32,
    pub movement_y: f32,
    pub buttons: u32,
    pub modifiers: Modifiers,
    pub timestamp: f64,
}
