//! Font store resource.
//!
//! Holds every [`BitmapFont`] created through the engine, keyed by string
//! IDs. Fonts keep their own draw cursor, so consecutive `draw_string` calls
//! without an explicit start position continue where the previous one ended.
//!
//! A font's glyph metrics are derived from its texture's pixels. When the
//! texture is still pending the font waits on the texture's load signal and
//! computes them on the first [`BitmapFont::refresh`] after it fires; until
//! then the font has no glyphs and a height of one pixel.

use bevy_ecs::prelude::Resource;
use crossbeam_channel::Receiver;
use log::debug;
use rustc_hash::FxHashMap;

use crate::glyph::{GlyphMetrics, extract_glyphs};
use crate::resources::canvas::{Canvas, Rect};
use crate::texture::Texture;

/// Spacing options for [`BitmapFont::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontOptions {
    /// Advance for `' '`. Defaults to the texture width.
    pub space_width: Option<f32>,
    /// Gap after every drawn glyph.
    pub horizontal_margin: f32,
    /// Gap between lines.
    pub vertical_margin: f32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            space_width: None,
            horizontal_margin: 1.0,
            vertical_margin: 1.0,
        }
    }
}

impl FontOptions {
    /// Advance used for `' '`.
    pub fn space_width(mut self, width: f32) -> Self {
        self.space_width = Some(width);
        self
    }

    /// Gap after each glyph and between lines.
    pub fn margins(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_margin = horizontal;
        self.vertical_margin = vertical;
        self
    }
}

/// Proportional bitmap font read from a glyph strip.
#[derive(Debug)]
pub struct BitmapFont {
    texture: Texture,
    chars: Vec<char>,
    load_signal: Option<Receiver<()>>,
    height: u32,
    glyphs: FxHashMap<char, GlyphMetrics>,
    unknown: Option<GlyphMetrics>,
    /// Draw cursor.
    pub x: f32,
    pub y: f32,
    pub space_width: f32,
    pub horizontal_margin: f32,
    pub vertical_margin: f32,
}

impl BitmapFont {
    /// `chars` lists the characters of strip rows `1..`, in order; row 0 is
    /// the fallback glyph.
    pub fn new(chars: &str, texture: Texture, options: FontOptions) -> Self {
        let mut font = Self {
            load_signal: Some(texture.when_loaded()),
            chars: chars.chars().collect(),
            height: 1,
            glyphs: FxHashMap::default(),
            unknown: None,
            x: 0.0,
            y: 0.0,
            space_width: options.space_width.unwrap_or(texture.width() as f32),
            horizontal_margin: options.horizontal_margin,
            vertical_margin: options.vertical_margin,
            texture,
        };
        font.refresh();
        font
    }

    /// Compute glyph metrics if the texture finished loading since the last
    /// call. Returns `true` once metrics are available.
    pub fn refresh(&mut self) -> bool {
        let Some(signal) = &self.load_signal else {
            return true;
        };
        if signal.try_recv().is_err() {
            return false;
        }
        self.load_signal = None;

        let Some(pixels) = self.texture.pixels() else {
            return false;
        };
        let strip = extract_glyphs(pixels, self.chars.len());
        self.height = strip.height;
        self.unknown = strip.unknown();
        self.glyphs = self
            .chars
            .iter()
            .enumerate()
            .filter_map(|(i, ch)| strip.character(i).map(|m| (*ch, m)))
            .collect();
        debug!(
            "font metrics ready for `{}`: {} glyphs, height {}",
            self.texture.label(),
            self.glyphs.len(),
            self.height
        );
        true
    }

    /// Whether glyph metrics have been computed.
    pub fn is_ready(&self) -> bool {
        self.load_signal.is_none()
    }

    /// Glyph strip texture.
    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Glyph height; `1` until the metrics are known.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Metrics used to draw `ch`: its own or the fallback glyph.
    pub fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
        self.glyphs.get(&ch).copied().or(self.unknown)
    }

    /// Draw a single character at `start`, or at the cursor when `None`,
    /// and advance the cursor. Returns the advance; `0.0` when there is no
    /// glyph to draw (metrics not ready yet).
    pub fn draw_character(
        &mut self,
        canvas: &mut Canvas,
        ch: char,
        start: Option<(f32, f32)>,
    ) -> f32 {
        self.refresh();
        if let Some((x, y)) = start {
            self.x = x;
            self.y = y;
        }
        let Some(glyph) = self.glyph(ch) else {
            return 0.0;
        };

        let src = Rect::new(
            0.0,
            glyph.offset_y as f32,
            glyph.width as f32,
            self.height as f32,
        );
        canvas.draw_image(self.texture.clone(), src, self.x, self.y);

        let advance = glyph.width as f32 + self.horizontal_margin;
        self.x += advance;
        advance
    }

    /// Draw `text` starting at `start`, or at the cursor when `None`.
    /// `' '` advances by `space_width`; `'\n'` returns to the start column
    /// one line lower.
    pub fn draw_string(&mut self, canvas: &mut Canvas, text: &str, start: Option<(f32, f32)>) {
        self.refresh();
        if let Some((x, y)) = start {
            self.x = x;
            self.y = y;
        }
        let start_x = self.x;

        for ch in text.chars() {
            match ch {
                ' ' => self.x += self.space_width,
                '\n' => {
                    self.y += self.height as f32 + self.vertical_margin;
                    self.x = start_x;
                }
                _ => {
                    self.draw_character(canvas, ch, None);
                }
            }
        }
    }
}

/// Map of font keys to bitmap fonts.
#[derive(Resource, Debug, Default)]
pub struct FontStore {
    fonts: FxHashMap<String, BitmapFont>,
}

impl FontStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font, replacing any font with the same key.
    pub fn add(&mut self, id: impl Into<String>, font: BitmapFont) -> Option<BitmapFont> {
        self.fonts.insert(id.into(), font)
    }

    /// Font under `id`.
    pub fn get(&self, id: impl AsRef<str>) -> Option<&BitmapFont> {
        self.fonts.get(id.as_ref())
    }

    /// Mutable font under `id`.
    pub fn get_mut(&mut self, id: impl AsRef<str>) -> Option<&mut BitmapFont> {
        self.fonts.get_mut(id.as_ref())
    }

    /// Remove and return the font under `id`.
    pub fn remove(&mut self, id: impl AsRef<str>) -> Option<BitmapFont> {
        self.fonts.remove(id.as_ref())
    }

    /// Every font with its key, in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut BitmapFont)> {
        self.fonts.iter_mut()
    }

    /// Number of registered fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether no font is registered.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
