//! Glyph-width extraction for bitmap font strips.
//!
//! A glyph strip stacks one fixed-height row per character on top of each
//! other, separated by a single pixel line. Row 0 holds the fallback
//! ("unknown") glyph; rows `1..=N` hold the font characters in order.
//!
//! For a strip `T` pixels tall with `N` characters the glyph height is
//! `(T + 1) / (N + 1) - 1` and row `r` starts at `(height + 1) * r`.
//! Each row's visible width is found by scanning columns right to left and,
//! inside a column, the row's band top to bottom: the first opaque pixel at
//! column `x` gives width `x + 1`. A band with no opaque pixel keeps the
//! full strip width.

/// Read access to a per-pixel alpha channel.
pub trait AlphaSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Alpha at `(x, y)`; out-of-range coordinates read as transparent.
    fn alpha(&self, x: u32, y: u32) -> u8;
}

/// Placement of one glyph inside its strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Tight visible width in pixels.
    pub width: u32,
    /// First pixel row of the glyph band.
    pub offset_y: u32,
}

/// Result of scanning a whole strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphStrip {
    /// Uniform glyph height.
    pub height: u32,
    /// Metrics per row; index 0 is the unknown glyph.
    pub rows: Vec<GlyphMetrics>,
}

impl GlyphStrip {
    pub fn unknown(&self) -> Option<GlyphMetrics> {
        self.rows.first().copied()
    }

    /// Metrics of the `i`-th font character (0-based, skipping the unknown row).
    pub fn character(&self, i: usize) -> Option<GlyphMetrics> {
        self.rows.get(i + 1).copied()
    }
}

/// Glyph height for a strip of `texture_height` pixels holding
/// `glyph_count` characters plus the unknown row.
pub fn glyph_height(texture_height: u32, glyph_count: usize) -> u32 {
    let rows = u32::try_from(glyph_count).unwrap_or(u32::MAX).saturating_add(1);
    (texture_height.saturating_add(1) / rows).saturating_sub(1)
}

/// Visible width of the band `offset_y .. offset_y + height`.
pub fn visible_width(source: &impl AlphaSource, offset_y: u32, height: u32) -> u32 {
    let bottom = offset_y.saturating_add(height).min(source.height());
    for x in (0..source.width()).rev() {
        for y in offset_y..bottom {
            if source.alpha(x, y) != 0 {
                return x + 1;
            }
        }
    }
    source.width()
}

/// Scan every row of a strip holding `glyph_count` characters.
pub fn extract_glyphs(source: &impl AlphaSource, glyph_count: usize) -> GlyphStrip {
    let height = glyph_height(source.height(), glyph_count);
    let rows = (0..=glyph_count as u32)
        .map(|row| {
            let offset_y = (height + 1) * row;
            GlyphMetrics {
                width: visible_width(source, offset_y, height),
                offset_y,
            }
        })
        .collect();
    GlyphStrip { height, rows }
}
