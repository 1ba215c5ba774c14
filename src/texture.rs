//! Texture handles.
//!
//! A [`Texture`] is a cheap, clonable handle to an RGBA8 pixel resource with
//! a fixed width and height. Pixel data may arrive after the handle is
//! created (see [`Texture::pending`]); consumers either poll
//! [`Texture::is_loaded`] or wait on the one-shot receiver returned by
//! [`Texture::when_loaded`].
//!
//! Sprites built without a texture share the [`Texture::missing`]
//! placeholder, a 16x16 magenta/black checkerboard.

use crossbeam_channel::{Receiver, Sender};
use log::{debug, warn};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, OnceLock, PoisonError};

use crate::error::TextureError;
use crate::glyph::AlphaSource;

const MISSING_SIZE: u32 = 16;
const MISSING_CHECK: u32 = 8;

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);

static MISSING_TEXTURE: LazyLock<Texture> = LazyLock::new(|| {
    let pixels = PixelData::from_fn(MISSING_SIZE, MISSING_SIZE, |x, y| {
        if (x / MISSING_CHECK + y / MISSING_CHECK) % 2 == 0 {
            [255, 0, 255, 255]
        } else {
            [0, 0, 0, 255]
        }
    });
    Texture::from_pixels("missing", pixels)
});

/// Owned RGBA8 pixel buffer, row-major, 4 bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelData {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelData {
    /// Wrap an RGBA8 buffer. The buffer length must be `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::BufferLength {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Build a buffer by evaluating `pixel(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut pixel: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&pixel(x, y));
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// A fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ])
    }

    /// Overwrite one pixel. Out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.rgba[i..i + 4].copy_from_slice(&rgba);
    }
}

impl fmt::Debug for PixelData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelData")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl AlphaSource for PixelData {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |p| p[3])
    }
}

/// Stable identity of a texture, used by presenters to cache GPU uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    pub fn get(self) -> u64 {
        self.0
    }
}

struct TextureInner {
    id: TextureId,
    label: String,
    width: u32,
    height: u32,
    pixels: OnceLock<PixelData>,
    // Guards the loaded transition so a waiter registered concurrently
    // with `complete` is either notified or sees the pixels.
    waiters: Mutex<Vec<Sender<()>>>,
}

/// Shared handle to a pixel resource.
#[derive(Clone)]
pub struct Texture(Arc<TextureInner>);

impl Texture {
    fn with_state(label: impl Into<String>, width: u32, height: u32) -> Self {
        Texture(Arc::new(TextureInner {
            id: TextureId(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed)),
            label: label.into(),
            width,
            height,
            pixels: OnceLock::new(),
            waiters: Mutex::new(Vec::new()),
        }))
    }

    /// A texture whose pixels are already available.
    pub fn from_pixels(label: impl Into<String>, pixels: PixelData) -> Self {
        let texture = Self::with_state(label, pixels.width(), pixels.height());
        // Freshly created, nobody else can have set it.
        let _ = texture.0.pixels.set(pixels);
        texture
    }

    /// A texture with a declared size whose pixels arrive later through
    /// [`Texture::complete`].
    pub fn pending(label: impl Into<String>, width: u32, height: u32) -> Self {
        Self::with_state(label, width, height)
    }

    /// The shared placeholder used by sprites built without a texture.
    pub fn missing() -> Texture {
        MISSING_TEXTURE.clone()
    }

    /// Supply the pixel data of a pending texture and wake every waiter.
    pub fn complete(&self, pixels: PixelData) -> Result<(), TextureError> {
        if pixels.width() != self.0.width || pixels.height() != self.0.height {
            return Err(TextureError::SizeMismatch {
                width: self.0.width,
                height: self.0.height,
                actual_width: pixels.width(),
                actual_height: pixels.height(),
            });
        }

        let mut waiters = self.0.waiters.lock().unwrap_or_else(PoisonError::into_inner);
        if self.0.pixels.set(pixels).is_err() {
            warn!("texture `{}` completed twice", self.0.label);
            return Err(TextureError::AlreadyLoaded(self.0.label.clone()));
        }
        debug!(
            "texture `{}` loaded ({}x{}), notifying {} waiter(s)",
            self.0.label,
            self.0.width,
            self.0.height,
            waiters.len()
        );
        for waiter in waiters.drain(..) {
            // A dropped receiver just means nobody cares anymore.
            let _ = waiter.send(());
        }
        Ok(())
    }

    /// One-shot load notification. If the texture is already loaded the
    /// receiver is ready immediately.
    pub fn when_loaded(&self) -> Receiver<()> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut waiters = self.0.waiters.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_loaded() {
            let _ = tx.send(());
        } else {
            waiters.push(tx);
        }
        rx
    }

    pub fn id(&self) -> TextureId {
        self.0.id
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn width(&self) -> u32 {
        self.0.width
    }

    pub fn height(&self) -> u32 {
        self.0.height
    }

    pub fn is_loaded(&self) -> bool {
        self.0.pixels.get().is_some()
    }

    /// Readable pixels, once loaded.
    pub fn pixels(&self) -> Option<&PixelData> {
        self.0.pixels.get()
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Texture {}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.0.id)
            .field("label", &self.0.label)
            .field("width", &self.0.width)
            .field("height", &self.0.height)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixeldata_rejects_wrong_length() {
        let err = PixelData::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            TextureError::BufferLength {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_pixeldata_alpha_out_of_range_is_transparent() {
        let pixels = PixelData::from_fn(2, 2, |_, _| [1, 2, 3, 200]);
        assert_eq!(pixels.alpha(1, 1), 200);
        assert_eq!(pixels.alpha(2, 0), 0);
        assert_eq!(pixels.alpha(0, 5), 0);
    }

    #[test]
    fn test_set_pixel_roundtrip() {
        let mut pixels = PixelData::transparent(3, 3);
        pixels.set_pixel(2, 1, [9, 8, 7, 6]);
        assert_eq!(pixels.pixel(2, 1), Some([9, 8, 7, 6]));
        assert_eq!(pixels.pixel(1, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_missing_texture_is_shared_checkerboard() {
        let a = Texture::missing();
        let b = Texture::missing();
        assert_eq!(a, b);
        assert!(a.is_loaded());
        assert_eq!((a.width(), a.height()), (16, 16));
        let pixels = a.pixels().unwrap();
        assert_eq!(pixels.pixel(0, 0), Some([255, 0, 255, 255]));
        assert_eq!(pixels.pixel(8, 0), Some([0, 0, 0, 255]));
        assert_eq!(pixels.pixel(8, 8), Some([255, 0, 255, 255]));
    }

    #[test]
    fn test_pending_texture_notifies_on_complete() {
        let texture = Texture::pending("strip", 4, 4);
        assert!(!texture.is_loaded());
        let rx = texture.when_loaded();
        assert!(rx.try_recv().is_err());

        texture.complete(PixelData::transparent(4, 4)).unwrap();
        assert!(texture.is_loaded());
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn test_when_loaded_on_loaded_texture_is_ready() {
        let texture = Texture::from_pixels("ready", PixelData::transparent(1, 1));
        assert!(texture.when_loaded().try_recv().is_ok());
    }

    #[test]
    fn test_complete_rejects_size_mismatch_and_double_load() {
        let texture = Texture::pending("strip", 4, 4);
        assert!(matches!(
            texture.complete(PixelData::transparent(3, 4)),
            Err(TextureError::SizeMismatch { .. })
        ));
        texture.complete(PixelData::transparent(4, 4)).unwrap();
        assert_eq!(
            texture.complete(PixelData::transparent(4, 4)),
            Err(TextureError::AlreadyLoaded("strip".into()))
        );
    }

    #[test]
    fn test_clones_share_identity() {
        let texture = Texture::pending("a", 1, 1);
        let clone = texture.clone();
        assert_eq!(texture.id(), clone.id());
        assert_ne!(texture.id(), Texture::pending("b", 1, 1).id());
        clone.complete(PixelData::transparent(1, 1)).unwrap();
        assert!(texture.is_loaded());
    }
}
