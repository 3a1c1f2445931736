//! Bitmap fonts for ILI934x text rendering
//!
//! The driver never cares which kind of font it draws with. Everything it
//! needs goes through the [`Font`] trait:
//!
//! - `height()` - glyph height in pixels (all glyphs share it)
//! - `max_width()` - widest glyph, used for hard-breaking long words
//! - `char_width()` / `str_width()` - advance widths
//! - `glyph()` - packed bitmap plus width for one character
//!
//! # Bitmap layout
//!
//! Glyph bitmaps are column-major and vertically packed: each pixel
//! column is a slab of `ceil(height / 8)` bytes, bit 0 of the first byte
//! being the top row. This is the `MONO_VLSB` layout most bitmap font
//! converters emit for SPI TFTs.
//!
//! # Provided adapters
//!
//! - [`FixedFont`] - fixed-width tables (classic 5x7 style, optional blank spacing columns)
//! - [`ProportionalFont`] - offset-indexed tables with a per-glyph width header
//! - [`GLCD`] - built-in 5x7 ASCII face, 6 pixels per character

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod fixed;
pub mod glcd;
pub mod proportional;

pub use fixed::FixedFont;
pub use glcd::GLCD;
pub use proportional::ProportionalFont;

/// One character's bitmap, borrowed from a font table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph<'a> {
    bitmap: &'a [u8],
    width: u16,
    row_bytes: usize,
}

impl<'a> Glyph<'a> {
    /// Wrap a column-major bitmap of a glyph `width` pixels wide
    ///
    /// `bitmap` may be shorter than `width * row_bytes`; missing columns
    /// read as background.
    pub const fn new(bitmap: &'a [u8], width: u16, row_bytes: usize) -> Self {
        Self {
            bitmap,
            width,
            row_bytes,
        }
    }

    /// A zero-width glyph with no pixels
    pub const fn empty() -> Self {
        Self {
            bitmap: &[],
            width: 0,
            row_bytes: 0,
        }
    }

    /// Advance width in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Raw packed bitmap
    pub const fn bitmap(&self) -> &'a [u8] {
        self.bitmap
    }

    /// Bytes per pixel column
    pub const fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Whether the pixel at (`col`, `row`) is foreground
    pub fn pixel(&self, col: u16, row: u16) -> bool {
        if col >= self.width {
            return false;
        }
        let index = col as usize * self.row_bytes + row as usize / 8;
        self.bitmap
            .get(index)
            .is_some_and(|byte| (byte >> (row % 8)) & 1 != 0)
    }
}

/// Glyph metrics and bitmap provider
///
/// Implemented by both fixed-width and proportional fonts; the display
/// holds a `&dyn Font` and swaps it at runtime.
pub trait Font {
    /// Glyph height in pixels
    fn height(&self) -> u16;

    /// Width of the widest glyph in pixels
    fn max_width(&self) -> u16;

    /// Advance width of one character
    fn char_width(&self, ch: char) -> u16;

    /// Bitmap and width for one character
    ///
    /// Characters the font does not cover map to a fallback glyph.
    fn glyph(&self, ch: char) -> Glyph<'_>;

    /// Total advance width of a string
    fn str_width(&self, text: &str) -> u32 {
        text.chars().map(|ch| u32::from(self.char_width(ch))).sum()
    }

    /// Bytes per packed pixel column
    fn row_bytes(&self) -> usize {
        (self.height() as usize).div_ceil(8)
    }
}
