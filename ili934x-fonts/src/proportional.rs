//! Proportional font tables
//!
//! Table layout (as produced by common font-to-source converters):
//!
//! - `index`: one `u16` offset into `data` per character in `first..=last`
//! - `data`: at each offset, a little-endian `u16` glyph width followed by
//!   `width * ceil(height / 8)` bytes of column-major bitmap
//!
//! Characters outside the table use the glyph at index 0, which converters
//! conventionally reserve for the default character.

use crate::{Font, Glyph};

/// Proportional bitmap font
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProportionalFont {
    height: u16,
    max_width: u16,
    first: char,
    last: char,
    index: &'static [u16],
    data: &'static [u8],
}

impl ProportionalFont {
    /// Create a font over an index/data table pair
    pub const fn new(
        height: u16,
        max_width: u16,
        first: char,
        last: char,
        index: &'static [u16],
        data: &'static [u8],
    ) -> Self {
        Self {
            height,
            max_width,
            first,
            last,
            index,
            data,
        }
    }

    fn offset_of(&self, ch: char) -> Option<usize> {
        let slot = if (self.first..=self.last).contains(&ch) {
            (ch as u32 - self.first as u32) as usize
        } else {
            0
        };
        self.index.get(slot).map(|&offset| offset as usize)
    }

    fn width_at(&self, offset: usize) -> Option<u16> {
        let header = self.data.get(offset..offset + 2)?;
        Some(u16::from_le_bytes([header[0], header[1]]))
    }
}

impl Font for ProportionalFont {
    fn height(&self) -> u16 {
        self.height
    }

    fn max_width(&self) -> u16 {
        self.max_width
    }

    fn char_width(&self, ch: char) -> u16 {
        self.offset_of(ch)
            .and_then(|offset| self.width_at(offset))
            .unwrap_or(0)
    }

    fn glyph(&self, ch: char) -> Glyph<'_> {
        let Some(offset) = self.offset_of(ch) else {
            return Glyph::empty();
        };
        let Some(width) = self.width_at(offset) else {
            return Glyph::empty();
        };
        let row_bytes = self.row_bytes();
        let start = offset + 2;
        let end = start + width as usize * row_bytes;
        let bitmap = self.data.get(start..end).unwrap_or(&[]);
        Glyph::new(bitmap, width, row_bytes)
    }
}
