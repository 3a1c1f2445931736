//! Fixed-width font tables
//!
//! Every character stores the same number of pixel columns. Optional
//! spacing columns are appended to the advance width but not stored.

use crate::{Font, Glyph};

/// Fixed-width bitmap font
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedFont {
    /// Packed glyph data, `columns * row_bytes` bytes per character
    data: &'static [u8],
    /// Stored columns per glyph
    columns: u8,
    /// Blank columns after each glyph
    spacing: u8,
    /// Glyph height in pixels
    height: u8,
    /// First character in the table
    first: char,
    /// Last character in the table
    last: char,
    /// Drawn for characters outside `first..=last`
    fallback: char,
}

impl FixedFont {
    /// Create a font over a glyph table covering `first..=last`
    ///
    /// Uncovered characters fall back to `first` until
    /// [`with_fallback`](Self::with_fallback) is used.
    pub const fn new(
        data: &'static [u8],
        columns: u8,
        spacing: u8,
        height: u8,
        first: char,
        last: char,
    ) -> Self {
        Self {
            data,
            columns,
            spacing,
            height,
            first,
            last,
            fallback: first,
        }
    }

    /// Use `fallback` for characters the table does not cover
    pub const fn with_fallback(self, fallback: char) -> Self {
        Self { fallback, ..self }
    }

    fn index_of(&self, ch: char) -> usize {
        let ch = if (self.first..=self.last).contains(&ch) {
            ch
        } else {
            self.fallback
        };
        (ch as u32).saturating_sub(self.first as u32) as usize
    }

    fn advance(&self) -> u16 {
        u16::from(self.columns) + u16::from(self.spacing)
    }
}

impl Font for FixedFont {
    fn height(&self) -> u16 {
        u16::from(self.height)
    }

    fn max_width(&self) -> u16 {
        self.advance()
    }

    fn char_width(&self, _ch: char) -> u16 {
        self.advance()
    }

    fn glyph(&self, ch: char) -> Glyph<'_> {
        let row_bytes = self.row_bytes();
        let stride = self.columns as usize * row_bytes;
        let start = self.index_of(ch) * stride;
        let bitmap = self.data.get(start..start + stride).unwrap_or(&[]);
        Glyph::new(bitmap, self.advance(), row_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 'A'..='B', 3 columns, 8 rows
    const TABLE: [u8; 6] = [0x7E, 0x09, 0x7E, 0x7F, 0x49, 0x36];

    const FONT: FixedFont = FixedFont::new(&TABLE, 3, 1, 8, 'A', 'B');

    #[test]
    fn test_metrics() {
        assert_eq!(FONT.height(), 8);
        assert_eq!(FONT.max_width(), 4);
        assert_eq!(FONT.char_width('A'), 4);
        assert_eq!(FONT.str_width("ABBA"), 16);
        assert_eq!(FONT.row_bytes(), 1);
    }

    #[test]
    fn test_glyph_columns() {
        let glyph = FONT.glyph('B');
        assert_eq!(glyph.width(), 4);
        assert_eq!(glyph.bitmap(), &[0x7F, 0x49, 0x36]);
        // Spacing column is blank
        for row in 0..8 {
            assert!(!glyph.pixel(3, row));
        }
    }

    #[test]
    fn test_fallback_glyph() {
        assert_eq!(FONT.glyph('z').bitmap(), FONT.glyph('A').bitmap());

        let font = FONT.with_fallback('B');
        assert_eq!(font.glyph('z').bitmap(), font.glyph('B').bitmap());
    }

    #[test]
    fn test_truncated_table_yields_blank_glyph() {
        static SHORT: [u8; 2] = [0xFF, 0xFF];
        let font = FixedFont::new(&SHORT, 3, 0, 8, 'A', 'A');
        let glyph = font.glyph('A');
        assert_eq!(glyph.width(), 3);
        assert!(!glyph.pixel(0, 0));
    }
}
