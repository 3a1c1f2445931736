//! Glyph blitter
//!
//! Turns 1-bit rasters into RGB565 pixel streams through the palette.
//! A run of characters is rendered as one logical raster, `font.height()`
//! rows high and as wide as the sum of the characters' advance widths,
//! and sent through a single address window. Rows are produced on the fly
//! by walking the run once per row, so no intermediate bitmap is kept.

use ili934x_fonts::Font;
use ili934x_hal::ScopedBus;

use crate::bus::CommandBus;
use crate::error::Error;
use crate::palette::Palette;
use crate::window::{ChunkWriter, Window, BUFFER_LEN};

/// Random-access 1-bit raster
pub trait MonoBitmap {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    /// Whether (`x`, `y`) is foreground; out-of-range reads are background
    fn pixel(&self, x: u16, y: u16) -> bool;
}

/// Vertically packed 1-bit raster, LSB at the top
///
/// Byte `(y / 8) * width + x` holds column `x` of the 8-row band
/// containing `y`.
#[derive(Debug, Clone, Copy)]
pub struct MonoVlsb<'a> {
    data: &'a [u8],
    width: u16,
    height: u16,
}

impl<'a> MonoVlsb<'a> {
    pub const fn new(data: &'a [u8], width: u16, height: u16) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

impl MonoBitmap for MonoVlsb<'_> {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = (y as usize / 8) * self.width as usize + x as usize;
        self.data
            .get(index)
            .is_some_and(|byte| (byte >> (y % 8)) & 1 != 0)
    }
}

/// Total advance width of a character run
pub fn run_width<I>(font: &dyn Font, chars: I) -> u32
where
    I: Iterator<Item = char>,
{
    chars.map(|ch| u32::from(font.char_width(ch))).sum()
}

/// Stream a character run into `window`
///
/// Raster column `c` of the run belongs to the character whose advance
/// span covers it; columns past a glyph's stored bitmap are background.
/// The run is cropped to the window.
pub fn stream_run<B, I>(
    bus: &mut CommandBus<B>,
    buf: &mut [u8; BUFFER_LEN],
    palette: &Palette,
    font: &dyn Font,
    chars: I,
    window: &Window,
) -> Result<(), Error<B::Error>>
where
    B: ScopedBus,
    I: Iterator<Item = char> + Clone,
{
    let cols = window.width();
    let mut writer = ChunkWriter::begin(bus, buf, window)?;

    for row in 0..window.height() {
        let mut col = 0u16;
        'run: for ch in chars.clone() {
            let glyph = font.glyph(ch);
            for gx in 0..font.char_width(ch) {
                if col == cols {
                    break 'run;
                }
                writer.push(palette.resolve(glyph.pixel(gx, row)))?;
                col += 1;
            }
        }
        // Narrow runs leave the rest of the row as background
        for _ in col..cols {
            writer.push(palette.resolve(false))?;
        }
    }

    writer.finish()
}

/// Stream a bitmap into `window`, cropped to the window size
pub fn stream_bitmap<B, M>(
    bus: &mut CommandBus<B>,
    buf: &mut [u8; BUFFER_LEN],
    palette: &Palette,
    bitmap: &M,
    window: &Window,
) -> Result<(), Error<B::Error>>
where
    B: ScopedBus,
    M: MonoBitmap + ?Sized,
{
    let mut writer = ChunkWriter::begin(bus, buf, window)?;
    for y in 0..window.height() {
        for x in 0..window.width() {
            writer.push(palette.resolve(bitmap.pixel(x, y)))?;
        }
    }
    writer.finish()
}
