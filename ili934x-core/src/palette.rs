//! Two-color palette and RGB565 packing

/// Pack 8-bit RGB into an RGB565 word
///
/// Keeps the top 5 bits of red and blue and the top 6 bits of green.
pub const fn color565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Background/foreground colors, stored pre-packed for the wire
///
/// RGB565 goes out big-endian, high byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    background: [u8; 2],
    foreground: [u8; 2],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(0xFFFF, 0x0000)
    }
}

impl Palette {
    pub const fn new(foreground: u16, background: u16) -> Self {
        Self {
            background: background.to_be_bytes(),
            foreground: foreground.to_be_bytes(),
        }
    }

    pub fn set(&mut self, foreground: u16, background: u16) {
        *self = Self::new(foreground, background);
    }

    pub fn foreground(&self) -> u16 {
        u16::from_be_bytes(self.foreground)
    }

    pub fn background(&self) -> u16 {
        u16::from_be_bytes(self.background)
    }

    /// Wire bytes for a 1-bit raster sample
    #[inline]
    pub fn resolve(&self, lit: bool) -> [u8; 2] {
        if lit {
            self.foreground
        } else {
            self.background
        }
    }
}
