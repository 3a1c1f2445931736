//! Scroll controller
//!
//! The panel's vertical scroll register rotates GRAM rows on screen: with
//! offset `s`, screen row 0 shows GRAM row `s`. Once scrolling, the line
//! that becomes visible at the bottom is the band ending just above the
//! new offset, so it is computed after the offset moves.

use embedded_hal::digital::OutputPin;
use ili934x_hal::ScopedBus;

use crate::cmd;
use crate::display::Display;
use crate::error::Error;

/// Scroll offset and mode latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    offset: u16,
    scrolling: bool,
}

/// Outcome of moving down one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAdvance {
    /// Plain move within the panel
    Down(u16),
    /// Scroll origin moved; `band_y` is the freshly exposed line
    Scrolled { offset: u16, band_y: u16 },
}

impl ScrollState {
    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Move the origin by `dy` rows, wrapping at `height`
    pub fn shift(&mut self, dy: u16, height: u16) -> u16 {
        let height = u32::from(height.max(1));
        self.offset = ((u32::from(self.offset) + u32::from(dy)) % height) as u16;
        self.offset
    }

    /// Advance from line `y` by one line of `line_h` rows
    ///
    /// Scroll mode latches the first time a line would cross the bottom
    /// edge and stays on until [`reset`](Self::reset).
    pub fn advance(&mut self, y: u16, line_h: u16, height: u16) -> LineAdvance {
        if !self.scrolling {
            let next = u32::from(y) + u32::from(line_h);
            if next < u32::from(height) {
                return LineAdvance::Down(next as u16);
            }
            self.scrolling = true;

            #[cfg(feature = "defmt")]
            defmt::debug!("scroll mode on at y={}", y);
        }

        let offset = self.shift(line_h, height);
        let h = i32::from(height.max(1));
        let band_y = (h - i32::from(line_h) + i32::from(offset)).rem_euclid(h) as u16;
        LineAdvance::Scrolled { offset, band_y }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<B, RST> Display<'_, B, RST>
where
    B: ScopedBus,
    RST: OutputPin,
{
    /// Shift the hardware scroll origin by `dy` rows
    pub fn scroll(&mut self, dy: u16) -> Result<(), Error<B::Error>> {
        let offset = self.scroll.shift(dy, self.config.height);
        self.write_scroll_register(offset)
    }

    /// Leave scroll mode and put the origin back at row 0
    pub fn reset_scroll(&mut self) -> Result<(), Error<B::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("scroll reset from offset {}", self.scroll.offset());

        self.scroll.reset();
        self.write_scroll_register(0)
    }

    /// Move down one line from `y`, scrolling and clearing as needed
    pub(crate) fn next_line(&mut self, y: u16, line_h: u16) -> Result<u16, Error<B::Error>> {
        match self.scroll.advance(y, line_h, self.config.height) {
            LineAdvance::Down(next) => Ok(next),
            LineAdvance::Scrolled { offset, band_y } => {
                self.write_scroll_register(offset)?;
                self.fill_rect(
                    0,
                    i32::from(band_y),
                    i32::from(self.config.width),
                    i32::from(line_h),
                    None,
                )?;
                Ok(band_y)
            }
        }
    }

    fn write_scroll_register(&mut self, offset: u16) -> Result<(), Error<B::Error>> {
        self.bus
            .command_with_data(cmd::VSCRSADD, &offset.to_be_bytes())
    }
}
