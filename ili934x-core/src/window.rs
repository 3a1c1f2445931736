//! Pixel window writer
//!
//! Every pixel transfer goes through the same steps: clamp the target
//! rectangle to the panel, program CASET/PASET, issue RAMWR, then stream
//! RGB565 data in chunks of at most [`CHUNK`] pixels. The controller
//! auto-increments its write pointer across the window, so only the data
//! transactions carry pixels.

use ili934x_hal::ScopedBus;

use crate::bus::CommandBus;
use crate::cmd;
use crate::error::Error;

/// Pixels per data transaction
pub const CHUNK: usize = 1024;

/// Transfer buffer length in bytes (two bytes per pixel)
pub const BUFFER_LEN: usize = 2 * CHUNK;

/// Inclusive pixel rectangle, always within the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Window {
    /// Clamp a rectangle to a `width` x `height` panel
    ///
    /// The origin is pulled onto the panel and the size is forced to at
    /// least one pixel, then cut at the panel edge. A request that lies
    /// entirely off-panel therefore still touches one edge pixel.
    pub fn clamped(x: i32, y: i32, w: i32, h: i32, width: u16, height: u16) -> Self {
        let (x0, x1) = clamp_span(x, w, width);
        let (y0, y1) = clamp_span(y, h, height);
        Self { x0, y0, x1, y1 }
    }

    /// Window covering a whole `width` x `height` panel
    pub fn full(width: u16, height: u16) -> Self {
        Self::clamped(0, 0, i32::from(width), i32::from(height), width, height)
    }

    pub fn width(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> u16 {
        self.y1 - self.y0 + 1
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

fn clamp_span(start: i32, len: i32, limit: u16) -> (u16, u16) {
    let limit = i32::from(limit.max(1));
    let start = start.clamp(0, limit - 1);
    let len = len.max(1).min(limit - start);
    // Both ends are in 0..limit, and limit fits u16
    (start as u16, (start + len - 1) as u16)
}

/// How a transfer of `N` pixels splits into data transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    /// Number of full [`CHUNK`]-pixel transactions
    pub full: usize,
    /// Pixels in the trailing partial transaction (0 if none)
    pub rest: usize,
}

impl ChunkPlan {
    pub const fn for_pixels(pixels: usize) -> Self {
        Self {
            full: pixels / CHUNK,
            rest: pixels % CHUNK,
        }
    }

    /// Total data transactions
    pub const fn flushes(&self) -> usize {
        self.full + (self.rest != 0) as usize
    }
}

/// Program the column and page address registers
pub fn set_window<B: ScopedBus>(
    bus: &mut CommandBus<B>,
    window: &Window,
) -> Result<(), Error<B::Error>> {
    #[cfg(feature = "defmt")]
    defmt::trace!("window {}", window);

    bus.command_with_data(cmd::CASET, &span_bytes(window.x0, window.x1))?;
    bus.command_with_data(cmd::PASET, &span_bytes(window.y0, window.y1))
}

/// Program the address window and open memory write
pub fn address_window<B: ScopedBus>(
    bus: &mut CommandBus<B>,
    window: &Window,
) -> Result<(), Error<B::Error>> {
    set_window(bus, window)?;
    bus.command(cmd::RAMWR)
}

fn span_bytes(start: u16, end: u16) -> [u8; 4] {
    let [s0, s1] = start.to_be_bytes();
    let [e0, e1] = end.to_be_bytes();
    [s0, s1, e0, e1]
}

/// Fill `window` with one color
///
/// The buffer is filled once and replayed for every full chunk.
pub fn fill<B: ScopedBus>(
    bus: &mut CommandBus<B>,
    buf: &mut [u8; BUFFER_LEN],
    window: &Window,
    color: [u8; 2],
) -> Result<(), Error<B::Error>> {
    let plan = ChunkPlan::for_pixels(window.pixel_count());
    for px in buf.chunks_exact_mut(2) {
        px.copy_from_slice(&color);
    }

    address_window(bus, window)?;
    for _ in 0..plan.full {
        bus.data(&buf[..])?;
    }
    if plan.rest != 0 {
        bus.data(&buf[..plan.rest * 2])?;
    }
    Ok(())
}

/// Streams pixels into an open window, flushing every [`CHUNK`] pixels
pub struct ChunkWriter<'a, B> {
    bus: &'a mut CommandBus<B>,
    buf: &'a mut [u8; BUFFER_LEN],
    filled: usize,
}

impl<'a, B: ScopedBus> ChunkWriter<'a, B> {
    /// Address `window` and start streaming
    pub fn begin(
        bus: &'a mut CommandBus<B>,
        buf: &'a mut [u8; BUFFER_LEN],
        window: &Window,
    ) -> Result<Self, Error<B::Error>> {
        address_window(bus, window)?;
        Ok(Self {
            bus,
            buf,
            filled: 0,
        })
    }

    /// Queue one pixel; a full buffer is sent first
    #[inline]
    pub fn push(&mut self, pixel: [u8; 2]) -> Result<(), Error<B::Error>> {
        if self.filled == CHUNK {
            self.bus.data(&self.buf[..])?;
            self.filled = 0;
        }
        let at = self.filled * 2;
        self.buf[at..at + 2].copy_from_slice(&pixel);
        self.filled += 1;
        Ok(())
    }

    /// Send whatever is buffered
    pub fn finish(self) -> Result<(), Error<B::Error>> {
        if self.filled > 0 {
            self.bus.data(&self.buf[..self.filled * 2])?;
        }
        Ok(())
    }
}
