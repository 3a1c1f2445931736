//! Test doubles
//!
//! [`MockPanel`] records every bus event and emulates the parts of the
//! controller the driver relies on: address window registers, GRAM writes
//! with auto-increment, memory reads, the scroll register and the ID read.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use ili934x_hal::{DcMode, NoPin, ScopedBus, Transaction};

use crate::cmd;
use crate::config::DisplayConfig;
use crate::display::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Acquire,
    Select(DcMode),
    Write(Vec<u8>),
    Read(usize),
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// ID bytes returned by RDDID after the dummy byte
pub const PANEL_ID: [u8; 3] = [0x00, 0x93, 0x41];

pub struct MockPanel {
    pub events: Vec<Event>,
    pub gram: Vec<u16>,
    pub vscroll: u16,
    /// Fail the n-th write (1-based) counted from creation
    pub fail_on_write: Option<usize>,
    /// Report a transfer error at every flush
    pub fail_flush: bool,
    width: u16,
    height: u16,
    cols: (u16, u16),
    rows: (u16, u16),
    ptr: (u16, u16),
    command: Option<u8>,
    mode: Option<DcMode>,
    open: bool,
    writes: usize,
}

impl MockPanel {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            events: Vec::new(),
            gram: vec![0x1234; width as usize * height as usize],
            vscroll: 0,
            fail_on_write: None,
            fail_flush: false,
            width,
            height,
            cols: (0, 0),
            rows: (0, 0),
            ptr: (0, 0),
            command: None,
            mode: None,
            open: false,
            writes: 0,
        }
    }

    pub fn pixel(&self, x: u16, y: u16) -> u16 {
        self.gram[y as usize * self.width as usize + x as usize]
    }

    pub fn set_pixel(&mut self, x: u16, y: u16, color: u16) {
        let width = self.width as usize;
        self.gram[y as usize * width + x as usize] = color;
    }

    /// Whether every pixel of the region has `color`
    pub fn region_is(&self, x0: u16, y0: u16, x1: u16, y1: u16, color: u16) -> bool {
        (y0..=y1).all(|y| (x0..=x1).all(|x| self.pixel(x, y) == color))
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Completed transactions as (mode, concatenated bytes)
    pub fn transactions(&self) -> Vec<(Option<DcMode>, Vec<u8>)> {
        let mut out = Vec::new();
        let mut current: Option<(Option<DcMode>, Vec<u8>)> = None;
        for event in &self.events {
            match event {
                Event::Acquire => current = Some((None, Vec::new())),
                Event::Select(mode) => {
                    if let Some(tx) = current.as_mut() {
                        tx.0 = Some(*mode);
                    }
                }
                Event::Write(bytes) => {
                    if let Some(tx) = current.as_mut() {
                        tx.1.extend_from_slice(bytes);
                    }
                }
                Event::Read(_) => {}
                Event::Release => out.extend(current.take()),
            }
        }
        out
    }

    /// Opcodes in the order they were sent
    pub fn commands(&self) -> Vec<u8> {
        self.transactions()
            .into_iter()
            .filter(|(mode, _)| *mode == Some(DcMode::Command))
            .filter_map(|(_, bytes)| bytes.first().copied())
            .collect()
    }

    /// Parameter bytes of every `opcode` command, in order
    pub fn params(&self, opcode: u8) -> Vec<Vec<u8>> {
        let txs = self.transactions();
        let mut out = Vec::new();
        for (i, (mode, bytes)) in txs.iter().enumerate() {
            if *mode == Some(DcMode::Command) && bytes.first() == Some(&opcode) {
                match txs.get(i + 1) {
                    Some((Some(DcMode::Data), data)) => out.push(data.clone()),
                    _ => out.push(Vec::new()),
                }
            }
        }
        out
    }

    /// Pixel count of every data transaction that followed a RAMWR
    pub fn ramwr_flushes(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut streaming = false;
        for (mode, bytes) in self.transactions() {
            match mode {
                Some(DcMode::Command) => streaming = bytes.first() == Some(&cmd::RAMWR),
                Some(DcMode::Data) if streaming => out.push(bytes.len() / 2),
                _ => {}
            }
        }
        out
    }

    fn apply_write(&mut self, bytes: &[u8]) {
        match self.mode {
            Some(DcMode::Command) => {
                self.command = bytes.last().copied();
                if self.command == Some(cmd::RAMWR) {
                    self.ptr = (self.cols.0, self.rows.0);
                }
            }
            Some(DcMode::Data) => match self.command {
                Some(cmd::CASET) if bytes.len() >= 4 => {
                    self.cols = (be(bytes[0], bytes[1]), be(bytes[2], bytes[3]));
                }
                Some(cmd::PASET) if bytes.len() >= 4 => {
                    self.rows = (be(bytes[0], bytes[1]), be(bytes[2], bytes[3]));
                }
                Some(cmd::RAMWR) => {
                    for pair in bytes.chunks_exact(2) {
                        self.store(be(pair[0], pair[1]));
                    }
                }
                Some(cmd::VSCRSADD) if bytes.len() >= 2 => {
                    self.vscroll = be(bytes[0], bytes[1]);
                }
                _ => {}
            },
            None => panic!("write before D/C select"),
        }
    }

    fn store(&mut self, color: u16) {
        let (x, y) = self.ptr;
        if x < self.width && y < self.height && y <= self.rows.1 {
            self.set_pixel(x, y, color);
        }
        self.ptr = if x >= self.cols.1 {
            (self.cols.0, y + 1)
        } else {
            (x + 1, y)
        };
    }

    fn apply_read(&mut self, buf: &mut [u8]) {
        let reply: [u8; 4] = match self.command {
            Some(cmd::RAMRD) => {
                let color = self.pixel(self.cols.0, self.rows.0);
                let r = ((color >> 11) as u8) << 3;
                let g = (((color >> 5) & 0x3F) as u8) << 2;
                let b = ((color & 0x1F) as u8) << 3;
                [0xFF, r, g, b]
            }
            Some(cmd::RDDID) => [0xFF, PANEL_ID[0], PANEL_ID[1], PANEL_ID[2]],
            _ => [0; 4],
        };
        for (dst, src) in buf.iter_mut().zip(reply) {
            *dst = src;
        }
    }
}

fn be(hi: u8, lo: u8) -> u16 {
    u16::from_be_bytes([hi, lo])
}

impl ScopedBus for MockPanel {
    type Error = BusFault;
    type Transaction<'a>
        = MockTransaction<'a>
    where
        Self: 'a;

    fn acquire(&mut self) -> Result<Self::Transaction<'_>, Self::Error> {
        assert!(!self.open, "nested transaction");
        self.open = true;
        self.events.push(Event::Acquire);
        Ok(MockTransaction { panel: self })
    }
}

pub struct MockTransaction<'a> {
    panel: &'a mut MockPanel,
}

impl Transaction for MockTransaction<'_> {
    type Error = BusFault;

    fn select(&mut self, mode: DcMode) -> Result<(), Self::Error> {
        self.panel.events.push(Event::Select(mode));
        self.panel.mode = Some(mode);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.panel.writes += 1;
        if self.panel.fail_on_write == Some(self.panel.writes) {
            return Err(BusFault);
        }
        self.panel.events.push(Event::Write(bytes.to_vec()));
        self.panel.apply_write(bytes);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.panel.events.push(Event::Read(buf.len()));
        self.panel.apply_read(buf);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.panel.fail_flush {
            return Err(BusFault);
        }
        Ok(())
    }
}

impl Drop for MockTransaction<'_> {
    fn drop(&mut self) {
        self.panel.open = false;
        self.panel.mode = None;
        self.panel.events.push(Event::Release);
    }
}

/// Reset line that records every level it is driven to
#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}

/// Delay provider that records requested millisecond waits
#[derive(Default)]
pub struct MockDelay {
    pub delays_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

/// Initialized display on an emulated panel with init traffic cleared
pub fn ready_display(width: u16, height: u16) -> Display<'static, MockPanel, NoPin> {
    let config = DisplayConfig {
        width,
        height,
        ..DisplayConfig::default()
    };
    let mut display = Display::new(
        MockPanel::new(width, height),
        None,
        config,
        &mut MockDelay::default(),
    )
    .unwrap();
    display.transport_mut().clear_events();
    display
}
