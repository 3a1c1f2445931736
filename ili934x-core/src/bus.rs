//! Bus transaction adapter
//!
//! Every command opcode and every data payload travels in its own scoped
//! transaction: chip-select asserted, D/C driven, bytes written,
//! chip-select released. Reads keep the command and the read in a single
//! transaction so the controller sees them as one access.

use ili934x_hal::{DcMode, ScopedBus, Transaction};

use crate::error::Error;

/// Command/data framing over a [`ScopedBus`]
pub struct CommandBus<B> {
    bus: B,
}

impl<B: ScopedBus> CommandBus<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Send a command opcode with no parameters
    pub fn command(&mut self, opcode: u8) -> Result<(), Error<B::Error>> {
        self.transfer(DcMode::Command, &[opcode])
    }

    /// Send a data payload
    pub fn data(&mut self, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        self.transfer(DcMode::Data, bytes)
    }

    /// Send a command followed by its parameter bytes
    pub fn command_with_data(&mut self, opcode: u8, data: &[u8]) -> Result<(), Error<B::Error>> {
        self.command(opcode)?;
        self.data(data)
    }

    /// Send a command and read `buf.len()` bytes back
    pub fn read(&mut self, opcode: u8, buf: &mut [u8]) -> Result<(), Error<B::Error>> {
        let mut tx = self.bus.acquire().map_err(Error::Transport)?;
        tx.select(DcMode::Command).map_err(Error::Transport)?;
        tx.write(&[opcode]).map_err(Error::Transport)?;
        tx.read(buf).map_err(Error::Transport)?;
        tx.flush().map_err(Error::Transport)
    }

    pub fn inner(&self) -> &B {
        &self.bus
    }

    pub fn inner_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn release(self) -> B {
        self.bus
    }

    fn transfer(&mut self, mode: DcMode, bytes: &[u8]) -> Result<(), Error<B::Error>> {
        let mut tx = self.bus.acquire().map_err(Error::Transport)?;
        tx.select(mode).map_err(Error::Transport)?;
        tx.write(bytes).map_err(Error::Transport)?;
        tx.flush().map_err(Error::Transport)
    }
}
