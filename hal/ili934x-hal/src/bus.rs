//! Scoped bus transactions
//!
//! A controller on a command/data serial bus sees every exchange as a
//! chip-select window: select asserted, D/C line set once, bytes moved,
//! select released. These traits model exactly that window.

/// Level of the command/data selector line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcMode {
    /// D/C low: the bytes are a register opcode
    Command,
    /// D/C high: the bytes are parameters or pixel data
    Data,
}

impl DcMode {
    /// Whether the D/C line is driven high for this mode
    pub const fn is_high(self) -> bool {
        matches!(self, DcMode::Data)
    }
}

/// An open bus transaction
///
/// The chip-select line is asserted for as long as the value lives.
/// Implementations must release it in `Drop`.
pub trait Transaction {
    /// Error type for transfers
    type Error;

    /// Drive the command/data selector line
    ///
    /// Called once per transaction, before any bytes move.
    fn select(&mut self, mode: DcMode) -> Result<(), Self::Error>;

    /// Write bytes to the device
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read bytes from the device into `buf`
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Wait for queued transfers to complete
    ///
    /// Errors from writes that returned early surface here. Call before
    /// the guard is dropped; `Drop` cannot report them.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A bus that hands out scoped transactions
///
/// No timeout is applied anywhere: a stalled transfer blocks the caller.
pub trait ScopedBus {
    /// Error type shared by acquisition and transfers
    type Error;

    /// Transaction guard type
    type Transaction<'a>: Transaction<Error = Self::Error>
    where
        Self: 'a;

    /// Assert chip-select and return a guard that releases it on drop
    fn acquire(&mut self) -> Result<Self::Transaction<'_>, Self::Error>;
}
