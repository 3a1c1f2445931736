//! Board platform trait

use embedded_hal::digital::OutputPin;
use ili934x_hal::ScopedBus;

use crate::config::BusSettings;
use crate::error::ConfigError;

/// Provides the bus and reset line for a resolved bus configuration
///
/// Implemented by board support code. Pin numbers are board-level GPIO
/// numbers; the implementation decides how they map to peripherals.
pub trait Platform {
    /// Chip-select framed bus
    type Bus: ScopedBus;
    /// Reset line
    type ResetPin: OutputPin;

    /// Open the SPI bus with its chip-select and data/command lines
    ///
    /// Returns [`ConfigError::PinUnavailable`] when a pin is already
    /// claimed or does not exist.
    fn open_bus(&mut self, settings: &BusSettings) -> Result<Self::Bus, ConfigError>;

    /// Claim `pin` as the panel's reset output
    fn reset_pin(&mut self, pin: u8) -> Result<Self::ResetPin, ConfigError>;
}
