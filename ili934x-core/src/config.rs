//! Bus and panel configuration
//!
//! [`BusConfig`] mirrors what a board description provides: a numbered SPI
//! bus, pin numbers and a clock rate. [`BusConfig::resolve`] validates it
//! and fills in the bus's default pin mapping, producing the
//! [`BusSettings`] a [`Platform`](crate::traits::Platform) opens.

use ili934x_hal::spi::{Mode, SpiConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default panel width in pixels
pub const DEFAULT_WIDTH: u16 = 240;

/// Default panel height in pixels
pub const DEFAULT_HEIGHT: u16 = 320;

/// Default memory access control: BGR order, row/column exchange off
pub const DEFAULT_MADCTL: u8 = 0x88;

/// Default SPI clock
pub const DEFAULT_BAUDRATE: u32 = 50_000_000;

/// Default chip-select pin
pub const DEFAULT_CS: u8 = 22;

/// Default data/command pin
pub const DEFAULT_DC: u8 = 21;

/// Hardware SPI peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BusId {
    /// Bus 1
    Hspi,
    /// Bus 2
    #[default]
    Vspi,
}

impl BusId {
    /// Default clock/data pins for this bus
    pub const fn default_pins(self) -> BusPins {
        match self {
            BusId::Hspi => BusPins {
                sck: 14,
                mosi: 13,
                miso: 12,
            },
            BusId::Vspi => BusPins {
                sck: 18,
                mosi: 23,
                miso: 19,
            },
        }
    }

    /// Numeric bus id
    pub const fn id(self) -> u8 {
        match self {
            BusId::Hspi => 1,
            BusId::Vspi => 2,
        }
    }
}

impl TryFrom<u8> for BusId {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(BusId::Hspi),
            2 => Ok(BusId::Vspi),
            other => Err(ConfigError::InvalidBus(other)),
        }
    }
}

/// Clock and data pins of an SPI bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusPins {
    pub sck: u8,
    pub mosi: u8,
    pub miso: u8,
}

/// Bus configuration as supplied by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// SPI bus id (1 = HSPI, 2 = VSPI)
    pub bus: u8,
    /// Chip-select pin
    pub cs: Option<u8>,
    /// Data/command pin
    pub dc: Option<u8>,
    /// Reset pin; software reset is used when absent
    pub rst: Option<u8>,
    /// SPI clock in Hz
    pub baudrate: u32,
    /// Clock pin override
    pub sck: Option<u8>,
    /// MOSI pin override
    pub mosi: Option<u8>,
    /// MISO pin override
    pub miso: Option<u8>,
    /// SPI mode
    pub mode: Mode,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            bus: BusId::Vspi.id(),
            cs: Some(DEFAULT_CS),
            dc: Some(DEFAULT_DC),
            rst: None,
            baudrate: DEFAULT_BAUDRATE,
            sck: None,
            mosi: None,
            miso: None,
            mode: Mode::Mode0,
        }
    }
}

impl BusConfig {
    /// Validate and apply per-bus pin defaults
    ///
    /// Checks run in order: bus id, chip-select, data/command.
    pub fn resolve(&self) -> Result<BusSettings, ConfigError> {
        let bus = BusId::try_from(self.bus)?;
        let cs = self.cs.ok_or(ConfigError::MissingChipSelect)?;
        let dc = self.dc.ok_or(ConfigError::MissingDataCommand)?;

        let defaults = bus.default_pins();
        let pins = BusPins {
            sck: self.sck.unwrap_or(defaults.sck),
            mosi: self.mosi.unwrap_or(defaults.mosi),
            miso: self.miso.unwrap_or(defaults.miso),
        };

        Ok(BusSettings {
            bus,
            pins,
            cs,
            dc,
            rst: self.rst,
            spi: SpiConfig::new(self.baudrate, self.mode),
        })
    }
}

/// Validated bus settings, ready for a platform to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusSettings {
    pub bus: BusId,
    pub pins: BusPins,
    pub cs: u8,
    pub dc: u8,
    pub rst: Option<u8>,
    pub spi: SpiConfig,
}

/// Panel geometry and orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Memory access control byte sent during init
    pub madctl: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            madctl: DEFAULT_MADCTL,
        }
    }
}

impl DisplayConfig {
    /// Reject zero-sized panels
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }
}
