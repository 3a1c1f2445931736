//! SPI transport
//!
//! Bus settings types plus [`SpiTransport`], a [`ScopedBus`] built from an
//! `embedded-hal` SPI bus, a chip-select pin and a data/command pin.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bus::{DcMode, ScopedBus, Transaction};

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 50_000_000, // ILI9341 write cycle tolerates 50 MHz on most boards
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
        }
    }
}

impl SpiConfig {
    /// Build a configuration from a clock rate and SPI mode
    pub fn new(frequency: u32, mode: Mode) -> Self {
        let (polarity, phase) = mode.into();
        Self {
            frequency,
            polarity,
            phase,
        }
    }

    /// SPI mode matching this polarity/phase pair
    pub fn mode(&self) -> Mode {
        match (self.polarity, self.phase) {
            (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => Mode::Mode0,
            (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => Mode::Mode1,
            (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => Mode::Mode2,
            (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => Mode::Mode3,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

/// Errors from [`SpiTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiTransportError<S, P> {
    /// SPI bus transfer failed
    Spi(S),
    /// Chip-select or data/command pin could not be driven
    Pin(P),
}

/// Chip-select framed SPI transport
///
/// Owns the bus and both select lines. Chip-select is active-low and idles
/// high between transactions.
pub struct SpiTransport<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
}

impl<SPI, CS, DC> SpiTransport<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
{
    /// Create a transport, parking chip-select high and D/C low
    pub fn new(
        spi: SPI,
        mut cs: CS,
        mut dc: DC,
    ) -> Result<Self, SpiTransportError<SPI::Error, CS::Error>> {
        cs.set_high().map_err(SpiTransportError::Pin)?;
        dc.set_low().map_err(SpiTransportError::Pin)?;
        Ok(Self { spi, cs, dc })
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }
}

impl<SPI, CS, DC> ScopedBus for SpiTransport<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
{
    type Error = SpiTransportError<SPI::Error, CS::Error>;
    type Transaction<'a>
        = SpiTransaction<'a, SPI, CS, DC>
    where
        Self: 'a;

    fn acquire(&mut self) -> Result<Self::Transaction<'_>, Self::Error> {
        self.cs.set_low().map_err(SpiTransportError::Pin)?;
        Ok(SpiTransaction {
            spi: &mut self.spi,
            cs: &mut self.cs,
            dc: &mut self.dc,
        })
    }
}

/// Guard for one chip-select window on a [`SpiTransport`]
pub struct SpiTransaction<'a, SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    spi: &'a mut SPI,
    cs: &'a mut CS,
    dc: &'a mut DC,
}

impl<SPI, CS, DC> Transaction for SpiTransaction<'_, SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
{
    type Error = SpiTransportError<SPI::Error, CS::Error>;

    fn select(&mut self, mode: DcMode) -> Result<(), Self::Error> {
        if mode.is_high() {
            self.dc.set_high().map_err(SpiTransportError::Pin)
        } else {
            self.dc.set_low().map_err(SpiTransportError::Pin)
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).map_err(SpiTransportError::Spi)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.spi.read(buf).map_err(SpiTransportError::Spi)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(SpiTransportError::Spi)
    }
}

impl<SPI, CS, DC> Drop for SpiTransaction<'_, SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    fn drop(&mut self) {
        // Error paths skip the explicit flush; drain before deselecting
        let _ = self.spi.flush();
        let _ = self.cs.set_high();
    }
}
