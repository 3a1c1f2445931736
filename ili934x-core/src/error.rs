//! Driver error types

/// Configuration rejected before any bus traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Bus id is neither 1 (HSPI) nor 2 (VSPI)
    InvalidBus(u8),
    /// No chip-select pin given
    MissingChipSelect,
    /// No data/command pin given
    MissingDataCommand,
    /// Panel width or height is zero
    InvalidDimensions,
    /// The platform could not provide a pin or bus
    PinUnavailable(u8),
}

/// Driver error
///
/// `E` is the transport's error type. Errors abort the current operation;
/// cursor and scroll bookkeeping keep whatever state they had reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// SPI transfer or chip-select/D-C line failure
    Transport(E),
    /// Driving the reset line failed
    ResetPin,
    /// Invalid configuration
    Config(ConfigError),
}

impl<E> From<ConfigError> for Error<E> {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}
