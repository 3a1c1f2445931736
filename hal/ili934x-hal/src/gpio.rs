//! GPIO helpers
//!
//! Boards that do not wire the panel's reset line still need a concrete
//! pin type to name in the driver's generics.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Placeholder output pin that does nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
