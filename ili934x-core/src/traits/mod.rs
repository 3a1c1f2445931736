//! Hardware abstraction traits
//!
//! These traits define the interface between the driver and the
//! board that owns the SPI peripherals and GPIO pins.

pub mod platform;

pub use platform::Platform;
