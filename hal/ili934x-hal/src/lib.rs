//! ili934x Hardware Abstraction Layer
//!
//! This crate defines the transport interface the ILI934x driver core
//! talks through, plus a ready-made implementation on top of the
//! `embedded-hal` 1.0 SPI and GPIO traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ili934x-core (layout, blitter, init)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ili934x-hal (this crate - transport)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ SpiTransport  │       │ board-specific│
//! │ (embedded-hal)│       │   ScopedBus   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::ScopedBus`] - acquires the bus for one scoped transaction
//! - [`bus::Transaction`] - command/data select, write and read within a transaction
//!
//! Releasing the chip-select line is tied to dropping the transaction, so
//! every exit path (including `?` on an error) deasserts the bus.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod spi;

// Re-export key items at crate root for convenience
pub use bus::{DcMode, ScopedBus, Transaction};
pub use gpio::NoPin;
pub use spi::{Mode, Phase, Polarity, SpiConfig, SpiTransport, SpiTransportError};
