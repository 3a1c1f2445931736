//! Display transaction engine and text layout for ILI9341-class panels
//!
//! This crate turns high-level drawing requests into the panel's SPI
//! command protocol. It depends only on the [`ili934x_hal::ScopedBus`]
//! transport and an `embedded-hal` reset pin and delay:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                     Display                      │
//! │  write / print ──► layout ──► blit ──┐           │
//! │  fill_rect / erase_all ──────────────┴─► window  │
//! │  scroll / reset_scroll ──► VSCRSADD      (RAMWR) │
//! │  new / open ──► init sequencer                   │
//! └────────────────────────┬─────────────────────────┘
//!                          ▼
//!            CommandBus (one transaction per command,
//!                        one per data payload)
//!                          │
//!                          ▼
//!            ScopedBus (CS framing, D/C line)
//! ```
//!
//! - Bus transaction adapter ([`bus`])
//! - Initialization sequencer ([`init`])
//! - Pixel window writer ([`window`])
//! - Palette and RGB565 packing ([`palette`])
//! - Glyph blitter ([`blit`])
//! - Text layout engine and scroll controller ([`layout`])
//! - Bus and panel configuration ([`config`])

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod blit;
pub mod bus;
pub mod cmd;
pub mod config;
pub mod display;
pub mod error;
pub mod init;
pub mod layout;
pub mod palette;
pub mod traits;
pub mod window;

#[cfg(test)]
pub(crate) mod mock;

pub use blit::{MonoBitmap, MonoVlsb};
pub use config::{BusConfig, BusId, BusPins, BusSettings, DisplayConfig};
pub use display::Display;
pub use error::{ConfigError, Error};
pub use init::InitState;
pub use layout::Cursor;
pub use palette::{color565, Palette};
pub use traits::Platform;
pub use window::{Window, CHUNK};

pub use ili934x_fonts::{FixedFont, Font, Glyph, ProportionalFont, GLCD};
pub use ili934x_hal::{DcMode, NoPin, ScopedBus, SpiConfig, Transaction};
