//! Text layout engine
//!
//! Two wrapping strategies share one cursor:
//!
//! - [`write`](crate::Display::write) wraps per character and resets to
//!   column 0 on every new line
//! - [`print`](crate::Display::print) wraps per word and returns to the
//!   column the cursor started at (a left margin)
//!
//! Both move down through [`scroll`], which switches the panel into
//! hardware-scroll mode once text runs past the bottom edge. From then on
//! every new line shifts the scroll origin by one line height and clears
//! the band that rotates into view.

pub mod scroll;
mod text;

pub use scroll::{LineAdvance, ScrollState};

/// Text insertion point in panel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
}
