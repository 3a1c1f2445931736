//! Initialization sequencer
//!
//! Drives the controller from power-on to display-on:
//!
//! ```text
//! Unreset ──► Reset ──► ConfiguredRegisters ──► SleepingOut ──► On
//!   │ hw: RST low, 50ms, high, 50ms
//!   │ sw: SWRESET, 50ms
//! ```
//!
//! Register order is fixed; power and gamma sequencing depend on it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use ili934x_hal::ScopedBus;

use crate::bus::CommandBus;
use crate::cmd;
use crate::error::Error;

/// Power-on configuration table, sent before MADCTL
pub const INIT_REGISTERS: &[(u8, &[u8])] = &[
    (cmd::RDDSDR, &[0x03, 0x80, 0x02]),
    (cmd::PWCTLB, &[0x00, 0xC1, 0x30]),
    (cmd::PWRONCTL, &[0x64, 0x03, 0x12, 0x81]),
    (cmd::DTCTLA, &[0x85, 0x00, 0x78]),
    (cmd::PWCTLA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    (cmd::PRCTL, &[0x20]),
    (cmd::DTCTLB, &[0x00, 0x00]),
    (cmd::PWCTL1, &[0x23]),
    (cmd::PWCTL2, &[0x10]),
    (cmd::VMCTL1, &[0x3E, 0x28]),
    (cmd::VMCTL2, &[0x86]),
    (cmd::PIXSET, &[0x55]),
    (cmd::FRMCTL1, &[0x00, 0x18]),
    (cmd::DISCTL, &[0x08, 0x82, 0x27]),
    (cmd::ENA3G, &[0x00]),
    (cmd::GAMMASET, &[0x01]),
    (
        cmd::PGAMCTL,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
            0x00,
        ],
    ),
    (
        cmd::NGAMCTL,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
            0x0F,
        ],
    ),
];

/// Controller bring-up state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitState {
    /// Power applied, nothing sent
    #[default]
    Unreset,
    /// Hardware or software reset done
    Reset,
    /// Register table and MADCTL written
    ConfiguredRegisters,
    /// Sleep-out issued and settled
    SleepingOut,
    /// Display on
    On,
}

/// Walks [`InitState`] one transition at a time
#[derive(Debug, Clone, Copy)]
pub struct InitSequencer {
    state: InitState,
    madctl: u8,
}

impl InitSequencer {
    pub const fn new(madctl: u8) -> Self {
        Self {
            state: InitState::Unreset,
            madctl,
        }
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    /// Perform the next transition and return the new state
    ///
    /// Stepping from `On` does nothing.
    pub fn step<B, RST, D>(
        &mut self,
        bus: &mut CommandBus<B>,
        reset: Option<&mut RST>,
        delay: &mut D,
    ) -> Result<InitState, Error<B::Error>>
    where
        B: ScopedBus,
        RST: OutputPin,
        D: DelayNs,
    {
        self.state = match self.state {
            InitState::Unreset => {
                match reset {
                    Some(pin) => {
                        pin.set_low().map_err(|_| Error::ResetPin)?;
                        delay.delay_ms(cmd::RESET_SETTLE_MS);
                        pin.set_high().map_err(|_| Error::ResetPin)?;
                        delay.delay_ms(cmd::RESET_SETTLE_MS);
                    }
                    None => {
                        bus.command(cmd::SWRESET)?;
                        delay.delay_ms(cmd::RESET_SETTLE_MS);
                    }
                }
                InitState::Reset
            }
            InitState::Reset => {
                for &(opcode, params) in INIT_REGISTERS {
                    bus.command_with_data(opcode, params)?;
                }
                bus.command_with_data(cmd::MADCTL, &[self.madctl])?;
                InitState::ConfiguredRegisters
            }
            InitState::ConfiguredRegisters => {
                bus.command(cmd::SLPOUT)?;
                delay.delay_ms(cmd::SLEEP_OUT_SETTLE_MS);
                InitState::SleepingOut
            }
            InitState::SleepingOut => {
                bus.command(cmd::DISPON)?;
                delay.delay_ms(cmd::DISPLAY_ON_SETTLE_MS);
                InitState::On
            }
            InitState::On => InitState::On,
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("init: {}", self.state);

        Ok(self.state)
    }

    /// Step until the display is on
    pub fn run<B, RST, D>(
        &mut self,
        bus: &mut CommandBus<B>,
        mut reset: Option<&mut RST>,
        delay: &mut D,
    ) -> Result<(), Error<B::Error>>
    where
        B: ScopedBus,
        RST: OutputPin,
        D: DelayNs,
    {
        while self.state != InitState::On {
            self.step(bus, reset.as_deref_mut(), delay)?;
        }
        Ok(())
    }
}
