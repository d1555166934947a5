#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` driver for the Texas Instruments FDC1004 4-channel
//! capacitance-to-digital converter.
//!
//! The FDC1004 measures each CINx input against an internal offset, the
//! CAPDAC, and reports a 24-bit signed result per measurement slot. This crate
//! wraps the register protocol in a typed API:
//!
//! - Low level slot control: [`Fdc1004::configure_slot`], [`Fdc1004::trigger`]
//!   and [`Fdc1004::read_result`]
//! - One-shot measurement of a channel with [`Fdc1004::measure_channel`]
//! - Automatic CAPDAC tracking per channel so readings stay in the linear
//!   range of the converter ([`Fdc1004::get_raw_capacitance`])
//! - Readings in femtofarads with [`Fdc1004::get_capacitance`]
//! - Blocking `embedded-hal` 1.0 traits, with an `embedded-hal-async` twin in
//!   [`asynch`]
//!
//! ```no_run
//! use embedded_hal::{delay::DelayNs, i2c::{I2c, SevenBitAddress}};
//! use fdc1004::{Config, Fdc1004, Rate, CAPACITANCE_UNAVAILABLE};
//!
//! fn example<I2C, D, E>(i2c: I2C, delay: D) -> Result<i32, fdc1004::Error<E>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//!   D: DelayNs,
//! {
//!   let mut fdc = Fdc1004::new(i2c, delay, Config::default().with_rate(Rate::Hz400));
//!   fdc.probe()?;
//!
//!   let femtofarads = fdc.get_capacitance(0);
//!   if femtofarads == CAPACITANCE_UNAVAILABLE {
//!     return Err(fdc1004::Error::Device);
//!   }
//!   Ok(femtofarads)
//! }
//! ```
mod acquire;
pub mod asynch;
mod auto_range;
mod config;
mod id;
mod measurement;
mod reg;
mod rw;
#[cfg(test)]
mod sim;

pub use auto_range::{AutoRange, Step, LOWER_BOUND, MAX_READINGS, UPPER_BOUND};
pub use config::*;
pub use measurement::*;
use reg::*;

/// Errors that can occur while talking to the converter.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// A slot, channel or CAPDAC was out of range. Nothing was sent to the bus.
  InvalidArgument,
  /// The requested conversion has not completed, or was never triggered.
  NotReady,
  /// A measurement failed while auto-ranging; the reading was abandoned.
  Device,
  /// The device did not identify itself as an FDC1004.
  InvalidChipId(u16),
}

/// Blocking driver for one FDC1004.
///
/// The driver owns the I²C bus and a delay source, plus the last CAPDAC each
/// channel settled on. Those offsets start at zero and live as long as the
/// driver does.
pub struct Fdc1004<I, D> {
  i2c: I,
  delay: D,
  config: Config,
  capdac: [u8; CHANNELS as usize],
}

impl<I, D> Fdc1004<I, D> {
  /// Create a driver. Nothing is sent to the device until the first
  /// operation.
  pub fn new(i2c: I, delay: D, config: Config) -> Self {
    Self { i2c, delay, config, capdac: [0; CHANNELS as usize] }
  }

  pub fn config(&self) -> Config {
    self.config
  }

  /// CAPDAC the last successful auto-ranged reading of `channel` used, or
  /// `None` for an invalid channel.
  pub fn last_capdac(&self, channel: u8) -> Option<u8> {
    self.capdac.get(channel as usize).copied()
  }

  /// Give back the bus and delay.
  pub fn release(self) -> (I, D) {
    (self.i2c, self.delay)
  }
}
