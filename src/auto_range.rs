use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::measurement::is_channel;
use crate::{Error, Fdc1004, Measurement, CAPACITANCE_UNAVAILABLE, CAPDAC_MAX};

/// Readings above this are close enough to positive saturation to warrant
/// more offset.
pub const UPPER_BOUND: i16 = 0x4000;
/// Readings below this are close enough to negative saturation to warrant
/// less offset.
pub const LOWER_BOUND: i16 = -UPPER_BOUND;

/// Outcome of feeding one reading to [`AutoRange::step`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  /// Measure again with this CAPDAC.
  Retry(u8),
  /// The reading is in range, or the CAPDAC cannot move any further.
  Done(Measurement),
}

/// CAPDAC search for one channel.
///
/// Moves the offset one step at a time toward the side the reading saturates
/// on. A search ends after at most [`MAX_READINGS`] readings, even when the
/// input keeps bouncing between two offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRange {
  capdac: u8,
  readings: u8,
}

/// Readings one search may take: enough for a full CAPDAC sweep.
pub const MAX_READINGS: u8 = CAPDAC_MAX + 1;

impl AutoRange {
  /// Start the search from `capdac`, clamped to the valid range.
  pub const fn new(capdac: u8) -> Self {
    let capdac = if capdac > CAPDAC_MAX { CAPDAC_MAX } else { capdac };
    Self { capdac, readings: 0 }
  }

  /// Offset the next reading should be taken with.
  pub const fn capdac(&self) -> u8 {
    self.capdac
  }

  /// Feed the signed upper result word measured at [`AutoRange::capdac`].
  ///
  /// Once [`MAX_READINGS`] readings were fed the last one is accepted as is.
  pub fn step(&mut self, value: i16) -> Step {
    self.readings = self.readings.saturating_add(1);
    if self.readings >= MAX_READINGS {
      return Step::Done(Measurement::new(value, self.capdac));
    }

    if value > UPPER_BOUND && self.capdac < CAPDAC_MAX {
      self.capdac += 1;
      Step::Retry(self.capdac)
    } else if value < LOWER_BOUND && self.capdac > 0 {
      self.capdac -= 1;
      Step::Retry(self.capdac)
    } else {
      Step::Done(Measurement::new(value, self.capdac))
    }
  }
}

impl<I, E, D> Fdc1004<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Measure `channel`, adjusting its CAPDAC until the reading sits inside
  /// the linear range of the converter.
  ///
  /// The search starts from the CAPDAC the previous call on this channel
  /// settled on, so a steady input costs a single conversion. When the CAPDAC
  /// is pinned at 0 or 31 the out-of-range reading is returned as is.
  ///
  /// Any failed measurement aborts with [`Error::Device`] and leaves the
  /// stored CAPDAC untouched.
  pub fn get_raw_capacitance(&mut self, channel: u8) -> Result<Measurement, Error<E>> {
    if !is_channel(channel) {
      return Err(Error::InvalidArgument);
    }

    let mut range = AutoRange::new(self.capdac[channel as usize]);
    loop {
      let raw = match self.measure_channel(channel, range.capdac()) {
        Ok(raw) => raw,
        Err(_) => {
          #[cfg(feature = "defmt")]
          defmt::warn!("CIN{}: measurement failed at capdac {}", channel + 1, range.capdac());
          return Err(Error::Device);
        }
      };

      match range.step(raw.value()) {
        Step::Retry(_capdac) => {
          #[cfg(feature = "defmt")]
          defmt::debug!("CIN{}: {} out of range, retrying with capdac {}", channel + 1, raw.value(), _capdac);
        }
        Step::Done(measurement) => {
          self.capdac[channel as usize] = measurement.capdac;
          return Ok(measurement);
        }
      }
    }
  }

  /// Capacitance of `channel` in femtofarads, or [`CAPACITANCE_UNAVAILABLE`]
  /// if no reading could be taken.
  pub fn get_capacitance(&mut self, channel: u8) -> i32 {
    self
      .get_raw_capacitance(channel)
      .map_or(CAPACITANCE_UNAVAILABLE, |m| m.femtofarads())
  }
}
