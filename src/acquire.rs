use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::measurement::{config_word, is_capdac, is_channel, is_complete, is_slot, trigger_word};
use crate::{ConversionWait, Error, Fdc1004, Rate, RawMeasurement, Reg};

impl<I, E, D> Fdc1004<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// Point measurement `slot` at `channel`, measured single-ended against
  /// `capdac`.
  ///
  /// The device keeps a slot's configuration, so this only needs to be sent
  /// again when the channel or offset changes.
  pub fn configure_slot(&mut self, slot: u8, channel: u8, capdac: u8) -> Result<(), Error<E>> {
    if !is_slot(slot) || !is_channel(channel) || !is_capdac(capdac) {
      return Err(Error::InvalidArgument);
    }
    self.write_register(Reg::config(slot), config_word(channel, capdac))
  }

  /// Start a single conversion of `slot`.
  ///
  /// The trigger register is shared by all slots and every call overwrites
  /// it, so each slot needs its own trigger.
  pub fn trigger(&mut self, slot: u8, rate: Rate) -> Result<(), Error<E>> {
    if !is_slot(slot) {
      return Err(Error::InvalidArgument);
    }
    self.write_register(Reg::FdcConf, trigger_word(slot, rate))
  }

  /// Read the result registers of `slot`, or [`Error::NotReady`] while its
  /// conversion is still running.
  pub fn read_result(&mut self, slot: u8) -> Result<RawMeasurement, Error<E>> {
    if !is_slot(slot) {
      return Err(Error::InvalidArgument);
    }

    if !is_complete(self.read_register(Reg::FdcConf)?, slot) {
      return Err(Error::NotReady);
    }

    let msb = self.read_register(Reg::msb(slot))?;
    let lsb = self.read_register(Reg::lsb(slot))?;
    Ok(RawMeasurement::new(msb, lsb))
  }

  /// Configure, trigger and read back `channel` using the slot of the same
  /// index and the configured rate.
  ///
  /// Waits according to [`crate::Config::wait`] between trigger and read. If
  /// the conversion is still running after that, [`Error::NotReady`] is
  /// returned and the caller may retry.
  pub fn measure_channel(&mut self, channel: u8, capdac: u8) -> Result<RawMeasurement, Error<E>> {
    let slot = channel;
    self.configure_slot(slot, channel, capdac)?;
    self.trigger(slot, self.config.rate)?;
    self.wait_for_conversion(slot)?;
    self.read_result(slot)
  }

  fn wait_for_conversion(&mut self, slot: u8) -> Result<(), Error<E>> {
    match self.config.wait {
      ConversionWait::Fixed => self.delay.delay_ms(self.config.rate.conversion_delay_ms()),
      ConversionWait::Poll { interval_us, attempts } => {
        for _ in 0..attempts {
          self.delay.delay_us(interval_us);
          if is_complete(self.read_register(Reg::FdcConf)?, slot) {
            break;
          }
        }
      }
    }
    Ok(())
  }
}
