//! Async flavour of the driver, over `embedded-hal-async` 1.0.
//!
//! Operations, register traffic and CAPDAC tracking are identical to the
//! blocking [`crate::Fdc1004`]; only the bus and delay are awaited.
//!
//! ```no_run
//! use embedded_hal_async::{delay::DelayNs, i2c::{I2c, SevenBitAddress}};
//! use fdc1004::{asynch::Fdc1004, Config};
//!
//! async fn example<I2C, D, E>(i2c: I2C, delay: D) -> Result<[i32; 4], fdc1004::Error<E>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//!   D: DelayNs,
//! {
//!   let mut fdc = Fdc1004::new(i2c, delay, Config::default());
//!   fdc.probe().await?;
//!
//!   let mut readings = [0; 4];
//!   for (channel, reading) in (0..).zip(readings.iter_mut()) {
//!     *reading = fdc.get_capacitance(channel).await;
//!   }
//!   Ok(readings)
//! }
//! ```
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::measurement::{config_word, is_capdac, is_channel, is_complete, is_slot, trigger_word};
use crate::reg::{Reg, DEVICE_ID, I2C_ADDR, MANUFACTURER_ID};
use crate::{
  AutoRange, Config, ConversionWait, Error, Measurement, Rate, RawMeasurement, Step, CAPACITANCE_UNAVAILABLE, CHANNELS,
};

/// Async driver for one FDC1004.
pub struct Fdc1004<I, D> {
  i2c: I,
  delay: D,
  config: Config,
  capdac: [u8; CHANNELS as usize],
}

impl<I, D> Fdc1004<I, D> {
  pub fn new(i2c: I, delay: D, config: Config) -> Self {
    Self { i2c, delay, config, capdac: [0; CHANNELS as usize] }
  }

  pub fn config(&self) -> Config {
    self.config
  }

  pub fn last_capdac(&self, channel: u8) -> Option<u8> {
    self.capdac.get(channel as usize).copied()
  }

  pub fn release(self) -> (I, D) {
    (self.i2c, self.delay)
  }
}

impl<I, E, D> Fdc1004<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  /// See [`crate::Fdc1004::configure_slot`].
  pub async fn configure_slot(&mut self, slot: u8, channel: u8, capdac: u8) -> Result<(), Error<E>> {
    if !is_slot(slot) || !is_channel(channel) || !is_capdac(capdac) {
      return Err(Error::InvalidArgument);
    }
    self.write_register(Reg::config(slot), config_word(channel, capdac)).await
  }

  /// See [`crate::Fdc1004::trigger`].
  pub async fn trigger(&mut self, slot: u8, rate: Rate) -> Result<(), Error<E>> {
    if !is_slot(slot) {
      return Err(Error::InvalidArgument);
    }
    self.write_register(Reg::FdcConf, trigger_word(slot, rate)).await
  }

  /// See [`crate::Fdc1004::read_result`].
  pub async fn read_result(&mut self, slot: u8) -> Result<RawMeasurement, Error<E>> {
    if !is_slot(slot) {
      return Err(Error::InvalidArgument);
    }

    if !is_complete(self.read_register(Reg::FdcConf).await?, slot) {
      return Err(Error::NotReady);
    }

    let msb = self.read_register(Reg::msb(slot)).await?;
    let lsb = self.read_register(Reg::lsb(slot)).await?;
    Ok(RawMeasurement::new(msb, lsb))
  }

  /// See [`crate::Fdc1004::measure_channel`].
  pub async fn measure_channel(&mut self, channel: u8, capdac: u8) -> Result<RawMeasurement, Error<E>> {
    let slot = channel;
    self.configure_slot(slot, channel, capdac).await?;
    self.trigger(slot, self.config.rate).await?;
    self.wait_for_conversion(slot).await?;
    self.read_result(slot).await
  }

  /// See [`crate::Fdc1004::get_raw_capacitance`].
  pub async fn get_raw_capacitance(&mut self, channel: u8) -> Result<Measurement, Error<E>> {
    if !is_channel(channel) {
      return Err(Error::InvalidArgument);
    }

    let mut range = AutoRange::new(self.capdac[channel as usize]);
    loop {
      let Ok(raw) = self.measure_channel(channel, range.capdac()).await else {
        #[cfg(feature = "defmt")]
        defmt::warn!("CIN{}: measurement failed at capdac {}", channel + 1, range.capdac());
        return Err(Error::Device);
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

  /// See [`crate::Fdc1004::get_capacitance`].
  pub async fn get_capacitance(&mut self, channel: u8) -> i32 {
    match self.get_raw_capacitance(channel).await {
      Ok(measurement) => measurement.femtofarads(),
      Err(_) => CAPACITANCE_UNAVAILABLE,
    }
  }

  async fn wait_for_conversion(&mut self, slot: u8) -> Result<(), Error<E>> {
    match self.config.wait {
      ConversionWait::Fixed => self.delay.delay_ms(self.config.rate.conversion_delay_ms()).await,
      ConversionWait::Poll { interval_us, attempts } => {
        for _ in 0..attempts {
          self.delay.delay_us(interval_us).await;
          if is_complete(self.read_register(Reg::FdcConf).await?, slot) {
            break;
          }
        }
      }
    }
    Ok(())
  }
}

impl<I, E, D> Fdc1004<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// See [`crate::Fdc1004::probe`].
  pub async fn probe(&mut self) -> Result<(), Error<E>> {
    let manufacturer = self.read_register(Reg::ManufacturerId).await?;
    if manufacturer != MANUFACTURER_ID {
      return Err(Error::InvalidChipId(manufacturer));
    }

    let device = self.read_register(Reg::DeviceId).await?;
    if device != DEVICE_ID {
      return Err(Error::InvalidChipId(device));
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("FDC1004 found, manufacturer {=u16:#x} device {=u16:#x}", manufacturer, device);
    Ok(())
  }

  async fn write_register(&mut self, reg: Reg, data: u16) -> Result<(), Error<E>> {
    let [hi, lo] = data.to_be_bytes();
    self.i2c.write(I2C_ADDR, &[reg.into(), hi, lo]).await.map_err(Error::I2c)
  }

  async fn read_register(&mut self, reg: Reg) -> Result<u16, Error<E>> {
    let mut buf = [0u8; 2];
    self.i2c.write_read(I2C_ADDR, &[reg.into()], &mut buf).await.map_err(Error::I2c)?;
    Ok(u16::from_be_bytes(buf))
  }
}
