//! Read all four channels, then drive one slot by hand.
#![allow(unused)]
use embedded_hal::{
  delay::DelayNs,
  i2c::{I2c, SevenBitAddress},
};
use fdc1004::{Config, ConversionWait, Error, Fdc1004, Rate, CAPACITANCE_UNAVAILABLE};

fn read_all<I2C, D, E>(i2c: I2C, delay: D) -> Result<[i32; 4], Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  let config = Config::default()
    .with_rate(Rate::Hz400)
    .with_wait(ConversionWait::poll(500, 8));
  let mut fdc = Fdc1004::new(i2c, delay, config);
  fdc.probe()?;

  let mut femtofarads = [CAPACITANCE_UNAVAILABLE; 4];
  for channel in 0..4 {
    femtofarads[channel as usize] = fdc.get_capacitance(channel);
  }
  Ok(femtofarads)
}

fn manual<I2C, D, E>(fdc: &mut Fdc1004<I2C, D>) -> Result<i32, Error<E>>
where
  I2C: I2c<SevenBitAddress, Error = E>,
  D: DelayNs,
{
  // Slot 2 measures CIN1 with a fixed offset of 8 CAPDAC steps.
  fdc.configure_slot(2, 0, 8)?;
  fdc.trigger(2, Rate::Hz100)?;

  loop {
    match fdc.read_result(2) {
      Ok(raw) => return Ok(raw.full()),
      Err(Error::NotReady) => continue,
      Err(e) => return Err(e),
    }
  }
}

fn main() {}
