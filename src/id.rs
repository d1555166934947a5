use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::{Error, Fdc1004, Reg, DEVICE_ID, MANUFACTURER_ID};

impl<I, E, D> Fdc1004<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Manufacturer identifier, `0x5449` ("TI") on a genuine part.
  pub fn manufacturer_id(&mut self) -> Result<u16, Error<E>> {
    self.read_register(Reg::ManufacturerId)
  }

  /// Device identifier, `0x1004` on a genuine part.
  pub fn device_id(&mut self) -> Result<u16, Error<E>> {
    self.read_register(Reg::DeviceId)
  }

  /// Check that an FDC1004 answers on the bus.
  pub fn probe(&mut self) -> Result<(), Error<E>> {
    let manufacturer = self.manufacturer_id()?;
    if manufacturer != MANUFACTURER_ID {
      return Err(Error::InvalidChipId(manufacturer));
    }

    let device = self.device_id()?;
    if device != DEVICE_ID {
      return Err(Error::InvalidChipId(device));
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("FDC1004 found, manufacturer {=u16:#x} device {=u16:#x}", manufacturer, device);
    Ok(())
  }
}
