use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::{Error, Fdc1004, Reg, I2C_ADDR};

impl<I, E, D> Fdc1004<I, D>
where
  I: I2c<SevenBitAddress, Error = E>,
{
  /// Write a 16-bit register. The payload follows the register pointer
  /// big-endian, in a single transaction.
  pub(crate) fn write_register(&mut self, reg: Reg, data: u16) -> Result<(), Error<E>> {
    let [hi, lo] = data.to_be_bytes();
    self.i2c.write(I2C_ADDR, &[reg.into(), hi, lo]).map_err(Error::I2c)
  }

  /// Point at `reg` and read its 16-bit big-endian content back.
  pub(crate) fn read_register(&mut self, reg: Reg) -> Result<u16, Error<E>> {
    let mut buf = [0u8; 2];
    self.i2c.write_read(I2C_ADDR, &[reg.into()], &mut buf).map_err(Error::I2c)?;
    Ok(u16::from_be_bytes(buf))
  }
}
