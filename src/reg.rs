/******************************************************************************
 * Refer to the FDC1004 datasheet for more information, available here:       *
 * - https://www.ti.com/product/FDC1004                                       *
 * ========================================================================== *
 *                        FDC1004 - Registers & Memory Map                    *
*******************************************************************************/

/// The FDC1004 answers on a single, fixed 7-bit address.
pub(crate) const I2C_ADDR: u8 = 0b101_0000;

pub(crate) const MANUFACTURER_ID: u16 = 0x5449;
pub(crate) const DEVICE_ID: u16 = 0x1004;

#[allow(dead_code)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // Measurement results, MSB then LSB per slot (0x00..0x07)
  Meas1Msb = 0x00,
  Meas1Lsb = 0x01,
  Meas2Msb = 0x02,
  Meas2Lsb = 0x03,
  Meas3Msb = 0x04,
  Meas3Lsb = 0x05,
  Meas4Msb = 0x06,
  Meas4Lsb = 0x07,

  // Measurement configuration (0x08..0x0B)
  ConfMeas1 = 0x08,
  ConfMeas2 = 0x09,
  ConfMeas3 = 0x0A,
  ConfMeas4 = 0x0B,

  // Shared trigger (write) and completion status (read)
  FdcConf = 0x0C,

  // Offset calibration (0x0D..0x10)
  OffsetCalCin1 = 0x0D,
  OffsetCalCin2 = 0x0E,
  OffsetCalCin3 = 0x0F,
  OffsetCalCin4 = 0x10,

  // Gain calibration (0x11..0x14)
  GainCalCin1 = 0x11,
  GainCalCin2 = 0x12,
  GainCalCin3 = 0x13,
  GainCalCin4 = 0x14,

  // Identification
  ManufacturerId = 0xFE,
  DeviceId = 0xFF,
}

impl Reg {
  /// Configuration register of a measurement slot. Only the two low bits of
  /// `slot` are used; callers validate the range first.
  pub(crate) const fn config(slot: u8) -> Self {
    match slot & 0b11 {
      0 => Self::ConfMeas1,
      1 => Self::ConfMeas2,
      2 => Self::ConfMeas3,
      _ => Self::ConfMeas4,
    }
  }

  pub(crate) const fn msb(slot: u8) -> Self {
    match slot & 0b11 {
      0 => Self::Meas1Msb,
      1 => Self::Meas2Msb,
      2 => Self::Meas3Msb,
      _ => Self::Meas4Msb,
    }
  }

  pub(crate) const fn lsb(slot: u8) -> Self {
    match slot & 0b11 {
      0 => Self::Meas1Lsb,
      1 => Self::Meas2Lsb,
      2 => Self::Meas3Lsb,
      _ => Self::Meas4Lsb,
    }
  }
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slot_registers_follow_the_memory_map() {
    let config: [u8; 4] = [0, 1, 2, 3].map(|s| Reg::config(s).into());
    let msb: [u8; 4] = [0, 1, 2, 3].map(|s| Reg::msb(s).into());
    let lsb: [u8; 4] = [0, 1, 2, 3].map(|s| Reg::lsb(s).into());

    assert_eq!(config, [0x08, 0x09, 0x0A, 0x0B]);
    assert_eq!(msb, [0x00, 0x02, 0x04, 0x06]);
    assert_eq!(lsb, [0x01, 0x03, 0x05, 0x07]);
  }
}
