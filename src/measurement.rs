use crate::Rate;

/// Number of measurement slots (configuration/result register sets).
pub const SLOTS: u8 = 4;
/// Number of CINx input channels.
pub const CHANNELS: u8 = 4;
/// Largest offset the CAPDAC field can hold.
pub const CAPDAC_MAX: u8 = 0x1F;

/// Attofarads per LSB of the upper result word.
pub const ATTOFARADS_UPPER_WORD: i32 = 488;
/// Femtofarads per CAPDAC step.
pub const FEMTOFARADS_CAPDAC: i32 = 3125;

/// Returned by [`crate::Fdc1004::get_capacitance`] when no reading could be
/// taken. Never a plausible capacitance.
pub const CAPACITANCE_UNAVAILABLE: i32 = i32::MIN;

// CHB = 0b100: single-ended measurement against the CAPDAC, CINx negative
// input disabled.
const CHB_CAPDAC: u16 = 0b100;

pub(crate) const fn is_slot(slot: u8) -> bool {
  slot < SLOTS
}

pub(crate) const fn is_channel(channel: u8) -> bool {
  channel < CHANNELS
}

pub(crate) const fn is_capdac(capdac: u8) -> bool {
  capdac <= CAPDAC_MAX
}

/// Measurement configuration word: CHA in [15:13], CHB in [12:10], CAPDAC in
/// [9:5].
pub(crate) const fn config_word(channel: u8, capdac: u8) -> u16 {
  (channel as u16) << 13 | CHB_CAPDAC << 10 | (capdac as u16) << 5
}

/// Single-shot trigger word: RATE in [11:10], REPEAT (bit 8) cleared, and the
/// slot's INIT bit, slot 0 at bit 7 down to slot 3 at bit 4.
pub(crate) const fn trigger_word(slot: u8, rate: Rate) -> u16 {
  (rate as u16) << 10 | 1 << (7 - slot)
}

/// DONE bits sit at [3:0], slot 0 at bit 3.
pub(crate) const fn is_complete(status: u16, slot: u8) -> bool {
  status & (1 << (3 - slot)) != 0
}

/// Result registers of one slot, exactly as read from the device.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMeasurement {
  pub msb: u16,
  pub lsb: u16,
}

impl RawMeasurement {
  pub const fn new(msb: u16, lsb: u16) -> Self {
    Self { msb, lsb }
  }

  /// Upper 16 bits of the result as a signed value. This is what range checks
  /// and the capacitance formula work with.
  pub const fn value(&self) -> i16 {
    self.msb as i16
  }

  /// Full 24-bit two's complement result, sign-extended. The low byte of the
  /// LSB register is reserved and dropped.
  pub const fn full(&self) -> i32 {
    (((self.msb as u32) << 16 | self.lsb as u32) as i32) >> 8
  }
}

/// An auto-ranged reading: the signed upper result word and the CAPDAC offset
/// it was taken with.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
  pub value: i16,
  pub capdac: u8,
}

impl Measurement {
  pub const fn new(value: i16, capdac: u8) -> Self {
    Self { value, capdac }
  }

  /// Capacitance in femtofarads. The division truncates toward zero, matching
  /// the device resolution.
  pub const fn femtofarads(&self) -> i32 {
    ATTOFARADS_UPPER_WORD * self.value as i32 / 1000 + FEMTOFARADS_CAPDAC * self.capdac as i32
  }
}
