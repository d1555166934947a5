/// Output data rate used when triggering a conversion.
///
/// The discriminant is the 2-bit RATE field of the FDC configuration register.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rate {
  #[default]
  Hz100 = 0b01,
  Hz200 = 0b10,
  Hz400 = 0b11,
}

impl Rate {
  /// Time to wait after a trigger before the result is expected to be ready.
  ///
  /// Tuned against the worst-case conversion time at each rate, so a
  /// `NotReady` after this wait is rare but possible.
  pub const fn conversion_delay_ms(self) -> u32 {
    match self {
      Self::Hz100 => 11,
      Self::Hz200 => 6,
      Self::Hz400 => 3,
    }
  }
}

impl From<Rate> for u8 {
  fn from(v: Rate) -> Self {
    v as u8
  }
}

impl TryFrom<u8> for Rate {
  type Error = ();

  fn try_from(bits: u8) -> Result<Self, Self::Error> {
    match bits {
      0b01 => Ok(Self::Hz100),
      0b10 => Ok(Self::Hz200),
      0b11 => Ok(Self::Hz400),
      _ => Err(()),
    }
  }
}

/// How the driver waits between triggering a conversion and reading it back.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionWait {
  /// Block once for [`Rate::conversion_delay_ms`].
  #[default]
  Fixed,
  /// Sleep `interval_us`, then check the completion bit, at most `attempts`
  /// times. Running out of attempts is not an error in itself; the following
  /// read reports [`crate::Error::NotReady`].
  Poll { interval_us: u32, attempts: u8 },
}

impl ConversionWait {
  pub const fn poll(interval_us: u32, attempts: u8) -> Self {
    Self::Poll { interval_us, attempts }
  }
}

/// Driver configuration.
///
/// # Example
/// ```no_run
/// use fdc1004::{Config, ConversionWait, Rate};
///
/// let config = Config::default()
///   .with_rate(Rate::Hz400)
///   .with_wait(ConversionWait::poll(500, 10));
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
  pub rate: Rate,
  pub wait: ConversionWait,
}

impl Config {
  pub const fn new(rate: Rate, wait: ConversionWait) -> Self {
    Self { rate, wait }
  }

  pub const fn with_rate(mut self, rate: Rate) -> Self {
    self.rate = rate;
    self
  }

  pub const fn with_wait(mut self, wait: ConversionWait) -> Self {
    self.wait = wait;
    self
  }
}
