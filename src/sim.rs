//! In-memory FDC1004 and delay used by the unit tests.

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

use crate::reg::{DEVICE_ID, I2C_ADDR, MANUFACTURER_ID};

/// Result of converting `(channel, capdac)`, saturated to the 16-bit upper
/// result word.
pub(crate) type Response = fn(u8, u8) -> i32;

/// Register-level model of the converter.
///
/// A trigger converts immediately through the response function. The DONE
/// bit shows up on the `ready_after`-th status read following the trigger, or
/// never.
pub(crate) struct FakeFdc {
  response: Response,
  ready_after: Option<usize>,
  pointer: u8,
  conf: [u16; 4],
  results: [u16; 4],
  trigger: u16,
  done: u16,
  pending: Option<u8>,
  reads_since_trigger: usize,
  conversions: usize,
  status_reads: usize,
  transactions: usize,
  device_id: u16,
}

impl FakeFdc {
  pub(crate) fn new(response: Response) -> Self {
    Self {
      response,
      ready_after: Some(1),
      pointer: 0,
      conf: [0; 4],
      results: [0; 4],
      trigger: 0,
      done: 0,
      pending: None,
      reads_since_trigger: 0,
      conversions: 0,
      status_reads: 0,
      transactions: 0,
      device_id: DEVICE_ID,
    }
  }

  pub(crate) fn set_response(&mut self, response: Response) {
    self.response = response;
  }

  pub(crate) fn never_ready(&mut self) {
    self.ready_after = None;
  }

  pub(crate) fn ready_after(&mut self, status_reads: usize) {
    self.ready_after = Some(status_reads);
  }

  pub(crate) fn with_device_id(mut self, id: u16) -> Self {
    self.device_id = id;
    self
  }

  pub(crate) fn conversions(&self) -> usize {
    self.conversions
  }

  pub(crate) fn status_reads(&self) -> usize {
    self.status_reads
  }

  pub(crate) fn transactions(&self) -> usize {
    self.transactions
  }

  pub(crate) fn config(&self, slot: usize) -> u16 {
    self.conf[slot]
  }

  fn write_register(&mut self, reg: u8, value: u16) -> Result<(), ErrorKind> {
    match reg {
      0x08..=0x0B => self.conf[(reg - 0x08) as usize] = value,
      0x0C => self.start(value),
      _ => return Err(ErrorKind::Other),
    }
    Ok(())
  }

  fn start(&mut self, word: u16) {
    self.trigger = word & 0x0DF0;
    for slot in 0..4u8 {
      if word & (1 << (7 - slot)) == 0 {
        continue;
      }
      let conf = self.conf[slot as usize];
      let channel = (conf >> 13) as u8;
      let capdac = ((conf >> 5) & 0x1F) as u8;
      let value = (self.response)(channel, capdac).clamp(i16::MIN as i32, i16::MAX as i32);

      self.results[slot as usize] = value as i16 as u16;
      self.done &= !(1 << (3 - slot));
      self.pending = Some(slot);
      self.reads_since_trigger = 0;
      self.conversions += 1;
    }
  }

  fn read_register(&mut self, reg: u8) -> u16 {
    match reg {
      0x00..=0x07 if reg % 2 == 0 => self.results[(reg / 2) as usize],
      0x00..=0x07 => 0,
      0x08..=0x0B => self.conf[(reg - 0x08) as usize],
      0x0C => self.status(),
      0xFE => MANUFACTURER_ID,
      0xFF => self.device_id,
      _ => 0,
    }
  }

  fn status(&mut self) -> u16 {
    self.status_reads += 1;
    self.reads_since_trigger += 1;
    if let (Some(slot), Some(n)) = (self.pending, self.ready_after) {
      if self.reads_since_trigger >= n {
        self.done |= 1 << (3 - slot);
        self.pending = None;
      }
    }
    self.trigger | self.done
  }
}

impl ErrorType for FakeFdc {
  type Error = ErrorKind;
}

impl embedded_hal::i2c::I2c for FakeFdc {
  fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    if address != I2C_ADDR {
      return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
    }
    self.transactions += 1;

    for op in operations {
      match op {
        Operation::Write(bytes) => match **bytes {
          [reg] => self.pointer = reg,
          [reg, hi, lo] => {
            self.pointer = reg;
            self.write_register(reg, u16::from_be_bytes([hi, lo]))?;
          }
          _ => return Err(ErrorKind::Other),
        },
        Operation::Read(buf) => {
          if buf.len() != 2 {
            return Err(ErrorKind::Other);
          }
          let value = self.read_register(self.pointer);
          buf.copy_from_slice(&value.to_be_bytes());
        }
      }
    }
    Ok(())
  }
}

impl embedded_hal_async::i2c::I2c for FakeFdc {
  async fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
    embedded_hal::i2c::I2c::transaction(self, address, operations)
  }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Debug, Default)]
pub(crate) struct Ticks {
  ns: u64,
}

impl Ticks {
  pub(crate) fn total_us(&self) -> u64 {
    self.ns / 1_000
  }

  pub(crate) fn total_ms(&self) -> u64 {
    self.ns / 1_000_000
  }
}

impl embedded_hal::delay::DelayNs for Ticks {
  fn delay_ns(&mut self, ns: u32) {
    self.ns += u64::from(ns);
  }
}

impl embedded_hal_async::delay::DelayNs for Ticks {
  async fn delay_ns(&mut self, ns: u32) {
    self.ns += u64::from(ns);
  }
}
