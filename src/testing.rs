//! Mock bus, delay and interrupt pin for unit tests.

use std::{collections::VecDeque, vec::Vec};

use embedded_hal_async::{
  delay::DelayNs,
  spi::{self, ErrorKind, ErrorType, Operation, SpiDevice},
};

use crate::{Adxl372, defs::Reg, rw::decode_token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

impl spi::Error for MockError {
  fn kind(&self) -> ErrorKind {
    ErrorKind::Other
  }
}

/// One completed SPI transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transfer {
  pub(crate) addr: u8,
  pub(crate) read: bool,
  pub(crate) data: Vec<u8>,
}

/// Register file behind an SPI device. Honors address auto-increment, except
/// on `FIFO_DATA` which streams from a queue.
#[derive(Debug, Clone)]
pub(crate) struct MockSpi {
  regs: [u8; 128],
  fifo: VecDeque<u8>,
  log: Vec<Transfer>,
  fail_on: Option<u8>,
  fail_after: Option<usize>,
}

impl MockSpi {
  pub(crate) fn new() -> Self {
    Self { regs: [0u8; 128], fifo: VecDeque::new(), log: Vec::new(), fail_on: None, fail_after: None }
  }

  pub(crate) fn with_reg(mut self, addr: u8, value: u8) -> Self {
    self.regs[addr as usize] = value;
    self
  }

  pub(crate) fn with_regs(mut self, addr: u8, values: &[u8]) -> Self {
    for (i, v) in values.iter().enumerate() {
      self.regs[addr as usize + i] = *v;
    }
    self
  }

  pub(crate) fn with_fifo(mut self, bytes: &[u8]) -> Self {
    self.fifo.extend(bytes.iter().copied());
    self
  }

  /// Fail every transaction addressed to `addr`.
  pub(crate) fn fail_on(mut self, addr: u8) -> Self {
    self.fail_on = Some(addr);
    self
  }

  /// Fail every transaction after the first `n` succeeded.
  pub(crate) fn fail_after(mut self, n: usize) -> Self {
    self.fail_after = Some(n);
    self
  }

  pub(crate) fn set_fail_on(&mut self, addr: Option<u8>) {
    self.fail_on = addr;
  }

  pub(crate) fn reg(&self, addr: u8) -> u8 {
    self.regs[addr as usize]
  }

  pub(crate) fn fifo_len(&self) -> usize {
    self.fifo.len()
  }

  pub(crate) fn transfers(&self) -> &[Transfer] {
    &self.log
  }

  pub(crate) fn writes(&self) -> Vec<(u8, Vec<u8>)> {
    self.log.iter().filter(|t| !t.read).map(|t| (t.addr, t.data.clone())).collect()
  }

  pub(crate) fn reads(&self) -> Vec<(u8, usize)> {
    self.log.iter().filter(|t| t.read).map(|t| (t.addr, t.data.len())).collect()
  }

  pub(crate) fn clear_log(&mut self) {
    self.log.clear();
  }

  fn load(&mut self, addr: u8) -> u8 {
    if addr == Reg::FifoData as u8 {
      self.fifo.pop_front().unwrap_or(0)
    } else {
      self.regs[addr as usize & 0x7F]
    }
  }

  fn next(addr: u8) -> u8 {
    if addr == Reg::FifoData as u8 {
      addr
    } else {
      addr.wrapping_add(1) & 0x7F
    }
  }
}

impl ErrorType for MockSpi {
  type Error = MockError;
}

impl SpiDevice for MockSpi {
  async fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
    let mut transfer: Option<Transfer> = None;
    let mut cursor = 0u8;

    for op in operations.iter_mut() {
      match op {
        Operation::Write(data) => {
          let mut bytes = data.iter().copied();
          if transfer.is_none() {
            let Some(token) = bytes.next() else { continue };
            let (addr, read) = decode_token(token);
            let failed_after = self.fail_after.is_some_and(|n| self.log.len() >= n);
            if self.fail_on == Some(addr) || failed_after {
              return Err(MockError);
            }
            transfer = Some(Transfer { addr, read, data: Vec::new() });
            cursor = addr;
          }
          let t = transfer.as_mut().ok_or(MockError)?;
          for b in bytes {
            self.regs[cursor as usize] = b;
            t.data.push(b);
            cursor = Self::next(cursor);
          }
        }
        Operation::Read(buf) => {
          let read = transfer.as_ref().ok_or(MockError)?.read;
          if !read {
            return Err(MockError);
          }
          for slot in buf.iter_mut() {
            *slot = self.load(cursor);
            cursor = Self::next(cursor);
          }
          if let Some(t) = transfer.as_mut() {
            t.data.extend_from_slice(&buf[..]);
          }
        }
        _ => return Err(MockError),
      }
    }

    if let Some(t) = transfer {
      self.log.push(t);
    }
    Ok(())
  }
}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
  pub(crate) calls: u32,
  pub(crate) total_ns: u64,
}

impl DelayNs for MockDelay {
  async fn delay_ns(&mut self, ns: u32) {
    self.calls += 1;
    self.total_ns += ns as u64;
  }
}

#[cfg(feature = "events")]
#[derive(Default, Debug)]
pub(crate) struct MockPin {
  pub(crate) waits: u32,
}

#[cfg(feature = "events")]
impl embedded_hal::digital::ErrorType for MockPin {
  type Error = core::convert::Infallible;
}

#[cfg(feature = "events")]
impl embedded_hal_async::digital::Wait for MockPin {
  async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
    self.waits += 1;
    Ok(())
  }

  async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
    self.waits += 1;
    Ok(())
  }

  async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
    self.waits += 1;
    Ok(())
  }

  async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
    self.waits += 1;
    Ok(())
  }

  async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
    self.waits += 1;
    Ok(())
  }
}

#[cfg(not(feature = "events"))]
pub(crate) type TestDevice = Adxl372<MockSpi, MockDelay>;
#[cfg(feature = "events")]
pub(crate) type TestDevice = Adxl372<MockSpi, MockDelay, MockPin>;

/// Driver over `spi` without running bring-up.
pub(crate) fn device(spi: MockSpi) -> TestDevice {
  #[cfg(not(feature = "events"))]
  let dev = Adxl372::new(spi, MockDelay::default());
  #[cfg(feature = "events")]
  let dev = Adxl372::new(spi, MockDelay::default(), MockPin::default());
  dev
}

/// Attach (identity check and bring-up) over `spi`.
pub(crate) async fn open(spi: MockSpi) -> Result<TestDevice, crate::Error<MockError>> {
  #[cfg(not(feature = "events"))]
  let dev = Adxl372::open(spi, MockDelay::default()).await;
  #[cfg(feature = "events")]
  let dev = Adxl372::open(spi, MockDelay::default(), MockPin::default()).await;
  dev
}

/// A mock that answers the identity check.
pub(crate) fn adxl372() -> MockSpi {
  MockSpi::new().with_regs(Reg::DevId as u8, &[0xAD, 0x1D, 0xFA, 0x03])
}
