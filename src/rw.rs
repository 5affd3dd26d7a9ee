//! Register addressing and SPI transaction helpers.
//!
//! Every transaction starts with one address token: the 7-bit register
//! address shifted left by one with the R/W flag in bit 0. Multi-byte
//! transfers rely on the device auto-incrementing the address.

use embedded_hal_async::{
  delay::DelayNs,
  spi::{Operation, SpiDevice},
};

use crate::{Adxl372, Error, defs::Reg};

const READ_BIT: u8 = 0x01;
const MAX_ADDR: u8 = 0x7F;

/// Address token for reading `addr`. Panics if `addr` does not fit in 7 bits.
#[inline]
pub const fn encode_read(addr: u8) -> u8 {
  assert!(addr <= MAX_ADDR, "register address exceeds 7 bits");
  (addr << 1) | READ_BIT
}

/// Address token for writing `addr`. Panics if `addr` does not fit in 7 bits.
#[inline]
pub const fn encode_write(addr: u8) -> u8 {
  assert!(addr <= MAX_ADDR, "register address exceeds 7 bits");
  addr << 1
}

/// Split an address token back into `(addr, is_read)`.
#[inline]
pub const fn decode_token(token: u8) -> (u8, bool) {
  (token >> 1, token & READ_BIT != 0)
}

/// `(current & !mask) | value`. `value` is expected to already sit inside `mask`.
#[inline]
pub const fn masked_update(current: u8, mask: u8, value: u8) -> u8 {
  (current & !mask) | value
}

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  pub(crate) async fn read_u8(&mut self, reg: Reg) -> Result<u8, Error<E>> {
    let mut b = [0u8; 1];
    self.read_bytes(reg, &mut b).await?;
    Ok(b[0])
  }

  /// Two registers holding a big-endian value (`_H` then `_L`).
  pub(crate) async fn read_be16(&mut self, reg: Reg) -> Result<u16, Error<E>> {
    let mut b = [0u8; 2];
    self.read_bytes(reg, &mut b).await?;
    Ok(u16::from_be_bytes(b))
  }

  pub(crate) async fn read_bytes(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E>> {
    self.read_raw(reg.into(), buf).await
  }

  pub(crate) async fn read_raw(&mut self, addr: u8, buf: &mut [u8]) -> Result<(), Error<E>> {
    let token = [encode_read(addr)];
    self
      .spi
      .transaction(&mut [Operation::Write(&token), Operation::Read(buf)])
      .await
      .map_err(Error::Spi)
  }

  pub(crate) async fn write_u8(&mut self, reg: Reg, value: u8) -> Result<(), Error<E>> {
    self.write_bytes(reg, &[value]).await
  }

  pub(crate) async fn write_bytes(&mut self, reg: Reg, data: &[u8]) -> Result<(), Error<E>> {
    self.write_raw(reg.into(), data).await
  }

  pub(crate) async fn write_raw(&mut self, addr: u8, data: &[u8]) -> Result<(), Error<E>> {
    debug_assert!(data.len() <= 15, "write_bytes buffer too small");
    let mut buf = [0u8; 16];
    let len = 1 + data.len();
    buf[0] = encode_write(addr);
    buf[1..len].copy_from_slice(data);
    self.spi.write(&buf[..len]).await.map_err(Error::Spi)
  }

  /// Read-modify-write of the bits under `mask`.
  pub(crate) async fn write_mask(&mut self, reg: Reg, mask: u8, value: u8) -> Result<(), Error<E>> {
    let current = self.read_u8(reg).await?;
    self.write_u8(reg, masked_update(current, mask, value & mask)).await
  }
}
