//! Raw register access for debugging.
//!
//! Bypasses the driver state mirror: writing a configuration register here
//! leaves [`DeviceState`](crate::DeviceState) stale.

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use crate::{Adxl372, Error};

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Read one register by address.
  pub async fn read_register(&mut self, addr: u8) -> Result<u8, Error<E>> {
    check_addr(addr)?;
    let mut b = [0u8; 1];
    self.read_raw(addr, &mut b).await?;
    Ok(b[0])
  }

  /// Write one register by address.
  pub async fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Error<E>> {
    check_addr(addr)?;
    self.write_raw(addr, &[value]).await
  }
}

fn check_addr<E>(addr: u8) -> Result<(), Error<E>> {
  if addr > 0x7F {
    return Err(Error::InvalidRegister(addr));
  }
  Ok(())
}
