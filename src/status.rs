//! Status and FIFO entry count.
//!
//! `STATUS`, `STATUS2`, `FIFO_ENTRIES2` and `FIFO_ENTRIES` are adjacent and
//! read in a single burst. The entry count is split across the last two:
//! `FIFO_ENTRIES2[1:0]` holds bits 9:8 and `FIFO_ENTRIES` bits 7:0.

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use super::{defs::*, Adxl372, Error};

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  pub async fn read_status(&mut self) -> Result<DeviceStatus, Error<E>> {
    let mut b = [0u8; 4];
    if let Err(e) = self.read_bytes(Reg::Status1, &mut b).await {
      error!("adxl372: error reading status register");
      return Err(e);
    }
    Ok(DeviceStatus::decode(b))
  }
}

/// `STATUS` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct Status1 {
  #[bits(1)]
  pub data_ready: bool,
  /// At least one sample is in the FIFO.
  #[bits(1)]
  pub fifo_ready: bool,
  /// FIFO holds at least the watermark.
  #[bits(1)]
  pub fifo_full: bool,
  /// Samples were lost.
  #[bits(1)]
  pub fifo_overrun: bool,
  #[skip(1)]
  #[bits(1)]
  pub user_nvm_busy: bool,
  #[bits(1)]
  pub awake: bool,
  /// User register configuration failed its checksum.
  #[bits(1)]
  pub err_user_regs: bool,
}

/// Decoded status burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
  pub status1: Status1,
  /// `STATUS2` (activity / inactivity / awake events), passed through as-is.
  pub status2: u8,
  /// 16-bit FIFO slots currently stored, as reported (10 bits).
  pub fifo_entries: u16,
}

impl DeviceStatus {
  pub fn decode(b: [u8; 4]) -> Self {
    Self {
      status1: Status1::try_from([b[0]]).unwrap_or_default(),
      status2: b[1],
      fifo_entries: fifo_entries(b[2], b[3]),
    }
  }
}

#[inline]
pub(crate) const fn fifo_entries(entries2: u8, entries1: u8) -> u16 {
  ((entries2 & 0x3) as u16) << 8 | entries1 as u16
}
