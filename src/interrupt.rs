//! Interrupt line mapping.
//!
//! The ADXL372 has two interrupt pins (INT1 and INT2). Each one is driven by
//! an 8-bit source mask held in `INT1_MAP` / `INT2_MAP`; the two registers are
//! adjacent and always written together.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(mut accel: adxl372::Adxl372<impl embedded_hal_async::spi::SpiDevice, impl embedded_hal_async::delay::DelayNs>) {
//! use adxl372::interrupt::IntMap;
//!
//! // FIFO full on INT1, activity on INT2
//! let int1 = IntMap { fifo_full: true, ..Default::default() };
//! let int2 = IntMap { activity: true, ..Default::default() };
//! accel.set_interrupts(int1, int2).await.unwrap();
//!
//! // Silence both lines
//! accel.set_interrupts(IntMap::NONE, IntMap::NONE).await.unwrap();
//! # }
//! ```

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use super::{Adxl372, Error, defs::*};

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Program both interrupt source masks in one transaction.
  ///
  /// The cached masks are only updated when the write succeeds.
  pub async fn set_interrupts(&mut self, int1: IntMap, int2: IntMap) -> Result<(), Error<E>> {
    let b = [int1.bits(), int2.bits()];
    if let Err(e) = self.write_bytes(Reg::Int1Map, &b).await {
      error!("adxl372: error setting interrupts");
      return Err(e);
    }

    self.state.int1_mask = int1;
    self.state.int2_mask = int2;
    Ok(())
  }

  /// Read back `(INT1_MAP, INT2_MAP)` from the device.
  pub async fn get_interrupts(&mut self) -> Result<(IntMap, IntMap), Error<E>> {
    let mut b = [0u8; 2];
    self.read_bytes(Reg::Int1Map, &mut b).await?;
    Ok((IntMap::from_bits(b[0]), IntMap::from_bits(b[1])))
  }

  /// Arm or disarm the FIFO-full trigger on INT1.
  ///
  /// Disarming clears both lines. It takes effect for the next interrupt, not
  /// one already being serviced.
  pub async fn set_trigger_state(&mut self, enabled: bool) -> Result<(), Error<E>> {
    if enabled {
      self.set_interrupts(IntMap::FIFO_FULL, IntMap::NONE).await
    } else {
      self.set_interrupts(IntMap::NONE, IntMap::NONE).await
    }
  }
}

/// Event sources routed to one interrupt line (`INTx_MAP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
pub struct IntMap {
  #[bits(1)]
  pub data_ready: bool,
  #[bits(1)]
  pub fifo_ready: bool,
  #[bits(1)]
  pub fifo_full: bool,
  #[bits(1)]
  pub fifo_overrun: bool,
  #[bits(1)]
  pub inactivity: bool,
  #[bits(1)]
  pub activity: bool,
  #[bits(1)]
  pub awake: bool,
  /// Pin is active low instead of active high.
  #[bits(1)]
  pub low_operation: bool,
}

impl IntMap {
  pub const NONE: Self = Self {
    data_ready: false,
    fifo_ready: false,
    fifo_full: false,
    fifo_overrun: false,
    inactivity: false,
    activity: false,
    awake: false,
    low_operation: false,
  };

  pub const FIFO_FULL: Self = Self { fifo_full: true, ..Self::NONE };

  pub fn from_bits(bits: u8) -> Self {
    IntMap::try_from([bits]).unwrap_or(Self::NONE)
  }

  pub fn bits(self) -> u8 {
    let b: [u8; 1] = self.try_into().unwrap_or([0]);
    b[0]
  }

  pub fn is_empty(self) -> bool {
    self == Self::NONE
  }
}
