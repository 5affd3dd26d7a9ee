//! Activity, activity2 and inactivity thresholds and timers.
//!
//! Each activity class owns six contiguous registers
//! (`X_H, X_L, Y_H, Y_L, Z_H, Z_L`). This driver programs the same value for
//! all three axes.
//!
//! Wire encoding of one axis (scale is 100 mg per code):
//!
//! ```text
//! code   = mg / 100
//! THRESH_H = code >> 3
//! THRESH_L = code[2:0] << 5 | ref_en << 1 | th_en
//! ```
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(mut accel: adxl372::Adxl372<impl embedded_hal_async::spi::SpiDevice, impl embedded_hal_async::delay::DelayNs>) {
//! use adxl372::{ActivityClass, Threshold};
//!
//! // 2 g referenced activity detection
//! accel.set_threshold(ActivityClass::Activity, Threshold::new(2000, true, true)).await.unwrap();
//! accel.set_activity_time(4).await.unwrap();
//! # }
//! ```

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use super::{defs::*, Adxl372, Error};

/// Milli-g per threshold code.
pub const THRESHOLD_SCALE_MG: u32 = 100;
/// Largest threshold code (204.7 g).
pub const THRESHOLD_CODE_MAX: u32 = 0x7FF;

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Program the X, Y and Z thresholds of `class` in one 6-byte write.
  ///
  /// Thresholds are not cached; nothing in the driver state changes.
  pub async fn set_threshold(&mut self, class: ActivityClass, th: Threshold) -> Result<(), Error<E>> {
    let [hi, lo] = th.encode();
    let b = [hi, lo, hi, lo, hi, lo];
    if let Err(e) = self.write_bytes(class.base(), &b).await {
      error!("adxl372: error writing activity threshold");
      return Err(e);
    }
    Ok(())
  }

  /// Read back the X-axis threshold of `class`.
  pub async fn get_threshold(&mut self, class: ActivityClass) -> Result<Threshold, Error<E>> {
    let mut b = [0u8; 2];
    self.read_bytes(class.base(), &mut b).await?;
    Ok(Threshold::decode(b))
  }

  /// Activity timer (`TIME_ACT`). At 6400 Hz one LSB is 6.6 ms; at lower
  /// rates it is 3.3 ms.
  pub async fn set_activity_time(&mut self, time: u8) -> Result<(), Error<E>> {
    self.write_u8(Reg::TimeAct, time).await
  }

  /// Inactivity timer (`TIME_INACT_H:L`). One LSB is 26 ms at 6400 Hz and
  /// 13 ms at lower rates.
  pub async fn set_inactivity_time(&mut self, time: u16) -> Result<(), Error<E>> {
    self.write_bytes(Reg::TimeInactH, &time.to_be_bytes()).await
  }

  pub async fn get_inactivity_time(&mut self) -> Result<u16, Error<E>> {
    self.read_be16(Reg::TimeInactH).await
  }
}

/// Motion detection class; each one has its own threshold block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActivityClass {
  Activity,
  Activity2,
  Inactivity,
}

impl ActivityClass {
  pub(crate) const fn base(self) -> Reg {
    match self {
      ActivityClass::Activity => Reg::XThreshActH,
      ActivityClass::Activity2 => Reg::XThreshAct2H,
      ActivityClass::Inactivity => Reg::XThreshInactH,
    }
  }
}

/// One axis threshold.
///
/// - `mg`: magnitude in milli-g; below 100 mg resolution is truncated.
/// - `reference`: referenced (relative to the last sample) instead of absolute.
/// - `enabled`: axis takes part in detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Threshold {
  pub mg: u32,
  pub reference: bool,
  pub enabled: bool,
}

impl Threshold {
  pub const fn new(mg: u32, reference: bool, enabled: bool) -> Self {
    Self { mg, reference, enabled }
  }

  /// Device code (`mg / 100`, truncating), saturated to 11 bits.
  pub const fn code(self) -> u32 {
    let code = self.mg / THRESHOLD_SCALE_MG;
    if code > THRESHOLD_CODE_MAX { THRESHOLD_CODE_MAX } else { code }
  }

  /// `[THRESH_H, THRESH_L]` for one axis.
  pub const fn encode(self) -> [u8; 2] {
    let code = self.code();
    let hi = (code >> 3) as u8;
    let lo = ((code << 5) as u8) | (self.reference as u8) << 1 | self.enabled as u8;
    [hi, lo]
  }

  pub const fn decode(b: [u8; 2]) -> Self {
    let code = (b[0] as u32) << 3 | (b[1] >> 5) as u32;
    Self { mg: code * THRESHOLD_SCALE_MG, reference: b[1] & 0b10 != 0, enabled: b[1] & 0b01 != 0 }
  }
}

#[cfg(test)]
mod tests {
  use futures::executor::block_on;

  use super::*;
  use crate::testing::{self, MockSpi};

  #[test]
  fn encode_then_decode_truncates_to_100_mg() {
    for mg in [0u32, 100, 500, 12700, 150, 999] {
      let th = Threshold::new(mg, true, false);
      let back = Threshold::decode(th.encode());
      assert_eq!(back.mg, mg / 100 * 100);
      assert!(back.reference);
      assert!(!back.enabled);
    }
  }

  #[test]
  fn flag_bits_sit_in_low_byte() {
    assert_eq!(Threshold::new(0, false, false).encode(), [0x00, 0x00]);
    assert_eq!(Threshold::new(0, false, true).encode(), [0x00, 0x01]);
    assert_eq!(Threshold::new(0, true, false).encode(), [0x00, 0x02]);
    assert_eq!(Threshold::new(500, true, true).encode(), [0x00, 0xA3]);
    assert_eq!(Threshold::new(12700, false, false).encode(), [0x0F, 0xE0]);
  }

  #[test]
  fn oversized_threshold_saturates() {
    assert_eq!(Threshold::new(204_700, false, true).encode(), [0xFF, 0xE1]);
    assert_eq!(Threshold::new(300_000, false, true).encode(), [0xFF, 0xE1]);
    assert_eq!(Threshold::decode(Threshold::new(u32::MAX, true, false).encode()).mg, 204_700);
  }

  #[test]
  fn each_class_writes_its_own_block() {
    let th = Threshold::new(1000, false, true);
    let [hi, lo] = th.encode();
    for (class, reg) in [
      (ActivityClass::Activity, Reg::XThreshActH),
      (ActivityClass::Activity2, Reg::XThreshAct2H),
      (ActivityClass::Inactivity, Reg::XThreshInactH),
    ] {
      let mut dev = testing::device(MockSpi::new());
      block_on(dev.set_threshold(class, th)).unwrap();
      assert_eq!(dev.spi.writes(), [(reg as u8, std::vec![hi, lo, hi, lo, hi, lo])]);
      assert_eq!(block_on(dev.get_threshold(class)).unwrap(), Threshold::new(1000, false, true));
    }
  }

  #[test]
  fn threshold_write_failure_propagates() {
    let spi = MockSpi::new().fail_on(Reg::XThreshAct2H as u8);
    let mut dev = testing::device(spi);
    let r = block_on(dev.set_threshold(ActivityClass::Activity2, Threshold::new(300, true, true)));
    assert!(matches!(r, Err(Error::Spi(_))));
    assert_eq!(dev.spi.reg(Reg::XThreshAct2L as u8), 0);
  }

  #[test]
  fn timers() {
    let mut dev = testing::device(MockSpi::new());
    block_on(dev.set_activity_time(7)).unwrap();
    block_on(dev.set_inactivity_time(0x0128)).unwrap();
    assert_eq!(dev.spi.reg(Reg::TimeAct as u8), 7);
    assert_eq!(dev.spi.reg(Reg::TimeInactH as u8), 0x01);
    assert_eq!(dev.spi.reg(Reg::TimeInactL as u8), 0x28);
    assert_eq!(block_on(dev.get_inactivity_time()).unwrap(), 0x0128);
  }
}
