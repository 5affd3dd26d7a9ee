//! FIFO format selection, watermark and buffered acquisition.
//!
//! The ADXL372 FIFO holds 512 16-bit slots. A sample set is one slot per
//! enabled axis, so the slots can be allotted as:
//!
//! - 170 sets of concurrent 3-axis data
//! - 256 sets of 2-axis data
//! - 512 sets of single-axis data
//!
//! FIFO settings can only be changed in standby; [`configure_fifo`] handles
//! the standby / write / full-bandwidth sequence.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(mut accel: adxl372::Adxl372<impl embedded_hal_async::spi::SpiDevice, impl embedded_hal_async::delay::DelayNs>) {
//! use adxl372::AxisMask;
//!
//! // Stream X and Z, raise FIFO full every 128 sets
//! accel.set_watermark(128);
//! accel.enable_buffer(AxisMask::new(true, false, true)).await.unwrap();
//!
//! // ... drain with `handle_trigger` on each INT1 assertion ...
//!
//! accel.disable_buffer().await.unwrap();
//! # }
//! ```
//!
//! [`configure_fifo`]: crate::Adxl372::configure_fifo

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use super::{defs::*, Adxl372, AxisMask, Error, IntMap, OpMode};

/// Smallest accepted watermark.
pub const WATERMARK_MIN: u16 = 1;
/// Largest accepted watermark (the FIFO size).
pub const WATERMARK_MAX: u16 = FIFO_SIZE;

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Store the watermark used by the next [`enable_buffer`](Self::enable_buffer).
  ///
  /// Out of range values are clamped to `1..=512`. The final value may be
  /// reduced again to fit the selected axes.
  pub fn set_watermark(&mut self, watermark: u16) {
    self.state.watermark = watermark.clamp(WATERMARK_MIN, WATERMARK_MAX);
  }

  /// Watermark in sample sets.
  pub fn fifo_watermark(&self) -> u16 {
    self.state.watermark
  }

  /// FIFO is not bypassed.
  pub fn fifo_enabled(&self) -> bool {
    self.state.fifo_mode != FifoMode::Bypassed
  }

  /// Start buffered acquisition of `axes`.
  ///
  /// Routes FIFO full to INT1, picks the FIFO format for the axis selection,
  /// fits the watermark into the FIFO and switches to streamed mode. Direct
  /// reads return [`Error::Busy`] until [`disable_buffer`](Self::disable_buffer).
  ///
  /// On failure buffered acquisition is left off, even if it was running.
  pub async fn enable_buffer(&mut self, axes: AxisMask) -> Result<(), Error<E>> {
    self.state.buffer_enabled = false;
    self.set_interrupts(IntMap::FIFO_FULL, IntMap::NONE).await?;

    let (format, set_size) = select_format(axes);
    self.state.fifo_format = format;
    self.state.fifo_set_size = set_size;
    self.state.fifo_mode = FifoMode::Streamed;

    let watermark = self.state.watermark;
    self.configure_fifo(watermark).await?;
    self.state.buffer_enabled = true;
    Ok(())
  }

  /// Stop buffered acquisition.
  ///
  /// Every step runs even if an earlier one failed; the first error is
  /// returned. Direct reads are allowed again afterwards.
  pub async fn disable_buffer(&mut self) -> Result<(), Error<E>> {
    self.state.buffer_enabled = false;
    self.disable_fifo().await
  }

  /// Silence interrupts, bypass the FIFO and push the settings to the device.
  pub async fn disable_fifo(&mut self) -> Result<(), Error<E>> {
    let irq = self.set_interrupts(IntMap::NONE, IntMap::NONE).await;
    self.state.fifo_mode = FifoMode::Bypassed;
    let fifo = self.write_fifo_settings().await;
    irq.and(fifo)
  }

  /// Fit `watermark` into the FIFO and write the FIFO settings.
  ///
  /// Uses the current FIFO mode and format. Returns the effective watermark.
  /// On failure the FIFO falls back to bypassed and both interrupt lines are
  /// cleared.
  pub async fn configure_fifo(&mut self, watermark: u16) -> Result<u16, Error<E>> {
    let effective = clamp_watermark(watermark, self.state.fifo_set_size);
    if effective != watermark {
      warn!("adxl372: watermark {=u16} reduced to {=u16}", watermark, effective);
    }
    self.state.watermark = effective;

    if let Err(e) = self.write_fifo_settings().await {
      self.state.fifo_mode = FifoMode::Bypassed;
      if self.set_interrupts(IntMap::NONE, IntMap::NONE).await.is_err() {
        error!("adxl372: error clearing interrupts after fifo failure");
      }
      return Err(e);
    }
    Ok(effective)
  }

  /// Standby, `FIFO_SAMPLES` + `FIFO_CTL` in one write, full bandwidth.
  async fn write_fifo_settings(&mut self) -> Result<(), Error<E>> {
    self.set_mode(OpMode::Standby).await?;

    let wm = self.state.watermark;
    let ctl = FifoCtl { samples_msb: wm > 0xFF, mode: self.state.fifo_mode, format: self.state.fifo_format };
    let ctl: [u8; 1] = ctl.try_into().map_err(|_| Error::Data)?;

    if let Err(e) = self.write_bytes(Reg::FifoSamples, &[(wm & 0xFF) as u8, ctl[0]]).await {
      error!("adxl372: error configuring fifo");
      return Err(e);
    }

    self.set_mode(OpMode::FullBandwidthMeasurement).await
  }
}

/// FIFO format and set size for an axis selection.
///
/// This is the device's fixed encoding. No axis selected maps to X, and all
/// three axes map to the peak-detect format.
pub const fn select_format(axes: AxisMask) -> (FifoFormat, u8) {
  match (axes.x, axes.y, axes.z) {
    (_, false, false) => (FifoFormat::X, 1),
    (false, true, false) => (FifoFormat::Y, 1),
    (true, true, false) => (FifoFormat::Xy, 2),
    (false, false, true) => (FifoFormat::Z, 1),
    (true, false, true) => (FifoFormat::Xz, 2),
    (false, true, true) => (FifoFormat::Yz, 2),
    (true, true, true) => (FifoFormat::XyzPeak, 3),
  }
}

/// Clamp a requested watermark to `1..=512 / set_size`.
pub const fn clamp_watermark(request: u16, set_size: u8) -> u16 {
  let size = if set_size == 0 { 1 } else { set_size as u16 };
  let cap = FIFO_SIZE / size;
  if request < WATERMARK_MIN {
    WATERMARK_MIN
  } else if request > cap {
    cap
  } else {
    request
  }
}

/// Sign-extended 12-bit value of one big-endian FIFO slot.
///
/// Bits 15:4 hold the sample; bit 0 marks the first slot of a set.
#[inline]
pub const fn fifo_sample(slot: [u8; 2]) -> i16 {
  i16::from_be_bytes(slot) >> 4
}

/// First slot of a sample set.
#[inline]
pub const fn is_series_start(slot: [u8; 2]) -> bool {
  slot[1] & 0x01 != 0
}

/// FIFO operating mode (`FIFO_CTL[2:1]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
  /// FIFO disabled.
  #[default]
  Bypassed = 0x0,
  /// Oldest data is overwritten when full.
  Streamed = 0x1,
  /// Captures samples around an activity event.
  Triggered = 0x2,
  /// Stops collecting when full.
  OldSaved = 0x3,
}

impl From<FifoMode> for u8 {
  fn from(value: FifoMode) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for FifoMode {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x0 => Ok(FifoMode::Bypassed),
      0x1 => Ok(FifoMode::Streamed),
      0x2 => Ok(FifoMode::Triggered),
      0x3 => Ok(FifoMode::OldSaved),
      _ => Err(()),
    }
  }
}

/// Axes stored per sample set (`FIFO_CTL[5:3]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoFormat {
  #[default]
  Xyz = 0x0,
  X = 0x1,
  Y = 0x2,
  Xy = 0x3,
  Z = 0x4,
  Xz = 0x5,
  Yz = 0x6,
  /// Peak acceleration of X, Y and Z per event.
  XyzPeak = 0x7,
}

impl FifoFormat {
  /// Axes present in each set.
  pub const fn axes(self) -> AxisMask {
    match self {
      FifoFormat::Xyz | FifoFormat::XyzPeak => AxisMask::XYZ,
      FifoFormat::X => AxisMask::new(true, false, false),
      FifoFormat::Y => AxisMask::new(false, true, false),
      FifoFormat::Xy => AxisMask::new(true, true, false),
      FifoFormat::Z => AxisMask::new(false, false, true),
      FifoFormat::Xz => AxisMask::new(true, false, true),
      FifoFormat::Yz => AxisMask::new(false, true, true),
    }
  }
}

impl From<FifoFormat> for u8 {
  fn from(value: FifoFormat) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for FifoFormat {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x0 => Ok(FifoFormat::Xyz),
      0x1 => Ok(FifoFormat::X),
      0x2 => Ok(FifoFormat::Y),
      0x3 => Ok(FifoFormat::Xy),
      0x4 => Ok(FifoFormat::Z),
      0x5 => Ok(FifoFormat::Xz),
      0x6 => Ok(FifoFormat::Yz),
      0x7 => Ok(FifoFormat::XyzPeak),
      _ => Err(()),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[packbits::pack(bytes = 1)]
struct FifoCtl {
  /// Bit 8 of the watermark.
  #[bits(1)]
  pub samples_msb: bool,
  #[bits(2)]
  pub mode: FifoMode,
  #[bits(3)]
  pub format: FifoFormat,
}
