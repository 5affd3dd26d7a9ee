#![no_std]
#![doc = include_str!("../README.md")]
//!
//! ## Design Principles
//!
//! - **Type-safe**: Register fields are tagged enums and packed structs
//! - **Async-first**: Built on `embedded-hal-async` SPI traits
//! - **Stateful**: The driver mirrors mode, rate and FIFO settings so the
//!   acquisition path never has to read them back
//! - **Lossless draining**: FIFO reads always leave one sample set behind so
//!   axis alignment survives a concurrent device write
//!
//! ## Module Organization
//!
//! - [`accel`]: Direct (unbuffered) axis reads and scale
//! - [`threshold`]: Activity / inactivity thresholds and timers
//! - [`mode`]: Operating mode, output data rate, bandwidth and filters
//! - [`fifo`]: FIFO format selection, watermark and buffered mode
//! - [`status`]: Status and FIFO entry count decoding
//! - [`acquisition`]: Triggered FIFO drain and sample delivery
//! - [`interrupt`]: Interrupt line mapping
//! - [`io`]: Raw register access for debugging
//!
//! ## Basic Usage
//!
//! ```no_run
//! # async fn example<S: embedded_hal_async::spi::SpiDevice, D: embedded_hal_async::delay::DelayNs>(spi: S, delay: D) -> Result<(), adxl372::Error<S::Error>> {
//! use adxl372::{Adxl372, Axis};
//!
//! // Verify the chip and bring it up in full bandwidth measurement mode
//! let mut accel: Adxl372<S, D> = Adxl372::open(spi, delay).await?;
//!
//! let x = accel.read_axis(Axis::X).await?;
//! let (_, micro) = accel.scale();
//! let x_ms2 = x as f32 * micro as f32 / 1_000_000.0;
//!
//! let (spi, delay) = accel.close().await?;
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod accel;
pub mod acquisition;
mod defs;
#[cfg(feature = "events")]
mod events;
pub mod fifo;
pub mod interrupt;
pub mod io;
pub mod mode;
pub(crate) mod rw;
pub mod status;
pub mod threshold;
mod types;

#[cfg(test)]
mod testing;

use defs::*;
use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

pub use accel::SCALE_MICRO;
pub use acquisition::{SampleSink, Trigger};
#[cfg(feature = "events")]
pub use events::*;
pub use fifo::{FifoFormat, FifoMode};
pub use interrupt::IntMap;
pub use rw::{encode_read, encode_write, masked_update};
pub use status::{DeviceStatus, Status1};
pub use threshold::{ActivityClass, Threshold};
pub use types::*;

/// Driver error type.
///
/// This error type wraps the underlying SPI error and adds ADXL372-specific
/// error conditions.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
  /// SPI communication error
  Spi(E),
  /// Device ID mismatch (expected 0xAD), carries the value read
  DeviceNotRecognized(u8),
  /// Direct read attempted while buffered acquisition is active
  Busy,
  /// Raw register address outside the 7-bit register space
  InvalidRegister(u8),
  /// Register contents could not be decoded
  Data,
}

/// ADXL372 device driver instance.
///
/// Owns the SPI device and delay provider together with the [`DeviceState`]
/// mirror. Every operation takes `&mut self`, which serializes register
/// access.
///
/// # Type Parameters
///
/// - `S`: SPI device (must implement `embedded_hal_async::spi::SpiDevice`)
/// - `D`: Delay provider (must implement `embedded_hal_async::delay::DelayNs`)
/// - `W`: Interrupt pin wait implementation (only used with `events` feature)
pub struct Adxl372<S, D: DelayNs, W = ()> {
  spi: S,
  delay: D,
  state: DeviceState,
  #[cfg(feature = "events")]
  int_pin: W,
  #[cfg(not(feature = "events"))]
  _wait: core::marker::PhantomData<W>,
}

// Constructor(s)
#[cfg(feature = "events")]
impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
  W: embedded_hal_async::digital::Wait,
{
  /// Create a driver instance with interrupt pin support. No bus traffic.
  ///
  /// `int_pin` is the host GPIO wired to the device's INT1 output.
  pub fn new(spi: S, delay: D, int_pin: W) -> Self {
    Self { spi, delay, state: DeviceState::default(), int_pin }
  }

  /// Create the driver, verify the device ID and run [`init`](Self::init).
  pub async fn open(spi: S, delay: D, int_pin: W) -> Result<Self, Error<E>> {
    let mut dev = Self::new(spi, delay, int_pin);
    dev.init().await?;
    Ok(dev)
  }
}

#[cfg(not(feature = "events"))]
impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Create a driver instance. No bus traffic.
  pub fn new(spi: S, delay: D) -> Self {
    Self { spi, delay, state: DeviceState::default(), _wait: core::marker::PhantomData }
  }

  /// Create the driver, verify the device ID and run [`init`](Self::init).
  pub async fn open(spi: S, delay: D) -> Result<Self, Error<E>> {
    let mut dev = Self::new(spi, delay);
    dev.init().await?;
    Ok(dev)
  }
}

// Common functionality (independent of `events`)
impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Bring the device up.
  ///
  /// Sequence:
  /// - Check `DEVID_AD` (no register is written on mismatch).
  /// - Standby.
  /// - Activity and inactivity thresholds at 500 mg, referenced, enabled.
  /// - Looped activity processing.
  /// - 6400 Hz ODR with 3200 Hz bandwidth.
  /// - Activity timer 1, inactivity timer low byte 0x28.
  /// - Full bandwidth measurement.
  ///
  /// The first failing step aborts; earlier steps are not rolled back.
  pub async fn init(&mut self) -> Result<(), Error<E>> {
    let id = self.read_u8(Reg::DevId).await?;
    if id != ADXL372_DEVID {
      error!("adxl372: invalid chip id {=u8:x}", id);
      return Err(Error::DeviceNotRecognized(id));
    }

    self.set_mode(OpMode::Standby).await?;

    let th = Threshold::new(DEFAULT_THRESHOLD_MG, true, true);
    self.set_threshold(ActivityClass::Activity, th).await?;
    self.set_threshold(ActivityClass::Inactivity, th).await?;

    self.set_act_proc_mode(ActProcMode::Looped).await?;

    self.set_odr(OutputDataRate::Hz6400).await?;
    self.set_bandwidth(OutputDataRate::Hz6400.max_bandwidth()).await?;

    self.set_activity_time(DEFAULT_TIME_ACT).await?;
    self.write_u8(Reg::TimeInactL, DEFAULT_TIME_INACT_L).await?;

    self.set_mode(OpMode::FullBandwidthMeasurement).await
  }

  /// Quiesce the device and hand back the bus and delay.
  ///
  /// Clears both interrupt maps, writes the FIFO back to bypassed and
  /// returns to standby. On error the driver (and the bus it owns) is dropped.
  pub async fn close(mut self) -> Result<(S, D), Error<E>> {
    self.disable_fifo().await?;
    self.set_mode(OpMode::Standby).await?;
    Ok(self.release())
  }

  /// Give back the bus and delay without touching the device.
  pub fn release(self) -> (S, D) {
    (self.spi, self.delay)
  }

  /// Read the identification block (`DEVID_AD`, `DEVID_MST`, `PARTID`, `REVID`).
  pub async fn get_id(&mut self) -> Result<DeviceId, Error<E>> {
    let mut b = [0u8; 4];
    self.read_bytes(Reg::DevId, &mut b).await?;
    Ok(DeviceId { devid: b[0], devid_mst: b[1], partid: b[2], revid: b[3] })
  }

  /// Reset every register to its power-on value.
  ///
  /// The driver state mirror is reset as well. Settings must be applied again
  /// (e.g. with [`init`](Self::init)) afterwards.
  pub async fn soft_reset(&mut self) -> Result<(), Error<E>> {
    self.write_u8(Reg::Reset, RESET_CODE).await?;
    self.delay.delay_us(SOFT_RESET_DELAY_US).await;
    self.state = DeviceState::default();
    Ok(())
  }

  /// Current driver-side view of the device configuration.
  pub fn state(&self) -> &DeviceState {
    &self.state
  }
}

/// Contents of the four identification registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId {
  /// Analog Devices ID, `0xAD`.
  pub devid: u8,
  /// MEMS ID, `0x1D`.
  pub devid_mst: u8,
  /// Part ID, `0xFA`.
  pub partid: u8,
  pub revid: u8,
}

impl DeviceId {
  pub fn is_adxl372(&self) -> bool {
    self.devid == ADXL372_DEVID && self.partid == ADXL372_PARTID
  }
}

#[cfg(test)]
mod tests {
  use futures::executor::block_on;

  use super::*;
  use crate::testing::{self, MockSpi};

  #[test]
  fn open_runs_bring_up_in_order() {
    let dev = block_on(testing::open(testing::adxl372())).unwrap();

    let writes = dev.spi.writes();
    let expected = [
      (Reg::PowerCtl as u8, std::vec![0x00]),
      (Reg::XThreshActH as u8, std::vec![0x00, 0xA3, 0x00, 0xA3, 0x00, 0xA3]),
      (Reg::XThreshInactH as u8, std::vec![0x00, 0xA3, 0x00, 0xA3, 0x00, 0xA3]),
      (Reg::Measure as u8, std::vec![0x20]),
      (Reg::Timing as u8, std::vec![0x80]),
      (Reg::Measure as u8, std::vec![0x24]),
      (Reg::TimeAct as u8, std::vec![0x01]),
      (Reg::TimeInactL as u8, std::vec![0x28]),
      (Reg::PowerCtl as u8, std::vec![0x03]),
    ];
    assert_eq!(writes, expected);

    let st = dev.state();
    assert_eq!(st.op_mode, OpMode::FullBandwidthMeasurement);
    assert_eq!(st.odr, OutputDataRate::Hz6400);
    assert_eq!(st.bandwidth, Bandwidth::Hz3200);
    assert_eq!(st.act_proc_mode, ActProcMode::Looped);
  }

  #[test]
  fn wrong_identity_aborts_before_any_write() {
    let spi = MockSpi::new().with_reg(Reg::DevId as u8, 0x42);
    let mut dev = testing::device(spi);

    let r = block_on(dev.init());
    assert!(matches!(r, Err(Error::DeviceNotRecognized(0x42))));
    assert!(dev.spi.writes().is_empty());
    assert_eq!(dev.spi.reads(), [(Reg::DevId as u8, 1)]);
  }

  #[test]
  fn failing_step_aborts_bring_up_without_rollback() {
    // Fail on the activity processing update (MEASURE read).
    let spi = testing::adxl372().fail_on(Reg::Measure as u8);
    let mut dev = testing::device(spi);

    assert!(matches!(block_on(dev.init()), Err(Error::Spi(_))));
    // Standby went through and stays recorded.
    assert_eq!(dev.state().op_mode, OpMode::Standby);
    assert_eq!(dev.state().act_proc_mode, ActProcMode::Default);
    assert_eq!(dev.state().odr, OutputDataRate::Hz400);
  }

  #[test]
  fn close_disables_interrupts_and_enters_standby() {
    let mut dev = block_on(testing::open(testing::adxl372())).unwrap();
    block_on(dev.set_trigger_state(true)).unwrap();

    let (spi, _delay) = block_on(dev.close()).unwrap();
    assert_eq!(spi.reg(Reg::Int1Map as u8), 0);
    assert_eq!(spi.reg(Reg::Int2Map as u8), 0);
    assert_eq!(spi.reg(Reg::PowerCtl as u8) & POWER_CTL_MODE_MSK, OpMode::Standby as u8);
  }

  #[test]
  fn close_bypasses_fifo_on_device() {
    let mut dev = block_on(testing::open(testing::adxl372())).unwrap();
    dev.set_watermark(32);
    block_on(dev.enable_buffer(AxisMask::XYZ)).unwrap();
    assert_ne!(dev.spi.reg(Reg::FifoCtl as u8) & 0b110, 0);

    let (spi, _delay) = block_on(dev.close()).unwrap();
    assert_eq!(spi.reg(Reg::FifoCtl as u8) & 0b110, 0);
    assert_eq!(spi.reg(Reg::Int1Map as u8), 0);
    assert_eq!(spi.reg(Reg::PowerCtl as u8) & POWER_CTL_MODE_MSK, OpMode::Standby as u8);
  }

  #[test]
  fn get_id_reads_identification_block() {
    let mut dev = testing::device(testing::adxl372());
    let id = block_on(dev.get_id()).unwrap();
    assert!(id.is_adxl372());
    assert_eq!(id.devid_mst, 0x1D);
    assert_eq!(id.revid, 0x03);
    assert_eq!(dev.spi.reads(), [(Reg::DevId as u8, 4)]);
  }

  #[test]
  fn soft_reset_writes_code_and_waits() {
    let mut dev = block_on(testing::open(testing::adxl372())).unwrap();
    dev.spi.clear_log();

    block_on(dev.soft_reset()).unwrap();
    assert_eq!(dev.spi.writes(), [(Reg::Reset as u8, std::vec![RESET_CODE])]);
    assert_eq!(dev.delay.calls, 1);
    assert_eq!(dev.delay.total_ns, 1_000_000);
    assert_eq!(*dev.state(), DeviceState::default());
  }
}
