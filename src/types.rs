use crate::fifo::{FifoFormat, FifoMode};
use crate::interrupt::IntMap;

/// Operating mode held in `POWER_CTL[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpMode {
  #[default]
  Standby = 0x0,
  WakeUp = 0x1,
  InstantOn = 0x2,
  FullBandwidthMeasurement = 0x3,
}

impl From<OpMode> for u8 {
  fn from(value: OpMode) -> Self {
    value as u8
  }
}

impl From<u8> for OpMode {
  /// Total over the 2-bit field; higher bits are ignored.
  fn from(value: u8) -> Self {
    match value & 0x3 {
      0x0 => OpMode::Standby,
      0x1 => OpMode::WakeUp,
      0x2 => OpMode::InstantOn,
      _ => OpMode::FullBandwidthMeasurement,
    }
  }
}

/// Output data rates, `TIMING[7:5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputDataRate {
  #[default]
  Hz400 = 0x0,
  Hz800 = 0x1,
  Hz1600 = 0x2,
  Hz3200 = 0x3,
  Hz6400 = 0x4,
}

impl OutputDataRate {
  pub const fn hz(self) -> u32 {
    match self {
      OutputDataRate::Hz400 => 400,
      OutputDataRate::Hz800 => 800,
      OutputDataRate::Hz1600 => 1600,
      OutputDataRate::Hz3200 => 3200,
      OutputDataRate::Hz6400 => 6400,
    }
  }

  /// Widest bandwidth the rate supports (half the ODR).
  pub const fn max_bandwidth(self) -> Bandwidth {
    match self {
      OutputDataRate::Hz400 => Bandwidth::Hz200,
      OutputDataRate::Hz800 => Bandwidth::Hz400,
      OutputDataRate::Hz1600 => Bandwidth::Hz800,
      OutputDataRate::Hz3200 => Bandwidth::Hz1600,
      OutputDataRate::Hz6400 => Bandwidth::Hz3200,
    }
  }
}

impl From<OutputDataRate> for u8 {
  fn from(odr: OutputDataRate) -> Self {
    odr as u8
  }
}

impl TryFrom<u8> for OutputDataRate {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x0 => Ok(OutputDataRate::Hz400),
      0x1 => Ok(OutputDataRate::Hz800),
      0x2 => Ok(OutputDataRate::Hz1600),
      0x3 => Ok(OutputDataRate::Hz3200),
      0x4 => Ok(OutputDataRate::Hz6400),
      _ => Err(()),
    }
  }
}

/// Anti-aliasing filter bandwidth, `MEASURE[2:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
  #[default]
  Hz200 = 0x0,
  Hz400 = 0x1,
  Hz800 = 0x2,
  Hz1600 = 0x3,
  Hz3200 = 0x4,
}

impl Bandwidth {
  pub const fn hz(self) -> u32 {
    match self {
      Bandwidth::Hz200 => 200,
      Bandwidth::Hz400 => 400,
      Bandwidth::Hz800 => 800,
      Bandwidth::Hz1600 => 1600,
      Bandwidth::Hz3200 => 3200,
    }
  }
}

impl From<Bandwidth> for u8 {
  fn from(value: Bandwidth) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for Bandwidth {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x0 => Ok(Bandwidth::Hz200),
      0x1 => Ok(Bandwidth::Hz400),
      0x2 => Ok(Bandwidth::Hz800),
      0x3 => Ok(Bandwidth::Hz1600),
      0x4 => Ok(Bandwidth::Hz3200),
      _ => Err(()),
    }
  }
}

/// Activity/inactivity processing, `MEASURE[5:4]`.
///
/// - `Default`: activity and inactivity events are independent.
/// - `Linked`: activity must be detected before inactivity is armed, and the
///   reverse; the host clears interrupts.
/// - `Looped`: like linked, but the device re-arms itself without host action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActProcMode {
  #[default]
  Default = 0x0,
  Linked = 0x1,
  Looped = 0x2,
}

impl From<ActProcMode> for u8 {
  fn from(value: ActProcMode) -> Self {
    value as u8
  }
}

impl TryFrom<u8> for ActProcMode {
  type Error = ();

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      0x0 => Ok(ActProcMode::Default),
      0x1 => Ok(ActProcMode::Linked),
      // 0b11 also selects looped processing on the device
      0x2 | 0x3 => Ok(ActProcMode::Looped),
      _ => Err(()),
    }
  }
}

/// Wake-up timer period in wake-up mode, `TIMING[4:2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeUpRate {
  #[default]
  Ms52 = 0x0,
  Ms104 = 0x1,
  Ms208 = 0x2,
  Ms512 = 0x3,
  Ms2048 = 0x4,
  Ms4096 = 0x5,
  Ms8192 = 0x6,
  Ms24576 = 0x7,
}

impl From<WakeUpRate> for u8 {
  fn from(value: WakeUpRate) -> Self {
    value as u8
  }
}

impl From<u8> for WakeUpRate {
  /// Total over the 3-bit field.
  fn from(value: u8) -> Self {
    match value & 0x7 {
      0x0 => WakeUpRate::Ms52,
      0x1 => WakeUpRate::Ms104,
      0x2 => WakeUpRate::Ms208,
      0x3 => WakeUpRate::Ms512,
      0x4 => WakeUpRate::Ms2048,
      0x5 => WakeUpRate::Ms4096,
      0x6 => WakeUpRate::Ms8192,
      _ => WakeUpRate::Ms24576,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
  X,
  Y,
  Z,
}

impl Axis {
  /// Bit index of the axis in an [`AxisMask`].
  pub const fn index(self) -> u8 {
    match self {
      Axis::X => 0,
      Axis::Y => 1,
      Axis::Z => 2,
    }
  }
}

/// Set of axes selected for buffered acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMask {
  pub x: bool,
  pub y: bool,
  pub z: bool,
}

impl AxisMask {
  pub const NONE: Self = Self { x: false, y: false, z: false };
  pub const XYZ: Self = Self { x: true, y: true, z: true };

  pub const fn new(x: bool, y: bool, z: bool) -> Self {
    Self { x, y, z }
  }

  /// Bit 0 = X, bit 1 = Y, bit 2 = Z; other bits are ignored.
  pub const fn from_bits(bits: u8) -> Self {
    Self { x: bits & 0b001 != 0, y: bits & 0b010 != 0, z: bits & 0b100 != 0 }
  }

  pub const fn bits(self) -> u8 {
    (self.x as u8) | (self.y as u8) << 1 | (self.z as u8) << 2
  }

  pub const fn contains(self, axis: Axis) -> bool {
    match axis {
      Axis::X => self.x,
      Axis::Y => self.y,
      Axis::Z => self.z,
    }
  }

  pub const fn count(self) -> u8 {
    self.x as u8 + self.y as u8 + self.z as u8
  }
}

/// Driver-side mirror of the device configuration.
///
/// Starts at the device's power-on values and is only updated after the
/// corresponding register write succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
  pub op_mode: OpMode,
  pub odr: OutputDataRate,
  pub bandwidth: Bandwidth,
  pub act_proc_mode: ActProcMode,
  pub fifo_mode: FifoMode,
  pub fifo_format: FifoFormat,
  /// Axes per FIFO sample set, derived from the axis selection.
  pub fifo_set_size: u8,
  /// Sample sets per FIFO-full event. Zero until a watermark is requested.
  pub watermark: u16,
  pub int1_mask: IntMap,
  pub int2_mask: IntMap,
  /// Buffered acquisition is running; direct reads are rejected.
  pub buffer_enabled: bool,
}

impl Default for DeviceState {
  fn default() -> Self {
    Self {
      op_mode: OpMode::Standby,
      odr: OutputDataRate::Hz400,
      bandwidth: Bandwidth::Hz200,
      act_proc_mode: ActProcMode::Default,
      fifo_mode: FifoMode::Bypassed,
      fifo_format: FifoFormat::Xyz,
      fifo_set_size: 3,
      watermark: 0,
      int1_mask: IntMap::NONE,
      int2_mask: IntMap::NONE,
      buffer_enabled: false,
    }
  }
}
