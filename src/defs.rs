#![allow(dead_code)]

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reg {
  DevId = 0x00,
  DevIdMst = 0x01,
  PartId = 0x02,
  RevId = 0x03,
  Status1 = 0x04,
  Status2 = 0x05,
  FifoEntries2 = 0x06,
  FifoEntries1 = 0x07,
  XDataH = 0x08,
  XDataL = 0x09,
  YDataH = 0x0A,
  YDataL = 0x0B,
  ZDataH = 0x0C,
  ZDataL = 0x0D,
  XMaxPeakH = 0x15,
  XMaxPeakL = 0x16,
  YMaxPeakH = 0x17,
  YMaxPeakL = 0x18,
  ZMaxPeakH = 0x19,
  ZMaxPeakL = 0x1A,
  OffsetX = 0x20,
  OffsetY = 0x21,
  OffsetZ = 0x22,
  XThreshActH = 0x23,
  XThreshActL = 0x24,
  YThreshActH = 0x25,
  YThreshActL = 0x26,
  ZThreshActH = 0x27,
  ZThreshActL = 0x28,
  TimeAct = 0x29,
  XThreshInactH = 0x2A,
  XThreshInactL = 0x2B,
  YThreshInactH = 0x2C,
  YThreshInactL = 0x2D,
  ZThreshInactH = 0x2E,
  ZThreshInactL = 0x2F,
  TimeInactH = 0x30,
  TimeInactL = 0x31,
  XThreshAct2H = 0x32,
  XThreshAct2L = 0x33,
  YThreshAct2H = 0x34,
  YThreshAct2L = 0x35,
  ZThreshAct2H = 0x36,
  ZThreshAct2L = 0x37,
  Hpf = 0x38,
  FifoSamples = 0x39,
  FifoCtl = 0x3A,
  Int1Map = 0x3B,
  Int2Map = 0x3C,
  Timing = 0x3D,
  Measure = 0x3E,
  PowerCtl = 0x3F,
  SelfTest = 0x40,
  Reset = 0x41,
  FifoData = 0x42,
}

impl From<Reg> for u8 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u8
  }
}

// POWER_CTL
pub(crate) const POWER_CTL_INSTANT_ON_TH_MSK: u8 = 1 << 5;
pub(crate) const POWER_CTL_FIL_SETTLE_MSK: u8 = 1 << 4;
pub(crate) const POWER_CTL_LPF_DIS_MSK: u8 = 1 << 3;
pub(crate) const POWER_CTL_HPF_DIS_MSK: u8 = 1 << 2;
pub(crate) const POWER_CTL_MODE_MSK: u8 = 0b11;

// MEASURE
pub(crate) const MEASURE_AUTOSLEEP_MSK: u8 = 1 << 6;
pub(crate) const MEASURE_LINKLOOP_MSK: u8 = 0b11 << 4;
pub(crate) const MEASURE_LINKLOOP_SHIFT: u8 = 4;
pub(crate) const MEASURE_LOW_NOISE_MSK: u8 = 1 << 3;
pub(crate) const MEASURE_BANDWIDTH_MSK: u8 = 0b111;

// TIMING
pub(crate) const TIMING_ODR_MSK: u8 = 0b111 << 5;
pub(crate) const TIMING_ODR_SHIFT: u8 = 5;
pub(crate) const TIMING_WAKE_UP_RATE_MSK: u8 = 0b111 << 2;
pub(crate) const TIMING_WAKE_UP_RATE_SHIFT: u8 = 2;
pub(crate) const TIMING_EXT_CLK_MSK: u8 = 1 << 1;
pub(crate) const TIMING_EXT_SYNC_MSK: u8 = 1 << 0;

// Identity
pub(crate) const ADXL372_DEVID: u8 = 0xAD;
pub(crate) const ADXL372_PARTID: u8 = 0xFA;

pub(crate) const RESET_CODE: u8 = 0x52;
pub(crate) const SOFT_RESET_DELAY_US: u32 = 1000;

/// Total FIFO capacity in 16-bit slots.
pub(crate) const FIFO_SIZE: u16 = 512;
pub(crate) const FIFO_BYTES: usize = FIFO_SIZE as usize * 2;

// Bring-up defaults
pub(crate) const DEFAULT_THRESHOLD_MG: u32 = 500;
pub(crate) const DEFAULT_TIME_ACT: u8 = 1;
pub(crate) const DEFAULT_TIME_INACT_L: u8 = 0x28;
