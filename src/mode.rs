//! Operating mode, output data rate, bandwidth and filter settings.
//!
//! All settings here live in `POWER_CTL`, `MEASURE` and `TIMING` and are
//! applied as masked read-modify-write updates. The driver mirror in
//! [`DeviceState`](crate::DeviceState) is only touched after the write
//! succeeded.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(mut accel: adxl372::Adxl372<impl embedded_hal_async::spi::SpiDevice, impl embedded_hal_async::delay::DelayNs>) {
//! use adxl372::{Bandwidth, OpMode, OutputDataRate};
//!
//! accel.set_mode(OpMode::Standby).await.unwrap();
//! accel.set_odr(OutputDataRate::Hz1600).await.unwrap();
//! accel.set_bandwidth(Bandwidth::Hz800).await.unwrap();
//! accel.set_mode(OpMode::FullBandwidthMeasurement).await.unwrap();
//! # }
//! ```

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use super::{defs::*, ActProcMode, Adxl372, Bandwidth, Error, OpMode, OutputDataRate, WakeUpRate};

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Switch the operating mode (`POWER_CTL[1:0]`).
  ///
  /// Any mode can be entered from any other. FIFO settings may only be
  /// changed in [`OpMode::Standby`].
  pub async fn set_mode(&mut self, mode: OpMode) -> Result<(), Error<E>> {
    if let Err(e) = self.write_mask(Reg::PowerCtl, POWER_CTL_MODE_MSK, mode.into()).await {
      error!("adxl372: error writing mode of operation");
      return Err(e);
    }

    debug!("adxl372: mode {}", mode);
    self.state.op_mode = mode;
    Ok(())
  }

  /// Set the output data rate (`TIMING[7:5]`).
  pub async fn set_odr(&mut self, odr: OutputDataRate) -> Result<(), Error<E>> {
    let v = u8::from(odr) << TIMING_ODR_SHIFT;
    if let Err(e) = self.write_mask(Reg::Timing, TIMING_ODR_MSK, v).await {
      error!("adxl372: error setting output data rate");
      return Err(e);
    }

    self.state.odr = odr;
    Ok(())
  }

  /// Set the anti-aliasing filter bandwidth (`MEASURE[2:0]`).
  ///
  /// Keep it at or below half the ODR, see [`OutputDataRate::max_bandwidth`].
  pub async fn set_bandwidth(&mut self, bw: Bandwidth) -> Result<(), Error<E>> {
    if let Err(e) = self.write_mask(Reg::Measure, MEASURE_BANDWIDTH_MSK, bw.into()).await {
      error!("adxl372: error setting bandwidth");
      return Err(e);
    }

    self.state.bandwidth = bw;
    Ok(())
  }

  /// Select how activity and inactivity detection interact (`MEASURE[5:4]`).
  pub async fn set_act_proc_mode(&mut self, mode: ActProcMode) -> Result<(), Error<E>> {
    let v = u8::from(mode) << MEASURE_LINKLOOP_SHIFT;
    if let Err(e) = self.write_mask(Reg::Measure, MEASURE_LINKLOOP_MSK, v).await {
      error!("adxl372: error writing activity processing mode");
      return Err(e);
    }

    self.state.act_proc_mode = mode;
    Ok(())
  }

  /// Wake-up timer period used in [`OpMode::WakeUp`] (`TIMING[4:2]`).
  pub async fn set_wakeup_rate(&mut self, rate: WakeUpRate) -> Result<(), Error<E>> {
    let v = u8::from(rate) << TIMING_WAKE_UP_RATE_SHIFT;
    self.write_mask(Reg::Timing, TIMING_WAKE_UP_RATE_MSK, v).await
  }

  /// Clock the device from an external source (`TIMING[1]`).
  pub async fn set_ext_clk(&mut self, enable: bool) -> Result<(), Error<E>> {
    self.write_mask(Reg::Timing, TIMING_EXT_CLK_MSK, flag(TIMING_EXT_CLK_MSK, enable)).await
  }

  /// Trigger sampling from the external sync input (`TIMING[0]`).
  pub async fn set_ext_sync(&mut self, enable: bool) -> Result<(), Error<E>> {
    self.write_mask(Reg::Timing, TIMING_EXT_SYNC_MSK, flag(TIMING_EXT_SYNC_MSK, enable)).await
  }

  /// Enter wake-up mode automatically after inactivity (`MEASURE[6]`).
  /// Only effective with linked or looped processing.
  pub async fn set_autosleep(&mut self, enable: bool) -> Result<(), Error<E>> {
    self.write_mask(Reg::Measure, MEASURE_AUTOSLEEP_MSK, flag(MEASURE_AUTOSLEEP_MSK, enable)).await
  }

  /// Low noise operation (`MEASURE[3]`).
  pub async fn set_low_noise(&mut self, enable: bool) -> Result<(), Error<E>> {
    self.write_mask(Reg::Measure, MEASURE_LOW_NOISE_MSK, flag(MEASURE_LOW_NOISE_MSK, enable)).await
  }

  /// Instant-on wake threshold (`POWER_CTL[5]`).
  pub async fn set_instant_on_threshold(&mut self, th: InstantOnThreshold) -> Result<(), Error<E>> {
    let high = th == InstantOnThreshold::High;
    self.write_mask(Reg::PowerCtl, POWER_CTL_INSTANT_ON_TH_MSK, flag(POWER_CTL_INSTANT_ON_TH_MSK, high)).await
  }

  /// Filter settling period after a mode change (`POWER_CTL[4]`).
  pub async fn set_filter_settle(&mut self, settle: FilterSettle) -> Result<(), Error<E>> {
    let short = settle == FilterSettle::Ms16;
    self.write_mask(Reg::PowerCtl, POWER_CTL_FIL_SETTLE_MSK, flag(POWER_CTL_FIL_SETTLE_MSK, short)).await
  }

  /// Bypass the low-pass anti-aliasing filter (`POWER_CTL[3]`).
  pub async fn set_lpf_disabled(&mut self, disabled: bool) -> Result<(), Error<E>> {
    self.write_mask(Reg::PowerCtl, POWER_CTL_LPF_DIS_MSK, flag(POWER_CTL_LPF_DIS_MSK, disabled)).await
  }

  /// Bypass the high-pass filter (`POWER_CTL[2]`).
  pub async fn set_hpf_disabled(&mut self, disabled: bool) -> Result<(), Error<E>> {
    self.write_mask(Reg::PowerCtl, POWER_CTL_HPF_DIS_MSK, flag(POWER_CTL_HPF_DIS_MSK, disabled)).await
  }
}

#[inline]
const fn flag(mask: u8, on: bool) -> u8 {
  if on { mask } else { 0 }
}

/// Instant-on wake threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InstantOnThreshold {
  #[default]
  Low,
  High,
}

/// Filter settling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterSettle {
  #[default]
  Ms370,
  Ms16,
}
