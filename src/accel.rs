//! Direct (unbuffered) acceleration reads.
//!
//! Each axis is a big-endian register pair holding a left-justified 12-bit
//! two's complement value. One code is `SCALE_MICRO` µ(m/s²), about 100 mg.
//!
//! Direct reads are rejected with [`Error::Busy`] while buffered acquisition
//! is running; use [`handle_trigger`](crate::Adxl372::handle_trigger) then.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(mut accel: adxl372::Adxl372<impl embedded_hal_async::spi::SpiDevice, impl embedded_hal_async::delay::DelayNs>) {
//! use adxl372::Axis;
//!
//! let z = accel.read_axis(Axis::Z).await.unwrap();
//!
//! // All three axes in m/s²
//! let a = accel.read_accel().await.unwrap();
//! # }
//! ```

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};
use micromath::vector::Vector3d;

use super::{defs::*, Adxl372, Axis, Error};

/// Fractional part of the scale, in millionths of m/s² per code:
/// (200 g + 200 g) * 9.81 / (2^12 - 1).
pub const SCALE_MICRO: i32 = 958_241;

const MICRO: f32 = 1_000_000.0;

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Raw sign-extended 12-bit value of one axis.
  pub async fn read_axis(&mut self, axis: Axis) -> Result<i16, Error<E>> {
    if self.state.buffer_enabled {
      return Err(Error::Busy);
    }
    let raw = self.read_be16(axis_reg(axis)).await?;
    Ok((raw as i16) >> 4)
  }

  /// Scale as `(integer, micro)` m/s² per code.
  pub fn scale(&self) -> (i32, i32) {
    (0, SCALE_MICRO)
  }

  /// Raw values of all three axes from one 6-byte read.
  pub async fn read_accel_raw(&mut self) -> Result<Vector3d<i16>, Error<E>> {
    if self.state.buffer_enabled {
      return Err(Error::Busy);
    }
    let mut b = [0u8; 6];
    self.read_bytes(Reg::XDataH, &mut b).await?;
    Ok(Vector3d {
      x: i16::from_be_bytes([b[0], b[1]]) >> 4,
      y: i16::from_be_bytes([b[2], b[3]]) >> 4,
      z: i16::from_be_bytes([b[4], b[5]]) >> 4,
    })
  }

  /// Acceleration in m/s².
  pub async fn read_accel(&mut self) -> Result<Vector3d<f32>, Error<E>> {
    let raw = self.read_accel_raw().await?;
    let k = SCALE_MICRO as f32 / MICRO;
    Ok(Vector3d { x: raw.x as f32 * k, y: raw.y as f32 * k, z: raw.z as f32 * k })
  }
}

const fn axis_reg(axis: Axis) -> Reg {
  match axis {
    Axis::X => Reg::XDataH,
    Axis::Y => Reg::YDataH,
    Axis::Z => Reg::ZDataH,
  }
}
