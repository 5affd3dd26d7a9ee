//! Triggered FIFO drain.
//!
//! One call to [`handle_trigger`](crate::Adxl372::handle_trigger) per
//! interrupt assertion:
//!
//! 1. Read the status burst.
//! 2. If the FIFO is enabled and full, read all but the newest sample set
//!    from `FIFO_DATA`, rounded down to whole sets.
//! 3. Hand each set to the [`SampleSink`], oldest first, with a timestamp
//!    taken per set.
//! 4. Tell the [`Trigger`] the event was handled.
//!
//! One set is always left behind: the device may be writing it while the
//! host drains, and reading it partially would shift the axis order of every
//! later set.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example(mut accel: adxl372::Adxl372<impl embedded_hal_async::spi::SpiDevice, impl embedded_hal_async::delay::DelayNs>) {
//! use adxl372::SampleSink;
//!
//! struct Printer(u64);
//!
//! impl SampleSink for Printer {
//!   fn timestamp(&mut self) -> u64 {
//!     self.0 += 1;
//!     self.0
//!   }
//!
//!   fn deliver(&mut self, set: &[u8], timestamp: u64) {
//!     let _ = (set, timestamp);
//!   }
//! }
//!
//! let mut sink = Printer(0);
//! let mut irq_done = || {};
//! let sets = accel.handle_trigger(&mut irq_done, &mut sink).await.unwrap();
//! # }
//! ```

use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use super::{defs::*, Adxl372, Error, FifoMode};

/// Consumer of drained sample sets.
pub trait SampleSink {
  /// Timestamp for the next set.
  fn timestamp(&mut self) -> u64;

  /// One sample set: `set_size` big-endian 16-bit FIFO slots.
  fn deliver(&mut self, sample_set: &[u8], timestamp: u64);
}

/// Completion hook of the interrupt source that requested the drain.
pub trait Trigger {
  fn notify_done(&mut self);
}

impl<F: FnMut()> Trigger for F {
  fn notify_done(&mut self) {
    self()
  }
}

/// Calls [`Trigger::notify_done`] when dropped.
struct NotifyOnDrop<'a, T: Trigger + ?Sized>(&'a mut T);

impl<T: Trigger + ?Sized> Drop for NotifyOnDrop<'_, T> {
  fn drop(&mut self) {
    self.0.notify_done();
  }
}

/// FIFO slots to read for `entries` reported slots.
///
/// The count is clamped to the FIFO size, one set is held back and the rest
/// is rounded down to whole sets.
pub const fn drain_len(entries: u16, set_size: u8) -> u16 {
  let set = if set_size == 0 { 1 } else { set_size as u16 };
  let entries = if entries > FIFO_SIZE { FIFO_SIZE } else { entries };
  let avail = entries.saturating_sub(set);
  avail - avail % set
}

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
{
  /// Drain the FIFO after an interrupt and deliver the sample sets to `sink`.
  ///
  /// The slot count read is the reported entry count (at most 512) minus one
  /// set, rounded down to a multiple of the set size; see [`drain_len`]. It
  /// can therefore be lower than `entries - set_size` by up to one set.
  ///
  /// Returns the number of sets delivered. A read failure aborts the drain
  /// and is returned; sets already read stay in the device FIFO.
  /// `trigger` is notified on every exit path, including when the future
  /// is dropped before completion.
  pub async fn handle_trigger<T, K>(&mut self, trigger: &mut T, sink: &mut K) -> Result<usize, Error<E>>
  where
    T: Trigger + ?Sized,
    K: SampleSink + ?Sized,
  {
    let _done = NotifyOnDrop(trigger);

    let status = self.read_status().await?;
    if self.state.fifo_mode == FifoMode::Bypassed || !status.status1.fifo_full {
      return Ok(0);
    }

    let slots = drain_len(status.fifo_entries, self.state.fifo_set_size) as usize;
    if slots == 0 {
      return Ok(0);
    }

    let mut buf = [0u8; FIFO_BYTES];
    let data = &mut buf[..slots * 2];
    if let Err(e) = self.read_bytes(Reg::FifoData, data).await {
      error!("adxl372: error reading fifo data");
      return Err(e);
    }

    let set_bytes = self.state.fifo_set_size.max(1) as usize * 2;
    let mut sets = 0;
    for set in data.chunks_exact(set_bytes) {
      let ts = sink.timestamp();
      sink.deliver(set, ts);
      sets += 1;
    }

    debug!("adxl372: drained {=usize} sets", sets);
    Ok(sets)
  }
}
