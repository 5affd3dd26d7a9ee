//! Interrupt pin driven acquisition.
//!
//! With the `events` feature the driver owns the host GPIO wired to INT1.
//! [`wait_and_drain`](crate::Adxl372::wait_and_drain) blocks until the pin is
//! asserted and then runs one triggered drain. [`SampleQueue`] is a bounded
//! [`SampleSink`] for callers without a streaming consumer.

use embedded_hal_async::{delay::DelayNs, digital, spi::SpiDevice};

use super::{fifo::fifo_sample, Adxl372, Error, SampleSink};

impl<S, D, W, E> Adxl372<S, D, W>
where
  S: SpiDevice<Error = E>,
  D: DelayNs,
  W: digital::Wait,
{
  /// Wait for INT1 and drain the FIFO into `sink`.
  ///
  /// The pin level honours the `low_operation` bit of the INT1 map. Returns
  /// the number of sets delivered.
  pub async fn wait_and_drain<K: SampleSink + ?Sized>(&mut self, sink: &mut K) -> Result<usize, Error<E>> {
    let wait = if self.state.int1_mask.low_operation {
      self.int_pin.wait_for_low().await
    } else {
      self.int_pin.wait_for_high().await
    };
    wait.map_err(|_| Error::Data)?;

    self.handle_trigger(&mut || {}, sink).await
  }
}

/// One drained sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
  pub timestamp: u64,
  len: u8,
  data: [u8; 6],
}

impl Sample {
  /// Raw FIFO slots, two bytes per axis.
  pub fn bytes(&self) -> &[u8] {
    &self.data[..self.len as usize]
  }

  /// Number of axes in the set.
  pub fn axes(&self) -> usize {
    self.len as usize / 2
  }

  /// Sign-extended value of the `i`-th axis in the set.
  pub fn value(&self, i: usize) -> Option<i16> {
    if i >= self.axes() {
      return None;
    }
    Some(fifo_sample([self.data[2 * i], self.data[2 * i + 1]]))
  }
}

/// Bounded sample buffer. When full, the oldest set is dropped.
///
/// `clock` provides the timestamps.
pub struct SampleQueue<C, const N: usize> {
  clock: C,
  queue: heapless::Deque<Sample, N>,
}

impl<C: FnMut() -> u64, const N: usize> SampleQueue<C, N> {
  pub fn new(clock: C) -> Self {
    Self { clock, queue: heapless::Deque::new() }
  }

  pub fn pop(&mut self) -> Option<Sample> {
    self.queue.pop_front()
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  #[inline]
  fn push(&mut self, s: Sample) {
    if self.queue.is_full() {
      let _ = self.queue.pop_front();
    }
    let _ = self.queue.push_back(s);
  }
}

impl<C: FnMut() -> u64, const N: usize> SampleSink for SampleQueue<C, N> {
  fn timestamp(&mut self) -> u64 {
    (self.clock)()
  }

  fn deliver(&mut self, sample_set: &[u8], timestamp: u64) {
    let len = sample_set.len().min(6);
    let mut data = [0u8; 6];
    data[..len].copy_from_slice(&sample_set[..len]);
    self.push(Sample { timestamp, len: len as u8, data });
  }
}
