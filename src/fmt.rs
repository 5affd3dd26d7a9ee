//! Logging shims. Forward to `defmt` when the feature is enabled and expand
//! to nothing otherwise.

#![allow(unused_macros)]

macro_rules! error {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    defmt::error!($($arg)*);
  }};
}

macro_rules! warn {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    defmt::warn!($($arg)*);
  }};
}

macro_rules! debug {
  ($($arg:tt)*) => {{
    #[cfg(feature = "defmt")]
    defmt::debug!($($arg)*);
  }};
}
