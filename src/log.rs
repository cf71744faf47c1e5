//! Conditional logging macros.
//!
//! With the `tracing` feature these re-export the `tracing` macros. Without
//! it they expand to nothing, so font loading and canvas code can log freely.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __vgplot_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __vgplot_trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __vgplot_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__vgplot_debug as debug, __vgplot_trace as trace, __vgplot_warn as warn};
