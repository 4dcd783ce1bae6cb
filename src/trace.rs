//! Internal logging macros.
//!
//! With the `tracing` feature these forward to the [`tracing`] macros of the
//! same level. Without it they expand to nothing, so arguments are never
//! evaluated.
//!
//! [`tracing`]: https://docs.rs/tracing

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        ::tracing::trace!(target: "anyhold", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "anyhold", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {};
}
