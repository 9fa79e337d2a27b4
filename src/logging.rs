//! Logging facade.
//!
//! The matcher logs through three crate-local macros that forward to either
//! the [`log`](https://docs.rs/log) or the [`tracing`](https://docs.rs/tracing)
//! crate, selected by Cargo feature. Enable at most one of them.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros expand to nothing.
//!
//! ```ignore
//! use route_match::{debug_log, trace_log, warn_log};
//!
//! trace_log!("cache hit for pattern '{}'", pattern);
//! debug_log!("compiled '{}' as {}", pattern, source);
//! warn_log!("param '{}' is not valid percent-encoding", name);
//! ```

/// Emit a **trace**-level message: per-call detail such as cache hits and
/// alternatives being tried.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Emit a **debug**-level message. Used once per compiled pattern.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// Emit a **warn**-level message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}
