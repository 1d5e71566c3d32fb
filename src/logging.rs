//! Log macros that forward to `ftlog` when the `std` feature is enabled and
//! compile to nothing otherwise.

macro_rules! log_info {
    ($($arg:tt)+) => {{
        #[cfg(feature = "std")]
        ftlog::info!($($arg)+);
    }};
}

macro_rules! log_debug {
    ($($arg:tt)+) => {{
        #[cfg(feature = "std")]
        ftlog::debug!($($arg)+);
    }};
}

macro_rules! log_trace {
    ($($arg:tt)+) => {{
        #[cfg(feature = "std")]
        ftlog::trace!($($arg)+);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)+) => {{
        #[cfg(feature = "std")]
        ftlog::warn!($($arg)+);
    }};
}
