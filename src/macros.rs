//! Logging macros that forward to the `log` facade when the `debug` feature is
//! enabled and expand to nothing otherwise.

macro_rules! map_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug")]
        log::debug!($($arg)*);
    };
}

macro_rules! map_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug")]
        log::trace!($($arg)*);
    };
}

macro_rules! map_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug")]
        log::warn!($($arg)*);
    };
}

pub(crate) use map_debug;
pub(crate) use map_trace;
pub(crate) use map_warn;
