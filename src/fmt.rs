//! Logging macros.
//!
//! On the target these forward to `defmt`. Host unit tests have no global defmt logger, so there
//! the arguments are only type-checked through `format_args!` and nothing is emitted. Use `{}`
//! and `{:?}` placeholders only: both are understood by `defmt` and by `core::fmt`.

#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(not(test))]
        ::defmt::trace!($($arg)*);
        #[cfg(test)]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(not(test))]
        ::defmt::debug!($($arg)*);
        #[cfg(test)]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(not(test))]
        ::defmt::info!($($arg)*);
        #[cfg(test)]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(not(test))]
        ::defmt::warn!($($arg)*);
        #[cfg(test)]
        let _ = ::core::format_args!($($arg)*);
    }};
}
