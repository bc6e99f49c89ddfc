//! Logging shims.
//!
//! Routes to `tracing` with the `std` feature and to `defmt` on bare-metal
//! builds with the `defmt` feature. With neither, arguments are evaluated
//! by reference and discarded.
#![allow(unused_macros)]

macro_rules! log_event {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "std")]
        ::tracing::$level!($s $(, $x)*);
        #[cfg(all(feature = "defmt", not(feature = "std")))]
        ::defmt::$level!($s $(, $x)*);
        #[cfg(not(any(feature = "std", feature = "defmt")))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => { log_event!(trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { log_event!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { log_event!(info, $($arg)*) };
}

macro_rules! warn {
    ($($arg:tt)*) => { log_event!(warn, $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { log_event!(error, $($arg)*) };
}
