//! Logging facade.
//!
//! With the `log` feature enabled these are the `log` crate's macros. Without
//! it they compile to nothing, but still type-check their format arguments so
//! that values only mentioned in log messages are not reported as unused.

#![allow(unused_macros, unused_imports)]

#[cfg(feature = "log")]
pub(crate) use ::log::{debug, error, info, trace, warn};

#[cfg(not(feature = "log"))]
macro_rules! disabled {
    ($($arg:tt)*) => {
        if false {
            let _ = format_args!($($arg)*);
        }
    };
}

#[cfg(not(feature = "log"))]
pub(crate) use disabled as debug;
#[cfg(not(feature = "log"))]
pub(crate) use disabled as error;
#[cfg(not(feature = "log"))]
pub(crate) use disabled as info;
#[cfg(not(feature = "log"))]
pub(crate) use disabled as trace;
#[cfg(not(feature = "log"))]
pub(crate) use disabled as warn;
