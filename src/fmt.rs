//! Logging shims. Expand to `defmt` or `log` depending on the enabled feature, or to nothing.

#![macro_use]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!(
    "Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together"
);

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(feature = "log")]
            ::log::debug!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "log")))]
            let _ = ($(&$x),*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(feature = "log")]
            ::log::warn!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "log")))]
            let _ = ($(&$x),*);
        }
    };
}
