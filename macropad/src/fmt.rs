//! Logging macros that forward to `defmt` on the device and to stderr in
//! unit tests. Without either they compile to nothing.

#[allow(unused)]
#[cfg(all(not(test), not(feature = "defmt")))]
mod no_defmt {
    #[macro_export]
    macro_rules! debug {
        ($($arg:expr),*) => {{ $(let _ = &$arg;)* }};
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:expr),*) => {{ $(let _ = &$arg;)* }};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:expr),*) => {{ $(let _ = &$arg;)* }};
    }

    #[macro_export]
    macro_rules! error {
        ($($arg:expr),*) => {{ $(let _ = &$arg;)* }};
    }
}

#[cfg(all(not(test), feature = "defmt"))]
mod defmt {
    #[macro_export]
    macro_rules! debug {
        ($($arg:expr),*) => {
            defmt::debug!($($arg,)*)
        };
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:expr),*) => {
            defmt::info!($($arg,)*)
        };
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:expr),*) => {
            defmt::warn!($($arg,)*)
        };
    }

    #[macro_export]
    macro_rules! error {
        ($($arg:expr),*) => {
            defmt::error!($($arg,)*)
        };
    }
}
