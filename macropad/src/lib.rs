#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

#[cfg(feature = "oled")]
pub mod display;
mod error;
pub mod keyboard;
pub mod lighting;
pub mod usb;

pub use error::Error;
pub use heapless::{String, Vec};
