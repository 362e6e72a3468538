#![cfg_attr(not(test), no_std)]

pub mod labels;
pub mod layout;
pub mod processor;
pub mod status;
mod switch_identifier;

pub use layout::{Layer, Layout, DD, SAVE_EXIT, YY};
pub use processor::VimProcessor;
pub use status::{status_lines, Status};
pub use switch_identifier::KeySwitchIdentifier;
