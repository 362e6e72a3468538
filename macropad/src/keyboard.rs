mod controller;
mod external_communicator;
mod host_leds;
mod key;
mod key_switches;
mod keyboard_state;
mod layer;
mod layout;
mod processor;
mod text_macro;

pub use controller::Controller;
pub use external_communicator::ExternalCommunicator;
pub use host_leds::HostLeds;
pub use key::Key;
pub use key_switches::{KeySwitchIdentifier, KeySwitches};
pub use keyboard_state::KeyboardState;
pub use layer::{Layer, LayerState};
pub use layout::Layout;
pub use macropad_macros::layout;
pub use processor::KeyProcessor;
pub use text_macro::{TextMacro, TEXT_MACRO_CAPACITY};
