use super::{Key, TextMacro};

/// Keymap hook run for every key event before the controller's own handling.
pub trait KeyProcessor {
    /// Returning `false` stops the controller from acting on `key`.
    fn process_key(&mut self, key: Key, pressed: bool, text: &mut TextMacro) -> bool;
}

impl KeyProcessor for () {
    fn process_key(&mut self, _key: Key, _pressed: bool, _text: &mut TextMacro) -> bool {
        true
    }
}
