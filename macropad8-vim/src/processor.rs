use core::fmt::Write;

use heapless::String;
use macropad::keyboard::{Key, KeyProcessor, TextMacro};

use crate::labels;

/// Longest label the status screen shows.
pub const LABEL_CAPACITY: usize = 11;

pub type Label = String<LABEL_CAPACITY>;

/// Remembers a label for the last pressed key and types the vim macros.
#[derive(Debug, Clone)]
pub struct VimProcessor {
    label: Label,
}

impl Default for VimProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl VimProcessor {
    pub fn new() -> Self {
        let mut processor = VimProcessor {
            label: String::new(),
        };
        processor.set_label("None");
        processor
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Replaces the label, keeping at most `LABEL_CAPACITY` bytes.
    fn set_label(&mut self, text: &str) {
        self.label.clear();
        for c in text.chars() {
            if self.label.push(c).is_err() {
                break;
            }
        }
    }
}

impl KeyProcessor for VimProcessor {
    fn process_key(&mut self, key: Key, pressed: bool, text: &mut TextMacro) -> bool {
        if !pressed {
            return true;
        }

        match labels::lookup(key) {
            Some(entry) => {
                if let Some(typed) = entry.text {
                    if let Err(e) = text.send_string(typed) {
                        macropad::warn!("Dropped macro for {:?}: {:?}", key, e);
                    }
                }
                self.set_label(entry.label);
            }
            None => {
                let mut code = String::<LABEL_CAPACITY>::new();
                write!(code, "{}", key.code()).ok();
                self.set_label(&code);
            }
        }
        true
    }
}
