//! What the status screen shows for each key of the keymap, and the text
//! some keys type.

use macropad::keyboard::Key;

use crate::layout::{DD, SAVE_EXIT, YY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLabel {
    pub key: Key,
    pub label: &'static str,
    /// Text typed on press.
    pub text: Option<&'static str>,
}

const fn label(key: Key, label: &'static str) -> KeyLabel {
    KeyLabel {
        key,
        label,
        text: None,
    }
}

const fn typing(key: Key, label: &'static str, text: &'static str) -> KeyLabel {
    KeyLabel {
        key,
        label,
        text: Some(text),
    }
}

pub const KEY_LABELS: [KeyLabel; 24] = [
    // Basic
    label(Key::Ctrl_X, "Cut"),
    label(Key::Ctrl_F, "Search"),
    label(Key::Ctrl_Z, "Undo"),
    label(Key::Ctrl_C, "Copy"),
    label(Key::Ctrl_V, "Paste"),
    label(Key::Ctrl_T, "NewTab"),
    label(Key::Ctrl_A, "Sel. All"),
    // Vim
    label(Key::F2, "Toggle"),
    typing(SAVE_EXIT, "Exit", ":wq!\n"),
    label(Key::U, "Undo"),
    label(Key::Ctrl_R, "Redo"),
    typing(DD, "dd", "dd"),
    typing(YY, "yy", "yy"),
    label(Key::P, "p"),
    // Fn
    label(Key::RgbToggle, "RGB Toggle"),
    label(Key::RgbModeForward, "RGB Fwd"),
    label(Key::RgbModeRainbow, "RGB Rev"),
    label(Key::RgbModeSnake, "RGB Snk"),
    label(Key::BacklightToggle, "BkLgt Tog"),
    label(Key::BacklightStep, "BkLgt Lvl"),
    label(Key::BacklightToggleBreathing, "BkLgt Brth"),
    // TO(_BASIC)..=TO(_FN)
    label(Key::ToLayer0, "Switcher"),
    label(Key::ToLayer1, "Switcher"),
    label(Key::ToLayer2, "Switcher"),
];

pub fn lookup(key: Key) -> Option<&'static KeyLabel> {
    KEY_LABELS.iter().find(|entry| entry.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_appear_once() {
        for (i, entry) in KEY_LABELS.iter().enumerate() {
            assert!(
                KEY_LABELS[i + 1..].iter().all(|other| other.key != entry.key),
                "{:?} is listed twice",
                entry.key
            );
        }
    }

    #[test]
    fn labels_fit_the_screen() {
        assert!(KEY_LABELS.iter().all(|entry| entry.label.len() <= 11));
    }

    #[test]
    fn only_custom_keys_type_text() {
        let typing = KEY_LABELS
            .iter()
            .filter(|entry| entry.text.is_some())
            .map(|entry| entry.key)
            .collect::<std::vec::Vec<_>>();
        assert_eq!(typing, [SAVE_EXIT, DD, YY]);
    }

    #[test]
    fn lookup_finds_entries() {
        assert_eq!(lookup(Key::Ctrl_A).map(|e| e.label), Some("Sel. All"));
        assert_eq!(lookup(SAVE_EXIT).and_then(|e| e.text), Some(":wq!\n"));
        assert_eq!(lookup(Key::ToLayer3), None);
        assert_eq!(lookup(Key::A), None);
    }
}
