use heapless::{Deque, Vec};
use snafu::ensure;

use super::Key;
use crate::error::{Error, MacroQueueFullSnafu, UnsupportedCharacterSnafu};

/// Number of queued report steps. Each typed character takes two.
pub const TEXT_MACRO_CAPACITY: usize = 64;

type Step = Vec<Key, 2>;

/// Text typed into the host one report at a time.
///
/// Every character becomes a press step followed by a release step, so
/// repeated characters are seen as separate key strokes.
#[derive(Debug, Default)]
pub struct TextMacro {
    steps: Deque<Step, TEXT_MACRO_CAPACITY>,
}

impl TextMacro {
    pub fn new() -> Self {
        TextMacro {
            steps: Deque::new(),
        }
    }

    /// Queues `text`. Nothing is queued when any character cannot be typed
    /// or the whole string does not fit.
    pub fn send_string(&mut self, text: &str) -> Result<(), Error> {
        let mut required = 0;
        for c in text.chars() {
            ensure!(typed_keys(c).is_some(), UnsupportedCharacterSnafu { c });
            required += 2;
        }
        ensure!(
            self.steps.capacity() - self.steps.len() >= required,
            MacroQueueFullSnafu
        );

        for keys in text.chars().filter_map(typed_keys) {
            self.steps.push_back(keys).ok();
            self.steps.push_back(Vec::new()).ok();
        }
        Ok(())
    }

    pub fn next_step(&mut self) -> Option<Vec<Key, 2>> {
        self.steps.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

const LETTERS: [Key; 26] = [
    Key::A,
    Key::B,
    Key::C,
    Key::D,
    Key::E,
    Key::F,
    Key::G,
    Key::H,
    Key::I,
    Key::J,
    Key::K,
    Key::L,
    Key::M,
    Key::N,
    Key::O,
    Key::P,
    Key::Q,
    Key::R,
    Key::S,
    Key::T,
    Key::U,
    Key::V,
    Key::W,
    Key::X,
    Key::Y,
    Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Digit0_RightParenthesis,
    Key::Digit1_Exclamation,
    Key::Digit2_At,
    Key::Digit3_Number,
    Key::Digit4_Dollar,
    Key::Digit5_Percent,
    Key::Digit6_Circumflex,
    Key::Digit7_Ampersand,
    Key::Digit8_Asterisk,
    Key::Digit9_LeftParenthesis,
];

/// Keys held down to type `c` on a US layout.
fn typed_keys(c: char) -> Option<Step> {
    let key = match c {
        'a'..='z' => LETTERS[(c as u8 - b'a') as usize],
        'A'..='Z' => {
            let mut keys = Vec::new();
            keys.push(Key::LeftShift).ok();
            keys.push(LETTERS[(c as u8 - b'A') as usize]).ok();
            return Some(keys);
        }
        '0'..='9' => DIGITS[(c as u8 - b'0') as usize],
        '\n' => Key::Enter,
        '\t' => Key::Tab,
        ' ' => Key::Space,
        '-' => Key::HyphenMinus_LowLine,
        '=' => Key::Equal_Plus,
        '[' => Key::LeftSquareBracket_LeftCurlyBracket,
        ']' => Key::RightSquareBracket_RightCurlyBracket,
        '\\' => Key::Backslash_VerticalBar,
        ';' => Key::Semicolon_Colon,
        '\'' => Key::Apostrophe_Quotation,
        '`' => Key::Grave_Tilde,
        ',' => Key::Comma_LessThan,
        '.' => Key::Period_GreaterThan,
        '/' => Key::Slash_Question,
        '~' => Key::Tilde,
        '!' => Key::Exclamation,
        '@' => Key::At,
        '#' => Key::Hash,
        '$' => Key::Dollar,
        '%' => Key::Percent,
        '^' => Key::Circumflex,
        '&' => Key::Ampersand,
        '*' => Key::Asterisk,
        '(' => Key::LeftParenthesis,
        ')' => Key::RightParenthesis,
        '_' => Key::LowLine,
        '+' => Key::Plus,
        '{' => Key::LeftCurlyBracket,
        '}' => Key::RightCurlyBracket,
        '|' => Key::VerticalBar,
        ':' => Key::Colon,
        '"' => Key::Quotation,
        '<' => Key::LessThan,
        '>' => Key::GreaterThan,
        '?' => Key::Question,
        _ => return None,
    };
    let mut keys = Vec::new();
    keys.push(key).ok();
    Some(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(text_macro: &mut TextMacro) -> std::vec::Vec<std::vec::Vec<Key>> {
        core::iter::from_fn(|| text_macro.next_step())
            .map(|step| step.to_vec())
            .collect()
    }

    #[test]
    fn save_and_quit_is_typed_with_enter() {
        let mut text_macro = TextMacro::new();
        text_macro.send_string(":wq!\n").unwrap();
        assert_eq!(
            drain(&mut text_macro),
            vec![
                vec![Key::Colon],
                vec![],
                vec![Key::W],
                vec![],
                vec![Key::Q],
                vec![],
                vec![Key::Exclamation],
                vec![],
                vec![Key::Enter],
                vec![],
            ]
        );
        assert!(text_macro.is_empty());
    }

    #[test]
    fn repeated_characters_are_released_in_between() {
        let mut text_macro = TextMacro::new();
        text_macro.send_string("dd").unwrap();
        assert_eq!(
            drain(&mut text_macro),
            vec![vec![Key::D], vec![], vec![Key::D], vec![]]
        );
    }

    #[test]
    fn uppercase_holds_shift() {
        let mut text_macro = TextMacro::new();
        text_macro.send_string("G").unwrap();
        assert_eq!(
            text_macro.next_step().unwrap().as_slice(),
            &[Key::LeftShift, Key::G]
        );
    }

    #[test]
    fn rejects_untypeable_text_without_queueing() {
        let mut text_macro = TextMacro::new();
        assert_eq!(
            text_macro.send_string("ok\u{e9}"),
            Err(Error::UnsupportedCharacter { c: '\u{e9}' })
        );
        assert!(text_macro.is_empty());
    }

    #[test]
    fn rejects_text_that_does_not_fit() {
        let mut text_macro = TextMacro::new();
        let long = "y".repeat(TEXT_MACRO_CAPACITY / 2);
        text_macro.send_string(&long).unwrap();
        assert_eq!(text_macro.len(), TEXT_MACRO_CAPACITY);
        assert_eq!(text_macro.send_string("y"), Err(Error::MacroQueueFull));
        assert_eq!(text_macro.len(), TEXT_MACRO_CAPACITY);
    }
}
