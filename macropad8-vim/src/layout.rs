use macropad::keyboard::{self, layout, Key};

use crate::switch_identifier::KeySwitchIdentifier;

/// Types `:wq!` and Enter.
pub const SAVE_EXIT: Key = Key::User0;
/// Types `dd`.
pub const DD: Key = Key::User1;
/// Types `yy`.
pub const YY: Key = Key::User2;

#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Layout {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, keyboard::Layer)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layer {
    #[default]
    Basic,
    Vim,
    Fn,
}

impl Layer {
    /// Name shown on the status screen.
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Basic => "Basic",
            Layer::Vim => "Vim",
            Layer::Fn => "FN",
        }
    }
}

impl Layout {
    pub const ROWS: usize = 2;
    pub const COLS: usize = 4;

    const KEY_CODES_BASIC: [[Key; 4]; 2] = layout! {r"
        | C-a | C-t | C-z | C-f |
        | C-x | C-c | C-v | To1 |
    "};

    // F2 toggles insert/command mode with `nnoremap <F2> i` and `inoremap <F2> <Esc>`
    const KEY_CODES_VIM: [[Key; 4]; 2] = layout! {r"
        |    F2   |SAVE_EXIT|    U    |   C-r   |
        |    DD   |    YY   |    P    |   To2   |
    "};

    const KEY_CODES_FN: [[Key; 4]; 2] = layout! {r"
        |RGBTg|RGBMF|RGBRb|RGBSn|
        |BLTg |BLStp|BLBrt| To0 |
    "};

    fn key_codes(layer: Layer) -> &'static [[Key; 4]; 2] {
        match layer {
            Layer::Basic => &Self::KEY_CODES_BASIC,
            Layer::Vim => &Self::KEY_CODES_VIM,
            Layer::Fn => &Self::KEY_CODES_FN,
        }
    }
}

impl keyboard::Layout<2> for Layout {
    type Identifier = KeySwitchIdentifier;
    type Layer = Layer;

    fn key(&self, layer: Layer, switch: &Self::Identifier) -> Key {
        let KeySwitchIdentifier { row, col } = *switch;
        Self::key_codes(layer)
            .get(row as usize)
            .and_then(|keys| keys.get(col as usize))
            .copied()
            .unwrap_or(Key::None)
    }
}
