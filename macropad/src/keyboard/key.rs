#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
#[allow(non_camel_case_types, dead_code)]
pub enum Key {
    None = 0x0000,
    Transparent,
    A = 0x0004,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit1_Exclamation,
    Digit2_At,
    Digit3_Number,
    Digit4_Dollar,
    Digit5_Percent,
    Digit6_Circumflex,
    Digit7_Ampersand,
    Digit8_Asterisk,
    Digit9_LeftParenthesis,
    Digit0_RightParenthesis,
    Enter,
    Escape,
    Delete,
    Tab,
    Space,
    HyphenMinus_LowLine,
    Equal_Plus,
    LeftSquareBracket_LeftCurlyBracket,
    RightSquareBracket_RightCurlyBracket,
    Backslash_VerticalBar,
    NonUs_Number_Tilde,
    Semicolon_Colon,
    Apostrophe_Quotation,
    Grave_Tilde,
    Comma_LessThan,
    Period_GreaterThan,
    Slash_Question,
    CapsLock,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    PrintScreen,
    ScrollLock,
    Pause,
    Insert,
    Home,
    PageUp,
    DeleteForward,
    End,
    PageDown,
    RightArrow,
    LeftArrow,
    DownArrow,
    UpArrow,
    Keypad_NumLock_Clear,
    LeftControl = 0x00e0,
    LeftShift,
    LeftAlt,
    LeftGui, // Win key(Windows), Command key(Mac), Meta key
    RightControl,
    RightShift,
    RightAlt,
    RightGui, // Win key(Windows), Command key(Mac), Meta key
    // Persistent layer moves, the low bits are the layer index
    ToLayer0 = 0x5200,
    ToLayer1,
    ToLayer2,
    ToLayer3,
    ToLayer4,
    ToLayer5,
    ToLayer6,
    ToLayer7,
    BacklightOn = 0x7800,
    BacklightOff,
    BacklightToggle,
    BacklightDown,
    BacklightUp,
    BacklightStep,
    BacklightToggleBreathing,
    RgbToggle = 0x7820,
    RgbModeForward,
    RgbModeReverse,
    RgbHueUp,
    RgbHueDown,
    RgbSatUp,
    RgbSatDown,
    RgbValUp,
    RgbValDown,
    RgbSpeedUp,
    RgbSpeedDown,
    RgbModePlain,
    RgbModeBreathe,
    RgbModeRainbow,
    RgbModeSwirl,
    RgbModeSnake,
    RgbModeKnight,
    RgbModeChristmas,
    RgbModeGradient,
    RgbModeTest,
    RgbModeTwinkle,
    // Free for keymaps, never reported to the host
    User0 = 0x7e40,
    User1,
    User2,
    User3,
    User4,
    User5,
    User6,
    User7,
    User8,
    User9,
    User10,
    User11,
    User12,
    User13,
    User14,
    User15,
    Ctrl_A = 0xe004,
    Ctrl_B,
    Ctrl_C,
    Ctrl_D,
    Ctrl_E,
    Ctrl_F,
    Ctrl_G,
    Ctrl_H,
    Ctrl_I,
    Ctrl_J,
    Ctrl_K,
    Ctrl_L,
    Ctrl_M,
    Ctrl_N,
    Ctrl_O,
    Ctrl_P,
    Ctrl_Q,
    Ctrl_R,
    Ctrl_S,
    Ctrl_T,
    Ctrl_U,
    Ctrl_V,
    Ctrl_W,
    Ctrl_X,
    Ctrl_Y,
    Ctrl_Z,
    Tilde = 0xe135,
    Exclamation = 0xe11e,
    At = 0xe11f,
    Hash = 0xe120,
    Dollar = 0xe121,
    Percent = 0xe122,
    Circumflex = 0xe123,
    Ampersand = 0xe124,
    Asterisk = 0xe125,
    LeftParenthesis = 0xe126,
    RightParenthesis = 0xe127,
    LowLine = 0xe12d,
    Plus = 0xe12e,
    LeftCurlyBracket = 0xe12f,
    RightCurlyBracket = 0xe130,
    VerticalBar = 0xe131,
    Colon = 0xe133,
    Quotation = 0xe134,
    LessThan = 0xe136,
    GreaterThan = 0xe137,
    Question = 0xe138,
}

impl Key {
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub fn is_noop(&self) -> bool {
        self.code() <= 0x0001
    }

    pub fn is_modifier_key(&self) -> bool {
        self.code() >= 0x00e0 && self.code() <= 0x00e7
    }

    pub fn is_modified_key(&self) -> bool {
        (self.code() >> 8) >= 0x00e0
            && (self.code() >> 8) <= 0x00e7
            && (self.code() & 0xff) >= 0x0004
            && (self.code() & 0xff) < 0x00e0
    }

    pub fn is_keyboard_key(&self) -> bool {
        self.code() >= 0x0004 && self.code() < 0x00e0
    }

    /// Whether the key ends up in a HID keyboard report.
    pub fn is_reportable(&self) -> bool {
        self.is_keyboard_key() || self.is_modifier_key() || self.is_modified_key()
    }

    pub fn key_code(&self) -> Option<u8> {
        if self.is_modified_key() || self.is_keyboard_key() {
            Some((self.code() & 0xff) as u8)
        } else {
            None
        }
    }

    /// Target layer index of a `ToLayerN` key.
    pub fn layer_target(&self) -> Option<u8> {
        match self.code() {
            0x5200..=0x521f => Some((self.code() & 0x1f) as u8),
            _ => None,
        }
    }

    pub fn is_backlight_key(&self) -> bool {
        (0x7800..=0x780f).contains(&self.code())
    }

    pub fn is_rgb_key(&self) -> bool {
        (0x7820..=0x785f).contains(&self.code())
    }

    pub fn is_user_key(&self) -> bool {
        self.code() >= 0x7e40 && self.code() < 0x7e80
    }

    pub(crate) fn modifier_key_flag(&self) -> u8 {
        if self.is_modifier_key() {
            1 << (self.code() - 0x00e0)
        } else if self.is_modified_key() {
            1 << ((self.code() >> 8) - 0x00e0)
        } else {
            0x00
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycode_values() {
        assert_eq!(Key::A.code(), 4);
        assert_eq!(Key::Keypad_NumLock_Clear.code(), 0x53);
        assert_eq!(Key::ToLayer2.code(), 0x5202);
        assert_eq!(Key::BacklightToggleBreathing.code(), 0x7806);
        assert_eq!(Key::RgbModeSnake.code(), 0x782f);
        assert_eq!(Key::RgbModeTwinkle.code(), 0x7834);
        assert_eq!(Key::User2.code(), 0x7e42);
        assert_eq!(Key::Ctrl_Z.code(), 0xe01d);
    }

    #[test]
    fn modified_keys_carry_modifier_and_usage() {
        assert!(Key::Ctrl_C.is_modified_key());
        assert_eq!(Key::Ctrl_C.key_code(), Some(0x06));
        assert_eq!(Key::Ctrl_C.modifier_key_flag(), 0b0000_0001);
        assert_eq!(Key::Colon.key_code(), Some(0x33));
        assert_eq!(Key::Colon.modifier_key_flag(), 0b0000_0010);
    }

    #[test]
    fn modifiers_have_no_key_code() {
        assert!(Key::LeftShift.is_modifier_key());
        assert_eq!(Key::LeftShift.key_code(), None);
        assert_eq!(Key::RightGui.modifier_key_flag(), 0b1000_0000);
    }

    #[test]
    fn firmware_keys_are_not_reported() {
        for key in [
            Key::None,
            Key::Transparent,
            Key::ToLayer1,
            Key::BacklightStep,
            Key::RgbToggle,
            Key::User0,
        ] {
            assert!(!key.is_reportable(), "{:?}", key);
            assert_eq!(key.key_code(), None);
        }
        assert!(Key::F2.is_reportable());
        assert!(Key::Ctrl_R.is_reportable());
    }

    #[test]
    fn classifies_firmware_keys() {
        assert_eq!(Key::ToLayer0.layer_target(), Some(0));
        assert_eq!(Key::ToLayer7.layer_target(), Some(7));
        assert_eq!(Key::A.layer_target(), None);
        assert!(Key::BacklightOn.is_backlight_key());
        assert!(!Key::RgbToggle.is_backlight_key());
        assert!(Key::RgbModeRainbow.is_rgb_key());
        assert!(Key::User15.is_user_key());
        assert!(!Key::Ctrl_A.is_user_key());
    }
}
