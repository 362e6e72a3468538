use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::{format_ident, quote, TokenStreamExt};
use syn::{parse_macro_input, Data, DeriveInput, LitStr, Path};

/// Implements `macropad::keyboard::Layer` for a fieldless enum.
///
/// Variants are ordered by declaration: the first one is layer 0 and has
/// nothing below it.
#[proc_macro_derive(Layer)]
pub fn derive_layer(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = ast.ident;
    let variants = match ast.data {
        Data::Enum(ref data) => data.variants.iter().map(|v| &v.ident).collect::<Vec<_>>(),
        _ => {
            return syn::Error::new_spanned(&name, "Layer can only be derived for enums")
                .to_compile_error()
                .into()
        }
    };

    let list = variants
        .iter()
        .map(|v| quote! { #name::#v, })
        .fold(TokenStream::new(), |mut acc, v| {
            acc.append_all(v);
            acc
        });
    let to_index = variants.iter().enumerate().map(|(i, v)| {
        let i = i as u8;
        quote! { #name::#v => #i, }
    });
    let from_index = variants.iter().enumerate().map(|(i, v)| {
        let i = i as u8;
        quote! { #i => Some(#name::#v), }
    });

    let expanded = quote! {
        impl macropad::keyboard::Layer for #name {
            fn below(&self) -> Option<Self> {
                let layers = [#list];
                layers
                    .iter()
                    .enumerate()
                    .find(|(_, l)| l == &self)
                    .and_then(|(i, _)| if i > 0 { layers.get(i - 1) } else { None })
                    .copied()
            }

            fn index(&self) -> u8 {
                match self {
                    #(#to_index)*
                }
            }

            fn from_index(index: u8) -> Option<Self> {
                match index {
                    #(#from_index)*
                    _ => None,
                }
            }
        }
    };

    proc_macro::TokenStream::from(expanded)
}

macro_rules! key {
    ($n:tt, $i:ident) => {
        ($n.to_string(), quote!(macropad::keyboard::Key::$i))
    };
    ($i:ident) => {
        (stringify!($i).to_string(), quote!(macropad::keyboard::Key::$i))
    };
}

fn symbol_table() -> HashMap<String, TokenStream> {
    let mut table = [
        key!("", None),
        key!("Trn", Transparent),
        key!(A),
        key!(B),
        key!(C),
        key!(D),
        key!(E),
        key!(F),
        key!(G),
        key!(H),
        key!(I),
        key!(J),
        key!(K),
        key!(L),
        key!(M),
        key!(N),
        key!(O),
        key!(P),
        key!(Q),
        key!(R),
        key!(S),
        key!(T),
        key!(U),
        key!(V),
        key!(W),
        key!(X),
        key!(Y),
        key!(Z),
        key!("1", Digit1_Exclamation),
        key!("2", Digit2_At),
        key!("3", Digit3_Number),
        key!("4", Digit4_Dollar),
        key!("5", Digit5_Percent),
        key!("6", Digit6_Circumflex),
        key!("7", Digit7_Ampersand),
        key!("8", Digit8_Asterisk),
        key!("9", Digit9_LeftParenthesis),
        key!("0", Digit0_RightParenthesis),
        key!(Enter),
        key!("Esc", Escape),
        key!("Del", Delete),
        key!(Tab),
        key!(Space),
        key!("-", HyphenMinus_LowLine),
        key!("=", Equal_Plus),
        key!("[", LeftSquareBracket_LeftCurlyBracket),
        key!("]", RightSquareBracket_RightCurlyBracket),
        key!("\\", Backslash_VerticalBar),
        key!(";", Semicolon_Colon),
        key!("'", Apostrophe_Quotation),
        key!("`", Grave_Tilde),
        key!(",", Comma_LessThan),
        key!(".", Period_GreaterThan),
        key!("/", Slash_Question),
        key!("Caps", CapsLock),
        key!(F1),
        key!(F2),
        key!(F3),
        key!(F4),
        key!(F5),
        key!(F6),
        key!(F7),
        key!(F8),
        key!(F9),
        key!(F10),
        key!(F11),
        key!(F12),
        key!("PrScr", PrintScreen),
        key!("ScLck", ScrollLock),
        key!(Pause),
        key!("Ins", Insert),
        key!(Home),
        key!("PgUp", PageUp),
        key!("DelFw", DeleteForward),
        key!(End),
        key!("PgDn", PageDown),
        key!("Right", RightArrow),
        key!("Left", LeftArrow),
        key!("Down", DownArrow),
        key!("Up", UpArrow),
        key!("NumLk", Keypad_NumLock_Clear),
        key!("LCtl", LeftControl),
        key!("LSft", LeftShift),
        key!("LAlt", LeftAlt),
        key!("LGui", LeftGui),
        key!("RCtl", RightControl),
        key!("RSft", RightShift),
        key!("RAlt", RightAlt),
        key!("RGui", RightGui),
        key!("~", Tilde),
        key!("!", Exclamation),
        key!("@", At),
        key!("#", Hash),
        key!("$", Dollar),
        key!("%", Percent),
        key!("^", Circumflex),
        key!("&", Ampersand),
        key!("*", Asterisk),
        key!("(", LeftParenthesis),
        key!(")", RightParenthesis),
        key!("_", LowLine),
        key!("+", Plus),
        key!("{", LeftCurlyBracket),
        key!("}", RightCurlyBracket),
        key!("Pipe", VerticalBar),
        key!(":", Colon),
        key!("\"", Quotation),
        key!("<", LessThan),
        key!(">", GreaterThan),
        key!("?", Question),
        key!("BLOn", BacklightOn),
        key!("BLOff", BacklightOff),
        key!("BLTg", BacklightToggle),
        key!("BLDn", BacklightDown),
        key!("BLUp", BacklightUp),
        key!("BLStp", BacklightStep),
        key!("BLBrt", BacklightToggleBreathing),
        key!("RGBTg", RgbToggle),
        key!("RGBMF", RgbModeForward),
        key!("RGBMR", RgbModeReverse),
        key!("RGBHI", RgbHueUp),
        key!("RGBHD", RgbHueDown),
        key!("RGBSI", RgbSatUp),
        key!("RGBSD", RgbSatDown),
        key!("RGBVI", RgbValUp),
        key!("RGBVD", RgbValDown),
        key!("RGBSpI", RgbSpeedUp),
        key!("RGBSpD", RgbSpeedDown),
        key!("RGBPl", RgbModePlain),
        key!("RGBBr", RgbModeBreathe),
        key!("RGBRb", RgbModeRainbow),
        key!("RGBSw", RgbModeSwirl),
        key!("RGBSn", RgbModeSnake),
        key!("RGBKn", RgbModeKnight),
        key!("RGBXm", RgbModeChristmas),
        key!("RGBGr", RgbModeGradient),
        key!("RGBTs", RgbModeTest),
        key!("RGBTw", RgbModeTwinkle),
    ]
    .into_iter()
    .collect::<HashMap<_, _>>();

    for c in 'a'..='z' {
        let variant = format_ident!("Ctrl_{}", c.to_ascii_uppercase());
        table.insert(
            format!("C-{c}"),
            quote!(macropad::keyboard::Key::#variant),
        );
    }
    for n in 0u8..8 {
        let variant = format_ident!("ToLayer{}", n);
        table.insert(format!("To{n}"), quote!(macropad::keyboard::Key::#variant));
    }
    for n in 0u8..16 {
        let variant = format_ident!("User{}", n);
        table.insert(format!("U{n}"), quote!(macropad::keyboard::Key::#variant));
    }
    table
}

/// Builds a `[[Key; COLS]; ROWS]` from an ASCII table.
///
/// Cells are key symbols (`A`, `Esc`, `C-z`, `To1`, ...). Anything else must
/// be a path to a `Key` constant in scope, such as a keymap's custom keycode.
#[proc_macro]
pub fn layout(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as LitStr).value();
    let table = symbol_table();

    let array = input
        .trim()
        .lines()
        .map(&str::trim)
        .map(|line| {
            let array = line
                .split('|')
                .map(&str::trim)
                .collect::<Vec<_>>()
                .into_iter()
                .skip(1)
                .rev()
                .skip(1)
                .rev()
                .map(|k| {
                    if let Some(st) = table.get(k) {
                        st.clone()
                    } else if let Ok(path) = syn::parse_str::<Path>(k) {
                        quote!(#path)
                    } else {
                        let message = "layout: Unknown symbol: ".to_string() + k;
                        quote!(compile_error!(#message))
                    }
                })
                .map(|t| quote! {#t,})
                .collect::<TokenStream>();
            quote! {
                [#array]
            }
        })
        .map(|t| quote! {#t,})
        .collect::<TokenStream>();

    let expanded = quote! {
        [#array]
    };

    proc_macro::TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_symbols_name_key_variants() {
        let table = symbol_table();
        assert_eq!(
            table["To7"].to_string(),
            quote!(macropad::keyboard::Key::ToLayer7).to_string()
        );
        assert_eq!(
            table["U15"].to_string(),
            quote!(macropad::keyboard::Key::User15).to_string()
        );
        assert_eq!(
            table["C-z"].to_string(),
            quote!(macropad::keyboard::Key::Ctrl_Z).to_string()
        );
        assert!(!table.contains_key("To8"));
    }
}
