use core::fmt::{self, Write};

use heapless::{String, Vec};
use macropad::{
    keyboard::{HostLeds, KeyboardState},
    lighting::Lighting,
};

use crate::layout::Layer;

/// Widest line the status screen holds.
pub const LINE_CAPACITY: usize = 25;
pub const MAX_LINES: usize = 8;

pub type StatusLine = String<LINE_CAPACITY>;

/// Everything the status screen shows.
#[derive(Debug, Clone, Copy)]
pub struct Status<'a> {
    /// `None` when the highest active layer is not part of the keymap.
    pub layer: Option<Layer>,
    pub host_leds: HostLeds,
    pub lighting: Lighting,
    pub last_key: &'a str,
}

impl<'a> Status<'a> {
    pub fn new<const RO: usize>(state: &KeyboardState<Layer, RO>, last_key: &'a str) -> Self {
        Status {
            layer: state.layer,
            host_leds: state.host_leds,
            lighting: state.lighting,
            last_key,
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "On"
    } else {
        "Off"
    }
}

fn push_line(lines: &mut Vec<StatusLine, MAX_LINES>, args: fmt::Arguments) {
    let mut line = StatusLine::new();
    line.write_fmt(args).ok();
    lines.push(line).ok();
}

pub fn status_lines(status: &Status) -> Vec<StatusLine, MAX_LINES> {
    let mut lines = Vec::new();
    let leds = &status.host_leds;

    push_line(&mut lines, format_args!("ANAVI Macro Pad 8"));
    push_line(
        &mut lines,
        format_args!(
            "Active layer: {}",
            status.layer.as_ref().map_or("N/A", Layer::name)
        ),
    );
    push_line(&mut lines, format_args!("Num Lock: {}", on_off(leds.num_lock)));
    push_line(&mut lines, format_args!("Caps Lock: {}", on_off(leds.caps_lock)));
    push_line(
        &mut lines,
        format_args!("Backlit: {}", on_off(status.lighting.backlight.enabled)),
    );
    push_line(&mut lines, format_args!("Last Key: {}", status.last_key));

    #[cfg(feature = "rgblight")]
    {
        let rgb = &status.lighting.rgb;
        push_line(&mut lines, format_args!("RGB Mode: {}", rgb.mode));
        push_line(
            &mut lines,
            format_args!("h:{} s:{} v:{}", rgb.hue, rgb.sat, rgb.val),
        );
    }

    lines
}

/// Draws the status lines onto `display`.
#[cfg(feature = "oled")]
pub fn draw_status<D>(display: &mut D, status: &Status) -> Result<(), D::Error>
where
    D: embedded_graphics::draw_target::DrawTarget<
        Color = embedded_graphics::pixelcolor::BinaryColor,
    >,
{
    let lines = status_lines(status);
    macropad::display::draw_lines(display, lines.iter().map(StatusLine::as_str))
}
