use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point},
    text::{Baseline, Text},
    Drawable,
};

/// Vertical pitch of one text line in pixels.
pub const LINE_HEIGHT: i32 = 8;

/// A monochrome screen the firmware can draw status text on.
pub trait KeyboardDisplay: DrawTarget<Color = BinaryColor> {
    /// `true` when drawing goes into a buffer that must be flushed to the panel.
    const REQUIRES_FLUSH: bool;
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Clears `display` and draws one line of text per item, top to bottom.
pub fn draw_lines<'a, D>(
    display: &mut D,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let char_style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
    display.clear(BinaryColor::Off)?;
    for (i, line) in lines.into_iter().enumerate() {
        Text::with_baseline(
            line,
            Point::new(0, i as i32 * LINE_HEIGHT),
            char_style,
            Baseline::Top,
        )
        .draw(display)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn lit_in_rows(display: &MockDisplay<BinaryColor>, rows: core::ops::Range<i32>) -> bool {
        rows.flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
            .any(|p| display.get_pixel(p) == Some(BinaryColor::On))
    }

    fn mock() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn lines_are_stacked_at_line_height() {
        let mut display = mock();
        draw_lines(&mut display, ["Top", "Next"]).unwrap();
        assert!(lit_in_rows(&display, 0..8));
        assert!(lit_in_rows(&display, 8..16));
        assert!(!lit_in_rows(&display, 16..64));
    }

    #[test]
    fn empty_input_leaves_a_blank_screen() {
        let mut display = mock();
        draw_lines(&mut display, core::iter::empty()).unwrap();
        assert!(!lit_in_rows(&display, 0..64));
    }
}
