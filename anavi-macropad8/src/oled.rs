use embedded_graphics::{
    draw_target::DrawTarget, pixelcolor::BinaryColor, prelude::*, primitives::Rectangle,
};
use macropad::display::KeyboardDisplay;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, size::DisplaySize, Ssd1306};

pub struct Ssd1306Display<DI: WriteOnlyDataCommand, SIZE: DisplaySize>(
    pub Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>,
);

impl<DI: WriteOnlyDataCommand, SIZE: DisplaySize> Ssd1306Display<DI, SIZE> {
    /// Sets up the panel upside down, the way the pad is usually placed.
    pub fn new(interface: DI, size: SIZE) -> Self {
        let mut display = Ssd1306::new(interface, size, DisplayRotation::Rotate180)
            .into_buffered_graphics_mode();
        if display.init().is_err() {
            defmt::warn!("Failed to initialize the display");
        }
        Ssd1306Display(display)
    }
}

impl<DI: WriteOnlyDataCommand, SIZE: DisplaySize> KeyboardDisplay for Ssd1306Display<DI, SIZE> {
    const REQUIRES_FLUSH: bool = true;

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}

impl<DI: WriteOnlyDataCommand, SIZE: DisplaySize> Dimensions for Ssd1306Display<DI, SIZE> {
    fn bounding_box(&self) -> Rectangle {
        self.0.bounding_box()
    }
}

impl<DI: WriteOnlyDataCommand, SIZE: DisplaySize> DrawTarget for Ssd1306Display<DI, SIZE> {
    type Color = BinaryColor;
    type Error = <Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        self.0.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = BinaryColor>,
    {
        self.0.fill_contiguous(area, colors)
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        DrawTarget::clear(&mut self.0, color)
    }
}
