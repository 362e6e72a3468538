use embedded_hal::digital::InputPin;
use macropad::{keyboard::KeySwitches, Vec};
use macropad8_vim::KeySwitchIdentifier;
use rp2040_hal::gpio::{DynPinId, FunctionSioInput, Pin, PullUp};

pub type SwitchPin = Pin<DynPinId, FunctionSioInput, PullUp>;

/// One GPIO per switch, wired to ground. A pressed switch reads low.
pub struct DirectPins<const ROWS: usize, const COLS: usize> {
    pins: [[SwitchPin; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> DirectPins<ROWS, COLS> {
    pub fn new(pins: [[SwitchPin; COLS]; ROWS]) -> Self {
        DirectPins { pins }
    }
}

impl<const ROWS: usize, const COLS: usize, const RO: usize> KeySwitches<2, RO>
    for DirectPins<ROWS, COLS>
{
    type Identifier = KeySwitchIdentifier;

    fn scan(&mut self) -> Vec<Self::Identifier, RO> {
        let mut keys = Vec::<Self::Identifier, RO>::new();
        for (row, pins) in self.pins.iter_mut().enumerate() {
            for (col, pin) in pins.iter_mut().enumerate() {
                if pin.is_low().unwrap_or_default() {
                    keys.push(KeySwitchIdentifier {
                        row: row as u8,
                        col: col as u8,
                    })
                    .ok();
                }
            }
        }
        keys
    }
}
