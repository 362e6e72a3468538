pub use macropad_macros::Layer;

pub trait Layer: Copy + Eq + Default {
    fn below(&self) -> Option<Self>;
    fn index(&self) -> u8;
    fn from_index(index: u8) -> Option<Self>;
}

/// Bit set of active layers, bit `n` for layer index `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState(u32);

impl LayerState {
    pub const MAX_LAYERS: u8 = 32;

    pub const fn new(bits: u32) -> Self {
        LayerState(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_on(&self, index: u8) -> bool {
        index < Self::MAX_LAYERS && self.0 & (1 << index) != 0
    }

    pub fn layer_on(&mut self, index: u8) {
        if index < Self::MAX_LAYERS {
            self.0 |= 1 << index;
        }
    }

    /// Turns every layer off except `index`.
    pub fn move_to(&mut self, index: u8) {
        if index < Self::MAX_LAYERS {
            self.0 = 1 << index;
        }
    }

    /// Index of the highest active layer. An empty state reports layer 0.
    pub fn highest_index(&self) -> u8 {
        if self.0 == 0 {
            0
        } else {
            (u32::BITS - 1 - self.0.leading_zeros()) as u8
        }
    }

    pub fn highest<L: Layer>(&self) -> Option<L> {
        L::from_index(self.highest_index())
    }
}
