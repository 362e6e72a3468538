use heapless::Vec;

use super::{HostLeds, Key, Layer, LayerState};
use crate::lighting::Lighting;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct KeyboardState<L: Layer, const RO: usize> {
    /// Highest active layer, `None` when it is not one of `L`.
    pub layer: Option<L>,
    pub layer_state: LayerState,
    pub keys: Vec<Key, RO>,
    pub lighting: Lighting,
    pub host_leds: HostLeds,
}
