use heapless::{FnvIndexMap, Vec};

use super::{
    ExternalCommunicator, Key, KeyProcessor, KeySwitches, KeyboardState, Layer, LayerState,
    Layout, TextMacro,
};
use crate::lighting::Lighting;

pub struct Controller<
    const SZ: usize,
    const RO: usize,
    C: ExternalCommunicator,
    K: KeySwitches<SZ, RO>,
    L: Layout<SZ, Identifier = K::Identifier>,
    P: KeyProcessor = (),
> {
    pub communicator: C,
    pub key_switches: K,
    layout: L,
    processor: P,
    layer_state: LayerState,
    lighting: Lighting,
    text_macro: TextMacro,
    keys: Vec<Key, RO>,
    pressed_switches: FnvIndexMap<K::Identifier, L::Layer, 16>,
}

impl<
        const SZ: usize,
        const RO: usize,
        C: ExternalCommunicator,
        K: KeySwitches<SZ, RO>,
        L: Layout<SZ, Identifier = K::Identifier>,
        P: KeyProcessor,
    > Controller<SZ, RO, C, K, L, P>
{
    pub fn new(communicator: C, key_switches: K, layout: L, processor: P) -> Self {
        Controller {
            communicator,
            key_switches,
            layout,
            processor,
            layer_state: LayerState::default(),
            lighting: Lighting::default(),
            text_macro: TextMacro::new(),
            keys: Vec::new(),
            pressed_switches: FnvIndexMap::new(),
        }
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn get_state(&self) -> KeyboardState<L::Layer, RO> {
        KeyboardState {
            layer: self.layer_state.highest(),
            layer_state: self.layer_state,
            keys: self.keys.clone(),
            lighting: self.lighting,
            host_leds: self.communicator.host_leds(),
        }
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }

    pub fn main_loop(&mut self) {
        let switches = self.key_switches.scan();

        // 離されたスイッチは押したときのレイヤで解決する
        let released: Vec<(K::Identifier, L::Layer), 16> = self
            .pressed_switches
            .iter()
            .filter(|(s, _)| !switches.contains(s))
            .map(|(s, l)| (*s, *l))
            .collect();
        for (switch, layer) in released {
            self.pressed_switches.remove(&switch);
            let key = resolve_key(&self.layout, layer, &switch);
            self.handle_event(key, false);
        }

        for switch in switches.iter() {
            if self.pressed_switches.contains_key(switch) {
                continue;
            }
            // a layer move earlier in this scan applies to later presses
            let layer = self.layer_state.highest::<L::Layer>().unwrap_or_default();
            if self.pressed_switches.insert(*switch, layer).is_err() {
                crate::warn!("Too many switches pressed, ignoring one");
                continue;
            }
            let key = resolve_key(&self.layout, layer, switch);
            self.handle_event(key, true);
        }

        // キーの決定
        let switches_and_layers: Vec<_, RO> = switches
            .iter()
            .filter_map(|s| self.pressed_switches.get(s).map(|l| (s, *l)))
            .collect();
        let keys = determine_keys(&self.layout, &switches_and_layers);
        let keys = filter_keys(keys);

        if !keys.is_empty() {
            crate::debug!("{:?}", keys.as_slice());
        }

        self.keys = keys;
    }

    /// Sends the next text macro step, or the held keys when no macro is
    /// pending.
    pub fn send_keys(&mut self) -> Result<(), C::Error> {
        if !self.communicator.is_ready() {
            return Ok(());
        }

        if let Some(step) = self.text_macro.next_step() {
            return self.communicator.send_keys(&step);
        }
        self.communicator.send_keys(&self.keys)
    }

    fn handle_event(&mut self, key: Key, pressed: bool) {
        if key.is_noop() {
            return;
        }
        if !self
            .processor
            .process_key(key, pressed, &mut self.text_macro)
        {
            return;
        }
        if !pressed {
            return;
        }

        if let Some(index) = key.layer_target() {
            self.layer_state.move_to(index);
            crate::info!("Moved to layer {}", index);
        } else if self.lighting.apply(key) {
            crate::debug!("Lighting changed by {:?}", key);
        }
    }
}

/// 透過キーは下のレイヤにフォールバックする
fn resolve_key<L: Layout<SZ>, const SZ: usize>(
    layout: &L,
    mut layer: L::Layer,
    switch: &L::Identifier,
) -> Key {
    let mut key = layout.key(layer, switch);
    while key == Key::Transparent {
        if let Some(below) = layer.below() {
            assert!(
                layer != below,
                "{}.below() does not change layer",
                stringify!(L::Layer)
            );
            layer = below;
            key = layout.key(layer, switch);
        } else {
            break;
        }
    }
    key
}

fn determine_keys<L: Layout<SZ>, const SZ: usize, const RO: usize>(
    layout: &L,
    switches_and_layers: &[(&L::Identifier, L::Layer)],
) -> Vec<Key, RO> {
    switches_and_layers
        .iter()
        .map(|(switch, layer)| resolve_key(layout, *layer, switch))
        .filter(Key::is_reportable)
        .collect::<Vec<Key, RO>>()
}

fn filter_keys<const RO: usize>(mut keys: Vec<Key, RO>) -> Vec<Key, RO> {
    if keys.iter().any(|k| !k.is_modified_key()) {
        // 修飾済みキー以外が押されているときは、修飾済みキーは無効化する
        keys.retain(|k| !k.is_modified_key());
    }
    keys
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;
    use std::vec::Vec as StdVec;

    use super::*;
    use crate::keyboard::{HostLeds, KeySwitchIdentifier};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    struct Switch(u8);

    impl From<[u8; 1]> for Switch {
        fn from(value: [u8; 1]) -> Self {
            Switch(value[0])
        }
    }

    impl From<Switch> for [u8; 1] {
        fn from(value: Switch) -> Self {
            [value.0]
        }
    }

    impl KeySwitchIdentifier<1> for Switch {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    enum TestLayer {
        #[default]
        Base,
        Upper,
    }

    impl Layer for TestLayer {
        fn below(&self) -> Option<Self> {
            match self {
                TestLayer::Base => None,
                TestLayer::Upper => Some(TestLayer::Base),
            }
        }

        fn index(&self) -> u8 {
            *self as u8
        }

        fn from_index(index: u8) -> Option<Self> {
            match index {
                0 => Some(TestLayer::Base),
                1 => Some(TestLayer::Upper),
                _ => None,
            }
        }
    }

    /// Base: A, ToLayer1, LeftShift, Ctrl_C, BacklightToggle
    /// Upper: B, ToLayer0, Transparent, Ctrl_C, BacklightToggle
    struct TestLayout;

    impl Layout<1> for TestLayout {
        type Identifier = Switch;
        type Layer = TestLayer;

        fn key(&self, layer: TestLayer, switch: &Switch) -> Key {
            match (layer, switch.0) {
                (TestLayer::Base, 0) => Key::A,
                (TestLayer::Base, 1) => Key::ToLayer1,
                (TestLayer::Base, 2) => Key::LeftShift,
                (TestLayer::Upper, 0) => Key::B,
                (TestLayer::Upper, 1) => Key::ToLayer0,
                (TestLayer::Upper, 2) => Key::Transparent,
                (_, 3) => Key::Ctrl_C,
                (_, 4) => Key::BacklightToggle,
                (_, 5) => Key::User0,
                _ => Key::None,
            }
        }
    }

    #[derive(Default)]
    struct ScriptedSwitches {
        pressed: StdVec<u8>,
    }

    impl KeySwitches<1, 6> for ScriptedSwitches {
        type Identifier = Switch;

        fn scan(&mut self) -> Vec<Switch, 6> {
            self.pressed.iter().map(|&s| Switch(s)).collect()
        }
    }

    #[derive(Default)]
    struct RecordingCommunicator {
        ready: bool,
        reports: RefCell<StdVec<StdVec<Key>>>,
    }

    impl ExternalCommunicator for RecordingCommunicator {
        type Error = ();

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn send_keys(&self, keys: &[Key]) -> Result<(), ()> {
            self.reports.borrow_mut().push(keys.to_vec());
            Ok(())
        }

        fn host_leds(&self) -> HostLeds {
            HostLeds::from(0x02)
        }
    }

    /// Records events and types "dd" when User0 goes down.
    #[derive(Default)]
    struct RecordingProcessor {
        events: StdVec<(Key, bool)>,
        swallow: Option<Key>,
    }

    impl KeyProcessor for RecordingProcessor {
        fn process_key(&mut self, key: Key, pressed: bool, text: &mut TextMacro) -> bool {
            self.events.push((key, pressed));
            if key == Key::User0 && pressed {
                text.send_string("dd").unwrap();
            }
            self.swallow != Some(key)
        }
    }

    type TestController = Controller<
        1,
        6,
        RecordingCommunicator,
        ScriptedSwitches,
        TestLayout,
        RecordingProcessor,
    >;

    fn controller() -> TestController {
        let communicator = RecordingCommunicator {
            ready: true,
            ..Default::default()
        };
        Controller::new(
            communicator,
            ScriptedSwitches::default(),
            TestLayout,
            RecordingProcessor::default(),
        )
    }

    fn scan(controller: &mut TestController, pressed: &[u8]) {
        controller.key_switches.pressed = pressed.to_vec();
        controller.main_loop();
    }

    #[test]
    fn press_and_release_are_reported_once() {
        let mut controller = controller();
        scan(&mut controller, &[0]);
        scan(&mut controller, &[0]);
        scan(&mut controller, &[]);
        assert_eq!(
            controller.processor().events,
            vec![(Key::A, true), (Key::A, false)]
        );
    }

    #[test]
    fn layer_move_is_persistent() {
        let mut controller = controller();
        scan(&mut controller, &[1]);
        scan(&mut controller, &[]);
        assert_eq!(controller.get_state().layer, Some(TestLayer::Upper));

        scan(&mut controller, &[0]);
        assert_eq!(controller.get_state().keys.as_slice(), &[Key::B]);

        scan(&mut controller, &[1]);
        scan(&mut controller, &[]);
        assert_eq!(controller.get_state().layer, Some(TestLayer::Base));
        assert_eq!(controller.get_state().layer_state.bits(), 0b01);
    }

    #[test]
    fn release_uses_layer_of_press() {
        let mut controller = controller();
        scan(&mut controller, &[1]);
        scan(&mut controller, &[]);
        assert_eq!(
            controller.processor().events,
            vec![(Key::ToLayer1, true), (Key::ToLayer1, false)]
        );
    }

    #[test]
    fn transparent_falls_through() {
        let mut controller = controller();
        scan(&mut controller, &[1]);
        scan(&mut controller, &[]);
        scan(&mut controller, &[2]);
        assert_eq!(controller.get_state().keys.as_slice(), &[Key::LeftShift]);
    }

    #[test]
    fn modified_keys_yield_to_plain_keys() {
        let mut controller = controller();
        scan(&mut controller, &[3]);
        assert_eq!(controller.get_state().keys.as_slice(), &[Key::Ctrl_C]);
        scan(&mut controller, &[3, 0]);
        assert_eq!(controller.get_state().keys.as_slice(), &[Key::A]);
    }

    #[test]
    fn firmware_keys_are_not_held_in_reports() {
        let mut controller = controller();
        scan(&mut controller, &[4, 5]);
        assert!(controller.get_state().keys.is_empty());
        assert!(!controller.get_state().lighting.backlight.enabled);
    }

    #[test]
    fn processor_can_swallow_builtin_handling() {
        let mut controller = controller();
        controller.processor.swallow = Some(Key::ToLayer1);
        scan(&mut controller, &[1]);
        assert_eq!(controller.get_state().layer, Some(TestLayer::Base));
    }

    #[test]
    fn text_macro_is_sent_before_held_keys() {
        let mut controller = controller();
        scan(&mut controller, &[5, 0]);
        for _ in 0..5 {
            controller.send_keys().unwrap();
        }
        assert_eq!(
            *controller.communicator.reports.borrow(),
            vec![
                vec![Key::D],
                vec![],
                vec![Key::D],
                vec![],
                vec![Key::A],
            ]
        );
    }

    #[test]
    fn nothing_is_sent_until_ready() {
        let mut controller = controller();
        controller.communicator.ready = false;
        scan(&mut controller, &[5]);
        controller.send_keys().unwrap();
        assert!(controller.communicator.reports.borrow().is_empty());

        controller.communicator.ready = true;
        controller.send_keys().unwrap();
        assert_eq!(*controller.communicator.reports.borrow(), vec![vec![Key::D]]);
    }

    #[test]
    fn state_carries_host_leds() {
        let controller = controller();
        let state = controller.get_state();
        assert!(state.host_leds.caps_lock);
        assert!(!state.host_leds.num_lock);
    }
}
