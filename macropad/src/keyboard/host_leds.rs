/// Keyboard LED output report sent by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostLeds {
    pub num_lock: bool,
    pub caps_lock: bool,
    pub scroll_lock: bool,
    pub compose: bool,
    pub kana: bool,
}

impl From<u8> for HostLeds {
    fn from(value: u8) -> Self {
        HostLeds {
            num_lock: value & 0x01 != 0,
            caps_lock: value & 0x02 != 0,
            scroll_lock: value & 0x04 != 0,
            compose: value & 0x08 != 0,
            kana: value & 0x10 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_led_report_bits() {
        let leds = HostLeds::from(0b0000_0010);
        assert!(leds.caps_lock);
        assert!(!leds.num_lock);

        let leds = HostLeds::from(0b0001_0101);
        assert!(leds.num_lock);
        assert!(leds.scroll_lock);
        assert!(leds.kana);
        assert!(!leds.caps_lock);
        assert!(!leds.compose);
    }
}
