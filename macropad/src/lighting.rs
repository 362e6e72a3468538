//! Backlight and RGB underglow state.
//!
//! Only the state is kept here; driving LEDs from it is up to the board.
//! Mode numbers, steps and limits follow QMK so keymaps and status screens
//! written against it show the same values.

use crate::keyboard::Key;

/// Number of RGB underglow modes, all effects included.
pub const RGBLIGHT_MODES: u8 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightingConfig {
    pub backlight_levels: u8,
    pub hue_step: u8,
    pub sat_step: u8,
    pub val_step: u8,
    pub val_limit: u8,
}

impl Default for LightingConfig {
    fn default() -> Self {
        LightingConfig {
            backlight_levels: 3,
            hue_step: 8,
            sat_step: 17,
            val_step: 17,
            val_limit: 255,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backlight {
    pub enabled: bool,
    pub level: u8,
    pub breathing: bool,
    levels: u8,
}

impl Backlight {
    pub fn new(levels: u8) -> Self {
        Backlight {
            enabled: true,
            level: levels,
            breathing: false,
            levels,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        if self.level == 0 {
            self.level = self.levels;
        }
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
    }

    pub fn increase(&mut self) {
        if self.level < self.levels {
            self.level += 1;
        }
        self.enabled = self.level != 0;
    }

    pub fn decrease(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.enabled = self.level != 0;
    }

    /// Cycles through the levels, level 0 being off.
    pub fn step(&mut self) {
        self.level = if self.level >= self.levels {
            0
        } else {
            self.level + 1
        };
        self.enabled = self.level != 0;
    }

    pub fn toggle_breathing(&mut self) {
        self.breathing = !self.breathing;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbEffect {
    Static,
    Breathing,
    RainbowMood,
    RainbowSwirl,
    Snake,
    Knight,
    Christmas,
    Gradient,
    Test,
    Alternating,
    Twinkle,
}

impl RgbEffect {
    const ALL: [RgbEffect; 11] = [
        RgbEffect::Static,
        RgbEffect::Breathing,
        RgbEffect::RainbowMood,
        RgbEffect::RainbowSwirl,
        RgbEffect::Snake,
        RgbEffect::Knight,
        RgbEffect::Christmas,
        RgbEffect::Gradient,
        RgbEffect::Test,
        RgbEffect::Alternating,
        RgbEffect::Twinkle,
    ];

    /// First mode number of the effect.
    pub const fn base(self) -> u8 {
        match self {
            RgbEffect::Static => 1,
            RgbEffect::Breathing => 2,
            RgbEffect::RainbowMood => 6,
            RgbEffect::RainbowSwirl => 9,
            RgbEffect::Snake => 15,
            RgbEffect::Knight => 21,
            RgbEffect::Christmas => 24,
            RgbEffect::Gradient => 25,
            RgbEffect::Test => 35,
            RgbEffect::Alternating => 36,
            RgbEffect::Twinkle => 37,
        }
    }

    /// Number of variations, one mode number each.
    pub const fn variations(self) -> u8 {
        match self {
            RgbEffect::Static => 1,
            RgbEffect::Breathing => 4,
            RgbEffect::RainbowMood => 3,
            RgbEffect::RainbowSwirl => 6,
            RgbEffect::Snake => 6,
            RgbEffect::Knight => 3,
            RgbEffect::Christmas => 1,
            RgbEffect::Gradient => 10,
            RgbEffect::Test => 1,
            RgbEffect::Alternating => 1,
            RgbEffect::Twinkle => 6,
        }
    }

    pub fn of_mode(mode: u8) -> Option<RgbEffect> {
        Self::ALL
            .into_iter()
            .find(|effect| (effect.base()..effect.base() + effect.variations()).contains(&mode))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbLight {
    pub enabled: bool,
    pub mode: u8,
    pub hue: u8,
    pub sat: u8,
    pub val: u8,
    pub speed: u8,
}

impl RgbLight {
    const MAX_SPEED: u8 = 3;

    pub fn new(config: &LightingConfig) -> Self {
        RgbLight {
            enabled: true,
            mode: RgbEffect::Static.base(),
            hue: 0,
            sat: 255,
            val: config.val_limit,
            speed: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn set_mode(&mut self, mode: u8) {
        self.mode = mode.clamp(1, RGBLIGHT_MODES);
    }

    pub fn step_mode(&mut self) {
        let mode = if self.mode >= RGBLIGHT_MODES {
            1
        } else {
            self.mode + 1
        };
        self.set_mode(mode);
    }

    pub fn step_mode_reverse(&mut self) {
        let mode = if self.mode <= 1 {
            RGBLIGHT_MODES
        } else {
            self.mode - 1
        };
        self.set_mode(mode);
    }

    /// Switches to `effect`, or steps forward when one of its variations is
    /// on. Stepping past the last variation leaves the effect.
    pub fn select(&mut self, effect: RgbEffect) {
        if (effect.base()..effect.base() + effect.variations()).contains(&self.mode) {
            self.step_mode();
        } else {
            self.set_mode(effect.base());
        }
    }

    pub fn effect(&self) -> Option<RgbEffect> {
        RgbEffect::of_mode(self.mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lighting {
    pub backlight: Backlight,
    pub rgb: RgbLight,
    config: LightingConfig,
}

impl Default for Lighting {
    fn default() -> Self {
        Lighting::new(LightingConfig::default())
    }
}

impl Lighting {
    pub fn new(config: LightingConfig) -> Self {
        Lighting {
            backlight: Backlight::new(config.backlight_levels),
            rgb: RgbLight::new(&config),
            config,
        }
    }

    /// Applies a backlight or RGB key. Returns `false` for any other key.
    pub fn apply(&mut self, key: Key) -> bool {
        let config = self.config;
        let rgb = &mut self.rgb;
        match key {
            Key::BacklightOn => self.backlight.enable(),
            Key::BacklightOff => self.backlight.disable(),
            Key::BacklightToggle => self.backlight.toggle(),
            Key::BacklightDown => self.backlight.decrease(),
            Key::BacklightUp => self.backlight.increase(),
            Key::BacklightStep => self.backlight.step(),
            Key::BacklightToggleBreathing => self.backlight.toggle_breathing(),
            Key::RgbToggle => rgb.toggle(),
            // mode and colour keys do nothing while the light is off
            Key::RgbModeForward
            | Key::RgbModeReverse
            | Key::RgbHueUp
            | Key::RgbHueDown
            | Key::RgbSatUp
            | Key::RgbSatDown
            | Key::RgbValUp
            | Key::RgbValDown
            | Key::RgbModePlain
            | Key::RgbModeBreathe
            | Key::RgbModeRainbow
            | Key::RgbModeSwirl
            | Key::RgbModeSnake
            | Key::RgbModeKnight
            | Key::RgbModeChristmas
            | Key::RgbModeGradient
            | Key::RgbModeTest
            | Key::RgbModeTwinkle
                if !rgb.enabled => {}
            Key::RgbModeForward => rgb.step_mode(),
            Key::RgbModeReverse => rgb.step_mode_reverse(),
            Key::RgbHueUp => rgb.hue = rgb.hue.wrapping_add(config.hue_step),
            Key::RgbHueDown => rgb.hue = rgb.hue.wrapping_sub(config.hue_step),
            Key::RgbSatUp => rgb.sat = rgb.sat.saturating_add(config.sat_step),
            Key::RgbSatDown => rgb.sat = rgb.sat.saturating_sub(config.sat_step),
            Key::RgbValUp => {
                rgb.val = rgb.val.saturating_add(config.val_step).min(config.val_limit)
            }
            Key::RgbValDown => rgb.val = rgb.val.saturating_sub(config.val_step),
            Key::RgbSpeedUp => rgb.speed = (rgb.speed + 1).min(RgbLight::MAX_SPEED),
            Key::RgbSpeedDown => rgb.speed = rgb.speed.saturating_sub(1),
            Key::RgbModePlain => rgb.set_mode(RgbEffect::Static.base()),
            Key::RgbModeBreathe => rgb.select(RgbEffect::Breathing),
            Key::RgbModeRainbow => rgb.select(RgbEffect::RainbowMood),
            Key::RgbModeSwirl => rgb.select(RgbEffect::RainbowSwirl),
            Key::RgbModeSnake => rgb.select(RgbEffect::Snake),
            Key::RgbModeKnight => rgb.select(RgbEffect::Knight),
            Key::RgbModeChristmas => rgb.select(RgbEffect::Christmas),
            Key::RgbModeGradient => rgb.select(RgbEffect::Gradient),
            Key::RgbModeTest => rgb.select(RgbEffect::Test),
            Key::RgbModeTwinkle => rgb.select(RgbEffect::Twinkle),
            _ => return false,
        }
        true
    }
}
