//! Tunable game parameters.
//!
//! Base values come from `alien_invasion.toml` (every key optional) or the
//! built-in defaults.  The dynamic block is never read from disk: it is reset
//! from the base values at the start of every game and scaled up each time a
//! fleet is cleared.

use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// Largest field side, in cells, that a terminal can plausibly show.
pub const MAX_FIELD_SIDE: i32 = 1000;

/// Horizontal heading shared by the whole fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FleetDirection {
    #[default]
    Right,
    Left,
}

impl FleetDirection {
    pub fn sign(self) -> f32 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

/// Values that change while a game is running.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DynamicSettings {
    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub fleet_direction: FleetDirection,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play-field width in cells.
    pub screen_width: i32,
    /// Play-field height in cells.
    pub screen_height: i32,

    pub ship_speed: f32,
    pub ship_limit: u32,

    pub bullet_speed: f32,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullets_allowed: usize,

    pub alien_speed: f32,
    pub fleet_drop_speed: f32,

    /// Multiplier applied to every dynamic speed when a fleet is cleared.
    pub speedup_scale: f32,

    pub frame_ms: u64,
    /// Length of the freeze after losing a ship.
    pub hit_pause_ms: u64,

    #[serde(skip)]
    pub dynamic: DynamicSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            screen_width: 72,
            screen_height: 20,
            ship_speed: 0.5,
            ship_limit: 3,
            bullet_speed: 0.4,
            bullet_width: 1,
            bullet_height: 1,
            bullets_allowed: 3,
            alien_speed: 0.15,
            fleet_drop_speed: 1.0,
            speedup_scale: 1.1,
            frame_ms: 33,
            hit_pause_ms: 1000,
            dynamic: DynamicSettings::default(),
        };
        settings.initialize_dynamic_settings();
        settings
    }
}

impl Settings {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut settings: Settings = toml::from_str(&data)
            .with_context(|| format!("parse config {}", path.display()))?;
        settings.initialize_dynamic_settings();
        Ok(settings)
    }

    /// Falls back to the defaults when the file is missing or invalid; the
    /// second element carries the reason.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    pub fn initialize_dynamic_settings(&mut self) {
        self.dynamic = DynamicSettings {
            ship_speed: self.ship_speed,
            bullet_speed: self.bullet_speed,
            alien_speed: self.alien_speed,
            fleet_direction: FleetDirection::Right,
        };
    }

    pub fn increase_speed(&mut self) {
        self.dynamic.ship_speed *= self.speedup_scale;
        self.dynamic.bullet_speed *= self.speedup_scale;
        self.dynamic.alien_speed *= self.speedup_scale;
    }

    /// Whole frames covered by `hit_pause_ms`, rounded up.
    pub fn hit_pause_frames(&self) -> u32 {
        if self.frame_ms == 0 {
            return 0;
        }
        u32::try_from(self.hit_pause_ms.div_ceil(self.frame_ms)).unwrap_or(u32::MAX)
    }

    /// Suspicious values that still produce a runnable game.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (label, v) in [
            ("ship_speed", self.ship_speed),
            ("bullet_speed", self.bullet_speed),
            ("alien_speed", self.alien_speed),
        ] {
            if v <= 0.0 {
                warnings.push(format!("{label} must be > 0 (got {v})"));
            }
        }
        if self.fleet_drop_speed < 0.0 {
            warnings.push(format!(
                "fleet_drop_speed negative ({})",
                self.fleet_drop_speed
            ));
        }
        if self.speedup_scale < 1.0 {
            warnings.push(format!(
                "speedup_scale < 1.0 ({}) slows the game down",
                self.speedup_scale
            ));
        }
        if self.ship_limit == 0 {
            warnings.push("ship_limit is 0: the first hit ends the game".to_string());
        }
        if self.bullets_allowed == 0 {
            warnings.push("bullets_allowed is 0: the ship cannot fire".to_string());
        }
        if self.bullet_width <= 0 || self.bullet_height <= 0 {
            warnings.push(format!(
                "bullet size {}x{} cannot hit anything",
                self.bullet_width, self.bullet_height
            ));
        }
        if self.screen_width <= 0 || self.screen_height <= 0 {
            warnings.push(format!(
                "screen size {}x{} is empty",
                self.screen_width, self.screen_height
            ));
        }
        if self.screen_width > MAX_FIELD_SIDE || self.screen_height > MAX_FIELD_SIDE {
            warnings.push(format!(
                "screen size {}x{} exceeds {MAX_FIELD_SIDE} cells per side",
                self.screen_width, self.screen_height
            ));
        }
        if self.frame_ms == 0 {
            warnings.push("frame_ms is 0: the loop will spin".to_string());
        }
        warnings
    }
}
