//! Tunables for the animation
//!
//! Persisted to LocalStorage on the web target; all values are static once
//! the loop is running (there is no runtime reconfiguration).

use serde::{Deserialize, Serialize};

/// Animation settings
///
/// Field defaults are the stock tuning. Brightness and lightness values are
/// HSL percentages (0-100); transparency is an alpha in 0-1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // === Bullets ===
    /// Per-tick speed multiplier. 1.0 keeps bullets at constant speed;
    /// higher values make long flights arrive faster.
    pub bullet_acceleration: f32,
    /// Bullet brightness range (HSL lightness %)
    pub bullet_brightness_min: f32,
    pub bullet_brightness_max: f32,
    /// Base bullet speed (pixels per tick before acceleration)
    pub bullet_speed: f32,
    /// Number of past positions kept for the bullet trail stroke
    pub bullet_trail_length: usize,
    /// Draw the pulsing target reticle at each bullet's end point
    pub bullet_reticle_enabled: bool,

    // === Impacts ===
    /// Impact brightness range (HSL lightness %)
    pub impact_brightness_min: f32,
    pub impact_brightness_max: f32,
    /// Fragments spawned per detonation
    pub impact_count: u32,
    /// Per-tick transparency decay range; each impact fixes a rate at creation
    pub impact_decay_min: f32,
    pub impact_decay_max: f32,
    /// Per-tick speed multiplier (exponential slowdown)
    pub impact_friction: f32,
    /// Constant downward pull added to the Y component each tick
    pub impact_gravity: f32,
    /// Impact hue is the global hue plus/minus this variance (degrees)
    pub impact_hue_variance: f32,
    /// Starting transparency for every impact
    pub impact_transparency: f32,
    /// Initial outward speed range
    pub impact_speed_min: f32,
    pub impact_speed_max: f32,
    /// Number of past positions kept for the impact trail stroke
    pub impact_trail_length: usize,

    // === Canvas ===
    /// Alpha of the per-frame erasing fill. Lower values keep trails longer.
    pub fade_alpha: f32,
    /// Global hue advance per tick (degrees)
    pub hue_step: f32,

    // === Launch cadence ===
    /// Minimum ticks between manual (pointer-held) launches
    pub manual_launch_ticks_min: u32,
    /// Automated launch threshold is redrawn each tick from this range
    pub auto_launch_ticks_min: u32,
    pub auto_launch_ticks_max: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bullet_acceleration: 1.05,
            bullet_brightness_min: 50.0,
            bullet_brightness_max: 70.0,
            bullet_speed: 1.0,
            bullet_trail_length: 3,
            bullet_reticle_enabled: true,

            impact_brightness_min: 50.0,
            impact_brightness_max: 80.0,
            impact_count: 20,
            impact_decay_min: 0.1,
            impact_decay_max: 0.5,
            impact_friction: 0.95,
            impact_gravity: 0.7,
            impact_hue_variance: 20.0,
            impact_transparency: 1.0,
            impact_speed_min: 1.0,
            impact_speed_max: 10.0,
            impact_trail_length: 3,

            fade_alpha: 0.01,
            hue_step: 0.5,

            manual_launch_ticks_min: 5,
            auto_launch_ticks_min: 20,
            auto_launch_ticks_max: 50,
        }
    }
}

impl Settings {
    /// Startup validation. The sim itself has no recoverable-error domain,
    /// so a bad stored blob is rejected here and replaced with defaults.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("bullet_acceleration", self.bullet_acceleration),
            ("bullet_brightness_min", self.bullet_brightness_min),
            ("bullet_brightness_max", self.bullet_brightness_max),
            ("bullet_speed", self.bullet_speed),
            ("impact_brightness_min", self.impact_brightness_min),
            ("impact_brightness_max", self.impact_brightness_max),
            ("impact_decay_min", self.impact_decay_min),
            ("impact_decay_max", self.impact_decay_max),
            ("impact_friction", self.impact_friction),
            ("impact_gravity", self.impact_gravity),
            ("impact_hue_variance", self.impact_hue_variance),
            ("impact_transparency", self.impact_transparency),
            ("impact_speed_min", self.impact_speed_min),
            ("impact_speed_max", self.impact_speed_max),
            ("fade_alpha", self.fade_alpha),
            ("hue_step", self.hue_step),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(format!("{name} is not finite"));
            }
        }

        if self.bullet_speed <= 0.0 {
            return Err("bullet_speed must be positive".into());
        }
        if self.bullet_acceleration < 1.0 {
            return Err("bullet_acceleration must be >= 1.0".into());
        }
        if self.bullet_brightness_min > self.bullet_brightness_max {
            return Err("bullet brightness range is inverted".into());
        }
        if self.impact_brightness_min > self.impact_brightness_max {
            return Err("impact brightness range is inverted".into());
        }
        if self.impact_decay_min <= 0.0 || self.impact_decay_min > self.impact_decay_max {
            return Err("impact decay range is empty or non-positive".into());
        }
        if !(0.0..=1.0).contains(&self.impact_friction) {
            return Err("impact_friction must be in 0..=1".into());
        }
        if self.impact_speed_min > self.impact_speed_max {
            return Err("impact speed range is inverted".into());
        }
        if !(0.0..=1.0).contains(&self.fade_alpha) {
            return Err("fade_alpha must be in 0..=1".into());
        }
        if self.auto_launch_ticks_min > self.auto_launch_ticks_max {
            return Err("automated launch tick range is inverted".into());
        }
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "skyburst_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) => match settings.validate() {
                        Ok(()) => {
                            log::info!("Loaded settings from LocalStorage");
                            return settings;
                        }
                        Err(reason) => {
                            log::warn!("Stored settings rejected ({reason}); using defaults");
                        }
                    },
                    Err(err) => {
                        log::warn!("Stored settings unreadable ({err}); using defaults");
                    }
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let mut s = Settings::default();
        s.impact_speed_min = 20.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.auto_launch_ticks_min = 100;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut s = Settings::default();
        s.fade_alpha = f32::NAN;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_decay() {
        // A zero decay rate would make impacts immortal
        let mut s = Settings::default();
        s.impact_decay_min = 0.0;
        assert!(s.validate().is_err());
    }
}
