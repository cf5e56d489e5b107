use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::tween::{Easing, Timing};

/// Animation timing table: one entry per visual step of the game flow.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Animations {
    /// Settling the carousel onto an integer index after a horizontal release.
    pub carousel_snap: Timing,
    /// Returning the active card to center after a short vertical drag.
    pub snap_back: Timing,
    /// Slightly longer return used when the card was dragged but missed the pocket.
    pub snap_back_extended: Timing,
    /// Active card falling off-screen into the pocket.
    pub card_drop: Timing,
    /// Whole carousel fading out after the drop.
    pub container_fade: Timing,
    /// Pocket fading away before the result is revealed.
    pub pocket_fade: Timing,
    /// Result panel fade/slide in. Carries the reveal delay.
    pub result_show: Timing,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            carousel_snap: Timing::new(500, Easing::CubicOut),
            snap_back: Timing::new(280, Easing::QuadOut),
            snap_back_extended: Timing::new(320, Easing::QuadOut),
            card_drop: Timing::new(600, Easing::BackIn),
            container_fade: Timing::new(400, Easing::QuadIn),
            pocket_fade: Timing::new(100, Easing::QuadOut),
            result_show: Timing::new(800, Easing::QuadIn).with_delay(1000),
        }
    }
}

/// Session configuration. Built once at start, validated once, never mutated
/// mid-session. Missing fields deserialize to the documented defaults rather
/// than being coerced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub item_width: f32,
    pub item_height: f32,
    pub spacing_x: f32,
    /// Parabolic lift: off-center cards drop by `position² * curve_intensity`.
    pub curve_intensity: f32,
    /// Rotation lookup table keyed by |position|; clamped past the last entry.
    pub angles: Vec<f32>,
    /// Horizontal travel beyond which a release nudges the snap index by one.
    pub swipe_threshold: f32,
    /// Vertical travel below which a release snaps straight back.
    pub vertical_threshold: f32,
    /// Dead zone under which pointer travel stays unclassified.
    pub gesture_dead_zone: f32,
    /// Pixels of horizontal drag per unit of carousel offset.
    pub drag_sensitivity: f32,
    /// Rubber-band factor applied to vertical drag displacement.
    pub vertical_drag_multiplier: f32,
    /// Downward travel consumed before the card starts following the drag.
    pub vertical_drag_slack: f32,
    pub min_scale: f32,
    pub scale_step: f32,
    pub z_index_base: f32,
    pub z_index_step: f32,
    /// Floor on the visible dispensing time when opening a single pack.
    pub minimum_dispense_ms: u64,
    /// Floor variant used by the open-all flow.
    pub minimum_dispense_all_ms: u64,
    pub fetch_timeout_ms: u64,
    pub animations: Animations,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            item_width: 138.0,
            item_height: 185.0,
            spacing_x: 140.0,
            curve_intensity: 40.0,
            angles: vec![0.0, -20.0, -40.0, -65.0, -90.0],
            swipe_threshold: 30.0,
            vertical_threshold: 60.0,
            gesture_dead_zone: 12.0,
            drag_sensitivity: 480.0,
            vertical_drag_multiplier: 0.65,
            vertical_drag_slack: 20.0,
            min_scale: 0.5,
            scale_step: 0.1,
            z_index_base: 100.0,
            z_index_step: 10.0,
            minimum_dispense_ms: 2600,
            minimum_dispense_all_ms: 4600,
            fetch_timeout_ms: 65_000,
            animations: Animations::default(),
        }
    }
}

impl GameConfig {
    /// Preset scaled for terminal-cell viewports. Same shape, cell units.
    pub fn compact() -> Self {
        Self {
            item_width: 13.0,
            item_height: 9.0,
            spacing_x: 14.0,
            curve_intensity: 1.5,
            swipe_threshold: 3.0,
            vertical_threshold: 4.0,
            gesture_dead_zone: 1.0,
            drag_sensitivity: 24.0,
            vertical_drag_slack: 1.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.angles.len() < 2 {
            return Err(ConfigError::AngleTableTooShort(self.angles.len()));
        }
        for (name, value) in [
            ("item_width", self.item_width),
            ("item_height", self.item_height),
            ("spacing_x", self.spacing_x),
            ("drag_sensitivity", self.drag_sensitivity),
            ("vertical_drag_multiplier", self.vertical_drag_multiplier),
            ("min_scale", self.min_scale),
            ("swipe_threshold", self.swipe_threshold),
            ("vertical_threshold", self.vertical_threshold),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }

    pub fn minimum_dispense(&self) -> Duration {
        Duration::from_millis(self.minimum_dispense_ms)
    }

    pub fn minimum_dispense_all(&self) -> Duration {
        Duration::from_millis(self.minimum_dispense_all_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::compact().validate().is_ok());
    }

    #[test]
    fn test_short_angle_table_rejected() {
        let config = GameConfig {
            angles: vec![0.0],
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AngleTableTooShort(1))
        );
    }

    #[test]
    fn test_non_positive_dimension_rejected() {
        let config = GameConfig {
            item_width: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "item_width",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"spacingX": 90.0, "dragSensitivity": 240.0}"#).unwrap();
        assert_eq!(config.spacing_x, 90.0);
        assert_eq!(config.drag_sensitivity, 240.0);
        assert_eq!(config.item_width, 138.0);
        assert_eq!(config.angles, vec![0.0, -20.0, -40.0, -65.0, -90.0]);
        assert_eq!(config.fetch_timeout_ms, 65_000);
    }
}
