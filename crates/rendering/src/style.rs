//! Data-driven colors, elevations and stroke sizes for the scene.
//!
//! Defaults reproduce the stock look. The app can replace the resource from
//! a JSON file; any field left out keeps its default.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use simulation::LightState;

use crate::draw_command::Rgb;

/// Floor on the dash period so a zero dash+gap can't produce unbounded dashes.
const MIN_DASH_PERIOD: f32 = 0.1;

/// Lane-boundary paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkingStyle {
    pub color: Rgb,
    /// Height of markings above the road surface.
    pub elevation: f32,
    pub dash_length: f32,
    pub gap_length: f32,
    /// Zoom-dependent floor: `thickness_per_scale * stroke_scale`.
    pub thickness_per_scale: f32,
    /// Zoom-dependent floor: `width_per_scale * stroke_scale`.
    pub width_per_scale: f32,
    pub solid_min_thickness: f32,
    pub solid_min_width: f32,
    pub dashed_min_thickness: f32,
    pub dashed_min_width: f32,
}

impl Default for MarkingStyle {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            elevation: 0.05,
            dash_length: 3.0,
            gap_length: 7.0,
            thickness_per_scale: 0.2,
            width_per_scale: 0.5,
            solid_min_thickness: 0.2,
            solid_min_width: 0.2,
            dashed_min_thickness: 0.1,
            dashed_min_width: 0.5,
        }
    }
}

impl MarkingStyle {
    /// Distance from the start of one dash to the start of the next.
    pub fn dash_period(&self) -> f32 {
        (self.dash_length + self.gap_length).max(MIN_DASH_PERIOD)
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    pub background: Rgb,
    pub road_color: Rgb,
    pub road_elevation: f32,
    pub vehicle_elevation: f32,
    pub junction_color: Rgb,
    pub signalised_junction_color: Rgb,
    pub junction_elevation: f32,
    /// Y scale of junction quads. The quad is flat, so this only matters to
    /// backends that extrude.
    pub junction_thickness: f32,
    pub light_size: f32,
    pub light_elevation: f32,
    pub green_light: Rgb,
    pub yellow_light: Rgb,
    pub red_light: Rgb,
    pub markings: MarkingStyle,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: [0.1, 0.1, 0.1],
            road_color: [0.3, 0.3, 0.3],
            road_elevation: 0.01,
            vehicle_elevation: 0.02,
            junction_color: [0.4, 0.4, 0.4],
            signalised_junction_color: [0.5, 0.5, 0.6],
            junction_elevation: 0.01,
            junction_thickness: 0.5,
            light_size: 2.0,
            light_elevation: 0.5,
            green_light: [0.0, 1.0, 0.0],
            yellow_light: [1.0, 1.0, 0.0],
            red_light: [1.0, 0.0, 0.0],
            markings: MarkingStyle::default(),
        }
    }
}

impl SceneStyle {
    pub fn light_color(&self, state: LightState) -> Rgb {
        match state {
            LightState::Green => self.green_light,
            LightState::Yellow => self.yellow_light,
            LightState::Red => self.red_light,
        }
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::srgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_colors() {
        let style = SceneStyle::default();
        assert_eq!(style.light_color(LightState::Green), [0.0, 1.0, 0.0]);
        assert_eq!(style.light_color(LightState::Yellow), [1.0, 1.0, 0.0]);
        assert_eq!(style.light_color(LightState::Red), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_default_dash_period() {
        assert!((MarkingStyle::default().dash_period() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_period_is_floored() {
        let style = MarkingStyle {
            dash_length: 0.0,
            gap_length: 0.0,
            ..default()
        };
        assert!(style.dash_period() >= MIN_DASH_PERIOD);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let style: SceneStyle =
            serde_json::from_str(r#"{"road_color": [0.2, 0.2, 0.25], "markings": {"gap_length": 5.0}}"#)
                .unwrap();
        assert_eq!(style.road_color, [0.2, 0.2, 0.25]);
        assert_eq!(style.markings.gap_length, 5.0);
        assert_eq!(style.markings.dash_length, 3.0);
        assert_eq!(style.junction_color, SceneStyle::default().junction_color);
    }
}
