//! This module contains the star on top of the tree.

use crate::Mode;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// The config for the top star.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    /// The height of the star when the decorations form a tree.
    pub tree_height: f32,

    /// The height of the star when the decorations are scattered, usually out of view.
    pub scattered_height: f32,

    /// The radius of the star's sphere.
    pub radius: f32,

    /// How fast the star turns about the vertical axis, in radians per second.
    pub spin_rate: f32,

    /// The intensity of the star's point light.
    pub light_intensity: f32,

    /// The range of the star's point light.
    pub light_range: f32,

    /// How brightly the star's surface glows, as a multiple of its colour.
    pub emissive_strength: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            tree_height: 5.5,
            scattered_height: 20.,
            radius: 0.4,
            spin_rate: 1.2,
            light_intensity: 2000.,
            light_range: 10.,
            emissive_strength: 2.,
        }
    }
}

impl StarConfig {
    /// The height of the star in the given mode. The star jumps straight there rather than
    /// easing.
    pub const fn height(&self, mode: Mode) -> f32 {
        match mode {
            Mode::Tree => self.tree_height,
            Mode::Scattered => self.scattered_height,
        }
    }
}

/// The animation state of the top star.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TopStar {
    /// The rotation about the vertical axis, in radians.
    pub yaw: f32,
}

impl TopStar {
    /// Advance the star by one frame and return its height and yaw.
    pub fn update(&mut self, config: &StarConfig, mode: Mode, dt: f32) -> (f32, f32) {
        if dt.is_finite() && dt > 0. {
            self.yaw = (self.yaw + config.spin_rate * dt) % TAU;
        }
        (config.height(mode), self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn height_test() {
        let config = StarConfig::default();
        assert_eq!(config.height(Mode::Tree), 5.5);
        assert_eq!(config.height(Mode::Scattered), 20.);
    }

    #[test]
    fn update_test() {
        let config = StarConfig::default();
        let mut star = TopStar::default();

        let (height, yaw) = star.update(&config, Mode::Tree, 0.5);
        assert_eq!(height, 5.5);
        assert!(approx_eq!(f32, yaw, 0.6));

        // The height jumps immediately, but the spin keeps going
        let (height, yaw) = star.update(&config, Mode::Scattered, 0.5);
        assert_eq!(height, 20.);
        assert!(approx_eq!(f32, yaw, 1.2, epsilon = 0.000001));

        // The yaw wraps around instead of growing forever
        for _ in 0..1000 {
            star.update(&config, Mode::Tree, 0.1);
        }
        assert!((0.0..TAU).contains(&star.yaw));

        let before = star;
        star.update(&config, Mode::Tree, -1.);
        assert_eq!(star, before);
    }
}
