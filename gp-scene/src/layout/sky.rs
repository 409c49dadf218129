//! This module contains the background stars and the sparkles floating around the tree.

use super::random_in_shell;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// The config for the stars and sparkles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkyConfig {
    /// How many background stars to scatter.
    pub star_count: usize,

    /// The inner radius of the shell of stars.
    pub star_radius: f32,

    /// The thickness of the shell of stars.
    pub star_depth: f32,

    /// The radius of a single star.
    pub star_size: f32,

    /// How many sparkles float around the tree.
    pub sparkle_count: usize,

    /// The side length of the cube that the sparkles float in, centred on the origin.
    pub sparkle_scale: f32,

    /// The radius of a single sparkle.
    pub sparkle_size: f32,

    /// How fast the sparkles bob around.
    pub sparkle_speed: f32,

    /// How far a sparkle can drift from its home position.
    pub sparkle_amplitude: f32,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            star_count: 2000,
            star_radius: 100.,
            star_depth: 50.,
            star_size: 0.25,
            sparkle_count: 400,
            sparkle_scale: 15.,
            sparkle_size: 0.03,
            sparkle_speed: 0.5,
            sparkle_amplitude: 0.3,
        }
    }
}

/// Generate the positions of the background stars.
pub fn star_field<R: Rng + ?Sized>(config: &SkyConfig, rng: &mut R) -> Vec<Vec3> {
    (0..config.star_count)
        .map(|_| {
            random_in_shell(
                rng,
                config.star_radius,
                config.star_radius + config.star_depth,
            )
        })
        .collect()
}

/// A point of light that bobs gently around a fixed home position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    /// The centre of the bobbing motion.
    pub home: Vec3,

    /// The offset into the bobbing cycle, so that sparkles don't move in lockstep.
    pub phase: f32,

    /// How fast this sparkle bobs, in radians per second.
    pub speed: f32,

    /// How far this sparkle can drift from `home` along each axis.
    pub amplitude: f32,
}

impl Sparkle {
    /// The position of this sparkle at `t` seconds after the scene started.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let s = t * self.speed + self.phase;
        self.home
            + self.amplitude * Vec3::new(s.sin(), (1.3 * s + self.phase).sin(), (0.7 * s).cos())
    }

    /// How brightly this sparkle twinkles at `t` seconds after the scene started, in `[0, 1]`.
    pub fn brightness_at(&self, t: f32) -> f32 {
        0.5 + 0.5 * (4. * (t * self.speed + self.phase)).sin()
    }
}

/// Generate the sparkles.
pub fn sparkles<R: Rng + ?Sized>(config: &SkyConfig, rng: &mut R) -> Vec<Sparkle> {
    let half = config.sparkle_scale / 2.;

    (0..config.sparkle_count)
        .map(|_| Sparkle {
            home: if half > 0. {
                Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                )
            } else {
                Vec3::ZERO
            },
            phase: rng.gen_range(0.0..TAU),
            speed: config.sparkle_speed * rng.gen_range(0.5..1.5),
            amplitude: config.sparkle_amplitude,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn star_field_test() {
        let config = SkyConfig::default();
        let stars = star_field(&config, &mut StdRng::seed_from_u64(12345));

        assert_eq!(stars.len(), 2000);
        for star in stars {
            let distance = star.length();
            assert!((99.99..150.01).contains(&distance), "{distance}");
        }
    }

    #[test]
    fn sparkles_stay_in_their_box_test() {
        let config = SkyConfig::default();
        let sparkles = sparkles(&config, &mut StdRng::seed_from_u64(12345));
        assert_eq!(sparkles.len(), 400);

        let limit = config.sparkle_scale / 2. + config.sparkle_amplitude + 0.0001;

        for sparkle in sparkles {
            assert!(sparkle.speed > 0.);

            for t in [0., 0.5, 1., 10., 123.456, 10_000.] {
                let p = sparkle.position_at(t);
                assert!(
                    p.x.abs() <= limit && p.y.abs() <= limit && p.z.abs() <= limit,
                    "{p:?} escaped at t = {t}"
                );
                assert!(p.distance(sparkle.home) <= config.sparkle_amplitude * 3f32.sqrt() + 0.0001);

                let brightness = sparkle.brightness_at(t);
                assert!((0.0..=1.0).contains(&brightness), "{brightness}");
            }
        }
    }

    #[test]
    fn sparkles_move_test() {
        let sparkle = Sparkle {
            home: Vec3::new(1., 2., 3.),
            phase: 0.3,
            speed: 0.5,
            amplitude: 0.3,
        };
        assert_ne!(sparkle.position_at(0.), sparkle.position_at(1.));
    }

    #[test]
    fn zero_scale_test() {
        let config = SkyConfig {
            sparkle_count: 3,
            sparkle_scale: 0.,
            ..Default::default()
        };
        for sparkle in sparkles(&config, &mut StdRng::seed_from_u64(1)) {
            assert_eq!(sparkle.home, Vec3::ZERO);
        }
    }
}
