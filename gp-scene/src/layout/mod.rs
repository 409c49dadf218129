//! This module precomputes where every decorative element goes.
//!
//! Every generator takes an explicit RNG, so a seeded [`StdRng`](rand::rngs::StdRng) always
//! produces the same scene.

pub mod foliage;
pub mod ornaments;
pub mod sky;

pub use self::{
    foliage::{FoliageConfig, FoliageParticle},
    ornaments::{Ornament, OrnamentConfig, OrnamentKind},
    sky::{SkyConfig, Sparkle},
};

use crate::SceneConfig;
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use tracing::{debug, instrument};

/// Generate a uniformly distributed unit vector.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // Pick a height on the unit sphere and a longitude, which is uniform by Archimedes' hat-box
    // theorem
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let r = (1. - z * z).max(0.).sqrt();

    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Generate a point scattered somewhere in the shell between `min_radius` and `max_radius`.
pub fn random_in_shell<R: Rng + ?Sized>(rng: &mut R, min_radius: f32, max_radius: f32) -> Vec3 {
    let radius = if max_radius > min_radius {
        rng.gen_range(min_radius..max_radius)
    } else {
        min_radius
    };
    random_direction(rng) * radius
}

/// Find the point on the surface of the tree's cone at the given height and angle.
///
/// `y_ratio` is 0 at the bottom of the tree and 1 at the tip. The cone is centred vertically on
/// the origin, so the tip is at `height / 2`.
pub fn cone_point(y_ratio: f32, angle: f32, base_radius: f32, height: f32) -> Vec3 {
    let r = (1. - y_ratio) * base_radius;
    Vec3::new(angle.cos() * r, (y_ratio - 0.5) * height, angle.sin() * r)
}

/// The size of the cone that the decorations form in [`Mode::Tree`](crate::Mode::Tree).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeShape {
    /// The height from the bottom of the cone to its tip.
    pub height: f32,

    /// The radius of the bottom of the cone.
    pub base_radius: f32,
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 10.,
            base_radius: 3.5,
        }
    }
}

impl TreeShape {
    /// The height of the tip of the tree above the origin.
    pub fn tip_y(&self) -> f32 {
        self.height / 2.
    }

    /// See [`cone_point`].
    pub fn surface_point(&self, y_ratio: f32, angle: f32) -> Vec3 {
        cone_point(y_ratio, angle, self.base_radius, self.height)
    }
}

/// Every precomputed element of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayout {
    /// The balls and gift boxes.
    pub ornaments: Vec<Ornament>,

    /// The particles that make up the body of the tree.
    pub foliage: Vec<FoliageParticle>,

    /// The distant background stars.
    pub stars: Vec<Vec3>,

    /// The floating sparkles around the tree.
    pub sparkles: Vec<Sparkle>,
}

impl SceneLayout {
    /// Generate the whole layout from the config.
    #[instrument(skip_all)]
    pub fn generate<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let ornaments = ornaments::generate(&config.tree, &config.ornaments, rng);
        let foliage = foliage::generate(&config.tree, &config.foliage, rng);
        let stars = sky::star_field(&config.sky, rng);
        let sparkles = sky::sparkles(&config.sky, rng);

        debug!(
            ornaments = ornaments.len(),
            foliage = foliage.len(),
            stars = stars.len(),
            sparkles = sparkles.len(),
            "Generated scene layout"
        );

        Self {
            ornaments,
            foliage,
            stars,
            sparkles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use rand::{rngs::StdRng, SeedableRng};
    use std::f32::consts::PI;

    #[test]
    fn random_direction_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        let mut sum = Vec3::ZERO;

        for _ in 0..5000 {
            let v = random_direction(&mut rng);
            assert!(approx_eq!(f32, v.length(), 1., epsilon = 0.0001));
            sum += v;
        }

        // Uniform on the sphere means the mean should be close to the centre
        assert!((sum / 5000.).length() < 0.05);
    }

    #[test]
    fn random_in_shell_test() {
        let mut rng = StdRng::seed_from_u64(12345);
        for _ in 0..1000 {
            let length = random_in_shell(&mut rng, 5., 15.).length();
            assert!((4.999..15.001).contains(&length), "{length}");
        }

        // A degenerate shell is just a sphere
        let v = random_in_shell(&mut rng, 3., 3.);
        assert!(approx_eq!(f32, v.length(), 3., epsilon = 0.0001));
    }

    #[test]
    fn cone_point_test() {
        let bottom = cone_point(0., 0., 3.5, 10.);
        assert!(approx_eq!(f32, bottom.x, 3.5));
        assert!(approx_eq!(f32, bottom.y, -5.));
        assert!(approx_eq!(f32, bottom.z, 0.));

        let tip = cone_point(1., 1.234, 3.5, 10.);
        assert!(approx_eq!(f32, tip.y, 5.));
        assert!(approx_eq!(f32, Vec3::new(tip.x, 0., tip.z).length(), 0.));

        let middle = cone_point(0.5, PI / 2., 3.5, 10.);
        assert!(approx_eq!(f32, middle.x, 0., epsilon = 0.00001));
        assert!(approx_eq!(f32, middle.y, 0.));
        assert!(approx_eq!(f32, middle.z, 1.75));
    }

    #[test]
    fn tree_shape_test() {
        let shape = TreeShape::default();
        assert_eq!(shape.tip_y(), 5.);
        assert_eq!(shape.surface_point(0.25, 0.), cone_point(0.25, 0., 3.5, 10.));
    }

    #[test]
    fn generate_is_reproducible_test() {
        let config = SceneConfig::default();

        let a = SceneLayout::generate(&config, &mut StdRng::seed_from_u64(2023));
        let b = SceneLayout::generate(&config, &mut StdRng::seed_from_u64(2023));
        let c = SceneLayout::generate(&config, &mut StdRng::seed_from_u64(2024));

        assert_eq!(a, b);
        assert_ne!(a, c);

        assert_eq!(a.ornaments.len(), config.ornaments.count);
        assert_eq!(a.foliage.len(), config.foliage.count);
        assert_eq!(a.stars.len(), config.sky.star_count);
        assert_eq!(a.sparkles.len(), config.sky.sparkle_count);
    }
}
