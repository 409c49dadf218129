//! This module contains the particle cloud that forms the body of the tree.

use super::{random_in_shell, TreeShape};
use crate::{Damping, Mode, TwoStateTween};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// The colour of a single foliage particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoliageTint {
    /// The deep green of the needles.
    Emerald,

    /// A glint of gold scattered through the needles.
    Gold,
}

/// The config for the foliage particles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoliageConfig {
    /// How many particles make up the tree.
    pub count: usize,

    /// The fraction of particles which are gold rather than emerald. Must be in `[0, 1]`.
    pub gold_fraction: f32,

    /// The radius of each particle.
    pub particle_radius: f32,

    /// The closest a scattered particle can be to the centre.
    pub scatter_min_radius: f32,

    /// The furthest a scattered particle can be from the centre.
    pub scatter_max_radius: f32,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            count: 1200,
            gold_fraction: 0.1,
            particle_radius: 0.035,
            scatter_min_radius: 5.,
            scatter_max_radius: 15.,
        }
    }
}

/// A single foliage particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliageParticle {
    /// The colour of the particle.
    pub tint: FoliageTint,

    /// Where the particle is and where it's going.
    pub tween: TwoStateTween,
}

impl FoliageParticle {
    /// Advance this particle by one frame and return its new position.
    pub fn update(&mut self, mode: Mode, damping: &Damping, dt: f32) -> Vec3 {
        self.tween.advance(mode, damping, dt)
    }
}

/// Generate all the foliage particles.
///
/// Unlike ornaments, which hang on the surface of the cone, these fill its volume. Particles
/// start in their tree positions, so the body of the tree is already there when the scene opens.
pub fn generate<R: Rng + ?Sized>(
    shape: &TreeShape,
    config: &FoliageConfig,
    rng: &mut R,
) -> Vec<FoliageParticle> {
    (0..config.count)
        .map(|_| {
            let y_ratio: f32 = rng.gen();
            let angle = rng.gen_range(0.0..TAU);

            // The square root spreads the particles evenly over the disc at this height instead
            // of bunching them around the trunk
            let depth = rng.gen::<f32>().sqrt();
            let surface = shape.surface_point(y_ratio, angle);
            let tree = Vec3::new(surface.x * depth, surface.y, surface.z * depth);

            let scattered =
                random_in_shell(rng, config.scatter_min_radius, config.scatter_max_radius);

            let tint = if rng.gen::<f32>() < config.gold_fraction {
                FoliageTint::Gold
            } else {
                FoliageTint::Emerald
            };

            FoliageParticle {
                tint,
                tween: TwoStateTween::new(tree, scattered, tree),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn generate_test() {
        let shape = TreeShape::default();
        let config = FoliageConfig::default();
        let particles = generate(&shape, &config, &mut StdRng::seed_from_u64(12345));

        assert_eq!(particles.len(), 1200);

        for particle in &particles {
            let tree = particle.tween.tree();
            assert!((-5.0..=5.0).contains(&tree.y), "{tree:?}");

            let y_ratio = tree.y / shape.height + 0.5;
            let max_radius = (1. - y_ratio) * shape.base_radius;
            assert!(
                Vec3::new(tree.x, 0., tree.z).length() <= max_radius + 0.0001,
                "{tree:?} is outside the cone"
            );

            assert_eq!(particle.tween.current(), tree);
            assert!(particle.tween.is_settled(Mode::Tree, 0.));

            let scattered = particle.tween.scattered().length();
            assert!((4.999..15.001).contains(&scattered), "{scattered}");
        }

        // With 1200 samples, the gold fraction should be close to the config
        let gold = particles
            .iter()
            .filter(|p| p.tint == FoliageTint::Gold)
            .count() as f32
            / 1200.;
        assert!((0.06..0.14).contains(&gold), "{gold}");
    }

    #[test]
    fn gold_fraction_extremes_test() {
        let shape = TreeShape::default();
        let mut rng = StdRng::seed_from_u64(99);

        let all_emerald = FoliageConfig {
            count: 200,
            gold_fraction: 0.,
            ..Default::default()
        };
        assert!(generate(&shape, &all_emerald, &mut rng)
            .iter()
            .all(|p| p.tint == FoliageTint::Emerald));

        let all_gold = FoliageConfig {
            count: 200,
            gold_fraction: 1.,
            ..Default::default()
        };
        assert!(generate(&shape, &all_gold, &mut rng)
            .iter()
            .all(|p| p.tint == FoliageTint::Gold));
    }

    #[test]
    fn update_test() {
        let mut particle = generate(
            &TreeShape::default(),
            &FoliageConfig::default(),
            &mut StdRng::seed_from_u64(3),
        )[0];
        let before = particle.tween.current().distance(particle.tween.scattered());

        let position = particle.update(Mode::Scattered, &Damping::Exponential { k: 3. }, 0.1);
        assert!(position.distance(particle.tween.scattered()) < before);
    }
}
