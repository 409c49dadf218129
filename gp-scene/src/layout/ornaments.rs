//! This module contains the ball and gift box ornaments.

use super::{random_direction, random_in_shell, TreeShape};
use crate::{Damping, Mode, TwoStateTween};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use strum::EnumIter;

/// The shape of an ornament.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum OrnamentKind {
    /// A shiny gold bauble.
    Ball,

    /// A red gift box.
    Gift,
}

impl OrnamentKind {
    /// Every third ornament is a gift box, starting with the first.
    pub const fn for_index(index: usize) -> Self {
        if index % 3 == 0 {
            Self::Gift
        } else {
            Self::Ball
        }
    }
}

/// The config for the ornaments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrnamentConfig {
    /// How many ornaments to hang on the tree.
    pub count: usize,

    /// The closest a scattered ornament can be to the centre.
    pub scatter_min_radius: f32,

    /// The furthest a scattered ornament can be from the centre.
    pub scatter_max_radius: f32,

    /// How far from the centre the ornaments start, so that the tree assembles itself when the
    /// scene opens.
    pub spawn_radius: f32,

    /// The smallest ornament scale.
    pub min_scale: f32,

    /// The largest ornament scale.
    pub max_scale: f32,

    /// How fast each ornament tumbles about its X axis, in radians per second.
    pub spin_rate: f32,
}

impl Default for OrnamentConfig {
    fn default() -> Self {
        Self {
            count: 100,
            scatter_min_radius: 5.,
            scatter_max_radius: 15.,
            spawn_radius: 20.,
            min_scale: 0.1,
            max_scale: 0.25,
            spin_rate: 0.6,
        }
    }
}

/// A single ornament.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ornament {
    /// Ball or gift.
    pub kind: OrnamentKind,

    /// The uniform scale of the ornament's mesh.
    pub scale: f32,

    /// The current rotation about the X axis, in radians.
    pub spin: f32,

    /// Where the ornament is and where it's going.
    pub tween: TwoStateTween,
}

impl Ornament {
    /// Advance this ornament by one frame and return its new position.
    pub fn update(&mut self, mode: Mode, damping: &Damping, spin_rate: f32, dt: f32) -> Vec3 {
        if dt.is_finite() && dt > 0. {
            self.spin = (self.spin + spin_rate * dt) % TAU;
        }
        self.tween.advance(mode, damping, dt)
    }
}

/// Generate all the ornaments.
pub fn generate<R: Rng + ?Sized>(
    shape: &TreeShape,
    config: &OrnamentConfig,
    rng: &mut R,
) -> Vec<Ornament> {
    (0..config.count)
        .map(|index| {
            let y_ratio: f32 = rng.gen();
            let angle = rng.gen_range(0.0..TAU);
            let tree = shape.surface_point(y_ratio, angle);
            let scattered =
                random_in_shell(rng, config.scatter_min_radius, config.scatter_max_radius);
            let current = random_direction(rng) * config.spawn_radius;

            let scale = if config.max_scale > config.min_scale {
                rng.gen_range(config.min_scale..config.max_scale)
            } else {
                config.min_scale
            };

            Ornament {
                kind: OrnamentKind::for_index(index),
                scale,
                spin: 0.,
                tween: TwoStateTween::new(tree, scattered, current),
            }
        })
        .collect()
}
