//! This module handles moving decorations between their two precomputed positions.

use crate::Mode;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How quickly a decoration closes the gap to its target each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Damping {
    /// Cover `rate * dt` of the remaining distance per frame, capped at the whole distance.
    Linear {
        /// The fraction of the remaining distance covered per second.
        rate: f32,
    },

    /// Cover `1 - exp(-k * dt)` of the remaining distance per frame. This is framerate
    /// independent, unlike [`Damping::Linear`].
    Exponential {
        /// The decay constant, in units of 1/s.
        k: f32,
    },
}

impl Default for Damping {
    fn default() -> Self {
        Self::Linear { rate: 2. }
    }
}

impl Damping {
    /// The fraction of the remaining distance to cover in a frame lasting `dt` seconds.
    ///
    /// This is always in `[0, 1]`, so a step can never overshoot its target.
    pub fn factor(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt <= 0. {
            return 0.;
        }

        let factor = match *self {
            Self::Linear { rate } => rate * dt,
            Self::Exponential { k } => 1. - (-k * dt).exp(),
        };

        // An overflow to infinity still means "go all the way"
        if factor.is_nan() {
            0.
        } else {
            factor.clamp(0., 1.)
        }
    }

    /// Move `current` towards `target` for a frame lasting `dt` seconds.
    pub fn step(&self, current: Vec3, target: Vec3, dt: f32) -> Vec3 {
        current.lerp(target, self.factor(dt))
    }

    /// Check that the damping constant is positive and finite.
    pub fn is_valid(&self) -> bool {
        let c = match *self {
            Self::Linear { rate } => rate,
            Self::Exponential { k } => k,
        };
        c.is_finite() && c > 0.
    }
}

/// A position that moves towards one of two fixed targets, depending on the [`Mode`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwoStateTween {
    /// Where this element sits when the decorations form a tree.
    tree: Vec3,

    /// Where this element sits when the decorations are scattered.
    scattered: Vec3,

    /// Where this element is right now.
    current: Vec3,
}

impl TwoStateTween {
    /// Create a new tween which starts at `current`.
    pub const fn new(tree: Vec3, scattered: Vec3, current: Vec3) -> Self {
        Self {
            tree,
            scattered,
            current,
        }
    }

    /// The position for the tree.
    pub const fn tree(&self) -> Vec3 {
        self.tree
    }

    /// The position for the scattered cloud.
    pub const fn scattered(&self) -> Vec3 {
        self.scattered
    }

    /// The current position.
    pub const fn current(&self) -> Vec3 {
        self.current
    }

    /// The position selected by the given mode.
    pub const fn target(&self, mode: Mode) -> Vec3 {
        match mode {
            Mode::Tree => self.tree,
            Mode::Scattered => self.scattered,
        }
    }

    /// Step the current position towards the target for `mode` and return the new position.
    pub fn advance(&mut self, mode: Mode, damping: &Damping, dt: f32) -> Vec3 {
        self.current = damping.step(self.current, self.target(mode), dt);
        self.current
    }

    /// Is the current position within `epsilon` of the target for `mode`?
    pub fn is_settled(&self, mode: Mode, epsilon: f32) -> bool {
        self.current.distance(self.target(mode)) <= epsilon
    }
}
