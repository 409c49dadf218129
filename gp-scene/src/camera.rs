//! This module contains the camera placement and the limits on orbiting.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The config for the orbit camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Where the camera starts.
    pub eye: Vec3,

    /// The point the camera orbits around.
    pub target: Vec3,

    /// The vertical field of view, in degrees.
    pub fov_degrees: f32,

    /// The closest the camera can get to the target.
    pub min_distance: f32,

    /// The furthest the camera can get from the target.
    pub max_distance: f32,

    /// How sensitive orbiting is to mouse movement.
    pub rotate_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0., 2., 15.),
            target: Vec3::ZERO,
            fov_degrees: 45.,
            min_distance: 5.,
            max_distance: 25.,
            rotate_sensitivity: 0.25,
        }
    }
}

/// Move `eye` along the ray from `target` so that its distance from `target` is within
/// `[min_distance, max_distance]`.
///
/// If `eye` and `target` coincide there is no ray to move along, so the eye is pushed out along
/// +Z.
pub fn clamp_orbit_eye(eye: Vec3, target: Vec3, min_distance: f32, max_distance: f32) -> Vec3 {
    let offset = eye - target;
    let distance = offset.length();
    let clamped = distance.clamp(min_distance, max_distance.max(min_distance));

    if distance == clamped {
        return eye;
    }

    let direction = offset.try_normalize().unwrap_or(Vec3::Z);
    target + direction * clamped
}

/// Turn the scroll amounts from one frame, in lines, into the factor to multiply the camera's
/// distance by. Scrolling up (positive) zooms in.
///
/// The factor never goes below `0.1`, so one huge scroll can't flip the camera through the
/// target.
pub fn zoom_scalar(scroll_lines: impl IntoIterator<Item = f32>, sensitivity: f32) -> f32 {
    scroll_lines
        .into_iter()
        .filter(|lines| lines.is_finite())
        .fold(1., |scalar, lines| scalar * (1. - lines * sensitivity))
        .max(0.1)
}
