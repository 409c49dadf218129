//! This crate provides the renderer-independent model of the Gilded Pine scene.
//!
//! Everything that decides *where* things go lives here: the two-state [`Mode`], the damping
//! maths in [`tween`], the precomputed positions in [`layout`], and the [`SceneConfig`] that
//! tunes all of it. The viewer only has to turn these into entities and call
//! [`TwoStateTween::advance`] once per frame.

pub mod camera;
pub mod config;
pub mod layout;
pub mod mode;
pub mod palette;
pub mod star;
pub mod tween;

pub use self::{
    config::{ConfigError, SceneConfig},
    layout::SceneLayout,
    mode::Mode,
    palette::{HexColour, Palette, ParseColourError},
    tween::{Damping, TwoStateTween},
};

/// An RGB colour.
pub type RGBArray = [u8; 3];
