//! This module contains the [`Mode`] that decides whether the decorations form a tree.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// Which set of target positions the decorations are moving towards.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
pub enum Mode {
    /// Every decoration heads for its place on the tree.
    #[default]
    Tree,

    /// Every decoration drifts out into a random cloud around the tree.
    Scattered,
}

impl Mode {
    /// Return the other mode.
    #[must_use = ".toggled() returns the other mode and does not mutate in-place"]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Tree => Self::Scattered,
            Self::Scattered => Self::Tree,
        }
    }

    /// Flip this mode in place.
    pub fn toggle(&mut self) {
        *self = self.toggled();
    }

    /// The text on the toggle button while the scene is in this mode, which describes what
    /// clicking it will do.
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Tree => "SCATTER FRAGMENTS",
            Self::Scattered => "REASSEMBLE MAGIC",
        }
    }
}
