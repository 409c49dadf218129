//! This module handles the config file that tunes the whole scene.

use crate::{
    camera::CameraConfig,
    layout::{FoliageConfig, OrnamentConfig, SkyConfig, TreeShape},
    star::StarConfig,
    Damping, Mode, Palette,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// The error returned when loading, saving, or validating a [`SceneConfig`].
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("IO error: `{0:?}`")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// The settings for the bloom post-processing pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomConfig {
    /// How strong the bloom is.
    pub intensity: f32,

    /// The brightness above which pixels start to bloom.
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            intensity: 0.6,
            threshold: 0.9,
        }
    }
}

/// The config for the lights that aren't attached to a decoration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightingConfig {
    /// The brightness of the ambient light.
    pub ambient_brightness: f32,

    /// Where the white key light sits.
    pub key_light_position: Vec3,

    /// The intensity of the white key light.
    pub key_light_intensity: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_brightness: 0.5,
            key_light_position: Vec3::new(10., 10., 10.),
            key_light_intensity: 15_000.,
        }
    }
}

/// The config for the whole scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// The greeting written above the tree.
    pub title: String,

    /// The path of the font for the title and button, relative to the assets directory.
    pub font_path: String,

    /// The mode that the scene opens in.
    pub initial_mode: Mode,

    /// The seed for the layout. A random seed is used if this is `None`.
    pub seed: Option<u64>,

    /// How quickly decorations move towards their targets.
    pub damping: Damping,

    /// The colours of everything.
    pub palette: Palette,

    /// The size of the tree.
    pub tree: TreeShape,

    /// The balls and gift boxes.
    pub ornaments: OrnamentConfig,

    /// The particles forming the body of the tree.
    pub foliage: FoliageConfig,

    /// The stars and sparkles.
    pub sky: SkyConfig,

    /// The star on top of the tree.
    pub star: StarConfig,

    /// The orbit camera.
    pub camera: CameraConfig,

    /// The free-standing lights.
    pub lighting: LightingConfig,

    /// The bloom pass, or `None` to disable it.
    pub bloom: Option<BloomConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "MERRY CHRISTMAS".to_string(),
            font_path: "fonts/PlayfairDisplay-Regular.ttf".to_string(),
            initial_mode: Mode::Tree,
            seed: None,
            damping: Damping::default(),
            palette: Palette::default(),
            tree: TreeShape::default(),
            ornaments: OrnamentConfig::default(),
            foliage: FoliageConfig::default(),
            sky: SkyConfig::default(),
            star: StarConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            bloom: Some(BloomConfig::default()),
        }
    }
}

impl SceneConfig {
    /// The default place to keep the config file.
    pub const fn default_filename() -> &'static str {
        "config/scene.ron"
    }

    /// Load the config from the file, using the default if the file is unavailable or invalid.
    /// The default is written back to the file so that it can be edited later.
    #[instrument]
    pub fn from_file(filename: &Path) -> Self {
        let write_and_return_default = || -> Self {
            let default = Self::default();
            if let Err(e) = default.save_to_file(filename) {
                warn!(?e, "Unable to write default config");
            }
            default
        };

        match Self::try_from_file(filename) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config file, so using the default");
                write_and_return_default()
            }
            Err(e) => {
                warn!(?e, "Unable to use config file, so using the default");
                write_and_return_default()
            }
        }
    }

    /// Load and validate the config from the file.
    pub fn try_from_file(filename: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(filename)?;
        let config: Self = ron::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to the file, creating its parent directories if needed.
    pub fn save_to_file(&self, filename: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = filename.parent() {
            fs::DirBuilder::new().recursive(true).create(parent)?;
        }

        fs::write(filename, self.to_ron()?)?;
        Ok(())
    }

    /// Serialize the config as pretty RON.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default().struct_names(true),
        )?)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, message: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(message.to_string()))
            }
        }

        fn positive(x: f32) -> bool {
            x.is_finite() && x > 0.
        }

        fn non_negative(x: f32) -> bool {
            x.is_finite() && x >= 0.
        }

        check(self.damping.is_valid(), "damping must be positive")?;

        check(
            self.ornaments.count > 0
                && self.foliage.count > 0
                && self.sky.star_count > 0
                && self.sky.sparkle_count > 0,
            "ornament, foliage, star, and sparkle counts must be positive",
        )?;

        check(positive(self.tree.height), "tree height must be positive")?;
        check(
            positive(self.tree.base_radius),
            "tree base radius must be positive",
        )?;

        let o = &self.ornaments;
        check(
            non_negative(o.scatter_min_radius) && o.scatter_max_radius.is_finite(),
            "ornament scatter radii must be finite and non-negative",
        )?;
        check(
            o.scatter_min_radius <= o.scatter_max_radius,
            "ornament scatter_min_radius must not exceed scatter_max_radius",
        )?;
        check(
            non_negative(o.spawn_radius),
            "ornament spawn radius must be non-negative",
        )?;
        check(
            positive(o.min_scale) && o.max_scale.is_finite() && o.min_scale <= o.max_scale,
            "ornament scales must be positive with min_scale <= max_scale",
        )?;
        check(o.spin_rate.is_finite(), "ornament spin rate must be finite")?;

        let f = &self.foliage;
        check(
            (0.0..=1.0).contains(&f.gold_fraction),
            "foliage gold fraction must be in [0, 1]",
        )?;
        check(
            positive(f.particle_radius),
            "foliage particle radius must be positive",
        )?;
        check(
            non_negative(f.scatter_min_radius)
                && f.scatter_max_radius.is_finite()
                && f.scatter_min_radius <= f.scatter_max_radius,
            "foliage scatter radii must be non-negative with min <= max",
        )?;

        let s = &self.sky;
        check(
            positive(s.star_radius) && non_negative(s.star_depth) && positive(s.star_size),
            "star radius and size must be positive and depth non-negative",
        )?;
        check(
            non_negative(s.sparkle_scale)
                && positive(s.sparkle_size)
                && non_negative(s.sparkle_speed)
                && non_negative(s.sparkle_amplitude),
            "sparkle settings must be non-negative with a positive size",
        )?;

        let st = &self.star;
        check(
            st.tree_height.is_finite() && st.scattered_height.is_finite(),
            "star heights must be finite",
        )?;
        check(
            positive(st.radius)
                && st.spin_rate.is_finite()
                && non_negative(st.light_intensity)
                && non_negative(st.light_range)
                && non_negative(st.emissive_strength),
            "star radius must be positive and its lighting non-negative",
        )?;

        let c = &self.camera;
        check(
            c.eye.is_finite() && c.target.is_finite(),
            "camera eye and target must be finite",
        )?;
        check(
            positive(c.fov_degrees) && c.fov_degrees < 180.,
            "camera field of view must be in (0, 180)",
        )?;
        check(
            positive(c.min_distance) && c.min_distance <= c.max_distance,
            "camera distances must be positive with min_distance <= max_distance",
        )?;
        check(
            non_negative(c.rotate_sensitivity),
            "camera sensitivity must be non-negative",
        )?;

        let l = &self.lighting;
        check(
            non_negative(l.ambient_brightness)
                && l.key_light_position.is_finite()
                && non_negative(l.key_light_intensity),
            "lighting must be finite and non-negative",
        )?;

        if let Some(bloom) = &self.bloom {
            check(
                non_negative(bloom.intensity) && non_negative(bloom.threshold),
                "bloom settings must be non-negative",
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// A path in the temp directory which is unique to this test.
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("gp-scene-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn default_is_valid_test() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn ron_round_trip_test() {
        let mut config = SceneConfig::default();
        config.seed = Some(42);
        config.initial_mode = Mode::Scattered;
        config.damping = Damping::Exponential { k: 3.5 };
        config.bloom = None;

        let text = config.to_ron().unwrap();
        assert!(text.contains("SceneConfig"));
        assert!(text.contains("\"#ffd700\""));

        let parsed: SceneConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_config_test() {
        let config: SceneConfig = ron::from_str(
            r#"(
                title: "HAPPY HOLIDAYS",
                initial_mode: Scattered,
                damping: Exponential(k: 4.0),
            )"#,
        )
        .unwrap();

        assert_eq!(config.title, "HAPPY HOLIDAYS");
        assert_eq!(config.initial_mode, Mode::Scattered);
        assert_eq!(config.damping, Damping::Exponential { k: 4. });
        assert_eq!(config.ornaments, OrnamentConfig::default());
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn validate_test() {
        let invalid = |f: &dyn Fn(&mut SceneConfig)| {
            let mut config = SceneConfig::default();
            f(&mut config);
            matches!(config.validate(), Err(ConfigError::Invalid(_)))
        };

        assert!(invalid(&|c| c.damping = Damping::Linear { rate: 0. }));
        assert!(invalid(&|c| c.tree.height = -1.));
        assert!(invalid(&|c| c.tree.base_radius = f32::NAN));
        assert!(invalid(&|c| c.ornaments.scatter_min_radius = 20.));
        assert!(invalid(&|c| c.ornaments.min_scale = 0.));
        assert!(invalid(&|c| c.ornaments.max_scale = 0.05));
        assert!(invalid(&|c| c.foliage.gold_fraction = 1.5));
        assert!(invalid(&|c| c.foliage.gold_fraction = f32::NAN));
        assert!(invalid(&|c| c.sky.star_radius = 0.));
        assert!(invalid(&|c| c.star.radius = 0.));
        assert!(invalid(&|c| c.camera.fov_degrees = 180.));
        assert!(invalid(&|c| c.camera.min_distance = 30.));
        assert!(invalid(&|c| c.lighting.ambient_brightness = -0.5));
        assert!(invalid(&|c| {
            c.bloom = Some(BloomConfig {
                intensity: -1.,
                threshold: 0.5,
            })
        }));

        assert!(invalid(&|c| c.ornaments.count = 0));
        assert!(invalid(&|c| c.foliage.count = 0));
        assert!(invalid(&|c| c.sky.star_count = 0));
        assert!(invalid(&|c| c.sky.sparkle_count = 0));
        assert!(!invalid(&|c| {
            c.ornaments.count = 1;
            c.foliage.count = 1;
            c.sky.star_count = 1;
            c.sky.sparkle_count = 1;
        }));
        assert!(!invalid(&|c| c.bloom = None));
    }

    #[test]
    fn file_test() {
        let path = temp_path("nested/dir/scene.ron");
        let _ = fs::remove_file(&path);

        // A missing file gives the default and writes it out
        assert!(matches!(
            SceneConfig::try_from_file(&path),
            Err(ConfigError::Io(_))
        ));
        assert_eq!(SceneConfig::from_file(&path), SceneConfig::default());
        assert!(path.exists());
        assert_eq!(
            SceneConfig::try_from_file(&path).unwrap(),
            SceneConfig::default()
        );

        // A saved config is read back
        let mut config = SceneConfig::default();
        config.title = "SEASON'S GREETINGS".to_string();
        config.save_to_file(&path).unwrap();
        assert_eq!(SceneConfig::from_file(&path), config);

        // Garbage is replaced by the default
        fs::write(&path, "this is not RON").unwrap();
        assert!(matches!(
            SceneConfig::try_from_file(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(SceneConfig::from_file(&path), SceneConfig::default());

        // So is a config which parses but doesn't validate
        fs::write(&path, "(foliage: (count: 10, gold_fraction: 2.0, particle_radius: 0.1, scatter_min_radius: 1.0, scatter_max_radius: 2.0))").unwrap();
        assert!(matches!(
            SceneConfig::try_from_file(&path),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(SceneConfig::from_file(&path), SceneConfig::default());

        let _ = fs::remove_file(&path);
    }
}
