//! This crate provides a binary which renders the Gilded Pine tree with Bevy.
//!
//! All the positions are precomputed by [`gp_scene`] before the Bevy app starts, so the systems
//! here only step each decoration towards the target for the [`CurrentMode`] every frame.

mod bevy_setup;
mod decorations;
mod logging;
mod overlay;
mod sky;
mod top_star;

use self::{
    bevy_setup::{clamp_camera_distance, orbit_camera_input, setup, Layout, Settings},
    decorations::{animate_foliage, animate_ornaments, spawn_decorations},
    overlay::{setup_overlay, CurrentMode, ModePlugin},
    sky::{animate_sparkles, spawn_sky},
    top_star::{animate_top_star, spawn_top_star},
};
use bevy::{log::LogPlugin, prelude::*, DefaultPlugins};
use clap::Parser;
use color_eyre::{eyre::Context, Result};
use gp_scene::{Mode, SceneConfig, SceneLayout};
use rand::{rngs::StdRng, SeedableRng};
use smooth_bevy_cameras::{controllers::orbit::OrbitCameraPlugin, LookTransformPlugin};
use std::{path::PathBuf, process};
use tracing::{debug, info, instrument, warn};

/// Render an animated Christmas tree whose decorations scatter and reassemble at the click of a
/// button.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The RON config file. It gets created with the defaults if it doesn't exist.
    #[arg(short, long, default_value = SceneConfig::default_filename())]
    config: PathBuf,

    /// Seed the layout of the decorations, overriding any seed in the config file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Open the scene with the decorations already scattered.
    #[arg(long)]
    scattered: bool,

    /// Filter directives for the log file, like `RUST_LOG`.
    #[arg(long, default_value = logging::FILE_LOG_DIRECTIVES)]
    file_log: String,
}

/// Load the config, build the layout, and run the viewer.
fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = logging::init_tracing(&args.file_log);
    debug!(?args);

    let mut config = if args.config.exists() {
        SceneConfig::try_from_file(&args.config)
            .wrap_err_with(|| format!("Failed to load config from {:?}", args.config))?
    } else {
        SceneConfig::from_file(&args.config)
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if args.scattered {
        config.initial_mode = Mode::Scattered;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let layout = SceneLayout::generate(&config, &mut rng);

    run_viewer(config, layout);
    Ok(())
}

/// Run the viewer with Bevy.
#[instrument(skip_all)]
fn run_viewer(config: SceneConfig, layout: SceneLayout) {
    let [r, g, b] = config.palette.background.rgb();
    let initial_mode = config.initial_mode;

    // Create a new Bevy app with the default plugins (except logging, since we set up tracing
    // ourselves) and the required systems
    info!(?initial_mode, "Starting bevy app");
    App::new()
        .insert_resource(Msaa { samples: 4 })
        .insert_resource(ClearColor(Color::rgb_u8(r, g, b)))
        .insert_resource(Settings(config))
        .insert_resource(Layout(layout))
        .insert_resource(CurrentMode(initial_mode))
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    window: WindowDescriptor {
                        title: "Gilded Pine".to_string(),
                        ..default()
                    },
                    ..default()
                }),
        )
        .add_plugin(LookTransformPlugin)
        // Our own input system drives the orbit camera, so turn off the plugin's default bindings
        .add_plugin(OrbitCameraPlugin::new(true))
        .add_plugin(ModePlugin)
        .add_startup_system(setup)
        .add_startup_system(spawn_decorations)
        .add_startup_system(spawn_sky)
        .add_startup_system(spawn_top_star)
        .add_startup_system(setup_overlay)
        .add_system(animate_ornaments)
        .add_system(animate_foliage)
        .add_system(animate_sparkles)
        .add_system(animate_top_star)
        .add_system(orbit_camera_input)
        .add_system(clamp_camera_distance)
        .run();

    // Winit terminates the program after the event loop ends, so we should never get here. If we
    // do, then we want to terminate the program manually
    warn!(concat!(
        "Winit should terminate the program when the eventloop ends, but it hasn't. ",
        "Now terminating the program."
    ));
    process::exit(255);
}
