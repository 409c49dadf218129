//! This module spawns and animates the star on top of the tree.

use crate::{
    bevy_setup::{colour, Settings},
    overlay::CurrentMode,
};
use bevy::prelude::*;
use gp_scene::star::TopStar;
use tracing::instrument;

/// The top star entity, carrying its spin.
#[derive(Component, Clone, Copy, Debug, Default)]
pub(super) struct StarSpin(TopStar);

/// Spawn the glowing star with its own point light.
#[instrument(skip_all)]
pub(super) fn spawn_top_star(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    mode: Res<CurrentMode>,
) {
    let star = &settings.star;
    let palette = &settings.palette;
    let [r, g, b] = palette.gold.emissive(star.emissive_strength);

    commands
        .spawn((
            PbrBundle {
                mesh: meshes.add(Mesh::from(shape::UVSphere {
                    radius: star.radius,
                    sectors: 32,
                    stacks: 32,
                })),
                material: materials.add(StandardMaterial {
                    base_color: colour(palette.bright_gold),
                    emissive: Color::rgb_linear(r, g, b),
                    ..default()
                }),
                transform: Transform::from_xyz(0., star.height(**mode), 0.),
                ..default()
            },
            StarSpin::default(),
        ))
        .with_children(|builder| {
            builder.spawn(PointLightBundle {
                point_light: PointLight {
                    color: colour(palette.gold),
                    intensity: star.light_intensity,
                    range: star.light_range,
                    shadows_enabled: false,
                    ..default()
                },
                ..default()
            });
        });
}

/// Put the star where the current mode wants it and keep it turning.
#[instrument(skip_all)]
pub(super) fn animate_top_star(
    time: Res<Time>,
    mode: Res<CurrentMode>,
    settings: Res<Settings>,
    mut query: Query<(&mut StarSpin, &mut Transform)>,
) {
    let dt = time.delta_seconds();

    for (mut spin, mut transform) in query.iter_mut() {
        let (height, yaw) = spin.0.update(&settings.star, **mode, dt);
        transform.translation.y = height;
        transform.rotation = Quat::from_rotation_y(yaw);
    }
}
