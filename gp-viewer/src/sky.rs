//! This module spawns the background stars and animates the sparkles.

use crate::bevy_setup::{Layout, Settings};
use bevy::prelude::*;
use gp_scene::layout::Sparkle;
use tracing::{debug, instrument};

/// A sparkle entity.
#[derive(Component, Clone, Copy, Debug)]
pub(super) struct SparkleMote(pub(super) Sparkle);

/// The smallest a sparkle shrinks to when it twinkles.
const MIN_SPARKLE_SCALE: f32 = 0.2;

/// Spawn the stars and sparkles.
#[instrument(skip_all)]
pub(super) fn spawn_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    layout: Res<Layout>,
) {
    let sky = &settings.sky;

    let star_mesh = meshes.add(Mesh::from(shape::Icosphere {
        radius: sky.star_size,
        subdivisions: 0,
    }));
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    debug!(count = layout.stars.len(), "Adding stars");
    for &position in &layout.stars {
        commands.spawn(PbrBundle {
            mesh: star_mesh.clone(),
            material: star_material.clone(),
            transform: Transform::from_translation(position),
            ..default()
        });
    }

    let sparkle_mesh = meshes.add(Mesh::from(shape::Icosphere {
        radius: sky.sparkle_size,
        subdivisions: 1,
    }));
    let [r, g, b] = settings.palette.gold.emissive(4.);
    let sparkle_material = materials.add(StandardMaterial {
        base_color: Color::rgb_linear(r, g, b),
        unlit: true,
        ..default()
    });

    debug!(count = layout.sparkles.len(), "Adding sparkles");
    for &sparkle in &layout.sparkles {
        commands.spawn((
            PbrBundle {
                mesh: sparkle_mesh.clone(),
                material: sparkle_material.clone(),
                transform: Transform::from_translation(sparkle.position_at(0.)),
                ..default()
            },
            SparkleMote(sparkle),
        ));
    }
}

/// Bob the sparkles around and make them twinkle.
#[instrument(skip_all)]
pub(super) fn animate_sparkles(time: Res<Time>, mut query: Query<(&SparkleMote, &mut Transform)>) {
    let t = time.elapsed_seconds();

    for (mote, mut transform) in query.iter_mut() {
        transform.translation = mote.0.position_at(t);
        transform.scale =
            Vec3::splat(MIN_SPARKLE_SCALE + (1. - MIN_SPARKLE_SCALE) * mote.0.brightness_at(t));
    }
}
