//! This module spawns and animates the ornaments and foliage particles.

use crate::{
    bevy_setup::{colour, Layout, Settings},
    overlay::CurrentMode,
};
use bevy::prelude::*;
use gp_scene::layout::{foliage::FoliageTint, FoliageParticle, Ornament, OrnamentKind};
use tracing::{debug, instrument};

/// An ornament entity, carrying its own tween.
#[derive(Component, Clone, Copy, Debug)]
pub(super) struct Decoration(pub(super) Ornament);

/// A foliage particle entity, carrying its own tween.
#[derive(Component, Clone, Copy, Debug)]
pub(super) struct FoliageMote(pub(super) FoliageParticle);

/// Spawn every ornament and foliage particle at its starting position.
///
/// Every entity of the same kind shares one mesh and one material.
#[instrument(skip_all)]
pub(super) fn spawn_decorations(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    layout: Res<Layout>,
) {
    let palette = &settings.palette;

    let ball_mesh = meshes.add(Mesh::from(shape::UVSphere {
        radius: 1.,
        sectors: 16,
        stacks: 16,
    }));
    let gift_mesh = meshes.add(Mesh::from(shape::Cube { size: 1. }));

    let ball_material = materials.add(StandardMaterial {
        base_color: colour(palette.gold),
        metallic: 1.,
        perceptual_roughness: 0.1,
        ..default()
    });
    let gift_material = materials.add(StandardMaterial {
        base_color: colour(palette.red),
        metallic: 0.5,
        perceptual_roughness: 0.5,
        ..default()
    });

    debug!(count = layout.ornaments.len(), "Adding ornaments");
    for ornament in &layout.ornaments {
        let (mesh, material) = match ornament.kind {
            OrnamentKind::Ball => (ball_mesh.clone(), ball_material.clone()),
            OrnamentKind::Gift => (gift_mesh.clone(), gift_material.clone()),
        };

        commands.spawn((
            PbrBundle {
                mesh,
                material,
                transform: Transform::from_translation(ornament.tween.current())
                    .with_scale(Vec3::splat(ornament.scale)),
                ..default()
            },
            Decoration(*ornament),
        ));
    }

    let mote_mesh = meshes.add(Mesh::from(shape::Icosphere {
        radius: settings.foliage.particle_radius,
        subdivisions: 1,
    }));

    let tint_material = |tint: FoliageTint| {
        let (hex, strength) = match tint {
            FoliageTint::Emerald => (palette.emerald, 1.5),
            FoliageTint::Gold => (palette.gold, 3.),
        };
        let [r, g, b] = hex.emissive(strength);

        StandardMaterial {
            base_color: colour(hex),
            emissive: Color::rgb_linear(r, g, b),
            perceptual_roughness: 0.6,
            ..default()
        }
    };
    let emerald_material = materials.add(tint_material(FoliageTint::Emerald));
    let gold_material = materials.add(tint_material(FoliageTint::Gold));

    debug!(count = layout.foliage.len(), "Adding foliage");
    for particle in &layout.foliage {
        let material = match particle.tint {
            FoliageTint::Emerald => emerald_material.clone(),
            FoliageTint::Gold => gold_material.clone(),
        };

        commands.spawn((
            PbrBundle {
                mesh: mote_mesh.clone(),
                material,
                transform: Transform::from_translation(particle.tween.current()),
                ..default()
            },
            FoliageMote(*particle),
        ));
    }
    debug!("Finished adding decorations");
}

/// Step every ornament towards its target for the current mode, and keep it tumbling.
#[instrument(skip_all)]
pub(super) fn animate_ornaments(
    time: Res<Time>,
    mode: Res<CurrentMode>,
    settings: Res<Settings>,
    mut query: Query<(&mut Decoration, &mut Transform)>,
) {
    let dt = time.delta_seconds();
    let spin_rate = settings.ornaments.spin_rate;

    for (mut decoration, mut transform) in query.iter_mut() {
        let position = decoration.0.update(**mode, &settings.damping, spin_rate, dt);
        transform.translation = position;
        transform.rotation = Quat::from_rotation_x(decoration.0.spin);
    }
}

/// Step every foliage particle towards its target for the current mode.
#[instrument(skip_all)]
pub(super) fn animate_foliage(
    time: Res<Time>,
    mode: Res<CurrentMode>,
    settings: Res<Settings>,
    mut query: Query<(&mut FoliageMote, &mut Transform)>,
) {
    let dt = time.delta_seconds();

    for (mut mote, mut transform) in query.iter_mut() {
        transform.translation = mote.0.update(**mode, &settings.damping, dt);
    }
}
