//! This module handles things to setup bevy for the viewer.

use bevy::{
    core_pipeline::bloom::BloomSettings,
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};
use gp_scene::{
    camera::{clamp_orbit_eye, zoom_scalar},
    HexColour, SceneConfig, SceneLayout,
};
use smooth_bevy_cameras::{
    controllers::orbit::{ControlEvent, OrbitCameraBundle, OrbitCameraController},
    LookTransform,
};
use tracing::{debug, instrument, trace};

/// How many pixels of a touchpad scroll count as one line of a mouse wheel.
const PIXELS_PER_LINE: f32 = 53.;

/// The config for the whole scene, available to every system.
#[derive(Resource, Deref)]
pub(super) struct Settings(pub(super) SceneConfig);

/// The precomputed positions of every decoration. Only read by the startup systems that spawn
/// them.
#[derive(Resource, Deref)]
pub(super) struct Layout(pub(super) SceneLayout);

/// Convert a config colour into a Bevy colour.
pub(super) fn colour(hex: HexColour) -> Color {
    let [r, g, b] = hex.rgb();
    Color::rgb_u8(r, g, b)
}

/// Convert a config colour into a Bevy colour with the given alpha.
pub(super) fn colour_with_alpha(hex: HexColour, alpha: f32) -> Color {
    let [r, g, b] = hex.rgb_f32();
    Color::rgba(r, g, b, alpha)
}

/// Setup the Bevy world with a camera and the free-standing lights.
#[instrument(skip_all)]
pub(super) fn setup(mut commands: Commands, settings: Res<Settings>) {
    let camera_config = &settings.camera;

    // Drag with the left mouse button to orbit and scroll to zoom. See `orbit_camera_input`
    let mut camera = commands.spawn(Camera3dBundle {
        camera: Camera {
            hdr: settings.bloom.is_some(),
            ..default()
        },
        projection: Projection::Perspective(PerspectiveProjection {
            fov: camera_config.fov_degrees.to_radians(),
            ..default()
        }),
        ..default()
    });

    if let Some(bloom) = &settings.bloom {
        debug!(?bloom, "Enabling bloom");
        camera.insert(BloomSettings {
            intensity: bloom.intensity,
            threshold: bloom.threshold,
            ..default()
        });
    }

    camera.insert(OrbitCameraBundle::new(
        OrbitCameraController {
            mouse_rotate_sensitivity: Vec2::splat(camera_config.rotate_sensitivity),
            // No panning, so the tree always stays in the middle
            mouse_translate_sensitivity: Vec2::ZERO,
            smoothing_weight: 0.8,
            ..default()
        },
        camera_config.eye,
        camera_config.target,
        Vec3::Y,
    ));

    let lighting = &settings.lighting;
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: lighting.ambient_brightness,
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: lighting.key_light_intensity,
            range: 60.,
            shadows_enabled: false,
            ..default()
        },
        transform: Transform::from_translation(lighting.key_light_position),
        ..default()
    });
}

/// Orbit the camera while the left mouse button is held and zoom with the scroll wheel.
///
/// There is no binding for panning, so the camera always looks at the tree.
#[instrument(skip_all)]
pub(super) fn orbit_camera_input(
    mut control_events: EventWriter<ControlEvent>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mouse_buttons: Res<Input<MouseButton>>,
    controllers: Query<&OrbitCameraController>,
) {
    let Some(controller) = controllers.iter().find(|c| c.enabled) else {
        return;
    };

    let cursor_delta = mouse_motion
        .iter()
        .fold(Vec2::ZERO, |delta, motion| delta + motion.delta);
    if mouse_buttons.pressed(MouseButton::Left) && cursor_delta != Vec2::ZERO {
        trace!(?cursor_delta, "Orbiting");
        control_events.send(ControlEvent::Orbit(
            controller.mouse_rotate_sensitivity * cursor_delta,
        ));
    }

    let scalar = zoom_scalar(
        mouse_wheel.iter().map(|wheel| match wheel.unit {
            MouseScrollUnit::Line => wheel.y,
            MouseScrollUnit::Pixel => wheel.y / PIXELS_PER_LINE,
        }),
        controller.mouse_wheel_zoom_sensitivity,
    );
    if scalar != 1. {
        trace!(scalar, "Zooming");
        control_events.send(ControlEvent::Zoom(scalar));
    }
}

/// Keep the camera between the configured minimum and maximum distance from the tree.
#[instrument(skip_all)]
pub(super) fn clamp_camera_distance(
    settings: Res<Settings>,
    mut query: Query<&mut LookTransform>,
) {
    let camera_config = &settings.camera;

    for mut look in query.iter_mut() {
        let clamped = clamp_orbit_eye(
            look.eye,
            look.target,
            camera_config.min_distance,
            camera_config.max_distance,
        );

        // Only write when needed, so change detection stays quiet
        if clamped != look.eye {
            look.eye = clamped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What the orbit input sent on the last frame.
    #[derive(Debug, Default)]
    struct Sent {
        orbits: Vec<Vec2>,
        zooms: Vec<f32>,
        translations: usize,
    }

    fn input_app() -> App {
        let mut app = App::new();
        app.add_event::<ControlEvent>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .init_resource::<Input<MouseButton>>()
            .add_system(orbit_camera_input);

        app.world.spawn(OrbitCameraController {
            mouse_rotate_sensitivity: Vec2::splat(0.25),
            mouse_wheel_zoom_sensitivity: 0.2,
            ..default()
        });

        app
    }

    fn sent(app: &App) -> Sent {
        let events = app.world.resource::<Events<ControlEvent>>();
        let mut sent = Sent::default();

        for event in events.get_reader().iter(events) {
            match event {
                ControlEvent::Orbit(delta) => sent.orbits.push(*delta),
                ControlEvent::Zoom(scalar) => sent.zooms.push(*scalar),
                ControlEvent::TranslateTarget(_) => sent.translations += 1,
            }
        }

        sent
    }

    fn move_mouse(app: &mut App, delta: Vec2) {
        app.world
            .resource_mut::<Events<MouseMotion>>()
            .send(MouseMotion { delta });
    }

    #[test]
    fn left_drag_orbits_test() {
        let mut app = input_app();
        app.world
            .resource_mut::<Input<MouseButton>>()
            .press(MouseButton::Left);
        move_mouse(&mut app, Vec2::new(4., -2.));
        move_mouse(&mut app, Vec2::new(4., 0.));
        app.update();

        let sent = sent(&app);
        assert_eq!(sent.orbits, vec![Vec2::new(2., -0.5)]);
        assert!(sent.zooms.is_empty());
        assert_eq!(sent.translations, 0);
    }

    #[test]
    fn moving_without_a_button_does_nothing_test() {
        let mut app = input_app();
        move_mouse(&mut app, Vec2::new(10., 10.));
        app.update();

        let sent = sent(&app);
        assert!(sent.orbits.is_empty());
        assert!(sent.zooms.is_empty());
        assert_eq!(sent.translations, 0);
    }

    #[test]
    fn right_drag_does_not_pan_test() {
        let mut app = input_app();
        app.world
            .resource_mut::<Input<MouseButton>>()
            .press(MouseButton::Right);
        move_mouse(&mut app, Vec2::new(10., 10.));
        app.update();

        let sent = sent(&app);
        assert!(sent.orbits.is_empty());
        assert_eq!(sent.translations, 0);
    }

    #[test]
    fn scroll_zooms_test() {
        let mut app = input_app();
        {
            let mut wheel = app.world.resource_mut::<Events<MouseWheel>>();
            wheel.send(MouseWheel {
                unit: MouseScrollUnit::Line,
                x: 0.,
                y: 1.,
            });
            wheel.send(MouseWheel {
                unit: MouseScrollUnit::Pixel,
                x: 0.,
                y: -PIXELS_PER_LINE,
            });
        }
        app.update();

        let sent = sent(&app);
        assert!(sent.orbits.is_empty());
        assert_eq!(sent.zooms.len(), 1);
        assert!((sent.zooms[0] - 0.8 * 1.2).abs() < 0.0001);
    }
}
