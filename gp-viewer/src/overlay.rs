//! This module handles the UI overlay and switching between modes.
//!
//! The button and the space bar both send a [`ToggleMode`] event, and
//! [`apply_mode_toggles`] is the only system that changes [`CurrentMode`].

use crate::bevy_setup::{colour, colour_with_alpha, Settings};
use bevy::prelude::*;
use gp_scene::{HexColour, Mode};
use tracing::{info, instrument, trace};

/// The mode that every decoration is currently heading for.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq, Deref, DerefMut)]
pub(super) struct CurrentMode(pub(super) Mode);

/// A request to flip the [`CurrentMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ToggleMode;

/// The button that toggles the mode.
#[derive(Component, Clone, Copy, Debug)]
pub(super) struct ModeButton;

/// The text on the [`ModeButton`].
#[derive(Component, Clone, Copy, Debug)]
pub(super) struct ModeButtonLabel;

/// Labels to order the mode systems.
#[derive(SystemLabel, Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ModeSystem {
    /// Systems that send [`ToggleMode`] events.
    Input,
}

/// Registers the [`ToggleMode`] event and the systems that send and apply it.
pub(super) struct ModePlugin;

impl Plugin for ModePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ToggleMode>()
            .add_system(handle_mode_button.label(ModeSystem::Input))
            .add_system(toggle_on_keypress.label(ModeSystem::Input))
            .add_system(apply_mode_toggles.after(ModeSystem::Input));
    }
}

/// The fill of the button, which gets brighter under the cursor.
fn button_fill(accent: HexColour, hovered: bool) -> BackgroundColor {
    colour_with_alpha(accent, if hovered { 0.4 } else { 0.2 }).into()
}

/// Spawn the title and the toggle button.
#[instrument(skip_all)]
pub(super) fn setup_overlay(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<Settings>,
    mode: Res<CurrentMode>,
) {
    let font: Handle<Font> = asset_server.load(settings.font_path.as_str());
    let accent = settings.palette.button_accent;

    commands
        .spawn(NodeBundle {
            style: Style {
                size: Size::new(Val::Percent(100.), Val::Percent(100.)),
                // Bevy's UI y axis points up, so this puts the first child at the top
                flex_direction: FlexDirection::ColumnReverse,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect {
                    top: Val::Percent(6.),
                    bottom: Val::Percent(10.),
                    ..default()
                },
                ..default()
            },
            background_color: Color::NONE.into(),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                settings.title.clone(),
                TextStyle {
                    font: font.clone(),
                    font_size: 56.,
                    color: colour(settings.palette.gold),
                },
            ));

            parent
                .spawn((
                    ButtonBundle {
                        style: Style {
                            size: Size::new(Val::Px(320.), Val::Px(48.)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        background_color: button_fill(accent, false),
                        ..default()
                    },
                    ModeButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        TextBundle::from_section(
                            mode.button_label(),
                            TextStyle {
                                font,
                                font_size: 16.,
                                color: colour(accent),
                            },
                        ),
                        ModeButtonLabel,
                    ));
                });
        });
}

/// Send a [`ToggleMode`] when the button is clicked, and highlight it when hovered.
#[instrument(skip_all)]
fn handle_mode_button(
    settings: Res<Settings>,
    mut interactions: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<ModeButton>),
    >,
    mut toggles: EventWriter<ToggleMode>,
) {
    let accent = settings.palette.button_accent;

    for (interaction, mut background) in interactions.iter_mut() {
        trace!(?interaction);
        match *interaction {
            Interaction::Clicked => {
                toggles.send(ToggleMode);
                *background = button_fill(accent, true);
            }
            Interaction::Hovered => *background = button_fill(accent, true),
            Interaction::None => *background = button_fill(accent, false),
        }
    }
}

/// Send a [`ToggleMode`] when the space bar is pressed.
#[instrument(skip_all)]
fn toggle_on_keypress(keys: Res<Input<KeyCode>>, mut toggles: EventWriter<ToggleMode>) {
    if keys.just_pressed(KeyCode::Space) {
        toggles.send(ToggleMode);
    }
}

/// Flip the mode once for every [`ToggleMode`] sent since last frame and relabel the button.
#[instrument(skip_all)]
fn apply_mode_toggles(
    mut toggles: EventReader<ToggleMode>,
    mut mode: ResMut<CurrentMode>,
    mut labels: Query<&mut Text, With<ModeButtonLabel>>,
) {
    let count = toggles.iter().count();
    if count == 0 {
        return;
    }

    for _ in 0..count {
        mode.toggle();
    }
    info!(mode = ?mode.0, count, "Toggled mode");

    for mut text in labels.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            section.value = mode.button_label().to_string();
        }
    }
}
