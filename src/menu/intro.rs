use super::*;

fn sound_label(enabled: bool) -> &'static str {
    if enabled {
        "SOUND: ON"
    } else {
        "SOUND: OFF"
    }
}

/// Spawn the full-screen mission briefing.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │                MISSION 25                   │
/// │    Neutral Buoyancy Laboratory training     │
/// │   Adapt to Gravity · Collect Tools · Repair │
/// │                                             │
/// │            [ START TRAINING ]               │
/// │              [ SOUND: ON ]                  │
/// │                 [ QUIT ]                    │
/// │                                             │
/// │         Session score: 0 / 100              │
/// └─────────────────────────────────────────────┘
/// ```
pub(super) fn setup_intro(
    mut commands: Commands,
    score: Res<SessionScore>,
    sound: Option<Res<SoundSettings>>,
) {
    let sound_on = sound.is_none_or(|s| s.enabled);
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgb(0.03, 0.06, 0.14)),
            IntroRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("MISSION 25"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("Neutral Buoyancy Laboratory training"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 24.0);

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(32.0),
                ..default()
            })
            .with_children(|row| {
                for (title, detail) in [
                    ("Adapt to Gravity", "Master underwater movement"),
                    ("Collect Tools", "Gather repair equipment"),
                    ("Repair Ship", "Complete the mission"),
                ] {
                    row.spawn(Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(4.0),
                        ..default()
                    })
                    .with_children(|card| {
                        card.spawn((
                            Text::new(title),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(start_text()),
                        ));
                        card.spawn((
                            Text::new(detail),
                            TextFont {
                                font_size: 13.0,
                                ..default()
                            },
                            TextColor(subtitle_color()),
                        ));
                    });
                }
            });

            spacer(root, 40.0);

            spawn_button(
                root,
                "START TRAINING",
                (start_bg(), start_border(), start_text()),
                IntroStartButton,
            );
            spacer(root, 14.0);
            spawn_button(
                root,
                sound_label(sound_on),
                (toggle_bg(), toggle_border(), toggle_text()),
                IntroSoundButton,
            );
            spacer(root, 14.0);
            spawn_button(
                root,
                "QUIT",
                (quit_bg(), quit_border(), quit_text()),
                MenuQuitButton,
            );

            spacer(root, 40.0);

            root.spawn((
                Text::new(format!(
                    "Session score: {} / {}   ({} missions)",
                    score.total(),
                    SESSION_SCORE_CAP,
                    score.missions()
                )),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 12.0);

            root.spawn((
                Text::new("WASD / Arrows move  ·  M mute  ·  Esc leave training"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Recursively despawn the intro screen.
pub(super) fn cleanup_intro(mut commands: Commands, query: Query<Entity, With<IntroRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Start / Sound / Quit on the intro screen.  `Enter` or a gamepad's
/// `Start` also starts.
///
/// - **Start Training** → [`GameState::Training`]; `OnEnter(Training)` builds
///   the loop.
/// - **Sound** → flips [`SoundSettings`]; [`sync_sound_label_system`] relabels.
/// - **Quit** → sends [`AppExit`].
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub(super) fn intro_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<IntroStartButton>)>,
    sound_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<IntroSoundButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut sound: Option<ResMut<SoundSettings>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let wants_start = keys.just_pressed(KeyCode::Enter)
        || gamepads.iter().any(|g| g.just_pressed(GamepadButton::Start))
        || start_query.iter().any(|(i, _)| *i == Interaction::Pressed);
    if wants_start {
        next_state.set(GameState::Training);
        return;
    }

    for (interaction, children) in start_query.iter() {
        tint_button_text(interaction, children, &mut btn_text, start_text());
    }

    for (interaction, children) in sound_query.iter() {
        if *interaction == Interaction::Pressed {
            if let Some(settings) = sound.as_mut() {
                settings.toggle();
            }
        }
        tint_button_text(interaction, children, &mut btn_text, toggle_text());
    }

    for (interaction, children) in quit_query.iter() {
        if *interaction == Interaction::Pressed {
            exit.write(AppExit::Success);
        }
        tint_button_text(interaction, children, &mut btn_text, quit_text());
    }
}

/// Keep the sound button label in step with `M` presses.
pub(super) fn sync_sound_label_system(
    sound: Option<Res<SoundSettings>>,
    buttons: Query<&Children, With<IntroSoundButton>>,
    mut labels: Query<&mut Text>,
) {
    let Some(sound) = sound else {
        return;
    };
    if !sound.is_changed() {
        return;
    }
    for children in buttons.iter() {
        for child in children.iter() {
            if let Ok(mut text) = labels.get_mut(child) {
                *text = Text::new(sound_label(sound.enabled));
            }
        }
    }
}
