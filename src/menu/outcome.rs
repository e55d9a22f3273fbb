use super::*;

/// Spawn the victory or failure overlay when the loop reaches a terminal stage.
///
/// The frozen last frame stays visible underneath.
pub(super) fn show_outcome_system(
    mut commands: Commands,
    mut cues: MessageReader<TrainingCue>,
    active: Res<ActiveTraining>,
    existing: Query<(), With<OutcomeRoot>>,
) {
    let ended = cues.read().find_map(|TrainingCue(event)| match event {
        TrainingEvent::StageChanged { to, .. } if to.is_terminal() => Some(*to),
        _ => None,
    });
    let Some(stage) = ended else {
        return;
    };
    if !existing.is_empty() {
        return;
    }
    let session = active.0.session();
    let collected = session.tools.iter().filter(|t| t.collected).count();
    let summary = OutcomeSummary {
        victory: stage == Stage::Victory,
        collected,
        total: session.tools.len(),
        oxygen_percent: session.oxygen.percent(),
        score: mission_score(session),
    };
    spawn_outcome(&mut commands, &summary);
}

/// What the overlay reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub victory: bool,
    pub collected: usize,
    pub total: usize,
    pub oxygen_percent: u32,
    pub score: u32,
}

impl OutcomeSummary {
    /// Checklist lines shown on the card.
    pub fn lines(&self) -> Vec<String> {
        if self.victory {
            vec![
                "✓ Mastered underwater movement".to_string(),
                format!("✓ Collected all {} tools", self.total),
                "✓ Repaired the spacecraft".to_string(),
                format!("✓ Oxygen remaining: {}%", self.oxygen_percent),
                format!("Mission score: {}", self.score),
            ]
        } else {
            let tools = if self.collected > 0 {
                format!("✓ Collected {}/{} tools", self.collected, self.total)
            } else {
                "✗ No tools collected".to_string()
            };
            vec![
                "✗ Oxygen: 0%".to_string(),
                tools,
                "✗ Mission incomplete".to_string(),
            ]
        }
    }
}

fn spawn_outcome(commands: &mut Commands, summary: &OutcomeSummary) {
    let (title, blurb, heading, border) = if summary.victory {
        (
            "MISSION COMPLETE!",
            "Congratulations, Astronaut! You've completed your NBL training.",
            title_color(),
            victory_border(),
        )
    } else {
        (
            "MISSION FAILED",
            "Oxygen depleted! You ran out of air during the training mission.",
            failure_border(),
            failure_border(),
        )
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            ZIndex(300),
            OutcomeRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(14.0),
                        border: UiRect::all(Val::Px(3.0)),
                        min_width: Val::Px(420.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.06, 0.08, 0.12)),
                    BorderColor::all(border),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new(title),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(heading),
                    ));
                    card.spawn((
                        Text::new(blurb),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));

                    spacer(card, 4.0);

                    for line in summary.lines() {
                        card.spawn((
                            Text::new(line),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    }

                    spacer(card, 8.0);

                    if summary.victory {
                        spawn_button(
                            card,
                            "CONTINUE",
                            (start_bg(), start_border(), start_text()),
                            OutcomeContinueButton,
                        );
                    }
                    spawn_button(
                        card,
                        if summary.victory { "TRAIN AGAIN" } else { "TRY AGAIN" },
                        (toggle_bg(), toggle_border(), toggle_text()),
                        OutcomeRestartButton,
                    );

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new("Press Enter to train again"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

/// Recursively despawn the outcome overlay.
pub(super) fn cleanup_outcome(mut commands: Commands, query: Query<Entity, With<OutcomeRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Continue / Restart in the outcome overlay.  `Enter` restarts.
///
/// - **Continue** (victory only) banks the mission score and returns to the
///   intro screen.
/// - **Train Again / Try Again** rebuilds the session in place.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub(super) fn outcome_button_system(
    mut commands: Commands,
    continue_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<OutcomeContinueButton>),
    >,
    restart_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<OutcomeRestartButton>),
    >,
    overlays: Query<Entity, With<OutcomeRoot>>,
    mut btn_text: Query<&mut TextColor>,
    keys: Res<ButtonInput<KeyCode>>,
    mut active: ResMut<ActiveTraining>,
    mut score: ResMut<SessionScore>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if overlays.is_empty() {
        return;
    }

    let wants_continue = continue_query
        .iter()
        .any(|(i, _)| *i == Interaction::Pressed);
    if wants_continue {
        let points = mission_score(active.0.session());
        let total = score.bank(points);
        info!("Mission score {points} banked; session total {total}");
        next_state.set(GameState::Intro);
        return;
    }

    let wants_restart = keys.just_pressed(KeyCode::Enter)
        || restart_query.iter().any(|(i, _)| *i == Interaction::Pressed);
    if wants_restart {
        for e in overlays.iter() {
            commands.entity(e).despawn();
        }
        active.0.restart();
        info!("Training restarted");
        return;
    }

    for (interaction, children) in continue_query.iter() {
        tint_button_text(interaction, children, &mut btn_text, start_text());
    }
    for (interaction, children) in restart_query.iter() {
        tint_button_text(interaction, children, &mut btn_text, toggle_text());
    }
}
