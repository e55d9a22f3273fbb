use bevy::prelude::*;

pub(super) fn start_bg() -> Color {
    Color::srgb(0.02, 0.30, 0.36)
}
pub(super) fn start_border() -> Color {
    Color::srgb(0.02, 0.71, 0.83)
}
pub(super) fn start_text() -> Color {
    Color::srgb(0.75, 0.96, 1.0)
}
pub(super) fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
pub(super) fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
pub(super) fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
pub(super) fn toggle_bg() -> Color {
    Color::srgb(0.12, 0.12, 0.18)
}
pub(super) fn toggle_border() -> Color {
    Color::srgb(0.30, 0.30, 0.46)
}
pub(super) fn toggle_text() -> Color {
    Color::srgb(0.65, 0.65, 0.80)
}
pub(super) fn title_color() -> Color {
    Color::srgb(0.40, 0.91, 0.98)
}
pub(super) fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.60, 0.70)
}
pub(super) fn hint_color() -> Color {
    Color::srgb(0.28, 0.30, 0.38)
}
pub(super) fn victory_border() -> Color {
    Color::srgb(0.13, 0.83, 0.93)
}
pub(super) fn failure_border() -> Color {
    Color::srgb(0.94, 0.27, 0.27)
}

pub(super) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// A bordered 220×50 button with a single text child, tagged with `marker`.
pub(super) fn spawn_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: impl Into<String>,
    colors: (Color, Color, Color),
    marker: impl Bundle,
) {
    let (bg, border, text) = colors;
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

/// Hover tint for a button's text children; `rest` is the idle colour.
pub(super) fn tint_button_text(
    interaction: &Interaction,
    children: &Children,
    btn_text: &mut Query<&mut TextColor>,
    rest: Color,
) {
    let color = match interaction {
        Interaction::Hovered | Interaction::Pressed => Color::WHITE,
        Interaction::None => rest,
    };
    for child in children.iter() {
        if let Ok(mut text_color) = btn_text.get_mut(child) {
            *text_color = TextColor(color);
        }
    }
}
