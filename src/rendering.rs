//! Presenter: turns the latest [`DrawList`] into sprites, meshes, gizmos and UI.
//!
//! ## Layer Model
//!
//! | Layer              | Technology        | Shown when                          |
//! |--------------------|-------------------|-------------------------------------|
//! | Backdrop art       | `Sprite`          | Wanted backdrop image loaded        |
//! | Backdrop gradient  | `Mesh2d`          | Otherwise                           |
//! | Astronaut art      | `Sprite`          | Pose image loaded                   |
//! | Astronaut fallback | `Mesh2d`          | Otherwise                           |
//! | Tool highlights    | Gizmos            | `Collect`, per uncollected tool     |
//! | Tool labels        | `Text2d`          | `Collect`, per uncollected tool     |
//! | Repair zone        | Gizmos + `Text2d` | `Repair`                            |
//! | HUD                | Bevy UI           | Always while training               |
//!
//! Entities are spawned on `OnEnter(Training)` and despawned on
//! `OnExit(Training)`; in between only transforms, images, visibility and
//! text change.  The training loop draws in screen space, so every position
//! goes through [`screen_to_world`] on its way to a `Transform`.

use bevy::prelude::*;

use crate::assets::{ArtLibrary, ArtSlot};
use crate::config::TrainingConfig;
use crate::constants::TOOL_COUNT;
use crate::graphics::{rect_center_world, screen_to_world};
use crate::meshes::{
    filled_polygon_mesh, gradient_bottom, gradient_top, placeholder_body, placeholder_helmet,
    rounded_square_points, vertical_gradient_mesh,
};
use crate::menu::GameState;
use crate::simulation::{begin_training, TrainingSet};
use crate::training::{AstronautLook, Backdrop, BackdropArt, DrawList, Pose};

// ── Component markers ─────────────────────────────────────────────────────────

/// Every world-space entity of the training scene; despawned on exit.
#[derive(Component)]
pub struct TrainingScene;

#[derive(Component)]
pub struct BackdropSprite;

#[derive(Component)]
pub struct BackdropGradient;

#[derive(Component)]
pub struct AstronautSprite;

/// Parent of the placeholder body and helmet meshes.
#[derive(Component)]
pub struct AstronautPlaceholder;

/// Caption under tool `index`.
#[derive(Component, Debug, Clone, Copy)]
pub struct ToolLabel(pub usize);

#[derive(Component)]
pub struct RepairZoneLabel;

/// Root node of the HUD; despawned on exit.
#[derive(Component)]
pub struct HudRoot;

/// Progress marker `n` (zero-based).
#[derive(Component, Debug, Clone, Copy)]
pub struct ProgressMarker(pub u32);

/// Width-driven fill of the oxygen bar.
#[derive(Component)]
pub struct OxygenFill;

/// HUD text nodes that change per frame.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Stage,
    Oxygen,
    Tools,
    Banner,
}

/// HUD panels that appear and disappear.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudPanel {
    Tools,
    Banner,
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn panel_bg() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.6)
}
fn accent() -> Color {
    Color::srgb_u8(0x06, 0xb6, 0xd4)
}
fn oxygen_ok() -> Color {
    Color::srgb_u8(0x10, 0xb9, 0x81)
}
fn oxygen_low() -> Color {
    Color::srgb_u8(0xef, 0x44, 0x44)
}
fn marker_lit() -> Color {
    Color::srgb_u8(0x06, 0xb6, 0xd4)
}
fn marker_dim() -> Color {
    Color::srgb(0.20, 0.24, 0.30)
}
fn tool_glow() -> Color {
    Color::srgba(1.0, 0.84, 0.0, 0.7)
}
fn zone_color() -> Color {
    Color::srgb_u8(0x10, 0xb9, 0x81)
}

const Z_GRADIENT: f32 = -11.0;
const Z_BACKDROP: f32 = -10.0;
const Z_ASTRONAUT: f32 = 1.0;
const Z_LABELS: f32 = 2.0;

/// Corner radius of the placeholder body, as a fraction of its side.
const PLACEHOLDER_CORNER: f32 = 20.0 / 220.0;

// ── OnEnter(Training): spawn scene ────────────────────────────────────────────

/// Spawn every world-space entity the presenter drives, all hidden.
pub fn spawn_training_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        Sprite::default(),
        Transform::from_xyz(0.0, 0.0, Z_BACKDROP),
        Visibility::Hidden,
        BackdropSprite,
        TrainingScene,
    ));

    commands.spawn((
        Mesh2d(meshes.add(vertical_gradient_mesh(gradient_top(), gradient_bottom()))),
        MeshMaterial2d(materials.add(ColorMaterial::default())),
        Transform::from_xyz(0.0, 0.0, Z_GRADIENT),
        Visibility::Hidden,
        BackdropGradient,
        TrainingScene,
    ));

    commands.spawn((
        Sprite::default(),
        Transform::from_xyz(0.0, 0.0, Z_ASTRONAUT),
        Visibility::Hidden,
        AstronautSprite,
        TrainingScene,
    ));

    let body = meshes.add(filled_polygon_mesh(&rounded_square_points(PLACEHOLDER_CORNER, 6)));
    let helmet = meshes.add(Circle::new(1.0 / 6.0));
    commands
        .spawn((
            Transform::from_xyz(0.0, 0.0, Z_ASTRONAUT),
            Visibility::Hidden,
            AstronautPlaceholder,
            TrainingScene,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(body),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(placeholder_body()))),
                Transform::default(),
            ));
            // Helmet centre sits a third of the way down from the top edge.
            parent.spawn((
                Mesh2d(helmet),
                MeshMaterial2d(materials.add(ColorMaterial::from_color(placeholder_helmet()))),
                Transform::from_xyz(0.0, 0.5 - 1.0 / 3.0, 0.1),
            ));
        });

    for index in 0..TOOL_COUNT {
        commands.spawn((
            Text2d::new(""),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_xyz(0.0, 0.0, Z_LABELS),
            Visibility::Hidden,
            ToolLabel(index),
            TrainingScene,
        ));
    }

    commands.spawn((
        Text2d::new("REPAIR ZONE"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(zone_color()),
        Transform::from_xyz(0.0, 0.0, Z_LABELS),
        Visibility::Hidden,
        RepairZoneLabel,
        TrainingScene,
    ));
}

/// Spawn the HUD overlay.
///
/// Layout:
/// ```text
/// ┌───────────────────────────────────────────────┐
/// │              (1) (2) (3) (4)                  │
/// │ ┌ CURRENT STAGE ┐                             │
/// │ ┌ OXYGEN ▓▓▓▓░░ ┐                             │
/// │ ┌ TOOLS n/8     ┐                             │
/// │                                               │
/// │          ┌ instruction banner ┐               │
/// └───────────────────────────────────────────────┘
/// ```
pub fn spawn_hud(mut commands: Commands, config: Res<TrainingConfig>) {
    let font = config.hud_font_size;
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|root| {
            // ── Progress markers ──────────────────────────────────────────────
            root.spawn(Node {
                position_type: PositionType::Absolute,
                top: Val::Px(20.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                column_gap: Val::Px(24.0),
                ..default()
            })
            .with_children(|row| {
                for n in 0..crate::constants::PROGRESS_MARKERS {
                    row.spawn((
                        Node {
                            width: Val::Px(40.0),
                            height: Val::Px(40.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(marker_dim()),
                        BorderColor::all(accent()),
                        ProgressMarker(n),
                    ))
                    .with_children(|m| {
                        m.spawn((
                            Text::new((n + 1).to_string()),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
                }
            });

            // ── Current stage ─────────────────────────────────────────────────
            root.spawn(panel(110.0, 350.0))
                .with_children(|p| {
                    p.spawn((
                        Text::new("CURRENT STAGE:"),
                        TextFont {
                            font_size: font,
                            ..default()
                        },
                        TextColor(accent()),
                    ));
                    p.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: font + 4.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        HudText::Stage,
                    ));
                });

            // ── Oxygen ────────────────────────────────────────────────────────
            root.spawn(panel(230.0, 350.0))
                .with_children(|p| {
                    p.spawn((
                        Text::new("OXYGEN:"),
                        TextFont {
                            font_size: font - 2.0,
                            ..default()
                        },
                        TextColor(accent()),
                    ));
                    p.spawn((
                        Node {
                            width: Val::Px(300.0),
                            height: Val::Px(25.0),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.1)),
                        BorderColor::all(Color::WHITE),
                    ))
                    .with_children(|bar| {
                        bar.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(oxygen_ok()),
                            OxygenFill,
                        ));
                        bar.spawn((
                            Node {
                                position_type: PositionType::Absolute,
                                width: Val::Percent(100.0),
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                        ))
                        .with_children(|c| {
                            c.spawn((
                                Text::new("100%"),
                                TextFont {
                                    font_size: 16.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                                HudText::Oxygen,
                            ));
                        });
                    });
                });

            // ── Tools ─────────────────────────────────────────────────────────
            root.spawn((panel(320.0, 350.0), HudPanel::Tools))
                .with_children(|p| {
                    p.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: font,
                            ..default()
                        },
                        TextColor(Color::srgb(0.98, 0.80, 0.08)),
                        HudText::Tools,
                    ));
                });

            // ── Instruction banner ────────────────────────────────────────────
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(40.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                HudPanel::Banner,
            ))
            .with_children(|row| {
                row.spawn((
                    Node {
                        width: Val::Px(500.0),
                        padding: UiRect::all(Val::Px(24.0)),
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.02, 0.71, 0.83, 0.25)),
                    BorderColor::all(accent()),
                ))
                .with_children(|b| {
                    b.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: font,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        TextLayout::new_with_justify(Justify::Center),
                        HudText::Banner,
                    ));
                });
            });
        });
    eprintln!("[SETUP] Training HUD spawned");
}

fn panel(top: f32, width: f32) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(top),
            width: Val::Px(width),
            padding: UiRect::all(Val::Px(16.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(panel_bg()),
        BorderColor::all(accent()),
    )
}

// ── OnExit(Training): despawn ─────────────────────────────────────────────────

/// Recursively despawn the scene and HUD.
pub fn despawn_training_scene(
    mut commands: Commands,
    query: Query<Entity, Or<(With<TrainingScene>, With<HudRoot>)>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update: presenters ────────────────────────────────────────────────────────

/// Backdrop art when the wanted image is loaded, gradient otherwise.
pub fn present_backdrop_system(
    canvas: Res<DrawList>,
    art: Option<Res<ArtLibrary>>,
    mut sprites: Query<(&mut Sprite, &mut Visibility), With<BackdropSprite>>,
    mut gradients: Query<
        (&mut Transform, &mut Visibility),
        (With<BackdropGradient>, Without<BackdropSprite>),
    >,
) {
    let (Some(area), Some(backdrop)) = (canvas.area(), canvas.backdrop()) else {
        return;
    };
    let image = match backdrop {
        Backdrop::Art(BackdropArt::Damaged) => {
            art.as_ref().and_then(|a| a.image(ArtSlot::BackdropDamaged))
        }
        Backdrop::Art(BackdropArt::Repaired) => {
            art.as_ref().and_then(|a| a.image(ArtSlot::BackdropRepaired))
        }
        Backdrop::Gradient => None,
    };

    for (mut sprite, mut visibility) in sprites.iter_mut() {
        match &image {
            Some(handle) => {
                if sprite.image != *handle {
                    sprite.image = handle.clone();
                }
                sprite.custom_size = Some(area.size());
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
    for (mut transform, mut visibility) in gradients.iter_mut() {
        transform.scale = area.size().extend(1.0);
        *visibility = if image.is_some() {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
    }
}

/// Astronaut sprite for the current pose, or the placeholder shape.
#[allow(clippy::type_complexity)]
pub fn present_astronaut_system(
    canvas: Res<DrawList>,
    art: Option<Res<ArtLibrary>>,
    mut sprites: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<AstronautSprite>>,
    mut placeholders: Query<
        (&mut Transform, &mut Visibility),
        (With<AstronautPlaceholder>, Without<AstronautSprite>),
    >,
) {
    let (Some(area), Some((bounds, look))) = (canvas.area(), canvas.astronaut()) else {
        return;
    };
    let image = match look {
        AstronautLook::Sprite(Pose::Static) => {
            art.as_ref().and_then(|a| a.image(ArtSlot::AstronautStatic))
        }
        AstronautLook::Sprite(Pose::Moving) => {
            art.as_ref().and_then(|a| a.image(ArtSlot::AstronautMoving))
        }
        AstronautLook::Placeholder(_) => None,
    };
    let centre = rect_center_world(area, bounds);

    for (mut sprite, mut transform, mut visibility) in sprites.iter_mut() {
        match &image {
            Some(handle) => {
                if sprite.image != *handle {
                    sprite.image = handle.clone();
                }
                sprite.custom_size = Some(bounds.size());
                transform.translation = centre.extend(Z_ASTRONAUT);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
    for (mut transform, mut visibility) in placeholders.iter_mut() {
        if image.is_some() {
            *visibility = Visibility::Hidden;
            continue;
        }
        transform.translation = centre.extend(Z_ASTRONAUT);
        transform.scale = bounds.size().extend(1.0);
        *visibility = Visibility::Visible;
    }
}

/// Pulsing highlight circles and the repair-zone outline.
pub fn gizmo_overlay_system(canvas: Res<DrawList>, mut gizmos: Gizmos) {
    let Some(area) = canvas.area() else {
        return;
    };
    for (_, _, position, pulse_radius) in canvas.tools() {
        let centre = screen_to_world(area, position);
        gizmos.circle_2d(centre, pulse_radius, tool_glow());
        gizmos.circle_2d(centre, pulse_radius * 0.5, tool_glow());
    }
    if let Some(zone) = canvas.repair_zone() {
        let centre = rect_center_world(area, zone);
        gizmos.rect_2d(centre, zone.size(), zone_color());
        gizmos.rect_2d(centre, zone.size() - Vec2::splat(8.0), zone_color().with_alpha(0.4));
    }
}

/// Tool captions and the repair-zone title.
#[allow(clippy::type_complexity)]
pub fn present_labels_system(
    canvas: Res<DrawList>,
    mut tools: Query<(&ToolLabel, &mut Text2d, &mut Transform, &mut Visibility)>,
    mut zone_labels: Query<
        (&mut Transform, &mut Visibility),
        (With<RepairZoneLabel>, Without<ToolLabel>),
    >,
) {
    let Some(area) = canvas.area() else {
        return;
    };
    for (label, mut text, mut transform, mut visibility) in tools.iter_mut() {
        match canvas.tools().find(|(index, ..)| *index == label.0) {
            Some((_, kind, position, _)) => {
                if text.0 != kind.label() {
                    *text = Text2d::new(kind.label());
                }
                let below = position + Vec2::new(0.0, 50.0);
                transform.translation = screen_to_world(area, below).extend(Z_LABELS);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
    for (mut transform, mut visibility) in zone_labels.iter_mut() {
        match canvas.repair_zone() {
            Some(zone) => {
                let above = Vec2::new(zone.center().x, zone.min.y - 20.0);
                transform.translation = screen_to_world(area, above).extend(Z_LABELS);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// Refresh every HUD element from the frame's [`HudView`](crate::training::HudView).
#[allow(clippy::type_complexity)]
pub fn hud_system(
    canvas: Res<DrawList>,
    mut texts: Query<(&HudText, &mut Text)>,
    mut markers: Query<(&ProgressMarker, &mut BackgroundColor), Without<OxygenFill>>,
    mut fill: Query<(&mut Node, &mut BackgroundColor), (With<OxygenFill>, Without<ProgressMarker>)>,
    mut panels: Query<(&HudPanel, &mut Node), Without<OxygenFill>>,
) {
    if !canvas.is_changed() {
        return;
    }
    let Some(view) = canvas.hud() else {
        return;
    };

    for (marker, mut bg) in markers.iter_mut() {
        bg.0 = if marker.0 < view.progress {
            marker_lit()
        } else {
            marker_dim()
        };
    }

    let bar_color = if view.oxygen_low {
        oxygen_low()
    } else {
        oxygen_ok()
    };
    for (mut node, mut bg) in fill.iter_mut() {
        node.width = Val::Percent(view.oxygen_fraction * 100.0);
        bg.0 = bar_color;
    }

    for (kind, mut text) in texts.iter_mut() {
        let value = match kind {
            HudText::Stage => view.stage_label.to_string(),
            HudText::Oxygen => format!("{}%", view.oxygen_percent),
            HudText::Tools => view
                .tools
                .map(|t| format!("TOOLS: {}/{}", t.collected, t.total))
                .unwrap_or_default(),
            HudText::Banner => view.banner.unwrap_or_default().to_string(),
        };
        if text.0 != value {
            *text = Text::new(value);
        }
    }

    for (panel, mut node) in panels.iter_mut() {
        let shown = match panel {
            HudPanel::Tools => view.tools.is_some(),
            HudPanel::Banner => view.banner.is_some(),
        };
        node.display = if shown { Display::Flex } else { Display::None };
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Scene and HUD presentation for [`GameState::Training`].
pub struct TrainingViewPlugin;

impl Plugin for TrainingViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Training),
            (spawn_training_scene, spawn_hud).after(begin_training),
        )
        .add_systems(OnExit(GameState::Training), despawn_training_scene)
        .add_systems(
            Update,
            (
                present_backdrop_system,
                present_astronaut_system,
                present_labels_system,
                gizmo_overlay_system,
                hud_system,
            )
                .in_set(TrainingSet::Present),
        );
    }
}
