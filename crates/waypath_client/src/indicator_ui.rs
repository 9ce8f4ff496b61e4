//! IndicatorVisual → Bevy UI
//!
//! Simulation считает позицию в canvas units (1920×1080, origin снизу-слева).
//! Здесь только перевод в Node (проценты от окна) + поворот + sprite.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use waypath_simulation::{IndicatorSet, IndicatorSprite, IndicatorVisual, WaypointIndicator};

const SPRITE_SIZE: u32 = 32;
const WIDGET_SIZE: f32 = 48.0;

pub struct IndicatorUiPlugin;

impl Plugin for IndicatorUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, create_indicator_sprites)
            .add_systems(Update, spawn_widgets_for_new_indicators)
            .add_systems(PostUpdate, sync_indicator_widgets.after(IndicatorSet));
    }
}

/// Link: UI node → indicator entity
#[derive(Component)]
pub struct IndicatorWidget {
    pub indicator: Entity,
}

#[derive(Resource)]
pub struct IndicatorSprites {
    pub arrow: Handle<Image>,
    pub on_screen: Handle<Image>,
}

impl IndicatorSprites {
    fn handle(&self, sprite: IndicatorSprite) -> Handle<Image> {
        match sprite {
            IndicatorSprite::Arrow => self.arrow.clone(),
            IndicatorSprite::OnScreen => self.on_screen.clone(),
        }
    }
}

/// Процедурные sprite'ы: стрелка остриём вниз (rotation_offset 90° разворачивает её к target'у)
fn create_indicator_sprites(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    let arrow = images.add(rasterize(|x, y| {
        // Треугольник: основание сверху (y = 4), остриё внизу (y = 31)
        if !(4.0..=31.0).contains(&y) {
            return false;
        }
        let half_width = 12.0 * (31.0 - y) / 27.0;
        (x - 16.0).abs() <= half_width
    }));

    let on_screen = images.add(rasterize(|x, y| {
        let distance = Vec2::new(x - 16.0, y - 16.0).length();
        (8.0..=13.0).contains(&distance)
    }));

    commands.insert_resource(IndicatorSprites { arrow, on_screen });
}

fn rasterize(inside: impl Fn(f32, f32) -> bool) -> Image {
    let mut data = Vec::with_capacity((SPRITE_SIZE * SPRITE_SIZE * 4) as usize);
    for row in 0..SPRITE_SIZE {
        for column in 0..SPRITE_SIZE {
            let alpha = if inside(column as f32 + 0.5, row as f32 + 0.5) { 255 } else { 0 };
            data.extend_from_slice(&[255, 210, 60, alpha]);
        }
    }

    Image::new(
        Extent3d {
            width: SPRITE_SIZE,
            height: SPRITE_SIZE,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

fn spawn_widgets_for_new_indicators(
    mut commands: Commands,
    indicators: Query<Entity, Added<WaypointIndicator>>,
    sprites: Res<IndicatorSprites>,
) {
    for indicator in indicators.iter() {
        commands.spawn((
            Name::new("IndicatorWidget"),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(WIDGET_SIZE),
                height: Val::Px(WIDGET_SIZE),
                // Центрируем node на точке
                margin: UiRect {
                    left: Val::Px(-WIDGET_SIZE * 0.5),
                    bottom: Val::Px(-WIDGET_SIZE * 0.5),
                    ..default()
                },
                ..default()
            },
            ImageNode::new(sprites.on_screen.clone()),
            Visibility::Hidden,
            IndicatorWidget { indicator },
        ));
    }
}

fn sync_indicator_widgets(
    mut commands: Commands,
    indicators: Query<(&WaypointIndicator, Ref<IndicatorVisual>)>,
    mut widgets: Query<(Entity, &IndicatorWidget, &mut Node, &mut ImageNode, &mut Transform, &mut Visibility)>,
    sprites: Res<IndicatorSprites>,
) {
    for (widget_entity, widget, mut node, mut image, mut transform, mut visibility) in widgets.iter_mut() {
        let Ok((indicator, visual)) = indicators.get(widget.indicator) else {
            // Indicator despawn'ут — убираем и UI
            commands.entity(widget_entity).despawn();
            continue;
        };
        if !visual.is_changed() {
            continue;
        }

        if !visual.visible {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Visible;

        let resolution = indicator.config.resolution();
        node.left = Val::Percent(visual.position.x / resolution.x * 100.0);
        node.bottom = Val::Percent(visual.position.y / resolution.y * 100.0);

        image.image = sprites.handle(visual.sprite);
        // UI space y-down: против часовой на canvas = по часовой здесь
        transform.rotation = Quat::from_rotation_z(-visual.rotation_degrees.to_radians());
    }
}
