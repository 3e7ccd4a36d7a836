use bevy::prelude::*;
use bevy::sprite::MeshMaterial2d;
use bevy::window::PrimaryWindow;

use super::draw_list::{DrawCommand, FrameDrawList};
use super::grass_material::GrassMaterial;
use crate::viewport::TileRect;

/// Depth of the first draw of a frame. Later draws stack above earlier ones.
const Z_BASE: f32 = 0.0;
const Z_STEP: f32 = 0.0001;

/// Unit quad shared by every shaded tile, scaled per draw.
#[derive(Resource)]
pub struct TileQuad(pub Handle<Mesh>);

/// Marker for pooled plain-texture draws.
#[derive(Component)]
pub struct PooledSprite;

/// Marker for pooled grass-material draws.
#[derive(Component)]
pub struct PooledShadedTile;

/// Entities reused across frames, in spawn order.
#[derive(Resource, Default)]
pub struct DrawPool {
    pub sprites: Vec<Entity>,
    pub shaded: Vec<Entity>,
}

pub fn setup_tile_quad(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let quad = meshes.add(Rectangle::new(1.0, 1.0));
    commands.insert_resource(TileQuad(quad));
}

/// Centre of a top-left-origin screen rectangle in 2D world coordinates,
/// with the camera at the origin and y pointing up.
pub fn screen_rect_to_world(dest: TileRect, window_size: Vec2, depth: f32) -> Vec3 {
    Vec3::new(
        dest.x + dest.w / 2.0 - window_size.x / 2.0,
        window_size.y / 2.0 - (dest.y + dest.h / 2.0),
        depth,
    )
}

pub fn draw_depth(index: usize) -> f32 {
    Z_BASE + index as f32 * Z_STEP
}

/// Mirror this frame's `FrameDrawList` onto pooled entities. Plain draws
/// become sprites, shaded draws become quads carrying the grass material.
/// Entities beyond this frame's count stay spawned but hidden.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn sync_draw_pool(
    mut commands: Commands,
    draw_list: Res<FrameDrawList>,
    quad: Option<Res<TileQuad>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pool: ResMut<DrawPool>,
    mut materials: ResMut<Assets<GrassMaterial>>,
    mut sprites: Query<
        (&mut Sprite, &mut Transform, &mut Visibility),
        (With<PooledSprite>, Without<PooledShadedTile>),
    >,
    mut shaded: Query<
        (&mut MeshMaterial2d<GrassMaterial>, &mut Transform, &mut Visibility),
        (With<PooledShadedTile>, Without<PooledSprite>),
    >,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(quad) = quad else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());

    apply_material_updates(&draw_list, &mut materials);

    let mut sprite_used = 0;
    let mut shaded_used = 0;
    for (index, command) in draw_list.commands.iter().enumerate() {
        let translation = screen_rect_to_world(command.dest, window_size, draw_depth(index));
        match &command.material {
            None => {
                place_sprite(
                    &mut commands,
                    &mut pool.sprites,
                    &mut sprites,
                    sprite_used,
                    command,
                    translation,
                );
                sprite_used += 1;
            }
            Some(material) => {
                let transform = Transform::from_translation(translation)
                    .with_scale(Vec3::new(command.dest.w, command.dest.h, 1.0));
                if let Some(&entity) = pool.shaded.get(shaded_used) {
                    if let Ok((mut mat, mut tf, mut vis)) = shaded.get_mut(entity) {
                        if mat.0 != *material {
                            mat.0 = material.clone();
                        }
                        *tf = transform;
                        *vis = Visibility::Visible;
                    }
                } else {
                    let entity = commands
                        .spawn((
                            Mesh2d(quad.0.clone()),
                            MeshMaterial2d(material.clone()),
                            transform,
                            Visibility::Visible,
                            PooledShadedTile,
                        ))
                        .id();
                    pool.shaded.push(entity);
                }
                shaded_used += 1;
            }
        }
    }

    for &entity in pool.sprites.iter().skip(sprite_used) {
        if let Ok((_, _, mut vis)) = sprites.get_mut(entity) {
            if *vis != Visibility::Hidden {
                *vis = Visibility::Hidden;
            }
        }
    }
    for &entity in pool.shaded.iter().skip(shaded_used) {
        if let Ok((_, _, mut vis)) = shaded.get_mut(entity) {
            if *vis != Visibility::Hidden {
                *vis = Visibility::Hidden;
            }
        }
    }
}

#[allow(clippy::type_complexity)]
fn place_sprite(
    commands: &mut Commands,
    pool: &mut Vec<Entity>,
    sprites: &mut Query<
        (&mut Sprite, &mut Transform, &mut Visibility),
        (With<PooledSprite>, Without<PooledShadedTile>),
    >,
    slot: usize,
    command: &DrawCommand,
    translation: Vec3,
) {
    let size = Vec2::new(command.dest.w, command.dest.h);
    if let Some(&entity) = pool.get(slot) {
        if let Ok((mut sprite, mut tf, mut vis)) = sprites.get_mut(entity) {
            if sprite.image != command.texture {
                sprite.image = command.texture.clone();
            }
            sprite.custom_size = Some(size);
            tf.translation = translation;
            *vis = Visibility::Visible;
        }
        return;
    }
    let entity = commands
        .spawn((
            Sprite {
                image: command.texture.clone(),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(translation),
            Visibility::Visible,
            PooledSprite,
        ))
        .id();
    pool.push(entity);
}

/// Push uniform values and the grass texture into material assets, touching
/// an asset only when something changed so it is not re-prepared every frame.
fn apply_material_updates(draw_list: &FrameDrawList, materials: &mut Assets<GrassMaterial>) {
    for (&id, &resolution) in &draw_list.resolutions {
        let unchanged = materials.get(id).is_some_and(|m| m.resolution == resolution);
        if unchanged {
            continue;
        }
        if let Some(material) = materials.get_mut(id) {
            material.resolution = resolution;
        }
    }

    for command in &draw_list.commands {
        let Some(handle) = &command.material else {
            continue;
        };
        let current = materials.get(handle).map(|m| m.texture.as_ref() == Some(&command.texture));
        if current == Some(false) {
            if let Some(material) = materials.get_mut(handle) {
                material.texture = Some(command.texture.clone());
            }
        }
    }
}
