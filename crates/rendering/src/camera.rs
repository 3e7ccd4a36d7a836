use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use mapgen::{random_seed, RegenerateMap};

use crate::map_systems::ActiveMap;
use crate::viewport::FrameView;

const PAN_SPEED: f32 = 600.0;
const ZOOM_SPEED: f32 = 0.15;
const KEY_ZOOM_RATE: f32 = 1.5;
pub const MIN_ZOOM: f32 = 0.25;
pub const MAX_ZOOM: f32 = 4.0;
/// How far past the map edge the view may scroll, in world pixels.
const CAMERA_MARGIN: f32 = 128.0;

/// 2D map camera: `offset` is the world position of the viewport's
/// top-left corner, `zoom` divides the viewport into visible world pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl MapCamera {
    pub fn frame_view(&self, viewport: Vec2) -> FrameView {
        FrameView::new(self.offset, viewport, self.zoom)
    }

    /// Multiply zoom by `factor`, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_by(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }
}

/// Keep the offset within `CAMERA_MARGIN` of the map on every side.
pub fn clamp_offset(offset: Vec2, world_size: Vec2, visible_extent: Vec2) -> Vec2 {
    let min = Vec2::splat(-CAMERA_MARGIN);
    let max = (world_size - visible_extent + Vec2::splat(CAMERA_MARGIN)).max(min);
    offset.clamp(min, max)
}

/// Unit pan direction from held keys, y pointing down the map.
pub fn pan_direction(keys: &ButtonInput<KeyCode>) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// WASD/Arrow keys: pan. Speed is in screen pixels, so it slows as zoom grows.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera: ResMut<MapCamera>,
) {
    let dir = pan_direction(&keys);
    if dir == Vec2::ZERO {
        return;
    }
    let delta = dir * PAN_SPEED * time.delta_secs() / camera.zoom;
    camera.offset += delta;
}

/// Mouse wheel: zoom.
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut camera: ResMut<MapCamera>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        camera.zoom_by(1.0 + dy * ZOOM_SPEED);
    }
}

/// `+`/`-` (main row or numpad): zoom.
pub fn camera_zoom_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera: ResMut<MapCamera>,
) {
    let zoom_in = keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd);
    let zoom_out = keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract);
    let step = KEY_ZOOM_RATE.powf(time.delta_secs());
    match (zoom_in, zoom_out) {
        (true, false) => camera.zoom_by(step),
        (false, true) => camera.zoom_by(1.0 / step),
        _ => {}
    }
}

pub fn clamp_camera_to_map(
    map: Option<Res<ActiveMap>>,
    windows: Query<&Window>,
    mut camera: ResMut<MapCamera>,
) {
    let Some(map) = map else {
        return;
    };
    let Ok(window) = windows.get_single() else {
        return;
    };
    let extent = Vec2::new(window.width(), window.height()) / camera.zoom;
    let clamped = clamp_offset(camera.offset, map.0.world_size(), extent);
    if clamped != camera.offset {
        camera.offset = clamped;
    }
}

/// `R`: build a fresh map from a new random seed.
pub fn request_regenerate(
    keys: Res<ButtonInput<KeyCode>>,
    mut events: EventWriter<RegenerateMap>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        events.send(RegenerateMap {
            seed: random_seed(),
        });
    }
}
