use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

use natural_selection::Environment;

/// Extra room around the arena when fitting the view.
const VIEW_MARGIN: f32 = 1.2;

#[derive(Component)]
pub struct MainCamera;

/// Zoom and pan state of the arena view.
#[derive(Resource)]
pub struct ViewState {
    pub zoom: f32,
    pub fitted_zoom: f32,
    pub offset: Vec2,
    pub is_panning: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            fitted_zoom: 1.0,
            offset: Vec2::ZERO,
            is_panning: false,
        }
    }
}

impl ViewState {
    /// Zoom at which the whole arena fits inside a window of `window_size`.
    pub fn fit(arena_size: Vec2, window_size: Vec2) -> f32 {
        let ratio = (arena_size * VIEW_MARGIN) / window_size.max(Vec2::ONE);
        ratio.max_element().max(0.1)
    }
}

pub fn setup_camera(
    mut commands: Commands,
    mut view: ResMut<ViewState>,
    windows: Query<&Window>,
    environment: Res<Environment>,
) {
    let arena = environment.arena();
    if let Ok(window) = windows.get_single() {
        view.fitted_zoom = ViewState::fit(Vec2::new(arena.width, arena.height), window.size());
        view.zoom = view.fitted_zoom;
    }

    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 0.0),
        OrthographicProjection {
            scale: view.zoom,
            ..OrthographicProjection::default_2d()
        },
    ));
}

pub fn camera_zoom(
    mut scroll_events: EventReader<MouseWheel>,
    mut view: ResMut<ViewState>,
    mut query: Query<&mut OrthographicProjection, With<MainCamera>>,
) {
    for event in scroll_events.read() {
        view.zoom = (view.zoom - event.y * 0.1).clamp(0.1, 10.0);
        if let Ok(mut projection) = query.get_single_mut() {
            projection.scale = view.zoom;
        }
    }
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut motion_events: EventReader<MouseMotion>,
    mut view: ResMut<ViewState>,
    mut query: Query<&mut Transform, With<MainCamera>>,
) {
    if mouse_button.just_pressed(MouseButton::Middle) {
        view.is_panning = true;
    }
    if mouse_button.just_released(MouseButton::Middle) {
        view.is_panning = false;
    }
    if !view.is_panning {
        motion_events.clear();
        return;
    }

    for event in motion_events.read() {
        // Screen y points down, world y points up.
        let delta = Vec2::new(-event.delta.x, event.delta.y) * view.zoom;
        view.offset += delta;
        if let Ok(mut transform) = query.get_single_mut() {
            transform.translation = view.offset.extend(transform.translation.z);
        }
    }
}

/// `R` recentres the view on the arena.
pub fn reset_view(
    keys: Res<ButtonInput<KeyCode>>,
    mut view: ResMut<ViewState>,
    mut query: Query<(&mut Transform, &mut OrthographicProjection), With<MainCamera>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    view.offset = Vec2::ZERO;
    view.zoom = view.fitted_zoom;
    if let Ok((mut transform, mut projection)) = query.get_single_mut() {
        transform.translation = Vec3::new(0.0, 0.0, transform.translation.z);
        projection.scale = view.zoom;
    }
}
