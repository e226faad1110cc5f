//! Chase camera that follows the ship.
//!
//! The camera sits at a fixed offset in the ship's local frame (above and
//! behind) and always looks at the ship.

use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;

use crate::spacecraft::Spacecraft;
use crate::types::SimulationSet;

/// Camera offset in the ship's local frame. Local +Z is forward, so this is
/// behind and above.
pub const CHASE_OFFSET: DVec3 = DVec3::new(0.0, 5.0, -15.0);

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Plugin providing the chase camera.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, follow_ship.after(SimulationSet::Tick));
    }
}

/// Camera transform for a ship pose.
pub fn chase_transform(position: DVec3, orientation: DQuat) -> Transform {
    let eye = position + orientation * CHASE_OFFSET;
    Transform::from_translation(eye.as_vec3()).looking_at(position.as_vec3(), Vec3::Y)
}

fn setup_camera(mut commands: Commands, ship: Res<Spacecraft>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: 0.1,
            far: 10000.0,
            ..default()
        }),
        chase_transform(ship.position, ship.orientation),
        MainCamera,
    ));
}

fn follow_ship(ship: Res<Spacecraft>, mut camera_query: Query<&mut Transform, With<MainCamera>>) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = chase_transform(ship.position, ship.orientation);
}
