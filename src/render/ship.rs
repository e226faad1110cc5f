//! Spacecraft visuals: hull cone, cockpit, engine glow.

use bevy::prelude::*;

use crate::spacecraft::Spacecraft;
use crate::telemetry::Telemetry;

/// Root entity of the ship visuals.
#[derive(Component)]
pub struct ShipVisual;

/// The engine glow sphere; its scale and opacity follow speed.
#[derive(Component)]
pub struct EngineGlow;

pub fn spawn_ship(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    ship: Res<Spacecraft>,
) {
    let hull = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.85, 0.9),
        metallic: 0.7,
        perceptual_roughness: 0.3,
        ..default()
    });
    let cockpit = materials.add(StandardMaterial {
        base_color: Color::srgba(0.3, 0.7, 1.0, 0.7),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let glow = materials.add(StandardMaterial {
        base_color: Color::srgba(0.0, 1.0, 1.0, 0.3),
        emissive: LinearRgba::rgb(0.0, 2.0, 2.0),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            ship_transform(&ship),
            Visibility::default(),
            ShipVisual,
            Name::new("Spacecraft"),
        ))
        .with_children(|parent| {
            // Cone tip along +Y; tip it forward onto +Z.
            parent.spawn((
                Mesh3d(meshes.add(Cone::new(2.0, 6.0))),
                MeshMaterial3d(hull),
                Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(1.2))),
                MeshMaterial3d(cockpit),
                Transform::from_xyz(0.0, 0.8, 0.5),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Sphere::new(0.8))),
                MeshMaterial3d(glow),
                Transform::from_xyz(0.0, 0.0, -3.2),
                EngineGlow,
            ));
            parent.spawn((
                PointLight {
                    color: Color::srgb(0.0, 1.0, 1.0),
                    intensity: 20_000.0,
                    range: 20.0,
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, -3.5),
            ));
        });
}

/// World transform for the ship model.
pub fn ship_transform(ship: &Spacecraft) -> Transform {
    Transform {
        translation: ship.position.as_vec3(),
        rotation: ship.orientation.as_quat(),
        scale: Vec3::splat(ship.visual_scale as f32),
    }
}

pub fn sync_ship(ship: Res<Spacecraft>, mut query: Query<&mut Transform, With<ShipVisual>>) {
    for mut transform in &mut query {
        *transform = ship_transform(&ship);
    }
}

pub fn update_engine_glow(
    telemetry: Res<Telemetry>,
    mut query: Query<(&mut Transform, &MeshMaterial3d<StandardMaterial>), With<EngineGlow>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (mut transform, material) in &mut query {
        transform.scale = Vec3::splat(telemetry.glow_scale());
        if let Some(mut material) = materials.get_mut(&material.0) {
            material.base_color.set_alpha(telemetry.glow_opacity());
        }
    }
}
