//! Rendering of the sandbox.
//!
//! The renderer owns no simulation state: every system here reads the core
//! resources after [`SimulationSet::Tick`] and mirrors them into entities,
//! meshes and gizmos.

pub mod bodies;
pub mod grid;
pub mod overlays;
pub mod ship;

use bevy::prelude::*;

use crate::types::SimulationSet;

pub use self::bodies::{BodyVisual, ModelLoadError, ModelStatus};
pub use self::overlays::TargetMarker;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TargetMarker>()
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(
                Startup,
                (
                    spawn_sun_light,
                    bodies::spawn_bodies,
                    ship::spawn_ship,
                    grid::spawn_grid,
                ),
            )
            .add_systems(
                Update,
                (
                    bodies::sync_bodies,
                    bodies::watch_model_loads,
                    ship::sync_ship,
                    ship::update_engine_glow,
                    grid::update_grid_mesh,
                    grid::draw_grid_wireframe,
                    overlays::draw_orbit_rings,
                    overlays::draw_target,
                )
                    .after(SimulationSet::Tick),
            );
    }
}

/// Colour from a `0xRRGGBB` value.
pub fn srgb_hex(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn spawn_sun_light(mut commands: Commands) {
    commands.spawn((
        PointLight {
            color: srgb_hex(0xFFFAF0),
            intensity: 5.0e9,
            range: 2000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
        Name::new("Sun light"),
    ));
}
