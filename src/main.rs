//! Warpwake - Solar System Flight Sandbox
//!
//! Fly a small ship among orbiting planets, engage the warp drive and watch
//! the gravity grid ripple in its wake.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use warpwake::camera::CameraPlugin;
use warpwake::input::FlightInputPlugin;
use warpwake::render::RenderPlugin;
use warpwake::simulation::SimulationPlugin;
use warpwake::time::TimePlugin;
use warpwake::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Warpwake".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Simulation first: the renderer and camera read its resources at startup
        .add_plugins((TimePlugin, SimulationPlugin))
        .add_plugins((FlightInputPlugin, CameraPlugin, RenderPlugin, UiPlugin))
        .run();
}
