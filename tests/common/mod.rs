//! Common test utilities for integration tests.

#![allow(dead_code)]

use bevy::prelude::*;
use warpwake::bodies::{CelestialBody, CelestialBodyId, SolarSystem};
use warpwake::config::FlightConfig;
use warpwake::simulation::{Sandbox, SimulationPlugin};
use warpwake::spacecraft::FlightInput;
use warpwake::time::TimePlugin;

/// Configuration with deterministic orbital angles.
pub fn deterministic_config() -> FlightConfig {
    FlightConfig {
        randomize_initial_angles: false,
        ..FlightConfig::default()
    }
}

/// Headless app running the simulation plugins over the full catalog.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(deterministic_config())
        .add_plugins((TimePlugin, SimulationPlugin));
    app
}

/// Sandbox over the full catalog with zero angles.
pub fn catalog_sandbox() -> Sandbox {
    Sandbox::new(&deterministic_config(), SolarSystem::new())
}

/// Sandbox holding one body parked at `(distance, 0, 0)`.
///
/// Its angular speed is zero, so propagation leaves it in place.
pub fn single_body_sandbox(id: CelestialBodyId, distance: f64, radius: f64) -> Sandbox {
    let body = CelestialBody::new(id, radius, distance, 0.0, 0.0);
    Sandbox::new(
        &deterministic_config(),
        SolarSystem::from_bodies(vec![body]),
    )
}

/// Tick with no keys held until `done` holds or `max_ticks` pass.
/// Returns the number of ticks run.
pub fn run_until(sandbox: &mut Sandbox, max_ticks: usize, done: impl Fn(&Sandbox) -> bool) -> usize {
    let idle = FlightInput::default();
    for tick in 0..max_ticks {
        if done(sandbox) {
            return tick;
        }
        sandbox.tick(&idle);
    }
    max_ticks
}

/// Hold `input` for `ticks` ticks.
pub fn hold(sandbox: &mut Sandbox, input: FlightInput, ticks: usize) {
    for _ in 0..ticks {
        sandbox.tick(&input);
    }
}
