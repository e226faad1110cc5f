//! Keyboard and mouse input for flying the ship.
//!
//! Held movement keys are sampled into [`FlightInput`] every frame. Discrete
//! keys and clicks become [`FlightCommand`] messages that the simulation
//! applies at the start of the next tick.
//!
//! | Key | Action |
//! |-----|--------|
//! | W / S | thrust forward / reverse |
//! | A / D | yaw left / right |
//! | ↑ / ↓ | nose down / nose up |
//! | R / F | ascend / descend |
//! | Q / E | strafe left / right |
//! | K | toggle warp |
//! | N | toggle autopilot |
//! | G | toggle gravity grid |
//! | Space | pause |
//! | Esc | clear target |
//! | 0–8 | select body |
//! | [ / ] | halve / double time scale |

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::bodies::{CelestialBody, CelestialBodyId, SolarSystem};
use crate::camera::MainCamera;
use crate::simulation::FlightCommand;
use crate::spacecraft::{FlightInput, Spacecraft};
use crate::types::{SimulationSet, SimulationTime};

/// Smallest time scale reachable from the keyboard.
pub const MIN_KEY_TIME_SCALE: f64 = 0.125;

/// Largest time scale the controls allow.
pub const MAX_TIME_SCALE: f64 = 5.0;

const MOVEMENT_KEYS: [KeyCode; 10] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::KeyR,
    KeyCode::KeyF,
    KeyCode::KeyQ,
    KeyCode::KeyE,
];

const SELECT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit0,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
];

/// Plugin sampling keyboard and mouse input ahead of the tick.
pub struct FlightInputPlugin;

impl Plugin for FlightInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sample_flight_keys, keyboard_commands, pick_body_on_click)
                .before(SimulationSet::Prepare),
        );
    }
}

/// Snapshot the held movement keys.
pub fn flight_input_from_keys(keys: &ButtonInput<KeyCode>) -> FlightInput {
    FlightInput {
        forward: keys.pressed(KeyCode::KeyW),
        backward: keys.pressed(KeyCode::KeyS),
        yaw_left: keys.pressed(KeyCode::KeyA),
        yaw_right: keys.pressed(KeyCode::KeyD),
        nose_down: keys.pressed(KeyCode::ArrowUp),
        nose_up: keys.pressed(KeyCode::ArrowDown),
        ascend: keys.pressed(KeyCode::KeyR),
        descend: keys.pressed(KeyCode::KeyF),
        strafe_left: keys.pressed(KeyCode::KeyQ),
        strafe_right: keys.pressed(KeyCode::KeyE),
    }
}

/// Commands for this frame's key presses.
///
/// A freshly pressed movement key while the autopilot navigates hands
/// control back to the pilot.
pub fn commands_for_keys(
    keys: &ButtonInput<KeyCode>,
    navigating: bool,
    time_scale: f64,
) -> Vec<FlightCommand> {
    let mut commands = Vec::new();

    if navigating && keys.any_just_pressed(MOVEMENT_KEYS) {
        commands.push(FlightCommand::StopAutopilot);
    }
    if keys.just_pressed(KeyCode::KeyK) {
        commands.push(FlightCommand::ToggleWarp);
    }
    if keys.just_pressed(KeyCode::KeyN) {
        commands.push(FlightCommand::ToggleAutopilot);
    }
    if keys.just_pressed(KeyCode::KeyG) {
        commands.push(FlightCommand::ToggleGravityGrid);
    }
    if keys.just_pressed(KeyCode::Space) {
        commands.push(FlightCommand::TogglePause);
    }
    if keys.just_pressed(KeyCode::Escape) {
        commands.push(FlightCommand::ClearTarget);
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        commands.push(FlightCommand::SetTimeScale(
            (time_scale * 0.5).max(MIN_KEY_TIME_SCALE),
        ));
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        commands.push(FlightCommand::SetTimeScale(
            (time_scale * 2.0).clamp(MIN_KEY_TIME_SCALE, MAX_TIME_SCALE),
        ));
    }
    for (index, key) in SELECT_KEYS.iter().enumerate() {
        if keys.just_pressed(*key)
            && let Some(id) = CelestialBodyId::from_index(index)
        {
            commands.push(FlightCommand::Select(Some(id)));
        }
    }

    commands
}

/// Nearest body hit by a ray, if any. `direction` must be normalized.
pub fn pick_body(
    origin: DVec3,
    direction: DVec3,
    bodies: &[CelestialBody],
) -> Option<CelestialBodyId> {
    bodies
        .iter()
        .filter_map(|body| {
            ray_sphere(origin, direction, body.position, body.radius).map(|t| (t, body.id))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

/// Distance along the ray to the first intersection with a sphere.
fn ray_sphere(origin: DVec3, direction: DVec3, centre: DVec3, radius: f64) -> Option<f64> {
    let to_centre = centre - origin;
    let along = to_centre.dot(direction);
    let closest_sq = to_centre.length_squared() - along * along;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - closest_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else if near >= 0.0 {
        Some(near)
    } else {
        Some(0.0)
    }
}

fn sample_flight_keys(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<FlightInput>) {
    *input = flight_input_from_keys(&keys);
}

fn keyboard_commands(
    keys: Res<ButtonInput<KeyCode>>,
    ship: Res<Spacecraft>,
    sim_time: Res<SimulationTime>,
    mut commands: MessageWriter<FlightCommand>,
) {
    for command in commands_for_keys(&keys, ship.is_navigating(), sim_time.scale) {
        commands.write(command);
    }
}

/// Left click selects the body under the cursor; empty space clears.
fn pick_body_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    system: Res<SolarSystem>,
    mut contexts: EguiContexts,
    mut commands: MessageWriter<FlightCommand>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_pointer_input()
    {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let hit = pick_body(
        ray.origin.as_dvec3(),
        ray.direction.as_vec3().as_dvec3(),
        system.bodies(),
    );
    commands.write(FlightCommand::Select(hit));
}
