//! Warpwake - Solar System Flight Sandbox
//!
//! A library crate exposing the simulation core (orbits, spacecraft, warp
//! drive, autopilot, collision, gravity grid, targeting) as plain Rust types
//! that double as Bevy resources, plus the plugins that render and drive
//! them.

pub mod bodies;
pub mod camera;
pub mod collision;
pub mod config;
pub mod gravity_field;
pub mod input;
pub mod navigation;
pub mod render;
pub mod simulation;
pub mod spacecraft;
pub mod telemetry;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
