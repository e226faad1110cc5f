//! Per-tick readouts pulled by the UI.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::bodies::{CelestialBodyId, SolarSystem};
use crate::navigation::NavTargeting;
use crate::spacecraft::{Spacecraft, WarpState};

/// Snapshot of the ship and target state after a tick.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Telemetry {
    pub speed: f64,
    pub position: DVec3,
    pub target: Option<CelestialBodyId>,
    pub distance: Option<f64>,
    pub navigating: bool,
    pub warp: WarpState,
    pub warp_intensity: f64,
    pub autopilot_available: bool,
    pub engine_glow: f64,
}

impl Telemetry {
    pub fn capture(ship: &Spacecraft, nav: &NavTargeting, system: &SolarSystem) -> Self {
        Self {
            speed: ship.speed,
            position: ship.position,
            target: nav.target(),
            distance: nav.distance_to_target(ship, system),
            navigating: ship.is_navigating(),
            warp: ship.warp_state(),
            warp_intensity: ship.warp_intensity(),
            autopilot_available: nav.autopilot_available(),
            engine_glow: ship.engine_glow(),
        }
    }

    pub fn speed_text(&self) -> String {
        format!("Speed: {:.2}", self.speed)
    }

    pub fn position_text(&self) -> String {
        format!(
            "Position: ({:.0}, {:.0}, {:.0})",
            self.position.x, self.position.y, self.position.z
        )
    }

    pub fn distance_text(&self) -> String {
        match self.distance {
            Some(distance) if self.navigating => {
                format!("Distance: {distance:.1} (navigating...)")
            }
            Some(distance) => format!("Distance: {distance:.1}"),
            None => "Distance: --".to_string(),
        }
    }

    pub fn target_text(&self) -> String {
        match self.target {
            Some(id) => format!("Target: {}", id.name()),
            None => "Target: none".to_string(),
        }
    }

    /// Engine glow opacity for the renderer.
    pub fn glow_opacity(&self) -> f32 {
        (0.3 + 0.5 * self.engine_glow) as f32
    }

    /// Engine glow scale for the renderer.
    pub fn glow_scale(&self) -> f32 {
        (1.0 + 0.5 * self.engine_glow) as f32
    }
}
