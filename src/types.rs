//! Shared simulation types and tuning constants.
//!
//! All motion constants are per-tick increments: the sandbox advances one
//! fixed step per rendered frame.

use std::f64::consts::TAU;

use bevy::prelude::*;

/// System sets for ordering the per-frame simulation pipeline.
///
/// Orbits must be propagated before the ship integrates, and the gravity
/// field must read post-update ship and body positions.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Clock and queued commands.
    Prepare,
    /// Orbits, spacecraft, collision, field, telemetry (chained).
    Tick,
}

/// Interpolation factor per tick for autopilot turning toward its target.
pub const AUTOPILOT_TURN_RATE: f64 = 0.05;

/// Autopilot speed is `distance / AUTOPILOT_APPROACH_DIVISOR`, capped at cruise.
pub const AUTOPILOT_APPROACH_DIVISOR: f64 = 50.0;

/// Easing factor per tick for the warp visual intensity.
pub const WARP_EASE_RATE: f64 = 0.08;

/// Speed multiplier applied after a collision correction.
pub const COLLISION_SPEED_FACTOR: f64 = 0.5;

/// Per-tick visual spin of each body about its own axis (scaled by time-scale).
pub const BODY_SPIN_RATE: f64 = 0.002;

/// Upper bound of the warp wake amplitude.
pub const MAX_WARP_STRENGTH: f64 = 18.0;

/// Wake amplitudes at or below this are treated as no wake.
pub const WARP_STRENGTH_EPSILON: f64 = 0.01;

/// Wave phase velocity while warping.
pub const WAVE_PHASE_RATE_WARP: f64 = 0.003;

/// Wave phase velocity outside warp.
pub const WAVE_PHASE_RATE_NORMAL: f64 = 0.05;

/// Spatial frequency of the warp wake.
pub const WAVE_FREQUENCY: f64 = 0.08;

/// Exponential attenuation of the warp wake with distance.
pub const WAVE_ATTENUATION: f64 = 0.0025;

/// Gravity well depth scale: `depth = mass * WELL_DEPTH_SCALE / (d * WELL_FALLOFF + 1)`.
pub const WELL_DEPTH_SCALE: f64 = 0.5;

/// Gravity well distance falloff.
pub const WELL_FALLOFF: f64 = 0.12;

/// Time controls owned by the user.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Time scale multiplier (1.0 = one orbital step per tick).
    pub scale: f64,
    /// Whether orbital and wave-phase advancement is frozen.
    pub paused: bool,
    /// Number of ticks run since startup (paused ticks included).
    pub ticks: u64,
    /// Scaled time accumulated while unpaused.
    pub elapsed: f64,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            scale: 1.0,
            paused: false,
            ticks: 0,
            elapsed: 0.0,
        }
    }
}

impl SimulationTime {
    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Set the time scale.
    ///
    /// The core imposes no range; the UI clamps its slider. Non-finite
    /// values are rejected and leave the scale untouched.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            return false;
        }
        self.scale = scale;
        true
    }

    /// Build the context for the tick about to run and count it.
    pub fn begin_tick(&mut self, dt: f64) -> TickContext {
        self.ticks += 1;
        if !self.paused {
            self.elapsed += self.scale;
        }
        TickContext {
            dt,
            time_scale: self.scale,
            paused: self.paused,
        }
    }
}

/// Explicit per-tick context threaded into every update that depends on time.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct TickContext {
    /// Real seconds since the previous frame (informational).
    pub dt: f64,
    /// Time-scale multiplier for this tick.
    pub time_scale: f64,
    /// Whether orbital and wave advancement is frozen for this tick.
    pub paused: bool,
}

impl Default for TickContext {
    fn default() -> Self {
        Self {
            dt: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }
}

impl TickContext {
    /// Context for a running tick at the given scale.
    pub fn running(time_scale: f64) -> Self {
        Self {
            time_scale,
            ..Self::default()
        }
    }

    /// Context for a paused tick.
    pub fn paused() -> Self {
        Self {
            paused: true,
            ..Self::default()
        }
    }

    /// Effective time-scale: zero while paused.
    pub fn effective_scale(&self) -> f64 {
        if self.paused { 0.0 } else { self.time_scale }
    }
}

/// Wrap an angle into `[0, 2π)`.
///
/// `rem_euclid` rounds tiny negative inputs up to exactly `TAU`; those map
/// to zero.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}
