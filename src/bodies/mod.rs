//! Celestial bodies and their orbital propagation.
//!
//! Bodies move on fixed circles in the XZ plane around the origin. The
//! central star (orbital distance 0) never moves. This is a stylized orrery,
//! not an N-body integration: bodies do not attract one another.

pub mod data;

#[cfg(test)]
mod proptest_orbits;

pub use data::{CelestialBodyData, CelestialBodyId, ModelConfig, all_bodies, get_body_data};

use std::f64::consts::TAU;

use bevy::math::DVec3;
use bevy::prelude::*;
use rand::Rng;

use crate::types::{BODY_SPIN_RATE, TickContext, wrap_angle};

/// Live state of one body.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub id: CelestialBodyId,
    pub radius: f64,
    /// Orbit radius; 0 for the central star.
    pub orbital_distance: f64,
    /// Radians per tick at time-scale 1.
    pub angular_speed: f64,
    /// Current orbital angle in [0, 2π).
    pub angle: f64,
    /// Rotation about the body's own axis (visual only).
    pub spin: f64,
    /// Derived from `angle` and `orbital_distance`.
    pub position: DVec3,
}

impl CelestialBody {
    /// Create a body at the given orbital angle.
    pub fn new(
        id: CelestialBodyId,
        radius: f64,
        orbital_distance: f64,
        angular_speed: f64,
        angle: f64,
    ) -> Self {
        let mut body = Self {
            id,
            radius,
            orbital_distance,
            angular_speed,
            angle,
            spin: 0.0,
            position: DVec3::ZERO,
        };
        body.update_position();
        body
    }

    /// Create a body from its catalog entry.
    pub fn from_data(data: &CelestialBodyData, angle: f64) -> Self {
        Self::new(
            data.id,
            data.radius,
            data.orbital_distance,
            data.angular_speed,
            angle,
        )
    }

    /// Whether this is the fixed central body.
    pub fn is_central(&self) -> bool {
        self.orbital_distance <= 0.0
    }

    /// Mass used by the gravity grid: `radius³`.
    pub fn mass(&self) -> f64 {
        self.radius.powi(3)
    }

    /// Advance the orbital angle by `angular_speed * scale` and rederive position.
    ///
    /// The central body never moves.
    pub fn advance(&mut self, scale: f64) {
        self.spin = wrap_angle(self.spin + BODY_SPIN_RATE * scale);
        if self.is_central() {
            return;
        }
        self.angle = wrap_angle(self.angle + self.angular_speed * scale);
        self.update_position();
    }

    fn update_position(&mut self) {
        self.position = if self.is_central() {
            DVec3::ZERO
        } else {
            DVec3::new(
                self.orbital_distance * self.angle.cos(),
                0.0,
                self.orbital_distance * self.angle.sin(),
            )
        };
    }
}

/// Resource owning every body, in catalog order.
#[derive(Resource, Clone, Debug)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SolarSystem {
    /// The catalog with every orbital angle at zero.
    pub fn new() -> Self {
        Self::from_bodies(all_bodies().iter().map(|d| CelestialBody::from_data(d, 0.0)).collect())
    }

    /// The catalog with orbital angles drawn uniformly from [0, 2π).
    pub fn scattered(rng: &mut impl Rng) -> Self {
        Self::from_bodies(
            all_bodies()
                .iter()
                .map(|d| CelestialBody::from_data(d, rng.random_range(0.0..TAU)))
                .collect(),
        )
    }

    /// A system built from arbitrary bodies (kept in the given order).
    pub fn from_bodies(bodies: Vec<CelestialBody>) -> Self {
        Self { bodies }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Look up a body by identifier.
    pub fn get(&self, id: CelestialBodyId) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Advance every orbiting body by one tick.
    ///
    /// No-op on orbits while paused. Any scale is accepted: zero freezes the
    /// orbits and a negative scale runs them backwards.
    pub fn propagate(&mut self, ctx: &TickContext) {
        if ctx.paused {
            return;
        }
        for body in &mut self.bodies {
            body.advance(ctx.time_scale);
        }
    }
}
