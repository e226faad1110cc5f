//! Test utilities for flight and orbit tests.
//!
//! Provides fixtures for small systems and ships, and assertions for the
//! invariants every tick must keep.

use bevy::math::DVec3;

use crate::bodies::{CelestialBody, CelestialBodyId, SolarSystem};
use crate::spacecraft::Spacecraft;

/// Fixtures for creating test states.
pub mod fixtures {
    use super::*;

    /// A system holding one body at a fixed position.
    pub fn body_at(id: CelestialBodyId, position: DVec3, radius: f64) -> SolarSystem {
        let mut body = CelestialBody::new(id, radius, position.length(), 0.0, 0.0);
        body.position = position;
        SolarSystem::from_bodies(vec![body])
    }

    /// The full catalog with zero angles.
    pub fn catalog() -> SolarSystem {
        SolarSystem::new()
    }

    /// A default ship placed at `position`.
    pub fn ship_at(position: DVec3) -> Spacecraft {
        let mut ship = Spacecraft::default();
        ship.position = position;
        ship
    }
}

/// Assertions for tick invariants.
pub mod assertions {
    use super::*;

    /// Ship speed within its current limit.
    pub fn assert_speed_clamped(ship: &Spacecraft) {
        assert!(
            ship.speed.abs() <= ship.max_speed + 1e-12,
            "speed {} exceeds max {}",
            ship.speed,
            ship.max_speed
        );
    }

    /// No body envelope contains the ship.
    pub fn assert_clear_of_bodies(ship: &Spacecraft, system: &SolarSystem) {
        for body in system.bodies() {
            let distance = ship.position.distance(body.position);
            let envelope = body.radius + ship.collision_radius;
            assert!(
                distance >= envelope - 1e-9,
                "ship {:?} inside {} envelope ({distance} < {envelope})",
                ship.position,
                body.id.name()
            );
        }
    }
}
