//! Property-based tests for orbital propagation using proptest.

use std::f64::consts::TAU;

use proptest::prelude::*;

use super::{CelestialBody, CelestialBodyId, SolarSystem};
use crate::types::TickContext;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// One unpaused tick advances the angle by exactly `ω·s` (mod 2π) and
    /// leaves the body on its circle in the orbital plane.
    #[test]
    fn prop_one_tick_advances_angle(
        distance in 1.0f64..2000.0,
        angular_speed in 0.0f64..0.05,
        angle in 0.0f64..TAU,
        scale in 0.0f64..5.0,
    ) {
        let mut system = SolarSystem::from_bodies(vec![CelestialBody::new(
            CelestialBodyId::Earth, 6.0, distance, angular_speed, angle,
        )]);
        system.propagate(&TickContext::running(scale));
        let body = &system.bodies()[0];

        let expected = (angle + angular_speed * scale).rem_euclid(TAU);
        let diff = (body.angle - expected).abs();
        prop_assert!(diff < 1e-12 || (TAU - diff) < 1e-12, "angle {} vs {}", body.angle, expected);

        prop_assert_eq!(body.position.y, 0.0);
        let radius = (body.position.x.powi(2) + body.position.z.powi(2)).sqrt();
        prop_assert!((radius - distance).abs() < 1e-9 * distance.max(1.0));
    }

    /// Paused ticks never change any angle, whatever the scale.
    #[test]
    fn prop_paused_freezes_angles(scale in -10.0f64..10.0, ticks in 1usize..50) {
        let mut system = SolarSystem::new();
        let before: Vec<f64> = system.bodies().iter().map(|b| b.angle).collect();
        let ctx = TickContext { dt: 0.016, time_scale: scale, paused: true };
        for _ in 0..ticks {
            system.propagate(&ctx);
        }
        let after: Vec<f64> = system.bodies().iter().map(|b| b.angle).collect();
        prop_assert_eq!(before, after);
    }

    /// The central body is always at the origin.
    #[test]
    fn prop_central_body_fixed(scale in -5.0f64..5.0, ticks in 1usize..200) {
        let mut system = SolarSystem::new();
        for _ in 0..ticks {
            system.propagate(&TickContext::running(scale));
        }
        let sun = system.get(CelestialBodyId::Sun).unwrap();
        prop_assert_eq!(sun.position, bevy::math::DVec3::ZERO);
    }
}
