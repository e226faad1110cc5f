//! Property-based tests for flight invariants using proptest.

use bevy::math::DVec3;
use proptest::prelude::*;

use super::{FlightInput, Spacecraft};
use crate::bodies::CelestialBodyId;
use crate::test_utils::assertions::{assert_clear_of_bodies, assert_speed_clamped};
use crate::test_utils::fixtures::{body_at, catalog, ship_at};

fn arb_input() -> impl Strategy<Value = FlightInput> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(forward, backward, yaw_left, nose_down, ascend, descend, strafe_left, strafe_right)| {
                FlightInput {
                    forward,
                    backward,
                    yaw_left,
                    nose_down,
                    ascend,
                    descend,
                    strafe_left,
                    strafe_right,
                    ..Default::default()
                }
            },
        )
}

fn arb_direction() -> impl Strategy<Value = DVec3> {
    (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0)
        .prop_filter("non-degenerate", |(x, y, z)| x * x + y * y + z * z > 1e-3)
        .prop_map(|(x, y, z)| DVec3::new(x, y, z).normalize())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Speed never leaves [-max, max], whatever keys are held and however
    /// often warp is toggled.
    #[test]
    fn prop_speed_always_clamped(
        steps in prop::collection::vec((arb_input(), any::<bool>()), 1..200),
    ) {
        let system = catalog();
        let mut ship = ship_at(DVec3::new(0.0, 300.0, 0.0));
        for (input, toggle) in steps {
            if toggle {
                ship.toggle_warp();
                assert_speed_clamped(&ship);
            }
            ship.tick(&input, &system);
            assert_speed_clamped(&ship);
        }
    }

    /// After any tick, the ship is outside every body's envelope.
    #[test]
    fn prop_no_overlap_after_tick(
        body_index in 0usize..9,
        direction in arb_direction(),
        depth in 0.0f64..1.0,
        input in arb_input(),
    ) {
        let system = catalog();
        let body = &system.bodies()[body_index];
        // Start somewhere inside the envelope.
        let start = body.position + direction * (body.radius + 2.0) * depth;
        let mut ship = ship_at(start);
        ship.tick(&input, &system);
        assert_clear_of_bodies(&ship, &system);
    }

    /// Toggling warp twice restores every limit exactly.
    #[test]
    fn prop_double_toggle_restores_limits(speed in -1.2f64..1.2) {
        let mut ship = Spacecraft::default();
        ship.speed = speed;
        let before = (ship.max_speed, ship.acceleration, ship.cruise_speed, ship.visual_scale);
        ship.toggle_warp();
        ship.toggle_warp();
        prop_assert_eq!(
            before,
            (ship.max_speed, ship.acceleration, ship.cruise_speed, ship.visual_scale)
        );
        prop_assert_eq!(ship.speed, speed);
    }

    /// The autopilot always reaches a stationary target and stops.
    #[test]
    fn prop_autopilot_terminates(
        direction in arb_direction(),
        distance in 60.0f64..1500.0,
        heading in arb_direction(),
    ) {
        let system = body_at(CelestialBodyId::Sun, DVec3::ZERO, 26.0);
        let mut ship = ship_at(direction * distance);
        ship.orientation = super::autopilot::look_rotation(heading);
        ship.start_autopilot(Some(CelestialBodyId::Sun));

        let mut ticks = 0;
        while ship.is_navigating() && ticks < 10_000 {
            ship.tick(&FlightInput::default(), &system);
            ticks += 1;
        }
        prop_assert!(!ship.is_navigating(), "still navigating after {} ticks", ticks);
        prop_assert_eq!(ship.speed, 0.0);
        prop_assert!(ship.position.length() < ship.arrival_distance + 26.0 + 1.0);
    }
}
