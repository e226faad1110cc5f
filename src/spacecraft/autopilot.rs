//! Autopilot state machine.
//!
//! While navigating, the ship turns toward its target a bounded amount per
//! tick and moves along its *current* heading, so approaches curve instead of
//! snapping around first. Speed falls off with distance, which doubles as the
//! braking phase.

use bevy::math::{DMat3, DQuat, DVec3};

use crate::bodies::{CelestialBodyId, SolarSystem};
use crate::types::{AUTOPILOT_APPROACH_DIVISOR, AUTOPILOT_TURN_RATE};

/// Autopilot mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Autopilot {
    #[default]
    Idle,
    Navigating {
        target: CelestialBodyId,
        /// Arrival threshold beyond the target's surface.
        arrival_distance: f64,
    },
}

impl Autopilot {
    pub fn is_navigating(&self) -> bool {
        matches!(self, Autopilot::Navigating { .. })
    }

    /// Current target, if navigating.
    pub fn target(&self) -> Option<CelestialBodyId> {
        match self {
            Autopilot::Navigating { target, .. } => Some(*target),
            Autopilot::Idle => None,
        }
    }
}

/// Outcome of one autopilot tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AutopilotStep {
    /// Not navigating; nothing happened.
    Idle,
    /// Still en route at the given distance.
    Cruising { distance: f64, speed: f64 },
    /// Reached the target; the autopilot is now idle.
    Arrived { target: CelestialBodyId },
    /// The target no longer resolves; the autopilot stopped.
    LostTarget,
}

/// Guidance for one tick toward a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Guidance {
    Arrived,
    Steer {
        distance: f64,
        /// Orientation looking at the target.
        desired: DQuat,
        speed: f64,
    },
}

/// Decide what to do this tick for a ship at `position` heading to a target
/// at `target_position` with the given radius.
pub fn guide(
    position: DVec3,
    target_position: DVec3,
    target_radius: f64,
    arrival_distance: f64,
    cruise_speed: f64,
) -> Guidance {
    let offset = target_position - position;
    let distance = offset.length();
    if distance < arrival_distance + target_radius {
        return Guidance::Arrived;
    }
    Guidance::Steer {
        distance,
        desired: look_rotation(offset / distance),
        speed: cruise_speed.min(distance / AUTOPILOT_APPROACH_DIVISOR),
    }
}

/// Turn `current` toward `desired` by the bounded per-tick rate.
pub fn turn_toward(current: DQuat, desired: DQuat) -> DQuat {
    current.slerp(desired, AUTOPILOT_TURN_RATE).normalize()
}

/// Rotation whose local +Z axis points along `direction`, keeping world up
/// as close to local +Y as possible.
///
/// `direction` must be normalized. Looking straight up or down has no
/// unique roll, so the shortest arc from +Z is used instead.
pub fn look_rotation(direction: DVec3) -> DQuat {
    let right = DVec3::Y.cross(direction);
    if right.length_squared() < 1e-12 {
        return DQuat::from_rotation_arc(DVec3::Z, direction);
    }
    let right = right.normalize();
    let up = direction.cross(right);
    DQuat::from_mat3(&DMat3::from_cols(right, up, direction)).normalize()
}

/// Resolve the target body of a navigating autopilot.
pub(crate) fn resolve_target(
    system: &SolarSystem,
    target: CelestialBodyId,
) -> Option<(DVec3, f64)> {
    system.get(target).map(|body| (body.position, body.radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_look_rotation_points_forward() {
        for dir in [
            DVec3::X,
            DVec3::NEG_X,
            DVec3::Z,
            DVec3::NEG_Z,
            DVec3::new(1.0, 1.0, 1.0).normalize(),
            DVec3::new(-3.0, -0.5, 2.0).normalize(),
        ] {
            let forward = look_rotation(dir) * DVec3::Z;
            assert_relative_eq!(forward.x, dir.x, epsilon = 1e-9);
            assert_relative_eq!(forward.y, dir.y, epsilon = 1e-9);
            assert_relative_eq!(forward.z, dir.z, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_look_rotation_keeps_up() {
        let q = look_rotation(DVec3::new(1.0, 0.0, 1.0).normalize());
        let up = q * DVec3::Y;
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_look_rotation_vertical() {
        let forward = look_rotation(DVec3::Y) * DVec3::Z;
        assert_relative_eq!(forward.y, 1.0, epsilon = 1e-9);
        let forward = look_rotation(DVec3::NEG_Y) * DVec3::Z;
        assert_relative_eq!(forward.y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_guide_arrival_threshold() {
        // 10 < 30 + 6
        let guidance = guide(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0), 6.0, 30.0, 0.9);
        assert_eq!(guidance, Guidance::Arrived);
    }

    #[test]
    fn test_guide_speed_decays_with_distance() {
        let Guidance::Steer { speed: far, .. } =
            guide(DVec3::ZERO, DVec3::new(500.0, 0.0, 0.0), 6.0, 30.0, 0.9)
        else {
            panic!("expected steering");
        };
        assert_eq!(far, 0.9);

        let Guidance::Steer { speed: near, distance, .. } =
            guide(DVec3::ZERO, DVec3::new(40.0, 0.0, 0.0), 6.0, 30.0, 0.9)
        else {
            panic!("expected steering");
        };
        assert_eq!(distance, 40.0);
        assert_relative_eq!(near, 0.8);
    }

    #[test]
    fn test_turn_is_bounded() {
        let current = DQuat::IDENTITY;
        let desired = look_rotation(DVec3::X);
        let turned = turn_toward(current, desired);
        let full = current.angle_between(desired);
        let step = current.angle_between(turned);
        assert_relative_eq!(step, full * 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_autopilot_target() {
        assert_eq!(Autopilot::Idle.target(), None);
        let nav = Autopilot::Navigating {
            target: CelestialBodyId::Mars,
            arrival_distance: 30.0,
        };
        assert!(nav.is_navigating());
        assert_eq!(nav.target(), Some(CelestialBodyId::Mars));
    }
}
