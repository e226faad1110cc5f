//! Player spacecraft: pose, speed, drive regime and autopilot.
//!
//! One tick of [`Spacecraft::tick`] runs either the manual update or the
//! autopilot update, then collision resolution, then warp easing. Motion
//! constants are per tick and unaffected by the orbital time-scale.

pub mod autopilot;
pub mod warp;

#[cfg(test)]
mod proptest_flight;

pub use autopilot::{Autopilot, AutopilotStep, Guidance};
pub use warp::{DriveLimits, DriveProfile, WarpDrive, WarpState};

use bevy::math::{DQuat, DVec3};
use bevy::prelude::*;

use crate::bodies::{CelestialBodyId, SolarSystem};
use crate::collision::{Contact, resolve_collisions};
use crate::config::FlightConfig;

/// Snapshot of the movement keys held this tick.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlightInput {
    pub forward: bool,
    pub backward: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    /// Pitch about local +X, dipping the nose (flight-stick forward, ↑).
    pub nose_down: bool,
    /// Pitch about local −X, raising the nose (↓).
    pub nose_up: bool,
    pub ascend: bool,
    pub descend: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

/// Handling constants that do not change with the drive regime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handling {
    pub rotation_speed: f64,
    pub vertical_step: f64,
    pub strafe_step: f64,
    pub drag: f64,
}

impl Handling {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            rotation_speed: config.rotation_speed,
            vertical_step: config.vertical_step,
            strafe_step: config.strafe_step,
            drag: config.drag,
        }
    }
}

/// What happened during one spacecraft tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlightReport {
    /// Autopilot outcome, when the autopilot drove this tick.
    pub autopilot: Option<AutopilotStep>,
    /// Collision corrections applied, in catalog order.
    pub contacts: Vec<Contact>,
}

/// The player ship.
#[derive(Resource, Clone, Debug)]
pub struct Spacecraft {
    pub position: DVec3,
    /// Unit rotation; local +Z is forward.
    pub orientation: DQuat,
    /// Signed speed along forward, kept within `[-max_speed, max_speed]`.
    pub speed: f64,
    pub max_speed: f64,
    pub acceleration: f64,
    /// Autopilot cruise speed for the current regime.
    pub cruise_speed: f64,
    /// Model scale for the current regime.
    pub visual_scale: f64,
    pub collision_radius: f64,
    pub arrival_distance: f64,
    warp: WarpDrive,
    autopilot: Autopilot,
    profile: DriveProfile,
    handling: Handling,
}

impl Default for Spacecraft {
    fn default() -> Self {
        Self::new(&FlightConfig::default())
    }
}

impl Spacecraft {
    /// A ship at rest at the configured start position, in normal regime.
    pub fn new(config: &FlightConfig) -> Self {
        let profile = DriveProfile::from_config(config);
        let limits = profile.normal;
        Self {
            position: config.start_position(),
            orientation: DQuat::IDENTITY,
            speed: 0.0,
            max_speed: limits.max_speed,
            acceleration: limits.acceleration,
            cruise_speed: limits.cruise_speed,
            visual_scale: limits.visual_scale,
            collision_radius: config.collision_radius,
            arrival_distance: config.arrival_distance,
            warp: WarpDrive::default(),
            autopilot: Autopilot::Idle,
            profile,
            handling: Handling::from_config(config),
        }
    }

    /// Unit forward vector (local +Z).
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Strafe axis: forward × world up, or zero when flying vertically.
    pub fn right(&self) -> DVec3 {
        self.forward().cross(DVec3::Y).normalize_or_zero()
    }

    pub fn warp_state(&self) -> WarpState {
        self.warp.state()
    }

    /// Eased warp visual intensity in [0, 1].
    pub fn warp_intensity(&self) -> f64 {
        self.warp.intensity()
    }

    pub fn autopilot(&self) -> Autopilot {
        self.autopilot
    }

    pub fn is_navigating(&self) -> bool {
        self.autopilot.is_navigating()
    }

    /// Engine glow in [0, 1]: fraction of max speed.
    pub fn engine_glow(&self) -> f64 {
        if self.max_speed > 0.0 {
            (self.speed.abs() / self.max_speed).min(1.0)
        } else {
            0.0
        }
    }

    /// Flip the drive regime.
    ///
    /// Limits switch to the new regime's constants. Dropping out of warp
    /// clamps speed to the new maximum straight away.
    pub fn toggle_warp(&mut self) -> WarpState {
        let state = self.warp.toggle();
        self.apply_limits(self.profile.limits(state));
        if state == WarpState::Normal {
            self.speed = self.speed.clamp(-self.max_speed, self.max_speed);
        }
        info!("Warp drive {}", if state == WarpState::Warp { "engaged" } else { "disengaged" });
        state
    }

    fn apply_limits(&mut self, limits: DriveLimits) {
        self.max_speed = limits.max_speed;
        self.acceleration = limits.acceleration;
        self.cruise_speed = limits.cruise_speed;
        self.visual_scale = limits.visual_scale;
    }

    /// Engage the autopilot toward `target`; `None` is ignored.
    ///
    /// Engaging while already navigating retargets.
    pub fn start_autopilot(&mut self, target: Option<CelestialBodyId>) -> bool {
        let Some(target) = target else {
            return false;
        };
        self.autopilot = Autopilot::Navigating {
            target,
            arrival_distance: self.arrival_distance,
        };
        info!("Autopilot engaged toward {}", target.name());
        true
    }

    /// Point an active autopilot at a new target. Idle autopilots stay idle.
    pub fn retarget_autopilot(&mut self, target: CelestialBodyId) {
        if let Autopilot::Navigating {
            target: current, ..
        } = &mut self.autopilot
        {
            *current = target;
        }
    }

    /// Disengage the autopilot and stop. No-op when idle.
    pub fn stop_autopilot(&mut self) {
        if self.autopilot.is_navigating() {
            self.autopilot = Autopilot::Idle;
            self.speed = 0.0;
            info!("Autopilot disengaged");
        }
    }

    /// Run one tick: manual or autopilot motion, collision, warp easing.
    pub fn tick(&mut self, input: &FlightInput, system: &SolarSystem) -> FlightReport {
        let autopilot = if self.autopilot.is_navigating() {
            Some(self.update_autopilot(system))
        } else {
            self.apply_manual_input(input);
            None
        };

        let contacts = resolve_collisions(
            &mut self.position,
            &mut self.speed,
            self.collision_radius,
            system.bodies(),
        );

        self.warp.ease();

        FlightReport {
            autopilot,
            contacts,
        }
    }

    /// Integrate held movement keys. Ignored while the autopilot navigates.
    pub fn apply_manual_input(&mut self, input: &FlightInput) {
        if self.autopilot.is_navigating() {
            return;
        }

        if input.forward {
            self.speed = (self.speed + self.acceleration).min(self.max_speed);
        } else if input.backward {
            self.speed = (self.speed - self.acceleration).max(-self.max_speed);
        } else {
            self.speed *= self.handling.drag;
        }

        let turn = self.handling.rotation_speed;
        if input.yaw_left {
            self.orientation *= DQuat::from_rotation_y(turn);
        }
        if input.yaw_right {
            self.orientation *= DQuat::from_rotation_y(-turn);
        }
        if input.nose_down {
            self.orientation *= DQuat::from_rotation_x(turn);
        }
        if input.nose_up {
            self.orientation *= DQuat::from_rotation_x(-turn);
        }
        self.orientation = self.orientation.normalize();

        if input.ascend {
            self.position.y += self.handling.vertical_step;
        }
        if input.descend {
            self.position.y -= self.handling.vertical_step;
        }

        if input.strafe_left || input.strafe_right {
            let right = self.right();
            if input.strafe_left {
                self.position -= right * self.handling.strafe_step;
            }
            if input.strafe_right {
                self.position += right * self.handling.strafe_step;
            }
        }

        self.position += self.forward() * self.speed;
    }

    /// One autopilot tick toward the current target.
    pub fn update_autopilot(&mut self, system: &SolarSystem) -> AutopilotStep {
        let Autopilot::Navigating {
            target,
            arrival_distance,
        } = self.autopilot
        else {
            return AutopilotStep::Idle;
        };

        let Some((target_position, target_radius)) = autopilot::resolve_target(system, target)
        else {
            warn!("Autopilot target {} vanished; stopping", target.name());
            self.stop_autopilot();
            return AutopilotStep::LostTarget;
        };

        match autopilot::guide(
            self.position,
            target_position,
            target_radius,
            arrival_distance,
            self.cruise_speed,
        ) {
            Guidance::Arrived => {
                self.autopilot = Autopilot::Idle;
                self.speed = 0.0;
                info!("Autopilot arrived at {}", target.name());
                AutopilotStep::Arrived { target }
            }
            Guidance::Steer {
                distance,
                desired,
                speed,
            } => {
                self.orientation = autopilot::turn_toward(self.orientation, desired);
                self.speed = speed;
                self.position += self.forward() * self.speed;
                AutopilotStep::Cruising { distance, speed }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::CelestialBody;
    use approx::assert_relative_eq;

    fn empty_system() -> SolarSystem {
        SolarSystem::from_bodies(Vec::new())
    }

    fn ship_at(position: DVec3) -> Spacecraft {
        let mut ship = Spacecraft::default();
        ship.position = position;
        ship
    }

    #[test]
    fn test_thrust_accelerates_and_clamps() {
        let mut ship = Spacecraft::default();
        let input = FlightInput {
            forward: true,
            ..Default::default()
        };
        ship.apply_manual_input(&input);
        assert_relative_eq!(ship.speed, 0.03);
        for _ in 0..100 {
            ship.apply_manual_input(&input);
        }
        assert_eq!(ship.speed, 1.2);
    }

    #[test]
    fn test_reverse_clamps_negative() {
        let mut ship = Spacecraft::default();
        let input = FlightInput {
            backward: true,
            ..Default::default()
        };
        for _ in 0..100 {
            ship.apply_manual_input(&input);
        }
        assert_eq!(ship.speed, -1.2);
    }

    #[test]
    fn test_drag_without_input() {
        let mut ship = Spacecraft::default();
        ship.speed = 1.0;
        ship.apply_manual_input(&FlightInput::default());
        assert_relative_eq!(ship.speed, 0.98);
    }

    #[test]
    fn test_moves_along_forward() {
        let mut ship = ship_at(DVec3::ZERO);
        ship.speed = 1.0;
        ship.handling.drag = 1.0;
        ship.apply_manual_input(&FlightInput::default());
        assert_relative_eq!(ship.position.z, 1.0);
    }

    #[test]
    fn test_yaw_rotates_heading() {
        let mut ship = Spacecraft::default();
        let input = FlightInput {
            yaw_left: true,
            ..Default::default()
        };
        ship.apply_manual_input(&input);
        let forward = ship.forward();
        assert_relative_eq!(forward.x, 0.02f64.sin(), epsilon = 1e-12);
        assert_relative_eq!(forward.z, 0.02f64.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_pitch_rotates_heading() {
        let mut ship = Spacecraft::default();
        ship.apply_manual_input(&FlightInput {
            nose_up: true,
            ..Default::default()
        });
        assert_relative_eq!(ship.forward().y, 0.02f64.sin(), epsilon = 1e-12);

        let mut ship = Spacecraft::default();
        ship.apply_manual_input(&FlightInput {
            nose_down: true,
            ..Default::default()
        });
        assert_relative_eq!(ship.forward().y, -(0.02f64.sin()), epsilon = 1e-12);
    }

    #[test]
    fn test_vertical_and_strafe() {
        let mut ship = ship_at(DVec3::ZERO);
        ship.apply_manual_input(&FlightInput {
            ascend: true,
            strafe_right: true,
            ..Default::default()
        });
        assert_relative_eq!(ship.position.y, 0.5);
        // forward +Z × up +Y = -X
        assert_relative_eq!(ship.position.x, -0.5);

        ship.apply_manual_input(&FlightInput {
            descend: true,
            strafe_left: true,
            ..Default::default()
        });
        assert_relative_eq!(ship.position.y, 0.0);
        assert_relative_eq!(ship.position.x, 0.0);
    }

    #[test]
    fn test_strafe_while_vertical_is_inert() {
        let mut ship = ship_at(DVec3::ZERO);
        ship.orientation = DQuat::from_rotation_x(-std::f64::consts::FRAC_PI_2);
        ship.apply_manual_input(&FlightInput {
            strafe_left: true,
            ..Default::default()
        });
        assert!(ship.position.is_finite());
        assert!(ship.position.length() < 1e-9);
    }

    #[test]
    fn test_manual_ignored_while_navigating() {
        let mut ship = ship_at(DVec3::new(0.0, 0.0, 500.0));
        ship.start_autopilot(Some(CelestialBodyId::Sun));
        let before = ship.clone();
        ship.apply_manual_input(&FlightInput {
            forward: true,
            ascend: true,
            ..Default::default()
        });
        assert_eq!(ship.position, before.position);
        assert_eq!(ship.speed, before.speed);
    }

    #[test]
    fn test_warp_toggle_restores_limits() {
        let mut ship = Spacecraft::default();
        let before = (ship.max_speed, ship.acceleration, ship.cruise_speed, ship.visual_scale);
        assert_eq!(ship.toggle_warp(), WarpState::Warp);
        assert_eq!(ship.max_speed, 4.5);
        assert_eq!(ship.acceleration, 0.09);
        assert!(ship.visual_scale < before.3);
        assert_eq!(ship.toggle_warp(), WarpState::Normal);
        let after = (ship.max_speed, ship.acceleration, ship.cruise_speed, ship.visual_scale);
        assert_eq!(before, after);
    }

    #[test]
    fn test_leaving_warp_clamps_speed() {
        let mut ship = Spacecraft::default();
        ship.toggle_warp();
        ship.speed = 4.5;
        ship.toggle_warp();
        assert_eq!(ship.speed, 1.2);

        ship.toggle_warp();
        ship.speed = -4.5;
        ship.toggle_warp();
        assert_eq!(ship.speed, -1.2);
    }

    #[test]
    fn test_start_autopilot_none_is_noop() {
        let mut ship = Spacecraft::default();
        assert!(!ship.start_autopilot(None));
        assert_eq!(ship.autopilot(), Autopilot::Idle);
    }

    #[test]
    fn test_stop_autopilot_idempotent() {
        let mut ship = Spacecraft::default();
        ship.speed = 0.7;
        ship.stop_autopilot();
        assert_eq!(ship.speed, 0.7, "idle stop leaves state unchanged");
        assert_eq!(ship.autopilot(), Autopilot::Idle);

        ship.start_autopilot(Some(CelestialBodyId::Mars));
        ship.speed = 0.7;
        ship.stop_autopilot();
        assert_eq!(ship.speed, 0.0);
        assert!(!ship.is_navigating());
    }

    #[test]
    fn test_autopilot_arrives_immediately_when_close() {
        let system = SolarSystem::from_bodies(vec![CelestialBody::new(
            CelestialBodyId::Earth,
            6.0,
            216.0,
            0.002,
            0.0,
        )]);
        let mut ship = ship_at(DVec3::new(226.0, 0.0, 0.0));
        ship.start_autopilot(Some(CelestialBodyId::Earth));
        ship.speed = 0.5;
        let step = ship.update_autopilot(&system);
        assert_eq!(
            step,
            AutopilotStep::Arrived {
                target: CelestialBodyId::Earth
            }
        );
        assert_eq!(ship.speed, 0.0);
        assert!(!ship.is_navigating());
    }

    #[test]
    fn test_autopilot_lost_target_stops() {
        let mut ship = Spacecraft::default();
        ship.start_autopilot(Some(CelestialBodyId::Neptune));
        let step = ship.update_autopilot(&empty_system());
        assert_eq!(step, AutopilotStep::LostTarget);
        assert!(!ship.is_navigating());
        assert_eq!(ship.speed, 0.0);
    }

    #[test]
    fn test_autopilot_moves_along_current_heading() {
        let system = SolarSystem::from_bodies(vec![CelestialBody::new(
            CelestialBodyId::Sun,
            26.0,
            0.0,
            0.0,
            0.0,
        )]);
        // Target is off to +X; the ship faces +Z and only turns 5% this tick.
        let mut ship = ship_at(DVec3::new(-500.0, 0.0, 0.0));
        ship.start_autopilot(Some(CelestialBodyId::Sun));
        let step = ship.update_autopilot(&system);
        assert!(matches!(step, AutopilotStep::Cruising { .. }));
        assert_eq!(ship.speed, 0.9);
        assert!(ship.position.z > 0.0, "still mostly moving along old heading");
        assert!(ship.position.x > -500.0);
    }

    #[test]
    fn test_retarget_only_when_navigating() {
        let mut ship = Spacecraft::default();
        ship.retarget_autopilot(CelestialBodyId::Venus);
        assert_eq!(ship.autopilot(), Autopilot::Idle);

        ship.start_autopilot(Some(CelestialBodyId::Mars));
        ship.retarget_autopilot(CelestialBodyId::Venus);
        assert_eq!(ship.autopilot().target(), Some(CelestialBodyId::Venus));
    }

    #[test]
    fn test_tick_eases_warp_every_tick() {
        let mut ship = ship_at(DVec3::new(0.0, 500.0, 0.0));
        ship.toggle_warp();
        ship.tick(&FlightInput::default(), &empty_system());
        assert_relative_eq!(ship.warp_intensity(), 0.08);

        ship.start_autopilot(Some(CelestialBodyId::Sun));
        ship.tick(&FlightInput::default(), &empty_system());
        assert!(ship.warp_intensity() > 0.08, "eases while autopiloting too");
    }

    #[test]
    fn test_engine_glow() {
        let mut ship = Spacecraft::default();
        assert_eq!(ship.engine_glow(), 0.0);
        ship.speed = -0.6;
        assert_relative_eq!(ship.engine_glow(), 0.5);
    }
}
