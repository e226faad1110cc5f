//! Target selection and ship-to-target distance.
//!
//! [`NavTargeting`] holds the selected body by identifier only. It never owns
//! body state: distance is looked up live on every call.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::bodies::{CelestialBodyId, SolarSystem};
use crate::spacecraft::Spacecraft;

/// Number of past selections kept for highlighting.
pub const SELECTION_HISTORY_LEN: usize = 8;

/// Currently selected body plus recent selection order.
#[derive(Resource, Clone, Debug, Default)]
pub struct NavTargeting {
    target: Option<CelestialBodyId>,
    history: VecDeque<CelestialBodyId>,
}

impl NavTargeting {
    pub fn target(&self) -> Option<CelestialBodyId> {
        self.target
    }

    /// Selections, most recent last.
    pub fn history(&self) -> impl Iterator<Item = CelestialBodyId> + '_ {
        self.history.iter().copied()
    }

    /// The selection made before the current one.
    pub fn previous(&self) -> Option<CelestialBodyId> {
        self.history.iter().rev().nth(1).copied()
    }

    /// Select `body`, or clear on `None`.
    ///
    /// An active autopilot is retargeted onto the new body; selection never
    /// engages the autopilot by itself.
    pub fn select(&mut self, body: Option<CelestialBodyId>, ship: &mut Spacecraft) {
        let Some(body) = body else {
            self.clear(ship);
            return;
        };

        self.target = Some(body);
        if self.history.len() == SELECTION_HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(body);
        ship.retarget_autopilot(body);
        info!("Target selected: {}", body.name());
    }

    /// Drop the target and stop a navigating autopilot.
    pub fn clear(&mut self, ship: &mut Spacecraft) {
        ship.stop_autopilot();
        if self.target.take().is_some() {
            info!("Target cleared");
        }
    }

    /// Live distance from the ship to the target, if any.
    pub fn distance_to_target(&self, ship: &Spacecraft, system: &SolarSystem) -> Option<f64> {
        let body = system.get(self.target?)?;
        Some(ship.position.distance(body.position))
    }

    /// Whether the autopilot can be engaged.
    pub fn autopilot_available(&self) -> bool {
        self.target.is_some()
    }

    /// Engage the autopilot toward the current target. No target is a no-op.
    pub fn start_autopilot(&self, ship: &mut Spacecraft) -> bool {
        ship.start_autopilot(self.target)
    }

    /// Stop a navigating autopilot, or engage it toward the target.
    pub fn toggle_autopilot(&self, ship: &mut Spacecraft) {
        if ship.is_navigating() {
            ship.stop_autopilot();
        } else {
            self.start_autopilot(ship);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spacecraft::Autopilot;
    use approx::assert_relative_eq;

    #[test]
    fn test_select_does_not_engage_autopilot() {
        let mut nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        nav.select(Some(CelestialBodyId::Mars), &mut ship);
        assert_eq!(nav.target(), Some(CelestialBodyId::Mars));
        assert!(!ship.is_navigating());
        assert!(nav.autopilot_available());
    }

    #[test]
    fn test_select_retargets_active_autopilot() {
        let mut nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        nav.select(Some(CelestialBodyId::Mars), &mut ship);
        assert!(nav.start_autopilot(&mut ship));
        nav.select(Some(CelestialBodyId::Jupiter), &mut ship);
        assert_eq!(ship.autopilot().target(), Some(CelestialBodyId::Jupiter));
    }

    #[test]
    fn test_select_none_clears_and_stops() {
        let mut nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        nav.select(Some(CelestialBodyId::Venus), &mut ship);
        nav.start_autopilot(&mut ship);
        ship.speed = 0.9;

        nav.select(None, &mut ship);
        assert_eq!(nav.target(), None);
        assert_eq!(ship.autopilot(), Autopilot::Idle);
        assert_eq!(ship.speed, 0.0);
    }

    #[test]
    fn test_clear_without_autopilot_keeps_speed() {
        let mut nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        nav.select(Some(CelestialBodyId::Venus), &mut ship);
        ship.speed = 0.9;
        nav.clear(&mut ship);
        assert_eq!(ship.speed, 0.9);
    }

    #[test]
    fn test_start_without_target_is_noop() {
        let nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        assert!(!nav.start_autopilot(&mut ship));
        nav.toggle_autopilot(&mut ship);
        assert!(!ship.is_navigating());
    }

    #[test]
    fn test_toggle_autopilot() {
        let mut nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        nav.select(Some(CelestialBodyId::Earth), &mut ship);
        nav.toggle_autopilot(&mut ship);
        assert!(ship.is_navigating());
        nav.toggle_autopilot(&mut ship);
        assert!(!ship.is_navigating());
    }

    #[test]
    fn test_distance_is_live() {
        let mut nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        let system = SolarSystem::new();
        assert_eq!(nav.distance_to_target(&ship, &system), None);

        nav.select(Some(CelestialBodyId::Sun), &mut ship);
        assert_relative_eq!(nav.distance_to_target(&ship, &system).unwrap(), 200.0);
        ship.position.z = 150.0;
        assert_relative_eq!(nav.distance_to_target(&ship, &system).unwrap(), 150.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut nav = NavTargeting::default();
        let mut ship = Spacecraft::default();
        for i in 0..20 {
            nav.select(CelestialBodyId::from_index(i % 9), &mut ship);
        }
        assert_eq!(nav.history().count(), SELECTION_HISTORY_LEN);
        assert_eq!(nav.target(), CelestialBodyId::from_index(19 % 9));
        assert_eq!(nav.previous(), CelestialBodyId::from_index(18 % 9));
    }
}
