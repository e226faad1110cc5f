//! Warp drive regime switching.
//!
//! The discrete regime ([`WarpState`]) flips only on explicit toggles. The
//! visual intensity eases toward it independently, so the gravity wake and
//! screen effects ramp smoothly while tests can still assert the transition.

use crate::config::FlightConfig;
use crate::types::{
    MAX_WARP_STRENGTH, WARP_EASE_RATE, WARP_STRENGTH_EPSILON, WAVE_PHASE_RATE_NORMAL,
    WAVE_PHASE_RATE_WARP,
};

/// Drive regime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WarpState {
    #[default]
    Normal,
    Warp,
}

impl WarpState {
    /// The opposite regime.
    pub fn toggled(self) -> Self {
        match self {
            WarpState::Normal => WarpState::Warp,
            WarpState::Warp => WarpState::Normal,
        }
    }

    /// Label for telemetry.
    pub fn label(self) -> &'static str {
        match self {
            WarpState::Normal => "Normal",
            WarpState::Warp => "Warp",
        }
    }

    /// Wave phase velocity of the gravity-grid wake in this regime.
    pub fn wave_phase_rate(self) -> f64 {
        match self {
            WarpState::Normal => WAVE_PHASE_RATE_NORMAL,
            WarpState::Warp => WAVE_PHASE_RATE_WARP,
        }
    }
}

/// Speed limits and visual scale for one regime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveLimits {
    pub max_speed: f64,
    pub acceleration: f64,
    /// Autopilot cruise speed.
    pub cruise_speed: f64,
    /// Ship model scale.
    pub visual_scale: f64,
}

/// Limits for both regimes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveProfile {
    pub normal: DriveLimits,
    pub warp: DriveLimits,
}

impl DriveProfile {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            normal: DriveLimits {
                max_speed: config.normal_max_speed,
                acceleration: config.normal_acceleration,
                cruise_speed: config.cruise_speed,
                visual_scale: config.base_scale,
            },
            warp: DriveLimits {
                max_speed: config.warp_max_speed,
                acceleration: config.warp_acceleration,
                cruise_speed: config.warp_max_speed * config.warp_cruise_factor,
                visual_scale: config.base_scale * config.warp_scale_factor,
            },
        }
    }

    /// Limits that apply in `state`.
    pub fn limits(&self, state: WarpState) -> DriveLimits {
        match state {
            WarpState::Normal => self.normal,
            WarpState::Warp => self.warp,
        }
    }
}

impl Default for DriveProfile {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

/// Warp regime paired with its eased visual intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WarpDrive {
    state: WarpState,
    intensity: f64,
}

impl WarpDrive {
    pub fn state(&self) -> WarpState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == WarpState::Warp
    }

    /// Eased visual intensity in [0, 1].
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Flip the regime and return the new one.
    pub fn toggle(&mut self) -> WarpState {
        self.state = self.state.toggled();
        self.state
    }

    /// Move the intensity one step toward 1 (warp) or 0 (normal).
    pub fn ease(&mut self) {
        let target = if self.is_active() { 1.0 } else { 0.0 };
        self.intensity += (target - self.intensity) * WARP_EASE_RATE;
    }

    /// Wake amplitude for the gravity grid, or `None` when negligible.
    pub fn wake_strength(&self) -> Option<f64> {
        wake_strength(self.intensity)
    }
}

/// Map an intensity in [0, 1] onto the wake amplitude range.
pub fn wake_strength(intensity: f64) -> Option<f64> {
    let strength = MAX_WARP_STRENGTH * intensity;
    (strength > WARP_STRENGTH_EPSILON).then_some(strength)
}
