//! Gizmo overlays: orbit rings, target marker, navigation line.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::math::Isometry3d;
use bevy::prelude::*;

use crate::bodies::{CelestialBody, SolarSystem};
use crate::navigation::NavTargeting;
use crate::spacecraft::Spacecraft;
use crate::types::TickContext;

/// Spin of the target marker ring about X and Y.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct TargetMarker {
    pub spin_x: f32,
    pub spin_y: f32,
}

impl TargetMarker {
    /// Advance the spin; frozen while paused.
    pub fn advance(&mut self, ctx: &TickContext) {
        let scale = ctx.effective_scale() as f32;
        self.spin_x = (self.spin_x + 0.002 * scale).rem_euclid(TAU);
        self.spin_y = (self.spin_y + 0.004 * scale).rem_euclid(TAU);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.spin_x, self.spin_y, 0.0)
    }
}

/// Ring radius around a targeted body.
pub fn marker_radius(body_radius: f64) -> f32 {
    (body_radius * 1.5) as f32
}

pub fn draw_orbit_rings(system: Res<SolarSystem>, mut gizmos: Gizmos) {
    let flat = Quat::from_rotation_x(FRAC_PI_2);
    for body in system.bodies().iter().filter(|b| !b.is_central()) {
        gizmos
            .circle(
                Isometry3d::new(Vec3::ZERO, flat),
                body.orbital_distance as f32,
                Color::srgba(0.27, 0.27, 0.27, 0.3),
            )
            .resolution(128);
    }
}

/// The previously selected body, when it differs from the current target.
pub fn previous_selection<'a>(
    nav: &NavTargeting,
    system: &'a SolarSystem,
) -> Option<&'a CelestialBody> {
    let previous = nav.previous()?;
    if nav.target() == Some(previous) {
        return None;
    }
    system.get(previous)
}

pub fn draw_target(
    ctx: Res<TickContext>,
    nav: Res<NavTargeting>,
    ship: Res<Spacecraft>,
    system: Res<SolarSystem>,
    mut marker: ResMut<TargetMarker>,
    mut gizmos: Gizmos,
) {
    marker.advance(&ctx);
    if let Some(body) = previous_selection(&nav, &system) {
        gizmos
            .circle(
                Isometry3d::new(body.position.as_vec3(), Quat::from_rotation_x(FRAC_PI_2)),
                marker_radius(body.radius),
                Color::srgba(0.0, 1.0, 0.0, 0.25),
            )
            .resolution(64);
    }

    let Some(body) = nav.target().and_then(|id| system.get(id)) else {
        return;
    };
    let centre = body.position.as_vec3();
    let green = Color::srgba(0.0, 1.0, 0.0, 0.8);

    gizmos
        .circle(
            Isometry3d::new(centre, marker.rotation()),
            marker_radius(body.radius),
            green,
        )
        .resolution(100);
    gizmos.line(ship.position.as_vec3(), centre, green.with_alpha(0.6));
}
