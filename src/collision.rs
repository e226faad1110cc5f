//! Spacecraft/body overlap resolution.
//!
//! Each tick the ship is tested against every body in catalog order. An
//! overlap pushes the ship straight out of that body's collision envelope and
//! halves its speed. Bodies are resolved one after another with no iterative
//! relaxation, so a push out of one envelope can in principle land inside
//! another. Bodies are sparse enough that this never shows in practice.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::bodies::{CelestialBody, CelestialBodyId};
use crate::types::COLLISION_SPEED_FACTOR;

/// One correction applied during a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub body: CelestialBodyId,
    /// Overlap depth that was removed.
    pub penetration: f64,
}

/// Message written for every contact, for logging and the UI.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct CollisionEvent {
    pub body: CelestialBodyId,
    pub penetration: f64,
    /// Ship position after the correction.
    pub position: DVec3,
}

/// Most recent contact, kept after the message is consumed. Shown in the
/// flight panel.
#[derive(Resource, Default, Debug)]
pub struct CollisionState {
    pub last_contact: Option<CollisionEvent>,
    /// Contacts since startup.
    pub total: u64,
}

impl CollisionState {
    pub fn record(&mut self, event: CollisionEvent) {
        self.last_contact = Some(event);
        self.total += 1;
    }
}

/// Push `position` out of every body envelope it overlaps, in order.
///
/// The envelope is `body.radius + collision_radius`. Each overlap moves the
/// ship outward by exactly the overlap depth and multiplies `speed` by
/// [`COLLISION_SPEED_FACTOR`]. A ship sitting exactly on a body centre has
/// no outward direction and is pushed along world up.
pub fn resolve_collisions(
    position: &mut DVec3,
    speed: &mut f64,
    collision_radius: f64,
    bodies: &[CelestialBody],
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for body in bodies {
        let envelope = body.radius + collision_radius;
        let offset = *position - body.position;
        let distance = offset.length();
        if distance >= envelope {
            continue;
        }

        let direction = if distance > 0.0 {
            offset / distance
        } else {
            DVec3::Y
        };
        let penetration = envelope - distance;
        *position += direction * penetration;
        *speed *= COLLISION_SPEED_FACTOR;
        contacts.push(Contact {
            body: body.id,
            penetration,
        });
    }
    contacts
}

/// Log contacts and keep the latest for display.
pub fn record_collisions(
    mut events: MessageReader<CollisionEvent>,
    mut state: ResMut<CollisionState>,
) {
    for event in events.read() {
        debug!(
            "Contact with {}: pushed out {:.3}",
            event.body.name(),
            event.penetration
        );
        state.record(*event);
    }
}
