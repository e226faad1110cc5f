//! Tick clock for the sandbox.
//!
//! Each rendered frame runs exactly one simulation tick. The clock builds the
//! [`TickContext`] for that tick from the user's time controls.

use bevy::prelude::*;

use crate::types::{SimulationSet, SimulationTime, TickContext};

/// Plugin providing the tick clock.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationTime>()
            .init_resource::<TickContext>()
            .add_systems(Update, advance_clock.in_set(SimulationSet::Prepare));
    }
}

/// Count the tick and publish its context.
///
/// Paused ticks still run: only orbital and wave-phase advancement read the
/// pause flag.
pub fn advance_clock(
    mut sim_time: ResMut<SimulationTime>,
    mut ctx: ResMut<TickContext>,
    time: Res<Time>,
) {
    *ctx = sim_time.begin_tick(time.delta_secs_f64());
}
