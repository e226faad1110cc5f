//! The per-frame simulation tick and its Bevy wiring.
//!
//! One tick runs in a fixed order: queued commands, the clock, orbits, spacecraft
//! (manual or autopilot, then collision, then warp easing), wake phase and
//! field deformation, telemetry. The field always reads post-update ship and
//! body positions.
//!
//! Commands land before the clock builds the [`TickContext`], so a pause or
//! time-scale change governs the very tick it arrives in.
//!
//! [`step`] and [`apply_command`] run the same logic over borrowed state so
//! tests can drive the sandbox without an `App`; [`Sandbox`] bundles that
//! state for convenience.

use bevy::prelude::*;

use crate::bodies::{CelestialBodyId, SolarSystem};
use crate::collision::{CollisionEvent, CollisionState, record_collisions};
use crate::config::{CONFIG_PATH, FlightConfig};
use crate::gravity_field::GravityField;
use crate::navigation::NavTargeting;
use crate::spacecraft::{FlightInput, FlightReport, Spacecraft};
use crate::telemetry::Telemetry;
use crate::time::advance_clock;
use crate::types::{SimulationSet, SimulationTime, TickContext};

/// Discrete commands from the input layer and UI.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum FlightCommand {
    ToggleWarp,
    /// Engage the autopilot toward the selected target.
    StartAutopilot,
    StopAutopilot,
    ToggleAutopilot,
    /// Select a body, or clear the selection with `None`.
    Select(Option<CelestialBodyId>),
    ClearTarget,
    SetTimeScale(f64),
    TogglePause,
    ToggleGravityGrid,
}

/// Apply one command to the core state.
pub fn apply_command(
    command: FlightCommand,
    sim_time: &mut SimulationTime,
    ship: &mut Spacecraft,
    nav: &mut NavTargeting,
    field: &mut GravityField,
) {
    match command {
        FlightCommand::ToggleWarp => {
            ship.toggle_warp();
        }
        FlightCommand::StartAutopilot => {
            if !nav.start_autopilot(ship) {
                debug!("Autopilot requested without a target");
            }
        }
        FlightCommand::StopAutopilot => ship.stop_autopilot(),
        FlightCommand::ToggleAutopilot => nav.toggle_autopilot(ship),
        FlightCommand::Select(body) => nav.select(body, ship),
        FlightCommand::ClearTarget => nav.clear(ship),
        FlightCommand::SetTimeScale(scale) => {
            if sim_time.set_scale(scale) {
                info!("Time scale set to {scale}");
            } else {
                warn!("Ignoring non-finite time scale {scale}");
            }
        }
        FlightCommand::TogglePause => {
            let paused = sim_time.toggle_pause();
            info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        FlightCommand::ToggleGravityGrid => {
            let visible = field.toggle_visible();
            info!("Gravity grid {}", if visible { "shown" } else { "hidden" });
        }
    }
}

/// Run one ordered tick over the core state.
pub fn step(
    ctx: &TickContext,
    input: &FlightInput,
    system: &mut SolarSystem,
    ship: &mut Spacecraft,
    field: &mut GravityField,
) -> FlightReport {
    system.propagate(ctx);
    let report = ship.tick(input, system);
    field.advance_wave_phase(ctx, ship.warp_state());
    field.deform(system.bodies(), ship.position, ship.warp_intensity());
    report
}

/// All core state in one place, for driving the sandbox without Bevy.
#[derive(Clone, Debug)]
pub struct Sandbox {
    pub time: SimulationTime,
    pub system: SolarSystem,
    pub ship: Spacecraft,
    pub field: GravityField,
    pub nav: NavTargeting,
    pub telemetry: Telemetry,
}

impl Sandbox {
    /// A sandbox with the given bodies and configuration.
    pub fn new(config: &FlightConfig, system: SolarSystem) -> Self {
        let ship = Spacecraft::new(config);
        let nav = NavTargeting::default();
        let telemetry = Telemetry::capture(&ship, &nav, &system);
        Self {
            time: SimulationTime::default(),
            system,
            ship,
            field: GravityField::from_config(config),
            nav,
            telemetry,
        }
    }

    pub fn apply(&mut self, command: FlightCommand) {
        apply_command(
            command,
            &mut self.time,
            &mut self.ship,
            &mut self.nav,
            &mut self.field,
        );
    }

    /// Run one tick with the given held keys.
    pub fn tick(&mut self, input: &FlightInput) -> FlightReport {
        let ctx = self.time.begin_tick(0.0);
        let report = step(
            &ctx,
            input,
            &mut self.system,
            &mut self.ship,
            &mut self.field,
        );
        self.telemetry = Telemetry::capture(&self.ship, &self.nav, &self.system);
        report
    }
}

/// Plugin owning the core resources and the ordered tick systems.
///
/// Inserts a [`FlightConfig`] loaded from [`CONFIG_PATH`] unless one is
/// already present.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<FlightConfig>() {
            app.insert_resource(FlightConfig::load_or_default(CONFIG_PATH));
        }
        let config = app.world().resource::<FlightConfig>().clone();

        let system = if config.randomize_initial_angles {
            SolarSystem::scattered(&mut rand::rng())
        } else {
            SolarSystem::new()
        };

        app.insert_resource(system)
            .insert_resource(Spacecraft::new(&config))
            .insert_resource(GravityField::from_config(&config))
            .init_resource::<NavTargeting>()
            .init_resource::<Telemetry>()
            .init_resource::<FlightInput>()
            .init_resource::<CollisionState>()
            .add_message::<FlightCommand>()
            .add_message::<CollisionEvent>()
            .configure_sets(Update, (SimulationSet::Prepare, SimulationSet::Tick).chain())
            .add_systems(
                Update,
                apply_flight_commands
                    .before(advance_clock)
                    .in_set(SimulationSet::Prepare),
            )
            .add_systems(
                Update,
                (
                    propagate_orbits,
                    fly_spacecraft,
                    record_collisions,
                    deform_gravity_field,
                    refresh_telemetry,
                )
                    .chain()
                    .in_set(SimulationSet::Tick),
            );
    }
}

/// Apply queued commands in arrival order.
pub fn apply_flight_commands(
    mut commands: MessageReader<FlightCommand>,
    mut sim_time: ResMut<SimulationTime>,
    mut ship: ResMut<Spacecraft>,
    mut nav: ResMut<NavTargeting>,
    mut field: ResMut<GravityField>,
) {
    for command in commands.read() {
        apply_command(*command, &mut sim_time, &mut ship, &mut nav, &mut field);
    }
}

pub fn propagate_orbits(ctx: Res<TickContext>, mut system: ResMut<SolarSystem>) {
    system.propagate(&ctx);
}

/// Integrate the ship and publish collision contacts.
pub fn fly_spacecraft(
    input: Res<FlightInput>,
    system: Res<SolarSystem>,
    mut ship: ResMut<Spacecraft>,
    mut collisions: MessageWriter<CollisionEvent>,
) {
    let report = ship.tick(&input, &system);
    for contact in report.contacts {
        collisions.write(CollisionEvent {
            body: contact.body,
            penetration: contact.penetration,
            position: ship.position,
        });
    }
}

pub fn deform_gravity_field(
    ctx: Res<TickContext>,
    system: Res<SolarSystem>,
    ship: Res<Spacecraft>,
    mut field: ResMut<GravityField>,
) {
    field.advance_wave_phase(&ctx, ship.warp_state());
    field.deform(system.bodies(), ship.position, ship.warp_intensity());
}

pub fn refresh_telemetry(
    ship: Res<Spacecraft>,
    nav: Res<NavTargeting>,
    system: Res<SolarSystem>,
    mut telemetry: ResMut<Telemetry>,
) {
    *telemetry = Telemetry::capture(&ship, &nav, &system);
}
