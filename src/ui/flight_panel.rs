//! Flight panel: telemetry readouts and controls.
//!
//! The panel never mutates core state directly. Every button writes a
//! [`FlightCommand`] that the simulation applies at the next tick.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::bodies::{CelestialBodyId, SolarSystem};
use crate::collision::CollisionState;
use crate::gravity_field::GravityField;
use crate::input::MAX_TIME_SCALE;
use crate::simulation::FlightCommand;
use crate::spacecraft::WarpState;
use crate::telemetry::Telemetry;
use crate::types::SimulationTime;

use super::icons;

/// Label for the autopilot button.
pub fn autopilot_button_label(telemetry: &Telemetry) -> &'static str {
    if !telemetry.autopilot_available {
        "Select a body to navigate"
    } else if telemetry.navigating {
        "Stop navigation"
    } else {
        "Start autopilot"
    }
}

/// Label for the warp button.
pub fn warp_button_label(state: WarpState) -> &'static str {
    match state {
        WarpState::Normal => "Engage warp (K)",
        WarpState::Warp => "Disengage warp (K)",
    }
}

/// Scaled simulation time, in ticks.
pub fn elapsed_label(sim_time: &SimulationTime) -> String {
    format!("Sim time: {:.0}", sim_time.elapsed)
}

/// Contact summary, or `None` before the first contact.
pub fn contact_label(state: &CollisionState) -> Option<String> {
    let last = state.last_contact?;
    Some(format!(
        "Contacts: {} (last: {})",
        state.total,
        last.body.name()
    ))
}

pub fn flight_panel_system(
    mut contexts: EguiContexts,
    telemetry: Res<Telemetry>,
    sim_time: Res<SimulationTime>,
    collisions: Res<CollisionState>,
    field: Res<GravityField>,
    system: Res<SolarSystem>,
    mut commands: MessageWriter<FlightCommand>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::left("flight_panel")
        .resizable(false)
        .default_width(230.0)
        .frame(
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220))
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| {
            ui.heading("Flight");
            ui.label(format!("{} {}", icons::SPEED, telemetry.speed_text()));
            ui.label(format!("{} {}", icons::POSITION, telemetry.position_text()));
            ui.label(format!("{} {}", icons::WARP, telemetry.warp.label()));
            if let Some(contacts) = contact_label(&collisions) {
                ui.label(format!("{} {contacts}", icons::WARNING));
            }

            ui.separator();
            ui.label(format!("{} {}", icons::TARGET, telemetry.target_text()));
            ui.label(telemetry.distance_text());

            let autopilot_icon = if telemetry.navigating {
                icons::STOP
            } else {
                icons::AUTOPILOT
            };
            if ui
                .add_enabled(
                    telemetry.autopilot_available,
                    egui::Button::new(format!(
                        "{autopilot_icon} {}",
                        autopilot_button_label(&telemetry)
                    )),
                )
                .on_hover_text("N")
                .clicked()
            {
                commands.write(FlightCommand::ToggleAutopilot);
            }
            if telemetry.target.is_some()
                && ui
                    .button(format!("{} Clear target", icons::CLOSE))
                    .on_hover_text("Esc")
                    .clicked()
            {
                commands.write(FlightCommand::ClearTarget);
            }
            if ui
                .button(format!("{} {}", icons::WARP, warp_button_label(telemetry.warp)))
                .clicked()
            {
                commands.write(FlightCommand::ToggleWarp);
            }

            ui.separator();
            ui.horizontal(|ui| {
                let (icon, hint) = if sim_time.paused {
                    (icons::PLAY, "Resume (Space)")
                } else {
                    (icons::PAUSE, "Pause (Space)")
                };
                if ui.button(icon).on_hover_text(hint).clicked() {
                    commands.write(FlightCommand::TogglePause);
                }

                ui.label(icons::CLOCK);
                let mut scale = sim_time.scale;
                if ui
                    .add(egui::Slider::new(&mut scale, 0.0..=MAX_TIME_SCALE).fixed_decimals(2))
                    .changed()
                {
                    commands.write(FlightCommand::SetTimeScale(scale));
                }
            });
            ui.label(elapsed_label(&sim_time));

            let mut visible = field.is_visible();
            if ui
                .checkbox(&mut visible, format!("{} Gravity grid (G)", icons::GRID))
                .changed()
            {
                commands.write(FlightCommand::ToggleGravityGrid);
            }

            ui.separator();
            ui.label("Bodies");
            for (index, body) in system.bodies().iter().enumerate() {
                let icon = if body.id == CelestialBodyId::Sun {
                    icons::SUN
                } else {
                    icons::PLANET
                };
                let selected = telemetry.target == Some(body.id);
                if ui
                    .selectable_label(selected, format!("{icon} {} ({index})", body.id.name()))
                    .clicked()
                {
                    commands.write(FlightCommand::Select(Some(body.id)));
                }
            }
        });
}
