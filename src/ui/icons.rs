//! Phosphor icon definitions for the UI.
//!
//! Icons are initialized via `setup_fonts` when the app starts.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

/// Resource to track if fonts have been initialized.
#[derive(Resource, Default)]
pub struct FontsInitialized(pub bool);

/// System to initialize Phosphor icon fonts.
/// Runs in EguiPrimaryContextPass where the egui context is guaranteed to be ready.
pub fn setup_fonts(mut contexts: EguiContexts, mut initialized: ResMut<FontsInitialized>) {
    if initialized.0 {
        return;
    }

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    ctx.set_fonts(fonts);
    initialized.0 = true;

    info!("Phosphor icon fonts initialized");
}

// Browse all icons at https://phosphoricons.com/

pub const PLAY: &str = egui_phosphor::regular::PLAY;
pub const PAUSE: &str = egui_phosphor::regular::PAUSE;
pub const CLOSE: &str = egui_phosphor::regular::X;

/// Warp drive
pub const WARP: &str = egui_phosphor::regular::LIGHTNING;
/// Autopilot engage
pub const AUTOPILOT: &str = egui_phosphor::regular::NAVIGATION_ARROW;
/// Autopilot stop
pub const STOP: &str = egui_phosphor::regular::STOP;
pub const TARGET: &str = egui_phosphor::regular::CROSSHAIR;
pub const SPEED: &str = egui_phosphor::regular::GAUGE;
pub const POSITION: &str = egui_phosphor::regular::MAP_PIN;
pub const CLOCK: &str = egui_phosphor::regular::CLOCK;
/// Gravity grid
pub const GRID: &str = egui_phosphor::regular::GRID_FOUR;

pub const SUN: &str = egui_phosphor::regular::SUN;
pub const PLANET: &str = egui_phosphor::regular::GLOBE;
/// Collision contacts
pub const WARNING: &str = egui_phosphor::regular::WARNING;
