//! Static catalog of the sandbox's solar system.
//!
//! Distances and radii are in scene units; angular speeds are radians per
//! tick at time-scale 1.

/// Identifier for celestial bodies in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CelestialBodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl CelestialBodyId {
    /// All bodies in catalog order (the order collisions are resolved in).
    pub const ALL: &'static [CelestialBodyId] = &[
        CelestialBodyId::Sun,
        CelestialBodyId::Mercury,
        CelestialBodyId::Venus,
        CelestialBodyId::Earth,
        CelestialBodyId::Mars,
        CelestialBodyId::Jupiter,
        CelestialBodyId::Saturn,
        CelestialBodyId::Uranus,
        CelestialBodyId::Neptune,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            CelestialBodyId::Sun => "Sun",
            CelestialBodyId::Mercury => "Mercury",
            CelestialBodyId::Venus => "Venus",
            CelestialBodyId::Earth => "Earth",
            CelestialBodyId::Mars => "Mars",
            CelestialBodyId::Jupiter => "Jupiter",
            CelestialBodyId::Saturn => "Saturn",
            CelestialBodyId::Uranus => "Uranus",
            CelestialBodyId::Neptune => "Neptune",
        }
    }

    /// Position in the catalog.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up by catalog position.
    pub fn from_index(index: usize) -> Option<CelestialBodyId> {
        Self::ALL.get(index).copied()
    }
}

/// Decorative model attached to a body once it loads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelConfig {
    /// Asset path of the glTF file.
    pub path: &'static str,
    /// Uniform scale applied to the loaded scene.
    pub scale: f32,
    /// Fade the base sphere once the model is attached.
    pub hide_base_mesh: bool,
}

/// Static data for a celestial body.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBodyData {
    pub id: CelestialBodyId,
    pub radius: f64,
    /// Orbit radius around the origin; 0 for the central star.
    pub orbital_distance: f64,
    /// Radians per tick at time-scale 1.
    pub angular_speed: f64,
    /// Base colour as sRGB hex.
    pub color: u32,
    /// Emissive colour as sRGB hex.
    pub emissive: u32,
    pub emissive_intensity: f32,
    pub model: Option<ModelConfig>,
}

const fn model(path: &'static str, scale: f32) -> Option<ModelConfig> {
    Some(ModelConfig {
        path,
        scale,
        hide_base_mesh: true,
    })
}

/// Get the catalog entry for a celestial body.
pub fn get_body_data(id: CelestialBodyId) -> CelestialBodyData {
    let (radius, orbital_distance, angular_speed, color, emissive, emissive_intensity, model) =
        match id {
            CelestialBodyId::Sun => (26.0, 0.0, 0.0, 0xFDB813, 0xFDB813, 2.0, None),
            CelestialBodyId::Mercury => (3.5, 90.0, 0.008, 0x8C7853, 0xC18B4E, 1.1, None),
            CelestialBodyId::Venus => (5.2, 144.0, 0.003, 0xFFC649, 0xFFB347, 1.2, None),
            CelestialBodyId::Earth => (
                6.0,
                216.0,
                0.002,
                0x4A90E2,
                0x66B2FF,
                1.25,
                model("models/earth.glb", 0.02),
            ),
            CelestialBodyId::Mars => (
                4.5,
                288.0,
                0.0016,
                0xE27B58,
                0xFF8C5C,
                1.15,
                model("models/mars.glb", 0.02),
            ),
            CelestialBodyId::Jupiter => (
                18.0,
                450.0,
                0.0004,
                0xC88B3A,
                0xFFBE78,
                1.1,
                model("models/jupiter.glb", 0.018),
            ),
            CelestialBodyId::Saturn => (
                15.0,
                630.0,
                0.00018,
                0xFAD5A5,
                0xFFD9A8,
                1.05,
                model("models/saturn.glb", 0.018),
            ),
            CelestialBodyId::Uranus => (
                11.0,
                810.0,
                0.00008,
                0x4FD0E7,
                0x7FE9FF,
                1.2,
                model("models/uranus.glb", 0.02),
            ),
            CelestialBodyId::Neptune => (
                10.0,
                990.0,
                0.00002,
                0x4166F5,
                0x5F85FF,
                1.25,
                model("models/neptune.glb", 0.02),
            ),
        };

    CelestialBodyData {
        id,
        radius,
        orbital_distance,
        angular_speed,
        color,
        emissive,
        emissive_intensity,
        model,
    }
}

/// Get data for all bodies in catalog order.
pub fn all_bodies() -> Vec<CelestialBodyData> {
    CelestialBodyId::ALL.iter().map(|&id| get_body_data(id)).collect()
}
