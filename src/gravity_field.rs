//! Deformable gravity-visualization surface.
//!
//! A square grid lies in its own local frame: vertices sit at fixed `(x, y)`
//! and carry a height `z`. The grid is placed in the world rotated −π/2 about
//! X and lowered to `grid_height`, so world `(X, Y, Z)` maps to local
//! `(X, −Z, Y − grid_height)`. Each tick the heights are reset to base, then
//! every body digs a mass-weighted well and a warping ship adds a travelling
//! wake ring.
//!
//! Vertex and triangle order follow the usual plane layout: rows run from
//! `+y` to `−y`, columns from `−x` to `+x`.

use bevy::math::DVec3;
use bevy::prelude::*;
use wide::f64x4;

use crate::bodies::CelestialBody;
use crate::config::FlightConfig;
use crate::spacecraft::WarpState;
use crate::spacecraft::warp::wake_strength;
use crate::types::{
    TickContext, WAVE_ATTENUATION, WAVE_FREQUENCY, WELL_DEPTH_SCALE, WELL_FALLOFF,
};

/// A point-mass well in grid-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Well {
    pub x: f64,
    pub y: f64,
    pub mass: f64,
}

/// Wake source in grid-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wake {
    pub x: f64,
    pub y: f64,
    pub strength: f64,
}

/// Height field over a fixed grid.
#[derive(Resource, Clone, Debug)]
pub struct GravityField {
    divisions: usize,
    /// World height of the grid plane.
    height: f64,
    xs: Vec<f64>,
    ys: Vec<f64>,
    base: Vec<f64>,
    heights: Vec<f64>,
    /// Wake phase, advanced every unpaused tick.
    pub wave_phase: f64,
    visible: bool,
    normals_dirty: bool,
}

impl Default for GravityField {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

impl GravityField {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self::new(config.grid_size, config.grid_divisions, config.grid_height)
    }

    /// A flat `size × size` grid split into `divisions` cells per side.
    ///
    /// Zero divisions is bumped to one.
    pub fn new(size: f64, divisions: usize, height: f64) -> Self {
        let divisions = divisions.max(1);
        let row = divisions + 1;
        let half = size / 2.0;
        let cell = size / divisions as f64;

        let mut xs = Vec::with_capacity(row * row);
        let mut ys = Vec::with_capacity(row * row);
        for iy in 0..row {
            let y = half - iy as f64 * cell;
            for ix in 0..row {
                xs.push(ix as f64 * cell - half);
                ys.push(y);
            }
        }
        let base = vec![0.0; xs.len()];

        Self {
            divisions,
            height,
            xs,
            ys,
            heights: base.clone(),
            base,
            wave_phase: 0.0,
            visible: true,
            normals_dirty: true,
        }
    }

    /// World height of the plane the grid lies in.
    pub fn plane_height(&self) -> f64 {
        self.height
    }

    pub fn vertex_count(&self) -> usize {
        self.xs.len()
    }

    /// Current heights (local `z`), one per vertex.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Local `(x, y)` of vertex `index`.
    pub fn vertex_xy(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.xs.get(index)?, *self.ys.get(index)?))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn normals_dirty(&self) -> bool {
        self.normals_dirty
    }

    /// Return and clear the dirty flag. The renderer calls this after
    /// re-uploading positions.
    pub fn take_normals_dirty(&mut self) -> bool {
        std::mem::take(&mut self.normals_dirty)
    }

    /// Map a world position into grid-local coordinates.
    pub fn to_local(&self, world: DVec3) -> DVec3 {
        DVec3::new(world.x, -world.z, world.y - self.height)
    }

    /// Map a grid-local position back into the world.
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        DVec3::new(local.x, local.z + self.height, -local.y)
    }

    /// Advance the wake phase for this tick. Frozen while paused; the
    /// time-scale multiplies the regime's phase rate.
    pub fn advance_wave_phase(&mut self, ctx: &TickContext, state: WarpState) {
        self.wave_phase += state.wave_phase_rate() * ctx.effective_scale();
    }

    /// Recompute every height from the bodies and the ship's wake.
    ///
    /// No-op while invisible. Otherwise heights are rebuilt from base and the
    /// normals are marked dirty.
    pub fn deform(&mut self, bodies: &[CelestialBody], ship_position: DVec3, warp_intensity: f64) {
        if !self.visible {
            return;
        }

        let wells: Vec<Well> = bodies
            .iter()
            .map(|body| {
                let local = self.to_local(body.position);
                Well {
                    x: local.x,
                    y: local.y,
                    mass: body.mass(),
                }
            })
            .collect();

        let wake = wake_strength(warp_intensity).map(|strength| {
            let local = self.to_local(ship_position);
            Wake {
                x: local.x,
                y: local.y,
                strength,
            }
        });

        self.heights.copy_from_slice(&self.base);
        self.apply_wells(&wells);
        if let Some(wake) = wake {
            self.apply_wake(wake);
        }
        self.normals_dirty = true;
    }

    /// Subtract every well from the heights, four vertices at a time.
    fn apply_wells(&mut self, wells: &[Well]) {
        let len = self.heights.len();
        let chunks = len / 4;

        for chunk in 0..chunks {
            let i = chunk * 4;
            let x = f64x4::new([self.xs[i], self.xs[i + 1], self.xs[i + 2], self.xs[i + 3]]);
            let y = f64x4::new([self.ys[i], self.ys[i + 1], self.ys[i + 2], self.ys[i + 3]]);
            let mut dig = [0.0f64; 4];

            for well in wells {
                let dx = x - f64x4::splat(well.x);
                let dy = y - f64x4::splat(well.y);
                let distance = (dx * dx + dy * dy).sqrt();
                let depth = f64x4::splat(well.mass * WELL_DEPTH_SCALE)
                    / (distance * f64x4::splat(WELL_FALLOFF) + f64x4::splat(1.0));

                // Coincident vertices contribute nothing.
                let distance = distance.to_array();
                let depth = depth.to_array();
                for lane in 0..4 {
                    if distance[lane] > 0.0 {
                        dig[lane] += depth[lane];
                    }
                }
            }

            for (lane, amount) in dig.iter().enumerate() {
                self.heights[i + lane] -= amount;
            }
        }

        for i in chunks * 4..len {
            for well in wells {
                self.heights[i] -= well_depth(self.xs[i] - well.x, self.ys[i] - well.y, well.mass);
            }
        }
    }

    fn apply_wake(&mut self, wake: Wake) {
        let phase = self.wave_phase;
        for ((z, &x), &y) in self.heights.iter_mut().zip(&self.xs).zip(&self.ys) {
            *z -= wake_height(x - wake.x, y - wake.y, wake.strength, phase);
        }
    }

    /// Local vertex positions `[x, y, z]` for the mesh.
    pub fn local_positions(&self) -> Vec<[f32; 3]> {
        self.xs
            .iter()
            .zip(&self.ys)
            .zip(&self.heights)
            .map(|((&x, &y), &z)| [x as f32, y as f32, z as f32])
            .collect()
    }

    /// Triangle list over the grid, two per cell, counter-clockwise seen
    /// from local `+z`.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let row = (self.divisions + 1) as u32;
        let cells = self.divisions as u32;
        let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
        for iy in 0..cells {
            for ix in 0..cells {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = ix + 1 + row * (iy + 1);
                let d = ix + 1 + row * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        indices
    }

    /// Every distinct triangle edge as a vertex pair: the grid lines plus one
    /// diagonal per cell.
    pub fn wire_edges(&self) -> Vec<(u32, u32)> {
        let row = (self.divisions + 1) as u32;
        let cells = self.divisions as u32;
        let mut edges = Vec::with_capacity((cells * (3 * cells + 2)) as usize);
        for iy in 0..row {
            for ix in 0..row {
                let here = ix + row * iy;
                if ix < cells {
                    edges.push((here, here + 1));
                }
                if iy < cells {
                    edges.push((here, here + row));
                }
                if ix < cells && iy < cells {
                    edges.push((here + row, here + 1));
                }
            }
        }
        edges
    }
}

/// Depth of one well at planar offset `(dx, dy)`; zero at the exact centre.
pub fn well_depth(dx: f64, dy: f64, mass: f64) -> f64 {
    let distance = (dx * dx + dy * dy).sqrt();
    if distance > 0.0 {
        mass * WELL_DEPTH_SCALE / (distance * WELL_FALLOFF + 1.0)
    } else {
        0.0
    }
}

/// Wake displacement at planar offset `(dx, dy)` from the ship.
pub fn wake_height(dx: f64, dy: f64, strength: f64, phase: f64) -> f64 {
    let distance = (dx * dx + dy * dy).sqrt();
    (distance * WAVE_FREQUENCY - phase).sin() * strength * (-distance * WAVE_ATTENUATION).exp()
}
