//! Gravity grid mesh and wireframe.
//!
//! The mesh is built once from the field's local vertices and triangles and
//! placed with the field's plane transform. Whenever the field marks its
//! normals dirty, positions are re-uploaded and normals recomputed.
//!
//! The grid reads as a wireframe: every triangle edge is drawn with gizmos
//! over a faint fill.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::gravity_field::GravityField;

/// Wireframe line colour.
const WIRE_COLOR: Color = Color::srgba(0.0, 0.8, 1.0, 0.4);

/// Handle to the grid mesh, for in-place updates.
#[derive(Component)]
pub struct GravityGridMesh(pub Handle<Mesh>);

/// Edge list of the grid, fixed with its topology.
#[derive(Resource, Debug, Clone)]
pub struct GridWireframe {
    pub edges: Vec<(u32, u32)>,
}

/// Build a mesh from the field's current heights.
pub fn build_grid_mesh(field: &GravityField) -> Mesh {
    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, field.local_positions());
    mesh.insert_indices(Indices::U32(field.triangle_indices()));
    mesh.compute_normals();
    mesh
}

/// Grid placement: lying flat at the plane height.
pub fn grid_transform(field: &GravityField) -> Transform {
    Transform::from_xyz(0.0, field.plane_height() as f32, 0.0)
        .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2))
}

pub fn spawn_grid(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    field: Res<GravityField>,
) {
    let handle = meshes.add(build_grid_mesh(&field));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.0, 0.8, 1.0, 0.06),
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        double_sided: true,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(handle.clone()),
        MeshMaterial3d(material),
        grid_transform(&field),
        GravityGridMesh(handle),
        Name::new("Gravity grid"),
    ));
    commands.insert_resource(GridWireframe {
        edges: field.wire_edges(),
    });
}

/// World-space segments of the wireframe.
pub fn wire_segments(field: &GravityField, edges: &[(u32, u32)]) -> Vec<(Vec3, Vec3)> {
    let transform = grid_transform(field);
    let points: Vec<Vec3> = field
        .local_positions()
        .into_iter()
        .map(|p| transform.transform_point(Vec3::from_array(p)))
        .collect();
    edges
        .iter()
        .filter_map(|&(a, b)| Some((*points.get(a as usize)?, *points.get(b as usize)?)))
        .collect()
}

pub fn draw_grid_wireframe(
    field: Res<GravityField>,
    wireframe: Option<Res<GridWireframe>>,
    mut gizmos: Gizmos,
) {
    let Some(wireframe) = wireframe else {
        return;
    };
    if !field.is_visible() {
        return;
    }
    for (start, end) in wire_segments(&field, &wireframe.edges) {
        gizmos.line(start, end, WIRE_COLOR);
    }
}

/// Push new heights to the GPU mesh and follow the visibility toggle.
pub fn update_grid_mesh(
    mut field: ResMut<GravityField>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut query: Query<(&GravityGridMesh, &mut Visibility)>,
) {
    let visible = field.is_visible();
    let dirty = field.take_normals_dirty();
    for (grid, mut visibility) in &mut query {
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if dirty && let Some(mut mesh) = meshes.get_mut(&grid.0) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, field.local_positions());
            mesh.compute_normals();
        }
    }
}
