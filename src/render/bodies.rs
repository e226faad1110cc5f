//! Celestial body visuals and decorative models.
//!
//! Every body is an entity with a base sphere child. Bodies with a model in
//! the catalog also get a glTF scene child. If the scene loads, the base
//! sphere may be hidden; if it fails, a warning is logged and the sphere
//! stays.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::bodies::{CelestialBodyId, ModelConfig, SolarSystem, get_body_data};

use super::srgb_hex;

/// Errors raised while loading a decorative body model.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelLoadError {
    #[error("model {path} for {body} failed to load: {reason}")]
    Failed {
        body: &'static str,
        path: &'static str,
        reason: String,
    },
}

/// Root entity of a body's visuals.
#[derive(Component)]
pub struct BodyVisual {
    pub id: CelestialBodyId,
}

/// The sphere drawn for a body until (or instead of) its model.
#[derive(Component)]
pub struct BaseSphere;

/// A model scene that has not finished loading yet.
#[derive(Component)]
pub struct PendingModel {
    pub body: CelestialBodyId,
    pub config: ModelConfig,
    pub handle: Handle<Scene>,
}

/// Outcome of polling a model load.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    Pending,
    Ready,
    Failed(ModelLoadError),
}

/// Classify a load state for a body's model.
pub fn model_status(body: CelestialBodyId, config: &ModelConfig, state: &LoadState) -> ModelStatus {
    match state {
        LoadState::Loaded => ModelStatus::Ready,
        LoadState::Failed(err) => ModelStatus::Failed(ModelLoadError::Failed {
            body: body.name(),
            path: config.path,
            reason: err.to_string(),
        }),
        LoadState::NotLoaded | LoadState::Loading => ModelStatus::Pending,
    }
}

/// Spawn a visual for every body in the system.
pub fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    system: Res<SolarSystem>,
) {
    for body in system.bodies() {
        let data = get_body_data(body.id);
        let emissive = srgb_hex(data.emissive).to_linear() * data.emissive_intensity;
        let material = materials.add(StandardMaterial {
            base_color: srgb_hex(data.color),
            emissive: if body.is_central() {
                emissive
            } else {
                emissive * 0.15
            },
            unlit: body.is_central(),
            ..default()
        });

        let mut root = commands.spawn((
            Transform::from_translation(body.position.as_vec3()),
            Visibility::default(),
            BodyVisual { id: body.id },
            Name::new(body.id.name()),
        ));
        root.with_child((
            Mesh3d(meshes.add(Sphere::new(body.radius as f32).mesh().uv(32, 32))),
            MeshMaterial3d(material),
            Transform::default(),
            BaseSphere,
        ));

        if let Some(config) = data.model {
            let handle =
                asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.path));
            root.with_child((
                SceneRoot(handle.clone()),
                Transform::from_scale(Vec3::splat(config.scale)),
                PendingModel {
                    body: body.id,
                    config,
                    handle,
                },
            ));
        }
    }

    info!("Spawned {} celestial bodies", system.bodies().len());
}

/// Follow orbital positions and spin.
pub fn sync_bodies(
    system: Res<SolarSystem>,
    mut query: Query<(&BodyVisual, &mut Transform)>,
) {
    for (visual, mut transform) in &mut query {
        let Some(body) = system.get(visual.id) else {
            continue;
        };
        transform.translation = body.position.as_vec3();
        transform.rotation = Quat::from_rotation_y(body.spin as f32);
    }
}

/// Resolve finished model loads.
pub fn watch_model_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pending: Query<(Entity, &PendingModel, &ChildOf)>,
    children: Query<&Children>,
    mut spheres: Query<&mut Visibility, With<BaseSphere>>,
) {
    for (entity, model, child_of) in &pending {
        let state = asset_server.load_state(&model.handle);
        match model_status(model.body, &model.config, &state) {
            ModelStatus::Pending => continue,
            ModelStatus::Ready => {
                info!("Loaded model for {}", model.body.name());
                if model.config.hide_base_mesh
                    && let Ok(siblings) = children.get(child_of.parent())
                {
                    for &sibling in &**siblings {
                        if let Ok(mut visibility) = spheres.get_mut(sibling) {
                            *visibility = Visibility::Hidden;
                        }
                    }
                }
                commands.entity(entity).remove::<PendingModel>();
            }
            ModelStatus::Failed(err) => {
                warn!("{err}; keeping base sphere");
                commands.entity(entity).despawn();
            }
        }
    }
}
