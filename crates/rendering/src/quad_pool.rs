//! Bevy backend for the projected frame: a pool of unit-quad entities.
//!
//! Each frame's draw commands are written into [`FrameCommands`], then mapped
//! one-to-one onto pooled quad entities. The pool only grows; entities past
//! the current command count are hidden rather than despawned.

use std::collections::HashMap;

use bevy::prelude::*;

use simulation::TrafficNetwork;

use crate::camera::ViewportCamera;
use crate::draw_command::{DrawCommand, Rgb};
use crate::scene::{project_scene, ProjectionSummary};
use crate::style::SceneStyle;

/// The draw commands produced for the current frame, in emission order.
#[derive(Resource, Debug, Default)]
pub struct FrameCommands {
    pub commands: Vec<DrawCommand>,
    pub summary: ProjectionSummary,
}

/// Shared unit-quad mesh plus one unlit material per distinct color.
#[derive(Resource)]
pub struct QuadAssets {
    pub mesh: Handle<Mesh>,
    materials: HashMap<[u8; 3], Handle<StandardMaterial>>,
}

impl QuadAssets {
    pub fn new(mesh: Handle<Mesh>) -> Self {
        Self {
            mesh,
            materials: HashMap::new(),
        }
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Material for `color`, created on first use. Colors are bucketed to
    /// 8 bits per channel.
    pub fn material_for(
        &mut self,
        color: Rgb,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        let key = color_key(color);
        self.materials
            .entry(key)
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: Color::srgb_u8(key[0], key[1], key[2]),
                    unlit: true,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                })
            })
            .clone()
    }
}

fn color_key(color: Rgb) -> [u8; 3] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Quad entities owned by the backend, indexed by command slot.
#[derive(Resource, Debug, Default)]
pub struct QuadPool {
    pub entities: Vec<Entity>,
}

#[derive(Component)]
pub struct QuadInstance;

pub fn setup_quad_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let mesh = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));
    commands.insert_resource(QuadAssets::new(mesh));
}

/// System: rebuild [`FrameCommands`] from the current network and camera.
pub fn project_frame(
    network: Option<Res<TrafficNetwork>>,
    camera: Res<ViewportCamera>,
    style: Res<SceneStyle>,
    mut frame: ResMut<FrameCommands>,
) {
    let frame = &mut *frame;
    frame.commands.clear();
    frame.summary = project_scene(network.as_deref(), &camera, &style, &mut frame.commands);
}

/// System: make the pooled quads match [`FrameCommands`].
pub fn sync_quad_instances(
    mut commands: Commands,
    frame: Res<FrameCommands>,
    mut pool: ResMut<QuadPool>,
    mut assets: ResMut<QuadAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut quads: Query<
        (
            &mut Transform,
            &mut MeshMaterial3d<StandardMaterial>,
            &mut Visibility,
        ),
        With<QuadInstance>,
    >,
) {
    for (slot, command) in frame.commands.iter().enumerate() {
        let transform = command.transform.to_transform();
        let material = assets.material_for(command.color, &mut materials);

        if let Some(&entity) = pool.entities.get(slot) {
            let Ok((mut current, mut current_material, mut visibility)) = quads.get_mut(entity)
            else {
                continue;
            };
            if *current != transform {
                *current = transform;
            }
            if current_material.0 != material {
                current_material.0 = material;
            }
            if *visibility != Visibility::Visible {
                *visibility = Visibility::Visible;
            }
        } else {
            let entity = commands
                .spawn((
                    Mesh3d(assets.mesh.clone()),
                    MeshMaterial3d(material),
                    transform,
                    Visibility::Visible,
                    QuadInstance,
                ))
                .id();
            pool.entities.push(entity);
        }
    }

    let used = frame.commands.len().min(pool.entities.len());
    if pool.entities.len() > used {
        trace!("Hiding {} surplus quads", pool.entities.len() - used);
    }
    for &entity in &pool.entities[used..] {
        if let Ok((_, _, mut visibility)) = quads.get_mut(entity) {
            if *visibility != Visibility::Hidden {
                *visibility = Visibility::Hidden;
            }
        }
    }
}
