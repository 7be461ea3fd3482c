use std::collections::HashMap;

use bevy::prelude::*;
use sim::{EntityId, SphereDraw};

use crate::frame::{Demo, RenderedFrame, pose_to_transform};

/// Rendered counterpart of one registry entity.
#[derive(Component, Debug)]
pub struct SphereVisual {
    pub entity: EntityId,
    pub color: [f32; 3],
}

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_spheres);
}

fn sphere_material(color: [f32; 3]) -> StandardMaterial {
    let [r, g, b] = color;
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        unlit: true,
        ..default()
    }
}

fn spawn_spheres(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    demo: Res<Demo>,
) {
    let Some(main_loop) = demo.main_loop() else {
        return;
    };

    // Radii repeat often enough that sharing meshes is worth it.
    let mut mesh_by_radius: HashMap<u32, Handle<Mesh>> = HashMap::new();
    let draws = main_loop.simulation().draws();
    for draw in &draws {
        let mesh = mesh_by_radius
            .entry(draw.radius.to_bits())
            .or_insert_with(|| meshes.add(Sphere::new(draw.radius).mesh().uv(20, 20)))
            .clone();

        commands.spawn((
            SphereVisual {
                entity: draw.entity,
                color: draw.color,
            },
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(sphere_material(draw.color))),
            pose_to_transform(&draw.pose),
        ));
    }
    info!("spawned {} sphere visuals", draws.len());
}

/// Copy poses and colors from the last rendered frame onto the sphere visuals.
pub(crate) fn draw_spheres(
    frame: Res<RenderedFrame>,
    mut spheres: Query<(
        &mut SphereVisual,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(view) = frame.0.as_ref() else {
        return;
    };
    let by_entity: HashMap<EntityId, &SphereDraw> =
        view.spheres.iter().map(|draw| (draw.entity, draw)).collect();

    for (mut visual, mut transform, mut visibility, handle) in &mut spheres {
        let Some(draw) = by_entity.get(&visual.entity) else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };
        visibility.set_if_neq(Visibility::Inherited);
        *transform = pose_to_transform(&draw.pose);

        if visual.color != draw.color {
            visual.color = draw.color;
            if let Some(material) = materials.get_mut(&handle.0) {
                *material = sphere_material(draw.color);
            }
        }
    }
}
