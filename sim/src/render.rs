use rapier3d::prelude::{Isometry, Real};

use crate::{
    constants::{FAR_PLANE, FOV_DEGREES, NEAR_PLANE, WINDOW_HEIGHT, WINDOW_WIDTH},
    physics::PhysicsWorld,
    registry::{BodyRegistry, EntityId},
};

/// One sphere to draw this frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereDraw {
    pub entity: EntityId,
    pub color: [f32; 3],
    pub radius: f32,
    /// World transform read from the physics body.
    pub pose: Isometry<Real>,
}

/// Perspective projection used by every front end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    /// Width over height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: FOV_DEGREES,
            aspect: WINDOW_WIDTH as f32 / WINDOW_HEIGHT as f32,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }
}

/// Draw list for every sphere entity, in registry order.
///
/// Entities that are not spheres, or whose body is gone, are skipped.
pub fn collect_draws(registry: &BodyRegistry, world: &PhysicsWorld) -> Vec<SphereDraw> {
    registry
        .iter()
        .filter_map(|entity| {
            let radius = entity.shape.sphere_radius()?;
            let pose = world.pose(entity.body)?;
            Some(SphereDraw {
                entity: entity.id,
                color: entity.display_color(),
                radius,
                pose,
            })
        })
        .collect()
}
