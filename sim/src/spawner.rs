//! Spawner: creates one sphere body, gives it an initial velocity and registers it.

use rand::Rng;
use rapier3d::prelude::{Point, Real, Vector};

use crate::{
    config::{SpeedTier, WorldConfig},
    constants::{RADIUS_RANGE, SPAWN_X, SPAWN_Y, SPAWN_Z, SPHERE_COLOR},
    physics::{PhysicsWorld, SphereDesc},
    registry::{BodyRegistry, EntityId, EntityShape, NewEntity},
    tag::BodyTag,
};

/// World axis a sphere initially moves along.
///
/// Drawn uniformly from all four variants, so one sphere in four starts at rest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MotionAxis {
    None,
    X,
    Y,
    Z,
}

impl MotionAxis {
    pub const ALL: [MotionAxis; 4] = [MotionAxis::None, MotionAxis::X, MotionAxis::Y, MotionAxis::Z];

    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Velocity of magnitude `speed` along this axis.
    pub fn velocity(self, speed: i32) -> Vector<Real> {
        let speed = speed as Real;
        match self {
            MotionAxis::None => Vector::zeros(),
            MotionAxis::X => Vector::new(speed, 0.0, 0.0),
            MotionAxis::Y => Vector::new(0.0, speed, 0.0),
            MotionAxis::Z => Vector::new(0.0, 0.0, speed),
        }
    }
}

/// Velocity assignment made at spawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InitialMotion {
    pub axis: MotionAxis,
    /// Drawn from the speed tier even when `axis` is `None`.
    pub speed: i32,
}

impl InitialMotion {
    pub fn velocity(&self) -> Vector<Real> {
        self.axis.velocity(self.speed)
    }
}

pub fn draw_speed<R: Rng + ?Sized>(tier: SpeedTier, rng: &mut R) -> i32 {
    rng.random_range(tier.speed_range())
}

/// Random position and radius for one sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnPoint {
    pub position: Point<Real>,
    pub radius: f32,
}

/// Draw a spawn point inside the spawn box. In planar mode z is pinned to 0.
pub fn draw_spawn<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> SpawnPoint {
    let mut coord = |(lo, hi): (i32, i32)| rng.random_range(lo..=hi) as Real;
    let x = coord(SPAWN_X);
    let y = coord(SPAWN_Y);
    // Draw z either way so both modes consume the same random sequence.
    let z = coord(SPAWN_Z);
    let z = if config.is_planar() { 0.0 } else { z };
    let radius = coord(RADIUS_RANGE);

    SpawnPoint {
        position: Point::new(x, y, z),
        radius,
    }
}

/// Create one sphere in `world` and append it to `registry`.
///
/// The body is tagged so the collision observer can map contacts back to the new entity.
pub fn spawn_sphere<R: Rng + ?Sized>(
    world: &mut PhysicsWorld,
    registry: &mut BodyRegistry,
    config: &WorldConfig,
    rng: &mut R,
    radius: f32,
    position: Point<Real>,
    mass: f32,
) -> EntityId {
    let id = registry.next_id();
    let body = world.add_sphere(&SphereDesc {
        radius,
        position,
        mass,
        tag: BodyTag::for_entity(id),
    });

    let motion = InitialMotion {
        axis: MotionAxis::draw(rng),
        speed: draw_speed(config.speed, rng),
    };
    world.set_linear_velocity(body, motion.velocity());

    let registered = registry.insert(NewEntity {
        color: SPHERE_COLOR,
        shape: EntityShape::Sphere { radius },
        body,
        motion,
    });
    debug_assert_eq!(registered, id);

    log::debug!(
        "spawned {id} r={radius} at ({}, {}, {}) moving {:?} at {}",
        position.x,
        position.y,
        position.z,
        motion.axis,
        motion.speed
    );
    id
}
