//! Rapier-backed physics world.
//!
//! Everything rapier needs to advance the simulation lives here:
//! - broad phase (`BroadPhaseBvh`): finds potentially overlapping pairs,
//! - narrow phase (`NarrowPhase`): computes contacts for those pairs,
//! - solver (`PhysicsPipeline` with its island manager, joint sets and CCD solver),
//! - configuration (`IntegrationParameters`).
//!
//! The rest of the crate only sees handles, poses and velocities, plus the
//! [`CollisionObserver`] callback during [`PhysicsWorld::step`].

use rapier3d::prelude::*;

use crate::{
    collision::{CollisionObserver, ContactPoint},
    tag::BodyTag,
};

/// Parameters for one sphere body.
#[derive(Copy, Clone, Debug)]
pub struct SphereDesc {
    pub radius: f32,
    pub position: Point<Real>,
    /// Zero makes the body fixed (immovable, no inertia).
    pub mass: f32,
    pub tag: BodyTag,
}

/// What a successful [`PhysicsWorld::remove_body`] released.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Released {
    pub colliders: usize,
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world with zero gravity.
    pub fn new() -> Self {
        Self {
            gravity: Vector::zeros(),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn set_gravity(&mut self, gravity: Vector<Real>) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Insert a sphere body with its collider.
    ///
    /// With a non-zero mass the body is dynamic and rapier derives its inertia from the mass
    /// and the ball shape. The collider carries `desc.tag` and reports collision events.
    pub fn add_sphere(&mut self, desc: &SphereDesc) -> RigidBodyHandle {
        let builder = if desc.mass > 0.0 {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let body = builder
            .pose(Isometry::translation(
                desc.position.x,
                desc.position.y,
                desc.position.z,
            ))
            .build();
        let handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(desc.radius)
            .mass(desc.mass.max(0.0))
            .user_data(desc.tag.raw())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    pub fn set_linear_velocity(&mut self, handle: RigidBodyHandle, velocity: Vector<Real>) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(velocity, true);
        }
    }

    /// Apply an instantaneous impulse at the body's center of mass.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vector<Real>) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.apply_impulse(impulse, true);
        }
    }

    pub fn linear_velocity(&self, handle: RigidBodyHandle) -> Option<Vector<Real>> {
        self.bodies.get(handle).map(|body| *body.linvel())
    }

    /// Current world transform (position and orientation) of a body.
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<Isometry<Real>> {
        self.bodies.get(handle).map(|body| *body.position())
    }

    /// Advance the world by `dt` seconds.
    ///
    /// `observer` is called synchronously, zero or more times, before this returns: once for
    /// every contact that started during the step.
    pub fn step(&mut self, dt: Real, observer: &dyn CollisionObserver) {
        self.params.dt = dt;
        let events = ObserverEvents { observer };

        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &events,
        );
    }

    /// Remove a body together with its colliders.
    ///
    /// Returns `None` if the handle was already removed or never existed.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) -> Option<Released> {
        let colliders = self.bodies.get(handle)?.colliders().len();
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        )?;
        Some(Released { colliders })
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

/// Adapts rapier's event handler to a [`CollisionObserver`].
struct ObserverEvents<'a> {
    observer: &'a dyn CollisionObserver,
}

impl EventHandler for ObserverEvents<'_> {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        let CollisionEvent::Started(h1, h2, _) = event else {
            return;
        };
        let (Some(c1), Some(c2)) = (colliders.get(h1), colliders.get(h2)) else {
            return;
        };

        let contact = contact_pair.and_then(|pair| {
            let (manifold, deepest) = pair.find_deepest_contact()?;
            let first = colliders.get(pair.collider1)?;
            Some(ContactPoint {
                position: first.position() * deepest.local_p1,
                normal: manifold.data.normal,
                distance: deepest.dist,
            })
        });

        self.observer.contact_added(
            contact.as_ref(),
            BodyTag::from_raw(c1.user_data),
            BodyTag::from_raw(c2.user_data),
        );
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
