//! Collision observer: turns contact reports from the physics step into entity pairs.
//!
//! The observer runs synchronously inside [`PhysicsWorld::step`](crate::PhysicsWorld::step).
//! It only ever receives tags and contact data, never the world, so it cannot add or remove
//! bodies while the step is in progress.

use std::sync::Mutex;

use rapier3d::prelude::{Point, Real, Vector};

use crate::{
    registry::{BodyRegistry, EntityId},
    tag::BodyTag,
};

/// Deepest contact point of a newly started contact, in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactPoint {
    pub position: Point<Real>,
    /// Contact normal pointing from the first collider towards the second.
    pub normal: Vector<Real>,
    /// Signed separation; negative means penetration.
    pub distance: Real,
}

/// What the physics world should do with a reported contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactResponse {
    /// Apply the world's own contact response.
    Default,
}

/// Callback invoked once per newly started contact between two tagged colliders.
///
/// Implementations must not panic; anything they cannot resolve is ignored.
pub trait CollisionObserver: Sync {
    fn contact_added(
        &self,
        contact: Option<&ContactPoint>,
        a: BodyTag,
        b: BodyTag,
    ) -> ContactResponse;
}

/// Observer that ignores every contact.
impl CollisionObserver for () {
    fn contact_added(&self, _: Option<&ContactPoint>, _: BodyTag, _: BodyTag) -> ContactResponse {
        ContactResponse::Default
    }
}

/// Two entities whose shapes started touching during a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: EntityId,
    pub b: EntityId,
}

impl CollisionPair {
    pub fn involves(&self, id: EntityId) -> bool {
        self.a == id || self.b == id
    }
}

/// Resolves tags against the registry, logs each collision and remembers the pairs.
///
/// The registry is borrowed read-only for the duration of one step; hit flags are applied
/// from [`into_pairs`](Self::into_pairs) once the step has returned.
pub struct ContactReporter<'r> {
    registry: &'r BodyRegistry,
    pairs: Mutex<Vec<CollisionPair>>,
}

impl<'r> ContactReporter<'r> {
    pub fn new(registry: &'r BodyRegistry) -> Self {
        Self {
            registry,
            pairs: Mutex::new(Vec::new()),
        }
    }

    fn resolve(&self, tag: BodyTag) -> Option<EntityId> {
        let id = tag.entity()?;
        self.registry.get(id).map(|entity| entity.id)
    }

    pub fn into_pairs(self) -> Vec<CollisionPair> {
        self.pairs
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CollisionObserver for ContactReporter<'_> {
    fn contact_added(
        &self,
        contact: Option<&ContactPoint>,
        a: BodyTag,
        b: BodyTag,
    ) -> ContactResponse {
        let (Some(a), Some(b)) = (self.resolve(a), self.resolve(b)) else {
            return ContactResponse::Default;
        };

        match contact {
            Some(point) => log::info!(
                "{a} collided with {b} at ({:.2}, {:.2}, {:.2})",
                point.position.x,
                point.position.y,
                point.position.z
            ),
            None => log::info!("{a} collided with {b}"),
        }

        if let Ok(mut pairs) = self.pairs.lock() {
            pairs.push(CollisionPair { a, b });
        }
        ContactResponse::Default
    }
}
