//! Body registry: the set of simulated spheres and their display attributes.
//!
//! The registry is created once at startup, only grows during initialization and is drained
//! once at shutdown. Its iteration order is creation order, which is also the order used for
//! rendering and perturbation.

use std::fmt;

use rapier3d::prelude::RigidBodyHandle;

use crate::{constants::HIT_COLOR, spawner::InitialMotion};

/// Identifier correlating a physics body with its display attributes.
///
/// Ids are assigned by [`BodyRegistry::insert`], start at 1 and are never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sphere #{}", self.0)
    }
}

/// Shape of an entity's collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EntityShape {
    Sphere { radius: f32 },
}

impl EntityShape {
    /// Radius if this shape is a sphere.
    pub fn sphere_radius(&self) -> Option<f32> {
        match *self {
            EntityShape::Sphere { radius } => Some(radius),
        }
    }
}

/// One registered sphere.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    /// Linear RGB, each channel in 0..=1.
    pub color: [f32; 3],
    /// Set by the collision observer the first time this entity touches another one.
    pub hit: bool,
    pub shape: EntityShape,
    /// Non-owning link to the rapier body. The body lives in the physics world.
    pub body: RigidBodyHandle,
    /// What the spawner assigned at creation.
    pub motion: InitialMotion,
}

impl Entity {
    /// Color to draw with: the stored color until the first collision, then [`HIT_COLOR`].
    pub fn display_color(&self) -> [f32; 3] {
        if self.hit { HIT_COLOR } else { self.color }
    }
}

/// Attributes of an entity that is about to be registered.
#[derive(Clone, Debug)]
pub struct NewEntity {
    pub color: [f32; 3],
    pub shape: EntityShape,
    pub body: RigidBodyHandle,
    pub motion: InitialMotion,
}

#[derive(Debug, Default)]
pub struct BodyRegistry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next [`insert`](Self::insert) will assign.
    pub fn next_id(&self) -> EntityId {
        EntityId(self.next_id + 1)
    }

    /// Append an entity and return its id.
    pub fn insert(&mut self, new: NewEntity) -> EntityId {
        let id = self.next_id();
        self.next_id = id.0;
        self.entities.push(Entity {
            id,
            color: new.color,
            hit: false,
            shape: new.shape,
            body: new.body,
            motion: new.motion,
        });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        // Ids are sequential and entities are never removed individually.
        let index = (id.0 as usize).checked_sub(1)?;
        self.entities.get(index).filter(|e| e.id == id)
    }

    /// Mark an entity as hit. Returns false if the id is unknown.
    pub fn mark_hit(&mut self, id: EntityId) -> bool {
        let Some(index) = (id.0 as usize).checked_sub(1) else {
            return false;
        };
        match self.entities.get_mut(index) {
            Some(entity) if entity.id == id => {
                entity.hit = true;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Remove every entity, in creation order. Used once at shutdown.
    pub fn drain(&mut self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.drain(..)
    }
}
