//! The demonstration's context object: configuration, physics world, registry and random
//! source, created once at startup and owned by the main loop.

use rand::{SeedableRng, rngs::StdRng};
use rapier3d::prelude::Vector;

use crate::{
    collision::{CollisionPair, ContactReporter},
    config::WorldConfig,
    constants::{FIXED_DT, SPHERE_MASS},
    perturb::perturb,
    physics::PhysicsWorld,
    registry::BodyRegistry,
    render::{SphereDraw, collect_draws},
    spawner::{draw_spawn, spawn_sphere},
};

/// Counts of everything released by [`Simulation::shutdown`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    pub entities: usize,
    pub bodies: usize,
    pub colliders: usize,
}

pub struct Simulation {
    config: WorldConfig,
    world: PhysicsWorld,
    registry: BodyRegistry,
    rng: StdRng,
}

impl Simulation {
    /// Build the world and spawn `config.sphere_count` spheres at random spawn points.
    pub fn init(config: WorldConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut world = PhysicsWorld::new();
        world.set_gravity(Vector::zeros());

        let mut registry = BodyRegistry::new();
        for _ in 0..config.sphere_count {
            let spawn = draw_spawn(&config, &mut rng);
            spawn_sphere(
                &mut world,
                &mut registry,
                &config,
                &mut rng,
                spawn.radius,
                spawn.position,
                SPHERE_MASS,
            );
        }

        log::info!(
            "initialized {} spheres ({:?} placement, {:?} speed)",
            registry.len(),
            config.placement,
            config.speed
        );

        Self {
            config,
            world,
            registry,
            rng,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Advance one fixed step and flag every entity that started touching another one.
    pub fn step(&mut self) -> Vec<CollisionPair> {
        let reporter = ContactReporter::new(&self.registry);
        self.world.step(FIXED_DT, &reporter);
        let pairs = reporter.into_pairs();

        for pair in &pairs {
            self.registry.mark_hit(pair.a);
            self.registry.mark_hit(pair.b);
        }
        pairs
    }

    pub fn perturb(&mut self) {
        perturb(&self.registry, &mut self.world, &mut self.rng);
    }

    pub fn draws(&self) -> Vec<SphereDraw> {
        collect_draws(&self.registry, &self.world)
    }

    /// Release every body with its collider, then the registry entries, exactly once.
    pub fn shutdown(mut self) -> ShutdownReport {
        let mut report = ShutdownReport::default();
        for entity in self.registry.drain() {
            report.entities += 1;
            if let Some(released) = self.world.remove_body(entity.body) {
                report.bodies += 1;
                report.colliders += released.colliders;
            }
        }

        log::info!(
            "released {} bodies, {} colliders, {} entities",
            report.bodies,
            report.colliders,
            report.entities
        );
        debug_assert_eq!(self.world.body_count(), 0);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Placement, SpeedTier};

    #[test]
    fn init_spawns_configured_count() {
        for count in [0, 1, 7, 40] {
            let config = WorldConfig::new(Placement::Volumetric, SpeedTier::Fast, count).with_seed(1);
            let sim = Simulation::init(config);
            assert_eq!(sim.registry().len(), count);
            assert_eq!(sim.world().body_count(), count);
            assert_eq!(sim.world().gravity(), Vector::zeros());
        }
    }

    #[test]
    fn same_seed_same_world() {
        let config = WorldConfig::new(Placement::Volumetric, SpeedTier::Slow, 10).with_seed(99);
        let a = Simulation::init(config.clone());
        let b = Simulation::init(config);
        let draws_a = a.draws();
        let draws_b = b.draws();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn shutdown_releases_everything_once() {
        let config = WorldConfig::new(Placement::Planar, SpeedTier::Slow, 12).with_seed(5);
        let mut sim = Simulation::init(config);
        for _ in 0..10 {
            sim.step();
            sim.perturb();
        }
        let report = sim.shutdown();
        assert_eq!(
            report,
            ShutdownReport {
                entities: 12,
                bodies: 12,
                colliders: 12
            }
        );
    }

    #[test]
    fn planar_spheres_leave_the_plane_under_nudges() {
        let config = WorldConfig::new(Placement::Planar, SpeedTier::Slow, 20).with_seed(3);
        let mut sim = Simulation::init(config);
        for draw in sim.draws() {
            assert_eq!(draw.pose.translation.vector.z, 0.0);
        }

        for _ in 0..60 {
            sim.step();
            sim.perturb();
        }

        let off_plane = sim
            .draws()
            .iter()
            .filter(|draw| draw.pose.translation.vector.z != 0.0)
            .count();
        assert_eq!(off_plane, 20);
    }

    #[test]
    fn hit_flags_follow_collision_pairs() {
        let config = WorldConfig::new(Placement::Planar, SpeedTier::Fast, 150).with_seed(17);
        let mut sim = Simulation::init(config);

        let mut pairs = Vec::new();
        for _ in 0..120 {
            pairs.extend(sim.step());
        }
        assert!(!pairs.is_empty());

        for entity in sim.registry().iter() {
            let collided = pairs.iter().any(|p| p.involves(entity.id));
            assert_eq!(entity.hit, collided, "{}", entity.id);
        }
    }
}
