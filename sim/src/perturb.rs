//! Per-frame random nudges that keep the scene moving.

use rand::Rng;
use rapier3d::prelude::{Real, Vector};

use crate::{constants::PERTURB_IMPULSE, physics::PhysicsWorld, registry::BodyRegistry};

/// Direction of one perturbation impulse. Every component is -1, 0 or +1 and is scaled by
/// [`PERTURB_IMPULSE`] when applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nudge(pub [i8; 3]);

impl Nudge {
    pub fn impulse(self) -> Vector<Real> {
        let [x, y, z] = self.0;
        Vector::new(x as Real, y as Real, z as Real) * PERTURB_IMPULSE
    }
}

/// Twelve equally likely outcomes, every entry reachable.
///
/// Entries repeat: +z appears twice, -z never, and each diagonal three times, so the
/// distribution favours those directions. The table is the single source of the weighting.
pub const NUDGE_TABLE: [Nudge; 12] = [
    Nudge([1, 0, 0]),
    Nudge([0, 1, 0]),
    Nudge([0, 0, 1]),
    Nudge([-1, 0, 0]),
    Nudge([0, -1, 0]),
    Nudge([0, 0, 1]),
    Nudge([1, 1, 1]),
    Nudge([1, 1, 1]),
    Nudge([1, 1, 1]),
    Nudge([-1, -1, -1]),
    Nudge([-1, -1, -1]),
    Nudge([-1, -1, -1]),
];

pub fn draw_nudge<R: Rng + ?Sized>(rng: &mut R) -> Nudge {
    NUDGE_TABLE[rng.random_range(0..NUDGE_TABLE.len())]
}

/// Apply one random nudge to every registered entity, in registry order.
///
/// Nudges with a z component are applied in planar mode too.
pub fn perturb<R: Rng + ?Sized>(registry: &BodyRegistry, world: &mut PhysicsWorld, rng: &mut R) {
    for entity in registry.iter() {
        world.apply_impulse(entity.body, draw_nudge(rng).impulse());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Placement, SpeedTier, WorldConfig},
        constants::FIXED_DT,
        spawner::spawn_sphere,
    };
    use rand::{SeedableRng, rngs::StdRng};
    use rapier3d::prelude::Point;
    use std::collections::HashMap;

    #[test]
    fn table_weights_are_explicit() {
        let mut counts: HashMap<Nudge, usize> = HashMap::new();
        for nudge in NUDGE_TABLE {
            *counts.entry(nudge).or_default() += 1;
        }
        assert_eq!(counts.len(), 7, "seven distinct directions");
        assert_eq!(counts[&Nudge([0, 0, 1])], 2);
        assert_eq!(counts[&Nudge([1, 1, 1])], 3);
        assert_eq!(counts[&Nudge([-1, -1, -1])], 3);
        assert!(!counts.contains_key(&Nudge([0, 0, -1])));
    }

    #[test]
    fn impulse_components_are_small() {
        for nudge in NUDGE_TABLE {
            for c in nudge.impulse().iter() {
                assert!(*c == 0.0 || (c.abs() - PERTURB_IMPULSE).abs() < 1.0e-9);
            }
        }
    }

    #[test]
    fn perturb_changes_each_velocity_by_one_table_entry() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut world = PhysicsWorld::new();
        let mut registry = BodyRegistry::new();
        let config = WorldConfig::new(Placement::Planar, SpeedTier::Slow, 3);
        for i in 0..3 {
            let position = Point::new(i as f32 * 20.0, 0.0, 0.0);
            spawn_sphere(&mut world, &mut registry, &config, &mut rng, 1.0, position, 1.0);
        }
        // One step so rapier has computed mass properties for the new bodies.
        world.step(FIXED_DT, &());

        let before: Vec<_> = registry
            .iter()
            .map(|e| world.linear_velocity(e.body).unwrap())
            .collect();
        perturb(&registry, &mut world, &mut rng);

        for (entity, before) in registry.iter().zip(before) {
            let delta = world.linear_velocity(entity.body).unwrap() - before;
            // Unit mass, so the velocity change equals the impulse.
            let matches = NUDGE_TABLE
                .iter()
                .any(|nudge| (nudge.impulse() - delta).norm() < 1.0e-5);
            assert!(matches, "{} changed by {delta:?}", entity.id);
        }
    }
}
