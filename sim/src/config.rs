use std::{env, ops::RangeInclusive};

use crate::constants::{FAST_SPEED, SLOW_SPEED};

/// Where spheres may be placed at spawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Every sphere starts on the z = 0 plane.
    Planar,
    /// Spheres start anywhere inside the spawn box.
    Volumetric,
}

/// Initial speed tier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpeedTier {
    Slow,
    Fast,
}

impl SpeedTier {
    /// Inclusive integer speed range (units per second) for this tier.
    pub fn speed_range(self) -> RangeInclusive<i32> {
        let (lo, hi) = match self {
            SpeedTier::Slow => SLOW_SPEED,
            SpeedTier::Fast => FAST_SPEED,
        };
        lo..=hi
    }
}

/// Process-wide world configuration. Built once before initialization and read-only after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    pub placement: Placement,
    pub speed: SpeedTier,
    pub sphere_count: usize,
    /// Seed for every random draw of the run. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl WorldConfig {
    pub fn new(placement: Placement, speed: SpeedTier, sphere_count: usize) -> Self {
        Self {
            placement,
            speed,
            sphere_count,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_planar(&self) -> bool {
        self.placement == Placement::Planar
    }
}

/// Environment variable that fixes the random seed of a run.
pub const SEED_ENV: &str = "SIM_SEED";

/// Seed from [`SEED_ENV`], if set to a valid `u64`.
pub fn seed_from_env() -> Option<u64> {
    let raw = env::var(SEED_ENV).ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            log::warn!("ignoring {SEED_ENV}={raw:?}: not an unsigned integer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_range_is_small_and_never_positive() {
        let range = SpeedTier::Slow.speed_range();
        assert_eq!(*range.start(), -3);
        assert_eq!(*range.end(), 0);
    }

    #[test]
    fn fast_range_is_wide_and_never_positive() {
        let range = SpeedTier::Fast.speed_range();
        assert_eq!(*range.start(), -100);
        assert_eq!(*range.end(), 0);
    }

    #[test]
    fn seed_is_optional() {
        let config = WorldConfig::new(Placement::Planar, SpeedTier::Slow, 3);
        assert_eq!(config.seed, None);
        assert!(config.is_planar());
        assert_eq!(config.with_seed(7).seed, Some(7));
    }
}
