//! Per-run level seeds
//!
//! A run fixes one seed per level up front. Saves store the seed table, not
//! the levels, and any level is regenerated from its seed on demand.

use serde::{Deserialize, Serialize};

use super::{generation, Level};
use crate::rng::GameRng;
use crate::world::{Difficulty, GenerationOptions};
use crate::MAX_LEVELS;

/// Seeds for every level of a run, indexed by level number - 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunSeeds(Vec<u64>);

impl RunSeeds {
    /// Derive the whole table from a master seed
    pub fn new(master_seed: u64) -> Self {
        let mut rng = GameRng::new(master_seed);
        Self((0..MAX_LEVELS).map(|_| rng.next_seed()).collect())
    }

    /// Seed table for a run started from entropy
    pub fn from_entropy() -> Self {
        Self::new(GameRng::from_entropy().next_seed())
    }

    /// Wrap a stored table
    pub fn from_seeds(seeds: Vec<u64>) -> Self {
        Self(seeds)
    }

    pub fn seeds(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Seed for a 1-based level number
    pub fn seed_for(&self, level_number: u32) -> Option<u64> {
        let idx = (level_number as usize).checked_sub(1)?;
        self.0.get(idx).copied()
    }

    /// The stored seed matches the table entry for that level
    pub fn matches(&self, level_number: u32, seed: u64) -> bool {
        self.seed_for(level_number) == Some(seed)
    }

    /// Regenerate a level of this run
    pub fn generate(
        &self,
        level_number: u32,
        difficulty: Difficulty,
        options: &GenerationOptions,
    ) -> Option<Level> {
        let seed = self.seed_for(level_number)?;
        Some(generation::generate(level_number, seed, difficulty, options))
    }
}

impl From<RunSeeds> for Vec<u64> {
    fn from(seeds: RunSeeds) -> Self {
        seeds.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size_and_determinism() {
        let a = RunSeeds::new(1234);
        let b = RunSeeds::new(1234);
        assert_eq!(a.len(), MAX_LEVELS);
        assert_eq!(a, b);
        assert_ne!(a, RunSeeds::new(1235));
    }

    #[test]
    fn test_seed_lookup_is_one_based() {
        let seeds = RunSeeds::from_seeds(vec![10, 20, 30]);
        assert_eq!(seeds.seed_for(0), None);
        assert_eq!(seeds.seed_for(1), Some(10));
        assert_eq!(seeds.seed_for(3), Some(30));
        assert_eq!(seeds.seed_for(4), None);
        assert!(seeds.matches(2, 20));
        assert!(!seeds.matches(2, 10));
    }

    #[test]
    fn test_regenerated_level_is_identical() {
        let seeds = RunSeeds::new(77);
        let options = GenerationOptions::default();
        let first = seeds.generate(6, Difficulty::NORMAL, &options);
        let again = seeds.generate(6, Difficulty::NORMAL, &options);
        assert!(first.is_some());
        assert_eq!(first, again);
        assert!(seeds.generate(22, Difficulty::NORMAL, &options).is_none());
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let seeds = RunSeeds::from_seeds(vec![1, 2]);
        assert_eq!(serde_json::to_string(&seeds).unwrap(), "[1,2]");
    }
}
