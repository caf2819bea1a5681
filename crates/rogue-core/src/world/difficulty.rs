//! Difficulty modifier
//!
//! A scalar in [0.5, 1.5] that scales enemy count and strength up and item
//! abundance down.

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// Difficulty scalar, always within [`Difficulty::MIN`, `Difficulty::MAX`]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Difficulty(f64);

impl Difficulty {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 1.5;
    pub const NORMAL: Difficulty = Difficulty(1.0);

    /// Clamp a raw modifier into range (NaN becomes normal difficulty)
    pub fn new(modifier: f64) -> Self {
        if modifier.is_nan() {
            return Self::NORMAL;
        }
        Self(modifier.clamp(Self::MIN, Self::MAX))
    }

    /// Reject out-of-range modifiers instead of clamping
    pub fn strict(modifier: f64) -> Result<Self, ConfigError> {
        if (Self::MIN..=Self::MAX).contains(&modifier) {
            Ok(Self(modifier))
        } else {
            Err(ConfigError::DifficultyOutOfRange(modifier))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Enemy budget after scaling (never below 1)
    pub fn scale_enemy_count(self, count: u32) -> u32 {
        ((count as f64 * self.0) as u32).max(1)
    }

    /// Item budget after inverse scaling (lower difficulty yields more items)
    pub fn scale_item_count(self, count: u32) -> u32 {
        ((count as f64 * (2.0 - self.0)) as u32).max(1)
    }

    /// Scale an enemy stat (never below 1)
    pub fn scale_stat(self, stat: i32) -> i32 {
        ((stat as f64 * self.0) as i32).max(1)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<f64> for Difficulty {
    fn from(modifier: f64) -> Self {
        Self::new(modifier)
    }
}

impl From<Difficulty> for f64 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        assert_eq!(Difficulty::new(0.1).value(), 0.5);
        assert_eq!(Difficulty::new(9.0).value(), 1.5);
        assert_eq!(Difficulty::new(1.2).value(), 1.2);
        assert_eq!(Difficulty::new(f64::NAN), Difficulty::NORMAL);
    }

    #[test]
    fn test_strict() {
        assert!(Difficulty::strict(1.0).is_ok());
        assert_eq!(
            Difficulty::strict(2.0),
            Err(ConfigError::DifficultyOutOfRange(2.0))
        );
    }

    #[test]
    fn test_enemy_count_floor() {
        assert_eq!(Difficulty::new(0.5).scale_enemy_count(1), 1);
        assert_eq!(Difficulty::new(1.5).scale_enemy_count(4), 6);
        assert_eq!(Difficulty::new(0.5).scale_enemy_count(5), 2);
    }

    #[test]
    fn test_item_count_inverse() {
        assert_eq!(Difficulty::new(0.5).scale_item_count(4), 6);
        assert_eq!(Difficulty::new(1.5).scale_item_count(4), 2);
        assert_eq!(Difficulty::NORMAL.scale_item_count(7), 7);
    }

    #[test]
    fn test_serde_clamps() {
        let d: Difficulty = serde_json::from_str("3.0").unwrap();
        assert_eq!(d.value(), 1.5);
        assert_eq!(serde_json::to_string(&Difficulty::NORMAL).unwrap(), "1.0");
    }
}
