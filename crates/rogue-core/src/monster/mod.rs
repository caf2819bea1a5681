//! Enemy system
//!
//! Enemy kinds, their per-level stats, the weighted spawn roll and mimics.

mod enemy;

pub use enemy::{Disguise, Enemy, EnemyKind};
