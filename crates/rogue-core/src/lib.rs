//! rogue-core: level generation and perception for a turn-based dungeon crawler
//!
//! This crate contains all generation logic with no I/O dependencies.
//! A level is a pure function of `(level_number, seed, difficulty, options)`,
//! so saves only need to store seeds.

pub mod dungeon;
pub mod monster;
pub mod object;
pub mod world;

mod consts;
mod rng;

pub use consts::*;
pub use dungeon::{generate, Level, Position, RunSeeds};
pub use rng::GameRng;
pub use world::{ConfigError, Difficulty, GenerationOptions};
