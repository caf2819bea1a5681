//! Dungeon system
//!
//! Level structure, rooms and corridors, generation, door/key puzzles,
//! population, mimics and fog of war.

mod corridor;
pub mod doors;
mod generation;
mod level;
pub mod mimic;
mod populate;
mod position;
mod room;
mod run;
mod tile;
pub mod vision;

pub use corridor::{horizontal_path, vertical_path, Corridor, CorridorId, Door};
pub use doors::{verify_solvable, PuzzleOutcome};
pub use generation::generate;
pub use level::Level;
pub use populate::{place_enemies, place_items};
pub use position::{Direction, Position};
pub use room::{Room, RoomId};
pub use run::RunSeeds;
pub use tile::{DoorColor, DoorLock, Sight, Tile, TileType};
pub use vision::update_visibility;
