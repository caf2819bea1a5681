//! Level structure
//!
//! The level owns the tile grid, its rooms and corridors. The tile grid is
//! the single source of truth for door state: corridors only remember where
//! their doors are, and every lock transition goes through the writers here.

use serde::{Deserialize, Serialize};

use super::corridor::{Corridor, CorridorId, Door};
use super::room::{Room, RoomId};
use super::tile::{DoorLock, Tile, TileType};
use super::Position;
use crate::monster::Enemy;
use crate::object::{Item, ItemSubtype};
use crate::world::{Difficulty, GenerationOptions};
use crate::{MAP_HEIGHT, MAP_WIDTH, S_DOOR};

/// Create an empty tile grid
fn default_tiles() -> Vec<Vec<Tile>> {
    vec![vec![Tile::empty(); MAP_HEIGHT]; MAP_WIDTH]
}

/// One generated dungeon floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level number (1-based depth)
    pub number: u32,

    /// Seed the layout was generated from
    pub seed: u64,

    pub difficulty: Difficulty,

    /// Tiles, indexed `[x][y]`
    #[serde(default = "default_tiles")]
    pub tiles: Vec<Vec<Tile>>,

    /// Rooms in row-major grid order
    pub rooms: Vec<Room>,

    /// Horizontal connections first, then vertical
    pub corridors: Vec<Corridor>,

    pub start_room: RoomId,
    pub exit_room: RoomId,
    pub exit_pos: Position,

    /// Room the player was last seen standing in
    pub player_room: Option<RoomId>,
}

impl Level {
    /// Create a level with an empty grid and no rooms
    pub fn new(number: u32, seed: u64, difficulty: Difficulty) -> Self {
        Self {
            number,
            seed,
            difficulty,
            tiles: default_tiles(),
            rooms: Vec::new(),
            corridors: Vec::new(),
            start_room: 0,
            exit_room: 0,
            exit_pos: Position::default(),
            player_room: None,
        }
    }

    /// Create a level with generated content
    pub fn generate(
        number: u32,
        seed: u64,
        difficulty: Difficulty,
        options: &GenerationOptions,
    ) -> Self {
        super::generation::generate(number, seed, difficulty, options)
    }

    /// Check if position is on the map
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < MAP_WIDTH && (pos.y as usize) < MAP_HEIGHT
    }

    /// Tile at `pos`; `None` off the map or past the end of a short grid
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(pos.x as usize)?.get(pos.y as usize)
    }

    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get_mut(pos.x as usize)?.get_mut(pos.y as usize)
    }

    /// Overwrite terrain and glyph (no-op off the map)
    pub fn set_tile(&mut self, pos: Position, typ: TileType, symbol: char) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.typ = typ;
            tile.symbol = symbol;
            if typ != TileType::Door {
                tile.door = None;
            }
        }
    }

    pub fn tile_type(&self, pos: Position) -> TileType {
        self.tile(pos).map_or(TileType::Empty, |t| t.typ)
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_walkable)
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_visible)
    }

    pub fn is_explored(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_explored)
    }

    /// Mark visible (and explored); no-op off the map
    pub fn mark_visible(&mut self, pos: Position) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.mark_visible();
        }
    }

    /// Reset every tile's visible flag, keeping explored
    pub fn clear_visibility(&mut self) {
        for column in &mut self.tiles {
            for tile in column {
                tile.clear_visible();
            }
        }
    }

    // Rooms

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    pub fn start_room(&self) -> Option<&Room> {
        self.room(self.start_room)
    }

    pub fn exit_room(&self) -> Option<&Room> {
        self.room(self.exit_room)
    }

    /// Room whose interior holds `pos`
    pub fn room_at(&self, pos: Position) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains(pos))
    }

    /// Room whose full rectangle (walls included) holds `pos`
    pub fn room_with_walls_at(&self, pos: Position) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains_with_walls(pos))
    }

    /// Rooms reachable over one corridor, with the corridor used
    pub fn adjacent_rooms(&self, room: RoomId) -> Vec<(RoomId, CorridorId)> {
        self.corridors
            .iter()
            .filter_map(|c| c.other_end(room).map(|other| (other, c.id)))
            .collect()
    }

    // Corridors and doors

    pub fn corridor(&self, id: CorridorId) -> Option<&Corridor> {
        self.corridors.get(id)
    }

    pub fn corridor_at(&self, pos: Position) -> Option<&Corridor> {
        self.corridors.iter().find(|c| c.contains(pos))
    }

    pub fn corridor_at_mut(&mut self, pos: Position) -> Option<&mut Corridor> {
        self.corridors.iter_mut().find(|c| c.contains(pos))
    }

    /// Stamp a door on a corridor point and record it on the corridor
    pub fn place_door(&mut self, corridor: CorridorId, pos: Position, lock: DoorLock) {
        let Some(tile) = self.tile_mut(pos) else {
            return;
        };
        tile.typ = TileType::Door;
        tile.symbol = S_DOOR;
        tile.door = Some(lock);
        if let Some(corridor) = self.corridors.get_mut(corridor)
            && !corridor.doors.contains(&pos)
        {
            corridor.doors.push(pos);
        }
    }

    /// Lock or unlock the door at `pos`; false if there is no door there
    pub fn set_door_locked(&mut self, pos: Position, locked: bool) -> bool {
        match self.tile_mut(pos).and_then(|t| t.door.as_mut()) {
            Some(lock) => {
                lock.locked = locked;
                true
            }
            None => false,
        }
    }

    /// Unlock the door at `pos` if one of `keys` opens it
    pub fn try_unlock_door(&mut self, pos: Position, keys: &[ItemSubtype]) -> bool {
        let Some(lock) = self.tile(pos).and_then(|t| t.door) else {
            return false;
        };
        if !lock.locked {
            return true;
        }
        match lock.key {
            Some(key) if keys.contains(&key) => self.set_door_locked(pos, false),
            _ => false,
        }
    }

    pub fn door_at(&self, pos: Position) -> Option<Door> {
        let corridor = self.corridors.iter().find(|c| c.doors.contains(&pos))?;
        let lock = self.tile(pos)?.door?;
        Some(Door::from_lock(pos, corridor.id, lock))
    }

    /// Doors on one corridor
    pub fn corridor_doors(&self, corridor: CorridorId) -> Vec<Door> {
        self.corridor(corridor)
            .map(|c| {
                c.doors
                    .iter()
                    .filter_map(|&pos| {
                        let lock = self.tile(pos)?.door?;
                        Some(Door::from_lock(pos, c.id, lock))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All doors on the level, in corridor order
    pub fn doors(&self) -> Vec<Door> {
        self.corridors
            .iter()
            .flat_map(|c| self.corridor_doors(c.id))
            .collect()
    }

    /// Any locked door on the corridor
    pub fn is_corridor_locked(&self, corridor: CorridorId) -> bool {
        self.corridor_doors(corridor).iter().any(|d| d.locked)
    }

    // Contents

    /// Key items with the room holding each
    pub fn keys(&self) -> impl Iterator<Item = (RoomId, &Item)> {
        self.rooms
            .iter()
            .flat_map(|room| room.items.iter().filter(|i| i.is_key()).map(move |i| (room.id, i)))
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.rooms.iter().flat_map(|room| room.items.iter())
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.rooms.iter().flat_map(|room| room.enemies.iter())
    }

    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.rooms.iter().find_map(|room| room.item_at(pos))
    }

    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        self.rooms.iter().find_map(|room| room.enemy_at(pos))
    }

    pub fn enemy_at_mut(&mut self, pos: Position) -> Option<&mut Enemy> {
        self.rooms.iter_mut().find_map(|room| room.enemy_at_mut(pos))
    }

    /// Living mimic still posing as an item
    pub fn mimic_at(&self, pos: Position) -> Option<&Enemy> {
        self.enemy_at(pos).filter(|e| e.is_disguised())
    }

    pub fn remove_item_at(&mut self, pos: Position) -> Option<Item> {
        self.rooms.iter_mut().find_map(|room| room.remove_item_at(pos))
    }

    pub fn remove_enemy_at(&mut self, pos: Position) -> Option<Enemy> {
        self.rooms.iter_mut().find_map(|room| room.remove_enemy_at(pos))
    }

    /// Plain-text map
    ///
    /// With `reveal` every tile is drawn; otherwise unexplored tiles are
    /// blank and contents show only where currently visible.
    pub fn render(&self, reveal: bool) -> String {
        let mut rows = vec![vec![' '; MAP_WIDTH]; MAP_HEIGHT];
        let mut put = |pos: Position, symbol: char| {
            if self.in_bounds(pos) {
                rows[pos.y as usize][pos.x as usize] = symbol;
            }
        };
        for (x, column) in self.tiles.iter().enumerate() {
            for (y, tile) in column.iter().enumerate() {
                if reveal || tile.is_explored() {
                    put(Position::new(x as i32, y as i32), tile.symbol);
                }
            }
        }

        let shown = |pos: Position| reveal || self.is_visible(pos);
        for item in self.items().filter(|i| shown(i.position)) {
            put(item.position, item.symbol);
        }
        for enemy in self.enemies().filter(|e| e.is_alive() && shown(e.position)) {
            put(enemy.position, enemy.display_symbol());
        }

        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
