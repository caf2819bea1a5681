//! Rooms
//!
//! A room is a rectangle whose outer ring is wall. The interior is the
//! rectangle shrunk by one tile on every side; everything that places
//! things (enemies, items, keys, the player) draws from the interior.

use serde::{Deserialize, Serialize};

use super::Position;
use crate::monster::Enemy;
use crate::object::Item;
use crate::rng::GameRng;

/// Index of a room in its level (row-major grid order)
pub type RoomId = usize;

/// A rectangular room with its contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Top-left corner of the wall ring
    pub x: i32,
    pub y: i32,
    /// Outer width including walls
    pub width: i32,
    /// Outer height including walls
    pub height: i32,
    /// Grid cell (column, row)
    pub grid_x: usize,
    pub grid_y: usize,
    pub is_start: bool,
    pub is_exit: bool,
    /// Set once the player has stood inside
    pub explored: bool,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    /// Corridor endpoints on this room's wall ring
    pub entrances: Vec<Position>,
}

impl Room {
    /// Create an empty room
    pub fn new(id: RoomId, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            grid_x: 0,
            grid_y: 0,
            is_start: false,
            is_exit: false,
            explored: false,
            enemies: Vec::new(),
            items: Vec::new(),
            entrances: Vec::new(),
        }
    }

    /// Set the grid cell (builder style)
    pub fn in_cell(mut self, grid_x: usize, grid_y: usize) -> Self {
        self.grid_x = grid_x;
        self.grid_y = grid_y;
        self
    }

    /// Interior only (floor tiles)
    pub fn contains(&self, pos: Position) -> bool {
        pos.x > self.x
            && pos.x < self.x + self.width - 1
            && pos.y > self.y
            && pos.y < self.y + self.height - 1
    }

    /// Full rectangle, wall ring included
    pub fn contains_with_walls(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// On the wall ring
    pub fn is_wall(&self, pos: Position) -> bool {
        self.contains_with_walls(pos) && !self.contains(pos)
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Number of interior tiles
    pub fn floor_area(&self) -> i32 {
        (self.width - 2).max(0) * (self.height - 2).max(0)
    }

    /// Uniform interior position
    pub fn random_floor_position(&self, rng: &mut GameRng) -> Position {
        let dx = rng.rn2((self.width - 2).max(1) as u32) as i32;
        let dy = rng.rn2((self.height - 2).max(1) as u32) as i32;
        Position::new(self.x + 1 + dx, self.y + 1 + dy)
    }

    /// Iterate over interior positions
    pub fn floor_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y + 1..self.y + self.height - 1).flat_map(move |y| {
            (self.x + 1..self.x + self.width - 1).map(move |x| Position::new(x, y))
        })
    }

    pub fn is_entrance(&self, pos: Position) -> bool {
        self.entrances.contains(&pos)
    }

    pub fn add_entrance(&mut self, pos: Position) {
        if !self.is_entrance(pos) {
            self.entrances.push(pos);
        }
    }

    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.items.iter().find(|item| item.position == pos)
    }

    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        self.enemies
            .iter()
            .find(|enemy| enemy.position == pos && enemy.is_alive())
    }

    pub fn enemy_at_mut(&mut self, pos: Position) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|enemy| enemy.position == pos && enemy.is_alive())
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn remove_item_at(&mut self, pos: Position) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.position == pos)?;
        Some(self.items.remove(idx))
    }

    pub fn remove_enemy_at(&mut self, pos: Position) -> Option<Enemy> {
        let idx = self.enemies.iter().position(|enemy| enemy.position == pos)?;
        Some(self.enemies.remove(idx))
    }
}
