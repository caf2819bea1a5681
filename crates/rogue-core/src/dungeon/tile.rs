//! Map tile types

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::object::ItemSubtype;
use crate::{S_CORRIDOR, S_DOOR, S_EMPTY, S_ENTRANCE, S_EXIT, S_FLOOR};

/// Tile/terrain type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Empty = 0,
    Floor = 1,
    Wall = 2,
    Corridor = 3,
    Door = 4,
    Exit = 5,
    Entrance = 6,
}

impl TileType {
    /// Default glyph (walls depend on their position and are stamped explicitly)
    pub const fn symbol(&self) -> char {
        match self {
            TileType::Empty => S_EMPTY,
            TileType::Floor => S_FLOOR,
            TileType::Wall => '#',
            TileType::Corridor => S_CORRIDOR,
            TileType::Door => S_DOOR,
            TileType::Exit => S_EXIT,
            TileType::Entrance => S_ENTRANCE,
        }
    }

    /// Blocks rays
    pub const fn blocks_sight(&self) -> bool {
        matches!(self, TileType::Wall)
    }
}

bitflags! {
    /// Per-tile fog-of-war state
    ///
    /// `VISIBLE` is reset every turn; `EXPLORED` is sticky for the life of the level.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Sight: u8 {
        const EXPLORED = 0x01;
        const VISIBLE = 0x02;
    }
}

// Manual serde impl for Sight
impl Serialize for Sight {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        let mut sight = Sight::from_bits_truncate(bits);
        if sight.contains(Sight::VISIBLE) {
            sight.insert(Sight::EXPLORED);
        }
        Ok(sight)
    }
}

/// Door colors, in the order the puzzle generator tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DoorColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl DoorColor {
    pub const ALL: [DoorColor; 4] = [
        DoorColor::Red,
        DoorColor::Blue,
        DoorColor::Green,
        DoorColor::Yellow,
    ];

    /// Key subtype that opens doors of this color
    pub const fn key(self) -> ItemSubtype {
        match self {
            DoorColor::Red => ItemSubtype::RedKey,
            DoorColor::Blue => ItemSubtype::BlueKey,
            DoorColor::Green => ItemSubtype::GreenKey,
            DoorColor::Yellow => ItemSubtype::YellowKey,
        }
    }
}

/// Lock state of a door tile
///
/// The tile grid is the only place this lives; corridors keep door positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorLock {
    /// `None` for cosmetic doors
    pub color: Option<DoorColor>,
    pub locked: bool,
    pub key: Option<ItemSubtype>,
}

impl DoorLock {
    /// A colored door, locked until its key is used
    pub const fn locked(color: DoorColor) -> Self {
        Self {
            color: Some(color),
            locked: true,
            key: Some(color.key()),
        }
    }

    /// An unlocked, colorless door
    pub const fn cosmetic() -> Self {
        Self {
            color: None,
            locked: false,
            key: None,
        }
    }
}

/// A single map tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Terrain type
    pub typ: TileType,

    /// Display glyph
    pub symbol: char,

    /// Fog-of-war state
    pub sight: Sight,

    /// Lock state, present only on door tiles
    pub door: Option<DoorLock>,
}

impl Default for Tile {
    fn default() -> Self {
        Self::empty()
    }
}

impl Tile {
    /// Create an empty (unused) tile
    pub const fn empty() -> Self {
        Self::new(TileType::Empty, S_EMPTY)
    }

    pub const fn new(typ: TileType, symbol: char) -> Self {
        Self {
            typ,
            symbol,
            sight: Sight::empty(),
            door: None,
        }
    }

    pub fn is_explored(&self) -> bool {
        self.sight.contains(Sight::EXPLORED)
    }

    pub fn is_visible(&self) -> bool {
        self.sight.contains(Sight::VISIBLE)
    }

    /// Mark visible this turn; always also explored
    pub fn mark_visible(&mut self) {
        self.sight.insert(Sight::VISIBLE | Sight::EXPLORED);
    }

    pub fn clear_visible(&mut self) {
        self.sight.remove(Sight::VISIBLE);
    }

    pub fn is_locked_door(&self) -> bool {
        self.typ == TileType::Door && self.door.is_some_and(|d| d.locked)
    }

    /// Check if walkable
    pub fn is_walkable(&self) -> bool {
        match self.typ {
            TileType::Floor | TileType::Corridor | TileType::Exit | TileType::Entrance => true,
            TileType::Door => !self.is_locked_door(),
            TileType::Empty | TileType::Wall => false,
        }
    }
}
