//! Corridors between grid-adjacent rooms
//!
//! Every corridor is an L with a dog-leg at the midline between the two
//! rooms: a straight run out of room A, a perpendicular run along the
//! midline, then a straight run into room B. Both endpoints sit on the
//! rooms' wall rings and become entrances.

use serde::{Deserialize, Serialize};

use super::room::{Room, RoomId};
use super::tile::{DoorColor, DoorLock};
use super::Position;
use crate::object::ItemSubtype;
use crate::rng::GameRng;

/// Index of a corridor in its level
pub type CorridorId = usize;

/// A path of tiles connecting two rooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub id: CorridorId,
    pub from_room: RoomId,
    pub to_room: RoomId,
    /// Ordered path, first point on `from_room`'s wall, last on `to_room`'s
    pub points: Vec<Position>,
    /// Set once the player has stood in it
    pub explored: bool,
    /// Door positions; lock state lives on the tile
    pub doors: Vec<Position>,
}

impl Corridor {
    pub fn new(id: CorridorId, from_room: RoomId, to_room: RoomId, points: Vec<Position>) -> Self {
        Self {
            id,
            from_room,
            to_room,
            points,
            explored: false,
            doors: Vec::new(),
        }
    }

    /// Exact-position membership
    pub fn contains(&self, pos: Position) -> bool {
        self.points.contains(&pos)
    }

    pub fn connects(&self, a: RoomId, b: RoomId) -> bool {
        (self.from_room == a && self.to_room == b) || (self.from_room == b && self.to_room == a)
    }

    /// The room on the far side from `room`, if this corridor touches it
    pub fn other_end(&self, room: RoomId) -> Option<RoomId> {
        if self.from_room == room {
            Some(self.to_room)
        } else if self.to_room == room {
            Some(self.from_room)
        } else {
            None
        }
    }

    /// Long enough to take a door without sitting on a room wall
    pub fn can_hold_door(&self) -> bool {
        self.points.len() > 2
    }

    /// Where a door goes on this corridor
    pub fn door_slot(&self) -> Option<Position> {
        self.points.get(self.points.len() / 2).copied()
    }
}

/// Read-only view of a door, materialized from its tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub position: Position,
    pub corridor: CorridorId,
    pub color: Option<DoorColor>,
    pub locked: bool,
    pub key: Option<ItemSubtype>,
}

impl Door {
    pub(crate) fn from_lock(position: Position, corridor: CorridorId, lock: DoorLock) -> Self {
        Self {
            position,
            corridor,
            color: lock.color,
            locked: lock.locked,
            key: lock.key,
        }
    }
}

/// Path from `left` to the horizontally adjacent `right`
///
/// Leaves through `left`'s east wall, enters through `right`'s west wall.
pub fn horizontal_path(left: &Room, right: &Room, rng: &mut GameRng) -> Vec<Position> {
    let start = Position::new(
        left.x + left.width - 1,
        left.y + 1 + rng.rn2((left.height - 2) as u32) as i32,
    );
    let end = Position::new(
        right.x,
        right.y + 1 + rng.rn2((right.height - 2) as u32) as i32,
    );
    let mid_x = (start.x + end.x) / 2;

    let mut path = Vec::new();
    run(&mut path, start, Position::new(mid_x, start.y));
    run(&mut path, Position::new(mid_x, start.y), Position::new(mid_x, end.y));
    run(&mut path, Position::new(mid_x, end.y), end);
    path
}

/// Path from `upper` to the vertically adjacent `lower`
///
/// Leaves through `upper`'s south wall, enters through `lower`'s north wall.
pub fn vertical_path(upper: &Room, lower: &Room, rng: &mut GameRng) -> Vec<Position> {
    let start = Position::new(
        upper.x + 1 + rng.rn2((upper.width - 2) as u32) as i32,
        upper.y + upper.height - 1,
    );
    let end = Position::new(
        lower.x + 1 + rng.rn2((lower.width - 2) as u32) as i32,
        lower.y,
    );
    let mid_y = (start.y + end.y) / 2;

    let mut path = Vec::new();
    run(&mut path, start, Position::new(start.x, mid_y));
    run(&mut path, Position::new(start.x, mid_y), Position::new(end.x, mid_y));
    run(&mut path, Position::new(end.x, mid_y), end);
    path
}

/// Append a straight axis-aligned run, inclusive, skipping a repeated joint
fn run(path: &mut Vec<Position>, from: Position, to: Position) {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    let mut pos = from;
    loop {
        if path.last() != Some(&pos) {
            path.push(pos);
        }
        if pos == to {
            break;
        }
        pos = pos.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_contiguous(path: &[Position]) -> bool {
        path.windows(2).all(|w| w[0].distance(w[1]) == 1)
    }

    #[test]
    fn test_horizontal_path_shape() {
        let left = Room::new(0, 2, 2, 10, 6);
        let right = Room::new(1, 30, 3, 8, 5);
        let mut rng = GameRng::new(7);
        for _ in 0..50 {
            let path = horizontal_path(&left, &right, &mut rng);
            let first = path[0];
            let last = path[path.len() - 1];
            assert_eq!(first.x, 11);
            assert!(left.is_wall(first) && !left.contains(first));
            assert_eq!(last.x, 30);
            assert!(right.is_wall(last));
            assert!(is_contiguous(&path));
        }
    }

    #[test]
    fn test_vertical_path_shape() {
        let upper = Room::new(0, 3, 1, 9, 5);
        let lower = Room::new(3, 5, 10, 7, 6);
        let mut rng = GameRng::new(8);
        for _ in 0..50 {
            let path = vertical_path(&upper, &lower, &mut rng);
            assert_eq!(path[0].y, 5);
            assert_eq!(path[path.len() - 1].y, 10);
            assert!(upper.is_wall(path[0]));
            assert!(lower.is_wall(path[path.len() - 1]));
            assert!(is_contiguous(&path));
        }
    }

    #[test]
    fn test_other_end() {
        let corridor = Corridor::new(0, 3, 4, vec![]);
        assert_eq!(corridor.other_end(3), Some(4));
        assert_eq!(corridor.other_end(4), Some(3));
        assert_eq!(corridor.other_end(5), None);
        assert!(corridor.connects(4, 3));
    }

    #[test]
    fn test_door_slot() {
        let short = Corridor::new(0, 0, 1, vec![Position::new(1, 1), Position::new(2, 1)]);
        assert!(!short.can_hold_door());

        let points: Vec<_> = (0..5).map(|x| Position::new(x, 0)).collect();
        let long = Corridor::new(1, 0, 1, points);
        assert!(long.can_hold_door());
        assert_eq!(long.door_slot(), Some(Position::new(2, 0)));
    }
}
