//! Fog of war
//!
//! Recomputed every turn from the player's position. Inside a room the whole
//! room is lit; in a corridor sight comes from ray casting; anywhere else
//! only a small radius around the player is revealed.

use super::room::RoomId;
use super::tile::TileType;
use super::{Level, Position};

/// Angular step of a full ray burst, in degrees
pub const RAY_STEP_DEGREES: i32 = 5;
/// Burst range from each entrance of the player's room
pub const ENTRANCE_RAY_DISTANCE: i32 = 3;
/// Burst range from a corridor tile
pub const CORRIDOR_RAY_DISTANCE: i32 = 8;
/// Half-width of the cone cast into a room from its threshold
pub const CONE_HALF_ANGLE: i32 = 45;
pub const CONE_STEP_DEGREES: i32 = 2;
/// Reveal radius when the player is on neither a room nor a corridor
pub const FALLBACK_RADIUS: i32 = 2;

/// Recompute visible tiles for a player standing at `player`
pub fn update_visibility(level: &mut Level, player: Position) {
    level.clear_visibility();

    if let Some(room) = level.room_at(player).map(|r| r.id) {
        reveal_room(level, room);
        level.player_room = Some(room);
        let entrances = level.rooms[room].entrances.clone();
        for entrance in entrances {
            cast_burst(level, entrance, ENTRANCE_RAY_DISTANCE);
        }
    } else if let Some(corridor) = level.corridor_at_mut(player) {
        corridor.explored = true;
        cast_burst(level, player, CORRIDOR_RAY_DISTANCE);

        let thresholds: Vec<RoomId> = level
            .rooms
            .iter()
            .filter(|room| room.entrances.iter().any(|e| e.distance(player) <= 1))
            .map(|room| room.id)
            .collect();
        for room in thresholds {
            cast_cone_into_room(level, player, room);
        }
    } else {
        reveal_radius(level, player, FALLBACK_RADIUS);
    }
}

/// Light the full rectangle, walls included, and mark the room explored
pub fn reveal_room(level: &mut Level, room: RoomId) {
    let Some(r) = level.room_mut(room) else {
        return;
    };
    r.explored = true;
    let (x, y, width, height) = (r.x, r.y, r.width, r.height);
    for px in x..x + width {
        for py in y..y + height {
            level.mark_visible(Position::new(px, py));
        }
    }
}

/// Everything within a truncated Euclidean distance
pub fn reveal_radius(level: &mut Level, center: Position, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let distance = ((dx * dx + dy * dy) as f64).sqrt() as i32;
            if distance <= radius {
                level.mark_visible(center.offset(dx, dy));
            }
        }
    }
}

/// Rays all the way around `origin`
pub fn cast_burst(level: &mut Level, origin: Position, max_distance: i32) {
    for step in 0..360 / RAY_STEP_DEGREES {
        cast_ray(level, origin, (step * RAY_STEP_DEGREES) as f64, max_distance);
    }
}

/// Tile the ray is over after `i` unit steps
fn ray_point(origin: Position, angle: f64, i: i32) -> Position {
    let radians = angle.to_radians();
    origin.offset(
        (i as f64 * radians.cos()).round() as i32,
        (i as f64 * radians.sin()).round() as i32,
    )
}

/// One ray; stops off the map or just after lighting a wall
pub fn cast_ray(level: &mut Level, origin: Position, angle: f64, max_distance: i32) {
    for i in 0..=max_distance {
        let pos = ray_point(origin, angle, i);
        if !level.in_bounds(pos) {
            break;
        }
        level.mark_visible(pos);
        if level.tile_type(pos) == TileType::Wall {
            break;
        }
    }
}

/// Cone toward a room's center from just outside one of its entrances
pub fn cast_cone_into_room(level: &mut Level, origin: Position, room: RoomId) {
    let Some(r) = level.room(room) else {
        return;
    };
    let center = r.center();
    let bearing = ((center.y - origin.y) as f64)
        .atan2((center.x - origin.x) as f64)
        .to_degrees();
    for step in 0..=(2 * CONE_HALF_ANGLE / CONE_STEP_DEGREES) {
        let angle = bearing - CONE_HALF_ANGLE as f64 + (step * CONE_STEP_DEGREES) as f64;
        cast_ray_into_room(level, origin, angle, room);
    }
}

/// Like [`cast_ray`], but the target room's own walls do not stop it
fn cast_ray_into_room(level: &mut Level, origin: Position, angle: f64, room: RoomId) {
    let Some(r) = level.room(room) else {
        return;
    };
    let max_distance = r.width + r.height;
    let (x, y, width, height) = (r.x, r.y, r.width, r.height);
    let in_room = |p: Position| p.x >= x && p.x < x + width && p.y >= y && p.y < y + height;
    for i in 0..=max_distance {
        let pos = ray_point(origin, angle, i);
        if !level.in_bounds(pos) {
            break;
        }
        level.mark_visible(pos);
        if level.tile_type(pos) == TileType::Wall && !in_room(pos) {
            break;
        }
    }
}

impl Level {
    /// Recompute fog of war for the player's position
    pub fn update_visibility(&mut self, player: Position) {
        update_visibility(self, player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Corridor, Room};
    use crate::world::Difficulty;
    use crate::{S_FLOOR, S_VWALL};

    fn level_with_room(x: i32, y: i32, w: i32, h: i32) -> Level {
        let mut level = Level::new(1, 0, Difficulty::NORMAL);
        level.rooms.push(Room::new(0, x, y, w, h));
        for px in x..x + w {
            for py in y..y + h {
                let pos = Position::new(px, py);
                if level.rooms[0].contains(pos) {
                    level.set_tile(pos, TileType::Floor, S_FLOOR);
                } else {
                    level.set_tile(pos, TileType::Wall, S_VWALL);
                }
            }
        }
        level
    }

    fn visible_count(level: &Level) -> usize {
        level.tiles.iter().flatten().filter(|t| t.is_visible()).count()
    }

    #[test]
    fn test_room_reveal_is_whole_rectangle() {
        let mut level = level_with_room(10, 5, 8, 6);
        let center = level.rooms[0].center();
        update_visibility(&mut level, center);
        assert_eq!(visible_count(&level), 48);
        assert!(level.rooms[0].explored);
        assert_eq!(level.player_room, Some(0));
    }

    #[test]
    fn test_ray_stops_at_wall() {
        let mut level = Level::new(1, 0, Difficulty::NORMAL);
        for x in 0..10 {
            level.set_tile(Position::new(x, 5), TileType::Corridor, '#');
        }
        level.set_tile(Position::new(4, 5), TileType::Wall, S_VWALL);

        cast_ray(&mut level, Position::new(0, 5), 0.0, 8);
        assert!(level.is_visible(Position::new(3, 5)));
        assert!(level.is_visible(Position::new(4, 5)));
        assert!(!level.is_visible(Position::new(5, 5)));
    }

    #[test]
    fn test_ray_stops_at_map_edge() {
        let mut level = Level::new(1, 0, Difficulty::NORMAL);
        cast_ray(&mut level, Position::new(1, 1), 180.0, 8);
        assert!(level.is_visible(Position::new(0, 1)));
        assert_eq!(visible_count(&level), 2);
    }

    #[test]
    fn test_fallback_radius() {
        let mut level = Level::new(1, 0, Difficulty::NORMAL);
        update_visibility(&mut level, Position::new(40, 12));
        // Truncated distance admits the corners of the square
        assert!(level.is_visible(Position::new(42, 14)));
        assert!(!level.is_visible(Position::new(43, 12)));
        assert_eq!(visible_count(&level), 25);
    }

    #[test]
    fn test_visibility_cleared_each_update() {
        let mut level = level_with_room(10, 5, 8, 6);
        update_visibility(&mut level, Position::new(12, 7));
        update_visibility(&mut level, Position::new(60, 20));
        assert!(!level.is_visible(Position::new(12, 7)));
        assert!(level.is_explored(Position::new(12, 7)));
    }

    #[test]
    fn test_cone_reaches_far_wall() {
        let mut level = level_with_room(10, 5, 12, 6);
        // Corridor running up to the west wall
        let entrance = Position::new(10, 7);
        level.rooms[0].add_entrance(entrance);
        level.set_tile(entrance, TileType::Entrance, '\'');
        let mut points = Vec::new();
        for x in 4..=10 {
            let pos = Position::new(x, 7);
            points.push(pos);
            if x < 10 {
                level.set_tile(pos, TileType::Corridor, '#');
            }
        }
        level.corridors.push(Corridor::new(0, 0, 0, points));

        // One tile outside the entrance
        update_visibility(&mut level, Position::new(9, 7));
        assert!(level.corridors[0].explored);
        assert!(level.is_visible(Position::new(13, 7)));
        // Twelve tiles away: beyond the corridor burst, within the cone
        assert!(level.is_visible(Position::new(21, 7)));
    }
}
