//! Level generation
//!
//! One room per cell of a 3x3 grid, corridors between every pair of
//! grid-adjacent rooms, then start/exit selection, population, the optional
//! door/key puzzle and mimics. Everything is drawn from seeded streams so a
//! level is reproduced exactly from `(level_number, seed, difficulty)`.

use tracing::{debug, info};

use super::corridor::{horizontal_path, vertical_path, Corridor};
use super::room::Room;
use super::tile::TileType;
use super::{doors, mimic, populate, Level, Position};
use crate::rng::GameRng;
use crate::world::{Difficulty, GenerationOptions};
use crate::{
    CORNER_ROOMS, GRID_COLS, GRID_ROWS, MAX_ROOM_HEIGHT, MAX_ROOM_WIDTH, MIN_ROOM_HEIGHT,
    MIN_ROOM_WIDTH, ROOM_COUNT, S_BLCORN, S_BRCORN, S_CORRIDOR, S_ENTRANCE, S_EXIT, S_FLOOR,
    S_HWALL, S_TLCORN, S_TRCORN, S_VWALL, SECTION_HEIGHT, SECTION_WIDTH,
};

/// Generate a complete level
pub fn generate(
    level_number: u32,
    seed: u64,
    difficulty: Difficulty,
    options: &GenerationOptions,
) -> Level {
    let mut rng = GameRng::new(seed);
    let mut level = Level::new(level_number, seed, difficulty);

    generate_rooms(&mut level, &mut rng);
    connect_rooms(&mut level, &mut rng);
    stamp_rooms(&mut level);
    stamp_corridors(&mut level);
    select_special_rooms(&mut level, &mut rng);

    populate::place_enemies(&mut level, level_number, difficulty, &mut rng);
    populate::place_items(&mut level, level_number, difficulty, &mut rng);

    if level_number >= options.door_min_level && rng.next_float() < options.door_level_chance {
        let door_seed = seed.wrapping_add(1);
        if options.cosmetic_doors {
            doors::add_cosmetic_doors(&mut level, door_seed, options);
        } else if options.doors {
            doors::add_doors_and_keys(&mut level, door_seed, options);
        }
    }

    mimic::place_mimics(&mut level, level_number, seed.wrapping_add(2), options);

    info!(
        level = level_number,
        seed,
        difficulty = difficulty.value(),
        start = level.start_room,
        exit = level.exit_room,
        enemies = level.enemies().count(),
        items = level.items().count(),
        doors = level.doors().len(),
        "generated level"
    );
    level
}

/// Place one room per grid cell, row-major
fn generate_rooms(level: &mut Level, rng: &mut GameRng) {
    for grid_y in 0..GRID_ROWS {
        for grid_x in 0..GRID_COLS {
            let id = level.rooms.len();
            let room = generate_room(id, grid_x, grid_y, rng);
            level.rooms.push(room);
        }
    }
}

/// A room of random size at a random offset inside its section
fn generate_room(id: usize, grid_x: usize, grid_y: usize, rng: &mut GameRng) -> Room {
    let section_x = (grid_x * SECTION_WIDTH) as i32;
    let section_y = (grid_y * SECTION_HEIGHT) as i32;

    let width = MIN_ROOM_WIDTH + rng.rn2((MAX_ROOM_WIDTH - MIN_ROOM_WIDTH + 1) as u32) as i32;
    let height = MIN_ROOM_HEIGHT + rng.rn2((MAX_ROOM_HEIGHT - MIN_ROOM_HEIGHT + 1) as u32) as i32;

    // One tile of padding on each side of the section
    let slack_x = (SECTION_WIDTH as i32 - width - 2).max(1);
    let slack_y = (SECTION_HEIGHT as i32 - height - 2).max(1);
    let x = section_x + 1 + rng.rn2(slack_x as u32) as i32;
    let y = section_y + 1 + rng.rn2(slack_y as u32) as i32;

    Room::new(id, x, y, width, height).in_cell(grid_x, grid_y)
}

/// Connect every horizontally adjacent pair, then every vertically adjacent pair
fn connect_rooms(level: &mut Level, rng: &mut GameRng) {
    let mut pairs = Vec::new();
    for grid_y in 0..GRID_ROWS {
        for grid_x in 0..GRID_COLS - 1 {
            let a = grid_y * GRID_COLS + grid_x;
            pairs.push((a, a + 1, true));
        }
    }
    for grid_y in 0..GRID_ROWS - 1 {
        for grid_x in 0..GRID_COLS {
            let a = grid_y * GRID_COLS + grid_x;
            pairs.push((a, a + GRID_COLS, false));
        }
    }

    for (from, to, horizontal) in pairs {
        let points = if horizontal {
            horizontal_path(&level.rooms[from], &level.rooms[to], rng)
        } else {
            vertical_path(&level.rooms[from], &level.rooms[to], rng)
        };
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            level.rooms[from].add_entrance(first);
            level.rooms[to].add_entrance(last);
        }
        let id = level.corridors.len();
        level.corridors.push(Corridor::new(id, from, to, points));
    }
    debug!(corridors = level.corridors.len(), "connected rooms");
}

/// Wall ring and floor for every room
fn stamp_rooms(level: &mut Level) {
    let rects: Vec<_> = level
        .rooms
        .iter()
        .map(|r| (r.x, r.y, r.width, r.height))
        .collect();
    for (rx, ry, w, h) in rects {
        for x in rx..rx + w {
            for y in ry..ry + h {
                let pos = Position::new(x, y);
                match wall_symbol(x - rx, y - ry, w, h) {
                    Some(symbol) => level.set_tile(pos, TileType::Wall, symbol),
                    None => level.set_tile(pos, TileType::Floor, S_FLOOR),
                }
            }
        }
    }
}

/// Wall glyph for a rectangle-relative position, `None` for interior
fn wall_symbol(dx: i32, dy: i32, width: i32, height: i32) -> Option<char> {
    let top = dy == 0;
    let bottom = dy == height - 1;
    let left = dx == 0;
    let right = dx == width - 1;
    match (top, bottom, left, right) {
        (true, _, true, _) => Some(S_TLCORN),
        (true, _, _, true) => Some(S_TRCORN),
        (_, true, true, _) => Some(S_BLCORN),
        (_, true, _, true) => Some(S_BRCORN),
        (true, _, _, _) | (_, true, _, _) => Some(S_HWALL),
        (_, _, true, _) | (_, _, _, true) => Some(S_VWALL),
        _ => None,
    }
}

/// Corridors over the stamped rooms, never over floor
///
/// A point on a room's entrance list or on a wall becomes an entrance tile.
fn stamp_corridors(level: &mut Level) {
    let points: Vec<Position> = level
        .corridors
        .iter()
        .flat_map(|c| c.points.iter().copied())
        .collect();
    for pos in points {
        let typ = level.tile_type(pos);
        if typ == TileType::Floor || !level.in_bounds(pos) {
            continue;
        }
        let entrance = typ == TileType::Wall || level.rooms.iter().any(|r| r.is_entrance(pos));
        if entrance {
            level.set_tile(pos, TileType::Entrance, S_ENTRANCE);
        } else {
            level.set_tile(pos, TileType::Corridor, S_CORRIDOR);
        }
    }
}

/// Start in a random corner, exit in the opposite one, exit tile at its center
fn select_special_rooms(level: &mut Level, rng: &mut GameRng) {
    let start = rng.choose(&CORNER_ROOMS).copied().unwrap_or(0);
    let exit = ROOM_COUNT - 1 - start;

    level.start_room = start;
    level.exit_room = exit;
    level.rooms[start].is_start = true;
    level.rooms[exit].is_exit = true;

    level.exit_pos = level.rooms[exit].center();
    level.set_tile(level.exit_pos, TileType::Exit, S_EXIT);
}
