//! Door/key puzzles
//!
//! Doors are placed one at a time. Before a door is committed its key is put
//! in a room that is reachable from the start with that door's corridor
//! closed and every earlier door opened by its (already placed) key. Once all
//! doors are down, an independent key-collection simulation checks that the
//! exit can be reached; if it cannot, every door is unlocked and every key is
//! removed.

use hashbrown::HashSet;
use std::collections::VecDeque;
use tracing::{debug, warn};

use super::corridor::CorridorId;
use super::room::RoomId;
use super::tile::{DoorColor, DoorLock};
use super::Level;
use crate::object::{Item, ItemSubtype};
use crate::rng::GameRng;
use crate::world::GenerationOptions;

/// Attempts to keep a key off the exit tile
const KEY_PLACEMENT_RETRIES: usize = 10;

/// What the puzzle pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PuzzleOutcome {
    /// Doors committed
    pub placed: usize,
    /// The verification failed and all locks were stripped
    pub repaired: bool,
}

/// Number of doors to aim for
fn door_target(options: &GenerationOptions, rng: &mut GameRng) -> usize {
    let span = options.door_target_max.saturating_sub(options.door_target_min) + 1;
    (options.door_target_min + rng.rn2(span)) as usize
}

/// Corridor ids in random order
fn shuffled_corridors(level: &Level, rng: &mut GameRng) -> Vec<CorridorId> {
    let mut ids: Vec<CorridorId> = level.corridors.iter().map(|c| c.id).collect();
    rng.shuffle(&mut ids);
    ids
}

/// Long enough and passes the accept roll
fn accept_candidate(
    level: &Level,
    corridor: CorridorId,
    options: &GenerationOptions,
    rng: &mut GameRng,
) -> bool {
    if !level.corridors[corridor].can_hold_door() {
        return false;
    }
    rng.next_float() <= options.door_accept_chance
}

/// Colors are handed out in a fixed rotation, skipping used ones
struct ColorPicker {
    next: usize,
    used: HashSet<DoorColor>,
}

impl ColorPicker {
    fn new() -> Self {
        Self {
            next: 0,
            used: HashSet::new(),
        }
    }

    fn pick(&mut self, rng: &mut GameRng) -> DoorColor {
        for _ in 0..DoorColor::ALL.len() {
            let candidate = DoorColor::ALL[self.next % DoorColor::ALL.len()];
            self.next += 1;
            if !self.used.contains(&candidate) {
                return candidate;
            }
        }
        // All used: repeats allowed
        rng.choose(&DoorColor::ALL).copied().unwrap_or(DoorColor::Red)
    }

    fn mark_used(&mut self, color: DoorColor) {
        self.used.insert(color);
    }
}

/// Place locked doors with reachable keys, then verify and repair
pub fn add_doors_and_keys(
    level: &mut Level,
    seed: u64,
    options: &GenerationOptions,
) -> PuzzleOutcome {
    let mut rng = GameRng::new(seed);
    if level.start_room().is_none() {
        return PuzzleOutcome::default();
    }

    let target = door_target(options, &mut rng);
    let mut colors = ColorPicker::new();
    let mut placed = 0;

    for corridor in shuffled_corridors(level, &mut rng) {
        if placed >= target {
            break;
        }
        if !accept_candidate(level, corridor, options, &mut rng) {
            continue;
        }
        let color = colors.pick(&mut rng);
        let Some(door_pos) = level.corridors[corridor].door_slot() else {
            continue;
        };

        // Where the key can go: everything reachable with this corridor still
        // closed and every earlier door opened by its key.
        let candidates = rooms_reachable_before(level, corridor);
        let Some(&key_room) = rng.choose(&candidates) else {
            debug!(corridor, "no reachable room for key, skipping door");
            continue;
        };

        let room = &level.rooms[key_room];
        let mut key_pos = room.random_floor_position(&mut GameRng::new(rng.next_seed()));
        for _ in 0..KEY_PLACEMENT_RETRIES {
            if key_pos != level.exit_pos {
                break;
            }
            key_pos = room.random_floor_position(&mut GameRng::new(rng.next_seed()));
        }

        level.place_door(corridor, door_pos, DoorLock::locked(color));
        level.rooms[key_room].add_item(Item::key(color).at(key_pos));
        colors.mark_used(color);
        placed += 1;
        debug!(corridor, %color, key_room, "placed locked door");
    }

    let repaired = !verify_solvable(level);
    if repaired {
        warn!(
            level = level.number,
            doors = placed,
            "door puzzle unsolvable, unlocking all doors and removing keys"
        );
        strip_locks(level);
    }
    PuzzleOutcome { placed, repaired }
}

/// Place unlocked, colorless doors on the same kind of candidates
pub fn add_cosmetic_doors(level: &mut Level, seed: u64, options: &GenerationOptions) -> usize {
    let mut rng = GameRng::new(seed);
    let target = door_target(options, &mut rng);
    let mut placed = 0;

    for corridor in shuffled_corridors(level, &mut rng) {
        if placed >= target {
            break;
        }
        if !accept_candidate(level, corridor, options, &mut rng) {
            continue;
        }
        if let Some(pos) = level.corridors[corridor].door_slot() {
            level.place_door(corridor, pos, DoorLock::cosmetic());
            placed += 1;
        }
    }
    debug!(placed, "placed cosmetic doors");
    placed
}

/// Rooms reachable from the start while `closed` is blocked
///
/// Doors already on the level count as open, since their keys were placed
/// before them. The start room always comes first.
fn rooms_reachable_before(level: &Level, closed: CorridorId) -> Vec<RoomId> {
    traverse(level, |corridor| corridor != closed)
}

/// Breadth-first room order from the start room
///
/// `passable` decides whether a corridor may be crossed.
fn traverse<F>(level: &Level, passable: F) -> Vec<RoomId>
where
    F: Fn(CorridorId) -> bool,
{
    let mut order = vec![level.start_room];
    let mut seen: HashSet<RoomId> = HashSet::from_iter([level.start_room]);
    let mut queue = VecDeque::from([level.start_room]);

    while let Some(room) = queue.pop_front() {
        for (next, corridor) in level.adjacent_rooms(room) {
            if seen.contains(&next) || !passable(corridor) {
                continue;
            }
            seen.insert(next);
            order.push(next);
            queue.push_back(next);
        }
    }
    order
}

/// Rooms a player can reach by collecting keys as they go
///
/// Repeats the traversal until no new key turns up, so a key found late
/// still opens doors next to rooms visited earlier.
pub fn reachable_with_keys(level: &Level) -> Vec<RoomId> {
    let mut keys: HashSet<ItemSubtype> = HashSet::new();
    loop {
        let rooms = traverse(level, |corridor| {
            level
                .corridor_doors(corridor)
                .iter()
                .all(|door| !door.locked || door.key.is_some_and(|k| keys.contains(&k)))
        });
        let before = keys.len();
        for &room in &rooms {
            keys.extend(
                level.rooms[room]
                    .items
                    .iter()
                    .filter(|i| i.is_key())
                    .filter_map(|i| i.subtype),
            );
        }
        if keys.len() == before {
            return rooms;
        }
    }
}

/// The exit room can be reached under correct play
pub fn verify_solvable(level: &Level) -> bool {
    if level.start_room().is_none() || level.exit_room().is_none() {
        return true;
    }
    reachable_with_keys(level).contains(&level.exit_room)
}

/// Unlock every door and remove every key
pub fn strip_locks(level: &mut Level) {
    let doors: Vec<_> = level.doors().into_iter().map(|d| d.position).collect();
    for pos in doors {
        level.set_door_locked(pos, false);
    }
    for room in &mut level.rooms {
        room.items.retain(|item| !item.is_key());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Corridor, Position, Room};
    use crate::world::Difficulty;

    /// Three rooms in a row: 0 - 1 - 2, start 0, exit 2
    fn chain() -> Level {
        let mut level = Level::new(5, 0, Difficulty::NORMAL);
        for id in 0..3 {
            level.rooms.push(Room::new(id, 2 + id as i32 * 26, 2, 10, 6));
        }
        for id in 0..2 {
            let from = &level.rooms[id];
            let y = from.y + 2;
            let points: Vec<_> = (from.x + from.width - 1..=from.x + 26)
                .map(|x| Position::new(x, y))
                .collect();
            level.corridors.push(Corridor::new(id, id, id + 1, points));
        }
        level.start_room = 0;
        level.exit_room = 2;
        level.rooms[0].is_start = true;
        level.rooms[2].is_exit = true;
        level.exit_pos = level.rooms[2].center();
        level
    }

    fn lock(level: &mut Level, corridor: usize, color: DoorColor) {
        let pos = level.corridors[corridor].door_slot().unwrap();
        level.place_door(corridor, pos, DoorLock::locked(color));
    }

    fn put_key(level: &mut Level, room: usize, color: DoorColor) {
        let pos = level.rooms[room].center();
        level.rooms[room].add_item(Item::key(color).at(pos));
    }

    #[test]
    fn test_open_level_is_solvable() {
        assert!(verify_solvable(&chain()));
    }

    #[test]
    fn test_key_before_door_is_solvable() {
        let mut level = chain();
        lock(&mut level, 1, DoorColor::Red);
        put_key(&mut level, 0, DoorColor::Red);
        assert!(verify_solvable(&level));
    }

    #[test]
    fn test_key_behind_own_door_is_unsolvable() {
        let mut level = chain();
        lock(&mut level, 1, DoorColor::Red);
        put_key(&mut level, 2, DoorColor::Red);
        assert!(!verify_solvable(&level));
    }

    #[test]
    fn test_chained_keys() {
        let mut level = chain();
        lock(&mut level, 0, DoorColor::Red);
        lock(&mut level, 1, DoorColor::Blue);
        put_key(&mut level, 0, DoorColor::Red);
        put_key(&mut level, 1, DoorColor::Blue);
        assert!(verify_solvable(&level));
        assert_eq!(reachable_with_keys(&level), vec![0, 1, 2]);
    }

    #[test]
    fn test_strip_locks() {
        let mut level = chain();
        lock(&mut level, 1, DoorColor::Green);
        put_key(&mut level, 2, DoorColor::Green);
        strip_locks(&mut level);
        assert!(level.doors().iter().all(|d| !d.locked));
        assert_eq!(level.keys().count(), 0);
        assert!(verify_solvable(&level));
        // Door tiles remain, unlocked
        assert_eq!(level.doors().len(), 1);
    }

    #[test]
    fn test_candidate_corridor_is_closed_for_key_search() {
        let level = chain();
        assert_eq!(rooms_reachable_before(&level, 1), vec![0, 1]);
        assert_eq!(rooms_reachable_before(&level, 0), vec![0]);
    }

    #[test]
    fn test_puzzle_always_solvable() {
        let options = GenerationOptions {
            door_accept_chance: 1.0,
            ..GenerationOptions::default()
        };
        for seed in 0..50 {
            let mut level = chain();
            let outcome = add_doors_and_keys(&mut level, seed, &options);
            assert!(verify_solvable(&level));
            let locked = level.doors().iter().filter(|d| d.locked).count();
            if outcome.repaired {
                assert_eq!(locked, 0);
                assert_eq!(level.keys().count(), 0);
            } else {
                assert_eq!(level.keys().count(), outcome.placed);
            }
            assert!(outcome.placed <= 2);
        }
    }

    #[test]
    fn test_short_corridors_get_no_doors() {
        let mut level = chain();
        for corridor in &mut level.corridors {
            corridor.points.truncate(2);
        }
        let options = GenerationOptions {
            door_accept_chance: 1.0,
            ..GenerationOptions::default()
        };
        let outcome = add_doors_and_keys(&mut level, 1, &options);
        assert_eq!(outcome, PuzzleOutcome { placed: 0, repaired: false });
        assert_eq!(level.keys().count(), 0);
        assert!(level.doors().is_empty());
        assert!(verify_solvable(&level));
    }

    #[test]
    fn test_color_rotation() {
        let mut rng = GameRng::new(0);
        let mut picker = ColorPicker::new();
        for expected in DoorColor::ALL {
            let color = picker.pick(&mut rng);
            assert_eq!(color, expected);
            picker.mark_used(color);
        }
        // Exhausted: any color
        assert!(DoorColor::ALL.contains(&picker.pick(&mut rng)));
    }

    #[test]
    fn test_cosmetic_doors_are_unlocked() {
        let options = GenerationOptions {
            door_accept_chance: 1.0,
            ..GenerationOptions::default()
        };
        let mut level = chain();
        let placed = add_cosmetic_doors(&mut level, 3, &options);
        assert_eq!(placed, 2);
        assert!(level.doors().iter().all(|d| !d.locked && d.color.is_none()));
        assert_eq!(level.keys().count(), 0);
    }

    /// Room holding the key that opens `door`
    fn key_room(level: &Level, door: &crate::dungeon::Door) -> Option<RoomId> {
        level
            .keys()
            .find(|(_, key)| key.subtype == door.key)
            .map(|(room, _)| room)
    }

    #[test]
    fn test_key_reachable_with_own_door_closed() {
        let options = GenerationOptions {
            door_accept_chance: 1.0,
            door_target_min: 1,
            door_target_max: 1,
            ..GenerationOptions::default()
        };
        for seed in 0..200 {
            let mut level = chain();
            let outcome = add_doors_and_keys(&mut level, seed, &options);
            assert_eq!(outcome.placed, 1);
            assert!(!outcome.repaired);

            let doors = level.doors();
            assert_eq!(doors.len(), 1);
            let door = &doors[0];
            assert!(door.locked);
            let room = key_room(&level, door).unwrap();
            assert!(rooms_reachable_before(&level, door.corridor).contains(&room));
        }
    }

    #[test]
    fn test_generated_key_reachable_with_own_door_closed() {
        let options = GenerationOptions {
            door_level_chance: 1.0,
            door_accept_chance: 1.0,
            door_target_min: 1,
            door_target_max: 1,
            ..GenerationOptions::default()
        };
        let mut checked = 0;
        for seed in 0..100 {
            let level = crate::dungeon::generate(10, seed, Difficulty::NORMAL, &options);
            let doors = level.doors();
            assert!(doors.len() <= 1);
            let Some(door) = doors.first() else {
                continue;
            };
            assert!(door.locked);
            let room = key_room(&level, door).unwrap();
            assert!(rooms_reachable_before(&level, door.corridor).contains(&room));
            assert!(verify_solvable(&level));
            checked += 1;
        }
        assert!(checked > 0);
    }
}
