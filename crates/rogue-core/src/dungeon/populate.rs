//! Enemy and item population
//!
//! Enemy budgets grow with depth and difficulty; item budgets shrink with
//! depth and grow as difficulty drops. The start room is never populated.
//! Each placement position is drawn from a short-lived stream seeded off the
//! generation RNG, so position rolls never shift the budget rolls.

use tracing::debug;

use super::{Level, Position};
use crate::monster::Enemy;
use crate::object::Item;
use crate::rng::GameRng;
use crate::world::Difficulty;

/// Enemy budget before difficulty scaling
fn base_enemy_count(level_number: u32, rng: &mut GameRng) -> u32 {
    2 + level_number / 3 + rng.rn2(3)
}

/// Item budget before difficulty scaling
fn base_item_count(level_number: u32) -> u32 {
    8u32.saturating_sub(level_number / 4).max(2)
}

/// Interior position from a fresh sub-stream
fn roll_position(level: &Level, room: usize, rng: &mut GameRng) -> Position {
    let mut position_rng = GameRng::new(rng.next_seed());
    level.rooms[room].random_floor_position(&mut position_rng)
}

/// Spread enemies across non-start rooms until the budget runs out
///
/// A roll that lands on the exit tile is dropped, not retried.
pub fn place_enemies(
    level: &mut Level,
    level_number: u32,
    difficulty: Difficulty,
    rng: &mut GameRng,
) {
    let budget = difficulty.scale_enemy_count(base_enemy_count(level_number, rng));
    let mut placed = 0;

    for room in 0..level.rooms.len() {
        if level.rooms[room].is_start {
            continue;
        }
        let mut count = rng.rn2(3);
        if level.rooms[room].is_exit {
            count += 1;
        }

        for _ in 0..count {
            if placed >= budget {
                break;
            }
            let mut enemy = Enemy::roll_for_level(level_number, rng);
            let pos = roll_position(level, room, rng);
            if pos == level.exit_pos {
                continue;
            }
            enemy.apply_difficulty(difficulty);
            level.rooms[room].add_enemy(enemy.at(pos));
            placed += 1;
        }
    }
    debug!(budget, placed, "placed enemies");
}

/// One or two items per non-start room until the budget runs out
///
/// Rolls on the exit tile or on an occupied tile are dropped.
pub fn place_items(
    level: &mut Level,
    level_number: u32,
    difficulty: Difficulty,
    rng: &mut GameRng,
) {
    let budget = difficulty.scale_item_count(base_item_count(level_number));
    let mut placed = 0;

    for room in 0..level.rooms.len() {
        if level.rooms[room].is_start {
            continue;
        }
        let count = rng.rnd(2);

        for _ in 0..count {
            if placed >= budget {
                break;
            }
            let item = Item::roll_for_level(level_number, rng);
            let pos = roll_position(level, room, rng);
            if pos == level.exit_pos || level.rooms[room].item_at(pos).is_some() {
                continue;
            }
            level.rooms[room].add_item(item.at(pos));
            placed += 1;
        }
    }
    debug!(budget, placed, "placed items");
}
