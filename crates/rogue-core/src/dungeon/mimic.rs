//! Mimic placement
//!
//! Runs after the door/key puzzle on its own stream, so it never shifts key
//! placement. Mimics sit in non-start rooms looking like items.

use tracing::debug;

use super::{Level, Position};
use crate::monster::{Disguise, Enemy};
use crate::rng::GameRng;
use crate::world::GenerationOptions;

/// Depth-scaled mimic count, capped
pub fn mimic_count(level_number: u32, options: &GenerationOptions) -> u32 {
    if !options.mimics || level_number < options.mimic_min_level {
        return 0;
    }
    ((level_number + 1 - options.mimic_min_level) / 4).min(options.mimic_max)
}

/// Roll a mimic per non-start room until the count is reached
pub fn place_mimics(level: &mut Level, level_number: u32, seed: u64, options: &GenerationOptions) {
    let wanted = mimic_count(level_number, options);
    if wanted == 0 {
        return;
    }
    let mut rng = GameRng::new(seed);
    let mut placed = 0;

    for room in 0..level.rooms.len() {
        if placed >= wanted {
            break;
        }
        if level.rooms[room].is_start || rng.next_float() >= options.mimic_room_chance {
            continue;
        }

        let mut mimic = Enemy::mimic(level_number, Disguise::roll(&mut rng));
        let pos = level.rooms[room].random_floor_position(&mut GameRng::new(rng.next_seed()));
        if pos == level.exit_pos {
            continue;
        }
        mimic.apply_difficulty(level.difficulty);
        level.rooms[room].add_enemy(mimic.at(pos));
        placed += 1;
    }
    debug!(wanted, placed, "placed mimics");
}

/// Reveal the disguised mimic at `pos`, if any
pub fn reveal_mimic_at(level: &mut Level, pos: Position) -> bool {
    match level.enemy_at_mut(pos) {
        Some(enemy) if enemy.is_disguised() => {
            enemy.reveal();
            true
        }
        _ => false,
    }
}
