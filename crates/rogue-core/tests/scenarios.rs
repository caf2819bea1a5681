//! Fixed-seed scenarios over the public API

use rogue_core::dungeon::{doors, mimic, TileType};
use rogue_core::{
    generate, Difficulty, GenerationOptions, Level, Position, RunSeeds, CORNER_ROOMS, MAX_LEVELS,
    ROOM_COUNT,
};

fn level(number: u32, seed: u64) -> Level {
    generate(number, seed, Difficulty::NORMAL, &GenerationOptions::default())
}

#[test]
fn test_seed_42_level_6() {
    let level = level(6, 42);
    assert_eq!(level.rooms.len(), ROOM_COUNT);
    assert!(CORNER_ROOMS.contains(&level.start_room));
    assert_eq!(level.start_room + level.exit_room, ROOM_COUNT - 1);
    assert_eq!(level.tile_type(level.exit_pos), TileType::Exit);
    assert!(level.rooms[level.exit_room].contains(level.exit_pos));

    // 3x3 grid: 6 horizontal and 6 vertical links
    assert_eq!(level.corridors.len(), 12);
    assert!(doors::verify_solvable(&level));
    assert!(doors::reachable_with_keys(&level).contains(&level.exit_room));
    for room in 0..ROOM_COUNT {
        assert!(!level.adjacent_rooms(room).is_empty());
    }
}

#[test]
fn test_early_levels_have_no_doors_or_mimics() {
    for seed in 0..20 {
        let level = level(2, seed);
        assert!(level.doors().is_empty());
        assert_eq!(level.keys().count(), 0);
        assert!(level.enemies().all(|e| !e.is_mimic()));
    }
}

#[test]
fn test_mimics_appear_from_level_eight() {
    let options = GenerationOptions::default();
    assert_eq!(mimic::mimic_count(7, &options), 0);
    assert_eq!(mimic::mimic_count(8, &options), 1);
    assert_eq!(mimic::mimic_count(21, &options), 3);

    let options = GenerationOptions {
        mimic_room_chance: 1.0,
        ..GenerationOptions::default()
    };
    let level = generate(12, 5, Difficulty::NORMAL, &options);
    let mimics: Vec<_> = level.enemies().filter(|e| e.is_mimic()).collect();
    assert_eq!(mimics.len(), 2);
    assert!(mimics.iter().all(|m| m.is_disguised()));
}

#[test]
fn test_render_hides_unexplored_tiles() {
    let mut level = level(3, 9);
    assert!(level.render(false).trim().is_empty());

    let start = level.rooms[level.start_room].center();
    level.update_visibility(start);
    let partial = level.render(false);
    let full = level.render(true);
    assert!(!partial.trim().is_empty());
    assert_ne!(partial, full);
    assert!(full.contains('%'));
}

#[test]
fn test_level_survives_json() {
    let mut level = level(9, 1234);
    level.update_visibility(level.rooms[level.start_room].center());
    let json = serde_json::to_string(&level).unwrap();
    let restored: Level = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, level);
}

#[test]
fn test_run_regenerates_every_level() {
    let run = RunSeeds::new(2024);
    assert_eq!(run.len(), MAX_LEVELS);
    for number in 1..=MAX_LEVELS as u32 {
        let seed = run.seed_for(number).unwrap();
        let a = run.generate(number, Difficulty::new(1.2), &GenerationOptions::default());
        let b = generate(number, seed, Difficulty::new(1.2), &GenerationOptions::default());
        assert_eq!(a, Some(b));
    }
}

#[test]
fn test_walking_a_corridor_reveals_it() {
    let mut level = level(4, 77);
    let corridor = level.corridors[0].clone();
    let mid = corridor.points[corridor.points.len() / 2];
    level.update_visibility(mid);
    assert!(level.corridors[0].explored);
    assert!(level.is_visible(mid));
    assert!(level.is_explored(mid));
    assert_eq!(level.player_room, None);

    level.update_visibility(Position::new(0, 0));
    assert!(!level.is_visible(mid));
    assert!(level.is_explored(mid));
}
