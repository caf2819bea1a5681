//! Structural constants for the dungeon map
//!
//! The map size and the 3x3 room grid are fixed: corner selection for the
//! start and exit rooms depends on the grid arity.

/// Map dimensions
pub const MAP_WIDTH: usize = 80;
pub const MAP_HEIGHT: usize = 26;

/// Room grid arity
pub const GRID_COLS: usize = 3;
pub const GRID_ROWS: usize = 3;
pub const ROOM_COUNT: usize = GRID_COLS * GRID_ROWS;

/// Size of one grid section (two map lines are reserved for the status bar)
pub const SECTION_WIDTH: usize = MAP_WIDTH / GRID_COLS;
pub const SECTION_HEIGHT: usize = (MAP_HEIGHT - 2) / GRID_ROWS;

/// Room outer rectangle bounds (walls included), signed like map coordinates
pub const MIN_ROOM_WIDTH: i32 = 6;
pub const MAX_ROOM_WIDTH: i32 = 12;
pub const MIN_ROOM_HEIGHT: i32 = 4;
pub const MAX_ROOM_HEIGHT: i32 = 6;

/// Grid indices of the four corner cells, row-major
pub const CORNER_ROOMS: [usize; 4] = [0, GRID_COLS - 1, ROOM_COUNT - GRID_COLS, ROOM_COUNT - 1];

/// Number of levels in a run
pub const MAX_LEVELS: usize = 21;

// Interior (rectangle minus the wall ring) must never be empty.
const _: () = assert!(MIN_ROOM_WIDTH >= 3 && MIN_ROOM_HEIGHT >= 3);
// Rooms keep one tile of padding inside their section on every side.
const _: () = assert!(MAX_ROOM_WIDTH as usize + 2 <= SECTION_WIDTH);
const _: () = assert!(MAX_ROOM_HEIGHT as usize + 2 <= SECTION_HEIGHT);
const _: () = assert!(MIN_ROOM_WIDTH <= MAX_ROOM_WIDTH && MIN_ROOM_HEIGHT <= MAX_ROOM_HEIGHT);
// Opposite-corner exit selection assumes a square 3x3 grid.
const _: () = assert!(GRID_COLS == 3 && GRID_ROWS == 3);

/// Map symbols
pub const S_EMPTY: char = ' ';
pub const S_FLOOR: char = '.';
pub const S_CORRIDOR: char = '#';
pub const S_ENTRANCE: char = '\'';
pub const S_EXIT: char = '%';
pub const S_DOOR: char = '+';
pub const S_TLCORN: char = '┌';
pub const S_TRCORN: char = '┐';
pub const S_BLCORN: char = '└';
pub const S_BRCORN: char = '┘';
pub const S_HWALL: char = '─';
pub const S_VWALL: char = '│';
