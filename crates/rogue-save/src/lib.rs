//! rogue-save: save/resume for rogue runs
//!
//! Levels are never written to disk. A save holds the session, the seed of
//! the active level and the seed table of the whole run; resuming
//! regenerates the level from those seeds.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use rogue_core::{Difficulty, GenerationOptions, Level, Position, RunSeeds};

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,

    #[error("Level {level} has no entry in the seed table ({seeds} seeds)")]
    LevelOutOfRange { level: u32, seeds: usize },

    #[error("Level seed {found} does not match seed table entry {expected} for level {level}")]
    SeedMismatch { level: u32, expected: u64, found: u64 },
}

/// Save file header for versioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Timestamp of save
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "RGRS";

    pub fn new() -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

impl Default for SaveHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Character and progress state carried between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub player_name: String,
    /// 1-based dungeon level
    pub level_number: u32,
    pub difficulty: Difficulty,
    pub player_position: Position,
    pub turns: u64,
}

impl Session {
    pub fn new(player_name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            player_name: player_name.into(),
            level_number: 1,
            difficulty,
            player_position: Position::default(),
            turns: 0,
        }
    }
}

/// Complete save file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRecord {
    pub header: SaveHeader,
    pub session: Session,
    /// Seed of the active level
    pub level_seed: u64,
    /// Seeds of every level in the run
    pub all_level_seeds: RunSeeds,
}

impl SaveRecord {
    /// Snapshot a session on the level it is currently on
    pub fn new(session: Session, seeds: RunSeeds) -> Result<Self, SaveError> {
        let level_seed = seeds
            .seed_for(session.level_number)
            .ok_or(SaveError::LevelOutOfRange {
                level: session.level_number,
                seeds: seeds.len(),
            })?;
        Ok(Self {
            header: SaveHeader::new(),
            session,
            level_seed,
            all_level_seeds: seeds,
        })
    }

    /// Header is current and the active seed agrees with the table
    pub fn validate(&self) -> Result<(), SaveError> {
        self.header.validate()?;
        let level = self.session.level_number;
        let expected = self
            .all_level_seeds
            .seed_for(level)
            .ok_or(SaveError::LevelOutOfRange {
                level,
                seeds: self.all_level_seeds.len(),
            })?;
        if expected != self.level_seed {
            return Err(SaveError::SeedMismatch {
                level,
                expected,
                found: self.level_seed,
            });
        }
        Ok(())
    }

    /// Rebuild the active level
    pub fn regenerate(&self, options: &GenerationOptions) -> Level {
        rogue_core::generate(
            self.session.level_number,
            self.level_seed,
            self.session.difficulty,
            options,
        )
    }

    /// Move the session to another level of the same run
    pub fn descend_to(&mut self, level_number: u32) -> Result<(), SaveError> {
        let seed = self
            .all_level_seeds
            .seed_for(level_number)
            .ok_or(SaveError::LevelOutOfRange {
                level: level_number,
                seeds: self.all_level_seeds.len(),
            })?;
        self.session.level_number = level_number;
        self.level_seed = seed;
        Ok(())
    }
}

/// Save a record to a file
pub fn save_game(record: &SaveRecord, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, record)?;
    info!(
        path = %path.as_ref().display(),
        level = record.session.level_number,
        "saved game"
    );
    Ok(())
}

/// Load and validate a record
pub fn load_game(path: impl AsRef<Path>) -> Result<SaveRecord, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let record: SaveRecord = serde_json::from_reader(reader)?;

    record.validate()?;
    Ok(record)
}

/// Load a record and rebuild its active level
pub fn resume_game(
    path: impl AsRef<Path>,
    options: &GenerationOptions,
) -> Result<(SaveRecord, Level), SaveError> {
    let record = load_game(path)?;
    let level = record.regenerate(options);
    Ok((record, level))
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Get the default save path for a player name
pub fn default_save_path(player_name: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("rogue");
    path.push("saves");
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{}.json", player_name));
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SaveRecord {
        let mut session = Session::new("tester", Difficulty::new(1.2));
        session.level_number = 4;
        session.player_position = Position::new(10, 5);
        session.turns = 321;
        SaveRecord::new(session, RunSeeds::new(99)).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("rogue_test_save.json");

        let record = record();
        save_game(&record, &path).unwrap();
        assert!(save_exists(&path));

        let loaded = load_game(&path).unwrap();
        assert_eq!(loaded.session, record.session);
        assert_eq!(loaded.level_seed, record.level_seed);
        assert_eq!(loaded.all_level_seeds, record.all_level_seeds);

        delete_save(&path).unwrap();
        assert!(!save_exists(&path));
    }

    #[test]
    fn test_resume_regenerates_same_level() {
        let path = std::env::temp_dir().join("rogue_test_resume.json");
        let options = GenerationOptions::default();

        let record = record();
        let before = record.regenerate(&options);
        save_game(&record, &path).unwrap();

        let (loaded, after) = resume_game(&path, &options).unwrap();
        assert_eq!(loaded.session.level_number, 4);
        assert_eq!(before, after);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_header_validation() {
        let header = SaveHeader::new();
        assert!(header.validate().is_ok());

        let mut bad_header = header.clone();
        bad_header.magic = "XXXX".to_string();
        assert!(matches!(
            bad_header.validate(),
            Err(SaveError::InvalidHeader)
        ));

        let mut old_header = header;
        old_header.version = 999;
        assert!(matches!(
            old_header.validate(),
            Err(SaveError::IncompatibleVersion { .. })
        ));
    }

    #[test]
    fn test_seed_mismatch_rejected() {
        let mut record = record();
        record.level_seed = record.level_seed.wrapping_add(1);
        assert!(matches!(
            record.validate(),
            Err(SaveError::SeedMismatch { level: 4, .. })
        ));
    }

    #[test]
    fn test_level_outside_table_rejected() {
        let mut session = Session::new("tester", Difficulty::NORMAL);
        session.level_number = 3;
        let result = SaveRecord::new(session, RunSeeds::from_seeds(vec![1, 2]));
        assert!(matches!(
            result,
            Err(SaveError::LevelOutOfRange { level: 3, seeds: 2 })
        ));

        let mut record = record();
        assert!(record.descend_to(22).is_err());
        record.descend_to(5).unwrap();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_game("/nonexistent/path/save.json");
        assert!(matches!(result, Err(SaveError::NotFound)));
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json["all_level_seeds"].is_array());
        assert!(json["level_seed"].is_u64());
        assert_eq!(json["session"]["turns"], 321);
    }
}
