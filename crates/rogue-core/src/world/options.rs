//! Generation options
//!
//! Policies the generator applies on top of the fixed map structure.
//! Options can be read from an rc-style file:
//!
//! ```text
//! # comment
//! OPTIONS=doors,!mimics
//! OPTIONS=door_accept_chance:0.7,mimic_max:3
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// Tunable generation policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Lock some corridors behind colored doors with matching keys
    pub doors: bool,
    /// Place unlocked, colorless doors instead of a key puzzle
    pub cosmetic_doors: bool,
    /// Lowest level number that may receive doors
    pub door_min_level: u32,
    /// Chance that an eligible level receives doors at all
    pub door_level_chance: f64,
    /// Chance that a long enough corridor is accepted as a door candidate
    pub door_accept_chance: f64,
    /// Inclusive bounds on the number of doors to aim for
    pub door_target_min: u32,
    pub door_target_max: u32,

    /// Disguise some enemies as items
    pub mimics: bool,
    /// Lowest level number that may receive mimics
    pub mimic_min_level: u32,
    /// Upper bound on mimics per level
    pub mimic_max: u32,
    /// Per-room spawn chance
    pub mimic_room_chance: f64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            doors: true,
            cosmetic_doors: false,
            door_min_level: 3,
            door_level_chance: 0.5,
            door_accept_chance: 0.7,
            door_target_min: 2,
            door_target_max: 5,

            mimics: true,
            mimic_min_level: 5,
            mimic_max: 3,
            mimic_room_chance: 0.2,
        }
    }
}

impl GenerationOptions {
    /// Check ranges and probabilities
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("door_level_chance", self.door_level_chance),
            ("door_accept_chance", self.door_accept_chance),
            ("mimic_room_chance", self.mimic_room_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.door_target_min > self.door_target_max {
            return Err(ConfigError::InvertedRange {
                name: "door_target",
                min: self.door_target_min,
                max: self.door_target_max,
            });
        }
        Ok(())
    }

    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        options.validate()?;
        Ok(options)
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), ConfigError> {
        if let Some((key, value)) = opt.split_once(':') {
            return self.set_option(key.trim(), value.trim());
        }
        if let Some((key, value)) = opt.split_once('=') {
            return self.set_option(key.trim(), value.trim());
        }

        let (negated, name) = match opt.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, opt),
        };
        self.set_bool_option(name, !negated)
    }

    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), ConfigError> {
        match name {
            "doors" => self.doors = value,
            "cosmetic_doors" => self.cosmetic_doors = value,
            "mimics" => self.mimics = value,
            "" => {}
            _ => {
                // A valued option given without a value
                return if self.is_valued_option(name) {
                    Err(ConfigError::MissingValue(name.to_string()))
                } else {
                    Err(ConfigError::UnknownOption(name.to_string()))
                };
            }
        }
        Ok(())
    }

    fn is_valued_option(&self, name: &str) -> bool {
        matches!(
            name,
            "door_min_level"
                | "door_level_chance"
                | "door_accept_chance"
                | "door_target_min"
                | "door_target_max"
                | "mimic_min_level"
                | "mimic_max"
                | "mimic_room_chance"
        )
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "doors" | "cosmetic_doors" | "mimics" => {
                let flag = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(invalid()),
                };
                self.set_bool_option(name, flag)?;
            }
            "door_min_level" => self.door_min_level = value.parse().map_err(|_| invalid())?,
            "door_level_chance" => self.door_level_chance = value.parse().map_err(|_| invalid())?,
            "door_accept_chance" => {
                self.door_accept_chance = value.parse().map_err(|_| invalid())?
            }
            "door_target_min" => self.door_target_min = value.parse().map_err(|_| invalid())?,
            "door_target_max" => self.door_target_max = value.parse().map_err(|_| invalid())?,
            "mimic_min_level" => self.mimic_min_level = value.parse().map_err(|_| invalid())?,
            "mimic_max" => self.mimic_max = value.parse().map_err(|_| invalid())?,
            "mimic_room_chance" => self.mimic_room_chance = value.parse().map_err(|_| invalid())?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_config_string();
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Convert options to config file format
    pub fn to_config_string(&self) -> String {
        let flag = |on: bool, name: &str| {
            if on {
                name.to_string()
            } else {
                format!("!{}", name)
            }
        };

        let lines = [
            "# rogue generation options".to_string(),
            String::new(),
            "# Doors and keys".to_string(),
            format!(
                "OPTIONS={},{}",
                flag(self.doors, "doors"),
                flag(self.cosmetic_doors, "cosmetic_doors")
            ),
            format!(
                "OPTIONS=door_min_level:{},door_level_chance:{},door_accept_chance:{}",
                self.door_min_level, self.door_level_chance, self.door_accept_chance
            ),
            format!(
                "OPTIONS=door_target_min:{},door_target_max:{}",
                self.door_target_min, self.door_target_max
            ),
            String::new(),
            "# Mimics".to_string(),
            format!("OPTIONS={}", flag(self.mimics, "mimics")),
            format!(
                "OPTIONS=mimic_min_level:{},mimic_max:{},mimic_room_chance:{}",
                self.mimic_min_level, self.mimic_max, self.mimic_room_chance
            ),
        ];
        lines.join("\n") + "\n"
    }
}
