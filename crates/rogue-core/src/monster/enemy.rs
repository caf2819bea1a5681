//! Enemy instances
//!
//! Base stats grow with the level number. The spawn roll is weighted per
//! depth band so tougher kinds become more common further down.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::{Direction, Position};
use crate::object::{Color, ItemClass};
use crate::rng::GameRng;
use crate::world::Difficulty;

/// Enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum EnemyKind {
    Zombie,
    Vampire,
    Ghost,
    Ogre,
    SnakeMage,
    Mimic,
}

/// Cumulative spawn thresholds (roll in 0..100) per depth band
const SPAWN_BANDS: [&[(u32, EnemyKind)]; 4] = [
    // levels 1-4
    &[
        (50, EnemyKind::Zombie),
        (80, EnemyKind::Ghost),
        (100, EnemyKind::Vampire),
    ],
    // levels 5-9
    &[
        (30, EnemyKind::Zombie),
        (50, EnemyKind::Ghost),
        (75, EnemyKind::Vampire),
        (100, EnemyKind::SnakeMage),
    ],
    // levels 10-14
    &[
        (20, EnemyKind::Zombie),
        (35, EnemyKind::Ghost),
        (55, EnemyKind::Vampire),
        (80, EnemyKind::SnakeMage),
        (100, EnemyKind::Ogre),
    ],
    // levels 15+
    &[
        (15, EnemyKind::Zombie),
        (25, EnemyKind::Ghost),
        (45, EnemyKind::Vampire),
        (70, EnemyKind::SnakeMage),
        (100, EnemyKind::Ogre),
    ],
];

impl EnemyKind {
    /// Pick the kind for a roll in 0..100 at the given level
    pub fn from_roll(level_number: u32, roll: u32) -> EnemyKind {
        let band = match level_number {
            0..5 => SPAWN_BANDS[0],
            5..10 => SPAWN_BANDS[1],
            10..15 => SPAWN_BANDS[2],
            _ => SPAWN_BANDS[3],
        };
        band.iter()
            .find(|(threshold, _)| roll < *threshold)
            .map(|&(_, kind)| kind)
            .unwrap_or(EnemyKind::Ogre)
    }

    /// True glyph (what a revealed mimic shows)
    pub const fn symbol(self) -> char {
        match self {
            EnemyKind::Zombie => 'z',
            EnemyKind::Vampire => 'v',
            EnemyKind::Ghost => 'g',
            EnemyKind::Ogre => 'O',
            EnemyKind::SnakeMage => 's',
            EnemyKind::Mimic => 'm',
        }
    }

    pub const fn color(self) -> Color {
        match self {
            EnemyKind::Zombie => Color::Green,
            EnemyKind::Vampire => Color::Red,
            EnemyKind::Ghost => Color::White,
            EnemyKind::Ogre => Color::Yellow,
            EnemyKind::SnakeMage => Color::White,
            EnemyKind::Mimic => Color::White,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            EnemyKind::Zombie => "Zombie",
            EnemyKind::Vampire => "Vampire",
            EnemyKind::Ghost => "Ghost",
            EnemyKind::Ogre => "Ogre",
            EnemyKind::SnakeMage => "Snake-Mage",
            EnemyKind::Mimic => "Mimic",
        }
    }

    /// Base (health, dexterity, strength, hostility) at a level
    const fn stats(self, level: i32) -> (i32, i32, i32, i32) {
        match self {
            EnemyKind::Zombie => (20 + level * 3, 5, 8 + level, 5),
            EnemyKind::Vampire => (15 + level * 2, 12 + level, 7 + level, 8),
            EnemyKind::Ghost => (8 + level, 14 + level, 4 + level / 2, 4),
            EnemyKind::Ogre => (30 + level * 4, 4, 15 + level * 2, 6),
            EnemyKind::SnakeMage => (12 + level * 2, 16 + level, 6 + level, 7),
            EnemyKind::Mimic => (18 + level * 2, 12 + level, 5 + level / 2, 3),
        }
    }
}

/// The item a mimic pretends to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disguise {
    pub class: ItemClass,
    pub symbol: char,
    pub color: Color,
}

impl Disguise {
    pub const fn new(class: ItemClass) -> Self {
        Self {
            class,
            symbol: class.symbol(),
            color: class.color(),
        }
    }

    /// Disguise roll: treasure 40%, weapon 20%, scroll 20%, elixir 20%
    pub fn roll(rng: &mut GameRng) -> Self {
        let class = match rng.rn2(100) {
            0..40 => ItemClass::Treasure,
            40..60 => ItemClass::Weapon,
            60..80 => ItemClass::Scroll,
            _ => ItemClass::Elixir,
        };
        Self::new(class)
    }
}

/// A hostile creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub name: String,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub dexterity: i32,
    pub strength: i32,
    /// Detection range
    pub hostility: i32,
    pub symbol: char,
    pub color: Color,
    pub aggro: bool,
    /// Snake-mage diagonal heading
    pub heading: Option<Direction>,
    /// Mimic disguise, kept after reveal for reference
    pub disguise: Option<Disguise>,
    pub revealed: bool,
}

impl Enemy {
    /// Build an enemy of the given kind with stats for a level
    pub fn new(kind: EnemyKind, level_number: u32) -> Self {
        let (health, dexterity, strength, hostility) = kind.stats(level_number as i32);
        Self {
            kind,
            name: kind.name().to_string(),
            position: Position::default(),
            health,
            max_health: health,
            dexterity,
            strength,
            hostility,
            symbol: kind.symbol(),
            color: kind.color(),
            aggro: false,
            heading: None,
            disguise: None,
            revealed: kind != EnemyKind::Mimic,
        }
    }

    /// Weighted roll for a level, drawing every choice from `rng`
    pub fn roll_for_level(level_number: u32, rng: &mut GameRng) -> Self {
        let kind = EnemyKind::from_roll(level_number, rng.rn2(100));
        let mut enemy = Self::new(kind, level_number);
        if kind == EnemyKind::SnakeMage {
            enemy.heading = rng.choose(&Direction::DIAGONALS).copied();
        }
        enemy
    }

    /// A mimic wearing the given disguise
    pub fn mimic(level_number: u32, disguise: Disguise) -> Self {
        let mut enemy = Self::new(EnemyKind::Mimic, level_number);
        enemy.disguise = Some(disguise);
        enemy.symbol = disguise.symbol;
        enemy.color = disguise.color;
        enemy
    }

    /// Place at a position (builder style)
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Scale health and strength by the difficulty modifier
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.health = difficulty.scale_stat(self.health);
        self.max_health = self.health;
        self.strength = difficulty.scale_stat(self.strength);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health = (self.health - damage).max(0);
    }

    pub fn is_mimic(&self) -> bool {
        self.kind == EnemyKind::Mimic
    }

    /// Unrevealed mimic still posing as an item
    pub fn is_disguised(&self) -> bool {
        self.is_mimic() && !self.revealed
    }

    /// Drop the disguise for good (on attacking or being attacked)
    pub fn reveal(&mut self) {
        if self.is_mimic() {
            self.revealed = true;
            self.symbol = EnemyKind::Mimic.symbol();
            self.color = EnemyKind::Mimic.color();
        }
    }

    pub fn display_symbol(&self) -> char {
        match self.disguise {
            Some(disguise) if self.is_disguised() => disguise.symbol,
            _ => self.symbol,
        }
    }

    pub fn display_color(&self) -> Color {
        match self.disguise {
            Some(disguise) if self.is_disguised() => disguise.color,
            _ => self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(EnemyKind::from_roll(1, 0), EnemyKind::Zombie);
        assert_eq!(EnemyKind::from_roll(1, 49), EnemyKind::Zombie);
        assert_eq!(EnemyKind::from_roll(1, 50), EnemyKind::Ghost);
        assert_eq!(EnemyKind::from_roll(4, 99), EnemyKind::Vampire);
        assert_eq!(EnemyKind::from_roll(5, 99), EnemyKind::SnakeMage);
        assert_eq!(EnemyKind::from_roll(12, 85), EnemyKind::Ogre);
        assert_eq!(EnemyKind::from_roll(20, 14), EnemyKind::Zombie);
        assert_eq!(EnemyKind::from_roll(20, 70), EnemyKind::Ogre);
    }

    #[test]
    fn test_no_ogres_before_level_ten() {
        for level in 1..10 {
            for roll in 0..100 {
                assert_ne!(EnemyKind::from_roll(level, roll), EnemyKind::Ogre);
            }
        }
    }

    #[test]
    fn test_stats_scale_with_level() {
        let shallow = Enemy::new(EnemyKind::Zombie, 1);
        let deep = Enemy::new(EnemyKind::Zombie, 10);
        assert_eq!(shallow.health, 23);
        assert_eq!(deep.health, 50);
        assert!(deep.strength > shallow.strength);
    }

    #[test]
    fn test_snake_mage_gets_diagonal_heading() {
        let mut rng = GameRng::new(1);
        for _ in 0..200 {
            let enemy = Enemy::roll_for_level(8, &mut rng);
            match enemy.kind {
                EnemyKind::SnakeMage => assert!(enemy.heading.is_some_and(|d| d.is_diagonal())),
                _ => assert!(enemy.heading.is_none()),
            }
        }
    }

    #[test]
    fn test_mimic_disguise_and_reveal() {
        let mut mimic = Enemy::mimic(6, Disguise::new(ItemClass::Scroll));
        assert!(mimic.is_disguised());
        assert_eq!(mimic.display_symbol(), '?');
        assert_eq!(mimic.display_color(), Color::White);

        mimic.reveal();
        assert!(!mimic.is_disguised());
        assert_eq!(mimic.display_symbol(), 'm');

        // Permanent
        mimic.reveal();
        assert_eq!(mimic.display_symbol(), 'm');
    }

    #[test]
    fn test_reveal_ignores_non_mimics() {
        let mut ogre = Enemy::new(EnemyKind::Ogre, 12);
        ogre.reveal();
        assert_eq!(ogre.display_symbol(), 'O');
    }

    #[test]
    fn test_apply_difficulty() {
        let mut ghost = Enemy::new(EnemyKind::Ghost, 1);
        ghost.apply_difficulty(Difficulty::new(1.5));
        assert_eq!(ghost.health, 13);
        assert_eq!(ghost.max_health, 13);
        assert_eq!(ghost.strength, 6);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut zombie = Enemy::new(EnemyKind::Zombie, 1);
        zombie.take_damage(1000);
        assert_eq!(zombie.health, 0);
        assert!(!zombie.is_alive());
    }
}
