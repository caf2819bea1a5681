//! Item instances and the item categories the generator rolls

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::dungeon::{DoorColor, Position};
use crate::rng::GameRng;

/// Display color of an item or enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    White,
    Yellow,
    Brown,
    Magenta,
    Cyan,
    Red,
    Blue,
    Green,
}

impl From<DoorColor> for Color {
    fn from(color: DoorColor) -> Self {
        match color {
            DoorColor::Red => Color::Red,
            DoorColor::Blue => Color::Blue,
            DoorColor::Green => Color::Green,
            DoorColor::Yellow => Color::Yellow,
        }
    }
}

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ItemClass {
    Treasure,
    Food,
    Elixir,
    Scroll,
    Weapon,
    Key,
}

impl ItemClass {
    pub const fn symbol(self) -> char {
        match self {
            ItemClass::Treasure => '*',
            ItemClass::Food => ':',
            ItemClass::Elixir => '!',
            ItemClass::Scroll => '?',
            ItemClass::Weapon => ')',
            ItemClass::Key => 'k',
        }
    }

    /// Default display color (keys take their door color instead)
    pub const fn color(self) -> Color {
        match self {
            ItemClass::Treasure => Color::Yellow,
            ItemClass::Food => Color::Brown,
            ItemClass::Elixir => Color::Magenta,
            ItemClass::Scroll => Color::White,
            ItemClass::Weapon => Color::Cyan,
            ItemClass::Key => Color::White,
        }
    }

    /// Consumed on use
    pub const fn is_consumable(self) -> bool {
        matches!(self, ItemClass::Food | ItemClass::Elixir | ItemClass::Scroll)
    }
}

/// Specific variation within an item class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ItemSubtype {
    // Food
    Ration,
    Fruit,
    Meat,
    // Elixirs
    StrengthElixir,
    DexterityElixir,
    HealthElixir,
    // Scrolls
    StrengthScroll,
    DexterityScroll,
    HealthScroll,
    // Weapons
    Dagger,
    Sword,
    Hammer,
    Mace,
    Axe,
    // Keys
    RedKey,
    BlueKey,
    GreenKey,
    YellowKey,
}

impl ItemSubtype {
    pub const FOOD: [ItemSubtype; 3] = [ItemSubtype::Ration, ItemSubtype::Fruit, ItemSubtype::Meat];
    pub const ELIXIRS: [ItemSubtype; 3] = [
        ItemSubtype::StrengthElixir,
        ItemSubtype::DexterityElixir,
        ItemSubtype::HealthElixir,
    ];
    pub const SCROLLS: [ItemSubtype; 3] = [
        ItemSubtype::StrengthScroll,
        ItemSubtype::DexterityScroll,
        ItemSubtype::HealthScroll,
    ];

    pub const fn class(self) -> ItemClass {
        match self {
            ItemSubtype::Ration | ItemSubtype::Fruit | ItemSubtype::Meat => ItemClass::Food,
            ItemSubtype::StrengthElixir
            | ItemSubtype::DexterityElixir
            | ItemSubtype::HealthElixir => ItemClass::Elixir,
            ItemSubtype::StrengthScroll
            | ItemSubtype::DexterityScroll
            | ItemSubtype::HealthScroll => ItemClass::Scroll,
            ItemSubtype::Dagger
            | ItemSubtype::Sword
            | ItemSubtype::Hammer
            | ItemSubtype::Mace
            | ItemSubtype::Axe => ItemClass::Weapon,
            ItemSubtype::RedKey
            | ItemSubtype::BlueKey
            | ItemSubtype::GreenKey
            | ItemSubtype::YellowKey => ItemClass::Key,
        }
    }

    /// Attack bonus range (min, max) for weapons
    pub const fn attack_range(self) -> (i32, i32) {
        match self {
            ItemSubtype::Dagger => (1, 3),
            ItemSubtype::Sword => (2, 5),
            ItemSubtype::Hammer => (3, 8),
            ItemSubtype::Mace => (4, 7),
            ItemSubtype::Axe => (5, 10),
            _ => (1, 1),
        }
    }
}

/// A collectible item lying in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub class: ItemClass,
    /// `None` for treasure
    pub subtype: Option<ItemSubtype>,
    pub name: String,
    pub position: Position,
    /// HP restored (food)
    pub health: i32,
    /// Max HP increase (elixirs, scrolls)
    pub max_health: i32,
    pub dexterity: i32,
    /// Strength increase, or attack bonus for weapons
    pub strength: i32,
    /// Gold value (treasure)
    pub value: i32,
    /// Effect duration in turns (elixirs)
    pub duration: i32,
    pub symbol: char,
    pub color: Color,
}

impl Item {
    fn base(class: ItemClass, subtype: Option<ItemSubtype>, name: &str) -> Self {
        Self {
            class,
            subtype,
            name: name.to_string(),
            position: Position::default(),
            health: 0,
            max_health: 0,
            dexterity: 0,
            strength: 0,
            value: 0,
            duration: 0,
            symbol: class.symbol(),
            color: class.color(),
        }
    }

    /// Gold pile
    pub fn treasure(value: i32) -> Self {
        Self {
            value,
            ..Self::base(ItemClass::Treasure, None, "Gold")
        }
    }

    /// Build an item of the given subtype with its standard stats
    pub fn new(subtype: ItemSubtype) -> Self {
        let class = subtype.class();
        match subtype {
            ItemSubtype::Ration => Self {
                health: 10,
                ..Self::base(class, Some(subtype), "Ration")
            },
            ItemSubtype::Fruit => Self {
                health: 5,
                ..Self::base(class, Some(subtype), "Fruit")
            },
            ItemSubtype::Meat => Self {
                health: 15,
                ..Self::base(class, Some(subtype), "Meat")
            },
            ItemSubtype::StrengthElixir => Self {
                strength: 5,
                duration: 20,
                ..Self::base(class, Some(subtype), "Strength Elixir")
            },
            ItemSubtype::DexterityElixir => Self {
                dexterity: 5,
                duration: 20,
                ..Self::base(class, Some(subtype), "Dexterity Elixir")
            },
            ItemSubtype::HealthElixir => Self {
                max_health: 10,
                duration: 20,
                ..Self::base(class, Some(subtype), "Health Elixir")
            },
            ItemSubtype::StrengthScroll => Self {
                strength: 2,
                ..Self::base(class, Some(subtype), "Strength Scroll")
            },
            ItemSubtype::DexterityScroll => Self {
                dexterity: 2,
                ..Self::base(class, Some(subtype), "Dexterity Scroll")
            },
            ItemSubtype::HealthScroll => Self {
                max_health: 5,
                ..Self::base(class, Some(subtype), "Health Scroll")
            },
            ItemSubtype::Dagger
            | ItemSubtype::Sword
            | ItemSubtype::Hammer
            | ItemSubtype::Mace
            | ItemSubtype::Axe => Self::weapon(subtype, subtype.attack_range().1),
            ItemSubtype::RedKey => Self::key(DoorColor::Red),
            ItemSubtype::BlueKey => Self::key(DoorColor::Blue),
            ItemSubtype::GreenKey => Self::key(DoorColor::Green),
            ItemSubtype::YellowKey => Self::key(DoorColor::Yellow),
        }
    }

    /// Weapon with an explicit attack bonus
    pub fn weapon(subtype: ItemSubtype, attack_bonus: i32) -> Self {
        let name = match subtype {
            ItemSubtype::Dagger => "Dagger",
            ItemSubtype::Sword => "Sword",
            ItemSubtype::Hammer => "Hammer",
            ItemSubtype::Mace => "Mace",
            ItemSubtype::Axe => "Axe",
            _ => "Weapon",
        };
        Self {
            strength: attack_bonus,
            ..Self::base(ItemClass::Weapon, Some(subtype), name)
        }
    }

    /// Key for doors of the given color
    pub fn key(color: DoorColor) -> Self {
        let name = match color {
            DoorColor::Red => "Red Key",
            DoorColor::Blue => "Blue Key",
            DoorColor::Green => "Green Key",
            DoorColor::Yellow => "Yellow Key",
        };
        Self {
            color: color.into(),
            ..Self::base(ItemClass::Key, Some(color.key()), name)
        }
    }

    /// Place at a position (builder style)
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn is_key(&self) -> bool {
        self.class == ItemClass::Key
    }

    /// Roll a floor item for a level: food 35%, elixir 20%, scroll 20%, weapon 25%
    pub fn roll_for_level(level_number: u32, rng: &mut GameRng) -> Self {
        let roll = rng.rn2(100);
        let subtype = if roll < 35 {
            pick(&ItemSubtype::FOOD, rng)
        } else if roll < 55 {
            pick(&ItemSubtype::ELIXIRS, rng)
        } else if roll < 75 {
            pick(&ItemSubtype::SCROLLS, rng)
        } else {
            weapon_for_level(level_number, rng)
        };
        Self::new(subtype)
    }
}

fn pick(options: &[ItemSubtype], rng: &mut GameRng) -> ItemSubtype {
    rng.choose(options).copied().unwrap_or(ItemSubtype::Ration)
}

/// Weapon sub-category improves with depth
fn weapon_for_level(level_number: u32, rng: &mut GameRng) -> ItemSubtype {
    match level_number {
        0..5 => ItemSubtype::Dagger,
        5..10 => pick(&[ItemSubtype::Dagger, ItemSubtype::Sword], rng),
        10..15 => pick(&[ItemSubtype::Sword, ItemSubtype::Mace], rng),
        _ => pick(&[ItemSubtype::Sword, ItemSubtype::Mace, ItemSubtype::Axe], rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_subtype_builds_its_class() {
        for subtype in ItemSubtype::iter() {
            let item = Item::new(subtype);
            assert_eq!(item.class, subtype.class());
            assert_eq!(item.subtype, Some(subtype));
            assert!(!item.name.is_empty());
        }
    }

    #[test]
    fn test_key_colors() {
        let key = Item::key(DoorColor::Green);
        assert!(key.is_key());
        assert_eq!(key.symbol, 'k');
        assert_eq!(key.color, Color::Green);
        assert_eq!(key.subtype, Some(ItemSubtype::GreenKey));
    }

    #[test]
    fn test_weapon_uses_max_bonus() {
        assert_eq!(Item::new(ItemSubtype::Axe).strength, 10);
        assert_eq!(Item::new(ItemSubtype::Dagger).strength, 3);
    }

    #[test]
    fn test_shallow_levels_only_roll_daggers() {
        let mut rng = GameRng::new(5);
        for _ in 0..500 {
            let item = Item::roll_for_level(1, &mut rng);
            assert_ne!(item.class, ItemClass::Key);
            assert_ne!(item.class, ItemClass::Treasure);
            if item.class == ItemClass::Weapon {
                assert_eq!(item.subtype, Some(ItemSubtype::Dagger));
            }
        }
    }

    #[test]
    fn test_deep_levels_never_roll_daggers() {
        let mut rng = GameRng::new(6);
        for _ in 0..500 {
            let item = Item::roll_for_level(16, &mut rng);
            assert_ne!(item.subtype, Some(ItemSubtype::Dagger));
        }
    }

    #[test]
    fn test_consumables() {
        assert!(ItemClass::Food.is_consumable());
        assert!(!ItemClass::Weapon.is_consumable());
        assert!(!ItemClass::Key.is_consumable());
    }
}
