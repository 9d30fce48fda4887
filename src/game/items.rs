//! Equipment, enemy and loot tables.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weapon {
    Whip,
    Sword,
    Axe,
    Mace,
    EnchantedSword,
}

impl Weapon {
    /// Weapons found as loot; the whip is starting gear only.
    pub const LOOT_POOL: [Weapon; 4] = [
        Weapon::Sword,
        Weapon::Axe,
        Weapon::Mace,
        Weapon::EnchantedSword,
    ];

    pub fn damage(self) -> i32 {
        match self {
            Weapon::Whip => 15,
            Weapon::Sword => 25,
            Weapon::Axe => 35,
            Weapon::Mace => 30,
            Weapon::EnchantedSword => 45,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weapon::Whip => "Whip",
            Weapon::Sword => "Iron Sword",
            Weapon::Axe => "Battle Axe",
            Weapon::Mace => "War Mace",
            Weapon::EnchantedSword => "Enchanted Blade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Armor {
    None,
    Leather,
    Chainmail,
    Plate,
    EnchantedPlate,
}

impl Armor {
    pub const LOOT_POOL: [Armor; 4] = [
        Armor::Leather,
        Armor::Chainmail,
        Armor::Plate,
        Armor::EnchantedPlate,
    ];

    pub fn defense(self) -> i32 {
        match self {
            Armor::None => 0,
            Armor::Leather => 5,
            Armor::Chainmail => 10,
            Armor::Plate => 15,
            Armor::EnchantedPlate => 20,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Armor::None => "No Armor",
            Armor::Leather => "Leather Armor",
            Armor::Chainmail => "Chainmail",
            Armor::Plate => "Plate Armor",
            Armor::EnchantedPlate => "Enchanted Plate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    MeanDog,
    FuzzyCat,
    Mouse,
    BigBug,
    Snake,
    VenomousBat,
    RabidDog,
    FierceGorilla,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 8] = [
        EnemyKind::MeanDog,
        EnemyKind::FuzzyCat,
        EnemyKind::Mouse,
        EnemyKind::BigBug,
        EnemyKind::Snake,
        EnemyKind::VenomousBat,
        EnemyKind::RabidDog,
        EnemyKind::FierceGorilla,
    ];

    /// Stronger kinds only spawn deeper into the run.
    pub fn min_level(self) -> u32 {
        match self {
            EnemyKind::VenomousBat => 4,
            EnemyKind::RabidDog => 6,
            EnemyKind::FierceGorilla => 8,
            _ => 1,
        }
    }

    pub fn base_health(self, level: u32) -> i32 {
        let level = level as i32;
        match self {
            EnemyKind::MeanDog => 25 + level * 6,
            EnemyKind::FuzzyCat => 15 + level * 4,
            EnemyKind::Mouse => 10 + level * 3,
            EnemyKind::BigBug => 20 + level * 5,
            EnemyKind::Snake => 18 + level * 5,
            EnemyKind::VenomousBat => 30 + level * 7,
            EnemyKind::RabidDog => 35 + level * 8,
            EnemyKind::FierceGorilla => 50 + level * 10,
        }
    }

    /// Damage dealt when striking back in combat, before armor.
    pub fn attack_damage(self, level: u32, rng: &mut impl Rng) -> i32 {
        let level = level as i32;
        match self {
            EnemyKind::MeanDog => 10 + level * 2 + rng.random_range(0..8),
            EnemyKind::BigBug => 12 + level * 2 + rng.random_range(0..6),
            EnemyKind::Snake => 14 + level * 2 + rng.random_range(0..6),
            EnemyKind::VenomousBat => 16 + level * 3 + rng.random_range(0..10),
            EnemyKind::RabidDog => 18 + level * 3 + rng.random_range(0..12),
            EnemyKind::FierceGorilla => 25 + level * 4 + rng.random_range(0..15),
            EnemyKind::Mouse | EnemyKind::FuzzyCat => 8 + level + rng.random_range(0..6),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::MeanDog => "Mean Dog",
            EnemyKind::FuzzyCat => "Fuzzy Cat",
            EnemyKind::Mouse => "Mouse",
            EnemyKind::BigBug => "Big Bug",
            EnemyKind::Snake => "Snake",
            EnemyKind::VenomousBat => "Venomous Bat",
            EnemyKind::RabidDog => "Rabid Dog",
            EnemyKind::FierceGorilla => "Fierce Gorilla",
        }
    }
}

/// What a ground pickup is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreasureKind {
    Gold,
    Gem,
    Artifact,
    HealthPotion,
    /// Opens the locked door with the matching key id.
    Key,
    Weapon(Weapon),
    Armor(Armor),
}

/// What an inventory slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(Weapon),
    Armor(Armor),
    HealthPotion { heal: i32 },
    Key { key_id: u32 },
    Artifact,
    Torch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
}

impl Item {
    pub fn name(&self) -> &'static str {
        match self.kind {
            ItemKind::Weapon(w) => w.name(),
            ItemKind::Armor(a) => a.name(),
            ItemKind::HealthPotion { .. } => "Health Potion",
            ItemKind::Key { .. } => "Vault Key",
            ItemKind::Artifact => "Ancient Artifact",
            ItemKind::Torch => "Torch",
        }
    }
}
