//! Run state: the player, the current level's contents, fog-of-war and
//! the phase machine.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use super::items::{Armor, Item, ItemKind, Weapon};
use super::level::{generate_level, Enemy, Grid, LockedDoor, Treasure};
use super::{MAX_LEVEL, TILE_SIZE, VISION_RADIUS};

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub max_health: i32,
    pub gold: i32,
    pub weapon: Weapon,
    pub armor: Armor,
    pub inventory: Vec<Item>,
}

impl Player {
    pub fn tile(&self) -> (i32, i32) {
        (
            (self.x / TILE_SIZE) as i32,
            (self.y / TILE_SIZE) as i32,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Playing,
    /// Turn-based combat against one enemy; movement is suspended.
    Combat { enemy_id: u32 },
    LevelComplete,
    Won,
    Lost,
}

/// Fog-of-war state of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Hidden,
    /// Seen earlier, currently out of vision range.
    Explored,
    Visible,
}

/// Observable outcomes of a simulation step or combat action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    TreasureCollected { name: &'static str, gold: i32 },
    ItemAdded { item: Item },
    Equipped { item: Item },
    Healed { amount: i32 },
    CombatStarted { enemy_id: u32 },
    EnemyStruck { enemy_id: u32, damage: i32 },
    EnemyDefeated { enemy_id: u32, gold: i32 },
    PlayerStruck { damage: i32 },
    Fled,
    DoorUnlocked { door_id: u32 },
    LevelCompleted { level: u32 },
    GameWon,
    GameOver,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub level: u32,
    pub phase: Phase,
    pub player: Player,
    pub grid: Grid,
    pub enemies: Vec<Enemy>,
    pub treasures: Vec<Treasure>,
    pub doors: Vec<LockedDoor>,
    pub exit: (f32, f32),
    pub tick: u64,
    explored: HashSet<(i32, i32)>,
    next_item_id: u32,
}

impl GameState {
    pub fn new_game(rng: &mut impl Rng) -> Self {
        let mut state = GameState {
            level: 1,
            phase: Phase::Playing,
            player: Player {
                x: 0.0,
                y: 0.0,
                health: 100,
                max_health: 100,
                gold: 0,
                weapon: Weapon::Whip,
                armor: Armor::None,
                inventory: Vec::new(),
            },
            grid: Grid::new_walls(),
            enemies: Vec::new(),
            treasures: Vec::new(),
            doors: Vec::new(),
            exit: (0.0, 0.0),
            tick: 0,
            explored: HashSet::new(),
            next_item_id: 1,
        };
        let whip = state.mint_item(ItemKind::Weapon(Weapon::Whip));
        let torch = state.mint_item(ItemKind::Torch);
        state.player.inventory.push(whip);
        state.player.inventory.push(torch);
        state.load_level(rng);
        state
    }

    /// Move on to the next level. Health, gold and gear carry over;
    /// health is not restored between levels.
    pub fn advance_level(&mut self, rng: &mut impl Rng) {
        if self.phase != Phase::LevelComplete || self.level >= MAX_LEVEL {
            return;
        }
        self.level += 1;
        self.phase = Phase::Playing;
        self.load_level(rng);
    }

    fn load_level(&mut self, rng: &mut impl Rng) {
        let data = generate_level(self.level, rng);
        // Keep minted ids clear of the ids the generator handed out.
        let max_id = data
            .enemies
            .iter()
            .map(|e| e.id)
            .chain(data.treasures.iter().map(|t| t.id))
            .chain(data.doors.iter().map(|d| d.id))
            .max()
            .unwrap_or(0);
        self.next_item_id = self.next_item_id.max(max_id + 1);
        self.grid = data.grid;
        self.enemies = data.enemies;
        self.treasures = data.treasures;
        self.doors = data.doors;
        self.exit = data.exit;
        self.player.x = data.player_start.0;
        self.player.y = data.player_start.1;
        // Fog resets per level.
        self.explored.clear();
        self.reveal_around_player();
    }

    /// Ids are shared between items and spawned treasures so lookups
    /// stay unambiguous.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_item_id;
        self.next_item_id += 1;
        id
    }

    pub fn mint_item(&mut self, kind: ItemKind) -> Item {
        Item {
            id: self.next_entity_id(),
            kind,
        }
    }

    /// Marks tiles within vision range of the player as explored.
    pub fn reveal_around_player(&mut self) {
        let (ptx, pty) = self.player.tile();
        for dy in -VISION_RADIUS..=VISION_RADIUS {
            for dx in -VISION_RADIUS..=VISION_RADIUS {
                if dx * dx + dy * dy <= VISION_RADIUS * VISION_RADIUS {
                    self.explored.insert((ptx + dx, pty + dy));
                }
            }
        }
    }

    pub fn visibility(&self, tx: i32, ty: i32) -> Visibility {
        let (ptx, pty) = self.player.tile();
        let (dx, dy) = (tx - ptx, ty - pty);
        if dx * dx + dy * dy <= VISION_RADIUS * VISION_RADIUS {
            Visibility::Visible
        } else if self.explored.contains(&(tx, ty)) {
            Visibility::Explored
        } else {
            Visibility::Hidden
        }
    }

    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn has_key(&self, door_id: u32) -> bool {
        self.player
            .inventory
            .iter()
            .any(|i| i.kind == ItemKind::Key { key_id: door_id })
    }

    pub fn remove_key(&mut self, door_id: u32) {
        self.player
            .inventory
            .retain(|i| i.kind != ItemKind::Key { key_id: door_id });
    }

    /// Drinks a potion from the inventory. Other item kinds are inert.
    pub fn use_item(&mut self, item_id: u32) -> Option<GameEvent> {
        let pos = self
            .player
            .inventory
            .iter()
            .position(|i| i.id == item_id)?;
        match self.player.inventory[pos].kind {
            ItemKind::HealthPotion { heal } => {
                self.player.inventory.remove(pos);
                let before = self.player.health;
                self.player.health = (before + heal).min(self.player.max_health);
                Some(GameEvent::Healed {
                    amount: self.player.health - before,
                })
            }
            _ => None,
        }
    }

    /// Equips a weapon or armor piece from the inventory.
    pub fn equip_item(&mut self, item_id: u32) -> Option<GameEvent> {
        let item = *self
            .player
            .inventory
            .iter()
            .find(|i| i.id == item_id)?;
        match item.kind {
            ItemKind::Weapon(w) => {
                self.player.weapon = w;
                Some(GameEvent::Equipped { item })
            }
            ItemKind::Armor(a) => {
                self.player.armor = a;
                Some(GameEvent::Equipped { item })
            }
            _ => None,
        }
    }
}
