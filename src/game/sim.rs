//! Per-tick simulation: movement, enemy chase, pickups, locked doors and
//! the level exit. One tick corresponds to one input frame.

use rand::Rng;

use super::items::{Armor, ItemKind, TreasureKind, Weapon};
use super::layout::layout_for_level;
use super::level::Treasure;
use super::state::{GameEvent, GameState, Phase};
use super::{
    CHASE_RANGE_TILES, COMBAT_TRIGGER_RANGE, DOOR_RANGE, ENEMY_MOVE_EVERY, ENEMY_SPEED,
    EXIT_RANGE, MAX_LEVEL, PICKUP_RANGE, PLAYER_SPEED, TILE_SIZE, WORLD_HEIGHT, WORLD_WIDTH,
};

/// Normalized movement intent for one tick, each axis in [-1, 1].
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveInput {
    pub dx: f32,
    pub dy: f32,
}

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

/// Advances the simulation by one tick. Ignored outside the Playing
/// phase; combat has its own turn actions.
pub fn step(state: &mut GameState, input: MoveInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }
    state.tick += 1;
    let mut events = Vec::new();

    move_player(state, input);
    state.reveal_around_player();

    if state.tick % ENEMY_MOVE_EVERY == 0 {
        move_enemies(state);
    }

    collect_treasures(state, &mut events);
    unlock_doors(state, rng, &mut events);

    if let Some(enemy_id) = combat_trigger(state) {
        state.phase = Phase::Combat { enemy_id };
        events.push(GameEvent::CombatStarted { enemy_id });
        return events;
    }

    check_exit(state, &mut events);
    events
}

/// Per-axis collision so the player slides along walls instead of
/// sticking to them.
fn move_player(state: &mut GameState, input: MoveInput) {
    let dx = input.dx.clamp(-1.0, 1.0) * PLAYER_SPEED;
    let dy = input.dy.clamp(-1.0, 1.0) * PLAYER_SPEED;

    let new_x = (state.player.x + dx).clamp(0.0, WORLD_WIDTH - TILE_SIZE);
    if !state.grid.rect_hits_wall(new_x, state.player.y) {
        state.player.x = new_x;
    }
    let new_y = (state.player.y + dy).clamp(0.0, WORLD_HEIGHT - TILE_SIZE);
    if !state.grid.rect_hits_wall(state.player.x, new_y) {
        state.player.y = new_y;
    }
}

/// Enemies within chase range step straight at the player. Unlike the
/// player they stop dead at walls.
fn move_enemies(state: &mut GameState) {
    let (px, py) = (state.player.x, state.player.y);
    let chase_range = CHASE_RANGE_TILES * TILE_SIZE;

    for enemy in &mut state.enemies {
        let dist = distance(enemy.x, enemy.y, px, py);
        if dist > chase_range || dist < f32::EPSILON {
            continue;
        }
        let new_x = enemy.x + (px - enemy.x) / dist * ENEMY_SPEED;
        let new_y = enemy.y + (py - enemy.y) / dist * ENEMY_SPEED;
        if !state.grid.rect_hits_wall(new_x, new_y) {
            enemy.x = new_x;
            enemy.y = new_y;
        }
    }
}

fn combat_trigger(state: &GameState) -> Option<u32> {
    state
        .enemies
        .iter()
        .filter(|e| {
            distance(e.x, e.y, state.player.x, state.player.y) < COMBAT_TRIGGER_RANGE
        })
        .min_by(|a, b| {
            let da = distance(a.x, a.y, state.player.x, state.player.y);
            let db = distance(b.x, b.y, state.player.x, state.player.y);
            da.total_cmp(&db)
        })
        .map(|e| e.id)
}

fn collect_treasures(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let (px, py) = (state.player.x, state.player.y);
    let grabbed: Vec<Treasure> = state
        .treasures
        .iter()
        .filter(|t| distance(t.x, t.y, px, py) < PICKUP_RANGE)
        .cloned()
        .collect();
    if grabbed.is_empty() {
        return;
    }
    let ids: Vec<u32> = grabbed.iter().map(|t| t.id).collect();
    state.treasures.retain(|t| !ids.contains(&t.id));

    for treasure in grabbed {
        match treasure.kind {
            TreasureKind::Gold => {
                state.player.gold += treasure.value;
                events.push(GameEvent::TreasureCollected {
                    name: "Gold",
                    gold: treasure.value,
                });
            }
            TreasureKind::Gem => {
                state.player.gold += treasure.value;
                events.push(GameEvent::TreasureCollected {
                    name: "Gem",
                    gold: treasure.value,
                });
            }
            TreasureKind::Artifact => {
                state.player.gold += treasure.value;
                events.push(GameEvent::TreasureCollected {
                    name: "Ancient Artifact",
                    gold: treasure.value,
                });
            }
            TreasureKind::HealthPotion => {
                let item = state.mint_item(ItemKind::HealthPotion {
                    heal: treasure.value,
                });
                state.player.inventory.push(item);
                events.push(GameEvent::ItemAdded { item });
            }
            TreasureKind::Key => {
                let item = state.mint_item(ItemKind::Key {
                    key_id: treasure.value as u32,
                });
                state.player.inventory.push(item);
                events.push(GameEvent::ItemAdded { item });
            }
            TreasureKind::Weapon(weapon) => {
                let item = state.mint_item(ItemKind::Weapon(weapon));
                state.player.inventory.push(item);
                events.push(GameEvent::ItemAdded { item });
                if weapon.damage() > state.player.weapon.damage() {
                    state.player.weapon = weapon;
                    events.push(GameEvent::Equipped { item });
                }
            }
            TreasureKind::Armor(armor) => {
                let item = state.mint_item(ItemKind::Armor(armor));
                state.player.inventory.push(item);
                events.push(GameEvent::ItemAdded { item });
                if armor.defense() > state.player.armor.defense() {
                    state.player.armor = armor;
                    events.push(GameEvent::Equipped { item });
                }
            }
        }
    }
}

/// Opens a nearby locked door if the matching key is held: the vault is
/// carved open, the key is spent, and the vault loot appears inside.
fn unlock_doors(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let (px, py) = (state.player.x, state.player.y);
    let near: Vec<(u32, &'static str)> = state
        .doors
        .iter()
        .filter(|d| !d.is_open)
        .filter(|d| {
            let dx = d.tile_x as f32 * TILE_SIZE;
            let dy = d.tile_y as f32 * TILE_SIZE;
            distance(dx, dy, px, py) < DOOR_RANGE
        })
        .map(|d| (d.id, d.vault))
        .collect();

    for (door_id, vault_name) in near {
        if !state.has_key(door_id) {
            continue;
        }
        state.remove_key(door_id);
        if let Some(door) = state.doors.iter_mut().find(|d| d.id == door_id) {
            door.is_open = true;
        }
        let layout = layout_for_level(state.level);
        if let Some(vault) = layout.chamber(vault_name) {
            state.grid.carve_chamber(vault);
            spawn_vault_loot(state, vault_name, rng);
        }
        events.push(GameEvent::DoorUnlocked { door_id });
    }
}

/// Vault loot: guaranteed gear first, then gems and gold, all richer
/// than ordinary floor treasure.
fn spawn_vault_loot(state: &mut GameState, vault_name: &str, rng: &mut impl Rng) {
    let layout = layout_for_level(state.level);
    let Some(vault) = layout.chamber(vault_name) else {
        return;
    };
    let count = 3 + state.level / 2;
    let value = 50 + state.level as i32 * 15;

    for i in 0..count {
        let kind = if i == 0 {
            if rng.random::<f32>() < 0.5 {
                TreasureKind::Weapon(
                    Weapon::LOOT_POOL[rng.random_range(0..Weapon::LOOT_POOL.len())],
                )
            } else {
                TreasureKind::Armor(Armor::LOOT_POOL[rng.random_range(0..Armor::LOOT_POOL.len())])
            }
        } else if rng.random::<f32>() < 0.5 {
            TreasureKind::Gem
        } else {
            TreasureKind::Gold
        };
        let tx = vault.x + 1 + rng.random_range(0..(vault.width - 2).max(1));
        let ty = vault.y + 1 + rng.random_range(0..(vault.height - 2).max(1));
        let id = state.next_entity_id();
        state.treasures.push(Treasure {
            id,
            kind,
            x: tx as f32 * TILE_SIZE,
            y: ty as f32 * TILE_SIZE,
            value,
        });
    }
}

fn check_exit(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let (ex, ey) = state.exit;
    if distance(state.player.x, state.player.y, ex, ey) >= EXIT_RANGE {
        return;
    }
    if state.level >= MAX_LEVEL {
        state.phase = Phase::Won;
        events.push(GameEvent::GameWon);
    } else {
        state.phase = Phase::LevelComplete;
        events.push(GameEvent::LevelCompleted { level: state.level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_step_moves_player_on_open_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::new_game(&mut rng);
        let start_x = state.player.x;
        step(&mut state, MoveInput { dx: 1.0, dy: 0.0 }, &mut rng);
        assert_eq!(state.player.x, start_x + PLAYER_SPEED);
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_walls_block_but_allow_sliding() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = GameState::new_game(&mut rng);
        // Drive the player into the left map border for a while.
        for _ in 0..100 {
            step(&mut state, MoveInput { dx: -1.0, dy: 0.0 }, &mut rng);
            if state.phase != Phase::Playing {
                return;
            }
        }
        assert!(!state
            .grid
            .rect_hits_wall(state.player.x, state.player.y));
        // Sliding along the wall still works.
        let y_before = state.player.y;
        let events = step(&mut state, MoveInput { dx: -1.0, dy: 1.0 }, &mut rng);
        if events.is_empty() && state.phase == Phase::Playing {
            assert!(state.player.y >= y_before);
        }
    }

    #[test]
    fn test_step_is_inert_outside_playing_phase() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new_game(&mut rng);
        state.phase = Phase::Lost;
        let events = step(&mut state, MoveInput { dx: 1.0, dy: 0.0 }, &mut rng);
        assert!(events.is_empty());
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_pickup_gold_increases_score() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = GameState::new_game(&mut rng);
        state.treasures.clear();
        state.enemies.clear();
        state.treasures.push(Treasure {
            id: 999,
            kind: TreasureKind::Gold,
            x: state.player.x,
            y: state.player.y,
            value: 40,
        });
        let events = step(&mut state, MoveInput::default(), &mut rng);
        assert!(events.contains(&GameEvent::TreasureCollected {
            name: "Gold",
            gold: 40
        }));
        assert_eq!(state.player.gold, 40);
        assert!(state.treasures.iter().all(|t| t.id != 999));
    }

    #[test]
    fn test_better_weapon_auto_equips() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = GameState::new_game(&mut rng);
        state.treasures.clear();
        state.enemies.clear();
        state.treasures.push(Treasure {
            id: 998,
            kind: TreasureKind::Weapon(Weapon::EnchantedSword),
            x: state.player.x,
            y: state.player.y,
            value: 0,
        });
        step(&mut state, MoveInput::default(), &mut rng);
        assert_eq!(state.player.weapon, Weapon::EnchantedSword);
    }

    #[test]
    fn test_key_unlocks_vault_and_spawns_loot() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut state = GameState::new_game(&mut rng);
        state.enemies.clear();
        state.treasures.clear();

        let door = state.doors[0].clone();
        let key = state.mint_item(ItemKind::Key { key_id: door.id });
        state.player.inventory.push(key);
        state.player.x = door.tile_x as f32 * TILE_SIZE;
        state.player.y = door.tile_y as f32 * TILE_SIZE;

        let events = step(&mut state, MoveInput::default(), &mut rng);
        assert!(events.contains(&GameEvent::DoorUnlocked { door_id: door.id }));
        assert!(state.doors[0].is_open);
        assert!(!state.has_key(door.id));
        assert!(!state.treasures.is_empty(), "vault loot should spawn");

        let layout = layout_for_level(state.level);
        let vault = layout.chamber(door.vault).unwrap();
        let (cx, cy) = vault.center();
        assert!(!state.grid.is_wall(cx, cy), "vault should be carved open");
    }

    #[test]
    fn test_exit_completes_level_and_wins_on_final_level() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = GameState::new_game(&mut rng);
        state.enemies.clear();
        state.treasures.clear();
        state.player.x = state.exit.0;
        state.player.y = state.exit.1;
        let events = step(&mut state, MoveInput::default(), &mut rng);
        assert!(events.contains(&GameEvent::LevelCompleted { level: 1 }));
        assert_eq!(state.phase, Phase::LevelComplete);

        state.level = MAX_LEVEL;
        state.phase = Phase::Playing;
        state.player.x = state.exit.0;
        state.player.y = state.exit.1;
        let events = step(&mut state, MoveInput::default(), &mut rng);
        assert!(events.contains(&GameEvent::GameWon));
        assert_eq!(state.phase, Phase::Won);
    }

    #[test]
    fn test_adjacent_enemy_triggers_combat() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut state = GameState::new_game(&mut rng);
        state.treasures.clear();
        let enemy_id = state.enemies[0].id;
        state.enemies[0].x = state.player.x + TILE_SIZE * 0.5;
        state.enemies[0].y = state.player.y;
        let events = step(&mut state, MoveInput::default(), &mut rng);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CombatStarted { .. })));
        assert!(matches!(state.phase, Phase::Combat { .. }));
        let _ = enemy_id;
    }
}
