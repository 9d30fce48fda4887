//! Level generation: carves a chamber layout into a tile grid and
//! populates it with enemies, treasures, locked vault doors and the exit.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::items::{Armor, EnemyKind, TreasureKind, Weapon};
use super::layout::{layout_for_level, Chamber, DungeonLayout};
use super::{GRID_HEIGHT, GRID_WIDTH, TILE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

/// Row-major tile grid. Out-of-bounds reads count as wall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new_walls() -> Self {
        Grid {
            tiles: vec![Tile::Wall; (GRID_WIDTH * GRID_HEIGHT) as usize],
        }
    }

    fn index(tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 || tx >= GRID_WIDTH || ty >= GRID_HEIGHT {
            None
        } else {
            Some((ty * GRID_WIDTH + tx) as usize)
        }
    }

    pub fn tile(&self, tx: i32, ty: i32) -> Tile {
        Self::index(tx, ty)
            .map(|i| self.tiles[i])
            .unwrap_or(Tile::Wall)
    }

    pub fn is_wall(&self, tx: i32, ty: i32) -> bool {
        self.tile(tx, ty) == Tile::Wall
    }

    pub fn carve(&mut self, tx: i32, ty: i32) {
        if let Some(i) = Self::index(tx, ty) {
            self.tiles[i] = Tile::Floor;
        }
    }

    pub fn carve_chamber(&mut self, chamber: &Chamber) {
        for ty in chamber.y..chamber.y + chamber.height {
            for tx in chamber.x..chamber.x + chamber.width {
                self.carve(tx, ty);
            }
        }
    }

    /// True if a tile-sized box anchored at world position (x, y)
    /// overlaps any wall tile.
    pub fn rect_hits_wall(&self, x: f32, y: f32) -> bool {
        let tx0 = (x / TILE_SIZE).floor() as i32;
        let ty0 = (y / TILE_SIZE).floor() as i32;
        let tx1 = ((x + TILE_SIZE - 0.01) / TILE_SIZE).floor() as i32;
        let ty1 = ((y + TILE_SIZE - 0.01) / TILE_SIZE).floor() as i32;
        for ty in ty0..=ty1 {
            for tx in tx0..=tx1 {
                if self.is_wall(tx, ty) {
                    return true;
                }
            }
        }
        false
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub max_health: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treasure {
    pub id: u32,
    pub kind: TreasureKind,
    pub x: f32,
    pub y: f32,
    /// Gold amount, gem/artifact worth, or potion heal. Keys store the
    /// id of the door they open.
    pub value: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LockedDoor {
    pub id: u32,
    pub tile_x: i32,
    pub tile_y: i32,
    pub is_open: bool,
    /// Name of the vault chamber this door seals.
    pub vault: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelData {
    pub grid: Grid,
    pub enemies: Vec<Enemy>,
    pub treasures: Vec<Treasure>,
    pub doors: Vec<LockedDoor>,
    pub player_start: (f32, f32),
    pub exit: (f32, f32),
}

/// Random world position on an interior tile of a chamber.
fn random_spot(chamber: &Chamber, rng: &mut impl Rng) -> (f32, f32) {
    let tx = chamber.x + 1 + rng.random_range(0..(chamber.width - 2).max(1));
    let ty = chamber.y + 1 + rng.random_range(0..(chamber.height - 2).max(1));
    (tx as f32 * TILE_SIZE, ty as f32 * TILE_SIZE)
}

/// Tiles of an L-shaped corridor, two tiles wide: one leg along the
/// source row, the other along the target column (or the transposed
/// order when `horizontal_first` is false).
fn corridor_tiles(from: (i32, i32), to: (i32, i32), horizontal_first: bool) -> Vec<(i32, i32)> {
    let (fx, fy) = from;
    let (tx, ty) = to;
    let mut tiles = Vec::new();
    if horizontal_first {
        for x in fx.min(tx)..=fx.max(tx) {
            tiles.push((x, fy));
            tiles.push((x, fy + 1));
        }
        for y in fy.min(ty)..=fy.max(ty) {
            tiles.push((tx, y));
            tiles.push((tx + 1, y));
        }
    } else {
        for y in fy.min(ty)..=fy.max(ty) {
            tiles.push((fx, y));
            tiles.push((fx + 1, y));
        }
        for x in fx.min(tx)..=fx.max(tx) {
            tiles.push((x, ty));
            tiles.push((x, ty + 1));
        }
    }
    tiles
}

/// Carves a corridor between two chamber centers without breaching any
/// sealed vault. Prefers the horizontal-first L; falls back to the
/// vertical-first L when that route would cut a vault open.
fn carve_corridor(grid: &mut Grid, from: (i32, i32), to: (i32, i32), vaults: &[&Chamber]) {
    let crosses_vault = |tiles: &[(i32, i32)]| {
        tiles
            .iter()
            .any(|&(x, y)| vaults.iter().any(|v| v.contains_tile(x, y)))
    };

    let mut tiles = corridor_tiles(from, to, true);
    if crosses_vault(&tiles) {
        let vertical = corridor_tiles(from, to, false);
        if !crosses_vault(&vertical) {
            tiles = vertical;
        }
    }
    for (x, y) in tiles {
        if !vaults.iter().any(|v| v.contains_tile(x, y)) {
            grid.carve(x, y);
        }
    }
}

/// Tile just outside the vault where its door sits, on the side the
/// corridor arrives from.
fn door_tile(source: &Chamber, vault: &Chamber) -> (i32, i32) {
    let (fx, fy) = source.center();
    let (vx, vy) = vault.center();
    if fy >= vault.y && fy < vault.y + vault.height {
        // Horizontal approach.
        if fx < vault.x {
            (vault.x - 1, fy)
        } else {
            (vault.x + vault.width, fy)
        }
    } else if fy < vault.y {
        (vx, vault.y - 1)
    } else {
        (vx, vault.y + vault.height)
    }
}

fn enemy_count(chamber: &str, level: u32) -> u32 {
    let count = match chamber {
        "monster_den" | "boss_chamber" => 2 + level / 2,
        "guard_room" | "central_hub" => 1 + level / 3,
        "main_hall" | "treasure_vault" => level / 2,
        _ => level / 4,
    };
    count.min(4)
}

fn spawn_enemies(
    layout: &DungeonLayout,
    level: u32,
    rng: &mut impl Rng,
    next_id: &mut u32,
) -> Vec<Enemy> {
    let eligible: Vec<EnemyKind> = EnemyKind::ALL
        .into_iter()
        .filter(|k| k.min_level() <= level)
        .collect();

    let mut enemies = Vec::new();
    for chamber in layout.chambers {
        if chamber.is_vault() || chamber.name == "entrance" {
            continue;
        }
        for _ in 0..enemy_count(chamber.name, level) {
            let kind = eligible[rng.random_range(0..eligible.len())];
            let (x, y) = random_spot(chamber, rng);
            let health = kind.base_health(level);
            enemies.push(Enemy {
                id: *next_id,
                kind,
                x,
                y,
                health,
                max_health: health,
            });
            *next_id += 1;
        }
    }
    enemies
}

fn spawn_treasures(
    layout: &DungeonLayout,
    level: u32,
    rng: &mut impl Rng,
    next_id: &mut u32,
) -> Vec<Treasure> {
    let mut treasures = Vec::new();
    let mut push = |kind: TreasureKind, (x, y): (f32, f32), value: i32| {
        treasures.push(Treasure {
            id: *next_id,
            kind,
            x,
            y,
            value,
        });
        *next_id += 1;
    };

    let worth = 15 + level as i32 * 8;
    let heal = 30 + level as i32 * 5;

    for chamber in layout.chambers {
        if chamber.is_vault() || chamber.name == "entrance" {
            continue;
        }
        match chamber.name {
            "treasure_vault" | "treasure_chamber" | "treasure_room" => {
                for _ in 0..(3 + level / 2) {
                    push(TreasureKind::Gem, random_spot(chamber, rng), worth);
                }
            }
            "armory" => {
                for _ in 0..(2 + level / 3) {
                    let kind = if rng.random::<f32>() < 0.5 {
                        TreasureKind::Weapon(
                            Weapon::LOOT_POOL[rng.random_range(0..Weapon::LOOT_POOL.len())],
                        )
                    } else {
                        TreasureKind::Armor(
                            Armor::LOOT_POOL[rng.random_range(0..Armor::LOOT_POOL.len())],
                        )
                    };
                    push(kind, random_spot(chamber, rng), 0);
                }
            }
            "healing_chamber" => {
                for _ in 0..(2 + level / 2) {
                    push(TreasureKind::HealthPotion, random_spot(chamber, rng), heal);
                }
            }
            "secret_room" | "boss_chamber" => {
                let count = if chamber.name == "secret_room" { 2 } else { 1 };
                for _ in 0..count {
                    let roll = rng.random::<f32>();
                    let kind = if roll > 0.6 {
                        TreasureKind::Artifact
                    } else if roll > 0.3 {
                        TreasureKind::Weapon(
                            Weapon::LOOT_POOL[rng.random_range(0..Weapon::LOOT_POOL.len())],
                        )
                    } else {
                        TreasureKind::Armor(
                            Armor::LOOT_POOL[rng.random_range(0..Armor::LOOT_POOL.len())],
                        )
                    };
                    push(kind, random_spot(chamber, rng), worth);
                }
            }
            "central_hub" | "main_hall" => {
                for _ in 0..(1 + level / 3) {
                    let roll = rng.random::<f32>();
                    let kind = if roll > 0.7 {
                        TreasureKind::HealthPotion
                    } else if roll > 0.35 {
                        TreasureKind::Gem
                    } else {
                        TreasureKind::Gold
                    };
                    let value = if kind == TreasureKind::HealthPotion {
                        heal
                    } else {
                        worth
                    };
                    push(kind, random_spot(chamber, rng), value);
                }
            }
            _ => {
                for _ in 0..(level / 4) {
                    let kind = if rng.random::<f32>() > 0.8 {
                        TreasureKind::HealthPotion
                    } else {
                        TreasureKind::Gold
                    };
                    let value = if kind == TreasureKind::HealthPotion {
                        heal
                    } else {
                        worth
                    };
                    push(kind, random_spot(chamber, rng), value);
                }
            }
        }
    }
    treasures
}

pub fn generate_level(level: u32, rng: &mut impl Rng) -> LevelData {
    let layout = layout_for_level(level);
    let mut grid = Grid::new_walls();
    let mut next_id: u32 = 1;

    // Open chambers. Vaults stay walled until their door is unlocked.
    for chamber in layout.chambers {
        if !chamber.is_vault() {
            grid.carve_chamber(chamber);
        }
    }

    let vaults: Vec<&Chamber> = layout.chambers.iter().filter(|c| c.is_vault()).collect();

    for conn in layout.connections {
        let from = layout.chamber(conn.from).map(|c| c.center());
        let to = layout.chamber(conn.to).map(|c| c.center());
        if let (Some(from), Some(to)) = (from, to) {
            carve_corridor(&mut grid, from, to, &vaults);
        }
    }

    // Vault corridors stop at the vault edge; the locked door sits there.
    let mut doors = Vec::new();
    for conn in layout.vault_connections {
        let (Some(source), Some(vault)) = (layout.chamber(conn.from), layout.chamber(conn.to))
        else {
            continue;
        };
        carve_corridor(&mut grid, source.center(), vault.center(), &vaults);
        let (tile_x, tile_y) = door_tile(source, vault);
        doors.push(LockedDoor {
            id: next_id,
            tile_x,
            tile_y,
            is_open: false,
            vault: vault.name,
        });
        next_id += 1;
    }

    let enemies = spawn_enemies(layout, level, rng, &mut next_id);
    let mut treasures = spawn_treasures(layout, level, rng, &mut next_id);

    // One key per vault door, hidden in a random reachable chamber.
    let key_spots: Vec<&Chamber> = layout
        .chambers
        .iter()
        .filter(|c| !c.is_vault() && c.name != "exit_chamber")
        .collect();
    for door in &doors {
        let chamber = key_spots[rng.random_range(0..key_spots.len())];
        let (x, y) = random_spot(chamber, rng);
        treasures.push(Treasure {
            id: next_id,
            kind: TreasureKind::Key,
            x,
            y,
            value: door.id as i32,
        });
        next_id += 1;
    }

    let entrance = layout
        .chamber("entrance")
        .unwrap_or(&layout.chambers[0]);
    let player_start = (
        (entrance.x + 1) as f32 * TILE_SIZE,
        (entrance.y + 1) as f32 * TILE_SIZE,
    );

    let exit_candidates: Vec<&Chamber> = layout
        .chambers
        .iter()
        .filter(|c| !c.is_vault() && c.name != "entrance")
        .collect();
    let exit_chamber = exit_candidates[rng.random_range(0..exit_candidates.len())];
    let exit = (
        (exit_chamber.x + 1 + (exit_chamber.width - 2) / 2) as f32 * TILE_SIZE,
        (exit_chamber.y + 1 + (exit_chamber.height - 2) / 2) as f32 * TILE_SIZE,
    );

    LevelData {
        grid,
        enemies,
        treasures,
        doors,
        player_start,
        exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::layout::layout_for_level;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn reachable_from(grid: &Grid, start: (i32, i32)) -> HashSet<(i32, i32)> {
        let mut seen = HashSet::new();
        let mut queue = vec![start];
        while let Some((tx, ty)) = queue.pop() {
            if grid.is_wall(tx, ty) || !seen.insert((tx, ty)) {
                continue;
            }
            queue.extend([(tx + 1, ty), (tx - 1, ty), (tx, ty + 1), (tx, ty - 1)]);
        }
        seen
    }

    #[test]
    fn test_exit_reachable_from_start_on_every_level() {
        for seed in [1u64, 7, 42, 1337] {
            for level in 1..=10 {
                let mut rng = StdRng::seed_from_u64(seed * 100 + level as u64);
                let data = generate_level(level, &mut rng);
                let start = (
                    (data.player_start.0 / TILE_SIZE) as i32,
                    (data.player_start.1 / TILE_SIZE) as i32,
                );
                let exit = (
                    (data.exit.0 / TILE_SIZE) as i32,
                    (data.exit.1 / TILE_SIZE) as i32,
                );
                let reachable = reachable_from(&data.grid, start);
                assert!(
                    reachable.contains(&exit),
                    "level {} seed {}: exit unreachable",
                    level,
                    seed
                );
            }
        }
    }

    #[test]
    fn test_vaults_stay_walled_until_unlocked() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = generate_level(5, &mut rng);
        let layout = layout_for_level(5);
        for chamber in layout.chambers.iter().filter(|c| c.is_vault()) {
            let (cx, cy) = chamber.center();
            assert!(data.grid.is_wall(cx, cy), "{} carved too early", chamber.name);
        }
        assert_eq!(data.doors.len(), 3);
        assert!(data.doors.iter().all(|d| !d.is_open));
    }

    #[test]
    fn test_every_door_has_a_reachable_key() {
        for seed in [2u64, 9, 77] {
            let mut rng = StdRng::seed_from_u64(seed);
            let data = generate_level(6, &mut rng);
            let start = (
                (data.player_start.0 / TILE_SIZE) as i32,
                (data.player_start.1 / TILE_SIZE) as i32,
            );
            let reachable = reachable_from(&data.grid, start);
            for door in &data.doors {
                let key = data
                    .treasures
                    .iter()
                    .find(|t| t.kind == TreasureKind::Key && t.value == door.id as i32)
                    .expect("key missing for door");
                let tile = (
                    (key.x / TILE_SIZE) as i32,
                    (key.y / TILE_SIZE) as i32,
                );
                assert!(reachable.contains(&tile), "key out of reach");
            }
        }
    }

    #[test]
    fn test_enemy_strength_gated_by_level() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let data = generate_level(2, &mut rng);
            for enemy in &data.enemies {
                assert!(enemy.kind.min_level() <= 2, "{:?} too early", enemy.kind);
                assert_eq!(enemy.health, enemy.max_health);
            }
        }
    }

    #[test]
    fn test_rect_collision_respects_walls() {
        let mut rng = StdRng::seed_from_u64(5);
        let data = generate_level(1, &mut rng);
        assert!(!data
            .grid
            .rect_hits_wall(data.player_start.0, data.player_start.1));
        // Aligned with the map corner, which is solid wall.
        assert!(data.grid.rect_hits_wall(0.0, 0.0));
        // Out of bounds counts as wall.
        assert!(data.grid.rect_hits_wall(-50.0, -50.0));
    }
}
