//! Headless dungeon-crawler simulation behind the site's playable demo.
//!
//! The module owns level generation, fog-of-war, movement, combat and
//! progression; rendering and input mapping live in the frontend. All
//! randomness is drawn from a caller-supplied [`rand::Rng`], so a run is
//! reproducible from its seed.

pub mod combat;
pub mod items;
pub mod layout;
pub mod level;
pub mod sim;
pub mod state;

pub use combat::{attack, flee};
pub use items::{Armor, EnemyKind, Item, ItemKind, TreasureKind, Weapon};
pub use level::{generate_level, Enemy, Grid, LevelData, LockedDoor, Tile, Treasure};
pub use sim::{step, MoveInput};
pub use state::{GameEvent, GameState, Phase, Player, Visibility};

/// Tile edge length in world units (the canvas draws 32px tiles).
pub const TILE_SIZE: f32 = 32.0;
pub const WORLD_WIDTH: f32 = 1600.0;
pub const WORLD_HEIGHT: f32 = 1200.0;
pub const GRID_WIDTH: i32 = (WORLD_WIDTH / TILE_SIZE) as i32;
pub const GRID_HEIGHT: i32 = (WORLD_HEIGHT / TILE_SIZE) as i32;

/// Fog-of-war vision radius, in tiles (Euclidean).
pub const VISION_RADIUS: i32 = 3;

/// Clearing this level wins the run.
pub const MAX_LEVEL: u32 = 10;

pub const PLAYER_SPEED: f32 = 5.0;
pub const ENEMY_SPEED: f32 = 7.0;
/// Enemies reposition every Nth simulation tick.
pub const ENEMY_MOVE_EVERY: u64 = 3;
/// Enemies ignore the player beyond this many tiles.
pub const CHASE_RANGE_TILES: f32 = 12.0;

/// Proximity thresholds, in world units.
pub const COMBAT_TRIGGER_RANGE: f32 = TILE_SIZE * 1.2;
pub const PICKUP_RANGE: f32 = TILE_SIZE;
pub const DOOR_RANGE: f32 = TILE_SIZE * 1.5;
pub const EXIT_RANGE: f32 = TILE_SIZE;
