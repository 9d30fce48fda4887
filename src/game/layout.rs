//! Hand-authored chamber layouts.
//!
//! Three difficulty tiers share one schema: rectangular chambers keyed by
//! name, carved corridors between connected chambers, and locked vaults
//! reached through their own gated corridors. Chamber names drive the
//! population tables in level generation.

#[derive(Debug, Clone, Copy)]
pub struct Chamber {
    pub name: &'static str,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Chamber {
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Vaults stay walled off until their door is unlocked.
    pub fn is_vault(&self) -> bool {
        self.name.starts_with("locked_vault")
    }

    pub fn contains_tile(&self, tx: i32, ty: i32) -> bool {
        tx >= self.x && tx < self.x + self.width && ty >= self.y && ty < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Connection {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DungeonLayout {
    pub chambers: &'static [Chamber],
    pub connections: &'static [Connection],
    pub vault_connections: &'static [Connection],
}

impl DungeonLayout {
    pub fn chamber(&self, name: &str) -> Option<&'static Chamber> {
        self.chambers.iter().find(|c| c.name == name)
    }
}

const fn chamber(name: &'static str, x: i32, y: i32, width: i32, height: i32) -> Chamber {
    Chamber {
        name,
        x,
        y,
        width,
        height,
    }
}

const fn conn(from: &'static str, to: &'static str) -> Connection {
    Connection { from, to }
}

/// Levels 1-2: simple linear dungeon.
static LINEAR: DungeonLayout = DungeonLayout {
    chambers: &[
        chamber("entrance", 2, 15, 8, 6),
        chamber("corridor1", 10, 17, 12, 3),
        chamber("treasure_room", 22, 12, 8, 8),
        chamber("monster_den", 15, 8, 8, 6),
        chamber("armory", 30, 10, 6, 6),
        chamber("locked_vault", 25, 20, 6, 6),
        chamber("exit_chamber", 35, 15, 6, 6),
    ],
    connections: &[
        conn("entrance", "corridor1"),
        conn("corridor1", "treasure_room"),
        conn("corridor1", "monster_den"),
        conn("treasure_room", "armory"),
        conn("armory", "exit_chamber"),
    ],
    vault_connections: &[conn("treasure_room", "locked_vault")],
};

/// Levels 3-4: branching dungeon around a main hall.
static BRANCHING: DungeonLayout = DungeonLayout {
    chambers: &[
        chamber("entrance", 2, 18, 6, 6),
        chamber("main_hall", 12, 15, 12, 8),
        chamber("north_chamber", 15, 4, 8, 8),
        chamber("south_chamber", 15, 26, 8, 6),
        chamber("treasure_vault", 28, 12, 6, 10),
        chamber("guard_room", 8, 4, 6, 6),
        chamber("armory", 26, 4, 6, 6),
        chamber("healing_chamber", 6, 26, 6, 6),
        chamber("locked_vault1", 35, 8, 6, 6),
        chamber("locked_vault2", 2, 8, 6, 6),
        chamber("exit_chamber", 38, 18, 6, 6),
    ],
    connections: &[
        conn("entrance", "main_hall"),
        conn("main_hall", "north_chamber"),
        conn("main_hall", "south_chamber"),
        conn("main_hall", "treasure_vault"),
        conn("north_chamber", "guard_room"),
        conn("north_chamber", "armory"),
        conn("south_chamber", "healing_chamber"),
        conn("treasure_vault", "exit_chamber"),
    ],
    vault_connections: &[
        conn("north_chamber", "locked_vault1"),
        conn("guard_room", "locked_vault2"),
    ],
};

/// Levels 5+: maze-like dungeon with a central hub and wings.
static MAZE: DungeonLayout = DungeonLayout {
    chambers: &[
        chamber("entrance", 1, 16, 6, 6),
        chamber("central_hub", 18, 15, 8, 8),
        chamber("north_wing", 15, 4, 12, 8),
        chamber("south_wing", 15, 26, 12, 6),
        chamber("east_wing", 30, 12, 8, 12),
        chamber("west_wing", 4, 12, 8, 12),
        chamber("treasure_chamber", 32, 4, 6, 6),
        chamber("boss_chamber", 20, 2, 6, 6),
        chamber("secret_room", 2, 4, 6, 5),
        chamber("armory", 34, 26, 6, 6),
        chamber("healing_chamber", 2, 26, 6, 6),
        chamber("locked_vault1", 40, 4, 6, 6),
        chamber("locked_vault2", 8, 2, 6, 6),
        chamber("locked_vault3", 40, 18, 6, 6),
        chamber("exit_chamber", 40, 26, 6, 6),
    ],
    connections: &[
        conn("entrance", "west_wing"),
        conn("west_wing", "central_hub"),
        conn("central_hub", "north_wing"),
        conn("central_hub", "south_wing"),
        conn("central_hub", "east_wing"),
        conn("north_wing", "treasure_chamber"),
        conn("north_wing", "boss_chamber"),
        conn("west_wing", "secret_room"),
        conn("west_wing", "healing_chamber"),
        conn("east_wing", "armory"),
        conn("east_wing", "exit_chamber"),
    ],
    vault_connections: &[
        conn("treasure_chamber", "locked_vault1"),
        conn("boss_chamber", "locked_vault2"),
        conn("east_wing", "locked_vault3"),
    ],
};

static LAYOUTS: [&DungeonLayout; 3] = [&LINEAR, &BRANCHING, &MAZE];

/// Difficulty tier: one layout per two levels, capped at the maze.
pub fn layout_for_level(level: u32) -> &'static DungeonLayout {
    let index = ((level.max(1) - 1) / 2).min(LAYOUTS.len() as u32 - 1);
    LAYOUTS[index as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GRID_HEIGHT, GRID_WIDTH};

    #[test]
    fn test_tier_selection() {
        assert!(std::ptr::eq(layout_for_level(1), &LINEAR));
        assert!(std::ptr::eq(layout_for_level(2), &LINEAR));
        assert!(std::ptr::eq(layout_for_level(3), &BRANCHING));
        assert!(std::ptr::eq(layout_for_level(5), &MAZE));
        assert!(std::ptr::eq(layout_for_level(10), &MAZE));
    }

    #[test]
    fn test_connections_reference_real_chambers() {
        for layout in LAYOUTS {
            for conn in layout.connections.iter().chain(layout.vault_connections) {
                assert!(layout.chamber(conn.from).is_some(), "missing {}", conn.from);
                assert!(layout.chamber(conn.to).is_some(), "missing {}", conn.to);
            }
        }
    }

    #[test]
    fn test_every_layout_has_entrance_exit_and_vault() {
        for layout in LAYOUTS {
            assert!(layout.chamber("entrance").is_some());
            assert!(layout.chamber("exit_chamber").is_some());
            assert!(layout.chambers.iter().any(|c| c.is_vault()));
            assert_eq!(
                layout.vault_connections.len(),
                layout.chambers.iter().filter(|c| c.is_vault()).count()
            );
        }
    }

    #[test]
    fn test_chambers_fit_grid() {
        for layout in LAYOUTS {
            for c in layout.chambers {
                assert!(c.x >= 0 && c.y >= 0, "{} out of grid", c.name);
                assert!(c.x + c.width <= GRID_WIDTH, "{} overflows x", c.name);
                assert!(c.y + c.height <= GRID_HEIGHT, "{} overflows y", c.name);
            }
        }
    }
}
