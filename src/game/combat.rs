//! Turn-based combat resolution. Entered when an enemy closes to melee
//! range; each player action resolves one full exchange.

use rand::Rng;

use super::state::{GameEvent, GameState, Phase};
use super::{TILE_SIZE, WORLD_HEIGHT, WORLD_WIDTH};

/// Gold bounty for a kill, on top of any treasure.
const KILL_BOUNTY: i32 = 10;

/// Strikes the engaged enemy; if it survives, it strikes back.
pub fn attack(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    let Phase::Combat { enemy_id } = state.phase else {
        return Vec::new();
    };
    let Some(index) = state.enemies.iter().position(|e| e.id == enemy_id) else {
        state.phase = Phase::Playing;
        return Vec::new();
    };
    let mut events = Vec::new();

    let damage = state.player.weapon.damage() + rng.random_range(0..10);
    state.enemies[index].health -= damage;
    events.push(GameEvent::EnemyStruck { enemy_id, damage });

    if state.enemies[index].health <= 0 {
        state.enemies.remove(index);
        state.player.gold += KILL_BOUNTY;
        state.phase = Phase::Playing;
        events.push(GameEvent::EnemyDefeated {
            enemy_id,
            gold: KILL_BOUNTY,
        });
        return events;
    }

    let raw = state.enemies[index].kind.attack_damage(state.level, rng);
    let damage = (raw - state.player.armor.defense()).max(1);
    state.player.health -= damage;
    events.push(GameEvent::PlayerStruck { damage });

    if state.player.health <= 0 {
        state.player.health = 0;
        state.phase = Phase::Lost;
        events.push(GameEvent::GameOver);
    }
    events
}

/// Breaks off combat by darting two tiles away from the enemy. Always
/// succeeds; the enemy keeps chasing afterwards.
pub fn flee(state: &mut GameState) -> Vec<GameEvent> {
    let Phase::Combat { enemy_id } = state.phase else {
        return Vec::new();
    };
    if let Some(enemy) = state.enemy(enemy_id) {
        let dx = state.player.x - enemy.x;
        let dy = state.player.y - enemy.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > f32::EPSILON {
            let hop = TILE_SIZE * 2.0;
            state.player.x =
                (state.player.x + dx / dist * hop).clamp(0.0, WORLD_WIDTH - TILE_SIZE);
            state.player.y =
                (state.player.y + dy / dist * hop).clamp(0.0, WORLD_HEIGHT - TILE_SIZE);
        }
    }
    state.phase = Phase::Playing;
    state.reveal_around_player();
    vec![GameEvent::Fled]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::items::{Armor, EnemyKind, Weapon};
    use crate::game::level::Enemy;
    use crate::game::state::GameState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_in_combat(seed: u64, enemy_health: i32) -> GameState {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = GameState::new_game(&mut rng);
        state.enemies.clear();
        state.enemies.push(Enemy {
            id: 500,
            kind: EnemyKind::Mouse,
            x: state.player.x + TILE_SIZE,
            y: state.player.y,
            health: enemy_health,
            max_health: enemy_health,
        });
        state.phase = Phase::Combat { enemy_id: 500 };
        state
    }

    #[test]
    fn test_attack_damages_enemy_within_weapon_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = state_in_combat(1, 1000);
        let events = attack(&mut state, &mut rng);
        let Some(GameEvent::EnemyStruck { damage, .. }) = events.first() else {
            panic!("expected an enemy strike");
        };
        let base = Weapon::Whip.damage();
        assert!((base..base + 10).contains(damage));
        assert_eq!(state.enemies[0].health, 1000 - damage);
    }

    #[test]
    fn test_kill_awards_bounty_and_resumes_play() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = state_in_combat(2, 1);
        let gold_before = state.player.gold;
        let events = attack(&mut state, &mut rng);
        assert!(events.contains(&GameEvent::EnemyDefeated {
            enemy_id: 500,
            gold: KILL_BOUNTY
        }));
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.gold, gold_before + KILL_BOUNTY);
        assert_eq!(state.phase, Phase::Playing);
        // The dead enemy never strikes back.
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_surviving_enemy_strikes_back_through_armor() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = state_in_combat(3, 1000);
        state.player.armor = Armor::EnchantedPlate;
        let events = attack(&mut state, &mut rng);
        let Some(GameEvent::PlayerStruck { damage }) = events.get(1) else {
            panic!("expected a counterattack");
        };
        assert!(*damage >= 1);
        assert_eq!(state.player.health, 100 - damage);
        assert_eq!(state.phase, Phase::Combat { enemy_id: 500 });
    }

    #[test]
    fn test_player_death_ends_the_run() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = state_in_combat(4, 1000);
        state.player.health = 1;
        let events = attack(&mut state, &mut rng);
        assert!(events.contains(&GameEvent::GameOver));
        assert_eq!(state.phase, Phase::Lost);
        assert_eq!(state.player.health, 0);
    }

    #[test]
    fn test_flee_teleports_away_and_resumes_play() {
        let mut state = state_in_combat(5, 1000);
        let enemy_x = state.enemies[0].x;
        let x_before = state.player.x;
        let events = flee(&mut state);
        assert_eq!(events, vec![GameEvent::Fled]);
        assert_eq!(state.phase, Phase::Playing);
        // Enemy sits to the right, so the player darts left.
        assert!(state.player.x < x_before);
        assert!((enemy_x - state.player.x).abs() > TILE_SIZE);
    }

    #[test]
    fn test_combat_actions_require_combat_phase() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut state = GameState::new_game(&mut rng);
        assert!(attack(&mut state, &mut rng).is_empty());
        assert!(flee(&mut state).is_empty());
    }
}
