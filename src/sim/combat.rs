//! Damage, kills and loot
//!
//! Pure rules ([`compute_damage`], [`loot_for_roll`]) are separated from the
//! state mutations so they can be tested with fixed rolls.

use glam::Vec2;

use super::effects;
use super::entity::ColorTag;
use super::spawn;
use super::state::{GameEvent, SimState};
use super::stats::{StatsProfile, WeaponType};
use crate::consts::*;

/// Below this many tenths of max hp the low-hp boost kicks in
pub const LOW_HP_TENTHS: f32 = 3.0;
pub const LOW_HP_MULTIPLIER: f32 = 1.5;
pub const CRIT_MULTIPLIER: f32 = 2.0;
/// Chance that a regular kill drops anything
pub const LOOT_CHANCE: f32 = 0.2;
pub const BOSS_SHARD_COUNT: u32 = 20;
const BOSS_SHARD_SCATTER: f32 = 150.0;

/// Outcome of a damage roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub damage: f32,
    pub crit: bool,
}

/// Damage for one projectile hit. `crit_roll` is uniform in [0,1).
pub fn compute_damage(stats: &StatsProfile, player_hp: f32, player_max_hp: f32, crit_roll: f32) -> Hit {
    let mut damage = stats.damage;
    // Scaled by ten so the threshold is exact in f32 (0.3 is not)
    if stats.low_hp_damage_boost && player_hp * 10.0 < player_max_hp * LOW_HP_TENTHS {
        damage *= LOW_HP_MULTIPLIER;
    }
    let crit = crit_roll < stats.crit_chance;
    if crit {
        damage *= CRIT_MULTIPLIER;
    }
    Hit { damage, crit }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loot {
    Weapon(WeaponType),
    Medkit,
    Shard,
}

/// What a regular kill leaves behind, given the drop and weapon rolls
pub fn loot_for_roll(drop_roll: f32, weapon_roll: f32) -> Loot {
    if drop_roll < 0.1 {
        let weapon = if weapon_roll > 0.7 {
            WeaponType::GrenadeLauncher
        } else if weapon_roll > 0.4 {
            WeaponType::Railgun
        } else {
            WeaponType::Shotgun
        };
        Loot::Weapon(weapon)
    } else if drop_roll < 0.4 {
        Loot::Medkit
    } else {
        Loot::Shard
    }
}

/// Apply damage to the entity at `index`. Returns true if this hit killed it.
pub fn damage_target(state: &mut SimState, index: usize, amount: f32) -> bool {
    let Some(health) = state.entities.get_mut(index).and_then(|e| e.health_mut()) else {
        return false;
    };
    health.hp -= amount;
    if health.is_depleted() {
        kill(state, index);
        true
    } else {
        false
    }
}

/// Remove a killed enemy and pay out its rewards
fn kill(state: &mut SimState, index: usize) {
    if !state.entities.mark_removed(index) {
        return;
    }
    let Some((pos, center, color, is_boss)) = state
        .entities
        .get(index)
        .map(|e| (e.pos, e.center(), e.color, e.is_boss()))
    else {
        return;
    };

    effects::explosion(state, center, color, 4.0);
    state.score.add(if is_boss { BOSS_KILL_SCORE } else { ENEMY_KILL_SCORE });

    let lifesteal = state.stats.lifesteal;
    if lifesteal > 0.0 {
        if let Some(health) = state.player.health_mut() {
            health.heal(lifesteal);
        }
    }
    state.push_event(GameEvent::EnemyKilled { x: center.x, y: center.y });

    if is_boss {
        state.boss_active = false;
        state.shake(30.0);
        for _ in 0..BOSS_SHARD_COUNT {
            let scatter = Vec2::new(state.roll_to(BOSS_SHARD_SCATTER), state.roll_to(BOSS_SHARD_SCATTER));
            spawn::spawn_shard(state, pos + scatter);
        }
        state.push_event(GameEvent::BossDefeated);
        log::info!("Boss defeated at score {}", state.score.floored());
        return;
    }

    state.shake(2.0);
    if state.roll() < LOOT_CHANCE {
        let drop_roll = state.roll();
        let weapon_roll = state.roll();
        match loot_for_roll(drop_roll, weapon_roll) {
            Loot::Weapon(weapon) => spawn::spawn_weapon_drop(state, pos, weapon),
            Loot::Medkit => spawn::spawn_medkit(state, pos),
            Loot::Shard => spawn::spawn_shard(state, pos),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HurtOutcome {
    /// The shield absorbed the hit and is gone
    Blocked,
    Damaged,
    /// Run already over
    Ignored,
}

/// Apply contact damage to the player, honoring the one-hit shield
pub fn hurt_player(state: &mut SimState, damage: f32) -> HurtOutcome {
    if state.stats.has_shield {
        state.stats.has_shield = false;
        let at = state.player.pos;
        effects::explosion(state, at, ColorTag::Shield, 3.0);
        state.shake(15.0);
        state.push_event(GameEvent::ShieldBroken);
        log::debug!("Shield broken at frame {}", state.frame);
        return HurtOutcome::Blocked;
    }
    if state.game_over {
        return HurtOutcome::Ignored;
    }

    let depleted = match state.player.health_mut() {
        Some(health) => {
            health.hp -= damage;
            health.is_depleted()
        }
        None => false,
    };
    state.push_event(GameEvent::PlayerHit { damage });

    if state.frame % 5 == 0 {
        state.shake(5.0);
    }
    if state.frame % 10 == 0 {
        let at = state.player.pos;
        effects::explosion(state, at, ColorTag::Hurt, 1.0);
    }

    if depleted {
        state.game_over = true;
        let score = state.score.floored();
        state.push_event(GameEvent::GameOver { score });
        log::info!("Game over at frame {} with score {}", state.frame, score);
    }
    HurtOutcome::Damaged
}
