//! Procedural spawning
//!
//! Runs on the spawn interval: either the boss (score gated) or one categorical
//! roll among weapon drop, medkit, shard and enemy. Difficulty comes from score
//! thresholds that unlock tougher enemy tiers.

use glam::Vec2;

use super::boss::BossAttack;
use super::entity::{Body, BossBrain, ColorTag, EntityKind, Gunner};
use super::state::{GameEvent, SimState};
use super::stats::WeaponType;
use crate::consts::*;

/// Enemy tiers in unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyTier {
    Drone,
    Walker,
    Turret,
    Kamikaze,
    Tank,
}

impl EnemyTier {
    /// Score the tier unlocks after (exclusive)
    pub fn unlock_score(self) -> f64 {
        match self {
            EnemyTier::Drone => 0.0,
            EnemyTier::Walker => 300.0,
            EnemyTier::Turret => 1000.0,
            EnemyTier::Kamikaze => 1500.0,
            EnemyTier::Tank => 2500.0,
        }
    }

    fn unlocked(self, score: f64) -> bool {
        self == EnemyTier::Drone || score > self.unlock_score()
    }
}

/// Boss hp for the current level: 800 x (1 + level x 0.2)
pub fn boss_max_hp(level: u32) -> f32 {
    // Expanded so whole levels give exact values
    800.0 + 160.0 * level as f32
}

/// Boss appears on every 3000-point boundary past 1000 points
pub fn boss_due(score: f64, boss_active: bool) -> bool {
    let floored = score.max(0.0).floor() as u64;
    !boss_active && score > 1000.0 && floored % 3000 < 50
}

/// Pick the enemy tier for a roll in [0,1); higher rolls favor tougher tiers
pub fn choose_enemy(score: f64, roll: f32) -> EnemyTier {
    const LADDER: [(EnemyTier, f32); 4] = [
        (EnemyTier::Tank, 0.9),
        (EnemyTier::Kamikaze, 0.8),
        (EnemyTier::Turret, 0.65),
        (EnemyTier::Walker, 0.45),
    ];
    LADDER
        .iter()
        .find(|(tier, threshold)| tier.unlocked(score) && roll > *threshold)
        .map_or(EnemyTier::Drone, |(tier, _)| *tier)
}

/// Weapon for a periodic weapon drop, common weapons weighted first
pub fn choose_drop_weapon(roll: f32) -> WeaponType {
    if roll > 0.8 {
        WeaponType::PlasmaCannon
    } else if roll > 0.6 {
        WeaponType::Railgun
    } else if roll > 0.4 {
        WeaponType::GrenadeLauncher
    } else if roll > 0.2 {
        WeaponType::Laser
    } else {
        WeaponType::Shotgun
    }
}

/// Run the spawn director for the current frame
pub fn update(state: &mut SimState) {
    if state.boss_active || state.frame % state.stats.spawn_interval() != 0 {
        return;
    }

    if boss_due(state.score.current, state.boss_active) {
        spawn_boss(state);
        return;
    }

    let roll = state.roll();
    let x = CANVAS_WIDTH + 100.0;
    if roll < 0.03 {
        let weapon = choose_drop_weapon(state.roll());
        spawn_weapon_drop(state, Vec2::new(x, GROUND_Y - 60.0), weapon);
    } else if roll < 0.08 {
        spawn_medkit(state, Vec2::new(x, GROUND_Y - 50.0));
    } else if roll < 0.20 {
        let y = GROUND_Y - 50.0 - state.roll_to(200.0);
        spawn_shard(state, Vec2::new(x, y));
    } else {
        let tier = choose_enemy(state.score.current, state.roll());
        spawn_enemy(state, tier, x);
    }
}

fn spawn_boss(state: &mut SimState) {
    let max_hp = boss_max_hp(state.score.level);
    state.spawn(
        EntityKind::Boss(BossBrain {
            body: Body::new(max_hp, -1.0),
            attack_timer: 0,
            attack: BossAttack::Idle,
        }),
        Vec2::new(CANVAS_WIDTH + 150.0, GROUND_Y - 300.0),
        Vec2::new(160.0, 140.0),
        Vec2::new(-2.0, 0.0),
        ColorTag::Boss,
    );
    state.boss_active = true;
    state.push_event(GameEvent::BossSpawned { max_hp });
    log::info!("Boss spawned at score {} (hp {})", state.score.floored(), max_hp);
}

fn spawn_enemy(state: &mut SimState, tier: EnemyTier, x: f32) {
    let scroll = BASE_SCROLL_SPEED;
    match tier {
        EnemyTier::Tank => {
            let timer = state.roll_to(100.0);
            state.spawn(
                EntityKind::EnemyTank(gunner(150.0, timer)),
                Vec2::new(x, GROUND_Y - 90.0),
                Vec2::new(90.0, 80.0),
                Vec2::new(-scroll * 0.4, 0.0),
                ColorTag::Tank,
            );
        }
        EnemyTier::Kamikaze => {
            let y = GROUND_Y - 100.0 - state.roll_to(200.0);
            state.spawn(
                EntityKind::EnemyKamikaze(Body::new(20.0, -1.0)),
                Vec2::new(x, y),
                Vec2::splat(40.0),
                Vec2::new(-scroll * 1.5, 0.0),
                ColorTag::Kamikaze,
            );
        }
        EnemyTier::Turret => {
            let y = GROUND_Y - 200.0 - state.roll_to(100.0);
            let timer = state.roll_to(100.0);
            state.spawn(
                EntityKind::EnemyTurret(gunner(50.0, timer)),
                Vec2::new(x, y),
                Vec2::splat(60.0),
                Vec2::new(-scroll, 0.0),
                ColorTag::Turret,
            );
        }
        EnemyTier::Walker => {
            let timer = state.roll_to(100.0);
            state.spawn(
                EntityKind::EnemyWalker(gunner(60.0, timer)),
                Vec2::new(x, GROUND_Y - 80.0),
                Vec2::new(60.0, 70.0),
                Vec2::new(-scroll * 0.8, 0.0),
                ColorTag::Enemy,
            );
        }
        EnemyTier::Drone => {
            let y = GROUND_Y - 120.0 - state.roll_to(250.0);
            state.spawn(
                EntityKind::EnemyDrone(Body::new(30.0, -1.0)),
                Vec2::new(x, y),
                Vec2::new(50.0, 40.0),
                Vec2::new(-scroll * 1.1, 0.0),
                ColorTag::Enemy,
            );
        }
    }
    log::debug!("Spawned {:?} at frame {}", tier, state.frame);
}

fn gunner(max_hp: f32, attack_timer: f32) -> Gunner {
    Gunner {
        body: Body::new(max_hp, -1.0),
        attack_timer,
    }
}

pub fn spawn_weapon_drop(state: &mut SimState, pos: Vec2, weapon: WeaponType) {
    state.spawn(
        EntityKind::WeaponDrop { weapon, rotation: 0.0 },
        pos,
        Vec2::splat(40.0),
        Vec2::new(-BASE_SCROLL_SPEED, 0.0),
        ColorTag::WeaponDrop,
    );
}

pub fn spawn_medkit(state: &mut SimState, pos: Vec2) {
    state.spawn(
        EntityKind::Medkit { rotation: 0.0 },
        pos,
        Vec2::new(30.0, 25.0),
        Vec2::new(-BASE_SCROLL_SPEED, 0.0),
        ColorTag::Medkit,
    );
}

pub fn spawn_shard(state: &mut SimState, pos: Vec2) {
    state.spawn(
        EntityKind::Collectible { rotation: 0.0 },
        pos,
        Vec2::splat(25.0),
        Vec2::new(-BASE_SCROLL_SPEED, 0.0),
        ColorTag::Shard,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bosses(state: &SimState) -> usize {
        state.entities.iter().filter(|e| e.is_boss()).count()
    }

    #[test]
    fn test_boss_due() {
        assert!(!boss_due(900.0, false));
        assert!(!boss_due(1001.0, false));
        assert!(boss_due(3000.0, false));
        assert!(boss_due(3049.5, false));
        assert!(!boss_due(3050.0, false));
        assert!(!boss_due(6010.0, true));
    }

    #[test]
    fn test_boss_hp_scales_with_level() {
        assert_eq!(boss_max_hp(1), 960.0);
        assert_eq!(boss_max_hp(2), 1120.0);
    }

    #[test]
    fn test_boss_spawns_once_with_scaled_hp() {
        let mut state = SimState::new(5, 0);
        state.score.current = 3001.0;
        state.frame = 70;
        update(&mut state);

        assert!(state.boss_active);
        assert_eq!(bosses(&state), 1);
        let boss = state.entities.iter().find(|e| e.is_boss()).unwrap();
        assert_eq!(boss.hp(), 960.0);
        assert!(state.events.contains(&GameEvent::BossSpawned { max_hp: 960.0 }));

        // Boss active: no further spawns of any kind
        for frame in [140, 210, 280] {
            state.frame = frame;
            update(&mut state);
        }
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_spawns_only_on_interval() {
        let mut state = SimState::new(5, 0);
        state.frame = 69;
        update(&mut state);
        assert!(state.entities.is_empty());
        state.frame = 70;
        update(&mut state);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_enemy_tiers_gated_by_score() {
        // Low score: everything is a drone
        assert_eq!(choose_enemy(0.0, 0.99), EnemyTier::Drone);
        assert_eq!(choose_enemy(301.0, 0.99), EnemyTier::Walker);
        assert_eq!(choose_enemy(1001.0, 0.99), EnemyTier::Turret);
        assert_eq!(choose_enemy(1501.0, 0.99), EnemyTier::Kamikaze);
        assert_eq!(choose_enemy(2501.0, 0.99), EnemyTier::Tank);

        // Low rolls stay easy even late
        assert_eq!(choose_enemy(5000.0, 0.1), EnemyTier::Drone);
        assert_eq!(choose_enemy(5000.0, 0.5), EnemyTier::Walker);
        assert_eq!(choose_enemy(5000.0, 0.7), EnemyTier::Turret);
        assert_eq!(choose_enemy(5000.0, 0.85), EnemyTier::Kamikaze);
    }

    #[test]
    fn test_drop_weapon_table() {
        assert_eq!(choose_drop_weapon(0.1), WeaponType::Shotgun);
        assert_eq!(choose_drop_weapon(0.3), WeaponType::Laser);
        assert_eq!(choose_drop_weapon(0.5), WeaponType::GrenadeLauncher);
        assert_eq!(choose_drop_weapon(0.7), WeaponType::Railgun);
        assert_eq!(choose_drop_weapon(0.9), WeaponType::PlasmaCannon);
    }
}
