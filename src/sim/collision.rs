//! Collision detection and response
//!
//! All shapes are axis-aligned rectangles. Each non-ephemeral entity is resolved
//! once per frame, right after it moves:
//! - pickups against the player
//! - player projectiles against enemies and the boss
//! - anything hostile against the player

use glam::Vec2;

use super::combat::{self, HurtOutcome};
use super::effects;
use super::entity::{ColorTag, EntityKind};
use super::input::TickInput;
use super::state::{GameEvent, SimState};
use crate::consts::*;

/// Horizontal shove applied to an enemy that breaks the player's shield
pub const SHIELD_KNOCKBACK: f32 = 20.0;

/// Strict AABB overlap; touching edges do not count
#[inline]
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Resolve collisions for the entity at `index`. Only entities below
/// `frame_len` are considered as projectile targets.
pub fn resolve(state: &mut SimState, index: usize, input: &TickInput, frame_len: usize) {
    let Some(entity) = state.entities.get(index) else {
        return;
    };
    if entity.is_removed() {
        return;
    }

    if entity.is_pickup() {
        if entity.overlaps(&state.player) {
            collect_pickup(state, index, input);
        }
    } else if entity.is_player_projectile() {
        resolve_projectile(state, index, frame_len);
    } else if let Some(damage) = entity.contact_damage() {
        if entity.overlaps(&state.player) {
            contact_player(state, index, damage);
        }
    }
}

fn collect_pickup(state: &mut SimState, index: usize, input: &TickInput) {
    let Some(kind) = state.entities.get(index).map(|e| e.kind) else {
        return;
    };

    match kind {
        EntityKind::WeaponDrop { weapon, .. } => {
            if !input.interact {
                return;
            }
            state.stats.equip(weapon);
            state.entities.mark_removed(index);
            let at = state.player.pos;
            effects::explosion(state, at, ColorTag::Pickup, 2.0);
            state.push_event(GameEvent::WeaponEquipped { weapon });
            log::info!("Equipped {}", weapon.name());
        }
        EntityKind::Medkit { .. } => {
            state.entities.mark_removed(index);
            if let Some(health) = state.player.health_mut() {
                health.heal(MEDKIT_HEAL);
            }
            state.score.add(MEDKIT_SCORE);
            let at = state.player.center();
            effects::explosion(state, at, ColorTag::Medkit, 2.0);
            state.push_event(GameEvent::MedkitUsed);
        }
        EntityKind::Collectible { .. } => {
            state.entities.mark_removed(index);
            state.score.add(SHARD_SCORE);
            state.push_event(GameEvent::ShardCollected);
            if state.score.add_shard() {
                let level = state.score.level;
                state.push_event(GameEvent::LevelUp { level });
                log::info!("Level up: {}", level);
            }
        }
        _ => {}
    }
}

fn resolve_projectile(state: &mut SimState, index: usize, frame_len: usize) {
    let Some((pos, size, kind)) = state.entities.get(index).map(|e| (e.pos, e.size, e.kind)) else {
        return;
    };
    let (grenade, piercing) = match kind {
        EntityKind::ProjectileGrenade(_) => (true, false),
        EntityKind::ProjectilePlayer(shot) => (false, shot.piercing),
        _ => return,
    };

    for target in 0..frame_len.min(state.entities.len()) {
        if target == index || !state.entities.is_live(target) {
            continue;
        }
        let Some((target_pos, target_color)) = state
            .entities
            .get(target)
            .filter(|t| t.is_damageable_target() && rects_overlap(pos, size, t.pos, t.size))
            .map(|t| (t.pos, t.color))
        else {
            continue;
        };

        let crit_roll = state.roll();
        let hit = combat::compute_damage(&state.stats, state.player_hp(), state.player_max_hp(), crit_roll);
        if hit.crit {
            effects::explosion(state, target_pos, ColorTag::Crit, 0.5);
        }
        effects::explosion(state, pos, target_color, 0.5);
        combat::damage_target(state, target, hit.damage);

        if grenade {
            state.entities.mark_removed(index);
            effects::explosion(state, pos, ColorTag::Grenade, 3.0);
            return;
        }
        if !piercing {
            state.entities.mark_removed(index);
            return;
        }
    }
}

fn contact_player(state: &mut SimState, index: usize, damage: f32) {
    let Some((pos, color, kind, physical)) = state
        .entities
        .get(index)
        .map(|e| (e.pos, e.color, e.kind, e.knocked_back_by_shield()))
    else {
        return;
    };

    match kind {
        EntityKind::EnemyKamikaze(_) => {
            state.entities.mark_removed(index);
            effects::explosion(state, pos, color, 4.0);
        }
        EntityKind::ProjectileEnemy => {
            state.entities.mark_removed(index);
        }
        _ => {}
    }

    if combat::hurt_player(state, damage) == HurtOutcome::Blocked && physical {
        if let Some(attacker) = state.entities.get_mut(index) {
            attacker.vel.x = SHIELD_KNOCKBACK;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::BossAttack;
    use crate::sim::entity::{Body, BossBrain, Fade, Gunner, Shot};
    use crate::sim::stats::WeaponType;

    fn at_player(state: &mut SimState, kind: EntityKind, size: Vec2, color: ColorTag) -> usize {
        let pos = state.player.pos;
        state.spawn(kind, pos, size, Vec2::ZERO, color);
        state.entities.len() - 1
    }

    fn resolve_all(state: &mut SimState, input: &TickInput) {
        let frame_len = state.entities.len();
        for i in 0..frame_len {
            resolve(state, i, input, frame_len);
        }
    }

    fn bolt(piercing: bool) -> EntityKind {
        EntityKind::ProjectilePlayer(Shot {
            piercing,
            homing: false,
            life: 100.0,
            max_life: 100.0,
            drift: 0.0,
        })
    }

    fn add_drone(state: &mut SimState, pos: Vec2, hp: f32) -> usize {
        state.spawn(
            EntityKind::EnemyDrone(Body::new(hp, -1.0)),
            pos,
            Vec2::new(50.0, 40.0),
            Vec2::ZERO,
            ColorTag::Enemy,
        );
        state.entities.len() - 1
    }

    #[test]
    fn test_rects_overlap_is_strict() {
        let size = Vec2::splat(10.0);
        assert!(rects_overlap(Vec2::ZERO, size, Vec2::splat(5.0), size));
        assert!(!rects_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!rects_overlap(Vec2::ZERO, size, Vec2::new(0.0, 10.0), size));
    }

    #[test]
    fn test_weapon_drop_needs_interact() {
        let mut state = SimState::new(1, 0);
        let drop = at_player(
            &mut state,
            EntityKind::WeaponDrop {
                weapon: WeaponType::Railgun,
                rotation: 0.0,
            },
            Vec2::splat(40.0),
            ColorTag::WeaponDrop,
        );
        resolve_all(&mut state, &TickInput::default());
        assert!(state.entities.is_live(drop));
        assert_eq!(state.stats.weapon, WeaponType::Pistol);

        let interact = TickInput {
            interact: true,
            ..Default::default()
        };
        resolve(&mut state, drop, &interact, drop + 1);
        assert!(!state.entities.is_live(drop));
        assert_eq!(state.stats.weapon, WeaponType::Railgun);
        assert_eq!(state.stats.damage, 45.0);
        assert!(state.events.contains(&GameEvent::WeaponEquipped {
            weapon: WeaponType::Railgun
        }));
    }

    #[test]
    fn test_medkit_heals_and_scores() {
        let mut state = SimState::new(1, 0);
        if let Some(h) = state.player.health_mut() {
            h.hp = 50.0;
        }
        at_player(
            &mut state,
            EntityKind::Medkit { rotation: 0.0 },
            Vec2::new(30.0, 25.0),
            ColorTag::Medkit,
        );
        resolve_all(&mut state, &TickInput::default());
        assert_eq!(state.player_hp(), 80.0);
        assert_eq!(state.score.current, MEDKIT_SCORE);
    }

    #[test]
    fn test_tenth_shard_levels_up() {
        let mut state = SimState::new(1, 0);
        for _ in 0..10 {
            at_player(
                &mut state,
                EntityKind::Collectible { rotation: 0.0 },
                Vec2::splat(25.0),
                ColorTag::Shard,
            );
        }
        resolve_all(&mut state, &TickInput::default());
        assert_eq!(state.score.level, 2);
        assert_eq!(state.score.shards, 0);
        assert_eq!(state.score.shard_target, 15);
        assert_eq!(state.score.current, 10.0 * SHARD_SCORE);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_piercing_shot_hits_every_overlap() {
        let mut state = SimState::new(1, 0);
        state.stats.damage = 45.0;
        let a = add_drone(&mut state, Vec2::new(500.0, 200.0), 30.0);
        let b = add_drone(&mut state, Vec2::new(540.0, 200.0), 30.0);
        state.spawn(
            bolt(true),
            Vec2::new(480.0, 210.0),
            Vec2::new(100.0, 10.0),
            Vec2::ZERO,
            ColorTag::Railgun,
        );
        let shot = state.entities.len() - 1;
        let frame_len = state.entities.len();
        resolve(&mut state, shot, &TickInput::default(), frame_len);

        assert!(!state.entities.is_live(a));
        assert!(!state.entities.is_live(b));
        assert!(state.entities.is_live(shot));
        assert_eq!(state.score.current, 2.0 * ENEMY_KILL_SCORE);
    }

    #[test]
    fn test_regular_shot_stops_at_first_hit() {
        let mut state = SimState::new(1, 0);
        let a = add_drone(&mut state, Vec2::new(500.0, 200.0), 100.0);
        let b = add_drone(&mut state, Vec2::new(540.0, 200.0), 100.0);
        state.spawn(
            bolt(false),
            Vec2::new(530.0, 210.0),
            Vec2::splat(20.0),
            Vec2::ZERO,
            ColorTag::PlayerShot,
        );
        let shot = state.entities.len() - 1;
        let frame_len = state.entities.len();
        resolve(&mut state, shot, &TickInput::default(), frame_len);

        assert!(!state.entities.is_live(shot));
        assert_eq!(state.entities.get(a).unwrap().hp(), 75.0);
        assert_eq!(state.entities.get(b).unwrap().hp(), 100.0);
    }

    #[test]
    fn test_targets_beyond_frame_len_are_ignored() {
        let mut state = SimState::new(1, 0);
        state.spawn(
            bolt(false),
            Vec2::new(530.0, 210.0),
            Vec2::splat(20.0),
            Vec2::ZERO,
            ColorTag::PlayerShot,
        );
        let drone = add_drone(&mut state, Vec2::new(500.0, 200.0), 100.0);
        resolve(&mut state, 0, &TickInput::default(), 1);
        assert!(state.entities.is_live(0));
        assert_eq!(state.entities.get(drone).unwrap().hp(), 100.0);
    }

    #[test]
    fn test_shield_knocks_back_and_absorbs() {
        let mut state = SimState::new(1, 0);
        state.stats.has_shield = true;
        let walker = at_player(
            &mut state,
            EntityKind::EnemyDrone(Body::new(30.0, -1.0)),
            Vec2::new(50.0, 40.0),
            ColorTag::Enemy,
        );
        resolve_all(&mut state, &TickInput::default());
        assert_eq!(state.player_hp(), 100.0);
        assert_eq!(state.entities.get(walker).unwrap().vel.x, SHIELD_KNOCKBACK);
        assert!(state.events.contains(&GameEvent::ShieldBroken));
    }

    fn grenade() -> EntityKind {
        EntityKind::ProjectileGrenade(Shot {
            piercing: false,
            homing: false,
            life: 100.0,
            max_life: 100.0,
            drift: 0.5,
        })
    }

    fn boss() -> EntityKind {
        EntityKind::Boss(BossBrain {
            body: Body::new(960.0, -1.0),
            attack_timer: 0,
            attack: BossAttack::Idle,
        })
    }

    #[test]
    fn test_grenade_hits_direct_target_only() {
        let mut state = SimState::new(1, 0);
        let a = add_drone(&mut state, Vec2::new(500.0, 200.0), 100.0);
        let b = add_drone(&mut state, Vec2::new(540.0, 200.0), 100.0);
        state.spawn(grenade(), Vec2::new(530.0, 210.0), Vec2::splat(20.0), Vec2::ZERO, ColorTag::Grenade);
        let shell = state.entities.len() - 1;
        let frame_len = state.entities.len();
        resolve(&mut state, shell, &TickInput::default(), frame_len);

        assert!(!state.entities.is_live(shell));
        assert_eq!(state.entities.get(a).unwrap().hp(), 75.0);
        // The blast is cosmetic
        assert_eq!(state.entities.get(b).unwrap().hp(), 100.0);
        let blast_len = state.entities.len();
        for i in frame_len..blast_len {
            resolve(&mut state, i, &TickInput::default(), blast_len);
        }
        assert_eq!(state.entities.get(b).unwrap().hp(), 100.0);
    }

    #[test]
    fn test_contact_damage_by_source() {
        let tank = EntityKind::EnemyTank(Gunner {
            body: Body::new(150.0, -1.0),
            attack_timer: 0.0,
        });
        let cases = [
            (tank, Vec2::new(80.0, 60.0), ColorTag::Tank, 75.0),
            (boss(), Vec2::new(160.0, 140.0), ColorTag::Boss, 80.0),
            (EntityKind::ProjectileEnemy, Vec2::splat(15.0), ColorTag::EnemyShot, 90.0),
        ];
        for (kind, size, color, hp) in cases {
            let mut state = SimState::new(1, 0);
            at_player(&mut state, kind, size, color);
            resolve_all(&mut state, &TickInput::default());
            assert_eq!(state.player_hp(), hp, "{:?}", kind);
        }
    }

    #[test]
    fn test_beam_burns_every_frame() {
        let mut state = SimState::new(1, 0);
        let beam = at_player(
            &mut state,
            EntityKind::LaserBeam(Fade::new(40.0)),
            Vec2::new(CANVAS_WIDTH, 40.0),
            ColorTag::Laser,
        );
        for _ in 0..3 {
            resolve(&mut state, beam, &TickInput::default(), beam + 1);
        }
        assert_eq!(state.player_hp(), 94.0);
        assert!(state.entities.is_live(beam));
    }

    #[test]
    fn test_shield_blocks_non_physical_hits_without_knockback() {
        let cases = [
            (boss(), Vec2::new(160.0, 140.0), ColorTag::Boss),
            (EntityKind::LaserBeam(Fade::new(40.0)), Vec2::new(CANVAS_WIDTH, 40.0), ColorTag::Laser),
            (EntityKind::ProjectileEnemy, Vec2::splat(15.0), ColorTag::EnemyShot),
        ];
        for (kind, size, color) in cases {
            let mut state = SimState::new(1, 0);
            state.stats.has_shield = true;
            let attacker = at_player(&mut state, kind, size, color);
            resolve(&mut state, attacker, &TickInput::default(), attacker + 1);

            assert_eq!(state.player_hp(), 100.0, "{:?}", kind);
            assert!(!state.stats.has_shield);
            assert!(state.events.contains(&GameEvent::ShieldBroken));
            assert_eq!(state.entities.get(attacker).unwrap().vel, Vec2::ZERO, "{:?}", kind);
        }
    }

    #[test]
    fn test_kamikaze_detonates_on_contact() {
        let mut state = SimState::new(1, 0);
        let k = at_player(
            &mut state,
            EntityKind::EnemyKamikaze(Body::new(20.0, -1.0)),
            Vec2::splat(40.0),
            ColorTag::Kamikaze,
        );
        resolve_all(&mut state, &TickInput::default());
        assert!(!state.entities.is_live(k));
        assert_eq!(state.player_hp(), 60.0);
    }

    #[test]
    fn test_effects_never_collide() {
        let mut state = SimState::new(1, 0);
        at_player(
            &mut state,
            EntityKind::LaserWarning(crate::sim::entity::Fade::new(60.0)),
            Vec2::new(CANVAS_WIDTH, 10.0),
            ColorTag::LaserWarning,
        );
        resolve_all(&mut state, &TickInput::default());
        assert_eq!(state.player_hp(), 100.0);
    }
}
