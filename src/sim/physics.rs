//! Per-kind motion rules
//!
//! Called once per frame for every entity in the frame's visible range.
//! World scroll is frozen while a boss is active.

use glam::Vec2;

use super::boss;
use super::entity::{ColorTag, EntityKind};
use super::state::SimState;
use crate::consts::*;
use crate::{aim_angle, direction};

/// Homing search radius
pub const HOMING_RANGE: f32 = 400.0;
/// Steering acceleration per frame
pub const HOMING_ACCEL: f32 = 1.5;
/// Speed ceiling for homing projectiles
pub const HOMING_MAX_SPEED: f32 = 20.0;
/// Fraction of the remaining distance a magnetized pickup covers per frame
pub const MAGNET_PULL: f32 = 0.25;
/// Vertical closure rate of kamikaze units toward the player
pub const KAMIKAZE_TRACKING: f32 = 0.05;
pub const PICKUP_SPIN: f32 = 0.2;

const GUNNER_FIRE_FRAMES: f32 = 150.0;
const TANK_FIRE_FRAMES: f32 = 200.0;

/// Whether a position is far enough outside the viewport to cull
pub fn out_of_bounds(pos: Vec2) -> bool {
    pos.x < -CULL_MARGIN
        || pos.x > CANVAS_WIDTH + CULL_MARGIN
        || pos.y < -CULL_MARGIN
        || pos.y > CANVAS_HEIGHT + CULL_MARGIN
}

#[inline]
fn on_screen(x: f32) -> bool {
    x > 0.0 && x < CANVAS_WIDTH
}

/// Accelerate toward `target` and cap the resulting speed
pub fn steer(vel: Vec2, from: Vec2, target: Vec2) -> Vec2 {
    let steered = vel + direction(aim_angle(from, target)) * HOMING_ACCEL;
    let speed = steered.length();
    if speed > HOMING_MAX_SPEED {
        steered * (HOMING_MAX_SPEED / speed)
    } else {
        steered
    }
}

/// An aimed shot fired by a walker, turret or tank
struct GunnerShot {
    origin: Vec2,
    angle: f32,
    speed: f32,
    size: f32,
}

/// Advance one entity by a frame. Homing only considers targets below
/// `frame_len`, the population at the start of the frame.
pub fn integrate(state: &mut SimState, index: usize, frame_len: usize) {
    if matches!(state.entities.get(index).map(|e| &e.kind), Some(EntityKind::Boss(_))) {
        boss::update(state, index);
    }

    let frame = state.frame;
    let scroll = !state.boss_active;
    let player_pos = state.player.pos;
    let player_center = state.player.center();
    let magnet_range = state.stats.magnet_range;

    let Some(entity) = state.entities.get_mut(index) else {
        return;
    };
    let tank = matches!(entity.kind, EntityKind::EnemyTank(_));

    let mut expired = false;
    let mut shot: Option<GunnerShot> = None;
    let mut homing = false;

    match &mut entity.kind {
        EntityKind::Player(_) | EntityKind::Boss(_) => {}
        EntityKind::EnemyDrone(body) => {
            if scroll {
                entity.pos.x += entity.vel.x;
            }
            body.anim_frame += 1;
            entity.pos.y += (frame as f32 * 0.1).sin() * 3.0;
        }
        EntityKind::EnemyWalker(gunner) | EntityKind::EnemyTurret(gunner) | EntityKind::EnemyTank(gunner) => {
            if scroll {
                entity.pos.x += entity.vel.x;
            }
            gunner.body.anim_frame += 1;
            gunner.attack_timer += 1.0;

            let fire_frames = if tank { TANK_FIRE_FRAMES } else { GUNNER_FIRE_FRAMES };
            if gunner.attack_timer > fire_frames {
                if on_screen(entity.pos.x) {
                    let center = crate::rect_center(entity.pos, entity.size);
                    shot = Some(GunnerShot {
                        origin: Vec2::new(entity.pos.x, center.y),
                        angle: aim_angle(center, player_center),
                        speed: if tank { 5.0 } else { 7.0 },
                        size: if tank { 25.0 } else { 15.0 },
                    });
                }
                gunner.attack_timer = 0.0;
            }
        }
        EntityKind::EnemyKamikaze(body) => {
            if scroll {
                entity.pos.x += entity.vel.x;
            }
            body.anim_frame += 1;
            if on_screen(entity.pos.x) {
                entity.pos.y += (player_pos.y - entity.pos.y) * KAMIKAZE_TRACKING;
            }
        }
        EntityKind::ProjectilePlayer(s) => {
            entity.pos += entity.vel;
            homing = s.homing && !s.piercing;
        }
        EntityKind::ProjectileGrenade(s) => {
            entity.pos += entity.vel;
            entity.vel.y += s.drift;
        }
        EntityKind::ProjectileEnemy => {
            entity.pos += entity.vel;
        }
        EntityKind::Particle(spark) => {
            entity.pos += entity.vel;
            entity.vel.y += spark.drift;
            expired = spark.fade.tick();
        }
        EntityKind::Explosion(fade) | EntityKind::LaserWarning(fade) | EntityKind::LaserBeam(fade) => {
            expired = fade.tick();
        }
        EntityKind::Collectible { rotation } | EntityKind::Medkit { rotation } => {
            *rotation += PICKUP_SPIN;
            if player_pos.distance(entity.pos) < magnet_range {
                entity.pos += (player_pos - entity.pos) * MAGNET_PULL;
            } else if scroll {
                entity.pos.x -= BASE_SCROLL_SPEED;
            }
        }
        // Weapon drops must be picked up deliberately, so they are not magnetized
        EntityKind::WeaponDrop { rotation, .. } => {
            *rotation += PICKUP_SPIN;
            if scroll {
                entity.pos.x -= BASE_SCROLL_SPEED;
            }
        }
    }

    let culled = out_of_bounds(entity.pos);

    if expired || culled {
        state.entities.mark_removed(index);
        return;
    }

    if homing {
        steer_toward_nearest(state, index, frame_len);
    }

    if let Some(shot) = shot {
        state.spawn(
            EntityKind::ProjectileEnemy,
            shot.origin,
            Vec2::splat(shot.size),
            direction(shot.angle) * shot.speed,
            ColorTag::EnemyShot,
        );
    }
}

/// Nearest live damageable target within range of `from`
fn nearest_target(state: &SimState, from: Vec2, frame_len: usize) -> Option<Vec2> {
    let visible = &state.entities.as_slice()[..frame_len.min(state.entities.len())];
    visible
        .iter()
        .filter(|e| !e.is_removed() && e.is_damageable_target())
        .map(|e| (e.pos.distance(from), e.center()))
        .filter(|(dist, _)| *dist < HOMING_RANGE)
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, center)| center)
}

fn steer_toward_nearest(state: &mut SimState, index: usize, frame_len: usize) {
    let Some(pos) = state.entities.get(index).map(|e| e.pos) else {
        return;
    };
    let Some(target) = nearest_target(state, pos, frame_len) else {
        return;
    };
    if let Some(projectile) = state.entities.get_mut(index) {
        projectile.vel = steer(projectile.vel, projectile.pos, target);
    }
}
