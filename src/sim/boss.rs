//! Boss attack state machine
//!
//! IDLE -> BARRAGE -> IDLE, or IDLE -> LASER_CHARGE -> LASER_FIRE -> IDLE.
//! The attack timer counts frames since the last transition.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{ColorTag, EntityKind, Fade};
use super::state::SimState;
use crate::consts::*;
use crate::{aim_angle, direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossAttack {
    #[default]
    Idle,
    Barrage,
    LaserCharge,
    LaserFire,
}

pub const IDLE_FRAMES: u32 = 120;
pub const BARRAGE_FRAMES: u32 = 120;
/// Volleys fire every N frames while the timer is below the window
pub const BARRAGE_VOLLEY_INTERVAL: u32 = 20;
pub const BARRAGE_WINDOW: u32 = 100;
pub const LASER_CHARGE_FRAMES: u32 = 60;
pub const LASER_FIRE_FRAMES: u32 = 40;
/// Chance of BARRAGE when leaving IDLE (otherwise LASER_CHARGE)
pub const BARRAGE_CHANCE: f32 = 0.4;

const BARRAGE_SPREAD: [f32; 3] = [-0.3, 0.0, 0.3];
const BARRAGE_SHOT_SPEED: f32 = 8.0;
const BARRAGE_SHOT_SIZE: f32 = 20.0;
/// Boss eases left until it reaches this x
const HOLD_X: f32 = CANVAS_WIDTH - 300.0;
const APPROACH_SPEED: f32 = 3.0;

/// Attack chosen when IDLE expires
pub fn next_attack(roll: f32) -> BossAttack {
    if roll < BARRAGE_CHANCE {
        BossAttack::Barrage
    } else {
        BossAttack::LaserCharge
    }
}

/// Something the boss does this frame
#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    None,
    Volley,
    WarnLaser,
    FireLaser,
}

/// Pure transition step: advance the timer and return the action to perform
fn step(attack: &mut BossAttack, timer: &mut u32, roll: f32) -> Action {
    *timer += 1;
    let t = *timer;
    match *attack {
        BossAttack::Idle => {
            if t > IDLE_FRAMES {
                *timer = 0;
                *attack = next_attack(roll);
            }
            Action::None
        }
        BossAttack::Barrage => {
            let volley = t % BARRAGE_VOLLEY_INTERVAL == 0 && t < BARRAGE_WINDOW;
            if t > BARRAGE_FRAMES {
                *timer = 0;
                *attack = BossAttack::Idle;
            }
            if volley { Action::Volley } else { Action::None }
        }
        BossAttack::LaserCharge => {
            let action = if t == 1 { Action::WarnLaser } else { Action::None };
            if t > LASER_CHARGE_FRAMES {
                *timer = 0;
                *attack = BossAttack::LaserFire;
            }
            action
        }
        BossAttack::LaserFire => {
            let action = if t == 1 { Action::FireLaser } else { Action::None };
            if t > LASER_FIRE_FRAMES {
                *timer = 0;
                *attack = BossAttack::Idle;
            }
            action
        }
    }
}

/// Move the boss and run one step of its attack pattern
pub fn update(state: &mut SimState, index: usize) {
    let frame = state.frame;
    let roll = state.roll();
    let Some(boss) = state.entities.get_mut(index) else {
        return;
    };
    let EntityKind::Boss(brain) = &mut boss.kind else {
        return;
    };

    let action = step(&mut brain.attack, &mut brain.attack_timer, roll);

    if boss.pos.x > HOLD_X {
        boss.pos.x -= APPROACH_SPEED;
    }
    boss.pos.y += (frame as f32 * 0.02).sin() * 1.5;

    let boss_pos = boss.pos;
    let boss_center = boss.center();

    match action {
        Action::None => {}
        Action::Volley => {
            let base = aim_angle(boss_center, state.player.center());
            for offset in BARRAGE_SPREAD {
                let dir = direction(base + offset);
                state.spawn(
                    EntityKind::ProjectileEnemy,
                    Vec2::new(boss_pos.x, boss_center.y),
                    Vec2::splat(BARRAGE_SHOT_SIZE),
                    dir * BARRAGE_SHOT_SPEED,
                    ColorTag::EnemyShot,
                );
            }
        }
        Action::WarnLaser => {
            state.spawn(
                EntityKind::LaserWarning(Fade::new(LASER_CHARGE_FRAMES as f32)),
                Vec2::new(0.0, boss_center.y - 5.0),
                Vec2::new(CANVAS_WIDTH, 10.0),
                Vec2::ZERO,
                ColorTag::LaserWarning,
            );
        }
        Action::FireLaser => {
            state.shake(20.0);
            state.spawn(
                EntityKind::LaserBeam(Fade::new(LASER_FIRE_FRAMES as f32)),
                Vec2::new(0.0, boss_center.y - 50.0),
                Vec2::new(CANVAS_WIDTH, 100.0),
                Vec2::ZERO,
                ColorTag::Flash,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Body, BossBrain};

    fn spawn_boss(state: &mut SimState, attack: BossAttack) -> usize {
        state.spawn(
            EntityKind::Boss(BossBrain {
                body: Body::new(960.0, -1.0),
                attack_timer: 0,
                attack,
            }),
            Vec2::new(900.0, 220.0),
            Vec2::new(160.0, 140.0),
            Vec2::ZERO,
            ColorTag::Boss,
        );
        state.entities.len() - 1
    }

    fn count(state: &SimState, pred: impl Fn(&EntityKind) -> bool) -> usize {
        state.entities.iter().filter(|e| pred(&e.kind)).count()
    }

    #[test]
    fn test_idle_transitions_after_120() {
        let mut attack = BossAttack::Idle;
        let mut timer = 0;
        for _ in 0..120 {
            step(&mut attack, &mut timer, 0.0);
        }
        assert_eq!(attack, BossAttack::Idle);
        step(&mut attack, &mut timer, 0.0);
        assert_eq!(attack, BossAttack::Barrage);
        assert_eq!(timer, 0);

        let mut attack = BossAttack::Idle;
        let mut timer = IDLE_FRAMES;
        step(&mut attack, &mut timer, 0.9);
        assert_eq!(attack, BossAttack::LaserCharge);
    }

    #[test]
    fn test_barrage_fires_four_volleys() {
        let mut state = SimState::new(1, 0);
        let index = spawn_boss(&mut state, BossAttack::Barrage);
        for _ in 0..BARRAGE_FRAMES {
            update(&mut state, index);
        }
        // Volleys at t = 20, 40, 60, 80, three shots each
        assert_eq!(count(&state, |k| matches!(k, EntityKind::ProjectileEnemy)), 12);

        update(&mut state, index);
        let EntityKind::Boss(brain) = state.entities.get(index).unwrap().kind else {
            panic!("not a boss");
        };
        assert_eq!(brain.attack, BossAttack::Idle);
    }

    #[test]
    fn test_laser_sequence() {
        let mut state = SimState::new(1, 0);
        let index = spawn_boss(&mut state, BossAttack::LaserCharge);

        update(&mut state, index);
        assert_eq!(count(&state, |k| matches!(k, EntityKind::LaserWarning(_))), 1);

        for _ in 0..LASER_CHARGE_FRAMES {
            update(&mut state, index);
        }
        let EntityKind::Boss(brain) = state.entities.get(index).unwrap().kind else {
            panic!("not a boss");
        };
        assert_eq!(brain.attack, BossAttack::LaserFire);
        assert_eq!(count(&state, |k| matches!(k, EntityKind::LaserBeam(_))), 0);

        update(&mut state, index);
        assert_eq!(count(&state, |k| matches!(k, EntityKind::LaserBeam(_))), 1);
        assert_eq!(state.screen_shake, 20.0);

        for _ in 0..LASER_FIRE_FRAMES {
            update(&mut state, index);
        }
        let EntityKind::Boss(brain) = state.entities.get(index).unwrap().kind else {
            panic!("not a boss");
        };
        assert_eq!(brain.attack, BossAttack::Idle);
        // Only one warning and one beam for the whole sequence
        assert_eq!(count(&state, |k| matches!(k, EntityKind::LaserWarning(_))), 1);
        assert_eq!(count(&state, |k| matches!(k, EntityKind::LaserBeam(_))), 1);
    }

    #[test]
    fn test_boss_eases_to_hold_position() {
        let mut state = SimState::new(1, 0);
        let index = spawn_boss(&mut state, BossAttack::Idle);
        state.entities.get_mut(index).unwrap().pos.x = CANVAS_WIDTH + 150.0;
        for _ in 0..200 {
            update(&mut state, index);
        }
        let x = state.entities.get(index).unwrap().pos.x;
        assert!(x <= HOLD_X && x > HOLD_X - APPROACH_SPEED);
    }
}
