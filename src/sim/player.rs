//! Player movement, jumping and weapon fire

use glam::Vec2;

use super::effects;
use super::entity::{ColorTag, EntityKind, Shot};
use super::input::TickInput;
use super::state::SimState;
use crate::consts::*;
use crate::{aim_angle, direction};

/// Apply one frame of input to the player
pub fn update(state: &mut SimState, input: &TickInput) {
    state.aim_angle = aim_angle(state.player.center(), input.pointer);

    apply_movement(state, input);
    apply_jump(state, input);
    integrate_body(state);

    if input.shoot && can_fire(state) {
        fire(state);
    }
}

fn apply_movement(state: &mut SimState, input: &TickInput) {
    let move_speed = state.stats.move_speed;
    let player = &mut state.player;
    let intent = if input.left {
        -1.0
    } else if input.right {
        1.0
    } else {
        0.0
    };

    player.vel.x = intent * move_speed;
    if let Some(body) = player.body_mut() {
        if intent != 0.0 {
            body.facing = intent;
            body.anim_frame += 1;
        } else {
            body.anim_frame = 0;
        }
    }
}

/// Jump only on the rising edge of the input
fn apply_jump(state: &mut SimState, input: &TickInput) {
    let rising = input.jump && !state.last_jump_input;
    state.last_jump_input = input.jump;
    if !rising || state.jumps_used >= state.stats.max_jumps {
        return;
    }

    state.player.vel.y = -state.stats.jump_force;
    state.jumps_used += 1;
    let feet = Vec2::new(state.player.center().x, state.player.pos.y + state.player.size.y);
    effects::explosion(state, feet, ColorTag::Flash, 1.0);
}

fn integrate_body(state: &mut SimState) {
    let gravity = state.stats.gravity;
    let player = &mut state.player;

    player.pos.x = (player.pos.x + player.vel.x).clamp(0.0, CANVAS_WIDTH - player.size.x);

    player.vel.y += gravity;
    player.pos.y += player.vel.y;

    let ground = GROUND_Y - player.size.y;
    if player.pos.y >= ground {
        player.pos.y = ground;
        player.vel.y = 0.0;
        state.jumps_used = 0;
    }
}

fn can_fire(state: &SimState) -> bool {
    match state.last_shot_frame {
        None => true,
        Some(last) => state.frame.saturating_sub(last) as f32 > state.stats.fire_rate,
    }
}

/// Spawn this trigger pull's projectiles along the aim direction
fn fire(state: &mut SimState) {
    state.last_shot_frame = Some(state.frame);

    let weapon = state.stats.weapon;
    let spec = weapon.projectile();
    let homing = state.stats.homing && !spec.piercing && !spec.grenade;
    let origin = state.player.center();

    for &offset in weapon.spread_offsets() {
        let dir = direction(state.aim_angle + offset);
        let shot = Shot {
            piercing: spec.piercing,
            homing,
            life: spec.life,
            max_life: spec.life,
            drift: spec.gravity,
        };
        let kind = if spec.grenade {
            EntityKind::ProjectileGrenade(shot)
        } else {
            EntityKind::ProjectilePlayer(shot)
        };
        state.spawn(kind, origin + dir * MUZZLE_OFFSET, spec.size, dir * spec.speed, spec.color);
    }
}
