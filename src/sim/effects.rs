//! Cosmetic effect bursts
//!
//! Explosions never collide; they only feed the renderer.

use glam::Vec2;

use super::entity::{ColorTag, EntityKind, Fade, Spark};
use super::state::SimState;

const FLASH_SIZE: f32 = 40.0;
const FLASH_LIFE: f32 = 5.0;
const PARTICLES_PER_SCALE: f32 = 12.0;
const PARTICLE_SPEED: f32 = 15.0;
const PARTICLE_GRAVITY: f32 = 0.5;

/// White flash plus a spray of debris centered on `at`
pub fn explosion(state: &mut SimState, at: Vec2, color: ColorTag, scale: f32) {
    let flash = FLASH_SIZE * scale;
    state.spawn(
        EntityKind::Explosion(Fade::new(FLASH_LIFE)),
        at - Vec2::splat(flash / 2.0),
        Vec2::splat(flash),
        Vec2::ZERO,
        ColorTag::Flash,
    );

    let count = (PARTICLES_PER_SCALE * scale).ceil() as u32;
    for _ in 0..count {
        let size = Vec2::new(state.roll_to(6.0 * scale) + 2.0, state.roll_to(6.0 * scale) + 2.0);
        let vel = Vec2::new(state.roll() - 0.5, state.roll() - 0.5) * PARTICLE_SPEED * scale;
        let life = 40.0 + state.roll_to(20.0);
        state.spawn(
            EntityKind::Particle(Spark {
                fade: Fade { life, max_life: 60.0 },
                drift: PARTICLE_GRAVITY,
            }),
            at,
            size,
            vel,
            color,
        );
    }
}
