//! Player stat block and per-weapon tables

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::ColorTag;
use crate::consts::SPAWN_RATE_FRAMES;

/// Weapon types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    Pistol,
    Laser,
    Shotgun,
    PlasmaCannon,
    Railgun,
    GrenadeLauncher,
}

/// Projectile parameters fired by a weapon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub size: Vec2,
    pub color: ColorTag,
    pub piercing: bool,
    /// Spawns a grenade instead of a regular bolt
    pub grenade: bool,
    pub gravity: f32,
    pub life: f32,
}

/// Angle offsets for one trigger pull of the shotgun
const SHOTGUN_OFFSETS: [f32; 5] = [0.0, -0.15, 0.15, -0.30, 0.30];
const SINGLE_OFFSET: [f32; 1] = [0.0];

impl WeaponType {
    pub fn name(self) -> &'static str {
        match self {
            WeaponType::Pistol => "Pistol",
            WeaponType::Laser => "Laser",
            WeaponType::Shotgun => "Shotgun",
            WeaponType::PlasmaCannon => "Plasma Cannon",
            WeaponType::Railgun => "Railgun",
            WeaponType::GrenadeLauncher => "Grenade Launcher",
        }
    }

    pub fn projectile(self) -> ProjectileSpec {
        let base = ProjectileSpec {
            speed: 22.0,
            size: Vec2::splat(10.0),
            color: ColorTag::PlayerShot,
            piercing: false,
            grenade: false,
            gravity: 0.0,
            life: 100.0,
        };
        match self {
            WeaponType::Pistol | WeaponType::Shotgun => base,
            WeaponType::PlasmaCannon => ProjectileSpec {
                speed: 15.0,
                size: Vec2::splat(40.0),
                color: ColorTag::Plasma,
                ..base
            },
            // Short streak
            WeaponType::Laser => ProjectileSpec {
                speed: 30.0,
                size: Vec2::new(40.0, 6.0),
                color: ColorTag::Laser,
                life: 2.0,
                ..base
            },
            WeaponType::Railgun => ProjectileSpec {
                speed: 40.0,
                size: Vec2::splat(100.0),
                color: ColorTag::Railgun,
                piercing: true,
                ..base
            },
            WeaponType::GrenadeLauncher => ProjectileSpec {
                speed: 18.0,
                size: Vec2::splat(15.0),
                color: ColorTag::Grenade,
                grenade: true,
                gravity: 0.5,
                ..base
            },
        }
    }

    /// (damage, fire-rate interval in frames) set when the weapon is picked up
    pub fn pickup_loadout(self) -> (f32, f32) {
        match self {
            WeaponType::Pistol => (25.0, 8.0),
            WeaponType::PlasmaCannon => (60.0, 20.0),
            WeaponType::Laser => (15.0, 4.0),
            WeaponType::Shotgun => (25.0, 25.0),
            WeaponType::Railgun => (45.0, 25.0),
            WeaponType::GrenadeLauncher => (80.0, 35.0),
        }
    }

    /// Aim offsets (radians) for each projectile of one shot
    pub fn spread_offsets(self) -> &'static [f32] {
        match self {
            WeaponType::Shotgun => &SHOTGUN_OFFSETS,
            _ => &SINGLE_OFFSET,
        }
    }
}

/// Mutable player stat block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsProfile {
    pub jump_force: f32,
    pub gravity: f32,
    pub max_jumps: u32,
    pub magnet_range: f32,
    pub has_shield: bool,
    pub speed_multiplier: f32,
    pub weapon: WeaponType,
    pub damage: f32,
    /// Minimum frames between shots
    pub fire_rate: f32,
    pub spread: f32,
    pub max_hp: f32,
    pub move_speed: f32,
    /// HP restored per kill
    pub lifesteal: f32,
    /// Probability [0,1] of a double-damage hit
    pub crit_chance: f32,
    pub homing: bool,
    /// x1.5 damage while below 30% hp
    pub low_hp_damage_boost: bool,
}

impl Default for StatsProfile {
    fn default() -> Self {
        Self {
            jump_force: 18.0,
            gravity: 0.8,
            max_jumps: 2,
            magnet_range: 250.0,
            has_shield: false,
            speed_multiplier: 1.0,
            weapon: WeaponType::Pistol,
            damage: 25.0,
            fire_rate: 8.0,
            spread: 0.0,
            max_hp: 100.0,
            move_speed: 9.0,
            lifesteal: 0.0,
            crit_chance: 0.0,
            homing: false,
            low_hp_damage_boost: false,
        }
    }
}

impl StatsProfile {
    /// Swap to a picked-up weapon along with its damage and fire rate
    pub fn equip(&mut self, weapon: WeaponType) {
        let (damage, fire_rate) = weapon.pickup_loadout();
        self.weapon = weapon;
        self.damage = damage;
        self.fire_rate = fire_rate;
    }

    /// Frames between spawn rolls
    pub fn spawn_interval(&self) -> u64 {
        let interval = (SPAWN_RATE_FRAMES as f32 / self.speed_multiplier.max(0.01)).floor();
        (interval as u64).max(1)
    }
}
