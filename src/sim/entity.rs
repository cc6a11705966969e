//! Entity records and their kind-specific payloads
//!
//! Every live object in the playfield is an [`Entity`]: a shared rectangle +
//! velocity + color header and an [`EntityKind`] carrying only the fields that
//! kind needs. Positions are top-left corners in screen space (y grows down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::BossAttack;
use super::stats::WeaponType;
use crate::consts::*;

/// Palette role used by the renderer to pick a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    Player,
    Enemy,
    Turret,
    Tank,
    Kamikaze,
    Boss,
    PlayerShot,
    Plasma,
    Laser,
    Railgun,
    Grenade,
    EnemyShot,
    Shard,
    Medkit,
    WeaponDrop,
    Flash,
    Crit,
    Hurt,
    Shield,
    LaserWarning,
    Pickup,
}

/// Hit points of a damageable entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub hp: f32,
    pub max_hp: f32,
}

impl Health {
    pub fn full(max_hp: f32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.hp <= 0.0
    }

    /// Restore hp, capped at max
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

/// A walking/flying body (player and melee enemies)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub health: Health,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub anim_frame: u32,
}

impl Body {
    pub fn new(max_hp: f32, facing: f32) -> Self {
        Self {
            health: Health::full(max_hp),
            facing,
            anim_frame: 0,
        }
    }
}

/// An enemy that periodically fires at the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gunner {
    pub body: Body,
    /// Frames since the last shot
    pub attack_timer: f32,
}

/// Boss body plus its attack state machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossBrain {
    pub body: Body,
    /// Frames since the last attack transition
    pub attack_timer: u32,
    pub attack: BossAttack,
}

/// Projectile flags and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub piercing: bool,
    pub homing: bool,
    pub life: f32,
    pub max_life: f32,
    /// Downward acceleration per frame (grenade arc)
    pub drift: f32,
}

/// Remaining lifetime of a timed effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    pub life: f32,
    pub max_life: f32,
}

impl Fade {
    pub fn new(life: f32) -> Self {
        Self {
            life,
            max_life: life,
        }
    }

    /// Count down one frame, returns true once expired
    pub fn tick(&mut self) -> bool {
        self.life -= 1.0;
        self.life <= 0.0
    }
}

/// Debris particle with gravity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spark {
    pub fade: Fade,
    pub drift: f32,
}

/// Kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityKind {
    Player(Body),
    EnemyDrone(Body),
    EnemyWalker(Gunner),
    EnemyTurret(Gunner),
    EnemyTank(Gunner),
    EnemyKamikaze(Body),
    Boss(BossBrain),
    ProjectilePlayer(Shot),
    ProjectileGrenade(Shot),
    ProjectileEnemy,
    LaserWarning(Fade),
    LaserBeam(Fade),
    Collectible { rotation: f32 },
    Medkit { rotation: f32 },
    WeaponDrop { weapon: WeaponType, rotation: f32 },
    Particle(Spark),
    Explosion(Fade),
}

/// A single simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: ColorTag,
    pub kind: EntityKind,
    /// Marked for removal at the end of the frame
    #[serde(skip)]
    pub(crate) removed: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, size: Vec2, vel: Vec2, color: ColorTag) -> Self {
        Self {
            id,
            pos,
            size,
            vel,
            color,
            kind,
            removed: false,
        }
    }

    /// The player standing on the ground at the start position
    pub fn player(id: u32, max_hp: f32) -> Self {
        Self::new(
            id,
            EntityKind::Player(Body::new(max_hp, 1.0)),
            Vec2::new(PLAYER_START_X, GROUND_Y - PLAYER_HEIGHT),
            Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            Vec2::ZERO,
            ColorTag::Player,
        )
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        crate::rect_center(self.pos, self.size)
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Strict AABB overlap with another entity
    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        super::collision::rects_overlap(self.pos, self.size, other.pos, other.size)
    }

    pub fn body(&self) -> Option<&Body> {
        match &self.kind {
            EntityKind::Player(body) | EntityKind::EnemyDrone(body) | EntityKind::EnemyKamikaze(body) => {
                Some(body)
            }
            EntityKind::EnemyWalker(g) | EntityKind::EnemyTurret(g) | EntityKind::EnemyTank(g) => Some(&g.body),
            EntityKind::Boss(brain) => Some(&brain.body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Body> {
        match &mut self.kind {
            EntityKind::Player(body) | EntityKind::EnemyDrone(body) | EntityKind::EnemyKamikaze(body) => {
                Some(body)
            }
            EntityKind::EnemyWalker(g) | EntityKind::EnemyTurret(g) | EntityKind::EnemyTank(g) => {
                Some(&mut g.body)
            }
            EntityKind::Boss(brain) => Some(&mut brain.body),
            _ => None,
        }
    }

    pub fn health(&self) -> Option<&Health> {
        self.body().map(|b| &b.health)
    }

    pub fn health_mut(&mut self) -> Option<&mut Health> {
        self.body_mut().map(|b| &mut b.health)
    }

    /// Current hp, zero for kinds without health
    pub fn hp(&self) -> f32 {
        self.health().map_or(0.0, |h| h.hp)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, EntityKind::Boss(_))
    }

    /// Regular (non-boss) enemy bodies
    pub fn is_enemy(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::EnemyDrone(_)
                | EntityKind::EnemyWalker(_)
                | EntityKind::EnemyTurret(_)
                | EntityKind::EnemyTank(_)
                | EntityKind::EnemyKamikaze(_)
        )
    }

    /// Valid target for player projectiles and homing
    pub fn is_damageable_target(&self) -> bool {
        self.is_enemy() || self.is_boss()
    }

    pub fn is_pickup(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Collectible { .. } | EntityKind::Medkit { .. } | EntityKind::WeaponDrop { .. }
        )
    }

    pub fn is_player_projectile(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::ProjectilePlayer(_) | EntityKind::ProjectileGrenade(_)
        )
    }

    /// Visual-only entities that never take part in collision
    pub fn is_ephemeral(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Particle(_) | EntityKind::Explosion(_) | EntityKind::LaserWarning(_)
        )
    }

    /// Damage dealt to the player on contact, `None` if harmless
    pub fn contact_damage(&self) -> Option<f32> {
        match self.kind {
            EntityKind::EnemyDrone(_) | EntityKind::EnemyWalker(_) | EntityKind::EnemyTurret(_) => Some(10.0),
            EntityKind::ProjectileEnemy => Some(10.0),
            EntityKind::LaserBeam(_) => Some(2.0),
            EntityKind::Boss(_) => Some(20.0),
            EntityKind::EnemyTank(_) => Some(25.0),
            EntityKind::EnemyKamikaze(_) => Some(40.0),
            _ => None,
        }
    }

    /// Physical attackers get shoved back when they break a shield
    pub fn knocked_back_by_shield(&self) -> bool {
        self.is_enemy()
    }
}
