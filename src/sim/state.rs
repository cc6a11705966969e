//! Simulation state aggregate
//!
//! Everything one session of play mutates lives in [`SimState`]. Subsystems
//! receive it by `&mut` and hold nothing between calls.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{ColorTag, Entity, EntityKind};
use super::perk::Perk;
use super::score::Score;
use super::stats::{StatsProfile, WeaponType};
use super::store::EntityStore;

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Shard target reached; session should offer a perk
    LevelUp { level: u32 },
    /// Player hp crossed zero. Emitted once per run.
    GameOver { score: u64 },
    BossSpawned { max_hp: f32 },
    BossDefeated,
    EnemyKilled { x: f32, y: f32 },
    PlayerHit { damage: f32 },
    ShieldBroken,
    WeaponEquipped { weapon: WeaponType },
    ShardCollected,
    MedkitUsed,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Frames simulated since reset
    pub frame: u64,
    pub player: Entity,
    pub entities: EntityStore,
    pub stats: StatsProfile,
    pub score: Score,
    /// A boss is alive; spawning and world scroll are suspended
    pub boss_active: bool,
    /// Camera shake intensity (decays every frame)
    pub screen_shake: f32,
    /// Aim direction from the player's center toward the pointer
    pub aim_angle: f32,
    pub jumps_used: u32,
    pub last_shot_frame: Option<u64>,
    /// Jump input level seen last frame (edge detection)
    pub last_jump_input: bool,
    pub game_over: bool,
    /// Events recorded this frame
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SimState {
    pub fn new(seed: u64, high_score: u64) -> Self {
        let stats = StatsProfile::default();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            player: Entity::player(0, stats.max_hp),
            entities: EntityStore::new(),
            stats,
            score: Score::new(high_score),
            boss_active: false,
            screen_shake: 0.0,
            aim_angle: 0.0,
            jumps_used: 0,
            last_shot_frame: None,
            last_jump_input: false,
            game_over: false,
            events: Vec::new(),
            next_id: 1,
        };
        state.player.id = state.next_entity_id();
        state
    }

    /// Start a fresh run. The RNG stream continues; the high score is replaced
    /// by the persisted value.
    pub fn reset(&mut self, high_score: u64) {
        self.frame = 0;
        self.entities.clear();
        self.stats = StatsProfile::default();
        self.score = Score::new(high_score);
        self.boss_active = false;
        self.screen_shake = 0.0;
        self.aim_angle = 0.0;
        self.jumps_used = 0;
        self.last_shot_frame = None;
        self.last_jump_input = false;
        self.game_over = false;
        self.events.clear();
        let id = self.next_entity_id();
        self.player = Entity::player(id, self.stats.max_hp);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Create and append an entity, returning its id
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, size: Vec2, vel: Vec2, color: ColorTag) -> u32 {
        let id = self.next_entity_id();
        self.entities.add(Entity::new(id, kind, pos, size, vel, color));
        id
    }

    /// Uniform roll in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform roll in [0, max)
    pub fn roll_to(&mut self, max: f32) -> f32 {
        self.roll() * max
    }

    /// Start a screen shake pulse
    pub fn shake(&mut self, amount: f32) {
        self.screen_shake = amount;
    }

    pub fn player_hp(&self) -> f32 {
        self.player.hp()
    }

    pub fn player_max_hp(&self) -> f32 {
        self.player.health().map_or(0.0, |h| h.max_hp)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this frame's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a chosen perk to the stat profile
    pub fn apply_perk(&mut self, perk: &Perk) {
        self.stats = perk.effect.apply(&self.stats);
        if perk.effect.heals_to_full() {
            let max_hp = self.stats.max_hp;
            if let Some(health) = self.player.health_mut() {
                health.max_hp = max_hp;
                health.hp = max_hp;
            }
        }
        log::info!("Perk applied: {}", perk.name);
    }
}
