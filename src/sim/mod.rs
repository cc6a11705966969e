//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to [`tick`] is one frame, no sub-stepping
//! - Seeded RNG only
//! - Stable iteration order (entity store order)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod combat;
pub mod effects;
pub mod entity;
pub mod input;
pub mod perk;
pub mod physics;
pub mod player;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod stats;
pub mod store;
pub mod tick;

pub use boss::BossAttack;
pub use collision::rects_overlap;
pub use entity::{ColorTag, Entity, EntityKind};
pub use input::{InputState, TickInput};
pub use perk::{PERKS, Perk, PerkEffect, Rarity, find_perk};
pub use score::Score;
pub use snapshot::{HudSnapshot, RenderView};
pub use state::{GameEvent, SimState};
pub use stats::{StatsProfile, WeaponType};
pub use store::EntityStore;
pub use tick::tick;
