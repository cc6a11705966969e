//! Score and shard-based leveling

use serde::{Deserialize, Serialize};

use crate::consts::{SHARD_TARGET_GROWTH, START_SHARD_TARGET};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Running score (displayed floored)
    pub current: f64,
    /// Persisted best score, read at reset
    pub high: u64,
    pub shards: u32,
    pub level: u32,
    /// Shards needed for the next level
    pub shard_target: u32,
}

impl Score {
    pub fn new(high: u64) -> Self {
        Self {
            current: 0.0,
            high,
            shards: 0,
            level: 1,
            shard_target: START_SHARD_TARGET,
        }
    }

    pub fn add(&mut self, points: f64) {
        self.current += points;
    }

    #[inline]
    pub fn floored(&self) -> u64 {
        self.current.max(0.0).floor() as u64
    }

    /// Collect one shard. Returns true when this shard levels the player up.
    pub fn add_shard(&mut self) -> bool {
        self.shards += 1;
        if self.shards >= self.shard_target {
            self.shards = 0;
            self.level += 1;
            self.shard_target = (self.shard_target as f64 * SHARD_TARGET_GROWTH).ceil() as u32;
            true
        } else {
            false
        }
    }
}
