//! Read-only views handed to presentation layers

use serde::Serialize;

use super::entity::Entity;
use super::state::SimState;
use super::stats::StatsProfile;

/// HUD values emitted after each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HudSnapshot {
    pub score: u64,
    pub high_score: u64,
    pub shards: u32,
    pub level: u32,
    pub shard_target: u32,
    pub player_hp: f32,
    pub player_max_hp: f32,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderView<'a> {
    pub entities: &'a [Entity],
    pub player: &'a Entity,
    pub aim_angle: f32,
    pub stats: &'a StatsProfile,
    pub screen_shake: f32,
    pub boss_active: bool,
}

impl SimState {
    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score.floored(),
            high_score: self.score.high.max(self.score.floored()),
            shards: self.score.shards,
            level: self.score.level,
            shard_target: self.score.shard_target,
            player_hp: self.player_hp(),
            player_max_hp: self.player_max_hp(),
        }
    }

    pub fn render_view(&self) -> RenderView<'_> {
        RenderView {
            entities: self.entities.as_slice(),
            player: &self.player,
            aim_angle: self.aim_angle,
            stats: &self.stats,
            screen_shake: self.screen_shake,
            boss_active: self.boss_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_tracks_best_score() {
        let mut state = SimState::new(1, 500);
        state.score.add(120.9);
        let hud = state.hud_snapshot();
        assert_eq!(hud.score, 120);
        assert_eq!(hud.high_score, 500);
        assert_eq!(hud.player_hp, 100.0);

        state.score.add(1000.0);
        assert_eq!(state.hud_snapshot().high_score, 1120);
    }

    #[test]
    fn test_hud_json_uses_camel_case() {
        let state = SimState::new(1, 0);
        let json = serde_json::to_string(&state.hud_snapshot()).unwrap();
        assert!(json.contains("\"shardTarget\":10"));
        assert!(json.contains("\"playerMaxHp\":100.0"));
    }
}
