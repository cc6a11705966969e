//! Per-frame input snapshot

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input sampled once per tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Level; the simulation detects the rising edge itself
    pub jump: bool,
    pub shoot: bool,
    /// Held to pick up weapon drops
    pub interact: bool,
    /// Pointer position in playfield coordinates
    pub pointer: Vec2,
}

/// Latest host input plus the frame-counted touch jump
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Levels as last reported by the host
    pub held: TickInput,
    touch_jump_frames: u32,
    touch_hold_frames: u32,
}

impl InputState {
    pub fn new(touch_hold_frames: u32) -> Self {
        Self {
            held: TickInput::default(),
            touch_jump_frames: 0,
            touch_hold_frames: touch_hold_frames.max(1),
        }
    }

    /// Touch jump button: holds jump for a fixed number of simulation frames
    pub fn press_touch_jump(&mut self) {
        self.touch_jump_frames = self.touch_hold_frames;
    }

    /// Snapshot for the next tick
    pub fn sample(&mut self) -> TickInput {
        let mut input = self.held;
        if self.touch_jump_frames > 0 {
            input.jump = true;
            self.touch_jump_frames -= 1;
        }
        input
    }
}
