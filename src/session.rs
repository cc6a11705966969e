//! Session control around the simulation
//!
//! Owns the phase machine (menu, playing, perk choice, game over), turns
//! simulation events into phase changes, offers perks on level-up, throttles
//! HUD callbacks and persists the high score.

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use crate::highscores::{HighScore, ScoreStorage};
use crate::settings::Settings;
use crate::sim::{GameEvent, HudSnapshot, InputState, PERKS, Perk, RenderView, SimState, TickInput, tick};

/// Perks offered per level-up
pub const PERK_CHOICES: usize = 3;

/// Stream selector so perk offers don't perturb the simulation's RNG
const PERK_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Menu,
    Playing,
    /// Simulation paused until a perk is selected
    PerkChoice,
    GameOver,
}

pub type HudCallback = Box<dyn FnMut(&HudSnapshot)>;

pub struct Session<S: ScoreStorage> {
    settings: Settings,
    high_score: HighScore<S>,
    state: SimState,
    input: InputState,
    phase: SessionPhase,
    perk_rng: Pcg32,
    /// Level-ups still waiting for a perk selection
    pending_levels: u32,
    offers: Vec<&'static Perk>,
    hud: HudSnapshot,
    on_hud: Option<HudCallback>,
    frames_since_hud: u32,
}

impl<S: ScoreStorage> Session<S> {
    pub fn new(settings: Settings, storage: S, seed: u64) -> Self {
        let high_score = HighScore::new(storage);
        let state = SimState::new(seed, high_score.load());
        let hud = state.hud_snapshot();
        Self {
            input: InputState::new(settings.touch_jump_hold_frames),
            settings,
            high_score,
            state,
            phase: SessionPhase::Menu,
            perk_rng: Pcg32::new(seed, PERK_STREAM),
            pending_levels: 0,
            offers: Vec::new(),
            hud,
            on_hud: None,
            frames_since_hud: 0,
        }
    }

    /// Reset the world and begin playing
    pub fn start(&mut self) {
        self.state.reset(self.high_score.load());
        self.input.held = TickInput::default();
        self.pending_levels = 0;
        self.offers.clear();
        self.phase = SessionPhase::Playing;
        log::info!("Run started (high score {})", self.state.score.high);
        self.emit_hud();
    }

    pub fn restart(&mut self) {
        self.start();
    }

    /// Advance one host frame. Returns the simulation events of this frame.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        if self.phase != SessionPhase::Playing {
            return Vec::new();
        }

        let input = self.input.sample();
        self.hud = tick(&mut self.state, &input);
        let events = self.state.drain_events();

        let mut game_over = None;
        for event in &events {
            match *event {
                GameEvent::LevelUp { .. } => self.pending_levels += 1,
                GameEvent::GameOver { score } => game_over = Some(score),
                _ => {}
            }
        }

        if let Some(score) = game_over {
            self.finish(score);
        } else if self.pending_levels > 0 {
            self.offer_perks();
        }

        self.frames_since_hud += 1;
        if self.phase != SessionPhase::Playing || self.frames_since_hud >= self.settings.hud_update_interval {
            self.emit_hud();
        }
        events
    }

    fn finish(&mut self, score: u64) {
        self.phase = SessionPhase::GameOver;
        self.pending_levels = 0;
        self.offers.clear();
        self.high_score.submit(score);
        log::info!("Run over with score {}", score);
    }

    fn offer_perks(&mut self) {
        let mut picks: Vec<&'static Perk> = PERKS.iter().collect();
        picks.shuffle(&mut self.perk_rng);
        picks.truncate(PERK_CHOICES);
        self.offers = picks;
        self.phase = SessionPhase::PerkChoice;
        log::debug!(
            "Offering perks: {:?}",
            self.offers.iter().map(|p| p.id).collect::<Vec<_>>()
        );
    }

    /// Apply the offered perk at `index` and resume. Returns false if no
    /// choice is pending or the index is out of range.
    pub fn select_perk(&mut self, index: usize) -> bool {
        if self.phase != SessionPhase::PerkChoice {
            log::warn!("Perk selected outside of a perk choice");
            return false;
        }
        let Some(perk) = self.offers.get(index).copied() else {
            log::warn!("Perk index {} out of range", index);
            return false;
        };

        self.state.apply_perk(perk);
        self.pending_levels = self.pending_levels.saturating_sub(1);
        if self.pending_levels > 0 {
            self.offer_perks();
        } else {
            self.offers.clear();
            self.phase = SessionPhase::Playing;
        }
        self.emit_hud();
        true
    }

    /// Register the HUD listener
    pub fn on_hud(&mut self, callback: HudCallback) {
        self.on_hud = Some(callback);
    }

    fn emit_hud(&mut self) {
        self.frames_since_hud = 0;
        self.hud = self.state.hud_snapshot();
        if let Some(callback) = self.on_hud.as_mut() {
            callback(&self.hud);
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn perk_options(&self) -> &[&'static Perk] {
        &self.offers
    }

    /// Host input levels, sampled at the start of every frame
    pub fn input_mut(&mut self) -> &mut TickInput {
        &mut self.input.held
    }

    pub fn press_touch_jump(&mut self) {
        self.input.press_touch_jump();
    }

    pub fn hud(&self) -> HudSnapshot {
        self.hud
    }

    pub fn render_view(&self) -> RenderView<'_> {
        let mut view = self.state.render_view();
        if !self.settings.effective_screen_shake() {
            view.screen_shake = 0.0;
        }
        view
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        self.high_score.storage()
    }
}
