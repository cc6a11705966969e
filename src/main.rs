//! Neon Runner entry point
//!
//! Native: a headless autopilot run that logs simulation events.
//! WASM: exports a `WebGame` handle the host page drives once per animation frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use neon_runner::highscores::LocalStorage;
    use neon_runner::{Session, SessionPhase, Settings};

    fn to_js<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
        serde_json::to_string(value).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Game handle owned by the host page
    #[wasm_bindgen]
    pub struct WebGame {
        session: Session<LocalStorage>,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WebGame {
            let settings = Settings::load();
            let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            log::info!("Neon Runner session created (seed {})", seed);
            WebGame {
                session: Session::new(settings, LocalStorage, seed),
            }
        }

        /// Start or restart a run
        pub fn start(&mut self) {
            self.session.restart();
        }

        /// Advance one frame; returns this frame's events as JSON
        pub fn frame(&mut self) -> Result<String, JsValue> {
            let events = self.session.frame();
            to_js(&events)
        }

        #[allow(clippy::too_many_arguments)]
        pub fn set_input(&mut self, left: bool, right: bool, jump: bool, shoot: bool, interact: bool, x: f32, y: f32) {
            let input = self.session.input_mut();
            input.left = left;
            input.right = right;
            input.jump = jump;
            input.shoot = shoot;
            input.interact = interact;
            input.pointer = glam::Vec2::new(x, y);
        }

        pub fn press_touch_jump(&mut self) {
            self.session.press_touch_jump();
        }

        pub fn select_perk(&mut self, index: usize) -> bool {
            self.session.select_perk(index)
        }

        /// Register a JS function receiving the HUD snapshot as JSON
        pub fn set_hud_callback(&mut self, callback: js_sys::Function) {
            self.session.on_hud(Box::new(move |hud| match serde_json::to_string(hud) {
                Ok(json) => {
                    if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("HUD callback failed: {:?}", err);
                    }
                }
                Err(err) => log::warn!("HUD snapshot not encoded: {}", err),
            }));
        }

        pub fn hud_json(&self) -> Result<String, JsValue> {
            to_js(&self.session.hud())
        }

        /// Entities, player, aim angle and stats for the renderer
        pub fn render_json(&self) -> Result<String, JsValue> {
            to_js(&self.session.render_view())
        }

        pub fn perk_options_json(&self) -> Result<String, JsValue> {
            to_js(&self.session.perk_options())
        }

        pub fn phase(&self) -> String {
            match self.session.phase() {
                SessionPhase::Menu => "menu",
                SessionPhase::Playing => "playing",
                SessionPhase::PerkChoice => "perk_choice",
                SessionPhase::GameOver => "game_over",
            }
            .to_string()
        }
    }

    impl Default for WebGame {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Neon Runner starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_runner::{MemoryStorage, Session, SessionPhase, Settings};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3_600);

    let path = Settings::default_path();
    let settings = if path.exists() {
        Settings::load_from(&path)
    } else {
        Settings::default()
    };
    let seed = args
        .next()
        .and_then(|a| a.parse().ok())
        .or(settings.seed)
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    log::info!("Neon Runner (native) autopilot: {} frames, seed {}", frames, seed);
    let mut session = Session::new(settings, MemoryStorage::new(), seed);
    session.start();

    for _ in 0..frames {
        match session.phase() {
            SessionPhase::PerkChoice => {
                session.select_perk(0);
                continue;
            }
            SessionPhase::GameOver | SessionPhase::Menu => break,
            SessionPhase::Playing => {}
        }
        autopilot::steer(&mut session);
        for event in session.frame() {
            log::info!("frame {}: {:?}", session.state().frame, event);
        }
    }

    match serde_json::to_string(&session.hud()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::warn!("HUD not encoded: {}", err),
    }
}

/// Scripted input for headless runs
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use neon_runner::consts::CANVAS_WIDTH;
    use neon_runner::sim::EntityKind;
    use neon_runner::{ScoreStorage, Session};

    const DODGE_RADIUS: f32 = 120.0;

    /// Aim at the closest target, jump over incoming fire, grab weapon drops
    pub fn steer<S: ScoreStorage>(session: &mut Session<S>) {
        let view = session.render_view();
        let player = view.player.center();

        let target = view
            .entities
            .iter()
            .filter(|e| e.is_damageable_target())
            .map(|e| e.center())
            .min_by(|a, b| {
                a.distance(player)
                    .partial_cmp(&b.distance(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(Vec2::new(CANVAS_WIDTH, player.y));

        let threatened = view
            .entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::ProjectileEnemy | EntityKind::EnemyKamikaze(_)))
            .any(|e| e.center().distance(player) < DODGE_RADIUS);

        let input = session.input_mut();
        input.shoot = true;
        input.interact = true;
        input.pointer = target;
        // Jump is edge triggered, so release it between dodges
        input.jump = threatened && !input.jump;
    }
}
