//! Browser bindings
//!
//! The page owns rendering and audio; it drives the simulation one frame at a
//! time and reads back a JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::Game;
use crate::audio::Mixer;
use crate::persistence::LocalStorageStore;
use crate::presentation::LogPresenter;
use crate::settings::Settings;
use crate::sim::FrameInput;
use crate::tuning::Tuning;

#[wasm_bindgen]
pub struct WebRunner {
    game: Game<LocalStorageStore, LogPresenter>,
    settings: Settings,
    pending: FrameInput,
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRunner {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let presenter = LogPresenter::new(Mixer::from_settings(&settings));
        WebRunner {
            game: Game::new(seed, Tuning::default(), &settings, LocalStorageStore, presenter),
            settings,
            pending: FrameInput::default(),
        }
    }

    /// Tap / click / SPACE / UP
    pub fn action(&mut self) {
        self.pending.action = true;
    }

    /// P key
    pub fn pause(&mut self) {
        self.pending.pause = true;
    }

    /// M key / mute button
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.settings_changed();
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.settings.reduced_motion = reduced_motion;
        self.settings_changed();
    }

    /// Advance one rendered frame; returns the snapshot as JSON
    pub fn frame(&mut self, delta_ms: f32) -> String {
        let input = std::mem::take(&mut self.pending);
        self.game.frame(delta_ms, &input);
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }
}

impl WebRunner {
    fn settings_changed(&mut self) {
        self.game.apply_settings(&self.settings);
        self.settings.save();
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Runner Dash starting...");
}
