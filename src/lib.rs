//! Runner Dash - a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, scoring, power-ups, run state)
//! - `game`: Session shell wiring the simulation to storage and presentation
//! - `persistence`: Best-score storage
//! - `presentation`: HUD snapshot and cue boundary
//! - `audio`: Cue tone table and volume mixing
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod persistence;
pub mod presentation;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame length the headless runner steps with (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
}
