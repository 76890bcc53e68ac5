//! Presentation boundary (HUD, audio, visuals)
//!
//! The simulation hands a snapshot to the presenter every frame plus discrete
//! cue events. Presenter calls are fire-and-forget: an error inside one is
//! logged and swallowed, never allowed back into the frame loop. Natively a
//! panic is caught the same way; on wasm32 panics abort, so there only the
//! panic hook reports them.

use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::Mixer;
use crate::settings::Settings;
use crate::sim::{ActorPose, GameEvent, GameState, RunPhase, ShieldOverlay};

/// A presenter refused or failed to handle a call
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("presenter rejected call: {0}")]
    Rejected(String),
}

/// Per-frame view of the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: f32,
    pub coins: u32,
    pub best: u32,
    pub distance: f32,
    pub phase: RunPhase,
    pub speed: f32,
    pub shield_remaining: f32,
    pub magnet_remaining: f32,
    pub speed_boost_remaining: f32,
    pub parallax_offset: f32,
    pub shield_overlay: Option<ShieldOverlay>,
    pub actor_pose: ActorPose,
    pub actor_tinted: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.run.score,
            coins: state.run.coins,
            best: state.run.best,
            distance: state.run.distance,
            phase: state.phase,
            speed: state.speed,
            shield_remaining: state.run.shield_remaining,
            magnet_remaining: state.run.magnet_remaining,
            speed_boost_remaining: state.run.speed_boost_remaining,
            parallax_offset: state.parallax_offset,
            shield_overlay: state.shield_overlay,
            actor_pose: state.actor.pose(state.clock.elapsed_ms()),
            actor_tinted: state.actor.tinted,
        }
    }

    /// HUD line: `Score 12   Coins 3   Best 40   Dist 87m`
    pub fn status_line(&self) -> String {
        format!(
            "Score {}   Coins {}   Best {}   Dist {}m",
            self.score.floor(),
            self.coins,
            self.best,
            self.distance.floor()
        )
    }

    /// Centered banner text for the current phase
    pub fn banner(&self) -> Option<&'static str> {
        match self.phase {
            RunPhase::Ready => Some("Tap / Click / SPACE to Start"),
            RunPhase::Paused => Some("PAUSED (P to resume)"),
            RunPhase::GameOver => Some("GAME OVER - Tap/Space to Restart!"),
            RunPhase::Running => None,
        }
    }
}

/// Receives snapshots and cues
pub trait Presenter {
    fn publish(&mut self, snapshot: &HudSnapshot) -> Result<(), PresentError>;
    fn cue(&mut self, event: GameEvent) -> Result<(), PresentError>;

    /// Preferences changed mid-session
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Run a presenter call, logging and discarding errors and panics.
/// Returns whether the call succeeded.
///
/// Panics are only recoverable where unwinding is supported (not on
/// wasm32-unknown-unknown).
pub fn guarded<F>(what: &str, call: F) -> bool
where
    F: FnOnce() -> Result<(), PresentError>,
{
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            log::warn!("Presenter {} failed: {}", what, e);
            false
        }
        Err(_) => {
            log::warn!("Presenter {} panicked", what);
            false
        }
    }
}

/// Presenter that writes to the log
#[derive(Debug, Default)]
pub struct LogPresenter {
    mixer: Mixer,
    last_status: String,
}

impl LogPresenter {
    pub fn new(mixer: Mixer) -> Self {
        Self {
            mixer,
            last_status: String::new(),
        }
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }
}

impl Presenter for LogPresenter {
    fn publish(&mut self, snapshot: &HudSnapshot) -> Result<(), PresentError> {
        let status = snapshot.status_line();
        if status != self.last_status {
            log::trace!("{}", status);
            self.last_status = status;
        }
        Ok(())
    }

    fn cue(&mut self, event: GameEvent) -> Result<(), PresentError> {
        match self.mixer.tone(event) {
            Some(tone) => log::debug!(
                "Cue {:?}: {:.0} Hz {:?} {:.2}s @ {:.2}",
                event,
                tone.frequency,
                tone.waveform,
                tone.duration,
                tone.volume
            ),
            None => log::debug!("Cue {:?}", event),
        }
        Ok(())
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.mixer = Mixer::from_settings(settings);
    }
}

/// Presenter that keeps everything it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub snapshots: Vec<HudSnapshot>,
    pub cues: Vec<GameEvent>,
}

impl Presenter for RecordingPresenter {
    fn publish(&mut self, snapshot: &HudSnapshot) -> Result<(), PresentError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn cue(&mut self, event: GameEvent) -> Result<(), PresentError> {
        self.cues.push(event);
        Ok(())
    }
}
