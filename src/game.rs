//! Session shell around the simulation
//!
//! Owns the game state plus its collaborators: the best-score store and the
//! presenter. The simulation never touches either directly; this layer loads
//! the best score once, persists it at game over, and forwards cues and
//! snapshots through guarded calls.

use crate::persistence::{BestScoreStore, load_best_or_default};
use crate::presentation::{HudSnapshot, Presenter, guarded};
use crate::settings::Settings;
use crate::sim::{FrameInput, FrameReport, GameState, frame_seconds, tick};
use crate::tuning::Tuning;

/// One play session
pub struct Game<S: BestScoreStore, P: Presenter> {
    state: GameState,
    store: S,
    presenter: P,
}

impl<S: BestScoreStore, P: Presenter> Game<S, P> {
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings, store: S, presenter: P) -> Self {
        let best = load_best_or_default(&store);
        let mut state = GameState::new(seed, tuning, best);
        state.reduced_motion = settings.reduced_motion;
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state,
            store,
            presenter,
        }
    }

    /// Run one rendered frame of `delta_ms` milliseconds
    pub fn frame(&mut self, delta_ms: f32, input: &FrameInput) -> FrameReport {
        let dt = frame_seconds(delta_ms, self.state.tuning.max_frame_dt);
        let report = tick(&mut self.state, input, dt);

        if let Some(best) = report.best_to_save {
            if let Err(e) = self.store.save_best(best) {
                log::warn!("Could not save best score {} ({}), keeping it in memory", best, e);
            }
        }

        let presenter = &mut self.presenter;
        for &event in &report.events {
            guarded("cue", || presenter.cue(event));
        }
        let snapshot = HudSnapshot::from_state(&self.state);
        guarded("publish", || presenter.publish(&snapshot));

        report
    }

    /// Apply changed preferences mid-session
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.state.reduced_motion = settings.reduced_motion;
        self.presenter.apply_settings(settings);
        log::info!(
            "Settings applied (muted: {}, reduced motion: {})",
            settings.muted,
            settings.reduced_motion
        );
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::presentation::{LogPresenter, PresentError, RecordingPresenter};
    use crate::sim::spawner::OBSTACLE_HALF_EXTENTS;
    use crate::sim::{EntityKind, GameEvent, RunPhase, ScrollingEntity};

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn tap() -> FrameInput {
        FrameInput {
            action: true,
            ..Default::default()
        }
    }

    struct FailingPresenter {
        calls: u32,
    }

    impl Presenter for FailingPresenter {
        fn publish(&mut self, _snapshot: &HudSnapshot) -> Result<(), PresentError> {
            self.calls += 1;
            Err(PresentError::Rejected("hud offline".into()))
        }

        fn cue(&mut self, _event: GameEvent) -> Result<(), PresentError> {
            self.calls += 1;
            panic!("audio device lost");
        }
    }

    #[test]
    fn test_loads_best_once() {
        let game = Game::new(
            1,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::with_best(250),
            RecordingPresenter::default(),
        );
        assert_eq!(game.state().run.best, 250);
        assert_eq!(game.snapshot().best, 250);
    }

    #[test]
    fn test_unavailable_store_is_not_fatal() {
        let mut game = Game::new(
            1,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::unavailable(),
            RecordingPresenter::default(),
        );
        assert_eq!(game.state().run.best, 0);
        game.frame(FRAME_MS, &tap());
        assert_eq!(game.state().phase, RunPhase::Running);
    }

    #[test]
    fn test_publishes_every_frame_and_forwards_cues() {
        let mut game = Game::new(
            1,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::new(),
            RecordingPresenter::default(),
        );
        game.frame(FRAME_MS, &tap());
        for _ in 0..29 {
            game.frame(FRAME_MS, &FrameInput::default());
        }
        game.frame(FRAME_MS, &tap());
        assert_eq!(game.presenter().snapshots.len(), 31);
        assert_eq!(game.presenter().cues, vec![GameEvent::Jump]);
    }

    #[test]
    fn test_game_over_persists_best() {
        let mut game = Game::new(
            1,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::with_best(3),
            RecordingPresenter::default(),
        );
        game.frame(FRAME_MS, &tap());
        game.state.run.score = 57.2;
        let id = game.state.ids.next_id();
        let pos = game.state.actor.pos;
        game.state
            .obstacles
            .push(ScrollingEntity::new(id, EntityKind::Obstacle, pos, OBSTACLE_HALF_EXTENTS));

        let report = game.frame(FRAME_MS, &FrameInput::default());
        assert_eq!(report.best_to_save, Some(57));
        assert_eq!(game.store().stored(), Some(57));
        assert!(game.presenter().cues.contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_presenter_failures_do_not_touch_state() {
        let mut failing = Game::new(
            9,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::new(),
            FailingPresenter { calls: 0 },
        );
        let mut recording = Game::new(
            9,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::new(),
            RecordingPresenter::default(),
        );
        for i in 0..240 {
            let input = if i % 40 == 0 { tap() } else { FrameInput::default() };
            failing.frame(FRAME_MS, &input);
            recording.frame(FRAME_MS, &input);
        }
        assert!(failing.presenter().calls >= 240);
        assert_eq!(failing.state().run, recording.state().run);
        assert_eq!(failing.snapshot(), recording.snapshot());
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut game = Game::new(
            1,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::new(),
            RecordingPresenter::default(),
        );
        game.frame(5000.0, &tap());
        // At most one max-length step at base speed
        assert!(game.state().run.distance <= 340.0 * 0.1 / 16.0 + 1e-4);
    }

    #[test]
    fn test_apply_settings_mid_run() {
        let mut game = Game::new(
            3,
            Tuning::default(),
            &Settings::default(),
            MemoryStore::new(),
            LogPresenter::default(),
        );
        game.frame(FRAME_MS, &tap());
        game.state.run.shield_remaining = 3.0;
        assert!(game.presenter().mixer().effective_volume() > 0.0);

        let settings = Settings {
            muted: true,
            reduced_motion: true,
            ..Settings::default()
        };
        game.apply_settings(&settings);
        assert!(game.state().reduced_motion);
        assert_eq!(game.presenter().mixer().effective_volume(), 0.0);

        for _ in 0..30 {
            game.frame(FRAME_MS, &FrameInput::default());
            let overlay = game.state().shield_overlay.expect("shield overlay");
            assert_eq!(overlay.scale, 1.0);
        }
    }

    #[test]
    fn test_reduced_motion_reaches_state() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let game = Game::new(
            1,
            Tuning::default(),
            &settings,
            MemoryStore::new(),
            RecordingPresenter::default(),
        );
        assert!(game.state().reduced_motion);
    }
}
