//! Full-run scenarios driven through the public API

use glam::Vec2;
use proptest::prelude::*;

use runner_dash::consts::FRAME_MS;
use runner_dash::persistence::{BestScoreStore, FileStore};
use runner_dash::presentation::RecordingPresenter;
use runner_dash::sim::powerup::attract_coins;
use runner_dash::sim::spawner::{OBSTACLE_HALF_EXTENTS, spawn_coin_cluster};
use runner_dash::sim::state::EntityIds;
use runner_dash::sim::{
    EntityKind, FrameInput, GameEvent, GameState, RunPhase, ScriptedRandom, ScrollingEntity,
    compute_speed, tick,
};
use runner_dash::{Game, Settings, Tuning};

const DT: f32 = 1.0 / 60.0;

fn tap() -> FrameInput {
    FrameInput {
        action: true,
        ..Default::default()
    }
}

fn running(seed: u64) -> GameState {
    let mut state = GameState::new(seed, Tuning::default(), 0);
    tick(&mut state, &tap(), DT);
    assert_eq!(state.phase, RunPhase::Running);
    state
}

#[test]
fn test_base_speed_at_start() {
    assert_eq!(compute_speed(340.0, 0.0, false), 340.0);
    let state = running(1);
    assert_eq!(state.speed, 340.0);
}

#[test]
fn test_speed_capped_far_into_run() {
    assert_eq!(compute_speed(340.0, 6240.0, false), 860.0);
    assert_eq!(compute_speed(340.0, 100_000.0, false), 860.0);
}

#[test]
fn test_missed_coin_roll_spawns_nothing() {
    let tuning = Tuning::default();
    let mut rng = ScriptedRandom::new(vec![0.9], vec![4]);
    let mut ids = EntityIds::default();
    assert!(spawn_coin_cluster(&tuning, &mut rng, &mut ids).is_empty());
    assert_eq!(ids.next_id(), EntityIds::default().next_id());
}

#[test]
fn test_unshielded_hit_ends_run_and_records_best() {
    let mut state = running(2);
    state.run.best = 10;
    state.run.score = 33.5;
    let id = state.ids.next_id();
    let pos = state.actor.pos;
    state
        .obstacles
        .push(ScrollingEntity::new(id, EntityKind::Obstacle, pos, OBSTACLE_HALF_EXTENTS));

    let report = tick(&mut state, &FrameInput::default(), DT);
    assert_eq!(state.phase, RunPhase::GameOver);
    assert!(report.events.contains(&GameEvent::GameOver));
    assert_eq!(state.run.best, 33);
    assert_eq!(report.best_to_save, Some(33));
}

#[test]
fn test_magnet_pulls_only_coins_in_radius() {
    let actor = Vec2::new(160.0, 446.0);
    let half = Vec2::splat(14.0);
    let mut coins = vec![
        ScrollingEntity::new(1, EntityKind::Coin, actor + Vec2::new(120.0, 0.0), half),
        ScrollingEntity::new(2, EntityKind::Coin, actor + Vec2::new(300.0, 0.0), half),
    ];
    coins[1].vel = Vec2::new(0.0, 5.0);

    assert_eq!(attract_coins(&mut coins, actor, 240.0, 600.0), 1);
    assert!((coins[0].vel - Vec2::new(-600.0, 0.0)).length() < 1e-3);
    assert_eq!(coins[1].vel, Vec2::new(0.0, 5.0));
}

#[test]
fn test_best_survives_into_fresh_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("best.json");

    let mut game = Game::new(
        21,
        Tuning::default(),
        &Settings::default(),
        FileStore::new(&path),
        RecordingPresenter::default(),
    );
    game.frame(FRAME_MS, &tap());
    // Never jump: the first obstacle ends the run
    let mut saved = None;
    for _ in 0..900 {
        let report = game.frame(FRAME_MS, &FrameInput::default());
        if report.best_to_save.is_some() {
            saved = report.best_to_save;
            break;
        }
    }
    let saved = saved.expect("run should end on the first obstacle");
    assert_eq!(game.state().phase, RunPhase::GameOver);
    assert_eq!(game.state().run.best, saved);

    let fresh = FileStore::new(&path);
    assert_eq!(fresh.load_best().unwrap(), saved);
    let next = Game::new(
        22,
        Tuning::default(),
        &Settings::default(),
        fresh,
        RecordingPresenter::default(),
    );
    assert_eq!(next.snapshot().best, saved);
}

#[test]
fn test_restart_keeps_best_and_clears_run() {
    let mut game = Game::new(
        5,
        Tuning::default(),
        &Settings::default(),
        runner_dash::persistence::MemoryStore::new(),
        RecordingPresenter::default(),
    );
    game.frame(FRAME_MS, &tap());
    for _ in 0..900 {
        if game.state().phase == RunPhase::GameOver {
            break;
        }
        game.frame(FRAME_MS, &FrameInput::default());
    }
    assert_eq!(game.state().phase, RunPhase::GameOver);
    let best = game.state().run.best;

    game.frame(FRAME_MS, &tap());
    assert_eq!(game.state().phase, RunPhase::Ready);
    assert_eq!(game.state().run.best, best);
    assert_eq!(game.state().run.score, 0.0);
    assert_eq!(game.state().entity_count(), 0);
    assert_eq!(game.store().stored(), Some(best));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_running_totals_never_decrease(
        seed in any::<u64>(),
        taps in prop::collection::vec(any::<bool>(), 1..400),
    ) {
        let mut state = running(seed);
        let max_speed = state.tuning.max_ramp_speed();
        for action in taps {
            let before = state.run.clone();
            let was_running = state.phase == RunPhase::Running;
            tick(&mut state, &FrameInput { action, pause: false }, DT);
            if was_running && state.phase != RunPhase::Ready {
                prop_assert!(state.run.distance >= before.distance);
                prop_assert!(state.run.score >= before.score);
                prop_assert!(state.run.coins >= before.coins);
                prop_assert!(state.run.best >= before.best);
            }
            if state.phase == RunPhase::Running {
                prop_assert!(state.speed >= state.tuning.base_speed);
                prop_assert!(state.speed <= max_speed * state.tuning.boost_multiplier + 1e-3);
            }
        }
    }
}
