//! Snapshot and resume tests
//!
//! A game saved mid-turn and loaded from disk must continue exactly as the
//! uninterrupted game does.

use similar_asserts::assert_eq;
use tcg_engine::core::PlayerId;
use tcg_engine::game::{
    GameConfig, GameLogger, GameLoop, GameSnapshot, GameState, PlayerController,
    RandomController, VerbosityLevel,
};
use tcg_engine::loader::DeckList;

fn drive(engine: &mut GameLoop, controllers: &mut [Box<dyn PlayerController>; 2], steps: usize) {
    for _ in 0..steps {
        let actor = engine.acting_player();
        let action = controllers[actor.index()].choose_action(&engine.view(actor));
        engine.step(action);
    }
}

#[test]
fn test_resume_from_file_matches_uninterrupted_run() {
    let deck = DeckList::starter().cards();
    let game = GameState::new(GameConfig::default().with_seed(88), deck.clone(), deck).unwrap();
    let mut engine =
        GameLoop::new(game).with_logger(GameLogger::with_verbosity(VerbosityLevel::Silent));
    engine.reset();
    let mut controllers: [Box<dyn PlayerController>; 2] = [
        Box::new(RandomController::with_seed(PlayerId::FIRST, 1)),
        Box::new(RandomController::with_seed(PlayerId::SECOND, 2)),
    ];
    drive(&mut engine, &mut controllers, 777);

    let path = std::env::temp_dir().join(format!("tcg_snapshot_{}.json", std::process::id()));
    GameSnapshot::capture(&engine)
        .with_controller_state(
            controllers[0].snapshot_state(),
            controllers[1].snapshot_state(),
        )
        .save_to_file(&path)
        .unwrap();

    let snapshot = GameSnapshot::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    let mut resumed_controllers: [Box<dyn PlayerController>; 2] = [
        snapshot.p1_controller_state.clone().unwrap().into_controller(),
        snapshot.p2_controller_state.clone().unwrap().into_controller(),
    ];
    let mut resumed = snapshot
        .into_game_loop()
        .with_logger(GameLogger::with_verbosity(VerbosityLevel::Silent));
    assert_eq!(resumed.episodes_completed(), engine.episodes_completed());

    drive(&mut engine, &mut controllers, 3_000);
    drive(&mut resumed, &mut resumed_controllers, 3_000);
    assert_eq!(
        serde_json::to_value(&engine.game).unwrap(),
        serde_json::to_value(&resumed.game).unwrap()
    );
    assert_eq!(engine.episodes_completed(), resumed.episodes_completed());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = GameSnapshot::load_from_file("/nonexistent/tcg.snapshot");
    assert!(matches!(result, Err(tcg_engine::TcgError::Io(_))));
}
