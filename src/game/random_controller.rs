//! Random controller for baselines and fuzzing
//!
//! Picks action indices uniformly from `0..12`: every selection index plus
//! Enter and no-op, never the priority toggle.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{Action, ControllerState, ACTION_TOGGLE_PRIORITY};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A controller that makes random choices
///
/// The RNG is serializable, so a snapshot resumes the same action sequence.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RandomController {
    player_id: PlayerId,
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Seed from OS entropy
    pub fn new(player_id: PlayerId) -> Self {
        RandomController {
            player_id,
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Seeded RNG, for deterministic tests and tournaments
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        RandomController {
            player_id,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&mut self, _view: &GameStateView) -> Action {
        Action::from_index(self.rng.gen_range(0..ACTION_TOGGLE_PRIORITY))
    }

    fn snapshot_state(&self) -> Option<ControllerState> {
        Some(ControllerState::Random(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameLoop, GameState, VerbosityLevel};
    use crate::loader::DeckList;

    #[test]
    fn test_seeded_controllers_agree() {
        let deck = DeckList::starter().cards();
        let game = GameState::new(GameConfig::default(), deck.clone(), deck).unwrap();
        let view = GameStateView::new(&game, PlayerId::FIRST);

        let mut a = RandomController::with_seed(PlayerId::FIRST, 42);
        let mut b = RandomController::with_seed(PlayerId::FIRST, 42);
        for _ in 0..50 {
            let action = a.choose_action(&view);
            assert_eq!(action, b.choose_action(&view));
            assert_ne!(action, Action::TogglePriority);
        }
    }

    #[test]
    fn test_random_games_finish() {
        let deck = DeckList::starter().cards();
        let config = GameConfig::default().with_seed(17);
        let game = GameState::new(config, deck.clone(), deck).unwrap();
        let mut engine = GameLoop::new(game).with_verbosity(VerbosityLevel::Silent);
        engine.reset();

        let mut controllers: [Box<dyn PlayerController>; 2] = [
            Box::new(RandomController::with_seed(PlayerId::FIRST, 1)),
            Box::new(RandomController::with_seed(PlayerId::SECOND, 2)),
        ];
        let mut finished = 0;
        for _ in 0..3 {
            if engine.run_episode(&mut controllers, 200_000).is_some() {
                finished += 1;
            }
        }
        assert!(finished > 0);
        assert_eq!(engine.episodes_completed(), finished);
    }
}
