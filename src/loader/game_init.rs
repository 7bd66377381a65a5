//! Game initialization from deck lists

use crate::game::{GameConfig, GameLogger, GameLoop, GameState};
use crate::loader::DeckList;
use crate::Result;

/// Builds ready-to-step engines from a config and two deck lists
pub struct GameInitializer {
    config: GameConfig,
    logger: GameLogger,
}

impl GameInitializer {
    pub fn new(config: GameConfig) -> Self {
        GameInitializer {
            config,
            logger: GameLogger::new(),
        }
    }

    /// Logger settings copied into every engine built
    pub fn with_logger(mut self, logger: GameLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Validate both lists, build the state, and reset to the first
    /// decision point
    pub fn init_game(&self, player1_deck: &DeckList, player2_deck: &DeckList) -> Result<GameLoop> {
        player1_deck.validate(&self.config)?;
        player2_deck.validate(&self.config)?;
        let game = GameState::new(self.config.clone(), player1_deck.cards(), player2_deck.cards())?;
        let mut engine = GameLoop::new(game).with_logger(self.logger.clone());
        engine.reset();
        Ok(engine)
    }
}
