//! Player controller trait and game state view
//!
//! Controllers drive the engine from outside: the driver asks the engine
//! who acts next, hands that controller a read-only view, and steps the
//! engine with the action it returns. The engine never calls controllers
//! itself.

use crate::core::{Card, Player, PlayerId};
use crate::game::{
    Action, ControllerState, FixedScriptController, GameState, Phase, RandomController,
    ZeroController,
};
use serde::{Deserialize, Serialize};

/// Read-only view of game state for controllers
pub struct GameStateView<'a> {
    game: &'a GameState,
    player_id: PlayerId,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState, player_id: PlayerId) -> Self {
        GameStateView { game, player_id }
    }

    /// Player this view is for
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Phase waiting for the action
    pub fn phase(&self) -> Option<Phase> {
        self.game.stack.top_phase()
    }

    pub fn me(&self) -> &Player {
        self.game.player(self.player_id)
    }

    pub fn opponent(&self) -> &Player {
        self.game.player(self.player_id.other())
    }

    pub fn hand(&self) -> &[Card] {
        self.me().zones.hand.cards()
    }

    pub fn board(&self) -> &[Card] {
        self.me().zones.board.cards()
    }

    pub fn opponent_board(&self) -> &[Card] {
        self.opponent().zones.board.cards()
    }

    pub fn health(&self) -> i32 {
        self.me().health
    }

    /// Is it this player's game-turn?
    pub fn is_my_turn(&self) -> bool {
        self.game.turn == self.player_id
    }

    pub fn turn_number(&self) -> u32 {
        self.game.turn_number
    }
}

/// Trait for choosing actions
pub trait PlayerController {
    fn player_id(&self) -> PlayerId;

    /// Short name for logs and tournament tables
    fn name(&self) -> &str;

    /// Pick the next action for the phase on top of the stack
    fn choose_action(&mut self, view: &GameStateView) -> Action;

    /// Called once per finished episode
    fn on_episode_end(&mut self, _won: bool) {}

    /// State to store in a snapshot so the controller can be rebuilt
    fn snapshot_state(&self) -> Option<ControllerState> {
        None
    }
}

/// Built-in controller types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    /// Always presses Enter
    Zero,
    /// Uniform random action indices
    Random,
}

impl ControllerKind {
    /// Build a controller of this kind for `player`
    ///
    /// `seed` only matters for random controllers.
    pub fn build(self, player: PlayerId, seed: u64) -> Box<dyn PlayerController> {
        match self {
            ControllerKind::Zero => Box::new(ZeroController::new(player)),
            ControllerKind::Random => Box::new(RandomController::with_seed(player, seed)),
        }
    }
}

/// Parse a script and box it, for drivers that mix kinds
pub fn scripted(player: PlayerId, script: &str) -> crate::Result<Box<dyn PlayerController>> {
    Ok(Box::new(FixedScriptController::parse(player, script)?))
}
