//! Game snapshots for stop-and-resume play
//!
//! The effect stack holds the engine's whole continuation, so a snapshot is
//! just the serialized `GameState` (zones, counters, stack, RNG) plus
//! whatever controller state the driver wants to keep. Snapshots can be
//! taken at any await point, mid-turn included.

use crate::core::PlayerId;
use crate::game::controller::PlayerController;
use crate::game::state::GameState;
use crate::game::{FixedScriptController, GameLoop, RandomController, ZeroController};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Controller state that can be preserved across snapshot/resume
///
/// Must stay externally tagged: serde's internally tagged buffering cannot
/// hold the u128 word position inside the ChaCha RNG.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ControllerState {
    /// Fixed script controller with its position
    Fixed(FixedScriptController),

    /// Random controller with its own RNG state
    Random(RandomController),

    /// Stateless; only the seat is kept
    Zero { player_id: PlayerId },
}

impl ControllerState {
    pub fn into_controller(self) -> Box<dyn PlayerController> {
        match self {
            ControllerState::Fixed(controller) => Box::new(controller),
            ControllerState::Random(controller) => Box::new(controller),
            ControllerState::Zero { player_id } => Box::new(ZeroController::new(player_id)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The complete game state, effect stack included
    pub game_state: GameState,

    /// Episodes finished before the snapshot was taken
    pub episodes_completed: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1_controller_state: Option<ControllerState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p2_controller_state: Option<ControllerState>,
}

impl GameSnapshot {
    /// Capture the engine as it stands
    pub fn capture(engine: &GameLoop) -> Self {
        GameSnapshot {
            game_state: engine.game.clone(),
            episodes_completed: engine.episodes_completed(),
            p1_controller_state: None,
            p2_controller_state: None,
        }
    }

    pub fn with_controller_state(
        mut self,
        p1_controller_state: Option<ControllerState>,
        p2_controller_state: Option<ControllerState>,
    ) -> Self {
        self.p1_controller_state = p1_controller_state;
        self.p2_controller_state = p2_controller_state;
        self
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Rebuild an engine that continues exactly where this one stopped
    ///
    /// The engine is not reset; its next `step` resumes from the stack.
    pub fn into_game_loop(self) -> GameLoop {
        GameLoop::new(self.game_state).with_episodes_completed(self.episodes_completed)
    }
}
