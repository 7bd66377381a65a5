//! Fixed script controller for deterministic testing
//!
//! Replays a predetermined sequence of action indices. Once the script is
//! exhausted it presses Enter forever.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{Action, ControllerState, ACTION_SPACE};
use crate::{Result, TcgError};

/// A controller that follows a fixed script of action indices
///
/// Serializable, so snapshots can save and restore its position.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FixedScriptController {
    player_id: PlayerId,
    /// Action indices to replay, each in `0..ACTION_SPACE`
    script: Vec<u8>,
    /// Current position in the script
    pub current_index: usize,
}

impl FixedScriptController {
    pub fn new(player_id: PlayerId, script: Vec<u8>) -> Self {
        FixedScriptController {
            player_id,
            script,
            current_index: 0,
        }
    }

    /// Parse a script like `"1 2 10"` or `"1,2,10"`
    ///
    /// # Example
    /// ```
    /// use tcg_engine::core::PlayerId;
    /// use tcg_engine::game::FixedScriptController;
    ///
    /// let controller = FixedScriptController::parse(PlayerId::FIRST, "0, 10 11").unwrap();
    /// assert_eq!(controller.remaining(), 3);
    /// ```
    pub fn parse(player_id: PlayerId, script: &str) -> Result<Self> {
        let mut actions = Vec::new();
        for token in script
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            let index: u8 = token.parse().map_err(|_| {
                TcgError::InvalidScript(format!("'{token}' is not an action index"))
            })?;
            if index >= ACTION_SPACE {
                return Err(TcgError::InvalidScript(format!(
                    "action {index} is outside 0..{ACTION_SPACE}"
                )));
            }
            actions.push(index);
        }
        Ok(Self::new(player_id, actions))
    }

    /// Actions left before the script runs out
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.current_index)
    }

    fn next_choice(&mut self) -> Action {
        match self.script.get(self.current_index) {
            Some(&index) => {
                self.current_index += 1;
                Action::from_index(index)
            }
            None => Action::Enter,
        }
    }
}

impl PlayerController for FixedScriptController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "script"
    }

    fn choose_action(&mut self, _view: &GameStateView) -> Action {
        self.next_choice()
    }

    fn snapshot_state(&self) -> Option<ControllerState> {
        Some(ControllerState::Fixed(self.clone()))
    }
}
