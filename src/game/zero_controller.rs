//! Zero controller for testing and automation
//!
//! Always presses Enter: plays nothing, attacks with nothing, blocks
//! nothing and passes every priority window. Two zero controllers stall
//! once their hands fill up, so drivers need a step cap.

use crate::core::PlayerId;
use crate::game::controller::{GameStateView, PlayerController};
use crate::game::{Action, ControllerState};

pub struct ZeroController {
    player_id: PlayerId,
}

impl ZeroController {
    pub fn new(player_id: PlayerId) -> Self {
        ZeroController { player_id }
    }
}

impl PlayerController for ZeroController {
    fn player_id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        "zero"
    }

    fn choose_action(&mut self, _view: &GameStateView) -> Action {
        Action::Enter
    }

    fn snapshot_state(&self) -> Option<ControllerState> {
        Some(ControllerState::Zero {
            player_id: self.player_id,
        })
    }
}
