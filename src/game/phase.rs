//! Phase identifiers
//!
//! Each variant names one handler of the turn engine. Handlers are
//! dispatched through a single `match` in the game loop.

use crate::game::stack::PendingEffect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Untap,
    Upkeep,
    Draw,
    Play,
    Attack,
    Block,
    Priority,
    /// Caster picks a target for a spell that has already been paid for
    Target(PendingEffect),
}

impl Phase {
    /// Short label for UIs and logs
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Untap => "Untap",
            Phase::Upkeep => "Upkeep",
            Phase::Draw => "Draw",
            Phase::Play => "Play",
            Phase::Attack => "Attack",
            Phase::Block => "Block",
            Phase::Priority => "Priority",
            Phase::Target(_) => "Target",
        }
    }

    /// Does this handler ever stop to wait for an action?
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Phase::Play | Phase::Attack | Phase::Block | Phase::Priority | Phase::Target(_)
        )
    }
}
