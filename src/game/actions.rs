//! Discrete action space
//!
//! Every `step` receives one index in `0..=12`. Its meaning depends on the
//! phase currently on top of the stack: low indices pick a card or creature
//! by position, the three high indices are fixed commands.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ACTION_ENTER: u8 = 10;
pub const ACTION_NOOP: u8 = 11;
pub const ACTION_TOGGLE_PRIORITY: u8 = 12;

/// Number of distinct action indices
pub const ACTION_SPACE: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Select a card or creature by its position in the relevant zone
    Select(usize),
    /// Confirm / advance / pass priority
    Enter,
    /// Re-poll without doing anything
    Noop,
    /// Toggle the acting player's priority participation
    TogglePriority,
}

impl Action {
    /// Decode a raw action index
    ///
    /// Indices above 12 decode as selections; no zone is that long, so the
    /// handlers reject them like any other out-of-range index.
    pub fn from_index(index: u8) -> Self {
        match index {
            ACTION_ENTER => Action::Enter,
            ACTION_NOOP => Action::Noop,
            ACTION_TOGGLE_PRIORITY => Action::TogglePriority,
            i => Action::Select(i as usize),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Action::Select(i) => i.min(u8::MAX as usize) as u8,
            Action::Enter => ACTION_ENTER,
            Action::Noop => ACTION_NOOP,
            Action::TogglePriority => ACTION_TOGGLE_PRIORITY,
        }
    }
}

impl From<u8> for Action {
    fn from(index: u8) -> Self {
        Action::from_index(index)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Select(i) => write!(f, "select {i}"),
            Action::Enter => write!(f, "enter"),
            Action::Noop => write!(f, "noop"),
            Action::TogglePriority => write!(f, "toggle priority"),
        }
    }
}
