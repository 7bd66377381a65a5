//! Strongly-typed wrappers for game concepts

use crate::TcgError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat of a player in a two-player game
///
/// Seat 0 is conventionally the learning agent, seat 1 its opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a seat id; anything other than 0 maps to seat 1
    pub fn new(seat: u8) -> Self {
        if seat == 0 {
            PlayerId::FIRST
        } else {
            PlayerId::SECOND
        }
    }

    /// The opposing seat
    pub fn other(self) -> Self {
        PlayerId(1 - self.0)
    }

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn both() -> [PlayerId; 2] {
        [PlayerId::FIRST, PlayerId::SECOND]
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = TcgError;

    fn try_from(seat: u8) -> Result<Self, Self::Error> {
        match seat {
            0 => Ok(PlayerId::FIRST),
            1 => Ok(PlayerId::SECOND),
            _ => Err(TcgError::InvalidConfig(format!("seat {seat} out of range 0..2"))),
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> u8 {
        id.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(PlayerId::FIRST.other(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.other(), PlayerId::FIRST);
        assert_eq!(PlayerId::new(7), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.index(), 1);
    }

    #[test]
    fn test_seat_checked_on_deserialize() {
        assert_eq!(serde_json::to_string(&PlayerId::SECOND).unwrap(), "1");
        assert_eq!(serde_json::from_str::<PlayerId>("0").unwrap(), PlayerId::FIRST);
        assert!(serde_json::from_str::<PlayerId>("2").is_err());
        assert!(matches!(PlayerId::try_from(9), Err(TcgError::InvalidConfig(_))));
    }
}
