//! Game configuration

use crate::core::PlayerId;
use crate::game::stack::STACK_SIZE;
use crate::zones::HAND_SIZE;
use crate::{Result, TcgError};
use serde::{Deserialize, Serialize};

pub const STARTING_HEALTH: i32 = 20;
pub const OPENING_HAND_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Health each player starts every episode with
    pub starting_health: i32,

    /// Cards dealt to each player at reset
    pub opening_hand_size: usize,

    /// Effect stack bound
    pub stack_capacity: usize,

    /// Seed for shuffles and the starting player
    pub seed: u64,

    /// Initial priority participation per seat, restored at every reset
    pub participate_in_priority: [bool; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_health: STARTING_HEALTH,
            opening_hand_size: OPENING_HAND_SIZE,
            stack_capacity: STACK_SIZE,
            seed: 0,
            participate_in_priority: [false, true],
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_starting_health(mut self, health: i32) -> Self {
        self.starting_health = health;
        self
    }

    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    pub fn with_stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    pub fn with_priority_participation(mut self, player: PlayerId, participate: bool) -> Self {
        self.participate_in_priority[player.index()] = participate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.starting_health <= 0 {
            return Err(TcgError::InvalidConfig(format!(
                "starting health must be positive, got {}",
                self.starting_health
            )));
        }
        if self.opening_hand_size > HAND_SIZE {
            return Err(TcgError::InvalidConfig(format!(
                "opening hand of {} exceeds hand capacity {}",
                self.opening_hand_size, HAND_SIZE
            )));
        }
        // untap + upkeep + draw + priority windows need a handful of slots
        if self.stack_capacity < 8 {
            return Err(TcgError::InvalidConfig(format!(
                "stack capacity {} is too small",
                self.stack_capacity
            )));
        }
        Ok(())
    }
}
