//! Per-player state

use crate::zones::PlayerZones;
use serde::{Deserialize, Serialize};

/// One side of the table: zones plus scalar counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub zones: PlayerZones,

    /// Health total; the player loses at 0 or below
    pub health: i32,

    /// Floating mana; emptied at the owner's untap
    pub mana: u32,

    /// Has a land been played this turn?
    pub land_played: bool,

    /// When false, priority windows held by this player auto-pass
    pub participate_in_priority: bool,
}

impl Player {
    pub fn new(starting_health: i32, participate_in_priority: bool) -> Self {
        Player {
            zones: PlayerZones::new(),
            health: starting_health,
            mana: 0,
            land_played: false,
            participate_in_priority,
        }
    }

    pub fn lose_health(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn gain_health(&mut self, amount: i32) {
        self.health += amount;
    }

    pub fn has_lost(&self) -> bool {
        self.health <= 0
    }

    pub fn can_play_land(&self) -> bool {
        !self.land_played && !self.zones.lands.is_full()
    }

    pub fn has_creature(&self) -> bool {
        self.zones.board.iter().any(|c| c.is_creature())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    #[test]
    fn test_player_health() {
        let mut player = Player::new(20, false);
        player.lose_health(5);
        assert_eq!(player.health, 15);
        assert!(!player.has_lost());

        player.lose_health(15);
        assert!(player.has_lost());

        player.gain_health(3);
        assert_eq!(player.health, 3);
    }

    #[test]
    fn test_land_playing() {
        let mut player = Player::new(20, true);
        assert!(player.can_play_land());
        player.land_played = true;
        assert!(!player.can_play_land());
    }

    #[test]
    fn test_has_creature() {
        let mut player = Player::new(20, true);
        assert!(!player.has_creature());
        player.zones.board.push(Card::creature("Goblin", 1, 1, 1));
        assert!(player.has_creature());
    }
}
