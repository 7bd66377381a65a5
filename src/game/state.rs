//! Main game state structure

use crate::core::{Card, Player, PlayerId};
use crate::game::stack::EffectStack;
use crate::game::{GameConfig, Phase};
use crate::zones::{DrawOutcome, DECK_SIZE};
use crate::{Result, TcgError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Complete game state
///
/// Zones, scalar counters, the effect stack and the RNG. Together these are
/// the engine's entire continuation, so cloning or serializing this value
/// captures a game mid-turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Both sides, indexed by `PlayerId::index`
    pub players: [Player; 2],

    /// Card lists each deck is rebuilt from at reset
    pub decklists: [Vec<Card>; 2],

    /// Pending phase continuations and effects
    pub stack: EffectStack,

    /// Attacker currently being assigned blockers
    pub block_idx: usize,

    /// Whose game-turn it is; flips at untap and again for blocking
    pub turn: PlayerId,

    /// Who may act at the current priority window
    pub priority: PlayerId,

    /// Was the last priority action a pass?
    pub priority_passed: bool,

    /// Untap steps seen this episode
    pub turn_number: u32,

    pub config: GameConfig,

    /// Random number generator for shuffles (serializable for deterministic replay)
    pub rng: ChaCha12Rng,
}

impl GameState {
    /// Create a game for two deck lists. Nothing is dealt until `restart`.
    pub fn new(config: GameConfig, deck1: Vec<Card>, deck2: Vec<Card>) -> Result<Self> {
        config.validate()?;
        for (seat, deck) in [&deck1, &deck2].into_iter().enumerate() {
            if deck.len() > DECK_SIZE {
                return Err(TcgError::InvalidDeck(format!(
                    "deck for seat {seat} has {} cards, more than {DECK_SIZE}",
                    deck.len()
                )));
            }
            if deck.len() <= config.opening_hand_size {
                return Err(TcgError::InvalidDeck(format!(
                    "deck for seat {seat} has {} cards, needs more than the opening hand of {}",
                    deck.len(),
                    config.opening_hand_size
                )));
            }
        }

        let participate = config.participate_in_priority;
        Ok(GameState {
            players: [
                Player::new(config.starting_health, participate[0]),
                Player::new(config.starting_health, participate[1]),
            ],
            decklists: [deck1, deck2],
            stack: EffectStack::with_capacity(config.stack_capacity),
            block_idx: 0,
            turn: PlayerId::FIRST,
            priority: PlayerId::FIRST,
            priority_passed: false,
            turn_number: 0,
            rng: ChaCha12Rng::seed_from_u64(config.seed),
            config,
        })
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Player whose game-turn it is
    pub fn active_player(&self) -> &Player {
        self.player(self.turn)
    }

    pub fn active_player_mut(&mut self) -> &mut Player {
        let turn = self.turn;
        self.player_mut(turn)
    }

    /// Borrow `id` and its opponent mutably at the same time
    pub fn player_and_opponent_mut(&mut self, id: PlayerId) -> (&mut Player, &mut Player) {
        let [first, second] = &mut self.players;
        if id == PlayerId::FIRST {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Draw one card for `id`
    pub fn draw_card(&mut self, id: PlayerId) -> DrawOutcome {
        self.player_mut(id).zones.draw()
    }

    /// Reinitialize zones, health and counters for a new episode, deal the
    /// opening hands, and seed the stack with the first phase.
    ///
    /// Does not run any phase; the game loop drains the stack afterwards.
    pub fn restart(&mut self) {
        self.stack.clear();

        for id in PlayerId::both() {
            let participate = self.config.participate_in_priority[id.index()];
            let health = self.config.starting_health;
            let idx = id.index();
            let player = &mut self.players[idx];
            player.zones.clear();
            player.health = health;
            player.mana = 0;
            player.land_played = false;
            player.participate_in_priority = participate;
            for card in &self.decklists[idx] {
                player.zones.deck.push(card.clone());
            }
            player.zones.deck.shuffle(&mut self.rng);
        }

        // Untap hands the turn to the other seat, so start one seat behind
        let first = PlayerId::new(self.rng.gen_range(0..2));
        self.turn = first.other();
        self.priority = first;
        self.priority_passed = false;
        self.block_idx = 0;
        self.turn_number = 0;

        // Deck validation guarantees these draws cannot empty a deck
        for _ in 0..self.config.opening_hand_size {
            for id in PlayerId::both() {
                self.draw_card(id);
            }
        }

        self.stack.push_phase(Phase::Untap);
    }
}
