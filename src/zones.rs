//! Game zones (Deck, Hand, Board, Lands, Graveyard)

use crate::core::Card;
use serde::{Deserialize, Serialize};

pub const HAND_SIZE: usize = 10;
pub const BOARD_SIZE: usize = 10;
pub const LAND_SIZE: usize = 10;
pub const DECK_SIZE: usize = 60;
pub const GRAVEYARD_SIZE: usize = 60;

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Deck,
    Hand,
    Board,
    Lands,
    Graveyard,
}

impl ZoneKind {
    /// Fixed number of cards a zone of this kind may hold
    pub fn capacity(self) -> usize {
        match self {
            ZoneKind::Deck => DECK_SIZE,
            ZoneKind::Hand => HAND_SIZE,
            ZoneKind::Board => BOARD_SIZE,
            ZoneKind::Lands => LAND_SIZE,
            ZoneKind::Graveyard => GRAVEYARD_SIZE,
        }
    }
}

/// Result of drawing from a deck into a hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn,
    /// Hand at capacity; the card stays in the deck
    HandFull,
    /// Nothing left to draw; the drawing player loses
    DeckEmpty,
}

/// An ordered, bounded sequence of cards
///
/// Removal shifts later cards left, so order is stable. The deck draws from
/// the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    cards: Vec<Card>,
}

impl Zone {
    pub fn new(kind: ZoneKind) -> Self {
        Zone {
            kind,
            cards: Vec::with_capacity(kind.capacity()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.kind.capacity()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity()
    }

    /// Append a card. Panics when the zone is at capacity; callers check first.
    pub fn push(&mut self, card: Card) {
        assert!(
            !self.is_full(),
            "{:?} zone overflow (capacity {})",
            self.kind,
            self.capacity()
        );
        self.cards.push(card);
    }

    /// Remove the card at `idx`, shifting later cards left
    pub fn remove(&mut self, idx: usize) -> Card {
        self.cards.remove(idx)
    }

    pub fn get(&self, idx: usize) -> Option<&Card> {
        self.cards.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Card> {
        self.cards.get_mut(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Card> {
        self.cards.iter_mut()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look at the next card a draw would take
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Collection of all zones for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: Zone,
    pub hand: Zone,
    pub board: Zone,
    pub lands: Zone,
    pub graveyard: Zone,
}

impl PlayerZones {
    pub fn new() -> Self {
        PlayerZones {
            deck: Zone::new(ZoneKind::Deck),
            hand: Zone::new(ZoneKind::Hand),
            board: Zone::new(ZoneKind::Board),
            lands: Zone::new(ZoneKind::Lands),
            graveyard: Zone::new(ZoneKind::Graveyard),
        }
    }

    pub fn zone(&self, kind: ZoneKind) -> &Zone {
        match kind {
            ZoneKind::Deck => &self.deck,
            ZoneKind::Hand => &self.hand,
            ZoneKind::Board => &self.board,
            ZoneKind::Lands => &self.lands,
            ZoneKind::Graveyard => &self.graveyard,
        }
    }

    pub fn zone_mut(&mut self, kind: ZoneKind) -> &mut Zone {
        match kind {
            ZoneKind::Deck => &mut self.deck,
            ZoneKind::Hand => &mut self.hand,
            ZoneKind::Board => &mut self.board,
            ZoneKind::Lands => &mut self.lands,
            ZoneKind::Graveyard => &mut self.graveyard,
        }
    }

    /// Move the card at `idx` from one zone to the end of another
    ///
    /// Panics if the destination is full.
    pub fn move_card(&mut self, from: ZoneKind, to: ZoneKind, idx: usize) {
        assert!(
            !self.zone(to).is_full(),
            "cannot move card into full {to:?} zone"
        );
        let card = self.zone_mut(from).remove(idx);
        self.zone_mut(to).push(card);
    }

    /// Draw the top (last) card of the deck into the hand
    pub fn draw(&mut self) -> DrawOutcome {
        if self.deck.is_empty() {
            return DrawOutcome::DeckEmpty;
        }
        if self.hand.is_full() {
            return DrawOutcome::HandFull;
        }
        let top = self.deck.len() - 1;
        self.move_card(ZoneKind::Deck, ZoneKind::Hand, top);
        DrawOutcome::Drawn
    }

    /// Empty every zone
    pub fn clear(&mut self) {
        for kind in [
            ZoneKind::Deck,
            ZoneKind::Hand,
            ZoneKind::Board,
            ZoneKind::Lands,
            ZoneKind::Graveyard,
        ] {
            self.zone_mut(kind).clear();
        }
    }
}

impl Default for PlayerZones {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Card {
        Card::land(name)
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut zone = Zone::new(ZoneKind::Hand);
        for name in ["a", "b", "c", "d"] {
            zone.push(named(name));
        }

        let removed = zone.remove(1);
        assert_eq!(removed.name, "b");
        let names: Vec<&str> = zone.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn test_push_past_capacity_panics() {
        let mut zone = Zone::new(ZoneKind::Board);
        for i in 0..=BOARD_SIZE {
            zone.push(Card::creature(format!("c{i}"), 1, 1, 1));
        }
    }

    #[test]
    fn test_draw_takes_from_end() {
        let mut zones = PlayerZones::new();
        zones.deck.push(named("bottom"));
        zones.deck.push(named("top"));

        assert_eq!(zones.draw(), DrawOutcome::Drawn);
        assert_eq!(zones.hand.get(0).unwrap().name, "top");
        assert_eq!(zones.deck.len(), 1);
    }

    #[test]
    fn test_draw_with_full_hand_skips() {
        let mut zones = PlayerZones::new();
        for i in 0..HAND_SIZE {
            zones.hand.push(named(&format!("h{i}")));
        }
        zones.deck.push(named("top"));

        assert_eq!(zones.draw(), DrawOutcome::HandFull);
        assert_eq!(zones.deck.len(), 1);
        assert_eq!(zones.hand.len(), HAND_SIZE);
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut zones = PlayerZones::new();
        assert_eq!(zones.draw(), DrawOutcome::DeckEmpty);
    }

    #[test]
    #[should_panic(expected = "full")]
    fn test_move_into_full_zone_panics() {
        let mut zones = PlayerZones::new();
        for i in 0..LAND_SIZE {
            zones.lands.push(named(&format!("l{i}")));
        }
        zones.hand.push(named("extra"));
        zones.move_card(ZoneKind::Hand, ZoneKind::Lands, 0);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(7);
        let mut deck = Zone::new(ZoneKind::Deck);
        for i in 0..DECK_SIZE {
            deck.push(named(&format!("card{i}")));
        }
        deck.shuffle(&mut rng);
        assert_eq!(deck.len(), DECK_SIZE);
        let mut names: Vec<String> = deck.iter().map(|c| c.name.clone()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DECK_SIZE);
    }
}
