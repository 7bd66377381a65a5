//! Deck lists

use crate::core::{Card, Condition, EffectKind, SpellEffect};
use crate::game::GameConfig;
use crate::zones::DECK_SIZE;
use crate::{Result, TcgError};
use serde::{Deserialize, Serialize};

/// A number of copies of one card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub count: u8,
    pub card: Card,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` copies of `card`
    pub fn with(mut self, count: u8, card: Card) -> Self {
        self.entries.push(DeckEntry { count, card });
        self
    }

    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|entry| entry.count as usize).sum()
    }

    /// Expand entries into one card per copy, in list order
    pub fn cards(&self) -> Vec<Card> {
        self.entries
            .iter()
            .flat_map(|entry| std::iter::repeat(entry.card.clone()).take(entry.count as usize))
            .collect()
    }

    /// Check the list fits a deck zone and survives the opening deal
    /// of `config` plus one draw
    pub fn validate(&self, config: &GameConfig) -> Result<()> {
        let total = self.total_cards();
        let minimum = config.opening_hand_size + 1;
        if total == 0 {
            return Err(TcgError::InvalidDeck("deck is empty".to_string()));
        }
        if total <= minimum {
            return Err(TcgError::InvalidDeck(format!(
                "deck has {total} cards, needs more than {minimum}"
            )));
        }
        if total > DECK_SIZE {
            return Err(TcgError::InvalidDeck(format!(
                "deck has {total} cards, capacity is {DECK_SIZE}"
            )));
        }
        Ok(())
    }

    /// Sixty-card list with lands, vanilla and enter-the-battlefield
    /// creatures, a targeted damage instant, a life-gain instant and a draw
    /// sorcery
    pub fn starter() -> Self {
        DeckList::new()
            .with(22, Card::land("Mountain"))
            .with(4, Card::creature("Raging Goblin", 1, 1, 1))
            .with(6, Card::creature("Grizzly Bears", 2, 2, 2))
            .with(4, Card::creature("Gray Ogre", 3, 2, 2))
            .with(6, Card::creature("Hill Giant", 4, 3, 3))
            .with(2, Card::creature("Craw Wurm", 6, 6, 4))
            .with(
                4,
                Card::creature_with_effect("Elvish Visionary", 2, 1, 1, EffectKind::DrawCard),
            )
            .with(
                6,
                Card::instant(
                    "Lightning Bolt",
                    1,
                    SpellEffect::new(
                        EffectKind::DamageCreature(3),
                        Condition::OpponentHasCreature,
                        1,
                    ),
                ),
            )
            .with(
                2,
                Card::instant(
                    "Healing Salve",
                    1,
                    SpellEffect::new(EffectKind::GainLife(3), Condition::Always, 0),
                ),
            )
            .with(
                4,
                Card::sorcery(
                    "Preordain",
                    1,
                    SpellEffect::new(EffectKind::DrawCard, Condition::HandNotFull, 0),
                ),
            )
    }
}
