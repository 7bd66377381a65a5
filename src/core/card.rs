//! Card types and definitions

use crate::core::{Condition, EffectKind, SpellEffect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card types supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Land,
    Creature,
    Instant,
    Sorcery,
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardType::Land => "Land",
            CardType::Creature => "Creature",
            CardType::Instant => "Instant",
            CardType::Sorcery => "Sorcery",
        };
        write!(f, "{name}")
    }
}

/// Mutable combat-relevant state of a creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureState {
    pub attack: i32,
    /// Current health; can reach 0 before the creature is moved out
    pub health: i32,
    /// True until the controller's next upkeep
    pub summoning_sickness: bool,
    pub attacking: bool,
    /// Board index of the attacker this creature blocks
    pub defending: Option<usize>,
    /// Enter-the-battlefield trigger
    pub effect: EffectKind,
}

/// Type-tagged payload of a card
///
/// The variant is fixed at creation; only the fields inside it change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Land,
    Creature(CreatureState),
    Instant(SpellEffect),
    Sorcery(SpellEffect),
}

/// A card instance in some zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name (e.g., "Lightning Bolt")
    pub name: String,

    /// Generic mana cost
    pub cost: u32,

    /// Is the card tapped?
    pub tapped: bool,

    pub kind: CardKind,
}

impl Card {
    pub fn land(name: impl Into<String>) -> Self {
        Card {
            name: name.into(),
            cost: 0,
            tapped: false,
            kind: CardKind::Land,
        }
    }

    pub fn creature(name: impl Into<String>, cost: u32, attack: i32, health: i32) -> Self {
        Self::creature_with_effect(name, cost, attack, health, EffectKind::None)
    }

    pub fn creature_with_effect(
        name: impl Into<String>,
        cost: u32,
        attack: i32,
        health: i32,
        effect: EffectKind,
    ) -> Self {
        Card {
            name: name.into(),
            cost,
            tapped: false,
            kind: CardKind::Creature(CreatureState {
                attack,
                health,
                summoning_sickness: true,
                attacking: false,
                defending: None,
                effect,
            }),
        }
    }

    pub fn instant(name: impl Into<String>, cost: u32, spell: SpellEffect) -> Self {
        Card {
            name: name.into(),
            cost,
            tapped: false,
            kind: CardKind::Instant(spell),
        }
    }

    pub fn sorcery(name: impl Into<String>, cost: u32, spell: SpellEffect) -> Self {
        Card {
            name: name.into(),
            cost,
            tapped: false,
            kind: CardKind::Sorcery(spell),
        }
    }

    pub fn card_type(&self) -> CardType {
        match self.kind {
            CardKind::Land => CardType::Land,
            CardKind::Creature(_) => CardType::Creature,
            CardKind::Instant(_) => CardType::Instant,
            CardKind::Sorcery(_) => CardType::Sorcery,
        }
    }

    pub fn is_land(&self) -> bool {
        matches!(self.kind, CardKind::Land)
    }

    pub fn is_creature(&self) -> bool {
        matches!(self.kind, CardKind::Creature(_))
    }

    pub fn as_creature(&self) -> Option<&CreatureState> {
        match &self.kind {
            CardKind::Creature(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_creature_mut(&mut self) -> Option<&mut CreatureState> {
        match &mut self.kind {
            CardKind::Creature(c) => Some(c),
            _ => None,
        }
    }

    /// Spell payload for instants and sorceries
    pub fn spell(&self) -> Option<&SpellEffect> {
        match &self.kind {
            CardKind::Instant(s) | CardKind::Sorcery(s) => Some(s),
            _ => None,
        }
    }

    /// Casting condition; permanents have none
    pub fn condition(&self) -> Condition {
        self.spell().map(|s| s.condition).unwrap_or_default()
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CardKind::Creature(c) => write!(f, "{} ({}) {}/{}", self.name, self.cost, c.attack, c.health),
            _ => write!(f, "{} ({})", self.name, self.cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_starts_sick() {
        let bears = Card::creature("Grizzly Bears", 2, 2, 2);
        assert_eq!(bears.card_type(), CardType::Creature);
        let state = bears.as_creature().unwrap();
        assert!(state.summoning_sickness);
        assert!(!state.attacking);
        assert_eq!(state.defending, None);
    }

    #[test]
    fn test_spell_payload() {
        let bolt = Card::instant(
            "Lightning Bolt",
            1,
            SpellEffect::new(EffectKind::DamageCreature(3), Condition::OpponentHasCreature, 1),
        );
        assert_eq!(bolt.card_type(), CardType::Instant);
        assert_eq!(bolt.condition(), Condition::OpponentHasCreature);
        assert!(bolt.as_creature().is_none());

        let mountain = Card::land("Mountain");
        assert_eq!(mountain.condition(), Condition::Always);
        assert!(mountain.spell().is_none());
    }

    #[test]
    fn test_creature_state_accessors() {
        let mut ogre = Card::creature("Gray Ogre", 3, 2, 2);
        ogre.as_creature_mut().unwrap().health = 1;
        assert_eq!(ogre.as_creature().unwrap().health, 1);

        let mut mountain = Card::land("Mountain");
        assert!(mountain.as_creature().is_none());
        assert!(mountain.as_creature_mut().is_none());
    }

    #[test]
    fn test_tap_untap() {
        let mut mountain = Card::land("Mountain");
        mountain.tap();
        assert!(mountain.tapped);
        mountain.untap();
        assert!(!mountain.tapped);
    }
}
