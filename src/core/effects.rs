//! Card effects and play conditions
//!
//! Effects are plain data. A card names an [`EffectKind`] and a
//! [`Condition`]; the game loop resolves both through a single `match`,
//! so the whole stack stays serializable.

use serde::{Deserialize, Serialize};

/// What happens when an effect resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EffectKind {
    /// Nothing happens (vanilla creatures, flavor spells)
    #[default]
    None,
    /// Deal damage to the targeted creature on the opponent's board
    DamageCreature(i32),
    /// Controller draws one card
    DrawCard,
    /// Controller gains life
    GainLife(i32),
}

impl EffectKind {
    pub fn describe(&self) -> String {
        match self {
            EffectKind::None => "no effect".to_string(),
            EffectKind::DamageCreature(n) => format!("deal {n} damage to target creature"),
            EffectKind::DrawCard => "draw a card".to_string(),
            EffectKind::GainLife(n) => format!("gain {n} life"),
        }
    }
}

/// Requirement that must hold for a spell to be cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Condition {
    #[default]
    Always,
    /// The caster's opponent controls at least one creature
    OpponentHasCreature,
    /// The caster's hand has room for another card
    HandNotFull,
}

/// Effect descriptor carried by instants and sorceries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEffect {
    pub effect: EffectKind,
    pub condition: Condition,
    /// Declared number of targets; 0 means the implicit target is used
    pub num_targets: u8,
}

impl SpellEffect {
    pub fn new(effect: EffectKind, condition: Condition, num_targets: u8) -> Self {
        SpellEffect {
            effect,
            condition,
            num_targets,
        }
    }

    pub fn needs_target(&self) -> bool {
        self.num_targets > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_effects() {
        assert_eq!(
            EffectKind::DamageCreature(3).describe(),
            "deal 3 damage to target creature"
        );
        assert_eq!(EffectKind::default(), EffectKind::None);
    }

    #[test]
    fn test_spell_targets() {
        let bolt = SpellEffect::new(EffectKind::DamageCreature(3), Condition::OpponentHasCreature, 1);
        assert!(bolt.needs_target());

        let divination = SpellEffect::new(EffectKind::DrawCard, Condition::HandNotFull, 0);
        assert!(!divination.needs_target());
    }
}
