//! Core game types and entities

pub mod card;
pub mod effects;
pub mod player;
pub mod types;

pub use card::{Card, CardKind, CardType, CreatureState};
pub use effects::{Condition, EffectKind, SpellEffect};
pub use player::Player;
pub use types::PlayerId;
