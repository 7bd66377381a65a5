//! Deck lists and game construction
//!
//! Decks are built in code; there is no card file format.

pub mod deck;
pub mod game_init;

pub use deck::{DeckEntry, DeckList};
pub use game_init::GameInitializer;
