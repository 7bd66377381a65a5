//! TCG Engine - a stack-driven two-player card game environment
//!
//! The engine exposes a `reset`/`step` contract for reinforcement-learning
//! drivers. All control flow lives on an effect stack of phase continuations
//! and pending effects, so the whole game is a plain serializable value.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{Result, TcgError};
