//! Error types for the TCG engine
//!
//! Rule violations inside a game (bad card index, not enough mana) are not
//! errors: the phase handler logs them and re-polls. These variants cover
//! construction, configuration and I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TcgError {
    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid controller script: {0}")]
    InvalidScript(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TcgError>;
