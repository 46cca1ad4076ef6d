//! Error types.
//!
//! None of these are fatal to a session: a deal that fails to decode or a
//! corpus that cannot be read both fall back to a fresh random deal.

use std::path::PathBuf;

use super::card::Card;
use super::config::DrawMode;

/// A single token that is not `<SuitInitial><RankLabel>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card token `{0}`")]
pub struct ParseCardError(pub String);

/// A decoded deal does not yield exactly 52 valid, distinct cards.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckIntegrityError {
    #[error("token {index} (`{token}`) is not a card")]
    InvalidToken { index: usize, token: String },

    #[error("expected 52 cards, found {found}")]
    WrongCount { found: usize },

    #[error("card {card} appears more than once")]
    Duplicate { card: Card },
}

/// The winning-deal corpus cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum CorpusUnavailableError {
    #[error("corpus file {} does not exist", .path.display())]
    Missing { path: PathBuf },

    #[error("cannot read corpus file {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no {mode} deals in corpus")]
    Empty { mode: DrawMode },

    #[error("cannot append to corpus file {}", .path.display())]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    DeckIntegrity(#[from] DeckIntegrityError),

    #[error(transparent)]
    CorpusUnavailable(#[from] CorpusUnavailableError),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
