//! Core engine types: cards, piles, state, actions, RNG, configuration.
//!
//! Everything else in the crate builds on these. `GameState` is the single
//! owned value a driver passes to the executor, the undo manager and the
//! auto-move finder; there is no global state.

pub mod card;
pub mod pile;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;
pub mod snapshot;

pub use card::{standard_deck, Card, Color, Facing, Rank, Suit, DECK_SIZE};
pub use pile::{PileId, PileKind};
pub use rng::GameRng;
pub use config::{DrawMode, EngineConfig};
pub use error::{CorpusUnavailableError, DeckIntegrityError, Error, ParseCardError, Result};
pub use action::{Action, ActionRecord, Actor, Move};
pub use state::{GameState, GameStatus};
pub use snapshot::GameSnapshot;
