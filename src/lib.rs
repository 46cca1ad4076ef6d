//! # klondike-engine
//!
//! A single-deal Klondike solitaire engine: pile model, move legality,
//! move execution with draw/recycle, a greedy auto-move finder, one level
//! of undo, win detection and a corpus of deals the auto-player has won.
//!
//! ## Design Principles
//!
//! 1. **One owned state**: `GameState` holds the 13 piles, the deal and
//!    every flag. Components take it explicitly.
//!
//! 2. **One legality rule**: `rules::can_drop` is consulted by manual drops
//!    and the auto-move finder alike.
//!
//! 3. **Partition invariant**: the 52 cards are always split across the 13
//!    piles with none lost or duplicated, enforced by `PileManager`.
//!
//! ## Modules
//!
//! - `core`: Cards, pile ids, state, actions, RNG, configuration, errors
//! - `piles`: Pile storage and card locations
//! - `deal`: Random deals, the corpus line codec and the initial layout
//! - `rules`: The `can_drop` legality predicate
//! - `moves`: Move execution, held-card selection and undo
//! - `solver`: Auto-move finder for hints and auto-play
//! - `corpus`: Winning-deal storage and sampling
//! - `games`: The session driver consuming input events
//!
//! ## Example
//!
//! ```
//! use klondike_engine::{auto_play, Deal, DrawMode, GameRng, GameState};
//!
//! let mut rng = GameRng::new(42);
//! let mut state = GameState::new(Deal::random(&mut rng), DrawMode::One);
//! auto_play(&mut state);
//!
//! let status = state.status();
//! assert!(status.won || status.no_more_moves);
//! ```

pub mod core;
pub mod piles;
pub mod deal;
pub mod rules;
pub mod moves;
pub mod solver;
pub mod corpus;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Card, Suit, Rank, Color, Facing,
    PileId, PileKind,
    GameRng,
    DrawMode, EngineConfig,
    Action, ActionRecord, Actor, Move,
    GameState, GameStatus, GameSnapshot,
    Error, Result, DeckIntegrityError, CorpusUnavailableError, ParseCardError,
};

pub use crate::piles::{PileManager, PilePosition, PlacedCard};

pub use crate::deal::{Deal, DealSource};

pub use crate::rules::can_drop;

pub use crate::moves::{MoveOutcome, RecycleOutcome, Selection, StockOutcome};

pub use crate::solver::{auto_play, auto_step, find_moves, hints, FinderMode, FinderResult, Hint, StepOutcome};

pub use crate::corpus::{sample_deal, DealStore, FileCorpus, MemoryCorpus};

pub use crate::games::klondike::{AutoPlay, KeyCommand, Klondike, KlondikeBuilder, PickUp, SessionStats};
