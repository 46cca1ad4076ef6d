//! Move execution, held-card selection and single-level undo.
//!
//! - `executor`: commit moves, draw, recycle, flip
//! - `selection`: what a pick-up lifts
//! - `undo`: the pending undo record and rollback

pub mod executor;
pub mod selection;
pub mod undo;

pub use executor::{MoveOutcome, RecycleOutcome, StockOutcome};
pub use selection::Selection;
pub use undo::{UndoManager, UndoRecord};
