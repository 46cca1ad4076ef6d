//! Auto-move finder for hints and auto-play.

pub mod finder;

pub use finder::{auto_play, auto_step, find_moves, hints, FinderMode, FinderResult, Hint, StepOutcome};
