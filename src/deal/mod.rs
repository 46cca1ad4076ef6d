//! Deal generation and the corpus line codec.
//!
//! Two deal sources feed the same layout:
//! - `Deal::random`: a shuffled canonical deck
//! - `Deal::from_corpus_line`: a persisted winning deal

pub mod codec;
pub mod generator;

pub use codec::{decode, encode};
pub use generator::{Deal, DealSource};
