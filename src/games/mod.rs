//! Game drivers built on the engine.

pub mod klondike;
