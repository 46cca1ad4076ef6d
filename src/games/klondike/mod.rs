//! Klondike session.
//!
//! Consumes already-resolved input events from a front end:
//! - `pick_up(pile, index)`: lift cards, draw from stock, or flip
//! - `drop_on(target)`: commit or reset the held cards
//! - `key(command)`: undo, hint, new deal, draw mode, auto-play
//! - `tick()`: one auto-play step per frame
//!
//! Wins are appended to the deal corpus unless the deal was replayed
//! from it.

mod game;

pub use game::{AutoPlay, KeyCommand, Klondike, KlondikeBuilder, PickUp, SessionStats};
