//! Klondike placement rules.
//!
//! A pure predicate with no side effects. The move executor, the manual
//! drop path and the auto-move finder all consult it; nothing else encodes
//! rank, suit or color rules.

pub mod legality;

pub use legality::{accepts, can_drop};
