//! Pile storage for card locations.
//!
//! ## Key Types
//!
//! - `PileManager`: the 13 ordered piles plus a card -> pile index
//! - `PlacedCard`: a card with its current face state
//! - `PilePosition`: position specifier for insertion

pub mod manager;

pub use manager::{PileManager, PilePosition, PlacedCard};

// Re-export pile identifiers from core for convenience
pub use crate::core::pile::{PileId, PileKind};
