//! Move legality.
//!
//! `can_drop` is the only place Klondike placement rules live. Manual
//! drops and the auto-move finder both go through it.
//!
//! - Foundation: Ace on empty, otherwise same suit and one rank higher.
//! - Tableau: King on empty, otherwise opposite color and one rank lower.
//! - Stock / Waste: never a drop target.

use crate::core::card::{Card, Rank};
use crate::core::pile::{PileId, PileKind};
use crate::piles::PileManager;

/// Can `card` legally land on `target` in the current layout?
#[must_use]
pub fn can_drop(card: Card, target: PileId, piles: &PileManager) -> bool {
    accepts(target.kind(), piles.top(target).map(|p| p.card), card)
}

/// Placement rule for a pile of `kind` whose top card is `top`.
///
/// Depends only on the pile's classification and its top card.
#[must_use]
pub fn accepts(kind: PileKind, top: Option<Card>, card: Card) -> bool {
    match kind {
        PileKind::Foundation => match top {
            None => card.rank == Rank::ACE,
            Some(top) => card.suit == top.suit && top.rank.succ() == Some(card.rank),
        },
        PileKind::Tableau => match top {
            None => card.rank == Rank::KING,
            Some(top) => card.color() != top.color() && card.rank.succ() == Some(top.rank),
        },
        PileKind::Stock | PileKind::Waste => false,
    }
}
