//! Held-card selection.
//!
//! Picking cards up never mutates the piles: the held run stays in its
//! origin pile until a drop commits or abandons it.

use smallvec::SmallVec;

use crate::core::card::Card;
use crate::core::pile::{PileId, PileKind};
use crate::core::state::GameState;

/// Cards lifted from one pile, lead card first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    /// Pile the cards were lifted from.
    pub origin: PileId,
    /// Index of the lead card in the origin pile.
    pub index: usize,
    /// Lead card followed by every card stacked above it.
    pub cards: SmallVec<[Card; 13]>,
}

impl Selection {
    /// The lowest held card; legality is judged on this card.
    #[must_use]
    pub fn lead(&self) -> Card {
        self.cards[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Each held card with its index in the origin pile.
    pub fn origin_positions(&self) -> impl Iterator<Item = (Card, usize)> + '_ {
        self.cards.iter().enumerate().map(move |(i, &c)| (c, self.index + i))
    }
}

impl GameState {
    /// Lift the card at `index` of `pile` and everything above it.
    ///
    /// - Stock cards are never lifted (stock is drawn, not dragged)
    /// - Face-down cards cannot be lifted
    /// - Waste and foundation piles only give up their top card
    #[must_use]
    pub fn select(&self, pile: PileId, index: usize) -> Option<Selection> {
        if self.is_won() || pile.kind() == PileKind::Stock {
            return None;
        }

        let cards = self.piles.cards(pile);
        let lead = cards.get(index)?;
        if !lead.is_face_up() {
            return None;
        }

        let top_only = matches!(pile.kind(), PileKind::Waste | PileKind::Foundation);
        if top_only && index + 1 != cards.len() {
            return None;
        }

        Some(Selection {
            origin: pile,
            index,
            cards: cards[index..].iter().map(|p| p.card).collect(),
        })
    }
}
