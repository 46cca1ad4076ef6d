//! Pile manager for card locations and movement.
//!
//! The `PileManager` owns the 13 ordered piles and an index from card to
//! pile. Index 0 of a pile is its bottom; the last element is the
//! accessible top. Moving a card is a single operation that removes it
//! from its current pile and inserts it into the target, so a card is
//! never observed in zero or two piles.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Facing, DECK_SIZE};
use crate::core::error::DeckIntegrityError;
use crate::core::pile::PileId;

/// A card together with its current face state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedCard {
    pub card: Card,
    pub facing: Facing,
}

impl PlacedCard {
    #[must_use]
    pub const fn new(card: Card, facing: Facing) -> Self {
        Self { card, facing }
    }

    #[must_use]
    pub const fn is_face_up(self) -> bool {
        self.facing.is_face_up()
    }
}

/// Position for inserting a card into a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PilePosition {
    /// Add to the top (tail) of the pile.
    Top,
    /// Add to the bottom of the pile.
    Bottom,
    /// Insert at a specific index (0 = bottom). Clamped to the pile length.
    Index(usize),
}

/// Manages card locations across the 13 piles.
///
/// ## Usage
///
/// ```
/// use klondike_engine::core::{Card, Facing, PileId};
/// use klondike_engine::piles::{PileManager, PilePosition};
///
/// let mut piles = PileManager::new();
/// let ace: Card = "SA".parse().unwrap();
///
/// piles.add(ace, Facing::FaceDown, PileId::Stock, PilePosition::Top);
/// piles.move_card(ace, PileId::Waste, PilePosition::Top);
/// piles.set_facing(ace, Facing::FaceUp);
///
/// assert_eq!(piles.locate(ace), Some(PileId::Waste));
/// assert!(piles.top(PileId::Waste).unwrap().is_face_up());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PileManager {
    /// Card locations: card -> pile
    locations: FxHashMap<Card, PileId>,

    /// Ordered contents per pile, indexed by `PileId::index`.
    piles: [Vec<PlacedCard>; PileId::COUNT],
}

impl PileManager {
    /// Create a manager with 13 empty piles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a manager from explicit pile contents, checking that
    /// exactly the 52-card deck is present.
    pub fn from_piles(
        contents: impl IntoIterator<Item = (PileId, Vec<PlacedCard>)>,
    ) -> Result<Self, DeckIntegrityError> {
        let mut manager = Self::new();
        for (pile, cards) in contents {
            for placed in cards {
                if manager.contains(placed.card) {
                    return Err(DeckIntegrityError::Duplicate { card: placed.card });
                }
                manager.add(placed.card, placed.facing, pile, PilePosition::Top);
            }
        }
        manager.verify()?;
        Ok(manager)
    }

    /// Add a card to a pile.
    ///
    /// Panics if the card is already in the manager.
    pub fn add(&mut self, card: Card, facing: Facing, pile: PileId, position: PilePosition) {
        if self.locations.contains_key(&card) {
            panic!("Card {} already exists in pile manager", card);
        }

        self.locations.insert(card, pile);
        insert_at(&mut self.piles[pile.index()], PlacedCard::new(card, facing), position);
    }

    /// Move a card from its current pile to another, keeping its face state.
    ///
    /// Returns the old pile, or `None` if the card wasn't found.
    pub fn move_card(&mut self, card: Card, to: PileId, position: PilePosition) -> Option<PileId> {
        let from = self.locations.get(&card).copied()?;

        if from == to {
            return Some(from);
        }

        let source = &mut self.piles[from.index()];
        let idx = source.iter().position(|p| p.card == card)?;
        let placed = source.remove(idx);

        self.locations.insert(card, to);
        insert_at(&mut self.piles[to.index()], placed, position);

        Some(from)
    }

    /// Set a card's face state. Returns the previous state.
    pub fn set_facing(&mut self, card: Card, facing: Facing) -> Option<Facing> {
        let pile = self.locations.get(&card).copied()?;
        let placed = self.piles[pile.index()].iter_mut().find(|p| p.card == card)?;
        let previous = placed.facing;
        placed.facing = facing;
        Some(previous)
    }

    /// Turn the top card of a pile face-up.
    ///
    /// Returns the card if it was face-down before, `None` if the pile is
    /// empty or its top already faced up.
    pub fn reveal_top(&mut self, pile: PileId) -> Option<Card> {
        let top = self.piles[pile.index()].last_mut()?;
        if top.is_face_up() {
            return None;
        }
        top.facing = Facing::FaceUp;
        Some(top.card)
    }

    /// Get the pile a card is in.
    #[must_use]
    pub fn locate(&self, card: Card) -> Option<PileId> {
        self.locations.get(&card).copied()
    }

    /// Get a card's pile and index within it.
    #[must_use]
    pub fn position_of(&self, card: Card) -> Option<(PileId, usize)> {
        let pile = self.locate(card)?;
        let index = self.piles[pile.index()].iter().position(|p| p.card == card)?;
        Some((pile, index))
    }

    /// Cards in a pile, bottom to top.
    #[must_use]
    pub fn cards(&self, pile: PileId) -> &[PlacedCard] {
        &self.piles[pile.index()]
    }

    /// The accessible top card of a pile.
    #[must_use]
    pub fn top(&self, pile: PileId) -> Option<PlacedCard> {
        self.piles[pile.index()].last().copied()
    }

    #[must_use]
    pub fn len(&self, pile: PileId) -> usize {
        self.piles[pile.index()].len()
    }

    #[must_use]
    pub fn is_empty(&self, pile: PileId) -> bool {
        self.piles[pile.index()].is_empty()
    }

    /// Iterate over all piles with their contents.
    pub fn iter(&self) -> impl Iterator<Item = (PileId, &[PlacedCard])> + '_ {
        PileId::ALL.iter().map(move |&p| (p, self.cards(p)))
    }

    /// Get total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Check if the manager contains a card.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.locations.contains_key(&card)
    }

    /// Check that the piles partition exactly one full deck and that the
    /// location index agrees with pile contents.
    pub fn verify(&self) -> Result<(), DeckIntegrityError> {
        let mut seen = FxHashSet::default();
        for (pile, cards) in self.iter() {
            for placed in cards {
                if !seen.insert(placed.card) || self.locate(placed.card) != Some(pile) {
                    return Err(DeckIntegrityError::Duplicate { card: placed.card });
                }
            }
        }

        if seen.len() != DECK_SIZE || self.locations.len() != DECK_SIZE {
            return Err(DeckIntegrityError::WrongCount { found: seen.len() });
        }
        Ok(())
    }
}

fn insert_at(pile: &mut Vec<PlacedCard>, placed: PlacedCard, position: PilePosition) {
    match position {
        PilePosition::Top => pile.push(placed),
        PilePosition::Bottom => pile.insert(0, placed),
        PilePosition::Index(i) => {
            let idx = i.min(pile.len());
            pile.insert(idx, placed);
        }
    }
}
