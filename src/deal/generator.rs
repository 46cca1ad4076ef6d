//! Deal sources and the standard Klondike layout.

use log::debug;
use serde::{Deserialize, Serialize};

use super::codec;
use crate::core::card::{standard_deck, Card, Facing};
use crate::core::error::DeckIntegrityError;
use crate::core::pile::PileId;
use crate::core::rng::GameRng;
use crate::piles::{PileManager, PilePosition};

/// Where a deal came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealSource {
    /// A fresh shuffle.
    Random,
    /// Replayed from the winning-deal corpus.
    Corpus,
}

/// A deal: the 52 cards in original dealt order.
///
/// The order is kept independently of later pile movement and is what the
/// corpus persists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    cards: Vec<Card>,
    source: DealSource,
}

impl Deal {
    /// Shuffle a fresh deck.
    #[must_use]
    pub fn random(rng: &mut GameRng) -> Self {
        let mut cards = standard_deck();
        rng.shuffle(&mut cards);
        debug!("Shuffled a random deal");
        Self {
            cards,
            source: DealSource::Random,
        }
    }

    /// Decode a corpus line.
    pub fn from_corpus_line(line: &str) -> Result<Self, DeckIntegrityError> {
        Ok(Self {
            cards: codec::decode(line)?,
            source: DealSource::Corpus,
        })
    }

    /// Build a deal from an explicit card order.
    pub fn from_cards(cards: Vec<Card>, source: DealSource) -> Result<Self, DeckIntegrityError> {
        // Round-trips through the codec checks for 52 distinct cards.
        codec::decode(&codec::encode(&cards))?;
        Ok(Self { cards, source })
    }

    /// Cards in dealt order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn source(&self) -> DealSource {
        self.source
    }

    #[must_use]
    pub fn is_from_corpus(&self) -> bool {
        self.source == DealSource::Corpus
    }

    /// Corpus encoding of the original order.
    #[must_use]
    pub fn encoding(&self) -> String {
        codec::encode(&self.cards)
    }

    /// Lay the deal out into the 13 piles.
    ///
    /// Every card starts face-down in Stock in dealt order (the last card
    /// on top). Tableau pile `i` then takes `i` cards from the Stock top,
    /// and each tableau's top card is turned face-up.
    #[must_use]
    pub fn layout(&self) -> PileManager {
        let mut piles = PileManager::new();
        for &card in &self.cards {
            piles.add(card, Facing::FaceDown, PileId::Stock, PilePosition::Top);
        }

        for (i, &tableau) in PileId::TABLEAUS.iter().enumerate() {
            for _ in 0..=i {
                if let Some(top) = piles.top(PileId::Stock) {
                    piles.move_card(top.card, tableau, PilePosition::Top);
                }
            }
            piles.reveal_top(tableau);
        }

        piles
    }
}
