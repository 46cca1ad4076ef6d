//! Card identity: suit, rank, color and face state.
//!
//! A `Card` is an immutable value identified by suit + rank. Exactly one
//! instance of each of the 52 combinations exists per deal. Whether a card
//! is face-up is not part of its identity; the pile manager tracks that
//! alongside the card (see `Facing`).
//!
//! ## Tokens
//!
//! Cards serialise to a two/three-character token: suit initial followed by
//! rank label.
//!
//! ```
//! use klondike_engine::core::{Card, Rank, Suit};
//!
//! let card = Card::new(Suit::Hearts, Rank::new(10).unwrap());
//! assert_eq!(card.token(), "H10");
//! assert_eq!("H10".parse::<Card>().unwrap(), card);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParseCardError;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Number of ranks per suit.
pub const RANKS_PER_SUIT: u8 = 13;

/// Rank labels, indexed by `rank - 1`.
const RANK_LABELS: [&str; RANKS_PER_SUIT as usize] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Card suit. Declaration order is the canonical deck order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Hearts,
    Spades,
    Diamonds,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];

    /// Derived card color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Clubs | Suit::Spades => Color::Black,
            Suit::Hearts | Suit::Diamonds => Color::Red,
        }
    }

    /// Single-letter initial used in deal tokens.
    #[must_use]
    pub const fn initial(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
        }
    }

    /// Parse a suit initial.
    #[must_use]
    pub const fn from_initial(c: char) -> Option<Self> {
        match c {
            'C' => Some(Suit::Clubs),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            'D' => Some(Suit::Diamonds),
            _ => None,
        }
    }
}

/// Card color, derived from suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

/// Card rank, 1 (Ace) through 13 (King).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    /// Create a rank, returning `None` outside 1..=13.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= RANKS_PER_SUIT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value (Ace = 1, King = 13).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Label used in deal tokens (`A`, `2`..`10`, `J`, `Q`, `K`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        RANK_LABELS[(self.0 - 1) as usize]
    }

    /// Parse a rank label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        RANK_LABELS
            .iter()
            .position(|&l| l == label)
            .map(|i| Self(i as u8 + 1))
    }

    /// Iterate Ace..=King.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=RANKS_PER_SUIT).map(Rank)
    }

    /// The rank directly above, if any.
    #[must_use]
    pub const fn succ(self) -> Option<Rank> {
        Rank::new(self.0 + 1)
    }
}

/// A playing card. Identity is suit + rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit.color()
    }

    /// Canonical deck index, 0..52 (suit-major).
    #[must_use]
    pub const fn index(self) -> usize {
        self.suit as usize * RANKS_PER_SUIT as usize + (self.rank.0 - 1) as usize
    }

    /// Deal token, e.g. `SA`, `D10`, `HK`.
    #[must_use]
    pub fn token(self) -> String {
        format!("{}{}", self.suit.initial(), self.rank.label())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.initial(), self.rank.label())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let suit = chars
            .next()
            .and_then(Suit::from_initial)
            .ok_or_else(|| ParseCardError(token.to_string()))?;
        let rank = Rank::from_label(chars.as_str()).ok_or_else(|| ParseCardError(token.to_string()))?;
        Ok(Card::new(suit, rank))
    }
}

/// Whether a card currently shows its face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    FaceUp,
    #[default]
    FaceDown,
}

impl Facing {
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        matches!(self, Facing::FaceUp)
    }
}

/// The 52 cards in canonical suit/rank order.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::all().map(move |rank| Card::new(suit, rank)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_suit_colors() {
        assert_eq!(Suit::Clubs.color(), Color::Black);
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
    }

    #[test]
    fn test_rank_bounds() {
        assert!(Rank::new(0).is_none());
        assert!(Rank::new(14).is_none());
        assert_eq!(Rank::new(1), Some(Rank::ACE));
        assert_eq!(Rank::new(13), Some(Rank::KING));
        assert_eq!(Rank::KING.succ(), None);
        assert_eq!(Rank::ACE.succ(), Rank::new(2));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(card("CA").token(), "CA");
        assert_eq!(card("D10"), Card::new(Suit::Diamonds, Rank::new(10).unwrap()));
        assert_eq!(card("SK").rank, Rank::KING);
        assert_eq!(format!("{}", card("HQ")), "HQ");
    }

    #[test]
    fn test_invalid_tokens() {
        assert!("".parse::<Card>().is_err());
        assert!("X5".parse::<Card>().is_err());
        assert!("C1".parse::<Card>().is_err());
        assert!("C11".parse::<Card>().is_err());
        assert!("ca".parse::<Card>().is_err());
        assert!("C".parse::<Card>().is_err());
    }

    #[test]
    fn test_standard_deck() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck[0], card("CA"));
        assert_eq!(deck[12], card("CK"));
        assert_eq!(deck[13], card("HA"));
        assert_eq!(deck[51], card("DK"));

        for (i, c) in deck.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_facing_default_is_down() {
        assert_eq!(Facing::default(), Facing::FaceDown);
        assert!(Facing::FaceUp.is_face_up());
        assert!(!Facing::FaceDown.is_face_up());
    }

    #[test]
    fn test_serialization() {
        let c = card("S7");
        let json = serde_json::to_string(&c).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
