//! Pile identification.
//!
//! The layout has exactly 13 piles, each with a fixed role:
//!
//! - `Stock`: face-down draw pile
//! - `Waste`: face-up pile receiving drawn cards
//! - `Tableau1..=Tableau7`: working piles
//! - `Foundation1..=Foundation4`: one suit each, Ace to King
//!
//! `PileId` discriminants double as indices into the pile array.
//!
//! ```
//! use klondike_engine::core::{PileId, PileKind};
//!
//! let pile = PileId::tableau(3).unwrap();
//! assert_eq!(pile, PileId::Tableau3);
//! assert_eq!(pile.kind(), PileKind::Tableau);
//! assert_eq!(format!("{}", pile), "Tableau 3");
//! ```

use serde::{Deserialize, Serialize};

/// One of the 13 piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PileId {
    Stock,
    Waste,
    Tableau1,
    Tableau2,
    Tableau3,
    Tableau4,
    Tableau5,
    Tableau6,
    Tableau7,
    Foundation1,
    Foundation2,
    Foundation3,
    Foundation4,
}

/// Role classification of a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Stock,
    Waste,
    Tableau,
    Foundation,
}

impl PileId {
    /// Number of piles.
    pub const COUNT: usize = 13;

    /// All piles, in index order.
    pub const ALL: [PileId; Self::COUNT] = [
        PileId::Stock,
        PileId::Waste,
        PileId::Tableau1,
        PileId::Tableau2,
        PileId::Tableau3,
        PileId::Tableau4,
        PileId::Tableau5,
        PileId::Tableau6,
        PileId::Tableau7,
        PileId::Foundation1,
        PileId::Foundation2,
        PileId::Foundation3,
        PileId::Foundation4,
    ];

    /// Tableau piles, left to right.
    pub const TABLEAUS: [PileId; 7] = [
        PileId::Tableau1,
        PileId::Tableau2,
        PileId::Tableau3,
        PileId::Tableau4,
        PileId::Tableau5,
        PileId::Tableau6,
        PileId::Tableau7,
    ];

    /// Foundation piles, left to right.
    pub const FOUNDATIONS: [PileId; 4] = [
        PileId::Foundation1,
        PileId::Foundation2,
        PileId::Foundation3,
        PileId::Foundation4,
    ];

    /// Array index of this pile.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tableau pile by 1-based number.
    #[must_use]
    pub fn tableau(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|i| Self::TABLEAUS.get(i).copied())
    }

    /// Foundation pile by 1-based number.
    #[must_use]
    pub fn foundation(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|i| Self::FOUNDATIONS.get(i).copied())
    }

    #[must_use]
    pub const fn kind(self) -> PileKind {
        match self {
            PileId::Stock => PileKind::Stock,
            PileId::Waste => PileKind::Waste,
            PileId::Tableau1
            | PileId::Tableau2
            | PileId::Tableau3
            | PileId::Tableau4
            | PileId::Tableau5
            | PileId::Tableau6
            | PileId::Tableau7 => PileKind::Tableau,
            PileId::Foundation1 | PileId::Foundation2 | PileId::Foundation3 | PileId::Foundation4 => {
                PileKind::Foundation
            }
        }
    }

    #[must_use]
    pub const fn is_tableau(self) -> bool {
        matches!(self.kind(), PileKind::Tableau)
    }

    #[must_use]
    pub const fn is_foundation(self) -> bool {
        matches!(self.kind(), PileKind::Foundation)
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            PileKind::Stock => write!(f, "Stock"),
            PileKind::Waste => write!(f, "Waste"),
            PileKind::Tableau => write!(f, "Tableau {}", self.index() - PileId::Tableau1.index() + 1),
            PileKind::Foundation => {
                write!(f, "Foundation {}", self.index() - PileId::Foundation1.index() + 1)
            }
        }
    }
}
