//! Action representation and history records.
//!
//! A `Move` names a run of cards by its source pile and the index of its
//! lead (lowest) card; everything stacked above the lead moves with it.
//! Draws, recycles, flips and undos are recorded alongside moves so the
//! history fully describes a game from its deal.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::pile::PileId;

/// A card run moving between piles.
///
/// ## Example
///
/// ```
/// use klondike_engine::core::{Card, Move, PileId};
///
/// // Move the 9 of hearts (and whatever sits on it) from index 2 of
/// // tableau 4 onto tableau 1.
/// let mv = Move::new(PileId::Tableau4, 2, PileId::Tableau1, "H9".parse::<Card>().unwrap(), 3);
/// assert_eq!(mv.count, 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Source pile.
    pub from: PileId,
    /// Index of the lead card within the source pile.
    pub index: usize,
    /// Destination pile.
    pub to: PileId,
    /// The lead card.
    pub card: Card,
    /// Number of cards moved (lead card plus those above it).
    pub count: usize,
}

impl Move {
    #[must_use]
    pub const fn new(from: PileId, index: usize, to: PileId, card: Card, count: usize) -> Self {
        Self {
            from,
            index,
            to,
            card,
            count,
        }
    }
}

/// Who initiated an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// A manual player action.
    Player,
    /// The auto-move finder.
    Auto,
}

/// Any state-changing action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Cards moved between piles.
    Move(Move),
    /// Cards turned from Stock to Waste.
    Draw { count: usize },
    /// Waste turned back over onto Stock.
    Recycle { count: usize },
    /// A face-down tableau top turned face-up.
    Flip { pile: PileId, card: Card },
    /// The pending move was rolled back.
    Undo(Move),
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay/debugging and move statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who took this action.
    pub actor: Actor,

    /// The action taken.
    pub action: Action,

    /// Sequence number within the deal.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(actor: Actor, action: Action, sequence: u32) -> Self {
        Self {
            actor,
            action,
            sequence,
        }
    }
}
