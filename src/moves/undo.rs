//! Single-level undo.
//!
//! At most one record is pending. Any new move, flip or draw clears it
//! before recording its own, so only the most recent manual move can be
//! rolled back. Draws and recycles are never undoable.

use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::action::{Action, Actor, Move};
use crate::core::card::{Card, Facing};
use crate::core::pile::PileId;
use crate::core::state::GameState;
use crate::piles::PilePosition;

/// Pre-move snapshot of one committed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoRecord {
    /// The move as committed.
    pub mv: Move,

    /// Each moved card with its index in the origin pile before the move.
    pub cards: SmallVec<[(Card, usize); 13]>,

    /// The move turned the origin pile's new top card face-up.
    pub exposed: bool,
}

impl UndoRecord {
    /// Pile the cards came from.
    #[must_use]
    pub fn origin(&self) -> PileId {
        self.mv.from
    }

    /// Pile the cards went to.
    #[must_use]
    pub fn destination(&self) -> PileId {
        self.mv.to
    }
}

/// Holds the pending undo record, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UndoManager {
    pending: Option<UndoRecord>,
}

impl UndoManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending record.
    pub fn record(&mut self, record: UndoRecord) {
        self.pending = Some(record);
    }

    /// Drop the pending record.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Remove and return the pending record.
    pub fn take(&mut self) -> Option<UndoRecord> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&UndoRecord> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.pending.is_some()
    }
}

impl GameState {
    /// Roll back the most recent manual move.
    ///
    /// Restores every moved card to its origin pile and index and, if the
    /// move exposed a tableau card, turns that card face-down again.
    /// Returns false (and changes nothing) when no record is pending.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.undo.take() else {
            return false;
        };

        let origin = record.mv.from;
        if record.exposed && origin.is_tableau() {
            if let Some(top) = self.piles.top(origin) {
                self.piles.set_facing(top.card, Facing::FaceDown);
            }
        }

        for &(card, index) in &record.cards {
            self.piles.move_card(card, origin, PilePosition::Index(index));
        }

        debug!("Undid {} card(s) from {} back to {}", record.cards.len(), record.mv.to, origin);
        self.record_action(Actor::Player, Action::Undo(record.mv));
        true
    }

    /// The pending undo record.
    #[must_use]
    pub fn pending_undo(&self) -> Option<&UndoRecord> {
        self.undo.pending()
    }
}
