//! Serializable game snapshots.
//!
//! A `GameSnapshot` captures everything needed to resume a deal: pile
//! contents with face state, the original deal, stock-cycle tracking,
//! status flags, the pending undo record and the action history.
//! Restoring re-validates the 52-card partition.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::DrawMode;
use super::error::Result;
use super::pile::PileId;
use super::state::{GameState, GameStatus};
use crate::deal::Deal;
use crate::moves::undo::{UndoManager, UndoRecord};
use crate::piles::{PileManager, PlacedCard};

/// Owned, serializable copy of a `GameState`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub piles: Vec<(PileId, Vec<PlacedCard>)>,
    pub deal: Deal,
    pub draw_mode: DrawMode,
    pub waste_watermark: Option<usize>,
    pub moved_since_recycle: bool,
    pub status: GameStatus,
    pub undo: Option<UndoRecord>,
    pub history: Vector<ActionRecord>,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode. The result is not validated until restored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl GameState {
    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            piles: self.piles.iter().map(|(pile, cards)| (pile, cards.to_vec())).collect(),
            deal: self.deal().clone(),
            draw_mode: self.draw_mode,
            waste_watermark: self.waste_watermark,
            moved_since_recycle: self.moved_since_recycle,
            status: self.status,
            undo: self.undo.pending().cloned(),
            history: self.history().clone(),
        }
    }

    /// Rebuild a state from a snapshot.
    ///
    /// Fails with `DeckIntegrityError` unless the piles hold exactly the
    /// 52-card deck.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self> {
        let piles = PileManager::from_piles(snapshot.piles)?;

        let mut undo = UndoManager::new();
        if let Some(record) = snapshot.undo {
            undo.record(record);
        }

        Ok(Self::from_parts(
            piles,
            snapshot.deal,
            snapshot.draw_mode,
            snapshot.waste_watermark,
            snapshot.moved_since_recycle,
            snapshot.status,
            undo,
            snapshot.history,
        ))
    }
}
