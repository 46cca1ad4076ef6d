//! Game state for a single deal.
//!
//! ## GameState
//!
//! - The 13 piles (`PileManager`)
//! - The deal in original order (for corpus persistence)
//! - Draw mode
//! - Stock-cycle tracking (waste watermark, moved-since-recycle flag)
//! - Win / no-more-moves / possibly-stuck status flags
//! - The single pending undo record
//! - Action history
//!
//! Mutating operations live with their components: the move executor
//! (`crate::moves::executor`), undo (`crate::moves::undo`) and the
//! auto-move finder (`crate::solver`).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord, Actor};
use super::card::DECK_SIZE;
use super::config::DrawMode;
use super::pile::PileId;
use crate::deal::Deal;
use crate::moves::undo::UndoManager;
use crate::piles::PileManager;

/// Status flags exposed to the rendering layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// All 52 cards are on the foundations.
    pub won: bool,
    /// A full stock cycle passed in auto-play without any move.
    pub no_more_moves: bool,
    /// A manual recycle happened without any move since the previous one.
    pub possibly_stuck: bool,
}

/// Complete state of one deal.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) piles: PileManager,
    deal: Deal,
    pub(crate) draw_mode: DrawMode,

    /// Waste size at the last recycle.
    pub(crate) waste_watermark: Option<usize>,

    /// Any card moved to/from tableau or foundation since the last recycle.
    pub(crate) moved_since_recycle: bool,

    pub(crate) status: GameStatus,
    pub(crate) undo: UndoManager,
    history: Vector<ActionRecord>,
}

impl GameState {
    /// Lay out a deal.
    #[must_use]
    pub fn new(deal: Deal, draw_mode: DrawMode) -> Self {
        let piles = deal.layout();
        Self {
            piles,
            deal,
            draw_mode,
            waste_watermark: None,
            moved_since_recycle: false,
            status: GameStatus::default(),
            undo: UndoManager::new(),
            history: Vector::new(),
        }
    }

    /// Reassemble a state from its parts (used by snapshot restore).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        piles: PileManager,
        deal: Deal,
        draw_mode: DrawMode,
        waste_watermark: Option<usize>,
        moved_since_recycle: bool,
        status: GameStatus,
        undo: UndoManager,
        history: Vector<ActionRecord>,
    ) -> Self {
        Self {
            piles,
            deal,
            draw_mode,
            waste_watermark,
            moved_since_recycle,
            status,
            undo,
            history,
        }
    }

    /// Current pile contents.
    #[must_use]
    pub fn piles(&self) -> &PileManager {
        &self.piles
    }

    /// The deal this game started from.
    #[must_use]
    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Change the draw mode mid-deal. Takes effect on the next draw.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw_mode = mode;
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status.won
    }

    #[must_use]
    pub fn waste_watermark(&self) -> Option<usize> {
        self.waste_watermark
    }

    /// Whether an undo is pending.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.is_available()
    }

    /// Actions applied since the deal.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Cards currently on the foundations.
    #[must_use]
    pub fn foundation_count(&self) -> usize {
        PileId::FOUNDATIONS.iter().map(|&f| self.piles.len(f)).sum()
    }

    /// Set the won flag if all cards are on the foundations.
    ///
    /// Returns true only on the transition to won.
    pub(crate) fn check_win(&mut self) -> bool {
        if self.status.won || self.foundation_count() != DECK_SIZE {
            return false;
        }
        self.status.won = true;
        self.status.no_more_moves = false;
        self.undo.clear();
        true
    }

    pub(crate) fn record_action(&mut self, actor: Actor, action: Action) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(actor, action, sequence));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::GameRng;

    #[test]
    fn test_new_state() {
        let deal = Deal::random(&mut GameRng::new(42));
        let state = GameState::new(deal.clone(), DrawMode::Three);

        assert_eq!(state.deal(), &deal);
        assert_eq!(state.draw_mode(), DrawMode::Three);
        assert_eq!(state.status(), GameStatus::default());
        assert_eq!(state.foundation_count(), 0);
        assert_eq!(state.waste_watermark(), None);
        assert!(!state.can_undo());
        assert!(state.history().is_empty());
        assert!(state.piles().verify().is_ok());
    }

    #[test]
    fn test_check_win_requires_full_foundations() {
        let deal = Deal::random(&mut GameRng::new(1));
        let mut state = GameState::new(deal, DrawMode::One);

        assert!(!state.check_win());
        assert!(!state.is_won());
    }

    #[test]
    fn test_set_draw_mode() {
        let deal = Deal::random(&mut GameRng::new(2));
        let mut state = GameState::new(deal, DrawMode::One);

        state.set_draw_mode(DrawMode::Three);
        assert_eq!(state.draw_mode(), DrawMode::Three);
    }

    #[test]
    fn test_record_action_sequences() {
        let deal = Deal::random(&mut GameRng::new(3));
        let mut state = GameState::new(deal, DrawMode::One);

        state.record_action(Actor::Player, Action::Draw { count: 1 });
        state.record_action(Actor::Auto, Action::Recycle { count: 24 });

        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[0].sequence, 0);
        assert_eq!(state.history()[1].sequence, 1);
        assert_eq!(state.history()[1].actor, Actor::Auto);
    }
}
