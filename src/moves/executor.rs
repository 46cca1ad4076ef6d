//! Move execution.
//!
//! Commits validated moves and runs the Stock/Waste draw and recycle
//! protocol. Every pile mutation goes through `PileManager::move_card`,
//! one card at a time, so the 52-card partition holds between any two
//! observable states.

use log::{debug, trace};
use smallvec::SmallVec;

use super::undo::UndoRecord;
use crate::core::action::{Action, Actor, Move};
use crate::core::card::{Card, Facing};
use crate::core::pile::{PileId, PileKind};
use crate::core::state::GameState;
use crate::piles::PilePosition;
use crate::rules::can_drop;

/// Result of a committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    /// Tableau card turned face-up by the move, if any.
    pub exposed: Option<Card>,
    /// The move completed the game.
    pub won: bool,
}

/// Result of turning Waste back onto Stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecycleOutcome {
    /// Cards returned to Stock.
    pub count: usize,
    /// A full cycle passed with no card moved to/from tableau or foundation.
    pub stuck: bool,
}

/// Result of acting on the Stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockOutcome {
    Drew(usize),
    Recycled(RecycleOutcome),
    /// Stock and Waste are both empty; nothing changed.
    Exhausted,
}

impl GameState {
    /// Validate moving the card at `index` of `from` (and everything above
    /// it) onto `to`.
    #[must_use]
    pub fn plan_move(&self, from: PileId, index: usize, to: PileId) -> Option<Move> {
        if self.is_won() || from == to || from.kind() == PileKind::Stock {
            return None;
        }

        let cards = self.piles.cards(from);
        let lead = cards.get(index)?;
        if !lead.is_face_up() {
            return None;
        }

        let count = cards.len() - index;
        let single_only = to.is_foundation() || matches!(from.kind(), PileKind::Waste | PileKind::Foundation);
        if single_only && count != 1 {
            return None;
        }

        if !can_drop(lead.card, to, &self.piles) {
            return None;
        }

        Some(Move::new(from, index, to, lead.card, count))
    }

    /// Commit a move if legal.
    ///
    /// Moves the lead card and every card above it, in order, to the tail
    /// of `to`; turns a newly exposed tableau top face-up; checks for a win
    /// when the destination is a foundation. Player moves become the
    /// pending undo record, automatic moves clear it.
    pub fn try_move(&mut self, from: PileId, index: usize, to: PileId, actor: Actor) -> Option<MoveOutcome> {
        let mv = self.plan_move(from, index, to)?;

        let cards: SmallVec<[(Card, usize); 13]> = self.piles.cards(from)[index..]
            .iter()
            .enumerate()
            .map(|(i, p)| (p.card, index + i))
            .collect();

        for &(card, _) in &cards {
            self.piles.move_card(card, to, PilePosition::Top);
        }

        let exposed = if from.is_tableau() {
            self.piles.reveal_top(from)
        } else {
            None
        };

        match actor {
            Actor::Player => self.undo.record(UndoRecord {
                mv,
                cards,
                exposed: exposed.is_some(),
            }),
            Actor::Auto => self.undo.clear(),
        }

        self.moved_since_recycle = true;
        self.status.no_more_moves = false;
        self.status.possibly_stuck = false;

        trace!("{:?} moved {} card(s) {} from {} to {}", actor, mv.count, mv.card, from, to);
        self.record_action(actor, Action::Move(mv));

        let won = to.is_foundation() && self.check_win();
        Some(MoveOutcome { mv, exposed, won })
    }

    /// Turn up to `draw_mode.count()` cards from Stock to Waste.
    ///
    /// Stops early when Stock runs out. Clears the pending undo record
    /// unless nothing was drawn. Returns the number of cards drawn.
    pub fn draw(&mut self, actor: Actor) -> usize {
        let mut drawn = 0;
        for _ in 0..self.draw_mode.count() {
            let Some(top) = self.piles.top(PileId::Stock) else {
                break;
            };
            self.piles.move_card(top.card, PileId::Waste, PilePosition::Top);
            self.piles.set_facing(top.card, Facing::FaceUp);
            drawn += 1;
        }

        if drawn > 0 {
            self.undo.clear();
            trace!("{:?} drew {} card(s)", actor, drawn);
            self.record_action(actor, Action::Draw { count: drawn });
        }
        drawn
    }

    /// Turn the whole Waste back over onto an empty Stock.
    ///
    /// Returns `None` if Stock still has cards or Waste is empty. Flags the deal as stuck
    /// when Waste has the same size as at the previous recycle and no card
    /// moved since then: for automatic play that sets "no more moves", for
    /// the player "possibly stuck".
    pub fn recycle(&mut self, actor: Actor) -> Option<RecycleOutcome> {
        if !self.piles.is_empty(PileId::Stock) || self.piles.is_empty(PileId::Waste) {
            return None;
        }

        let waste_len = self.piles.len(PileId::Waste);
        let stuck = self.waste_watermark == Some(waste_len) && !self.moved_since_recycle;
        self.waste_watermark = Some(waste_len);
        self.moved_since_recycle = false;
        self.undo.clear();

        while let Some(top) = self.piles.top(PileId::Waste) {
            self.piles.move_card(top.card, PileId::Stock, PilePosition::Top);
            self.piles.set_facing(top.card, Facing::FaceDown);
        }

        if stuck {
            match actor {
                Actor::Auto => self.status.no_more_moves = true,
                Actor::Player => self.status.possibly_stuck = true,
            }
        }

        debug!("{:?} recycled {} card(s) (stuck: {})", actor, waste_len, stuck);
        self.record_action(actor, Action::Recycle { count: waste_len });
        Some(RecycleOutcome {
            count: waste_len,
            stuck,
        })
    }

    /// Draw if Stock has cards, otherwise recycle.
    pub fn draw_or_recycle(&mut self, actor: Actor) -> StockOutcome {
        if !self.piles.is_empty(PileId::Stock) {
            return StockOutcome::Drew(self.draw(actor));
        }
        match self.recycle(actor) {
            Some(outcome) => StockOutcome::Recycled(outcome),
            None => StockOutcome::Exhausted,
        }
    }

    /// Turn a face-down tableau top face-up.
    ///
    /// Returns false if the pile is not a tableau, is empty, or its top is
    /// already face-up. A flip clears the pending undo record.
    pub fn flip_top(&mut self, pile: PileId) -> bool {
        if !pile.is_tableau() {
            return false;
        }
        let Some(card) = self.piles.reveal_top(pile) else {
            return false;
        };

        self.undo.clear();
        self.record_action(Actor::Player, Action::Flip { pile, card });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DrawMode;
    use crate::core::rng::GameRng;
    use crate::deal::Deal;
    use crate::piles::PileManager;

    fn state(mode: DrawMode) -> GameState {
        GameState::new(Deal::random(&mut GameRng::new(21)), mode)
    }

    #[test]
    fn test_draw_one() {
        let mut state = state(DrawMode::One);
        let top = state.piles().top(PileId::Stock).unwrap().card;

        assert_eq!(state.draw(Actor::Player), 1);
        assert_eq!(state.piles().len(PileId::Stock), 23);
        let waste_top = state.piles().top(PileId::Waste).unwrap();
        assert_eq!(waste_top.card, top);
        assert!(waste_top.is_face_up());
    }

    #[test]
    fn test_draw_three() {
        let mut state = state(DrawMode::Three);
        let stock: Vec<Card> = state.piles().cards(PileId::Stock).iter().map(|p| p.card).collect();

        assert_eq!(state.draw(Actor::Player), 3);
        let waste: Vec<Card> = state.piles().cards(PileId::Waste).iter().map(|p| p.card).collect();
        // Drawn top-first, so the third card from the stock top ends on the waste top.
        assert_eq!(waste, vec![stock[23], stock[22], stock[21]]);
    }

    #[test]
    fn test_draw_empty_stock_is_noop() {
        let mut state = state(DrawMode::One);
        while state.draw(Actor::Player) > 0 {}

        let history_len = state.history().len();
        assert_eq!(state.draw(Actor::Player), 0);
        assert_eq!(state.history().len(), history_len);
    }

    #[test]
    fn test_recycle_requires_empty_stock() {
        let mut state = state(DrawMode::One);
        assert_eq!(state.recycle(Actor::Player), None);
    }

    #[test]
    fn test_recycle_restores_stock_order() {
        let mut state = state(DrawMode::Three);
        let original = state.piles().cards(PileId::Stock).to_vec();

        while state.draw(Actor::Player) > 0 {}
        assert!(state.piles().is_empty(PileId::Stock));

        let outcome = state.recycle(Actor::Player).unwrap();
        assert_eq!(outcome.count, 24);
        assert!(!outcome.stuck);
        assert_eq!(state.piles().cards(PileId::Stock), original.as_slice());
        assert!(state.piles().is_empty(PileId::Waste));
        assert_eq!(state.waste_watermark(), Some(24));
    }

    #[test]
    fn test_draw_or_recycle() {
        let mut state = state(DrawMode::One);
        assert_eq!(state.draw_or_recycle(Actor::Player), StockOutcome::Drew(1));

        while state.draw(Actor::Player) > 0 {}
        assert!(matches!(
            state.draw_or_recycle(Actor::Player),
            StockOutcome::Recycled(RecycleOutcome { count: 24, .. })
        ));
    }

    #[test]
    fn test_second_idle_manual_recycle_is_possibly_stuck() {
        let mut state = state(DrawMode::One);

        for _ in 0..2 {
            while state.draw(Actor::Player) > 0 {}
            state.recycle(Actor::Player);
        }

        assert!(state.status().possibly_stuck);
        assert!(!state.status().no_more_moves);
    }

    #[test]
    fn test_empty_stock_and_waste_is_noop() {
        let mut piles = PileManager::new();
        for card in crate::core::card::standard_deck() {
            piles.add(card, Facing::FaceUp, PileId::Tableau1, PilePosition::Top);
        }
        let mut state = GameState::new(Deal::random(&mut GameRng::new(3)), DrawMode::One);
        state.piles = piles;
        state.piles.move_card("C10".parse().unwrap(), PileId::Tableau2, PilePosition::Top);
        state.piles.move_card("H9".parse().unwrap(), PileId::Tableau3, PilePosition::Top);
        let watermark = state.waste_watermark();

        assert!(state.try_move(PileId::Tableau3, 0, PileId::Tableau2, Actor::Player).is_some());
        let history_len = state.history().len();

        assert_eq!(state.draw_or_recycle(Actor::Player), StockOutcome::Exhausted);
        assert_eq!(state.recycle(Actor::Player), None);
        assert!(state.can_undo());
        assert_eq!(state.history().len(), history_len);
        assert_eq!(state.waste_watermark(), watermark);
    }

    #[test]
    fn test_plan_move_rejects_face_down_and_stock() {
        let state = state(DrawMode::One);

        assert!(state.plan_move(PileId::Tableau7, 0, PileId::Tableau1).is_none());
        assert!(state.plan_move(PileId::Stock, 23, PileId::Tableau1).is_none());
        assert!(state.plan_move(PileId::Tableau1, 0, PileId::Tableau1).is_none());
    }

    #[test]
    fn test_flip_top() {
        let mut state = state(DrawMode::One);

        // Already face-up after the deal.
        assert!(!state.flip_top(PileId::Tableau3));
        assert!(!state.flip_top(PileId::Stock));
        assert!(state.history().is_empty());
    }
}
