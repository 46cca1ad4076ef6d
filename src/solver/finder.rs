//! Greedy auto-move finder.
//!
//! One linear scan in fixed priority order:
//!
//! 1. Each tableau, left to right: its top against each foundation, then
//!    its first face-up card against every other tableau. The whole run
//!    above that card travels along. A King that already sits at the
//!    bottom of its pile is skipped since moving it gains nothing
//! 2. The waste top against each foundation, then each tableau
//!
//! Hint mode collects every candidate; auto mode commits the first one,
//! and when there is none acts on the Stock (draw, or recycle when empty).
//! This is a heuristic, not a search: it can report "no more moves" on a
//! solvable deal.

use log::{debug, trace};

use crate::core::action::Actor;
use crate::core::card::{Card, Rank};
use crate::core::pile::PileId;
use crate::core::state::GameState;
use crate::moves::{MoveOutcome, RecycleOutcome, StockOutcome};
use crate::piles::PileManager;
use crate::rules::can_drop;

/// Whether the finder only reports candidates or also commits one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinderMode {
    /// Collect every legal candidate without mutating.
    Hint,
    /// Commit the first candidate, or act on the Stock.
    Auto,
}

/// A legal move candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hint {
    /// Lead card of the run to move.
    pub card: Card,
    pub from: PileId,
    /// Index of `card` in `from`.
    pub index: usize,
    pub to: PileId,
}

/// What one automatic step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(MoveOutcome),
    Drew(usize),
    Recycled(RecycleOutcome),
    /// A full stock cycle passed without a move; auto-play should stop.
    NoMoreMoves,
    /// The deal is won; nothing left to do.
    Won,
}

impl StepOutcome {
    /// Auto-play should stop after this step.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            StepOutcome::NoMoreMoves | StepOutcome::Won => true,
            StepOutcome::Moved(outcome) => outcome.won,
            StepOutcome::Drew(_) | StepOutcome::Recycled(_) => false,
        }
    }
}

/// Result of a finder invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinderResult {
    Hints(Vec<Hint>),
    Step(StepOutcome),
}

/// Single entry point for both modes.
pub fn find_moves(state: &mut GameState, mode: FinderMode) -> FinderResult {
    match mode {
        FinderMode::Hint => FinderResult::Hints(hints(state)),
        FinderMode::Auto => FinderResult::Step(auto_step(state)),
    }
}

/// Every legal candidate, in scan order.
#[must_use]
pub fn hints(state: &GameState) -> Vec<Hint> {
    if state.is_won() {
        return Vec::new();
    }
    scan(state.piles(), false)
}

/// Take one automatic step.
pub fn auto_step(state: &mut GameState) -> StepOutcome {
    if state.is_won() {
        return StepOutcome::Won;
    }
    if state.status().no_more_moves {
        return StepOutcome::NoMoreMoves;
    }

    if let Some(hint) = scan(state.piles(), true).into_iter().next() {
        if let Some(outcome) = state.try_move(hint.from, hint.index, hint.to, Actor::Auto) {
            return StepOutcome::Moved(outcome);
        }
        // The scan only yields legal candidates.
        debug!("Finder candidate {:?} was rejected", hint);
    }

    match state.draw_or_recycle(Actor::Auto) {
        StockOutcome::Drew(count) => StepOutcome::Drew(count),
        StockOutcome::Recycled(outcome) if outcome.stuck => {
            debug!("No more moves after recycling {} card(s)", outcome.count);
            StepOutcome::NoMoreMoves
        }
        StockOutcome::Recycled(outcome) => StepOutcome::Recycled(outcome),
        StockOutcome::Exhausted => {
            debug!("No more moves with Stock and Waste empty");
            state.status.no_more_moves = true;
            StepOutcome::NoMoreMoves
        }
    }
}

/// Step until the deal is won or stuck. Returns the number of steps taken.
pub fn auto_play(state: &mut GameState) -> usize {
    let mut steps = 0;
    loop {
        let outcome = auto_step(state);
        steps += 1;
        if outcome.is_terminal() {
            debug!("Auto-play finished after {} step(s) (won: {})", steps, state.is_won());
            return steps;
        }
    }
}

fn scan(piles: &PileManager, first_only: bool) -> Vec<Hint> {
    let mut found = Vec::new();

    for from in PileId::TABLEAUS {
        // Top card to a foundation.
        if let Some(top) = piles.top(from).filter(|p| p.is_face_up()) {
            let index = piles.len(from) - 1;
            for to in PileId::FOUNDATIONS {
                if can_drop(top.card, to, piles) && offer(&mut found, Hint { card: top.card, from, index, to }, first_only) {
                    return found;
                }
            }
        }

        // First face-up run to another tableau.
        let Some((index, lead)) = piles.cards(from).iter().enumerate().find(|(_, p)| p.is_face_up()) else {
            continue;
        };
        if index == 0 && lead.card.rank == Rank::KING {
            continue;
        }
        for to in PileId::TABLEAUS {
            let hint = Hint { card: lead.card, from, index, to };
            if to != from && can_drop(lead.card, to, piles) && offer(&mut found, hint, first_only) {
                return found;
            }
        }
    }

    // Waste top to foundations, then tableaus.
    if let Some(top) = piles.top(PileId::Waste) {
        let index = piles.len(PileId::Waste) - 1;
        for to in PileId::FOUNDATIONS.into_iter().chain(PileId::TABLEAUS) {
            let hint = Hint {
                card: top.card,
                from: PileId::Waste,
                index,
                to,
            };
            if can_drop(top.card, to, piles) && offer(&mut found, hint, first_only) {
                return found;
            }
        }
    }

    found
}

/// Record a candidate; true when the scan should stop.
fn offer(found: &mut Vec<Hint>, hint: Hint, first_only: bool) -> bool {
    trace!("Candidate {} from {} to {}", hint.card, hint.from, hint.to);
    found.push(hint);
    first_only
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Facing;
    use crate::core::config::DrawMode;
    use crate::core::rng::GameRng;
    use crate::deal::Deal;
    use crate::piles::{PilePosition, PlacedCard};

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn place(piles: &mut PileManager, pile: PileId, cards: &[(&str, Facing)]) {
        for &(token, facing) in cards {
            piles.add(card(token), facing, pile, PilePosition::Top);
        }
    }

    #[test]
    fn test_piles_are_scanned_one_at_a_time() {
        let mut piles = PileManager::new();
        place(&mut piles, PileId::Tableau1, &[("C3", Facing::FaceDown), ("H8", Facing::FaceUp)]);
        place(&mut piles, PileId::Tableau2, &[("C9", Facing::FaceUp)]);
        place(&mut piles, PileId::Tableau3, &[("SA", Facing::FaceUp)]);

        // The run move on Tableau 1 beats the Ace further right.
        let first = scan(&piles, true);
        assert_eq!(first, vec![Hint { card: card("H8"), from: PileId::Tableau1, index: 1, to: PileId::Tableau2 }]);

        let hints = scan(&piles, false);
        assert_eq!(hints[0], first[0]);
        assert_eq!(hints[1], Hint { card: card("SA"), from: PileId::Tableau3, index: 0, to: PileId::Foundation1 });
    }

    #[test]
    fn test_foundation_move_comes_first_within_a_pile() {
        let mut piles = PileManager::new();
        place(&mut piles, PileId::Tableau1, &[("C3", Facing::FaceDown), ("HA", Facing::FaceUp)]);
        place(&mut piles, PileId::Tableau2, &[("C2", Facing::FaceUp)]);

        let first = scan(&piles, true);
        assert_eq!(first, vec![Hint { card: card("HA"), from: PileId::Tableau1, index: 1, to: PileId::Foundation1 }]);

        // The Ace also fits under the Club two.
        let hints = scan(&piles, false);
        assert!(hints.contains(&Hint { card: card("HA"), from: PileId::Tableau1, index: 1, to: PileId::Tableau2 }));
        assert!(hints.iter().position(|h| h.to == PileId::Tableau2) > Some(3));
    }

    #[test]
    fn test_first_face_up_card_leads_the_run() {
        let mut piles = PileManager::new();
        place(
            &mut piles,
            PileId::Tableau1,
            &[("C3", Facing::FaceDown), ("H8", Facing::FaceUp), ("S7", Facing::FaceUp)],
        );
        place(&mut piles, PileId::Tableau2, &[("C9", Facing::FaceUp)]);

        let hints = scan(&piles, false);
        assert_eq!(hints, vec![Hint { card: card("H8"), from: PileId::Tableau1, index: 1, to: PileId::Tableau2 }]);
    }

    #[test]
    fn test_king_at_pile_bottom_is_skipped() {
        let mut piles = PileManager::new();
        place(&mut piles, PileId::Tableau1, &[("HK", Facing::FaceUp)]);

        assert!(scan(&piles, false).is_empty());

        // A King above face-down cards may move to an empty pile.
        let mut piles = PileManager::new();
        place(&mut piles, PileId::Tableau1, &[("C2", Facing::FaceDown), ("HK", Facing::FaceUp)]);
        let hints = scan(&piles, false);
        assert_eq!(hints.len(), 6);
        assert!(hints.iter().all(|h| h.card == card("HK") && h.index == 1));
    }

    #[test]
    fn test_waste_foundation_before_tableau() {
        let mut piles = PileManager::new();
        place(&mut piles, PileId::Waste, &[("S5", Facing::FaceUp), ("DA", Facing::FaceUp)]);
        place(&mut piles, PileId::Tableau1, &[("C2", Facing::FaceUp)]);

        // An Ace fits every empty foundation; the tableau target comes last.
        let hints = scan(&piles, false);
        let targets: Vec<PileId> = hints.iter().map(|h| h.to).collect();
        assert_eq!(
            targets,
            vec![
                PileId::Foundation1,
                PileId::Foundation2,
                PileId::Foundation3,
                PileId::Foundation4,
                PileId::Tableau1,
            ]
        );
        assert!(hints.iter().all(|h| h.from == PileId::Waste && h.index == 1));
    }

    #[test]
    fn test_auto_step_draws_without_moves() {
        let mut state = GameState::new(Deal::random(&mut GameRng::new(99)), DrawMode::One);
        let candidates = hints(&state);

        let outcome = auto_step(&mut state);
        if candidates.is_empty() {
            assert_eq!(outcome, StepOutcome::Drew(1));
        } else {
            assert!(matches!(outcome, StepOutcome::Moved(_)));
        }
        assert!(state.piles().verify().is_ok());
    }

    #[test]
    fn test_auto_play_terminates() {
        for seed in 0..20 {
            let mut state = GameState::new(Deal::random(&mut GameRng::new(seed)), DrawMode::Three);
            auto_play(&mut state);

            let status = state.status();
            assert!(status.won || status.no_more_moves);
            assert!(state.piles().verify().is_ok());
        }
    }

    #[test]
    fn test_find_moves_hint_mode_does_not_mutate() {
        let mut state = GameState::new(Deal::random(&mut GameRng::new(4)), DrawMode::One);
        let before = state.piles().clone();

        let result = find_moves(&mut state, FinderMode::Hint);
        assert!(matches!(result, FinderResult::Hints(_)));
        assert_eq!(state.piles(), &before);
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_empty_stock_and_waste_ends_auto_play() {
        let mut state = GameState::new(Deal::random(&mut GameRng::new(6)), DrawMode::One);
        let mut piles = PileManager::new();
        for card in crate::core::card::standard_deck() {
            piles.add(card, Facing::FaceDown, PileId::Tableau1, PilePosition::Top);
        }
        state.piles = piles;
        assert!(hints(&state).is_empty());

        let before = state.history().len();
        assert_eq!(auto_step(&mut state), StepOutcome::NoMoreMoves);
        assert!(state.status().no_more_moves);
        assert_eq!(state.history().len(), before);
        assert_eq!(auto_step(&mut state), StepOutcome::NoMoreMoves);
    }

    #[test]
    fn test_face_down_top_is_not_a_candidate() {
        let mut piles = PileManager::new();
        piles.add(card("SA"), Facing::FaceDown, PileId::Tableau4, PilePosition::Top);

        assert!(scan(&piles, false).is_empty());
        assert_eq!(piles.top(PileId::Tableau4), Some(PlacedCard::new(card("SA"), Facing::FaceDown)));
    }
}
