//! Klondike session driver.

use log::{debug, info, warn};

use crate::core::action::Actor;
use crate::core::config::{DrawMode, EngineConfig};
use crate::core::pile::PileId;
use crate::core::rng::GameRng;
use crate::core::state::{GameState, GameStatus};
use crate::corpus::{sample_deal, DealStore, FileCorpus};
use crate::deal::{Deal, DealSource};
use crate::moves::{RecycleOutcome, Selection, StockOutcome};
use crate::solver::{self, Hint, StepOutcome};

/// Key commands from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Undo,
    Hint,
    NewDeal,
    NewWinningDeal,
    ToggleDrawMode,
    AutoComplete,
    GenerateCorpus,
}

/// Auto-play state, advanced one step per `tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoPlay {
    #[default]
    Off,
    /// Finish the current deal, then stop.
    CurrentDeal,
    /// Play fresh random deals until the corpus target is reached.
    Generate,
}

/// Counters since the session started or corpus generation was requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub games_played: u32,
    pub games_won: u32,
    /// Winning deals appended to the corpus.
    pub corpus_deals_found: u32,
}

impl SessionStats {
    /// Percentage of games won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        f64::from(self.games_won) / f64::from(self.games_played) * 100.0
    }
}

/// What a pick-up did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickUp {
    /// Cards are now held; see `Klondike::held`.
    Held { count: usize },
    /// Clicking the stock drew cards.
    Drew(usize),
    /// Clicking the empty stock recycled the waste.
    Recycled(RecycleOutcome),
    /// A face-down tableau top was turned over.
    Flipped,
    Nothing,
}

/// Builder for a `Klondike` session.
#[derive(Clone, Debug, Default)]
pub struct KlondikeBuilder {
    config: EngineConfig,
}

impl KlondikeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn draw_mode(mut self, mode: DrawMode) -> Self {
        self.config.draw_mode = mode;
        self
    }

    pub fn corpus_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.config.corpus_dir = dir.into();
        self
    }

    pub fn corpus_target(mut self, target: u32) -> Self {
        self.config.corpus_target = target;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build a session backed by the file corpus in `corpus_dir`.
    pub fn build(self) -> Klondike<FileCorpus> {
        let store = FileCorpus::new(self.config.corpus_dir.clone());
        self.build_with_store(store)
    }

    /// Build a session backed by a custom deal store.
    pub fn build_with_store<S: DealStore>(self, store: S) -> Klondike<S> {
        let mut rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        debug!("Session seed {}", rng.seed());

        let state = GameState::new(Deal::random(&mut rng), self.config.draw_mode);
        Klondike {
            config: self.config,
            store,
            rng,
            state,
            held: None,
            hints: Vec::new(),
            auto: AutoPlay::Off,
            stats: SessionStats {
                games_played: 1,
                ..SessionStats::default()
            },
        }
    }
}

/// One Klondike session: the current deal plus the input-event surface.
///
/// Single-threaded; the driver owns it and feeds it semantic events
/// (`pick_up`, `drop_on`, `key`) and one `tick` per frame.
pub struct Klondike<S: DealStore = FileCorpus> {
    config: EngineConfig,
    store: S,
    rng: GameRng,
    state: GameState,
    held: Option<Selection>,
    hints: Vec<Hint>,
    auto: AutoPlay,
    stats: SessionStats,
}

impl<S: DealStore> Klondike<S> {
    /// Start a new deal.
    ///
    /// A winning deal is sampled from the corpus for the current draw mode;
    /// if that fails the session falls back to a random deal.
    pub fn new_deal(&mut self, winning: bool) -> DealSource {
        let mode = self.config.draw_mode;
        let deal = if winning {
            match sample_deal(&self.store, mode, &mut self.rng) {
                Ok(deal) => deal,
                Err(err) => {
                    warn!("No winning deal available ({}), dealing at random", err);
                    Deal::random(&mut self.rng)
                }
            }
        } else {
            Deal::random(&mut self.rng)
        };

        let source = deal.source();
        self.state = GameState::new(deal, mode);
        self.held = None;
        self.hints.clear();
        self.stats.games_played += 1;
        debug!("Game {} dealt ({:?}, {})", self.stats.games_played, source, mode);
        source
    }

    /// Pick up at `index` of `pile`.
    ///
    /// Stock clicks draw (or recycle), a face-down tableau top is flipped,
    /// anything else tries to lift a run. Ignored during auto-play.
    pub fn pick_up(&mut self, pile: PileId, index: usize) -> PickUp {
        self.held = None;
        self.hints.clear();
        if self.auto != AutoPlay::Off || self.state.is_won() {
            return PickUp::Nothing;
        }

        if pile == PileId::Stock {
            return match self.state.draw_or_recycle(Actor::Player) {
                StockOutcome::Drew(0) | StockOutcome::Exhausted => PickUp::Nothing,
                StockOutcome::Drew(count) => PickUp::Drew(count),
                StockOutcome::Recycled(outcome) => PickUp::Recycled(outcome),
            };
        }

        let is_top = index + 1 == self.state.piles().len(pile);
        if pile.is_tableau() && is_top && self.state.flip_top(pile) {
            return PickUp::Flipped;
        }

        match self.state.select(pile, index) {
            Some(selection) => {
                let count = selection.len();
                self.held = Some(selection);
                PickUp::Held { count }
            }
            None => PickUp::Nothing,
        }
    }

    /// Drop the held cards on `target` (`None`: released over no pile).
    ///
    /// Returns false and resets the held cards to their origin when the
    /// drop is not legal.
    pub fn drop_on(&mut self, target: Option<PileId>) -> bool {
        let Some(held) = self.held.take() else {
            return false;
        };
        let Some(target) = target.filter(|&t| t != held.origin) else {
            return false;
        };

        match self.state.try_move(held.origin, held.index, target, Actor::Player) {
            Some(outcome) => {
                if outcome.won {
                    self.record_win();
                }
                true
            }
            None => false,
        }
    }

    /// Handle a key command.
    pub fn key(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Undo => {
                if self.auto == AutoPlay::Off {
                    self.held = None;
                    self.state.undo();
                }
            }
            KeyCommand::Hint => {
                self.hints = solver::hints(&self.state);
            }
            KeyCommand::NewDeal => {
                self.new_deal(false);
            }
            KeyCommand::NewWinningDeal => {
                self.new_deal(true);
            }
            KeyCommand::ToggleDrawMode => {
                let mode = self.config.draw_mode.toggled();
                self.config.draw_mode = mode;
                self.state.set_draw_mode(mode);
                info!("Switched to {}", mode);
            }
            KeyCommand::AutoComplete => {
                self.held = None;
                self.auto = AutoPlay::CurrentDeal;
            }
            KeyCommand::GenerateCorpus => {
                self.held = None;
                self.auto = AutoPlay::Generate;
                self.stats = SessionStats {
                    games_played: 1,
                    ..SessionStats::default()
                };
                info!(
                    "Generating {} winning {} deal(s)",
                    self.config.corpus_target, self.config.draw_mode
                );
            }
        }
    }

    /// Advance auto-play by one step. Returns `None` when auto-play is off.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.auto == AutoPlay::Off {
            return None;
        }

        let step = solver::auto_step(&mut self.state);
        if let StepOutcome::Moved(outcome) = step {
            if outcome.won {
                self.record_win();
            }
        }

        if step.is_terminal() {
            match self.auto {
                AutoPlay::Generate => {
                    self.new_deal(false);
                }
                AutoPlay::CurrentDeal | AutoPlay::Off => self.auto = AutoPlay::Off,
            }
        }
        Some(step)
    }

    /// Stop auto-play after the current step.
    pub fn stop_auto(&mut self) {
        if self.auto != AutoPlay::Off {
            debug!("Auto-play stopped");
        }
        self.auto = AutoPlay::Off;
    }

    fn record_win(&mut self) {
        self.stats.games_won += 1;

        if !self.state.deal().is_from_corpus() {
            let mode = self.state.draw_mode();
            match self.store.append(mode, &self.state.deal().encoding()) {
                Ok(()) => self.stats.corpus_deals_found += 1,
                Err(err) => warn!("Could not record winning deal: {}", err),
            }
        }

        info!(
            "Games played {} - games won {}",
            self.stats.games_played, self.stats.games_won
        );

        if self.auto == AutoPlay::Generate && self.stats.games_won >= self.config.corpus_target {
            info!(
                "Games {} of which {} were winning deals ({:.1}% winning)",
                self.stats.games_played,
                self.stats.games_won,
                self.stats.win_rate()
            );
            self.auto = AutoPlay::Off;
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Cards currently held, if any.
    #[must_use]
    pub fn held(&self) -> Option<&Selection> {
        self.held.as_ref()
    }

    /// Candidates from the last hint request.
    #[must_use]
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.state.can_undo()
    }

    #[must_use]
    pub fn auto(&self) -> AutoPlay {
        self.auto
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CorpusUnavailableError;
    use crate::corpus::MemoryCorpus;

    /// Store whose writes always fail.
    struct ReadOnlyCorpus;

    impl DealStore for ReadOnlyCorpus {
        fn load(&self, mode: DrawMode) -> Result<Vec<String>, CorpusUnavailableError> {
            Err(CorpusUnavailableError::Empty { mode })
        }

        fn append(&mut self, _mode: DrawMode, _encoding: &str) -> Result<(), CorpusUnavailableError> {
            Err(CorpusUnavailableError::Unwritable {
                path: "read-only".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }

    fn session() -> Klondike<MemoryCorpus> {
        KlondikeBuilder::new().seed(17).build_with_store(MemoryCorpus::new())
    }

    #[test]
    fn test_builder_defaults() {
        let game = session();
        assert_eq!(game.config().draw_mode, DrawMode::One);
        assert_eq!(game.config().corpus_target, 100);
        assert_eq!(game.auto(), AutoPlay::Off);
        assert_eq!(game.stats().games_played, 1);
        assert!(game.held().is_none());
        assert!(!game.can_undo());
    }

    #[test]
    fn test_seeded_sessions_deal_alike() {
        let a = session();
        let b = session();
        assert_eq!(a.state().deal(), b.state().deal());
    }

    #[test]
    fn test_stock_click_draws() {
        let mut game = session();
        assert_eq!(game.pick_up(PileId::Stock, 0), PickUp::Drew(1));
        assert_eq!(game.state().piles().len(PileId::Waste), 1);
        assert!(game.held().is_none());
    }

    #[test]
    fn test_pick_up_and_drop_on_origin() {
        let mut game = session();

        assert_eq!(game.pick_up(PileId::Tableau3, 2), PickUp::Held { count: 1 });
        assert_eq!(game.held().unwrap().origin, PileId::Tableau3);

        assert!(!game.drop_on(Some(PileId::Tableau3)));
        assert!(game.held().is_none());
        assert_eq!(game.state().piles().len(PileId::Tableau3), 3);
    }

    #[test]
    fn test_drop_without_target() {
        let mut game = session();
        game.pick_up(PileId::Tableau7, 6);
        assert!(!game.drop_on(None));
        assert!(!game.drop_on(Some(PileId::Tableau1)));
    }

    #[test]
    fn test_toggle_draw_mode() {
        let mut game = session();
        game.key(KeyCommand::ToggleDrawMode);

        assert_eq!(game.config().draw_mode, DrawMode::Three);
        assert_eq!(game.state().draw_mode(), DrawMode::Three);
        assert_eq!(game.pick_up(PileId::Stock, 0), PickUp::Drew(3));
    }

    #[test]
    fn test_new_winning_deal_falls_back_to_random() {
        let mut game = session();
        assert_eq!(game.new_deal(true), DealSource::Random);
        assert_eq!(game.stats().games_played, 2);
    }

    #[test]
    fn test_hint_key() {
        let mut game = session();
        game.key(KeyCommand::Hint);
        assert_eq!(game.hints(), solver::hints(game.state()).as_slice());

        game.pick_up(PileId::Stock, 0);
        assert!(game.hints().is_empty());
    }

    #[test]
    fn test_auto_complete_runs_to_the_end() {
        let mut game = session();
        game.key(KeyCommand::AutoComplete);
        assert_eq!(game.auto(), AutoPlay::CurrentDeal);

        // Input is ignored during auto-play.
        assert_eq!(game.pick_up(PileId::Stock, 0), PickUp::Nothing);

        while game.tick().is_some() {}
        let status = game.status();
        assert!(status.won || status.no_more_moves);
        assert_eq!(game.auto(), AutoPlay::Off);
        assert_eq!(game.stats().games_played, 1);
    }

    #[test]
    fn test_stop_auto() {
        let mut game = session();
        game.key(KeyCommand::AutoComplete);
        assert!(game.tick().is_some());

        game.stop_auto();
        assert_eq!(game.tick(), None);
    }

    #[test]
    fn test_generate_corpus() {
        let mut game = KlondikeBuilder::new()
            .seed(5)
            .corpus_target(2)
            .build_with_store(MemoryCorpus::new());

        game.key(KeyCommand::GenerateCorpus);
        while game.tick().is_some() {}

        let stats = game.stats();
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.corpus_deals_found, 2);
        assert!(stats.games_played >= 2);
        assert_eq!(game.store().len(DrawMode::One), 2);

        // Replaying a corpus deal never appends it again.
        assert_eq!(game.new_deal(true), DealSource::Corpus);
        game.key(KeyCommand::AutoComplete);
        while game.tick().is_some() {}
        assert!(game.status().won);
        assert_eq!(game.store().len(DrawMode::One), 2);
    }

    #[test]
    fn test_generation_counts_wins_when_appends_fail() {
        let mut game = KlondikeBuilder::new()
            .seed(5)
            .corpus_target(1)
            .build_with_store(ReadOnlyCorpus);

        game.key(KeyCommand::GenerateCorpus);
        while game.tick().is_some() {}

        let stats = game.stats();
        assert_eq!(game.auto(), AutoPlay::Off);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.corpus_deals_found, 0);
    }
}
