//! Engine configuration.
//!
//! - `DrawMode`: cards revealed per stock draw (1 = easy, 3 = hard)
//! - `EngineConfig`: draw mode, corpus location, generation target, seed

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of cards turned from Stock to Waste per draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMode {
    /// Draw one card (easy).
    #[default]
    One,
    /// Draw three cards (hard).
    Three,
}

impl DrawMode {
    /// Cards revealed per draw.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            DrawMode::One => 1,
            DrawMode::Three => 3,
        }
    }

    /// Parse a draw count; only 1 and 3 are valid.
    #[must_use]
    pub const fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(DrawMode::One),
            3 => Some(DrawMode::Three),
            _ => None,
        }
    }

    /// Switch between easy and hard.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            DrawMode::One => DrawMode::Three,
            DrawMode::Three => DrawMode::One,
        }
    }

    /// Difficulty label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DrawMode::One => "easy",
            DrawMode::Three => "hard",
        }
    }
}

impl std::fmt::Display for DrawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "draw-{} ({})", self.count(), self.label())
    }
}

/// Session configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cards per stock draw.
    pub draw_mode: DrawMode,

    /// Directory holding the winning-deal corpus files.
    pub corpus_dir: PathBuf,

    /// Winning deals to collect before corpus generation stops.
    pub corpus_target: u32,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::One,
            corpus_dir: PathBuf::from("."),
            corpus_target: 100,
            seed: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_draw_mode(mut self, mode: DrawMode) -> Self {
        self.draw_mode = mode;
        self
    }

    #[must_use]
    pub fn with_corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_corpus_target(mut self, target: u32) -> Self {
        self.corpus_target = target;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
