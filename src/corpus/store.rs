//! Winning-deal corpus storage.
//!
//! One corpus per draw mode. Each line is one deal encoding: 52
//! comma-terminated card tokens followed by a newline. Lines are only ever
//! appended; sampling picks one uniformly.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::core::config::DrawMode;
use crate::core::error::CorpusUnavailableError;
use crate::core::rng::GameRng;
use crate::deal::Deal;

/// Corpus file for draw-1 deals.
pub const EASY_CORPUS_FILE: &str = "winning-deals-easy.txt";

/// Corpus file for draw-3 deals.
pub const HARD_CORPUS_FILE: &str = "winning-deals-hard.txt";

/// Persistent store of winning deal encodings, keyed by draw mode.
pub trait DealStore {
    /// All stored encodings for `mode`, in file order.
    ///
    /// An absent or empty corpus is an error, not an empty list.
    fn load(&self, mode: DrawMode) -> Result<Vec<String>, CorpusUnavailableError>;

    /// Append one encoding for `mode`.
    fn append(&mut self, mode: DrawMode, encoding: &str) -> Result<(), CorpusUnavailableError>;
}

/// Corpus backed by two text files in one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCorpus {
    dir: PathBuf,
}

impl FileCorpus {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding deals for `mode`.
    #[must_use]
    pub fn path(&self, mode: DrawMode) -> PathBuf {
        let name = match mode {
            DrawMode::One => EASY_CORPUS_FILE,
            DrawMode::Three => HARD_CORPUS_FILE,
        };
        self.dir.join(name)
    }
}

impl DealStore for FileCorpus {
    fn load(&self, mode: DrawMode) -> Result<Vec<String>, CorpusUnavailableError> {
        let path = self.path(mode);
        let contents = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CorpusUnavailableError::Missing { path: path.clone() },
            _ => CorpusUnavailableError::Unreadable {
                path: path.clone(),
                source,
            },
        })?;

        let lines: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        if lines.is_empty() {
            return Err(CorpusUnavailableError::Empty { mode });
        }
        debug!("Loaded {} deal(s) from {}", lines.len(), path.display());
        Ok(lines)
    }

    fn append(&mut self, mode: DrawMode, encoding: &str) -> Result<(), CorpusUnavailableError> {
        let path = self.path(mode);
        let unwritable = |source: std::io::Error| CorpusUnavailableError::Unwritable {
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new().create(true).append(true).open(&path).map_err(unwritable)?;
        writeln!(file, "{}", encoding).map_err(unwritable)?;

        info!("Appended winning deal to {}", path.display());
        Ok(())
    }
}

/// In-memory corpus, for tests and headless runs that should not touch disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryCorpus {
    deals: FxHashMap<DrawMode, Vec<String>>,
}

impl MemoryCorpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored encodings for `mode` (possibly empty).
    #[must_use]
    pub fn deals(&self, mode: DrawMode) -> &[String] {
        self.deals.get(&mode).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self, mode: DrawMode) -> usize {
        self.deals(mode).len()
    }
}

impl DealStore for MemoryCorpus {
    fn load(&self, mode: DrawMode) -> Result<Vec<String>, CorpusUnavailableError> {
        match self.deals.get(&mode) {
            Some(deals) if !deals.is_empty() => Ok(deals.clone()),
            _ => Err(CorpusUnavailableError::Empty { mode }),
        }
    }

    fn append(&mut self, mode: DrawMode, encoding: &str) -> Result<(), CorpusUnavailableError> {
        self.deals.entry(mode).or_default().push(encoding.to_owned());
        Ok(())
    }
}

/// Pick a stored deal for `mode` uniformly at random and decode it.
pub fn sample_deal<S: DealStore + ?Sized>(store: &S, mode: DrawMode, rng: &mut GameRng) -> crate::Result<Deal> {
    let lines = store.load(mode)?;
    let index = rng.gen_range_usize(0..lines.len());
    let deal = Deal::from_corpus_line(&lines[index])?;
    debug!("Sampled corpus deal {} of {} ({})", index + 1, lines.len(), mode);
    Ok(deal)
}
