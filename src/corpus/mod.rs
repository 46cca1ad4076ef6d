//! The winning-deal corpus.
//!
//! Deals the auto-player has won are recorded so they can be replayed
//! later as "winning deals". `FileCorpus` is the on-disk store;
//! `MemoryCorpus` keeps everything in memory.

pub mod store;

pub use store::{sample_deal, DealStore, FileCorpus, MemoryCorpus, EASY_CORPUS_FILE, HARD_CORPUS_FILE};
