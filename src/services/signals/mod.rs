//! Trading signals service module.
//!
//! Provides technical indicator calculations, rule-based classification
//! and an in-memory store of the latest signal per symbol.

pub mod accuracy;
pub mod classifier;
pub mod engine;
pub mod indicators;
pub mod store;

pub use accuracy::{calculate_accuracy, summarize};
pub use classifier::{classify, symbol_drift, Classification};
pub use engine::{SignalEngine, DEFAULT_HISTORY_LIMIT, MIN_CANDLES};
pub use store::{SignalStore, DEFAULT_HISTORY_CAPACITY};
