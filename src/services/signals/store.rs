//! In-memory store for the latest signal per symbol and the signal history.

use crate::types::SignalResult;
use std::collections::{HashMap, VecDeque};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Default number of history entries retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

#[derive(Debug, Default)]
struct SignalBook {
    /// Latest result per symbol.
    latest: HashMap<String, SignalResult>,
    /// Symbols in order of first evaluation.
    order: Vec<String>,
    /// Chronological log, oldest at the front.
    history: VecDeque<SignalResult>,
}

/// Latest-signal map plus a bounded chronological history.
#[derive(Debug)]
pub struct SignalStore {
    book: RwLock<SignalBook>,
    history_capacity: usize,
}

impl SignalStore {
    /// Create a store retaining at most `history_capacity` history entries.
    pub fn new(history_capacity: usize) -> Self {
        Self {
            book: RwLock::new(SignalBook::default()),
            history_capacity: history_capacity.max(1),
        }
    }

    /// Record a result: overwrite the symbol's latest entry and append to history.
    pub fn record(&self, result: SignalResult) {
        let mut book = self.write();

        if !book.latest.contains_key(&result.symbol) {
            book.order.push(result.symbol.clone());
        }
        book.latest.insert(result.symbol.clone(), result.clone());

        book.history.push_back(result);
        while book.history.len() > self.history_capacity {
            book.history.pop_front();
        }
    }

    /// Latest result for `symbol`.
    pub fn get(&self, symbol: &str) -> Option<SignalResult> {
        self.read().latest.get(symbol).cloned()
    }

    /// Latest result for every symbol, in order of first evaluation.
    pub fn all(&self) -> Vec<SignalResult> {
        let book = self.read();
        book.order
            .iter()
            .filter_map(|symbol| book.latest.get(symbol).cloned())
            .collect()
    }

    /// The most recent `limit` history entries, oldest first.
    pub fn history(&self, limit: usize) -> Vec<SignalResult> {
        let book = self.read();
        let skip = book.history.len().saturating_sub(limit);
        book.history.iter().skip(skip).cloned().collect()
    }

    /// Number of history entries currently retained.
    pub fn history_len(&self) -> usize {
        self.read().history.len()
    }

    /// Maximum number of history entries retained.
    pub fn history_capacity(&self) -> usize {
        self.history_capacity
    }

    /// Number of distinct symbols stored.
    pub fn len(&self) -> usize {
        self.read().latest.len()
    }

    /// Check if no symbol has been recorded.
    pub fn is_empty(&self) -> bool {
        self.read().latest.is_empty()
    }

    // Writers never leave the book half-updated, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, SignalBook> {
        self.book.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SignalBook> {
        self.book.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for SignalStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
