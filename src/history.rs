//! Calculation history.

use std::collections::VecDeque;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Number of entries kept when no other limit is configured.
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// One completed calculation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
    /// UTC time of the calculation, e.g. `2024-05-01T12:30:00.000Z`.
    pub timestamp: String,
}

/// Bounded log of calculations, oldest first.
///
/// When the log is full, adding an entry evicts the oldest one.
#[derive(Clone, Debug)]
pub struct History {
    items: VecDeque<HistoryEntry>,
    max_items: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS)
    }
}

impl History {
    pub fn new(max_items: usize) -> Self {
        Self {
            items: VecDeque::new(),
            max_items,
        }
    }

    /// Record a calculation stamped with the current time.
    pub fn add(&mut self, expression: impl Into<String>, result: impl Into<String>) {
        let entry = HistoryEntry {
            expression: expression.into(),
            result: result.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        tracing::debug!("History: {} = {}", entry.expression, entry.result);

        self.items.push_back(entry);
        if self.items.len() > self.max_items {
            self.items.pop_front();
        }
    }

    /// Snapshot of every entry in insertion order.
    pub fn get_all(&self) -> Vec<HistoryEntry> {
        self.items.iter().cloned().collect()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.items.get(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Remove the entry at `index`. Indices outside the log, negative ones
    /// included, are ignored.
    pub fn delete(&mut self, index: isize) {
        if let Ok(index) = usize::try_from(index)
            && index < self.items.len()
        {
            self.items.remove(index);
        }
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }
}
