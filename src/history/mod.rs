//! In-memory clipboard history.
//!
//! [`History`] keeps captured items oldest-first with a bounded capacity and a
//! separate favorites list. Items are unique: recording a value that already
//! exists moves it to the newest position.

pub mod format;
pub mod search;

use std::collections::{HashSet, VecDeque};

use thiserror::Error;

pub use format::{format_list_item, reverse_lines, split_lines};
pub use search::{SearchCursor, find_matches};

/// Errors from index-based history operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("No history item at position {index} (history has {len} items)")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    items: VecDeque<String>,
    favorites: Vec<String>,
    max: usize,
}

impl History {
    pub fn new(max: usize) -> Self {
        Self { items: VecDeque::new(), favorites: Vec::new(), max: max.max(1) }
    }

    /// Restore from persisted lists, keeping only the newest `max` items
    pub fn from_parts(items: Vec<String>, favorites: Vec<String>, max: usize) -> Self {
        let mut history = Self::new(max);
        history.items.extend(items);
        history.evict();
        history.favorites = favorites;
        history
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    pub fn is_favorite(&self, text: &str) -> bool {
        self.favorites.iter().any(|f| f == text)
    }

    /// Record a new item as the newest entry
    ///
    /// Returns false when `text` is empty or already the newest item.
    pub fn push(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.is_empty() || self.items.back() == Some(&text) {
            return false;
        }

        self.items.retain(|item| item != &text);
        self.items.push_back(text);
        self.evict();
        true
    }

    /// Remove the item at `index`, dropping it from favorites as well
    pub fn remove(&mut self, index: usize) -> Result<String, HistoryError> {
        let removed = self
            .items
            .remove(index)
            .ok_or(HistoryError::OutOfRange { index, len: self.items.len() })?;
        self.favorites.retain(|f| f != &removed);
        Ok(removed)
    }

    /// Drop all history items; favorites are kept
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Flip the favorite state of the item at `index`, returning the new state
    pub fn toggle_favorite(&mut self, index: usize) -> Result<bool, HistoryError> {
        let text = self
            .items
            .get(index)
            .cloned()
            .ok_or(HistoryError::OutOfRange { index, len: self.items.len() })?;

        if self.is_favorite(&text) {
            self.favorites.retain(|f| f != &text);
            Ok(false)
        } else {
            self.favorites.push(text);
            Ok(true)
        }
    }

    /// Join the items at `indices` (ascending, out-of-range skipped) with newlines
    pub fn combine(&self, indices: &[usize]) -> Option<String> {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let parts: Vec<&str> = sorted.iter().filter_map(|&i| self.get(i)).collect();
        let combined = parts.join("\n");
        if combined.is_empty() { None } else { Some(combined) }
    }

    /// Change capacity, keeping the newest items
    pub fn set_capacity(&mut self, max: usize) {
        self.max = max.max(1);
        self.evict();
    }

    /// Merge imported lists into the current history
    ///
    /// Imported items are appended after the existing ones and the combined list
    /// is deduplicated so that each value sits at its last occurrence. Blank
    /// imported items are skipped. Favorites, when supplied, replace the
    /// current favorites outright.
    pub fn merge_import(&mut self, items: Option<Vec<String>>, favorites: Option<Vec<String>>) {
        if let Some(imported) = items {
            let merged: Vec<String> = self
                .items
                .drain(..)
                .chain(imported.into_iter().filter(|item| !item.trim().is_empty()))
                .collect();

            let mut seen = HashSet::new();
            let mut deduped: Vec<String> =
                merged.into_iter().rev().filter(|item| seen.insert(item.clone())).collect();
            deduped.reverse();

            self.items = deduped.into();
            self.evict();
        }

        if let Some(favorites) = favorites {
            self.favorites = favorites;
        }
    }

    /// Case-insensitive substring search, see [`find_matches`]
    pub fn search(&self, query: &str) -> Vec<usize> {
        find_matches(self.items(), query)
    }

    fn evict(&mut self) {
        while self.items.len() > self.max {
            self.items.pop_front();
        }
    }
}
