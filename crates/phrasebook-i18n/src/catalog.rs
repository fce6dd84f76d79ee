//! In-memory catalog: locale code to phrase table.

use crate::entry::{Entry, PhraseTable};
use std::collections::HashMap;

#[derive(Debug, Default)]
struct LocaleTable {
    phrases: PhraseTable,
    dirty: bool,
    /// False for locales whose code cannot name a storage blob.
    persistent: bool,
}

/// Loaded phrase tables. Tables are never removed once inserted.
#[derive(Debug, Default)]
pub struct CatalogStore {
    tables: HashMap<String, LocaleTable>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `locale` has a table.
    pub fn contains(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Insert a table read from storage (or freshly bootstrapped). Starts clean.
    pub fn insert_loaded(&mut self, locale: &str, phrases: PhraseTable) {
        self.tables.insert(
            locale.to_string(),
            LocaleTable {
                phrases,
                dirty: false,
                persistent: true,
            },
        );
    }

    /// Insert an empty table that is never persisted.
    pub fn insert_memory_only(&mut self, locale: &str) {
        self.tables.insert(locale.to_string(), LocaleTable::default());
    }

    /// Phrase table for `locale`.
    pub fn table(&self, locale: &str) -> Option<&PhraseTable> {
        self.tables.get(locale).map(|t| &t.phrases)
    }

    pub fn entry(&self, locale: &str, key: &str) -> Option<&Entry> {
        self.tables.get(locale).and_then(|t| t.phrases.get(key))
    }

    /// Insert or overwrite an entry, creating the table if needed.
    pub fn set(&mut self, locale: &str, key: &str, entry: Entry) {
        let table = self
            .tables
            .entry(locale.to_string())
            .or_insert_with(|| LocaleTable {
                persistent: true,
                ..LocaleTable::default()
            });
        table.phrases.insert(key.to_string(), entry);
        table.dirty = table.persistent;
    }

    /// Store `candidate` under `key` unless an entry already exists.
    ///
    /// Returns the stored entry and whether it was newly inserted. The shape of
    /// an existing entry always wins.
    pub fn register(&mut self, locale: &str, key: &str, candidate: Entry) -> (Entry, bool) {
        if let Some(existing) = self.entry(locale, key) {
            return (existing.clone(), false);
        }
        self.set(locale, key, candidate.clone());
        (candidate, true)
    }

    /// False for memory-only tables.
    pub fn is_persistent(&self, locale: &str) -> bool {
        self.tables.get(locale).map_or(false, |t| t.persistent)
    }

    /// True when `locale` has changes not yet written.
    pub fn is_dirty(&self, locale: &str) -> bool {
        self.tables.get(locale).map_or(false, |t| t.dirty)
    }

    pub fn mark_clean(&mut self, locale: &str) {
        if let Some(table) = self.tables.get_mut(locale) {
            table.dirty = false;
        }
    }

    /// Locales with unsaved changes, sorted.
    pub fn dirty_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self
            .tables
            .iter()
            .filter(|(_, t)| t.dirty)
            .map(|(l, _)| l.clone())
            .collect();
        locales.sort();
        locales
    }

    /// Every loaded locale, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.tables.keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Total number of phrase entries across all locales.
    pub fn phrase_count(&self) -> usize {
        self.tables.values().map(|t| t.phrases.len()).sum()
    }
}
