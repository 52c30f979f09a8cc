pub mod compound;
pub mod config;
pub mod dictionary;
pub mod distance;
pub mod error;
pub mod index;
pub mod lookup;
pub mod persistence;
pub mod ranker;
pub mod segmentation;
pub mod suggestion;

pub use config::SpellCheckerConfig;
pub use distance::DistanceAlgorithm;
pub use error::SpellError;
pub use persistence::PersistedDictionary;
pub use ranker::Ranker;
pub use segmentation::Composition;
pub use suggestion::{Suggestion, Verbosity};

use std::fs;
use std::io;
use std::path::Path;

use dictionary::{Dictionary, UpsertOutcome};
use index::DeleteIndex;
use tracing::info;

pub struct SpellChecker {
    config: SpellCheckerConfig,
    dictionary: Dictionary,
    index: DeleteIndex,
    ranker: Option<Ranker>,
}

impl SpellChecker {
    pub fn new(config: SpellCheckerConfig) -> Self {
        Self {
            config,
            dictionary: Dictionary::new(),
            index: DeleteIndex::new(),
            ranker: None,
        }
    }

    // Assumes `term count`, one pair per line; missing counts default to 1.
    pub fn from_word_list_file(path: impl AsRef<Path>, config: SpellCheckerConfig) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let entries: Vec<(String, u64)> = content
            .lines()
            .filter_map(|line| {
                let mut cols = line.split_whitespace();
                let term = cols.next()?;
                let count: u64 = cols.next().and_then(|c| c.parse().ok()).unwrap_or(1);
                Some((term.to_lowercase(), count))
            })
            .collect();
        let mut checker = Self::new(config);
        checker.load_dictionary_entries(entries);
        Ok(checker)
    }

    pub fn set_ranker(&mut self, ranker: Option<Ranker>) {
        self.ranker = ranker;
    }

    pub fn has_ranker(&self) -> bool {
        self.ranker.is_some()
    }

    pub fn max_length(&self) -> usize {
        self.dictionary.max_length()
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.dictionary.contains(&normalize(term))
    }

    pub fn count_threshold(&self) -> u64 {
        self.config.count_threshold
    }

    // A term whose accumulated count hasn't reached count_threshold yet is
    // held back and doesn't participate in lookups. Returns true only once
    // the term crosses the threshold and becomes a real, indexed entry.
    pub fn create_dictionary_entry(&mut self, term: &str, count: i64) -> Result<bool, SpellError> {
        if count < 0 {
            return Err(SpellError::NegativeCount(count));
        }
        let normalized = normalize(term);
        let outcome = self
            .dictionary
            .upsert_thresholded(&normalized, count as u64, self.config.count_threshold);
        if outcome == UpsertOutcome::NewReal {
            self.index.insert_term(
                &normalized,
                self.config.prefix_length,
                self.config.max_dictionary_edit_distance,
            );
        }
        Ok(outcome == UpsertOutcome::NewReal)
    }

    // Returns false (not an error) if the term was never present.
    pub fn delete_dictionary_entry(&mut self, term: &str) -> bool {
        let normalized = normalize(term);
        if self.dictionary.remove(&normalized) {
            self.index.remove_term(
                &normalized,
                self.config.prefix_length,
                self.config.max_dictionary_edit_distance,
            );
            true
        } else {
            false
        }
    }

    // Builds delete-variants for every new entry in parallel, then merges
    // them into the index under a single mutable borrow.
    pub fn load_dictionary_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut newly_inserted = Vec::new();
        for (term, count) in entries {
            let normalized = normalize(&term);
            let outcome = self
                .dictionary
                .upsert_thresholded(&normalized, count, self.config.count_threshold);
            if outcome == UpsertOutcome::NewReal {
                newly_inserted.push(normalized);
            }
        }
        info!(new_terms = newly_inserted.len(), "bulk dictionary load");
        self.index.bulk_insert(
            newly_inserted.iter().map(|s| s.as_str()),
            self.config.prefix_length,
            self.config.max_dictionary_edit_distance,
        );
    }

    #[allow(clippy::too_many_arguments)]
    pub fn lookup(
        &self,
        phrase: &str,
        verbosity: Verbosity,
        max_edit_distance: Option<usize>,
        include_unknown: bool,
        ignore_token: Option<&str>,
        transfer_casing: bool,
    ) -> Result<Vec<Suggestion>, SpellError> {
        lookup::lookup(
            &self.dictionary,
            &self.index,
            &self.config,
            self.ranker.as_ref(),
            phrase,
            verbosity,
            max_edit_distance,
            include_unknown,
            ignore_token,
            transfer_casing,
        )
    }

    pub fn lookup_compound(&self, phrase: &str, max_edit_distance: usize) -> Result<Vec<Suggestion>, SpellError> {
        compound::lookup_compound(
            &self.dictionary,
            &self.index,
            &self.config,
            self.ranker.as_ref(),
            phrase,
            max_edit_distance,
        )
    }

    pub fn word_segmentation(
        &self,
        phrase: &str,
        max_edit_distance: Option<usize>,
        max_segmentation_word_length: Option<usize>,
    ) -> Result<Composition, SpellError> {
        segmentation::word_segmentation(
            &self.dictionary,
            &self.index,
            &self.config,
            self.ranker.as_ref(),
            phrase,
            max_edit_distance,
            max_segmentation_word_length,
        )
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let persisted = PersistedDictionary {
            config: self.config.clone(),
            entries: self.dictionary.iter().map(|(t, c)| (t.to_string(), c)).collect(),
        };
        persisted.save(path)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let persisted = PersistedDictionary::load(path)?;
        let mut checker = Self::new(persisted.config);
        checker.load_dictionary_entries(persisted.entries);
        Ok(checker)
    }
}

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_entry_then_increment_sums_counts() {
        let mut checker = SpellChecker::new(SpellCheckerConfig::default());
        assert!(checker.create_dictionary_entry("hello", 10).unwrap());
        assert!(!checker.create_dictionary_entry("hello", 5).unwrap());
        assert!(checker.contains("hello"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut checker = SpellChecker::new(SpellCheckerConfig::default());
        let err = checker.create_dictionary_entry("hello", -1).unwrap_err();
        assert_eq!(err, SpellError::NegativeCount(-1));
    }

    #[test]
    fn delete_entry_removes_from_index_too() {
        let mut checker = SpellChecker::new(SpellCheckerConfig::default());
        checker.create_dictionary_entry("hello", 10).unwrap();
        assert!(checker.delete_dictionary_entry("hello"));
        assert!(!checker.contains("hello"));
        let result = checker.lookup("helo", Verbosity::All, Some(2), false, None, false).unwrap();
        assert!(result.is_empty());
        assert!(!checker.delete_dictionary_entry("hello"));
    }

    #[test]
    fn normalization_trims_and_lowercases() {
        let mut checker = SpellChecker::new(SpellCheckerConfig::default());
        checker.create_dictionary_entry("  Hello  ", 10).unwrap();
        assert!(checker.contains("hello"));
        assert!(checker.contains("HELLO"));
    }

    #[test]
    fn custom_ranker_overrides_and_clearing_it_restores_default_order() {
        let mut checker = SpellChecker::new(SpellCheckerConfig::default());
        for (term, count) in [("xbc", 3), ("axc", 2), ("abx", 1)] {
            checker.create_dictionary_entry(term, count).unwrap();
        }
        checker.set_ranker(Some(Box::new(|_: &str, mut s: Vec<Suggestion>, _| {
            s.sort_by(|a, b| a.term.cmp(&b.term));
            s
        })));
        let result = checker.lookup("abc", Verbosity::All, Some(1), false, None, false).unwrap();
        let terms: Vec<_> = result.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(terms, vec!["abx", "axc", "xbc"]);

        checker.set_ranker(None);
        let result = checker.lookup("abc", Verbosity::All, Some(1), false, None, false).unwrap();
        let terms: Vec<_> = result.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(terms, vec!["xbc", "axc", "abx"]);
    }

    #[test]
    fn bulk_load_matches_one_by_one_inserts() {
        let mut bulk = SpellChecker::new(SpellCheckerConfig::default());
        bulk.load_dictionary_entries(vec![
            ("hello".to_string(), 10),
            ("help".to_string(), 5),
            ("heap".to_string(), 2),
        ]);

        let mut sequential = SpellChecker::new(SpellCheckerConfig::default());
        sequential.create_dictionary_entry("hello", 10).unwrap();
        sequential.create_dictionary_entry("help", 5).unwrap();
        sequential.create_dictionary_entry("heap", 2).unwrap();

        let mut a = bulk.lookup("helo", Verbosity::All, Some(2), false, None, false).unwrap();
        let mut b = sequential.lookup("helo", Verbosity::All, Some(2), false, None, false).unwrap();
        a.sort_by(|x, y| x.term.cmp(&y.term));
        b.sort_by(|x, y| x.term.cmp(&y.term));
        let a_terms: Vec<_> = a.iter().map(|s| s.term.clone()).collect();
        let b_terms: Vec<_> = b.iter().map(|s| s.term.clone()).collect();
        assert_eq!(a_terms, b_terms);
    }

    #[test]
    fn count_threshold_holds_back_entries_until_crossed() {
        let config = SpellCheckerConfig::default().with_count_threshold(5);
        let mut checker = SpellChecker::new(config);

        assert!(!checker.create_dictionary_entry("rare", 2).unwrap());
        assert!(!checker.contains("rare"));
        let result = checker.lookup("rare", Verbosity::All, Some(0), false, None, false).unwrap();
        assert!(result.is_empty());

        assert!(checker.create_dictionary_entry("rare", 4).unwrap());
        assert!(checker.contains("rare"));
        let result = checker.lookup("rare", Verbosity::All, Some(0), false, None, false).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].count, 6);
    }

    #[test]
    fn save_and_load_round_trip_preserves_suggestions() {
        let path = std::env::temp_dir().join(format!("symcorrect_test_{}.json", std::process::id()));

        let mut checker = SpellChecker::new(SpellCheckerConfig::default());
        checker.create_dictionary_entry("hello", 10).unwrap();
        checker.create_dictionary_entry("help", 5).unwrap();
        checker.save_to_file(&path).unwrap();

        let reloaded = SpellChecker::load_from_file(&path).unwrap();
        let result = reloaded.lookup("helo", Verbosity::All, Some(2), false, None, false).unwrap();
        assert!(result.iter().any(|s| s.term == "hello"));

        let _ = std::fs::remove_file(&path);
    }
}
