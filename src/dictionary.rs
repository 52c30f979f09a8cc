use std::collections::HashMap;

// Corpus-size prior used when no real corpus size is known yet.
pub const DEFAULT_CORPUS_SIZE: u64 = 1024 * 1024 * 1024 * 1024;

// Outcome of a threshold-aware upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    // The term just crossed count_threshold for the first time; the caller
    // must build its delete-index entries.
    NewReal,
    // The term was already a real entry; its count was incremented.
    UpdatedReal,
    // Still below count_threshold; held back, not yet visible to lookups.
    Pending,
}

#[derive(Debug, Default)]
pub struct Dictionary {
    terms: HashMap<String, u64>,
    below_threshold: HashMap<String, u64>,
    max_length: usize,
    corpus_size: u64,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            terms: HashMap::new(),
            below_threshold: HashMap::new(),
            max_length: 0,
            corpus_size: 0,
        }
    }

    pub fn get(&self, term: &str) -> Option<u64> {
        self.terms.get(term).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn corpus_size(&self) -> u64 {
        if self.corpus_size == 0 {
            DEFAULT_CORPUS_SIZE
        } else {
            self.corpus_size
        }
    }

    // Insert or increment with a threshold of 1, so any non-zero count is
    // immediately real. Convenience wrapper for callers that don't need
    // staged accumulation.
    pub fn upsert(&mut self, term: &str, count: u64) -> bool {
        matches!(self.upsert_thresholded(term, count, 1), UpsertOutcome::NewReal)
    }

    pub fn upsert_thresholded(&mut self, term: &str, count: u64, threshold: u64) -> UpsertOutcome {
        if let Some(existing) = self.terms.get_mut(term) {
            *existing = existing.saturating_add(count);
            self.corpus_size = self.corpus_size.saturating_add(count);
            return UpsertOutcome::UpdatedReal;
        }

        let pending = self
            .below_threshold
            .entry(term.to_string())
            .or_insert(0);
        *pending = pending.saturating_add(count);

        if *pending >= threshold.max(1) {
            let total = self.below_threshold.remove(term).unwrap();
            self.terms.insert(term.to_string(), total);
            self.max_length = self.max_length.max(term.chars().count());
            self.corpus_size = self.corpus_size.saturating_add(total);
            UpsertOutcome::NewReal
        } else {
            UpsertOutcome::Pending
        }
    }

    // Removes a term from either the real store or the staging area.
    // Returns true only if it was a real entry.
    pub fn remove(&mut self, term: &str) -> bool {
        self.below_threshold.remove(term);
        if let Some(count) = self.terms.remove(term) {
            self.corpus_size = self.corpus_size.saturating_sub(count);
            if term.chars().count() == self.max_length {
                self.max_length = self.terms.keys().map(|t| t.chars().count()).max().unwrap_or(0);
            }
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
