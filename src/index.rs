use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

#[derive(Debug, Default)]
pub struct DeleteIndex {
    buckets: HashMap<String, HashSet<String>>,
}

impl DeleteIndex {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }

    pub fn get(&self, variant: &str) -> Option<&HashSet<String>> {
        self.buckets.get(variant)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn insert_term(&mut self, term: &str, prefix_length: usize, max_dictionary_edit_distance: usize) {
        for variant in edits(&prefix(term, prefix_length), max_dictionary_edit_distance) {
            self.buckets
                .entry(variant)
                .or_default()
                .insert(term.to_string());
        }
    }

    // Drops buckets left empty after removal so lookups don't carry dead weight.
    pub fn remove_term(&mut self, term: &str, prefix_length: usize, max_dictionary_edit_distance: usize) {
        for variant in edits(&prefix(term, prefix_length), max_dictionary_edit_distance) {
            if let Some(bucket) = self.buckets.get_mut(&variant) {
                bucket.remove(term);
                if bucket.is_empty() {
                    self.buckets.remove(&variant);
                }
            }
        }
    }

    // Builds delete-variants for many terms in parallel, then merges them
    // into the index under a single mutable borrow.
    pub fn bulk_insert<'a, I>(&mut self, terms: I, prefix_length: usize, max_dictionary_edit_distance: usize)
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: Send,
    {
        let per_term: Vec<(String, HashSet<String>)> = terms
            .into_iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|term| {
                (
                    term.to_string(),
                    edits(&prefix(term, prefix_length), max_dictionary_edit_distance),
                )
            })
            .collect();

        for (term, variants) in per_term {
            for variant in variants {
                self.buckets.entry(variant).or_default().insert(term.clone());
            }
        }
    }
}

pub(crate) fn prefix(term: &str, prefix_length: usize) -> String {
    term.chars().take(prefix_length).collect()
}

// Every string obtainable by deleting up to max_depth characters from term,
// including the identity term itself. Depth-first with memoization so a
// variant is only ever inserted once even if reachable by multiple paths.
pub fn edits(term: &str, max_depth: usize) -> HashSet<String> {
    let mut out = HashSet::new();
    out.insert(term.to_string());
    edits_recursive(term, 0, max_depth, &mut out);
    out
}

fn edits_recursive(term: &str, depth: usize, max_depth: usize, out: &mut HashSet<String>) {
    if depth == max_depth {
        return;
    }
    let chars: Vec<char> = term.chars().collect();
    for i in 0..chars.len() {
        let mut variant = String::with_capacity(term.len());
        variant.extend(chars[..i].iter());
        variant.extend(chars[i + 1..].iter());
        if out.insert(variant.clone()) {
            edits_recursive(&variant, depth + 1, max_depth, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_includes_identity_term() {
        let e = edits("abc", 2);
        assert!(e.contains("abc"));
    }

    #[test]
    fn edits_zero_depth_is_identity_only() {
        let e = edits("abc", 0);
        assert_eq!(e.len(), 1);
        assert!(e.contains("abc"));
    }

    #[test]
    fn edits_exhaustive_at_depth_two() {
        let e = edits("abc", 2);
        for s in ["abc", "ab", "ac", "bc", "a", "b", "c", ""] {
            assert!(e.contains(s), "missing variant {s}");
        }
    }

    #[test]
    fn index_roundtrips_membership_for_identity_and_deletes() {
        let mut idx = DeleteIndex::new();
        idx.insert_term("hello", 7, 2);
        for variant in edits("hello", 2) {
            let bucket = idx.get(&variant).unwrap();
            assert!(bucket.contains("hello"));
        }
    }

    #[test]
    fn remove_term_drops_empty_buckets() {
        let mut idx = DeleteIndex::new();
        idx.insert_term("cat", 7, 1);
        assert!(idx.get("at").is_some());
        idx.remove_term("cat", 7, 1);
        assert!(idx.get("at").is_none());
    }

    #[test]
    fn prefix_length_truncates_deletion_basis() {
        let mut idx = DeleteIndex::new();
        // prefix_length = 3 means only "hel" (of "hello") is the deletion basis.
        idx.insert_term("hello", 3, 1);
        assert!(idx.get("hel").unwrap().contains("hello"));
        assert!(idx.get("he").unwrap().contains("hello"));
        // "hell" (a delete of the full word, not of the 3-char prefix) must
        // not appear as a key at all.
        assert!(idx.get("hell").is_none());
    }

    #[test]
    fn bulk_insert_matches_sequential_insert() {
        let mut sequential = DeleteIndex::new();
        for t in ["hello", "help", "heap"] {
            sequential.insert_term(t, 7, 2);
        }
        let mut bulk = DeleteIndex::new();
        bulk.bulk_insert(["hello", "help", "heap"], 7, 2);
        assert_eq!(sequential.len(), bulk.len());
        for variant in ["hel", "he", "h", "el"] {
            assert_eq!(
                sequential.get(variant).map(|s| {
                    let mut v: Vec<_> = s.iter().cloned().collect();
                    v.sort();
                    v
                }),
                bulk.get(variant).map(|s| {
                    let mut v: Vec<_> = s.iter().cloned().collect();
                    v.sort();
                    v
                })
            );
        }
    }
}
