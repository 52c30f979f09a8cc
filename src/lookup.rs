use std::collections::{HashSet, VecDeque};

use tracing::trace;

use crate::config::SpellCheckerConfig;
use crate::dictionary::Dictionary;
use crate::distance::distance;
use crate::error::SpellError;
use crate::index::{prefix, DeleteIndex};
use crate::ranker::{rank, Ranker};
use crate::suggestion::{Suggestion, Verbosity};

#[allow(clippy::too_many_arguments)]
pub fn lookup(
    dictionary: &Dictionary,
    index: &DeleteIndex,
    config: &SpellCheckerConfig,
    ranker: Option<&Ranker>,
    phrase: &str,
    verbosity: Verbosity,
    max_edit_distance: Option<usize>,
    include_unknown: bool,
    ignore_token: Option<&str>,
    transfer_casing: bool,
) -> Result<Vec<Suggestion>, SpellError> {
    let max_ed = match max_edit_distance {
        Some(requested) if requested > config.max_dictionary_edit_distance => {
            return Err(SpellError::MaxEditDistanceExceeded {
                requested,
                limit: config.max_dictionary_edit_distance,
            });
        }
        Some(requested) => requested,
        None => config.max_dictionary_edit_distance,
    };

    let original_phrase = phrase;
    let search_phrase = if transfer_casing {
        phrase.to_lowercase()
    } else {
        phrase.to_string()
    };

    let mut suggestions: Vec<Suggestion> = Vec::new();
    let mut terminated = false;

    if search_phrase
        .chars()
        .count()
        .saturating_sub(max_ed)
        > dictionary.max_length()
    {
        trace!(phrase = %phrase, "lookup short-circuited by length bound");
        terminated = true;
    }

    if !terminated {
        if let Some(token) = ignore_token {
            if token == search_phrase {
                suggestions.push(Suggestion::new(original_phrase, 0, 1));
                if verbosity != Verbosity::All {
                    terminated = true;
                }
            }
        }
    }

    if !terminated {
        if let Some(count) = dictionary.get(&search_phrase) {
            suggestions.push(Suggestion::new(original_phrase, 0, count));
            if verbosity != Verbosity::All {
                terminated = true;
            }
        }
    }

    if !terminated && max_ed == 0 {
        terminated = true;
    }

    if !terminated {
        enumerate_candidates(
            dictionary,
            index,
            config,
            &search_phrase,
            verbosity,
            max_ed,
            &mut suggestions,
        );
    }

    if include_unknown && suggestions.is_empty() {
        suggestions.push(Suggestion::new(original_phrase, max_ed + 1, 0));
    }

    let mut suggestions = rank(ranker, original_phrase, suggestions, verbosity);

    if transfer_casing {
        for s in &mut suggestions {
            s.term = transfer_casing_onto(original_phrase, &s.term);
        }
    }

    Ok(suggestions)
}

#[allow(clippy::too_many_arguments)]
fn enumerate_candidates(
    dictionary: &Dictionary,
    index: &DeleteIndex,
    config: &SpellCheckerConfig,
    search_phrase: &str,
    verbosity: Verbosity,
    max_ed: usize,
    suggestions: &mut Vec<Suggestion>,
) {
    let prefix_length = config.prefix_length;
    let phrase_len = search_phrase.chars().count();

    let seed = prefix(search_phrase, prefix_length);
    let mut queue: VecDeque<String> = VecDeque::new();
    let mut considered_candidates: HashSet<String> = HashSet::new();
    let mut considered_suggestions: HashSet<String> = HashSet::new();

    considered_candidates.insert(seed.clone());
    queue.push_back(seed);

    let mut max_edit_distance_2 = max_ed;

    while let Some(candidate) = queue.pop_front() {
        let cand_len = candidate.chars().count();
        let phrase_prefix_len = phrase_len.min(prefix_length);

        if phrase_prefix_len.saturating_sub(cand_len) > max_edit_distance_2 {
            continue;
        }

        if let Some(bucket) = index.get(&candidate) {
            for suggestion_term in bucket {
                if considered_suggestions.contains(suggestion_term) {
                    continue;
                }

                let term_len = suggestion_term.chars().count();
                if term_len.abs_diff(phrase_len) > max_edit_distance_2 {
                    continue;
                }

                considered_suggestions.insert(suggestion_term.clone());

                let Some(dist) = distance(search_phrase, suggestion_term, max_edit_distance_2, config.distance_algorithm)
                else {
                    continue;
                };

                let count = dictionary.get(suggestion_term).unwrap_or(0);

                match verbosity {
                    Verbosity::Top => {
                        if dist < max_edit_distance_2 {
                            suggestions.clear();
                            max_edit_distance_2 = dist;
                        }
                        if dist <= max_edit_distance_2 {
                            suggestions.push(Suggestion::new(suggestion_term.clone(), dist, count));
                        }
                    }
                    Verbosity::Closest => {
                        if dist < max_edit_distance_2 {
                            suggestions.clear();
                            max_edit_distance_2 = dist;
                        }
                        if dist <= max_edit_distance_2 {
                            suggestions.push(Suggestion::new(suggestion_term.clone(), dist, count));
                        }
                    }
                    Verbosity::All => {
                        if dist <= max_ed {
                            suggestions.push(Suggestion::new(suggestion_term.clone(), dist, count));
                        }
                    }
                }
            }
        }

        // Expand candidate: delete one character at every position.
        for i in 0..cand_len {
            let deleted = delete_at(&candidate, i);
            if considered_candidates.insert(deleted.clone()) {
                let deleted_len = deleted.chars().count() as i64;
                if deleted_len >= phrase_len as i64 - max_edit_distance_2 as i64 {
                    queue.push_back(deleted);
                }
            }
        }
    }
}

fn delete_at(s: &str, index: usize) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if i != index {
            out.push(c);
        }
    }
    out
}

// Dictionary terms are stored lowercase, so this only needs to recover two
// common shapes: an all-caps original ("HELO" -> "HELLO") and a capitalized
// original ("Helo" -> "Hello"); anything else is left as-is.
fn transfer_casing_onto(original: &str, term: &str) -> String {
    let has_alpha = original.chars().any(|c| c.is_alphabetic());
    let all_upper = has_alpha && original.chars().filter(|c| c.is_alphabetic()).all(|c| c.is_uppercase());
    if all_upper {
        return term.to_uppercase();
    }
    if original.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = term.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
    }
    term.to_string()
}
