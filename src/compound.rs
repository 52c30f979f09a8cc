// Two-token sliding window over a whitespace-tokenized phrase, composing
// per-token lookup results with a Naive-Bayes-style log-probability score
// to decide between keeping a token's own best correction, merging it with
// the previous fragment, or splitting it into two.

use tracing::debug;

use crate::config::SpellCheckerConfig;
use crate::dictionary::Dictionary;
use crate::distance::distance;
use crate::error::SpellError;
use crate::index::DeleteIndex;
use crate::lookup::lookup;
use crate::ranker::{rank, Ranker};
use crate::suggestion::{Suggestion, Verbosity};

pub fn lookup_compound(
    dictionary: &Dictionary,
    index: &DeleteIndex,
    config: &SpellCheckerConfig,
    ranker: Option<&Ranker>,
    phrase: &str,
    max_edit_distance: usize,
) -> Result<Vec<Suggestion>, SpellError> {
    if max_edit_distance > config.max_dictionary_edit_distance {
        return Err(SpellError::MaxEditDistanceExceeded {
            requested: max_edit_distance,
            limit: config.max_dictionary_edit_distance,
        });
    }

    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    if tokens.is_empty() {
        let empty = Suggestion::new(String::new(), 0, 0);
        return Ok(rank(ranker, phrase, vec![empty], Verbosity::Top));
    }

    let n = dictionary.corpus_size();
    let mut parts: Vec<Suggestion> = Vec::with_capacity(tokens.len());

    let top_lookup = |term: &str| -> Result<Option<Suggestion>, SpellError> {
        Ok(lookup(
            dictionary,
            index,
            config,
            ranker,
            term,
            Verbosity::Top,
            Some(max_edit_distance),
            false,
            None,
            false,
        )?
        .into_iter()
        .next())
    };

    for token in tokens {
        let single = top_lookup(token)?.unwrap_or_else(|| Suggestion::new(token, max_edit_distance + 1, 0));

        // Try combining this token with the previous fragment's correction
        // into one dictionary lookup.
        if let Some(prev) = parts.last() {
            let combined_word = format!("{}{}", prev.term, token);
            if let Some(combined) = top_lookup(&combined_word)? {
                let separate_distance = prev.distance + single.distance;
                if combined.distance < separate_distance {
                    debug!(token, combined = %combined.term, "compound: merged with previous token");
                    parts.pop();
                    parts.push(combined);
                    continue;
                }
            }
        }

        // Try splitting this token into two, each independently corrected.
        let mut split_pick: Option<(Suggestion, Suggestion)> = None;
        if single.distance > 0 {
            let chars: Vec<char> = token.chars().collect();
            for j in 1..chars.len() {
                let left: String = chars[..j].iter().collect();
                let right: String = chars[j..].iter().collect();
                let (Some(l), Some(r)) = (top_lookup(&left)?, top_lookup(&right)?) else {
                    continue;
                };
                let total_distance = l.distance + r.distance;
                let score = log_prob(l.count, n) + log_prob(r.count, n);
                let replace = match &split_pick {
                    None => true,
                    Some((best_l, best_r)) => {
                        let best_distance = best_l.distance + best_r.distance;
                        total_distance < best_distance
                            || (total_distance == best_distance
                                && score > log_prob(best_l.count, n) + log_prob(best_r.count, n))
                    }
                };
                if replace {
                    split_pick = Some((l, r));
                }
            }
        }

        match split_pick {
            Some((l, r)) if l.distance + r.distance < single.distance => {
                debug!(token, left = %l.term, right = %r.term, "compound: split token");
                parts.push(l);
                parts.push(r);
            }
            _ => parts.push(single),
        }
    }

    let joined: String = parts
        .iter()
        .map(|s| s.term.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let aggregate_distance = distance(phrase, &joined, usize::MAX, config.distance_algorithm).unwrap_or(usize::MAX);

    let mut prob_product = 1.0f64;
    for part in &parts {
        prob_product *= part.count as f64 / n as f64;
    }
    let aggregate_count = ((n as f64) * prob_product).floor().max(0.0) as u64;

    let result = Suggestion::new(joined, aggregate_distance, aggregate_count);
    Ok(rank(ranker, phrase, vec![result], Verbosity::Top))
}

fn log_prob(count: u64, n: u64) -> f64 {
    (count.max(1) as f64 / n.max(1) as f64).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpellCheckerConfig;

    fn build(words: &[(&str, u64)]) -> (Dictionary, DeleteIndex, SpellCheckerConfig) {
        let config = SpellCheckerConfig::default();
        let mut dict = Dictionary::new();
        let mut idx = DeleteIndex::new();
        for (term, count) in words {
            dict.upsert(term, *count);
            idx.insert_term(term, config.prefix_length, config.max_dictionary_edit_distance);
        }
        (dict, idx, config)
    }

    #[test]
    fn returns_exactly_one_suggestion_with_spaced_term() {
        let (dict, idx, config) = build(&[
            ("where", 1000),
            ("is", 1000),
            ("the", 1000),
            ("love", 1000),
            ("he", 1000),
            ("had", 1000),
            ("dated", 1000),
            ("for", 1000),
            ("much", 1000),
            ("of", 1000),
            ("past", 1000),
            ("who", 1000),
            ("couldn't", 1000),
            ("read", 1000),
            ("in", 1000),
            ("sixth", 1000),
            ("grade", 1000),
        ]);
        let result = lookup_compound(
            &dict,
            &idx,
            &config,
            None,
            "whereis th elove hehad dated forImuch of thepast who couqdn'tread in sixtgrade",
            2,
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        assert!(result[0].term.contains(' '));
        assert!(!result[0].term.starts_with(' '));
        assert!(!result[0].term.ends_with(' '));
    }

    #[test]
    fn simple_two_word_phrase_corrects_each_token() {
        let (dict, idx, config) = build(&[("hello", 100), ("world", 100)]);
        let result = lookup_compound(&dict, &idx, &config, None, "helo wrold", 2).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].term, "hello world");
    }

    #[test]
    fn rejects_max_edit_distance_over_limit() {
        let (dict, idx, config) = build(&[("hello", 1)]);
        let err = lookup_compound(&dict, &idx, &config, None, "helo world", 99).unwrap_err();
        assert_eq!(err, SpellError::MaxEditDistanceExceeded { requested: 99, limit: 2 });
    }

    #[test]
    fn empty_phrase_still_returns_single_suggestion() {
        let (dict, idx, config) = build(&[("hello", 1)]);
        let result = lookup_compound(&dict, &idx, &config, None, "   ", 2).unwrap();
        assert_eq!(result.len(), 1);
    }
}
