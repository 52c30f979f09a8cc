// Triangular dynamic program over unsegmented text, backed by a rolling
// circular buffer sized to max_segmentation_word_length (or the
// dictionary's longest term) so the DP never holds more than that many
// live compositions at once.

use tracing::debug;

use crate::config::SpellCheckerConfig;
use crate::dictionary::Dictionary;
use crate::error::SpellError;
use crate::index::DeleteIndex;
use crate::lookup::lookup;
use crate::ranker::Ranker;
use crate::suggestion::Verbosity;

// Best-scoring split of an unsegmented phrase into dictionary words,
// alongside its corrected spelling.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    pub segmented_string: String,
    pub corrected_string: String,
    pub distance_sum: i64,
    pub log_prob_sum: f64,
}

pub fn word_segmentation(
    dictionary: &Dictionary,
    index: &DeleteIndex,
    config: &SpellCheckerConfig,
    ranker: Option<&Ranker>,
    phrase: &str,
    max_edit_distance: Option<usize>,
    max_segmentation_word_length: Option<usize>,
) -> Result<Composition, SpellError> {
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

    let phrase_chars: Vec<char> = phrase.chars().collect();
    if phrase_chars.is_empty() {
        return Ok(Composition::default());
    }

    let n = dictionary.corpus_size() as f64;
    let cap = max_segmentation_word_length.unwrap_or_else(|| dictionary.max_length().max(1));
    let array_size = cap.min(phrase_chars.len()).max(1);

    debug!(phrase_len = phrase_chars.len(), array_size, "word_segmentation DP sized");

    let mut slots: Vec<Option<Composition>> = vec![None; array_size];
    let mut circular_index: i64 = -1;

    for j in 0..phrase_chars.len() {
        let imax = (phrase_chars.len() - j).min(array_size);
        for i in 1..=imax {
            let raw: String = phrase_chars[j..j + i].iter().collect();
            let raw_len = raw.chars().count() as i64;
            let part_trimmed = raw.trim();
            let trimmed_len = part_trimmed.chars().count() as i64;
            let lowered = part_trimmed.to_lowercase();

            let results = lookup(
                dictionary,
                index,
                config,
                ranker,
                &lowered,
                Verbosity::Top,
                Some(max_ed),
                false,
                None,
                false,
            )?;

            let (top_result, top_ed, top_log_prob) = match results.into_iter().next() {
                Some(best) => {
                    let term_len = best.term.chars().count() as i64;
                    let ed = (raw_len - trimmed_len) + (trimmed_len - term_len);
                    let prob = (best.count.max(1) as f64 / n).log10();
                    (best.term, ed, prob)
                }
                None => {
                    let ed = raw_len;
                    let prob = (1.0 / (n * 10f64.powf(trimmed_len.max(1) as f64))).log10();
                    (part_trimmed.to_string(), ed, prob)
                }
            };

            let destination_index = (i as i64 + circular_index).rem_euclid(array_size as i64) as usize;

            if j == 0 {
                slots[destination_index] = Some(Composition {
                    segmented_string: part_trimmed.to_string(),
                    corrected_string: top_result,
                    distance_sum: top_ed,
                    log_prob_sum: top_log_prob,
                });
                continue;
            }

            let circ_idx = circular_index.rem_euclid(array_size as i64) as usize;
            let prev = slots[circ_idx].clone();

            let candidate = match &prev {
                Some(prev_comp) => Composition {
                    segmented_string: format!("{} {}", prev_comp.segmented_string, part_trimmed),
                    corrected_string: format!("{} {}", prev_comp.corrected_string, top_result),
                    distance_sum: prev_comp.distance_sum + top_ed,
                    log_prob_sum: prev_comp.log_prob_sum + top_log_prob,
                },
                None => Composition {
                    segmented_string: part_trimmed.to_string(),
                    corrected_string: top_result,
                    distance_sum: top_ed,
                    log_prob_sum: top_log_prob,
                },
            };

            let should_replace = i == array_size
                || prev.is_none()
                || match &slots[destination_index] {
                    None => true,
                    Some(existing) => {
                        candidate.distance_sum < existing.distance_sum
                            || (candidate.distance_sum == existing.distance_sum
                                && candidate.log_prob_sum > existing.log_prob_sum)
                    }
                };

            if should_replace {
                slots[destination_index] = Some(candidate);
            }
        }

        circular_index += 1;
        if circular_index == array_size as i64 {
            circular_index = 0;
        }
    }

    let final_index = circular_index.rem_euclid(array_size as i64) as usize;
    Ok(slots[final_index].clone().unwrap_or_default())
}
