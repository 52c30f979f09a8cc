use crate::suggestion::{Suggestion, Verbosity};

// A user-supplied reordering hook. Receives a non-empty suggestion list and
// returns any list in its place, including an empty one. Must be
// deterministic and side-effect-free; invoked at most once per lookup.
pub type Ranker = Box<dyn Fn(&str, Vec<Suggestion>, Verbosity) -> Vec<Suggestion> + Send + Sync>;

// Invokes the hook or falls back to the default ordering. Never called with
// an empty list.
pub fn rank(
    ranker: Option<&Ranker>,
    phrase: &str,
    suggestions: Vec<Suggestion>,
    verbosity: Verbosity,
) -> Vec<Suggestion> {
    if suggestions.is_empty() {
        return suggestions;
    }
    match ranker {
        Some(f) => f(phrase, suggestions, verbosity),
        None => {
            let mut suggestions = suggestions;
            if suggestions.len() > 1 {
                suggestions.sort();
            }
            suggestions
        }
    }
}
