use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpellError {
    #[error("max_edit_distance {requested} exceeds max_dictionary_edit_distance {limit}")]
    MaxEditDistanceExceeded { requested: usize, limit: usize },

    #[error("count must be non-negative, got {0}")]
    NegativeCount(i64),

    // Not constructed by the core engine itself; kept on the public error
    // type so ingestion code built on top of this crate can report parse
    // failures through the same enum.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
